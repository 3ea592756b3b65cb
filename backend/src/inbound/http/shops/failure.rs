//! Maps shop service failures onto HTTP outcomes.
//!
//! | failure            | outcome                                         |
//! |--------------------|-------------------------------------------------|
//! | `NotFound`         | terminal `404`                                  |
//! | `ValidationFailed` | back to the form with the service's field errors |
//! | `NotCreated`       | back to the form, message keyed `name`          |
//! | `NotUpdated`       | back to the form, message keyed `title`         |
//! | `NotDeleted`       | back to the form, message keyed `id`            |

use tracing::warn;

use crate::domain::ports::ShopServiceError;
use crate::domain::{Error, FieldErrors};
use crate::inbound::http::page::{ActionOutcome, NamedRoute};

/// Translate `err` into the response outcome for a request whose form lives
/// at `form`.
///
/// `NotFound` is returned as `Err` so handlers stop with `?`; every other
/// kind becomes a back-with-errors outcome.
pub(crate) fn outcome_for(err: ShopServiceError, form: NamedRoute) -> Result<ActionOutcome, Error> {
    warn!(kind = err.kind(), error = %err, "shop action failed");
    let errors = match err {
        ShopServiceError::NotFound { id } => {
            return Err(Error::not_found(format!("shop {id} not found")));
        }
        ShopServiceError::ValidationFailed { errors } => errors,
        ShopServiceError::NotCreated { message } => {
            FieldErrors::single("name", format!("Unable to create shop: {message}"))
        }
        ShopServiceError::NotUpdated { message } => {
            FieldErrors::single("title", format!("Unable to update shop: {message}"))
        }
        ShopServiceError::NotDeleted { message } => {
            FieldErrors::single("id", format!("Unable to delete shop: {message}"))
        }
    };
    Ok(ActionOutcome::BackWithErrors {
        errors,
        fallback: form,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ErrorCode, ShopId};
    use rstest::rstest;

    fn back_errors(outcome: Result<ActionOutcome, Error>) -> (FieldErrors, NamedRoute) {
        match outcome {
            Ok(ActionOutcome::BackWithErrors { errors, fallback }) => (errors, fallback),
            other => panic!("expected back-with-errors, got {other:?}"),
        }
    }

    #[rstest]
    fn not_found_is_terminal() {
        let err = outcome_for(
            ShopServiceError::not_found(ShopId::new(9)),
            NamedRoute::ShopsIndex,
        )
        .expect_err("terminal");
        assert_eq!(err.code(), ErrorCode::NotFound);
    }

    #[rstest]
    fn validation_errors_pass_through_untouched() {
        let errors: FieldErrors = [
            ("title", "The title field is required."),
            ("url", "The url must be a valid URL."),
        ]
        .into_iter()
        .collect();
        let (flashed, fallback) = back_errors(outcome_for(
            ShopServiceError::validation_failed(errors.clone()),
            NamedRoute::ShopsCreate,
        ));
        assert_eq!(flashed, errors);
        assert_eq!(fallback, NamedRoute::ShopsCreate);
    }

    #[rstest]
    #[case(ShopServiceError::not_created("disk full"), "name", "Unable to create shop: disk full")]
    #[case(ShopServiceError::not_updated("locked"), "title", "Unable to update shop: locked")]
    #[case(ShopServiceError::not_deleted("in use"), "id", "Unable to delete shop: in use")]
    fn operational_failures_become_single_keyed_message(
        #[case] err: ShopServiceError,
        #[case] field: &str,
        #[case] message: &str,
    ) {
        let (errors, _) = back_errors(outcome_for(err, NamedRoute::ShopsIndex));
        assert_eq!(errors.iter().count(), 1);
        assert_eq!(errors.messages(field), Some(&[message.to_owned()][..]));
    }
}
