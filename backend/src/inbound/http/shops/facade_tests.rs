//! Unit tests for shop action dispatch.

use super::*;
use crate::domain::ports::{MockShopPolicy, MockShopService, ShopServiceError};
use crate::domain::{ErrorCode, Shop, UserId};
use chrono::{TimeZone, Utc};
use mockall::Sequence;
use pagination::Page;
use rstest::{fixture, rstest};

#[fixture]
fn caller() -> Caller {
    Caller::new(UserId::random())
}

#[fixture]
fn base() -> Url {
    Url::parse("http://localhost:8080/shops").expect("valid url")
}

fn acme() -> Shop {
    let created_at = Utc
        .with_ymd_and_hms(2026, 5, 1, 12, 0, 0)
        .single()
        .expect("valid timestamp");
    Shop::new(ShopId::new(1), "Acme", "https://acme.test", created_at)
}

fn allow_all() -> MockShopPolicy {
    let mut policy = MockShopPolicy::new();
    policy.expect_allows().return_const(true);
    policy
}

fn deny(denied: ShopAction) -> MockShopPolicy {
    let mut policy = MockShopPolicy::new();
    policy
        .expect_allows()
        .returning(move |_, action| action != denied);
    policy
}

fn form(title: Option<&str>, url: Option<&str>) -> SubmittedForm {
    let form = ShopForm {
        title: title.map(str::to_owned),
        url: url.map(str::to_owned),
    };
    let body = serde_json::to_vec(&form).expect("form serialises");
    SubmittedForm::new(Some("application/json"), body)
}

async fn dispatch(
    facade: &ShopFacade<'_>,
    caller: &Caller,
    action: ShopAction,
    base: &Url,
) -> Result<ActionOutcome, Error> {
    let valid = || form(Some("Acme"), Some("https://acme.test"));
    match action {
        ShopAction::ViewAny => {
            facade
                .index(caller, ShopIndexParams::default(), base)
                .await
        }
        ShopAction::Create => {
            facade.create_form(caller)?;
            facade.store(caller, &valid()).await
        }
        ShopAction::View => facade.show(caller, "1").await,
        ShopAction::Update => {
            facade.edit(caller, "1").await?;
            facade.update(caller, "1", &valid()).await
        }
        ShopAction::Delete => facade.destroy(caller, "1").await,
    }
}

#[rstest]
#[case(ShopAction::ViewAny)]
#[case(ShopAction::Create)]
#[case(ShopAction::View)]
#[case(ShopAction::Update)]
#[case(ShopAction::Delete)]
#[tokio::test]
async fn denied_actions_never_reach_the_service(
    caller: Caller,
    base: Url,
    #[case] action: ShopAction,
) {
    // No expectations: any service call panics.
    let service = MockShopService::new();
    let policy = deny(action);
    let facade = ShopFacade::new(&service, &policy, 15);

    let err = dispatch(&facade, &caller, action, &base)
        .await
        .expect_err("denied");
    assert_eq!(err.code(), ErrorCode::Forbidden);
}

#[rstest]
#[tokio::test]
async fn store_creates_once_and_redirects_to_index(caller: Caller) {
    let mut service = MockShopService::new();
    service
        .expect_create()
        .withf(|draft| draft.title == "Acme" && draft.url == "https://acme.test")
        .times(1)
        .returning(|_| Ok(acme()));
    let policy = allow_all();
    let facade = ShopFacade::new(&service, &policy, 15);

    let outcome = facade
        .store(&caller, &form(Some(" Acme "), Some("https://acme.test")))
        .await
        .expect("stored");
    assert_eq!(
        outcome,
        ActionOutcome::RedirectToRoute(NamedRoute::ShopsIndex)
    );
}

#[rstest]
#[tokio::test]
async fn store_with_missing_title_goes_back_without_calling_create(caller: Caller) {
    let service = MockShopService::new();
    let policy = allow_all();
    let facade = ShopFacade::new(&service, &policy, 15);

    let outcome = facade
        .store(&caller, &form(None, Some("https://acme.test")))
        .await
        .expect("handled");
    assert_eq!(
        outcome,
        ActionOutcome::BackWithErrors {
            errors: FieldErrors::single("title", "The title field is required."),
            fallback: NamedRoute::ShopsCreate,
        }
    );
}

#[rstest]
#[tokio::test]
async fn store_surfaces_service_validation_errors(caller: Caller) {
    let errors = FieldErrors::single("url", "The url must be a valid URL.");
    let returned = errors.clone();
    let mut service = MockShopService::new();
    service
        .expect_create()
        .times(1)
        .returning(move |_| Err(ShopServiceError::validation_failed(returned.clone())));
    let policy = allow_all();
    let facade = ShopFacade::new(&service, &policy, 15);

    let outcome = facade
        .store(&caller, &form(Some("Acme"), Some("not a url")))
        .await
        .expect("handled");
    assert_eq!(
        outcome,
        ActionOutcome::BackWithErrors {
            errors,
            fallback: NamedRoute::ShopsCreate,
        }
    );
}

#[rstest]
#[case(ShopAction::View)]
#[case(ShopAction::Update)]
#[case(ShopAction::Delete)]
#[tokio::test]
async fn missing_shop_short_circuits_to_not_found(
    caller: Caller,
    base: Url,
    #[case] action: ShopAction,
) {
    let mut service = MockShopService::new();
    service
        .expect_get_by_id()
        .returning(|id| Err(ShopServiceError::not_found(id)));
    service.expect_update().never();
    service.expect_delete().never();
    let policy = allow_all();
    let facade = ShopFacade::new(&service, &policy, 15);

    let err = dispatch(&facade, &caller, action, &base)
        .await
        .expect_err("missing");
    assert_eq!(err.code(), ErrorCode::NotFound);
}

#[rstest]
#[case("abc")]
#[case("-3")]
#[tokio::test]
async fn non_numeric_ids_are_not_found(caller: Caller, #[case] raw: &str) {
    let service = MockShopService::new();
    let policy = allow_all();
    let facade = ShopFacade::new(&service, &policy, 15);

    let err = facade.show(&caller, raw).await.expect_err("not found");
    assert_eq!(err.code(), ErrorCode::NotFound);
}

#[rstest]
#[tokio::test]
async fn destroy_resolves_then_deletes_then_goes_back(caller: Caller) {
    let mut seq = Sequence::new();
    let mut service = MockShopService::new();
    service
        .expect_get_by_id()
        .withf(|id| *id == ShopId::new(1))
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_| Ok(acme()));
    service
        .expect_delete()
        .withf(|id| *id == ShopId::new(1))
        .times(1)
        .in_sequence(&mut seq)
        .returning(|_| Ok(()));
    let policy = allow_all();
    let facade = ShopFacade::new(&service, &policy, 15);

    let outcome = facade.destroy(&caller, "1").await.expect("deleted");
    assert_eq!(
        outcome,
        ActionOutcome::RedirectBack {
            fallback: NamedRoute::ShopsIndex
        }
    );
}

#[rstest]
#[tokio::test]
async fn failed_update_goes_back_to_edit_form(caller: Caller) {
    let mut service = MockShopService::new();
    service.expect_get_by_id().returning(|_| Ok(acme()));
    service
        .expect_update()
        .withf(|_, changes| changes.title.as_deref() == Some("Acme 2") && changes.url.is_none())
        .times(1)
        .returning(|_, _| Err(ShopServiceError::not_updated("locked")));
    let policy = allow_all();
    let facade = ShopFacade::new(&service, &policy, 15);

    let outcome = facade
        .update(&caller, "1", &form(Some("Acme 2"), Some("  ")))
        .await
        .expect("handled");
    assert_eq!(
        outcome,
        ActionOutcome::BackWithErrors {
            errors: FieldErrors::single("title", "Unable to update shop: locked"),
            fallback: NamedRoute::ShopsEdit(ShopId::new(1)),
        }
    );
}

#[rstest]
#[tokio::test]
async fn index_passes_trimmed_search_and_page(caller: Caller, base: Url) {
    let mut service = MockShopService::new();
    service
        .expect_list()
        .withf(|query| {
            query.search() == Some("acme")
                && query.page().page() == 2
                && query.page().per_page() == 5
        })
        .times(1)
        .returning(|query| Page::empty(query.page()));
    let policy = allow_all();
    let facade = ShopFacade::new(&service, &policy, 15);

    let params = ShopIndexParams {
        q: Some("  acme ".into()),
        page: Some("2".into()),
        per_page: Some("5".into()),
    };
    let outcome = facade.index(&caller, params, &base).await.expect("listed");
    let ActionOutcome::Render(render) = outcome else {
        panic!("expected a rendered page");
    };
    assert_eq!(render.component(), "Shops/Index");
    let shops = render.prop("shops").expect("shops prop");
    assert_eq!(shops["data"], serde_json::json!([]));
    assert_eq!(shops["meta"]["current_page"], 2);
}

#[rstest]
#[case(Some("0"), None)]
#[case(None, Some("500"))]
#[case(Some("two"), None)]
#[tokio::test]
async fn invalid_paging_is_rejected_before_listing(
    caller: Caller,
    base: Url,
    #[case] page: Option<&str>,
    #[case] per_page: Option<&str>,
) {
    let mut service = MockShopService::new();
    service.expect_list().never();
    let policy = allow_all();
    let facade = ShopFacade::new(&service, &policy, 15);

    let params = ShopIndexParams {
        q: None,
        page: page.map(str::to_owned),
        per_page: per_page.map(str::to_owned),
    };
    let err = facade
        .index(&caller, params, &base)
        .await
        .expect_err("rejected");
    assert_eq!(err.code(), ErrorCode::InvalidRequest);
}

#[rstest]
#[case(None, "")]
#[case(Some("text/plain"), "title=Acme")]
#[case(Some("application/json"), "{not json")]
#[tokio::test]
async fn denial_precedes_body_decoding(
    caller: Caller,
    #[case] content_type: Option<&str>,
    #[case] body: &'static str,
) {
    let service = MockShopService::new();
    let policy = deny(ShopAction::Create);
    let facade = ShopFacade::new(&service, &policy, 15);

    let submitted = SubmittedForm::new(content_type, body);
    let err = facade
        .store(&caller, &submitted)
        .await
        .expect_err("denied");
    assert_eq!(err.code(), ErrorCode::Forbidden);
}

#[rstest]
#[tokio::test]
async fn update_without_a_body_applies_no_changes(caller: Caller) {
    let mut service = MockShopService::new();
    service.expect_get_by_id().returning(|_| Ok(acme()));
    service
        .expect_update()
        .withf(|_, changes| changes.title.is_none() && changes.url.is_none())
        .times(1)
        .returning(|_, _| Ok(acme()));
    let policy = allow_all();
    let facade = ShopFacade::new(&service, &policy, 15);

    let outcome = facade
        .update(&caller, "1", &SubmittedForm::default())
        .await
        .expect("updated");
    assert_eq!(
        outcome,
        ActionOutcome::RedirectToRoute(NamedRoute::ShopsIndex)
    );
}

#[rstest]
#[tokio::test]
async fn permitted_unsupported_body_is_an_invalid_request(caller: Caller) {
    let mut service = MockShopService::new();
    service.expect_create().never();
    let policy = allow_all();
    let facade = ShopFacade::new(&service, &policy, 15);

    let submitted = SubmittedForm::new(Some("text/plain"), "title=Acme");
    let err = facade
        .store(&caller, &submitted)
        .await
        .expect_err("rejected");
    assert_eq!(err.code(), ErrorCode::InvalidRequest);
}
