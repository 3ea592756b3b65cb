//! Session helpers to keep HTTP handlers free of framework-specific logic.
//!
//! Wraps the Actix session so handlers only deal with domain values: the
//! signed-in user, the [`Caller`] built from it, and field errors flashed
//! between a failed form submission and the next rendered page.

use actix_session::Session;
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use futures_util::future::LocalBoxFuture;

use crate::domain::{Caller, Error, FieldErrors, UserId};

pub(crate) const USER_ID_KEY: &str = "user_id";
pub(crate) const FLASH_ERRORS_KEY: &str = "errors";

/// Newtype wrapper that exposes higher-level session operations.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    /// Construct a new wrapper from the underlying Actix session.
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// Persist the authenticated user's id in the session cookie.
    pub fn persist_user(&self, user_id: &UserId) -> Result<(), Error> {
        self.0
            .insert(USER_ID_KEY, user_id.to_string())
            .map_err(|error| Error::internal(format!("failed to persist session: {error}")))
    }

    /// Fetch the current user id from the session, if present.
    pub fn user_id(&self) -> Result<Option<UserId>, Error> {
        let id = self
            .0
            .get::<String>(USER_ID_KEY)
            .map_err(|error| Error::internal(format!("failed to read session: {error}")))?;
        match id {
            Some(raw) => match UserId::new(raw) {
                Ok(id) => Ok(Some(id)),
                Err(error) => {
                    tracing::warn!("invalid user id in session cookie: {error}");
                    Ok(None)
                }
            },
            None => Ok(None),
        }
    }

    /// Require an authenticated user id or return `401 Unauthorized`.
    pub fn require_user_id(&self) -> Result<UserId, Error> {
        self.user_id()?
            .ok_or_else(|| Error::unauthorized("login required"))
    }

    /// The caller every shop action runs on behalf of.
    pub fn caller(&self) -> Result<Caller, Error> {
        self.require_user_id().map(Caller::new)
    }

    /// Store field errors for the next rendered page.
    pub fn flash_errors(&self, errors: &FieldErrors) -> Result<(), Error> {
        self.0
            .insert(FLASH_ERRORS_KEY, errors)
            .map_err(|error| Error::internal(format!("failed to flash errors: {error}")))
    }

    /// Remove and return flashed field errors; empty when none were flashed.
    ///
    /// A corrupt flash is discarded rather than failing the page.
    pub fn take_errors(&self) -> FieldErrors {
        match self.0.remove_as::<FieldErrors>(FLASH_ERRORS_KEY) {
            Some(Ok(errors)) => errors,
            Some(Err(raw)) => {
                tracing::warn!(raw = %raw, "discarding unreadable flashed errors");
                FieldErrors::new()
            }
            None => FieldErrors::new(),
        }
    }
}

impl FromRequest for SessionContext {
    type Error = actix_web::Error;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let fut = Session::from_request(req, payload);
        Box::pin(async move { fut.await.map(SessionContext::new) })
    }
}
