//! Raw shop inputs, decoded only once the caller has been authorised.
//!
//! Handlers capture the query string and body bytes as received; nothing here
//! can reject a request before the policy is consulted.

use actix_web::HttpRequest;
use actix_web::http::header;
use actix_web::web::Bytes;
use serde::{Deserialize, Serialize};
use url::form_urlencoded;

use crate::domain::Error;

const JSON: &str = "application/json";
const URL_ENCODED: &str = "application/x-www-form-urlencoded";

/// Raw listing query string: `?q=&page=&per_page=`.
///
/// Repeated keys keep the last value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShopIndexParams {
    pub q: Option<String>,
    pub page: Option<String>,
    pub per_page: Option<String>,
}

impl ShopIndexParams {
    /// Read the listing parameters from a query string. Unknown keys are
    /// ignored.
    ///
    /// # Examples
    /// ```
    /// use shops::inbound::http::shops::ShopIndexParams;
    ///
    /// let params = ShopIndexParams::from_query("q=a&q=b&page=2");
    /// assert_eq!(params.q.as_deref(), Some("b"));
    /// assert_eq!(params.page.as_deref(), Some("2"));
    /// ```
    pub fn from_query(query: &str) -> Self {
        let mut params = Self::default();
        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            let slot = match key.as_ref() {
                "q" => &mut params.q,
                "page" => &mut params.page,
                "per_page" => &mut params.per_page,
                _ => continue,
            };
            *slot = Some(value.into_owned());
        }
        params
    }
}

/// Create and edit form body. Values are untrimmed as submitted.
#[derive(Debug, Clone, Default, Deserialize, Serialize, utoipa::ToSchema)]
pub struct ShopForm {
    pub title: Option<String>,
    pub url: Option<String>,
}

/// A form submission whose body has not been decoded yet.
#[derive(Debug, Clone, Default)]
pub struct SubmittedForm {
    content_type: Option<String>,
    body: Bytes,
}

impl SubmittedForm {
    /// Pair a body with the content type it was sent as.
    pub fn new(content_type: Option<&str>, body: impl Into<Bytes>) -> Self {
        Self {
            content_type: content_type.map(str::to_owned),
            body: body.into(),
        }
    }

    /// Capture the request's `Content-Type` alongside its body.
    pub fn from_request(req: &HttpRequest, body: Bytes) -> Self {
        let content_type = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok());
        Self::new(content_type, body)
    }

    /// Decode the body as JSON or URL-encoded fields.
    ///
    /// An empty body is an empty form.
    ///
    /// # Errors
    /// Returns an `invalid_request` [`Error`] for malformed bodies and for
    /// content types other than JSON and URL-encoded.
    pub fn decode(&self) -> Result<ShopForm, Error> {
        if self.body.is_empty() {
            return Ok(ShopForm::default());
        }
        match self.media_type().as_deref() {
            Some(JSON) => serde_json::from_slice(&self.body).map_err(|err| {
                Error::invalid_request(format!("request body is not valid JSON: {err}"))
            }),
            Some(URL_ENCODED) => Ok(url_encoded_form(&self.body)),
            Some(other) => Err(Error::invalid_request(format!(
                "unsupported content type {other}"
            ))),
            None => Err(Error::invalid_request("request body has no content type")),
        }
    }

    fn media_type(&self) -> Option<String> {
        let raw = self.content_type.as_deref()?;
        let essence = raw.split(';').next().unwrap_or(raw).trim();
        let essence = essence.to_ascii_lowercase();
        if essence.ends_with("+json") {
            Some(JSON.to_owned())
        } else {
            Some(essence)
        }
    }
}

fn url_encoded_form(body: &[u8]) -> ShopForm {
    let mut form = ShopForm::default();
    for (key, value) in form_urlencoded::parse(body) {
        match key.as_ref() {
            "title" => form.title = Some(value.into_owned()),
            "url" => form.url = Some(value.into_owned()),
            _ => {}
        }
    }
    form
}
