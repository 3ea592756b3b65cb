//! OpenAPI document for the HTTP surface.
//!
//! Registers the login, shop and health handlers together with the schema
//! mirrors from [`crate::inbound::http::schemas`]. Served by Swagger UI in
//! debug builds and printed by the `openapi-dump` binary.

use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema, ShopSchema};
use crate::inbound::http::shops::ShopForm;
use crate::inbound::http::users::LoginRequest;
use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Adds the session cookie security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default)
            .add_security_scheme(
                "SessionCookie",
                SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                    "session",
                    "Session cookie issued by POST /login.",
                ))),
            );
    }
}

/// OpenAPI document for the shops backend.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Shops backend API",
        description = "Session-authenticated shop administration pages and health probes."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionCookie" = [])),
    paths(
        crate::inbound::http::users::login,
        crate::inbound::http::shops::index,
        crate::inbound::http::shops::create_form,
        crate::inbound::http::shops::store,
        crate::inbound::http::shops::show,
        crate::inbound::http::shops::edit,
        crate::inbound::http::shops::update,
        crate::inbound::http::shops::destroy,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(ErrorSchema, ErrorCodeSchema, ShopSchema, ShopForm, LoginRequest)),
    tags(
        (name = "users", description = "Sign-in"),
        (name = "shops", description = "Shop administration pages"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
