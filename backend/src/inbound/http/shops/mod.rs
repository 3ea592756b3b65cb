//! Shop administration handlers.
//!
//! ```text
//! GET    /shops               Shops/Index
//! GET    /shops/create        Shops/Create
//! POST   /shops               303 -> /shops
//! GET    /shops/{shop}        Shops/Show
//! GET    /shops/{shop}/edit   Shops/Edit
//! PUT    /shops/{shop}        303 -> /shops
//! PATCH  /shops/{shop}        303 -> /shops
//! DELETE /shops/{shop}        303 -> Referer
//! ```
//!
//! Handlers only extract the caller and raw inputs (query string and body
//! bytes, which cannot be rejected); [`ShopFacade`] decides the outcome and
//! [`respond`] renders it.

mod facade;
mod failure;
mod input;
mod projection;

pub use facade::ShopFacade;
pub use input::{ShopForm, ShopIndexParams, SubmittedForm};
pub use projection::{ShopRow, shop_rows};

use actix_web::web::Bytes;
use actix_web::{HttpRequest, HttpResponse, delete, get, post, route, web};

use crate::inbound::http::ApiResult;
use crate::inbound::http::page::respond;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Register the shop routes. `/shops/create` is registered ahead of
/// `/shops/{shop}` so it is not read as an id.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(index)
        .service(create_form)
        .service(store)
        .service(show)
        .service(edit)
        .service(update)
        .service(destroy);
}

/// List shops, optionally filtered by `q`.
#[utoipa::path(
    get,
    path = "/shops",
    params(
        ("q" = Option<String>, Query, description = "Free-text search over title and url"),
        ("page" = Option<u32>, Query, description = "One-based page number"),
        ("per_page" = Option<u32>, Query, description = "Page size, 1 to 100")
    ),
    responses(
        (status = 200, description = "Shops/Index page object"),
        (status = 400, description = "Invalid paging parameters", body = ErrorSchema),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema)
    ),
    tags = ["shops"],
    operation_id = "listShops"
)]
#[get("/shops")]
pub async fn index(
    state: web::Data<HttpState>,
    req: HttpRequest,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    let caller = session.caller()?;
    let params = ShopIndexParams::from_query(req.query_string());
    let outcome = ShopFacade::from_state(&state)
        .index(&caller, params, &req.full_url())
        .await?;
    respond(outcome, &req, &session)
}

/// Show the create form.
#[utoipa::path(
    get,
    path = "/shops/create",
    responses(
        (status = 200, description = "Shops/Create page object"),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema)
    ),
    tags = ["shops"],
    operation_id = "createShopForm"
)]
#[get("/shops/create")]
pub async fn create_form(
    state: web::Data<HttpState>,
    req: HttpRequest,
    session: SessionContext,
) -> ApiResult<HttpResponse> {
    let caller = session.caller()?;
    let outcome = ShopFacade::from_state(&state).create_form(&caller)?;
    respond(outcome, &req, &session)
}

/// Store a new shop.
#[utoipa::path(
    post,
    path = "/shops",
    request_body = ShopForm,
    responses(
        (status = 303, description = "Created; redirects to the listing, or back to the form with errors"),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema)
    ),
    tags = ["shops"],
    operation_id = "storeShop"
)]
#[post("/shops")]
pub async fn store(
    state: web::Data<HttpState>,
    req: HttpRequest,
    session: SessionContext,
    body: Bytes,
) -> ApiResult<HttpResponse> {
    let caller = session.caller()?;
    let submitted = SubmittedForm::from_request(&req, body);
    let outcome = ShopFacade::from_state(&state)
        .store(&caller, &submitted)
        .await?;
    respond(outcome, &req, &session)
}

/// Show one shop.
#[utoipa::path(
    get,
    path = "/shops/{shop}",
    params(("shop" = u64, Path, description = "Shop id")),
    responses(
        (status = 200, description = "Shops/Show page object"),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema),
        (status = 404, description = "No such shop", body = ErrorSchema)
    ),
    tags = ["shops"],
    operation_id = "showShop"
)]
#[get("/shops/{shop}")]
pub async fn show(
    state: web::Data<HttpState>,
    req: HttpRequest,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let caller = session.caller()?;
    let outcome = ShopFacade::from_state(&state)
        .show(&caller, &path)
        .await?;
    respond(outcome, &req, &session)
}

/// Show the edit form for one shop.
#[utoipa::path(
    get,
    path = "/shops/{shop}/edit",
    params(("shop" = u64, Path, description = "Shop id")),
    responses(
        (status = 200, description = "Shops/Edit page object"),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema),
        (status = 404, description = "No such shop", body = ErrorSchema)
    ),
    tags = ["shops"],
    operation_id = "editShopForm"
)]
#[get("/shops/{shop}/edit")]
pub async fn edit(
    state: web::Data<HttpState>,
    req: HttpRequest,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let caller = session.caller()?;
    let outcome = ShopFacade::from_state(&state)
        .edit(&caller, &path)
        .await?;
    respond(outcome, &req, &session)
}

/// Update one shop. Accepts `PUT` and `PATCH`.
#[utoipa::path(
    method(put, patch),
    path = "/shops/{shop}",
    params(("shop" = u64, Path, description = "Shop id")),
    request_body = ShopForm,
    responses(
        (status = 303, description = "Updated; redirects to the listing, or back to the form with errors"),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema),
        (status = 404, description = "No such shop", body = ErrorSchema)
    ),
    tags = ["shops"],
    operation_id = "updateShop"
)]
#[route("/shops/{shop}", method = "PUT", method = "PATCH")]
pub async fn update(
    state: web::Data<HttpState>,
    req: HttpRequest,
    session: SessionContext,
    path: web::Path<String>,
    body: Bytes,
) -> ApiResult<HttpResponse> {
    let caller = session.caller()?;
    let submitted = SubmittedForm::from_request(&req, body);
    let outcome = ShopFacade::from_state(&state)
        .update(&caller, &path, &submitted)
        .await?;
    respond(outcome, &req, &session)
}

/// Delete one shop and go back to the referring page.
#[utoipa::path(
    delete,
    path = "/shops/{shop}",
    params(("shop" = u64, Path, description = "Shop id")),
    responses(
        (status = 303, description = "Deleted; redirects to the Referer, or back with errors"),
        (status = 401, description = "Unauthorised", body = ErrorSchema),
        (status = 403, description = "Forbidden", body = ErrorSchema),
        (status = 404, description = "No such shop", body = ErrorSchema)
    ),
    tags = ["shops"],
    operation_id = "deleteShop"
)]
#[delete("/shops/{shop}")]
pub async fn destroy(
    state: web::Data<HttpState>,
    req: HttpRequest,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let caller = session.caller()?;
    let outcome = ShopFacade::from_state(&state)
        .destroy(&caller, &path)
        .await?;
    respond(outcome, &req, &session)
}
