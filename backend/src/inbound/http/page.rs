//! Server-driven page responses.
//!
//! Handlers describe what should happen with an [`ActionOutcome`]; this module
//! turns it into the HTTP response the front-end renderer consumes:
//!
//! - a page object `{"component", "props", "url"}` whose `props.errors` always
//!   holds the field errors flashed by the previous request,
//! - a `303 See Other` to a named route or back to a same-origin referrer,
//! - flashed field errors plus a `303` back to the form that was submitted.

use actix_web::http::{StatusCode, header};
use actix_web::{HttpRequest, HttpResponse};
use serde::Serialize;
use serde_json::{Map, Value, json};
use tracing::debug;
use url::Url;

use crate::domain::{Error, FieldErrors, ShopId};
use crate::inbound::http::session::SessionContext;

/// Response header marking a page object.
pub const PAGE_HEADER: &str = "x-inertia";

const ERRORS_PROP: &str = "errors";

/// Routes a response can redirect to by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NamedRoute {
    /// `shops.index`
    ShopsIndex,
    /// `shops.create`
    ShopsCreate,
    /// `shops.edit`
    ShopsEdit(ShopId),
}

impl NamedRoute {
    /// Route name as the front-end refers to it.
    pub const fn name(self) -> &'static str {
        match self {
            Self::ShopsIndex => "shops.index",
            Self::ShopsCreate => "shops.create",
            Self::ShopsEdit(_) => "shops.edit",
        }
    }

    /// Path the route is served from.
    ///
    /// # Examples
    /// ```
    /// use shops::domain::ShopId;
    /// use shops::inbound::http::page::NamedRoute;
    ///
    /// assert_eq!(NamedRoute::ShopsEdit(ShopId::new(4)).path(), "/shops/4/edit");
    /// ```
    pub fn path(self) -> String {
        match self {
            Self::ShopsIndex => "/shops".to_owned(),
            Self::ShopsCreate => "/shops/create".to_owned(),
            Self::ShopsEdit(id) => format!("/shops/{id}/edit"),
        }
    }
}

/// A front-end component plus the props it is rendered with.
#[derive(Debug, Clone, PartialEq)]
pub struct PageRender {
    component: &'static str,
    props: Map<String, Value>,
}

impl PageRender {
    /// A component with no props yet.
    pub fn new(component: &'static str) -> Self {
        Self {
            component,
            props: Map::new(),
        }
    }

    /// Attach a serialisable prop.
    pub fn with_prop(mut self, name: &str, value: impl Serialize) -> Result<Self, Error> {
        let value = serde_json::to_value(value)
            .map_err(|err| Error::internal(format!("failed to serialise prop {name}: {err}")))?;
        self.props.insert(name.to_owned(), value);
        Ok(self)
    }

    /// Component name, such as `Shops/Index`.
    pub fn component(&self) -> &'static str {
        self.component
    }

    /// Prop by name.
    pub fn prop(&self, name: &str) -> Option<&Value> {
        self.props.get(name)
    }
}

/// What a handled action asks the transport to do.
#[derive(Debug, Clone, PartialEq)]
pub enum ActionOutcome {
    /// Render a page.
    Render(PageRender),
    /// `303` to a named route.
    RedirectToRoute(NamedRoute),
    /// `303` to the referring page, or `fallback` without a `Referer`.
    RedirectBack {
        /// Target used when the request carries no `Referer`.
        fallback: NamedRoute,
    },
    /// Flash `errors` and `303` back to the originating form.
    BackWithErrors {
        /// Field-keyed messages for the form.
        errors: FieldErrors,
        /// Form route used when the request carries no `Referer`.
        fallback: NamedRoute,
    },
}

/// Produce the transport response for `outcome`.
///
/// Rendering consumes any flashed errors; going back with errors stores them.
pub fn respond(
    outcome: ActionOutcome,
    req: &HttpRequest,
    session: &SessionContext,
) -> Result<HttpResponse, Error> {
    match outcome {
        ActionOutcome::Render(page) => {
            let errors = session.take_errors();
            render(page, errors, req)
        }
        ActionOutcome::RedirectToRoute(route) => {
            debug!(route = route.name(), "redirecting to named route");
            Ok(see_other(&route.path()))
        }
        ActionOutcome::RedirectBack { fallback } => Ok(see_other(&back_target(req, fallback))),
        ActionOutcome::BackWithErrors { errors, fallback } => {
            session.flash_errors(&errors)?;
            Ok(see_other(&back_target(req, fallback)))
        }
    }
}

fn render(page: PageRender, errors: FieldErrors, req: &HttpRequest) -> Result<HttpResponse, Error> {
    let PageRender {
        component,
        mut props,
    } = page;
    let errors = serde_json::to_value(errors)
        .map_err(|err| Error::internal(format!("failed to serialise errors: {err}")))?;
    props.insert(ERRORS_PROP.to_owned(), errors);

    let url = req
        .uri()
        .path_and_query()
        .map_or_else(|| req.path().to_owned(), |pq| pq.as_str().to_owned());

    Ok(HttpResponse::Ok()
        .insert_header((PAGE_HEADER, "true"))
        .insert_header((header::VARY, "X-Inertia"))
        .json(json!({
            "component": component,
            "props": props,
            "url": url,
        })))
}

fn back_target(req: &HttpRequest, fallback: NamedRoute) -> String {
    req.headers()
        .get(header::REFERER)
        .and_then(|value| value.to_str().ok())
        .filter(|referer| is_same_origin(req, referer))
        .map_or_else(|| fallback.path(), str::to_owned)
}

/// Relative paths and absolute URLs naming this host are safe to go back to.
fn is_same_origin(req: &HttpRequest, referer: &str) -> bool {
    if let Some(rest) = referer.strip_prefix('/') {
        return !rest.starts_with(['/', '\\']);
    }
    let Ok(url) = Url::parse(referer) else {
        return false;
    };
    if !matches!(url.scheme(), "http" | "https") {
        return false;
    }
    let authority = match (url.host_str(), url.port()) {
        (Some(host), Some(port)) => format!("{host}:{port}"),
        (Some(host), None) => host.to_owned(),
        (None, _) => return false,
    };
    authority.eq_ignore_ascii_case(req.connection_info().host())
}

fn see_other(location: &str) -> HttpResponse {
    HttpResponse::build(StatusCode::SEE_OTHER)
        .insert_header((header::LOCATION, location))
        .finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
    use actix_web::{App, test as actix_test, web};
    use rstest::rstest;

    fn outcome_app(
        outcome: ActionOutcome,
    ) -> App<
        impl ServiceFactory<
            ServiceRequest,
            Config = (),
            Response = ServiceResponse,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .wrap(crate::inbound::http::test_utils::test_session_middleware())
            .app_data(web::Data::new(outcome))
            .route(
                "/act",
                web::get().to(
                    |req: HttpRequest,
                     session: SessionContext,
                     outcome: web::Data<ActionOutcome>| async move {
                        respond(outcome.get_ref().clone(), &req, &session)
                    },
                ),
            )
    }

    fn location(res: &ServiceResponse) -> Option<&str> {
        res.headers()
            .get(header::LOCATION)
            .and_then(|value| value.to_str().ok())
    }

    #[rstest]
    #[actix_web::test]
    async fn render_always_carries_errors_prop() {
        let page = PageRender::new("Shops/Create");
        let app = actix_test::init_service(outcome_app(ActionOutcome::Render(page))).await;

        let req = actix_test::TestRequest::get().uri("/act?x=1").to_request();
        let res = actix_test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::OK);
        assert!(res.headers().contains_key(PAGE_HEADER));
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(
            body,
            json!({"component": "Shops/Create", "props": {"errors": {}}, "url": "/act?x=1"})
        );
    }

    #[rstest]
    #[case(ActionOutcome::RedirectToRoute(NamedRoute::ShopsIndex), None, "/shops")]
    #[case(
        ActionOutcome::RedirectBack { fallback: NamedRoute::ShopsIndex },
        Some("/shops?page=2"),
        "/shops?page=2"
    )]
    #[case(
        ActionOutcome::RedirectBack { fallback: NamedRoute::ShopsIndex },
        None,
        "/shops"
    )]
    #[case(
        ActionOutcome::RedirectBack { fallback: NamedRoute::ShopsIndex },
        Some("http://localhost:8080/shops?q=ac"),
        "http://localhost:8080/shops?q=ac"
    )]
    #[case(
        ActionOutcome::RedirectBack { fallback: NamedRoute::ShopsIndex },
        Some("https://elsewhere.test/phish"),
        "/shops"
    )]
    #[case(
        ActionOutcome::RedirectBack { fallback: NamedRoute::ShopsIndex },
        Some("//elsewhere.test/phish"),
        "/shops"
    )]
    #[case(
        ActionOutcome::RedirectBack { fallback: NamedRoute::ShopsIndex },
        Some("javascript:alert(1)"),
        "/shops"
    )]
    #[actix_web::test]
    async fn redirects_use_see_other(
        #[case] outcome: ActionOutcome,
        #[case] referer: Option<&str>,
        #[case] expected: &str,
    ) {
        let app = actix_test::init_service(outcome_app(outcome)).await;
        let mut req = actix_test::TestRequest::get().uri("/act");
        if let Some(referer) = referer {
            req = req.insert_header((header::REFERER, referer));
        }

        let res = actix_test::call_service(&app, req.to_request()).await;
        assert_eq!(res.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&res), Some(expected));
    }

    #[rstest]
    #[actix_web::test]
    async fn back_with_errors_flashes_and_falls_back_to_form() {
        let outcome = ActionOutcome::BackWithErrors {
            errors: FieldErrors::single("title", "The title field is required."),
            fallback: NamedRoute::ShopsCreate,
        };
        let app = actix_test::init_service(outcome_app(outcome)).await;

        let req = actix_test::TestRequest::get().uri("/act").to_request();
        let res = actix_test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&res), Some("/shops/create"));
        assert!(res.response().cookies().any(|c| c.name() == "session"));
    }

    #[rstest]
    fn with_prop_serialises_values() {
        let page = PageRender::new("Shops/Edit")
            .with_prop("id", ShopId::new(3))
            .expect("serialises");
        assert_eq!(page.component(), "Shops/Edit");
        assert_eq!(page.prop("id"), Some(&json!(3)));
    }
}
