//! Shop actions independent of the HTTP extractors that feed them.
//!
//! Every action asks the policy first. Bodies are decoded and the shop
//! service called only once the caller is allowed.

use pagination::{PageRequest, PageRequestError};
use tracing::{debug, info, warn};
use url::Url;

use crate::domain::ports::{ShopAction, ShopPolicy, ShopService};
use crate::domain::{Caller, Error, FieldErrors, ShopChanges, ShopDraft, ShopId, ShopListQuery};
use crate::inbound::http::page::{ActionOutcome, NamedRoute, PageRender};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    FieldName, optional_field, out_of_range_error, parse_optional_u32, require_field,
};

use super::failure::outcome_for;
use super::input::{ShopForm, ShopIndexParams, SubmittedForm};
use super::projection::shop_rows;

const PAGE: FieldName = FieldName::new("page");
const PER_PAGE: FieldName = FieldName::new("per_page");
const TITLE: FieldName = FieldName::new("title");
const URL: FieldName = FieldName::new("url");

/// Dispatches shop actions to the policy and the shop service.
pub struct ShopFacade<'a> {
    shops: &'a dyn ShopService,
    policy: &'a dyn ShopPolicy,
    default_per_page: u32,
}

impl<'a> ShopFacade<'a> {
    /// Borrow ports directly.
    pub fn new(
        shops: &'a dyn ShopService,
        policy: &'a dyn ShopPolicy,
        default_per_page: u32,
    ) -> Self {
        Self {
            shops,
            policy,
            default_per_page,
        }
    }

    /// Borrow ports from handler state.
    pub fn from_state(state: &'a HttpState) -> Self {
        Self::new(
            state.shops.as_ref(),
            state.policy.as_ref(),
            state.default_per_page,
        )
    }

    fn authorize(&self, caller: &Caller, action: ShopAction) -> Result<(), Error> {
        if self.policy.allows(caller, action) {
            debug!(user_id = %caller.user_id(), ability = action.ability(), "dispatching shop action");
            Ok(())
        } else {
            warn!(user_id = %caller.user_id(), ability = action.ability(), "shop action denied");
            Err(Error::forbidden(format!("not allowed to {action} shops")))
        }
    }

    /// `Shops/Index` with the requested page of shops.
    pub async fn index(
        &self,
        caller: &Caller,
        params: ShopIndexParams,
        base: &Url,
    ) -> Result<ActionOutcome, Error> {
        self.authorize(caller, ShopAction::ViewAny)?;
        let query = self.list_query(params)?;
        let page = self.shops.list(&query).await.with_links(base);
        let render = PageRender::new("Shops/Index").with_prop("shops", shop_rows(&page))?;
        Ok(ActionOutcome::Render(render))
    }

    /// `Shops/Create` with no props beyond flashed errors.
    pub fn create_form(&self, caller: &Caller) -> Result<ActionOutcome, Error> {
        self.authorize(caller, ShopAction::Create)?;
        Ok(ActionOutcome::Render(PageRender::new("Shops/Create")))
    }

    /// Create a shop, then redirect to the listing.
    pub async fn store(
        &self,
        caller: &Caller,
        submitted: &SubmittedForm,
    ) -> Result<ActionOutcome, Error> {
        self.authorize(caller, ShopAction::Create)?;
        let form = submitted.decode()?;
        let draft = match draft_from(&form) {
            Ok(draft) => draft,
            Err(errors) => {
                return Ok(ActionOutcome::BackWithErrors {
                    errors,
                    fallback: NamedRoute::ShopsCreate,
                });
            }
        };
        match self.shops.create(draft).await {
            Ok(shop) => {
                info!(shop_id = %shop.id(), "shop created");
                Ok(ActionOutcome::RedirectToRoute(NamedRoute::ShopsIndex))
            }
            Err(err) => outcome_for(err, NamedRoute::ShopsCreate),
        }
    }

    /// `Shops/Show` with the full shop.
    pub async fn show(&self, caller: &Caller, raw_id: &str) -> Result<ActionOutcome, Error> {
        self.authorize(caller, ShopAction::View)?;
        let id = parse_shop_id(raw_id)?;
        let shop = match self.shops.get_by_id(id).await {
            Ok(shop) => shop,
            Err(err) => return outcome_for(err, NamedRoute::ShopsIndex),
        };
        let render = PageRender::new("Shops/Show").with_prop("shop", &shop)?;
        Ok(ActionOutcome::Render(render))
    }

    /// `Shops/Edit` with the shop id and its current values.
    pub async fn edit(&self, caller: &Caller, raw_id: &str) -> Result<ActionOutcome, Error> {
        self.authorize(caller, ShopAction::Update)?;
        let id = parse_shop_id(raw_id)?;
        let shop = match self.shops.get_by_id(id).await {
            Ok(shop) => shop,
            Err(err) => return outcome_for(err, NamedRoute::ShopsIndex),
        };
        let render = PageRender::new("Shops/Edit")
            .with_prop("id", shop.id())?
            .with_prop("values", &shop)?;
        Ok(ActionOutcome::Render(render))
    }

    /// Resolve the shop, apply the submitted changes, then redirect to the
    /// listing.
    pub async fn update(
        &self,
        caller: &Caller,
        raw_id: &str,
        submitted: &SubmittedForm,
    ) -> Result<ActionOutcome, Error> {
        self.authorize(caller, ShopAction::Update)?;
        let form = submitted.decode()?;
        let id = parse_shop_id(raw_id)?;
        let form_route = NamedRoute::ShopsEdit(id);
        let shop = match self.shops.get_by_id(id).await {
            Ok(shop) => shop,
            Err(err) => return outcome_for(err, form_route),
        };
        let changes = ShopChanges {
            title: optional_field(form.title.as_deref()),
            url: optional_field(form.url.as_deref()),
        };
        match self.shops.update(shop.id(), changes).await {
            Ok(updated) => {
                info!(shop_id = %updated.id(), "shop updated");
                Ok(ActionOutcome::RedirectToRoute(NamedRoute::ShopsIndex))
            }
            Err(err) => outcome_for(err, form_route),
        }
    }

    /// Resolve the shop, delete it, then go back to the referring page.
    pub async fn destroy(&self, caller: &Caller, raw_id: &str) -> Result<ActionOutcome, Error> {
        self.authorize(caller, ShopAction::Delete)?;
        let id = parse_shop_id(raw_id)?;
        let shop = match self.shops.get_by_id(id).await {
            Ok(shop) => shop,
            Err(err) => return outcome_for(err, NamedRoute::ShopsIndex),
        };
        match self.shops.delete(shop.id()).await {
            Ok(()) => {
                info!(shop_id = %shop.id(), "shop deleted");
                Ok(ActionOutcome::RedirectBack {
                    fallback: NamedRoute::ShopsIndex,
                })
            }
            Err(err) => outcome_for(err, NamedRoute::ShopsIndex),
        }
    }

    fn list_query(&self, params: ShopIndexParams) -> Result<ShopListQuery, Error> {
        let page = parse_optional_u32(params.page.as_deref(), PAGE)?;
        let per_page = parse_optional_u32(params.per_page.as_deref(), PER_PAGE)?;
        let request = PageRequest::from_parts(page, per_page, self.default_per_page).map_err(
            |err| match err {
                PageRequestError::ZeroPage => out_of_range_error(PAGE, 0, err.to_string()),
                PageRequestError::PerPageOutOfRange { per_page, .. } => {
                    out_of_range_error(PER_PAGE, per_page, err.to_string())
                }
            },
        )?;
        Ok(ShopListQuery::new(params.q, request))
    }
}

fn parse_shop_id(raw: &str) -> Result<ShopId, Error> {
    raw.parse()
        .map_err(|_| Error::not_found(format!("shop {raw} not found")))
}

fn draft_from(form: &ShopForm) -> Result<ShopDraft, FieldErrors> {
    let mut errors = FieldErrors::new();
    let title = require_field(form.title.as_deref(), TITLE, &mut errors);
    let url = require_field(form.url.as_deref(), URL, &mut errors);
    match (title, url) {
        (Some(title), Some(url)) => Ok(ShopDraft { title, url }),
        _ => Err(errors),
    }
}

#[cfg(test)]
#[path = "facade_tests.rs"]
mod tests;
