//! Authorisation port for shop actions.
//!
//! Every shop action asks the policy before touching the shop service. The
//! check is keyed by action only; a denial for `Update` covers every shop.

use std::fmt;

use crate::domain::Caller;

/// The abilities a caller may hold over shops.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShopAction {
    /// List shops.
    ViewAny,
    /// Open the create form or store a new shop.
    Create,
    /// Show a single shop.
    View,
    /// Open the edit form or change a shop.
    Update,
    /// Remove a shop.
    Delete,
}

impl ShopAction {
    /// Ability name as policies spell it.
    ///
    /// # Examples
    /// ```
    /// use shops::domain::ports::ShopAction;
    ///
    /// assert_eq!(ShopAction::ViewAny.ability(), "viewAny");
    /// ```
    pub const fn ability(self) -> &'static str {
        match self {
            Self::ViewAny => "viewAny",
            Self::Create => "create",
            Self::View => "view",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }
}

impl fmt::Display for ShopAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.ability())
    }
}

/// Decides whether a caller may perform a shop action.
#[cfg_attr(test, mockall::automock)]
pub trait ShopPolicy: Send + Sync {
    /// Return `true` when `caller` holds the ability for `action`.
    fn allows(&self, caller: &Caller, action: ShopAction) -> bool;
}

/// Development policy: any authenticated caller may do anything.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureShopPolicy;

impl ShopPolicy for FixtureShopPolicy {
    fn allows(&self, _caller: &Caller, _action: ShopAction) -> bool {
        true
    }
}
