//! Output records for the shop listing.

use chrono::{DateTime, Utc};
use pagination::Page;
use serde::Serialize;

use crate::domain::{Shop, ShopId};

/// One row of the `Shops/Index` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShopRow {
    pub id: ShopId,
    pub title: String,
    pub url: String,
    pub created_at: DateTime<Utc>,
}

impl ShopRow {
    /// Copy the listed fields out of `shop`.
    pub fn from_shop(shop: &Shop) -> Self {
        Self {
            id: shop.id(),
            title: shop.title().to_owned(),
            url: shop.url().to_owned(),
            created_at: shop.created_at(),
        }
    }
}

/// Project a page of shops into listing rows, keeping order and metadata.
pub fn shop_rows(page: &Page<Shop>) -> Page<ShopRow> {
    page.project(ShopRow::from_shop)
}
