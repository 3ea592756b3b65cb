//! Shop service keeping records in a process-local ordered map.

use std::collections::BTreeMap;
use std::sync::{Arc, PoisonError, RwLock};

use async_trait::async_trait;
use mockable::{Clock, DefaultClock};
use pagination::Page;
use url::Url;

use crate::domain::ports::{ShopService, ShopServiceError};
use crate::domain::{FieldErrors, Shop, ShopChanges, ShopDraft, ShopId, ShopListQuery};

const TITLE_MAX_CHARS: usize = 255;

#[derive(Debug, Default)]
struct Store {
    shops: BTreeMap<ShopId, Shop>,
    last_id: u64,
}

/// [`ShopService`] over an `RwLock`-guarded map ordered by id.
///
/// Validates title length and URL shape, and refuses two shops with the same
/// URL.
pub struct InMemoryShopService {
    store: RwLock<Store>,
    clock: Arc<dyn Clock>,
}

impl Default for InMemoryShopService {
    fn default() -> Self {
        Self::new(Arc::new(DefaultClock))
    }
}

impl InMemoryShopService {
    /// Empty store stamping records with `clock`.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            store: RwLock::new(Store::default()),
            clock,
        }
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Store> {
        self.store.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, Store> {
        self.store.write().unwrap_or_else(PoisonError::into_inner)
    }
}

fn check_title(title: &str, errors: &mut FieldErrors) {
    if title.trim().is_empty() {
        errors.add("title", "The title field is required.");
    } else if title.chars().count() > TITLE_MAX_CHARS {
        errors.add(
            "title",
            format!("The title may not be greater than {TITLE_MAX_CHARS} characters."),
        );
    }
}

fn check_url(url: &str, errors: &mut FieldErrors) {
    if url.trim().is_empty() {
        errors.add("url", "The url field is required.");
        return;
    }
    let valid = Url::parse(url)
        .map(|parsed| matches!(parsed.scheme(), "http" | "https") && parsed.host().is_some())
        .unwrap_or(false);
    if !valid {
        errors.add("url", "The url must be a valid URL.");
    }
}

fn url_taken(store: &Store, url: &str, except: Option<ShopId>) -> bool {
    store
        .shops
        .values()
        .any(|shop| Some(shop.id()) != except && shop.url().eq_ignore_ascii_case(url))
}

fn matches_search(shop: &Shop, needle: &str) -> bool {
    shop.title().to_lowercase().contains(needle) || shop.url().to_lowercase().contains(needle)
}

#[async_trait]
impl ShopService for InMemoryShopService {
    async fn list(&self, query: &ShopListQuery) -> Page<Shop> {
        let needle = query.search().map(str::to_lowercase);
        let store = self.read();
        let ordered: Vec<Shop> = store
            .shops
            .values()
            .filter(|shop| needle.as_deref().is_none_or(|n| matches_search(shop, n)))
            .cloned()
            .collect();
        Page::from_ordered(ordered, query.page())
    }

    async fn get_by_id(&self, id: ShopId) -> Result<Shop, ShopServiceError> {
        self.read()
            .shops
            .get(&id)
            .cloned()
            .ok_or_else(|| ShopServiceError::not_found(id))
    }

    async fn create(&self, draft: ShopDraft) -> Result<Shop, ShopServiceError> {
        let mut errors = FieldErrors::new();
        check_title(&draft.title, &mut errors);
        check_url(&draft.url, &mut errors);
        if !errors.is_empty() {
            return Err(ShopServiceError::validation_failed(errors));
        }

        let mut store = self.write();
        if url_taken(&store, &draft.url, None) {
            return Err(ShopServiceError::not_created(format!(
                "a shop with url {} already exists",
                draft.url
            )));
        }
        let next = store
            .last_id
            .checked_add(1)
            .ok_or_else(|| ShopServiceError::not_created("shop id space exhausted"))?;
        let shop = Shop::new(ShopId::new(next), draft.title, draft.url, self.clock.utc());
        store.last_id = next;
        store.shops.insert(shop.id(), shop.clone());
        Ok(shop)
    }

    async fn update(&self, id: ShopId, changes: ShopChanges) -> Result<Shop, ShopServiceError> {
        let mut errors = FieldErrors::new();
        if let Some(title) = changes.title.as_deref() {
            check_title(title, &mut errors);
        }
        if let Some(url) = changes.url.as_deref() {
            check_url(url, &mut errors);
        }
        if !errors.is_empty() {
            return Err(ShopServiceError::validation_failed(errors));
        }

        let mut store = self.write();
        if let Some(url) = changes.url.as_deref()
            && url_taken(&store, url, Some(id))
        {
            return Err(ShopServiceError::not_updated(format!(
                "another shop already uses url {url}"
            )));
        }
        let updated = match store.shops.get(&id) {
            Some(current) => current.with_changes(&changes),
            None => {
                return Err(ShopServiceError::not_updated(format!(
                    "shop {id} no longer exists"
                )));
            }
        };
        store.shops.insert(id, updated.clone());
        Ok(updated)
    }

    async fn delete(&self, id: ShopId) -> Result<(), ShopServiceError> {
        self.write()
            .shops
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| ShopServiceError::not_deleted(format!("shop {id} no longer exists")))
    }
}
