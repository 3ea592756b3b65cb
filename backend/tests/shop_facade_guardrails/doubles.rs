//! Recording doubles for the shop service and policy ports.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use pagination::Page;
use shops::domain::ports::{ShopAction, ShopPolicy, ShopService, ShopServiceError};
use shops::domain::{Caller, Shop, ShopChanges, ShopDraft, ShopId, ShopListQuery};

/// One observed call on [`RecordingShopService`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum ShopCall {
    List {
        search: Option<String>,
        page: u32,
        per_page: u32,
    },
    GetById(ShopId),
    Create {
        title: String,
        url: String,
    },
    Update(ShopId, ShopChanges),
    Delete(ShopId),
}

/// Canned results returned by [`RecordingShopService`].
#[derive(Clone)]
pub(crate) struct ShopResponses {
    pub(crate) listed: Vec<Shop>,
    pub(crate) get_by_id: Result<Shop, ShopServiceError>,
    pub(crate) create: Result<Shop, ShopServiceError>,
    pub(crate) update: Result<Shop, ShopServiceError>,
    pub(crate) delete: Result<(), ShopServiceError>,
}

pub(crate) fn acme() -> Shop {
    let created_at = Utc
        .with_ymd_and_hms(2026, 3, 14, 9, 26, 53)
        .single()
        .expect("valid timestamp");
    Shop::new(ShopId::new(1), "Acme", "https://acme.test", created_at)
}

impl Default for ShopResponses {
    fn default() -> Self {
        Self {
            listed: vec![acme()],
            get_by_id: Ok(acme()),
            create: Ok(acme()),
            update: Ok(acme()),
            delete: Ok(()),
        }
    }
}

#[derive(Clone, Default)]
pub(crate) struct RecordingShopService {
    calls: Arc<Mutex<Vec<ShopCall>>>,
    responses: Arc<Mutex<ShopResponses>>,
}

impl RecordingShopService {
    pub(crate) fn with_responses(responses: ShopResponses) -> Self {
        Self {
            calls: Arc::default(),
            responses: Arc::new(Mutex::new(responses)),
        }
    }

    pub(crate) fn calls(&self) -> Vec<ShopCall> {
        self.calls.lock().expect("shop calls lock").clone()
    }

    fn record(&self, call: ShopCall) -> ShopResponses {
        self.calls.lock().expect("shop calls lock").push(call);
        self.responses.lock().expect("shop responses lock").clone()
    }
}

#[async_trait]
impl ShopService for RecordingShopService {
    async fn list(&self, query: &ShopListQuery) -> Page<Shop> {
        let responses = self.record(ShopCall::List {
            search: query.search().map(str::to_owned),
            page: query.page().page(),
            per_page: query.page().per_page(),
        });
        Page::from_ordered(responses.listed, query.page())
    }

    async fn get_by_id(&self, id: ShopId) -> Result<Shop, ShopServiceError> {
        self.record(ShopCall::GetById(id)).get_by_id
    }

    async fn create(&self, draft: ShopDraft) -> Result<Shop, ShopServiceError> {
        self.record(ShopCall::Create {
            title: draft.title,
            url: draft.url,
        })
        .create
    }

    async fn update(&self, id: ShopId, changes: ShopChanges) -> Result<Shop, ShopServiceError> {
        self.record(ShopCall::Update(id, changes)).update
    }

    async fn delete(&self, id: ShopId) -> Result<(), ShopServiceError> {
        self.record(ShopCall::Delete(id)).delete
    }
}

/// Policy allowing every action except the configured ones, remembering
/// what it was asked.
#[derive(Clone, Default)]
pub(crate) struct ScriptedShopPolicy {
    denied: Arc<HashSet<ShopAction>>,
    asked: Arc<Mutex<Vec<ShopAction>>>,
}

impl ScriptedShopPolicy {
    pub(crate) fn denying(actions: impl IntoIterator<Item = ShopAction>) -> Self {
        Self {
            denied: Arc::new(actions.into_iter().collect()),
            asked: Arc::default(),
        }
    }

    pub(crate) fn asked(&self) -> Vec<ShopAction> {
        self.asked.lock().expect("policy lock").clone()
    }
}

impl ShopPolicy for ScriptedShopPolicy {
    fn allows(&self, _caller: &Caller, action: ShopAction) -> bool {
        self.asked.lock().expect("policy lock").push(action);
        !self.denied.contains(&action)
    }
}
