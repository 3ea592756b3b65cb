//! In-process adapters backed by memory.

mod in_memory_shop_service;

pub use in_memory_shop_service::InMemoryShopService;
