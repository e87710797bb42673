//! Infrastructure layer: queue adapters, catalog port, trigger workflows,
//! configuration and wiring.

pub mod bootstrap;
pub mod catalog;
pub mod config;
pub mod jobs;
pub mod stock_watch;


pub use bootstrap::{ConfiguredWatcher, SharedQueue, build_queue, build_watcher, init};
pub use catalog::{CatalogError, InMemoryVariantCatalog, VariantCatalog};
pub use config::{ConfigError, QueueBackend, StockWatchConfig};
pub use stock_watch::{LineItem, PaidOrder, StockWatcher};
