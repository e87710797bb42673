//! Inventory domain: the stock evaluator.
//!
//! Decides, from two stock snapshots of a variant, whether a low-stock
//! threshold was crossed. Pure decision logic (no IO, no logging, no clock).

pub mod evaluator;
pub mod threshold;
pub mod variant;

pub use evaluator::{CrossingEvent, CrossingKind, evaluate};
pub use threshold::StockThreshold;
pub use variant::Variant;
