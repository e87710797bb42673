//! Threshold-crossing decision.
//!
//! A variant "crosses" when its stock goes from strictly above the threshold to
//! at or below it. Once a variant sits at or below the threshold, further drops
//! stay silent until it is restocked above the threshold again, so one crossing
//! yields at most one event per evaluation.

use serde::{Deserialize, Serialize};

use stockwatch_core::{ValueObject, VariantId};
use stockwatch_events::Event;

use crate::{StockThreshold, Variant};

/// What the crossing means for whoever reads the notification.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CrossingKind {
    /// Stock is at or below the threshold but some units remain.
    LowStock,
    /// Stock reached zero (or went negative).
    OutOfStock,
}

/// A variant's stock just crossed the low-stock threshold.
///
/// Carries the variant's identity, not its full state: whoever acts on the
/// event later must re-read the variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrossingEvent {
    pub variant_id: VariantId,
    pub previous_stock: i64,
    pub new_stock: i64,
}

impl CrossingEvent {
    pub fn kind(&self) -> CrossingKind {
        if self.new_stock <= 0 {
            CrossingKind::OutOfStock
        } else {
            CrossingKind::LowStock
        }
    }
}

impl ValueObject for CrossingEvent {}

impl Event for CrossingEvent {
    fn event_type(&self) -> &'static str {
        match self.kind() {
            CrossingKind::LowStock => "inventory.variant.low_stock",
            CrossingKind::OutOfStock => "inventory.variant.out_of_stock",
        }
    }

    fn version(&self) -> u32 {
        1
    }
}

/// Decide whether moving `variant` from `previous_stock` to `new_stock`
/// crosses `threshold`.
///
/// Returns `None` for unlimited-stock variants, for restocks and unchanged
/// stock, and when the previous stock was already at or below the threshold.
/// Negative stock values are compared as-is.
pub fn evaluate(
    variant: &Variant,
    previous_stock: i64,
    new_stock: i64,
    threshold: StockThreshold,
) -> Option<CrossingEvent> {
    if variant.has_unlimited_stock() {
        return None;
    }

    let t = threshold.get();
    if previous_stock > t && new_stock <= t {
        Some(CrossingEvent {
            variant_id: variant.id_typed(),
            previous_stock,
            new_stock,
        })
    } else {
        None
    }
}
