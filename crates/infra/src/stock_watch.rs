//! Stock-change triggers (application-level orchestration).
//!
//! Two business workflows can move a variant's stock: an admin editing the
//! variant, and an order being paid. Each calls into [`StockWatcher`] at the
//! point where both the old and the new quantity are known:
//!
//! ```text
//! manual save ──▶ before_variant_save(edited) ──┐
//!                                               ├─▶ evaluate ─▶ handler (dispatcher) ─▶ queue
//! order paid ───▶ after_order_paid(order) ──────┘
//! ```
//!
//! Nothing here can fail the calling workflow. Catalog lookups that error are
//! logged and skipped; dispatch failures are reported by the handler.
//!
//! Two triggers racing on the same variant may both observe "above → below"
//! and both notify. That duplicate is accepted; there is no dedup store.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use stockwatch_core::{OrderId, VariantId};
use stockwatch_events::EventHandler;
use stockwatch_inventory::{CrossingEvent, StockThreshold, Variant, evaluate};
use stockwatch_notifications::{JobQueue, NotificationDispatcher};

use crate::catalog::VariantCatalog;

/// One line of a paid order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub variant_id: VariantId,
    pub quantity: i64,
}

/// An order whose payment completed and whose stock has been decremented.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaidOrder {
    pub order_id: OrderId,
    pub line_items: Vec<LineItem>,
}

impl PaidOrder {
    /// Quantity taken per variant, summed over line items, in first-seen order.
    /// Non-positive quantities did not decrement anything and are ignored.
    pub fn quantities_by_variant(&self) -> Vec<(VariantId, i64)> {
        let mut totals: Vec<(VariantId, i64)> = Vec::new();
        for item in self.line_items.iter().filter(|i| i.quantity > 0) {
            match totals.iter_mut().find(|(id, _)| *id == item.variant_id) {
                Some((_, total)) => *total = total.saturating_add(item.quantity),
                None => totals.push((item.variant_id, item.quantity)),
            }
        }
        totals
    }
}

/// Runs stock evaluation for the save and payment triggers.
#[derive(Debug, Clone)]
pub struct StockWatcher<C, H> {
    catalog: C,
    handler: H,
    threshold: StockThreshold,
}

impl<C, H> StockWatcher<C, H>
where
    C: VariantCatalog,
    H: EventHandler<CrossingEvent>,
{
    /// Watcher around an arbitrary handler. When the handler is a
    /// [`NotificationDispatcher`], use [`StockWatcher::from_dispatcher`].
    pub fn new(catalog: C, handler: H, threshold: StockThreshold) -> Self {
        Self {
            catalog,
            handler,
            threshold,
        }
    }

    pub fn threshold(&self) -> StockThreshold {
        self.threshold
    }

    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    pub fn handler(&self) -> &H {
        &self.handler
    }

    /// Evaluate one stock change and hand a crossing, if any, to the handler.
    pub fn check_stock_change(
        &self,
        variant: &Variant,
        previous_stock: i64,
        new_stock: i64,
    ) -> Option<H::Output> {
        match evaluate(variant, previous_stock, new_stock, self.threshold) {
            Some(event) => Some(self.handler.handle(&event)),
            None => {
                debug!(
                    variant_id = %variant.id_typed(),
                    previous_stock,
                    new_stock,
                    threshold = %self.threshold,
                    "no stock threshold crossing"
                );
                None
            }
        }
    }

    /// Call before persisting a manually edited variant.
    ///
    /// The catalog must still hold the pre-edit snapshot at this point. A
    /// variant the catalog has never seen is new and is not evaluated.
    pub fn before_variant_save(&self, edited: &Variant) -> Option<H::Output> {
        let id = edited.id_typed();
        let original = match self.catalog.find_variant(id) {
            Ok(Some(original)) => original,
            Ok(None) => {
                debug!(variant_id = %id, "new variant; skipping stock check");
                return None;
            }
            Err(e) => {
                warn!(variant_id = %id, error = %e, "could not load stored variant; skipping stock check");
                return None;
            }
        };

        self.check_stock_change(edited, original.stock(), edited.stock())
    }

    /// Call after an order's payment completed and stock was decremented.
    ///
    /// The catalog must already reflect the decrement; the pre-purchase stock
    /// is reconstructed by adding the ordered quantity back.
    pub fn after_order_paid(&self, order: &PaidOrder) -> Vec<H::Output> {
        let mut outcomes = Vec::new();

        for (variant_id, quantity) in order.quantities_by_variant() {
            let variant = match self.catalog.find_variant(variant_id) {
                Ok(Some(variant)) => variant,
                Ok(None) => {
                    warn!(order_id = %order.order_id, variant_id = %variant_id, "ordered variant not in catalog");
                    continue;
                }
                Err(e) => {
                    warn!(order_id = %order.order_id, variant_id = %variant_id, error = %e, "could not load ordered variant");
                    continue;
                }
            };

            let new_stock = variant.stock();
            let previous_stock = new_stock.saturating_add(quantity);
            if let Some(outcome) = self.check_stock_change(&variant, previous_stock, new_stock) {
                outcomes.push(outcome);
            }
        }

        outcomes
    }
}

impl<C, Q> StockWatcher<C, NotificationDispatcher<Q>>
where
    C: VariantCatalog,
    Q: JobQueue,
{
    /// Watcher whose threshold comes from the dispatcher's own settings.
    pub fn from_dispatcher(catalog: C, dispatcher: NotificationDispatcher<Q>) -> Self {
        let threshold = dispatcher.settings().threshold;
        Self::new(catalog, dispatcher, threshold)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use stockwatch_notifications::NotificationSettings;

    use super::*;
    use crate::catalog::{CatalogError, InMemoryVariantCatalog};
    use crate::jobs::{InMemoryJobStore, JobStoreQueue};

    #[derive(Debug, Default)]
    struct RecordingHandler {
        events: Mutex<Vec<CrossingEvent>>,
    }

    impl RecordingHandler {
        fn events(&self) -> Vec<CrossingEvent> {
            self.events.lock().unwrap().clone()
        }
    }

    impl EventHandler<CrossingEvent> for RecordingHandler {
        type Output = ();

        fn handle(&self, event: &CrossingEvent) {
            self.events.lock().unwrap().push(event.clone());
        }
    }

    struct OfflineCatalog;

    impl VariantCatalog for OfflineCatalog {
        fn find_variant(&self, _id: VariantId) -> Result<Option<Variant>, CatalogError> {
            Err(CatalogError::Unavailable("connection reset".into()))
        }
    }

    fn watcher(
        threshold: i64,
    ) -> (
        Arc<InMemoryVariantCatalog>,
        Arc<RecordingHandler>,
        StockWatcher<Arc<InMemoryVariantCatalog>, Arc<RecordingHandler>>,
    ) {
        let catalog = InMemoryVariantCatalog::arc();
        let handler = Arc::new(RecordingHandler::default());
        let watcher = StockWatcher::new(
            Arc::clone(&catalog),
            Arc::clone(&handler),
            StockThreshold::new(threshold),
        );
        (catalog, handler, watcher)
    }

    #[test]
    fn manual_save_compares_against_stored_snapshot() {
        let (catalog, handler, watcher) = watcher(5);
        let stored = Variant::new(VariantId::new(), 7);
        catalog.upsert(stored.clone()).unwrap();

        let outcome = watcher.before_variant_save(&stored.clone().with_stock(4));

        assert!(outcome.is_some());
        assert_eq!(
            handler.events(),
            vec![CrossingEvent {
                variant_id: stored.id_typed(),
                previous_stock: 7,
                new_stock: 4,
            }]
        );
    }

    #[test]
    fn dispatcher_settings_drive_the_threshold() {
        let catalog = InMemoryVariantCatalog::arc();
        let id = VariantId::new();
        catalog.upsert(Variant::new(id, 3)).unwrap();
        let settings = NotificationSettings::new(StockThreshold::new(2), vec!["a@x.com".into()]);
        let dispatcher = NotificationDispatcher::new(JobStoreQueue::new(InMemoryJobStore::arc()), settings);

        let watcher = StockWatcher::from_dispatcher(Arc::clone(&catalog), dispatcher);

        assert_eq!(watcher.threshold(), StockThreshold::new(2));
        assert!(watcher.before_variant_save(&Variant::new(id, 2)).is_some());
        assert!(watcher.before_variant_save(&Variant::new(id, 4)).is_none());
    }

    #[test]
    fn saving_a_new_variant_is_not_evaluated() {
        let (_catalog, handler, watcher) = watcher(5);

        let outcome = watcher.before_variant_save(&Variant::new(VariantId::new(), 0));

        assert!(outcome.is_none());
        assert!(handler.events().is_empty());
    }

    #[test]
    fn edited_unlimited_flag_wins_over_stored_one() {
        let (catalog, handler, watcher) = watcher(5);
        let stored = Variant::new(VariantId::new(), 7);
        catalog.upsert(stored.clone()).unwrap();

        watcher.before_variant_save(&stored.with_stock(0).with_unlimited_stock(true));

        assert!(handler.events().is_empty());
    }

    #[test]
    fn catalog_outage_skips_the_check() {
        let handler = RecordingHandler::default();
        let watcher = StockWatcher::new(OfflineCatalog, &handler, StockThreshold::new(5));
        let variant = Variant::new(VariantId::new(), 0);

        assert!(watcher.before_variant_save(&variant).is_none());
        let order = PaidOrder {
            order_id: OrderId::new(),
            line_items: vec![LineItem {
                variant_id: variant.id_typed(),
                quantity: 3,
            }],
        };
        assert!(watcher.after_order_paid(&order).is_empty());
        assert!(handler.events().is_empty());
    }

    #[test]
    fn paid_order_reconstructs_pre_purchase_stock() {
        let (catalog, handler, watcher) = watcher(5);
        let id = VariantId::new();
        catalog.upsert(Variant::new(id, 8)).unwrap();
        catalog.decrement(id, 4).unwrap();

        let order = PaidOrder {
            order_id: OrderId::new(),
            line_items: vec![LineItem {
                variant_id: id,
                quantity: 4,
            }],
        };
        let outcomes = watcher.after_order_paid(&order);

        assert_eq!(outcomes.len(), 1);
        assert_eq!(
            handler.events(),
            vec![CrossingEvent {
                variant_id: id,
                previous_stock: 8,
                new_stock: 4,
            }]
        );
    }

    #[test]
    fn repeated_line_items_are_evaluated_once_on_the_total() {
        let (catalog, handler, watcher) = watcher(5);
        let id = VariantId::new();
        let other = VariantId::new();
        catalog.upsert(Variant::new(id, 1)).unwrap();
        catalog.upsert(Variant::new(other, 50)).unwrap();

        // 1 left after selling 3 + 4: stock was 8, crossed 5 once.
        let order = PaidOrder {
            order_id: OrderId::new(),
            line_items: vec![
                LineItem { variant_id: id, quantity: 3 },
                LineItem { variant_id: other, quantity: 1 },
                LineItem { variant_id: id, quantity: 4 },
                LineItem { variant_id: id, quantity: 0 },
            ],
        };

        assert_eq!(
            order.quantities_by_variant(),
            vec![(id, 7), (other, 1)]
        );

        watcher.after_order_paid(&order);

        assert_eq!(
            handler.events(),
            vec![CrossingEvent {
                variant_id: id,
                previous_stock: 8,
                new_stock: 1,
            }]
        );
    }

    #[test]
    fn missing_ordered_variant_does_not_stop_the_rest() {
        let (catalog, handler, watcher) = watcher(0);
        let present = VariantId::new();
        catalog.upsert(Variant::new(present, 0)).unwrap();

        let order = PaidOrder {
            order_id: OrderId::new(),
            line_items: vec![
                LineItem { variant_id: VariantId::new(), quantity: 2 },
                LineItem { variant_id: present, quantity: 2 },
            ],
        };
        watcher.after_order_paid(&order);

        let events = handler.events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].variant_id, present);
    }
}
