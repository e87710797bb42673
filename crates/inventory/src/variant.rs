use serde::{Deserialize, Serialize};

use stockwatch_core::{Entity, VariantId};

/// Read-only snapshot of a sellable variant, as the catalog reports it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variant {
    id: VariantId,
    stock: i64,
    #[serde(default)]
    has_unlimited_stock: bool,
}

impl Variant {
    pub fn new(id: VariantId, stock: i64) -> Self {
        Self {
            id,
            stock,
            has_unlimited_stock: false,
        }
    }

    /// Same variant, tracked as having unlimited stock.
    pub fn with_unlimited_stock(mut self, unlimited: bool) -> Self {
        self.has_unlimited_stock = unlimited;
        self
    }

    /// Same variant with a different stock count (e.g. the edited form of a save).
    pub fn with_stock(mut self, stock: i64) -> Self {
        self.stock = stock;
        self
    }

    pub fn id_typed(&self) -> VariantId {
        self.id
    }

    pub fn stock(&self) -> i64 {
        self.stock
    }

    pub fn has_unlimited_stock(&self) -> bool {
        self.has_unlimited_stock
    }
}

impl Entity for Variant {
    type Id = VariantId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}
