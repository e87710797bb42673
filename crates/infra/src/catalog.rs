//! Variant lookup port.
//!
//! The catalog owns variants; stock watching only needs to read the currently
//! stored snapshot of one by id.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use stockwatch_core::{DomainError, VariantId};
use stockwatch_inventory::Variant;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error("catalog unavailable: {0}")]
    Unavailable(String),
}

/// Read access to stored variants.
pub trait VariantCatalog: Send + Sync {
    /// The stored snapshot of a variant, or `None` if it has never been saved.
    fn find_variant(&self, id: VariantId) -> Result<Option<Variant>, CatalogError>;
}

impl<C> VariantCatalog for Arc<C>
where
    C: VariantCatalog + ?Sized,
{
    fn find_variant(&self, id: VariantId) -> Result<Option<Variant>, CatalogError> {
        (**self).find_variant(id)
    }
}

/// In-memory catalog for tests/dev.
#[derive(Debug, Default)]
pub struct InMemoryVariantCatalog {
    variants: RwLock<HashMap<VariantId, Variant>>,
}

fn poisoned() -> CatalogError {
    CatalogError::Unavailable("catalog lock poisoned".to_string())
}

impl InMemoryVariantCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn arc() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// Store (or replace) a variant snapshot.
    pub fn upsert(&self, variant: Variant) -> Result<(), CatalogError> {
        let mut variants = self.variants.write().map_err(|_| poisoned())?;
        variants.insert(variant.id_typed(), variant);
        Ok(())
    }

    /// Overwrite a stored variant's stock, returning the previous value.
    pub fn set_stock(&self, id: VariantId, stock: i64) -> Result<i64, CatalogError> {
        let mut variants = self.variants.write().map_err(|_| poisoned())?;
        let variant = variants.get_mut(&id).ok_or_else(DomainError::not_found)?;
        let previous = variant.stock();
        *variant = variant.clone().with_stock(stock);
        Ok(previous)
    }

    /// Take `quantity` units out of stock, returning the new stock.
    ///
    /// Stock may go negative; preventing overselling is not the catalog's job here.
    pub fn decrement(&self, id: VariantId, quantity: i64) -> Result<i64, CatalogError> {
        if quantity <= 0 {
            return Err(DomainError::validation("decrement quantity must be positive").into());
        }
        let mut variants = self.variants.write().map_err(|_| poisoned())?;
        let variant = variants.get_mut(&id).ok_or_else(DomainError::not_found)?;
        let new_stock = variant.stock() - quantity;
        *variant = variant.clone().with_stock(new_stock);
        Ok(new_stock)
    }
}

impl VariantCatalog for InMemoryVariantCatalog {
    fn find_variant(&self, id: VariantId) -> Result<Option<Variant>, CatalogError> {
        let variants = self.variants.read().map_err(|_| poisoned())?;
        Ok(variants.get(&id).cloned())
    }
}
