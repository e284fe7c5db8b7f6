//! Data-access port for the external collaborators that own routes,
//! inventory, and suppliers.

use crate::error::Result;
use crate::models::{InventoryItem, Route, Supplier};

/// Read-only access to supply-chain reference data.
///
/// Implementations report an unavailable backend as
/// [`EngineError::Upstream`](crate::error::EngineError::Upstream). The
/// engine never retries.
///
/// # Examples
///
/// ```
/// use sc_twin::engine::{InMemoryData, SupplyChainData};
/// use sc_twin::models::InventoryItem;
///
/// let data = InMemoryData::new()
///     .with_item(InventoryItem::new(1, "Rice", "grocery", 10.0, 50.0))
///     .with_item(InventoryItem::new(2, "Soap", "personal_care", 5.0, 20.0));
/// let grocery = data.list_inventory(Some("grocery")).unwrap();
/// assert_eq!(grocery.len(), 1);
/// assert_eq!(data.list_inventory(None).unwrap().len(), 2);
/// ```
pub trait SupplyChainData: Send + Sync {
    /// All known routes.
    fn list_routes(&self) -> Result<Vec<Route>>;

    /// Inventory items, optionally restricted to one category.
    fn list_inventory(&self, category: Option<&str>) -> Result<Vec<InventoryItem>>;

    /// All known suppliers.
    fn list_suppliers(&self) -> Result<Vec<Supplier>>;
}

/// Vec-backed data source for tests, demos, and replay.
#[derive(Debug, Clone, Default)]
pub struct InMemoryData {
    routes: Vec<Route>,
    inventory: Vec<InventoryItem>,
    suppliers: Vec<Supplier>,
}

impl InMemoryData {
    /// Creates an empty source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a route.
    pub fn with_route(mut self, route: Route) -> Self {
        self.routes.push(route);
        self
    }

    /// Adds an inventory item.
    pub fn with_item(mut self, item: InventoryItem) -> Self {
        self.inventory.push(item);
        self
    }

    /// Adds a supplier.
    pub fn with_supplier(mut self, supplier: Supplier) -> Self {
        self.suppliers.push(supplier);
        self
    }
}

impl SupplyChainData for InMemoryData {
    fn list_routes(&self) -> Result<Vec<Route>> {
        Ok(self.routes.clone())
    }

    fn list_inventory(&self, category: Option<&str>) -> Result<Vec<InventoryItem>> {
        Ok(self
            .inventory
            .iter()
            .filter(|item| category.map_or(true, |c| item.category == c))
            .cloned()
            .collect())
    }

    fn list_suppliers(&self) -> Result<Vec<Supplier>> {
        Ok(self.suppliers.clone())
    }
}
