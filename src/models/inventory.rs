//! Inventory item records supplied by the ERP side.

use serde::{Deserialize, Serialize};

/// A stocked product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    /// Product id; suppliers reference it in `product_ids`.
    pub id: u64,
    /// Display name.
    pub name: String,
    /// Product category used for scenario filtering.
    pub category: String,
    /// Average units consumed per day.
    pub daily_consumption: f64,
    /// Units on hand.
    pub stock: f64,
    /// Purchase cost per unit.
    pub unit_cost: f64,
    /// Annual holding cost per unit.
    pub holding_cost: f64,
    /// Fixed cost per order.
    pub setup_cost: f64,
}

impl InventoryItem {
    /// Creates an item with zero costs.
    pub fn new(
        id: u64,
        name: impl Into<String>,
        category: impl Into<String>,
        daily_consumption: f64,
        stock: f64,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            category: category.into(),
            daily_consumption,
            stock,
            unit_cost: 0.0,
            holding_cost: 0.0,
            setup_cost: 0.0,
        }
    }

    /// Sets unit, holding, and setup costs.
    pub fn with_costs(mut self, unit_cost: f64, holding_cost: f64, setup_cost: f64) -> Self {
        self.unit_cost = unit_cost;
        self.holding_cost = holding_cost;
        self.setup_cost = setup_cost;
        self
    }

    /// Days the current stock lasts at normal consumption.
    ///
    /// `None` when nothing is consumed.
    pub fn days_of_cover(&self) -> Option<f64> {
        (self.daily_consumption > 0.0).then(|| self.stock / self.daily_consumption)
    }
}
