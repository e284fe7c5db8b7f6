//! Simulation report: the engine's output contract.
//!
//! Every report carries all four impact sections. Metrics that do not apply
//! to a scenario are zero or empty, never absent.

use serde::{Deserialize, Serialize};

use super::Scenario;
use crate::economics::ModelError;

/// Recommendation urgency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Priority {
    /// Act now.
    High,
    /// Act soon.
    Medium,
    /// Worth considering.
    Low,
}

/// A prioritised action item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    /// Urgency.
    pub priority: Priority,
    /// Human-readable advice.
    pub message: String,
}

/// What was simulated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    /// Scenario tag.
    pub scenario: Scenario,
    /// One-line description of the disruption.
    pub description: String,
}

/// Monetary impact.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CostImpact {
    /// Extra operating cost before risk adjustment.
    pub additional_cost: f64,
    /// Extra cost after risk adjustment.
    pub risk_adjusted_cost: f64,
    /// Lost margin from stockouts.
    pub stockout_cost: f64,
    /// Expedited or backup shipping cost.
    pub expedited_cost: f64,
    /// Additional cost relative to the undisrupted baseline, in percent.
    pub percentage_increase: f64,
}

/// Service-level impact.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SlaImpact {
    /// Routes touched by the disruption.
    pub affected_routes: usize,
    /// Affected routes with no remaining path.
    pub blocked_routes: usize,
    /// Mean extra travel time over rerouted routes.
    pub average_delay_minutes: f64,
    /// Extra replenishment lead time.
    pub delay_days: f64,
    /// Expected fill rate, 0..=1.
    pub service_level: f64,
}

/// Emissions impact.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CarbonImpact {
    /// Extra kg CO₂.
    pub additional_emissions_kg: f64,
    /// Change relative to baseline, in percent.
    pub percentage_change: f64,
}

/// Inventory impact.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InventoryImpact {
    /// Ids of products at risk of stockout.
    pub affected_products: Vec<u64>,
    /// Total shortfall units across products.
    pub at_risk_units: f64,
    /// Recommended total safety stock.
    pub recommended_safety_stock: f64,
    /// Recommended total order quantity.
    pub recommended_order_quantity: f64,
    /// Demand-variability amplification upstream.
    pub bullwhip_factor: f64,
    /// Suggested price under the new demand/supply balance.
    pub recommended_price: f64,
}

/// All four impact sections.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Impact {
    /// Cost.
    pub cost: CostImpact,
    /// Service level.
    pub sla: SlaImpact,
    /// Carbon.
    pub carbon: CarbonImpact,
    /// Inventory.
    pub inventory: InventoryImpact,
}

/// Per-route outcome of a network disruption.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteImpact {
    /// Route id.
    pub route_id: u64,
    /// Undisrupted shortest distance, km.
    pub original_distance: f64,
    /// Disrupted shortest distance; `None` when blocked.
    pub new_distance: Option<f64>,
    /// Extra freight cost.
    pub additional_cost: f64,
    /// Extra travel time.
    pub delay_minutes: f64,
    /// Extra kg CO₂.
    pub additional_emissions_kg: f64,
    /// No path remains.
    pub blocked: bool,
}

/// Old and new path of a rerouted route.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReroutedPath {
    /// Route id.
    pub route_id: u64,
    /// Path on the canonical network.
    pub original_path: Vec<String>,
    /// Path on the disrupted network.
    pub new_path: Vec<String>,
}

/// Per-product outcome of an inventory-driven scenario.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductImpact {
    /// Inventory item id.
    pub product_id: u64,
    /// Item name.
    pub name: String,
    /// Demand over the scenario window.
    pub projected_demand: f64,
    /// Units available to meet it.
    pub available: f64,
    /// Unmet units.
    pub shortfall: f64,
    /// Days until stock runs out; `None` if it never does.
    #[serde(default)]
    pub days_until_stockout: Option<f64>,
    /// Recommended order quantity.
    pub order_quantity: f64,
    /// Recommended safety stock.
    pub safety_stock: f64,
    /// Lost margin from the shortfall.
    pub stockout_cost: f64,
    /// Effective capacity utilisation, where modelled.
    #[serde(default)]
    pub capacity_utilization: Option<f64>,
}

/// Supporting detail rows.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Details {
    /// Route-level outcomes.
    pub affected_routes: Vec<RouteImpact>,
    /// Paths that changed.
    pub rerouted_paths: Vec<ReroutedPath>,
    /// Product-level outcomes.
    #[serde(default)]
    pub product_impacts: Vec<ProductImpact>,
}

/// Result of one simulation run.
///
/// # Examples
///
/// ```
/// use sc_twin::models::{Priority, Scenario, SimulationReport};
///
/// let mut report = SimulationReport::new(Scenario::PeakSeason, "Festive ramp");
/// report.recommend(Priority::Low, "Review staffing");
/// assert_eq!(report.recommendations.len(), 1);
/// assert!(report.check_finite().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationReport {
    /// What was simulated.
    pub summary: Summary,
    /// Aggregate impact.
    pub impact: Impact,
    /// Action items, most urgent first once sorted.
    pub recommendations: Vec<Recommendation>,
    /// Supporting rows.
    pub details: Details,
}

impl SimulationReport {
    /// Creates a report with zeroed impact.
    pub fn new(scenario: Scenario, description: impl Into<String>) -> Self {
        Self {
            summary: Summary {
                scenario,
                description: description.into(),
            },
            impact: Impact::default(),
            recommendations: Vec::new(),
            details: Details::default(),
        }
    }

    /// Adds a recommendation.
    pub fn recommend(&mut self, priority: Priority, message: impl Into<String>) {
        self.recommendations.push(Recommendation {
            priority,
            message: message.into(),
        });
    }

    /// Orders recommendations High → Low, keeping insertion order within a
    /// priority.
    pub fn sort_recommendations(&mut self) {
        self.recommendations.sort_by_key(|r| r.priority);
    }

    /// Fails on the first NaN or infinite number in the report.
    pub fn check_finite(&self) -> Result<(), ModelError> {
        let i = &self.impact;
        let fields = [
            ("impact.cost.additional_cost", i.cost.additional_cost),
            ("impact.cost.risk_adjusted_cost", i.cost.risk_adjusted_cost),
            ("impact.cost.stockout_cost", i.cost.stockout_cost),
            ("impact.cost.expedited_cost", i.cost.expedited_cost),
            ("impact.cost.percentage_increase", i.cost.percentage_increase),
            ("impact.sla.average_delay_minutes", i.sla.average_delay_minutes),
            ("impact.sla.delay_days", i.sla.delay_days),
            ("impact.sla.service_level", i.sla.service_level),
            ("impact.carbon.additional_emissions_kg", i.carbon.additional_emissions_kg),
            ("impact.carbon.percentage_change", i.carbon.percentage_change),
            ("impact.inventory.at_risk_units", i.inventory.at_risk_units),
            ("impact.inventory.recommended_safety_stock", i.inventory.recommended_safety_stock),
            ("impact.inventory.recommended_order_quantity", i.inventory.recommended_order_quantity),
            ("impact.inventory.bullwhip_factor", i.inventory.bullwhip_factor),
            ("impact.inventory.recommended_price", i.inventory.recommended_price),
        ];
        for (name, value) in fields {
            finite(name, value)?;
        }

        for r in &self.details.affected_routes {
            finite("details.affected_routes.original_distance", r.original_distance)?;
            finite("details.affected_routes.additional_cost", r.additional_cost)?;
            finite("details.affected_routes.delay_minutes", r.delay_minutes)?;
            finite(
                "details.affected_routes.additional_emissions_kg",
                r.additional_emissions_kg,
            )?;
            if let Some(d) = r.new_distance {
                finite("details.affected_routes.new_distance", d)?;
            }
        }

        for p in &self.details.product_impacts {
            finite("details.product_impacts.projected_demand", p.projected_demand)?;
            finite("details.product_impacts.available", p.available)?;
            finite("details.product_impacts.shortfall", p.shortfall)?;
            finite("details.product_impacts.order_quantity", p.order_quantity)?;
            finite("details.product_impacts.safety_stock", p.safety_stock)?;
            finite("details.product_impacts.stockout_cost", p.stockout_cost)?;
            if let Some(d) = p.days_until_stockout {
                finite("details.product_impacts.days_until_stockout", d)?;
            }
            if let Some(u) = p.capacity_utilization {
                finite("details.product_impacts.capacity_utilization", u)?;
            }
        }
        Ok(())
    }
}

fn finite(name: &'static str, value: f64) -> Result<(), ModelError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ModelError::NonFinite { name })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_report_is_zeroed() {
        let r = SimulationReport::new(Scenario::DemandSpike, "test");
        assert_eq!(r.impact, Impact::default());
        assert!(r.recommendations.is_empty());
        assert!(r.details.affected_routes.is_empty());
    }

    #[test]
    fn test_serialized_keys_present() {
        let r = SimulationReport::new(Scenario::WeatherEvent, "test");
        let v = serde_json::to_value(&r).expect("ser");
        assert_eq!(v["summary"]["scenario"], "weather_event");
        assert_eq!(v["impact"]["sla"]["affected_routes"], 0);
        assert!(v["impact"]["inventory"]["affected_products"].is_array());
        assert!(v["impact"]["cost"].is_object());
        assert!(v["impact"]["carbon"].is_object());
        assert!(v["details"]["rerouted_paths"].is_array());
    }

    #[test]
    fn test_priority_serialization() {
        let rec = Recommendation {
            priority: Priority::High,
            message: "x".into(),
        };
        let v = serde_json::to_value(&rec).expect("ser");
        assert_eq!(v["priority"], "High");
    }

    #[test]
    fn test_sort_recommendations() {
        let mut r = SimulationReport::new(Scenario::PeakSeason, "test");
        r.recommend(Priority::Low, "a");
        r.recommend(Priority::High, "b");
        r.recommend(Priority::Medium, "c");
        r.recommend(Priority::High, "d");
        r.sort_recommendations();
        let msgs: Vec<&str> = r.recommendations.iter().map(|x| x.message.as_str()).collect();
        assert_eq!(msgs, vec!["b", "d", "c", "a"]);
    }

    #[test]
    fn test_check_finite_catches_nan() {
        let mut r = SimulationReport::new(Scenario::DemandSpike, "test");
        r.impact.cost.stockout_cost = f64::NAN;
        assert_eq!(
            r.check_finite(),
            Err(ModelError::NonFinite {
                name: "impact.cost.stockout_cost"
            })
        );
    }

    #[test]
    fn test_check_finite_detail_rows() {
        let mut r = SimulationReport::new(Scenario::WeatherEvent, "test");
        r.details.affected_routes.push(RouteImpact {
            route_id: 1,
            original_distance: 100.0,
            new_distance: None,
            additional_cost: 0.0,
            delay_minutes: 0.0,
            additional_emissions_kg: 0.0,
            blocked: true,
        });
        assert!(r.check_finite().is_ok());
        r.details.affected_routes[0].new_distance = Some(f64::INFINITY);
        assert!(r.check_finite().is_err());
    }
}
