//! Demand spike handler.
//!
//! Scales daily consumption for one category, projects it over the spike
//! window, and flags every item whose stock cannot cover the projection. A
//! fixed share of the extra demand is assumed to ship expedited.

use tracing::{debug, info_span};

use super::{fill_rate, id_list, percent_of, ScenarioContext};
use crate::economics::{
    bullwhip_effect, carbon_footprint, dynamic_price, eoq, risk_adjusted_cost, safety_stock,
    stockout_cost, transport_cost,
};
use crate::error::{EngineError, Result};
use crate::models::{DemandSpikeParams, Priority, ProductImpact, Scenario, SimulationReport};

/// Simulates a demand spike.
///
/// # Errors
///
/// [`EngineError::NotFound`] if the category has no items,
/// [`EngineError::Computation`] if an item's costs make EOQ undefined, and
/// any upstream error from listing inventory.
pub fn simulate(ctx: &ScenarioContext<'_>, params: &DemandSpikeParams) -> Result<SimulationReport> {
    let _span = info_span!("scenario", name = "demand_spike", category = %params.category).entered();

    let items = ctx.data.list_inventory(Some(&params.category))?;
    if items.is_empty() {
        return Err(EngineError::not_found("category", &params.category));
    }

    let cfg = ctx.config;
    let growth = params.increase_percentage / 100.0;
    let service_level = params.service_level.unwrap_or(cfg.service_level);

    let mut report = SimulationReport::new(
        Scenario::DemandSpike,
        format!(
            "{:.0}% demand spike in {} for {} day(s) across {} item(s)",
            params.increase_percentage,
            params.category,
            params.duration,
            items.len()
        ),
    );

    let mut normal_demand = 0.0;
    let mut projected_demand = 0.0;
    let mut extra_demand = 0.0;
    let mut total_stock = 0.0;
    let mut baseline_value = 0.0;
    let mut weighted_unit_cost = 0.0;
    let mut total_shortfall = 0.0;
    let mut total_stockout = 0.0;
    let mut total_safety = 0.0;
    let mut total_order = 0.0;
    let mut at_risk = Vec::new();

    for item in &items {
        let spiked_daily = item.daily_consumption * (1.0 + growth);
        let normal = item.daily_consumption * params.duration;
        let projected = spiked_daily * params.duration;
        let extra = projected - normal;

        let order_quantity = eoq(spiked_daily * 365.0, item.setup_cost, item.holding_cost)?;
        let buffer = safety_stock(
            spiked_daily,
            cfg.lead_time_days,
            service_level,
            spiked_daily * cfg.demand_variability,
        );
        let shortfall = (projected - item.stock).max(0.0);
        let is_at_risk = item.stock < projected;
        let probability = if projected > 0.0 { shortfall / projected } else { 0.0 };
        let lost = stockout_cost(item.unit_cost, probability, shortfall, cfg.profit_margin);
        let days_until_stockout = (is_at_risk && spiked_daily > 0.0).then(|| item.stock / spiked_daily);
        debug!(item = item.id, projected, shortfall, order_quantity, "item projected");

        normal_demand += normal;
        projected_demand += projected;
        extra_demand += extra;
        total_stock += item.stock;
        baseline_value += normal * item.unit_cost;
        weighted_unit_cost += projected * item.unit_cost;
        total_shortfall += shortfall;
        total_stockout += lost;
        total_safety += buffer;
        total_order += order_quantity;
        if is_at_risk {
            at_risk.push(item.id);
        }

        report.details.product_impacts.push(ProductImpact {
            product_id: item.id,
            name: item.name.clone(),
            projected_demand: projected,
            available: item.stock,
            shortfall,
            days_until_stockout,
            order_quantity,
            safety_stock: buffer,
            stockout_cost: lost,
            capacity_utilization: None,
        });
    }

    let mode = cfg.default_mode;
    let expedited_units = extra_demand * cfg.expedited_fraction;
    let (expedited_cost, expedited_co2) = if expedited_units > 0.0 {
        (
            transport_cost(cfg.expedited_distance_km, expedited_units, mode),
            carbon_footprint(cfg.expedited_distance_km, expedited_units, mode),
        )
    } else {
        (0.0, 0.0)
    };
    let baseline_co2 = carbon_footprint(cfg.expedited_distance_km, normal_demand, mode);

    let bullwhip = bullwhip_effect(growth, cfg.lead_time_days, cfg.forecast_period_days)?;

    let average_unit_cost = if projected_demand > 0.0 {
        weighted_unit_cost / projected_demand
    } else {
        0.0
    };
    let base_price = average_unit_cost * (1.0 + cfg.profit_margin);
    let price = if total_stock > 0.0 && projected_demand > 0.0 {
        dynamic_price(base_price, projected_demand, total_stock, cfg.price_elasticity)?
    } else {
        base_price
    };

    let additional_cost = total_stockout + expedited_cost;
    let risk = [("demand_spike", growth.min(1.0))];

    let impact = &mut report.impact;
    impact.cost.additional_cost = additional_cost;
    impact.cost.risk_adjusted_cost = risk_adjusted_cost(additional_cost, &risk);
    impact.cost.stockout_cost = total_stockout;
    impact.cost.expedited_cost = expedited_cost;
    impact.cost.percentage_increase = percent_of(additional_cost, baseline_value);
    impact.sla.service_level = fill_rate(total_shortfall, projected_demand);
    impact.carbon.additional_emissions_kg = expedited_co2;
    impact.carbon.percentage_change = percent_of(expedited_co2, baseline_co2);
    impact.inventory.affected_products = at_risk.clone();
    impact.inventory.at_risk_units = total_shortfall;
    impact.inventory.recommended_safety_stock = total_safety;
    impact.inventory.recommended_order_quantity = total_order;
    impact.inventory.bullwhip_factor = bullwhip;
    impact.inventory.recommended_price = price;

    if !at_risk.is_empty() {
        report.recommend(
            Priority::High,
            format!(
                "Expedite replenishment for {} ({total_shortfall:.0} units short over the spike)",
                id_list(&at_risk)
            ),
        );
    }
    if expedited_units > 0.0 {
        report.recommend(
            Priority::Medium,
            format!(
                "Budget {expedited_cost:.2} for expediting {expedited_units:.0} units by {mode}"
            ),
        );
    }
    report.recommend(
        Priority::Medium,
        format!("Hold {total_safety:.0} units of safety stock for {}", params.category),
    );
    if price > base_price {
        report.recommend(
            Priority::Low,
            format!("Consider pricing at {price:.2} (list {base_price:.2}) while supply is short"),
        );
    }
    if bullwhip > growth {
        report.recommend(
            Priority::Low,
            format!(
                "Share point-of-sale data upstream; order variability amplifies {:.1}x",
                if growth > 0.0 { bullwhip / growth } else { 1.0 }
            ),
        );
    }
    report.sort_recommendations();

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::EngineConfig;
    use crate::engine::InMemoryData;
    use crate::models::InventoryItem;
    use crate::network::demo_graph;

    fn run(data: &InMemoryData, params: &DemandSpikeParams) -> Result<SimulationReport> {
        let graph = demo_graph();
        let config = EngineConfig::default();
        let ctx = ScenarioContext {
            graph: &graph,
            data,
            config: &config,
        };
        simulate(&ctx, params)
    }

    fn spike(category: &str, pct: f64, duration: f64) -> DemandSpikeParams {
        DemandSpikeParams {
            category: category.to_string(),
            increase_percentage: pct,
            duration,
            service_level: None,
        }
    }

    fn rice(stock: f64) -> InventoryItem {
        InventoryItem::new(7, "Rice", "grocery", 20.0, stock).with_costs(2.0, 0.5, 40.0)
    }

    #[test]
    fn test_short_item_is_at_risk() {
        // 20/day · 1.5 · 10 days = 300 projected against 100 on hand
        let data = InMemoryData::new().with_item(rice(100.0));
        let report = run(&data, &spike("grocery", 50.0, 10.0)).expect("runs");
        assert_eq!(report.impact.inventory.affected_products, vec![7]);
        assert!((report.impact.inventory.at_risk_units - 200.0).abs() < 1e-9);

        let row = &report.details.product_impacts[0];
        assert!((row.projected_demand - 300.0).abs() < 1e-9);
        let days = row.days_until_stockout.expect("at risk");
        assert!((days - 100.0 / 30.0).abs() < 1e-9);

        // 2.0 · (200/300) · 200 · 0.30
        assert!((report.impact.cost.stockout_cost - 80.0).abs() < 1e-9);
        assert!((report.impact.sla.service_level - 1.0 / 3.0).abs() < 1e-9);
        assert_eq!(report.recommendations[0].priority, Priority::High);
    }

    #[test]
    fn test_expedited_share_of_extra_demand() {
        let data = InMemoryData::new().with_item(rice(10_000.0));
        let report = run(&data, &spike("grocery", 50.0, 10.0)).expect("runs");
        assert!(report.impact.inventory.affected_products.is_empty());
        // extra = 100 units, 15% expedited over 500 km by truck
        let expected = transport_cost(500.0, 15.0, crate::economics::TransportMode::Truck);
        assert!((report.impact.cost.expedited_cost - expected).abs() < 1e-9);
        assert_eq!(report.impact.cost.stockout_cost, 0.0);
        assert_eq!(report.impact.sla.service_level, 1.0);
    }

    #[test]
    fn test_price_rises_when_short() {
        let data = InMemoryData::new().with_item(rice(100.0));
        let report = run(&data, &spike("grocery", 50.0, 10.0)).expect("runs");
        let list = 2.0 * 1.3;
        assert!(report.impact.inventory.recommended_price > list);
    }

    #[test]
    fn test_zero_stock_keeps_list_price() {
        let data = InMemoryData::new().with_item(rice(0.0));
        let report = run(&data, &spike("grocery", 50.0, 10.0)).expect("runs");
        assert!((report.impact.inventory.recommended_price - 2.6).abs() < 1e-9);
        assert!(report.check_finite().is_ok());
    }

    #[test]
    fn test_bullwhip_amplifies() {
        let data = InMemoryData::new().with_item(rice(100.0));
        let report = run(&data, &spike("grocery", 50.0, 10.0)).expect("runs");
        // L = p = 7 → sqrt(5) · 0.5
        assert!((report.impact.inventory.bullwhip_factor - 5f64.sqrt() * 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_zero_increase_costs_nothing() {
        let data = InMemoryData::new().with_item(rice(10_000.0));
        let report = run(&data, &spike("grocery", 0.0, 10.0)).expect("runs");
        assert_eq!(report.impact.cost.additional_cost, 0.0);
        assert_eq!(report.impact.carbon.additional_emissions_kg, 0.0);
        assert_eq!(report.impact.inventory.bullwhip_factor, 0.0);
    }

    #[test]
    fn test_unknown_category() {
        let data = InMemoryData::new().with_item(rice(100.0));
        let err = run(&data, &spike("toys", 50.0, 10.0)).expect_err("empty category");
        assert!(matches!(err, EngineError::NotFound { kind: "category", .. }));
    }

    #[test]
    fn test_zero_holding_cost_is_computation_error() {
        let data = InMemoryData::new().with_item(InventoryItem::new(1, "Salt", "grocery", 5.0, 1.0));
        let err = run(&data, &spike("grocery", 20.0, 5.0)).expect_err("eoq undefined");
        assert!(matches!(err, EngineError::Computation(_)));
    }

    #[test]
    fn test_service_level_override_raises_buffer() {
        let data = InMemoryData::new().with_item(rice(100.0));
        let base = run(&data, &spike("grocery", 50.0, 10.0)).expect("runs");
        let mut params = spike("grocery", 50.0, 10.0);
        params.service_level = Some(0.99);
        let strict = run(&data, &params).expect("runs");
        assert!(
            strict.impact.inventory.recommended_safety_stock
                > base.impact.inventory.recommended_safety_stock
        );
    }
}
