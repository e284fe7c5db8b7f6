//! Peak season handler.
//!
//! Demand grows linearly to `1 + growth` over the ramp window. Before the
//! ramp starts, stock builds up at the normal consumption rate for the
//! preparation window; whatever the ramp consumes beyond stock plus buildup
//! is at risk.

use tracing::{debug, info_span};

use super::{fill_rate, id_list, percent_of, ScenarioContext};
use crate::economics::{
    bullwhip_effect, capacity_utilization, carbon_footprint, dynamic_price, eoq,
    optimal_service_level, risk_adjusted_cost, safety_stock, stockout_cost, transport_cost,
};
use crate::error::{EngineError, Result};
use crate::models::{PeakSeasonParams, Priority, ProductImpact, Scenario, SimulationReport};

/// Raw load-to-capacity ratio above which a product counts as
/// capacity-constrained.
const CONGESTED: f64 = 0.8;

/// Simulates a peak season.
///
/// # Errors
///
/// [`EngineError::NotFound`] if a category is given and has no items,
/// [`EngineError::Computation`] if an item's costs make EOQ undefined, and
/// any upstream error from listing inventory.
pub fn simulate(ctx: &ScenarioContext<'_>, params: &PeakSeasonParams) -> Result<SimulationReport> {
    let category = params.category.as_deref();
    let _span = info_span!("scenario", name = "peak_season", category = category.unwrap_or("*")).entered();

    let items = ctx.data.list_inventory(category)?;
    if let (Some(c), true) = (category, items.is_empty()) {
        return Err(EngineError::not_found("category", c));
    }

    let cfg = ctx.config;
    let mode = cfg.default_mode;
    let growth = params.growth_percentage / 100.0;

    let mut report = SimulationReport::new(
        Scenario::PeakSeason,
        format!(
            "{:.0}% peak over {} day(s) with {} day(s) of preparation across {} item(s)",
            params.growth_percentage,
            params.ramp_days,
            params.preparation_days,
            items.len()
        ),
    );

    let mut normal_demand = 0.0;
    let mut projected_demand = 0.0;
    let mut available_total = 0.0;
    let mut buildup_total = 0.0;
    let mut baseline_value = 0.0;
    let mut weighted_unit_cost = 0.0;
    let mut buildup_holding = 0.0;
    let mut holding_sum = 0.0;
    let mut margin_sum = 0.0;
    let mut total_shortfall = 0.0;
    let mut total_stockout = 0.0;
    let mut total_safety = 0.0;
    let mut total_order = 0.0;
    let mut congested = Vec::new();
    let mut at_risk = Vec::new();

    for item in &items {
        let base = item.daily_consumption;
        let peak_daily = base * (1.0 + growth);
        let normal = base * params.ramp_days;
        let projected = normal * (1.0 + growth / 2.0);
        let buildup = base * params.preparation_days;
        let available = item.stock + buildup;
        let shortfall = (projected - available).max(0.0);

        let order_quantity = eoq(peak_daily * 365.0, item.setup_cost, item.holding_cost)?;
        let buffer = safety_stock(
            peak_daily,
            cfg.lead_time_days,
            cfg.service_level,
            peak_daily * cfg.demand_variability,
        );
        let capacity = base * cfg.capacity_headroom;
        let load_ratio = if capacity > 0.0 { peak_daily / capacity } else { 0.0 };
        // Heavy overload drives the efficiency-adjusted figure negative.
        let utilization = if base > 0.0 {
            Some(capacity_utilization(peak_daily, capacity, cfg.warehouse_efficiency)?.max(0.0))
        } else {
            None
        };
        let probability = if projected > 0.0 { shortfall / projected } else { 0.0 };
        let lost = stockout_cost(item.unit_cost, probability, shortfall, cfg.profit_margin);
        let average_daily = projected / params.ramp_days;
        let days_until_stockout =
            (shortfall > 0.0 && average_daily > 0.0).then(|| available / average_daily);
        debug!(item = item.id, projected, available, shortfall, ?utilization, "item projected");

        normal_demand += normal;
        projected_demand += projected;
        available_total += available;
        buildup_total += buildup;
        baseline_value += normal * item.unit_cost;
        weighted_unit_cost += projected * item.unit_cost;
        buildup_holding += buildup * item.holding_cost * params.preparation_days / 365.0;
        holding_sum += item.holding_cost;
        margin_sum += item.unit_cost * cfg.profit_margin;
        total_shortfall += shortfall;
        total_stockout += lost;
        total_safety += buffer;
        total_order += order_quantity;
        if load_ratio > CONGESTED {
            congested.push(item.id);
        }
        if shortfall > 0.0 {
            at_risk.push(item.id);
        }

        report.details.product_impacts.push(ProductImpact {
            product_id: item.id,
            name: item.name.clone(),
            projected_demand: projected,
            available,
            shortfall,
            days_until_stockout,
            order_quantity,
            safety_stock: buffer,
            stockout_cost: lost,
            capacity_utilization: utilization,
        });
    }

    let (freight, buildup_co2) = if buildup_total > 0.0 {
        (
            transport_cost(cfg.buildup_distance_km, buildup_total, mode),
            carbon_footprint(cfg.buildup_distance_km, buildup_total, mode),
        )
    } else {
        (0.0, 0.0)
    };
    let baseline_co2 = carbon_footprint(cfg.buildup_distance_km, normal_demand, mode);
    let bullwhip = bullwhip_effect(growth, cfg.lead_time_days, cfg.forecast_period_days)?;

    let average_unit_cost = if projected_demand > 0.0 {
        weighted_unit_cost / projected_demand
    } else {
        0.0
    };
    let base_price = average_unit_cost * (1.0 + cfg.profit_margin);
    let price = if available_total > 0.0 && projected_demand > 0.0 {
        dynamic_price(base_price, projected_demand, available_total, cfg.price_elasticity)?
    } else {
        base_price
    };

    let count = items.len().max(1) as f64;
    let target_level = optimal_service_level(
        projected_demand,
        cfg.lead_time_days,
        holding_sum / count,
        margin_sum / count,
    );

    let additional_cost = total_stockout + freight + buildup_holding;
    let congested_share = congested.len() as f64 / count;
    let risk = [
        ("demand_spike", growth.min(1.0)),
        ("capacity_constraint", congested_share),
    ];

    let impact = &mut report.impact;
    impact.cost.additional_cost = additional_cost;
    impact.cost.risk_adjusted_cost = risk_adjusted_cost(additional_cost, &risk);
    impact.cost.stockout_cost = total_stockout;
    impact.cost.expedited_cost = freight;
    impact.cost.percentage_increase = percent_of(additional_cost, baseline_value);
    impact.sla.service_level = fill_rate(total_shortfall, projected_demand);
    impact.carbon.additional_emissions_kg = buildup_co2;
    impact.carbon.percentage_change = percent_of(buildup_co2, baseline_co2);
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
                "Start buildup earlier or order ahead for {} ({total_shortfall:.0} units short at peak)",
                id_list(&at_risk)
            ),
        );
    }
    if !congested.is_empty() {
        report.recommend(
            Priority::High,
            format!(
                "Handling capacity for {} runs above {:.0}%; add shifts or overflow space",
                id_list(&congested),
                CONGESTED * 100.0
            ),
        );
    }
    if buildup_total > 0.0 {
        report.recommend(
            Priority::Medium,
            format!(
                "Move {buildup_total:.0} units of buildup stock ({freight:.2} freight) before the ramp"
            ),
        );
    }
    report.recommend(
        Priority::Medium,
        format!("Order in lots of {total_order:.0} units and hold {total_safety:.0} units of safety stock"),
    );
    report.recommend(
        Priority::Low,
        format!("Cost-optimal service level for the season is {:.0}%", target_level * 100.0),
    );
    report.sort_recommendations();

    Ok(report)
}
