//! Supplier outage handler.
//!
//! Cuts a supplier's deliveries by a percentage for the outage window. Each
//! product it supplies burns through stock at the lost rate; the shortfall
//! is bought through the best backup supplier and hauled in where the backup
//! carries the product, and lost as stockouts everywhere else.

use tracing::{debug, info_span, warn};

use super::{fill_rate, id_list, percent_of, ScenarioContext};
use crate::economics::{
    bullwhip_effect, carbon_footprint, eoq, lead_time_impact, risk_adjusted_cost, safety_stock,
    stockout_cost, transport_cost,
};
use crate::error::{EngineError, Result};
use crate::models::{
    Priority, ProductImpact, Scenario, SimulationReport, Supplier, SupplierOutageParams,
};

/// Simulates a supplier outage.
///
/// # Errors
///
/// [`EngineError::NotFound`] if no supplier has `supplier_id`,
/// [`EngineError::Computation`] if a product's costs make EOQ undefined, and
/// any upstream error from listing suppliers or inventory.
pub fn simulate(
    ctx: &ScenarioContext<'_>,
    params: &SupplierOutageParams,
) -> Result<SimulationReport> {
    let _span = info_span!("scenario", name = "supplier_outage", supplier = params.supplier_id).entered();

    let suppliers = ctx.data.list_suppliers()?;
    let Some(supplier) = suppliers.iter().find(|s| s.id == params.supplier_id) else {
        return Err(EngineError::not_found("supplier", params.supplier_id.to_string()));
    };
    let backup = Supplier::find_backup(supplier, &suppliers);
    match backup {
        Some(b) => debug!(backup = b.id, reliability = b.reliability, "backup selected"),
        None => warn!("no backup supplier shares a product"),
    }

    let products: Vec<_> = ctx
        .data
        .list_inventory(None)?
        .into_iter()
        .filter(|item| supplier.supplies(item.id))
        .collect();

    let cfg = ctx.config;
    let mode = cfg.default_mode;
    let reduction = params.supply_reduction / 100.0;
    let lead_time = lead_time_impact(
        supplier.lead_time_days,
        supplier.lead_time_variability,
        reduction,
    );

    let mut report = SimulationReport::new(
        Scenario::SupplierOutage,
        format!(
            "{:.0}% supply loss from {} for {} day(s) across {} product(s)",
            params.supply_reduction,
            supplier.name,
            params.duration,
            products.len()
        ),
    );

    let mut demand = 0.0;
    let mut lost_supply = 0.0;
    let mut baseline_value = 0.0;
    let mut total_shortfall = 0.0;
    let mut total_stockout = 0.0;
    let mut covered_shortfall = 0.0;
    let mut uncovered_shortfall = 0.0;
    let mut uncovered_stockout = 0.0;
    let mut premium = 0.0;
    let mut total_safety = 0.0;
    let mut total_order = 0.0;
    let mut at_risk = Vec::new();
    let mut covered = Vec::new();
    let mut uncovered = Vec::new();

    for item in &products {
        let lost_daily = item.daily_consumption * reduction;
        let lost = lost_daily * params.duration;
        let shortfall = (lost - item.stock).max(0.0);
        let days_until_stockout = (lost_daily > 0.0).then(|| item.stock / lost_daily);
        let probability = if lost > 0.0 { shortfall / lost } else { 0.0 };
        let lost_margin = stockout_cost(item.unit_cost, probability, shortfall, cfg.profit_margin);
        let order_quantity = eoq(item.daily_consumption * 365.0, item.setup_cost, item.holding_cost)?;
        let buffer = safety_stock(
            item.daily_consumption,
            lead_time,
            cfg.service_level,
            item.daily_consumption * cfg.demand_variability,
        );
        debug!(item = item.id, lost, shortfall, ?days_until_stockout, "product exposed");

        match backup.filter(|b| b.supplies(item.id)) {
            Some(b) => {
                premium += (shortfall * item.unit_cost * (b.cost_factor - 1.0)).max(0.0);
                covered_shortfall += shortfall;
                if shortfall > 0.0 {
                    covered.push(item.id);
                }
            }
            None => {
                uncovered_shortfall += shortfall;
                uncovered_stockout += lost_margin;
                if shortfall > 0.0 {
                    uncovered.push(item.id);
                }
            }
        }
        demand += item.daily_consumption * params.duration;
        lost_supply += lost;
        baseline_value += item.daily_consumption * params.duration * item.unit_cost;
        total_shortfall += shortfall;
        total_stockout += lost_margin;
        total_safety += buffer;
        total_order += order_quantity;
        if shortfall > 0.0 {
            at_risk.push(item.id);
        }

        report.details.product_impacts.push(ProductImpact {
            product_id: item.id,
            name: item.name.clone(),
            projected_demand: lost,
            available: item.stock,
            shortfall,
            days_until_stockout,
            order_quantity,
            safety_stock: buffer,
            stockout_cost: lost_margin,
            capacity_utilization: None,
        });
    }

    let bullwhip = bullwhip_effect(cfg.demand_variability, lead_time, cfg.forecast_period_days)?;
    let baseline_co2 = carbon_footprint(cfg.long_haul_distance_km, demand, mode);

    let impact = &mut report.impact;
    impact.cost.stockout_cost = total_stockout;
    impact.inventory.affected_products = at_risk.clone();
    impact.inventory.at_risk_units = total_shortfall;
    impact.inventory.recommended_safety_stock = total_safety;
    impact.inventory.recommended_order_quantity = total_order;
    impact.inventory.bullwhip_factor = bullwhip;

    match backup {
        Some(b) => {
            let (freight, co2) = if covered_shortfall > 0.0 {
                (
                    transport_cost(cfg.long_haul_distance_km, covered_shortfall, mode),
                    carbon_footprint(cfg.long_haul_distance_km, covered_shortfall, mode),
                )
            } else {
                (0.0, 0.0)
            };
            let additional = premium + freight + uncovered_stockout;
            let risk = [("supplier_failure", 1.0 - b.reliability)];

            impact.cost.additional_cost = additional;
            impact.cost.risk_adjusted_cost = risk_adjusted_cost(additional, &risk);
            impact.cost.expedited_cost = freight;
            impact.cost.percentage_increase = percent_of(additional, baseline_value);
            let backup_delay = if covered_shortfall > 0.0 {
                lead_time_impact(b.lead_time_days, b.lead_time_variability, reduction)
            } else {
                0.0
            };
            let delay_days = if uncovered_shortfall > 0.0 {
                backup_delay.max(params.duration)
            } else {
                backup_delay
            };
            impact.sla.delay_days = delay_days;
            impact.sla.service_level = fill_rate(
                covered_shortfall * (1.0 - b.reliability) + uncovered_shortfall,
                demand,
            );
            impact.carbon.additional_emissions_kg = co2;
            impact.carbon.percentage_change = percent_of(co2, baseline_co2);

            if at_risk.is_empty() {
                report.recommend(
                    Priority::Medium,
                    format!("Keep {} on standby; current stock covers the outage", b.name),
                );
            }
            if !covered.is_empty() {
                report.recommend(
                    Priority::High,
                    format!(
                        "Source {covered_shortfall:.0} units of {} from {} ({:.0}% reliable, {:.1} day lead time)",
                        id_list(&covered),
                        b.name,
                        b.reliability * 100.0,
                        backup_delay
                    ),
                );
            }
            if !uncovered.is_empty() {
                report.recommend(
                    Priority::High,
                    format!(
                        "{} does not carry {}; ration until {} recovers ({uncovered_shortfall:.0} units short)",
                        b.name,
                        id_list(&uncovered),
                        supplier.name
                    ),
                );
            }
        }
        None => {
            let risk = [("supplier_failure", reduction)];
            impact.cost.additional_cost = total_stockout;
            impact.cost.risk_adjusted_cost = risk_adjusted_cost(total_stockout, &risk);
            impact.cost.percentage_increase = percent_of(total_stockout, baseline_value);
            impact.sla.delay_days = if lost_supply > 0.0 { params.duration } else { 0.0 };
            impact.sla.service_level = fill_rate(total_shortfall, demand);

            report.recommend(
                Priority::High,
                format!(
                    "No alternate supplier covers {}'s products; qualify a second source",
                    supplier.name
                ),
            );
            if !at_risk.is_empty() {
                report.recommend(
                    Priority::High,
                    format!(
                        "Ration {} until {} recovers ({total_shortfall:.0} units short)",
                        id_list(&at_risk),
                        supplier.name
                    ),
                );
            }
        }
    }

    if total_safety > 0.0 {
        report.recommend(
            Priority::Medium,
            format!("Raise safety stock on {}'s products by {total_safety:.0} units", supplier.name),
        );
    }
    if products.is_empty() {
        report.recommend(
            Priority::Low,
            format!("{} supplies no stocked products; no action needed", supplier.name),
        );
    }
    report.sort_recommendations();

    Ok(report)
}
