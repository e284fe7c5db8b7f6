//! Weather event handler.
//!
//! Floods cut links touching the city at random with a severity-dependent
//! probability; storms and fog stretch those links by a severity-dependent
//! divisor. Every in-service route touching the city is rerouted on the
//! disrupted fork and compared with its canonical shortest path.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info_span, warn};

use super::{percent_of, ScenarioContext};
use crate::economics::{carbon_footprint, risk_adjusted_cost, safety_stock, transport_cost};
use crate::error::{EngineError, Result};
use crate::models::{
    Priority, ReroutedPath, RouteImpact, Scenario, Severity, SimulationReport,
    WeatherEventParams, WeatherKind,
};
use crate::network::{route_through, Graph};

/// How a weather event degrades links touching the city.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EdgeDisruption {
    /// Each link is removed with this probability.
    Remove {
        /// Removal probability, 0..=1.
        probability: f64,
    },
    /// Link distances are divided by this factor (0 < divisor < 1).
    Slow {
        /// Speed retained, as a fraction.
        divisor: f64,
    },
}

impl EdgeDisruption {
    /// Severity table for each event kind.
    pub fn for_event(kind: WeatherKind, severity: Severity) -> Self {
        match (kind, severity) {
            (WeatherKind::Flood, Severity::Low) => Self::Remove { probability: 0.4 },
            (WeatherKind::Flood, Severity::Medium) => Self::Remove { probability: 0.7 },
            (WeatherKind::Flood, Severity::High) => Self::Remove { probability: 1.0 },
            (WeatherKind::Storm, Severity::Low) => Self::Slow { divisor: 0.7 },
            (WeatherKind::Storm, Severity::Medium) => Self::Slow { divisor: 0.5 },
            (WeatherKind::Storm, Severity::High) => Self::Slow { divisor: 0.3 },
            (WeatherKind::Fog, Severity::Low) => Self::Slow { divisor: 0.8 },
            (WeatherKind::Fog, Severity::Medium) => Self::Slow { divisor: 0.6 },
            (WeatherKind::Fog, Severity::High) => Self::Slow { divisor: 0.4 },
        }
    }

    /// Probability fed to the `weather_event` risk factor.
    ///
    /// Removal probability for floods; lost speed share for slow-downs.
    pub fn risk_probability(&self) -> f64 {
        match *self {
            Self::Remove { probability } => probability,
            Self::Slow { divisor } => 1.0 - divisor,
        }
    }

    /// Applies the disruption to links touching `city`.
    ///
    /// Returns the number of links removed or slowed.
    pub fn apply(&self, graph: &mut Graph, city: &str, seed: u64) -> usize {
        match *self {
            Self::Remove { probability } => {
                let mut rng = StdRng::seed_from_u64(seed);
                graph.remove_edges_touching(city, |_, _| rng.random_bool(probability))
            }
            Self::Slow { divisor } => graph.scale_edges_touching(city, 1.0 / divisor),
        }
    }
}

/// Simulates a weather event.
///
/// # Errors
///
/// [`EngineError::NotFound`] if the city or a route's waypoint is not in the
/// network, and any upstream error from listing routes.
pub fn simulate(ctx: &ScenarioContext<'_>, params: &WeatherEventParams) -> Result<SimulationReport> {
    let _span = info_span!("scenario", name = "weather_event", city = %params.city).entered();

    if !ctx.graph.contains(&params.city) {
        return Err(EngineError::not_found("city", &params.city));
    }

    let cfg = ctx.config;
    let mode = params.delivery_mode.unwrap_or(cfg.default_mode);
    let disruption = EdgeDisruption::for_event(params.event_type, params.severity);

    let mut disrupted = ctx.graph.fork();
    let links = disruption.apply(&mut disrupted, &params.city, cfg.seed);
    debug!(?disruption, links, "network disrupted");

    let routes: Vec<_> = ctx
        .data
        .list_routes()?
        .into_iter()
        .filter(|r| r.status.is_in_service() && r.touches(&params.city))
        .collect();

    let mut report = SimulationReport::new(
        Scenario::WeatherEvent,
        format!(
            "{:?} {:?} in {} affecting {} route(s)",
            params.severity,
            params.event_type,
            params.city,
            routes.len()
        ),
    );

    let risk = [("weather_event", disruption.risk_probability())];
    let mut baseline_cost = 0.0;
    let mut baseline_co2 = 0.0;
    let mut additional_cost = 0.0;
    let mut adjusted_cost = 0.0;
    let mut additional_co2 = 0.0;
    let mut total_delay = 0.0;
    let mut evaluated = 0usize;
    let mut reachable = 0usize;
    let mut blocked = 0usize;
    let mut volume = 0.0;

    for route in &routes {
        let waypoints = route.waypoints();
        let before = route_through(ctx.graph, &waypoints);
        if !before.is_reachable() {
            if let Some(missing) = waypoints.iter().find(|w| !ctx.graph.contains(w)) {
                return Err(EngineError::not_found("location", *missing));
            }
            warn!(route_id = route.id, "route has no path before the event; skipped");
            continue;
        }
        let after = route_through(&disrupted, &waypoints);
        let original_distance = before.distance;
        volume += route.volume;
        evaluated += 1;

        if !after.is_reachable() {
            warn!(route_id = route.id, "route blocked");
            blocked += 1;
            report.details.affected_routes.push(RouteImpact {
                route_id: route.id,
                original_distance,
                new_distance: None,
                additional_cost: 0.0,
                delay_minutes: 0.0,
                additional_emissions_kg: 0.0,
                blocked: true,
            });
            continue;
        }

        let extra_km = (after.distance - original_distance).max(0.0);
        let cost = transport_cost(extra_km, route.volume, mode);
        let delay = extra_km / mode.speed_kmh() * 60.0;
        let co2 = carbon_footprint(extra_km, route.volume, mode);
        debug!(route_id = route.id, extra_km, cost, delay, "route rerouted");

        baseline_cost += transport_cost(original_distance, route.volume, mode);
        baseline_co2 += carbon_footprint(original_distance, route.volume, mode);
        additional_cost += cost;
        adjusted_cost += risk_adjusted_cost(cost, &risk);
        additional_co2 += co2;
        total_delay += delay;
        reachable += 1;

        report.details.affected_routes.push(RouteImpact {
            route_id: route.id,
            original_distance,
            new_distance: Some(after.distance),
            additional_cost: cost,
            delay_minutes: delay,
            additional_emissions_kg: co2,
            blocked: false,
        });
        if after.path != before.path {
            report.details.rerouted_paths.push(ReroutedPath {
                route_id: route.id,
                original_path: before.path,
                new_path: after.path,
            });
        }
    }

    let average_delay = if reachable > 0 {
        total_delay / reachable as f64
    } else {
        0.0
    };

    let impact = &mut report.impact;
    impact.cost.additional_cost = additional_cost;
    impact.cost.risk_adjusted_cost = adjusted_cost;
    impact.cost.percentage_increase = percent_of(additional_cost, baseline_cost);
    impact.sla.affected_routes = evaluated;
    impact.sla.blocked_routes = blocked;
    impact.sla.average_delay_minutes = average_delay;
    impact.sla.delay_days = average_delay / (24.0 * 60.0);
    impact.sla.service_level = if evaluated == 0 {
        1.0
    } else {
        (evaluated - blocked) as f64 / evaluated as f64
    };
    impact.carbon.additional_emissions_kg = additional_co2;
    impact.carbon.percentage_change = percent_of(additional_co2, baseline_co2);

    // Buffer the volume moving through the city against the longer lead time.
    let lead_time = cfg.lead_time_days + impact.sla.delay_days;
    let buffer = safety_stock(
        volume,
        lead_time,
        cfg.service_level,
        volume * cfg.demand_variability,
    );
    impact.inventory.recommended_safety_stock = buffer;

    if blocked > 0 {
        report.recommend(
            Priority::High,
            format!(
                "{blocked} route(s) through {} have no passable path; hold or switch shipments to another origin",
                params.city
            ),
        );
    }
    if average_delay > 60.0 {
        report.recommend(
            Priority::High,
            format!("Rerouting adds {average_delay:.0} min on average; notify customers of revised ETAs"),
        );
    } else if average_delay > 0.0 {
        report.recommend(
            Priority::Medium,
            format!("Rerouting adds {average_delay:.0} min on average; follow the rerouted paths"),
        );
    }
    if buffer > 0.0 {
        report.recommend(
            Priority::Medium,
            format!(
                "Raise safety stock downstream of {} by {buffer:.0} units for the disruption window",
                params.city
            ),
        );
    }
    if routes.is_empty() {
        report.recommend(
            Priority::Low,
            format!(
                "No active routes pass through {}; monitor conditions before dispatching new loads",
                params.city
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
    use crate::models::Route;
    use crate::network::{demo_graph, find_location, shortest_path};

    fn run(data: &InMemoryData, params: &WeatherEventParams) -> Result<SimulationReport> {
        let graph = demo_graph();
        let config = EngineConfig::default();
        let ctx = ScenarioContext {
            graph: &graph,
            data,
            config: &config,
        };
        simulate(&ctx, params)
    }

    fn params(kind: WeatherKind, severity: Severity, city: &str) -> WeatherEventParams {
        WeatherEventParams {
            event_type: kind,
            city: city.to_string(),
            severity,
            delivery_mode: None,
        }
    }

    #[test]
    fn test_disruption_table() {
        assert_eq!(
            EdgeDisruption::for_event(WeatherKind::Flood, Severity::Medium),
            EdgeDisruption::Remove { probability: 0.7 }
        );
        assert_eq!(
            EdgeDisruption::for_event(WeatherKind::Fog, Severity::High),
            EdgeDisruption::Slow { divisor: 0.4 }
        );
        let storm = EdgeDisruption::for_event(WeatherKind::Storm, Severity::Low);
        assert!((storm.risk_probability() - 0.3).abs() < 1e-10);
    }

    #[test]
    fn test_high_flood_removes_all_links() {
        let mut g = demo_graph();
        let d = EdgeDisruption::for_event(WeatherKind::Flood, Severity::High);
        // Mumbai: Surat, Pune, Indore, both directions
        assert_eq!(d.apply(&mut g, "Mumbai", 1), 6);
        assert!(g.edges("Mumbai").is_empty());
    }

    #[test]
    fn test_flood_removal_reproducible() {
        let d = EdgeDisruption::for_event(WeatherKind::Flood, Severity::Low);
        let mut a = demo_graph();
        let mut b = demo_graph();
        assert_eq!(d.apply(&mut a, "Hyderabad", 7), d.apply(&mut b, "Hyderabad", 7));
        assert_eq!(a, b);
    }

    #[test]
    fn test_unknown_city() {
        let err = run(
            &InMemoryData::new(),
            &params(WeatherKind::Flood, Severity::High, "Atlantis"),
        )
        .expect_err("not in network");
        assert!(matches!(err, EngineError::NotFound { kind: "city", .. }));
    }

    #[test]
    fn test_no_routes_still_recommends() {
        let report = run(
            &InMemoryData::new(),
            &params(WeatherKind::Flood, Severity::High, "Mumbai"),
        )
        .expect("runs");
        assert_eq!(report.impact.sla.affected_routes, 0);
        assert_eq!(report.impact.sla.service_level, 1.0);
        assert!(!report.recommendations.is_empty());
    }

    #[test]
    fn test_storm_lengthens_route() {
        let data = InMemoryData::new()
            .with_route(Route::new(1, "Pune", "Surat").with_volume(100.0))
            .with_route(Route::new(2, "Mumbai", "Pune").with_volume(100.0));
        let report = run(&data, &params(WeatherKind::Storm, Severity::High, "Mumbai")).expect("runs");
        // Route 1 never touches Mumbai.
        assert_eq!(report.impact.sla.affected_routes, 1);
        let row = &report.details.affected_routes[0];
        assert_eq!(row.route_id, 2);
        assert_eq!(row.original_distance, 150.0);
        let new = row.new_distance.expect("reachable");
        assert!((new - 500.0).abs() < 1e-9);
        // 350 extra km by truck, 100 units → 10% discount
        assert!((row.additional_cost - 350.0 * 1.2 * 0.9).abs() < 1e-9);
        assert!((row.delay_minutes - 350.0).abs() < 1e-9);
        assert!(report.impact.cost.risk_adjusted_cost > report.impact.cost.additional_cost);
        assert!(report.details.rerouted_paths.is_empty());
    }

    #[test]
    fn test_storm_switches_path() {
        // Mumbai → New Delhi runs via Indore (1470 km). Stretching Mumbai's
        // links by 1/0.7 makes the Surat corridor shorter.
        let g = demo_graph();
        let before = shortest_path(&g, "Mumbai", "New Delhi");
        assert_eq!(before.distance, 1470.0);
        assert_eq!(before.path[1], "Indore");

        let data = InMemoryData::new().with_route(Route::new(4, "Mumbai", "New Delhi").with_volume(20.0));
        let report = run(&data, &params(WeatherKind::Storm, Severity::Low, "Mumbai")).expect("runs");
        assert_eq!(report.details.rerouted_paths.len(), 1);
        let rerouted = &report.details.rerouted_paths[0];
        assert_eq!(rerouted.original_path[1], "Indore");
        assert_eq!(rerouted.new_path[1], "Surat");
        let new = report.details.affected_routes[0].new_distance.expect("reachable");
        assert!((new - (285.0 / 0.7 + 1210.0)).abs() < 1e-9);
        assert!(report.impact.carbon.additional_emissions_kg > 0.0);
        assert!(report.impact.carbon.percentage_change > 0.0);
    }

    #[test]
    fn test_flood_blocks_origin() {
        let data = InMemoryData::new()
            .with_route(Route::new(1, "Mumbai", "Pune").with_volume(50.0))
            .with_route(
                Route::new(2, "Surat", "Indore").with_stop(find_location("Mumbai").expect("catalog")),
            );
        let report = run(&data, &params(WeatherKind::Flood, Severity::High, "Mumbai")).expect("runs");
        assert_eq!(report.impact.sla.affected_routes, 2);
        assert_eq!(report.impact.sla.blocked_routes, 2);
        assert_eq!(report.impact.sla.service_level, 0.0);
        assert!(report
            .recommendations
            .first()
            .is_some_and(|r| r.priority == Priority::High));
        assert!(report.check_finite().is_ok());
    }

    #[test]
    fn test_route_off_network_is_not_found() {
        let data = InMemoryData::new().with_route(Route::new(5, "Mumbai", "Goa").with_volume(40.0));
        let err = run(&data, &params(WeatherKind::Fog, Severity::Low, "Mumbai")).expect_err("Goa unknown");
        assert!(matches!(
            err,
            EngineError::NotFound { kind: "location", ref name } if name == "Goa"
        ));
    }

    #[test]
    fn test_fog_never_blocks() {
        let data = InMemoryData::new()
            .with_route(Route::new(1, "Mumbai", "Pune").with_volume(50.0))
            .with_route(Route::new(2, "Surat", "Mumbai").with_volume(50.0));
        let report = run(&data, &params(WeatherKind::Fog, Severity::Low, "Mumbai")).expect("runs");
        assert_eq!(report.impact.sla.affected_routes, 2);
        assert_eq!(report.impact.sla.blocked_routes, 0);
        assert_eq!(report.impact.sla.service_level, 1.0);
    }

    #[test]
    fn test_flood_blocks_stop() {
        let g = demo_graph();
        assert_eq!(shortest_path(&g, "Surat", "Indore").distance, 650.0);

        let data = InMemoryData::new().with_route(
            Route::new(9, "Surat", "Indore")
                .with_stop(find_location("Vadodara").expect("catalog"))
                .with_volume(10.0),
        );
        let report = run(&data, &params(WeatherKind::Flood, Severity::High, "Vadodara")).expect("runs");
        assert_eq!(report.impact.sla.blocked_routes, 1);
        assert_eq!(report.details.affected_routes[0].original_distance, 650.0);
        assert!(report.details.affected_routes[0].new_distance.is_none());
    }

    #[test]
    fn test_completed_routes_ignored() {
        let data = InMemoryData::new().with_route(
            Route::new(1, "Mumbai", "Pune").with_status(crate::models::RouteStatus::Completed),
        );
        let report = run(&data, &params(WeatherKind::Fog, Severity::Low, "Mumbai")).expect("runs");
        assert_eq!(report.impact.sla.affected_routes, 0);
    }
}
