//! Scenario tags and per-scenario parameter records.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::economics::TransportMode;
use crate::error::{EngineError, Result};

/// The closed set of disruption scenarios.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scenario {
    /// Flood, storm, or fog around a city.
    WeatherEvent,
    /// Sudden demand increase in a product category.
    DemandSpike,
    /// Partial or total loss of a supplier.
    SupplierOutage,
    /// Seasonal demand ramp.
    PeakSeason,
}

impl Scenario {
    /// Every scenario, in declaration order.
    pub const ALL: [Scenario; 4] = [
        Scenario::WeatherEvent,
        Scenario::DemandSpike,
        Scenario::SupplierOutage,
        Scenario::PeakSeason,
    ];

    /// Wire tag.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::WeatherEvent => "weather_event",
            Self::DemandSpike => "demand_spike",
            Self::SupplierOutage => "supplier_outage",
            Self::PeakSeason => "peak_season",
        }
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Scenario {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|sc| sc.as_str() == s)
            .ok_or_else(|| EngineError::InvalidScenario(s.to_string()))
    }
}

/// Kind of weather disruption.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeatherKind {
    /// Roads may be cut entirely.
    Flood,
    /// Roads slowed.
    Storm,
    /// Roads slowed, less than a storm.
    Fog,
}

/// Disruption intensity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Minor.
    Low,
    /// Moderate.
    Medium,
    /// Severe.
    High,
}

/// Parameters of a weather event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherEventParams {
    /// Flood, storm, or fog.
    pub event_type: WeatherKind,
    /// Affected city; must be a node of the network.
    pub city: String,
    /// Intensity.
    pub severity: Severity,
    /// Vehicle class for cost and delay; engine default when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delivery_mode: Option<TransportMode>,
}

/// Parameters of a demand spike.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DemandSpikeParams {
    /// Product category hit by the spike.
    pub category: String,
    /// Demand increase in percent, e.g. `50` for +50%.
    pub increase_percentage: f64,
    /// Spike length in days.
    pub duration: f64,
    /// Target service level; engine default when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service_level: Option<f64>,
}

/// Parameters of a supplier outage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupplierOutageParams {
    /// Failing supplier.
    pub supplier_id: u64,
    /// Outage length in days.
    pub duration: f64,
    /// Share of the supplier's deliveries lost, in percent (0..=100).
    pub supply_reduction: f64,
}

/// Parameters of a peak season.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeakSeasonParams {
    /// Demand growth at the top of the ramp, in percent.
    pub growth_percentage: f64,
    /// Length of the ramp window in days.
    pub ramp_days: f64,
    /// Days available to build stock before the ramp starts.
    pub preparation_days: f64,
    /// Restrict to one product category; all inventory when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

/// A simulation request: one variant per scenario.
///
/// Serialized with the scenario tag inline:
///
/// ```
/// use sc_twin::models::{Scenario, SimulationParams};
///
/// let json = serde_json::json!({
///     "scenario": "weather_event",
///     "eventType": "flood",
///     "city": "Mumbai",
///     "severity": "high"
/// });
/// let params = SimulationParams::from_json(json).unwrap();
/// assert_eq!(params.scenario(), Scenario::WeatherEvent);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "scenario", rename_all = "snake_case")]
pub enum SimulationParams {
    /// Weather event.
    WeatherEvent(WeatherEventParams),
    /// Demand spike.
    DemandSpike(DemandSpikeParams),
    /// Supplier outage.
    SupplierOutage(SupplierOutageParams),
    /// Peak season.
    PeakSeason(PeakSeasonParams),
}

impl SimulationParams {
    /// Parses a request, checking the tag before the record.
    ///
    /// # Errors
    ///
    /// [`EngineError::InvalidScenario`] for a missing or unknown tag and
    /// [`EngineError::InvalidParams`] for a record that does not match it.
    pub fn from_json(value: serde_json::Value) -> Result<Self> {
        let tag = value
            .get("scenario")
            .and_then(serde_json::Value::as_str)
            .ok_or_else(|| EngineError::InvalidScenario("missing scenario tag".to_string()))?;
        let _: Scenario = tag.parse()?;
        serde_json::from_value(value).map_err(|e| EngineError::InvalidParams(e.to_string()))
    }

    /// The scenario this request targets.
    pub fn scenario(&self) -> Scenario {
        match self {
            Self::WeatherEvent(_) => Scenario::WeatherEvent,
            Self::DemandSpike(_) => Scenario::DemandSpike,
            Self::SupplierOutage(_) => Scenario::SupplierOutage,
            Self::PeakSeason(_) => Scenario::PeakSeason,
        }
    }

    /// Checks value ranges that the type system does not.
    ///
    /// # Errors
    ///
    /// [`EngineError::InvalidParams`] naming the first bad field.
    pub fn validate(&self) -> Result<()> {
        match self {
            Self::WeatherEvent(p) => {
                if p.city.trim().is_empty() {
                    return Err(invalid("city must not be empty"));
                }
            }
            Self::DemandSpike(p) => {
                check_non_negative("increasePercentage", p.increase_percentage)?;
                check_positive("duration", p.duration)?;
                if let Some(level) = p.service_level {
                    if !(level > 0.0 && level < 1.0) {
                        return Err(invalid(format!(
                            "serviceLevel must be in (0, 1), got {level}"
                        )));
                    }
                }
            }
            Self::SupplierOutage(p) => {
                check_positive("duration", p.duration)?;
                if !(0.0..=100.0).contains(&p.supply_reduction) {
                    return Err(invalid(format!(
                        "supplyReduction must be in [0, 100], got {}",
                        p.supply_reduction
                    )));
                }
            }
            Self::PeakSeason(p) => {
                check_non_negative("growthPercentage", p.growth_percentage)?;
                check_positive("rampDays", p.ramp_days)?;
                check_non_negative("preparationDays", p.preparation_days)?;
            }
        }
        Ok(())
    }
}

fn invalid(msg: impl Into<String>) -> EngineError {
    EngineError::InvalidParams(msg.into())
}

fn check_positive(name: &str, value: f64) -> Result<()> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(invalid(format!("{name} must be positive, got {value}")))
    }
}

fn check_non_negative(name: &str, value: f64) -> Result<()> {
    if value >= 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(invalid(format!("{name} must not be negative, got {value}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_scenario_parse() {
        assert_eq!("peak_season".parse::<Scenario>().ok(), Some(Scenario::PeakSeason));
        let err = "earthquake".parse::<Scenario>().expect_err("unknown");
        assert!(matches!(err, EngineError::InvalidScenario(ref s) if s == "earthquake"));
    }

    #[test]
    fn test_from_json_unknown_tag() {
        let err = SimulationParams::from_json(json!({"scenario": "earthquake"}))
            .expect_err("unknown tag");
        assert!(matches!(err, EngineError::InvalidScenario(_)));
    }

    #[test]
    fn test_from_json_missing_tag() {
        let err = SimulationParams::from_json(json!({"city": "Mumbai"})).expect_err("no tag");
        assert!(matches!(err, EngineError::InvalidScenario(_)));
    }

    #[test]
    fn test_from_json_bad_record() {
        let err = SimulationParams::from_json(json!({
            "scenario": "demand_spike",
            "category": "grocery"
        }))
        .expect_err("missing fields");
        assert!(matches!(err, EngineError::InvalidParams(_)));
    }

    #[test]
    fn test_from_json_demand_spike() {
        let p = SimulationParams::from_json(json!({
            "scenario": "demand_spike",
            "category": "grocery",
            "increasePercentage": 50,
            "duration": 10
        }))
        .expect("valid");
        match p {
            SimulationParams::DemandSpike(d) => {
                assert_eq!(d.increase_percentage, 50.0);
                assert_eq!(d.duration, 10.0);
                assert!(d.service_level.is_none());
            }
            other => panic!("wrong variant: {other:?}"),
        }
    }

    #[test]
    fn test_delivery_mode_kebab() {
        let p = SimulationParams::from_json(json!({
            "scenario": "weather_event",
            "eventType": "storm",
            "city": "Pune",
            "severity": "medium",
            "deliveryMode": "mini-truck"
        }))
        .expect("valid");
        let SimulationParams::WeatherEvent(w) = p else {
            panic!("wrong variant");
        };
        assert_eq!(w.delivery_mode, Some(TransportMode::MiniTruck));
        assert_eq!(w.event_type, WeatherKind::Storm);
    }

    #[test]
    fn test_serialize_has_tag() {
        let p = SimulationParams::SupplierOutage(SupplierOutageParams {
            supplier_id: 4,
            duration: 14.0,
            supply_reduction: 60.0,
        });
        let v = serde_json::to_value(&p).expect("ser");
        assert_eq!(v["scenario"], "supplier_outage");
        assert_eq!(v["supplierId"], 4);
    }

    #[test]
    fn test_validate_ranges() {
        let bad = SimulationParams::SupplierOutage(SupplierOutageParams {
            supplier_id: 1,
            duration: 5.0,
            supply_reduction: 150.0,
        });
        assert!(matches!(bad.validate(), Err(EngineError::InvalidParams(_))));

        let bad = SimulationParams::DemandSpike(DemandSpikeParams {
            category: "x".into(),
            increase_percentage: 10.0,
            duration: 0.0,
            service_level: None,
        });
        assert!(bad.validate().is_err());

        let ok = SimulationParams::PeakSeason(PeakSeasonParams {
            growth_percentage: 40.0,
            ramp_days: 30.0,
            preparation_days: 0.0,
            category: None,
        });
        assert!(ok.validate().is_ok());
    }
}
