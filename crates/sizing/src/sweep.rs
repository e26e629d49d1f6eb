//! Parallel scenario sweeps over one aircraft parameter.

use std::fmt;
use std::str::FromStr;

use dep_config::AircraftConfig;
use log::info;
use rayon::prelude::*;

use crate::aircraft::{ConfigurationError, from_config};
use crate::cascade::{SizingError, SizingReport, SizingStatus, size_aircraft};

/// Aircraft parameter varied across a sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SweepParameter {
    /// Battery specific energy (Wh/kg).
    SpecificEnergy,
    CruiseMotorCount,
    /// Cruise motor specific power (kW/kg).
    CruiseSpecificPower,
    HighliftMotorCount,
    BlownSpanFraction,
    /// Mission range (nm).
    Range,
}

impl SweepParameter {
    pub const ALL: [SweepParameter; 6] = [
        SweepParameter::SpecificEnergy,
        SweepParameter::CruiseMotorCount,
        SweepParameter::CruiseSpecificPower,
        SweepParameter::HighliftMotorCount,
        SweepParameter::BlownSpanFraction,
        SweepParameter::Range,
    ];

    pub fn name(self) -> &'static str {
        match self {
            SweepParameter::SpecificEnergy => "specific_energy",
            SweepParameter::CruiseMotorCount => "cruise_motor_count",
            SweepParameter::CruiseSpecificPower => "cruise_specific_power",
            SweepParameter::HighliftMotorCount => "highlift_motor_count",
            SweepParameter::BlownSpanFraction => "blown_span_fraction",
            SweepParameter::Range => "range",
        }
    }

    /// Write `value` into the matching field of `config`.
    pub fn apply(self, config: &mut AircraftConfig, value: f64) -> Result<(), ConfigurationError> {
        match self {
            SweepParameter::SpecificEnergy => {
                config
                    .battery
                    .as_mut()
                    .ok_or(ConfigurationError::MissingBattery)?
                    .specific_energy_wh_per_kg = value;
            }
            SweepParameter::CruiseMotorCount => config.cruise.count = self.motor_count(value)?,
            SweepParameter::CruiseSpecificPower => config.cruise.specific_power_kw_per_kg = value,
            SweepParameter::HighliftMotorCount => {
                let count = self.motor_count(value)?;
                config
                    .highlift
                    .as_mut()
                    .ok_or(ConfigurationError::MissingHighliftSet)?
                    .count = count;
            }
            SweepParameter::BlownSpanFraction => config.aero.blown_span_fraction = value,
            SweepParameter::Range => config.mission.range_nm = value,
        }
        Ok(())
    }

    fn motor_count(self, value: f64) -> Result<u32, ConfigurationError> {
        if value >= 1.0 && value.fract() == 0.0 && value <= f64::from(u32::MAX) {
            Ok(value as u32)
        } else {
            Err(ConfigurationError::InvalidSweepValue {
                parameter: self.name(),
                value,
            })
        }
    }
}

impl fmt::Display for SweepParameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SweepParameter {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('-', "_");
        SweepParameter::ALL
            .into_iter()
            .find(|parameter| parameter.name() == wanted)
            .ok_or_else(|| ConfigurationError::UnknownSweepParameter(s.to_string()))
    }
}

/// One sweep point and how its sizing ended.
#[derive(Debug, Clone)]
pub struct ScenarioOutcome {
    pub label: String,
    pub value: f64,
    pub result: Result<SizingReport, SizingError>,
}

impl ScenarioOutcome {
    /// Terminal loop state, or `None` when the scenario was rejected before iterating.
    pub fn status(&self) -> Option<SizingStatus> {
        match &self.result {
            Ok(report) => Some(report.status),
            Err(err) => err.status(),
        }
    }

    pub fn report(&self) -> Option<&SizingReport> {
        self.result.as_ref().ok()
    }
}

/// Size `base` once per value of `parameter`, in parallel.
///
/// Each scenario owns its own configuration copy and sizing loop. Outcomes are
/// returned in the order of `values`.
pub fn sweep(base: &AircraftConfig, parameter: SweepParameter, values: &[f64]) -> Vec<ScenarioOutcome> {
    info!(
        "{}: sweeping {parameter} over {} values",
        base.name,
        values.len()
    );
    values
        .par_iter()
        .map(|&value| {
            let label = format!("{} [{parameter}={value}]", base.name);
            let result = size_scenario(base, parameter, value, &label);
            ScenarioOutcome {
                label,
                value,
                result,
            }
        })
        .collect()
}

fn size_scenario(
    base: &AircraftConfig,
    parameter: SweepParameter,
    value: f64,
    label: &str,
) -> Result<SizingReport, SizingError> {
    let mut config = base.clone();
    parameter.apply(&mut config, value)?;
    config.name = label.to_string();
    let inputs = from_config(&config)?;
    size_aircraft(&inputs)
}
