//! Re-exported APIs for consumers of the sizing crate.

pub use crate::cascade::{
    BatterySpec, DivergenceReason, EnergyStorage, Evaluation, FuelSpec, SizingError, SizingInputs,
    SizingLoop, SizingReport, SizingStatus, size_aircraft,
};
pub use crate::mission::{
    FlightConditions, FlightSegment, MissionError, MissionProfile, MissionResult,
    MissionSimulator, SegmentResult, simulate,
};
pub use crate::state::{AircraftState, Iterate, WeightBreakdown};
pub use crate::sweep::{ScenarioOutcome, SweepParameter, sweep};
pub use dep_propulsion::{MotorRole, MotorSet, Phase, PowerRatings};

pub mod aircraft {
    use std::collections::BTreeSet;

    use dep_aero::{DragPolar, FoldedDragModel, effective_cl_max, lift_augmentation};
    use dep_config::{AircraftConfig, Architecture, BatteryConfig, FuelConfig, MissionConfig};
    use dep_core::constants::RHO_SL_SLUG_FT3;
    use dep_core::isa::{density_slug_ft3, dynamic_pressure_psf};
    use dep_core::units::{kg_to_lb, kts_to_fps, kw_per_kg_to_kw_per_lb, wh_per_kg_to_kwh_per_lb};
    use dep_propulsion::{MotorRole, MotorSet, Phase, PropulsionError, UnknownPhase};
    use thiserror::Error;

    use crate::cascade::{BatterySpec, EnergyStorage, FuelSpec, SizingError, SizingInputs};
    use crate::mission::{FlightConditions, FlightSegment, MissionProfile, cruise_duration_s};

    /// Takeoff, climb and landing are flown at this multiple of stall speed.
    const LOW_SPEED_STALL_MARGIN: f64 = 1.3;

    /// Errors surfaced when converting or selecting aircraft configurations.
    #[derive(Debug, Error, Clone, PartialEq)]
    pub enum ConfigurationError {
        #[error(transparent)]
        UnknownPhase(#[from] UnknownPhase),
        #[error("dual architecture requires a high-lift motor set")]
        MissingHighliftSet,
        #[error("only the dual architecture carries a high-lift motor set")]
        UnexpectedHighliftSet,
        #[error("electric architecture requires a battery section")]
        MissingBattery,
        #[error("conventional architecture requires a fuel section")]
        MissingFuelSystem,
        #[error("{role} motor set active phases {found:?} disagree with the activation policy {expected:?}")]
        ActivePhasesMismatch {
            role: MotorRole,
            expected: Vec<Phase>,
            found: Vec<Phase>,
        },
        #[error("{0} segment has no duration")]
        MissingDuration(Phase),
        #[error("mission has no segments")]
        EmptyMission,
        #[error("{field} must be positive, got {value}")]
        NonPositive { field: &'static str, value: f64 },
        #[error("baseline empty fraction {0} must lie in [0, 1)")]
        BaselineEmptyFraction(f64),
        #[error("invalid value {value} for sweep parameter '{parameter}'")]
        InvalidSweepValue { parameter: &'static str, value: f64 },
        #[error("unknown sweep parameter '{0}'")]
        UnknownSweepParameter(String),
        #[error("aircraft '{0}' not found in catalog")]
        NotFound(String),
        #[error("aircraft catalog is empty")]
        EmptyCatalog,
    }

    /// Convert an `AircraftConfig` into validated runtime sizing inputs.
    pub fn from_config(config: &AircraftConfig) -> Result<SizingInputs, SizingError> {
        let mission = &config.mission;
        positive("payload", mission.payload_lb)?;
        positive("range", mission.range_nm)?;
        positive("cruise speed", mission.cruise_speed_kts)?;

        let highlift = match (config.architecture, &config.highlift) {
            (Architecture::Dual, Some(set)) => {
                check_active_phases(MotorRole::HighLift, set.active_phases.as_deref())?;
                Some(MotorSet::highlift(
                    set.count,
                    set.power_per_unit_kw,
                    set.mass_per_unit_lb,
                    set.can_fold,
                )?)
            }
            (Architecture::Dual, None) => return Err(ConfigurationError::MissingHighliftSet.into()),
            (Architecture::Single | Architecture::Conventional, Some(_)) => {
                return Err(ConfigurationError::UnexpectedHighliftSet.into());
            }
            (Architecture::Single | Architecture::Conventional, None) => None,
        };

        let cruise = &config.cruise;
        check_active_phases(MotorRole::Cruise, cruise.active_phases.as_deref())?;
        if cruise.count == 0 {
            return Err(PropulsionError::ZeroMotorCount(MotorRole::Cruise).into());
        }

        let aero = &config.aero;
        let augmentation = lift_augmentation(aero.lift_augmentation_max, aero.blown_span_fraction)?;
        let blown_sizing =
            config.architecture == Architecture::Dual && aero.use_blown_lift_for_wing_sizing;
        let sizing_augmentation = if blown_sizing { augmentation } else { 1.0 };

        let cruise_speed_fps = kts_to_fps(mission.cruise_speed_kts);
        let stall_speed_fps = kts_to_fps(positive("stall speed", aero.stall_speed_kts)?);
        let conditions = FlightConditions {
            cruise_q_psf: dynamic_pressure_psf(
                density_slug_ft3(mission.cruise_altitude_ft),
                cruise_speed_fps,
            ),
            low_speed_q_psf: dynamic_pressure_psf(
                RHO_SL_SLUG_FT3,
                LOW_SPEED_STALL_MARGIN * stall_speed_fps,
            ),
        };

        let energy = match config.architecture {
            Architecture::Conventional => EnergyStorage::Fuel(fuel_spec(
                config
                    .fuel
                    .as_ref()
                    .ok_or(ConfigurationError::MissingFuelSystem)?,
            )?),
            Architecture::Single | Architecture::Dual => EnergyStorage::Battery(battery_spec(
                config
                    .battery
                    .as_ref()
                    .ok_or(ConfigurationError::MissingBattery)?,
            )?),
        };
        let weights = &config.weights;

        Ok(SizingInputs {
            name: config.name.clone(),
            architecture: config.architecture,
            payload_lb: mission.payload_lb,
            range_nm: mission.range_nm,
            profile: build_profile(mission)?,
            cruise_speed_fps,
            conditions,
            highlift,
            cruise_motor_count: cruise.count,
            cruise_specific_power_kw_per_lb: kw_per_kg_to_kw_per_lb(cruise.specific_power_kw_per_kg),
            cruise_can_fold: cruise.can_fold,
            polar: DragPolar::from_wing(aero.cd0, aero.aspect_ratio, aero.oswald_efficiency)?,
            folded_drag: FoldedDragModel::new(aero.cd_deployed, aero.cd_folded)?,
            stall_speed_fps,
            lift_augmentation: sizing_augmentation,
            cl_max_sizing: effective_cl_max(aero.cl_max_clean, sizing_augmentation),
            propeller_efficiency: positive("propeller efficiency", aero.propeller_efficiency)?,
            energy,
            structural_fraction: weights.structural_fraction,
            wing_unit_weight_psf: weights.wing_unit_weight_psf,
            fixed_systems_lb: weights.fixed_systems_lb,
            seed_gross_weight_lb: seed_gross_weight_lb(config)?,
            convergence: config.convergence.clone(),
        })
    }

    /// Select an aircraft from the catalog by optional name, defaulting to the first entry.
    pub fn select(
        configs: &[AircraftConfig],
        requested: Option<&str>,
    ) -> Result<SizingInputs, SizingError> {
        from_config(select_config(configs, requested)?)
    }

    /// Catalog entry matching `requested` case-insensitively, or the first entry.
    pub fn select_config<'a>(
        configs: &'a [AircraftConfig],
        requested: Option<&str>,
    ) -> Result<&'a AircraftConfig, ConfigurationError> {
        match requested {
            Some(name) => configs
                .iter()
                .find(|cfg| cfg.name.eq_ignore_ascii_case(name))
                .ok_or_else(|| ConfigurationError::NotFound(name.to_string())),
            None => configs.first().ok_or(ConfigurationError::EmptyCatalog),
        }
    }

    /// Ordered flight-phase schedule; a cruise entry without a duration is flown at cruise speed over the range.
    pub fn build_profile(mission: &MissionConfig) -> Result<MissionProfile, ConfigurationError> {
        if mission.segments.is_empty() {
            return Err(ConfigurationError::EmptyMission);
        }

        mission
            .segments
            .iter()
            .map(|entry| -> Result<FlightSegment, ConfigurationError> {
                let phase: Phase = entry.phase.parse()?;
                let duration = match (entry.duration_s, phase) {
                    (Some(duration), _) => duration,
                    (None, Phase::Cruise) => {
                        cruise_duration_s(mission.range_nm, mission.cruise_speed_kts)
                    }
                    (None, phase) => return Err(ConfigurationError::MissingDuration(phase)),
                };
                Ok(FlightSegment::new(phase, duration))
            })
            .collect()
    }

    /// Initial gross-weight guess: explicit, or a conventional baseline scaled for electrification.
    ///
    /// The conventional architecture is the baseline itself and takes no multiplier.
    pub fn seed_gross_weight_lb(config: &AircraftConfig) -> Result<f64, ConfigurationError> {
        let weights = &config.weights;
        if let Some(seed) = weights.initial_gross_weight_lb {
            return positive("initial gross weight", seed);
        }
        if !(0.0..1.0).contains(&weights.baseline_empty_fraction) {
            return Err(ConfigurationError::BaselineEmptyFraction(
                weights.baseline_empty_fraction,
            ));
        }
        let useful_load = config.mission.payload_lb + weights.fixed_systems_lb;
        let conventional = useful_load / (1.0 - weights.baseline_empty_fraction);
        match config.architecture {
            Architecture::Conventional => positive("baseline seed weight", conventional),
            Architecture::Single | Architecture::Dual => positive(
                "electrified seed weight",
                conventional * weights.electrification_multiplier,
            ),
        }
    }

    fn battery_spec(battery: &BatteryConfig) -> Result<BatterySpec, ConfigurationError> {
        Ok(BatterySpec {
            specific_energy_kwh_per_lb: wh_per_kg_to_kwh_per_lb(positive(
                "battery specific energy",
                battery.specific_energy_wh_per_kg,
            )?),
            reserve_fraction: battery.reserve_fraction,
            depth_of_discharge: positive("depth of discharge", battery.depth_of_discharge)?,
            drivetrain_efficiency: positive(
                "drivetrain efficiency",
                battery.drivetrain_efficiency,
            )?,
        })
    }

    fn fuel_spec(fuel: &FuelConfig) -> Result<FuelSpec, ConfigurationError> {
        Ok(FuelSpec {
            bsfc_lb_per_kwh: kg_to_lb(positive(
                "brake-specific fuel consumption",
                fuel.bsfc_kg_per_kwh,
            )?),
            reserve_fraction: fuel.reserve_fraction,
        })
    }

    fn check_active_phases(
        role: MotorRole,
        configured: Option<&[String]>,
    ) -> Result<(), ConfigurationError> {
        let Some(names) = configured else {
            return Ok(());
        };
        let found = names
            .iter()
            .map(|name| name.parse::<Phase>())
            .collect::<Result<BTreeSet<_>, _>>()?;
        let expected = role.activation_policy();
        if found == expected {
            Ok(())
        } else {
            Err(ConfigurationError::ActivePhasesMismatch {
                role,
                expected: expected.into_iter().collect(),
                found: found.into_iter().collect(),
            })
        }
    }

    fn positive(field: &'static str, value: f64) -> Result<f64, ConfigurationError> {
        if value > 0.0 && value.is_finite() {
            Ok(value)
        } else {
            Err(ConfigurationError::NonPositive { field, value })
        }
    }
}
