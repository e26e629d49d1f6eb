//! Weight-cascade sizing loop.
//!
//! Gross weight, wing area, battery mass and motor mass depend on each other:
//! a heavier aircraft needs a bigger wing, more cruise power and more energy,
//! and the extra battery (or fuel) and motor mass make it heavier still. The loop runs
//! this map as a fixed-point iteration, one immutable [`AircraftState`] per
//! pass, until the gross weight settles, runs away, or the iteration cap hits.

pub mod convergence;
pub mod inputs;

pub use self::convergence::{ConvergenceMonitor, DivergenceReason, Verdict};
pub use self::inputs::{BatterySpec, EnergyStorage, FuelSpec, SizingInputs};

use std::fmt;

use dep_aero::{AeroError, wing_area_for_stall};
use dep_core::constants::{G0, M_PER_NM};
use dep_core::units::{lb_to_kg, thrust_power_kw};
use dep_propulsion::{MotorSet, PowerRatings, PropulsionError};
use log::{debug, info, warn};

use crate::aircraft::ConfigurationError;
use crate::mission::{MissionError, MissionResult, MissionSimulator};
use crate::state::{AircraftState, Iterate, WeightBreakdown};

/// Terminal state of one sizing run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizingStatus {
    Converged,
    Diverged,
    IterationLimitExceeded,
}

impl fmt::Display for SizingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SizingStatus::Converged => f.write_str("converged"),
            SizingStatus::Diverged => f.write_str("diverged"),
            SizingStatus::IterationLimitExceeded => f.write_str("iteration-limit"),
        }
    }
}

#[derive(Debug, thiserror::Error, Clone, PartialEq)]
pub enum SizingError {
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigurationError),
    #[error("non-physical {parameter}: {value}")]
    InvalidParameter { parameter: &'static str, value: f64 },
    #[error("motor sizing failed: {0}")]
    Propulsion(PropulsionError),
    #[error("aerodynamic model failed: {0}")]
    Aero(AeroError),
    #[error("mission simulation failed: {0}")]
    Mission(#[from] MissionError),
    #[error("sizing diverged at iteration {iteration}: {reason}")]
    Diverged {
        reason: DivergenceReason,
        iteration: usize,
        history: Vec<Iterate>,
    },
    #[error("no convergence after {iterations} iterations")]
    IterationLimitExceeded {
        iterations: usize,
        last: AircraftState,
        history: Vec<Iterate>,
    },
}

impl From<PropulsionError> for SizingError {
    fn from(err: PropulsionError) -> Self {
        match err {
            PropulsionError::InvalidParameter { parameter, value } => {
                SizingError::InvalidParameter { parameter, value }
            }
            other => SizingError::Propulsion(other),
        }
    }
}

impl From<AeroError> for SizingError {
    fn from(err: AeroError) -> Self {
        match err {
            AeroError::InvalidParameter { parameter, value } => {
                SizingError::InvalidParameter { parameter, value }
            }
            other => SizingError::Aero(other),
        }
    }
}

impl SizingError {
    /// Loop-level outcome, or `None` when the run failed on its inputs.
    pub fn status(&self) -> Option<SizingStatus> {
        match self {
            SizingError::Diverged { .. } => Some(SizingStatus::Diverged),
            SizingError::IterationLimitExceeded { .. } => Some(SizingStatus::IterationLimitExceeded),
            _ => None,
        }
    }

    /// Iterates recorded before the loop stopped.
    pub fn history(&self) -> &[Iterate] {
        match self {
            SizingError::Diverged { history, .. }
            | SizingError::IterationLimitExceeded { history, .. } => history,
            _ => &[],
        }
    }
}

/// Result of a single pass of the weight cascade.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    /// New snapshot; its gross weight is the next estimate.
    pub state: AircraftState,
    pub weights: WeightBreakdown,
    pub mission: MissionResult,
}

/// Frozen outcome of a converged sizing run.
#[derive(Debug, Clone, PartialEq)]
pub struct SizingReport {
    pub name: String,
    pub status: SizingStatus,
    pub iterations: usize,
    pub state: AircraftState,
    pub weights: WeightBreakdown,
    pub mission: MissionResult,
    pub history: Vec<Iterate>,
    pub lift_augmentation: f64,
    pub payload_lb: f64,
    pub range_nm: f64,
}

impl SizingReport {
    pub fn wing_loading_psf(&self) -> f64 {
        self.state.gross_weight_lb / self.state.wing_area_ft2
    }

    /// Payload-range energy efficiency (N·m of payload transport per Wh of mission energy).
    pub fn pree(&self) -> f64 {
        let energy_wh = self.mission.energy_kwh * 1_000.0;
        if energy_wh <= 0.0 {
            return 0.0;
        }
        lb_to_kg(self.payload_lb) * G0 * self.range_nm * M_PER_NM / energy_wh
    }
}

/// Fixed-point iteration over gross weight for one scenario.
#[derive(Debug, Clone)]
pub struct SizingLoop<'a> {
    inputs: &'a SizingInputs,
    simulator: MissionSimulator,
}

impl<'a> SizingLoop<'a> {
    pub fn new(inputs: &'a SizingInputs) -> Self {
        Self {
            inputs,
            simulator: inputs.simulator(),
        }
    }

    /// Size from the configured initial guess.
    pub fn run(&self) -> Result<SizingReport, SizingError> {
        self.run_from(self.inputs.seed_gross_weight_lb)
    }

    /// Size from an explicit gross-weight seed (lb).
    pub fn run_from(&self, seed_gross_weight_lb: f64) -> Result<SizingReport, SizingError> {
        if seed_gross_weight_lb <= 0.0 || !seed_gross_weight_lb.is_finite() {
            return Err(SizingError::InvalidParameter {
                parameter: "initial gross weight",
                value: seed_gross_weight_lb,
            });
        }

        let settings = &self.inputs.convergence;
        let mut monitor = ConvergenceMonitor::new(settings, seed_gross_weight_lb);
        let mut last = AircraftState::seed(seed_gross_weight_lb);

        for iteration in 1..=settings.max_iterations {
            let previous = last.gross_weight_lb;
            let evaluation = self.evaluate(previous)?;
            let next = evaluation.state.gross_weight_lb;

            debug!(
                "{}: iteration {iteration}, gross weight {previous:.1} -> {next:.1} lb",
                self.inputs.name
            );

            match monitor.observe(iteration, previous, next) {
                Verdict::Converged => {
                    info!(
                        "{}: converged in {iteration} iterations at {next:.1} lb",
                        self.inputs.name
                    );
                    return Ok(SizingReport {
                        name: self.inputs.name.clone(),
                        status: SizingStatus::Converged,
                        iterations: iteration,
                        state: evaluation.state,
                        weights: evaluation.weights,
                        mission: evaluation.mission,
                        history: monitor.history(),
                        lift_augmentation: self.inputs.lift_augmentation,
                        payload_lb: self.inputs.payload_lb,
                        range_nm: self.inputs.range_nm,
                    });
                }
                Verdict::Diverged(reason) => {
                    warn!("{}: diverged at iteration {iteration}: {reason}", self.inputs.name);
                    return Err(SizingError::Diverged {
                        reason,
                        iteration,
                        history: monitor.history(),
                    });
                }
                Verdict::Continue => last = evaluation.state,
            }
        }

        warn!(
            "{}: no convergence within {} iterations",
            self.inputs.name, settings.max_iterations
        );
        Err(SizingError::IterationLimitExceeded {
            iterations: settings.max_iterations,
            last,
            history: monitor.history(),
        })
    }

    /// One pass of the cascade at gross weight `gross_weight_lb`.
    pub fn evaluate(&self, gross_weight_lb: f64) -> Result<Evaluation, SizingError> {
        let inputs = self.inputs;

        let wing_area_ft2 =
            wing_area_for_stall(gross_weight_lb, inputs.stall_speed_fps, inputs.cl_max_sizing)?;

        let cruise_drag_lb = inputs.polar.level_flight_drag_lb(
            gross_weight_lb,
            wing_area_ft2,
            inputs.conditions.cruise_q_psf,
            inputs.cruise_nacelle_cd(),
        )?;
        let cruise_power_kw = thrust_power_kw(
            cruise_drag_lb,
            inputs.cruise_speed_fps,
            inputs.propeller_efficiency,
        );
        let ratings = PowerRatings {
            highlift_kw: inputs.highlift_power_kw(),
            cruise_kw: cruise_power_kw,
        };

        let has_highlift = inputs.highlift.is_some();
        let trial = AircraftState {
            gross_weight_lb,
            wing_area_ft2,
            has_highlift,
            ..AircraftState::default()
        }
        .with_power_ratings(ratings);
        let mission = self.simulator.simulate(&inputs.profile, &trial)?;

        let battery_mass_lb = inputs.energy.battery_mass_lb(mission.energy_kwh);
        let fuel_mass_lb = inputs.energy.fuel_mass_lb(mission.energy_kwh);

        let cruise_set = MotorSet::cruise(
            inputs.cruise_motor_count,
            cruise_power_kw,
            inputs.cruise_specific_power_kw_per_lb,
            inputs.cruise_can_fold,
        )?;
        let highlift_motor_mass_lb = inputs.highlift_mass_lb();
        let cruise_motor_mass_lb = cruise_set.total_mass_lb();

        let weights = WeightBreakdown {
            structure_lb: inputs.structural_fraction * gross_weight_lb,
            wing_lb: inputs.wing_unit_weight_psf * wing_area_ft2,
            battery_lb: battery_mass_lb,
            fuel_lb: fuel_mass_lb,
            highlift_motors_lb: highlift_motor_mass_lb,
            cruise_motors_lb: cruise_motor_mass_lb,
            payload_lb: inputs.payload_lb,
            fixed_systems_lb: inputs.fixed_systems_lb,
        };

        let state = AircraftState {
            gross_weight_lb: weights.total_lb(),
            wing_area_ft2,
            battery_mass_lb,
            fuel_mass_lb,
            has_highlift,
            highlift_motor_mass_lb,
            cruise_motor_mass_lb,
            highlift_power_kw: ratings.highlift_kw,
            cruise_power_kw: ratings.cruise_kw,
            total_energy_kwh: mission.energy_kwh,
        };

        Ok(Evaluation {
            state,
            weights,
            mission,
        })
    }
}

/// Size one aircraft from its configured seed.
pub fn size_aircraft(inputs: &SizingInputs) -> Result<SizingReport, SizingError> {
    SizingLoop::new(inputs).run()
}
