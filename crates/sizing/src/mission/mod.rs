//! Mission segment simulator: integrates motor power over the flight-phase schedule.

pub mod profile;

pub use self::profile::{FlightSegment, MissionProfile, cruise_duration_s};

use dep_aero::{AeroError, FoldedDragModel};
use dep_core::energy::kwh;
use dep_propulsion::{Phase, PhasePower, power_for_phase};

use crate::state::AircraftState;

/// Errors raised while simulating a mission profile.
#[derive(Debug, thiserror::Error, Clone, PartialEq)]
pub enum MissionError {
    #[error("segment {index} ({phase}) has non-positive duration {duration_s} s")]
    InvalidSegment {
        index: usize,
        phase: Phase,
        duration_s: f64,
    },
    #[error("mission profile has no segments")]
    EmptyProfile,
    #[error("drag evaluation failed: {0}")]
    Aero(#[from] AeroError),
}

/// Dynamic pressures used to report high-lift drag per segment.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FlightConditions {
    /// Dynamic pressure in cruise, descent and loiter (lb/ft²).
    pub cruise_q_psf: f64,
    /// Dynamic pressure in takeoff, climb and landing (lb/ft²).
    pub low_speed_q_psf: f64,
}

impl FlightConditions {
    pub fn dynamic_pressure_psf(&self, phase: Phase) -> f64 {
        if phase.highlift_active() {
            self.low_speed_q_psf
        } else {
            self.cruise_q_psf
        }
    }
}

/// Simulated segment with its power split, energy and high-lift drag state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentResult {
    pub segment: FlightSegment,
    pub power: PhasePower,
    pub energy_kwh: f64,
    /// Whether the high-lift set sits in the airstream (running, or idle and unable to fold).
    pub highlift_deployed: bool,
    /// Drag coefficient of the high-lift set in this segment (zero without one).
    pub highlift_cd: f64,
    pub highlift_drag_lb: f64,
    /// Drag avoided by folding the idle high-lift set.
    pub fold_savings_lb: f64,
    /// Gross weight entering the segment.
    pub gross_weight_lb: f64,
    pub fuel_burned_lb: f64,
}

/// Output of one simulation pass.
#[derive(Debug, Clone, PartialEq)]
pub struct MissionResult {
    pub segments: Vec<SegmentResult>,
    pub energy_kwh: f64,
    pub duration_s: f64,
    pub fuel_burned_lb: f64,
    /// Gross weight after the last segment.
    pub final_weight_lb: f64,
}

impl MissionResult {
    /// Segments with their power draw and activation flags filled in.
    pub fn updated_segments(&self) -> Vec<FlightSegment> {
        self.segments.iter().map(|s| s.segment).collect()
    }

    pub fn peak_power_kw(&self) -> f64 {
        self.segments
            .iter()
            .map(|s| s.segment.power_draw_kw)
            .fold(0.0, f64::max)
    }
}

/// Mission simulator carrying the drag model and flight conditions.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MissionSimulator {
    pub drag: FoldedDragModel,
    /// Whether the high-lift set folds when idle (otherwise it windmills deployed).
    pub highlift_can_fold: bool,
    pub conditions: FlightConditions,
    /// Fuel burned per shaft kWh (lb/kWh); zero for battery-electric aircraft.
    pub fuel_lb_per_kwh: f64,
}

impl MissionSimulator {
    pub fn new(drag: FoldedDragModel, highlift_can_fold: bool, conditions: FlightConditions) -> Self {
        Self {
            drag,
            highlift_can_fold,
            conditions,
            fuel_lb_per_kwh: 0.0,
        }
    }

    /// Burn `fuel_lb_per_kwh` of fuel for every shaft kWh, shedding weight segment by segment.
    pub fn with_fuel_burn(self, fuel_lb_per_kwh: f64) -> Self {
        Self {
            fuel_lb_per_kwh,
            ..self
        }
    }

    /// Run the profile in temporal order at the aircraft's current ratings.
    ///
    /// Power follows the ratings, not the instantaneous weight; burned fuel
    /// is only subtracted from the reported segment weights. The first
    /// malformed segment aborts the run.
    pub fn simulate(
        &self,
        profile: &MissionProfile,
        aircraft: &AircraftState,
    ) -> Result<MissionResult, MissionError> {
        if profile.is_empty() {
            return Err(MissionError::EmptyProfile);
        }

        let ratings = aircraft.power_ratings();
        let has_highlift = aircraft.has_highlift;
        let mut segments = Vec::with_capacity(profile.len());
        let mut gross_weight_lb = aircraft.gross_weight_lb;

        for (index, segment) in profile.iter().enumerate() {
            if segment.duration_sec <= 0.0 || !segment.duration_sec.is_finite() {
                return Err(MissionError::InvalidSegment {
                    index,
                    phase: segment.phase,
                    duration_s: segment.duration_sec,
                });
            }

            let power = power_for_phase(segment.phase, &ratings);
            let highlift_active = has_highlift && segment.phase.highlift_active();
            let deployed = highlift_active || !self.highlift_can_fold;

            let (highlift_cd, highlift_drag_lb, fold_savings_lb) =
                if has_highlift && aircraft.wing_area_ft2 > 0.0 {
                    let q = self.conditions.dynamic_pressure_psf(segment.phase);
                    let drag =
                        self.drag
                            .folded_drag_increment(deployed, q, aircraft.wing_area_ft2)?;
                    let savings = if deployed {
                        0.0
                    } else {
                        self.drag.drag_savings_lb(q, aircraft.wing_area_ft2)?
                    };
                    (self.drag.drag_coefficient(deployed), drag, savings)
                } else if has_highlift {
                    (self.drag.drag_coefficient(deployed), 0.0, 0.0)
                } else {
                    (0.0, 0.0, 0.0)
                };

            let power_draw_kw = power.total_kw();
            let energy_kwh = kwh(power_draw_kw, segment.duration_sec);
            let fuel_burned_lb = energy_kwh * self.fuel_lb_per_kwh;
            segments.push(SegmentResult {
                segment: FlightSegment {
                    highlift_active,
                    cruise_active: segment.phase.cruise_active(),
                    power_draw_kw,
                    ..*segment
                },
                power,
                energy_kwh,
                highlift_deployed: has_highlift && deployed,
                highlift_cd,
                highlift_drag_lb,
                fold_savings_lb,
                gross_weight_lb,
                fuel_burned_lb,
            });
            gross_weight_lb -= fuel_burned_lb;
        }

        let energy_kwh: f64 = segments.iter().map(|s| s.energy_kwh).sum();
        let duration_s: f64 = segments.iter().map(|s| s.segment.duration_sec).sum();
        let fuel_burned_lb: f64 = segments.iter().map(|s| s.fuel_burned_lb).sum();

        Ok(MissionResult {
            segments,
            energy_kwh,
            duration_s,
            fuel_burned_lb,
            final_weight_lb: gross_weight_lb,
        })
    }
}

/// Simulate with the default folded-drag model and no drag reporting conditions.
pub fn simulate(
    profile: &MissionProfile,
    aircraft: &AircraftState,
) -> Result<MissionResult, MissionError> {
    MissionSimulator {
        highlift_can_fold: true,
        ..MissionSimulator::default()
    }
    .simulate(profile, aircraft)
}
