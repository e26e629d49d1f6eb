//! Flight-phase power model and motor-set descriptors.
//!
//! A dual-motor DEP aircraft carries two motor sets: a high-lift set that only
//! runs during high-thrust phases and folds away otherwise, and a cruise set
//! that runs for the whole mission at phase-specific load fractions.

pub mod motor;
pub mod phase;

pub use motor::{MotorRole, MotorSet, size_motor_set};
pub use phase::{LoadFractions, Phase, PhasePower, PowerRatings, UnknownPhase, power_for_phase};

use thiserror::Error;

/// Errors raised for non-physical propulsion inputs.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PropulsionError {
    #[error("non-physical {parameter}: {value}")]
    InvalidParameter { parameter: &'static str, value: f64 },
    #[error("{0} motor set needs at least one motor")]
    ZeroMotorCount(MotorRole),
}
