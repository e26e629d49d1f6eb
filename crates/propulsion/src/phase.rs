//! Phase identifiers and the fixed phase-to-motor-set load table.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Flight phases of an eSTOL mission, in their usual temporal order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Phase {
    Takeoff,
    Climb,
    Cruise,
    Descent,
    Loiter,
    Landing,
}

/// Raised when a phase name does not match any known flight phase.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown flight phase '{0}'")]
pub struct UnknownPhase(pub String);

/// Fraction of each motor set's rated power drawn during a phase.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoadFractions {
    pub highlift: f64,
    pub cruise: f64,
}

/// Rated total power of each motor set (kW).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PowerRatings {
    pub highlift_kw: f64,
    pub cruise_kw: f64,
}

/// Instantaneous power drawn by each motor set during a phase (kW).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PhasePower {
    pub highlift_kw: f64,
    pub cruise_kw: f64,
}

impl PhasePower {
    pub fn total_kw(&self) -> f64 {
        self.highlift_kw + self.cruise_kw
    }
}

impl Phase {
    pub const ALL: [Phase; 6] = [
        Phase::Takeoff,
        Phase::Climb,
        Phase::Cruise,
        Phase::Descent,
        Phase::Loiter,
        Phase::Landing,
    ];

    /// Lower-case identifier used in configs and reports.
    pub fn name(self) -> &'static str {
        match self {
            Phase::Takeoff => "takeoff",
            Phase::Climb => "climb",
            Phase::Cruise => "cruise",
            Phase::Descent => "descent",
            Phase::Loiter => "loiter",
            Phase::Landing => "landing",
        }
    }

    /// Load fractions for this phase (high-lift, cruise).
    pub fn load_fractions(self) -> LoadFractions {
        let (highlift, cruise) = match self {
            Phase::Takeoff => (1.0, 1.0),
            Phase::Climb => (1.0, 1.0),
            Phase::Cruise => (0.0, 1.0),
            Phase::Descent => (0.0, 0.3),
            Phase::Loiter => (0.0, 0.7),
            Phase::Landing => (1.0, 0.5),
        };
        LoadFractions { highlift, cruise }
    }

    /// Whether the high-lift set runs (and is deployed) in this phase.
    pub fn highlift_active(self) -> bool {
        self.load_fractions().highlift > 0.0
    }

    /// Whether the cruise set runs in this phase.
    pub fn cruise_active(self) -> bool {
        self.load_fractions().cruise > 0.0
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Phase {
    type Err = UnknownPhase;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        Phase::ALL
            .into_iter()
            .find(|phase| phase.name() == lower)
            .ok_or_else(|| UnknownPhase(s.to_string()))
    }
}

/// Power drawn by each motor set in `phase`, given the sets' rated total power.
pub fn power_for_phase(phase: Phase, ratings: &PowerRatings) -> PhasePower {
    let fractions = phase.load_fractions();
    PhasePower {
        highlift_kw: fractions.highlift * ratings.highlift_kw,
        cruise_kw: fractions.cruise * ratings.cruise_kw,
    }
}
