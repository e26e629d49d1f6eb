//! Aircraft state snapshots exchanged between sizing iterations.

use dep_propulsion::PowerRatings;

/// One immutable snapshot of the aircraft produced by a sizing pass.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AircraftState {
    pub gross_weight_lb: f64,
    pub wing_area_ft2: f64,
    pub battery_mass_lb: f64,
    /// Fuel loaded at takeoff (conventional architecture only).
    pub fuel_mass_lb: f64,
    /// Whether the aircraft carries a high-lift set, whatever its rating.
    pub has_highlift: bool,
    pub highlift_motor_mass_lb: f64,
    pub cruise_motor_mass_lb: f64,
    /// Rated total power of the high-lift set (zero when the aircraft has none).
    pub highlift_power_kw: f64,
    /// Rated total power of the cruise set.
    pub cruise_power_kw: f64,
    pub total_energy_kwh: f64,
}

impl AircraftState {
    /// Initial guess carrying only a gross weight.
    pub fn seed(gross_weight_lb: f64) -> Self {
        Self {
            gross_weight_lb,
            ..Self::default()
        }
    }

    pub fn power_ratings(&self) -> PowerRatings {
        PowerRatings {
            highlift_kw: self.highlift_power_kw,
            cruise_kw: self.cruise_power_kw,
        }
    }

    pub fn with_power_ratings(self, ratings: PowerRatings) -> Self {
        Self {
            highlift_power_kw: ratings.highlift_kw,
            cruise_power_kw: ratings.cruise_kw,
            ..self
        }
    }
}

/// Mass contributions summed into the gross weight estimate.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WeightBreakdown {
    pub structure_lb: f64,
    pub wing_lb: f64,
    pub battery_lb: f64,
    pub fuel_lb: f64,
    pub highlift_motors_lb: f64,
    pub cruise_motors_lb: f64,
    pub payload_lb: f64,
    pub fixed_systems_lb: f64,
}

impl WeightBreakdown {
    pub fn total_lb(&self) -> f64 {
        self.structure_lb
            + self.wing_lb
            + self.battery_lb
            + self.fuel_lb
            + self.highlift_motors_lb
            + self.cruise_motors_lb
            + self.payload_lb
            + self.fixed_systems_lb
    }

    /// Everything except payload and fuel; the battery stays aboard so it counts as empty weight.
    pub fn empty_weight_lb(&self) -> f64 {
        self.total_lb() - self.payload_lb - self.fuel_lb
    }
}

/// Gross-weight trace of one iteration, kept for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Iterate {
    pub iteration: usize,
    pub gross_weight_in_lb: f64,
    pub gross_weight_out_lb: f64,
    pub relative_change: f64,
}
