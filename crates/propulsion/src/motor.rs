//! Motor-set descriptors and mass sizing.

use std::collections::BTreeSet;
use std::fmt;

use crate::PropulsionError;
use crate::phase::Phase;

/// Which job a motor set does on the aircraft.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotorRole {
    /// Distributed high-lift motors blowing the wing during takeoff, climb and landing.
    HighLift,
    /// Cruise motors, active in every phase.
    Cruise,
}

impl MotorRole {
    /// Phases in which this role draws power under the fixed activation policy.
    pub fn activation_policy(self) -> BTreeSet<Phase> {
        Phase::ALL
            .into_iter()
            .filter(|phase| match self {
                MotorRole::HighLift => phase.highlift_active(),
                MotorRole::Cruise => phase.cruise_active(),
            })
            .collect()
    }
}

impl fmt::Display for MotorRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MotorRole::HighLift => f.write_str("high-lift"),
            MotorRole::Cruise => f.write_str("cruise"),
        }
    }
}

/// A group of identical motors sharing one role.
#[derive(Debug, Clone, PartialEq)]
pub struct MotorSet {
    pub role: MotorRole,
    pub count: u32,
    pub power_per_unit_kw: f64,
    pub mass_per_unit_lb: f64,
    pub active_phases: BTreeSet<Phase>,
    pub can_fold: bool,
}

impl MotorSet {
    /// High-lift set with catalog power and mass per unit.
    pub fn highlift(
        count: u32,
        power_per_unit_kw: f64,
        mass_per_unit_lb: f64,
        can_fold: bool,
    ) -> Result<Self, PropulsionError> {
        if count == 0 {
            return Err(PropulsionError::ZeroMotorCount(MotorRole::HighLift));
        }
        check_non_negative("high-lift power per unit", power_per_unit_kw)?;
        check_non_negative("high-lift mass per unit", mass_per_unit_lb)?;
        Ok(Self {
            role: MotorRole::HighLift,
            count,
            power_per_unit_kw,
            mass_per_unit_lb,
            active_phases: MotorRole::HighLift.activation_policy(),
            can_fold,
        })
    }

    /// Cruise set sized to deliver `power_requirement_kw` in total.
    pub fn cruise(
        count: u32,
        power_requirement_kw: f64,
        specific_power_kw_per_lb: f64,
        can_fold: bool,
    ) -> Result<Self, PropulsionError> {
        let total_mass_lb = size_motor_set(power_requirement_kw, specific_power_kw_per_lb, count)?;
        let units = f64::from(count);
        Ok(Self {
            role: MotorRole::Cruise,
            count,
            power_per_unit_kw: power_requirement_kw / units,
            mass_per_unit_lb: total_mass_lb / units,
            active_phases: MotorRole::Cruise.activation_policy(),
            can_fold,
        })
    }

    pub fn total_power_kw(&self) -> f64 {
        f64::from(self.count) * self.power_per_unit_kw
    }

    pub fn total_mass_lb(&self) -> f64 {
        f64::from(self.count) * self.mass_per_unit_lb
    }

    pub fn is_active(&self, phase: Phase) -> bool {
        self.active_phases.contains(&phase)
    }
}

/// Total mass (lb) of `motor_count` motors sharing `power_requirement_kw`.
///
/// Each unit carries `power_requirement_kw / motor_count` and weighs that power
/// divided by the specific power, so the total is `power / specific_power`.
pub fn size_motor_set(
    power_requirement_kw: f64,
    specific_power_kw_per_lb: f64,
    motor_count: u32,
) -> Result<f64, PropulsionError> {
    if specific_power_kw_per_lb <= 0.0 || !specific_power_kw_per_lb.is_finite() {
        return Err(PropulsionError::InvalidParameter {
            parameter: "specific power",
            value: specific_power_kw_per_lb,
        });
    }
    if motor_count == 0 {
        return Err(PropulsionError::ZeroMotorCount(MotorRole::Cruise));
    }
    check_non_negative("power requirement", power_requirement_kw)?;

    let units = f64::from(motor_count);
    let mass_per_unit = (power_requirement_kw / units) / specific_power_kw_per_lb;
    Ok(units * mass_per_unit)
}

fn check_non_negative(parameter: &'static str, value: f64) -> Result<(), PropulsionError> {
    if value >= 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(PropulsionError::InvalidParameter { parameter, value })
    }
}
