//! Validated runtime inputs for the sizing loop.

use dep_aero::{DragPolar, FoldedDragModel};
use dep_config::{Architecture, ConvergenceConfig};
use dep_propulsion::MotorSet;

use crate::mission::{FlightConditions, MissionProfile, MissionSimulator};

/// Battery technology; mass follows from mission energy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BatterySpec {
    pub specific_energy_kwh_per_lb: f64,
    /// Extra energy carried beyond the mission (0.2 = 20 %).
    pub reserve_fraction: f64,
    pub depth_of_discharge: f64,
    /// Battery-to-shaft efficiency (inverter, motor, wiring).
    pub drivetrain_efficiency: f64,
}

impl BatterySpec {
    /// Installed battery mass (lb) needed to deliver `mission_energy_kwh` at the motors.
    pub fn mass_for_energy_lb(&self, mission_energy_kwh: f64) -> f64 {
        let installed_kwh = mission_energy_kwh * (1.0 + self.reserve_fraction)
            / (self.depth_of_discharge * self.drivetrain_efficiency);
        installed_kwh / self.specific_energy_kwh_per_lb
    }
}

/// Fuel system of a conventional aircraft; fuel mass follows from shaft energy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FuelSpec {
    pub bsfc_lb_per_kwh: f64,
    /// Extra fuel carried beyond the mission (0.2 = 20 %).
    pub reserve_fraction: f64,
}

impl FuelSpec {
    /// Takeoff fuel mass (lb) for `mission_energy_kwh` of shaft work.
    pub fn mass_for_energy_lb(&self, mission_energy_kwh: f64) -> f64 {
        mission_energy_kwh * self.bsfc_lb_per_kwh * (1.0 + self.reserve_fraction)
    }
}

/// Where the mission energy is stored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EnergyStorage {
    Battery(BatterySpec),
    Fuel(FuelSpec),
}

impl EnergyStorage {
    pub fn battery_mass_lb(&self, mission_energy_kwh: f64) -> f64 {
        match self {
            EnergyStorage::Battery(battery) => battery.mass_for_energy_lb(mission_energy_kwh),
            EnergyStorage::Fuel(_) => 0.0,
        }
    }

    pub fn fuel_mass_lb(&self, mission_energy_kwh: f64) -> f64 {
        match self {
            EnergyStorage::Fuel(fuel) => fuel.mass_for_energy_lb(mission_energy_kwh),
            EnergyStorage::Battery(_) => 0.0,
        }
    }

    fn fuel_lb_per_kwh(&self) -> f64 {
        match self {
            EnergyStorage::Fuel(fuel) => fuel.bsfc_lb_per_kwh,
            EnergyStorage::Battery(_) => 0.0,
        }
    }
}

/// Everything the sizing loop needs, already converted to runtime units.
#[derive(Debug, Clone)]
pub struct SizingInputs {
    pub name: String,
    pub architecture: Architecture,
    pub payload_lb: f64,
    pub range_nm: f64,
    pub profile: MissionProfile,
    pub cruise_speed_fps: f64,
    pub conditions: FlightConditions,
    pub highlift: Option<MotorSet>,
    pub cruise_motor_count: u32,
    pub cruise_specific_power_kw_per_lb: f64,
    pub cruise_can_fold: bool,
    pub polar: DragPolar,
    pub folded_drag: FoldedDragModel,
    pub stall_speed_fps: f64,
    /// Lift augmentation applied to the clean CLmax (1.0 without blown-lift sizing).
    pub lift_augmentation: f64,
    pub cl_max_sizing: f64,
    pub propeller_efficiency: f64,
    pub energy: EnergyStorage,
    pub structural_fraction: f64,
    pub wing_unit_weight_psf: f64,
    pub fixed_systems_lb: f64,
    pub seed_gross_weight_lb: f64,
    pub convergence: ConvergenceConfig,
}

impl SizingInputs {
    pub fn simulator(&self) -> MissionSimulator {
        let can_fold = self.highlift.as_ref().map(|set| set.can_fold).unwrap_or(true);
        MissionSimulator::new(self.folded_drag, can_fold, self.conditions)
            .with_fuel_burn(self.energy.fuel_lb_per_kwh())
    }

    /// Parasite drag of the idle high-lift set in cruise, referenced to wing area.
    pub fn cruise_nacelle_cd(&self) -> f64 {
        match &self.highlift {
            Some(set) => self.folded_drag.drag_coefficient(!set.can_fold),
            None => 0.0,
        }
    }

    pub fn highlift_power_kw(&self) -> f64 {
        self.highlift.as_ref().map(MotorSet::total_power_kw).unwrap_or(0.0)
    }

    pub fn highlift_mass_lb(&self) -> f64 {
        self.highlift.as_ref().map(MotorSet::total_mass_lb).unwrap_or(0.0)
    }
}
