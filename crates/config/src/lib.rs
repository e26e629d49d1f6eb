//! Configuration models and loaders for the DEP sizing tool.

use std::fs::File;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

/// One aircraft configuration: architecture, motor sets, mission and sizing parameters.
#[derive(Debug, Deserialize, Clone)]
pub struct AircraftConfig {
    pub name: String,
    pub architecture: Architecture,
    pub mission: MissionConfig,
    #[serde(default)]
    pub highlift: Option<HighliftMotorConfig>,
    pub cruise: CruiseMotorConfig,
    pub aero: AeroConfig,
    /// Energy storage of the electric architectures.
    #[serde(default)]
    pub battery: Option<BatteryConfig>,
    /// Fuel system of the conventional architecture.
    #[serde(default)]
    pub fuel: Option<FuelConfig>,
    pub weights: WeightsConfig,
    #[serde(default)]
    pub convergence: ConvergenceConfig,
}

/// Propulsion layout.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Architecture {
    /// Cruise motors only.
    Single,
    /// High-lift set plus cruise set.
    Dual,
    /// Fuel-burning engines in place of the cruise motors; the reference baseline.
    Conventional,
}

/// Target mission and flight-phase schedule.
#[derive(Debug, Deserialize, Clone)]
pub struct MissionConfig {
    pub range_nm: f64,
    pub payload_lb: f64,
    pub cruise_speed_kts: f64,
    pub cruise_altitude_ft: f64,
    pub segments: Vec<SegmentConfig>,
}

/// One entry of the flight-phase schedule. Cruise may omit its duration.
#[derive(Debug, Deserialize, Clone)]
pub struct SegmentConfig {
    pub phase: String,
    #[serde(default)]
    pub duration_s: Option<f64>,
}

/// High-lift motor set: fixed catalog power and mass.
#[derive(Debug, Deserialize, Clone)]
pub struct HighliftMotorConfig {
    pub count: u32,
    pub power_per_unit_kw: f64,
    pub mass_per_unit_lb: f64,
    #[serde(default)]
    pub active_phases: Option<Vec<String>>,
    #[serde(default = "default_true")]
    pub can_fold: bool,
}

/// Cruise motor set (engines for the conventional architecture): sized from the cruise power requirement.
#[derive(Debug, Deserialize, Clone)]
pub struct CruiseMotorConfig {
    pub count: u32,
    pub specific_power_kw_per_kg: f64,
    #[serde(default)]
    pub active_phases: Option<Vec<String>>,
    #[serde(default)]
    pub can_fold: bool,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AeroConfig {
    pub cd0: f64,
    pub aspect_ratio: f64,
    pub oswald_efficiency: f64,
    pub cl_max_clean: f64,
    pub stall_speed_kts: f64,
    #[serde(default = "default_lift_augmentation_max")]
    pub lift_augmentation_max: f64,
    #[serde(default)]
    pub blown_span_fraction: f64,
    #[serde(default = "default_true")]
    pub use_blown_lift_for_wing_sizing: bool,
    #[serde(default = "default_cd_deployed")]
    pub cd_deployed: f64,
    #[serde(default = "default_cd_folded")]
    pub cd_folded: f64,
    pub propeller_efficiency: f64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct BatteryConfig {
    pub specific_energy_wh_per_kg: f64,
    #[serde(default)]
    pub reserve_fraction: f64,
    #[serde(default = "default_depth_of_discharge")]
    pub depth_of_discharge: f64,
    #[serde(default = "default_drivetrain_efficiency")]
    pub drivetrain_efficiency: f64,
}

/// Fuel system of a conventional aircraft.
#[derive(Debug, Deserialize, Clone)]
pub struct FuelConfig {
    /// Brake-specific fuel consumption (kg per shaft kWh).
    pub bsfc_kg_per_kwh: f64,
    #[serde(default)]
    pub reserve_fraction: f64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct WeightsConfig {
    pub structural_fraction: f64,
    pub wing_unit_weight_psf: f64,
    pub fixed_systems_lb: f64,
    #[serde(default = "default_baseline_empty_fraction")]
    pub baseline_empty_fraction: f64,
    #[serde(default = "default_electrification_multiplier")]
    pub electrification_multiplier: f64,
    #[serde(default)]
    pub initial_gross_weight_lb: Option<f64>,
}

/// Fixed-point iteration controls.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ConvergenceConfig {
    pub epsilon: f64,
    pub max_iterations: usize,
    pub divergence_ceiling: f64,
    pub oscillation_window: usize,
    pub oscillation_damping_tolerance: f64,
    pub history_len: usize,
}

impl Default for ConvergenceConfig {
    fn default() -> Self {
        Self {
            epsilon: 1.0e-3,
            max_iterations: 200,
            divergence_ceiling: 10.0,
            oscillation_window: 6,
            oscillation_damping_tolerance: 0.02,
            history_len: 5,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_lift_augmentation_max() -> f64 {
    1.8
}

fn default_cd_deployed() -> f64 {
    0.015
}

fn default_cd_folded() -> f64 {
    0.001
}

fn default_depth_of_discharge() -> f64 {
    0.9
}

fn default_drivetrain_efficiency() -> f64 {
    0.95
}

fn default_baseline_empty_fraction() -> f64 {
    0.55
}

fn default_electrification_multiplier() -> f64 {
    1.4
}

/// Errors that can occur while loading configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse YAML: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("no aircraft configuration found at {0}")]
    Empty(PathBuf),
}

/// Load aircraft configurations from a TOML file, a directory of TOML files, or a YAML list.
pub fn load_aircraft_configs<P: AsRef<Path>>(path: P) -> Result<Vec<AircraftConfig>, ConfigError> {
    load_records(path)
}

/// Load exactly one aircraft configuration (the first record when several are present).
pub fn load_aircraft_config<P: AsRef<Path>>(path: P) -> Result<AircraftConfig, ConfigError> {
    let path = path.as_ref();
    load_records(path)?
        .into_iter()
        .next()
        .ok_or_else(|| ConfigError::Empty(path.to_path_buf()))
}

/// Parse a single aircraft configuration from TOML text.
pub fn parse_aircraft_toml(contents: &str) -> Result<AircraftConfig, ConfigError> {
    Ok(toml::from_str(contents)?)
}

fn load_records<T, P>(path: P) -> Result<Vec<T>, ConfigError>
where
    T: for<'de> Deserialize<'de>,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    if path.is_dir() {
        read_dir_records(path)
    } else if path.extension().map(|ext| ext == "toml").unwrap_or(false) {
        let contents = std::fs::read_to_string(path)?;
        let record: T = toml::from_str(&contents)?;
        Ok(vec![record])
    } else {
        let reader = File::open(path)?;
        Ok(serde_yaml::from_reader(reader)?)
    }
}

fn read_dir_records<T>(dir: &Path) -> Result<Vec<T>, ConfigError>
where
    T: for<'de> Deserialize<'de>,
{
    let mut records = Vec::new();
    let mut entries: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.extension().map(|ext| ext == "toml").unwrap_or(false))
        .collect();
    entries.sort();
    for path in entries {
        let contents = std::fs::read_to_string(&path)?;
        let record: T = toml::from_str(&contents)?;
        records.push(record);
    }
    Ok(records)
}
