//! Sweep plans: YAML lists of parameter sweeps over catalog aircraft.

use std::fs::File;
use std::path::{Path, PathBuf};

use dep_config::{ConfigError, load_aircraft_configs};
use dep_sizing::aircraft::{ConfigurationError, select_config};
use dep_sizing::{ScenarioOutcome, SizingError, SweepParameter, sweep};
use log::info;
use serde::Deserialize;
use thiserror::Error;

/// One sweep: which aircraft, which parameter, which values.
#[derive(Debug, Deserialize, Clone)]
pub struct SweepPlan {
    pub name: String,
    /// Aircraft TOML file or directory of TOML files.
    pub aircraft: PathBuf,
    /// Catalog entry to sweep; the first entry when omitted.
    #[serde(default)]
    pub aircraft_name: Option<String>,
    pub parameter: String,
    pub values: Vec<f64>,
}

#[derive(Debug, Error)]
pub enum ScenarioError {
    #[error("failed to read YAML: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse YAML: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("failed to load aircraft: {0}")]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Sizing(#[from] SizingError),
}

impl From<ConfigurationError> for ScenarioError {
    fn from(err: ConfigurationError) -> Self {
        ScenarioError::Sizing(err.into())
    }
}

/// Outcomes of one plan, in the order of its values.
#[derive(Debug, Clone)]
pub struct PlanOutcome {
    pub plan: String,
    pub parameter: SweepParameter,
    pub outcomes: Vec<ScenarioOutcome>,
}

impl PlanOutcome {
    pub fn converged(&self) -> usize {
        self.outcomes.iter().filter(|o| o.report().is_some()).count()
    }
}

pub fn load_sweep_plans<P: AsRef<Path>>(path: P) -> Result<Vec<SweepPlan>, ScenarioError> {
    let reader = File::open(path)?;
    Ok(serde_yaml::from_reader(reader)?)
}

pub fn run_plan(plan: &SweepPlan) -> Result<PlanOutcome, ScenarioError> {
    let parameter: SweepParameter = plan.parameter.parse()?;
    let catalog = load_aircraft_configs(&plan.aircraft)?;
    let base = select_config(&catalog, plan.aircraft_name.as_deref())?;

    info!("plan '{}': {} over {} values", plan.name, parameter, plan.values.len());
    Ok(PlanOutcome {
        plan: plan.name.clone(),
        parameter,
        outcomes: sweep(base, parameter, &plan.values),
    })
}

/// Run every plan in a YAML file. A plan that cannot be set up stops the batch;
/// scenarios that diverge inside a plan do not.
pub fn run_plans<P: AsRef<Path>>(path: P) -> Result<Vec<PlanOutcome>, ScenarioError> {
    load_sweep_plans(path)?.iter().map(run_plan).collect()
}
