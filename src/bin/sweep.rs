use std::io::Write;
use std::path::PathBuf;

use clap::Parser;
use dep_sizer::export::{sweep as export_sweep, writer_for_path};
use dep_sizer::report;
use dep_sizer::scenario::{SweepPlan, run_plan, run_plans};

/// Size one aircraft across a range of parameter values, in parallel.
#[derive(Parser, Debug)]
#[command(author, version, about = "DEP sizing parameter sweeps")]
struct Cli {
    /// Aircraft TOML file or directory of TOML files
    #[arg(long, default_value = "configs/aircraft")]
    config: PathBuf,

    /// Aircraft name from the catalog (defaults to the first entry)
    #[arg(long)]
    aircraft: Option<String>,

    /// Parameter to sweep (specific_energy, cruise_motor_count, cruise_specific_power,
    /// highlift_motor_count, blown_span_fraction, range)
    #[arg(long, required_unless_present = "plan")]
    parameter: Option<String>,

    /// Comma-separated sweep values
    #[arg(long, value_delimiter = ',', required_unless_present = "plan")]
    values: Vec<f64>,

    /// YAML sweep-plan file; replaces --parameter/--values
    #[arg(long, conflicts_with_all = ["parameter", "values"])]
    plan: Option<PathBuf>,

    /// Output CSV file (use '-' for stdout)
    #[arg(long, default_value = "-")]
    output: PathBuf,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let plans = match (&cli.plan, &cli.parameter) {
        (Some(path), _) => run_plans(path)?,
        (None, Some(parameter)) => vec![run_plan(&SweepPlan {
            name: "cli".to_string(),
            aircraft: cli.config.clone(),
            aircraft_name: cli.aircraft.clone(),
            parameter: parameter.clone(),
            values: cli.values.clone(),
        })?],
        (None, None) => anyhow::bail!("either --plan or --parameter is required"),
    };

    let mut writer = writer_for_path(&cli.output)?;
    export_sweep::write_header(writer.as_mut())?;
    for plan in &plans {
        for record in report::sweep_records(plan.parameter.name(), &plan.outcomes) {
            record.write_to(writer.as_mut())?;
        }
        eprintln!(
            "{}: {} of {} scenarios converged",
            plan.plan,
            plan.converged(),
            plan.outcomes.len()
        );
    }
    writer.flush()?;

    Ok(())
}
