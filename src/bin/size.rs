use std::path::PathBuf;

use anyhow::{Context, bail};
use clap::Parser;
use dep_sizer::config::load_aircraft_configs;
use dep_sizer::export::{segments, summary, writer_for_path};
use dep_sizer::report;
use dep_sizer::sizing::{SizingLoop, aircraft};

/// Size one aircraft by iterating the weight cascade to a fixed point.
#[derive(Parser, Debug)]
#[command(author, version, about = "DEP aircraft weight-cascade sizing")]
struct Cli {
    /// Aircraft TOML file or directory of TOML files
    #[arg(long, default_value = "configs/aircraft")]
    config: PathBuf,

    /// Aircraft name from the catalog (defaults to the first entry)
    #[arg(long)]
    aircraft: Option<String>,

    /// Initial gross-weight guess in lb (defaults to the configured seed)
    #[arg(long)]
    seed_lb: Option<f64>,

    /// Per-segment energy breakdown CSV (use '-' for stdout)
    #[arg(long)]
    segments_csv: Option<PathBuf>,

    /// JSON summary of the sized aircraft
    #[arg(long)]
    json: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let catalog = load_aircraft_configs(&cli.config)
        .with_context(|| format!("loading aircraft from {}", cli.config.display()))?;
    let inputs = aircraft::select(&catalog, cli.aircraft.as_deref())?;

    let sizing = SizingLoop::new(&inputs);
    let outcome = match cli.seed_lb {
        Some(seed) => sizing.run_from(seed),
        None => sizing.run(),
    };
    let report = match outcome {
        Ok(report) => report,
        Err(err) => {
            for it in err.history() {
                eprintln!(
                    "  iteration {:>3}: {:.1} -> {:.1} lb ({:.2e})",
                    it.iteration, it.gross_weight_in_lb, it.gross_weight_out_lb, it.relative_change
                );
            }
            bail!("{}: {err}", inputs.name);
        }
    };

    report::print_report(&report);

    if let Some(path) = &cli.segments_csv {
        let mut writer = writer_for_path(path)?;
        segments::write_csv(writer.as_mut(), &report::segment_records(&report))?;
    }
    if let Some(path) = &cli.json {
        let mut writer = writer_for_path(path)?;
        summary::write_json(writer.as_mut(), &report::sizing_summary(&report))?;
    }

    Ok(())
}
