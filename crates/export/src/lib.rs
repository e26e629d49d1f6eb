//! Export helpers for CSV and JSON artifacts.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Create a writer for the target path, handling stdout (`-`) by convention.
pub fn writer_for_path(path: &Path) -> io::Result<Box<dyn Write>> {
    if path == Path::new("-") {
        return Ok(Box::new(BufWriter::new(io::stdout())));
    }
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let file = File::create(path)?;
    Ok(Box::new(BufWriter::new(file)))
}

pub mod segments {
    use std::io::{self, Write};

    pub const HEADER: &str = "index,phase,duration_s,highlift_active,cruise_active,highlift_power_kw,cruise_power_kw,power_draw_kw,energy_kwh,highlift_cd,highlift_drag_lb,fold_savings_lb,gross_weight_lb,fuel_burned_lb";

    pub fn write_header(writer: &mut dyn Write) -> io::Result<()> {
        writeln!(writer, "{}", HEADER)
    }

    /// One simulated mission segment.
    #[derive(Debug, Clone)]
    pub struct Record<'a> {
        pub index: usize,
        pub phase: &'a str,
        pub duration_s: f64,
        pub highlift_active: bool,
        pub cruise_active: bool,
        pub highlift_power_kw: f64,
        pub cruise_power_kw: f64,
        pub power_draw_kw: f64,
        pub energy_kwh: f64,
        pub highlift_cd: f64,
        pub highlift_drag_lb: f64,
        pub fold_savings_lb: f64,
        pub gross_weight_lb: f64,
        pub fuel_burned_lb: f64,
    }

    impl Record<'_> {
        /// Serialize the record to CSV, matching the header ordering.
        pub fn write_to(&self, writer: &mut dyn Write) -> io::Result<()> {
            writeln!(
                writer,
                "{},{},{:.1},{},{},{:.3},{:.3},{:.3},{:.4},{:.4},{:.3},{:.3},{:.2},{:.3}",
                self.index,
                self.phase,
                self.duration_s,
                self.highlift_active,
                self.cruise_active,
                self.highlift_power_kw,
                self.cruise_power_kw,
                self.power_draw_kw,
                self.energy_kwh,
                self.highlift_cd,
                self.highlift_drag_lb,
                self.fold_savings_lb,
                self.gross_weight_lb,
                self.fuel_burned_lb,
            )
        }
    }

    /// Header plus one row per segment.
    pub fn write_csv(writer: &mut dyn Write, records: &[Record<'_>]) -> io::Result<()> {
        write_header(writer)?;
        for record in records {
            record.write_to(writer)?;
        }
        writer.flush()
    }
}

pub mod sweep {
    use std::io::{self, Write};

    pub const HEADER: &str = "label,parameter,value,status,iterations,gross_weight_lb,battery_mass_lb,wing_area_ft2,cruise_power_kw,energy_kwh,fuel_mass_lb,error";

    pub fn write_header(writer: &mut dyn Write) -> io::Result<()> {
        writeln!(writer, "{}", HEADER)
    }

    /// Sized quantities of a scenario that reached a converged state.
    #[derive(Debug, Clone, Copy)]
    pub struct Sized {
        pub iterations: usize,
        pub gross_weight_lb: f64,
        pub battery_mass_lb: f64,
        pub wing_area_ft2: f64,
        pub cruise_power_kw: f64,
        pub energy_kwh: f64,
        pub fuel_mass_lb: f64,
    }

    /// One sweep scenario. Failed scenarios carry an error message instead of sized values.
    #[derive(Debug, Clone)]
    pub struct Record<'a> {
        pub label: &'a str,
        pub parameter: &'a str,
        pub value: f64,
        pub status: &'a str,
        pub sized: Option<Sized>,
        pub error: Option<String>,
    }

    impl Record<'_> {
        pub fn write_to(&self, writer: &mut dyn Write) -> io::Result<()> {
            write!(
                writer,
                "{},{},{},{},",
                quote(self.label),
                self.parameter,
                self.value,
                self.status
            )?;
            match &self.sized {
                Some(s) => write!(
                    writer,
                    "{},{:.2},{:.2},{:.3},{:.3},{:.4},{:.2},",
                    s.iterations,
                    s.gross_weight_lb,
                    s.battery_mass_lb,
                    s.wing_area_ft2,
                    s.cruise_power_kw,
                    s.energy_kwh,
                    s.fuel_mass_lb
                )?,
                None => write!(writer, ",,,,,,,")?,
            }
            writeln!(writer, "{}", quote(self.error.as_deref().unwrap_or("")))
        }
    }

    fn quote(field: &str) -> String {
        if field.contains([',', '"', '\n']) {
            format!("\"{}\"", field.replace('"', "\"\""))
        } else {
            field.to_string()
        }
    }
}

pub mod summary {
    use std::io::{self, Write};

    use chrono::{SecondsFormat, Utc};
    use serde::Serialize;
    use serde_json::to_writer_pretty;

    /// Gross-weight trace of one iteration.
    #[derive(Debug, Clone, Serialize)]
    pub struct IterateSample {
        pub iteration: usize,
        pub gross_weight_in_lb: f64,
        pub gross_weight_out_lb: f64,
        pub relative_change: f64,
    }

    #[derive(Debug, Clone, Serialize)]
    pub struct WeightSummary {
        pub gross_weight_lb: f64,
        pub empty_weight_lb: f64,
        pub structure_lb: f64,
        pub wing_lb: f64,
        pub battery_lb: f64,
        pub fuel_lb: f64,
        pub highlift_motors_lb: f64,
        pub cruise_motors_lb: f64,
        pub payload_lb: f64,
        pub fixed_systems_lb: f64,
    }

    #[derive(Debug, Clone, Serialize)]
    pub struct SegmentSummary {
        pub phase: String,
        pub duration_s: f64,
        pub power_draw_kw: f64,
        pub energy_kwh: f64,
        pub fuel_burned_lb: f64,
    }

    /// Envelope of one sizing run.
    #[derive(Debug, Clone, Serialize)]
    pub struct SizingSummary {
        pub aircraft: String,
        pub status: String,
        pub iterations: usize,
        pub wing_area_ft2: f64,
        pub wing_loading_psf: f64,
        pub lift_augmentation: f64,
        pub highlift_power_kw: f64,
        pub cruise_power_kw: f64,
        pub mission_energy_kwh: f64,
        pub mission_duration_s: f64,
        pub mission_fuel_burned_lb: f64,
        /// Payload-range energy efficiency (N·m/Wh).
        pub pree: f64,
        pub weights: WeightSummary,
        pub segments: Vec<SegmentSummary>,
        pub history: Vec<IterateSample>,
    }

    #[derive(Serialize)]
    struct Envelope<'a> {
        generated_utc: String,
        #[serde(flatten)]
        summary: &'a SizingSummary,
    }

    /// Pretty JSON of the summary stamped with the UTC generation time.
    pub fn write_json(writer: &mut dyn Write, summary: &SizingSummary) -> io::Result<()> {
        let envelope = Envelope {
            generated_utc: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
            summary,
        };
        to_writer_pretty(&mut *writer, &envelope)?;
        writeln!(writer)?;
        writer.flush()
    }
}
