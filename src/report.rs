//! Conversion of sizing results into export records and console tables.

use dep_export::{segments, summary, sweep};
use dep_sizing::{ScenarioOutcome, SegmentResult, SizingReport, SizingStatus};

pub fn segment_records(report: &SizingReport) -> Vec<segments::Record<'static>> {
    report
        .mission
        .segments
        .iter()
        .enumerate()
        .map(|(index, s)| segments::Record {
            index,
            phase: s.segment.phase.name(),
            duration_s: s.segment.duration_sec,
            highlift_active: s.segment.highlift_active,
            cruise_active: s.segment.cruise_active,
            highlift_power_kw: s.power.highlift_kw,
            cruise_power_kw: s.power.cruise_kw,
            power_draw_kw: s.segment.power_draw_kw,
            energy_kwh: s.energy_kwh,
            highlift_cd: s.highlift_cd,
            highlift_drag_lb: s.highlift_drag_lb,
            fold_savings_lb: s.fold_savings_lb,
            gross_weight_lb: s.gross_weight_lb,
            fuel_burned_lb: s.fuel_burned_lb,
        })
        .collect()
}

pub fn sizing_summary(report: &SizingReport) -> summary::SizingSummary {
    let weights = &report.weights;
    summary::SizingSummary {
        aircraft: report.name.clone(),
        status: report.status.to_string(),
        iterations: report.iterations,
        wing_area_ft2: report.state.wing_area_ft2,
        wing_loading_psf: report.wing_loading_psf(),
        lift_augmentation: report.lift_augmentation,
        highlift_power_kw: report.state.highlift_power_kw,
        cruise_power_kw: report.state.cruise_power_kw,
        mission_energy_kwh: report.mission.energy_kwh,
        mission_duration_s: report.mission.duration_s,
        mission_fuel_burned_lb: report.mission.fuel_burned_lb,
        pree: report.pree(),
        weights: summary::WeightSummary {
            gross_weight_lb: report.state.gross_weight_lb,
            empty_weight_lb: weights.empty_weight_lb(),
            structure_lb: weights.structure_lb,
            wing_lb: weights.wing_lb,
            battery_lb: weights.battery_lb,
            fuel_lb: weights.fuel_lb,
            highlift_motors_lb: weights.highlift_motors_lb,
            cruise_motors_lb: weights.cruise_motors_lb,
            payload_lb: weights.payload_lb,
            fixed_systems_lb: weights.fixed_systems_lb,
        },
        segments: report
            .mission
            .segments
            .iter()
            .map(|s| summary::SegmentSummary {
                phase: s.segment.phase.to_string(),
                duration_s: s.segment.duration_sec,
                power_draw_kw: s.segment.power_draw_kw,
                energy_kwh: s.energy_kwh,
                fuel_burned_lb: s.fuel_burned_lb,
            })
            .collect(),
        history: report
            .history
            .iter()
            .map(|it| summary::IterateSample {
                iteration: it.iteration,
                gross_weight_in_lb: it.gross_weight_in_lb,
                gross_weight_out_lb: it.gross_weight_out_lb,
                relative_change: it.relative_change,
            })
            .collect(),
    }
}

pub fn sweep_records<'a>(parameter: &'a str, outcomes: &'a [ScenarioOutcome]) -> Vec<sweep::Record<'a>> {
    outcomes
        .iter()
        .map(|outcome| {
            let (sized, error) = match &outcome.result {
                Ok(report) => (
                    Some(sweep::Sized {
                        iterations: report.iterations,
                        gross_weight_lb: report.state.gross_weight_lb,
                        battery_mass_lb: report.state.battery_mass_lb,
                        wing_area_ft2: report.state.wing_area_ft2,
                        cruise_power_kw: report.state.cruise_power_kw,
                        energy_kwh: report.mission.energy_kwh,
                        fuel_mass_lb: report.state.fuel_mass_lb,
                    }),
                    None,
                ),
                Err(err) => (None, Some(err.to_string())),
            };
            sweep::Record {
                label: &outcome.label,
                parameter,
                value: outcome.value,
                status: status_label(outcome.status()),
                sized,
                error,
            }
        })
        .collect()
}

/// Status column for a sweep row; scenarios rejected before iterating are `error`.
pub fn status_label(status: Option<SizingStatus>) -> &'static str {
    match status {
        Some(SizingStatus::Converged) => "converged",
        Some(SizingStatus::Diverged) => "diverged",
        Some(SizingStatus::IterationLimitExceeded) => "iteration-limit",
        None => "error",
    }
}

/// Print the weight breakdown and mission table of a converged run.
pub fn print_report(report: &SizingReport) {
    let state = &report.state;
    let weights = &report.weights;
    println!("=== Sizing: {} ===", report.name);
    println!(
        "Status          : {} after {} iterations",
        report.status, report.iterations
    );
    println!("Gross weight    : {:.1} lb", state.gross_weight_lb);
    println!("Empty weight    : {:.1} lb", weights.empty_weight_lb());
    println!(
        "Wing            : {:.1} ft² ({:.1} psf, CLmax augmentation {:.2})",
        state.wing_area_ft2,
        report.wing_loading_psf(),
        report.lift_augmentation
    );
    println!(
        "Motors          : high-lift {:.1} kW / {:.1} lb, cruise {:.1} kW / {:.1} lb",
        state.highlift_power_kw,
        state.highlift_motor_mass_lb,
        state.cruise_power_kw,
        state.cruise_motor_mass_lb
    );
    if state.fuel_mass_lb > 0.0 {
        println!(
            "Fuel            : {:.1} lb for {:.2} kWh mission energy ({:.1} lb burned)",
            state.fuel_mass_lb, state.total_energy_kwh, report.mission.fuel_burned_lb
        );
    } else {
        println!(
            "Battery         : {:.1} lb for {:.2} kWh mission energy",
            state.battery_mass_lb, state.total_energy_kwh
        );
    }
    println!(
        "Breakdown       : structure {:.1}, wing {:.1}, payload {:.1}, fixed {:.1} lb",
        weights.structure_lb, weights.wing_lb, weights.payload_lb, weights.fixed_systems_lb
    );
    println!("PREE            : {:.2} N·m/Wh", report.pree());
    println!();
    println!(
        "{:<8} {:>9} {:>10} {:>10} {:>10}  {}",
        "phase", "time_s", "P_hl_kW", "P_cr_kW", "E_kWh", "high-lift"
    );
    for s in &report.mission.segments {
        println!(
            "{:<8} {:>9.0} {:>10.1} {:>10.1} {:>10.2}  {}",
            s.segment.phase.name(),
            s.segment.duration_sec,
            s.power.highlift_kw,
            s.power.cruise_kw,
            s.energy_kwh,
            highlift_label(state.has_highlift, s)
        );
    }
}

/// High-lift column of the console table: `-` without a set, otherwise whether it is
/// running, folded away, or idle but left deployed.
pub fn highlift_label(has_highlift: bool, segment: &SegmentResult) -> &'static str {
    match (has_highlift, segment.segment.highlift_active, segment.highlift_deployed) {
        (false, _, _) => "-",
        (true, true, _) => "deployed",
        (true, false, true) => "idle",
        (true, false, false) => "folded",
    }
}
