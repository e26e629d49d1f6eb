use dep_sizer::aero::FoldedDragModel;
use dep_sizer::config::load_aircraft_config;
use dep_sizer::propulsion::Phase;
use dep_sizer::report::{highlift_label, segment_records, status_label, sweep_records};
use dep_sizer::sizing::mission::{FlightConditions, MissionSimulator};
use dep_sizer::sizing::{
    AircraftState, MissionProfile, SizingStatus, SweepParameter, aircraft, size_aircraft, sweep,
};

fn profile() -> MissionProfile {
    MissionProfile::from_schedule(&[
        (Phase::Takeoff, 60.0),
        (Phase::Cruise, 1_800.0),
        (Phase::Landing, 60.0),
    ])
}

fn labels(can_fold: bool, has_highlift: bool) -> Vec<&'static str> {
    let simulator = MissionSimulator::new(
        FoldedDragModel::default(),
        can_fold,
        FlightConditions {
            cruise_q_psf: 60.0,
            low_speed_q_psf: 15.0,
        },
    );
    let state = AircraftState {
        gross_weight_lb: 6_000.0,
        wing_area_ft2: 200.0,
        has_highlift,
        highlift_power_kw: if has_highlift { 126.0 } else { 0.0 },
        cruise_power_kw: 400.0,
        ..AircraftState::default()
    };
    let result = simulator.simulate(&profile(), &state).expect("simulate");
    result
        .segments
        .iter()
        .map(|segment| highlift_label(has_highlift, segment))
        .collect()
}

#[test]
fn folding_set_reads_folded_in_cruise() {
    assert_eq!(labels(true, true), ["deployed", "folded", "deployed"]);
}

#[test]
fn non_folding_set_reads_idle_in_cruise() {
    assert_eq!(labels(false, true), ["deployed", "idle", "deployed"]);
}

#[test]
fn aircraft_without_highlift_set_shows_a_dash() {
    assert_eq!(labels(true, false), ["-", "-", "-"]);
}

#[test]
fn conventional_segments_report_fuel_and_weight() {
    let config = load_aircraft_config("configs/aircraft/turboprop_conventional.toml")
        .expect("conventional config");
    let report = size_aircraft(&aircraft::from_config(&config).unwrap()).expect("converged");
    let records = segment_records(&report);

    assert_eq!(records.len(), 6);
    assert!(records.iter().all(|r| r.fuel_burned_lb > 0.0));
    assert!(
        records
            .windows(2)
            .all(|pair| pair[1].gross_weight_lb < pair[0].gross_weight_lb)
    );
}

#[test]
fn sweep_rows_without_a_battery_are_errors() {
    let config = load_aircraft_config("configs/aircraft/turboprop_conventional.toml")
        .expect("conventional config");
    let outcomes = sweep(&config, SweepParameter::SpecificEnergy, &[300.0]);
    let rows = sweep_records("specific_energy", &outcomes);

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].status, status_label(None));
    assert!(rows[0].sized.is_none());
    assert!(rows[0].error.as_deref().is_some_and(|e| e.contains("battery")));
    assert_eq!(status_label(Some(SizingStatus::Converged)), "converged");
}
