use approx::assert_relative_eq;

use dep_sizer::config::{AircraftConfig, Architecture, SegmentConfig, load_aircraft_config};
use dep_sizer::physics::constants::RHO_SL_SLUG_FT3;
use dep_sizer::physics::isa::dynamic_pressure_psf;
use dep_sizer::propulsion::{MotorRole, Phase};
use dep_sizer::sizing::aircraft::{self, ConfigurationError};
use dep_sizer::sizing::{
    DivergenceReason, EnergyStorage, SizingError, SizingLoop, SizingStatus, size_aircraft,
};

fn dual() -> AircraftConfig {
    load_aircraft_config("configs/aircraft/dual_motor_dep.toml").expect("dual config")
}

fn single() -> AircraftConfig {
    load_aircraft_config("configs/aircraft/single_motor_electric.toml").expect("single config")
}

fn conventional() -> AircraftConfig {
    load_aircraft_config("configs/aircraft/turboprop_conventional.toml")
        .expect("conventional config")
}

#[test]
fn dual_motor_reference_converges() {
    let inputs = aircraft::from_config(&dual()).expect("inputs");
    assert_relative_eq!(inputs.seed_gross_weight_lb, 5_600.0, max_relative = 1e-12);

    let report = size_aircraft(&inputs).expect("converged");
    assert_eq!(report.status, SizingStatus::Converged);
    assert!(report.iterations > 1 && report.iterations < 50, "{}", report.iterations);
    assert!(
        (7_300.0..7_500.0).contains(&report.state.gross_weight_lb),
        "gross weight {}",
        report.state.gross_weight_lb
    );

    assert_eq!(report.weights.total_lb(), report.state.gross_weight_lb);
    assert_eq!(report.state.total_energy_kwh, report.mission.energy_kwh);
    assert_eq!(report.state.battery_mass_lb, report.weights.battery_lb);
    assert_eq!(report.weights.highlift_motors_lb, 96.0);
    assert_relative_eq!(report.state.highlift_power_kw, 126.0, max_relative = 1e-12);
    assert!(report.state.cruise_power_kw > 0.0);

    let last = report.history.last().expect("history");
    assert_eq!(last.iteration, report.iterations);
    assert!(last.relative_change < inputs.convergence.epsilon);
    assert!(report.history.len() <= inputs.convergence.history_len);
}

#[test]
fn converged_state_is_a_fixed_point() {
    let inputs = aircraft::from_config(&dual()).expect("inputs");
    let sizing = SizingLoop::new(&inputs);
    let first = sizing.run().expect("converged");

    let second = sizing
        .run_from(first.state.gross_weight_lb)
        .expect("converged again");
    assert!(second.iterations <= 2, "{} iterations", second.iterations);
    let drift = (second.state.gross_weight_lb - first.state.gross_weight_lb).abs()
        / first.state.gross_weight_lb;
    assert!(drift < inputs.convergence.epsilon, "drift {drift}");

    let pass = sizing.evaluate(first.state.gross_weight_lb).expect("evaluate");
    assert_relative_eq!(
        pass.state.gross_weight_lb,
        first.state.gross_weight_lb,
        max_relative = inputs.convergence.epsilon
    );
}

#[test]
fn better_batteries_never_add_battery_mass() {
    let mut previous = f64::INFINITY;
    for specific_energy in [200.0, 250.0, 300.0, 400.0] {
        let mut config = dual();
        config
            .battery
            .as_mut()
            .expect("battery")
            .specific_energy_wh_per_kg = specific_energy;
        config.convergence.epsilon = 1.0e-6;
        let report = size_aircraft(&aircraft::from_config(&config).expect("inputs"))
            .expect("converged");
        assert!(
            report.state.battery_mass_lb <= previous,
            "{specific_energy} Wh/kg gave {} lb after {previous} lb",
            report.state.battery_mass_lb
        );
        previous = report.state.battery_mass_lb;
    }
}

#[test]
fn near_zero_cruise_specific_power_diverges() {
    let mut config = dual();
    config.cruise.specific_power_kw_per_kg = 1.0e-4;
    let inputs = aircraft::from_config(&config).expect("inputs");

    match size_aircraft(&inputs) {
        Err(err @ SizingError::Diverged { .. }) => {
            assert_eq!(err.status(), Some(SizingStatus::Diverged));
            let SizingError::Diverged {
                reason,
                iteration,
                history,
            } = err
            else {
                unreachable!()
            };
            assert!(matches!(reason, DivergenceReason::Runaway { .. }));
            assert!(iteration <= inputs.convergence.max_iterations);
            assert_eq!(history.last().map(|it| it.iteration), Some(iteration));
        }
        other => panic!("expected divergence, got {other:?}"),
    }
}

#[test]
fn iteration_cap_is_distinct_from_divergence() {
    let mut config = dual();
    config.convergence.max_iterations = 3;
    let inputs = aircraft::from_config(&config).expect("inputs");

    match size_aircraft(&inputs) {
        Err(SizingError::IterationLimitExceeded {
            iterations,
            last,
            history,
        }) => {
            assert_eq!(iterations, 3);
            assert_eq!(history.len(), 3);
            assert_eq!(
                last.gross_weight_lb,
                history[2].gross_weight_out_lb,
                "last snapshot is the final iterate"
            );
            assert!(last.battery_mass_lb > 0.0);
        }
        other => panic!("expected iteration limit, got {other:?}"),
    }
}

#[test]
fn zero_specific_power_is_an_invalid_parameter() {
    let mut config = dual();
    config.cruise.specific_power_kw_per_kg = 0.0;
    let inputs = aircraft::from_config(&config).expect("inputs");
    assert!(matches!(
        size_aircraft(&inputs),
        Err(SizingError::InvalidParameter { parameter: "specific power", .. })
    ));
}

#[test]
fn non_positive_seed_is_rejected() {
    let inputs = aircraft::from_config(&dual()).expect("inputs");
    assert!(matches!(
        SizingLoop::new(&inputs).run_from(0.0),
        Err(SizingError::InvalidParameter { .. })
    ));
}

#[test]
fn blown_lift_sizes_a_smaller_wing() {
    let dual_report = size_aircraft(&aircraft::from_config(&dual()).unwrap()).unwrap();
    assert_relative_eq!(dual_report.lift_augmentation, 1.52, max_relative = 1e-12);

    let q_stall = dynamic_pressure_psf(RHO_SL_SLUG_FT3, 55.0 * 1.687_81);
    assert_relative_eq!(
        dual_report.wing_loading_psf(),
        q_stall * 2.0 * 1.52,
        max_relative = 1e-3
    );

    let single_report = size_aircraft(&aircraft::from_config(&single()).unwrap()).unwrap();
    assert_eq!(single_report.lift_augmentation, 1.0);
    assert_relative_eq!(single_report.wing_loading_psf(), q_stall * 2.0, max_relative = 1e-3);
}

#[test]
fn dual_sized_on_clean_lift_needs_a_larger_wing() {
    let mut config = dual();
    config.aero.use_blown_lift_for_wing_sizing = false;
    let inputs = aircraft::from_config(&config).expect("inputs");
    assert_eq!(inputs.lift_augmentation, 1.0);
    assert_eq!(inputs.cl_max_sizing, 2.0);

    let clean = size_aircraft(&inputs).expect("converged");
    let blown = size_aircraft(&aircraft::from_config(&dual()).unwrap()).unwrap();

    let q_stall = dynamic_pressure_psf(RHO_SL_SLUG_FT3, 55.0 * 1.687_81);
    assert_relative_eq!(clean.wing_loading_psf(), q_stall * 2.0, max_relative = 1e-3);
    assert_relative_eq!(
        blown.wing_loading_psf() / clean.wing_loading_psf(),
        1.52,
        max_relative = 2.5e-3
    );
    assert!(clean.state.wing_area_ft2 > 3.0 * blown.state.wing_area_ft2);
    assert!(clean.state.gross_weight_lb > blown.state.gross_weight_lb);
    assert_eq!(clean.weights.highlift_motors_lb, blown.weights.highlift_motors_lb);
}

#[test]
fn unpowered_highlift_set_is_still_carried_and_deployed() {
    let mut config = dual();
    if let Some(set) = config.highlift.as_mut() {
        set.power_per_unit_kw = 0.0;
    }
    let report = size_aircraft(&aircraft::from_config(&config).unwrap()).expect("converged");

    assert!(report.state.has_highlift);
    assert_eq!(report.state.highlift_power_kw, 0.0);
    assert_eq!(report.weights.highlift_motors_lb, 96.0);
    let takeoff = &report.mission.segments[0];
    assert!(takeoff.segment.highlift_active);
    assert_eq!(takeoff.power.highlift_kw, 0.0);
    assert_eq!(takeoff.highlift_cd, 0.015);
    let cruise = &report.mission.segments[2];
    assert_eq!(cruise.highlift_cd, 0.001);
    assert!(cruise.highlift_drag_lb > 0.0);
}

#[test]
fn conventional_baseline_burns_fuel_instead_of_carrying_batteries() {
    let inputs = aircraft::from_config(&conventional()).expect("inputs");
    assert_eq!(inputs.architecture, Architecture::Conventional);
    assert!(inputs.highlift.is_none());
    assert!(matches!(inputs.energy, EnergyStorage::Fuel(_)));
    assert_relative_eq!(inputs.seed_gross_weight_lb, 1_800.0 / 0.45, max_relative = 1e-12);

    let report = size_aircraft(&inputs).expect("converged");
    assert!(
        (2_950.0..3_150.0).contains(&report.state.gross_weight_lb),
        "gross weight {}",
        report.state.gross_weight_lb
    );
    assert_eq!(report.state.battery_mass_lb, 0.0);
    assert_eq!(report.weights.battery_lb, 0.0);
    assert_eq!(report.state.fuel_mass_lb, report.weights.fuel_lb);
    assert_eq!(report.weights.total_lb(), report.state.gross_weight_lb);
    assert_relative_eq!(
        report.weights.empty_weight_lb(),
        report.state.gross_weight_lb - report.weights.payload_lb - report.weights.fuel_lb,
        max_relative = 1e-12
    );

    let burned = report.mission.fuel_burned_lb;
    assert_relative_eq!(burned, report.mission.energy_kwh * 0.30 * 2.204_62, max_relative = 1e-9);
    assert_relative_eq!(report.state.fuel_mass_lb, burned * 1.2, max_relative = 1e-9);
    let takeoff_weight = report.mission.segments[0].gross_weight_lb;
    assert_relative_eq!(
        report.mission.final_weight_lb,
        takeoff_weight - burned,
        max_relative = 1e-9
    );
    assert_relative_eq!(
        takeoff_weight,
        report.state.gross_weight_lb,
        max_relative = inputs.convergence.epsilon
    );
}

#[test]
fn electrified_designs_outweigh_the_conventional_baseline() {
    let baseline = size_aircraft(&aircraft::from_config(&conventional()).unwrap()).unwrap();
    let dep = size_aircraft(&aircraft::from_config(&dual()).unwrap()).unwrap();
    let electric = size_aircraft(&aircraft::from_config(&single()).unwrap()).unwrap();

    assert!(baseline.state.gross_weight_lb < dep.state.gross_weight_lb);
    assert!(dep.state.gross_weight_lb < electric.state.gross_weight_lb);
    assert!(baseline.state.fuel_mass_lb < dep.state.battery_mass_lb);
    assert!(electric.state.wing_area_ft2 > baseline.state.wing_area_ft2);
}

#[test]
fn single_motor_baseline_converges_without_highlift() {
    let inputs = aircraft::from_config(&single()).expect("inputs");
    assert_eq!(inputs.architecture, Architecture::Single);
    assert!(inputs.highlift.is_none());

    let report = size_aircraft(&inputs).expect("converged");
    assert_eq!(report.weights.highlift_motors_lb, 0.0);
    assert_eq!(report.state.highlift_power_kw, 0.0);
    assert!(
        report
            .mission
            .segments
            .iter()
            .all(|s| !s.segment.highlift_active)
    );
    assert!(report.pree() > 0.0);
}

#[test]
fn explicit_seed_overrides_the_baseline_estimate() {
    let mut config = dual();
    config.weights.initial_gross_weight_lb = Some(9_000.0);
    assert_eq!(aircraft::seed_gross_weight_lb(&config), Ok(9_000.0));

    let report = size_aircraft(&aircraft::from_config(&config).unwrap()).unwrap();
    let baseline = size_aircraft(&aircraft::from_config(&dual()).unwrap()).unwrap();
    assert_relative_eq!(
        report.state.gross_weight_lb,
        baseline.state.gross_weight_lb,
        max_relative = 1.0e-2
    );
}

fn configuration_error(config: &AircraftConfig) -> ConfigurationError {
    match aircraft::from_config(config) {
        Err(SizingError::Configuration(err)) => err,
        other => panic!("expected configuration error, got {other:?}"),
    }
}

#[test]
fn dual_architecture_needs_a_highlift_set() {
    let mut config = dual();
    config.highlift = None;
    assert_eq!(configuration_error(&config), ConfigurationError::MissingHighliftSet);

    let mut config = single();
    config.highlift = dual().highlift;
    assert_eq!(configuration_error(&config), ConfigurationError::UnexpectedHighliftSet);

    let mut config = conventional();
    config.highlift = dual().highlift;
    assert_eq!(configuration_error(&config), ConfigurationError::UnexpectedHighliftSet);
}

#[test]
fn each_architecture_needs_its_energy_store() {
    let mut config = conventional();
    config.fuel = None;
    assert_eq!(configuration_error(&config), ConfigurationError::MissingFuelSystem);

    let mut config = dual();
    config.battery = None;
    assert_eq!(configuration_error(&config), ConfigurationError::MissingBattery);
}

#[test]
fn active_phases_must_match_the_activation_policy() {
    let mut config = dual();
    if let Some(set) = config.highlift.as_mut() {
        set.active_phases = Some(vec!["takeoff".into(), "cruise".into()]);
    }
    match configuration_error(&config) {
        ConfigurationError::ActivePhasesMismatch {
            role,
            expected,
            found,
        } => {
            assert_eq!(role, MotorRole::HighLift);
            assert_eq!(expected, [Phase::Takeoff, Phase::Climb, Phase::Landing]);
            assert_eq!(found, [Phase::Takeoff, Phase::Cruise]);
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn mission_schedule_errors_are_configuration_errors() {
    let mut config = dual();
    config.mission.segments.push(SegmentConfig {
        phase: "hover".into(),
        duration_s: Some(30.0),
    });
    assert!(matches!(
        configuration_error(&config),
        ConfigurationError::UnknownPhase(_)
    ));

    let mut config = dual();
    config.mission.segments[4].duration_s = None;
    assert_eq!(
        configuration_error(&config),
        ConfigurationError::MissingDuration(Phase::Loiter)
    );

    let mut config = dual();
    config.mission.segments.clear();
    assert_eq!(configuration_error(&config), ConfigurationError::EmptyMission);
}

#[test]
fn malformed_segment_surfaces_as_mission_error() {
    let mut config = dual();
    config.mission.segments[1].duration_s = Some(0.0);
    let inputs = aircraft::from_config(&config).expect("inputs");
    assert!(matches!(
        size_aircraft(&inputs),
        Err(SizingError::Mission(
            dep_sizer::sizing::MissionError::InvalidSegment { index: 1, .. }
        ))
    ));
}

#[test]
fn catalog_selection_by_name() {
    let catalog = vec![dual(), single()];
    let picked = aircraft::select(&catalog, Some("single-motor electric baseline")).unwrap();
    assert_eq!(picked.architecture, Architecture::Single);
    assert!(matches!(
        aircraft::select(&catalog, Some("glider")),
        Err(SizingError::Configuration(ConfigurationError::NotFound(_)))
    ));
    assert!(matches!(
        aircraft::select(&[], None),
        Err(SizingError::Configuration(ConfigurationError::EmptyCatalog))
    ));

    let first = aircraft::select_config(&catalog, None).expect("first entry");
    assert_eq!(first.name, "Dual-motor DEP eSTOL");
    assert_eq!(
        aircraft::select_config(&catalog, Some("GLIDER")).unwrap_err(),
        ConfigurationError::NotFound("GLIDER".into())
    );
}
