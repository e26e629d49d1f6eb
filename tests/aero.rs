use approx::assert_relative_eq;
use dep_sizer::aero::{
    AeroError, DragPolar, FoldedDragModel, effective_cl_max, lift_augmentation,
    wing_area_for_stall,
};
use dep_sizer::physics::isa::{density_ratio, density_slug_ft3, dynamic_pressure_psf};
use dep_sizer::physics::units::kts_to_fps;

#[test]
fn folded_drag_uses_the_state_coefficient() {
    let model = FoldedDragModel::default();
    let deployed = model.folded_drag_increment(true, 50.0, 200.0).unwrap();
    let folded = model.folded_drag_increment(false, 50.0, 200.0).unwrap();
    assert_relative_eq!(deployed, 0.015 * 50.0 * 200.0, max_relative = 1e-12);
    assert_relative_eq!(folded, 0.001 * 50.0 * 200.0, max_relative = 1e-12);
}

#[test]
fn drag_savings_is_the_coefficient_difference() {
    let model = FoldedDragModel::new(0.02, 0.002).unwrap();
    let savings = model.drag_savings_lb(40.0, 150.0).unwrap();
    assert_relative_eq!(savings, 0.018 * 40.0 * 150.0, max_relative = 1e-12);
    let deployed = model.folded_drag_increment(true, 40.0, 150.0).unwrap();
    let folded = model.folded_drag_increment(false, 40.0, 150.0).unwrap();
    assert_relative_eq!(deployed - folded, savings, max_relative = 1e-12);
}

#[test]
fn folded_drag_rejects_non_physical_inputs() {
    let model = FoldedDragModel::default();
    assert!(matches!(
        model.folded_drag_increment(true, 50.0, 0.0),
        Err(AeroError::InvalidParameter { parameter: "reference area", .. })
    ));
    assert!(FoldedDragModel::new(-0.01, 0.001).is_err());
}

#[test]
fn drag_polar_from_wing_geometry() {
    let polar = DragPolar::from_wing(0.028, 9.0, 0.8).unwrap();
    assert_relative_eq!(polar.k, 1.0 / (std::f64::consts::PI * 7.2), max_relative = 1e-12);
    assert_relative_eq!(
        polar.drag_coefficient(0.5, 0.001),
        0.029 + polar.k * 0.25,
        max_relative = 1e-12
    );

    let drag = polar.level_flight_drag_lb(5_000.0, 200.0, 50.0, 0.0).unwrap();
    let cl = 5_000.0 / (50.0 * 200.0);
    assert_relative_eq!(drag, 50.0 * 200.0 * (0.028 + polar.k * cl * cl), max_relative = 1e-12);
}

#[test]
fn blown_lift_augmentation() {
    assert_relative_eq!(lift_augmentation(1.8, 0.65).unwrap(), 1.52, max_relative = 1e-12);
    assert_eq!(lift_augmentation(1.8, 0.0).unwrap(), 1.0);
    assert_eq!(
        lift_augmentation(1.8, 1.2),
        Err(AeroError::BlownSpanFraction(1.2))
    );
    assert_relative_eq!(effective_cl_max(2.0, 1.52), 3.04, max_relative = 1e-12);
}

#[test]
fn wing_area_holds_weight_at_stall() {
    let v_stall = kts_to_fps(55.0);
    let area = wing_area_for_stall(6_000.0, v_stall, 3.04).unwrap();
    let lift = dynamic_pressure_psf(0.002_377, v_stall) * area * 3.04;
    assert_relative_eq!(lift, 6_000.0, max_relative = 1e-12);
    assert!(wing_area_for_stall(6_000.0, v_stall, 0.0).is_err());
}

#[test]
fn isa_density_falls_with_altitude() {
    assert_eq!(density_ratio(0.0), 1.0);
    assert_relative_eq!(density_ratio(5_000.0), 0.8617, max_relative = 1e-3);
    assert!(density_slug_ft3(10_000.0) < density_slug_ft3(5_000.0));
    assert_eq!(density_ratio(50_000.0), density_ratio(36_089.0));
}
