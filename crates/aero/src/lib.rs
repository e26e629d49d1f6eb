//! Low-order aerodynamics for DEP sizing: drag polar, folded-motor drag, blown-lift wing sizing.

use dep_core::constants::RHO_SL_SLUG_FT3;
use dep_core::isa::dynamic_pressure_psf;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum AeroError {
    #[error("non-physical {parameter}: {value}")]
    InvalidParameter { parameter: &'static str, value: f64 },
    #[error("blown span fraction {0} outside [0, 1]")]
    BlownSpanFraction(f64),
}

/// Drag-coefficient states of the high-lift motor set, referenced to wing area.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FoldedDragModel {
    pub cd_deployed: f64,
    pub cd_folded: f64,
}

impl Default for FoldedDragModel {
    fn default() -> Self {
        Self {
            cd_deployed: 0.015,
            cd_folded: 0.001,
        }
    }
}

impl FoldedDragModel {
    pub fn new(cd_deployed: f64, cd_folded: f64) -> Result<Self, AeroError> {
        non_negative("deployed drag coefficient", cd_deployed)?;
        non_negative("folded drag coefficient", cd_folded)?;
        Ok(Self {
            cd_deployed,
            cd_folded,
        })
    }

    /// Drag coefficient contributed by the high-lift set in the given state.
    pub fn drag_coefficient(&self, deployed: bool) -> f64 {
        if deployed {
            self.cd_deployed
        } else {
            self.cd_folded
        }
    }

    /// Drag (lb) contributed by the high-lift set at dynamic pressure `q_psf` on `reference_area_ft2`.
    pub fn folded_drag_increment(
        &self,
        deployed: bool,
        q_psf: f64,
        reference_area_ft2: f64,
    ) -> Result<f64, AeroError> {
        non_negative("dynamic pressure", q_psf)?;
        positive("reference area", reference_area_ft2)?;
        Ok(self.drag_coefficient(deployed) * q_psf * reference_area_ft2)
    }

    /// Drag (lb) saved by folding instead of leaving the set deployed.
    pub fn drag_savings_lb(&self, q_psf: f64, reference_area_ft2: f64) -> Result<f64, AeroError> {
        non_negative("dynamic pressure", q_psf)?;
        positive("reference area", reference_area_ft2)?;
        Ok((self.cd_deployed - self.cd_folded) * q_psf * reference_area_ft2)
    }
}

/// Parabolic drag polar `CD = CD0 + k·CL²`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragPolar {
    pub cd0: f64,
    pub k: f64,
}

impl DragPolar {
    /// Build the polar from wing geometry, `k = 1 / (π·AR·e)`.
    pub fn from_wing(cd0: f64, aspect_ratio: f64, oswald_efficiency: f64) -> Result<Self, AeroError> {
        non_negative("zero-lift drag coefficient", cd0)?;
        positive("aspect ratio", aspect_ratio)?;
        positive("Oswald efficiency", oswald_efficiency)?;
        Ok(Self {
            cd0,
            k: 1.0 / (std::f64::consts::PI * aspect_ratio * oswald_efficiency),
        })
    }

    pub fn drag_coefficient(&self, cl: f64, extra_cd: f64) -> f64 {
        self.cd0 + extra_cd + self.k * cl * cl
    }

    /// Level-flight drag (lb) at weight `weight_lb` on wing area `wing_area_ft2`.
    ///
    /// `extra_cd` carries parasite increments such as the high-lift nacelles.
    pub fn level_flight_drag_lb(
        &self,
        weight_lb: f64,
        wing_area_ft2: f64,
        q_psf: f64,
        extra_cd: f64,
    ) -> Result<f64, AeroError> {
        positive("wing area", wing_area_ft2)?;
        positive("dynamic pressure", q_psf)?;
        let cl = weight_lb / (q_psf * wing_area_ft2);
        Ok(q_psf * wing_area_ft2 * self.drag_coefficient(cl, extra_cd))
    }
}

/// Lift augmentation from propeller blowing over `blown_span_fraction` of the span.
pub fn lift_augmentation(augmentation_max: f64, blown_span_fraction: f64) -> Result<f64, AeroError> {
    if !(0.0..=1.0).contains(&blown_span_fraction) {
        return Err(AeroError::BlownSpanFraction(blown_span_fraction));
    }
    if augmentation_max < 1.0 || !augmentation_max.is_finite() {
        return Err(AeroError::InvalidParameter {
            parameter: "maximum lift augmentation",
            value: augmentation_max,
        });
    }
    Ok(1.0 + (augmentation_max - 1.0) * blown_span_fraction)
}

/// Maximum lift coefficient with blowing applied.
pub fn effective_cl_max(cl_max_clean: f64, augmentation: f64) -> f64 {
    cl_max_clean * augmentation
}

/// Wing area (ft²) that holds `gross_weight_lb` at sea-level stall speed with `cl_max`.
pub fn wing_area_for_stall(
    gross_weight_lb: f64,
    stall_speed_fps: f64,
    cl_max: f64,
) -> Result<f64, AeroError> {
    positive("stall speed", stall_speed_fps)?;
    positive("maximum lift coefficient", cl_max)?;
    let q_stall = dynamic_pressure_psf(RHO_SL_SLUG_FT3, stall_speed_fps);
    Ok(gross_weight_lb / (q_stall * cl_max))
}

fn positive(parameter: &'static str, value: f64) -> Result<(), AeroError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(AeroError::InvalidParameter { parameter, value })
    }
}

fn non_negative(parameter: &'static str, value: f64) -> Result<(), AeroError> {
    if value >= 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(AeroError::InvalidParameter { parameter, value })
    }
}
