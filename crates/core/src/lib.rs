//! Core units, constants, and shared primitives for the DEP sizing workspace.
//!
//! The sizing engine works in US customary units (lb, ft, slug, kts) for
//! weights and aerodynamics, and in kW / kWh for the electrical side.

/// Physical constants and conversion factors.
pub mod constants {
    /// Standard gravity at Earth's surface (m/s²).
    pub const G0: f64 = 9.80665;
    /// Pounds per kilogram.
    pub const LB_PER_KG: f64 = 2.204_62;
    /// Kilowatts per mechanical horsepower.
    pub const KW_PER_HP: f64 = 0.745_7;
    /// ft·lbf/s per horsepower.
    pub const FT_LBF_S_PER_HP: f64 = 550.0;
    /// Feet per nautical mile.
    pub const FT_PER_NM: f64 = 6_076.12;
    /// Metres per nautical mile.
    pub const M_PER_NM: f64 = 1_852.0;
    /// Feet per second per knot.
    pub const FPS_PER_KT: f64 = 1.687_81;
    /// Sea-level ISA density (slug/ft³).
    pub const RHO_SL_SLUG_FT3: f64 = 0.002_377;
    /// Seconds per hour.
    pub const SECONDS_PER_HOUR: f64 = 3_600.0;
}

/// Basic unit conversion helpers.
pub mod units {
    use super::constants::{FPS_PER_KT, FT_LBF_S_PER_HP, FT_PER_NM, KW_PER_HP, LB_PER_KG};

    /// Convert kilograms to pounds.
    #[inline]
    pub fn kg_to_lb(v: f64) -> f64 {
        v * LB_PER_KG
    }

    /// Convert pounds to kilograms.
    #[inline]
    pub fn lb_to_kg(v: f64) -> f64 {
        v / LB_PER_KG
    }

    /// Convert knots to feet per second.
    #[inline]
    pub fn kts_to_fps(v: f64) -> f64 {
        v * FPS_PER_KT
    }

    /// Convert nautical miles to feet.
    #[inline]
    pub fn nm_to_ft(v: f64) -> f64 {
        v * FT_PER_NM
    }

    /// Convert horsepower to kilowatts.
    #[inline]
    pub fn hp_to_kw(v: f64) -> f64 {
        v * KW_PER_HP
    }

    /// Shaft power (kW) needed to deliver `thrust_lb` at `speed_fps` through a propeller.
    #[inline]
    pub fn thrust_power_kw(thrust_lb: f64, speed_fps: f64, propeller_efficiency: f64) -> f64 {
        hp_to_kw(thrust_lb * speed_fps / (FT_LBF_S_PER_HP * propeller_efficiency))
    }

    /// Convert a battery specific energy in Wh/kg to kWh per pound.
    #[inline]
    pub fn wh_per_kg_to_kwh_per_lb(v: f64) -> f64 {
        v / 1_000.0 / LB_PER_KG
    }

    /// Convert a motor specific power in kW/kg to kW per pound.
    #[inline]
    pub fn kw_per_kg_to_kw_per_lb(v: f64) -> f64 {
        v / LB_PER_KG
    }
}

/// Energy bookkeeping shared by the simulator and the sizing loop.
pub mod energy {
    use super::constants::SECONDS_PER_HOUR;

    /// Energy (kWh) drawn at constant `power_kw` over `duration_s`.
    #[inline]
    pub fn kwh(power_kw: f64, duration_s: f64) -> f64 {
        power_kw * duration_s / SECONDS_PER_HOUR
    }
}

/// International Standard Atmosphere, troposphere only.
pub mod isa {
    use super::constants::RHO_SL_SLUG_FT3;

    const LAPSE_FACTOR_PER_FT: f64 = 6.875_59e-6;
    const DENSITY_EXPONENT: f64 = 4.255_9;
    /// Tropopause altitude; the model is clamped above it.
    pub const TROPOPAUSE_FT: f64 = 36_089.0;

    /// Density ratio σ = ρ/ρ_SL at the given geopotential altitude.
    pub fn density_ratio(altitude_ft: f64) -> f64 {
        let h = altitude_ft.clamp(0.0, TROPOPAUSE_FT);
        (1.0 - LAPSE_FACTOR_PER_FT * h).powf(DENSITY_EXPONENT)
    }

    /// Air density (slug/ft³) at the given altitude.
    pub fn density_slug_ft3(altitude_ft: f64) -> f64 {
        RHO_SL_SLUG_FT3 * density_ratio(altitude_ft)
    }

    /// Dynamic pressure (lb/ft²) for density `rho` (slug/ft³) and speed `v_fps`.
    #[inline]
    pub fn dynamic_pressure_psf(rho_slug_ft3: f64, v_fps: f64) -> f64 {
        0.5 * rho_slug_ft3 * v_fps * v_fps
    }
}
