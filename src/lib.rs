//! Mission-energy simulation and weight-cascade sizing for dual-motor DEP aircraft.
//!
//! The numerical engine lives in the member crates; this library re-exports
//! them under one roof so the CLI and integration tests share a single entry
//! point, and adds sweep plans plus result-to-export conversion on top.

pub mod report;
pub mod scenario;

pub use dep_aero as aero;
pub use dep_config as config;
pub use dep_core as physics;
pub use dep_export as export;
pub use dep_propulsion as propulsion;
pub use dep_sizing as sizing;

/// Returns the version of the library for smoke tests.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
