//! Sizing façade crate consolidating mission simulation, the weight-cascade loop and scenario sweeps.

pub mod cascade;
pub mod mission;
pub mod state;
pub mod sweep;

pub use dep_aero as aero;
pub use dep_propulsion as propulsion;
pub use facade::*;

mod facade;
