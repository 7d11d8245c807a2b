//! Invariant-mass reconstruction for two-particle kinematic records.

pub mod mass;
pub mod stats;

pub use mass::{MassResult, MassStats, PhysicsError, invariant_mass, reconstruct};
