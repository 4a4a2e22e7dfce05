//! Simulation driver.
//!
//! `Simulation` owns a `World` and an `ActionRegistry` and advances them one
//! tick at a time. See `tick` for the phase breakdown.

pub mod tick;

pub use tick::{Simulation, SimulationStatus, TickPhase, TickReport};
