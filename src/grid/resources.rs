//! Per-tile resource economy.
//!
//! A bounded quantity that regenerates linearly. Invariant:
//! `0 <= current <= max` and `regen_per_tick >= 0`, established by `new` and
//! preserved by `tick` and `harvest`.

use serde::{Deserialize, Serialize};

use crate::core::error::{Result, WorldError};

/// Bounded, linearly regenerating resource quantity.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ResourceEconomy {
    current: f64,
    regen_per_tick: f64,
    max: f64,
}

impl ResourceEconomy {
    /// Create an economy, rejecting values that break the invariant.
    ///
    /// ```
    /// use rust_gridworld::grid::ResourceEconomy;
    ///
    /// let mut economy = ResourceEconomy::new(0.0, 10.0, 25.0).unwrap();
    /// economy.tick(1.0);
    /// economy.tick(2.0);
    /// assert_eq!(economy.current(), 25.0);
    /// assert_eq!(economy.harvest(), 25.0);
    /// assert_eq!(economy.current(), 0.0);
    ///
    /// assert!(ResourceEconomy::new(30.0, 1.0, 25.0).is_err());
    /// ```
    pub fn new(current: f64, regen_per_tick: f64, max: f64) -> Result<Self> {
        if ![current, regen_per_tick, max].iter().all(|v| v.is_finite()) {
            return Err(WorldError::InvalidEconomy("values must be finite".to_string()));
        }
        if regen_per_tick < 0.0 {
            return Err(WorldError::InvalidEconomy(format!(
                "regen_per_tick must be non-negative, got {regen_per_tick}"
            )));
        }
        if current < 0.0 || current > max {
            return Err(WorldError::InvalidEconomy(format!(
                "current must lie in [0, max], got {current} with max {max}"
            )));
        }
        Ok(Self {
            current,
            regen_per_tick,
            max,
        })
    }

    #[must_use]
    pub fn current(&self) -> f64 {
        self.current
    }

    #[must_use]
    pub fn regen_per_tick(&self) -> f64 {
        self.regen_per_tick
    }

    #[must_use]
    pub fn max(&self) -> f64 {
        self.max
    }

    /// Regenerate for `dt` units of time, capped at `max`.
    pub fn tick(&mut self, dt: f64) {
        let gain = (self.regen_per_tick * dt).max(0.0);
        self.current = (self.current + gain).min(self.max);
    }

    /// Take everything. Returns the pre-harvest quantity and leaves zero.
    pub fn harvest(&mut self) -> f64 {
        std::mem::replace(&mut self.current, 0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_regen_is_linear_until_capped() {
        let mut economy = ResourceEconomy::new(0.0, 10.0, 100.0).unwrap();
        economy.tick(1.0);
        assert_eq!(economy.current(), 10.0);
        economy.tick(2.5);
        assert_eq!(economy.current(), 35.0);
        economy.tick(100.0);
        assert_eq!(economy.current(), 100.0);
    }

    #[test]
    fn test_zero_regen_and_zero_dt() {
        let mut static_tile = ResourceEconomy::new(5.0, 0.0, 10.0).unwrap();
        static_tile.tick(10.0);
        assert_eq!(static_tile.current(), 5.0);

        let mut paused = ResourceEconomy::new(5.0, 3.0, 10.0).unwrap();
        paused.tick(0.0);
        assert_eq!(paused.current(), 5.0);
    }

    #[test]
    fn test_harvest_returns_everything() {
        let mut economy = ResourceEconomy::new(50.0, 1.0, 100.0).unwrap();
        assert_eq!(economy.harvest(), 50.0);
        assert_eq!(economy.current(), 0.0);
        assert_eq!(economy.harvest(), 0.0);
    }

    #[test]
    fn test_rejects_invalid_values() {
        assert!(ResourceEconomy::new(-1.0, 1.0, 10.0).is_err());
        assert!(ResourceEconomy::new(11.0, 1.0, 10.0).is_err());
        assert!(ResourceEconomy::new(1.0, -1.0, 10.0).is_err());
        assert!(ResourceEconomy::new(f64::NAN, 1.0, 10.0).is_err());
        assert!(ResourceEconomy::new(0.0, 0.0, 0.0).is_ok());
    }

    #[test]
    fn test_serialization() {
        let economy = ResourceEconomy::new(3.0, 1.0, 9.0).unwrap();
        let json = serde_json::to_string(&economy).unwrap();
        let deserialized: ResourceEconomy = serde_json::from_str(&json).unwrap();
        assert_eq!(economy, deserialized);
    }
}
