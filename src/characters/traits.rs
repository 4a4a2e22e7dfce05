//! Character traits: the health/energy numbers a character lives by.

use serde::{Deserialize, Serialize};

use crate::core::error::{Result, WorldError};

/// Health and energy parameters of a character.
///
/// Invariant while the character is alive: `0 <= health <= max_health` and
/// `energy_on_hand >= 0`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CharacterTraits {
    pub health: f64,
    pub max_health: f64,
    /// Health regained per unit of time while the character has energy.
    pub health_regen_rate: f64,
    pub energy_on_hand: f64,
    /// Energy burned per unit of time.
    pub energy_burn_rate: f64,
}

impl CharacterTraits {
    /// Create traits with the given health; rates and energy start at zero.
    #[must_use]
    pub fn new(health: f64, max_health: f64) -> Self {
        Self {
            health,
            max_health,
            health_regen_rate: 0.0,
            energy_on_hand: 0.0,
            energy_burn_rate: 0.0,
        }
    }

    #[must_use]
    pub fn with_regen_rate(mut self, rate: f64) -> Self {
        self.health_regen_rate = rate;
        self
    }

    #[must_use]
    pub fn with_energy(mut self, energy: f64) -> Self {
        self.energy_on_hand = energy;
        self
    }

    #[must_use]
    pub fn with_burn_rate(mut self, rate: f64) -> Self {
        self.energy_burn_rate = rate;
        self
    }

    /// Check the invariant and that the rates are non-negative.
    pub fn validate(&self) -> Result<()> {
        let values = [
            self.health,
            self.max_health,
            self.health_regen_rate,
            self.energy_on_hand,
            self.energy_burn_rate,
        ];
        if values.iter().any(|v| !v.is_finite()) {
            return Err(WorldError::InvalidTraits("values must be finite".to_string()));
        }
        if self.health < 0.0 || self.health > self.max_health {
            return Err(WorldError::InvalidTraits(format!(
                "health must lie in [0, max_health], got {} with max {}",
                self.health, self.max_health
            )));
        }
        if self.energy_on_hand < 0.0 {
            return Err(WorldError::InvalidTraits("energy_on_hand must be non-negative".to_string()));
        }
        if self.health_regen_rate < 0.0 || self.energy_burn_rate < 0.0 {
            return Err(WorldError::InvalidTraits("rates must be non-negative".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let traits = CharacterTraits::new(90.0, 100.0)
            .with_regen_rate(5.0)
            .with_energy(12.0)
            .with_burn_rate(3.0);
        assert_eq!(traits.health, 90.0);
        assert_eq!(traits.max_health, 100.0);
        assert_eq!(traits.health_regen_rate, 5.0);
        assert_eq!(traits.energy_on_hand, 12.0);
        assert_eq!(traits.energy_burn_rate, 3.0);
        assert!(traits.validate().is_ok());
    }

    #[test]
    fn test_validate() {
        assert!(CharacterTraits::new(101.0, 100.0).validate().is_err());
        assert!(CharacterTraits::new(-1.0, 100.0).validate().is_err());
        assert!(CharacterTraits::new(10.0, 100.0).with_energy(-1.0).validate().is_err());
        assert!(CharacterTraits::new(10.0, 100.0).with_burn_rate(-1.0).validate().is_err());
        assert!(CharacterTraits::new(f64::INFINITY, f64::INFINITY).validate().is_err());
        assert!(CharacterTraits::new(0.0, 0.0).validate().is_ok());
    }
}
