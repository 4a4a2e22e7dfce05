//! World configuration.
//!
//! Every key has a documented default, so a partial (or empty) configuration
//! is valid input. Validation happens once, before the grid is generated.
//!
//! ## Defaults
//!
//! | key | default |
//! |---|---|
//! | `width` | 10 |
//! | `height` | 10 |
//! | `random_seed` | 0 |
//! | `tick_duration` | 1.0 |
//! | `prototypes` | one "grain" tile: current 200, regen 10, max 200, weight 1.0 |
//!
//! ```
//! use rust_gridworld::core::WorldConfig;
//!
//! let config = WorldConfig::from_toml_str("width = 4\nrandom_seed = 9").unwrap();
//! assert_eq!(config.width, 4);
//! assert_eq!(config.height, 10);
//! assert_eq!(config.random_seed, 9);
//! ```

use serde::{Deserialize, Serialize};

use super::error::{Result, WorldError};
use crate::grid::ResourceEconomy;

/// A tile template: the resource economy each generated tile starts with,
/// and the relative weight with which it is drawn.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TilePrototype {
    /// Human-readable name (for debugging/display).
    #[serde(default)]
    pub name: String,

    /// Initial resource quantity.
    pub current: f64,

    /// Resource regenerated per unit of time.
    pub regen_per_tick: f64,

    /// Upper bound on the resource quantity.
    pub max: f64,

    /// Relative draw weight.
    #[serde(default = "default_weight")]
    pub weight: f64,
}

fn default_weight() -> f64 {
    1.0
}

impl TilePrototype {
    /// Create a prototype with weight 1.0.
    pub fn new(name: impl Into<String>, current: f64, regen_per_tick: f64, max: f64) -> Self {
        Self {
            name: name.into(),
            current,
            regen_per_tick,
            max,
            weight: 1.0,
        }
    }

    /// Set the draw weight.
    #[must_use]
    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    /// Build (and validate) the economy a fresh tile starts with.
    pub fn economy(&self) -> Result<ResourceEconomy> {
        ResourceEconomy::new(self.current, self.regen_per_tick, self.max)
    }
}

impl Default for TilePrototype {
    fn default() -> Self {
        Self::new("grain", 200.0, 10.0, 200.0)
    }
}

/// Complete world configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Grid width in tiles.
    pub width: usize,

    /// Grid height in tiles.
    pub height: usize,

    /// Seed for grid generation and seeded policies.
    pub random_seed: u64,

    /// Logical duration of one tick (`dt`).
    pub tick_duration: f64,

    /// Tile prototypes to draw from.
    pub prototypes: Vec<TilePrototype>,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: 10,
            height: 10,
            random_seed: 0,
            tick_duration: 1.0,
            prototypes: vec![TilePrototype::default()],
        }
    }
}

impl WorldConfig {
    /// Parse a configuration from TOML. Missing keys take their defaults.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        Ok(toml::from_str(source)?)
    }

    /// Set grid dimensions.
    #[must_use]
    pub fn with_size(mut self, width: usize, height: usize) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set the random seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.random_seed = seed;
        self
    }

    /// Set the tick duration.
    #[must_use]
    pub fn with_tick_duration(mut self, dt: f64) -> Self {
        self.tick_duration = dt;
        self
    }

    /// Replace the prototype list with a single prototype.
    #[must_use]
    pub fn with_prototype(mut self, prototype: TilePrototype) -> Self {
        self.prototypes = vec![prototype];
        self
    }

    /// Append a prototype.
    #[must_use]
    pub fn add_prototype(mut self, prototype: TilePrototype) -> Self {
        self.prototypes.push(prototype);
        self
    }

    /// Prototype weights, in prototype order.
    #[must_use]
    pub fn weights(&self) -> Vec<f64> {
        self.prototypes.iter().map(|p| p.weight).collect()
    }

    /// Check everything grid generation and ticking rely on.
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(WorldError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        if !self.tick_duration.is_finite() || self.tick_duration < 0.0 {
            return Err(WorldError::InvalidTickDuration(self.tick_duration));
        }
        if self.prototypes.is_empty() {
            return Err(WorldError::NoPrototypes);
        }
        for prototype in &self.prototypes {
            prototype.economy()?;
        }
        let weights = self.weights();
        if weights.iter().any(|w| !w.is_finite() || *w < 0.0) || weights.iter().sum::<f64>() <= 0.0 {
            return Err(WorldError::InvalidWeights);
        }
        Ok(())
    }
}
