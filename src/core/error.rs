//! Error types.
//!
//! Configuration and programming errors are reported through `WorldError`.
//! Policy misbehavior is not an error: the orchestrator skips the action and
//! logs a warning. An extinct world is a normal end state, not an error.

use thiserror::Error;

use super::entity::CharacterId;
use crate::actions::ActionKindId;

#[derive(Error, Debug)]
pub enum WorldError {
    #[error("Grid dimensions must be positive, got {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },

    #[error("Grid of {width}x{height} tiles exceeds the tile id space")]
    GridTooLarge { width: usize, height: usize },

    #[error("Expected one weight per tile prototype, got {prototypes} prototypes and {weights} weights")]
    PrototypeWeightMismatch { prototypes: usize, weights: usize },

    #[error("At least one tile prototype is required")]
    NoPrototypes,

    #[error("Prototype weights must be finite, non-negative and not all zero")]
    InvalidWeights,

    #[error("Invalid resource economy: {0}")]
    InvalidEconomy(String),

    #[error("Invalid character traits: {0}")]
    InvalidTraits(String),

    #[error("Tick duration must be finite and non-negative, got {0}")]
    InvalidTickDuration(f64),

    #[error("Coordinate ({x}, {y}) is outside the grid")]
    CoordOutOfBounds { x: usize, y: usize },

    #[error("Character not found: {0}")]
    CharacterNotFound(CharacterId),

    #[error("Action kind {0} is not registered")]
    UnregisteredAction(ActionKindId),

    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Snapshot encoding error: {0}")]
    Encode(#[from] bincode::Error),
}

pub type Result<T> = std::result::Result<T, WorldError>;
