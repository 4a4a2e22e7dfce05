//! Core engine types: entity ids, RNG, configuration, errors.
//!
//! These are the leaf building blocks every other module depends on.

pub mod config;
pub mod entity;
pub mod error;
pub mod rng;

pub use config::{TilePrototype, WorldConfig};
pub use entity::{CharacterId, Element, EntityKind, EntityRef, TileId};
pub use error::{Result, WorldError};
pub use rng::WorldRng;
