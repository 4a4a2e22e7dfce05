//! # rust-gridworld
//!
//! A discrete-time agent simulation on a wrapping 2D grid of resource tiles.
//!
//! ## Design Principles
//!
//! 1. **Arena + Ids**: The world owns every tile and character. Everything
//!    else (neighbor lists, indices, action descriptors) refers to entities
//!    by `TileId` / `CharacterId`.
//!
//! 2. **Pluggable Policies**: Characters delegate decisions to an `Actor`.
//!    The engine never inspects how a policy chooses.
//!
//! 3. **Explicit Action Registry**: Action kinds map to executors in an
//!    `ActionRegistry` the caller builds. No global state.
//!
//! 4. **Deterministic**: Grid generation is seeded (ChaCha8) and characters
//!    act in ascending id order, so equal inputs give equal runs.
//!
//! ## Modules
//!
//! - `core`: Entity ids, RNG, configuration, errors
//! - `grid`: Tiles, resource economies, toroidal topology
//! - `characters`: Character traits and the energy/health economy
//! - `actions`: Action descriptors, built-in executors, the registry
//! - `actor`: Decision-policy trait and baseline policies
//! - `world`: World state, occupancy index, feature snapshots
//! - `engine`: The tick orchestrator

pub mod actions;
pub mod actor;
pub mod characters;
pub mod core;
pub mod engine;
pub mod grid;
pub mod world;

// Re-export commonly used types
pub use crate::core::{
    CharacterId, Element, EntityKind, EntityRef, Result, TileId, TilePrototype, WorldConfig,
    WorldError, WorldRng,
};

pub use crate::grid::{Coord, Direction, Grid, ResourceEconomy, Tile};

pub use crate::characters::{CandidateActions, Character, CharacterTraits};

pub use crate::actions::{ActionContext, ActionDescriptor, ActionKindId, ActionOutcome, ActionRegistry};

pub use crate::actor::{Actor, FnActor, ForagerActor, PreferKindActor, RandomActor};

pub use crate::world::{FeatureBlock, OccupancyIndex, ResourceView, World, WorldSnapshot};

pub use crate::engine::{Simulation, SimulationStatus, TickPhase, TickReport};
