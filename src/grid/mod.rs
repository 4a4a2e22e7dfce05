//! Grid topology and the per-tile resource economy.
//!
//! ## Key Types
//!
//! - `ResourceEconomy`: bounded, linearly regenerating quantity
//! - `Tile`: an economy plus four wrap-around neighbors
//! - `Grid`: the tile arena, generation, and coordinate lookup

pub mod resources;
pub mod tile;
pub mod topology;

pub use resources::ResourceEconomy;
pub use tile::{Direction, Tile};
pub use topology::{Coord, Grid};
