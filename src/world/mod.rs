//! World state and its derived indices.
//!
//! ## Key Types
//!
//! - `World`: owns the grid and the character registry
//! - `OccupancyIndex`: character <-> tile placement
//! - `WorldSnapshot`, `FeatureBlock`: flat feature export
//! - `ResourceView`: read-only tile resources for scripted policies

pub mod occupancy;
pub mod snapshot;
pub mod state;
pub mod view;

pub use occupancy::OccupancyIndex;
pub use snapshot::{character_features, tile_features, FeatureBlock, WorldSnapshot};
pub use state::World;
pub use view::ResourceView;
