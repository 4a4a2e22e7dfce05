//! Tiles: a resource economy plus four fixed neighbors.

use serde::{Deserialize, Serialize};

use super::resources::ResourceEconomy;
use crate::core::entity::{Element, EntityKind, TileId};

/// Cardinal direction of a neighbor. The discriminant is the slot index in
/// `Tile::neighbors`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// x - 1
    West = 0,
    /// x + 1
    East = 1,
    /// y - 1
    North = 2,
    /// y + 1
    South = 3,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::West,
        Direction::East,
        Direction::North,
        Direction::South,
    ];

    /// The direction pointing back.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Direction::West => Direction::East,
            Direction::East => Direction::West,
            Direction::North => Direction::South,
            Direction::South => Direction::North,
        }
    }
}

/// A grid cell.
///
/// Adjacency is assigned once by `Grid::generate` and never changes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Tile {
    id: TileId,
    neighbors: [TileId; 4],
    /// Resource state. Mutated by regeneration and harvesting.
    pub economy: ResourceEconomy,
}

impl Tile {
    /// Feature vector layout: kind, id, 4 neighbor ids, current, regen, max.
    pub const FEATURES: usize = 9;

    pub(crate) fn new(id: TileId, economy: ResourceEconomy) -> Self {
        Self {
            id,
            neighbors: [id; 4],
            economy,
        }
    }

    pub(crate) fn set_neighbors(&mut self, neighbors: [TileId; 4]) {
        self.neighbors = neighbors;
    }

    #[must_use]
    pub fn id(&self) -> TileId {
        self.id
    }

    /// Neighbors in `Direction` order.
    #[must_use]
    pub fn neighbors(&self) -> &[TileId; 4] {
        &self.neighbors
    }

    #[must_use]
    pub fn neighbor(&self, direction: Direction) -> TileId {
        self.neighbors[direction as usize]
    }

    #[must_use]
    pub fn is_adjacent(&self, other: TileId) -> bool {
        self.neighbors.contains(&other)
    }
}

impl Element for Tile {
    const FEATURE_SIZE: usize = Tile::FEATURES;

    fn kind(&self) -> EntityKind {
        EntityKind::Tile
    }

    fn instance_id(&self) -> u32 {
        self.id.raw()
    }

    fn features(&self) -> Vec<f64> {
        let mut features = Vec::with_capacity(Self::FEATURE_SIZE);
        features.push(f64::from(EntityKind::Tile.id()));
        features.push(f64::from(self.id.raw()));
        features.extend(self.neighbors.iter().map(|n| f64::from(n.raw())));
        features.push(self.economy.current());
        features.push(self.economy.regen_per_tick());
        features.push(self.economy.max());
        features
    }
}
