//! Feature snapshots for telemetry, rendering and learning consumers.
//!
//! A snapshot flattens the world into numeric blocks whose positional layout
//! is fixed:
//!
//! - world: kind, id, width, height, live character count
//! - tile rows (id order): kind, id, 4 neighbor ids, current, regen, max
//! - character rows (id order): kind, id, health, regen rate, max health,
//!   energy, burn rate, tile id

use serde::{Deserialize, Serialize};

use super::state::World;
use crate::characters::Character;
use crate::core::entity::Element;
use crate::core::error::Result;
use crate::grid::Tile;

/// Row-major block of equally sized feature rows.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FeatureBlock {
    /// Flattened rows.
    pub data: Vec<f64>,

    /// Length of each row.
    pub row_width: usize,
}

impl FeatureBlock {
    /// An empty block with the given row width.
    #[must_use]
    pub fn empty(row_width: usize) -> Self {
        Self {
            data: Vec::new(),
            row_width,
        }
    }

    /// Build a block from elements, in iteration order.
    pub fn from_elements<'a, E, I>(elements: I) -> Self
    where
        E: Element + 'a,
        I: IntoIterator<Item = &'a E>,
    {
        let mut block = Self::empty(E::FEATURE_SIZE);
        for element in elements {
            block.push_row(&element.features());
        }
        block
    }

    /// Append a row.
    pub fn push_row(&mut self, row: &[f64]) {
        debug_assert_eq!(row.len(), self.row_width, "Row length must match row width");
        self.data.extend_from_slice(row);
    }

    /// Number of rows.
    #[must_use]
    pub fn rows(&self) -> usize {
        if self.row_width == 0 {
            0
        } else {
            self.data.len() / self.row_width
        }
    }

    /// Get a row by index.
    #[must_use]
    pub fn row(&self, index: usize) -> Option<&[f64]> {
        let start = index.checked_mul(self.row_width)?;
        let end = start.checked_add(self.row_width)?;
        self.data.get(start..end)
    }

    /// Iterate over rows.
    pub fn iter_rows(&self) -> impl Iterator<Item = &[f64]> {
        self.data.chunks_exact(self.row_width.max(1))
    }
}

/// Feature snapshot of a whole world at one tick.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WorldSnapshot {
    pub tick: u64,
    pub world: Vec<f64>,
    pub tiles: FeatureBlock,
    pub characters: FeatureBlock,
}

impl WorldSnapshot {
    /// Capture the world's current features.
    #[must_use]
    pub fn capture(world: &World, tick: u64) -> Self {
        Self {
            tick,
            world: world.features(),
            tiles: tile_features(world),
            characters: character_features(world),
        }
    }

    /// Binary encoding for external consumers.
    pub fn encode(&self) -> Result<Vec<u8>> {
        Ok(bincode::serialize(self)?)
    }

    /// Decode a snapshot produced by `encode`.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        Ok(bincode::deserialize(bytes)?)
    }
}

/// Every tile, in id order.
#[must_use]
pub fn tile_features(world: &World) -> FeatureBlock {
    FeatureBlock::from_elements::<Tile, _>(world.grid().tiles())
}

/// Every live character, in id order.
#[must_use]
pub fn character_features(world: &World) -> FeatureBlock {
    let characters = world
        .character_ids()
        .into_iter()
        .filter_map(|id| world.character(id));
    FeatureBlock::from_elements::<Character, _>(characters)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actions::ActionKindId;
    use crate::actor::PreferKindActor;
    use crate::characters::CharacterTraits;
    use crate::core::config::{TilePrototype, WorldConfig};
    use crate::grid::Coord;

    fn world() -> World {
        let config = WorldConfig::default()
            .with_size(3, 2)
            .with_prototype(TilePrototype::new("grain", 20.0, 2.0, 40.0));
        let mut world = World::from_config(&config).unwrap();
        for (x, y) in [(2, 1), (0, 0)] {
            world
                .spawn_character(
                    CharacterTraits::new(50.0, 100.0).with_energy(3.0),
                    PreferKindActor::new(ActionKindId::HARVEST),
                    Coord::new(x, y),
                )
                .unwrap();
        }
        world
    }

    #[test]
    fn test_block_shapes() {
        let snapshot = WorldSnapshot::capture(&world(), 7);
        assert_eq!(snapshot.tick, 7);
        assert_eq!(snapshot.world, vec![0.0, 0.0, 3.0, 2.0, 2.0]);
        assert_eq!(snapshot.tiles.row_width, Tile::FEATURES);
        assert_eq!(snapshot.tiles.rows(), 6);
        assert_eq!(snapshot.characters.row_width, Character::FEATURES);
        assert_eq!(snapshot.characters.rows(), 2);
    }

    #[test]
    fn test_rows_are_in_id_order() {
        let snapshot = WorldSnapshot::capture(&world(), 0);
        for (i, row) in snapshot.tiles.iter_rows().enumerate() {
            assert_eq!(row[1], i as f64);
            assert_eq!(&row[6..], &[20.0, 2.0, 40.0]);
        }
        let first = snapshot.characters.row(0).unwrap();
        let second = snapshot.characters.row(1).unwrap();
        assert_eq!(first[1], 0.0);
        assert_eq!(second[1], 1.0);
        // character 0 spawned at (2, 1) = tile 2 * 2 + 1
        assert_eq!(first[7], 5.0);
        assert_eq!(second[7], 0.0);
        assert!(snapshot.characters.row(2).is_none());
    }

    #[test]
    fn test_binary_roundtrip() {
        let snapshot = WorldSnapshot::capture(&world(), 3);
        let bytes = snapshot.encode().unwrap();
        assert_eq!(WorldSnapshot::decode(&bytes).unwrap(), snapshot);
    }

    #[test]
    fn test_row_index_overflow_is_none() {
        let mut block = FeatureBlock::empty(2);
        block.push_row(&[1.0, 2.0]);
        assert!(block.row(usize::MAX / 2).is_none());
        assert!(block.row(usize::MAX).is_none());
        assert_eq!(block.row(0), Some(&[1.0, 2.0][..]));
    }

    #[test]
    fn test_empty_block() {
        let block = FeatureBlock::empty(4);
        assert_eq!(block.rows(), 0);
        assert!(block.row(0).is_none());
        assert_eq!(block.iter_rows().count(), 0);
    }
}
