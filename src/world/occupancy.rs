//! Occupancy index: which character stands on which tile.
//!
//! Two maps that must always agree:
//! - `locations`: character -> tile
//! - `occupants`: tile -> set of characters
//!
//! Every mutation updates both, so a character is in exactly one tile's set
//! and that tile is the one `locations` points to.

use rustc_hash::{FxHashMap, FxHashSet};

use crate::core::entity::{CharacterId, TileId};

#[derive(Clone, Debug, Default)]
pub struct OccupancyIndex {
    locations: FxHashMap<CharacterId, TileId>,
    occupants: FxHashMap<TileId, FxHashSet<CharacterId>>,
}

impl OccupancyIndex {
    /// Create an empty index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Place a character on a tile.
    ///
    /// Panics if the character is already indexed.
    pub fn insert(&mut self, character: CharacterId, tile: TileId) {
        if self.locations.contains_key(&character) {
            panic!("Character {:?} already exists in occupancy index", character);
        }
        self.locations.insert(character, tile);
        self.occupants.entry(tile).or_default().insert(character);
    }

    /// Move a character to another tile.
    ///
    /// Returns the old tile, or `None` if the character wasn't indexed.
    pub fn relocate(&mut self, character: CharacterId, new_tile: TileId) -> Option<TileId> {
        let old_tile = self.locations.get(&character).copied()?;
        if old_tile == new_tile {
            return Some(old_tile);
        }

        self.detach(character, old_tile);
        self.locations.insert(character, new_tile);
        self.occupants.entry(new_tile).or_default().insert(character);

        Some(old_tile)
    }

    /// Remove a character entirely.
    ///
    /// Returns the tile it was on, or `None` if not found.
    pub fn remove(&mut self, character: CharacterId) -> Option<TileId> {
        let tile = self.locations.remove(&character)?;
        self.detach(character, tile);
        Some(tile)
    }

    /// Tile a character is on.
    #[must_use]
    pub fn tile_of(&self, character: CharacterId) -> Option<TileId> {
        self.locations.get(&character).copied()
    }

    /// Characters standing on a tile.
    pub fn occupants(&self, tile: TileId) -> impl Iterator<Item = CharacterId> + '_ {
        self.occupants.get(&tile).into_iter().flatten().copied()
    }

    /// The occupant set of a tile, if anyone has ever stood on it.
    #[must_use]
    pub fn occupant_set(&self, tile: TileId) -> Option<&FxHashSet<CharacterId>> {
        self.occupants.get(&tile)
    }

    /// Number of characters on a tile.
    #[must_use]
    pub fn occupant_count(&self, tile: TileId) -> usize {
        self.occupants.get(&tile).map_or(0, FxHashSet::len)
    }

    /// Number of indexed characters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.locations.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    /// Check that both maps describe the same placement.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        let forward = self.locations.iter().all(|(character, tile)| {
            self.occupants
                .get(tile)
                .is_some_and(|set| set.contains(character))
        });
        let backward = self.occupants.iter().all(|(tile, set)| {
            set.iter()
                .all(|character| self.locations.get(character) == Some(tile))
        });
        forward && backward
    }

    fn detach(&mut self, character: CharacterId, tile: TileId) {
        if let Some(set) = self.occupants.get_mut(&tile) {
            set.remove(&character);
            if set.is_empty() {
                self.occupants.remove(&tile);
            }
        }
    }
}
