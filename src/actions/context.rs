//! Mutable view of the world handed to action executors.
//!
//! While an action runs, its subject is held apart from the character
//! registry and passed to the executor directly. The context gives access to
//! everything else: the grid and every other character. An executor can
//! therefore target a tile or another character without the dispatch path
//! knowing which.

use rustc_hash::FxHashMap;

use crate::characters::Character;
use crate::core::entity::{CharacterId, TileId};
use crate::grid::{Grid, Tile};

/// Everything an executor may touch besides its subject.
pub struct ActionContext<'a> {
    grid: &'a mut Grid,
    characters: &'a mut FxHashMap<CharacterId, Character>,
}

impl<'a> ActionContext<'a> {
    /// `characters` must not contain the subject of the running action.
    pub(crate) fn new(grid: &'a mut Grid, characters: &'a mut FxHashMap<CharacterId, Character>) -> Self {
        Self { grid, characters }
    }

    #[must_use]
    pub fn grid(&self) -> &Grid {
        self.grid
    }

    pub fn tile_mut(&mut self, id: TileId) -> Option<&mut Tile> {
        self.grid.tile_mut(id)
    }

    /// Another live character. The subject itself is never found here.
    #[must_use]
    pub fn character(&self, id: CharacterId) -> Option<&Character> {
        self.characters.get(&id)
    }

    /// Another live character, mutably. The subject itself is never found
    /// here.
    ///
    /// Executors may change traits but should leave `position` alone: the
    /// occupancy index only resyncs subjects.
    pub fn character_mut(&mut self, id: CharacterId) -> Option<&mut Character> {
        self.characters.get_mut(&id)
    }
}

impl std::fmt::Debug for ActionContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActionContext")
            .field("tiles", &self.grid.tile_count())
            .field("others", &self.characters.len())
            .finish()
    }
}
