//! The world: grid, character registry and occupancy index.
//!
//! ## Ownership
//!
//! The world owns the grid (and through it every tile) and every character.
//! Everything else refers to entities by id. Tiles are never added or removed
//! after generation; characters come and go through `spawn_character` and
//! `remove_character`, which update the registry and the occupancy index
//! together.

use rustc_hash::FxHashMap;
use tracing::debug;

use super::occupancy::OccupancyIndex;
use super::view::ResourceView;
use crate::actions::ActionContext;
use crate::actor::Actor;
use crate::characters::{Character, CharacterTraits};
use crate::core::config::WorldConfig;
use crate::core::entity::{CharacterId, Element, EntityKind, TileId};
use crate::core::error::{Result, WorldError};
use crate::grid::{Coord, Grid, Tile};

/// Simulation world.
///
/// ```
/// use rust_gridworld::actor::RandomActor;
/// use rust_gridworld::characters::CharacterTraits;
/// use rust_gridworld::core::WorldConfig;
/// use rust_gridworld::grid::Coord;
/// use rust_gridworld::world::World;
///
/// let mut world = World::from_config(&WorldConfig::default()).unwrap();
/// let traits = CharacterTraits::new(100.0, 100.0).with_burn_rate(1.0);
/// let id = world
///     .spawn_character(traits, RandomActor::new(0), Coord::new(5, 5))
///     .unwrap();
///
/// let tile = world.character_tile(id).unwrap();
/// assert_eq!(world.grid().coord_of(tile), Some(Coord::new(5, 5)));
/// assert!(world.tile_characters(tile).any(|c| c == id));
/// ```
#[derive(Debug)]
pub struct World {
    grid: Grid,
    characters: FxHashMap<CharacterId, Character>,
    occupancy: OccupancyIndex,
    resources: ResourceView,
    next_character_id: u32,
}

impl World {
    /// Feature vector layout: kind, id, width, height, live character count.
    pub const FEATURES: usize = 5;

    /// Create a world around an already generated grid.
    #[must_use]
    pub fn new(grid: Grid) -> Self {
        Self {
            grid,
            characters: FxHashMap::default(),
            occupancy: OccupancyIndex::new(),
            resources: ResourceView::default(),
            next_character_id: 0,
        }
    }

    /// Validate the configuration and generate the grid.
    pub fn from_config(config: &WorldConfig) -> Result<Self> {
        Ok(Self::new(Grid::from_config(config)?))
    }

    // === Grid ===

    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.grid.width()
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.grid.height()
    }

    #[must_use]
    pub fn tile(&self, id: TileId) -> Option<&Tile> {
        self.grid.tile(id)
    }

    #[must_use]
    pub fn tile_at(&self, coord: Coord) -> Option<&Tile> {
        self.grid.tile_at(coord)
    }

    /// A read-only handle to tile resource levels, current as of now and
    /// refreshed at the start of every tick.
    #[must_use]
    pub fn resource_view(&self) -> ResourceView {
        self.resources.refresh(&self.grid);
        self.resources.clone()
    }

    /// Bring outstanding resource views up to date. Skipped when nobody holds
    /// one.
    pub fn refresh_resource_view(&self) {
        if self.resources.is_shared() {
            self.resources.refresh(&self.grid);
        }
    }

    // === Characters ===

    /// Spawn a character on the tile at `coord`.
    pub fn spawn_character<A>(&mut self, traits: CharacterTraits, actor: A, coord: Coord) -> Result<CharacterId>
    where
        A: Actor + 'static,
    {
        traits.validate()?;
        let tile = self
            .grid
            .tile_id(coord)
            .ok_or(WorldError::CoordOutOfBounds { x: coord.x, y: coord.y })?;

        let id = CharacterId(self.next_character_id);
        self.next_character_id += 1;

        self.characters
            .insert(id, Character::new(id, traits, tile, Box::new(actor)));
        self.occupancy.insert(id, tile);

        debug!(character = %id, %tile, "spawned character");
        Ok(id)
    }

    /// Remove a character from the registry and the occupancy index.
    pub fn remove_character(&mut self, id: CharacterId) -> Option<Character> {
        let character = self.characters.remove(&id)?;
        self.occupancy.remove(id);
        Some(character)
    }

    #[must_use]
    pub fn character(&self, id: CharacterId) -> Option<&Character> {
        self.characters.get(&id)
    }

    pub fn character_mut(&mut self, id: CharacterId) -> Option<&mut Character> {
        self.characters.get_mut(&id)
    }

    /// Iterate over characters in no particular order.
    pub fn characters(&self) -> impl Iterator<Item = &Character> {
        self.characters.values()
    }

    /// Ids of all live characters, ascending.
    #[must_use]
    pub fn character_ids(&self) -> Vec<CharacterId> {
        let mut ids: Vec<_> = self.characters.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    #[must_use]
    pub fn character_count(&self) -> usize {
        self.characters.len()
    }

    /// No characters left alive.
    #[must_use]
    pub fn is_extinct(&self) -> bool {
        self.characters.is_empty()
    }

    // === Index queries ===

    /// Tile a character is recorded on.
    #[must_use]
    pub fn character_tile(&self, id: CharacterId) -> Option<TileId> {
        self.occupancy.tile_of(id)
    }

    /// Characters recorded on a tile.
    pub fn tile_characters(&self, tile: TileId) -> impl Iterator<Item = CharacterId> + '_ {
        self.occupancy.occupants(tile)
    }

    #[must_use]
    pub fn occupancy(&self) -> &OccupancyIndex {
        &self.occupancy
    }

    /// Check that the registry, the characters' own positions and the
    /// occupancy index all agree.
    #[must_use]
    pub fn check_indices(&self) -> bool {
        self.occupancy.len() == self.characters.len()
            && self.occupancy.is_consistent()
            && self
                .characters
                .values()
                .all(|c| self.occupancy.tile_of(c.id()) == Some(c.position()))
    }

    // === Engine access ===

    /// Run `f` with `subject` held apart from the registry and a context over
    /// the rest of the world. Returns `None` if `subject` is not alive.
    ///
    /// This is how actions are dispatched; it is public so custom action
    /// kinds can be driven outside the tick loop.
    pub fn with_action_context<R, F>(&mut self, subject: CharacterId, f: F) -> Option<R>
    where
        F: FnOnce(&mut Character, &mut ActionContext<'_>) -> R,
    {
        let mut character = self.characters.remove(&subject)?;
        let result = {
            let mut ctx = ActionContext::new(&mut self.grid, &mut self.characters);
            f(&mut character, &mut ctx)
        };
        self.characters.insert(subject, character);
        Some(result)
    }

    /// Borrow one character together with the grid.
    pub(crate) fn character_and_grid_mut(&mut self, id: CharacterId) -> Option<(&mut Character, &mut Grid)> {
        let character = self.characters.get_mut(&id)?;
        Some((character, &mut self.grid))
    }

    /// Bring the occupancy index in line with the character's own position.
    /// Returns `true` if the character had moved.
    pub(crate) fn sync_position(&mut self, id: CharacterId) -> bool {
        let Some(position) = self.characters.get(&id).map(Character::position) else {
            return false;
        };
        match self.occupancy.relocate(id, position) {
            Some(old) => old != position,
            None => false,
        }
    }
}

impl Element for World {
    const FEATURE_SIZE: usize = World::FEATURES;

    fn kind(&self) -> EntityKind {
        EntityKind::World
    }

    fn instance_id(&self) -> u32 {
        0
    }

    fn features(&self) -> Vec<f64> {
        vec![
            f64::from(EntityKind::World.id()),
            f64::from(self.instance_id()),
            self.width() as f64,
            self.height() as f64,
            self.character_count() as f64,
        ]
    }
}
