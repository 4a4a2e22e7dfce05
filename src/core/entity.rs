//! Entity identification system.
//!
//! Every simulated object (the world itself, tiles, characters) has a kind and
//! an instance id. Tiles and characters get distinct id types so they can't be
//! mixed up at compile time; `EntityRef` erases the distinction for places
//! that need to talk about "some entity" (action descriptors, feature vectors).
//!
//! ## ID Layout
//!
//! - `TileId`: index into the grid's tile arena, assigned at generation time.
//! - `CharacterId`: allocated by the world when a character is spawned,
//!   never reused within one world.
//!
//! ```
//! use rust_gridworld::core::{CharacterId, EntityKind, EntityRef, TileId};
//!
//! let tile = EntityRef::tile(TileId(7));
//! assert_eq!(tile.kind, EntityKind::Tile);
//! assert_eq!(tile.as_tile(), Some(TileId(7)));
//! assert_eq!(tile.as_character(), None);
//!
//! let character = EntityRef::character(CharacterId(3));
//! assert_eq!(character.as_character(), Some(CharacterId(3)));
//! ```

use serde::{Deserialize, Serialize};

/// Kind of a simulated entity.
///
/// The discriminant is the numeric kind id written into feature vectors;
/// consumers depend on these exact values.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum EntityKind {
    World = 0,
    Tile = 1,
    Character = 4,
}

impl EntityKind {
    /// Numeric kind id as written into feature vectors.
    #[must_use]
    pub const fn id(self) -> u8 {
        self as u8
    }
}

/// Identifier of a tile: its index in the grid arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TileId(pub u32);

impl TileId {
    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Arena index of this tile.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for TileId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Tile({})", self.0)
    }
}

/// Identifier of a character.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CharacterId(pub u32);

impl CharacterId {
    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for CharacterId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Character({})", self.0)
    }
}

/// Kind-tagged reference to any entity.
///
/// This is a handle, not a pointer: resolve it through the owning `World`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityRef {
    pub kind: EntityKind,
    pub id: u32,
}

impl EntityRef {
    /// Reference to the world entity (there is exactly one, id 0).
    #[must_use]
    pub const fn world() -> Self {
        Self { kind: EntityKind::World, id: 0 }
    }

    /// Reference to a tile.
    #[must_use]
    pub const fn tile(id: TileId) -> Self {
        Self { kind: EntityKind::Tile, id: id.0 }
    }

    /// Reference to a character.
    #[must_use]
    pub const fn character(id: CharacterId) -> Self {
        Self { kind: EntityKind::Character, id: id.0 }
    }

    /// Convert to a `TileId` if this refers to a tile.
    #[must_use]
    pub const fn as_tile(self) -> Option<TileId> {
        match self.kind {
            EntityKind::Tile => Some(TileId(self.id)),
            _ => None,
        }
    }

    /// Convert to a `CharacterId` if this refers to a character.
    #[must_use]
    pub const fn as_character(self) -> Option<CharacterId> {
        match self.kind {
            EntityKind::Character => Some(CharacterId(self.id)),
            _ => None,
        }
    }
}

impl From<TileId> for EntityRef {
    fn from(id: TileId) -> Self {
        Self::tile(id)
    }
}

impl From<CharacterId> for EntityRef {
    fn from(id: CharacterId) -> Self {
        Self::character(id)
    }
}

impl std::fmt::Display for EntityRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.kind {
            EntityKind::World => write!(f, "World"),
            EntityKind::Tile => write!(f, "Tile({})", self.id),
            EntityKind::Character => write!(f, "Character({})", self.id),
        }
    }
}

/// Capability shared by every simulated entity.
///
/// `features()` returns a flat numeric vector of length `FEATURE_SIZE` whose
/// first two entries are always the kind id and the instance id. The order of
/// the remaining entries is fixed per kind.
pub trait Element {
    /// Length of the vector returned by `features()`.
    const FEATURE_SIZE: usize;

    /// Entity kind.
    fn kind(&self) -> EntityKind;

    /// Instance id, unique within the kind.
    fn instance_id(&self) -> u32;

    /// Flat feature vector.
    fn features(&self) -> Vec<f64>;

    /// Kind-tagged handle to this entity.
    fn entity_ref(&self) -> EntityRef {
        EntityRef {
            kind: self.kind(),
            id: self.instance_id(),
        }
    }
}
