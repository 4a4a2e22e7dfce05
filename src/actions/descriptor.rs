//! Action representation: subject + verb + object.
//!
//! An `ActionDescriptor` is a per-tick value. The engine builds the candidate
//! list for each character, the character's policy picks one, and the
//! registry dispatches it. Descriptors carry handles, not references, so a
//! policy can inspect them freely without touching the world.

use serde::{Deserialize, Serialize};

use crate::core::entity::{CharacterId, EntityKind, EntityRef, TileId};

/// Action kind identifier. The registry maps these to executors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActionKindId(pub u16);

impl ActionKindId {
    /// Move to (or stay on) a tile.
    pub const MOVE: ActionKindId = ActionKindId(1);

    /// Take all resources from a tile.
    pub const HARVEST: ActionKindId = ActionKindId(2);

    /// Create a new action kind ID.
    #[must_use]
    pub const fn new(id: u16) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u16 {
        self.0
    }
}

impl std::fmt::Display for ActionKindId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ActionKind({})", self.0)
    }
}

/// One candidate or chosen action.
///
/// ## Example
///
/// ```
/// use rust_gridworld::actions::{ActionDescriptor, ActionKindId};
/// use rust_gridworld::core::{CharacterId, TileId};
///
/// let harvest = ActionDescriptor::harvest(CharacterId(0), TileId(12));
/// assert_eq!(harvest.action, ActionKindId::HARVEST);
/// assert_eq!(harvest.object_tile(), Some(TileId(12)));
/// assert_eq!(harvest.features(), [4.0, 0.0, 2.0, 1.0, 12.0]);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActionDescriptor {
    /// The acting character.
    pub subject: CharacterId,

    /// What to do.
    pub action: ActionKindId,

    /// What to do it to.
    pub object: EntityRef,
}

impl ActionDescriptor {
    /// Feature vector length.
    pub const FEATURES: usize = 5;

    #[must_use]
    pub fn new(subject: CharacterId, action: ActionKindId, object: EntityRef) -> Self {
        Self {
            subject,
            action,
            object,
        }
    }

    /// Move `subject` to `tile`. Targeting the current tile means "stay".
    #[must_use]
    pub fn move_to(subject: CharacterId, tile: TileId) -> Self {
        Self::new(subject, ActionKindId::MOVE, EntityRef::tile(tile))
    }

    /// Harvest `tile`.
    #[must_use]
    pub fn harvest(subject: CharacterId, tile: TileId) -> Self {
        Self::new(subject, ActionKindId::HARVEST, EntityRef::tile(tile))
    }

    /// The object as a tile, if it is one.
    #[must_use]
    pub fn object_tile(&self) -> Option<TileId> {
        self.object.as_tile()
    }

    /// Subject kind, subject id, action id, object kind, object id.
    #[must_use]
    pub fn features(&self) -> [f64; Self::FEATURES] {
        [
            f64::from(EntityKind::Character.id()),
            f64::from(self.subject.raw()),
            f64::from(self.action.raw()),
            f64::from(self.object.kind.id()),
            f64::from(self.object.id),
        ]
    }
}

impl std::fmt::Display for ActionDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} -> {}", self.subject, self.action, self.object)
    }
}
