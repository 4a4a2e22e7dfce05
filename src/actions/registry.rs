//! Action registry: action kind id -> executor.
//!
//! The registry is an explicit value built before the simulation starts and
//! handed to the orchestrator. New action kinds are added by registering
//! another executor; the dispatch path does not change.

use rustc_hash::FxHashMap;
use tracing::trace;

use super::builtin;
use super::context::ActionContext;
use super::descriptor::ActionKindId;
use crate::characters::Character;
use crate::core::entity::EntityRef;
use crate::core::error::{Result, WorldError};

/// What an executor did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActionOutcome {
    /// The action changed the world.
    Applied,
    /// Nothing happened (staying put, object of the wrong kind, ...).
    NoOp,
    /// The action was invalid and the subject paid a penalty instead.
    Penalized,
}

/// Executor for one action kind: mutates the subject and/or the object,
/// which it resolves through the context.
pub type ActionExecutor = Box<dyn Fn(&mut Character, &mut ActionContext<'_>, EntityRef) -> ActionOutcome>;

struct RegisteredAction {
    name: String,
    executor: ActionExecutor,
}

/// Registry of action executors.
///
/// ## Example
///
/// ```
/// use rust_gridworld::actions::{ActionKindId, ActionOutcome, ActionRegistry};
///
/// let mut registry = ActionRegistry::with_defaults();
/// assert!(registry.contains(ActionKindId::MOVE));
/// assert!(registry.contains(ActionKindId::HARVEST));
///
/// // A new kind: rest without doing anything.
/// registry.register(ActionKindId::new(3), "rest", |_, _, _| ActionOutcome::NoOp);
/// assert_eq!(registry.name(ActionKindId::new(3)), Some("rest"));
/// ```
#[derive(Default)]
pub struct ActionRegistry {
    actions: FxHashMap<ActionKindId, RegisteredAction>,
}

impl ActionRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry with Move and Harvest registered.
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(ActionKindId::MOVE, "move", builtin::execute_move);
        registry.register(ActionKindId::HARVEST, "harvest", builtin::execute_harvest);
        registry
    }

    /// Register an executor for an action kind.
    ///
    /// Registering a kind again replaces its executor, so repeating the same
    /// registration is harmless. Returns `true` if the kind was new.
    pub fn register<F>(&mut self, id: ActionKindId, name: impl Into<String>, executor: F) -> bool
    where
        F: Fn(&mut Character, &mut ActionContext<'_>, EntityRef) -> ActionOutcome + 'static,
    {
        let entry = RegisteredAction {
            name: name.into(),
            executor: Box::new(executor),
        };
        self.actions.insert(id, entry).is_none()
    }

    /// Check if an action kind is registered.
    #[must_use]
    pub fn contains(&self, id: ActionKindId) -> bool {
        self.actions.contains_key(&id)
    }

    /// Name an action kind was registered under.
    #[must_use]
    pub fn name(&self, id: ActionKindId) -> Option<&str> {
        self.actions.get(&id).map(|a| a.name.as_str())
    }

    /// Get the number of registered action kinds.
    #[must_use]
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// Check if the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Dispatch an action.
    ///
    /// An unregistered id is a programming error and is returned as
    /// `WorldError::UnregisteredAction`; callers are expected to abort.
    pub fn execute(
        &self,
        id: ActionKindId,
        subject: &mut Character,
        ctx: &mut ActionContext<'_>,
        object: EntityRef,
    ) -> Result<ActionOutcome> {
        let action = self
            .actions
            .get(&id)
            .ok_or(WorldError::UnregisteredAction(id))?;
        let outcome = (action.executor)(subject, ctx, object);
        trace!(subject = %subject.id(), action = %action.name, %object, ?outcome, "executed action");
        Ok(outcome)
    }
}

impl std::fmt::Debug for ActionRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut kinds: Vec<_> = self
            .actions
            .iter()
            .map(|(id, a)| (id.raw(), a.name.as_str()))
            .collect();
        kinds.sort_unstable();
        f.debug_struct("ActionRegistry").field("actions", &kinds).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor::FnActor;
    use crate::characters::CharacterTraits;
    use crate::core::entity::{CharacterId, TileId};
    use crate::grid::{Grid, ResourceEconomy};
    use rustc_hash::FxHashMap;

    fn fixture() -> (Character, Grid) {
        let grid = Grid::generate(
            3,
            3,
            &[ResourceEconomy::new(50.0, 0.0, 100.0).unwrap()],
            &[1.0],
            0,
        )
        .unwrap();
        let traits = CharacterTraits::new(100.0, 100.0).with_energy(10.0);
        let character = Character::new(CharacterId(0), traits, TileId(4), Box::new(FnActor::new(|_| 0)));
        (character, grid)
    }

    #[test]
    fn test_defaults_registered() {
        let registry = ActionRegistry::with_defaults();
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.name(ActionKindId::MOVE), Some("move"));
        assert_eq!(registry.name(ActionKindId::HARVEST), Some("harvest"));
    }

    #[test]
    fn test_register_is_idempotent() {
        let mut registry = ActionRegistry::with_defaults();
        assert!(!registry.register(ActionKindId::MOVE, "move", builtin::execute_move));
        assert_eq!(registry.len(), 2);
        assert!(registry.register(ActionKindId::new(7), "wait", |_, _, _| ActionOutcome::NoOp));
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn test_execute_dispatches_by_id() {
        let registry = ActionRegistry::with_defaults();
        let (mut character, mut grid) = fixture();
        let mut others = FxHashMap::default();
        let mut ctx = ActionContext::new(&mut grid, &mut others);

        let outcome = registry
            .execute(ActionKindId::HARVEST, &mut character, &mut ctx, EntityRef::tile(TileId(4)))
            .unwrap();
        assert_eq!(outcome, ActionOutcome::Applied);
        assert_eq!(character.traits().energy_on_hand, 60.0);
    }

    #[test]
    fn test_custom_executor() {
        let mut registry = ActionRegistry::new();
        registry.register(ActionKindId::new(5), "feast", |c, _, _| {
            c.add_energy(1.0);
            ActionOutcome::Applied
        });
        let (mut character, mut grid) = fixture();
        let mut others = FxHashMap::default();
        let mut ctx = ActionContext::new(&mut grid, &mut others);

        registry
            .execute(ActionKindId::new(5), &mut character, &mut ctx, EntityRef::world())
            .unwrap();
        assert_eq!(character.traits().energy_on_hand, 11.0);
    }

    #[test]
    fn test_executor_can_target_a_character() {
        let mut registry = ActionRegistry::new();
        registry.register(ActionKindId::new(3), "give", |giver, ctx, object| {
            let Some(receiver) = object.as_character().and_then(|id| ctx.character_mut(id)) else {
                return ActionOutcome::NoOp;
            };
            let amount = giver.traits().energy_on_hand;
            giver.burn_energy(amount);
            receiver.add_energy(amount);
            ActionOutcome::Applied
        });

        let (mut giver, mut grid) = fixture();
        let receiver = Character::new(
            CharacterId(1),
            CharacterTraits::new(100.0, 100.0),
            TileId(4),
            Box::new(FnActor::new(|_| 0)),
        );
        let mut others = FxHashMap::default();
        others.insert(CharacterId(1), receiver);
        let mut ctx = ActionContext::new(&mut grid, &mut others);

        let outcome = registry
            .execute(ActionKindId::new(3), &mut giver, &mut ctx, EntityRef::character(CharacterId(1)))
            .unwrap();
        assert_eq!(outcome, ActionOutcome::Applied);

        // the subject is not among the reachable characters
        let to_self = registry
            .execute(ActionKindId::new(3), &mut giver, &mut ctx, EntityRef::character(CharacterId(0)))
            .unwrap();
        assert_eq!(to_self, ActionOutcome::NoOp);

        assert_eq!(giver.traits().energy_on_hand, 0.0);
        assert_eq!(others[&CharacterId(1)].traits().energy_on_hand, 10.0);
    }

    #[test]
    fn test_unregistered_action_is_an_error() {
        let registry = ActionRegistry::new();
        let (mut character, mut grid) = fixture();
        let mut others = FxHashMap::default();
        let mut ctx = ActionContext::new(&mut grid, &mut others);

        let err = registry
            .execute(ActionKindId::MOVE, &mut character, &mut ctx, EntityRef::tile(TileId(4)))
            .unwrap_err();
        assert!(matches!(err, WorldError::UnregisteredAction(ActionKindId::MOVE)));
    }

    #[test]
    fn test_debug_lists_kinds() {
        let registry = ActionRegistry::with_defaults();
        let debug = format!("{registry:?}");
        assert!(debug.contains("move"));
        assert!(debug.contains("harvest"));
    }
}
