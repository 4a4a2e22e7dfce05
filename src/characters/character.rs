//! Characters: position, energy/health economy, bound policy.

use smallvec::SmallVec;

use super::traits::CharacterTraits;
use crate::actions::ActionDescriptor;
use crate::actor::Actor;
use crate::core::entity::{CharacterId, Element, EntityKind, TileId};
use crate::grid::Grid;

/// Candidate actions for one tick: stay, four moves, harvest.
pub type CandidateActions = SmallVec<[ActionDescriptor; 6]>;

/// A mobile agent.
///
/// The character only tracks its own position; the world's occupancy index
/// is brought in line during bookkeeping.
pub struct Character {
    id: CharacterId,
    traits: CharacterTraits,
    position: TileId,
    actor: Box<dyn Actor>,
    reward: f64,
}

impl Character {
    /// Feature vector layout: kind, id, health, regen rate, max health,
    /// energy, burn rate, current tile id.
    pub const FEATURES: usize = 8;

    pub fn new(id: CharacterId, traits: CharacterTraits, position: TileId, actor: Box<dyn Actor>) -> Self {
        Self {
            id,
            traits,
            position,
            actor,
            reward: 0.0,
        }
    }

    #[must_use]
    pub fn id(&self) -> CharacterId {
        self.id
    }

    #[must_use]
    pub fn traits(&self) -> &CharacterTraits {
        &self.traits
    }

    #[must_use]
    pub fn position(&self) -> TileId {
        self.position
    }

    /// Reward accumulated since the last report to the policy.
    #[must_use]
    pub fn reward(&self) -> f64 {
        self.reward
    }

    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.traits.health > 0.0
    }

    /// Set the position. Executors use this; the world index catches up
    /// during bookkeeping.
    pub fn set_position(&mut self, tile: TileId) {
        self.position = tile;
    }

    pub fn add_energy(&mut self, amount: f64) {
        self.traits.energy_on_hand += amount;
    }

    /// Burn energy. Whatever energy can't cover comes out of health and is
    /// charged against the reward.
    pub fn burn_energy(&mut self, amount: f64) {
        if self.traits.energy_on_hand > amount {
            self.traits.energy_on_hand -= amount;
        } else {
            let deficit = amount - self.traits.energy_on_hand;
            self.traits.energy_on_hand = 0.0;
            self.traits.health -= deficit;
            self.reward -= deficit;
        }
    }

    /// Everything this character may do this tick, in a fixed order: stay,
    /// one move per neighbor (West, East, North, South), harvest.
    #[must_use]
    pub fn available_actions(&self, grid: &Grid) -> CandidateActions {
        let mut actions = CandidateActions::new();
        actions.push(ActionDescriptor::move_to(self.id, self.position));
        if let Some(tile) = grid.tile(self.position) {
            for &neighbor in tile.neighbors() {
                actions.push(ActionDescriptor::move_to(self.id, neighbor));
            }
        }
        actions.push(ActionDescriptor::harvest(self.id, self.position));
        actions
    }

    /// Ask the bound policy to pick one of `candidates`.
    pub fn select_action(&mut self, candidates: &[ActionDescriptor]) -> usize {
        self.actor.select_action(candidates)
    }

    /// Advance the energy/health economy by `dt`, report the tick's reward to
    /// the policy and reset it. Returns whether the character is still alive.
    pub fn tick(&mut self, dt: f64) -> bool {
        self.burn_energy(self.traits.energy_burn_rate * dt);

        if self.traits.energy_on_hand > 0.0 && self.traits.health < self.traits.max_health {
            let gain = self.traits.health_regen_rate * dt;
            self.traits.health = (self.traits.health + gain).min(self.traits.max_health);
            self.reward += gain;
        }

        self.actor.update(self.reward);
        self.reward = 0.0;

        self.is_alive()
    }
}

impl Element for Character {
    const FEATURE_SIZE: usize = Character::FEATURES;

    fn kind(&self) -> EntityKind {
        EntityKind::Character
    }

    fn instance_id(&self) -> u32 {
        self.id.raw()
    }

    fn features(&self) -> Vec<f64> {
        vec![
            f64::from(EntityKind::Character.id()),
            f64::from(self.id.raw()),
            self.traits.health,
            self.traits.health_regen_rate,
            self.traits.max_health,
            self.traits.energy_on_hand,
            self.traits.energy_burn_rate,
            f64::from(self.position.raw()),
        ]
    }
}

impl std::fmt::Debug for Character {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Character")
            .field("id", &self.id)
            .field("traits", &self.traits)
            .field("position", &self.position)
            .field("reward", &self.reward)
            .finish_non_exhaustive()
    }
}
