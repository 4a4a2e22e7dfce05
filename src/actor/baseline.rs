//! Baseline policies for testing and scripted scenarios.

use super::Actor;
use crate::actions::{ActionDescriptor, ActionKindId};
use crate::core::config::WorldConfig;
use crate::core::rng::WorldRng;
use crate::world::ResourceView;

/// Uniformly random policy.
#[derive(Clone, Debug)]
pub struct RandomActor {
    rng: WorldRng,
}

impl RandomActor {
    /// Create a random policy from a seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: WorldRng::new(seed),
        }
    }

    /// Create a random policy drawing from an existing stream.
    #[must_use]
    pub fn from_rng(rng: WorldRng) -> Self {
        Self { rng }
    }

    /// Seed from the world's `random_seed`, on a stream separate from the
    /// one that lays out the grid.
    #[must_use]
    pub fn from_config(config: &WorldConfig) -> Self {
        Self::from_rng(WorldRng::new(config.random_seed).for_context("policy"))
    }
}

impl Actor for RandomActor {
    fn select_action(&mut self, candidates: &[ActionDescriptor]) -> usize {
        if candidates.is_empty() {
            return 0;
        }
        self.rng.gen_range_usize(0..candidates.len())
    }

    fn update(&mut self, _reward: f64) {}
}

/// Picks the first candidate of a given action kind, falling back to index 0
/// ("stay") when none is offered.
///
/// ```
/// use rust_gridworld::actions::{ActionDescriptor, ActionKindId};
/// use rust_gridworld::actor::{Actor, PreferKindActor};
/// use rust_gridworld::core::{CharacterId, TileId};
///
/// let me = CharacterId(0);
/// let candidates = [
///     ActionDescriptor::move_to(me, TileId(0)),
///     ActionDescriptor::move_to(me, TileId(1)),
///     ActionDescriptor::harvest(me, TileId(0)),
/// ];
/// let mut forager = PreferKindActor::new(ActionKindId::HARVEST);
/// assert_eq!(forager.select_action(&candidates), 2);
/// ```
#[derive(Clone, Debug)]
pub struct PreferKindActor {
    kind: ActionKindId,
    total_reward: f64,
}

impl PreferKindActor {
    #[must_use]
    pub fn new(kind: ActionKindId) -> Self {
        Self {
            kind,
            total_reward: 0.0,
        }
    }

    /// Sum of every reward received so far.
    #[must_use]
    pub fn total_reward(&self) -> f64 {
        self.total_reward
    }
}

impl Actor for PreferKindActor {
    fn select_action(&mut self, candidates: &[ActionDescriptor]) -> usize {
        candidates
            .iter()
            .position(|c| c.action == self.kind)
            .unwrap_or(0)
    }

    fn update(&mut self, reward: f64) {
        self.total_reward += reward;
    }
}

/// Scripted forager.
///
/// - If the current tile holds at least `burn_rate` resources, harvest.
/// - Otherwise move toward the candidate tile with the most resources
///   (ties go to the earlier candidate).
/// - If neither applies (no harvest offered, or every reachable tile is
///   empty), pick at random.
///
/// Tile levels come from a `ResourceView` obtained from the world.
#[derive(Clone, Debug)]
pub struct ForagerActor {
    view: ResourceView,
    burn_rate: f64,
    fallback: RandomActor,
}

impl ForagerActor {
    #[must_use]
    pub fn new(view: ResourceView, burn_rate: f64, fallback: RandomActor) -> Self {
        Self {
            view,
            burn_rate,
            fallback,
        }
    }

    fn richest_move(&self, candidates: &[ActionDescriptor]) -> Option<usize> {
        let mut best: Option<(usize, f64)> = None;
        for (i, candidate) in candidates.iter().enumerate() {
            if candidate.action != ActionKindId::MOVE {
                continue;
            }
            let Some(level) = candidate.object_tile().and_then(|t| self.view.resources(t)) else {
                continue;
            };
            if level > 0.0 && best.map_or(true, |(_, top)| level > top) {
                best = Some((i, level));
            }
        }
        best.map(|(i, _)| i)
    }
}

impl Actor for ForagerActor {
    fn select_action(&mut self, candidates: &[ActionDescriptor]) -> usize {
        let harvest = candidates.iter().position(|c| c.action == ActionKindId::HARVEST);
        let here = harvest
            .and_then(|i| candidates[i].object_tile())
            .and_then(|t| self.view.resources(t))
            .unwrap_or(0.0);

        let choice = if here >= self.burn_rate {
            harvest
        } else {
            self.richest_move(candidates)
        };
        choice.unwrap_or_else(|| self.fallback.select_action(candidates))
    }

    fn update(&mut self, _reward: f64) {}
}

/// Policy backed by a closure. Rewards are ignored.
pub struct FnActor<F> {
    select: F,
}

impl<F> FnActor<F>
where
    F: FnMut(&[ActionDescriptor]) -> usize,
{
    pub fn new(select: F) -> Self {
        Self { select }
    }
}

impl<F> Actor for FnActor<F>
where
    F: FnMut(&[ActionDescriptor]) -> usize,
{
    fn select_action(&mut self, candidates: &[ActionDescriptor]) -> usize {
        (self.select)(candidates)
    }

    fn update(&mut self, _reward: f64) {}
}

impl<F> std::fmt::Debug for FnActor<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FnActor").finish_non_exhaustive()
    }
}
