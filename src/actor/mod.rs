//! Policy boundary.
//!
//! The engine asks each character's `Actor` for a decision once per tick and
//! reports a scalar reward once per tick. It never looks at how the decision
//! was made: rule-based, random and learned policies all sit behind the same
//! two calls.
//!
//! ## Contract
//!
//! - `select_action` is called exactly once per live character per tick with a
//!   non-empty candidate list (index 0 is always "stay").
//! - `update` is called exactly once per live character per tick, after the
//!   character's economy has advanced, with that tick's net reward.
//! - An out-of-range index is tolerated: the character does nothing that tick
//!   and a warning is logged.

pub mod baseline;

pub use baseline::{FnActor, ForagerActor, PreferKindActor, RandomActor};

use crate::actions::ActionDescriptor;

/// A decision-making policy bound to one character.
pub trait Actor {
    /// Pick one of `candidates` by index.
    fn select_action(&mut self, candidates: &[ActionDescriptor]) -> usize;

    /// Receive the net reward for the tick that just ended.
    fn update(&mut self, reward: f64);
}

impl<A: Actor + ?Sized> Actor for Box<A> {
    fn select_action(&mut self, candidates: &[ActionDescriptor]) -> usize {
        (**self).select_action(candidates)
    }

    fn update(&mut self, reward: f64) {
        (**self).update(reward);
    }
}
