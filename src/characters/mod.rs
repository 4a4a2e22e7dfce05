//! Characters and their traits.
//!
//! A `Character` owns its traits, its position handle and its policy. Spawning
//! and removal go through `World`, which keeps the occupancy index in step.

pub mod character;
pub mod traits;

pub use character::{CandidateActions, Character};
pub use traits::CharacterTraits;
