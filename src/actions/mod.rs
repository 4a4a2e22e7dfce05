//! Action system: descriptors, the executor registry, built-in actions.
//!
//! ## Key Types
//!
//! - `ActionKindId`: opaque action kind (Move = 1, Harvest = 2)
//! - `ActionDescriptor`: subject + kind + object for one tick
//! - `ActionRegistry`: kind id -> executor, built before the first tick
//! - `ActionOutcome`: what an executor did
//! - `ActionContext`: the grid and every other character, for executors

pub mod builtin;
pub mod context;
pub mod descriptor;
pub mod registry;

pub use builtin::{execute_harvest, execute_move, INVALID_MOVE_PENALTY};
pub use context::ActionContext;
pub use descriptor::{ActionDescriptor, ActionKindId};
pub use registry::{ActionExecutor, ActionOutcome, ActionRegistry};
