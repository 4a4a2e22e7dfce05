//! Tick orchestration.
//!
//! One call to `Simulation::step` runs four phases in order:
//!
//! 1. **Deciding**: every live character's policy picks from its candidates.
//!    An out-of-range pick is skipped with a warning.
//! 2. **Executing**: chosen actions are dispatched through the registry in
//!    ascending character-id order. Conflicting actions (two characters
//!    harvesting one tile) are not detected; whoever comes first wins.
//! 3. **Bookkeeping**: the occupancy index catches up with moves, each
//!    character's economy advances and reports its reward, and characters at
//!    zero health are removed.
//! 4. **Regenerating**: every tile regrows its resources.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::actions::{ActionDescriptor, ActionOutcome, ActionRegistry};
use crate::core::config::WorldConfig;
use crate::core::entity::CharacterId;
use crate::core::error::{Result, WorldError};
use crate::world::{World, WorldSnapshot};

/// Phase of a tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TickPhase {
    Deciding,
    Executing,
    Bookkeeping,
    Regenerating,
}

impl TickPhase {
    /// The phase that follows this one. `None` after regeneration: the tick
    /// is over.
    #[must_use]
    pub const fn next(self) -> Option<Self> {
        match self {
            TickPhase::Deciding => Some(TickPhase::Executing),
            TickPhase::Executing => Some(TickPhase::Bookkeeping),
            TickPhase::Bookkeeping => Some(TickPhase::Regenerating),
            TickPhase::Regenerating => None,
        }
    }
}

/// Whether there is anything left to simulate.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SimulationStatus {
    /// At least one character is alive.
    #[default]
    Running,
    /// No characters remain. Ticks still run (tiles regrow) but nothing acts.
    Extinct,
}

/// What happened during one tick.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct TickReport {
    /// Tick number, starting at 1.
    pub tick: u64,

    /// Executed actions, in execution order.
    pub executed: Vec<ActionDescriptor>,

    /// Characters whose policy returned an out-of-range index.
    pub skipped: Vec<CharacterId>,

    /// Characters removed for reaching zero health.
    pub deaths: Vec<CharacterId>,

    /// Actions that changed the world.
    pub applied: usize,

    /// Actions that did nothing.
    pub no_ops: usize,

    /// Actions that were invalid and penalized.
    pub penalized: usize,

    /// Characters alive after the tick.
    pub alive: usize,

    pub status: SimulationStatus,
}

impl TickReport {
    fn record(&mut self, action: ActionDescriptor, outcome: ActionOutcome) {
        self.executed.push(action);
        match outcome {
            ActionOutcome::Applied => self.applied += 1,
            ActionOutcome::NoOp => self.no_ops += 1,
            ActionOutcome::Penalized => self.penalized += 1,
        }
    }
}

/// Drives a world forward tick by tick.
///
/// ```
/// use rust_gridworld::actions::{ActionKindId, ActionRegistry};
/// use rust_gridworld::actor::PreferKindActor;
/// use rust_gridworld::characters::CharacterTraits;
/// use rust_gridworld::core::WorldConfig;
/// use rust_gridworld::engine::{Simulation, SimulationStatus};
/// use rust_gridworld::grid::Coord;
/// use rust_gridworld::world::World;
///
/// let config = WorldConfig::default().with_size(5, 5);
/// let mut world = World::from_config(&config).unwrap();
/// world
///     .spawn_character(
///         CharacterTraits::new(100.0, 100.0).with_burn_rate(5.0),
///         PreferKindActor::new(ActionKindId::HARVEST),
///         Coord::new(2, 2),
///     )
///     .unwrap();
///
/// let mut sim = Simulation::new(world, ActionRegistry::with_defaults());
/// let report = sim.step().unwrap();
/// assert_eq!(report.tick, 1);
/// assert_eq!(report.executed.len(), 1);
/// assert_eq!(report.status, SimulationStatus::Running);
/// ```
#[derive(Debug)]
pub struct Simulation {
    world: World,
    registry: ActionRegistry,
    dt: f64,
    tick: u64,
    phase: TickPhase,
}

impl Simulation {
    /// Create a simulation with a tick duration of 1.0.
    #[must_use]
    pub fn new(world: World, registry: ActionRegistry) -> Self {
        Self {
            world,
            registry,
            dt: 1.0,
            tick: 0,
            phase: TickPhase::Deciding,
        }
    }

    /// Generate a world from `config` and pair it with the default actions.
    pub fn from_config(config: &WorldConfig) -> Result<Self> {
        let world = World::from_config(config)?;
        Self::new(world, ActionRegistry::with_defaults()).with_tick_duration(config.tick_duration)
    }

    /// Set the logical duration of one tick.
    pub fn with_tick_duration(mut self, dt: f64) -> Result<Self> {
        if !dt.is_finite() || dt < 0.0 {
            return Err(WorldError::InvalidTickDuration(dt));
        }
        self.dt = dt;
        Ok(self)
    }

    #[must_use]
    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    #[must_use]
    pub fn registry(&self) -> &ActionRegistry {
        &self.registry
    }

    /// Registry access, for adding action kinds between ticks.
    pub fn registry_mut(&mut self) -> &mut ActionRegistry {
        &mut self.registry
    }

    /// Consume the simulation, returning the world.
    #[must_use]
    pub fn into_world(self) -> World {
        self.world
    }

    #[must_use]
    pub fn dt(&self) -> f64 {
        self.dt
    }

    /// Number of completed ticks.
    #[must_use]
    pub fn tick_count(&self) -> u64 {
        self.tick
    }

    /// Phase the next (or current) tick is in.
    #[must_use]
    pub fn phase(&self) -> TickPhase {
        self.phase
    }

    #[must_use]
    pub fn status(&self) -> SimulationStatus {
        if self.world.is_extinct() {
            SimulationStatus::Extinct
        } else {
            SimulationStatus::Running
        }
    }

    /// Feature snapshot of the world as of the last completed tick.
    #[must_use]
    pub fn snapshot(&self) -> WorldSnapshot {
        WorldSnapshot::capture(&self.world, self.tick)
    }

    /// Run one full tick.
    ///
    /// Fails only on a programming error: a chosen action whose kind has no
    /// registered executor.
    pub fn step(&mut self) -> Result<TickReport> {
        let mut report = TickReport {
            tick: self.tick + 1,
            ..TickReport::default()
        };

        self.phase = TickPhase::Deciding;
        let chosen = self.decide(&mut report);

        self.advance_phase();
        self.execute(chosen, &mut report)?;

        self.advance_phase();
        self.bookkeep(&mut report);

        self.advance_phase();
        self.world.grid_mut().regenerate(self.dt);

        self.phase = TickPhase::Deciding;
        self.tick += 1;
        report.alive = self.world.character_count();
        report.status = self.status();

        if report.status == SimulationStatus::Extinct && !report.deaths.is_empty() {
            info!(tick = report.tick, "no characters remain alive");
        }
        Ok(report)
    }

    /// Run up to `max_ticks` ticks, stopping after the tick in which the last
    /// character dies. Returns the reports of every tick run.
    pub fn run(&mut self, max_ticks: u64) -> Result<Vec<TickReport>> {
        let mut reports = Vec::new();
        for _ in 0..max_ticks {
            if self.status() == SimulationStatus::Extinct {
                break;
            }
            let report = self.step()?;
            let extinct = report.status == SimulationStatus::Extinct;
            reports.push(report);
            if extinct {
                break;
            }
        }
        Ok(reports)
    }

    fn advance_phase(&mut self) {
        if let Some(next) = self.phase.next() {
            self.phase = next;
        }
    }

    fn decide(&mut self, report: &mut TickReport) -> Vec<ActionDescriptor> {
        let mut chosen = Vec::with_capacity(self.world.character_count());
        self.world.refresh_resource_view();

        for id in self.world.character_ids() {
            let Some((character, grid)) = self.world.character_and_grid_mut(id) else {
                continue;
            };
            let candidates = character.available_actions(grid);
            let choice = character.select_action(&candidates);

            match candidates.get(choice) {
                Some(&action) => chosen.push(action),
                None => {
                    warn!(
                        character = %id,
                        choice,
                        available = candidates.len(),
                        "invalid action choice, skipping character"
                    );
                    report.skipped.push(id);
                }
            }
        }

        chosen
    }

    fn execute(&mut self, chosen: Vec<ActionDescriptor>, report: &mut TickReport) -> Result<()> {
        let registry = &self.registry;
        for action in chosen {
            let outcome = self
                .world
                .with_action_context(action.subject, |subject, ctx| {
                    registry.execute(action.action, subject, ctx, action.object)
                })
                .ok_or(WorldError::CharacterNotFound(action.subject))??;
            report.record(action, outcome);
        }
        Ok(())
    }

    fn bookkeep(&mut self, report: &mut TickReport) {
        for id in self.world.character_ids() {
            self.world.sync_position(id);

            let alive = self
                .world
                .character_mut(id)
                .is_some_and(|character| character.tick(self.dt));

            if !alive {
                self.world.remove_character(id);
                debug!(character = %id, tick = report.tick, "character died");
                report.deaths.push(id);
            }
        }
    }
}
