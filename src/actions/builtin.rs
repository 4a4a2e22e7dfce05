//! The two canonical action kinds: Move and Harvest.

use tracing::debug;

use super::context::ActionContext;
use super::registry::ActionOutcome;
use crate::characters::Character;
use crate::core::entity::EntityRef;

/// Penalty for an invalid move, in multiples of the subject's burn rate.
pub const INVALID_MOVE_PENALTY: f64 = 2.0;

/// Move the subject onto the object tile.
///
/// - Object is the current tile: no-op ("stay").
/// - Object is adjacent to the current tile: the subject moves there.
/// - Anything else: the subject stays put and burns
///   `INVALID_MOVE_PENALTY * energy_burn_rate` energy.
pub fn execute_move(character: &mut Character, ctx: &mut ActionContext<'_>, object: EntityRef) -> ActionOutcome {
    let Some(target) = object.as_tile() else {
        return ActionOutcome::NoOp;
    };
    let current = character.position();
    if target == current {
        return ActionOutcome::NoOp;
    }

    let adjacent = ctx.grid().tile(current).is_some_and(|tile| tile.is_adjacent(target));
    if adjacent {
        character.set_position(target);
        ActionOutcome::Applied
    } else {
        let penalty = INVALID_MOVE_PENALTY * character.traits().energy_burn_rate;
        debug!(character = %character.id(), from = %current, to = %target, penalty, "invalid move");
        character.burn_energy(penalty);
        ActionOutcome::Penalized
    }
}

/// Transfer all of the object tile's resources into the subject's energy.
pub fn execute_harvest(character: &mut Character, ctx: &mut ActionContext<'_>, object: EntityRef) -> ActionOutcome {
    let Some(tile) = object.as_tile().and_then(|id| ctx.tile_mut(id)) else {
        return ActionOutcome::NoOp;
    };
    let harvested = tile.economy.harvest();
    character.add_energy(harvested);
    ActionOutcome::Applied
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor::FnActor;
    use crate::characters::CharacterTraits;
    use crate::core::entity::{CharacterId, TileId};
    use crate::grid::{Coord, Direction, Grid, ResourceEconomy};
    use rustc_hash::FxHashMap;

    fn grid() -> Grid {
        Grid::generate(4, 4, &[ResourceEconomy::new(50.0, 0.0, 100.0).unwrap()], &[1.0], 0).unwrap()
    }

    fn character_at(grid: &Grid, coord: Coord, energy: f64, burn: f64) -> Character {
        let traits = CharacterTraits::new(100.0, 100.0)
            .with_energy(energy)
            .with_burn_rate(burn);
        let tile = grid.tile_id(coord).unwrap();
        Character::new(CharacterId(0), traits, tile, Box::new(FnActor::new(|_| 0)))
    }

    fn run(
        executor: fn(&mut Character, &mut ActionContext<'_>, EntityRef) -> ActionOutcome,
        character: &mut Character,
        grid: &mut Grid,
        object: EntityRef,
    ) -> ActionOutcome {
        let mut others = FxHashMap::default();
        executor(character, &mut ActionContext::new(grid, &mut others), object)
    }

    #[test]
    fn test_stay_is_noop() {
        let mut grid = grid();
        let mut character = character_at(&grid, Coord::new(1, 1), 10.0, 5.0);
        let here = character.position();

        let outcome = run(execute_move, &mut character, &mut grid, EntityRef::tile(here));
        assert_eq!(outcome, ActionOutcome::NoOp);
        assert_eq!(character.position(), here);
        assert_eq!(character.traits().energy_on_hand, 10.0);
    }

    #[test]
    fn test_move_to_each_neighbor() {
        let mut grid = grid();
        for direction in Direction::ALL {
            let mut character = character_at(&grid, Coord::new(0, 0), 10.0, 5.0);
            let target = grid.tile(character.position()).unwrap().neighbor(direction);

            let outcome = run(execute_move, &mut character, &mut grid, EntityRef::tile(target));
            assert_eq!(outcome, ActionOutcome::Applied);
            assert_eq!(character.position(), target);
            assert_eq!(character.traits().energy_on_hand, 10.0);
        }
    }

    #[test]
    fn test_invalid_move_charges_penalty() {
        let mut grid = grid();
        let mut character = character_at(&grid, Coord::new(0, 0), 20.0, 5.0);
        let here = character.position();
        let far = grid.tile_id(Coord::new(2, 2)).unwrap();

        let outcome = run(execute_move, &mut character, &mut grid, EntityRef::tile(far));
        assert_eq!(outcome, ActionOutcome::Penalized);
        assert_eq!(character.position(), here);
        assert_eq!(character.traits().energy_on_hand, 10.0);
        assert_eq!(character.traits().health, 100.0);
        assert_eq!(character.reward(), 0.0);
    }

    #[test]
    fn test_invalid_move_drains_health_on_deficit() {
        let mut grid = grid();
        let mut character = character_at(&grid, Coord::new(0, 0), 4.0, 5.0);
        let far = grid.tile_id(Coord::new(2, 2)).unwrap();

        run(execute_move, &mut character, &mut grid, EntityRef::tile(far));
        assert_eq!(character.traits().energy_on_hand, 0.0);
        assert_eq!(character.traits().health, 94.0);
        assert_eq!(character.reward(), -6.0);
    }

    #[test]
    fn test_move_outside_grid_is_invalid() {
        let mut grid = grid();
        let mut character = character_at(&grid, Coord::new(0, 0), 20.0, 1.0);
        let outcome = run(execute_move, &mut character, &mut grid, EntityRef::tile(TileId(999)));
        assert_eq!(outcome, ActionOutcome::Penalized);
        assert_eq!(character.traits().energy_on_hand, 18.0);
    }

    #[test]
    fn test_harvest_transfers_everything() {
        let mut grid = grid();
        let mut character = character_at(&grid, Coord::new(1, 2), 10.0, 5.0);
        let here = character.position();

        let outcome = run(execute_harvest, &mut character, &mut grid, EntityRef::tile(here));
        assert_eq!(outcome, ActionOutcome::Applied);
        assert_eq!(character.traits().energy_on_hand, 60.0);
        assert_eq!(grid.tile(here).unwrap().economy.current(), 0.0);
    }

    #[test]
    fn test_non_tile_object_is_noop() {
        let mut grid = grid();
        let mut character = character_at(&grid, Coord::new(0, 0), 10.0, 5.0);
        let other = EntityRef::character(CharacterId(1));

        assert_eq!(run(execute_move, &mut character, &mut grid, other), ActionOutcome::NoOp);
        assert_eq!(run(execute_harvest, &mut character, &mut grid, other), ActionOutcome::NoOp);
        assert_eq!(character.traits().energy_on_hand, 10.0);
    }
}
