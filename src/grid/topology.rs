//! Grid generation and coordinate lookup.
//!
//! The grid is a `width x height` torus. Tiles live in an arena indexed by
//! `TileId`; generation walks `x` in the outer loop and `y` in the inner loop,
//! so `TileId = x * height + y`.

use serde::{Deserialize, Serialize};
use tracing::info;

use super::resources::ResourceEconomy;
use super::tile::{Direction, Tile};
use crate::core::config::WorldConfig;
use crate::core::entity::TileId;
use crate::core::error::{Result, WorldError};
use crate::core::rng::WorldRng;

/// Grid coordinate. `x` is the column (`0..width`), `y` the row (`0..height`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coord {
    pub x: usize,
    pub y: usize,
}

impl Coord {
    #[must_use]
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

impl From<(usize, usize)> for Coord {
    fn from((x, y): (usize, usize)) -> Self {
        Self { x, y }
    }
}

impl std::fmt::Display for Coord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Toroidal tile lattice. Owns every tile.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    width: usize,
    height: usize,
    tiles: Vec<Tile>,
}

impl Grid {
    /// Generate a grid.
    ///
    /// Each tile's economy is a copy of `prototypes[i]`, where `i` is drawn
    /// from the discrete distribution over `weights`. The result depends only
    /// on the arguments.
    ///
    /// ```
    /// use rust_gridworld::grid::{Coord, Grid, ResourceEconomy};
    ///
    /// let grain = ResourceEconomy::new(200.0, 10.0, 200.0).unwrap();
    /// let grid = Grid::generate(3, 2, &[grain], &[1.0], 0).unwrap();
    /// assert_eq!(grid.tile_count(), 6);
    ///
    /// let corner = grid.tile_at(Coord::new(0, 0)).unwrap();
    /// assert_eq!(corner.neighbors().len(), 4);
    /// ```
    pub fn generate(
        width: usize,
        height: usize,
        prototypes: &[ResourceEconomy],
        weights: &[f64],
        seed: u64,
    ) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(WorldError::InvalidDimensions { width, height });
        }
        if prototypes.len() != weights.len() {
            return Err(WorldError::PrototypeWeightMismatch {
                prototypes: prototypes.len(),
                weights: weights.len(),
            });
        }
        if prototypes.is_empty() {
            return Err(WorldError::NoPrototypes);
        }
        let tile_count = width
            .checked_mul(height)
            .filter(|&n| u32::try_from(n).is_ok())
            .ok_or(WorldError::GridTooLarge { width, height })?;

        let mut rng = WorldRng::new(seed);
        let mut tiles = Vec::with_capacity(tile_count);
        for index in 0..tile_count {
            let choice = rng.choose_weighted(weights).ok_or(WorldError::InvalidWeights)?;
            tiles.push(Tile::new(TileId(index as u32), prototypes[choice]));
        }

        let mut grid = Self { width, height, tiles };
        for index in 0..tile_count {
            let coord = grid.coord_unchecked(TileId(index as u32));
            let neighbors = Direction::ALL.map(|d| grid.id_unchecked(grid.step(coord, d)));
            grid.tiles[index].set_neighbors(neighbors);
        }

        info!(width, height, tiles = tile_count, seed, "generated grid");
        Ok(grid)
    }

    /// Generate a grid from a validated configuration.
    pub fn from_config(config: &WorldConfig) -> Result<Self> {
        config.validate()?;
        let prototypes = config
            .prototypes
            .iter()
            .map(|p| p.economy())
            .collect::<Result<Vec<_>>>()?;
        Self::generate(
            config.width,
            config.height,
            &prototypes,
            &config.weights(),
            config.random_seed,
        )
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    #[must_use]
    pub fn tile_count(&self) -> usize {
        self.tiles.len()
    }

    /// Check that a coordinate lies inside the grid.
    #[must_use]
    pub fn contains(&self, coord: Coord) -> bool {
        coord.x < self.width && coord.y < self.height
    }

    /// Id of the tile at `coord`.
    #[must_use]
    pub fn tile_id(&self, coord: Coord) -> Option<TileId> {
        self.contains(coord).then(|| self.id_unchecked(coord))
    }

    /// Coordinate of a tile.
    #[must_use]
    pub fn coord_of(&self, id: TileId) -> Option<Coord> {
        (id.index() < self.tiles.len()).then(|| self.coord_unchecked(id))
    }

    #[must_use]
    pub fn tile(&self, id: TileId) -> Option<&Tile> {
        self.tiles.get(id.index())
    }

    pub fn tile_mut(&mut self, id: TileId) -> Option<&mut Tile> {
        self.tiles.get_mut(id.index())
    }

    #[must_use]
    pub fn tile_at(&self, coord: Coord) -> Option<&Tile> {
        self.tile_id(coord).and_then(|id| self.tile(id))
    }

    /// Iterate over tiles in id order.
    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.iter()
    }

    /// Run regeneration on every tile.
    pub fn regenerate(&mut self, dt: f64) {
        for tile in &mut self.tiles {
            tile.economy.tick(dt);
        }
    }

    /// Coordinate one step away, wrapping at the edges.
    #[must_use]
    pub fn step(&self, coord: Coord, direction: Direction) -> Coord {
        let Coord { x, y } = coord;
        match direction {
            Direction::West => Coord::new(if x == 0 { self.width - 1 } else { x - 1 }, y),
            Direction::East => Coord::new(if x + 1 == self.width { 0 } else { x + 1 }, y),
            Direction::North => Coord::new(x, if y == 0 { self.height - 1 } else { y - 1 }),
            Direction::South => Coord::new(x, if y + 1 == self.height { 0 } else { y + 1 }),
        }
    }

    fn id_unchecked(&self, coord: Coord) -> TileId {
        TileId((coord.x * self.height + coord.y) as u32)
    }

    fn coord_unchecked(&self, id: TileId) -> Coord {
        Coord::new(id.index() / self.height, id.index() % self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grain() -> ResourceEconomy {
        ResourceEconomy::new(200.0, 10.0, 200.0).unwrap()
    }

    fn rock() -> ResourceEconomy {
        ResourceEconomy::new(0.0, 0.0, 0.0).unwrap()
    }

    #[test]
    fn test_id_coord_roundtrip() {
        let grid = Grid::generate(4, 3, &[grain()], &[1.0], 0).unwrap();
        for tile in grid.tiles() {
            let coord = grid.coord_of(tile.id()).unwrap();
            assert_eq!(grid.tile_id(coord), Some(tile.id()));
        }
        assert_eq!(grid.tile_id(Coord::new(1, 0)), Some(TileId(3)));
        assert_eq!(grid.tile_id(Coord::new(4, 0)), None);
        assert_eq!(grid.coord_of(TileId(12)), None);
    }

    #[test]
    fn test_wraparound_neighbors() {
        let grid = Grid::generate(4, 3, &[grain()], &[1.0], 0).unwrap();
        let origin = grid.tile_at(Coord::new(0, 0)).unwrap();

        let id = |x, y| grid.tile_id(Coord::new(x, y)).unwrap();
        assert_eq!(origin.neighbor(Direction::West), id(3, 0));
        assert_eq!(origin.neighbor(Direction::East), id(1, 0));
        assert_eq!(origin.neighbor(Direction::North), id(0, 2));
        assert_eq!(origin.neighbor(Direction::South), id(0, 1));
    }

    #[test]
    fn test_adjacency_is_symmetric() {
        let grid = Grid::generate(5, 4, &[grain()], &[1.0], 3).unwrap();
        for tile in grid.tiles() {
            for direction in Direction::ALL {
                let other = grid.tile(tile.neighbor(direction)).unwrap();
                assert_eq!(other.neighbor(direction.opposite()), tile.id());
            }
        }
    }

    #[test]
    fn test_single_tile_grid_is_its_own_neighbor() {
        let grid = Grid::generate(1, 1, &[grain()], &[1.0], 0).unwrap();
        let tile = grid.tile(TileId(0)).unwrap();
        assert_eq!(tile.neighbors(), &[TileId(0); 4]);
    }

    #[test]
    fn test_prototype_draw_respects_weights() {
        let grid = Grid::generate(6, 6, &[grain(), rock()], &[0.0, 1.0], 9).unwrap();
        assert!(grid.tiles().all(|t| t.economy == rock()));

        let mixed = Grid::generate(10, 10, &[grain(), rock()], &[1.0, 1.0], 9).unwrap();
        assert!(mixed.tiles().any(|t| t.economy == rock()));
        assert!(mixed.tiles().any(|t| t.economy == grain()));
    }

    #[test]
    fn test_generation_is_deterministic() {
        let a = Grid::generate(8, 8, &[grain(), rock()], &[2.0, 1.0], 42).unwrap();
        let b = Grid::generate(8, 8, &[grain(), rock()], &[2.0, 1.0], 42).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_configuration_errors() {
        assert!(matches!(
            Grid::generate(0, 3, &[grain()], &[1.0], 0),
            Err(WorldError::InvalidDimensions { .. })
        ));
        assert!(matches!(
            Grid::generate(3, 3, &[grain()], &[1.0, 2.0], 0),
            Err(WorldError::PrototypeWeightMismatch { prototypes: 1, weights: 2 })
        ));
        assert!(matches!(
            Grid::generate(3, 3, &[], &[], 0),
            Err(WorldError::NoPrototypes)
        ));
        assert!(matches!(
            Grid::generate(3, 3, &[grain()], &[0.0], 0),
            Err(WorldError::InvalidWeights)
        ));
    }

    #[test]
    fn test_regenerate_all_tiles() {
        let start = ResourceEconomy::new(0.0, 4.0, 10.0).unwrap();
        let mut grid = Grid::generate(2, 2, &[start], &[1.0], 0).unwrap();
        grid.regenerate(1.0);
        assert!(grid.tiles().all(|t| t.economy.current() == 4.0));
        grid.regenerate(5.0);
        assert!(grid.tiles().all(|t| t.economy.current() == 10.0));
    }

    #[test]
    fn test_from_config() {
        let config = WorldConfig::default().with_size(3, 5).with_seed(11);
        let grid = Grid::from_config(&config).unwrap();
        assert_eq!((grid.width(), grid.height()), (3, 5));
        assert_eq!(grid.tile_count(), 15);
    }
}
