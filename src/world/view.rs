//! Read-only tile resource levels for policies.
//!
//! Policies only ever see their candidate list. A scripted policy that needs
//! to know what lies on neighboring tiles holds a `ResourceView` instead of a
//! reference into the world. The world keeps the view current: it is
//! refreshed at the start of every tick's decision phase, so every policy in
//! a tick sees the same levels.

use std::cell::RefCell;
use std::rc::Rc;

use crate::core::entity::TileId;
use crate::grid::Grid;

/// Shared handle to per-tile resource levels, indexed by tile id.
#[derive(Clone, Debug, Default)]
pub struct ResourceView {
    levels: Rc<RefCell<Vec<f64>>>,
}

impl ResourceView {
    /// Resources on a tile as of the last refresh.
    #[must_use]
    pub fn resources(&self, tile: TileId) -> Option<f64> {
        self.levels.borrow().get(tile.index()).copied()
    }

    /// Copy every tile's current resources.
    pub(crate) fn refresh(&self, grid: &Grid) {
        let mut levels = self.levels.borrow_mut();
        levels.clear();
        levels.extend(grid.tiles().map(|tile| tile.economy.current()));
    }

    /// Whether any handle besides the world's own is alive.
    pub(crate) fn is_shared(&self) -> bool {
        Rc::strong_count(&self.levels) > 1
    }
}
