use crate::grid::action::Action;
use crate::grid::cell::Cell;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// What occupies a grid cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CellKind {
    Open,
    Terminal(f64),
    Wall,
}

/// Validated shape of the world: dimensions, absorbing reward cells and walls.
///
/// Built by `GridConfig::validate`, so every reward and wall lies inside the
/// grid and no cell is both.
#[derive(Debug, Clone)]
pub struct GridLayout {
    rows: usize,
    cols: usize,
    rewards: BTreeMap<Cell, f64>,
    walls: BTreeSet<Cell>,
}

#[derive(Serialize)]
pub struct LayoutDescription<'a> {
    pub rows: usize,
    pub cols: usize,
    pub terminals: Vec<(&'a Cell, &'a f64)>,
    pub walls: Vec<&'a Cell>,
}

impl GridLayout {
    pub(crate) fn new(
        rows: usize,
        cols: usize,
        rewards: BTreeMap<Cell, f64>,
        walls: BTreeSet<Cell>,
    ) -> Self {
        GridLayout {
            rows,
            cols,
            rewards,
            walls,
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn rewards(&self) -> &BTreeMap<Cell, f64> {
        &self.rewards
    }

    pub fn walls(&self) -> &BTreeSet<Cell> {
        &self.walls
    }

    pub fn kind(&self, cell: Cell) -> CellKind {
        if let Some(reward) = self.rewards.get(&cell) {
            CellKind::Terminal(*reward)
        } else if self.walls.contains(&cell) {
            CellKind::Wall
        } else {
            CellKind::Open
        }
    }

    pub fn is_wall(&self, cell: Cell) -> bool {
        self.walls.contains(&cell)
    }

    /// Destination of `action` from `cell`; `None` when it leaves the grid or hits a wall.
    pub fn destination(&self, cell: Cell, action: Action) -> Option<Cell> {
        cell.step(action, self.rows, self.cols)
            .filter(|next| !self.walls.contains(next))
    }

    /// Row-major iterator over all cells.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (0..self.rows).flat_map(move |row| (0..self.cols).map(move |col| Cell::new(row, col)))
    }

    /// Cells whose value is recomputed by a sweep.
    pub fn open_cells(&self) -> impl Iterator<Item = Cell> + '_ {
        self.cells()
            .filter(|cell| self.kind(*cell) == CellKind::Open)
    }

    pub fn description(&self) -> LayoutDescription {
        LayoutDescription {
            rows: self.rows,
            cols: self.cols,
            terminals: self.rewards.iter().collect(),
            walls: self.walls.iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{CellKind, GridLayout};
    use crate::grid::action::Action;
    use crate::grid::cell::Cell;
    use std::collections::{BTreeMap, BTreeSet};

    fn classic() -> GridLayout {
        let rewards = BTreeMap::from([(Cell::new(0, 3), 1.0), (Cell::new(1, 3), -1.0)]);
        let walls = BTreeSet::from([Cell::new(1, 1)]);
        GridLayout::new(3, 4, rewards, walls)
    }

    #[test]
    fn test_kinds() {
        let layout = classic();
        assert_eq!(layout.kind(Cell::new(0, 3)), CellKind::Terminal(1.0));
        assert_eq!(layout.kind(Cell::new(1, 3)), CellKind::Terminal(-1.0));
        assert_eq!(layout.kind(Cell::new(1, 1)), CellKind::Wall);
        assert_eq!(layout.kind(Cell::new(2, 2)), CellKind::Open);
        assert_eq!(layout.cells().count(), 12);
        assert_eq!(layout.open_cells().count(), 9);
    }

    #[test]
    fn test_destination_blocks_walls() {
        let layout = classic();
        assert_eq!(layout.destination(Cell::new(1, 0), Action::Right), None);
        assert_eq!(layout.destination(Cell::new(0, 1), Action::Down), None);
        assert_eq!(layout.destination(Cell::new(0, 0), Action::Up), None);
        assert_eq!(
            layout.destination(Cell::new(1, 2), Action::Right),
            Some(Cell::new(1, 3))
        );
    }
}
