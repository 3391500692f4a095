use crate::grid::action::Action;
use crate::grid::cell::Cell;
use crate::solver::render::{format_reward, render_policy, WALL_LABEL};
use ndarray::Array2;
use serde::{Serialize, Serializer};
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PolicyCell {
    Terminal(f64),
    Wall,
    Move(Action),
}

impl PolicyCell {
    pub fn action(&self) -> Option<Action> {
        match self {
            PolicyCell::Move(action) => Some(*action),
            _ => None,
        }
    }
}

impl Display for PolicyCell {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            PolicyCell::Terminal(reward) => f.write_str(&format_reward(*reward)),
            PolicyCell::Wall => f.write_str(WALL_LABEL),
            PolicyCell::Move(action) => Display::fmt(action, f),
        }
    }
}

impl Serialize for PolicyCell {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

/// Greedy policy snapshot, one entry per cell.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Policy {
    cells: Array2<PolicyCell>,
}

impl Policy {
    pub(crate) fn new(cells: Array2<PolicyCell>) -> Self {
        Policy { cells }
    }

    pub fn cells(&self) -> &Array2<PolicyCell> {
        &self.cells
    }

    pub fn get(&self, cell: Cell) -> Option<&PolicyCell> {
        self.cells.get(cell.index())
    }

    pub fn labels(&self) -> Vec<Vec<String>> {
        self.cells
            .rows()
            .into_iter()
            .map(|row| row.iter().map(|c| c.to_string()).collect())
            .collect()
    }
}

impl Display for Policy {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&render_policy(self))
    }
}
