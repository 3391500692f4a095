use crate::grid::cell::Cell;
use thiserror::Error;

/// Configuration problems, reported when a solver is constructed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("grid must have at least one row and one column, got {rows}x{cols}")]
    InvalidDimension { rows: usize, cols: usize },

    #[error("reward cell {cell} lies outside the {rows}x{cols} grid")]
    OutOfBoundsReward { cell: Cell, rows: usize, cols: usize },

    #[error("wall cell {cell} lies outside the {rows}x{cols} grid")]
    OutOfBoundsWall { cell: Cell, rows: usize, cols: usize },

    #[error("cell {cell} is both a reward cell and a wall")]
    RewardOnWall { cell: Cell },

    #[error("{name} must be within [0, 1], got {value}")]
    InvalidProbability { name: &'static str, value: f64 },

    #[error("reward at {cell} must be finite, got {value}")]
    NonFiniteReward { cell: Cell, value: f64 },
}
