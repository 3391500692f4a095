pub mod env;
pub mod grid;
pub mod solver;

pub use grid::action::Action;
pub use grid::cell::Cell;
pub use solver::config::{GridConfig, NoiseModel};
pub use solver::error::ConfigError;
pub use solver::solver::{GridSolver, CONVERGENCE_THRESHOLD};

#[global_allocator]
static ALLOC: jemallocator::Jemalloc = jemallocator::Jemalloc;
