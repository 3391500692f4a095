use crate::grid::action::{Action, ActionValues};
use crate::grid::cell::Cell;
use crate::grid::layout::{CellKind, GridLayout};
use crate::solver::config::GridConfig;
use crate::solver::error::ConfigError;
use crate::solver::observer::{NoopObserver, SweepObserver};
use crate::solver::policy::{Policy, PolicyCell};
use crate::solver::report::RunReport;
use ndarray::Array2;
use ordered_float::OrderedFloat;
use tracing::{debug, info, warn};

/// A run stops once no cell changes by this much or more in one sweep.
pub const CONVERGENCE_THRESHOLD: f64 = 1e-4;

/// Synchronous value iteration over a grid world.
#[derive(Debug, Clone)]
pub struct GridSolver {
    config: GridConfig,
    layout: GridLayout,
    values: Array2<f64>,
    sweeps: usize,
}

impl GridSolver {
    pub fn new(config: &GridConfig) -> Result<Self, ConfigError> {
        let layout = config.validate()?;
        let values = initial_values(&layout);
        Ok(GridSolver {
            config: config.clone(),
            layout,
            values,
            sweeps: 0,
        })
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    pub fn layout(&self) -> &GridLayout {
        &self.layout
    }

    pub fn values(&self) -> &Array2<f64> {
        &self.values
    }

    pub fn value(&self, cell: Cell) -> Option<f64> {
        self.values.get(cell.index()).copied()
    }

    /// Total number of sweeps applied since construction.
    pub fn sweeps(&self) -> usize {
        self.sweeps
    }

    /// Expected discounted value of choosing `intended` in `cell`, read from the current table.
    pub fn expected_value(&self, cell: Cell, intended: Action) -> f64 {
        let gamma = self.config.gamma();
        let noise = self.config.noise();
        let model = self.config.noise_model();
        Action::ALL
            .iter()
            .map(|&actual| {
                let prob = model.probability(noise, actual == intended);
                match self.layout.destination(cell, actual) {
                    Some(next) => prob * (gamma * self.values[next.index()]),
                    None if model.blocked_stays() => prob * (gamma * self.values[cell.index()]),
                    None => 0.0,
                }
            })
            .sum()
    }

    pub fn action_values(&self, cell: Cell) -> ActionValues {
        ActionValues::from_fn(|action| self.expected_value(cell, action))
    }

    /// Applies one Bellman-optimality update to every open cell and returns
    /// the largest absolute change.
    pub fn sweep(&mut self) -> f64 {
        let mut new_values = self.values.clone();
        let mut delta = OrderedFloat(0.0f64);
        for cell in self.layout.open_cells() {
            let best = self.action_values(cell).max();
            delta = delta.max(OrderedFloat((best - self.values[cell.index()]).abs()));
            new_values[cell.index()] = best;
        }
        self.values = new_values;
        self.sweeps += 1;
        delta.into_inner()
    }

    pub fn run_value_iteration(&mut self, max_iterations: usize) -> RunReport {
        self.run_value_iteration_with(max_iterations, &mut NoopObserver)
    }

    pub fn run_value_iteration_with(
        &mut self,
        max_iterations: usize,
        observer: &mut impl SweepObserver,
    ) -> RunReport {
        info!(
            rows = self.layout.rows(),
            cols = self.layout.cols(),
            gamma = self.config.gamma(),
            noise = self.config.noise(),
            max_iterations,
            "starting value iteration"
        );
        let mut iterations = 0;
        let mut final_delta = None;
        let mut converged = false;
        for iteration in 1..=max_iterations {
            let delta = self.sweep();
            iterations = iteration;
            final_delta = Some(delta);
            debug!(iteration, delta, "sweep finished");
            observer.on_sweep(iteration, &self.layout, &self.values, delta);
            if delta < CONVERGENCE_THRESHOLD {
                info!(iteration, "value iteration converged");
                observer.on_converged(iteration);
                converged = true;
                break;
            }
        }
        if !converged {
            warn!(iterations, ?final_delta, "iteration cap reached before convergence");
            observer.on_cap_reached(iterations);
        }
        RunReport {
            iterations,
            converged,
            final_delta,
            values: self.values.clone(),
        }
    }

    /// Greedy policy for `values`: each open cell moves towards its most
    /// valuable reachable neighbor, ties going to the earlier action.
    ///
    /// Panics if `values` does not have the grid's shape.
    pub fn extract_policy(&self, values: &Array2<f64>) -> Policy {
        assert_eq!(values.dim(), self.layout.shape());
        let cells = self
            .layout
            .cells()
            .map(|cell| match self.layout.kind(cell) {
                CellKind::Terminal(reward) => PolicyCell::Terminal(reward),
                CellKind::Wall => PolicyCell::Wall,
                CellKind::Open => {
                    let neighbor_values = ActionValues::from_fn(|action| {
                        self.layout
                            .destination(cell, action)
                            .map(|next| values[next.index()])
                            .unwrap_or(f64::NEG_INFINITY)
                    });
                    PolicyCell::Move(neighbor_values.argmax())
                }
            })
            .collect();
        // `cells()` is row-major and yields exactly rows * cols items.
        Policy::new(Array2::from_shape_vec(self.layout.shape(), cells).unwrap())
    }

    pub fn policy(&self) -> Policy {
        self.extract_policy(&self.values)
    }
}

fn initial_values(layout: &GridLayout) -> Array2<f64> {
    let mut values = Array2::zeros(layout.shape());
    for (cell, reward) in layout.rewards() {
        values[cell.index()] = *reward;
    }
    values
}
