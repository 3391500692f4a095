use crate::env::streamer::{StreamError, Streamer};
use crate::solver::config::GridConfig;
use crate::solver::error::ConfigError;
use crate::solver::solver::GridSolver;
use indicatif::{ProgressBar, ProgressStyle};
use itertools::iproduct;
use ndarray::Array2;
use rayon::iter::{IntoParallelIterator, ParallelIterator};
use serde::Serialize;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum ScanError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Stream(#[from] StreamError),
}

#[derive(Serialize, Debug, Clone)]
pub struct ScanResult {
    pub gamma: f64,
    pub noise: f64,
    pub iterations: usize,
    pub converged: bool,
    pub values: Array2<f64>,
    pub policy: Vec<Vec<String>>,
}

/// Solves the same grid for every (gamma, noise) pair in parallel.
pub struct ParameterScan {
    base: GridConfig,
    gammas: Vec<f64>,
    noises: Vec<f64>,
    max_iterations: usize,
    show_progress: bool,
}

impl ParameterScan {
    pub fn new(base: GridConfig, gammas: Vec<f64>, noises: Vec<f64>) -> Self {
        ParameterScan {
            base,
            gammas,
            noises,
            max_iterations: 100,
            show_progress: false,
        }
    }

    pub fn set_max_iterations(&mut self, max_iterations: usize) {
        self.max_iterations = max_iterations;
    }
    pub fn set_show_progress(&mut self, show_progress: bool) {
        self.show_progress = show_progress;
    }

    /// Configurations in gamma-major order; fails on the first invalid one.
    pub fn configs(&self) -> Result<Vec<GridConfig>, ConfigError> {
        iproduct!(self.gammas.iter(), self.noises.iter())
            .map(|(&gamma, &noise)| {
                let mut config = self.base.clone();
                config.set_gamma(gamma);
                config.set_noise(noise);
                config.validate().map(|_| config)
            })
            .collect()
    }

    fn progress_bar(&self, len: usize) -> ProgressBar {
        if !self.show_progress {
            return ProgressBar::hidden();
        }
        let progress_bar = ProgressBar::new(len as u64);
        if let Ok(style) =
            ProgressStyle::default_bar().template("[{elapsed_precise}] {wide_bar} {pos}/{len} {eta}")
        {
            progress_bar.set_style(style);
        }
        progress_bar
    }

    fn solve(config: &GridConfig, max_iterations: usize) -> Result<ScanResult, ConfigError> {
        let mut solver = GridSolver::new(config)?;
        let report = solver.run_value_iteration(max_iterations);
        Ok(ScanResult {
            gamma: config.gamma(),
            noise: config.noise(),
            iterations: report.iterations,
            converged: report.converged,
            policy: solver.policy().labels(),
            values: report.values,
        })
    }

    pub fn run(&self) -> Result<Vec<ScanResult>, ConfigError> {
        let configs = self.configs()?;
        info!(points = configs.len(), "starting parameter scan");
        let progress_bar = self.progress_bar(configs.len());
        let results = configs
            .into_par_iter()
            .map(|config| {
                let result = Self::solve(&config, self.max_iterations);
                progress_bar.inc(1);
                result
            })
            .collect();
        progress_bar.finish_and_clear();
        results
    }

    /// Like `run`, but sends each result to `streamer` as soon as it is ready.
    pub fn stream(&self, streamer: &Streamer) -> Result<usize, ScanError> {
        let configs = self.configs()?;
        let count = configs.len();
        info!(points = count, "starting parameter scan");
        let progress_bar = self.progress_bar(count);
        configs.into_par_iter().try_for_each(|config| {
            let result = Self::solve(&config, self.max_iterations)?;
            streamer.send(&result)?;
            progress_bar.inc(1);
            Ok::<(), ScanError>(())
        })?;
        progress_bar.finish_and_clear();
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::ParameterScan;
    use crate::solver::config::GridConfig;
    use crate::solver::error::ConfigError;

    #[test]
    fn test_scan_order_and_results() {
        let scan = ParameterScan::new(GridConfig::classic(), vec![0.5, 0.9], vec![0.0, 0.2]);
        let results = scan.run().unwrap();
        let points: Vec<_> = results.iter().map(|r| (r.gamma, r.noise)).collect();
        assert_eq!(points, vec![(0.5, 0.0), (0.5, 0.2), (0.9, 0.0), (0.9, 0.2)]);
        assert!(results.iter().all(|r| r.converged));
        assert_eq!(results[3].iterations, 17);
        assert_eq!(results[3].policy[0][0], "Right");
        // Less discounting pulls more value back to the start.
        assert!(results[2].values[(2, 0)] > results[0].values[(2, 0)]);
    }

    #[test]
    fn test_scan_rejects_invalid_point() {
        let scan = ParameterScan::new(GridConfig::classic(), vec![0.9, 1.2], vec![0.2]);
        assert!(matches!(
            scan.run(),
            Err(ConfigError::InvalidProbability { name: "gamma", .. })
        ));
    }
}
