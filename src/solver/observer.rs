use crate::grid::layout::GridLayout;
use crate::solver::render::render_values;
use ndarray::Array2;
use std::io::Write;

/// Receives progress of a value-iteration run.
pub trait SweepObserver {
    fn on_sweep(&mut self, iteration: usize, layout: &GridLayout, values: &Array2<f64>, delta: f64);

    fn on_converged(&mut self, _iteration: usize) {}

    fn on_cap_reached(&mut self, _iterations: usize) {}
}

#[derive(Debug, Default)]
pub struct NoopObserver;

impl SweepObserver for NoopObserver {
    fn on_sweep(&mut self, _: usize, _: &GridLayout, _: &Array2<f64>, _: f64) {}
}

/// Keeps a copy of the value table after every sweep.
#[derive(Debug, Default)]
pub struct SnapshotRecorder {
    snapshots: Vec<Array2<f64>>,
    deltas: Vec<f64>,
    converged_at: Option<usize>,
}

impl SnapshotRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshots(&self) -> &[Array2<f64>] {
        &self.snapshots
    }

    pub fn deltas(&self) -> &[f64] {
        &self.deltas
    }

    pub fn converged_at(&self) -> Option<usize> {
        self.converged_at
    }
}

impl SweepObserver for SnapshotRecorder {
    fn on_sweep(&mut self, _iteration: usize, _layout: &GridLayout, values: &Array2<f64>, delta: f64) {
        self.snapshots.push(values.clone());
        self.deltas.push(delta);
    }

    fn on_converged(&mut self, iteration: usize) {
        self.converged_at = Some(iteration);
    }
}

/// Prints the bordered value grid after each sweep.
///
/// The first write error stops further output and is returned by `finish`.
pub struct GridPrinter<W: Write> {
    output: W,
    error: Option<std::io::Error>,
}

impl<W: Write> GridPrinter<W> {
    pub fn new(output: W) -> Self {
        GridPrinter {
            output,
            error: None,
        }
    }

    pub fn finish(mut self) -> std::io::Result<W> {
        if let Some(error) = self.error.take() {
            return Err(error);
        }
        self.output.flush()?;
        Ok(self.output)
    }

    fn emit(&mut self, text: &str) {
        if self.error.is_none() {
            if let Err(error) = self.output.write_all(text.as_bytes()) {
                self.error = Some(error);
            }
        }
    }
}

impl<W: Write> SweepObserver for GridPrinter<W> {
    fn on_sweep(&mut self, iteration: usize, layout: &GridLayout, values: &Array2<f64>, _delta: f64) {
        self.emit(&format!("Iteration: {}\n", iteration));
        self.emit(&render_values(layout, values));
        self.emit("\n\n");
    }

    fn on_converged(&mut self, iteration: usize) {
        self.emit(&format!("Converged at iteration {}\n", iteration));
    }

    fn on_cap_reached(&mut self, iterations: usize) {
        self.emit(&format!(
            "Stopped after {} iterations without converging\n",
            iterations
        ));
    }
}
