use ndarray::Array2;
use serde::Serialize;

#[derive(Serialize, Debug, Clone)]
pub struct RunReport {
    pub iterations: usize,
    pub converged: bool,
    pub final_delta: Option<f64>,
    pub values: Array2<f64>,
}
