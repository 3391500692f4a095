use crate::grid::layout::{CellKind, GridLayout};
use crate::solver::policy::Policy;
use ndarray::Array2;
use std::fmt::Write;

pub const WALL_LABEL: &str = "WALL";

/// Reward label with an explicit sign, e.g. `+1` or `-0.5`.
pub fn format_reward(reward: f64) -> String {
    format!("{:+}", reward)
}

pub fn format_value(value: f64) -> String {
    format!("{:.3}", value)
}

/// Joins rows of labels into `| a | b | ` lines, one per row.
pub fn render_rows<I, R, S>(rows: I) -> String
where
    I: IntoIterator<Item = R>,
    R: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut output = String::new();
    for row in rows {
        output.push_str("| ");
        for label in row {
            output.push_str(label.as_ref());
            output.push_str(" | ");
        }
        output.push('\n');
    }
    output
}

pub fn render_values(layout: &GridLayout, values: &Array2<f64>) -> String {
    render_rows((0..layout.rows()).map(|row| {
        (0..layout.cols()).map(move |col| match layout.kind((row, col).into()) {
            CellKind::Terminal(reward) => format_reward(reward),
            CellKind::Wall => WALL_LABEL.to_string(),
            CellKind::Open => format_value(values[(row, col)]),
        })
    }))
}

pub fn render_policy(policy: &Policy) -> String {
    let mut output = String::new();
    for row in policy.cells().rows() {
        output.push_str("| ");
        for cell in row {
            // Writing into a String cannot fail.
            let _ = write!(output, "{} | ", cell);
        }
        output.push('\n');
    }
    output
}

#[cfg(test)]
mod tests {
    use super::{format_reward, format_value, render_rows, render_values};
    use crate::solver::config::GridConfig;
    use ndarray::Array2;

    #[test]
    fn test_labels() {
        assert_eq!(format_reward(1.0), "+1");
        assert_eq!(format_reward(-1.0), "-1");
        assert_eq!(format_reward(0.5), "+0.5");
        assert_eq!(format_value(0.82664), "0.827");
        assert_eq!(format_value(0.0), "0.000");
        assert_eq!(format_value(-0.09), "-0.090");
    }

    #[test]
    fn test_render_rows() {
        assert_eq!(
            render_rows([["a", "b"], ["c", "d"]]),
            "| a | b | \n| c | d | \n"
        );
    }

    #[test]
    fn test_render_initial_values() {
        let layout = GridConfig::classic().validate().unwrap();
        let values = Array2::zeros(layout.shape());
        assert_eq!(
            render_values(&layout, &values),
            "| 0.000 | 0.000 | 0.000 | +1 | \n\
             | 0.000 | WALL | 0.000 | -1 | \n\
             | 0.000 | 0.000 | 0.000 | 0.000 | \n"
        );
    }
}
