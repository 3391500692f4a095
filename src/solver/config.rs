use crate::grid::cell::Cell;
use crate::grid::layout::GridLayout;
use crate::solver::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// How the noise mass of an action is spread over the other actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoiseModel {
    /// Each of the three unintended actions gets `noise / 2`; blocked moves are dropped.
    #[default]
    Halved,
    /// Each unintended action gets `noise / 3`; blocked moves leave the agent in place.
    Uniform,
}

impl NoiseModel {
    /// Probability of executing `actual` when `intended` was chosen.
    #[inline]
    pub fn probability(&self, noise: f64, intended: bool) -> f64 {
        if intended {
            return 1.0 - noise;
        }
        match self {
            NoiseModel::Halved => noise / 2.0,
            NoiseModel::Uniform => noise / 3.0,
        }
    }

    #[inline]
    pub fn blocked_stays(&self) -> bool {
        matches!(self, NoiseModel::Uniform)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridConfig {
    rows: usize,
    cols: usize,
    rewards: Vec<(Cell, f64)>,
    walls: Vec<Cell>,
    gamma: f64,
    noise: f64,
    noise_model: NoiseModel,
}

impl GridConfig {
    pub fn new(rows: usize, cols: usize) -> Self {
        GridConfig {
            rows,
            cols,
            rewards: Vec::new(),
            walls: Vec::new(),
            gamma: 0.9,
            noise: 0.2,
            noise_model: NoiseModel::Halved,
        }
    }

    /// The 3x4 world: +1 at (0, 3), -1 at (1, 3) and a wall at (1, 1).
    pub fn classic() -> Self {
        let mut config = GridConfig::new(3, 4);
        config.add_reward(Cell::new(0, 3), 1.0);
        config.add_reward(Cell::new(1, 3), -1.0);
        config.add_wall(Cell::new(1, 1));
        config
    }

    pub fn set_gamma(&mut self, gamma: f64) {
        self.gamma = gamma;
    }
    pub fn set_noise(&mut self, noise: f64) {
        self.noise = noise;
    }
    pub fn set_noise_model(&mut self, noise_model: NoiseModel) {
        self.noise_model = noise_model;
    }

    /// Replaces any reward already set for `cell`.
    pub fn add_reward(&mut self, cell: Cell, reward: f64) {
        match self.rewards.iter_mut().find(|(c, _)| *c == cell) {
            Some(entry) => entry.1 = reward,
            None => self.rewards.push((cell, reward)),
        }
    }

    pub fn add_wall(&mut self, cell: Cell) {
        if !self.walls.contains(&cell) {
            self.walls.push(cell);
        }
    }

    pub fn clear_walls(&mut self) {
        self.walls.clear();
    }

    pub fn rows(&self) -> usize {
        self.rows
    }
    pub fn cols(&self) -> usize {
        self.cols
    }
    pub fn gamma(&self) -> f64 {
        self.gamma
    }
    pub fn noise(&self) -> f64 {
        self.noise
    }
    pub fn noise_model(&self) -> NoiseModel {
        self.noise_model
    }

    pub fn validate(&self) -> Result<GridLayout, ConfigError> {
        let (rows, cols) = (self.rows, self.cols);
        if rows == 0 || cols == 0 {
            return Err(ConfigError::InvalidDimension { rows, cols });
        }
        check_probability("gamma", self.gamma)?;
        check_probability("noise", self.noise)?;

        let mut rewards = BTreeMap::new();
        for &(cell, value) in &self.rewards {
            if !cell.in_bounds(rows, cols) {
                return Err(ConfigError::OutOfBoundsReward { cell, rows, cols });
            }
            if !value.is_finite() {
                return Err(ConfigError::NonFiniteReward { cell, value });
            }
            rewards.insert(cell, value);
        }

        let mut walls = BTreeSet::new();
        for &cell in &self.walls {
            if !cell.in_bounds(rows, cols) {
                return Err(ConfigError::OutOfBoundsWall { cell, rows, cols });
            }
            if rewards.contains_key(&cell) {
                return Err(ConfigError::RewardOnWall { cell });
            }
            walls.insert(cell);
        }
        Ok(GridLayout::new(rows, cols, rewards, walls))
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        Self::classic()
    }
}

fn check_probability(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::InvalidProbability { name, value })
    }
}

#[cfg(test)]
mod tests {
    use super::{GridConfig, NoiseModel};
    use crate::grid::cell::Cell;
    use crate::solver::error::ConfigError;

    #[test]
    fn test_classic_validates() {
        let layout = GridConfig::classic().validate().unwrap();
        assert_eq!(layout.shape(), (3, 4));
        assert_eq!(layout.rewards().len(), 2);
        assert!(layout.is_wall(Cell::new(1, 1)));
    }

    #[test]
    fn test_invalid_dimension() {
        assert_eq!(
            GridConfig::new(0, 4).validate().unwrap_err(),
            ConfigError::InvalidDimension { rows: 0, cols: 4 }
        );
        assert!(GridConfig::new(3, 0).validate().is_err());
    }

    #[test]
    fn test_out_of_bounds() {
        let mut config = GridConfig::new(2, 2);
        config.add_reward(Cell::new(2, 0), 1.0);
        assert_eq!(
            config.validate().unwrap_err(),
            ConfigError::OutOfBoundsReward {
                cell: Cell::new(2, 0),
                rows: 2,
                cols: 2
            }
        );

        let mut config = GridConfig::new(2, 2);
        config.add_wall(Cell::new(0, 5));
        assert!(matches!(
            config.validate(),
            Err(ConfigError::OutOfBoundsWall { .. })
        ));
    }

    #[test]
    fn test_reward_on_wall() {
        let mut config = GridConfig::classic();
        config.add_wall(Cell::new(0, 3));
        assert_eq!(
            config.validate().unwrap_err(),
            ConfigError::RewardOnWall {
                cell: Cell::new(0, 3)
            }
        );
    }

    #[test]
    fn test_invalid_probabilities() {
        let mut config = GridConfig::classic();
        config.set_gamma(1.5);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidProbability { name: "gamma", .. })
        ));

        let mut config = GridConfig::classic();
        config.set_noise(f64::NAN);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidProbability { name: "noise", .. })
        ));

        let mut config = GridConfig::classic();
        config.add_reward(Cell::new(2, 2), f64::INFINITY);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonFiniteReward { .. })
        ));
    }

    #[test]
    fn test_add_reward_replaces() {
        let mut config = GridConfig::new(1, 2);
        config.add_reward(Cell::new(0, 1), 1.0);
        config.add_reward(Cell::new(0, 1), 2.0);
        let layout = config.validate().unwrap();
        assert_eq!(layout.rewards().get(&Cell::new(0, 1)), Some(&2.0));
    }

    #[test]
    fn test_noise_model_weights() {
        assert_eq!(NoiseModel::Halved.probability(0.2, true), 0.8);
        assert_eq!(NoiseModel::Halved.probability(0.2, false), 0.1);
        assert!((NoiseModel::Uniform.probability(0.3, false) - 0.1).abs() < 1e-12);
    }
}
