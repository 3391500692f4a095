use serde::{Deserialize, Serialize, Serializer};
use std::fmt::{Debug, Display, Formatter};

pub const ACTION_COUNT: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    Right,
    Left,
    Up,
    Down,
}

impl Action {
    /// All actions in the order used for tie-breaking.
    pub const ALL: [Action; ACTION_COUNT] = [Action::Right, Action::Left, Action::Up, Action::Down];

    /// `(row, col)` offset of a unit step.
    #[inline]
    pub fn delta(self) -> (isize, isize) {
        match self {
            Action::Right => (0, 1),
            Action::Left => (0, -1),
            Action::Up => (-1, 0),
            Action::Down => (1, 0),
        }
    }

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            Action::Right => "Right",
            Action::Left => "Left",
            Action::Up => "Up",
            Action::Down => "Down",
        }
    }
}

impl Display for Action {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// One value per action, indexed in `Action::ALL` order.
#[derive(Debug, Clone, PartialEq)]
pub struct ActionArray<T>([T; ACTION_COUNT]);

pub type ActionValues = ActionArray<f64>;

impl<T: Default + Copy> Default for ActionArray<T> {
    fn default() -> Self {
        ActionArray([Default::default(); ACTION_COUNT])
    }
}

impl<T: Copy> ActionArray<T> {
    #[inline]
    pub fn from(values: [T; ACTION_COUNT]) -> Self {
        ActionArray(values)
    }

    pub fn from_fn(f: impl FnMut(Action) -> T) -> Self {
        ActionArray(Action::ALL.map(f))
    }

    #[inline]
    pub fn get(&self, action: Action) -> T {
        self.0[action.index()]
    }
}

impl ActionArray<f64> {
    /// First action holding the largest value. NaN entries never win.
    pub fn argmax(&self) -> Action {
        let (max_idx, _) = self.0.iter().enumerate().skip(1).fold(
            (0, self.0[0]),
            |(idx_max, val_max), (idx, val)| {
                if *val > val_max || (val_max.is_nan() && !val.is_nan()) {
                    (idx, *val)
                } else {
                    (idx_max, val_max)
                }
            },
        );
        Action::ALL[max_idx]
    }

    pub fn max(&self) -> f64 {
        self.get(self.argmax())
    }

    pub fn is_finite(&self) -> bool {
        self.0.iter().all(|v| v.is_finite())
    }
}

impl<T: Display + Debug> Display for ActionArray<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self.0)
    }
}

impl<T: Serialize> Serialize for ActionArray<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}
