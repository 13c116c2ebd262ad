use crate::{DEFAULT_OBSTACLE_PERCENTAGE, DEFAULT_STEP_DELAY};
use std::time::Duration;

/// Which cells count as adjacent during neighbour lookup.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Neighborhood {
    /// West, east, south and north.
    #[default]
    Four,
    /// The four orthogonal cells followed by the four diagonals.
    Eight,
}

/// Parameters for generating a random [GridField](crate::GridField).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GridConfig {
    pub width: usize,
    pub height: usize,
    /// Chance in percent that a cell becomes an obstacle; 0 gives an open grid and
    /// 100 a fully blocked one.
    pub obstacle_percentage: u8,
    /// Fixed seed for reproducible grids. Entropy is used when [None].
    pub seed: Option<u64>,
    pub neighborhood: Neighborhood,
    /// Only meaningful for [Neighborhood::Eight]: whether a diagonal step may squeeze
    /// between two blocked orthogonal cells.
    pub allow_corner_cutting: bool,
}

impl Default for GridConfig {
    fn default() -> GridConfig {
        GridConfig {
            width: 20,
            height: 20,
            obstacle_percentage: DEFAULT_OBSTACLE_PERCENTAGE,
            seed: None,
            neighborhood: Neighborhood::Four,
            allow_corner_cutting: true,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MovementConfig {
    /// Time the agent waits on each cell before taking the next step.
    pub step_delay: Duration,
}

impl Default for MovementConfig {
    fn default() -> MovementConfig {
        MovementConfig {
            step_delay: DEFAULT_STEP_DELAY,
        }
    }
}
