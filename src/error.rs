//! Error type shared by the grid, queue and controller.

/// Failures raised by grid lookups, grid construction and the search frontier.
///
/// A search that cannot reach its target and a rejected movement request are
/// regular outcomes and are not represented here.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Cell coordinates outside `[0, width) x [0, height)`.
    #[error("cell ({x}, {y}) is outside the {width}x{height} grid")]
    OutOfBounds {
        x: i32,
        y: i32,
        width: usize,
        height: usize,
    },

    /// Dequeue on an empty frontier. The search loop checks emptiness first, so
    /// seeing this means the loop itself is broken.
    #[error("dequeue on an empty priority queue")]
    EmptyQueue,

    #[error("grid dimensions must be positive, got {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },

    /// A text map whose rows do not all have the same length.
    #[error("map row {row} has width {found}, expected {expected}")]
    RaggedMap {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("obstacle percentage {0} is outside 0..=100")]
    InvalidObstaclePercentage(u8),

    /// Every cell is an obstacle, so there is nowhere to place an agent.
    #[error("no free cell to place the agent on")]
    NoFreeCell,
}

pub type Result<T> = std::result::Result<T, Error>;
