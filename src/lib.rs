//! # grid_navigator
//!
//! Moves a single agent across a bounded tile grid with static obstacles. Paths are
//! found with an [A*](https://en.wikipedia.org/wiki/A*_search_algorithm) style
//! best-first search whose frontier is a stable min-priority queue, using Euclidean
//! edge costs and a Manhattan heuristic by default. A [MovementController] then walks
//! the agent along the path one cell per step delay, driven by an external tick.
//!
//! Presentation is kept out of the algorithm: every visible change is reported as a
//! [GridEvent] to a [GridObserver], and the grid is always passed in explicitly.
//!
//! ```
//! use grid_navigator::{GridField, Neighborhood, Pathfinder};
//! use grid_util::point::Point;
//!
//! let mut grid = GridField::parse_map("...\n.#.\n...", Neighborhood::Four).unwrap();
//! let path = Pathfinder::default()
//!     .find_path(&mut grid, Point::new(0, 0), Point::new(2, 2), &mut ())
//!     .unwrap();
//! assert_eq!(path.len(), 4);
//! ```
pub mod config;
pub mod error;
pub mod grid_field;
pub mod movement;
pub mod observer;
pub mod pathfinder;
pub mod priority_queue;
pub mod spawner;

use fxhash::FxBuildHasher;
use indexmap::{IndexMap, IndexSet};
use std::time::Duration;

pub use crate::config::{GridConfig, MovementConfig, Neighborhood};
pub use crate::error::{Error, Result};
pub use crate::grid_field::{Cell, GridField};
pub use crate::movement::{MoveRequest, MovementController};
pub use crate::observer::{GridEvent, GridObserver, LogObserver, RejectReason};
pub use crate::pathfinder::{
    edge_cost, path_cost, Heuristic, Pathfinder, SearchOutcome, SearchState,
};
pub use crate::priority_queue::PriorityQueue;
pub use crate::spawner::{spawn_position, Actor, Agent};

pub type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;
pub type FxIndexSet<K> = IndexSet<K, FxBuildHasher>;

/// Time an agent spends on each cell of its path.
pub const DEFAULT_STEP_DELAY: Duration = Duration::from_millis(100);
pub const DEFAULT_OBSTACLE_PERCENTAGE: u8 = 20;
