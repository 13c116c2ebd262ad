//! Discrete notifications for whatever draws the grid.
//!
//! The search and the movement controller never touch presentation state directly.
//! They report what happened through a [GridObserver] so a renderer, a logger or a
//! test harness can be plugged in without changing the algorithm.
use grid_util::point::Point;
use log::trace;

/// Why a movement request was dropped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RejectReason {
    AlreadyMoving,
    ObstacleTarget,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GridEvent {
    /// A search recorded a new best cost for `cell`; `cost` is the truncated running cost.
    CellTouched { cell: Point, cost: i32 },
    /// A search exhausted its frontier without reaching `target`.
    NoPathFound { start: Point, target: Point },
    PathCell { cell: Point },
    TargetSelected { cell: Point },
    TargetCleared { cell: Point },
    /// Annotation of a touched cell was reset after a movement finished.
    CellReset { cell: Point },
    AgentMoved { cell: Point },
    RequestRejected { target: Point, reason: RejectReason },
    /// The movement sequence ended with the agent on `cell`.
    MovementFinished { cell: Point },
}

pub trait GridObserver {
    fn notify(&mut self, event: GridEvent);
}

/// Ignores every event.
impl GridObserver for () {
    fn notify(&mut self, _event: GridEvent) {}
}

/// Records events in order, which is what the tests use.
impl GridObserver for Vec<GridEvent> {
    fn notify(&mut self, event: GridEvent) {
        self.push(event);
    }
}

impl<O: GridObserver + ?Sized> GridObserver for &mut O {
    fn notify(&mut self, event: GridEvent) {
        (**self).notify(event);
    }
}

/// Forwards every event to the `log` facade at trace level.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogObserver;

impl GridObserver for LogObserver {
    fn notify(&mut self, event: GridEvent) {
        trace!("{:?}", event);
    }
}
