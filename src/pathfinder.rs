//! Best-first (A*) search over a [GridField].
//!
//! The frontier has no decrease-key: a cell whose cost improves is simply enqueued
//! again, and a stale duplicate that is dequeued later only relaxes its neighbours
//! against costs that are already at least as good, so it changes nothing.
use crate::error::Result;
use crate::grid_field::{Cell, GridField};
use crate::observer::{GridEvent, GridObserver};
use crate::priority_queue::PriorityQueue;
use crate::{FxIndexMap, FxIndexSet};
use grid_util::point::Point;
use itertools::Itertools;
use log::{info, warn};
use num_traits::ToPrimitive;
use std::f32::consts::SQRT_2;

/// Cost of stepping from `from` onto `to`: the Euclidean distance between the two
/// positions, or infinity when `to` is an obstacle.
pub fn edge_cost(from: &Cell, to: &Cell) -> f32 {
    if to.is_obstacle() {
        return f32::INFINITY;
    }
    let dx = (from.position().x - to.position().x) as f32;
    let dy = (from.position().y - to.position().y) as f32;
    dx.hypot(dy)
}

/// Estimate of the remaining cost used to order the frontier.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Heuristic {
    /// `|dx| + |dy|`. Exact on a 4-neighbour grid, but it overestimates diagonal
    /// routes so searches on an 8-neighbour grid may return longer paths.
    #[default]
    Manhattan,
    /// Straight moves for the difference, diagonal moves for the rest. Admissible on
    /// an 8-neighbour grid.
    Octile,
    /// No estimate at all, which turns the search into Dijkstra.
    Zero,
}

impl Heuristic {
    pub fn estimate(&self, from: &Point, to: &Point) -> f32 {
        match self {
            Heuristic::Manhattan => from.manhattan_distance(to) as f32,
            Heuristic::Octile => {
                let dx = (from.x - to.x).abs() as f32;
                let dy = (from.y - to.y).abs() as f32;
                dx.max(dy) + (SQRT_2 - 1.0) * dx.min(dy)
            }
            Heuristic::Zero => 0.0,
        }
    }
}

/// Bookkeeping of one search. Cells missing from `cost_so_far` were never reached.
#[derive(Clone, Debug, Default)]
pub struct SearchState {
    pub came_from: FxIndexMap<Point, Point>,
    pub cost_so_far: FxIndexMap<Point, f32>,
}

impl SearchState {
    fn new(start: Point) -> SearchState {
        let mut state = SearchState::default();
        state.came_from.insert(start, start);
        state.cost_so_far.insert(start, 0.0);
        state
    }

    fn improves(&self, point: &Point, cost: f32) -> bool {
        self.cost_so_far
            .get(point)
            .map_or(true, |&known| cost < known)
    }

    /// Walks the predecessor chain back from `target`. Returns [None] if the chain is
    /// broken, which only happens when the target was never reached.
    fn reconstruct(&self, start: Point, target: Point) -> Option<Vec<Point>> {
        let mut path = Vec::new();
        let mut current = target;
        while current != start {
            path.push(current);
            current = *self.came_from.get(&current)?;
        }
        path.reverse();
        Some(path)
    }
}

/// Everything a search produced.
#[derive(Clone, Debug)]
pub struct SearchOutcome {
    /// Cells to walk through, excluding the start and including the target. Empty when
    /// the target is the start or could not be reached; [reached](Self::reached) tells
    /// the two apart.
    pub path: Vec<Point>,
    pub reached: bool,
    /// Cells annotated during the search, in the order they were first touched.
    pub touched: FxIndexSet<Point>,
    pub state: SearchState,
    target: Point,
}

impl SearchOutcome {
    /// Accumulated cost of the returned path.
    pub fn cost(&self) -> Option<f32> {
        if self.reached {
            self.state.cost_so_far.get(&self.target).copied()
        } else {
            None
        }
    }
}

/// Priorities are truncated to whole numbers; correctness still rests on the float costs
/// in [SearchState].
fn frontier_priority(estimate: f32) -> i32 {
    estimate.trunc().to_i32().unwrap_or(i32::MAX)
}

#[derive(Clone, Debug, Default)]
pub struct Pathfinder {
    pub heuristic: Heuristic,
}

impl Pathfinder {
    pub fn new(heuristic: Heuristic) -> Pathfinder {
        Pathfinder { heuristic }
    }

    /// Searches from `start` to `target`, annotating every cell whose cost improves and
    /// reporting it to `observer`.
    ///
    /// The target is not checked for being an obstacle. Callers must reject such targets
    /// first, otherwise the search floods the whole reachable area before giving up.
    pub fn search<O>(
        &self,
        grid: &mut GridField,
        start: Point,
        target: Point,
        observer: &mut O,
    ) -> Result<SearchOutcome>
    where
        O: GridObserver + ?Sized,
    {
        grid.cell(start)?;
        grid.cell(target)?;
        info!("Finding path from {} to {}", start, target);

        let mut state = SearchState::new(start);
        let mut touched = FxIndexSet::default();
        let mut frontier = PriorityQueue::new();
        frontier.enqueue(start, 0);
        let mut reached = false;

        while !frontier.is_empty() {
            let current = frontier.dequeue()?;
            if current == target {
                reached = true;
                break;
            }
            let current_cell = *grid.cell(current)?;
            let current_cost = match state.cost_so_far.get(&current) {
                Some(&cost) => cost,
                None => continue,
            };
            for next in grid.neighbors(current)? {
                let next_cell = *grid.cell(next)?;
                if next_cell.is_obstacle() {
                    continue;
                }
                let new_cost = current_cost + edge_cost(&current_cell, &next_cell);
                if !state.improves(&next, new_cost) {
                    continue;
                }
                state.cost_so_far.insert(next, new_cost);
                let priority = new_cost + self.heuristic.estimate(&next, &target);
                frontier.enqueue(next, frontier_priority(priority));
                state.came_from.insert(next, current);

                let display_cost = frontier_priority(new_cost);
                grid.annotate(next, display_cost)?;
                touched.insert(next);
                observer.notify(GridEvent::CellTouched {
                    cell: next,
                    cost: display_cost,
                });
            }
        }

        let mut path = Vec::new();
        if reached {
            match state.reconstruct(start, target) {
                Some(found) => path = found,
                None => {
                    warn!("Target {} was reached without a predecessor chain", target);
                    reached = false;
                }
            }
        }
        if !reached {
            info!("No path found to target {}", target);
            observer.notify(GridEvent::NoPathFound { start, target });
        }

        Ok(SearchOutcome {
            path,
            reached,
            touched,
            state,
            target,
        })
    }

    /// Like [search](Self::search) but only returns the path.
    pub fn find_path<O>(
        &self,
        grid: &mut GridField,
        start: Point,
        target: Point,
        observer: &mut O,
    ) -> Result<Vec<Point>>
    where
        O: GridObserver + ?Sized,
    {
        self.search(grid, start, target, observer)
            .map(|outcome| outcome.path)
    }
}

/// Summed edge cost of walking `path` from `start`.
pub fn path_cost(grid: &GridField, start: Point, path: &[Point]) -> Result<f32> {
    std::iter::once(&start)
        .chain(path)
        .tuple_windows()
        .map(|(from, to)| -> Result<f32> { Ok(edge_cost(grid.cell(*from)?, grid.cell(*to)?)) })
        .sum()
}
