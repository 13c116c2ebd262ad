//! Drives one agent along a found path, one cell per elapsed step delay.
//!
//! A movement is a resumable sequence: the first step happens when the request is
//! accepted, every further step (and finally the cleanup) happens on the [tick]
//! that completes another full step delay. Nothing blocks between steps, and a
//! sequence always runs to completion once started.
//!
//! [tick]: MovementController::tick
use crate::config::MovementConfig;
use crate::error::Result;
use crate::grid_field::GridField;
use crate::observer::{GridEvent, GridObserver, RejectReason};
use crate::pathfinder::Pathfinder;
use crate::spawner::Agent;
use crate::FxIndexSet;
use grid_util::point::Point;
use log::{debug, info};
use std::collections::VecDeque;
use std::time::Duration;

/// Result of [MovementController::request_move].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveRequest {
    /// A movement sequence was started. `steps` is the path length; `reached` is false
    /// when the target could not be reached, in which case the sequence finished
    /// immediately.
    Accepted { steps: usize, reached: bool },
    Rejected(RejectReason),
}

#[derive(Debug)]
pub struct MovementController<A: Agent> {
    agent: A,
    pathfinder: Pathfinder,
    config: MovementConfig,
    is_moving: bool,
    target: Option<Point>,
    touched: FxIndexSet<Point>,
    route: VecDeque<Point>,
    accumulated: Duration,
}

impl<A: Agent> MovementController<A> {
    pub fn new(agent: A, pathfinder: Pathfinder, config: MovementConfig) -> MovementController<A> {
        MovementController {
            agent,
            pathfinder,
            config,
            is_moving: false,
            target: None,
            touched: FxIndexSet::default(),
            route: VecDeque::new(),
            accumulated: Duration::ZERO,
        }
    }

    pub fn agent(&self) -> &A {
        &self.agent
    }
    pub fn agent_mut(&mut self) -> &mut A {
        &mut self.agent
    }
    pub fn into_agent(self) -> A {
        self.agent
    }
    pub fn is_moving(&self) -> bool {
        self.is_moving
    }
    /// Destination of the active movement.
    pub fn target(&self) -> Option<Point> {
        self.target
    }
    /// Cells annotated by the latest search that still await reset.
    pub fn touched_cells(&self) -> impl Iterator<Item = &Point> + '_ {
        self.touched.iter()
    }
    pub fn remaining_steps(&self) -> usize {
        self.route.len()
    }

    fn reject<O>(&self, target: Point, reason: RejectReason, observer: &mut O) -> MoveRequest
    where
        O: GridObserver + ?Sized,
    {
        info!("Move to {} ignored: {:?}", target, reason);
        observer.notify(GridEvent::RequestRejected { target, reason });
        MoveRequest::Rejected(reason)
    }

    /// Starts moving the agent to `target` unless a movement is already running or the
    /// target is an obstacle. Requests are never queued.
    pub fn request_move<O>(
        &mut self,
        target: Point,
        grid: &mut GridField,
        observer: &mut O,
    ) -> Result<MoveRequest>
    where
        O: GridObserver + ?Sized,
    {
        if self.is_moving {
            return Ok(self.reject(target, RejectReason::AlreadyMoving, observer));
        }
        if grid.is_obstacle(target)? {
            return Ok(self.reject(target, RejectReason::ObstacleTarget, observer));
        }
        info!("Setting target to {}", target);

        let outcome = self
            .pathfinder
            .search(grid, self.agent.position(), target, observer)?;
        self.touched.extend(outcome.touched.iter().copied());
        for &cell in &outcome.path {
            observer.notify(GridEvent::PathCell { cell });
        }
        observer.notify(GridEvent::TargetSelected { cell: target });

        let steps = outcome.path.len();
        self.target = Some(target);
        self.route = outcome.path.into();
        self.accumulated = Duration::ZERO;
        self.is_moving = true;
        self.resume(grid, observer)?;
        Ok(MoveRequest::Accepted {
            steps,
            reached: outcome.reached,
        })
    }

    /// Advances the active movement by `dt`. Each full step delay that has elapsed
    /// resumes the sequence once.
    pub fn tick<O>(&mut self, dt: Duration, grid: &mut GridField, observer: &mut O) -> Result<()>
    where
        O: GridObserver + ?Sized,
    {
        if !self.is_moving {
            return Ok(());
        }
        self.accumulated += dt;
        while self.is_moving && self.accumulated >= self.config.step_delay {
            self.accumulated -= self.config.step_delay;
            self.resume(grid, observer)?;
        }
        Ok(())
    }

    /// Runs the sequence up to its next suspension point.
    fn resume<O>(&mut self, grid: &mut GridField, observer: &mut O) -> Result<()>
    where
        O: GridObserver + ?Sized,
    {
        match self.route.pop_front() {
            Some(cell) => {
                debug!("Moving agent to {}", cell);
                self.agent.set_position(cell);
                observer.notify(GridEvent::AgentMoved { cell });
                Ok(())
            }
            None => self.finish(grid, observer),
        }
    }

    fn finish<O>(&mut self, grid: &mut GridField, observer: &mut O) -> Result<()>
    where
        O: GridObserver + ?Sized,
    {
        if let Some(cell) = self.target.take() {
            observer.notify(GridEvent::TargetCleared { cell });
        }
        for cell in self.touched.drain(..) {
            grid.clear_annotation(cell)?;
            observer.notify(GridEvent::CellReset { cell });
        }
        self.accumulated = Duration::ZERO;
        self.is_moving = false;
        let position = self.agent.position();
        info!("Agent movement completed at {}", position);
        observer.notify(GridEvent::MovementFinished { cell: position });
        Ok(())
    }
}
