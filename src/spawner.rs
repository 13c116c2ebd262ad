use crate::error::{Error, Result};
use crate::grid_field::GridField;
use grid_util::point::Point;
use log::info;
use rand::seq::SliceRandom;
use rand::Rng;

/// The thing being moved around. The controller reads its position once per request and
/// writes it once per step.
pub trait Agent {
    fn position(&self) -> Point;
    fn set_position(&mut self, position: Point);
}

/// Plain [Agent] that only remembers where it is.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Actor {
    pub position: Point,
}

impl Actor {
    pub fn new(position: Point) -> Actor {
        Actor { position }
    }
}

impl Agent for Actor {
    fn position(&self) -> Point {
        self.position
    }
    fn set_position(&mut self, position: Point) {
        self.position = position;
    }
}

/// Picks a uniformly random free cell to place an agent on.
pub fn spawn_position<R: Rng + ?Sized>(grid: &GridField, rng: &mut R) -> Result<Point> {
    let free: Vec<Point> = grid.free_cells().collect();
    let position = *free.choose(rng).ok_or(Error::NoFreeCell)?;
    info!("Agent spawned at {}", position);
    Ok(position)
}
