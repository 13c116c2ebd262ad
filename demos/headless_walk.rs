use grid_navigator::{
    spawn_position, Actor, Agent, GridConfig, GridField, LogObserver, MoveRequest,
    MovementConfig, MovementController, Pathfinder,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

// Generates a random grid, drops an agent on a free cell and sends it to another random
// free cell, printing the grid while the search annotations are still visible.
// o marks cells the search touched, # marks obstacles.
fn main() -> grid_navigator::Result<()> {
    let config = GridConfig {
        width: 16,
        height: 10,
        seed: Some(2024),
        ..GridConfig::default()
    };
    let mut grid = GridField::generate(&config)?;
    let mut rng = StdRng::seed_from_u64(7);
    let start = spawn_position(&grid, &mut rng)?;
    let target = spawn_position(&grid, &mut rng)?;
    let movement = MovementConfig::default();
    let step_delay = movement.step_delay;
    let mut mover = MovementController::new(Actor::new(start), Pathfinder::default(), movement);
    let mut observer = LogObserver;

    match mover.request_move(target, &mut grid, &mut observer)? {
        MoveRequest::Accepted { steps, reached } => {
            println!(
                "Moving from {:?} to {:?}: {} steps (reached: {})",
                start, target, steps, reached
            );
            print!("{}", grid);
        }
        MoveRequest::Rejected(reason) => println!("Request rejected: {:?}", reason),
    }
    while mover.is_moving() {
        mover.tick(step_delay, &mut grid, &mut observer)?;
        println!("Agent at {:?}", mover.agent().position());
    }
    Ok(())
}
