use grid_navigator::{
    spawn_position, Actor, Agent, GridConfig, GridEvent, GridField, MoveRequest, MovementConfig,
    MovementController, Neighborhood, Pathfinder, RejectReason,
};
use grid_util::point::Point;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::time::Duration;

const STEP: Duration = Duration::from_millis(100);

fn controller_at(position: Point) -> MovementController<Actor> {
    MovementController::new(
        Actor::new(position),
        Pathfinder::default(),
        MovementConfig::default(),
    )
}

fn run_to_completion(
    mover: &mut MovementController<Actor>,
    grid: &mut GridField,
    events: &mut Vec<GridEvent>,
) -> usize {
    let mut ticks = 0;
    while mover.is_moving() {
        mover.tick(STEP, grid, events).unwrap();
        ticks += 1;
        assert!(ticks < 10_000, "movement never finished");
    }
    ticks
}

#[test]
fn walks_detour_and_cleans_up() {
    let mut grid =
        GridField::with_obstacles(3, 3, Neighborhood::Four, [Point::new(1, 1)]).unwrap();
    let mut mover = controller_at(Point::new(0, 0));
    let mut events = Vec::new();

    let request = mover
        .request_move(Point::new(2, 2), &mut grid, &mut events)
        .unwrap();
    assert_eq!(
        request,
        MoveRequest::Accepted {
            steps: 4,
            reached: true
        }
    );
    assert_eq!(mover.touched_cells().count(), 7);
    assert!(grid.cells().any(|cell| cell.display_cost().is_some()));

    let ticks = run_to_completion(&mut mover, &mut grid, &mut events);
    // Three more steps after the immediate one, then one delay on the target.
    assert_eq!(ticks, 4);
    assert_eq!(mover.agent().position(), Point::new(2, 2));
    assert_eq!(mover.touched_cells().count(), 0);
    assert!(grid.cells().all(|cell| cell.display_cost().is_none()));

    let moves: Vec<Point> = events
        .iter()
        .filter_map(|event| match event {
            GridEvent::AgentMoved { cell } => Some(*cell),
            _ => None,
        })
        .collect();
    assert_eq!(
        moves,
        vec![
            Point::new(1, 0),
            Point::new(2, 0),
            Point::new(2, 1),
            Point::new(2, 2)
        ]
    );
    let resets = events
        .iter()
        .filter(|event| matches!(event, GridEvent::CellReset { .. }))
        .count();
    assert_eq!(resets, 7);
    assert_eq!(
        events.last(),
        Some(&GridEvent::MovementFinished {
            cell: Point::new(2, 2)
        })
    );

    // Presentation order: search, path, target, walk, cleanup.
    let position = |wanted: fn(&GridEvent) -> bool| events.iter().position(wanted).unwrap();
    let touched = position(|e| matches!(e, GridEvent::CellTouched { .. }));
    let path = position(|e| matches!(e, GridEvent::PathCell { .. }));
    let target = position(|e| matches!(e, GridEvent::TargetSelected { .. }));
    let moved = position(|e| matches!(e, GridEvent::AgentMoved { .. }));
    let cleared = position(|e| matches!(e, GridEvent::TargetCleared { .. }));
    let reset = position(|e| matches!(e, GridEvent::CellReset { .. }));
    assert!(touched < path && path < target && target < moved);
    assert!(moved < cleared && cleared < reset);
}

#[test]
fn busy_controller_drops_requests() {
    let mut grid = GridField::open(5, 5, Neighborhood::Four).unwrap();
    let mut mover = controller_at(Point::new(0, 0));
    mover
        .request_move(Point::new(4, 4), &mut grid, &mut ())
        .unwrap();
    mover.tick(STEP * 2, &mut grid, &mut ()).unwrap();
    let position = mover.agent().position();
    let touched = mover.touched_cells().count();

    let request = mover
        .request_move(Point::new(0, 4), &mut grid, &mut ())
        .unwrap();
    assert_eq!(request, MoveRequest::Rejected(RejectReason::AlreadyMoving));
    assert_eq!(mover.agent().position(), position);
    assert_eq!(mover.touched_cells().count(), touched);
    assert_eq!(mover.target(), Some(Point::new(4, 4)));

    let mut events = Vec::new();
    run_to_completion(&mut mover, &mut grid, &mut events);
    assert_eq!(mover.agent().position(), Point::new(4, 4));

    // Once idle, new requests are accepted again.
    let request = mover
        .request_move(Point::new(0, 4), &mut grid, &mut ())
        .unwrap();
    assert_eq!(
        request,
        MoveRequest::Accepted {
            steps: 4,
            reached: true
        }
    );
}

#[test]
fn obstacle_target_skips_search() {
    let mut grid = GridField::parse_map("...\n.#.\n...", Neighborhood::Four).unwrap();
    let mut mover = controller_at(Point::new(0, 0));
    let mut events = Vec::new();
    let request = mover
        .request_move(Point::new(1, 1), &mut grid, &mut events)
        .unwrap();
    assert_eq!(request, MoveRequest::Rejected(RejectReason::ObstacleTarget));
    assert_eq!(mover.agent().position(), Point::new(0, 0));
    assert!(!mover.is_moving());
    assert!(events
        .iter()
        .all(|event| !matches!(event, GridEvent::CellTouched { .. })));
}

#[test]
fn unreachable_target_resets_at_once() {
    let mut grid = GridField::parse_map("..#.", Neighborhood::Four).unwrap();
    let mut mover = controller_at(Point::new(0, 0));
    let mut events = Vec::new();
    let request = mover
        .request_move(Point::new(3, 0), &mut grid, &mut events)
        .unwrap();
    assert_eq!(
        request,
        MoveRequest::Accepted {
            steps: 0,
            reached: false
        }
    );
    assert!(!mover.is_moving());
    assert_eq!(mover.agent().position(), Point::new(0, 0));
    assert_eq!(grid.cell_at(1, 0).unwrap().display_cost(), None);
    assert!(events.contains(&GridEvent::NoPathFound {
        start: Point::new(0, 0),
        target: Point::new(3, 0)
    }));
    assert!(events.contains(&GridEvent::CellReset {
        cell: Point::new(1, 0)
    }));
}

#[test]
fn custom_step_delay() {
    let mut grid = GridField::open(3, 1, Neighborhood::Four).unwrap();
    let mut mover = MovementController::new(
        Actor::new(Point::new(0, 0)),
        Pathfinder::default(),
        MovementConfig {
            step_delay: Duration::from_secs(1),
        },
    );
    mover
        .request_move(Point::new(2, 0), &mut grid, &mut ())
        .unwrap();
    mover.tick(STEP * 9, &mut grid, &mut ()).unwrap();
    assert_eq!(mover.agent().position(), Point::new(1, 0));
    mover.tick(STEP, &mut grid, &mut ()).unwrap();
    assert_eq!(mover.agent().position(), Point::new(2, 0));
}

#[test]
fn spawned_agent_reaches_random_targets() {
    let config = GridConfig {
        width: 15,
        height: 15,
        obstacle_percentage: 25,
        seed: Some(11),
        ..GridConfig::default()
    };
    let mut grid = GridField::generate(&config).unwrap();
    let mut rng = StdRng::seed_from_u64(5);
    let mut mover = controller_at(spawn_position(&grid, &mut rng).unwrap());
    for _ in 0..20 {
        let target = spawn_position(&grid, &mut rng).unwrap();
        let reachable = grid.reachable(mover.agent().position(), target);
        let mut events = Vec::new();
        mover.request_move(target, &mut grid, &mut events).unwrap();
        run_to_completion(&mut mover, &mut grid, &mut events);
        if reachable {
            assert_eq!(mover.agent().position(), target);
        }
        assert!(grid.cells().all(|cell| cell.display_cost().is_none()));
    }
}
