use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use snake_arena::game::{
    CollisionType, Direction, GameConfig, GameEngine, GameSession, LevelCatalog, Mode, Phase,
    PlayerId, PlayerTag, Position, RoundOutcome, Snake, Snapshot,
};
use std::time::Duration;

fn engine(seed: u64) -> GameEngine<ChaCha8Rng> {
    let config = GameConfig::default();
    let catalog = LevelCatalog::builtin(config.grid());
    GameEngine::with_rng(config, catalog, ChaCha8Rng::seed_from_u64(seed)).unwrap()
}

fn start(engine: &mut GameEngine<ChaCha8Rng>, mode: Mode, level: u32) -> GameSession {
    let mut session = engine.new_session(level, 0).unwrap();
    engine.start_round(&mut session, mode, level).unwrap();
    session
}

#[test]
fn single_player_growth() {
    let mut engine = engine(1);
    let mut session = start(&mut engine, Mode::Single, 1);
    session.snakes[0] = Snake::new(Position::new(10, 10), Direction::Right, PlayerTag::Solo);
    session.food = Some(Position::new(11, 10));

    let result = engine.tick(&mut session);

    assert!(result.info.ate_food[0]);
    let body: Vec<Position> = session.snakes[0].body().iter().copied().collect();
    assert_eq!(body, vec![Position::new(11, 10), Position::new(10, 10)]);
    assert_eq!(session.score(PlayerId::One), 10);
    let food = session.food.unwrap();
    assert_ne!(food, Position::new(11, 10));
    assert!(!session.snakes[0].occupies(food));
}

#[test]
fn self_collision_ends_round() {
    let mut engine = engine(2);
    let mut session = start(&mut engine, Mode::Single, 1);
    session.snakes[0] = Snake::from_segments(
        [
            Position::new(5, 6),
            Position::new(6, 6),
            Position::new(6, 5),
            Position::new(5, 5),
            Position::new(4, 5),
        ],
        Direction::Left,
        PlayerTag::Solo,
    )
    .unwrap();
    session.food = Some(Position::new(15, 15));

    assert!(engine.steer(&mut session, PlayerId::One, Direction::Up));
    let result = engine.tick(&mut session);

    assert_eq!(result.info.collisions[0], Some(CollisionType::SelfCollision));
    assert!(matches!(session.phase, Phase::RoundOver(RoundOutcome::GameOver { .. })));

    // Round is over: further ticks change nothing
    let before = session.clone();
    assert!(!engine.tick(&mut session).ticked);
    assert_eq!(session, before);
}

#[test]
fn versus_head_on_is_a_draw() {
    let mut engine = engine(3);
    let mut session = start(&mut engine, Mode::Versus, 1);
    session.snakes[0] = Snake::new(Position::new(9, 10), Direction::Right, PlayerTag::One);
    session.snakes[1] = Snake::new(Position::new(11, 10), Direction::Left, PlayerTag::Two);
    session.food = Some(Position::new(0, 0));

    let result = engine.tick(&mut session);

    assert_eq!(session.snakes[0].head(), Position::new(10, 10));
    assert_eq!(session.snakes[1].head(), Position::new(10, 10));
    assert_eq!(result.terminated, Some(RoundOutcome::Draw));
}

#[test]
fn boundary_without_wrap() {
    let mut engine = engine(4);
    let mut session = start(&mut engine, Mode::Single, 1);
    session.snakes[0] = Snake::new(Position::new(0, 8), Direction::Left, PlayerTag::Solo);

    let result = engine.tick(&mut session);

    assert_eq!(session.snakes[0].head(), Position::new(-1, 8));
    assert_eq!(result.info.collisions[0], Some(CollisionType::Boundary));
}

#[test]
fn length_is_stable_without_food() {
    let mut engine = engine(5);
    let mut session = start(&mut engine, Mode::Single, 2);
    session.snakes[0] = Snake::from_segments(
        [Position::new(8, 3), Position::new(7, 3), Position::new(6, 3)],
        Direction::Right,
        PlayerTag::Solo,
    )
    .unwrap();
    session.food = Some(Position::new(0, 19));

    // Wrap level: ride the row around the board twice
    for _ in 0..40 {
        let before = session.snakes[0].len();
        let result = engine.tick(&mut session);
        assert!(result.terminated.is_none());
        let expected = if result.info.ate_food[0] { before + 1 } else { before };
        assert_eq!(session.snakes[0].len(), expected);
    }
    assert_eq!(session.snakes[0].head(), Position::new(8, 3));
}

fn feed_straight(
    engine: &mut GameEngine<ChaCha8Rng>,
    session: &mut GameSession,
    meals: usize,
) -> Vec<Duration> {
    let mut periods = Vec::new();
    for _ in 0..meals {
        let next = session.snakes[0].head().moved_in_direction(Direction::Right);
        session.food = Some(session.grid.wrap(next));
        // Keep the snake short so it never bites itself
        while session.snakes[0].len() > 3 {
            session.snakes[0].truncate_tail();
        }
        let result = engine.tick(session);
        assert!(result.terminated.is_none());
        assert!(result.info.ate_food[0]);
        periods.extend(result.reschedule);
    }
    periods
}

#[test]
fn speed_ramps_down_to_floor() {
    let mut engine = engine(6);
    let mut session = start(&mut engine, Mode::Single, 2);
    session.snakes[0] = Snake::new(Position::new(0, 0), Direction::Right, PlayerTag::Solo);

    // Ten milestones on a wrap level
    let periods = feed_straight(&mut engine, &mut session, 50);
    assert_eq!(session.score(PlayerId::One), 500);
    assert_eq!(periods.len(), 10);
    assert_eq!(periods.first(), Some(&Duration::from_millis(145)));
    assert_eq!(session.speed, Duration::from_millis(100));

    let periods = feed_straight(&mut engine, &mut session, 100);
    assert_eq!(session.score(PlayerId::One), 1500);
    assert_eq!(session.speed, Duration::from_millis(80));
    assert_eq!(periods.last(), Some(&Duration::from_millis(80)));
    assert!(periods.iter().all(|p| *p >= Duration::from_millis(80)));
}

#[test]
fn snapshot_reflects_round() {
    let mut engine = engine(7);
    let session = start(&mut engine, Mode::Versus, 3);
    let snapshot = Snapshot::from(&session);

    assert_eq!(snapshot.mode, Mode::Versus);
    assert_eq!(snapshot.snakes.len(), 2);
    assert_eq!(snapshot.snakes[1].tag, PlayerTag::Two);
    assert_eq!(snapshot.walls.len(), 16);
    assert_eq!(snapshot.level_name, "Pillars");
    assert!(snapshot.food.is_some_and(|food| !snapshot.is_wall(food)));
}
