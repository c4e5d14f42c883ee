use std::collections::HashSet;

use super::{
    action::Direction,
    config::GameConfig,
    placement::Placer,
    state::{CollisionType, GameState, Phase, Position, Snake},
};

/// Why a game ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndReason {
    Collision(CollisionType),
    /// No free cell was left for food
    BoardFull,
}

/// Result of a game tick
#[derive(Debug, Clone, PartialEq)]
pub struct TickResult {
    /// Whether the tick actually moved the snake
    pub advanced: bool,
    /// Whether the snake ate food this tick
    pub ate_food: bool,
    /// Set when this tick ended the game
    pub ended: Option<EndReason>,
}

impl TickResult {
    fn idle() -> Self {
        Self {
            advanced: false,
            ate_food: false,
            ended: None,
        }
    }

    fn ended(reason: EndReason) -> Self {
        Self {
            advanced: false,
            ate_food: false,
            ended: Some(reason),
        }
    }

    pub fn terminated(&self) -> bool {
        self.ended.is_some()
    }
}

/// The game engine that handles all game logic
pub struct GameEngine {
    config: GameConfig,
    placer: Placer,
}

impl GameEngine {
    /// Create a new game engine with the given configuration
    pub fn new(config: GameConfig) -> Self {
        Self::with_placer(config, Placer::new())
    }

    /// Create an engine whose placements are reproducible
    pub fn seeded(config: GameConfig, seed: u64) -> Self {
        Self::with_placer(config, Placer::seeded(seed))
    }

    fn with_placer(config: GameConfig, placer: Placer) -> Self {
        Self { config, placer }
    }

    /// Start a fresh game: snake at the start cell heading right,
    /// new obstacles, then food clear of both
    pub fn reset(&mut self) -> GameState {
        let (width, height) = (self.config.grid_width, self.config.grid_height);
        let (start_x, start_y) = self.config.start_position;

        let mut snake = Snake::new(
            Position::new(start_x, start_y),
            Direction::default(),
            self.config.initial_snake_length,
        );
        for segment in snake.body.iter_mut() {
            *segment = segment.wrapped(width, height);
        }

        let mut taken: HashSet<Position> = snake.body.iter().copied().collect();
        let obstacles = self.placer.generate_obstacles(
            width,
            height,
            self.config.obstacle_count,
            &taken,
            self.config.max_placement_attempts,
        );
        taken.extend(obstacles.iter().copied());

        let food = self
            .placer
            .spawn_food(width, height, &taken, self.config.max_placement_attempts);

        let mut state = GameState::new(
            snake,
            food,
            obstacles,
            width,
            height,
            self.config.initial_speed(),
        );
        if state.food.is_none() {
            // The snake alone fills the board
            state.phase = Phase::GameOver;
        }

        log::info!(
            "new game on {}x{} board with {} obstacles",
            width,
            height,
            state.obstacles.len()
        );
        state
    }

    /// Advance the game by one tick
    ///
    /// Does nothing unless the game is running. A collision ends the game and
    /// leaves the snake exactly as it was before the attempted move.
    pub fn tick(&mut self, state: &mut GameState) -> TickResult {
        if !state.is_running() {
            return TickResult::idle();
        }

        let candidate = state
            .snake
            .head()
            .moved_in_direction(state.snake.direction)
            .wrapped(state.grid_width, state.grid_height);

        if let Some(collision) = Self::check_collision(state, candidate) {
            state.phase = Phase::GameOver;
            log::info!(
                "game over after {} steps with score {}: {:?}",
                state.steps,
                state.score,
                collision
            );
            return TickResult::ended(EndReason::Collision(collision));
        }

        let ate_food = state.food == Some(candidate);
        state.snake.advance(candidate, ate_food);
        state.steps += 1;

        if !ate_food {
            return TickResult {
                advanced: true,
                ate_food: false,
                ended: None,
            };
        }

        state.score += 1;
        state.speed = state
            .speed
            .saturating_sub(self.config.speed_decrement())
            .max(self.config.min_speed());
        log::debug!("score {} -> tick interval {:?}", state.score, state.speed);

        let mut taken: HashSet<Position> = state.snake.body.iter().copied().collect();
        taken.extend(state.obstacles.iter().copied());

        match self.placer.spawn_food(
            state.grid_width,
            state.grid_height,
            &taken,
            self.config.max_placement_attempts,
        ) {
            Some(food) => {
                state.food = Some(food);
                TickResult {
                    advanced: true,
                    ate_food: true,
                    ended: None,
                }
            }
            None => {
                state.food = None;
                state.phase = Phase::GameOver;
                log::info!("board full with score {}", state.score);
                TickResult {
                    advanced: true,
                    ate_food: true,
                    ended: Some(EndReason::BoardFull),
                }
            }
        }
    }

    /// Check if the candidate head position causes a collision
    fn check_collision(state: &GameState, pos: Position) -> Option<CollisionType> {
        if state.is_occupied_by_snake(pos) {
            return Some(CollisionType::SelfCollision);
        }

        if state.is_obstacle(pos) {
            return Some(CollisionType::Obstacle);
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn state_with(snake: Snake, food: Position, obstacles: &[Position]) -> GameState {
        GameState::new(
            snake,
            food,
            obstacles.iter().copied().collect(),
            20,
            20,
            Duration::from_millis(120),
        )
    }

    fn assert_food_clear(state: &GameState) {
        let food = state.food.expect("running game has food");
        assert!(!state.snake.occupies(food));
        assert!(!state.obstacles.contains(&food));
        assert!(state.is_in_bounds(food));
    }

    #[test]
    fn test_reset() {
        let mut engine = GameEngine::seeded(GameConfig::default(), 11);
        let state = engine.reset();

        assert!(state.is_running());
        assert_eq!(state.score, 0);
        assert_eq!(state.steps, 0);
        assert_eq!(state.snake.body, vec![Position::new(8, 10)]);
        assert_eq!(state.snake.direction, Direction::Right);
        assert_eq!(state.speed, Duration::from_millis(120));
        assert_eq!(state.obstacles.len(), 6);
        assert!(!state.obstacles.contains(&Position::new(8, 10)));
        assert_food_clear(&state);
    }

    #[test]
    fn test_basic_movement() {
        let mut engine = GameEngine::seeded(GameConfig::default(), 1);
        let snake = Snake::new(Position::new(5, 5), Direction::Right, 3);
        let mut state = state_with(snake, Position::new(15, 15), &[]);

        let result = engine.tick(&mut state);

        assert!(result.advanced);
        assert!(!result.terminated());
        assert!(!result.ate_food);
        assert_eq!(state.steps, 1);
        assert_eq!(
            state.snake.body,
            vec![Position::new(6, 5), Position::new(5, 5), Position::new(4, 5)]
        );
    }

    #[test]
    fn test_food_consumption() {
        let mut engine = GameEngine::seeded(GameConfig::default(), 2);
        let snake = Snake::new(Position::new(8, 10), Direction::Right, 1);
        let obstacles = [Position::new(3, 3), Position::new(12, 4)];
        let mut state = state_with(snake, Position::new(9, 10), &obstacles);

        let result = engine.tick(&mut state);

        assert!(result.ate_food);
        assert!(!result.terminated());
        assert_eq!(state.score, 1);
        assert_eq!(
            state.snake.body,
            vec![Position::new(9, 10), Position::new(8, 10)]
        );
        assert_eq!(state.speed, Duration::from_millis(117));
        assert_food_clear(&state);
    }

    #[test]
    fn test_speed_floor() {
        let mut engine = GameEngine::seeded(GameConfig::default(), 3);
        let snake = Snake::new(Position::new(0, 0), Direction::Right, 1);
        let mut state = state_with(snake, Position::new(1, 0), &[]);
        state.speed = Duration::from_millis(52);

        engine.tick(&mut state);
        assert_eq!(state.speed, Duration::from_millis(50));

        state.food = Some(state.snake.head().moved_in_direction(Direction::Right));
        engine.tick(&mut state);
        assert_eq!(state.speed, Duration::from_millis(50));
    }

    #[test]
    fn test_wraps_left_edge() {
        let mut engine = GameEngine::seeded(GameConfig::default(), 4);
        let snake = Snake::from_segments(
            vec![Position::new(0, 10), Position::new(1, 10)],
            Direction::Left,
        )
        .unwrap();
        let mut state = state_with(snake, Position::new(5, 5), &[]);

        engine.tick(&mut state);

        assert!(state.is_running());
        assert_eq!(state.snake.head(), Position::new(19, 10));
        assert_eq!(state.snake.len(), 2);
    }

    #[test]
    fn test_wraps_every_edge() {
        let cases = [
            (Position::new(19, 4), Direction::Right, Position::new(0, 4)),
            (Position::new(4, 0), Direction::Up, Position::new(4, 19)),
            (Position::new(4, 19), Direction::Down, Position::new(4, 0)),
        ];
        let mut engine = GameEngine::seeded(GameConfig::default(), 5);

        for (start, dir, expected) in cases {
            let snake = Snake::new(start, dir, 1);
            let mut state = state_with(snake, Position::new(10, 10), &[]);
            engine.tick(&mut state);
            assert_eq!(state.snake.head(), expected);
        }
    }

    #[test]
    fn test_obstacle_collision() {
        let mut engine = GameEngine::seeded(GameConfig::default(), 6);
        let snake = Snake::new(Position::new(5, 5), Direction::Right, 3);
        let mut state = state_with(snake, Position::new(15, 15), &[Position::new(6, 5)]);
        let before = state.snake.clone();

        let result = engine.tick(&mut state);

        assert!(result.terminated());
        assert!(!result.advanced);
        assert_eq!(
            result.ended,
            Some(EndReason::Collision(CollisionType::Obstacle))
        );
        assert!(state.is_game_over());
        assert_eq!(state.snake, before);
        assert_eq!(state.steps, 0);
    }

    #[test]
    fn test_self_collision() {
        let mut engine = GameEngine::seeded(GameConfig::small(), 7);

        // Body: (5,5), (4,5), (3,5), (2,5), (1,5)
        let snake = Snake::new(Position::new(5, 5), Direction::Right, 5);
        let mut state = GameState::new(
            snake,
            Position::new(8, 8),
            HashSet::new(),
            10,
            10,
            Duration::from_millis(120),
        );

        // Right: (6,5) ...
        engine.tick(&mut state);
        // Down: (6,6), (6,5), (5,5), (4,5), (3,5)
        state.snake.steer(Direction::Down);
        engine.tick(&mut state);
        // Left: (5,6), (6,6), (6,5), (5,5), (4,5)
        state.snake.steer(Direction::Left);
        engine.tick(&mut state);
        // Up: (5,5) is still body
        state.snake.steer(Direction::Up);
        let result = engine.tick(&mut state);

        assert!(result.terminated());
        assert_eq!(
            result.ended,
            Some(EndReason::Collision(CollisionType::SelfCollision))
        );
    }

    #[test]
    fn test_tail_cell_counts_as_collision() {
        let mut engine = GameEngine::seeded(GameConfig::default(), 8);
        // A 2x2 loop: moving down from (1,0) lands on the tail at (1,1)
        let snake = Snake::from_segments(
            vec![
                Position::new(1, 0),
                Position::new(0, 0),
                Position::new(0, 1),
                Position::new(1, 1),
            ],
            Direction::Down,
        )
        .unwrap();
        let mut state = state_with(snake, Position::new(10, 10), &[]);

        let result = engine.tick(&mut state);
        assert_eq!(
            result.ended,
            Some(EndReason::Collision(CollisionType::SelfCollision))
        );
    }

    #[test]
    fn test_paused_and_finished_games_do_not_advance() {
        let mut engine = GameEngine::seeded(GameConfig::default(), 9);
        let mut state = engine.reset();

        state.phase = Phase::Paused;
        let before = state.clone();
        let result = engine.tick(&mut state);
        assert!(!result.advanced);
        assert_eq!(state, before);

        state.phase = Phase::GameOver;
        let result = engine.tick(&mut state);
        assert!(!result.advanced);
        assert!(!result.terminated());
        assert_eq!(state.steps, before.steps);
    }

    #[test]
    fn test_length_changes_by_at_most_one() {
        let mut engine = GameEngine::seeded(GameConfig::default(), 10);
        let mut state = engine.reset();
        let turns = [Direction::Up, Direction::Left, Direction::Down, Direction::Right];

        for step in 0..400 {
            if !state.is_running() {
                state = engine.reset();
            }
            if step % 7 == 0 {
                state.snake.steer(turns[(step / 7) % turns.len()]);
            }
            let before = state.snake.len();
            let result = engine.tick(&mut state);
            let after = state.snake.len();

            if result.ate_food {
                assert_eq!(after, before + 1);
            } else {
                assert_eq!(after, before);
            }
            if state.is_running() {
                assert_food_clear(&state);
            }
        }
    }

    #[test]
    fn test_eating_last_free_cell_ends_game() {
        let config = GameConfig {
            start_position: (0, 0),
            obstacle_count: 0,
            ..GameConfig::new(3, 1)
        };
        let mut engine = GameEngine::seeded(config, 12);
        let snake = Snake::from_segments(
            vec![Position::new(1, 0), Position::new(0, 0)],
            Direction::Right,
        )
        .unwrap();
        let mut state = GameState::new(
            snake,
            Position::new(2, 0),
            HashSet::new(),
            3,
            1,
            Duration::from_millis(120),
        );

        let result = engine.tick(&mut state);

        assert!(result.ate_food);
        assert_eq!(result.ended, Some(EndReason::BoardFull));
        assert!(state.is_game_over());
        assert_eq!(state.snake.len(), 3);
        assert_eq!(state.food, None);
    }

    #[test]
    fn test_reset_on_board_filled_by_snake_has_no_food() {
        let config = GameConfig {
            start_position: (1, 0),
            initial_snake_length: 2,
            obstacle_count: 0,
            ..GameConfig::new(2, 1)
        };
        let mut engine = GameEngine::seeded(config, 13);

        let state = engine.reset();

        assert!(state.is_game_over());
        assert_eq!(state.food, None);
        assert_eq!(state.snake.len(), 2);
        assert!(state.snapshot(0).food.is_none());
    }
}
