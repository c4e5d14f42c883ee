use std::collections::HashSet;
use std::time::Duration;

use super::action::Direction;

/// A position on the game grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move position by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Move position in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx, dy)
    }

    /// Fold the position back onto a `width` x `height` torus
    pub fn wrapped(&self, width: usize, height: usize) -> Self {
        Self {
            x: self.x.rem_euclid(width as i32),
            y: self.y.rem_euclid(height as i32),
        }
    }
}

/// The snake in the game
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body segments, with head at index 0
    pub body: Vec<Position>,
    /// Direction the next tick will move in
    pub direction: Direction,
    /// Direction of the last completed move; turns are checked against this
    heading: Direction,
}

impl Snake {
    /// Create a new snake with given starting position and direction
    pub fn new(head: Position, direction: Direction, length: usize) -> Self {
        let mut body = vec![head];

        // Add initial body segments behind the head
        let (dx, dy) = direction.delta();
        let (back_dx, back_dy) = (-dx, -dy);

        for i in 1..length {
            let prev = body[i - 1];
            body.push(prev.moved_by(back_dx, back_dy));
        }

        Self {
            body,
            direction,
            heading: direction,
        }
    }

    /// Create a snake from explicit segments, head first
    ///
    /// Returns `None` if `segments` is empty.
    pub fn from_segments(segments: Vec<Position>, direction: Direction) -> Option<Self> {
        if segments.is_empty() {
            return None;
        }
        Some(Self {
            body: segments,
            direction,
            heading: direction,
        })
    }

    /// Get the head position
    pub fn head(&self) -> Position {
        self.body[0]
    }

    /// Direction of the last completed move
    pub fn heading(&self) -> Direction {
        self.heading
    }

    /// Check if any segment, head included, sits on `pos`
    pub fn occupies(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    /// Queue a turn for the next tick
    ///
    /// A turn opposite either the queued direction or the last travelled one
    /// is refused, so two quick turns between ticks can never fold the head
    /// into the neck.
    pub fn steer(&mut self, direction: Direction) -> bool {
        if self.direction.is_opposite(direction) || self.heading.is_opposite(direction) {
            return false;
        }
        self.direction = direction;
        true
    }

    /// Push a new head, dropping the tail unless the snake grows
    pub fn advance(&mut self, new_head: Position, grow: bool) {
        self.body.insert(0, new_head);
        self.heading = self.direction;

        if !grow {
            self.body.pop();
        }
    }

    /// Get the length of the snake
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.body.len()
    }
}

/// What the snake ran into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionType {
    /// Snake hit itself
    SelfCollision,
    /// Snake hit an obstacle
    Obstacle,
}

/// Lifecycle phase of a game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Running,
    Paused,
    /// Terminal until restart
    GameOver,
}

/// Complete game state
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub snake: Snake,
    /// `None` only once the board has no free cell left
    pub food: Option<Position>,
    pub obstacles: HashSet<Position>,
    pub grid_width: usize,
    pub grid_height: usize,
    pub score: u32,
    /// Current tick interval
    pub speed: Duration,
    pub steps: u32,
    pub phase: Phase,
}

impl GameState {
    /// Create a new running game state
    pub fn new(
        snake: Snake,
        food: impl Into<Option<Position>>,
        obstacles: HashSet<Position>,
        grid_width: usize,
        grid_height: usize,
        speed: Duration,
    ) -> Self {
        Self {
            snake,
            food: food.into(),
            obstacles,
            grid_width,
            grid_height,
            score: 0,
            speed,
            steps: 0,
            phase: Phase::Running,
        }
    }

    /// Check if a position is within the grid bounds
    ///
    /// Wrapping keeps every segment and the food inside, so this only ever
    /// holds as an invariant check.
    pub fn is_in_bounds(&self, pos: Position) -> bool {
        pos.x >= 0
            && pos.x < self.grid_width as i32
            && pos.y >= 0
            && pos.y < self.grid_height as i32
    }

    /// Check if a position is occupied by the snake
    pub fn is_occupied_by_snake(&self, pos: Position) -> bool {
        self.snake.occupies(pos)
    }

    /// Check if a position holds an obstacle
    pub fn is_obstacle(&self, pos: Position) -> bool {
        self.obstacles.contains(&pos)
    }

    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }

    pub fn is_paused(&self) -> bool {
        self.phase == Phase::Paused
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    /// Read-only view handed to the render surface
    pub fn snapshot(&self, high_score: u32) -> Snapshot<'_> {
        Snapshot {
            snake: &self.snake.body,
            food: self.food,
            obstacles: &self.obstacles,
            grid_width: self.grid_width,
            grid_height: self.grid_height,
            score: self.score,
            high_score,
            speed: self.speed,
            phase: self.phase,
        }
    }
}

/// Borrowed frame of game state; everything a renderer may look at
#[derive(Debug, Clone, Copy)]
pub struct Snapshot<'a> {
    pub snake: &'a [Position],
    pub food: Option<Position>,
    pub obstacles: &'a HashSet<Position>,
    pub grid_width: usize,
    pub grid_height: usize,
    pub score: u32,
    pub high_score: u32,
    pub speed: Duration,
    pub phase: Phase,
}

impl Snapshot<'_> {
    pub fn head(&self) -> Position {
        self.snake[0]
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }
}
