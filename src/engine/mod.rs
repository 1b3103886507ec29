//! The game proper: snake, food, scoring, and the lifecycle state machine.
//!
//! Nothing in here does any I/O apart from talking to a [`ScoreStore`]; the
//! terminal front end drives an [`Engine`] by feeding it [`Intent`]s and
//! calling [`Engine::tick()`] on a timer.
mod direction;
mod grid;
mod level;
mod snake;
pub(crate) use self::direction::Direction;
pub(crate) use self::grid::{Cell, GridSize};
pub(crate) use self::snake::Snake;
use self::grid::random_food;
use crate::store::{ScoreStore, HIGH_SCORE_KEY};
use crate::util::error_chain;
use rand::Rng;
use std::time::Duration;

/// The coarse mode of the game
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) enum LifecycleState {
    #[default]
    NotStarted,
    Playing,
    GameOver,
    LevelComplete,
}

/// A request from the player
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Intent {
    Start,
    SetDirection(Direction),
    TogglePause,
    Reset,
    Restart,
    Continue,
}

/// What happened during a call to [`Engine::tick()`]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum TickOutcome {
    /// The engine was not runnable, and nothing changed
    Idle,
    /// The snake moved one cell
    Moved,
    /// The snake moved onto the food and grew
    Ate,
    /// The snake ate enough to finish the level
    LevelComplete,
    /// The snake ran into itself (or filled the grid)
    GameOver,
}

/// A read-only view of the game for rendering
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Snapshot<'a> {
    pub(crate) state: LifecycleState,
    pub(crate) snake: &'a Snake,
    /// Only `None` after the snake has filled the entire grid
    pub(crate) food: Option<Cell>,
    /// The cell the snake's head was about to move into when it collided
    pub(crate) collision: Option<Cell>,
    pub(crate) score: u32,
    pub(crate) level: u32,
    pub(crate) high_score: u32,
    pub(crate) paused: bool,
    pub(crate) grid_size: u16,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Engine<S, R = rand::rngs::ThreadRng> {
    rng: R,
    store: S,
    grid_size: GridSize,
    state: LifecycleState,
    paused: bool,
    snake: Snake,
    food: Option<Cell>,
    collision: Option<Cell>,
    direction: Direction,
    pending_direction: Direction,
    score: u32,
    level: u32,
    high_score: u32,
}

impl<S: ScoreStore> Engine<S, rand::rngs::ThreadRng> {
    pub(crate) fn new(grid_size: GridSize, store: S) -> Self {
        Engine::new_with_rng(grid_size, store, rand::rng())
    }
}

impl<S: ScoreStore, R: Rng> Engine<S, R> {
    /// Create an engine in the [`NotStarted`][LifecycleState::NotStarted]
    /// state.  The best score is read from `store` once, here; if it cannot
    /// be read, it starts at zero.
    pub(crate) fn new_with_rng(grid_size: GridSize, store: S, rng: R) -> Engine<S, R> {
        let high_score = match store.get(HIGH_SCORE_KEY) {
            Ok(score) => score.unwrap_or_default(),
            Err(e) => {
                log::warn!("Could not read high score: {}", error_chain(&e));
                0
            }
        };
        let mut engine = Engine {
            rng,
            store,
            grid_size,
            state: LifecycleState::NotStarted,
            paused: false,
            snake: Snake::initial(grid_size.get()),
            food: None,
            collision: None,
            direction: Direction::Right,
            pending_direction: Direction::Right,
            score: 0,
            level: 1,
            high_score,
        };
        engine.new_run();
        engine
    }

    /// Apply an intent.  Intents that make no sense in the current state are
    /// ignored.  Returns `true` if anything changed.
    pub(crate) fn apply(&mut self, intent: Intent) -> bool {
        use LifecycleState::{GameOver, LevelComplete, NotStarted, Playing};
        match (self.state, intent) {
            (NotStarted, Intent::Start) | (GameOver, Intent::Restart) => {
                self.new_run();
                self.state = Playing;
                log::info!("Game started on {0}x{0} grid", self.grid_size);
            }
            (Playing | LevelComplete, Intent::SetDirection(d)) => {
                if d == self.direction.opposite() || d == self.pending_direction {
                    return false;
                }
                self.pending_direction = d;
            }
            (Playing, Intent::TogglePause) => {
                self.paused = !self.paused;
                log::info!("Game {}", if self.paused { "paused" } else { "resumed" });
            }
            (Playing, Intent::Reset) => {
                self.new_run();
                self.state = NotStarted;
                log::info!("Game reset");
            }
            (LevelComplete, Intent::Continue) => {
                self.paused = false;
                self.state = Playing;
                log::info!("Continuing on level {}", self.level);
            }
            (state, intent) => {
                log::debug!("Ignoring {intent:?} while in state {state:?}");
                return false;
            }
        }
        true
    }

    /// Advance the game by one step.  Does nothing unless the game is being
    /// played and is not paused.
    pub(crate) fn tick(&mut self) -> TickOutcome {
        if !self.runnable() {
            return TickOutcome::Idle;
        }
        let size = self.grid_size.get();
        self.direction = self.pending_direction;
        let new_head = self.direction.advance(self.snake.head(), size);
        let moved = self.snake.moved_to(new_head);
        if moved.has_self_collision() {
            log::info!(
                "Snake ran into itself at ({}, {}) with score {}",
                new_head.x,
                new_head.y,
                self.score
            );
            self.collision = Some(new_head);
            self.end_life();
            return TickOutcome::GameOver;
        }
        if self.food != Some(new_head) {
            self.snake = moved;
            return TickOutcome::Moved;
        }
        let tail = self.snake.tail();
        self.snake = moved;
        self.snake.grow_into(tail);
        self.score = self.score.saturating_add(level::food_points(self.level));
        match random_food(&mut self.rng, &self.snake.occupied(), size) {
            Ok(food) => self.food = Some(food),
            Err(e) => {
                log::error!("Cannot place food: {e}");
                self.food = None;
                self.end_life();
                return TickOutcome::GameOver;
            }
        }
        if self.score >= level::level_threshold(self.level) {
            self.level = self.level.saturating_add(1);
            self.state = LifecycleState::LevelComplete;
            log::info!(
                "Level complete with score {}; next level is {}",
                self.score,
                self.level
            );
            TickOutcome::LevelComplete
        } else {
            TickOutcome::Ate
        }
    }

    /// Reinitialize everything that lasts for a single life
    fn new_run(&mut self) {
        let size = self.grid_size.get();
        self.score = 0;
        self.level = 1;
        self.snake = Snake::initial(size);
        self.collision = None;
        self.direction = Direction::Right;
        self.pending_direction = Direction::Right;
        self.paused = false;
        self.food = match random_food(&mut self.rng, &self.snake.occupied(), size) {
            Ok(food) => Some(food),
            Err(e) => {
                log::error!("Cannot place food: {e}");
                None
            }
        };
    }

    fn end_life(&mut self) {
        self.state = LifecycleState::GameOver;
        log::info!("Game over with score {} on level {}", self.score, self.level);
        if self.score > self.high_score {
            log::info!(
                "New high score {} (previous: {})",
                self.score,
                self.high_score
            );
            self.high_score = self.score;
            if let Err(e) = self.store.set(HIGH_SCORE_KEY, self.high_score) {
                log::warn!("Could not save high score: {}", error_chain(&e));
            }
        }
    }
}

impl<S, R> Engine<S, R> {
    pub(crate) fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            state: self.state,
            snake: &self.snake,
            food: self.food,
            collision: self.collision,
            score: self.score,
            level: self.level,
            high_score: self.high_score,
            paused: self.paused,
            grid_size: self.grid_size.get(),
        }
    }

    pub(crate) fn state(&self) -> LifecycleState {
        self.state
    }

    /// Returns `true` if the game is in a state where ticks should be applied
    pub(crate) fn runnable(&self) -> bool {
        self.state == LifecycleState::Playing && !self.paused
    }

    /// Time until the next tick, at the current level's speed
    pub(crate) fn tick_interval(&self) -> Duration {
        level::tick_interval(self.level)
    }
}
