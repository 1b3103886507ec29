//! Assorted constants & hard-coded configuration
use ratatui::{
    layout::Size,
    style::{Color, Modifier, Style},
};
use std::time::Duration;

/// Default side length of the (square) game grid
pub(crate) const DEFAULT_GRID_SIZE: u16 = 20;

/// Smallest permitted grid side length.  The starting snake needs room behind
/// its head at `size / 4`.
pub(crate) const MIN_GRID_SIZE: u16 = 8;

/// Largest permitted grid side length
pub(crate) const MAX_GRID_SIZE: u16 = 64;

/// Length of the snake at the start of a game
pub(crate) const INITIAL_SNAKE_LENGTH: usize = 3;

/// Number of random draws to make when placing food before falling back to
/// enumerating the free cells
pub(crate) const MAX_FOOD_ATTEMPTS: usize = 1000;

/// Points per food eaten, multiplied by the current level
pub(crate) const FOOD_POINTS_PER_LEVEL: u32 = 10;

/// Score needed per level; level `n` is complete at `n * LEVEL_SCORE_STEP`
pub(crate) const LEVEL_SCORE_STEP: u32 = 100;

/// Time between ticks before any per-level speedup
pub(crate) const BASE_TICK_PERIOD: Duration = Duration::from_millis(150);

/// Reduction in tick period per level
pub(crate) const TICK_STEP: Duration = Duration::from_millis(10);

/// Cap on the total per-level reduction
pub(crate) const MAX_TICK_SPEEDUP: Duration = Duration::from_millis(100);

/// The tick period never drops below this
pub(crate) const MIN_TICK_PERIOD: Duration = Duration::from_millis(50);

/// Draw everything inside a rectangle of at least this size in the center of
/// the terminal window.
///
/// Cf. [`crate::util::get_display_area()`]
pub(crate) const DISPLAY_SIZE: Size = Size {
    width: 80,
    height: 24,
};

/// Number of terminal columns used to draw one grid cell
pub(crate) const CELL_WIDTH: u16 = 2;

/// Glyph for the snake's head
pub(crate) const SNAKE_HEAD_SYMBOL: char = '@';

/// Glyph for the parts of the snake's body
pub(crate) const SNAKE_BODY_SYMBOL: char = '⚬';

/// Glyph for the food
pub(crate) const FOOD_SYMBOL: char = '●';

/// Glyph for the snake's head after it has run into itself
pub(crate) const COLLISION_SYMBOL: char = '×';

/// Style for the snake's head and body
pub(crate) const SNAKE_STYLE: Style = Style::new().fg(Color::Green).add_modifier(Modifier::BOLD);

/// Style for the food
pub(crate) const FOOD_STYLE: Style = Style::new().fg(Color::LightRed);

/// Style for [`COLLISION_SYMBOL`]
pub(crate) const COLLISION_STYLE: Style = Style::new()
    .fg(Color::LightRed)
    .add_modifier(Modifier::REVERSED);

/// Style for key codes shown in the interface
pub(crate) const KEY_STYLE: Style = Style::new().fg(Color::Yellow);

/// Style for the score bar at the top of the game screen
pub(crate) const SCORE_BAR_STYLE: Style = Style::new().add_modifier(Modifier::REVERSED);
