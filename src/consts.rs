//! Assorted constants & hard-coded defaults
use ratatui::{
    layout::Size,
    style::{Color, Modifier, Style},
};
use std::time::Duration;

/// Default time between movements of the snake, in milliseconds
pub(crate) const TICK_MILLIS: u64 = 150;

/// Default time between movements of the snake
pub(crate) const TICK_PERIOD: Duration = Duration::from_millis(TICK_MILLIS);

/// Draw everything inside a rectangle of this size in the center of the
/// terminal window.
///
/// Cf. [`crate::util::get_display_area()`]
pub(crate) const DISPLAY_SIZE: Size = Size {
    width: 80,
    height: 24,
};

/// Default number of cells along each side of the board
pub(crate) const DEFAULT_CELLS: u16 = 20;

/// Smallest board size accepted from the board-size control
pub(crate) const MIN_CELLS: u16 = 5;

/// Largest board size accepted from the board-size control
pub(crate) const MAX_CELLS: u16 = 20;

/// Default width & height of a cell, in pixels
pub(crate) const CELL_SIZE: u16 = 30;

/// Default gap between adjacent cells, in pixels
pub(crate) const BORDER_WIDTH: u16 = 1;

/// Number of random draws made when placing food before falling back to
/// enumerating the free cells
pub(crate) const MAX_SPAWN_ATTEMPTS: usize = 64;

/// Terminal columns used to display one board cell
pub(crate) const COLUMNS_PER_CELL: u16 = 2;

/// Default background color for the board's cells
pub(crate) const BACKGROUND_COLOR: Color = Color::DarkGray;

/// Colors offered by the color picker, in cycling order
pub(crate) const PALETTE: [Color; 8] = [
    Color::DarkGray,
    Color::Black,
    Color::Blue,
    Color::Magenta,
    Color::Cyan,
    Color::Yellow,
    Color::Gray,
    Color::White,
];

/// Fill color for the snake's cells
pub(crate) const SNAKE_COLOR: Color = Color::Green;

/// Color of the eye marks on the snake's head
pub(crate) const EYE_COLOR: Color = Color::Black;

/// Glyph for an eye mark on the snake's head
pub(crate) const EYE_SYMBOL: char = '•';

/// Glyph for the food
pub(crate) const FRUIT_SYMBOL: char = '●';

/// Style for the food
pub(crate) const FRUIT_STYLE: Style = Style::new().fg(Color::LightRed);

/// Style for key codes shown in the interface
pub(crate) const KEY_STYLE: Style = Style::new().fg(Color::Yellow);

/// Style for the score bar at the top of the game screen
pub(crate) const SCORE_BAR_STYLE: Style = Style::new().add_modifier(Modifier::REVERSED);

/// Style for the currently-selected menu item
pub(crate) const MENU_SELECTION_STYLE: Style = Style::new().add_modifier(Modifier::UNDERLINED);
