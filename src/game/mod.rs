mod direction;
mod food;
mod prompt;
mod snake;
pub(crate) use self::direction::Direction;
pub(crate) use self::food::Food;
use self::prompt::{Decision, EndReason, GameOver};
pub(crate) use self::snake::Snake;
use crate::command::Command;
use crate::config::{BoardConfig, BoardSizeError};
use crate::consts;
use crate::render::{draw_board, draw_food, draw_snake, TermSurface};
use crate::util::{center_rect, get_display_area};
use rand::Rng;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Margin, Position, Rect, Size},
    style::Color,
    text::{Line, Span},
    widgets::{Block, Widget},
};
use std::time::Duration;

/// Where a new snake starts out
const SNAKE_START: (Position, Direction) = (Position::ORIGIN, Direction::Right);

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Game<R = rand::rngs::ThreadRng> {
    rng: R,
    config: BoardConfig,
    snake: Snake,
    food: Food,
    state: GameState,
}

impl<R: Rng> Game<R> {
    pub(crate) fn new(config: BoardConfig, rng: R) -> Game<R> {
        let (head, direction) = SNAKE_START;
        let mut game = Game {
            rng,
            config,
            snake: Snake::new(head, direction),
            food: Food::new(head),
            state: GameState::Running,
        };
        game.place_food();
        let geometry = game.config.geometry;
        log::info!(
            "Starting game on a {0}×{0} board of {1}px cells with {2}px borders",
            geometry.cells(),
            geometry.cell_size(),
            geometry.border_width(),
        );
        game
    }

    /// Advance the game by one step: move the snake, then let it eat or
    /// crash.  Does nothing if the game is not running.
    pub(crate) fn tick(&mut self) -> TickEvent {
        if !self.running() {
            return TickEvent::Idle;
        }
        let geometry = self.config.geometry;
        self.snake.advance(geometry);
        let head = self.snake.head();
        log::trace!("Snake moved to ({}, {})", head.x, head.y);
        if self.snake.collides_food(self.food.position()) {
            self.snake.grow(geometry);
            log::info!("Snake ate food; score is now {}", self.score());
            if self.place_food() {
                TickEvent::Ate
            } else {
                TickEvent::Won
            }
        } else if self.snake.collides_self() {
            log::info!(
                "Snake ran into itself at ({}, {}); final score: {}",
                head.x,
                head.y,
                self.score()
            );
            self.state = GameState::GameOver(GameOver::new(EndReason::Collision));
            TickEvent::Collided
        } else {
            TickEvent::Moved
        }
    }

    /// Change the number of cells per side to the value entered by the
    /// player.  On error, nothing is changed.
    pub(crate) fn resize(&mut self, input: &str) -> Result<(), BoardSizeError> {
        let cells = self.config.parse_cells(input)?;
        let geometry = self.config.geometry.with_cells(cells)?;
        self.config.geometry = geometry;
        if !self.snake.body().all(|p| geometry.contains(p)) {
            log::info!("Snake does not fit on the resized board; starting it over");
            let (head, direction) = SNAKE_START;
            self.snake.reset(head, direction);
        }
        self.place_food();
        let canvas = geometry.canvas_size();
        log::info!(
            "Board resized to {cells}×{cells} cells ({}×{} px)",
            canvas.width,
            canvas.height
        );
        Ok(())
    }

    /// Handle a command from the player
    pub(crate) fn handle_command(&mut self, cmd: Command) {
        match self.state {
            GameState::Running => match cmd {
                Command::Up => self.steer(Direction::Up),
                Command::Down => self.steer(Direction::Down),
                Command::Left => self.steer(Direction::Left),
                Command::Right => self.steer(Direction::Right),
                Command::Q | Command::Quit => self.stop(),
                _ => (),
            },
            GameState::GameOver(ref mut prompt) => match prompt.handle_command(cmd) {
                Some(Decision::Continue) => self.restart(),
                Some(Decision::Quit) => self.stop(),
                None => (),
            },
            GameState::Stopped => (),
        }
    }

    /// Start over with a new snake after a game over
    fn restart(&mut self) {
        let (head, direction) = SNAKE_START;
        self.snake.reset(head, direction);
        self.state = GameState::Running;
        if self.snake.occupies(self.food.position()) {
            self.place_food();
        }
        log::info!("Game restarted");
    }

    /// Move the food to a random free cell.  If there are no free cells, the
    /// player has won; the game is ended, and `false` is returned.
    fn place_food(&mut self) -> bool {
        match self
            .food
            .spawn(&mut self.rng, self.config.geometry, &self.snake)
        {
            Ok(()) => true,
            Err(e) => {
                log::info!("{e}; the player wins with a score of {}", self.score());
                self.state = GameState::GameOver(GameOver::new(EndReason::BoardFilled));
                false
            }
        }
    }
}

impl<R> Game<R> {
    pub(crate) fn running(&self) -> bool {
        self.state == GameState::Running
    }

    pub(crate) fn stopped(&self) -> bool {
        self.state == GameState::Stopped
    }

    /// The player's score, which is one less than the length of the snake
    pub(crate) fn score(&self) -> usize {
        self.snake.len() - 1
    }

    pub(crate) fn config(&self) -> &BoardConfig {
        &self.config
    }

    pub(crate) fn tick_period(&self) -> Duration {
        self.config.tick_period
    }

    pub(crate) fn set_background(&mut self, color: Color) {
        log::info!("Board background color set to {color}");
        self.config.background = color;
    }

    fn steer(&mut self, direction: Direction) {
        if !self.snake.turn(direction) {
            log::debug!("Ignoring request to reverse direction to {direction:?}");
        }
    }

    pub(crate) fn stop(&mut self) {
        log::info!("Stopping game with a score of {}", self.score());
        self.state = GameState::Stopped;
    }
}

impl<R> Widget for &Game<R> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let display = get_display_area(area);
        let [score_area, board_area, help_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(1),
        ])
        .areas(display);
        Line::styled(format!(" Score: {}", self.score()), consts::SCORE_BAR_STYLE)
            .render(score_area, buf);

        let geometry = self.config.geometry;
        let mut block_size = TermSurface::display_size(geometry);
        block_size.width = block_size.width.saturating_add(2);
        block_size.height = block_size.height.saturating_add(2);
        let block_area = center_rect(board_area, block_size);
        Block::bordered().render(block_area, buf);
        let mut surface = TermSurface::new(block_area.inner(Margin::new(1, 1)), buf, geometry);
        draw_board(&mut surface, geometry, self.config.background);
        draw_snake(&mut surface, geometry, &self.snake);
        if !matches!(
            self.state,
            GameState::GameOver(GameOver {
                reason: EndReason::BoardFilled,
                ..
            })
        ) {
            draw_food(&mut surface, geometry, self.food);
        }

        Line::from_iter([
            Span::raw(" Move ("),
            Span::styled("w a s d", consts::KEY_STYLE),
            Span::raw(") · Board Size ("),
            Span::styled("b", consts::KEY_STYLE),
            Span::raw(") · Color ("),
            Span::styled("c", consts::KEY_STYLE),
            Span::raw(") · Quit ("),
            Span::styled("q", consts::KEY_STYLE),
            Span::raw(")"),
        ])
        .render(help_area, buf);

        if let GameState::GameOver(prompt) = self.state {
            let prompt_area = center_rect(
                display,
                Size {
                    width: GameOver::WIDTH,
                    height: GameOver::HEIGHT,
                },
            );
            prompt.render(prompt_area, buf);
        }
    }
}

#[cfg(test)]
impl<R> Game<R> {
    /// End the game as though the snake had run into itself
    pub(crate) fn end_in_collision(&mut self) {
        self.state = GameState::GameOver(GameOver::new(EndReason::Collision));
    }
}

/// What happened during a call to [`Game::tick()`]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum TickEvent {
    /// The game is not running
    Idle,
    /// The snake moved without incident
    Moved,
    /// The snake ate the food & grew
    Ate,
    /// The snake ran into itself
    Collided,
    /// The snake ate the food & filled the board
    Won,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum GameState {
    Running,
    /// The game has ended, and the player is being asked whether to continue
    GameOver(GameOver),
    Stopped,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Geometry;
    use rand::SeedableRng;
    use rand_chacha::ChaCha12Rng;
    use std::collections::VecDeque;

    const RNG_SEED: u64 = 0x0123456789ABCDEF;

    fn config(cells: u16) -> BoardConfig {
        BoardConfig {
            geometry: Geometry::new(cells, 30, 1).unwrap(),
            ..BoardConfig::default()
        }
    }

    fn new_game(cells: u16) -> Game<ChaCha12Rng> {
        Game::new(config(cells), ChaCha12Rng::seed_from_u64(RNG_SEED))
    }

    fn buffer_text(buffer: &Buffer) -> Vec<String> {
        let width = usize::from(buffer.area.width);
        buffer
            .content()
            .chunks(width)
            .map(|row| row.iter().map(|c| c.symbol()).collect())
            .collect()
    }

    #[test]
    fn new_game_state() {
        let game = new_game(10);
        assert!(game.running());
        assert_eq!(game.snake, Snake::new(Position::ORIGIN, Direction::Right));
        assert_eq!(game.score(), 0);
        assert!(game.config.geometry.contains(game.food.position()));
        assert_ne!(game.food.position(), Position::ORIGIN);
    }

    #[test]
    fn three_ticks() {
        let mut game = new_game(10);
        game.food = Food::new(Position::new(0, 279));
        for _ in 0..3 {
            assert_eq!(game.tick(), TickEvent::Moved);
        }
        assert_eq!(game.snake.head(), Position::new(93, 0));
        assert_eq!(game.snake.len(), 1);
    }

    #[test]
    fn eat_on_third_tick() {
        let mut game = new_game(10);
        game.food = Food::new(Position::new(93, 0));
        assert_eq!(game.tick(), TickEvent::Moved);
        assert_eq!(game.tick(), TickEvent::Moved);
        assert_eq!(game.tick(), TickEvent::Ate);
        assert_eq!(game.snake.head(), Position::new(93, 0));
        assert_eq!(game.snake.len(), 2);
        assert_eq!(game.score(), 1);
        assert!(!game.snake.occupies(game.food.position()));
    }

    #[test]
    fn eat_on_fourth_tick() {
        let mut game = new_game(10);
        game.food = Food::new(Position::new(0, 279));
        for _ in 0..3 {
            game.tick();
        }
        assert_eq!(game.snake.head(), Position::new(93, 0));
        game.food = Food::new(Position::new(124, 0));
        assert_eq!(game.tick(), TickEvent::Ate);
        assert_eq!(game.snake.len(), 2);
        assert_eq!(game.score(), 1);
        assert_eq!(
            game.snake.body().collect::<Vec<_>>(),
            [Position::new(124, 0), Position::new(93, 0)]
        );
    }

    #[test]
    fn reversal_rejected() {
        let mut game = new_game(10);
        game.food = Food::new(Position::new(0, 279));
        game.snake.head = Position::new(93, 31);
        game.snake.tail = VecDeque::from([
            Position::new(62, 31),
            Position::new(31, 31),
            Position::new(0, 31),
        ]);
        game.handle_command(Command::Left);
        assert_eq!(game.snake.direction(), Direction::Right);
        assert_eq!(game.tick(), TickEvent::Moved);
        assert!(game.running());
        assert_eq!(game.snake.head(), Position::new(124, 31));
    }

    #[test]
    fn collision_and_continue() {
        let mut game = new_game(10);
        game.food = Food::new(Position::new(0, 279));
        // A snake curled so that turning down runs into its own body
        game.snake.head = Position::new(62, 62);
        game.snake.tail = VecDeque::from([
            Position::new(93, 62),
            Position::new(93, 93),
            Position::new(62, 93),
            Position::new(31, 93),
        ]);
        game.snake.direction = Direction::Left;
        game.handle_command(Command::Down);
        assert_eq!(game.tick(), TickEvent::Collided);
        assert!(!game.running());
        assert_eq!(game.score(), 4);
        assert_eq!(game.tick(), TickEvent::Idle);
        // Movement keys go to the prompt now
        game.handle_command(Command::Up);
        assert!(!game.running());
        game.handle_command(Command::R);
        assert!(game.running());
        assert_eq!(game.score(), 0);
        assert_eq!(game.snake, Snake::new(Position::ORIGIN, Direction::Right));
        assert_eq!(game.food.position(), Position::new(0, 279));
    }

    #[test]
    fn collision_and_quit() {
        let mut game = new_game(10);
        game.state = GameState::GameOver(GameOver::new(EndReason::Collision));
        game.handle_command(Command::Down);
        game.handle_command(Command::Enter);
        assert!(game.stopped());
        assert_eq!(game.tick(), TickEvent::Idle);
    }

    #[test]
    fn quit_while_running() {
        let mut game = new_game(10);
        game.handle_command(Command::Q);
        assert!(game.stopped());
    }

    /// Lay out a snake along the given `(column, row)` cells, head first
    fn place_snake(game: &mut Game<ChaCha12Rng>, cells: &[(u16, u16)], direction: Direction) {
        let g = game.config.geometry;
        let mut body = cells.iter().map(|&(col, row)| g.cell_origin(col, row));
        game.snake.head = body.next().unwrap();
        game.snake.tail = body.collect();
        game.snake.direction = direction;
    }

    #[test]
    fn fill_board() {
        let mut game = new_game(5);
        let g = game.config.geometry;
        game.food = Food::new(g.cell_origin(4, 4));
        // Boustrophedon through every cell but the food, ending at the origin
        #[rustfmt::skip]
        let cells = [
            (3, 4), (2, 4), (1, 4), (0, 4),
            (0, 3), (1, 3), (2, 3), (3, 3), (4, 3),
            (4, 2), (3, 2), (2, 2), (1, 2), (0, 2),
            (0, 1), (1, 1), (2, 1), (3, 1), (4, 1),
            (4, 0), (3, 0), (2, 0), (1, 0), (0, 0),
        ];
        place_snake(&mut game, &cells, Direction::Right);
        assert_eq!(game.tick(), TickEvent::Won);
        assert_eq!(game.snake.len(), 25);
        assert!(g.positions().all(|p| game.snake.occupies(p)));
        assert_eq!(game.score(), 24);
        assert_eq!(
            game.state,
            GameState::GameOver(GameOver::new(EndReason::BoardFilled))
        );
    }

    #[test]
    fn grown_segment_on_body_is_not_a_win() {
        let mut game = new_game(5);
        let g = game.config.geometry;
        game.food = Food::new(g.cell_origin(4, 4));
        // After eating, the new segment goes left of the tip at (0, 1), which
        // wraps onto (4, 1), already part of the body; (0, 0) is left free.
        #[rustfmt::skip]
        let cells = [
            (3, 4), (2, 4), (1, 4), (0, 4),
            (0, 3), (1, 3), (2, 3), (3, 3), (4, 3),
            (4, 2), (4, 1), (4, 0), (3, 0), (3, 1), (3, 2),
            (2, 2), (2, 1), (2, 0), (1, 0), (1, 1), (1, 2),
            (0, 2), (0, 1), (0, 0),
        ];
        place_snake(&mut game, &cells, Direction::Right);
        assert_eq!(game.tick(), TickEvent::Ate);
        assert_eq!(game.snake.len(), 25);
        assert!(!game.snake.occupies(g.cell_origin(0, 0)));
        assert_eq!(game.food.position(), g.cell_origin(0, 0));
        assert!(game.running());
    }

    #[test]
    fn resize_out_of_range() {
        let mut game = new_game(10);
        let before = game.clone();
        assert_eq!(
            game.resize("25"),
            Err(BoardSizeError::OutOfRange {
                value: 25,
                min: 5,
                max: 20
            })
        );
        assert_eq!(game, before);
        assert_eq!(game.config.geometry.extent(), 310);
    }

    #[test]
    fn resize_garbage() {
        let mut game = new_game(10);
        let before = game.clone();
        assert!(game.resize("big").is_err());
        assert_eq!(game, before);
    }

    #[test]
    fn resize_grow() {
        let mut game = new_game(10);
        game.tick();
        let snake = game.snake.clone();
        game.resize("15").unwrap();
        assert_eq!(game.config.geometry.cells(), 15);
        assert_eq!(game.config.geometry.extent(), 465);
        assert_eq!(game.snake, snake);
        assert!(game.config.geometry.contains(game.food.position()));
        assert!(!game.snake.occupies(game.food.position()));
        assert!(game.running());
    }

    #[test]
    fn resize_shrink_resets_stranded_snake() {
        let mut game = new_game(10);
        game.snake.head = Position::new(279, 279);
        game.snake.tail = VecDeque::from([Position::new(248, 279)]);
        game.resize("5").unwrap();
        assert_eq!(game.config.geometry.cells(), 5);
        assert_eq!(game.snake, Snake::new(Position::ORIGIN, Direction::Right));
        assert!(game.config.geometry.contains(game.food.position()));
        assert_ne!(game.food.position(), Position::ORIGIN);
    }

    #[test]
    fn set_background() {
        let mut game = new_game(10);
        game.set_background(Color::Cyan);
        assert_eq!(game.config().background, Color::Cyan);
    }

    #[test]
    fn render_running() {
        let mut game = new_game(5);
        game.food = Food::new(Position::new(62, 31));
        game.tick();
        let area = Rect::new(0, 0, 80, 24);
        let mut buffer = Buffer::empty(area);
        game.render(area, &mut buffer);
        let lines = buffer_text(&buffer);
        assert!(lines[0].starts_with(" Score: 0 "));
        assert!(lines[23].starts_with(" Move (w a s d) · Board Size (b) · Color (c) · Quit (q)"));
        let board_top = lines.iter().position(|ln| ln.contains('┌')).unwrap();
        let left = lines[board_top].find('┌').unwrap();
        // Snake head with eyes on its right half in the second column of the
        // first row; food in the third column of the second row
        let row1 = &lines[board_top + 1][left..];
        assert!(row1.starts_with("│   •      │"));
        let row2 = &lines[board_top + 2][left..];
        assert!(row2.starts_with("│    ●     │"));
        assert!(!lines.iter().any(|ln| ln.contains("GAME OVER")));
    }

    #[test]
    fn render_game_over() {
        let mut game = new_game(10);
        game.state = GameState::GameOver(GameOver::new(EndReason::Collision));
        let area = Rect::new(0, 0, 80, 24);
        let mut buffer = Buffer::empty(area);
        game.render(area, &mut buffer);
        let lines = buffer_text(&buffer);
        assert!(lines.iter().any(|ln| ln.contains("─── GAME OVER ───")));
        assert!(lines.iter().any(|ln| ln.contains("» Continue (r)")));
    }
}
