use crate::alert::{Alert, AlertOutcome};
use crate::command::Command;
use crate::config::Config;
use crate::consts;
use crate::game::Game;
use crate::input::{BoardSizeInput, InputOutcome};
use crate::prefs::Preferences;
use crate::util::get_display_area;
use crossterm::event::{poll, read, Event};
use rand::Rng;
use ratatui::{backend::Backend, buffer::Buffer, layout::Rect, widgets::Widget, Terminal};
use std::collections::VecDeque;
use std::io;
use std::time::Instant;

/// The top-level application: a game plus the controls & pop-ups around it
#[derive(Clone, Debug)]
pub(crate) struct App<R = rand::rngs::ThreadRng> {
    game: Game<R>,
    config: Config,
    prefs: Preferences,
    /// Problems waiting to be shown to the player, oldest first
    alerts: VecDeque<Alert>,
    size_input: Option<BoardSizeInput>,
    next_tick: Option<Instant>,
}

impl<R: Rng> App<R> {
    pub(crate) fn new(config: Config, rng: R) -> App<R> {
        let mut alerts = VecDeque::new();
        let prefs = match config.load_preferences() {
            Ok(prefs) => prefs,
            Err(e) => {
                log::warn!("Failed to load preferences: {e}");
                alerts.push_back(Alert::from(e));
                Preferences::default()
            }
        };
        let mut board = config.board;
        match prefs.background_color() {
            Ok(Some(color)) => {
                log::debug!("Using stored background color {color}");
                board.background = color;
            }
            Ok(None) => (),
            Err(e) => {
                log::warn!("Ignoring stored background color: {e}");
                alerts.push_back(Alert::from(e));
            }
        }
        App {
            game: Game::new(board, rng),
            config,
            prefs,
            alerts,
            size_input: None,
            next_tick: None,
        }
    }

    pub(crate) fn run<B: Backend>(mut self, mut terminal: Terminal<B>) -> io::Result<()> {
        while !self.quitting() {
            terminal.draw(|frame| frame.render_widget(&self, frame.area()))?;
            self.process_input()?;
        }
        Ok(())
    }

    /// Wait for either an input event or the next tick, whichever comes
    /// first, and handle it
    fn process_input(&mut self) -> io::Result<()> {
        if self.ticking() {
            let when = *self
                .next_tick
                .get_or_insert_with(|| Instant::now() + self.game.tick_period());
            let wait = when.saturating_duration_since(Instant::now());
            if wait.is_zero() || !poll(wait)? {
                self.next_tick = None;
                let event = self.game.tick();
                log::trace!("Tick: {event:?}");
                return Ok(());
            }
        } else {
            self.next_tick = None;
        }
        self.handle_event(read()?);
        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        if let Some(cmd) = event
            .as_key_press_event()
            .and_then(Command::from_key_event)
        {
            self.handle_command(cmd);
        }
    }

    fn handle_command(&mut self, cmd: Command) {
        if let Some(alert) = self.alerts.front() {
            match alert.handle_command(cmd) {
                Some(AlertOutcome::Dismissed) => {
                    let _ = self.alerts.pop_front();
                }
                Some(AlertOutcome::Quit) => self.game.stop(),
                None => (),
            }
        } else if let Some(input) = self.size_input.as_mut() {
            match input.handle_command(cmd) {
                Some(InputOutcome::Submit(text)) => {
                    self.size_input = None;
                    self.resize(&text);
                }
                Some(InputOutcome::Cancel) => self.size_input = None,
                Some(InputOutcome::Quit) => self.game.stop(),
                None => (),
            }
        } else {
            match cmd {
                Command::B if self.game.running() => {
                    let board = self.game.config();
                    self.size_input = Some(BoardSizeInput::new(
                        board.geometry.cells(),
                        board.min_cells,
                        board.max_cells,
                    ));
                }
                Command::C if self.game.running() => self.cycle_color(),
                cmd => self.game.handle_command(cmd),
            }
        }
    }

    fn resize(&mut self, text: &str) {
        if let Err(e) = self.game.resize(text) {
            log::warn!("Rejected board size {text:?}: {e}");
            self.alerts.push_back(Alert::from(e));
        }
    }

    /// Switch the board's background to the next color in the palette and
    /// remember the choice
    fn cycle_color(&mut self) {
        let current = self.game.config().background;
        let i = consts::PALETTE
            .iter()
            .position(|&c| c == current)
            .map_or(0, |i| (i + 1) % consts::PALETTE.len());
        let color = consts::PALETTE
            .get(i)
            .copied()
            .unwrap_or(consts::BACKGROUND_COLOR);
        self.game.set_background(color);
        self.prefs.set_background_color(color);
        if let Err(e) = self.config.save_preferences(&self.prefs) {
            log::error!("Failed to save preferences: {e}");
            self.alerts.push_back(Alert::from(e));
        }
    }
}

impl<R> App<R> {
    /// Whether the game clock is currently running.  It is stopped while a
    /// pop-up has focus.
    fn ticking(&self) -> bool {
        self.game.running() && self.alerts.is_empty() && self.size_input.is_none()
    }

    fn quitting(&self) -> bool {
        self.game.stopped()
    }
}

impl<R> Widget for &App<R> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        self.game.render(area, buf);
        let display = get_display_area(area);
        if let Some(input) = self.size_input.as_ref() {
            input.render(display, buf);
        }
        if let Some(alert) = self.alerts.front() {
            alert.render(display, buf);
        }
    }
}
