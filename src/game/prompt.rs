use crate::command::Command;
use crate::consts;
use crate::util::EnumExt;
use enum_map::Enum;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{
        block::{Block, Padding},
        Clear, Widget,
    },
};

/// A pop-up asking whether to keep playing after the game has ended
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct GameOver {
    /// Why the game ended
    pub(super) reason: EndReason,

    /// The currently-selected item in the menu
    selection: Decision,
}

impl GameOver {
    /// The height that should be used for the `Rect` passed to
    /// `GameOver::render()`
    pub(super) const HEIGHT: u16 = 5;

    /// The width that should be used for the `Rect` passed to
    /// `GameOver::render()`
    pub(super) const WIDTH: u16 = 19;

    pub(super) fn new(reason: EndReason) -> GameOver {
        GameOver {
            reason,
            selection: Decision::min(),
        }
    }

    /// Handle a command.  Returns `Some` if the user made a choice.
    pub(super) fn handle_command(&mut self, cmd: Command) -> Option<Decision> {
        match cmd {
            Command::R => return Some(Decision::Continue),
            Command::Q | Command::Quit => return Some(Decision::Quit),
            Command::Enter => return Some(self.selection),
            Command::Up => {
                if let Some(opt) = self.selection.prev() {
                    self.selection = opt;
                }
            }
            Command::Down => {
                if let Some(opt) = self.selection.next() {
                    self.selection = opt;
                }
            }
            Command::Next => self.selection = self.selection.next().unwrap_or_else(Decision::min),
            Command::Prev => self.selection = self.selection.prev().unwrap_or_else(Decision::max),
            _ => (),
        }
        None
    }
}

/// Why a game ended
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum EndReason {
    /// The snake ran into itself
    Collision,

    /// The snake filled the board, leaving nowhere to put more food
    BoardFilled,
}

impl EndReason {
    fn title(self) -> &'static str {
        match self {
            EndReason::Collision => " GAME OVER ",
            EndReason::BoardFilled => " YOU WIN! ",
        }
    }
}

/// The choices in the game-over menu
#[derive(Clone, Copy, Debug, Enum, Eq, PartialEq)]
pub(crate) enum Decision {
    /// Start over with a fresh snake
    Continue,

    /// Quit the application
    Quit,
}

impl Decision {
    /// Render the option as a `Line` for display in the menu.  If `selected`
    /// is `true`, this option is the currently-selected one.
    fn to_line(self, selected: bool) -> Line<'static> {
        let mut line = Line::default();
        if selected {
            line.push_span("» ");
        } else {
            line.push_span("  ");
        }
        let (label, key) = match self {
            Decision::Continue => ("Continue (", "r"),
            Decision::Quit => ("Quit (", "q"),
        };
        line.push_span(label);
        line.push_span(Span::styled(key, consts::KEY_STYLE));
        line.push_span(")");
        if selected {
            line = line.style(consts::MENU_SELECTION_STYLE);
        }
        line
    }
}

impl Widget for GameOver {
    /*
     * ┌─── GAME OVER ───┐
     * │ » Continue (r)  │
     * │   Quit (q)      │
     * │                 │
     * └─────────────────┘
     */

    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::bordered()
            .title(self.reason.title())
            .title_alignment(Alignment::Center)
            .padding(Padding::horizontal(1))
            .style(Style::reset());
        let inner = block.inner(area);
        Clear.render(area, buf);
        block.render(area, buf);
        for (opt, row) in Decision::iter().zip(inner.rows()) {
            opt.to_line(self.selection == opt).render(row, buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn navigate() {
        let mut prompt = GameOver::new(EndReason::Collision);
        assert_eq!(prompt.handle_command(Command::Up), None);
        assert_eq!(prompt.selection, Decision::Continue);
        assert_eq!(prompt.handle_command(Command::Down), None);
        assert_eq!(prompt.selection, Decision::Quit);
        assert_eq!(prompt.handle_command(Command::Down), None);
        assert_eq!(prompt.selection, Decision::Quit);
        assert_eq!(prompt.handle_command(Command::Next), None);
        assert_eq!(prompt.selection, Decision::Continue);
        assert_eq!(prompt.handle_command(Command::Prev), None);
        assert_eq!(prompt.handle_command(Command::Enter), Some(Decision::Quit));
    }

    #[test]
    fn shortcuts() {
        let mut prompt = GameOver::new(EndReason::BoardFilled);
        assert_eq!(prompt.handle_command(Command::R), Some(Decision::Continue));
        assert_eq!(prompt.handle_command(Command::Q), Some(Decision::Quit));
        assert_eq!(prompt.handle_command(Command::Quit), Some(Decision::Quit));
        assert_eq!(prompt.handle_command(Command::Left), None);
    }

    #[test]
    fn render() {
        let prompt = GameOver::new(EndReason::Collision);
        let area = Rect::new(0, 0, GameOver::WIDTH, GameOver::HEIGHT);
        let mut buffer = Buffer::empty(area);
        prompt.render(area, &mut buffer);
        let mut expected = Buffer::with_lines([
            "┌─── GAME OVER ───┐",
            "│ » Continue (r)  │",
            "│   Quit (q)      │",
            "│                 │",
            "└─────────────────┘",
        ]);
        expected.set_style(area, Style::reset());
        expected.set_style(Rect::new(2, 1, 15, 1), consts::MENU_SELECTION_STYLE);
        expected.set_style(Rect::new(14, 1, 1, 1), consts::KEY_STYLE);
        expected.set_style(Rect::new(10, 2, 1, 1), consts::KEY_STYLE);
        assert_eq!(buffer, expected);
    }
}
