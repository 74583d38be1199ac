use crate::command::Command;
use crate::consts;
use crate::util::center_rect;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect, Size},
    text::{Line, Span},
    widgets::{
        block::{Block, Padding},
        Clear, Widget,
    },
};

/// A pop-up text field for entering a new board size
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct BoardSizeInput {
    text: String,
    min: u16,
    max: u16,
}

impl BoardSizeInput {
    /// Maximum number of characters that can be typed into the field
    const MAX_DIGITS: usize = 3;

    const WIDTH: u16 = 28;
    const HEIGHT: u16 = 4;

    /// Create an input field prefilled with the current size
    pub(crate) fn new(current: u16, min: u16, max: u16) -> BoardSizeInput {
        BoardSizeInput {
            text: current.to_string(),
            min,
            max,
        }
    }

    /// Handle a command.  Returns `Some` once the player is done with the
    /// field.
    pub(crate) fn handle_command(&mut self, cmd: Command) -> Option<InputOutcome> {
        match cmd {
            Command::Digit(d) => {
                if self.text.len() < Self::MAX_DIGITS {
                    if let Some(c) = char::from_digit(u32::from(d), 10) {
                        self.text.push(c);
                    }
                }
            }
            Command::Backspace => {
                let _ = self.text.pop();
            }
            Command::Enter => return Some(InputOutcome::Submit(self.text.clone())),
            Command::Esc => return Some(InputOutcome::Cancel),
            Command::Quit => return Some(InputOutcome::Quit),
            _ => (),
        }
        None
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) enum InputOutcome {
    /// The player pressed Enter with the given text in the field
    Submit(String),
    Cancel,
    Quit,
}

impl Widget for &BoardSizeInput {
    /*
     * ┌─── Board size (5-20) ────┐
     * │ 12_                      │
     * │ Enter = OK, Esc = Cancel │
     * └──────────────────────────┘
     */

    // `area` is the area of the entire display, as with `Alert`.
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block_area = center_rect(
            area,
            Size {
                width: BoardSizeInput::WIDTH,
                height: BoardSizeInput::HEIGHT,
            },
        );
        let block = Block::bordered()
            .title(format!(" Board size ({}-{}) ", self.min, self.max))
            .title_alignment(Alignment::Center)
            .padding(Padding::horizontal(1));
        let inner = block.inner(block_area);
        Clear.render(block_area, buf);
        block.render(block_area, buf);
        let mut rows = inner.rows();
        if let Some(row) = rows.next() {
            Line::from(format!("{}_", self.text)).render(row, buf);
        }
        if let Some(row) = rows.next() {
            Line::from_iter([
                Span::styled("Enter", consts::KEY_STYLE),
                Span::raw(" = OK, "),
                Span::styled("Esc", consts::KEY_STYLE),
                Span::raw(" = Cancel"),
            ])
            .render(row, buf);
        }
    }
}
