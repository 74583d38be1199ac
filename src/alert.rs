use crate::command::Command;
use crate::util::center_rect;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Flex, Layout, Rect, Size},
    text::{Line, Text},
    widgets::{
        block::{Block, Padding},
        Clear, Widget,
    },
};
use std::borrow::Cow;

/// A pop-up reporting a problem to the player.  While an alert is shown, the
/// game does not advance.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Alert {
    lines: Vec<String>,
}

impl Alert {
    const MAX_LINES: usize = 12;
    const TEXT_WIDTH: u16 = 40;
    const WIDTH: u16 = Self::TEXT_WIDTH + 4;

    pub(crate) fn handle_command(&self, cmd: Command) -> Option<AlertOutcome> {
        match cmd {
            Command::Enter | Command::Esc => Some(AlertOutcome::Dismissed),
            Command::Quit => Some(AlertOutcome::Quit),
            _ => None,
        }
    }

    /// Build an alert from an error message followed by the messages of its
    /// causes.  Causes are listed below the message, one bullet each.
    fn from_error_messages(msgs: Vec<String>) -> Alert {
        let mut msgs = msgs.into_iter();
        let mut lines = Vec::new();
        let width = usize::from(Alert::TEXT_WIDTH);
        if let Some(first) = msgs.next() {
            let opts = textwrap::Options::new(width).break_words(true);
            lines.extend(textwrap::wrap(&first, opts).into_iter().map(Cow::into_owned));
        }
        let mut causes = msgs.peekable();
        if causes.peek().is_some() {
            lines.push(String::new());
            for m in causes {
                let opts = textwrap::Options::new(width)
                    .break_words(true)
                    .initial_indent("- ")
                    .subsequent_indent("  ");
                lines.extend(textwrap::wrap(&m, opts).into_iter().map(Cow::into_owned));
            }
        }
        if lines.len() > Alert::MAX_LINES {
            lines.truncate(Alert::MAX_LINES - 1);
            lines.push(String::from("…"));
        }
        Alert { lines }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum AlertOutcome {
    Dismissed,
    Quit,
}

impl<E: std::error::Error> From<E> for Alert {
    fn from(e: E) -> Alert {
        Alert::from_error_messages(error_chain(&e))
    }
}

/// Return the message of `e` followed by the messages of each of its sources
/// in turn
pub(crate) fn error_chain(e: &dyn std::error::Error) -> Vec<String> {
    let mut msgs = vec![e.to_string()];
    let mut source = e.source();
    while let Some(src) = source {
        msgs.push(src.to_string());
        source = src.source();
    }
    msgs
}

impl Widget for &Alert {
    // `area` is the area of the entire display, not just that of the pop-up.
    fn render(self, area: Rect, buf: &mut Buffer) {
        let height = u16::try_from(self.lines.len())
            .unwrap_or(u16::MAX)
            .saturating_add(4);
        let block_area = center_rect(
            area,
            Size {
                width: Alert::WIDTH,
                height,
            },
        );
        let block = Block::bordered()
            .title(" ALERT ")
            .title_alignment(Alignment::Center)
            .padding(Padding::horizontal(1));
        let [text_area, ok_area] = Layout::vertical([Constraint::Fill(1), Constraint::Length(1)])
            .flex(Flex::Start)
            .spacing(1)
            .areas(block.inner(block_area));
        Clear.render(block_area, buf);
        block.render(block_area, buf);
        Text::from_iter(self.lines.iter().map(String::as_str)).render(text_area, buf);
        Line::from("[OK]").centered().render(ok_area, buf);
    }
}
