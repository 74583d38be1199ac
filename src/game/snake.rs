use super::direction::Direction;
use crate::geometry::Geometry;
use ratatui::layout::Position;
use std::collections::VecDeque;

/// The snake.
///
/// All positions are the pixel origins of cells on the board the snake is on.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Snake {
    /// The position of the snake's head
    pub(super) head: Position,

    /// The positions of the rest of the snake's body, starting with the
    /// segment right behind the head and ending with the tip of the tail
    pub(super) tail: VecDeque<Position>,

    /// The direction in which the snake moved on its last step
    pub(super) direction: Direction,

    /// The direction in which the snake will move on its next step, if it
    /// differs from `direction`
    pub(super) pending: Option<Direction>,
}

impl Snake {
    /// Create a new one-cell snake at `head` facing in `direction`
    pub(crate) fn new(head: Position, direction: Direction) -> Snake {
        Snake {
            head,
            tail: VecDeque::new(),
            direction,
            pending: None,
        }
    }

    /// Return the position of the snake's head
    pub(crate) fn head(&self) -> Position {
        self.head
    }

    /// Iterate over the positions of all of the snake's cells, head first
    pub(crate) fn body(&self) -> impl Iterator<Item = Position> + '_ {
        std::iter::once(self.head).chain(self.tail.iter().copied())
    }

    /// Return the number of cells in the snake
    pub(crate) fn len(&self) -> usize {
        self.tail.len() + 1
    }

    /// Return the direction in which the snake will move on its next step
    pub(crate) fn direction(&self) -> Direction {
        self.pending.unwrap_or(self.direction)
    }

    /// Test whether any part of the snake is at `pos`
    pub(crate) fn occupies(&self, pos: Position) -> bool {
        self.head == pos || self.tail.contains(&pos)
    }

    /// Request that the snake turn to face `direction` on its next step.
    ///
    /// Requests to turn back the way the snake last moved are ignored, as
    /// they would run the head straight into the neck.  Otherwise, the latest
    /// request before a step replaces any earlier ones.  Returns `false` if
    /// the request was ignored.
    pub(crate) fn turn(&mut self, direction: Direction) -> bool {
        if direction == self.direction.reverse() {
            false
        } else {
            self.pending = Some(direction);
            true
        }
    }

    /// Move the snake forwards one cell, wrapping around the edges of the
    /// board described by `geometry`.  The snake's length does not change.
    pub(crate) fn advance(&mut self, geometry: Geometry) {
        if let Some(d) = self.pending.take() {
            self.direction = d;
        }
        let pos = self.direction.advance(self.head, geometry);
        self.tail.push_front(self.head);
        self.head = pos;
        let _ = self.tail.pop_back();
    }

    /// Add a cell to the end of the snake's tail, one step behind the current
    /// tip as seen from the snake's direction of travel
    pub(crate) fn grow(&mut self, geometry: Geometry) {
        let tip = self.tail.back().copied().unwrap_or(self.head);
        self.tail
            .push_back(self.direction.reverse().advance(tip, geometry));
    }

    /// Test whether the snake's head is on the food at `food`
    pub(crate) fn collides_food(&self, food: Position) -> bool {
        self.head == food
    }

    /// Test whether the snake's head has run into the rest of its body
    pub(crate) fn collides_self(&self) -> bool {
        self.tail.contains(&self.head)
    }

    /// Shrink the snake back to a single cell at `head` facing in `direction`
    pub(crate) fn reset(&mut self, head: Position, direction: Direction) {
        *self = Snake::new(head, direction);
    }
}
