use super::snake::Snake;
use crate::consts;
use crate::geometry::Geometry;
use rand::{seq::IteratorRandom, Rng};
use ratatui::layout::Position;
use thiserror::Error;

/// The single piece of food on the board
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Food {
    position: Position,
}

impl Food {
    pub(crate) fn new(position: Position) -> Food {
        Food { position }
    }

    pub(crate) fn position(self) -> Position {
        self.position
    }

    /// Move the food to a uniformly random cell not occupied by `snake`.
    ///
    /// A bounded number of random cells are tried first; if all of them are
    /// occupied, one of the free cells is chosen directly instead.  If the
    /// snake covers the entire board, the food is left where it is and
    /// `BoardFull` is returned.
    pub(crate) fn spawn<R: Rng>(
        &mut self,
        rng: &mut R,
        geometry: Geometry,
        snake: &Snake,
    ) -> Result<(), BoardFull> {
        let cells = geometry.cells();
        for _ in 0..consts::MAX_SPAWN_ATTEMPTS {
            let pos = geometry.cell_origin(rng.random_range(0..cells), rng.random_range(0..cells));
            if !snake.occupies(pos) {
                self.position = pos;
                return Ok(());
            }
        }
        log::debug!("Random food placement exhausted; choosing among free cells");
        self.position = geometry
            .positions()
            .filter(|&p| !snake.occupies(p))
            .choose(rng)
            .ok_or(BoardFull)?;
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
#[error("no free cells left on the board")]
pub(crate) struct BoardFull;
