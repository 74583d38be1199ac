//! Mapping between board cells and the pixel space in which the board is laid
//! out
use crate::consts;
use ratatui::layout::{Position, Size};
use thiserror::Error;

/// An axis-aligned rectangle in board pixel space.
///
/// This is used instead of `ratatui::layout::Rect` because the latter clamps
/// its area to `u16::MAX`, which a board of moderate size easily exceeds.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub(crate) struct PixelRect {
    pub(crate) x: u16,
    pub(crate) y: u16,
    pub(crate) width: u16,
    pub(crate) height: u16,
}

impl PixelRect {
    pub(crate) const fn new(x: u16, y: u16, width: u16, height: u16) -> PixelRect {
        PixelRect {
            x,
            y,
            width,
            height,
        }
    }

    pub(crate) fn is_empty(self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Return the x-coordinate of the rectangle's last column of pixels
    pub(crate) fn last_x(self) -> u16 {
        self.x.saturating_add(self.width.saturating_sub(1))
    }

    /// Return the y-coordinate of the rectangle's last row of pixels
    pub(crate) fn last_y(self) -> u16 {
        self.y.saturating_add(self.height.saturating_sub(1))
    }
}

/// The dimensions of a square board of square cells.
///
/// Cell `(col, row)` occupies the `cell_size × cell_size` square whose
/// top-left corner is at `(col × step, row × step)`, where `step` is
/// `cell_size + border_width`; the remaining `border_width` pixels on the
/// right & bottom of each cell form the visible grid lines.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Geometry {
    cells: u16,
    cell_size: u16,
    border_width: u16,
}

impl Geometry {
    pub(crate) fn new(
        cells: u16,
        cell_size: u16,
        border_width: u16,
    ) -> Result<Geometry, GeometryError> {
        if cells == 0 {
            return Err(GeometryError::NoCells);
        }
        if cell_size == 0 {
            return Err(GeometryError::ZeroCellSize);
        }
        let step = cell_size
            .checked_add(border_width)
            .ok_or(GeometryError::TooLarge { cells })?;
        if cells.checked_mul(step).is_none() {
            return Err(GeometryError::TooLarge { cells });
        }
        Ok(Geometry {
            cells,
            cell_size,
            border_width,
        })
    }

    /// Return a copy of this geometry with a different number of cells per
    /// side
    pub(crate) fn with_cells(self, cells: u16) -> Result<Geometry, GeometryError> {
        Geometry::new(cells, self.cell_size, self.border_width)
    }

    pub(crate) fn cells(self) -> u16 {
        self.cells
    }

    pub(crate) fn cell_size(self) -> u16 {
        self.cell_size
    }

    pub(crate) fn border_width(self) -> u16 {
        self.border_width
    }

    /// Distance in pixels between the origins of adjacent cells
    pub(crate) fn step(self) -> u16 {
        // Cannot overflow; checked in `new()`
        self.cell_size + self.border_width
    }

    /// Length in pixels of each side of the canvas
    pub(crate) fn extent(self) -> u16 {
        self.cells * self.step()
    }

    pub(crate) fn canvas_size(self) -> Size {
        Size {
            width: self.extent(),
            height: self.extent(),
        }
    }

    pub(crate) fn canvas_rect(self) -> PixelRect {
        PixelRect::new(0, 0, self.extent(), self.extent())
    }

    /// Return the pixel position of the top-left corner of the cell in column
    /// `col` and row `row`.  Indices beyond the board are reduced modulo the
    /// number of cells.
    pub(crate) fn cell_origin(self, col: u16, row: u16) -> Position {
        Position {
            x: (col % self.cells) * self.step(),
            y: (row % self.cells) * self.step(),
        }
    }

    /// Return the `(column, row)` of the cell containing `pos`
    pub(crate) fn cell_index(self, pos: Position) -> (u16, u16) {
        (pos.x / self.step(), pos.y / self.step())
    }

    /// Return the filled area of the cell whose origin is `pos`
    pub(crate) fn cell_rect(self, pos: Position) -> PixelRect {
        PixelRect::new(pos.x, pos.y, self.cell_size, self.cell_size)
    }

    /// Test whether `pos` is the origin of a cell on this board
    pub(crate) fn contains(self, pos: Position) -> bool {
        let step = self.step();
        pos.x < self.extent() && pos.y < self.extent() && pos.x % step == 0 && pos.y % step == 0
    }

    /// Iterate over the origins of all cells on the board in row-major order
    pub(crate) fn positions(self) -> impl Iterator<Item = Position> {
        (0..self.cells)
            .flat_map(move |row| (0..self.cells).map(move |col| self.cell_origin(col, row)))
    }
}

impl Default for Geometry {
    fn default() -> Geometry {
        Geometry {
            cells: consts::DEFAULT_CELLS,
            cell_size: consts::CELL_SIZE,
            border_width: consts::BORDER_WIDTH,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub(crate) enum GeometryError {
    #[error("board must have at least one cell per side")]
    NoCells,
    #[error("cell size must be nonzero")]
    ZeroCellSize,
    #[error("board of {cells} cells per side does not fit in pixel space")]
    TooLarge { cells: u16 },
}
