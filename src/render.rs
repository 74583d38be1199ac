//! Drawing the board, snake, & food onto a pixel-addressed surface
use crate::consts;
use crate::game::{Direction, Food, Snake};
use crate::geometry::{Geometry, PixelRect};
use ratatui::{
    buffer::{Buffer, Cell},
    layout::{Position, Rect, Size},
    style::Color,
};

/// Images that can be drawn on a [`Surface`]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Sprite {
    Fruit,
}

/// A drawing target addressed in board pixel coordinates
pub(crate) trait Surface {
    /// Erase everything within `rect`
    fn clear(&mut self, rect: PixelRect);

    /// Fill `rect` with a solid color
    fn fill_rect(&mut self, rect: PixelRect, color: Color);

    /// Draw an image scaled to fit `rect`
    fn draw_sprite(&mut self, rect: PixelRect, sprite: Sprite);
}

/// Clear the canvas and then draw every cell of the board in `background`
pub(crate) fn draw_board<S: Surface + ?Sized>(
    surface: &mut S,
    geometry: Geometry,
    background: Color,
) {
    surface.clear(geometry.canvas_rect());
    for pos in geometry.positions() {
        surface.fill_rect(geometry.cell_rect(pos), background);
    }
}

/// Draw the snake's cells, plus a pair of eyes on its head looking in the
/// direction it's heading
pub(crate) fn draw_snake<S: Surface + ?Sized>(surface: &mut S, geometry: Geometry, snake: &Snake) {
    for pos in snake.body() {
        surface.fill_rect(geometry.cell_rect(pos), consts::SNAKE_COLOR);
    }
    for eye in eye_rects(geometry, snake.head(), snake.direction()) {
        surface.fill_rect(eye, consts::EYE_COLOR);
    }
}

pub(crate) fn draw_food<S: Surface + ?Sized>(surface: &mut S, geometry: Geometry, food: Food) {
    surface.draw_sprite(geometry.cell_rect(food.position()), Sprite::Fruit);
}

/// Compute the areas of the eye marks for a head in the cell at `head`
fn eye_rects(geometry: Geometry, head: Position, direction: Direction) -> [PixelRect; 2] {
    let size = geometry.cell_size();
    let eye = (size / 5).max(1);
    let near = eye.min(size - eye);
    let far = size.saturating_sub(eye * 2);
    let place = |dx: u16, dy: u16| PixelRect::new(head.x + dx, head.y + dy, eye, eye);
    match direction {
        Direction::Up => [place(near, near), place(far, near)],
        Direction::Down => [place(near, far), place(far, far)],
        Direction::Left => [place(near, near), place(near, far)],
        Direction::Right => [place(far, near), place(far, far)],
    }
}

/// A [`Surface`] that paints into a region of a terminal buffer.
///
/// Each board cell is shown as [`consts::COLUMNS_PER_CELL`] terminal columns
/// by one terminal row.  Fills that cover a whole cell set the background
/// color of the terminal cells; smaller fills (such as the snake's eyes) are
/// drawn as a mark on the half of the cell in which they lie.
#[derive(Debug)]
pub(crate) struct TermSurface<'a> {
    area: Rect,
    buf: &'a mut Buffer,
    geometry: Geometry,
}

impl<'a> TermSurface<'a> {
    pub(crate) fn new(area: Rect, buf: &'a mut Buffer, geometry: Geometry) -> TermSurface<'a> {
        TermSurface {
            area,
            buf,
            geometry,
        }
    }

    /// The size of the terminal region needed to show a board of the given
    /// geometry
    pub(crate) fn display_size(geometry: Geometry) -> Size {
        Size {
            width: geometry.cells().saturating_mul(consts::COLUMNS_PER_CELL),
            height: geometry.cells(),
        }
    }

    /// Return the terminal column & row (relative to `area`) showing the
    /// pixel at `(x, y)`
    fn locate(&self, x: u16, y: u16) -> (u16, u16) {
        let step = self.geometry.step();
        let (col, row) = self.geometry.cell_index(Position::new(x, y));
        let right_half = u32::from(x % step) * 2 >= u32::from(step);
        let column = col
            .saturating_mul(consts::COLUMNS_PER_CELL)
            .saturating_add(u16::from(right_half));
        (column, row)
    }

    /// Return the buffer cell at the given column & row relative to `area`,
    /// if it's inside `area`
    fn cell_mut(&mut self, column: u16, row: u16) -> Option<&mut Cell> {
        if column >= self.area.width || row >= self.area.height {
            return None;
        }
        let x = self.area.x.checked_add(column)?;
        let y = self.area.y.checked_add(row)?;
        self.buf.cell_mut((x, y))
    }

    /// Apply `f` to every terminal cell showing part of `rect`
    fn for_each_cell<F: FnMut(&mut Cell)>(&mut self, rect: PixelRect, mut f: F) {
        if rect.is_empty() || self.area.is_empty() {
            return;
        }
        let (left, top) = self.locate(rect.x, rect.y);
        let (right, bottom) = self.locate(rect.last_x(), rect.last_y());
        let right = right.min(self.area.width - 1);
        let bottom = bottom.min(self.area.height - 1);
        for row in top..=bottom {
            for column in left..=right {
                if let Some(cell) = self.cell_mut(column, row) {
                    f(cell);
                }
            }
        }
    }
}

impl Surface for TermSurface<'_> {
    fn clear(&mut self, rect: PixelRect) {
        self.for_each_cell(rect, |cell| {
            cell.reset();
        });
    }

    fn fill_rect(&mut self, rect: PixelRect, color: Color) {
        let size = self.geometry.cell_size();
        if rect.width >= size && rect.height >= size {
            self.for_each_cell(rect, |cell| {
                cell.set_char(' ').set_bg(color);
            });
        } else {
            self.for_each_cell(rect, |cell| {
                cell.set_char(consts::EYE_SYMBOL).set_fg(color);
            });
        }
    }

    fn draw_sprite(&mut self, rect: PixelRect, sprite: Sprite) {
        if rect.is_empty() {
            return;
        }
        let glyph = match sprite {
            Sprite::Fruit => consts::FRUIT_SYMBOL,
        };
        let (column, row) = self.locate(rect.x, rect.y);
        if let Some(cell) = self.cell_mut(column, row) {
            cell.set_char(glyph).set_style(consts::FRUIT_STYLE);
        }
    }
}
