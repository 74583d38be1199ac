use crate::geometry::Geometry;
use ratatui::layout::Position;

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub(crate) enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Return the origin of the cell one step from `pos` in this direction.
    /// Stepping off an edge of the board wraps around to the opposite edge.
    pub(crate) fn advance(self, pos: Position, geometry: Geometry) -> Position {
        let Position { mut x, mut y } = pos;
        let step = geometry.step();
        let extent = geometry.extent();
        match self {
            Direction::Up => y = decrement_wrapping(y, step, extent),
            Direction::Down => y = increment_wrapping(y, step, extent),
            Direction::Left => x = decrement_wrapping(x, step, extent),
            Direction::Right => x = increment_wrapping(x, step, extent),
        }
        Position { x, y }
    }

    pub(crate) fn reverse(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

fn decrement_wrapping(v: u16, step: u16, extent: u16) -> u16 {
    v.checked_sub(step).unwrap_or_else(|| extent - step)
}

fn increment_wrapping(v: u16, step: u16, extent: u16) -> u16 {
    v.checked_add(step).filter(|&v2| v2 < extent).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn geometry() -> Geometry {
        Geometry::new(10, 30, 1).unwrap()
    }

    #[rstest]
    #[case(Direction::Up, Position::new(62, 217), Position::new(62, 186))]
    #[case(Direction::Down, Position::new(62, 217), Position::new(62, 248))]
    #[case(Direction::Left, Position::new(62, 217), Position::new(31, 217))]
    #[case(Direction::Right, Position::new(62, 217), Position::new(93, 217))]
    #[case(Direction::Up, Position::new(62, 0), Position::new(62, 279))]
    #[case(Direction::Down, Position::new(62, 279), Position::new(62, 0))]
    #[case(Direction::Left, Position::new(0, 217), Position::new(279, 217))]
    #[case(Direction::Right, Position::new(279, 217), Position::new(0, 217))]
    fn test_direction_advance(#[case] d: Direction, #[case] pos: Position, #[case] r: Position) {
        assert_eq!(d.advance(pos, geometry()), r);
    }

    #[rstest]
    #[case(Direction::Up)]
    #[case(Direction::Down)]
    #[case(Direction::Left)]
    #[case(Direction::Right)]
    fn single_step_changes_one_coordinate(#[case] d: Direction) {
        let g = geometry();
        for pos in g.positions() {
            let next = d.advance(pos, g);
            assert!(g.contains(next));
            let dx = pos.x.abs_diff(next.x);
            let dy = pos.y.abs_diff(next.y);
            let wrapped = g.extent() - g.step();
            match d {
                Direction::Up | Direction::Down => {
                    assert_eq!(dx, 0);
                    assert!(dy == g.step() || dy == wrapped);
                }
                Direction::Left | Direction::Right => {
                    assert_eq!(dy, 0);
                    assert!(dx == g.step() || dx == wrapped);
                }
            }
        }
    }

    #[test]
    fn reverse_is_involution() {
        for d in [
            Direction::Up,
            Direction::Down,
            Direction::Left,
            Direction::Right,
        ] {
            assert_ne!(d.reverse(), d);
            assert_eq!(d.reverse().reverse(), d);
        }
    }
}
