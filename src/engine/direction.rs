use super::grid::Cell;
use enum_map::Enum;

#[derive(Clone, Copy, Debug, Enum, Eq, Hash, PartialEq)]
pub(crate) enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Return the cell one step away from `pos` in this direction on a square
    /// toroidal grid of side `size`.  Both coordinates of the result are
    /// reduced modulo `size`, so the result is always in bounds.
    ///
    /// `size` must be nonzero.
    pub(crate) fn advance(self, pos: Cell, size: u16) -> Cell {
        let Cell { mut x, mut y } = Cell::new(pos.x % size, pos.y % size);
        match self {
            Direction::Up => y = decrement_wrapping(y, size),
            Direction::Down => y = increment_wrapping(y, size),
            Direction::Left => x = decrement_wrapping(x, size),
            Direction::Right => x = increment_wrapping(x, size),
        }
        Cell { x, y }
    }

    pub(crate) fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    #[cfg(test)]
    pub(crate) fn iter() -> impl Iterator<Item = Direction> {
        (0..Self::LENGTH).map(Self::from_usize)
    }
}

fn decrement_wrapping(x: u16, max: u16) -> u16 {
    x.checked_sub(1).unwrap_or(max - 1)
}

fn increment_wrapping(x: u16, max: u16) -> u16 {
    x.checked_add(1).filter(|&xx| xx < max).unwrap_or(0)
}
