use super::direction::Direction;
use super::grid::Cell;
use crate::consts;
use std::collections::{HashSet, VecDeque};

/// The snake
///
/// A snake always has a head; `body` holds the remaining segments in order
/// from the neck to the tip of the tail.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Snake {
    head: Cell,
    body: VecDeque<Cell>,
}

impl Snake {
    pub(crate) fn new<I: IntoIterator<Item = Cell>>(head: Cell, body: I) -> Snake {
        Snake {
            head,
            body: body.into_iter().collect(),
        }
    }

    /// Create the starting snake for a grid of side `size`: a horizontal line
    /// of [`INITIAL_SNAKE_LENGTH`][consts::INITIAL_SNAKE_LENGTH] cells with
    /// its head at `(size / 4, size / 2)`, facing right.
    ///
    /// `size` must be at least [`MIN_GRID_SIZE`][consts::MIN_GRID_SIZE].
    pub(crate) fn initial(size: u16) -> Snake {
        let head = Cell::new(size / 4, size / 2);
        let back = Direction::Right.opposite();
        let body = std::iter::successors(Some(head), |&c| Some(back.advance(c, size)))
            .skip(1)
            .take(consts::INITIAL_SNAKE_LENGTH - 1);
        Snake::new(head, body)
    }

    pub(crate) fn head(&self) -> Cell {
        self.head
    }

    /// Return the last segment of the snake (the head, for a one-cell snake)
    pub(crate) fn tail(&self) -> Cell {
        self.body.back().copied().unwrap_or(self.head)
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.body.len() + 1
    }

    /// Iterate over all segments, head first
    pub(crate) fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        std::iter::once(self.head).chain(self.body.iter().copied())
    }

    pub(crate) fn body(&self) -> &VecDeque<Cell> {
        &self.body
    }

    pub(crate) fn occupied(&self) -> HashSet<Cell> {
        self.cells().collect()
    }

    /// Return the snake that results from moving the head to `head` without
    /// growing: every segment shifts one place and the tail cell is dropped.
    pub(crate) fn moved_to(&self, head: Cell) -> Snake {
        let mut body = self.body.clone();
        body.push_front(self.head);
        let _ = body.pop_back();
        Snake { head, body }
    }

    /// Lengthen the snake by one segment placed at `cell`, behind the current
    /// tail
    pub(crate) fn grow_into(&mut self, cell: Cell) {
        self.body.push_back(cell);
    }

    /// Returns `true` if the head occupies the same cell as any other segment
    pub(crate) fn has_self_collision(&self) -> bool {
        self.body.contains(&self.head)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn cells(snake: &Snake) -> Vec<(u16, u16)> {
        snake.cells().map(|c| (c.x, c.y)).collect()
    }

    #[test]
    fn initial_default_grid() {
        let snake = Snake::initial(20);
        assert_eq!(cells(&snake), vec![(5, 10), (4, 10), (3, 10)]);
        assert_eq!(snake.len(), 3);
        assert_eq!(snake.tail(), Cell::new(3, 10));
        assert!(!snake.has_self_collision());
    }

    #[test]
    fn initial_smallest_grid() {
        let snake = Snake::initial(consts::MIN_GRID_SIZE);
        assert_eq!(cells(&snake), vec![(2, 4), (1, 4), (0, 4)]);
    }

    #[test]
    fn move_without_growth() {
        let snake = Snake::initial(20);
        let moved = snake.moved_to(Cell::new(6, 10));
        assert_eq!(cells(&moved), vec![(6, 10), (5, 10), (4, 10)]);
        assert_eq!(cells(&snake), vec![(5, 10), (4, 10), (3, 10)]);
    }

    #[test]
    fn move_and_grow() {
        let snake = Snake::initial(20);
        let mut moved = snake.moved_to(Cell::new(6, 10));
        moved.grow_into(snake.tail());
        assert_eq!(cells(&moved), vec![(6, 10), (5, 10), (4, 10), (3, 10)]);
    }

    #[test]
    fn move_one_cell_snake() {
        let snake = Snake::new(Cell::new(1, 1), []);
        let moved = snake.moved_to(Cell::new(1, 2));
        assert_eq!(cells(&moved), vec![(1, 2)]);
        assert_eq!(moved.tail(), Cell::new(1, 2));
    }

    #[test]
    fn self_collision() {
        let snake = Snake::new(Cell::new(5, 10), [Cell::new(6, 10), Cell::new(5, 10)]);
        assert!(snake.has_self_collision());
    }

    #[test]
    fn head_into_vacated_tail_is_not_collision() {
        // A 2x2 loop: the head moves into the cell the tail is leaving
        let snake = Snake::new(
            Cell::new(5, 5),
            [Cell::new(5, 6), Cell::new(6, 6), Cell::new(6, 5)],
        );
        let moved = snake.moved_to(Cell::new(6, 5));
        assert!(!moved.has_self_collision());
    }
}
