use crate::consts;
use rand::{seq::IteratorRandom, Rng};
use serde::Deserialize;
use std::collections::HashSet;
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;
use thiserror::Error;

/// A cell of the game grid.  `(0, 0)` is the top-left corner.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub(crate) struct Cell {
    pub(crate) x: u16,
    pub(crate) y: u16,
}

impl Cell {
    pub(crate) const fn new(x: u16, y: u16) -> Cell {
        Cell { x, y }
    }
}

/// Side length of a square game grid, between
/// [`MIN_GRID_SIZE`][consts::MIN_GRID_SIZE] and
/// [`MAX_GRID_SIZE`][consts::MAX_GRID_SIZE] inclusive
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq)]
#[serde(try_from = "u16")]
pub(crate) struct GridSize(u16);

impl GridSize {
    pub(crate) fn new(size: u16) -> Option<GridSize> {
        (consts::MIN_GRID_SIZE..=consts::MAX_GRID_SIZE)
            .contains(&size)
            .then_some(GridSize(size))
    }

    pub(crate) fn get(self) -> u16 {
        self.0
    }
}

impl Default for GridSize {
    fn default() -> GridSize {
        GridSize(consts::DEFAULT_GRID_SIZE)
    }
}

impl fmt::Display for GridSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u16> for GridSize {
    type Error = GridSizeError;

    fn try_from(size: u16) -> Result<GridSize, GridSizeError> {
        GridSize::new(size).ok_or(GridSizeError::OutOfRange(size))
    }
}

impl FromStr for GridSize {
    type Err = GridSizeError;

    fn from_str(s: &str) -> Result<GridSize, GridSizeError> {
        s.trim().parse::<u16>()?.try_into()
    }
}

#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub(crate) enum GridSizeError {
    #[error(
        "grid size must be between {min} and {max}, got {0}",
        min = consts::MIN_GRID_SIZE,
        max = consts::MAX_GRID_SIZE
    )]
    OutOfRange(u16),
    #[error("grid size must be an integer")]
    Parse(#[from] ParseIntError),
}

/// Iterate over every cell of a square grid of side `size`, row by row
pub(crate) fn cells(size: u16) -> impl Iterator<Item = Cell> {
    (0..size).flat_map(move |y| (0..size).map(move |x| Cell { x, y }))
}

/// Pick a cell uniformly at random from the cells of a `size`×`size` grid that
/// are not in `occupied`.
///
/// Coordinates are drawn by rejection sampling.  After
/// [`MAX_FOOD_ATTEMPTS`][consts::MAX_FOOD_ATTEMPTS] misses, the free cells are
/// enumerated and one is chosen directly.
///
/// # Errors
///
/// Returns [`FoodError::GridFull`] if every cell is occupied.
pub(crate) fn random_food<R: Rng>(
    rng: &mut R,
    occupied: &HashSet<Cell>,
    size: u16,
) -> Result<Cell, FoodError> {
    if size == 0 {
        return Err(FoodError::GridFull { size });
    }
    for _ in 0..consts::MAX_FOOD_ATTEMPTS {
        let cell = Cell::new(rng.random_range(0..size), rng.random_range(0..size));
        if !occupied.contains(&cell) {
            return Ok(cell);
        }
    }
    cells(size)
        .filter(|c| !occupied.contains(c))
        .choose(rng)
        .ok_or(FoodError::GridFull { size })
}

#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub(crate) enum FoodError {
    #[error("no free cell left for food on {size}x{size} grid")]
    GridFull { size: u16 },
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha12Rng;
    use rstest::rstest;

    const RNG_SEED: u64 = 0x0123456789ABCDEF;

    #[rstest]
    #[case("20", Ok(GridSize(20)))]
    #[case(" 8\n", Ok(GridSize(8)))]
    #[case("64", Ok(GridSize(64)))]
    #[case("7", Err(GridSizeError::OutOfRange(7)))]
    #[case("65", Err(GridSizeError::OutOfRange(65)))]
    fn parse_grid_size(#[case] s: &str, #[case] r: Result<GridSize, GridSizeError>) {
        assert_eq!(s.parse::<GridSize>(), r);
    }

    #[test]
    fn parse_bad_grid_size() {
        let r = "twenty".parse::<GridSize>();
        assert!(matches!(r, Err(GridSizeError::Parse(_))));
    }

    #[test]
    fn cells_covers_grid() {
        let all = cells(3).collect::<Vec<_>>();
        assert_eq!(all.len(), 9);
        assert_eq!(all[0], Cell::new(0, 0));
        assert_eq!(all[1], Cell::new(1, 0));
        assert_eq!(all[8], Cell::new(2, 2));
    }

    #[test]
    fn food_avoids_occupied_cells() {
        let mut rng = ChaCha12Rng::seed_from_u64(RNG_SEED);
        // Occupy the whole left half of the grid
        let occupied = cells(20).filter(|c| c.x < 10).collect::<HashSet<_>>();
        for _ in 0..1000 {
            let food = random_food(&mut rng, &occupied, 20).unwrap();
            assert!(food.x < 20 && food.y < 20, "{food:?} out of bounds");
            assert!(!occupied.contains(&food), "{food:?} is occupied");
        }
    }

    #[test]
    fn food_finds_last_free_cell() {
        let mut rng = ChaCha12Rng::seed_from_u64(RNG_SEED);
        let free = Cell::new(6, 2);
        let occupied = cells(8).filter(|&c| c != free).collect::<HashSet<_>>();
        assert_eq!(random_food(&mut rng, &occupied, 8), Ok(free));
    }

    #[test]
    fn food_on_full_grid() {
        let mut rng = ChaCha12Rng::seed_from_u64(RNG_SEED);
        let occupied = cells(4).collect::<HashSet<_>>();
        assert_eq!(
            random_food(&mut rng, &occupied, 4),
            Err(FoodError::GridFull { size: 4 })
        );
    }

    #[test]
    fn food_on_empty_grid() {
        let mut rng = ChaCha12Rng::seed_from_u64(RNG_SEED);
        assert_eq!(
            random_food(&mut rng, &HashSet::new(), 0),
            Err(FoodError::GridFull { size: 0 })
        );
    }
}
