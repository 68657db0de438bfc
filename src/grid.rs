//! Square Game of Life board and the generation-advance rule.
//!
//! Every transform here is functional: [`advance`] reads one [`Grid`] and
//! builds the next one from a fresh field, so the board a renderer holds is
//! never edited while the following generation is computed.

/// An N×N board where `true` marks a live cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    size: usize,
    cells: Vec<Vec<bool>>,
}

impl Grid {
    /// Side length of the board.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns whether the cell at column `x`, row `y` is alive.
    ///
    /// # Panics
    ///
    /// Panics if either coordinate is outside `0..size`.
    pub fn is_alive(&self, x: usize, y: usize) -> bool {
        self.cells[y][x]
    }

    /// Marks the cell at column `x`, row `y` as alive.
    ///
    /// # Panics
    ///
    /// Panics if either coordinate is outside `0..size`.
    pub fn set_alive(&mut self, x: usize, y: usize) {
        self.cells[y][x] = true;
    }

    /// Rows of the board, top to bottom.
    pub fn rows(&self) -> &[Vec<bool>] {
        &self.cells
    }

    /// Counts the total number of living cells.
    pub fn population(&self) -> u64 {
        self.cells
            .iter()
            .flat_map(|row| row.iter())
            .filter(|&&cell| cell)
            .count() as u64
    }
}

/// Creates a `size`×`size` board with every cell dead.
///
/// `size` must be at least 1; the controller never passes anything else.
pub fn make_field(size: usize) -> Grid {
    Grid {
        size,
        cells: vec![vec![false; size]; size],
    }
}

/// In-bounds Moore neighborhood of `(x, y)` on a `size`×`size` board.
///
/// Positions that would fall off an edge are skipped rather than wrapped, so a
/// corner yields 3 positions, an edge cell 5 and an interior cell 8.
pub fn neighbor_positions(
    size: usize,
    x: usize,
    y: usize,
) -> impl Iterator<Item = (usize, usize)> {
    (-1i64..=1)
        .flat_map(|dy| (-1i64..=1).map(move |dx| (dx, dy)))
        .filter(|&(dx, dy)| dx != 0 || dy != 0)
        .filter_map(move |(dx, dy)| {
            let nx = x as i64 + dx;
            let ny = y as i64 + dy;
            let bound = size as i64;
            if (0..bound).contains(&nx) && (0..bound).contains(&ny) {
                Some((nx as usize, ny as usize))
            } else {
                None
            }
        })
}

/// Counts live neighbors of the cell at column `x`, row `y`.
pub fn count_live_neighbors(grid: &Grid, x: usize, y: usize) -> u8 {
    neighbor_positions(grid.size, x, y)
        .filter(|&(nx, ny)| grid.cells[ny][nx])
        .count() as u8
}

/// Computes the next generation of `grid`.
///
/// Returns the new board and the number of cells born during the step. The
/// rule differs from canonical Life: any cell with 2 or 3 live neighbors ends
/// up alive, including a dead cell with exactly 2. Only a dead cell with
/// exactly 3 neighbors counts as a birth.
pub fn advance(grid: &Grid) -> (Grid, u64) {
    let mut next = make_field(grid.size);
    let mut born = 0;

    for y in 0..grid.size {
        for x in 0..grid.size {
            let live_neighbors = count_live_neighbors(grid, x, y);
            let cell = grid.cells[y][x];
            next.cells[y][x] = match (cell, live_neighbors) {
                (false, 3) => {
                    born += 1;
                    true
                }
                (_, n) if n < 2 => false,
                (_, 2) | (_, 3) => true,
                _ => false,
            };
        }
    }

    (next, born)
}
