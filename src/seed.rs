//! Random starting patterns.

use rand::Rng;

use crate::grid::Grid;

/// Number of base points scattered over the board.
pub const INITIAL_SEED: usize = 3;
/// Number of neighbor points generated around each base point.
pub const ADJACENT_TO_GENERATE: usize = 1;

/// A cell address: `x` is the column, `y` the row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Coordinate {
    pub x: usize,
    pub y: usize,
}

/// Generates a seed list for an empty `size`×`size` board.
///
/// Each base point is followed by its neighbor points. Duplicates are kept;
/// seeding a cell twice has no extra effect.
pub fn generate_seed<R: Rng + ?Sized>(size: usize, rng: &mut R) -> Vec<Coordinate> {
    let mut coordinates = Vec::with_capacity(INITIAL_SEED * (1 + ADJACENT_TO_GENERATE));

    for _ in 0..INITIAL_SEED {
        let x = rng.gen_range(0..size);
        let y = rng.gen_range(0..size);
        coordinates.push(Coordinate { x, y });
        coordinates.extend(generate_neighbours(size, x, y, rng));
    }

    coordinates
}

/// Offsets `(x, y)` by a random step in {-1, 0, 1} per axis.
///
/// An axis whose step would leave the board keeps its original value; the
/// other axis still moves.
fn generate_neighbours<R: Rng + ?Sized>(
    size: usize,
    x: usize,
    y: usize,
    rng: &mut R,
) -> Vec<Coordinate> {
    (0..ADJACENT_TO_GENERATE)
        .map(|_| {
            let dx = rng.gen_range(-1i64..2);
            let dy = rng.gen_range(-1i64..2);
            Coordinate {
                x: shift_within(x, dx, size),
                y: shift_within(y, dy, size),
            }
        })
        .collect()
}

fn shift_within(value: usize, delta: i64, size: usize) -> usize {
    let moved = value as i64 + delta;
    if (0..size as i64).contains(&moved) {
        moved as usize
    } else {
        value
    }
}

/// Marks every seed coordinate alive.
pub fn apply_seed(grid: &mut Grid, seeds: &[Coordinate]) {
    for seed in seeds {
        grid.set_alive(seed.x, seed.y);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::make_field;
    use rand::{rngs::StdRng, SeedableRng};
    use std::collections::HashSet;

    #[test]
    fn seed_on_small_board_stays_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let seeds = generate_seed(5, &mut rng);
            assert!((3..=6).contains(&seeds.len()));
            assert_eq!(seeds.len(), INITIAL_SEED * (1 + ADJACENT_TO_GENERATE));
            assert!(seeds.iter().all(|c| c.x < 5 && c.y < 5));

            let distinct: HashSet<_> = seeds.iter().collect();
            assert!((1..=6).contains(&distinct.len()));
        }
    }

    #[test]
    fn neighbours_are_adjacent_to_their_base() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..200 {
            let seeds = generate_seed(25, &mut rng);
            for pair in seeds.chunks(1 + ADJACENT_TO_GENERATE) {
                let base = pair[0];
                for neighbour in &pair[1..] {
                    assert!(base.x.abs_diff(neighbour.x) <= 1);
                    assert!(base.y.abs_diff(neighbour.y) <= 1);
                }
            }
        }
    }

    #[test]
    fn out_of_range_axis_keeps_original_value() {
        assert_eq!(shift_within(0, -1, 5), 0);
        assert_eq!(shift_within(4, 1, 5), 4);
        assert_eq!(shift_within(2, 1, 5), 3);
        assert_eq!(shift_within(2, -1, 5), 1);
    }

    #[test]
    fn single_cell_board_always_seeds_origin() {
        let mut rng = StdRng::seed_from_u64(3);
        let seeds = generate_seed(1, &mut rng);
        assert!(seeds.iter().all(|c| *c == Coordinate { x: 0, y: 0 }));
    }

    #[test]
    fn applying_seed_marks_cells_alive() {
        let mut grid = make_field(5);
        let seeds = [
            Coordinate { x: 1, y: 2 },
            Coordinate { x: 1, y: 2 },
            Coordinate { x: 4, y: 0 },
        ];
        apply_seed(&mut grid, &seeds);
        assert!(grid.is_alive(1, 2));
        assert!(grid.is_alive(4, 0));
        assert_eq!(grid.population(), 2);
    }
}
