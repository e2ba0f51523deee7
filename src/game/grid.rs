//! Grid representation and the pure move primitives.
//!
//! Every directional move is reduced to [`move_row_left`]: the grid is
//! transposed for vertical moves and mirrored for moves towards the
//! right/bottom edge, each row is moved left, and the same transforms are
//! undone in reverse order.

use super::action::Direction;

/// Largest tile a grid can hold. Two of these never merge, so a merge cannot
/// overflow `u32`.
pub const MAX_TILE: u32 = 1 << 31;

/// Whether `value` may sit in a cell: empty, or a power of two in `2..=MAX_TILE`
pub fn is_valid_tile(value: u32) -> bool {
    value == 0 || (value >= 2 && value.is_power_of_two())
}

/// A rectangular grid of tiles, stored row-major. `0` is an empty cell.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    rows: Vec<Vec<u32>>,
}

impl Grid {
    /// Create an all-empty grid
    pub fn empty(height: usize, width: usize) -> Self {
        Self {
            rows: vec![vec![0; width]; height],
        }
    }

    /// Build a grid from explicit rows. Returns `None` if there are no rows,
    /// no columns, or the rows differ in length.
    pub fn from_rows(rows: Vec<Vec<u32>>) -> Option<Self> {
        let width = rows.first()?.len();
        if width == 0 || rows.iter().any(|row| row.len() != width) {
            return None;
        }
        Some(Self { rows })
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn width(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    pub fn rows(&self) -> &[Vec<u32>] {
        &self.rows
    }

    /// Tile at `(row, col)`, or `None` when out of bounds
    pub fn get(&self, row: usize, col: usize) -> Option<u32> {
        self.rows.get(row)?.get(col).copied()
    }

    pub(crate) fn set(&mut self, row: usize, col: usize, value: u32) {
        self.rows[row][col] = value;
    }

    /// Iterate over every tile value in row-major order
    pub fn cells(&self) -> impl Iterator<Item = u32> + '_ {
        self.rows.iter().flatten().copied()
    }

    /// Coordinates `(row, col)` of every empty cell, row-major
    pub fn empty_cells(&self) -> Vec<(usize, usize)> {
        self.rows
            .iter()
            .enumerate()
            .flat_map(|(r, row)| {
                row.iter()
                    .enumerate()
                    .filter(|(_, value)| **value == 0)
                    .map(move |(c, _)| (r, c))
            })
            .collect()
    }

    pub fn count_nonzero(&self) -> usize {
        self.cells().filter(|&value| value != 0).count()
    }

    pub fn max_tile(&self) -> u32 {
        self.cells().max().unwrap_or(0)
    }

    /// Apply a move in `direction`, returning the new grid and the points
    /// scored by its merges. `self` is left untouched.
    pub fn moved(&self, direction: Direction) -> (Grid, u64) {
        let mut points = 0;
        let rows = self
            .oriented(direction)
            .into_iter()
            .map(|row| {
                let (moved, gained) = move_row_left(&row);
                points += gained;
                moved
            })
            .collect();

        (Grid::restored(rows, direction), points)
    }

    /// Whether moving in `direction` would change at least one tile
    pub fn can_move(&self, direction: Direction) -> bool {
        self.oriented(direction)
            .iter()
            .any(|row| row_is_left_movable(row))
    }

    /// Rows arranged so that a left move on them is a `direction` move on `self`
    fn oriented(&self, direction: Direction) -> Vec<Vec<u32>> {
        let rows = if direction.is_vertical() {
            transpose(&self.rows)
        } else {
            self.rows.clone()
        };
        if direction.is_mirrored() {
            mirror(&rows)
        } else {
            rows
        }
    }

    /// Inverse of [`Grid::oriented`]
    fn restored(rows: Vec<Vec<u32>>, direction: Direction) -> Grid {
        let rows = if direction.is_mirrored() {
            mirror(&rows)
        } else {
            rows
        };
        let rows = if direction.is_vertical() {
            transpose(&rows)
        } else {
            rows
        };
        Grid { rows }
    }
}

/// Slide and merge one row towards index 0.
///
/// Returns the new row and the sum of the tiles produced by merges. A tile
/// produced by a merge never merges again in the same call. Tiles at
/// [`MAX_TILE`] are never merged.
pub fn move_row_left(row: &[u32]) -> (Vec<u32>, u64) {
    let mut merged = tighten(row);
    let mut points = 0;

    let mut i = 0;
    while i + 1 < merged.len() {
        if mergeable(merged[i], merged[i + 1]) {
            merged[i] *= 2;
            merged[i + 1] = 0;
            points += u64::from(merged[i]);
            i += 2;
        } else {
            i += 1;
        }
    }

    let result = tighten(&merged);
    assert_eq!(result.len(), row.len(), "move_row_left changed the row length");
    (result, points)
}

/// True iff a left move would change the row: some empty cell has a tile to
/// its right, or two neighbouring tiles are equal.
pub fn row_is_left_movable(row: &[u32]) -> bool {
    row.windows(2)
        .any(|pair| (pair[0] == 0 && pair[1] != 0) || mergeable(pair[0], pair[1]))
}

fn mergeable(left: u32, right: u32) -> bool {
    left != 0 && left == right && left < MAX_TILE
}

/// Compact the non-empty tiles towards index 0, keeping their order
fn tighten(row: &[u32]) -> Vec<u32> {
    let mut tight: Vec<u32> = row.iter().copied().filter(|&value| value != 0).collect();
    tight.resize(row.len(), 0);
    tight
}

/// Swap rows and columns
fn transpose(rows: &[Vec<u32>]) -> Vec<Vec<u32>> {
    let width = rows.first().map_or(0, Vec::len);
    (0..width)
        .map(|col| rows.iter().map(|row| row[col]).collect())
        .collect()
}

/// Reverse every row (left/right mirror image)
fn mirror(rows: &[Vec<u32>]) -> Vec<Vec<u32>> {
    rows.iter()
        .map(|row| row.iter().rev().copied().collect())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn grid(rows: &[&[u32]]) -> Grid {
        Grid::from_rows(rows.iter().map(|row| row.to_vec()).collect()).unwrap()
    }

    #[test]
    fn test_merge_pair() {
        assert_eq!(move_row_left(&[2, 2, 0, 0]), (vec![4, 0, 0, 0], 4));
    }

    #[test]
    fn test_tighten_before_merge() {
        // [2, 0, 2, 2] -> [2, 2, 2, 0] -> [4, 0, 2, 0] -> [4, 2, 0, 0]
        assert_eq!(move_row_left(&[2, 0, 2, 2]), (vec![4, 2, 0, 0], 4));
    }

    #[test]
    fn test_merged_tile_does_not_merge_again() {
        assert_eq!(move_row_left(&[4, 4, 4, 4]), (vec![8, 8, 0, 0], 16));
        assert_eq!(move_row_left(&[2, 2, 4, 0]), (vec![4, 4, 0, 0], 4));
        assert_eq!(move_row_left(&[4, 4, 4, 0]), (vec![8, 4, 0, 0], 8));
    }

    #[test]
    fn test_second_pass_can_merge_again() {
        // A fresh merge result may pair up on the next move.
        let (once, _) = move_row_left(&[2, 2, 4, 0]);
        assert_eq!(move_row_left(&once), (vec![8, 0, 0, 0], 8));
    }

    #[test]
    fn test_largest_tiles_do_not_merge() {
        assert_eq!(
            move_row_left(&[0, MAX_TILE, MAX_TILE]),
            (vec![MAX_TILE, MAX_TILE, 0], 0)
        );
        assert!(!row_is_left_movable(&[MAX_TILE, MAX_TILE]));

        let half = MAX_TILE / 2;
        assert_eq!(
            move_row_left(&[half, half, 0]),
            (vec![MAX_TILE, 0, 0], u64::from(MAX_TILE))
        );
    }

    #[test]
    fn test_valid_tiles() {
        assert!(is_valid_tile(0));
        assert!(is_valid_tile(2));
        assert!(is_valid_tile(MAX_TILE));
        assert!(!is_valid_tile(1));
        assert!(!is_valid_tile(3));
        assert!(!is_valid_tile(6));
    }

    #[test]
    fn test_blocked_row_unchanged() {
        assert_eq!(move_row_left(&[2, 4, 8, 16]), (vec![2, 4, 8, 16], 0));
        assert_eq!(move_row_left(&[0, 0, 0, 0]), (vec![0, 0, 0, 0], 0));
    }

    #[test]
    fn test_row_is_left_movable() {
        assert!(row_is_left_movable(&[0, 2, 0, 0]));
        assert!(row_is_left_movable(&[2, 4, 4, 8]));
        assert!(!row_is_left_movable(&[2, 0, 0, 0]));
        assert!(!row_is_left_movable(&[0, 0, 0, 0]));
        assert!(!row_is_left_movable(&[2, 4, 2, 4]));
        assert!(!row_is_left_movable(&[8]));
    }

    #[test]
    fn test_from_rows_rejects_ragged() {
        assert!(Grid::from_rows(vec![]).is_none());
        assert!(Grid::from_rows(vec![vec![]]).is_none());
        assert!(Grid::from_rows(vec![vec![0, 2], vec![2]]).is_none());
    }

    #[test]
    fn test_directional_moves() {
        let start = grid(&[
            &[2, 0, 0, 2],
            &[0, 4, 0, 0],
            &[0, 4, 8, 0],
            &[2, 0, 8, 0],
        ]);

        let (left, points) = start.moved(Direction::Left);
        assert_eq!(points, 4);
        assert_eq!(
            left,
            grid(&[&[4, 0, 0, 0], &[4, 0, 0, 0], &[4, 8, 0, 0], &[2, 8, 0, 0]])
        );

        let (right, points) = start.moved(Direction::Right);
        assert_eq!(points, 4);
        assert_eq!(
            right,
            grid(&[&[0, 0, 0, 4], &[0, 0, 0, 4], &[0, 0, 4, 8], &[0, 0, 2, 8]])
        );

        let (up, points) = start.moved(Direction::Up);
        assert_eq!(points, 4 + 8 + 16);
        assert_eq!(
            up,
            grid(&[&[4, 8, 16, 2], &[0, 0, 0, 0], &[0, 0, 0, 0], &[0, 0, 0, 0]])
        );

        let (down, points) = start.moved(Direction::Down);
        assert_eq!(points, 4 + 8 + 16);
        assert_eq!(
            down,
            grid(&[&[0, 0, 0, 0], &[0, 0, 0, 0], &[0, 0, 0, 0], &[4, 8, 16, 2]])
        );
    }

    #[test]
    fn test_non_square_moves() {
        let start = grid(&[&[2, 0, 2], &[0, 0, 4]]);

        let (up, _) = start.moved(Direction::Up);
        assert_eq!(up, grid(&[&[2, 0, 2], &[0, 0, 4]]));
        assert!(!start.can_move(Direction::Up));

        let (down, _) = start.moved(Direction::Down);
        assert_eq!(down, grid(&[&[0, 0, 2], &[2, 0, 4]]));

        let (left, points) = start.moved(Direction::Left);
        assert_eq!(points, 4);
        assert_eq!(left, grid(&[&[4, 0, 0], &[4, 0, 0]]));
    }

    #[test]
    fn test_can_move_per_direction() {
        let g = grid(&[&[2, 0], &[0, 0]]);
        assert!(!g.can_move(Direction::Left));
        assert!(!g.can_move(Direction::Up));
        assert!(g.can_move(Direction::Right));
        assert!(g.can_move(Direction::Down));
    }

    #[test]
    fn test_checkerboard_cannot_move() {
        let g = grid(&[
            &[2, 4, 2, 4],
            &[4, 2, 4, 2],
            &[2, 4, 2, 4],
            &[4, 2, 4, 2],
        ]);
        for direction in Direction::ALL {
            assert!(!g.can_move(direction));
        }
    }

    #[test]
    fn test_queries() {
        let g = grid(&[&[0, 2], &[8, 0]]);
        assert_eq!(g.empty_cells(), vec![(0, 0), (1, 1)]);
        assert_eq!(g.count_nonzero(), 2);
        assert_eq!(g.max_tile(), 8);
        assert_eq!(g.get(1, 0), Some(8));
        assert_eq!(g.get(2, 0), None);
    }

    fn tile() -> impl Strategy<Value = u32> {
        prop_oneof![Just(0u32), (1u32..=11).prop_map(|exp| 1u32 << exp)]
    }

    fn square_grid() -> impl Strategy<Value = Grid> {
        (2usize..=5).prop_flat_map(|n| {
            prop::collection::vec(prop::collection::vec(tile(), n), n)
                .prop_map(|rows| Grid::from_rows(rows).unwrap())
        })
    }

    proptest! {
        #[test]
        fn prop_row_length_preserved(row in prop::collection::vec(tile(), 1..8)) {
            let (moved, _) = move_row_left(&row);
            prop_assert_eq!(moved.len(), row.len());
        }

        #[test]
        fn prop_output_is_tight(row in prop::collection::vec(tile(), 1..8)) {
            let (once, _) = move_row_left(&row);
            prop_assert_eq!(tighten(&once), once.clone());
            let (twice, _) = move_row_left(&once);
            prop_assert_eq!(tighten(&twice), twice);
        }

        #[test]
        fn prop_unmergeable_output_is_fixed_point(row in prop::collection::vec(tile(), 1..8)) {
            let (once, _) = move_row_left(&row);
            if !row_is_left_movable(&once) {
                prop_assert_eq!(move_row_left(&once), (once, 0));
            }
        }

        #[test]
        fn prop_movable_iff_changed(row in prop::collection::vec(tile(), 1..8)) {
            let (moved, _) = move_row_left(&row);
            prop_assert_eq!(row_is_left_movable(&row), moved != row);
        }

        #[test]
        fn prop_merges_preserve_tile_sum(row in prop::collection::vec(tile(), 1..8)) {
            let (moved, points) = move_row_left(&row);
            prop_assert_eq!(
                moved.iter().map(|&v| u64::from(v)).sum::<u64>(),
                row.iter().map(|&v| u64::from(v)).sum::<u64>()
            );
            prop_assert_eq!(points % 4, 0);
        }

        #[test]
        fn prop_can_move_iff_grid_changes(g in square_grid()) {
            for direction in Direction::ALL {
                let (moved, _) = g.moved(direction);
                prop_assert_eq!(g.can_move(direction), moved != g);
            }
        }
    }
}
