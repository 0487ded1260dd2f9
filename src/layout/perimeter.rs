//! Clockwise ranks for the cells on the border of a spot grid.
//!
//! The grid is scanned row by row, but LEDs run clockwise. A running counter over the
//! scanned border cells is already the clockwise rank on the top row; the other rows
//! are corrected arithmetically:
//!
//! ```text
//! spots_x = 4, spots_y = 3
//!
//! scan counter:     clockwise rank:
//!   0  1  2  3        0  1  2  3
//!   4        5        9        4
//!   6  7  8  9        8  7  6  5
//! ```
//!
//! Nothing here allocates or visits interior cells, so the cost follows the number of
//! border cells, not the grid area.

use crate::{Error, Result};

/// Whether cell (`column`, `row`) lies on the outer ring of a `spots_x` × `spots_y` grid.
#[must_use]
pub const fn is_border_cell(column: usize, row: usize, spots_x: usize, spots_y: usize) -> bool {
    column == 0
        || row == 0
        || column == spots_x.saturating_sub(1)
        || row == spots_y.saturating_sub(1)
}

/// Number of distinct cells on the outer ring of a `spots_x` × `spots_y` grid.
#[must_use]
pub const fn border_cell_count(spots_x: usize, spots_y: usize) -> usize {
    if spots_x <= 1 || spots_y <= 1 {
        spots_x.saturating_mul(spots_y)
    } else {
        spots_x.saturating_add(spots_y).saturating_sub(2).saturating_mul(2)
    }
}

/// A border cell together with its clockwise rank.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct RankedCell {
    /// Grid column, `0..spots_x`.
    pub column: usize,
    /// Grid row, `0..spots_y`.
    pub row: usize,
    /// Clockwise rank among the distinct border cells, starting at the top-left cell.
    pub rank: usize,
}

/// Assigns clockwise ranks to border cells visited in row-major order.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct PerimeterIndexer {
    spots_x: usize,
    spots_y: usize,
}

impl PerimeterIndexer {
    /// Indexer for a `spots_x` × `spots_y` grid.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidCount`] when either count is zero.
    pub const fn new(spots_x: usize, spots_y: usize) -> Result<Self> {
        if spots_x < 1 {
            return Err(Error::InvalidCount {
                name: "spots_x",
                value: spots_x,
            });
        }
        if spots_y < 1 {
            return Err(Error::InvalidCount {
                name: "spots_y",
                value: spots_y,
            });
        }
        Ok(Self { spots_x, spots_y })
    }

    /// Number of distinct border cells, and so the number of ranks handed out.
    #[must_use]
    pub const fn border_cell_count(&self) -> usize {
        border_cell_count(self.spots_x, self.spots_y)
    }

    /// Clockwise rank of the border cell (`column`, `row`), given its `counter`
    /// position in the row-major scan of border cells.
    ///
    /// Grids with a single row or column are already in order.
    #[must_use]
    #[expect(
        clippy::arithmetic_side_effects,
        clippy::cast_possible_wrap,
        clippy::cast_sign_loss,
        reason = "counts and counters stay below 2 * (spots_x + spots_y); ranks are never negative"
    )]
    pub const fn rank(&self, column: usize, row: usize, counter: usize) -> usize {
        let spots_x = self.spots_x as isize;
        let spots_y = self.spots_y as isize;
        if spots_x <= 1 || spots_y <= 1 {
            return counter;
        }

        let relation_index = spots_x - spots_y + 1;
        let counter = counter as isize;
        let column = column as isize;
        let row = row as isize;
        let is_first_row = row == 0;
        let is_last_row = row == spots_y - 1;

        let rank = if !is_first_row && !is_last_row {
            if column == 0 {
                counter + relation_index + (spots_y - 1 - row) * 3
            } else if column == spots_x - 1 {
                counter - row
            } else {
                counter
            }
        } else if is_last_row {
            counter + relation_index - column * 2
        } else {
            counter
        };
        rank as usize
    }

    /// Clockwise rank of cell (`column`, `row`) without scanning, or `None` for
    /// interior and out-of-range cells.
    ///
    /// ```rust
    /// use border_spots::layout::PerimeterIndexer;
    ///
    /// let indexer = PerimeterIndexer::new(4, 3)?;
    /// assert_eq!(indexer.clockwise_rank(3, 1), Some(4));
    /// assert_eq!(indexer.clockwise_rank(0, 1), Some(9));
    /// assert_eq!(indexer.clockwise_rank(1, 1), None);
    /// # Ok::<(), border_spots::Error>(())
    /// ```
    #[must_use]
    #[expect(
        clippy::arithmetic_side_effects,
        reason = "operands are below spots_x and spots_y, results below 2 * (spots_x + spots_y)"
    )]
    pub const fn clockwise_rank(&self, column: usize, row: usize) -> Option<usize> {
        if column >= self.spots_x || row >= self.spots_y {
            return None;
        }
        let last_column = self.spots_x - 1;
        let last_row = self.spots_y - 1;

        // a single line is ranked in scan order
        if last_column == 0 || last_row == 0 {
            return Some(column + row);
        }

        if row == 0 {
            Some(column)
        } else if column == last_column {
            Some(last_column + row)
        } else if row == last_row {
            Some(last_column + last_row + (last_column - column))
        } else if column == 0 {
            Some(2 * last_column + last_row + (last_row - row))
        } else {
            None
        }
    }

    /// Border cells in row-major scan order, each with its clockwise rank.
    ///
    /// Middle rows only yield their two side columns.
    pub fn scan(&self) -> impl Iterator<Item = RankedCell> + Clone + use<> {
        let indexer = *self;
        let (spots_x, spots_y) = (self.spots_x, self.spots_y);
        let last_row = spots_y.saturating_sub(1);
        let side_step = spots_x.saturating_sub(1).max(1);
        (0..spots_y)
            .flat_map(move |row| {
                let step = if row == 0 || row == last_row { 1 } else { side_step };
                (0..spots_x).step_by(step).map(move |column| (column, row))
            })
            .enumerate()
            .map(move |(counter, (column, row))| RankedCell {
                column,
                row,
                rank: indexer.rank(column, row, counter),
            })
    }
}

/// Check that [`BoundaryWalker`](super::BoundaryWalker) and [`PerimeterIndexer`] agree.
///
/// The scan's running-counter ranks must match [`PerimeterIndexer::clockwise_rank`],
/// and walking the boundary while projecting onto the grid (see
/// [`clockwise_cells`](super::clockwise_cells)) must reach every distinct border cell
/// in exactly rank order.
#[must_use]
pub fn walker_agrees(spots_x: usize, spots_y: usize) -> bool {
    let (Ok(indexer), Ok(cells)) = (
        PerimeterIndexer::new(spots_x, spots_y),
        super::clockwise_cells(spots_x, spots_y),
    ) else {
        return false;
    };

    let scan_matches = indexer
        .scan()
        .all(|cell| indexer.clockwise_rank(cell.column, cell.row) == Some(cell.rank));
    if !scan_matches {
        return false;
    }

    let mut next_rank = 0_usize;
    for (column, row) in cells {
        match indexer.clockwise_rank(column, row) {
            Some(rank) if rank == next_rank => next_rank = next_rank.saturating_add(1),
            // corner cells are reached a second time by the next edge
            Some(rank) if rank < next_rank => {}
            _ => return false,
        }
    }
    next_rank == indexer.border_cell_count()
}
