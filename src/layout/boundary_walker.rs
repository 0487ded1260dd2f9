//! Canonical clockwise walk around a strip-count bounding grid.

use core::iter::FusedIterator;

use crate::{Error, Result};

/// Lazy, clockwise sequence of the boundary coordinates of a
/// `(horizontal + 2) × (vertical + 2)` grid, corners excluded.
///
/// The walk starts just right of the top-left corner:
///
/// ```text
/// horizontal = 4, vertical = 1 (coordinate index shown per cell):
///
///      0  1  2  3
///   9              4
///      8  7  6  5
/// ```
///
/// - top: `(1..=horizontal, 0)`
/// - right: `(horizontal + 1, 1..=vertical)`
/// - bottom: `(horizontal..=1, vertical + 1)`
/// - left: `(0, vertical..=1)`
///
/// Clone the walker to replay the same sequence.
///
/// ```rust
/// use border_spots::BoundaryWalker;
///
/// let walk: Vec<_> = BoundaryWalker::new(2, 1)?.collect();
/// assert_eq!(walk, [(1, 0), (2, 0), (3, 1), (2, 2), (1, 2), (0, 1)]);
/// # Ok::<(), border_spots::Error>(())
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BoundaryWalker {
    horizontal: usize,
    vertical: usize,
    next_index: usize,
}

impl BoundaryWalker {
    /// Start a walk around `horizontal_strip_count` × `vertical_strip_count` strips.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidCount`] when either count is zero.
    pub const fn new(horizontal_strip_count: usize, vertical_strip_count: usize) -> Result<Self> {
        if horizontal_strip_count < 1 {
            return Err(Error::InvalidCount {
                name: "horizontal_strip_count",
                value: horizontal_strip_count,
            });
        }
        if vertical_strip_count < 1 {
            return Err(Error::InvalidCount {
                name: "vertical_strip_count",
                value: vertical_strip_count,
            });
        }
        Ok(Self {
            horizontal: horizontal_strip_count,
            vertical: vertical_strip_count,
            next_index: 0,
        })
    }

    /// Total number of coordinates in a full walk: `2 * horizontal + 2 * vertical`.
    #[must_use]
    pub const fn total(&self) -> usize {
        super::led_count(self.horizontal, self.vertical)
    }

    /// The `index`-th coordinate of the walk, if `index < total()`.
    #[must_use]
    pub const fn coordinate(&self, index: usize) -> Option<(usize, usize)> {
        let horizontal = self.horizontal;
        let vertical = self.vertical;
        let right_start = horizontal;
        let bottom_start = right_start.saturating_add(vertical);
        let left_start = bottom_start.saturating_add(horizontal);

        if index < right_start {
            Some((index.saturating_add(1), 0))
        } else if index < bottom_start {
            let row = index.saturating_sub(right_start).saturating_add(1);
            Some((horizontal.saturating_add(1), row))
        } else if index < left_start {
            let column = horizontal.saturating_sub(index.saturating_sub(bottom_start));
            Some((column, vertical.saturating_add(1)))
        } else if index < self.total() {
            Some((0, vertical.saturating_sub(index.saturating_sub(left_start))))
        } else {
            None
        }
    }
}

impl Iterator for BoundaryWalker {
    type Item = (usize, usize);

    fn next(&mut self) -> Option<Self::Item> {
        let coordinate = self.coordinate(self.next_index)?;
        self.next_index = self.next_index.saturating_add(1);
        Some(coordinate)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.total().saturating_sub(self.next_index);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for BoundaryWalker {}

impl FusedIterator for BoundaryWalker {}
