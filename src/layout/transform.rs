//! Reversible rearrangements of a clockwise spot array.
//!
//! All functions work on any slice laid out like [`build_spots`](super::build_spots)
//! output, with `N = 2 * spots_x + 2 * spots_y` slots:
//!
//! ```text
//! top     [0, X)            left to right
//! right   [X, X+Y)          top to bottom
//! bottom  [X+Y, 2X+Y)       right to left
//! left    [2X+Y, 2X+2Y)     bottom to top
//! ```
//!
//! Corner cells are shared by the two edges that meet there. Ranges that do not fit
//! the slice are left untouched.

use crate::settings::LayoutConfig;

/// Rotate the clockwise sequence so that slot `(i + offset) mod N` holds what was
/// in slot `i`. Negative offsets rotate counter-clockwise.
///
/// ```rust
/// use border_spots::layout::transform::offset;
///
/// let mut slots = [0, 1, 2, 3, 4, 5, 6, 7];
/// offset(&mut slots, 2);
/// assert_eq!(slots, [6, 7, 0, 1, 2, 3, 4, 5]);
/// offset(&mut slots, -2);
/// assert_eq!(slots, [0, 1, 2, 3, 4, 5, 6, 7]);
/// ```
pub fn offset<T>(spots: &mut [T], offset: i32) {
    let Ok(len) = i64::try_from(spots.len()) else {
        return;
    };
    if len == 0 {
        return;
    }
    let shift = i64::from(offset).rem_euclid(len);
    if let Ok(shift) = usize::try_from(shift) {
        spots.rotate_right(shift);
    }
}

/// Reverse `length` slots starting at `start`, by swapping pairs from both ends.
pub fn mirror<T>(spots: &mut [T], start: usize, length: usize) {
    if let Some(range) = spots.get_mut(start..start.saturating_add(length)) {
        range.reverse();
    }
}

/// The top, right, bottom and left runs of a clockwise slot array.
fn sides<T>(spots: &mut [T], spots_x: usize, spots_y: usize) -> Option<[&mut [T]; 4]> {
    let (top, rest) = spots.split_at_mut_checked(spots_x)?;
    let (right, rest) = rest.split_at_mut_checked(spots_y)?;
    let (bottom, rest) = rest.split_at_mut_checked(spots_x)?;
    let (left, _) = rest.split_at_mut_checked(spots_y)?;
    Some([top, right, bottom, left])
}

/// Flip top to bottom: each top-row slot trades places with the bottom-row slot in
/// the same column, and both side columns are reversed.
///
/// Applying it twice restores the original order.
pub fn mirror_x<T>(spots: &mut [T], spots_x: usize, spots_y: usize) {
    debug_assert_eq!(spots.len(), super::led_count(spots_x, spots_y));
    let Some([top, right, bottom, left]) = sides(spots, spots_x, spots_y) else {
        return;
    };

    // top row <-> bottom row, same column
    top.reverse();
    bottom.reverse();
    top.swap_with_slice(bottom);

    right.reverse();
    left.reverse();
}

/// Flip left to right: each right-column slot trades places with the left-column
/// slot in the same row, and the top and bottom rows are reversed.
///
/// Applying it twice restores the original order.
pub fn mirror_y<T>(spots: &mut [T], spots_x: usize, spots_y: usize) {
    debug_assert_eq!(spots.len(), super::led_count(spots_x, spots_y));
    let Some([top, right, bottom, left]) = sides(spots, spots_x, spots_y) else {
        return;
    };

    // right column <-> left column, same row
    right.reverse();
    left.reverse();
    right.swap_with_slice(left);

    top.reverse();
    bottom.reverse();
}

/// Apply the offset and mirroring requested by `config`, in that order.
///
/// Mirroring an axis with a single spot row or column is skipped: there is nothing
/// to flip.
pub fn apply_configured<T>(spots: &mut [T], config: &LayoutConfig) {
    let spots_x = usize::from(config.spots_x);
    let spots_y = usize::from(config.spots_y);

    if config.offset_led != 0 {
        offset(spots, config.offset_led);
    }
    if spots_y > 1 && config.mirror_x {
        mirror_x(spots, spots_x, spots_y);
    }
    if spots_x > 1 && config.mirror_y {
        mirror_y(spots, spots_x, spots_y);
    }
}
