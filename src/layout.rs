//! Border spot layout: where each LED samples, in physical strip order.
//!
//! A layout is built in three steps:
//!
//! 1. [`BorderGeometry`] places every border cell of the `spots_x` × `spots_y` grid
//!    on the screen. [`PerimeterIndexer`] ranks the distinct border cells clockwise.
//! 2. [`BoundaryWalker`] lays out the `2 * spots_x + 2 * spots_y` strip slots
//!    clockwise from the top-left corner. Each slot is projected onto the grid
//!    ([`clockwise_cells`]) and takes the geometry of that cell. Every edge gets its
//!    full spot count, so each corner cell serves the two edges meeting there. The
//!    walk reaches the border cells in rank order (see [`perimeter::walker_agrees`]).
//! 3. [`transform`] applies the configured offset and mirroring, then slot 0 is
//!    marked as the first spot.
//!
//! Building touches only the border, so its cost is linear in the LED count.
//!
//! ```text
//! spots_x = 4, spots_y = 3 (slot numbers; corner cells hold two slots):
//!
//!   0/13   1   2   3/4
//!   12             5
//!   11/10  9   8   7/6
//! ```

pub mod boundary_walker;
pub mod geometry;
pub mod perimeter;
pub mod transform;

use alloc::vec::Vec;

use embedded_graphics::geometry::Size;

pub use self::boundary_walker::BoundaryWalker;
pub use self::geometry::BorderGeometry;
pub use self::perimeter::{PerimeterIndexer, RankedCell};
use crate::Result;
use crate::settings::LayoutConfig;
use crate::spot::Spot;

/// Number of LEDs around a `spots_x` × `spots_y` border.
#[must_use]
pub const fn led_count(spots_x: usize, spots_y: usize) -> usize {
    spots_x.saturating_add(spots_y).saturating_mul(2)
}

/// Grid cell (`column`, `row`) of every strip slot, clockwise from the top-left corner.
///
/// ```rust
/// use border_spots::layout::clockwise_cells;
///
/// let cells: Vec<_> = clockwise_cells(2, 2)?.collect();
/// assert_eq!(
///     cells,
///     [(0, 0), (1, 0), (1, 0), (1, 1), (1, 1), (0, 1), (0, 1), (0, 0)]
/// );
/// # Ok::<(), border_spots::Error>(())
/// ```
///
/// # Errors
///
/// Returns [`Error::InvalidCount`](crate::Error::InvalidCount) when either count is zero.
pub fn clockwise_cells(
    spots_x: usize,
    spots_y: usize,
) -> Result<impl ExactSizeIterator<Item = (usize, usize)> + Clone> {
    let last_column = spots_x.saturating_sub(1);
    let last_row = spots_y.saturating_sub(1);
    Ok(
        BoundaryWalker::new(spots_x, spots_y)?.map(move |(x, y)| {
            (
                x.saturating_sub(1).min(last_column),
                y.saturating_sub(1).min(last_row),
            )
        }),
    )
}

/// Build the spot array for `config` on a screen of `screen` capture pixels.
///
/// The result has [`led_count`] entries in physical strip order, with offset and
/// mirroring applied and exactly one spot, at index 0, marked first.
///
/// # Errors
///
/// Returns an error when `config` fails [`LayoutConfig::validate`] or the scaling
/// factor is zero. Negative spot widths and heights are rejected here
/// ([`Error::NegativeSpotSize`](crate::Error::NegativeSpotSize)) instead of producing
/// boxes that extend up or left of their anchor.
pub fn build_spots(screen: Size, config: &LayoutConfig, scaling_factor: u32) -> Result<Vec<Spot>> {
    let geometry = BorderGeometry::new(screen, config, scaling_factor)?;
    let spot_size = geometry.spot_size();

    let cells = clockwise_cells(usize::from(config.spots_x), usize::from(config.spots_y))?;
    let mut spots: Vec<Spot> = cells
        .map(|(column, row)| Spot::new(geometry.position(column, row), spot_size))
        .collect();

    transform::apply_configured(&mut spots, config);
    if let Some(first) = spots.first_mut() {
        first.mark_first();
    }
    Ok(spots)
}
