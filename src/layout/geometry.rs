//! Pixel positions of border-grid cells.

use embedded_graphics::geometry::{Point, Size};

use crate::settings::LayoutConfig;
use crate::{Error, Result};

/// Spot placement along one screen axis.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
struct AxisLayout {
    extent: i32,
    inset: i32,
    centering: i32,
    step: i32,
}

impl AxisLayout {
    /// Distribute `count` spots of `spot_extent` evenly between the two insets.
    ///
    /// Whatever the integer step leaves over is split evenly before the first spot.
    /// A single spot sits at the inset.
    fn new(extent: i32, inset: i32, spot_extent: i32, count: u16) -> Self {
        let free = extent
            .saturating_sub(inset.saturating_mul(2))
            .saturating_sub(spot_extent);
        let gaps = i32::from(count).saturating_sub(1);
        let (step, left_over) = match (free.checked_div(gaps), free.checked_rem(gaps)) {
            (Some(step), Some(left_over)) if gaps > 0 => (step, left_over),
            _ => (0, 0),
        };
        Self {
            extent,
            inset,
            centering: left_over / 2,
            step,
        }
    }

    fn position(&self, index: usize) -> i32 {
        let index = i32::try_from(index).unwrap_or(i32::MAX);
        self.centering
            .saturating_add(self.inset)
            .saturating_add(self.step.saturating_mul(index))
            .clamp(0, self.extent)
    }
}

/// Maps border-grid cells to capture-space pixel positions.
///
/// All configured measurements are divided by the scaling factor first. Positions
/// are clamped to `[0, width]` × `[0, height]` of the (already scaled) screen.
///
/// ```rust
/// use border_spots::layout::BorderGeometry;
/// use border_spots::settings::LayoutConfig;
/// use embedded_graphics::geometry::{Point, Size};
///
/// let config = LayoutConfig {
///     spots_x: 3,
///     spots_y: 2,
///     border_distance_x: 10,
///     border_distance_y: 0,
///     spot_width: 20,
///     spot_height: 20,
///     ..LayoutConfig::DEFAULT
/// };
/// let geometry = BorderGeometry::new(Size::new(101, 50), &config, 1)?;
///
/// // (101 - 2*10 - 20) = 61 free pixels over 2 gaps: step 30, 1 left over, centering 0.
/// assert_eq!(geometry.position(0, 0), Point::new(10, 0));
/// assert_eq!(geometry.position(2, 1), Point::new(70, 30));
/// # Ok::<(), border_spots::Error>(())
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct BorderGeometry {
    horizontal: AxisLayout,
    vertical: AxisLayout,
    spot_size: Size,
}

impl BorderGeometry {
    /// Geometry for `config` on a screen of `screen` capture pixels.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidScalingFactor`] for a zero (or larger than `i32::MAX`)
    /// factor, and any error from [`LayoutConfig::validate`].
    pub fn new(screen: Size, config: &LayoutConfig, scaling_factor: u32) -> Result<Self> {
        config.validate()?;
        let scale = i32::try_from(scaling_factor)
            .ok()
            .filter(|scale| *scale > 0)
            .ok_or(Error::InvalidScalingFactor {
                value: scaling_factor,
            })?;

        let scaled = |value: i32| value.checked_div(scale).unwrap_or_default();
        let spot_width = scaled(config.spot_width);
        let spot_height = scaled(config.spot_height);
        let screen_width = i32::try_from(screen.width).unwrap_or(i32::MAX);
        let screen_height = i32::try_from(screen.height).unwrap_or(i32::MAX);

        Ok(Self {
            horizontal: AxisLayout::new(
                screen_width,
                scaled(config.border_distance_x),
                spot_width,
                config.spots_x,
            ),
            vertical: AxisLayout::new(
                screen_height,
                scaled(config.border_distance_y),
                spot_height,
                config.spots_y,
            ),
            spot_size: Size::new(spot_width.unsigned_abs(), spot_height.unsigned_abs()),
        })
    }

    /// Top-left corner of the spot in grid cell (`column`, `row`).
    #[must_use]
    pub fn position(&self, column: usize, row: usize) -> Point {
        Point::new(
            self.horizontal.position(column),
            self.vertical.position(row),
        )
    }

    /// Size of every spot, in capture pixels.
    #[must_use]
    pub const fn spot_size(&self) -> Size {
        self.spot_size
    }
}
