//! Screen metrics the layout is computed against.
//!
//! The capture side works on a down-scaled copy of the primary display, so every
//! measurement is divided by [`ScreenMetrics::scaling_factor`] before spots are laid out.

use alloc::sync::Arc;

use embedded_graphics::geometry::Size;

use crate::{Error, Result};

/// Primary display bounds plus the capture scaling factor.
pub trait ScreenMetrics {
    /// Full resolution of the primary display, in pixels.
    fn primary_bounds(&self) -> Size;

    /// Divisor applied to every linear measurement before layout.
    fn scaling_factor(&self) -> u32;

    /// Size of the captured image: the primary bounds divided by the scaling factor.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidScalingFactor`] when the factor is zero.
    fn expected_size(&self) -> Result<Size> {
        let scaling_factor = self.scaling_factor();
        let bounds = self.primary_bounds();
        match (
            bounds.width.checked_div(scaling_factor),
            bounds.height.checked_div(scaling_factor),
        ) {
            (Some(width), Some(height)) => Ok(Size::new(width, height)),
            _ => Err(Error::InvalidScalingFactor {
                value: scaling_factor,
            }),
        }
    }
}

/// Screen metrics that never change. Useful for tests and headless setups.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct FixedScreen {
    bounds: Size,
    scaling_factor: u32,
}

impl FixedScreen {
    /// A `width`×`height` display captured at `1 / scaling_factor` resolution.
    #[must_use]
    pub const fn new(width: u32, height: u32, scaling_factor: u32) -> Self {
        Self {
            bounds: Size::new(width, height),
            scaling_factor,
        }
    }
}

impl ScreenMetrics for FixedScreen {
    fn primary_bounds(&self) -> Size {
        self.bounds
    }

    fn scaling_factor(&self) -> u32 {
        self.scaling_factor
    }
}

impl<T: ScreenMetrics + ?Sized> ScreenMetrics for &T {
    fn primary_bounds(&self) -> Size {
        (**self).primary_bounds()
    }

    fn scaling_factor(&self) -> u32 {
        (**self).scaling_factor()
    }
}

impl<T: ScreenMetrics + ?Sized> ScreenMetrics for Arc<T> {
    fn primary_bounds(&self) -> Size {
        (**self).primary_bounds()
    }

    fn scaling_factor(&self) -> u32 {
        (**self).scaling_factor()
    }
}
