//! A single sample point on the screen border, mapped 1:1 to a physical LED.

use embedded_graphics::geometry::{Point, Size};
use embedded_graphics::primitives::Rectangle;
use portable_atomic::{AtomicBool, Ordering};

/// Screen region sampled for one LED.
///
/// Geometry is fixed once the spot is published. The missing-value flag is atomic
/// so the capture pipeline can set it through a shared snapshot of the spot array.
///
/// Equality compares geometry and the first-spot marker; the missing-value flag is
/// runtime state and is ignored.
#[derive(Debug)]
pub struct Spot {
    top_left: Point,
    size: Size,
    is_first: bool,
    missing_value: AtomicBool,
}

impl Spot {
    /// A spot with its top-left corner at `top_left`.
    #[must_use]
    pub const fn new(top_left: Point, size: Size) -> Self {
        Self {
            top_left,
            size,
            is_first: false,
            missing_value: AtomicBool::new(false),
        }
    }

    /// Horizontal position of the top-left corner, in capture pixels.
    #[must_use]
    pub const fn x(&self) -> i32 {
        self.top_left.x
    }

    /// Vertical position of the top-left corner, in capture pixels.
    #[must_use]
    pub const fn y(&self) -> i32 {
        self.top_left.y
    }

    /// Width of the sampled box.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.size.width
    }

    /// Height of the sampled box.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.size.height
    }

    /// Top-left corner.
    #[must_use]
    pub const fn top_left(&self) -> Point {
        self.top_left
    }

    /// Sampled box size.
    #[must_use]
    pub const fn size(&self) -> Size {
        self.size
    }

    /// Sampled box as an embedded-graphics rectangle.
    #[must_use]
    pub const fn rectangle(&self) -> Rectangle {
        Rectangle::new(self.top_left, self.size)
    }

    /// Center of the sampled box (rounded toward the top-left).
    #[must_use]
    pub fn center(&self) -> Point {
        self.rectangle().center()
    }

    /// Whether this spot is physical LED 0, the frame start for the strip protocol.
    #[must_use]
    pub const fn is_first(&self) -> bool {
        self.is_first
    }

    pub(crate) const fn mark_first(&mut self) {
        self.is_first = true;
    }

    /// Record that no valid color could be sampled for this spot.
    pub fn indicate_missing_value(&self) {
        self.missing_value.store(true, Ordering::Release);
    }

    /// Clear the missing-value flag after a valid sample.
    pub fn clear_missing_value(&self) {
        self.missing_value.store(false, Ordering::Release);
    }

    /// Whether the spot currently has no valid sample.
    #[must_use]
    pub fn has_missing_value(&self) -> bool {
        self.missing_value.load(Ordering::Acquire)
    }
}

impl Clone for Spot {
    fn clone(&self) -> Self {
        Self {
            top_left: self.top_left,
            size: self.size,
            is_first: self.is_first,
            missing_value: AtomicBool::new(self.has_missing_value()),
        }
    }
}

impl PartialEq for Spot {
    fn eq(&self, other: &Self) -> bool {
        self.top_left == other.top_left
            && self.size == other.size
            && self.is_first == other.is_first
    }
}

impl Eq for Spot {}
