//! Error and result types shared by the layout engine.

use derive_more::{Display, Error};

/// Result type used throughout the crate.
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Everything that can go wrong while laying out spots.
///
/// Degenerate grids (a single row or column of spots) are *not* errors; they lay
/// out normally with the corresponding step and mirror logic disabled.
#[derive(Clone, Copy, Debug, Display, Error, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// A [`SpotSet`](crate::SpotSet) was built without a settings source.
    #[display("layout settings source is missing")]
    MissingSettings,

    /// A [`SpotSet`](crate::SpotSet) was built without screen metrics.
    #[display("screen metrics source is missing")]
    MissingScreenMetrics,

    /// A spot or strip count was below one.
    #[display("{name} must be at least 1 (got {value})")]
    InvalidCount {
        /// Name of the offending count.
        name: &'static str,
        /// The rejected value.
        value: usize,
    },

    /// A spot width or height was negative.
    #[display("{name} must not be negative (got {value})")]
    NegativeSpotSize {
        /// Name of the offending measurement.
        name: &'static str,
        /// The rejected value.
        value: i32,
    },

    /// The screen scaling factor was zero or too large to divide by.
    #[display("scaling factor must be between 1 and i32::MAX (got {value})")]
    InvalidScalingFactor {
        /// The rejected value.
        value: u32,
    },
}
