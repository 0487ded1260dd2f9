//! Screen-border spot layout for ambient LED strips.
//!
//! An LED strip runs clockwise around the back of a screen. For every LED, this
//! crate computes the screen region (a [`Spot`]) whose color the LED should show,
//! in the order the LEDs are wired, and keeps that array up to date as the layout
//! settings change.
//!
//! - [`layout`]: the pure layout engine (geometry, clockwise ranking, boundary walk,
//!   offset and mirroring).
//! - [`SpotSet`]: owns the published array and rebuilds it on relevant setting changes.
//! - [`settings`]: the layout configuration and its change notifications.
//! - [`screen`]: screen metrics the layout is computed against.
//!
//! Capturing the screen, sampling colors, and driving the strip are left to the
//! caller.
//!
//! # Example
//!
//! ```rust
//! use border_spots::settings::LayoutConfig;
//! use border_spots::{FixedScreen, SpotSet};
//!
//! let config = LayoutConfig {
//!     spots_x: 4,
//!     spots_y: 3,
//!     offset_led: 2,
//!     ..LayoutConfig::DEFAULT
//! };
//! let spot_set = SpotSet::new(config, FixedScreen::new(1920, 1080, 8))?;
//!
//! let spots = spot_set.spots();
//! assert_eq!(spots.len(), 14);
//! assert!(spots[0].is_first());
//! assert_eq!(spots.iter().filter(|spot| spot.is_first()).count(), 1);
//! # Ok::<(), border_spots::Error>(())
//! ```
//!
//! # Features
//!
//! - `std` (default): use the standard library's critical-section implementation.
//!   Without it the crate is `no_std` + `alloc`, and the target must provide one.
//! - `defmt`: derive `defmt::Format` for settings and error types.
#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

mod error;
pub mod layout;
pub mod screen;
pub mod settings;
pub mod spot;
pub mod spot_set;

// Re-export the types most callers need
pub use crate::error::{Error, Result};
pub use crate::layout::{BoundaryWalker, build_spots, led_count};
pub use crate::screen::{FixedScreen, ScreenMetrics};
pub use crate::settings::{LayoutConfig, SettingChange, SettingsField, SettingsSource, SettingsStore};
pub use crate::spot::Spot;
pub use crate::spot_set::{SpotSet, SpotSetBuilder};
