//! The published spot array, kept in step with the layout settings.
//!
//! See [`SpotSet`] for usage.

use alloc::sync::Arc;
use core::cell::RefCell;

use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embedded_graphics::geometry::Size;
use log::{debug, error, info};

use crate::layout::build_spots;
use crate::screen::ScreenMetrics;
use crate::settings::{SettingsField, SettingsSource};
use crate::spot::Spot;
use crate::{Error, Result};

/// Owns the current spot array and rebuilds it when layout settings change.
///
/// The array is built once on construction and replaced, never edited, on every
/// rebuild. Readers either take an [`Arc`] snapshot with [`spots`](Self::spots) and
/// keep it for a whole frame, or borrow one for the duration of a closure with
/// [`with_spots`](Self::with_spots). Either way they never see a half-built array.
///
/// Rebuilds happen synchronously on the thread that reports the change:
/// - [`on_setting_changed`](Self::on_setting_changed) for a single notification,
/// - [`process_pending_changes`](Self::process_pending_changes) to drain the
///   settings source's queue with at most one rebuild,
/// - [`refresh`](Self::refresh) to rebuild unconditionally.
///
/// Changes to settings outside the layout (see [`SettingsField::affects_layout`])
/// leave the published array untouched.
///
/// # Example
///
/// ```rust
/// use std::sync::Arc;
///
/// use border_spots::settings::{LayoutConfig, SettingChange, SettingsField, SettingsStore};
/// use border_spots::{FixedScreen, SpotSet};
///
/// let settings = Arc::new(SettingsStore::new(LayoutConfig {
///     spots_x: 4,
///     spots_y: 3,
///     ..LayoutConfig::DEFAULT
/// }));
/// let spot_set = SpotSet::builder()
///     .settings(Arc::clone(&settings))
///     .screen(FixedScreen::new(1920, 1080, 8))
///     .build()?;
/// assert_eq!(spot_set.spots().len(), 14);
///
/// // Unrelated settings do not rebuild the array.
/// let before = spot_set.spots();
/// settings.notify(SettingsField::ComPort);
/// assert!(!spot_set.process_pending_changes()?);
/// assert!(Arc::ptr_eq(&before, &spot_set.spots()));
///
/// // Layout settings do.
/// settings.apply(SettingChange::SpotsX(5));
/// assert!(spot_set.process_pending_changes()?);
/// assert_eq!(spot_set.spots().len(), 16);
/// # Ok::<(), border_spots::Error>(())
/// ```
pub struct SpotSet<S, M> {
    settings: S,
    screen: M,
    spots: Mutex<CriticalSectionRawMutex, RefCell<Arc<[Spot]>>>,
}

impl<S: SettingsSource, M: ScreenMetrics> SpotSet<S, M> {
    /// Start building a [`SpotSet`]. Both a settings source and screen metrics are required.
    #[must_use]
    pub const fn builder() -> SpotSetBuilder<S, M> {
        SpotSetBuilder::new()
    }

    /// Build a [`SpotSet`] from a settings source and screen metrics.
    ///
    /// # Errors
    ///
    /// Returns an error if the initial layout cannot be built.
    pub fn new(settings: S, screen: M) -> Result<Self> {
        Self::builder().settings(settings).screen(screen).build()
    }

    /// Snapshot of the current spot array. Hold it for the duration of one frame.
    #[must_use]
    pub fn spots(&self) -> Arc<[Spot]> {
        self.spots.lock(|spots| Arc::clone(&spots.borrow()))
    }

    /// Run `f` on a snapshot of the current spot array.
    ///
    /// The guard is released before `f` runs, so `f` may itself trigger a rebuild;
    /// it keeps seeing the array it was handed.
    pub fn with_spots<R>(&self, f: impl FnOnce(&[Spot]) -> R) -> R {
        let spots = self.spots();
        f(&spots)
    }

    /// Number of spots (and LEDs) in the current array.
    #[must_use]
    pub fn led_count(&self) -> usize {
        self.with_spots(<[Spot]>::len)
    }

    /// Size of the captured screen that spots are laid out on.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidScalingFactor`] when the screen reports a zero factor.
    pub fn expected_screen_size(&self) -> Result<Size> {
        self.screen.expected_size()
    }

    /// The settings source this set reads from.
    #[must_use]
    pub const fn settings(&self) -> &S {
        &self.settings
    }

    /// The screen metrics this set lays out against.
    #[must_use]
    pub const fn screen(&self) -> &M {
        &self.screen
    }

    /// React to a change notification for `field`.
    ///
    /// Returns whether the array was rebuilt.
    ///
    /// # Errors
    ///
    /// Returns an error if the new settings cannot be laid out; the previous array
    /// stays published.
    pub fn on_setting_changed(&self, field: SettingsField) -> Result<bool> {
        if !field.affects_layout() {
            debug!("SpotSet::on_setting_changed: ignoring {field:?}");
            return Ok(false);
        }
        self.refresh()?;
        Ok(true)
    }

    /// Drain the settings source's pending notifications and rebuild once if any of
    /// them affects the layout.
    ///
    /// Returns whether the array was rebuilt.
    ///
    /// # Errors
    ///
    /// Returns an error if the new settings cannot be laid out; the previous array
    /// stays published.
    pub fn process_pending_changes(&self) -> Result<bool> {
        let changes = self.settings.take_changes();
        if !changes.affects_layout() {
            if !changes.is_empty() {
                debug!("SpotSet::process_pending_changes: ignoring {changes:?}");
            }
            return Ok(false);
        }
        self.refresh()?;
        Ok(true)
    }

    /// Rebuild the spot array from the current settings and screen metrics.
    ///
    /// The guard is held while the new array is built, so concurrent rebuilds are
    /// serialized and readers see either the old or the new array.
    ///
    /// # Errors
    ///
    /// Returns an error if the settings cannot be laid out; the previous array stays
    /// published.
    pub fn refresh(&self) -> Result<()> {
        self.spots.lock(|spots| {
            let rebuilt = build_published(&self.settings, &self.screen).inspect_err(|err| {
                error!("SpotSet::refresh: keeping previous layout: {err}");
            })?;
            info!("SpotSet::refresh: rebuilt {} spots", rebuilt.len());
            *spots.borrow_mut() = rebuilt;
            Ok(())
        })
    }

    /// Mark every current spot as having no valid sample, for example when the
    /// screen cannot be captured. Geometry is unchanged.
    pub fn indicate_missing_values(&self) {
        self.with_spots(|spots| {
            for spot in spots {
                spot.indicate_missing_value();
            }
        });
    }
}

fn build_published<S: SettingsSource, M: ScreenMetrics>(
    settings: &S,
    screen: &M,
) -> Result<Arc<[Spot]>> {
    let config = settings.layout_config();
    let screen_size = screen.expected_size()?;
    let spots = build_spots(screen_size, &config, screen.scaling_factor())?;
    Ok(Arc::from(spots))
}

/// Builder for [`SpotSet`], returned by [`SpotSet::builder`].
pub struct SpotSetBuilder<S, M> {
    settings: Option<S>,
    screen: Option<M>,
}

impl<S: SettingsSource, M: ScreenMetrics> SpotSetBuilder<S, M> {
    /// A builder with nothing set.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            settings: None,
            screen: None,
        }
    }

    /// Set the settings source.
    #[must_use]
    pub fn settings(mut self, settings: S) -> Self {
        self.settings = Some(settings);
        self
    }

    /// Set the screen metrics.
    #[must_use]
    pub fn screen(mut self, screen: M) -> Self {
        self.screen = Some(screen);
        self
    }

    /// Build the set and its initial spot array.
    ///
    /// Notifications already queued in the settings source are discarded; the
    /// initial array reflects them.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingSettings`] or [`Error::MissingScreenMetrics`] when a
    /// part was not supplied, or the layout error if the initial array cannot be built.
    pub fn build(self) -> Result<SpotSet<S, M>> {
        let settings = self.settings.ok_or(Error::MissingSettings)?;
        let screen = self.screen.ok_or(Error::MissingScreenMetrics)?;

        let stale = settings.take_changes();
        let spots = build_published(&settings, &screen)?;
        info!(
            "SpotSet::new: created with {} spots (discarded {:?})",
            spots.len(),
            stale
        );

        Ok(SpotSet {
            settings,
            screen,
            spots: Mutex::new(RefCell::new(spots)),
        })
    }
}

impl<S: SettingsSource, M: ScreenMetrics> Default for SpotSetBuilder<S, M> {
    fn default() -> Self {
        Self::new()
    }
}
