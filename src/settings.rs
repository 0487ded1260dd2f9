//! Layout configuration and the change notifications that drive recomputes.
//!
//! [`LayoutConfig`] is the snapshot the layout engine reads. A [`SettingsSource`]
//! hands out that snapshot plus the set of fields changed since it was last asked.
//! [`SettingsStore`] is a ready-made source that can live in a `static`.

use alloc::sync::Arc;
use core::cell::RefCell;

use embassy_sync::blocking_mutex::Mutex;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use log::warn;
use portable_atomic::{AtomicBool, Ordering};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Number of change notifications a [`SettingsStore`] queues between drains.
pub const SETTINGS_CHANGE_CAPACITY: usize = 16;

// ============================================================================
// LayoutConfig
// ============================================================================

/// Snapshot of the nine settings that determine the spot layout.
///
/// Linear measurements are in UI units; the layout divides them by the screen's
/// scaling factor before use.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LayoutConfig {
    /// Number of spots along the top and bottom edges.
    pub spots_x: u16,
    /// Number of spots along the left and right edges.
    pub spots_y: u16,
    /// Inset of the outermost spots from the left and right screen edges.
    pub border_distance_x: i32,
    /// Inset of the outermost spots from the top and bottom screen edges.
    pub border_distance_y: i32,
    /// Width of each sampled box.
    pub spot_width: i32,
    /// Height of each sampled box.
    pub spot_height: i32,
    /// Number of slots the clockwise sequence is rotated by. May be negative.
    pub offset_led: i32,
    /// Flip the layout top-to-bottom.
    pub mirror_x: bool,
    /// Flip the layout left-to-right.
    pub mirror_y: bool,
}

impl LayoutConfig {
    /// Settings used when nothing else is configured: an 11×6 ring of 150×150 spots.
    pub const DEFAULT: Self = Self {
        spots_x: 11,
        spots_y: 6,
        border_distance_x: 0,
        border_distance_y: 100,
        spot_width: 150,
        spot_height: 150,
        offset_led: 0,
        mirror_x: false,
        mirror_y: false,
    };

    /// Number of LEDs (and spots) this configuration lays out.
    #[must_use]
    pub fn led_count(&self) -> usize {
        crate::layout::led_count(usize::from(self.spots_x), usize::from(self.spots_y))
    }

    /// Check the values the layout cannot work with.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidCount`] for a zero spot count and
    /// [`Error::NegativeSpotSize`] for a negative spot width or height.
    pub const fn validate(&self) -> Result<()> {
        if self.spots_x == 0 {
            return Err(Error::InvalidCount {
                name: "spots_x",
                value: 0,
            });
        }
        if self.spots_y == 0 {
            return Err(Error::InvalidCount {
                name: "spots_y",
                value: 0,
            });
        }
        if self.spot_width < 0 {
            return Err(Error::NegativeSpotSize {
                name: "spot_width",
                value: self.spot_width,
            });
        }
        if self.spot_height < 0 {
            return Err(Error::NegativeSpotSize {
                name: "spot_height",
                value: self.spot_height,
            });
        }
        Ok(())
    }

    /// Write a single-field change into this snapshot.
    pub const fn apply(&mut self, change: SettingChange) {
        match change {
            SettingChange::SpotsX(value) => self.spots_x = value,
            SettingChange::SpotsY(value) => self.spots_y = value,
            SettingChange::BorderDistanceX(value) => self.border_distance_x = value,
            SettingChange::BorderDistanceY(value) => self.border_distance_y = value,
            SettingChange::SpotWidth(value) => self.spot_width = value,
            SettingChange::SpotHeight(value) => self.spot_height = value,
            SettingChange::OffsetLed(value) => self.offset_led = value,
            SettingChange::MirrorX(value) => self.mirror_x = value,
            SettingChange::MirrorY(value) => self.mirror_y = value,
        }
    }

    /// Fields whose values differ between `self` and `other`.
    #[must_use]
    pub const fn changed_fields(&self, other: &Self) -> ChangeSet {
        let mut changes = ChangeSet::EMPTY;
        if self.spots_x != other.spots_x {
            changes = changes.with(SettingsField::SpotsX);
        }
        if self.spots_y != other.spots_y {
            changes = changes.with(SettingsField::SpotsY);
        }
        if self.border_distance_x != other.border_distance_x {
            changes = changes.with(SettingsField::BorderDistanceX);
        }
        if self.border_distance_y != other.border_distance_y {
            changes = changes.with(SettingsField::BorderDistanceY);
        }
        if self.spot_width != other.spot_width {
            changes = changes.with(SettingsField::SpotWidth);
        }
        if self.spot_height != other.spot_height {
            changes = changes.with(SettingsField::SpotHeight);
        }
        if self.offset_led != other.offset_led {
            changes = changes.with(SettingsField::OffsetLed);
        }
        if self.mirror_x != other.mirror_x {
            changes = changes.with(SettingsField::MirrorX);
        }
        if self.mirror_y != other.mirror_y {
            changes = changes.with(SettingsField::MirrorY);
        }
        changes
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

// ============================================================================
// SettingsField / SettingChange
// ============================================================================

/// Identifies one application setting in a change notification.
///
/// Only the first nine variants influence the layout; the rest belong to other
/// parts of the application and are ignored by [`SpotSet`](crate::SpotSet).
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SettingsField {
    /// [`LayoutConfig::border_distance_x`].
    BorderDistanceX,
    /// [`LayoutConfig::border_distance_y`].
    BorderDistanceY,
    /// [`LayoutConfig::mirror_x`].
    MirrorX,
    /// [`LayoutConfig::mirror_y`].
    MirrorY,
    /// [`LayoutConfig::offset_led`].
    OffsetLed,
    /// [`LayoutConfig::spot_height`].
    SpotHeight,
    /// [`LayoutConfig::spots_x`].
    SpotsX,
    /// [`LayoutConfig::spots_y`].
    SpotsY,
    /// [`LayoutConfig::spot_width`].
    SpotWidth,
    /// Whether colors are being sent to the strip.
    TransferActive,
    /// Serial port the strip controller is attached to.
    ComPort,
    /// Minimum saturation before a color is boosted.
    SaturationThreshold,
    /// Gamma handling of sampled colors.
    UseLinearLighting,
    /// Frame-rate cap of the capture loop.
    LimitFps,
    /// White balance, red channel.
    WhitebalanceRed,
    /// White balance, green channel.
    WhitebalanceGreen,
    /// White balance, blue channel.
    WhitebalanceBlue,
}

impl SettingsField {
    /// Every field, in declaration order.
    pub const ALL: [Self; 17] = [
        Self::BorderDistanceX,
        Self::BorderDistanceY,
        Self::MirrorX,
        Self::MirrorY,
        Self::OffsetLed,
        Self::SpotHeight,
        Self::SpotsX,
        Self::SpotsY,
        Self::SpotWidth,
        Self::TransferActive,
        Self::ComPort,
        Self::SaturationThreshold,
        Self::UseLinearLighting,
        Self::LimitFps,
        Self::WhitebalanceRed,
        Self::WhitebalanceGreen,
        Self::WhitebalanceBlue,
    ];

    /// The fields that trigger a layout recompute.
    pub const LAYOUT: [Self; 9] = [
        Self::BorderDistanceX,
        Self::BorderDistanceY,
        Self::MirrorX,
        Self::MirrorY,
        Self::OffsetLed,
        Self::SpotHeight,
        Self::SpotsX,
        Self::SpotsY,
        Self::SpotWidth,
    ];

    /// Whether a change to this field requires the spots to be rebuilt.
    #[must_use]
    pub const fn affects_layout(self) -> bool {
        matches!(
            self,
            Self::BorderDistanceX
                | Self::BorderDistanceY
                | Self::MirrorX
                | Self::MirrorY
                | Self::OffsetLed
                | Self::SpotHeight
                | Self::SpotsX
                | Self::SpotsY
                | Self::SpotWidth
        )
    }

    const fn bit(self) -> u32 {
        match 1_u32.checked_shl(self as u32) {
            Some(bit) => bit,
            None => 0,
        }
    }

    /// Union of the bits of `fields`.
    const fn mask(fields: &[Self]) -> u32 {
        match fields {
            [] => 0,
            [first, rest @ ..] => first.bit() | Self::mask(rest),
        }
    }
}

/// A new value for one layout field.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[allow(missing_docs, reason = "each variant carries the field of the same name")]
pub enum SettingChange {
    SpotsX(u16),
    SpotsY(u16),
    BorderDistanceX(i32),
    BorderDistanceY(i32),
    SpotWidth(i32),
    SpotHeight(i32),
    OffsetLed(i32),
    MirrorX(bool),
    MirrorY(bool),
}

impl SettingChange {
    /// The field this change writes.
    #[must_use]
    pub const fn field(self) -> SettingsField {
        match self {
            Self::SpotsX(_) => SettingsField::SpotsX,
            Self::SpotsY(_) => SettingsField::SpotsY,
            Self::BorderDistanceX(_) => SettingsField::BorderDistanceX,
            Self::BorderDistanceY(_) => SettingsField::BorderDistanceY,
            Self::SpotWidth(_) => SettingsField::SpotWidth,
            Self::SpotHeight(_) => SettingsField::SpotHeight,
            Self::OffsetLed(_) => SettingsField::OffsetLed,
            Self::MirrorX(_) => SettingsField::MirrorX,
            Self::MirrorY(_) => SettingsField::MirrorY,
        }
    }
}

// ============================================================================
// ChangeSet
// ============================================================================

/// Set of [`SettingsField`]s reported changed by a [`SettingsSource`].
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ChangeSet(u32);

impl ChangeSet {
    /// No changes.
    pub const EMPTY: Self = Self(0);

    /// Every field changed. Reported after notifications were lost.
    pub const ALL: Self = Self(SettingsField::mask(&SettingsField::ALL));

    const LAYOUT_MASK: u32 = SettingsField::mask(&SettingsField::LAYOUT);

    /// This set plus `field`.
    #[must_use]
    pub const fn with(self, field: SettingsField) -> Self {
        Self(self.0 | field.bit())
    }

    /// Add `field` to the set.
    pub const fn insert(&mut self, field: SettingsField) {
        self.0 |= field.bit();
    }

    /// Whether `field` is in the set.
    #[must_use]
    pub const fn contains(self, field: SettingsField) -> bool {
        self.0 & field.bit() != 0
    }

    /// Whether the set is empty.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Whether any field in the set requires a layout recompute.
    #[must_use]
    pub const fn affects_layout(self) -> bool {
        self.0 & Self::LAYOUT_MASK != 0
    }

    /// The fields in the set, in declaration order.
    pub fn iter(self) -> impl Iterator<Item = SettingsField> {
        SettingsField::ALL
            .into_iter()
            .filter(move |field| self.contains(*field))
    }
}

impl FromIterator<SettingsField> for ChangeSet {
    fn from_iter<I: IntoIterator<Item = SettingsField>>(iter: I) -> Self {
        iter.into_iter().fold(Self::EMPTY, Self::with)
    }
}

// ============================================================================
// SettingsSource
// ============================================================================

/// Where a [`SpotSet`](crate::SpotSet) reads its configuration from.
pub trait SettingsSource {
    /// The current layout settings.
    fn layout_config(&self) -> LayoutConfig;

    /// Fields changed since the previous call. Sources without change tracking
    /// report nothing; callers then refresh explicitly.
    fn take_changes(&self) -> ChangeSet {
        ChangeSet::EMPTY
    }
}

impl SettingsSource for LayoutConfig {
    fn layout_config(&self) -> LayoutConfig {
        *self
    }
}

impl<T: SettingsSource + ?Sized> SettingsSource for &T {
    fn layout_config(&self) -> LayoutConfig {
        (**self).layout_config()
    }

    fn take_changes(&self) -> ChangeSet {
        (**self).take_changes()
    }
}

impl<T: SettingsSource + ?Sized> SettingsSource for Arc<T> {
    fn layout_config(&self) -> LayoutConfig {
        (**self).layout_config()
    }

    fn take_changes(&self) -> ChangeSet {
        (**self).take_changes()
    }
}

// ============================================================================
// SettingsStore
// ============================================================================

/// Shared, mutable [`SettingsSource`] that queues a notification for every change.
///
/// Writers call [`apply`](Self::apply) (or [`notify`](Self::notify) for settings
/// kept elsewhere); the owning [`SpotSet`](crate::SpotSet) drains the queue with
/// [`process_pending_changes`](crate::SpotSet::process_pending_changes).
///
/// ```rust
/// use border_spots::settings::{LayoutConfig, SettingChange, SettingsField, SettingsStore};
///
/// static SETTINGS: SettingsStore = SettingsStore::new(LayoutConfig::DEFAULT);
///
/// SETTINGS.apply(SettingChange::SpotsX(20));
/// SETTINGS.notify(SettingsField::ComPort);
///
/// let changes = SETTINGS.take_changes();
/// assert!(changes.contains(SettingsField::SpotsX));
/// assert!(changes.contains(SettingsField::ComPort));
/// assert_eq!(SETTINGS.config().spots_x, 20);
/// assert!(SETTINGS.take_changes().is_empty());
/// ```
pub struct SettingsStore {
    config: Mutex<CriticalSectionRawMutex, RefCell<LayoutConfig>>,
    changes: Channel<CriticalSectionRawMutex, SettingsField, SETTINGS_CHANGE_CAPACITY>,
    overflowed: AtomicBool,
}

impl SettingsStore {
    /// Create a store holding `config` with an empty change queue.
    #[must_use]
    pub const fn new(config: LayoutConfig) -> Self {
        Self {
            config: Mutex::new(RefCell::new(config)),
            changes: Channel::new(),
            overflowed: AtomicBool::new(false),
        }
    }

    /// Copy of the current settings.
    #[must_use]
    pub fn config(&self) -> LayoutConfig {
        self.config.lock(|config| *config.borrow())
    }

    /// Apply a single-field change and queue its notification.
    pub fn apply(&self, change: SettingChange) {
        self.config
            .lock(|config| config.borrow_mut().apply(change));
        self.notify(change.field());
    }

    /// Replace all settings, queueing a notification for each field that changed.
    pub fn replace(&self, new_config: LayoutConfig) {
        let changes = self
            .config
            .lock(|config| config.replace(new_config).changed_fields(&new_config));
        for field in changes.iter() {
            self.notify(field);
        }
    }

    /// Queue a change notification for `field` without touching the stored settings.
    ///
    /// When the queue is full the notification is folded into an overflow marker,
    /// and the next [`take_changes`](Self::take_changes) reports every field.
    pub fn notify(&self, field: SettingsField) {
        if self.changes.try_send(field).is_err() {
            warn!("SettingsStore::notify: change queue full, dropping {field:?}");
            self.overflowed.store(true, Ordering::Release);
        }
    }

    /// Drain queued notifications.
    #[must_use]
    pub fn take_changes(&self) -> ChangeSet {
        let mut changes = if self.overflowed.swap(false, Ordering::AcqRel) {
            ChangeSet::ALL
        } else {
            ChangeSet::EMPTY
        };
        while let Ok(field) = self.changes.try_receive() {
            changes.insert(field);
        }
        changes
    }
}

impl Default for SettingsStore {
    fn default() -> Self {
        Self::new(LayoutConfig::DEFAULT)
    }
}

impl SettingsSource for SettingsStore {
    fn layout_config(&self) -> LayoutConfig {
        self.config()
    }

    fn take_changes(&self) -> ChangeSet {
        Self::take_changes(self)
    }
}
