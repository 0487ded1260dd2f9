#![allow(missing_docs)]
//! Host-level tests for layout settings and change notifications.

use border_spots::settings::{ChangeSet, SETTINGS_CHANGE_CAPACITY};
use border_spots::{Error, LayoutConfig, SettingChange, SettingsField, SettingsSource, SettingsStore};

#[test]
fn default_config_is_an_eleven_by_six_ring() {
    let config = LayoutConfig::default();
    assert_eq!(config, LayoutConfig::DEFAULT);
    assert_eq!(config.led_count(), 34);
    assert_eq!(config.validate(), Ok(()));
}

#[test]
fn validate_reports_the_offending_field() {
    let zero_x = LayoutConfig {
        spots_x: 0,
        ..LayoutConfig::DEFAULT
    };
    assert_eq!(
        zero_x.validate(),
        Err(Error::InvalidCount {
            name: "spots_x",
            value: 0,
        })
    );

    let narrow = LayoutConfig {
        spot_width: -3,
        ..LayoutConfig::DEFAULT
    };
    assert_eq!(
        narrow.validate(),
        Err(Error::NegativeSpotSize {
            name: "spot_width",
            value: -3,
        })
    );

    // negative insets and offsets are fine
    let shifted = LayoutConfig {
        border_distance_x: -10,
        offset_led: -4,
        ..LayoutConfig::DEFAULT
    };
    assert_eq!(shifted.validate(), Ok(()));
}

#[test]
fn apply_writes_one_field() {
    let mut config = LayoutConfig::DEFAULT;
    config.apply(SettingChange::OffsetLed(-3));
    config.apply(SettingChange::MirrorY(true));

    assert_eq!(
        config,
        LayoutConfig {
            offset_led: -3,
            mirror_y: true,
            ..LayoutConfig::DEFAULT
        }
    );
    assert_eq!(
        LayoutConfig::DEFAULT.changed_fields(&config),
        [SettingsField::OffsetLed, SettingsField::MirrorY]
            .into_iter()
            .collect::<ChangeSet>()
    );
}

#[test]
fn every_change_names_a_layout_field() {
    let changes = [
        SettingChange::SpotsX(1),
        SettingChange::SpotsY(1),
        SettingChange::BorderDistanceX(1),
        SettingChange::BorderDistanceY(1),
        SettingChange::SpotWidth(1),
        SettingChange::SpotHeight(1),
        SettingChange::OffsetLed(1),
        SettingChange::MirrorX(true),
        SettingChange::MirrorY(true),
    ];
    let fields: ChangeSet = changes.iter().map(|change| change.field()).collect();
    assert_eq!(fields, SettingsField::LAYOUT.into_iter().collect::<ChangeSet>());
    assert!(changes.iter().all(|change| change.field().affects_layout()));
}

#[test]
fn only_layout_fields_affect_layout() {
    let layout: Vec<_> = SettingsField::ALL
        .into_iter()
        .filter(|field| field.affects_layout())
        .collect();
    assert_eq!(layout, SettingsField::LAYOUT);

    for field in [
        SettingsField::TransferActive,
        SettingsField::ComPort,
        SettingsField::SaturationThreshold,
        SettingsField::UseLinearLighting,
        SettingsField::LimitFps,
        SettingsField::WhitebalanceRed,
        SettingsField::WhitebalanceGreen,
        SettingsField::WhitebalanceBlue,
    ] {
        assert!(!field.affects_layout(), "{field:?}");
        assert!(!ChangeSet::EMPTY.with(field).affects_layout(), "{field:?}");
    }
}

#[test]
fn change_set_operations() {
    let mut changes = ChangeSet::EMPTY;
    assert!(changes.is_empty());
    assert!(!changes.affects_layout());

    changes.insert(SettingsField::LimitFps);
    changes.insert(SettingsField::ComPort);
    changes.insert(SettingsField::ComPort);
    assert!(!changes.is_empty());
    assert!(!changes.affects_layout());
    assert!(changes.contains(SettingsField::ComPort));
    assert!(!changes.contains(SettingsField::SpotsX));

    let changes = changes.with(SettingsField::SpotsY);
    assert!(changes.affects_layout());
    // declaration order, no duplicates
    assert_eq!(
        changes.iter().collect::<Vec<_>>(),
        [SettingsField::SpotsY, SettingsField::ComPort, SettingsField::LimitFps]
    );

    assert_eq!(ChangeSet::ALL.iter().collect::<Vec<_>>(), SettingsField::ALL);
    assert!(ChangeSet::ALL.affects_layout());
    assert_eq!(ChangeSet::default(), ChangeSet::EMPTY);
}

#[test]
fn store_queues_a_notification_per_change() {
    let store = SettingsStore::new(LayoutConfig::DEFAULT);
    assert!(store.take_changes().is_empty());

    store.apply(SettingChange::SpotsX(4));
    store.apply(SettingChange::SpotsX(5));
    store.notify(SettingsField::WhitebalanceRed);

    assert_eq!(store.config().spots_x, 5);
    let changes = store.take_changes();
    assert_eq!(
        changes.iter().collect::<Vec<_>>(),
        [SettingsField::SpotsX, SettingsField::WhitebalanceRed]
    );
    assert!(store.take_changes().is_empty());
}

#[test]
fn replace_notifies_only_changed_fields() {
    let store = SettingsStore::default();
    store.replace(LayoutConfig {
        spots_y: 9,
        mirror_x: true,
        ..LayoutConfig::DEFAULT
    });
    assert_eq!(
        store.take_changes().iter().collect::<Vec<_>>(),
        [SettingsField::MirrorX, SettingsField::SpotsY]
    );

    store.replace(store.config());
    assert!(store.take_changes().is_empty());
}

#[test]
fn full_queue_reports_every_field() {
    let store = SettingsStore::default();
    for _ in 0..=SETTINGS_CHANGE_CAPACITY {
        store.notify(SettingsField::ComPort);
    }
    assert_eq!(store.take_changes(), ChangeSet::ALL);

    // the overflow marker is cleared by the drain
    store.notify(SettingsField::LimitFps);
    assert_eq!(
        store.take_changes(),
        ChangeSet::EMPTY.with(SettingsField::LimitFps)
    );
}

#[test]
fn static_config_is_a_source_without_changes() {
    let config = LayoutConfig {
        spots_x: 3,
        ..LayoutConfig::DEFAULT
    };
    assert_eq!(config.layout_config(), config);
    assert!(SettingsSource::take_changes(&config).is_empty());

    let store = SettingsStore::new(config);
    let by_ref = &store;
    by_ref.apply(SettingChange::SpotsY(2));
    assert_eq!(by_ref.layout_config().spots_y, 2);
    assert!(SettingsSource::take_changes(&by_ref).contains(SettingsField::SpotsY));
}

#[test]
fn config_survives_postcard_round_trip() {
    let config = LayoutConfig {
        spots_x: 24,
        spots_y: 14,
        border_distance_x: -20,
        border_distance_y: 60,
        spot_width: 120,
        spot_height: 90,
        offset_led: -7,
        mirror_x: true,
        mirror_y: false,
    };
    let bytes = postcard::to_allocvec(&config).expect("serialize");
    let decoded: LayoutConfig = postcard::from_bytes(&bytes).expect("deserialize");
    assert_eq!(decoded, config);
}
