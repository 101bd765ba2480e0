//! # Collection Scenario Tests
//!
//! Drives the collector through an in-memory fake platform, so every device
//! failure mode can be exercised without real hardware.
//!
//! ## Scenarios
//! - C0: Fatal conditions
//! - C1: Device enumeration and skipping
//! - C2: End to end (collect, then classify)
//! - C3: Prefix-noise invariance (property-based)

use freedom_core::{
    Collector, CollectorConfig, CollectionError, FreedomCode, GraphicsDevice, HostIdentity,
    Platform, SystemData, classify,
};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};
use std::rc::Rc;

// DRM connector-type codes used below.
const VGA: u32 = 1;
const DISPLAY_PORT: u32 = 10;
const HDMI_A: u32 = 11;

// =============================================================================
// FAKE PLATFORM
// =============================================================================

#[derive(Clone, Default)]
struct FakeCard {
    char_device: bool,
    openable: bool,
    /// `None` means the resource query fails.
    connector_ids: Option<Vec<u32>>,
    /// Connector id -> type; missing ids fail their detail query.
    connector_types: BTreeMap<u32, u32>,
}

impl FakeCard {
    fn with_connectors(types: &[u32]) -> Self {
        let ids: Vec<u32> = (0..types.len() as u32).map(|i| 30 + i).collect();
        Self {
            char_device: true,
            openable: true,
            connector_types: ids.iter().copied().zip(types.iter().copied()).collect(),
            connector_ids: Some(ids),
        }
    }
}

struct FakeDevice {
    name: String,
    card: FakeCard,
    events: Rc<RefCell<Vec<String>>>,
}

impl Drop for FakeDevice {
    fn drop(&mut self) {
        self.events.borrow_mut().push(format!("close {}", self.name));
    }
}

impl GraphicsDevice for FakeDevice {
    fn connector_ids(&self) -> io::Result<Vec<u32>> {
        self.card
            .connector_ids
            .clone()
            .ok_or_else(|| io::Error::from(io::ErrorKind::Unsupported))
    }

    fn connector_type(&self, connector_id: u32) -> io::Result<u32> {
        self.card
            .connector_types
            .get(&connector_id)
            .copied()
            .ok_or_else(|| io::Error::from(io::ErrorKind::NotFound))
    }
}

#[derive(Default)]
struct FakePlatform {
    identity: Option<HostIdentity>,
    /// `None` means the directory cannot be opened.
    entries: Option<Vec<String>>,
    cards: BTreeMap<String, FakeCard>,
    events: Rc<RefCell<Vec<String>>>,
}

impl FakePlatform {
    fn linux() -> Self {
        Self {
            identity: Some(HostIdentity::new("Linux", "x86_64")),
            entries: Some(Vec::new()),
            ..Self::default()
        }
    }

    fn with_entry(mut self, name: &str) -> Self {
        self.entries.get_or_insert_with(Vec::new).push(name.to_string());
        self
    }

    fn with_card(mut self, name: &str, card: FakeCard) -> Self {
        self.cards.insert(name.to_string(), card);
        self.with_entry(name)
    }

    fn card_name(path: &Path) -> String {
        path.file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

impl Platform for FakePlatform {
    type Device = FakeDevice;

    fn host_identity(&self) -> io::Result<HostIdentity> {
        self.identity
            .clone()
            .ok_or_else(|| io::Error::from(io::ErrorKind::Other))
    }

    fn list_dir(&self, _dir: &Path) -> io::Result<Vec<OsString>> {
        self.entries
            .as_ref()
            .map(|names| names.iter().map(OsString::from).collect())
            .ok_or_else(|| io::Error::from(io::ErrorKind::NotFound))
    }

    fn is_char_device(&self, path: &Path) -> bool {
        self.cards
            .get(&Self::card_name(path))
            .is_some_and(|card| card.char_device)
    }

    fn open_device(&self, path: &Path) -> io::Result<FakeDevice> {
        let name = Self::card_name(path);
        match self.cards.get(&name) {
            Some(card) if card.openable => {
                self.events.borrow_mut().push(format!("open {name}"));
                Ok(FakeDevice {
                    name,
                    card: card.clone(),
                    events: Rc::clone(&self.events),
                })
            }
            _ => Err(io::Error::from(io::ErrorKind::PermissionDenied)),
        }
    }
}

fn collect(platform: FakePlatform) -> Result<SystemData, CollectionError> {
    Collector::new(platform, CollectorConfig::default()).collect()
}

// =============================================================================
// C0: FATAL CONDITIONS
// =============================================================================

mod c0_fatal {
    use super::*;

    /// C0.1: Identity failure aborts with no data.
    #[test]
    fn identity_failure_is_fatal() {
        let platform = FakePlatform {
            identity: None,
            ..FakePlatform::linux()
        }
        .with_card("card0", FakeCard::with_connectors(&[HDMI_A]));

        let result = collect(platform);
        assert!(matches!(result, Err(CollectionError::IdentityUnavailable(_))));
    }

    /// C0.2: Missing device directory aborts before any traversal.
    #[test]
    fn missing_directory_is_fatal() {
        let platform = FakePlatform {
            entries: None,
            ..FakePlatform::linux()
        };
        let events = Rc::clone(&platform.events);

        let result = collect(platform);
        assert!(matches!(
            result,
            Err(CollectionError::DeviceDirectoryUnavailable { .. })
        ));
        assert!(events.borrow().is_empty());
    }

    /// C0.3: The directory error names the configured path.
    #[test]
    fn directory_error_names_configured_path() {
        let platform = FakePlatform {
            entries: None,
            ..FakePlatform::linux()
        };
        let config = CollectorConfig {
            device_dir: PathBuf::from("/custom/dri"),
            ..CollectorConfig::default()
        };

        let err = Collector::new(platform, config)
            .collect()
            .expect_err("directory should be unavailable");
        assert!(err.to_string().contains("/custom/dri"));
    }
}

// =============================================================================
// C1: ENUMERATION AND SKIPPING
// =============================================================================

mod c1_enumeration {
    use super::*;

    /// C1.1: An empty directory yields no connectors.
    #[test]
    fn empty_directory_yields_no_connectors() {
        let data = collect(FakePlatform::linux()).expect("collect");
        assert_eq!(data.os_name(), "Linux");
        assert_eq!(data.architecture(), "x86_64");
        assert!(data.connector_types().is_empty());
    }

    /// C1.2: Entries without the card prefix never influence the output.
    #[test]
    fn non_matching_entries_are_ignored() {
        // A real render node is a character device with connectors too.
        let render_node = FakeCard::with_connectors(&[VGA, VGA]);

        let noisy = FakePlatform::linux()
            .with_card("card0", FakeCard::with_connectors(&[HDMI_A]))
            .with_card("renderD128", render_node)
            .with_entry("by-path")
            .with_entry("controlD64");
        let quiet =
            FakePlatform::linux().with_card("card0", FakeCard::with_connectors(&[HDMI_A]));

        assert_eq!(collect(noisy).expect("noisy"), collect(quiet).expect("quiet"));
    }

    /// C1.3: A card entry that is not a character device is skipped.
    #[test]
    fn regular_file_card_is_skipped() {
        let mut fake = FakeCard::with_connectors(&[HDMI_A]);
        fake.char_device = false;
        let platform = FakePlatform::linux().with_card("card0", fake);

        let data = collect(platform).expect("collect");
        assert!(data.connector_types().is_empty());
    }

    /// C1.4: A card that cannot be opened does not stop the others.
    #[test]
    fn unopenable_card_is_skipped() {
        let mut locked = FakeCard::with_connectors(&[VGA]);
        locked.openable = false;
        let platform = FakePlatform::linux()
            .with_card("card0", locked)
            .with_card("card1", FakeCard::with_connectors(&[DISPLAY_PORT]));

        let data = collect(platform).expect("collect");
        assert_eq!(data.connector_types(), &[DISPLAY_PORT]);
    }

    /// C1.5: A failed resource query skips only that card.
    #[test]
    fn resource_query_failure_is_skipped() {
        let mut no_kms = FakeCard::with_connectors(&[VGA]);
        no_kms.connector_ids = None;
        let platform = FakePlatform::linux()
            .with_card("card0", FakeCard::with_connectors(&[HDMI_A]))
            .with_card("card1", no_kms);

        let data = collect(platform).expect("collect");
        assert_eq!(data.connector_types(), &[HDMI_A]);
    }

    /// C1.6: A failed connector query drops that slot, no sentinel.
    #[test]
    fn failed_connector_query_drops_slot() {
        let mut card = FakeCard::with_connectors(&[HDMI_A, VGA, DISPLAY_PORT]);
        card.connector_types.remove(&31);
        let platform = FakePlatform::linux().with_card("card0", card);

        let data = collect(platform).expect("collect");
        assert_eq!(data.connector_types(), &[HDMI_A, DISPLAY_PORT]);
        assert_eq!(data.connector_count(), 2);
    }

    /// C1.7: Connectors accumulate across cards, in card-name order.
    #[test]
    fn connectors_accumulate_in_name_order() {
        let platform = FakePlatform::linux()
            .with_card("card1", FakeCard::with_connectors(&[VGA]))
            .with_card("card0", FakeCard::with_connectors(&[HDMI_A, DISPLAY_PORT]));

        let data = collect(platform).expect("collect");
        assert_eq!(data.connector_types(), &[HDMI_A, DISPLAY_PORT, VGA]);
    }

    /// C1.8: Each device is closed before the next one is opened.
    #[test]
    fn devices_closed_before_next_open() {
        let platform = FakePlatform::linux()
            .with_card("card0", FakeCard::with_connectors(&[HDMI_A]))
            .with_card("card1", FakeCard::with_connectors(&[VGA]));
        let events = Rc::clone(&platform.events);

        collect(platform).expect("collect");
        assert_eq!(
            *events.borrow(),
            vec!["open card0", "close card0", "open card1", "close card1"]
        );
    }

    /// C1.9: A custom prefix selects different entries.
    #[test]
    fn custom_prefix() {
        let platform = FakePlatform::linux()
            .with_card("card0", FakeCard::with_connectors(&[VGA]))
            .with_card("fb0", FakeCard::with_connectors(&[HDMI_A]));
        let config = CollectorConfig {
            card_prefix: "fb".to_string(),
            ..CollectorConfig::default()
        };

        let data = Collector::new(platform, config).collect().expect("collect");
        assert_eq!(data.connector_types(), &[HDMI_A]);
    }

    /// C1.10: Overlong identity strings are truncated, not rejected.
    #[test]
    fn identity_truncated_silently() {
        let platform = FakePlatform {
            identity: Some(HostIdentity::new("L".repeat(300), "a".repeat(100))),
            ..FakePlatform::linux()
        };

        let data = collect(platform).expect("collect");
        assert_eq!(data.os_name().chars().count(), 128);
        assert_eq!(data.architecture().chars().count(), 32);
    }
}

// =============================================================================
// C2: END TO END
// =============================================================================

mod c2_end_to_end {
    use super::*;

    /// C2.1: One card with HDMI and VGA on x86_64 Linux.
    #[test]
    fn linux_x86_64_with_hdmi_and_vga() {
        let platform =
            FakePlatform::linux().with_card("card0", FakeCard::with_connectors(&[HDMI_A, VGA]));

        let data = collect(platform).expect("collect");
        assert_eq!(data, SystemData::new("Linux", "x86_64", "", vec![HDMI_A, VGA]));

        let freedom = classify(&data).expect("classify");
        assert_eq!(freedom.os, FreedomCode::Open);
        // "x86_64" is not the exact table key "x86".
        assert_eq!(freedom.architecture, FreedomCode::Unknown);
        assert_eq!(freedom.firmware, FreedomCode::Unknown);
        assert!(freedom.connectors.is_empty());
    }

    /// C2.2: Caller-supplied firmware flows through to classification.
    #[test]
    fn caller_firmware_is_classified() {
        let config = CollectorConfig {
            firmware: Some("Coreboot".to_string()),
            ..CollectorConfig::default()
        };
        let data = Collector::new(FakePlatform::linux(), config)
            .collect()
            .expect("collect");

        assert_eq!(classify(&data).expect("classify").firmware, FreedomCode::Open);
    }

    /// C2.3: Collected records survive a JSON round trip unchanged.
    #[test]
    fn system_data_json_roundtrip() {
        let platform =
            FakePlatform::linux().with_card("card0", FakeCard::with_connectors(&[DISPLAY_PORT]));
        let data = collect(platform).expect("collect");

        let json = serde_json::to_string(&data).expect("serialize");
        let back: SystemData = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, data);
    }
}

// =============================================================================
// C3: PREFIX-NOISE INVARIANCE
// =============================================================================

mod c3_prefix_noise {
    use super::*;
    use proptest::collection::vec;
    use proptest::prelude::*;

    fn with_real_cards(platform: FakePlatform) -> FakePlatform {
        platform
            .with_card("card0", FakeCard::with_connectors(&[HDMI_A]))
            .with_card("card1", FakeCard::with_connectors(&[VGA, DISPLAY_PORT]))
    }

    proptest! {
        /// C3.1: Extra entries without the card prefix, even DRM-capable
        /// character devices, leave the collected record unchanged.
        #[test]
        fn non_card_entries_never_change_output(
            noise in vec(
                (
                    "[a-zA-Z0-9_.-]{1,12}".prop_filter("must not carry the card prefix", |n| {
                        !n.starts_with("card")
                    }),
                    vec(0u32..21, 0..4),
                ),
                0..8,
            )
        ) {
            let baseline = collect(with_real_cards(FakePlatform::linux())).expect("baseline");

            let mut noisy = FakePlatform::linux();
            for (name, connectors) in &noise {
                noisy = noisy.with_card(name, FakeCard::with_connectors(connectors));
            }
            let noisy = collect(with_real_cards(noisy)).expect("noisy");

            prop_assert_eq!(noisy, baseline);
        }
    }
}
