//! # freedom-core
//!
//! How much of this machine's stack is openly specified or open source?
//!
//! The crate answers in two stages:
//! - [`Collector`] queries host identity and enumerates display connectors
//!   exposed by the kernel's graphics devices, producing a [`SystemData`].
//! - [`Classifier`] maps those raw facts through a [`FreedomPolicy`] lookup
//!   table into per-category [`FreedomCode`]s, producing a [`SystemFreedom`].
//!
//! ## Architectural Constraints
//!
//! - Synchronous, single-threaded, blocking I/O only in the collector
//! - The classifier performs no I/O and holds no state between calls
//! - Host access is injected through [`Platform`], so collection is testable
//!   without real hardware
//! - No logging setup: the crate emits `tracing` events and leaves the
//!   subscriber to the caller

// =============================================================================
// MODULES
// =============================================================================

pub mod classifier;
pub mod collector;
pub mod platform;
pub mod primitives;
pub mod types;

// =============================================================================
// RE-EXPORTS: Core Types (from types module)
// =============================================================================

pub use types::{
    ClassificationError, CollectionError, ConnectorKind, Envelope, ErrorStatus, FreedomCode,
    SystemData, SystemFreedom,
};

// =============================================================================
// RE-EXPORTS: Collection + Classification
// =============================================================================

pub use classifier::{Category, Classifier, FreedomPolicy, classify};
#[cfg(target_os = "linux")]
pub use collector::collect;
pub use collector::{Collector, CollectorConfig};
#[cfg(target_os = "linux")]
pub use platform::LinuxPlatform;
pub use platform::{GraphicsDevice, HostIdentity, Platform};
