//! # Platform Module
//!
//! Host capabilities consumed by the collector.
//!
//! The collector never touches the OS directly: everything it needs (host
//! identity, directory listing, device classification, device queries) goes
//! through [`Platform`]. [`LinuxPlatform`] is the real implementation; tests
//! supply an in-memory fake.

#[cfg(target_os = "linux")]
mod linux;

#[cfg(target_os = "linux")]
pub use linux::{DrmCard, LinuxPlatform};

use std::ffi::OsString;
use std::io;
use std::path::Path;

/// Host identity as reported by a `uname`-style query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostIdentity {
    /// Kernel/OS name (`sysname`).
    pub os_name: String,
    /// Hardware architecture (`machine`).
    pub architecture: String,
}

impl HostIdentity {
    /// Create a new identity.
    #[must_use]
    pub fn new(os_name: impl Into<String>, architecture: impl Into<String>) -> Self {
        Self {
            os_name: os_name.into(),
            architecture: architecture.into(),
        }
    }
}

/// Host capabilities needed for collection.
///
/// Implementations must be read-only with respect to the hardware.
pub trait Platform {
    /// Open graphics device handle. Dropping it closes the device.
    type Device: GraphicsDevice;

    /// Query the host kernel identity.
    fn host_identity(&self) -> io::Result<HostIdentity>;

    /// List entry names of a directory. Fails if the directory cannot be opened.
    fn list_dir(&self, dir: &Path) -> io::Result<Vec<OsString>>;

    /// Whether `path` exists and is a character-special file.
    ///
    /// Any failure to inspect the path (missing, permission denied) is `false`.
    fn is_char_device(&self, path: &Path) -> bool;

    /// Open a graphics device for read/write, close-on-exec.
    fn open_device(&self, path: &Path) -> io::Result<Self::Device>;
}

/// Display-resource queries on an open graphics device.
pub trait GraphicsDevice {
    /// Ids of every connector in the device's resource list.
    fn connector_ids(&self) -> io::Result<Vec<u32>>;

    /// Connector-type code of one connector.
    fn connector_type(&self, connector_id: u32) -> io::Result<u32>;
}
