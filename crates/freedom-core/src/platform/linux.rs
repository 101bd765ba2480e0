//! # Linux Platform
//!
//! Real host capabilities: `uname(2)` for identity, `std::fs` for the device
//! directory, and the DRM mode-setting ioctls for connector discovery.
//!
//! Only two ioctls are issued, both read-only:
//! - `DRM_IOCTL_MODE_GETRESOURCES` (connector id list)
//! - `DRM_IOCTL_MODE_GETCONNECTOR` (connector type)

use super::{GraphicsDevice, HostIdentity, Platform};
use crate::primitives::MAX_RESOURCE_ATTEMPTS;
use nix::fcntl::OFlag;
use nix::sys::utsname::uname;
use std::ffi::OsString;
use std::fs::{self, File, OpenOptions};
use std::io;
use std::os::fd::AsRawFd;
use std::os::unix::fs::{FileTypeExt, OpenOptionsExt};
use std::path::Path;

// =============================================================================
// DRM KERNEL ABI
// =============================================================================

const DRM_IOCTL_BASE: u8 = b'd';

/// `struct drm_mode_card_res` from `<drm/drm_mode.h>`.
#[repr(C)]
#[derive(Debug, Default)]
#[allow(dead_code)] // kernel ABI layout; most fields are only written by the kernel
struct DrmModeCardRes {
    fb_id_ptr: u64,
    crtc_id_ptr: u64,
    connector_id_ptr: u64,
    encoder_id_ptr: u64,
    count_fbs: u32,
    count_crtcs: u32,
    count_connectors: u32,
    count_encoders: u32,
    min_width: u32,
    max_width: u32,
    min_height: u32,
    max_height: u32,
}

/// `struct drm_mode_get_connector` from `<drm/drm_mode.h>`.
#[repr(C)]
#[derive(Debug, Default)]
#[allow(dead_code)] // kernel ABI layout; most fields are only written by the kernel
struct DrmModeGetConnector {
    encoders_ptr: u64,
    modes_ptr: u64,
    props_ptr: u64,
    prop_values_ptr: u64,
    count_modes: u32,
    count_props: u32,
    count_encoders: u32,
    encoder_id: u32,
    connector_id: u32,
    connector_type: u32,
    connector_type_id: u32,
    connection: u32,
    mm_width: u32,
    mm_height: u32,
    subpixel: u32,
    pad: u32,
}

nix::ioctl_readwrite!(drm_mode_get_resources, DRM_IOCTL_BASE, 0xA0, DrmModeCardRes);
nix::ioctl_readwrite!(drm_mode_get_connector, DRM_IOCTL_BASE, 0xA7, DrmModeGetConnector);

// =============================================================================
// DRM CARD
// =============================================================================

/// An open DRM card node. The descriptor is closed on drop.
#[derive(Debug)]
pub struct DrmCard {
    file: File,
}

impl GraphicsDevice for DrmCard {
    fn connector_ids(&self) -> io::Result<Vec<u32>> {
        let fd = self.file.as_raw_fd();
        let mut ids: Vec<u32> = Vec::new();

        // First pass sizes the list; repeat if a hotplug grew it in between.
        for _ in 0..MAX_RESOURCE_ATTEMPTS {
            let mut res = DrmModeCardRes::default();
            if !ids.is_empty() {
                res.count_connectors = ids.len() as u32;
                res.connector_id_ptr = ids.as_mut_ptr() as u64;
            }

            // SAFETY: `res` matches the kernel layout, and `connector_id_ptr`
            // (when set) points at `count_connectors` writable u32 slots.
            unsafe { drm_mode_get_resources(fd, &mut res) }?;

            let reported = res.count_connectors as usize;
            if reported <= ids.len() {
                ids.truncate(reported);
                return Ok(ids);
            }
            ids = vec![0; reported];
        }

        Err(io::Error::other("connector list changed during every query attempt"))
    }

    fn connector_type(&self, connector_id: u32) -> io::Result<u32> {
        let mut connector = DrmModeGetConnector {
            connector_id,
            ..Default::default()
        };

        // SAFETY: all array counts are zero, so the kernel writes only into
        // the struct itself.
        unsafe { drm_mode_get_connector(self.file.as_raw_fd(), &mut connector) }?;

        Ok(connector.connector_type)
    }
}

// =============================================================================
// LINUX PLATFORM
// =============================================================================

/// Host capabilities backed by the running Linux kernel.
#[derive(Debug, Clone, Copy, Default)]
pub struct LinuxPlatform;

impl Platform for LinuxPlatform {
    type Device = DrmCard;

    fn host_identity(&self) -> io::Result<HostIdentity> {
        let uts = uname()?;
        Ok(HostIdentity::new(
            uts.sysname().to_string_lossy(),
            uts.machine().to_string_lossy(),
        ))
    }

    fn list_dir(&self, dir: &Path) -> io::Result<Vec<OsString>> {
        // Unreadable individual entries are dropped, not fatal.
        Ok(fs::read_dir(dir)?
            .filter_map(Result::ok)
            .map(|entry| entry.file_name())
            .collect())
    }

    fn is_char_device(&self, path: &Path) -> bool {
        fs::metadata(path).is_ok_and(|meta| meta.file_type().is_char_device())
    }

    fn open_device(&self, path: &Path) -> io::Result<DrmCard> {
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .custom_flags(OFlag::O_CLOEXEC.bits())
            .open(path)?;
        Ok(DrmCard { file })
    }
}
