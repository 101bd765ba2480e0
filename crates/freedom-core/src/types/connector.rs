//! Display connector type codes, as reported by the kernel's DRM subsystem.

/// A display connector type decoded from its DRM `connector_type` code.
///
/// Decoding is for rendering only; connectors are not classified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ConnectorKind {
    Unknown,
    Vga,
    DviI,
    DviD,
    DviA,
    Composite,
    SVideo,
    Lvds,
    Component,
    NinePinDin,
    DisplayPort,
    HdmiA,
    HdmiB,
    Tv,
    Edp,
    Virtual,
    Dsi,
    Dpi,
    Writeback,
    Spi,
    Usb,
    /// A code newer than this table.
    Other(u32),
}

impl ConnectorKind {
    /// Decode a DRM connector-type code.
    #[must_use]
    pub fn from_code(code: u32) -> Self {
        match code {
            0 => ConnectorKind::Unknown,
            1 => ConnectorKind::Vga,
            2 => ConnectorKind::DviI,
            3 => ConnectorKind::DviD,
            4 => ConnectorKind::DviA,
            5 => ConnectorKind::Composite,
            6 => ConnectorKind::SVideo,
            7 => ConnectorKind::Lvds,
            8 => ConnectorKind::Component,
            9 => ConnectorKind::NinePinDin,
            10 => ConnectorKind::DisplayPort,
            11 => ConnectorKind::HdmiA,
            12 => ConnectorKind::HdmiB,
            13 => ConnectorKind::Tv,
            14 => ConnectorKind::Edp,
            15 => ConnectorKind::Virtual,
            16 => ConnectorKind::Dsi,
            17 => ConnectorKind::Dpi,
            18 => ConnectorKind::Writeback,
            19 => ConnectorKind::Spi,
            20 => ConnectorKind::Usb,
            other => ConnectorKind::Other(other),
        }
    }

    /// Get the DRM code back.
    #[must_use]
    pub fn code(self) -> u32 {
        match self {
            ConnectorKind::Unknown => 0,
            ConnectorKind::Vga => 1,
            ConnectorKind::DviI => 2,
            ConnectorKind::DviD => 3,
            ConnectorKind::DviA => 4,
            ConnectorKind::Composite => 5,
            ConnectorKind::SVideo => 6,
            ConnectorKind::Lvds => 7,
            ConnectorKind::Component => 8,
            ConnectorKind::NinePinDin => 9,
            ConnectorKind::DisplayPort => 10,
            ConnectorKind::HdmiA => 11,
            ConnectorKind::HdmiB => 12,
            ConnectorKind::Tv => 13,
            ConnectorKind::Edp => 14,
            ConnectorKind::Virtual => 15,
            ConnectorKind::Dsi => 16,
            ConnectorKind::Dpi => 17,
            ConnectorKind::Writeback => 18,
            ConnectorKind::Spi => 19,
            ConnectorKind::Usb => 20,
            ConnectorKind::Other(code) => code,
        }
    }

    /// Get the conventional connector name (matches the kernel's naming).
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            ConnectorKind::Unknown => "Unknown",
            ConnectorKind::Vga => "VGA",
            ConnectorKind::DviI => "DVI-I",
            ConnectorKind::DviD => "DVI-D",
            ConnectorKind::DviA => "DVI-A",
            ConnectorKind::Composite => "Composite",
            ConnectorKind::SVideo => "SVIDEO",
            ConnectorKind::Lvds => "LVDS",
            ConnectorKind::Component => "Component",
            ConnectorKind::NinePinDin => "DIN",
            ConnectorKind::DisplayPort => "DP",
            ConnectorKind::HdmiA => "HDMI-A",
            ConnectorKind::HdmiB => "HDMI-B",
            ConnectorKind::Tv => "TV",
            ConnectorKind::Edp => "eDP",
            ConnectorKind::Virtual => "Virtual",
            ConnectorKind::Dsi => "DSI",
            ConnectorKind::Dpi => "DPI",
            ConnectorKind::Writeback => "Writeback",
            ConnectorKind::Spi => "SPI",
            ConnectorKind::Usb => "USB",
            ConnectorKind::Other(_) => "Other",
        }
    }
}

impl std::fmt::Display for ConnectorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConnectorKind::Other(code) => write!(f, "Other({code})"),
            kind => f.write_str(kind.name()),
        }
    }
}
