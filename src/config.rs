//! Static per-panel configuration: timings, bus parameters and protocol policy
//!
//! Every panel model declares these as constants next to its command
//! scripts. Nothing here is read at run time from anywhere else.
use crate::interface::{BusKind, MipiWriteMode};

/// Read attempts made by the ID and ESD protocols before giving up
pub const MAX_RETRIES: u8 = 4;

/// Largest payload a single `SEND` step may carry unless a panel says otherwise
pub const DEFAULT_MAX_PAYLOAD: usize = 150;

/// How the ESD check treats the MIPI link
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EsdPolicy {
    /// Drop to low-power for the read and return to high-speed afterwards
    #[default]
    ToggleLpHs,
    /// The host runs the check inside the vertical front porch, leave the
    /// link mode alone
    InVfp,
}

/// Protocol knobs of one panel model
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelConfig {
    /// Delay inserted after every `SEND` step, 0 disables it
    pub inter_cmd_delay_us: u32,
    /// ESD link handling
    pub esd_policy: EsdPolicy,
    /// Payload capacity of one `SEND` step
    pub max_payload: usize,
    /// Read attempts for ID and ESD checks
    pub retries: u8,
    /// MIPI packet used for untyped writes
    pub write_mode: MipiWriteMode,
}

impl PanelConfig {
    /// Defaults: no inter-command delay, LP/HS toggling, 150-byte payloads,
    /// 4 attempts, generic writes
    pub const fn new() -> Self {
        PanelConfig {
            inter_cmd_delay_us: 0,
            esd_policy: EsdPolicy::ToggleLpHs,
            max_payload: DEFAULT_MAX_PAYLOAD,
            retries: MAX_RETRIES,
            write_mode: MipiWriteMode::Generic,
        }
    }

    /// Set the delay inserted after every `SEND`
    pub const fn inter_cmd_delay_us(mut self, us: u32) -> Self {
        self.inter_cmd_delay_us = us;
        self
    }

    /// Set the ESD link policy
    pub const fn esd_policy(mut self, policy: EsdPolicy) -> Self {
        self.esd_policy = policy;
        self
    }

    /// Set the `SEND` payload capacity
    pub const fn max_payload(mut self, bytes: usize) -> Self {
        self.max_payload = bytes;
        self
    }

    /// Set the number of read attempts
    pub const fn retries(mut self, retries: u8) -> Self {
        self.retries = retries;
        self
    }

    /// Set the MIPI packet used for untyped writes
    pub const fn write_mode(mut self, mode: MipiWriteMode) -> Self {
        self.write_mode = mode;
        self
    }
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Interface mode of the display controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LcdMode {
    /// MCU command interface (MCU or SPI bus)
    Mcu,
    /// RGB parallel video interface
    Rgb,
    /// MIPI DSI
    Dsi,
}

/// Reset pulse timing in milliseconds, used by the power sequencing code
/// that lives in the display driver
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResetTiming {
    /// High before the pulse
    pub high_ms: u16,
    /// Low pulse width
    pub low_ms: u16,
    /// Settle time after releasing reset
    pub settle_ms: u16,
}

/// Signal polarity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Polarity {
    /// Active high
    Positive,
    /// Active low
    Negative,
}

/// MIPI link operating mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MipiWorkMode {
    /// Command mode, frames pushed on demand
    Command,
    /// Video mode, continuous stream
    Video,
}

/// RGB/DSI video timing in pixel clocks and lines
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(missing_docs)]
pub struct VideoTiming {
    pub hfp: u16,
    pub hbp: u16,
    pub hsync: u16,
    pub vfp: u16,
    pub vbp: u16,
    pub vsync: u16,
}

/// MIPI DSI link parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MipiInfo {
    /// Command or video mode
    pub work_mode: MipiWorkMode,
    /// Bits per pixel on the video bus (16, 18 or 24)
    pub video_bus_width: u8,
    /// Data lanes in use
    pub lanes: u8,
    /// D-PHY frequency in kHz
    pub phy_freq_khz: u32,
    /// HSYNC polarity
    pub h_sync_pol: Polarity,
    /// VSYNC polarity
    pub v_sync_pol: Polarity,
    /// Data enable polarity
    pub de_pol: Polarity,
    /// Tearing effect polarity
    pub te_pol: Polarity,
    /// Video timing
    pub timing: VideoTiming,
}

/// MCU bus signal timing in controller clocks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(missing_docs)]
pub struct McuTiming {
    pub rcss: u16,
    pub rlpw: u16,
    pub rhpw: u16,
    pub wcss: u16,
    pub wlpw: u16,
    pub whpw: u16,
}

/// MCU bus protocol
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum McuBusMode {
    /// Intel 8080
    I8080,
    /// Motorola 6800
    M6800,
}

/// MCU parallel bus parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct McuInfo {
    /// 8080 or 6800
    pub bus_mode: McuBusMode,
    /// Data lines (8, 9, 16 or 18)
    pub bus_width: u8,
    /// Bits per pixel
    pub bpp: u8,
    /// Read/write strobe timing
    pub timing: McuTiming,
}

/// SPI line configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpiLineMode {
    /// 9-bit words, D/C carried in the first bit
    ThreeWire,
    /// Separate D/C line
    FourWire,
}

/// SPI bus parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpiInfo {
    /// Line configuration
    pub line_mode: SpiLineMode,
    /// Bits per word on the wire
    pub bus_width: u8,
    /// Clock in Hz
    pub speed_hz: u32,
}

/// Bus-specific parameter block of a panel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BusInfo {
    /// MIPI DSI
    Mipi(MipiInfo),
    /// SPI
    Spi(SpiInfo),
    /// MCU parallel bus
    Mcu(McuInfo),
}

impl BusInfo {
    /// Which bus the block describes
    pub fn kind(&self) -> BusKind {
        match self {
            BusInfo::Mipi(_) => BusKind::Mipi,
            BusInfo::Spi(_) => BusKind::Spi,
            BusInfo::Mcu(_) => BusKind::Mcu,
        }
    }
}
