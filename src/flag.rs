/// Bit values returned by the DCS "read power mode" (0x0A) register.
///
/// The liveness check compares the whole byte against a known-good pattern,
/// the individual bits are listed here so panel models can spell theirs out.
pub struct Flag;
#[allow(missing_docs)]
impl Flag {
    // Power mode (0x0A) bits
    pub const BOOSTER_ON: u8 = 0x80;
    pub const IDLE_MODE_ON: u8 = 0x40;
    pub const PARTIAL_MODE_ON: u8 = 0x20;
    pub const SLEEP_OUT: u8 = 0x10;
    pub const NORMAL_MODE_ON: u8 = 0x08;
    pub const DISPLAY_ON: u8 = 0x04;

    /// Booster on, sleep out, normal mode, display on
    pub const POWER_MODE_HEALTHY: u8 =
        Self::BOOSTER_ON | Self::SLEEP_OUT | Self::NORMAL_MODE_ON | Self::DISPLAY_ON; // 0x9C

    /// Same pattern without the booster bit, reported by some OLED families
    pub const POWER_MODE_HEALTHY_NO_BOOSTER: u8 =
        Self::SLEEP_OUT | Self::NORMAL_MODE_ON | Self::DISPLAY_ON; // 0x1C

    // Address mode (0x36) bits
    pub const MADCTL_ROW_ORDER: u8 = 0x80;
    pub const MADCTL_COLUMN_ORDER: u8 = 0x40;
    pub const MADCTL_ROW_COLUMN_EXCHANGE: u8 = 0x20;
    pub const MADCTL_BGR: u8 = 0x08;

    // Pixel format (0x3A)
    pub const PIXEL_FORMAT_RGB565: u8 = 0x55;
    pub const PIXEL_FORMAT_RGB666: u8 = 0x66;
    pub const PIXEL_FORMAT_RGB888: u8 = 0x77;

    // Write CTRL display (0x53)
    pub const CTRL_BRIGHTNESS_ON: u8 = 0x24;
}
