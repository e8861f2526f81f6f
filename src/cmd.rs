/// MIPI DCS (Display Command Set) commands used by the panel scripts and protocols.
pub struct Cmd;
#[allow(missing_docs)]
impl Cmd {
    // Identification
    pub const READ_DISPLAY_ID: u8 = 0x04;
    pub const READ_ID1: u8 = 0xDA;
    pub const READ_ID2: u8 = 0xDB;
    pub const READ_ID3: u8 = 0xDC;

    // Status
    pub const READ_POWER_MODE: u8 = 0x0A;
    pub const READ_MADCTL: u8 = 0x0B;

    // Sleep / display state
    pub const SOFT_RESET: u8 = 0x01;
    pub const SLEEP_IN: u8 = 0x10;
    pub const SLEEP_OUT: u8 = 0x11;
    pub const DISPLAY_OFF: u8 = 0x28;
    pub const DISPLAY_ON: u8 = 0x29;

    // Memory window
    pub const SET_COLUMN_ADDRESS: u8 = 0x2A;
    pub const SET_PAGE_ADDRESS: u8 = 0x2B;
    pub const WRITE_MEMORY_START: u8 = 0x2C;
    pub const SET_ADDRESS_MODE: u8 = 0x36;
    pub const SET_PIXEL_FORMAT: u8 = 0x3A;
    pub const SET_TEAR_ON: u8 = 0x35;

    // Backlight (DCS brightness)
    pub const WRITE_DISPLAY_BRIGHTNESS: u8 = 0x51;
    pub const WRITE_CTRL_DISPLAY: u8 = 0x53;
}

/// MIPI DSI packet data types accepted by `force_write`.
pub struct DataType;
#[allow(missing_docs)]
impl DataType {
    pub const GENERIC_SHORT_WRITE_0P: u8 = 0x03;
    pub const GENERIC_SHORT_WRITE_1P: u8 = 0x13;
    pub const GENERIC_SHORT_WRITE_2P: u8 = 0x23;
    pub const DCS_SHORT_WRITE_0P: u8 = 0x05;
    pub const DCS_SHORT_WRITE_1P: u8 = 0x15;
    pub const DCS_READ: u8 = 0x06;
    pub const SET_MAX_RETURN_PACKET_SIZE: u8 = 0x37;
    pub const GENERIC_LONG_WRITE: u8 = 0x29;
    pub const DCS_LONG_WRITE: u8 = 0x39;
}
