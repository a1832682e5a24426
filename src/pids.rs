//! Parameter ids from ANSI E1.20 and ANSI E1.37-7.

pub const SUPPORTED_PARAMETERS: u16 = 0x0050;
pub const DEVICE_INFO: u16 = 0x0060;
pub const DEVICE_MODEL_DESCRIPTION: u16 = 0x0080;
pub const MANUFACTURER_LABEL: u16 = 0x0081;
pub const DEVICE_LABEL: u16 = 0x0082;
pub const SOFTWARE_VERSION_LABEL: u16 = 0x00C0;
pub const BOOT_SOFTWARE_VERSION_ID: u16 = 0x00C1;
pub const BOOT_SOFTWARE_VERSION_LABEL: u16 = 0x00C2;
pub const DMX_PERSONALITY: u16 = 0x00E0;
pub const DMX_PERSONALITY_DESCRIPTION: u16 = 0x00E1;
pub const DMX_START_ADDRESS: u16 = 0x00F0;
pub const SLOT_INFO: u16 = 0x0120;
pub const SLOT_DESCRIPTION: u16 = 0x0121;
pub const DEFAULT_SLOT_VALUE: u16 = 0x0122;
pub const ENDPOINT_RESPONDERS: u16 = 0x090B;
pub const ENDPOINT_RESPONDER_LIST_CHANGE: u16 = 0x090C;
pub const IDENTIFY_DEVICE: u16 = 0x1000;
