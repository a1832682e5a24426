pub const SC_RDM: u8 = 0xCC;
pub const SC_SUB_MESSAGE: u8 = 0x01;

pub const BROADCAST_UID: u64 = 0xFFFF_FFFFFFFF;

/// Size of a unique identifier on the wire.
pub const RDM_UID_SIZE: usize = 6;

pub const RDM_MIN_PACKAGE_SIZE: usize = 26;
pub const RDM_MAX_PACKAGE_SIZE: usize = 257;
/// Every field of a package except the parameter data and the checksum.
pub const RDM_HEADER_SIZE: usize = 24;

pub const RDM_MAX_PARAMETER_DATA_LENGTH: usize = 231;
pub const RDM_MAX_LABEL_LENGTH: usize = 32;
pub const RDM_DEVICE_INFO_SIZE: usize = 0x13;
pub const RDM_PROTOCOL_VERSION: u16 = 0x01_00;

pub const RDM_MAX_SUPPORTED_PARAMETERS_PER_REQUEST: usize = RDM_MAX_PARAMETER_DATA_LENGTH / 2;
pub const RDM_SLOT_INFO_RECORD_SIZE: usize = 5;
pub const RDM_MAX_SLOT_INFO_RECORDS: usize =
    RDM_MAX_PARAMETER_DATA_LENGTH / RDM_SLOT_INFO_RECORD_SIZE;
pub const RDM_DEFAULT_SLOT_VALUE_RECORD_SIZE: usize = 3;
pub const RDM_MAX_DEFAULT_SLOT_VALUE_RECORDS: usize =
    RDM_MAX_PARAMETER_DATA_LENGTH / RDM_DEFAULT_SLOT_VALUE_RECORD_SIZE;

/// Lower bound enforced for ENDPOINT_RESPONDERS responses. Kept for compatibility with
/// existing controllers even though a single record needs 10 bytes.
pub const ENDPOINT_RESPONDERS_PDL_MIN: usize = 0x07;
pub const ENDPOINT_RESPONDERS_PDL_MAX: usize = 0xE5;
/// 4 bytes list change number followed by 6 bytes per responder.
pub const RDM_MAX_ENDPOINT_RESPONDERS: usize = (ENDPOINT_RESPONDERS_PDL_MAX - 4) / RDM_UID_SIZE;

pub const DMX_MAX_ADDRESS: u16 = 512;
pub const RDM_MAX_PERSONALITIES: usize = 255;
