use crate::consts::RDM_MAX_PARAMETER_DATA_LENGTH;

/// Parameter data of a single RDM message.
pub type DataPack = heapless::Vec<u8, RDM_MAX_PARAMETER_DATA_LENGTH>;

/// Response status of a rdm package
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum ResponseType {
    /// The request was acknowledged.
    ResponseTypeAck = 0x00,
    /// The request was acknowledged but the result isn't ready yet.
    ResponseTypeAckTimer = 0x01,
    /// The request was not acknowledged.
    ResponseTypeNackReason = 0x02,
    /// The request was acknowledged but the response does not fit into a single response.
    ResponseTypeAckOverflow = 0x03,
}

impl ResponseType {
    /// True for responses that carry the requested parameter data.
    pub fn carries_data(&self) -> bool {
        matches!(self, Self::ResponseTypeAck | Self::ResponseTypeAckOverflow)
    }
}

impl TryFrom<u8> for ResponseType {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, u8> {
        Ok(match value {
            0x00 => Self::ResponseTypeAck,
            0x01 => Self::ResponseTypeAckTimer,
            0x02 => Self::ResponseTypeNackReason,
            0x03 => Self::ResponseTypeAckOverflow,
            unknown => return Err(unknown),
        })
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u16)]
pub enum NackReason {
    UnknownPid = 0x0000,
    FormatError = 0x0001,
    HardwareFault = 0x0002,
    ProxyReject = 0x0003,
    WriteProtect = 0x0004,
    UnsupportedCommandClass = 0x0005,
    DataOutOfRange = 0x0006,
    BufferFull = 0x0007,
    PacketSizeUnsupported = 0x0008,
    SubDeviceOutOfRange = 0x0009,
    ProxyBufferFull = 0x000A,
    ActionNotSupported = 0x000B,
    EndpointNumberInvalid = 0x0011,
    InvalidEndpointMode = 0x0012,
    UnknownUid = 0x0013,
}

impl NackReason {
    /// The two byte parameter data of a NACK_REASON response.
    pub fn to_bytes(self) -> [u8; 2] {
        (self as u16).to_be_bytes()
    }
}

impl core::fmt::Display for NackReason {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let description = match self {
            Self::UnknownPid => "unknown pid",
            Self::FormatError => "format error",
            Self::HardwareFault => "hardware fault",
            Self::ProxyReject => "proxy reject",
            Self::WriteProtect => "write protected",
            Self::UnsupportedCommandClass => "unsupported command class",
            Self::DataOutOfRange => "data out of range",
            Self::BufferFull => "buffer full",
            Self::PacketSizeUnsupported => "packet size unsupported",
            Self::SubDeviceOutOfRange => "sub device out of range",
            Self::ProxyBufferFull => "proxy buffer full",
            Self::ActionNotSupported => "action not supported",
            Self::EndpointNumberInvalid => "endpoint number invalid",
            Self::InvalidEndpointMode => "invalid endpoint mode",
            Self::UnknownUid => "unknown uid",
        };

        write!(f, "{description}")
    }
}

impl TryFrom<u16> for NackReason {
    type Error = u16;

    fn try_from(value: u16) -> Result<Self, u16> {
        Ok(match value {
            0x0000 => Self::UnknownPid,
            0x0001 => Self::FormatError,
            0x0002 => Self::HardwareFault,
            0x0003 => Self::ProxyReject,
            0x0004 => Self::WriteProtect,
            0x0005 => Self::UnsupportedCommandClass,
            0x0006 => Self::DataOutOfRange,
            0x0007 => Self::BufferFull,
            0x0008 => Self::PacketSizeUnsupported,
            0x0009 => Self::SubDeviceOutOfRange,
            0x000A => Self::ProxyBufferFull,
            0x000B => Self::ActionNotSupported,
            0x0011 => Self::EndpointNumberInvalid,
            0x0012 => Self::InvalidEndpointMode,
            0x0013 => Self::UnknownUid,
            unknown => return Err(unknown),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::{NackReason, ResponseType};

    #[test]
    fn test_nack_reason_bytes() {
        assert_eq!(NackReason::DataOutOfRange.to_bytes(), [0x00, 0x06]);
        assert_eq!(NackReason::try_from(0x0013), Ok(NackReason::UnknownUid));
        assert_eq!(NackReason::try_from(0x00FF), Err(0x00FF));
    }

    #[test]
    fn test_response_type_carries_data() {
        assert!(ResponseType::ResponseTypeAck.carries_data());
        assert!(ResponseType::ResponseTypeAckOverflow.carries_data());
        assert!(!ResponseType::ResponseTypeNackReason.carries_data());
        assert!(!ResponseType::ResponseTypeAckTimer.carries_data());
    }
}
