//! The message envelope: header fields of RDM requests and responses around undecoded
//! parameter data, plus their binary framing.

use crate::command_class::{RequestCommandClass, ResponseCommandClass};
use crate::consts::{
    RDM_HEADER_SIZE, RDM_MAX_PACKAGE_SIZE, RDM_MAX_PARAMETER_DATA_LENGTH, RDM_MIN_PACKAGE_SIZE,
    SC_RDM, SC_SUB_MESSAGE,
};
use crate::layouts::rdm_package_layout;
use crate::payload::RdmPayload;
use crate::types::{DataPack, NackReason, ResponseType};
use crate::unique_identifier::{PackageAddress, UniqueIdentifier};

/// Binary representation of an RDM package.
pub type BinaryRdmPackage = heapless::Vec<u8, RDM_MAX_PACKAGE_SIZE>;

/// Error that gets raised when attempting to answer a request that was sent to a broadcast
/// address.
#[derive(Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct IsBroadcastError;

impl core::fmt::Display for IsBroadcastError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "tried to convert broadcast request to response")
    }
}

#[cfg(feature = "std")]
impl std::error::Error for IsBroadcastError {}

/// An RDM Request package that does not have its parameter data deserialized.
#[derive(Debug, Clone)]
pub struct RdmRequestData {
    pub destination_uid: PackageAddress,
    pub source_uid: UniqueIdentifier,
    pub transaction_number: u8,
    pub port_id: u8,
    pub message_count: u8,
    pub sub_device: u16,
    pub command_class: RequestCommandClass,
    pub parameter_id: u16,
    pub parameter_data: DataPack,
}

impl RdmRequestData {
    pub fn build_response(
        &self,
        response_type: ResponseType,
        response: DataPack,
        message_count: u8,
    ) -> Result<RdmResponseData, IsBroadcastError> {
        let PackageAddress::Device(source_uid) = self.destination_uid else {
            return Err(IsBroadcastError);
        };

        Ok(RdmResponseData {
            destination_uid: PackageAddress::Device(self.source_uid),
            source_uid,
            transaction_number: self.transaction_number,
            response_type,
            message_count,
            sub_device: self.sub_device,
            command_class: self.command_class.response_class(),
            parameter_id: self.parameter_id,
            parameter_data: response,
        })
    }

    /// Acknowledges the request with a serialized payload.
    pub fn build_payload_response<P: RdmPayload>(
        &self,
        payload: &P,
        message_count: u8,
    ) -> Result<RdmResponseData, IsBroadcastError> {
        self.build_response(
            ResponseType::ResponseTypeAck,
            payload.serialize(),
            message_count,
        )
    }

    pub fn build_nack(
        &self,
        nack_reason: NackReason,
        message_count: u8,
    ) -> Result<RdmResponseData, IsBroadcastError> {
        let mut reason = DataPack::new();
        for byte in nack_reason.to_bytes() {
            // Two bytes always fit.
            let _ = reason.push(byte);
        }

        self.build_response(ResponseType::ResponseTypeNackReason, reason, message_count)
    }
}

/// An RDM Response package that does not have its parameter data deserialized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RdmResponseData {
    pub destination_uid: PackageAddress,
    pub source_uid: UniqueIdentifier,
    pub transaction_number: u8,
    pub response_type: ResponseType,
    pub message_count: u8,
    pub sub_device: u16,
    pub command_class: ResponseCommandClass,
    pub parameter_id: u16,
    pub parameter_data: DataPack,
}

impl RdmResponseData {
    /// True if the response carries the requested parameter data.
    pub fn is_ack(&self) -> bool {
        self.response_type.carries_data()
    }

    /// The nack reason of a NACK_REASON response, taken from the first parameter data byte.
    pub fn nack_reason(&self) -> Option<u16> {
        if self.response_type != ResponseType::ResponseTypeNackReason {
            return None;
        }

        self.parameter_data.first().map(|reason| *reason as u16)
    }

    /// The two byte E1.20 nack reason code of a NACK_REASON response. Falls back to the first
    /// byte for responders that only send one.
    pub fn nack_reason_code(&self) -> Option<u16> {
        if self.response_type != ResponseType::ResponseTypeNackReason {
            return None;
        }

        match self.parameter_data.as_slice() {
            [high, low, ..] => Some(u16::from_be_bytes([*high, *low])),
            [reason] => Some(*reason as u16),
            [] => None,
        }
    }

    /// The delay of an ACK_TIMER response in 100ms steps.
    pub fn estimated_delay(&self) -> Option<u16> {
        if self.response_type != ResponseType::ResponseTypeAckTimer {
            return None;
        }

        match self.parameter_data.as_slice() {
            [high, low] => Some(u16::from_be_bytes([*high, *low])),
            _ => None,
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RdmDeserializationError {
    /// Buffer must be at least 26 bytes
    BufferTooSmall,
    /// Buffer must be at most 257 bytes
    BufferTooBig,
    /// The command class was not found; contains contents of command class field
    CommandClassNotFound(u8),
    /// The response type was not found; contains contents of response type field
    ResponseTypeNotFound(u8),
    /// The message length field is incorrect; contains contents of the field
    WrongMessageLength(usize),
    /// The parameter data length field disagrees with the package; contains contents of the
    /// field
    WrongParameterDataLength(usize),
    /// Wrong checksum
    WrongChecksum,
    /// Received wrong start code (0xCC) or sub start code (0x01)
    WrongStartCode,
    /// The source uid is a broadcast address.
    SourceUidIsBroadcast,
}

impl core::fmt::Display for RdmDeserializationError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::BufferTooSmall => write!(f, "buffer too small"),
            Self::BufferTooBig => write!(f, "buffer too big"),
            Self::CommandClassNotFound(command_class) => {
                write!(f, "command class {command_class:#04X} not found")
            },
            Self::ResponseTypeNotFound(response_type) => {
                write!(f, "response type {response_type:#04X} is unknown")
            },
            Self::WrongMessageLength(message_length) => {
                write!(f, "message length {message_length} is incorrect")
            },
            Self::WrongParameterDataLength(parameter_data_length) => {
                write!(
                    f,
                    "parameter data length {parameter_data_length} is incorrect"
                )
            },
            Self::WrongChecksum => write!(f, "checksum is incorrect"),
            Self::WrongStartCode => write!(f, "start code is incorrect"),
            Self::SourceUidIsBroadcast => write!(f, "source uid is a broadcast"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for RdmDeserializationError {}

#[derive(Debug)]
pub enum RdmData {
    Request(RdmRequestData),
    Response(RdmResponseData),
}

impl RdmData {
    pub fn deserialize(buf: &[u8]) -> Result<Self, RdmDeserializationError> {
        deserialize_rdm_data(buf)
    }

    pub fn serialize(&self) -> BinaryRdmPackage {
        serialize_rdm_data(self)
    }
}

#[inline]
pub(crate) fn calculate_checksum(data: &[u8]) -> u16 {
    data.iter()
        .fold(0u16, |checksum, byte| checksum.wrapping_add(*byte as u16))
}

/// Deserialize rdm data.
/// Buffer must be between 26 and 257 bytes.
pub fn deserialize_rdm_data(buffer: &[u8]) -> Result<RdmData, RdmDeserializationError> {
    let buffer_size = buffer.len();

    if buffer_size < RDM_MIN_PACKAGE_SIZE {
        return Err(RdmDeserializationError::BufferTooSmall);
    }

    if buffer_size > RDM_MAX_PACKAGE_SIZE {
        return Err(RdmDeserializationError::BufferTooBig);
    }

    let (message, checksum) = buffer.split_at(buffer_size - 2);
    if calculate_checksum(message) != u16::from_be_bytes([checksum[0], checksum[1]]) {
        return Err(RdmDeserializationError::WrongChecksum);
    }

    let view = rdm_package_layout::View::new(buffer);

    if view.start_code().read() != SC_RDM || view.sub_start_code().read() != SC_SUB_MESSAGE {
        return Err(RdmDeserializationError::WrongStartCode);
    }

    let message_length = view.message_length().read() as usize;
    if message_length != message.len() {
        return Err(RdmDeserializationError::WrongMessageLength(message_length));
    }

    let parameter_data_length = view.parameter_data_length().read() as usize;
    if parameter_data_length != message_length - RDM_HEADER_SIZE {
        return Err(RdmDeserializationError::WrongParameterDataLength(
            parameter_data_length,
        ));
    }

    let parameter_data = DataPack::from_slice(&message[RDM_HEADER_SIZE..])
        .map_err(|_| RdmDeserializationError::BufferTooBig)?;

    let destination_uid = PackageAddress::from_bytes(view.destination_uid());
    let source_uid = match PackageAddress::from_bytes(view.source_uid()) {
        PackageAddress::Device(uid) => uid,
        _ => return Err(RdmDeserializationError::SourceUidIsBroadcast),
    };

    let command_class_field = view.command_class().read();
    if let Ok(command_class) = RequestCommandClass::try_from(command_class_field) {
        return Ok(RdmData::Request(RdmRequestData {
            destination_uid,
            source_uid,
            transaction_number: view.transaction_number().read(),
            port_id: view.port_id_response_type().read(),
            message_count: view.message_count().read(),
            sub_device: view.sub_device().read(),
            command_class,
            parameter_id: view.parameter_id().read(),
            parameter_data,
        }));
    }

    let command_class = ResponseCommandClass::try_from(command_class_field)
        .map_err(RdmDeserializationError::CommandClassNotFound)?;
    let response_type = ResponseType::try_from(view.port_id_response_type().read())
        .map_err(RdmDeserializationError::ResponseTypeNotFound)?;

    Ok(RdmData::Response(RdmResponseData {
        destination_uid,
        source_uid,
        transaction_number: view.transaction_number().read(),
        response_type,
        message_count: view.message_count().read(),
        sub_device: view.sub_device().read(),
        command_class,
        parameter_id: view.parameter_id().read(),
        parameter_data,
    }))
}

/// Serializes RDM data to a binary Vec.
pub fn serialize_rdm_data(rdm_data: &RdmData) -> BinaryRdmPackage {
    struct Header<'a> {
        destination_uid: PackageAddress,
        source_uid: UniqueIdentifier,
        transaction_number: u8,
        port_id_response_type: u8,
        message_count: u8,
        sub_device: u16,
        command_class: u8,
        parameter_id: u16,
        parameter_data: &'a [u8],
    }

    let header = match rdm_data {
        RdmData::Request(request) => Header {
            destination_uid: request.destination_uid,
            source_uid: request.source_uid,
            transaction_number: request.transaction_number,
            port_id_response_type: request.port_id,
            message_count: request.message_count,
            sub_device: request.sub_device,
            command_class: request.command_class as u8,
            parameter_id: request.parameter_id,
            parameter_data: &request.parameter_data,
        },
        RdmData::Response(response) => Header {
            destination_uid: response.destination_uid,
            source_uid: response.source_uid,
            transaction_number: response.transaction_number,
            port_id_response_type: response.response_type as u8,
            message_count: response.message_count,
            sub_device: response.sub_device,
            command_class: response.command_class as u8,
            parameter_id: response.parameter_id,
            parameter_data: &response.parameter_data,
        },
    };

    // DataPack caps the parameter data.
    let parameter_data_length = header.parameter_data.len();
    debug_assert!(parameter_data_length <= RDM_MAX_PARAMETER_DATA_LENGTH);

    let message_length = RDM_HEADER_SIZE + parameter_data_length;
    let mut dst = [0u8; RDM_MAX_PACKAGE_SIZE];
    let mut view = rdm_package_layout::View::new(&mut dst[..message_length + 2]);

    view.start_code_mut().write(SC_RDM);
    view.sub_start_code_mut().write(SC_SUB_MESSAGE);
    view.message_length_mut().write(message_length as u8);
    view.destination_uid_mut()
        .copy_from_slice(&header.destination_uid.to_bytes());
    view.source_uid_mut()
        .copy_from_slice(&header.source_uid.to_bytes());
    view.transaction_number_mut()
        .write(header.transaction_number);
    view.port_id_response_type_mut()
        .write(header.port_id_response_type);
    view.message_count_mut().write(header.message_count);
    view.sub_device_mut().write(header.sub_device);
    view.command_class_mut().write(header.command_class);
    view.parameter_id_mut().write(header.parameter_id);
    view.parameter_data_length_mut()
        .write(parameter_data_length as u8);
    view.parameter_data_and_checksum_mut()[..parameter_data_length]
        .copy_from_slice(header.parameter_data);

    let checksum = calculate_checksum(&dst[..message_length]);
    dst[message_length..message_length + 2].copy_from_slice(&checksum.to_be_bytes());

    let mut package = BinaryRdmPackage::new();
    // A package is at most RDM_MAX_PACKAGE_SIZE bytes.
    let _ = package.extend_from_slice(&dst[..message_length + 2]);
    package
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controller_uid() -> UniqueIdentifier {
        UniqueIdentifier::new(0x7FF0, 1).unwrap()
    }

    fn device_uid() -> UniqueIdentifier {
        UniqueIdentifier::new(0x9FFF, 2).unwrap()
    }

    fn get_request(parameter_id: u16) -> RdmRequestData {
        RdmRequestData {
            destination_uid: PackageAddress::Device(device_uid()),
            source_uid: controller_uid(),
            transaction_number: 7,
            port_id: 1,
            message_count: 0,
            sub_device: 0,
            command_class: RequestCommandClass::GetCommand,
            parameter_id,
            parameter_data: DataPack::new(),
        }
    }

    #[test]
    fn test_request_package_layout() {
        let package = RdmData::Request(get_request(0x1000)).serialize();

        assert_eq!(package.len(), 26);
        assert_eq!(&package[..3], &[0xCC, 0x01, 24]);
        assert_eq!(&package[3..9], &device_uid().to_bytes());
        assert_eq!(&package[9..15], &controller_uid().to_bytes());
        assert_eq!(package[20], 0x20);
        assert_eq!(&package[21..24], &[0x10, 0x00, 0x00]);

        let checksum = calculate_checksum(&package[..24]);
        assert_eq!(&package[24..], &checksum.to_be_bytes());
    }

    #[test]
    fn test_response_package() {
        let response = get_request(0x1000)
            .build_response(
                ResponseType::ResponseTypeAck,
                DataPack::from_slice(&[1]).unwrap(),
                3,
            )
            .unwrap();
        assert_eq!(
            response.command_class,
            ResponseCommandClass::GetCommandResponse
        );
        assert_eq!(
            response.destination_uid,
            PackageAddress::Device(controller_uid())
        );
        assert_eq!(response.source_uid, device_uid());

        let package = RdmData::Response(response.clone()).serialize();
        assert_eq!(package.len(), 27);

        match RdmData::deserialize(&package).unwrap() {
            RdmData::Response(decoded) => assert_eq!(decoded, response),
            RdmData::Request(_) => panic!("decoded a request"),
        }
    }

    #[test]
    fn test_broadcast_request_has_no_response() {
        let mut request = get_request(0x1000);
        request.destination_uid = PackageAddress::Broadcast;

        assert!(request
            .build_response(ResponseType::ResponseTypeAck, DataPack::new(), 0)
            .is_err());
    }

    #[test]
    fn test_deserialize_rejects_bad_packages() {
        let package = RdmData::Request(get_request(0x1000)).serialize();

        assert_eq!(
            deserialize_rdm_data(&package[..25]).unwrap_err(),
            RdmDeserializationError::BufferTooSmall
        );

        let mut corrupted = package.clone();
        corrupted[21] ^= 0x01;
        assert_eq!(
            deserialize_rdm_data(&corrupted).unwrap_err(),
            RdmDeserializationError::WrongChecksum
        );

        // Parameter data length field says 1, but there is no parameter data.
        let mut wrong_pdl = package.clone();
        wrong_pdl[23] = 1;
        let checksum = calculate_checksum(&wrong_pdl[..24]);
        wrong_pdl[24..].copy_from_slice(&checksum.to_be_bytes());
        assert_eq!(
            deserialize_rdm_data(&wrong_pdl).unwrap_err(),
            RdmDeserializationError::WrongParameterDataLength(1)
        );
    }

    #[test]
    fn test_nack_reason() {
        let request = get_request(0x1000);
        let nack = request.build_nack(NackReason::DataOutOfRange, 0).unwrap();
        assert!(!nack.is_ack());
        assert_eq!(nack.nack_reason_code(), Some(0x0006));
        assert_eq!(nack.nack_reason(), Some(0x00));

        let mut first_byte = nack.clone();
        first_byte.parameter_data = DataPack::from_slice(&[0x05, 0x00]).unwrap();
        assert_eq!(first_byte.nack_reason(), Some(0x05));
        assert_eq!(first_byte.nack_reason_code(), Some(0x0500));

        let mut short_nack = nack.clone();
        short_nack.parameter_data = DataPack::from_slice(&[0x05]).unwrap();
        assert_eq!(short_nack.nack_reason(), Some(0x0005));
        assert_eq!(short_nack.nack_reason_code(), Some(0x0005));

        short_nack.parameter_data.clear();
        assert_eq!(short_nack.nack_reason(), None);
        assert_eq!(short_nack.nack_reason_code(), None);

        let ack = request
            .build_response(ResponseType::ResponseTypeAck, DataPack::new(), 0)
            .unwrap();
        assert!(ack.is_ack());
        assert_eq!(ack.nack_reason(), None);
        assert_eq!(ack.nack_reason_code(), None);
    }

    #[test]
    fn test_estimated_delay() {
        let response = get_request(0x1000)
            .build_response(
                ResponseType::ResponseTypeAckTimer,
                DataPack::from_slice(&[0x00, 0x0A]).unwrap(),
                0,
            )
            .unwrap();
        assert_eq!(response.estimated_delay(), Some(10));
    }
}
