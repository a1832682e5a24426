//! The contract every parameter payload implements.
//!
//! A payload is decoded either from raw parameter data ([RdmPayload::deserialize]) or from a
//! whole response envelope ([RdmPayload::from_response]). The envelope path checks, in this
//! order, that the response was acknowledged, that its command class is the one expected for
//! the payload and that it concerns the payload's parameter id. A response for a different
//! parameter is not an error, it yields `Ok(None)` so the caller can try another codec.

use crate::command_class::ResponseCommandClass;
use crate::rdm_data::RdmResponseData;
use crate::types::{DataPack, NackReason, ResponseType};

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PayloadError {
    /// No response was supplied.
    NullArgument,
    /// The responder refused the request. Contains the raw nack reason if the response carried
    /// one.
    Nacked(Option<u16>),
    /// The responder acknowledged with a timer; contains the delay in 100ms steps.
    NotReady(u16),
    /// The response belongs to a different kind of exchange.
    WrongCommand {
        expected: ResponseCommandClass,
        actual: ResponseCommandClass,
    },
    /// The parameter data length is outside the bounds of the payload.
    LengthOutOfRange {
        length: usize,
        min: usize,
        max: usize,
    },
    /// A fixed field could not be read.
    TruncatedData { needed: usize, available: usize },
    /// Bytes were left over after decoding all fields.
    MalformedPayload { remaining: usize },
    /// A field holds a value that can't be represented; contains the field name.
    InvalidField(&'static str),
    /// More entries than the payload type can hold.
    CapacityExceeded { capacity: usize },
}

impl PayloadError {
    /// The decoded nack reason of a [PayloadError::Nacked].
    pub fn nack_reason(&self) -> Option<NackReason> {
        match self {
            Self::Nacked(Some(reason)) => NackReason::try_from(*reason).ok(),
            _ => None,
        }
    }
}

impl core::fmt::Display for PayloadError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::NullArgument => write!(f, "no response to decode"),
            Self::Nacked(reason) => match reason.map(NackReason::try_from) {
                Some(Ok(reason)) => write!(f, "request not acknowledged: {reason}"),
                Some(Err(raw)) => write!(f, "request not acknowledged: reason {raw:#06X}"),
                None => write!(f, "request not acknowledged"),
            },
            Self::NotReady(delay) => {
                write!(f, "response not ready, retry in {}ms", *delay as u32 * 100)
            },
            Self::WrongCommand { expected, actual } => {
                write!(f, "command is {actual}, expected {expected}")
            },
            Self::LengthOutOfRange { length, min, max } => {
                write!(f, "pdl {length} outside of {min}..={max}")
            },
            Self::TruncatedData { needed, available } => {
                write!(f, "need {needed} bytes, got {available}")
            },
            Self::MalformedPayload { remaining } => {
                write!(f, "{remaining} bytes left after deserialization")
            },
            Self::InvalidField(field) => write!(f, "field {field} is invalid"),
            Self::CapacityExceeded { capacity } => {
                write!(f, "more than {capacity} entries")
            },
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for PayloadError {}

/// Checks the inclusive parameter data length bounds of `P`.
pub fn check_length<P: RdmPayload>(length: usize) -> Result<(), PayloadError> {
    if !(P::PDL_MIN..=P::PDL_MAX).contains(&length) {
        return Err(PayloadError::LengthOutOfRange {
            length,
            min: P::PDL_MIN,
            max: P::PDL_MAX,
        });
    }

    Ok(())
}

/// Fails unless the response carries parameter data of an acknowledged request.
pub fn ensure_acknowledged(response: &RdmResponseData) -> Result<(), PayloadError> {
    match response.response_type {
        ResponseType::ResponseTypeAck | ResponseType::ResponseTypeAckOverflow => Ok(()),
        ResponseType::ResponseTypeNackReason => Err(PayloadError::Nacked(response.nack_reason())),
        ResponseType::ResponseTypeAckTimer => Err(PayloadError::NotReady(
            response
                .estimated_delay()
                .ok_or(PayloadError::TruncatedData {
                    needed: 2,
                    available: response.parameter_data.len(),
                })?,
        )),
    }
}

/// Typed parameter data of one RDM parameter.
pub trait RdmPayload: Sized {
    /// The parameter this payload belongs to.
    const PARAMETER_ID: u16;
    /// The command class of responses carrying this payload.
    const COMMAND_CLASS: ResponseCommandClass;
    /// Inclusive lower bound of the parameter data length.
    const PDL_MIN: usize;
    /// Inclusive upper bound of the parameter data length.
    const PDL_MAX: usize;

    /// Serializes the payload. Never fails, the fields of every payload type are bounded so
    /// that they fit into a [DataPack].
    fn serialize(&self) -> DataPack;

    /// Decodes the fields from `parameter_data`. Has to reject leftover bytes and must not
    /// read past the end of short input.
    fn decode_fields(parameter_data: &[u8]) -> Result<Self, PayloadError>;

    /// Deserializes parameter data.
    fn deserialize(parameter_data: &[u8]) -> Result<Self, PayloadError> {
        check_length::<Self>(parameter_data.len())?;
        Self::decode_fields(parameter_data)
    }

    /// Deserializes the parameter data of a response. Returns `Ok(None)` if the response
    /// concerns another parameter.
    fn from_response(response: &RdmResponseData) -> Result<Option<Self>, PayloadError> {
        ensure_acknowledged(response)?;

        if response.command_class != Self::COMMAND_CLASS {
            return Err(PayloadError::WrongCommand {
                expected: Self::COMMAND_CLASS,
                actual: response.command_class,
            });
        }

        if response.parameter_id != Self::PARAMETER_ID {
            log::trace!(
                "pid {:#06X} is not {:#06X}, skipping",
                response.parameter_id,
                Self::PARAMETER_ID
            );
            return Ok(None);
        }

        Self::deserialize(&response.parameter_data).map(Some)
    }
}
