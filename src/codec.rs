//! Big-endian scalar helpers and arrays of fixed-size records.
//!
//! Record arrays carry no length prefix, the parameter data length of the envelope
//! determines how many records follow.

use crate::consts::{RDM_MAX_LABEL_LENGTH, RDM_MAX_PARAMETER_DATA_LENGTH};
use crate::payload::PayloadError;
use crate::types::DataPack;

/// A label as used by DEVICE_LABEL, SLOT_DESCRIPTION and friends.
pub type Label = heapless::String<RDM_MAX_LABEL_LENGTH>;

#[inline]
pub(crate) fn require(buffer: &[u8], needed: usize) -> Result<(), PayloadError> {
    if buffer.len() < needed {
        return Err(PayloadError::TruncatedData {
            needed,
            available: buffer.len(),
        });
    }

    Ok(())
}

pub fn decode_u8(buffer: &[u8]) -> Result<u8, PayloadError> {
    require(buffer, 1)?;
    Ok(buffer[0])
}

pub fn encode_u16_be(value: u16) -> [u8; 2] {
    value.to_be_bytes()
}

/// Reads the first two bytes of `buffer`.
pub fn decode_u16_be(buffer: &[u8]) -> Result<u16, PayloadError> {
    require(buffer, 2)?;
    Ok(u16::from_be_bytes([buffer[0], buffer[1]]))
}

pub fn encode_u32_be(value: u32) -> [u8; 4] {
    value.to_be_bytes()
}

/// Reads the first four bytes of `buffer`.
pub fn decode_u32_be(buffer: &[u8]) -> Result<u32, PayloadError> {
    require(buffer, 4)?;
    Ok(u32::from_be_bytes([
        buffer[0], buffer[1], buffer[2], buffer[3],
    ]))
}

/// Decodes a label. Labels are not null terminated and must be valid UTF-8.
pub fn decode_label(buffer: &[u8]) -> Result<Label, PayloadError> {
    let bytes = heapless::Vec::<u8, RDM_MAX_LABEL_LENGTH>::from_slice(buffer).map_err(|_| {
        PayloadError::CapacityExceeded {
            capacity: RDM_MAX_LABEL_LENGTH,
        }
    })?;

    Label::from_utf8(bytes).map_err(|_| PayloadError::InvalidField("label"))
}

/// Copies at most [RDM_MAX_LABEL_LENGTH] bytes of `text` into a [Label], never splitting a
/// character.
pub fn truncate_label(text: &str) -> Label {
    let mut label = Label::new();
    for character in text.chars() {
        if label.push(character).is_err() {
            break;
        }
    }

    label
}

/// Accumulates serialized parameter data.
///
/// Payload types bound their variable-length content through their capacities, so the
/// written data never exceeds [RDM_MAX_PARAMETER_DATA_LENGTH].
#[derive(Default)]
pub struct PayloadWriter {
    data: DataPack,
}

impl PayloadWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn put(&mut self, bytes: &[u8]) -> &mut Self {
        let fits = self.data.extend_from_slice(bytes).is_ok();
        debug_assert!(
            fits,
            "parameter data exceeds {} bytes",
            RDM_MAX_PARAMETER_DATA_LENGTH
        );

        self
    }

    pub fn put_u8(&mut self, value: u8) -> &mut Self {
        self.put(&[value])
    }

    pub fn put_u16(&mut self, value: u16) -> &mut Self {
        self.put(&encode_u16_be(value))
    }

    pub fn put_u32(&mut self, value: u32) -> &mut Self {
        self.put(&encode_u32_be(value))
    }

    pub fn put_records<R: Record>(&mut self, records: &[R]) -> &mut Self {
        encode_record_array(records, self);
        self
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn finish(self) -> DataPack {
        self.data
    }
}

/// A fixed-size entry of a record array.
pub trait Record: Sized {
    const SIZE: usize;

    fn encode_record(&self, writer: &mut PayloadWriter);

    /// `buffer` holds exactly [Record::SIZE] bytes.
    fn decode_record(buffer: &[u8]) -> Result<Self, PayloadError>;
}

impl Record for u16 {
    const SIZE: usize = 2;

    fn encode_record(&self, writer: &mut PayloadWriter) {
        writer.put_u16(*self);
    }

    fn decode_record(buffer: &[u8]) -> Result<Self, PayloadError> {
        decode_u16_be(buffer)
    }
}

/// Concatenates the encodings of `records` in order.
pub fn encode_record_array<R: Record>(records: &[R], writer: &mut PayloadWriter) {
    for record in records {
        record.encode_record(writer);
    }
}

/// Decodes records while at least [Record::SIZE] bytes remain. A partial trailing record is
/// rejected as [PayloadError::MalformedPayload].
pub fn decode_record_array<R: Record, const N: usize>(
    buffer: &[u8],
) -> Result<heapless::Vec<R, N>, PayloadError> {
    let chunks = buffer.chunks_exact(R::SIZE);
    let remaining = chunks.remainder().len();

    let mut records = heapless::Vec::new();
    for chunk in chunks {
        records
            .push(R::decode_record(chunk)?)
            .map_err(|_| PayloadError::CapacityExceeded { capacity: N })?;
    }

    if remaining != 0 {
        return Err(PayloadError::MalformedPayload { remaining });
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_u32_big_endian() {
        assert_eq!(encode_u32_be(0x0102_0304), [1, 2, 3, 4]);
        assert_eq!(decode_u32_be(&[1, 2, 3, 4, 5]).unwrap(), 0x0102_0304);
        assert_eq!(decode_u32_be(&[0xFF; 4]).unwrap(), u32::MAX);
    }

    #[test]
    fn test_scalar_truncated() {
        assert!(matches!(
            decode_u32_be(&[1, 2, 3]),
            Err(PayloadError::TruncatedData {
                needed: 4,
                available: 3
            })
        ));
        assert!(matches!(
            decode_u16_be(&[1]),
            Err(PayloadError::TruncatedData { .. })
        ));
        assert!(decode_u8(&[]).is_err());
    }

    #[test]
    fn test_record_array() {
        let mut writer = PayloadWriter::new();
        writer.put_records(&[0x0060u16, 0x1000]);
        let data = writer.finish();
        assert_eq!(&data[..], &[0x00, 0x60, 0x10, 0x00]);

        let decoded = decode_record_array::<u16, 4>(&data).unwrap();
        assert_eq!(&decoded[..], &[0x0060, 0x1000]);

        assert!(decode_record_array::<u16, 4>(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_record_array_partial_record() {
        assert!(matches!(
            decode_record_array::<u16, 4>(&[0x00, 0x60, 0x10]),
            Err(PayloadError::MalformedPayload { remaining: 1 })
        ));
    }

    #[test]
    fn test_record_array_capacity() {
        assert!(matches!(
            decode_record_array::<u16, 1>(&[0, 1, 0, 2]),
            Err(PayloadError::CapacityExceeded { capacity: 1 })
        ));
    }

    #[test]
    fn test_labels() {
        assert_eq!(decode_label(b"Dimmer").unwrap().as_str(), "Dimmer");
        assert!(decode_label(b"").unwrap().is_empty());
        assert!(matches!(
            decode_label(&[0xC3, 0x28]),
            Err(PayloadError::InvalidField("label"))
        ));

        let long = "0123456789012345678901234567890123456789";
        assert_eq!(truncate_label(long).len(), 32);
        // A multi byte character at the boundary is dropped as a whole.
        let umlaut = "0123456789012345678901234567890ä";
        assert_eq!(
            truncate_label(umlaut).as_str(),
            "0123456789012345678901234567890"
        );
    }
}
