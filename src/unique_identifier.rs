use crate::codec::{decode_u16_be, decode_u32_be, PayloadWriter, Record};
use crate::consts::{BROADCAST_UID, RDM_UID_SIZE};
use crate::payload::PayloadError;

/// The 48 bit unique id of a device, manufacturer id followed by device id.
/// There shouldn't be multiple devices with same unique id.
/// The manufacturer uids are assigned by the esta.
/// [more information](https://tsp.esta.org/tsp/working_groups/CP/mfctrIDs.php)
///
/// Ordering follows the 48 bit value.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct UniqueIdentifier {
    manufacturer_uid: u16,
    device_uid: u32,
}

impl core::fmt::Display for UniqueIdentifier {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{:04X}:{:08X}", self.manufacturer_uid, self.device_uid)
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for UniqueIdentifier {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "{:04X}:{:08X}", self.manufacturer_uid, self.device_uid);
    }
}

impl UniqueIdentifier {
    /// Fails if `device_uid` is the broadcast device id, such a value only ever addresses
    /// a group of devices.
    pub const fn new(manufacturer_uid: u16, device_uid: u32) -> Result<Self, PayloadError> {
        if device_uid == u32::MAX {
            return Err(PayloadError::InvalidField("uid"));
        }

        Ok(UniqueIdentifier {
            manufacturer_uid,
            device_uid,
        })
    }

    pub fn manufacturer_uid(&self) -> u16 {
        self.manufacturer_uid
    }

    pub fn device_uid(&self) -> u32 {
        self.device_uid
    }

    pub fn to_bytes(&self) -> [u8; RDM_UID_SIZE] {
        let mut buffer = [0u8; RDM_UID_SIZE];

        buffer[..2].copy_from_slice(&self.manufacturer_uid.to_be_bytes());
        buffer[2..].copy_from_slice(&self.device_uid.to_be_bytes());

        buffer
    }

    /// Reads the first six bytes of `buffer`. Any 48 bit value is accepted, so only a short
    /// buffer fails.
    pub fn from_bytes(buffer: &[u8]) -> Result<Self, PayloadError> {
        if buffer.len() < RDM_UID_SIZE {
            return Err(PayloadError::TruncatedData {
                needed: RDM_UID_SIZE,
                available: buffer.len(),
            });
        }

        Ok(UniqueIdentifier {
            manufacturer_uid: decode_u16_be(buffer)?,
            device_uid: decode_u32_be(&buffer[2..])?,
        })
    }
}

impl Record for UniqueIdentifier {
    const SIZE: usize = RDM_UID_SIZE;

    fn encode_record(&self, writer: &mut PayloadWriter) {
        writer.put(&self.to_bytes());
    }

    fn decode_record(buffer: &[u8]) -> Result<Self, PayloadError> {
        Self::from_bytes(buffer)
    }
}

impl TryFrom<u64> for UniqueIdentifier {
    type Error = PayloadError;

    fn try_from(value: u64) -> Result<Self, Self::Error> {
        if value > BROADCAST_UID {
            return Err(PayloadError::InvalidField("uid"));
        }

        Self::new((value >> u32::BITS) as u16, value as u32)
    }
}

impl From<UniqueIdentifier> for u64 {
    fn from(value: UniqueIdentifier) -> Self {
        ((value.manufacturer_uid as u64) << u32::BITS) | value.device_uid as u64
    }
}

/// Destination of a package.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PackageAddress {
    /// Broadcast to all devices.
    Broadcast,
    /// Broadcast to all devices from a specific manufacturer identified by the manufacturer id
    /// in the u16.
    ManufacturerBroadcast(u16),
    /// Send package to a specific device.
    Device(UniqueIdentifier),
}

impl PackageAddress {
    pub fn from_bytes(buffer: &[u8; RDM_UID_SIZE]) -> Self {
        let manufacturer_uid = u16::from_be_bytes([buffer[0], buffer[1]]);
        let device_uid = u32::from_be_bytes([buffer[2], buffer[3], buffer[4], buffer[5]]);

        match (manufacturer_uid, device_uid) {
            (u16::MAX, u32::MAX) => Self::Broadcast,
            (manufacturer_uid, u32::MAX) => Self::ManufacturerBroadcast(manufacturer_uid),
            (manufacturer_uid, device_uid) => Self::Device(UniqueIdentifier {
                manufacturer_uid,
                device_uid,
            }),
        }
    }

    pub fn to_bytes(&self) -> [u8; RDM_UID_SIZE] {
        match self {
            Self::Broadcast => [0xFFu8; RDM_UID_SIZE],
            Self::ManufacturerBroadcast(manufacturer_uid) => {
                let mut buffer = [0xFFu8; RDM_UID_SIZE];
                buffer[..2].copy_from_slice(&manufacturer_uid.to_be_bytes());

                buffer
            },
            Self::Device(uid) => uid.to_bytes(),
        }
    }

    pub fn is_broadcast(&self) -> bool {
        !matches!(self, PackageAddress::Device(_))
    }
}

#[cfg(test)]
mod tests {
    use super::{PackageAddress, UniqueIdentifier};
    use crate::payload::PayloadError;

    #[test]
    fn test_uid_bytes() {
        let uid = UniqueIdentifier::new(0x9FFF, 0x0000_0001).unwrap();
        assert_eq!(uid.to_bytes(), [0x9F, 0xFF, 0x00, 0x00, 0x00, 0x01]);
        assert_eq!(UniqueIdentifier::from_bytes(&uid.to_bytes()).unwrap(), uid);
        assert_eq!(uid.to_string(), "9FFF:00000001");
    }

    #[test]
    fn test_uid_truncated() {
        assert!(matches!(
            UniqueIdentifier::from_bytes(&[0x9F, 0xFF, 0x00, 0x00, 0x01]),
            Err(PayloadError::TruncatedData {
                needed: 6,
                available: 5
            })
        ));
    }

    #[test]
    fn test_uid_rejects_broadcast() {
        assert!(UniqueIdentifier::new(0x7FF0, u32::MAX).is_err());
    }

    #[test]
    fn test_uid_decodes_any_value() {
        let uid = UniqueIdentifier::from_bytes(&[0xFF; 6]).unwrap();
        assert_eq!(uid.manufacturer_uid(), 0xFFFF);
        assert_eq!(uid.device_uid(), u32::MAX);
        assert_eq!(uid.to_bytes(), [0xFF; 6]);
    }

    #[test]
    fn test_uid_ordering() {
        let low = UniqueIdentifier::new(0x0001, 0xFFFF_FFFE).unwrap();
        let high = UniqueIdentifier::new(0x0002, 0x0000_0000).unwrap();
        assert!(low < high);
        assert!(u64::from(low) < u64::from(high));
        assert_eq!(UniqueIdentifier::try_from(u64::from(high)).unwrap(), high);
        assert!(UniqueIdentifier::try_from(1u64 << 48).is_err());
    }

    #[test]
    fn test_package_address() {
        assert_eq!(
            PackageAddress::from_bytes(&[0xFF; 6]),
            PackageAddress::Broadcast
        );
        assert_eq!(
            PackageAddress::from_bytes(&[0x7F, 0xF0, 0xFF, 0xFF, 0xFF, 0xFF]),
            PackageAddress::ManufacturerBroadcast(0x7FF0)
        );
        assert!(PackageAddress::ManufacturerBroadcast(0x7FF0).is_broadcast());

        let uid = UniqueIdentifier::new(0x7FF0, 2).unwrap();
        let address = PackageAddress::Device(uid);
        assert!(!address.is_broadcast());
        assert_eq!(PackageAddress::from_bytes(&address.to_bytes()), address);
    }
}
