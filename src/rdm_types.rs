//! Payloads of the parameters derived from the device capability model.

use crate::codec::{
    decode_label, decode_record_array, decode_u16_be, decode_u8, require, truncate_label, Label,
    PayloadWriter, Record,
};
use crate::command_class::ResponseCommandClass;
use crate::consts::{
    DMX_MAX_ADDRESS, RDM_DEFAULT_SLOT_VALUE_RECORD_SIZE, RDM_DEVICE_INFO_SIZE,
    RDM_MAX_DEFAULT_SLOT_VALUE_RECORDS, RDM_MAX_LABEL_LENGTH, RDM_MAX_SLOT_INFO_RECORDS,
    RDM_MAX_SUPPORTED_PARAMETERS_PER_REQUEST, RDM_PROTOCOL_VERSION, RDM_SLOT_INFO_RECORD_SIZE,
};
use crate::layouts::{
    rdm_default_slot_value_layout, rdm_device_info_layout, rdm_personality_description_layout,
    rdm_slot_description_layout, rdm_slot_info_layout,
};
use crate::payload::{check_length, PayloadError, RdmPayload};
use crate::personality::SlotType;
use crate::pids;
use crate::types::DataPack;

/// Implements [RdmPayload] for a GET response that consists of a single label.
macro_rules! label_payload {
    ($(#[$meta:meta])* $name:ident, $pid:path) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, Eq)]
        #[cfg_attr(feature = "defmt", derive(defmt::Format))]
        pub struct $name {
            pub label: Label,
        }

        impl $name {
            /// Longer texts get truncated to 32 bytes.
            pub fn new(label: &str) -> Self {
                Self {
                    label: truncate_label(label),
                }
            }
        }

        impl RdmPayload for $name {
            const PARAMETER_ID: u16 = $pid;
            const COMMAND_CLASS: ResponseCommandClass = ResponseCommandClass::GetCommandResponse;
            const PDL_MIN: usize = 0;
            const PDL_MAX: usize = RDM_MAX_LABEL_LENGTH;

            fn serialize(&self) -> DataPack {
                let mut writer = PayloadWriter::new();
                writer.put(self.label.as_bytes());
                writer.finish()
            }

            fn decode_fields(parameter_data: &[u8]) -> Result<Self, PayloadError> {
                Ok(Self {
                    label: decode_label(parameter_data)?,
                })
            }
        }
    };
}

label_payload!(DeviceModelDescription, pids::DEVICE_MODEL_DESCRIPTION);
label_payload!(ManufacturerLabel, pids::MANUFACTURER_LABEL);
label_payload!(DeviceLabel, pids::DEVICE_LABEL);
label_payload!(SoftwareVersionLabel, pids::SOFTWARE_VERSION_LABEL);
label_payload!(
    /// The version of the boot loader.
    BootSoftwareVersionLabel,
    pids::BOOT_SOFTWARE_VERSION_LABEL
);

/// Product category of ANSI E1.20 Table A-5. The high byte is the coarse category, the low
/// byte refines it.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ProductCategory(pub u16);

impl ProductCategory {
    pub const NOT_DECLARED: Self = Self(0x0000);
    pub const FIXTURE: Self = Self(0x0100);
    pub const FIXTURE_FIXED: Self = Self(0x0101);
    pub const FIXTURE_MOVING_YOKE: Self = Self(0x0102);
    pub const FIXTURE_MOVING_MIRROR: Self = Self(0x0103);
    pub const DIMMER: Self = Self(0x0500);
    pub const DATA: Self = Self(0x0800);
    pub const DATA_DISTRIBUTION: Self = Self(0x0801);
    pub const DATA_CONVERSION: Self = Self(0x0802);
    pub const CONTROL: Self = Self(0x7000);
    pub const CONTROL_CONTROLLER: Self = Self(0x7001);
    pub const OTHER: Self = Self(0x7FFF);

    pub const fn new(coarse: u8, fine: u8) -> Self {
        Self(u16::from_be_bytes([coarse, fine]))
    }

    pub fn coarse(&self) -> u8 {
        self.0.to_be_bytes()[0]
    }

    pub fn fine(&self) -> u8 {
        self.0.to_be_bytes()[1]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DmxStartAddress {
    /// The requested device has a dmx footprint of 0.
    NoAddress,
    /// The requested device does allocate dmx addresses.
    Address(u16),
}

impl DmxStartAddress {
    pub fn as_u16(&self) -> u16 {
        match self {
            DmxStartAddress::Address(address) => *address,
            DmxStartAddress::NoAddress => 0xFFFF,
        }
    }
}

impl TryFrom<u16> for DmxStartAddress {
    type Error = PayloadError;

    fn try_from(start_address: u16) -> Result<Self, Self::Error> {
        if start_address == 0xFFFF {
            return Ok(Self::NoAddress);
        }

        if !(1..=DMX_MAX_ADDRESS).contains(&start_address) {
            return Err(PayloadError::InvalidField("dmx_start_address"));
        }

        Ok(Self::Address(start_address))
    }
}

impl RdmPayload for DmxStartAddress {
    const PARAMETER_ID: u16 = pids::DMX_START_ADDRESS;
    const COMMAND_CLASS: ResponseCommandClass = ResponseCommandClass::GetCommandResponse;
    const PDL_MIN: usize = 2;
    const PDL_MAX: usize = 2;

    fn serialize(&self) -> DataPack {
        let mut writer = PayloadWriter::new();
        writer.put_u16(self.as_u16());
        writer.finish()
    }

    fn decode_fields(parameter_data: &[u8]) -> Result<Self, PayloadError> {
        decode_u16_be(parameter_data)?.try_into()
    }
}

/// Response to GET IDENTIFY_DEVICE.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct IdentifyDevice(pub bool);

impl RdmPayload for IdentifyDevice {
    const PARAMETER_ID: u16 = pids::IDENTIFY_DEVICE;
    const COMMAND_CLASS: ResponseCommandClass = ResponseCommandClass::GetCommandResponse;
    const PDL_MIN: usize = 1;
    const PDL_MAX: usize = 1;

    fn serialize(&self) -> DataPack {
        let mut writer = PayloadWriter::new();
        writer.put_u8(self.0 as u8);
        writer.finish()
    }

    fn decode_fields(parameter_data: &[u8]) -> Result<Self, PayloadError> {
        match decode_u8(parameter_data)? {
            0 => Ok(Self(false)),
            1 => Ok(Self(true)),
            _ => Err(PayloadError::InvalidField("identify")),
        }
    }
}

pub type SupportedParameterList = heapless::Vec<u16, RDM_MAX_SUPPORTED_PARAMETERS_PER_REQUEST>;

/// Response to GET SUPPORTED_PARAMETERS. Doesn't list the parameters every responder has to
/// support.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SupportedParameters {
    pub parameter_ids: SupportedParameterList,
}

impl RdmPayload for SupportedParameters {
    const PARAMETER_ID: u16 = pids::SUPPORTED_PARAMETERS;
    const COMMAND_CLASS: ResponseCommandClass = ResponseCommandClass::GetCommandResponse;
    const PDL_MIN: usize = 0;
    const PDL_MAX: usize = RDM_MAX_SUPPORTED_PARAMETERS_PER_REQUEST * 2;

    fn serialize(&self) -> DataPack {
        let mut writer = PayloadWriter::new();
        writer.put_records(&self.parameter_ids);
        writer.finish()
    }

    fn decode_fields(parameter_data: &[u8]) -> Result<Self, PayloadError> {
        Ok(Self {
            parameter_ids: decode_record_array(parameter_data)?,
        })
    }
}

/// Response to GET DEVICE_INFO.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DeviceInfo {
    pub device_model_id: u16,
    pub product_category: ProductCategory,
    pub software_version: u32,
    pub dmx_footprint: u16,
    pub current_personality: u8,
    pub personality_count: u8,
    pub dmx_start_address: DmxStartAddress,
    pub sub_device_count: u16,
    pub sensor_count: u8,
}

impl RdmPayload for DeviceInfo {
    const PARAMETER_ID: u16 = pids::DEVICE_INFO;
    const COMMAND_CLASS: ResponseCommandClass = ResponseCommandClass::GetCommandResponse;
    const PDL_MIN: usize = RDM_DEVICE_INFO_SIZE;
    const PDL_MAX: usize = RDM_DEVICE_INFO_SIZE;

    fn serialize(&self) -> DataPack {
        let mut buffer = [0u8; RDM_DEVICE_INFO_SIZE];
        let mut view = rdm_device_info_layout::View::new(&mut buffer[..]);

        view.protocol_version_mut().write(RDM_PROTOCOL_VERSION);
        view.device_model_id_mut().write(self.device_model_id);
        view.product_category_mut().write(self.product_category.0);
        view.software_version_id_mut().write(self.software_version);
        view.dmx_footprint_mut().write(self.dmx_footprint);
        view.current_personality_mut()
            .write(self.current_personality);
        view.personality_count_mut().write(self.personality_count);
        view.dmx_start_address_mut()
            .write(self.dmx_start_address.as_u16());
        view.sub_device_count_mut().write(self.sub_device_count);
        view.sensor_count_mut().write(self.sensor_count);

        let mut writer = PayloadWriter::new();
        writer.put(&buffer);
        writer.finish()
    }

    fn decode_fields(parameter_data: &[u8]) -> Result<Self, PayloadError> {
        check_length::<Self>(parameter_data.len())?;
        let view = rdm_device_info_layout::View::new(parameter_data);

        Ok(Self {
            device_model_id: view.device_model_id().read(),
            product_category: ProductCategory(view.product_category().read()),
            software_version: view.software_version_id().read(),
            dmx_footprint: view.dmx_footprint().read(),
            current_personality: view.current_personality().read(),
            personality_count: view.personality_count().read(),
            dmx_start_address: view.dmx_start_address().read().try_into()?,
            sub_device_count: view.sub_device_count().read(),
            sensor_count: view.sensor_count().read(),
        })
    }
}

/// Response to GET DMX_PERSONALITY.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DmxPersonality {
    pub current_personality: u8,
    pub personality_count: u8,
}

impl RdmPayload for DmxPersonality {
    const PARAMETER_ID: u16 = pids::DMX_PERSONALITY;
    const COMMAND_CLASS: ResponseCommandClass = ResponseCommandClass::GetCommandResponse;
    const PDL_MIN: usize = 2;
    const PDL_MAX: usize = 2;

    fn serialize(&self) -> DataPack {
        let mut writer = PayloadWriter::new();
        writer
            .put_u8(self.current_personality)
            .put_u8(self.personality_count);
        writer.finish()
    }

    fn decode_fields(parameter_data: &[u8]) -> Result<Self, PayloadError> {
        let current_personality = decode_u8(parameter_data)?;
        let personality_count = decode_u8(&parameter_data[1..])?;

        if current_personality == 0 || current_personality > personality_count {
            return Err(PayloadError::InvalidField("current_personality"));
        }

        Ok(Self {
            current_personality,
            personality_count,
        })
    }
}

/// Response to GET DMX_PERSONALITY_DESCRIPTION.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DmxPersonalityDescription {
    pub personality: u8,
    pub dmx_footprint: u16,
    pub description: Label,
}

impl RdmPayload for DmxPersonalityDescription {
    const PARAMETER_ID: u16 = pids::DMX_PERSONALITY_DESCRIPTION;
    const COMMAND_CLASS: ResponseCommandClass = ResponseCommandClass::GetCommandResponse;
    const PDL_MIN: usize = 3;
    const PDL_MAX: usize = 3 + RDM_MAX_LABEL_LENGTH;

    fn serialize(&self) -> DataPack {
        let mut writer = PayloadWriter::new();
        writer
            .put_u8(self.personality)
            .put_u16(self.dmx_footprint)
            .put(self.description.as_bytes());
        writer.finish()
    }

    fn decode_fields(parameter_data: &[u8]) -> Result<Self, PayloadError> {
        check_length::<Self>(parameter_data.len())?;
        let view = rdm_personality_description_layout::View::new(parameter_data);

        Ok(Self {
            personality: view.personality().read(),
            dmx_footprint: view.dmx_footprint().read(),
            description: decode_label(view.description())?,
        })
    }
}

/// One entry of SLOT_INFO.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SlotInfoRecord {
    pub slot_offset: u16,
    pub slot_type: SlotType,
    /// The slot category for primary slots, the offset of the refined slot for secondary ones.
    pub slot_label_id: u16,
}

impl Record for SlotInfoRecord {
    const SIZE: usize = RDM_SLOT_INFO_RECORD_SIZE;

    fn encode_record(&self, writer: &mut PayloadWriter) {
        let mut buffer = [0u8; RDM_SLOT_INFO_RECORD_SIZE];
        let mut view = rdm_slot_info_layout::View::new(&mut buffer[..]);
        view.slot_offset_mut().write(self.slot_offset);
        view.slot_type_mut().write(self.slot_type as u8);
        view.slot_label_id_mut().write(self.slot_label_id);

        writer.put(&buffer);
    }

    fn decode_record(buffer: &[u8]) -> Result<Self, PayloadError> {
        require(buffer, Self::SIZE)?;
        let view = rdm_slot_info_layout::View::new(buffer);

        Ok(Self {
            slot_offset: view.slot_offset().read(),
            slot_type: SlotType::try_from(view.slot_type().read())
                .map_err(|_| PayloadError::InvalidField("slot_type"))?,
            slot_label_id: view.slot_label_id().read(),
        })
    }
}

pub type SlotInfoRecords = heapless::Vec<SlotInfoRecord, RDM_MAX_SLOT_INFO_RECORDS>;

/// Response to GET SLOT_INFO.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SlotInfo {
    pub slots: SlotInfoRecords,
}

impl RdmPayload for SlotInfo {
    const PARAMETER_ID: u16 = pids::SLOT_INFO;
    const COMMAND_CLASS: ResponseCommandClass = ResponseCommandClass::GetCommandResponse;
    const PDL_MIN: usize = 0;
    const PDL_MAX: usize = RDM_MAX_SLOT_INFO_RECORDS * RDM_SLOT_INFO_RECORD_SIZE;

    fn serialize(&self) -> DataPack {
        let mut writer = PayloadWriter::new();
        writer.put_records(&self.slots);
        writer.finish()
    }

    fn decode_fields(parameter_data: &[u8]) -> Result<Self, PayloadError> {
        Ok(Self {
            slots: decode_record_array(parameter_data)?,
        })
    }
}

/// Response to GET SLOT_DESCRIPTION.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SlotDescription {
    pub slot_offset: u16,
    pub description: Label,
}

impl RdmPayload for SlotDescription {
    const PARAMETER_ID: u16 = pids::SLOT_DESCRIPTION;
    const COMMAND_CLASS: ResponseCommandClass = ResponseCommandClass::GetCommandResponse;
    const PDL_MIN: usize = 2;
    const PDL_MAX: usize = 2 + RDM_MAX_LABEL_LENGTH;

    fn serialize(&self) -> DataPack {
        let mut writer = PayloadWriter::new();
        writer
            .put_u16(self.slot_offset)
            .put(self.description.as_bytes());
        writer.finish()
    }

    fn decode_fields(parameter_data: &[u8]) -> Result<Self, PayloadError> {
        check_length::<Self>(parameter_data.len())?;
        let view = rdm_slot_description_layout::View::new(parameter_data);

        Ok(Self {
            slot_offset: view.slot_offset().read(),
            description: decode_label(view.description())?,
        })
    }
}

/// One entry of DEFAULT_SLOT_VALUE.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DefaultSlotValueRecord {
    pub slot_offset: u16,
    pub default_value: u8,
}

impl Record for DefaultSlotValueRecord {
    const SIZE: usize = RDM_DEFAULT_SLOT_VALUE_RECORD_SIZE;

    fn encode_record(&self, writer: &mut PayloadWriter) {
        let mut buffer = [0u8; RDM_DEFAULT_SLOT_VALUE_RECORD_SIZE];
        let mut view = rdm_default_slot_value_layout::View::new(&mut buffer[..]);
        view.slot_offset_mut().write(self.slot_offset);
        view.default_value_mut().write(self.default_value);

        writer.put(&buffer);
    }

    fn decode_record(buffer: &[u8]) -> Result<Self, PayloadError> {
        require(buffer, Self::SIZE)?;
        let view = rdm_default_slot_value_layout::View::new(buffer);

        Ok(Self {
            slot_offset: view.slot_offset().read(),
            default_value: view.default_value().read(),
        })
    }
}

pub type DefaultSlotValueRecords =
    heapless::Vec<DefaultSlotValueRecord, RDM_MAX_DEFAULT_SLOT_VALUE_RECORDS>;

/// Response to GET DEFAULT_SLOT_VALUE.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DefaultSlotValue {
    pub slots: DefaultSlotValueRecords,
}

impl RdmPayload for DefaultSlotValue {
    const PARAMETER_ID: u16 = pids::DEFAULT_SLOT_VALUE;
    const COMMAND_CLASS: ResponseCommandClass = ResponseCommandClass::GetCommandResponse;
    const PDL_MIN: usize = 0;
    const PDL_MAX: usize = RDM_MAX_DEFAULT_SLOT_VALUE_RECORDS * RDM_DEFAULT_SLOT_VALUE_RECORD_SIZE;

    fn serialize(&self) -> DataPack {
        let mut writer = PayloadWriter::new();
        writer.put_records(&self.slots);
        writer.finish()
    }

    fn decode_fields(parameter_data: &[u8]) -> Result<Self, PayloadError> {
        Ok(Self {
            slots: decode_record_array(parameter_data)?,
        })
    }
}

/// Returned by parameter packages where the response might not fit into one package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OverflowMessageResp<T> {
    /// Has received the complete message.
    Complete(T),
    /// Has not received the complete message.
    /// Request the same pid to get the next part until you receive [OverflowMessageResp::Complete].
    Incomplete(T),
}

impl<T> OverflowMessageResp<T> {
    pub fn into_inner(self) -> T {
        match self {
            Self::Complete(inner) | Self::Incomplete(inner) => inner,
        }
    }

    pub fn is_complete(&self) -> bool {
        matches!(self, Self::Complete(_))
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> OverflowMessageResp<U> {
        match self {
            Self::Complete(inner) => OverflowMessageResp::Complete(f(inner)),
            Self::Incomplete(inner) => OverflowMessageResp::Incomplete(f(inner)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_device_info_layout() {
        let device_info = DeviceInfo {
            device_model_id: 20,
            product_category: ProductCategory::DATA_CONVERSION,
            software_version: 0x1234,
            dmx_footprint: 5,
            current_personality: 1,
            personality_count: 3,
            dmx_start_address: DmxStartAddress::Address(1),
            sub_device_count: 0,
            sensor_count: 0,
        };

        let data = device_info.serialize();
        assert_eq!(
            &data[..],
            &[
                0x01, 0x00, 0x00, 0x14, 0x08, 0x02, 0x00, 0x00, 0x12, 0x34, 0x00, 0x05, 0x01,
                0x03, 0x00, 0x01, 0x00, 0x00, 0x00,
            ]
        );
        assert_eq!(DeviceInfo::deserialize(&data).unwrap(), device_info);
        assert!(matches!(
            DeviceInfo::deserialize(&data[..18]),
            Err(PayloadError::LengthOutOfRange { .. })
        ));
    }

    #[test]
    fn test_product_category() {
        let category = ProductCategory::new(0x08, 0x02);
        assert_eq!(category, ProductCategory::DATA_CONVERSION);
        assert_eq!(category.coarse(), 0x08);
        assert_eq!(category.fine(), 0x02);
    }

    #[test]
    fn test_dmx_start_address() {
        assert_eq!(
            DmxStartAddress::deserialize(&[0xFF, 0xFF]).unwrap(),
            DmxStartAddress::NoAddress
        );
        assert_eq!(
            DmxStartAddress::deserialize(&[0x02, 0x00]).unwrap(),
            DmxStartAddress::Address(512)
        );
        assert_eq!(
            DmxStartAddress::deserialize(&[0x02, 0x01]).unwrap_err(),
            PayloadError::InvalidField("dmx_start_address")
        );
        assert!(DmxStartAddress::deserialize(&[0x00, 0x00]).is_err());
    }

    #[test]
    fn test_identify() {
        assert_eq!(
            IdentifyDevice::deserialize(&[0]).unwrap(),
            IdentifyDevice(false)
        );
        assert_eq!(
            IdentifyDevice::deserialize(&[1]).unwrap(),
            IdentifyDevice(true)
        );
        assert!(IdentifyDevice::deserialize(&[3]).is_err());
        assert!(matches!(
            IdentifyDevice::deserialize(&[0, 0]),
            Err(PayloadError::LengthOutOfRange { .. })
        ));
    }

    #[test]
    fn test_supported_parameters() {
        let data = [0x00, 0x60, 0x10, 0x00];
        let supported = SupportedParameters::deserialize(&data).unwrap();
        assert_eq!(&supported.parameter_ids[..], &[0x0060, 0x1000]);
        assert_eq!(&supported.serialize()[..], &data);

        assert_eq!(
            SupportedParameters::deserialize(&data[..3]).unwrap_err(),
            PayloadError::MalformedPayload { remaining: 1 }
        );
    }

    #[test]
    fn test_personality() {
        let data = DmxPersonality {
            current_personality: 2,
            personality_count: 3,
        }
        .serialize();
        assert_eq!(&data[..], &[2, 3]);

        assert_eq!(
            DmxPersonality::deserialize(&[4, 3]).unwrap_err(),
            PayloadError::InvalidField("current_personality")
        );
    }

    #[test]
    fn test_personality_description() {
        let description = DmxPersonalityDescription {
            personality: 1,
            dmx_footprint: 5,
            description: truncate_label("5CH RGB"),
        };
        let data = description.serialize();
        assert_eq!(&data[..3], &[0x01, 0x00, 0x05]);
        assert_eq!(&data[3..], b"5CH RGB");
        assert_eq!(
            DmxPersonalityDescription::deserialize(&data).unwrap(),
            description
        );

        assert!(matches!(
            DmxPersonalityDescription::deserialize(&[0x01, 0x00]),
            Err(PayloadError::LengthOutOfRange { .. })
        ));
    }

    #[test]
    fn test_slot_info() {
        let data = [
            0x00, 0x00, 0x00, 0x00, 0x01, // dimmer
            0x00, 0x01, 0x01, 0x00, 0x00, // dimmer fine
        ];
        let slot_info = SlotInfo::deserialize(&data).unwrap();
        assert_eq!(
            &slot_info.slots[..],
            &[
                SlotInfoRecord {
                    slot_offset: 0,
                    slot_type: SlotType::Primary,
                    slot_label_id: 0x0001,
                },
                SlotInfoRecord {
                    slot_offset: 1,
                    slot_type: SlotType::SecondaryFine,
                    slot_label_id: 0,
                },
            ]
        );
        assert_eq!(&slot_info.serialize()[..], &data);

        assert_eq!(
            SlotInfo::deserialize(&data[..7]).unwrap_err(),
            PayloadError::MalformedPayload { remaining: 2 }
        );

        let mut unknown_type = data;
        unknown_type[2] = 0x42;
        assert_eq!(
            SlotInfo::deserialize(&unknown_type).unwrap_err(),
            PayloadError::InvalidField("slot_type")
        );
    }

    #[test]
    fn test_slot_description() {
        let data = SlotDescription {
            slot_offset: 1,
            description: truncate_label("Strobe"),
        }
        .serialize();
        assert_eq!(&data[..], b"\x00\x01Strobe");
        assert_eq!(
            SlotDescription::deserialize(&data).unwrap().description.as_str(),
            "Strobe"
        );
    }

    #[test]
    fn test_default_slot_value() {
        let data = [0x00, 0x01, 33, 0x00, 0x02, 0];
        let default_slot_value = DefaultSlotValue::deserialize(&data).unwrap();
        assert_eq!(default_slot_value.slots.len(), 2);
        assert_eq!(default_slot_value.slots[0].default_value, 33);
        assert_eq!(&default_slot_value.serialize()[..], &data);
    }

    #[test]
    fn test_labels() {
        let label = DeviceLabel::new("Dummy Device 1");
        assert_eq!(&label.serialize()[..], b"Dummy Device 1");
        assert_eq!(DeviceLabel::deserialize(b"Dummy Device 1").unwrap(), label);
        assert_eq!(
            DeviceLabel::deserialize(&[0x41; 33]).unwrap_err(),
            PayloadError::LengthOutOfRange {
                length: 33,
                min: 0,
                max: 32
            }
        );
        let empty = SoftwareVersionLabel::deserialize(&[]).unwrap();
        assert!(empty.label.is_empty());
        assert_eq!(
            BootSoftwareVersionLabel::new("Dummy Software").label.as_str(),
            "Dummy Software"
        );
    }

    #[test]
    fn test_short_fields_are_rejected() {
        assert!(matches!(
            DeviceInfo::decode_fields(&[0x01, 0x00]),
            Err(PayloadError::LengthOutOfRange { length: 2, .. })
        ));
        assert!(matches!(
            DmxPersonalityDescription::decode_fields(&[0x01]),
            Err(PayloadError::LengthOutOfRange { length: 1, .. })
        ));
        assert!(matches!(
            SlotDescription::decode_fields(&[]),
            Err(PayloadError::LengthOutOfRange { length: 0, .. })
        ));
        assert_eq!(
            SlotInfoRecord::decode_record(&[0x00, 0x01]).unwrap_err(),
            PayloadError::TruncatedData {
                needed: 5,
                available: 2
            }
        );
        assert_eq!(
            DefaultSlotValueRecord::decode_record(&[0x00]).unwrap_err(),
            PayloadError::TruncatedData {
                needed: 3,
                available: 1
            }
        );
    }
}
