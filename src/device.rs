//! The capability model of a responder: fixed hardware capabilities declared as statics and the
//! parameter values that change at runtime.
//!
//! ```rust
//! use rdm_payload::device::{
//!     DeviceDefinition, ParameterDescriptor, ParameterKind, ParameterValue, RdmDevice,
//! };
//! use rdm_payload::personality::{Personality, Slot, SlotCategory};
//! use rdm_payload::pids;
//! use rdm_payload::rdm_types::ProductCategory;
//! use rdm_payload::unique_identifier::UniqueIdentifier;
//!
//! static DIMMER_SLOTS: [Slot; 1] = [Slot::primary(0, SlotCategory::INTENSITY, "Dimmer")];
//! static PERSONALITIES: [Personality; 1] = [Personality::new(1, "Dimmer", &DIMMER_SLOTS)];
//! static PARAMETERS: [ParameterDescriptor; 1] =
//!     [ParameterDescriptor::new(pids::BOOT_SOFTWARE_VERSION_ID, ParameterKind::U32)];
//!
//! let device = RdmDevice::new(DeviceDefinition {
//!     uid: UniqueIdentifier::new(0x7FF0, 1).unwrap(),
//!     manufacturer_label: "Example",
//!     device_model_id: 1,
//!     product_category: ProductCategory::DIMMER,
//!     software_version_id: 1,
//!     software_version_label: "1.0.0",
//!     model_description: "Single Dimmer",
//!     dmx_addressable: true,
//!     personalities: &PERSONALITIES,
//!     parameters: &PARAMETERS,
//! })
//! .unwrap();
//!
//! device.try_set_parameter(pids::IDENTIFY_DEVICE, true).unwrap();
//! assert_eq!(device.parameter(pids::IDENTIFY_DEVICE), Some(ParameterValue::Bool(true)));
//! assert_eq!(device.parameter(pids::BOOT_SOFTWARE_VERSION_ID), Some(ParameterValue::U32(0)));
//! assert_eq!(device.footprint(), 1);
//! ```

use std::collections::BTreeMap;
use std::sync::{PoisonError, RwLock};

use crate::codec::{
    decode_label, decode_u16_be, decode_u32_be, decode_u8, truncate_label, Label, PayloadWriter,
};
use crate::consts::{DMX_MAX_ADDRESS, RDM_MAX_PERSONALITIES};
use crate::payload::PayloadError;
use crate::personality::{DeviceDefinitionError, Personality};
use crate::pids;
use crate::rdm_types::{
    DefaultSlotValue, DefaultSlotValueRecords, DeviceInfo, DeviceLabel, DeviceModelDescription,
    DmxPersonality, DmxPersonalityDescription, DmxStartAddress, ManufacturerLabel,
    OverflowMessageResp, ProductCategory, SlotDescription, SlotInfo, SlotInfoRecords,
    SoftwareVersionLabel, SupportedParameterList, SupportedParameters,
};
use crate::types::{DataPack, NackReason};
use crate::unique_identifier::UniqueIdentifier;

/// Parameters every responder answers. They are not listed in SUPPORTED_PARAMETERS.
pub const REQUIRED_PIDS: [u16; 5] = [
    pids::SUPPORTED_PARAMETERS,
    pids::DEVICE_INFO,
    pids::SOFTWARE_VERSION_LABEL,
    pids::DMX_START_ADDRESS,
    pids::IDENTIFY_DEVICE,
];

/// Parameters derived from the model, answered by every [RdmDevice].
const MODEL_PIDS: [u16; 8] = [
    pids::DEVICE_MODEL_DESCRIPTION,
    pids::MANUFACTURER_LABEL,
    pids::DEVICE_LABEL,
    pids::DMX_PERSONALITY,
    pids::DMX_PERSONALITY_DESCRIPTION,
    pids::SLOT_INFO,
    pids::SLOT_DESCRIPTION,
    pids::DEFAULT_SLOT_VALUE,
];

/// The declared type of a stored parameter.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ParameterKind {
    Bool,
    U8,
    U16,
    U32,
    Label,
}

/// The current value of a stored parameter.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum ParameterValue {
    Bool(bool),
    U8(u8),
    U16(u16),
    U32(u32),
    Label(Label),
}

impl ParameterValue {
    pub fn kind(&self) -> ParameterKind {
        match self {
            Self::Bool(_) => ParameterKind::Bool,
            Self::U8(_) => ParameterKind::U8,
            Self::U16(_) => ParameterKind::U16,
            Self::U32(_) => ParameterKind::U32,
            Self::Label(_) => ParameterKind::Label,
        }
    }

    /// The value a parameter holds after power up.
    pub fn default_for(kind: ParameterKind) -> Self {
        match kind {
            ParameterKind::Bool => Self::Bool(false),
            ParameterKind::U8 => Self::U8(0),
            ParameterKind::U16 => Self::U16(0),
            ParameterKind::U32 => Self::U32(0),
            ParameterKind::Label => Self::Label(Label::new()),
        }
    }

    /// Parses the parameter data of a SET request. Numbers are big-endian and must fill the
    /// parameter data exactly.
    pub fn decode(kind: ParameterKind, parameter_data: &[u8]) -> Result<Self, PayloadError> {
        let (value, size) = match kind {
            ParameterKind::Bool => match decode_u8(parameter_data)? {
                0 => (Self::Bool(false), 1),
                1 => (Self::Bool(true), 1),
                _ => return Err(PayloadError::InvalidField("bool")),
            },
            ParameterKind::U8 => (Self::U8(decode_u8(parameter_data)?), 1),
            ParameterKind::U16 => (Self::U16(decode_u16_be(parameter_data)?), 2),
            ParameterKind::U32 => (Self::U32(decode_u32_be(parameter_data)?), 4),
            ParameterKind::Label => {
                let label = decode_label(parameter_data)?;
                let size = label.len();
                (Self::Label(label), size)
            },
        };

        if parameter_data.len() != size {
            return Err(PayloadError::MalformedPayload {
                remaining: parameter_data.len().saturating_sub(size),
            });
        }

        Ok(value)
    }

    /// The parameter data of a GET response.
    pub fn serialize(&self) -> DataPack {
        let mut writer = PayloadWriter::new();
        match self {
            Self::Bool(value) => writer.put_u8(*value as u8),
            Self::U8(value) => writer.put_u8(*value),
            Self::U16(value) => writer.put_u16(*value),
            Self::U32(value) => writer.put_u32(*value),
            Self::Label(label) => writer.put(label.as_bytes()),
        };

        writer.finish()
    }
}

impl From<bool> for ParameterValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<u8> for ParameterValue {
    fn from(value: u8) -> Self {
        Self::U8(value)
    }
}

impl From<u16> for ParameterValue {
    fn from(value: u16) -> Self {
        Self::U16(value)
    }
}

impl From<u32> for ParameterValue {
    fn from(value: u32) -> Self {
        Self::U32(value)
    }
}

impl From<&str> for ParameterValue {
    /// Longer texts get truncated to 32 bytes.
    fn from(value: &str) -> Self {
        Self::Label(truncate_label(value))
    }
}

/// Declares a stored parameter the device answers besides the built in ones.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct ParameterDescriptor {
    pub parameter_id: u16,
    pub kind: ParameterKind,
}

impl ParameterDescriptor {
    pub const fn new(parameter_id: u16, kind: ParameterKind) -> Self {
        Self { parameter_id, kind }
    }
}

/// The fixed capabilities of a device.
#[derive(Debug, Copy, Clone)]
pub struct DeviceDefinition {
    /// The unique id that is used as a source id in the packages.
    pub uid: UniqueIdentifier,
    pub manufacturer_label: &'static str,
    pub device_model_id: u16,
    pub product_category: ProductCategory,
    pub software_version_id: u32,
    pub software_version_label: &'static str,
    pub model_description: &'static str,
    /// false for devices that don't occupy dmx channels, they have no DMX_START_ADDRESS.
    pub dmx_addressable: bool,
    /// Numbered 1..=n in order.
    pub personalities: &'static [Personality],
    /// Stored parameters additional to DEVICE_LABEL, DMX_PERSONALITY, IDENTIFY_DEVICE and
    /// DMX_START_ADDRESS.
    pub parameters: &'static [ParameterDescriptor],
}

/// Raised when a parameter write is rejected. The stored value stays untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterError {
    /// The device doesn't store this parameter.
    UnsupportedParameter(u16),
    TypeMismatch {
        parameter_id: u16,
        expected: ParameterKind,
        actual: ParameterKind,
    },
    /// The value has the right type but is outside of what the parameter accepts.
    ValueOutOfRange(u16),
}

impl core::fmt::Display for ParameterError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::UnsupportedParameter(parameter_id) => {
                write!(f, "parameter {parameter_id:#06X} is not supported")
            },
            Self::TypeMismatch {
                parameter_id,
                expected,
                actual,
            } => write!(
                f,
                "parameter {parameter_id:#06X} holds {expected:?} values, got {actual:?}"
            ),
            Self::ValueOutOfRange(parameter_id) => {
                write!(f, "value out of range for parameter {parameter_id:#06X}")
            },
        }
    }
}

impl std::error::Error for ParameterError {}

impl From<&ParameterError> for NackReason {
    fn from(error: &ParameterError) -> Self {
        match error {
            ParameterError::UnsupportedParameter(_) => NackReason::UnknownPid,
            ParameterError::TypeMismatch { .. } => NackReason::FormatError,
            ParameterError::ValueOutOfRange(_) => NackReason::DataOutOfRange,
        }
    }
}

/// A value that is swapped as a whole. Readers get a copy, never a half written value.
#[derive(Debug)]
struct Guarded<T: Clone> {
    value: RwLock<T>,
}

impl<T: Clone> Guarded<T> {
    fn new(value: T) -> Self {
        Self {
            value: RwLock::new(value),
        }
    }

    // A panicking writer can't leave a partial value behind, so a poisoned lock is still valid.
    fn get(&self) -> T {
        self.value
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn replace(&self, value: T) {
        *self.value.write().unwrap_or_else(PoisonError::into_inner) = value;
    }
}

/// A responder's model. Shareable between threads; writes to one parameter never block reads
/// of another.
#[derive(Debug)]
pub struct RdmDevice {
    definition: DeviceDefinition,
    values: BTreeMap<u16, Guarded<ParameterValue>>,
}

impl RdmDevice {
    /// Validates the definition and sets every stored parameter to its power up value.
    pub fn new(definition: DeviceDefinition) -> Result<Self, DeviceDefinitionError> {
        if definition.personalities.is_empty() {
            return Err(DeviceDefinitionError::NoPersonalities);
        }

        if definition.personalities.len() > RDM_MAX_PERSONALITIES {
            return Err(DeviceDefinitionError::TooManyPersonalities(
                definition.personalities.len(),
            ));
        }

        for (index, personality) in definition.personalities.iter().enumerate() {
            personality.validate(index + 1)?;
        }

        let mut values = BTreeMap::new();
        values.insert(
            pids::DEVICE_LABEL,
            Guarded::new(ParameterValue::Label(Label::new())),
        );
        values.insert(pids::DMX_PERSONALITY, Guarded::new(ParameterValue::U8(1)));
        values.insert(
            pids::IDENTIFY_DEVICE,
            Guarded::new(ParameterValue::Bool(false)),
        );
        if definition.dmx_addressable {
            values.insert(
                pids::DMX_START_ADDRESS,
                Guarded::new(ParameterValue::U16(1)),
            );
        }

        for descriptor in definition.parameters {
            values
                .entry(descriptor.parameter_id)
                .or_insert_with(|| Guarded::new(ParameterValue::default_for(descriptor.kind)));
        }

        log::debug!(
            "device {} defined with {} personalities and {} stored parameters",
            definition.uid,
            definition.personalities.len(),
            values.len()
        );

        Ok(Self { definition, values })
    }

    pub fn uid(&self) -> UniqueIdentifier {
        self.definition.uid
    }

    pub fn definition(&self) -> &DeviceDefinition {
        &self.definition
    }

    pub fn personalities(&self) -> &'static [Personality] {
        self.definition.personalities
    }

    /// Looks up a personality by its 1-based id.
    pub fn personality(&self, id: u8) -> Option<&'static Personality> {
        self.definition
            .personalities
            .get((id as usize).checked_sub(1)?)
    }

    pub fn current_personality_id(&self) -> u8 {
        match self.parameter(pids::DMX_PERSONALITY) {
            Some(ParameterValue::U8(id)) => id,
            _ => 1,
        }
    }

    pub fn current_personality(&self) -> &'static Personality {
        // Writes are range checked and there is at least one personality.
        self.personality(self.current_personality_id())
            .unwrap_or(&self.definition.personalities[0])
    }

    /// The amount of dmx channels the active personality occupies.
    pub fn footprint(&self) -> u16 {
        self.current_personality().footprint()
    }

    /// Whether the device stores a value for the parameter.
    pub fn stores(&self, parameter_id: u16) -> bool {
        self.values.contains_key(&parameter_id)
    }

    /// Whether the device answers GET requests for the parameter.
    pub fn answers(&self, parameter_id: u16) -> bool {
        REQUIRED_PIDS.contains(&parameter_id)
            || MODEL_PIDS.contains(&parameter_id)
            || self.stores(parameter_id)
    }

    /// A copy of the current value of a stored parameter.
    pub fn parameter(&self, parameter_id: u16) -> Option<ParameterValue> {
        self.values.get(&parameter_id).map(Guarded::get)
    }

    /// Replaces the stored value of a parameter. Fails without touching the stored value if the
    /// device doesn't store the parameter or the value has the wrong type or range.
    pub fn try_set_parameter(
        &self,
        parameter_id: u16,
        value: impl Into<ParameterValue>,
    ) -> Result<(), ParameterError> {
        let value = value.into();
        let result = self.check_parameter(parameter_id, &value);

        match result {
            Ok(stored) => {
                log::debug!("parameter {:#06X} set to {:?}", parameter_id, value);
                stored.replace(value);
                Ok(())
            },
            Err(error) => {
                log::debug!("rejected write of {:#06X}: {}", parameter_id, error);
                Err(error)
            },
        }
    }

    fn check_parameter(
        &self,
        parameter_id: u16,
        value: &ParameterValue,
    ) -> Result<&Guarded<ParameterValue>, ParameterError> {
        let stored = self
            .values
            .get(&parameter_id)
            .ok_or(ParameterError::UnsupportedParameter(parameter_id))?;

        let expected = stored.get().kind();
        if value.kind() != expected {
            return Err(ParameterError::TypeMismatch {
                parameter_id,
                expected,
                actual: value.kind(),
            });
        }

        let in_range = match (parameter_id, value) {
            (pids::DMX_PERSONALITY, ParameterValue::U8(id)) => self.personality(*id).is_some(),
            (pids::DMX_START_ADDRESS, ParameterValue::U16(address)) => {
                (1..=DMX_MAX_ADDRESS).contains(address)
            },
            _ => true,
        };

        if !in_range {
            return Err(ParameterError::ValueOutOfRange(parameter_id));
        }

        Ok(stored)
    }

    fn label(&self, parameter_id: u16) -> Label {
        match self.parameter(parameter_id) {
            Some(ParameterValue::Label(label)) => label,
            _ => Label::new(),
        }
    }

    pub fn dmx_start_address(&self) -> DmxStartAddress {
        if self.footprint() == 0 {
            return DmxStartAddress::NoAddress;
        }

        match self.parameter(pids::DMX_START_ADDRESS) {
            Some(ParameterValue::U16(address)) => DmxStartAddress::Address(address),
            _ => DmxStartAddress::NoAddress,
        }
    }

    pub fn device_info(&self) -> DeviceInfo {
        DeviceInfo {
            device_model_id: self.definition.device_model_id,
            product_category: self.definition.product_category,
            software_version: self.definition.software_version_id,
            dmx_footprint: self.footprint(),
            current_personality: self.current_personality_id(),
            personality_count: self.definition.personalities.len() as u8,
            dmx_start_address: self.dmx_start_address(),
            sub_device_count: 0,
            sensor_count: 0,
        }
    }

    /// The parameters answered besides the ones every responder has to support.
    pub fn supported_parameters(&self) -> SupportedParameters {
        let mut parameter_ids = SupportedParameterList::new();

        let stored = self.values.keys().copied();
        for parameter_id in MODEL_PIDS.iter().copied().chain(stored) {
            if REQUIRED_PIDS.contains(&parameter_id) || parameter_ids.contains(&parameter_id) {
                continue;
            }

            if parameter_ids.push(parameter_id).is_err() {
                log::debug!(
                    "supported parameter list is full, dropping {:#06X}",
                    parameter_id
                );
                break;
            }
        }

        SupportedParameters { parameter_ids }
    }

    pub fn device_label(&self) -> DeviceLabel {
        DeviceLabel {
            label: self.label(pids::DEVICE_LABEL),
        }
    }

    pub fn manufacturer_label(&self) -> ManufacturerLabel {
        ManufacturerLabel::new(self.definition.manufacturer_label)
    }

    pub fn model_description(&self) -> DeviceModelDescription {
        DeviceModelDescription::new(self.definition.model_description)
    }

    pub fn software_version_label(&self) -> SoftwareVersionLabel {
        SoftwareVersionLabel::new(self.definition.software_version_label)
    }

    pub fn dmx_personality(&self) -> DmxPersonality {
        DmxPersonality {
            current_personality: self.current_personality_id(),
            personality_count: self.definition.personalities.len() as u8,
        }
    }

    pub fn personality_description(&self, id: u8) -> Option<DmxPersonalityDescription> {
        let personality = self.personality(id)?;

        Some(DmxPersonalityDescription {
            personality: personality.id,
            dmx_footprint: personality.footprint(),
            description: truncate_label(personality.name),
        })
    }

    /// Part `part` of the SLOT_INFO records of the active personality. [None] once `part` is
    /// past the last one.
    pub fn slot_info(&self, part: usize) -> Option<OverflowMessageResp<SlotInfo>> {
        let personality = self.current_personality();
        paged(
            personality.slot_info_records(),
            personality.slots.len(),
            part,
        )
        .map(|resp| resp.map(|slots: SlotInfoRecords| SlotInfo { slots }))
    }

    /// Part `part` of the DEFAULT_SLOT_VALUE records of the active personality.
    pub fn default_slot_values(
        &self,
        part: usize,
    ) -> Option<OverflowMessageResp<DefaultSlotValue>> {
        let personality = self.current_personality();
        paged(
            personality.default_slot_value_records(),
            personality.slots.len(),
            part,
        )
        .map(|resp| resp.map(|slots: DefaultSlotValueRecords| DefaultSlotValue { slots }))
    }

    pub fn slot_description(&self, slot_offset: u16) -> Option<SlotDescription> {
        let slot = self.current_personality().slot(slot_offset)?;

        Some(SlotDescription {
            slot_offset,
            description: truncate_label(slot.label),
        })
    }
}

/// Splits `total` records into parts of at most `N` records.
fn paged<R, const N: usize>(
    records: impl Iterator<Item = R>,
    total: usize,
    part: usize,
) -> Option<OverflowMessageResp<heapless::Vec<R, N>>> {
    let start = part.checked_mul(N)?;
    if start > total || (start == total && part != 0) {
        return None;
    }

    let page: heapless::Vec<R, N> = records.skip(start).take(N).collect();

    if start + page.len() < total {
        Some(OverflowMessageResp::Incomplete(page))
    } else {
        Some(OverflowMessageResp::Complete(page))
    }
}
