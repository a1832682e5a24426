//! Personalities describe the fixed dmx channel layouts a device can operate in.
//!
//! Everything in here is const constructible so the hardware capabilities can be declared as
//! statics:
//!
//! ```rust
//! use rdm_payload::personality::{Personality, Slot, SlotCategory};
//!
//! static RGB_SLOTS: [Slot; 4] = [
//!     Slot::primary(0, SlotCategory::INTENSITY, "Dimmer"),
//!     Slot::primary(1, SlotCategory::COLOR_ADD_RED, "Red"),
//!     Slot::primary(2, SlotCategory::COLOR_ADD_GREEN, "Green"),
//!     Slot::primary(3, SlotCategory::COLOR_ADD_BLUE, "Blue"),
//! ];
//! static PERSONALITIES: [Personality; 1] = [Personality::new(1, "4CH RGB", &RGB_SLOTS)];
//!
//! assert_eq!(PERSONALITIES[0].footprint(), 4);
//! ```

use crate::rdm_types::{DefaultSlotValueRecord, SlotInfoRecord};

/// Semantic role of a slot (ANSI E1.20 Table C-2). Values from 0x8000 up to 0xFFDF are
/// manufacturer specific.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SlotCategory(pub u16);

impl SlotCategory {
    pub const INTENSITY: Self = Self(0x0001);
    pub const INTENSITY_MASTER: Self = Self(0x0002);
    pub const PAN: Self = Self(0x0101);
    pub const TILT: Self = Self(0x0102);
    pub const COLOR_WHEEL: Self = Self(0x0201);
    pub const COLOR_SUB_CYAN: Self = Self(0x0202);
    pub const COLOR_SUB_YELLOW: Self = Self(0x0203);
    pub const COLOR_SUB_MAGENTA: Self = Self(0x0204);
    pub const COLOR_ADD_RED: Self = Self(0x0205);
    pub const COLOR_ADD_GREEN: Self = Self(0x0206);
    pub const COLOR_ADD_BLUE: Self = Self(0x0207);
    pub const COLOR_CORRECTION: Self = Self(0x0208);
    pub const COLOR_SCROLL: Self = Self(0x0209);
    pub const COLOR_SEMAPHORE: Self = Self(0x0210);
    pub const COLOR_ADD_AMBER: Self = Self(0x0211);
    pub const COLOR_ADD_WHITE: Self = Self(0x0212);
    pub const COLOR_ADD_WARM_WHITE: Self = Self(0x0213);
    pub const COLOR_ADD_COOL_WHITE: Self = Self(0x0214);
    pub const COLOR_SUB_UV: Self = Self(0x0215);
    pub const COLOR_HUE: Self = Self(0x0216);
    pub const COLOR_SATURATION: Self = Self(0x0217);
    pub const STATIC_GOBO_WHEEL: Self = Self(0x0301);
    pub const ROTO_GOBO_WHEEL: Self = Self(0x0302);
    pub const PRISM_WHEEL: Self = Self(0x0303);
    pub const EFFECTS_WHEEL: Self = Self(0x0304);
    pub const BEAM_SIZE_IRIS: Self = Self(0x0401);
    pub const EDGE: Self = Self(0x0402);
    pub const FROST: Self = Self(0x0403);
    pub const STROBE: Self = Self(0x0404);
    pub const ZOOM: Self = Self(0x0405);
    pub const FRAMING_SHUTTER: Self = Self(0x0406);
    pub const SHUTTER_ROTATE: Self = Self(0x0407);
    pub const DOUSER: Self = Self(0x0408);
    pub const BARN_DOOR: Self = Self(0x0409);
    pub const LAMP_CONTROL: Self = Self(0x0501);
    pub const FIXTURE_CONTROL: Self = Self(0x0502);
    pub const FIXTURE_SPEED: Self = Self(0x0503);
    pub const MACRO: Self = Self(0x0504);
    pub const POWER_CONTROL: Self = Self(0x0505);
    pub const FAN_CONTROL: Self = Self(0x0506);
    pub const HEATER_CONTROL: Self = Self(0x0507);
    pub const FOUNTAIN_CONTROL: Self = Self(0x0508);
    pub const UNDEFINED: Self = Self(0xFFFF);
}

/// Role of a slot (ANSI E1.20 Table C-1). Secondary slots refine a primary slot.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum SlotType {
    Primary = 0x00,
    SecondaryFine = 0x01,
    SecondaryTiming = 0x02,
    SecondarySpeed = 0x03,
    SecondaryControl = 0x04,
    SecondaryIndex = 0x05,
    SecondaryRotation = 0x06,
    SecondaryIndexRotate = 0x07,
    SecondaryUndefined = 0xFF,
}

impl SlotType {
    pub fn is_primary(self) -> bool {
        self == Self::Primary
    }
}

impl TryFrom<u8> for SlotType {
    type Error = u8;

    fn try_from(value: u8) -> Result<Self, u8> {
        Ok(match value {
            0x00 => Self::Primary,
            0x01 => Self::SecondaryFine,
            0x02 => Self::SecondaryTiming,
            0x03 => Self::SecondarySpeed,
            0x04 => Self::SecondaryControl,
            0x05 => Self::SecondaryIndex,
            0x06 => Self::SecondaryRotation,
            0x07 => Self::SecondaryIndexRotate,
            0xFF => Self::SecondaryUndefined,
            unknown => return Err(unknown),
        })
    }
}

/// One dmx channel of a [Personality].
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Slot {
    /// Channel offset relative to the dmx start address.
    pub offset: u16,
    pub category: SlotCategory,
    pub slot_type: SlotType,
    pub label: &'static str,
    /// The value the slot takes when no dmx is received.
    pub default_value: u8,
}

impl Slot {
    pub const fn primary(offset: u16, category: SlotCategory, label: &'static str) -> Self {
        Self {
            offset,
            category,
            slot_type: SlotType::Primary,
            label,
            default_value: 0,
        }
    }

    /// The low byte of a 16 bit channel.
    pub const fn fine(offset: u16, category: SlotCategory, label: &'static str) -> Self {
        Self::secondary(offset, category, SlotType::SecondaryFine, label)
    }

    pub const fn secondary(
        offset: u16,
        category: SlotCategory,
        slot_type: SlotType,
        label: &'static str,
    ) -> Self {
        Self {
            offset,
            category,
            slot_type,
            label,
            default_value: 0,
        }
    }

    pub const fn with_default_value(mut self, default_value: u8) -> Self {
        self.default_value = default_value;
        self
    }
}

/// Raised when a device is defined with inconsistent capabilities.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DeviceDefinitionError {
    /// A device needs at least one personality.
    NoPersonalities,
    /// More personalities than fit into the 8 bit personality number.
    TooManyPersonalities(usize),
    /// Personalities have to be numbered 1..=n in order.
    PersonalityIdMismatch { expected: usize, actual: u8 },
    /// Slots have to be numbered 0..n in order.
    SlotOffsetMismatch {
        personality: u8,
        expected: usize,
        actual: u16,
    },
}

impl core::fmt::Display for DeviceDefinitionError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::NoPersonalities => write!(f, "device has no personalities"),
            Self::TooManyPersonalities(count) => write!(f, "{count} personalities are too many"),
            Self::PersonalityIdMismatch { expected, actual } => {
                write!(f, "personality {actual} should be numbered {expected}")
            },
            Self::SlotOffsetMismatch {
                personality,
                expected,
                actual,
            } => write!(
                f,
                "slot {actual} of personality {personality} should be at offset {expected}"
            ),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for DeviceDefinitionError {}

/// A named dmx channel layout.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Personality {
    /// 1-based personality number.
    pub id: u8,
    pub name: &'static str,
    pub slots: &'static [Slot],
}

impl Personality {
    pub const fn new(id: u8, name: &'static str, slots: &'static [Slot]) -> Self {
        Self { id, name, slots }
    }

    /// Amount of dmx channels the personality occupies.
    pub fn footprint(&self) -> u16 {
        self.slots
            .iter()
            .map(|slot| slot.offset.saturating_add(1))
            .max()
            .unwrap_or(0)
    }

    pub fn slot(&self, offset: u16) -> Option<&Slot> {
        self.slots.iter().find(|slot| slot.offset == offset)
    }

    /// The slot label id of SLOT_INFO. Primary slots report their category, secondary slots
    /// the offset of the primary slot they refine.
    pub fn slot_label_id(&self, slot: &Slot) -> u16 {
        if slot.slot_type.is_primary() {
            return slot.category.0;
        }

        self.slots
            .iter()
            .take_while(|candidate| candidate.offset < slot.offset)
            .filter(|candidate| {
                candidate.slot_type.is_primary() && candidate.category == slot.category
            })
            .last()
            .map(|primary| primary.offset)
            .unwrap_or(slot.category.0)
    }

    pub fn slot_info_records(&self) -> impl Iterator<Item = SlotInfoRecord> + '_ {
        self.slots.iter().map(|slot| SlotInfoRecord {
            slot_offset: slot.offset,
            slot_type: slot.slot_type,
            slot_label_id: self.slot_label_id(slot),
        })
    }

    pub fn default_slot_value_records(&self) -> impl Iterator<Item = DefaultSlotValueRecord> + '_ {
        self.slots.iter().map(|slot| DefaultSlotValueRecord {
            slot_offset: slot.offset,
            default_value: slot.default_value,
        })
    }

    /// Checks that the personality is numbered `expected_id` and its slot offsets are unique
    /// and contiguous from 0.
    pub fn validate(&self, expected_id: usize) -> Result<(), DeviceDefinitionError> {
        if self.id as usize != expected_id {
            return Err(DeviceDefinitionError::PersonalityIdMismatch {
                expected: expected_id,
                actual: self.id,
            });
        }

        for (expected, slot) in self.slots.iter().enumerate() {
            if slot.offset as usize != expected {
                return Err(DeviceDefinitionError::SlotOffsetMismatch {
                    personality: self.id,
                    expected,
                    actual: slot.offset,
                });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static RGB_SLOTS: [Slot; 5] = [
        Slot::primary(0, SlotCategory::INTENSITY, "Dimmer"),
        Slot::primary(1, SlotCategory::STROBE, "Strobe").with_default_value(33),
        Slot::primary(2, SlotCategory::COLOR_ADD_RED, "Red"),
        Slot::primary(3, SlotCategory::COLOR_ADD_GREEN, "Green"),
        Slot::primary(4, SlotCategory::COLOR_ADD_BLUE, "Blue"),
    ];

    static FINE_SLOTS: [Slot; 4] = [
        Slot::primary(0, SlotCategory::INTENSITY, "Dimmer"),
        Slot::fine(1, SlotCategory::INTENSITY, "Dimmer Fine"),
        Slot::primary(2, SlotCategory::COLOR_ADD_RED, "Red"),
        Slot::fine(3, SlotCategory::COLOR_ADD_RED, "Red Fine"),
    ];

    static GAP_SLOTS: [Slot; 2] = [
        Slot::primary(0, SlotCategory::INTENSITY, "Dimmer"),
        Slot::primary(2, SlotCategory::STROBE, "Strobe"),
    ];

    #[test]
    fn test_footprint() {
        assert_eq!(Personality::new(1, "5CH RGB", &RGB_SLOTS).footprint(), 5);
        assert_eq!(Personality::new(1, "Dark", &[]).footprint(), 0);

        static LAST_CHANNEL: [Slot; 1] =
            [Slot::primary(u16::MAX, SlotCategory::INTENSITY, "Dimmer")];
        let personality = Personality::new(1, "Unvalidated", &LAST_CHANNEL);
        assert_eq!(personality.footprint(), u16::MAX);
        assert!(personality.validate(1).is_err());
    }

    #[test]
    fn test_slot_label_ids() {
        let personality = Personality::new(1, "16 Bit", &FINE_SLOTS);
        let label_ids: heapless::Vec<u16, 4> = personality
            .slot_info_records()
            .map(|record| record.slot_label_id)
            .collect();

        assert_eq!(&label_ids[..], &[0x0001, 0, 0x0205, 2]);
    }

    #[test]
    fn test_default_values() {
        let personality = Personality::new(1, "5CH RGB", &RGB_SLOTS);
        let strobe = personality.slot(1).unwrap();
        assert_eq!(strobe.default_value, 33);
        assert!(personality.slot(5).is_none());
    }

    #[test]
    fn test_validate() {
        let personality = Personality::new(1, "5CH RGB", &RGB_SLOTS);
        assert!(personality.validate(1).is_ok());
        assert_eq!(
            Personality::new(2, "5CH RGB", &RGB_SLOTS).validate(1),
            Err(DeviceDefinitionError::PersonalityIdMismatch {
                expected: 1,
                actual: 2
            })
        );
        assert_eq!(
            Personality::new(1, "Gap", &GAP_SLOTS).validate(1),
            Err(DeviceDefinitionError::SlotOffsetMismatch {
                personality: 1,
                expected: 1,
                actual: 2
            })
        );
    }

    #[test]
    fn test_slot_type_parsing() {
        assert_eq!(SlotType::try_from(0x01), Ok(SlotType::SecondaryFine));
        assert_eq!(SlotType::try_from(0x08), Err(0x08));
    }
}
