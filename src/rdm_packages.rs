use crate::command_class::ResponseCommandClass;
use crate::endpoint::EndpointResponders;
use crate::payload::{ensure_acknowledged, PayloadError, RdmPayload};
use crate::rdm_data::RdmResponseData;
use crate::rdm_types::{
    BootSoftwareVersionLabel, DefaultSlotValue, DeviceInfo, DeviceLabel, DeviceModelDescription,
    DmxPersonality, DmxPersonalityDescription, DmxStartAddress, IdentifyDevice, ManufacturerLabel,
    SlotDescription, SlotInfo, SoftwareVersionLabel, SupportedParameters,
};

/// A decoded GET response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RdmResponsePackage {
    EndpointResponders(EndpointResponders),
    SupportedParameters(SupportedParameters),
    DeviceInfo(DeviceInfo),
    DeviceModelDescription(DeviceModelDescription),
    ManufacturerLabel(ManufacturerLabel),
    DeviceLabel(DeviceLabel),
    SoftwareVersionLabel(SoftwareVersionLabel),
    BootSoftwareVersionLabel(BootSoftwareVersionLabel),
    DmxPersonality(DmxPersonality),
    DmxPersonalityDescription(DmxPersonalityDescription),
    DmxStartAddress(DmxStartAddress),
    SlotInfo(SlotInfo),
    SlotDescription(SlotDescription),
    DefaultSlotValue(DefaultSlotValue),
    IdentifyDevice(IdentifyDevice),
    /// A parameter without a codec in this crate; the response is passed on untouched.
    Custom(RdmResponseData),
}

type Decoder = fn(&RdmResponseData) -> Result<Option<RdmResponsePackage>, PayloadError>;

fn decode_as<P: RdmPayload>(
    response: &RdmResponseData,
    wrap: fn(P) -> RdmResponsePackage,
) -> Result<Option<RdmResponsePackage>, PayloadError> {
    Ok(P::from_response(response)?.map(wrap))
}

macro_rules! decoder {
    ($variant:ident) => {
        (
            <$variant as RdmPayload>::PARAMETER_ID,
            (|response: &RdmResponseData| {
                decode_as::<$variant>(response, RdmResponsePackage::$variant)
            }) as Decoder,
        )
    };
}

/// Decoders by parameter id.
const DECODERS: [(u16, Decoder); 15] = [
    decoder!(EndpointResponders),
    decoder!(SupportedParameters),
    decoder!(DeviceInfo),
    decoder!(DeviceModelDescription),
    decoder!(ManufacturerLabel),
    decoder!(DeviceLabel),
    decoder!(SoftwareVersionLabel),
    decoder!(BootSoftwareVersionLabel),
    decoder!(DmxPersonality),
    decoder!(DmxPersonalityDescription),
    decoder!(DmxStartAddress),
    decoder!(SlotInfo),
    decoder!(SlotDescription),
    decoder!(DefaultSlotValue),
    decoder!(IdentifyDevice),
];

impl RdmResponsePackage {
    /// Decodes a GET response with the codec registered for its parameter id. Responses for
    /// parameters without a codec are returned as [RdmResponsePackage::Custom] once they passed
    /// the acknowledge and command checks.
    pub fn from_response(response: Option<&RdmResponseData>) -> Result<Self, PayloadError> {
        let response = response.ok_or(PayloadError::NullArgument)?;

        let candidates = DECODERS
            .iter()
            .filter(|(parameter_id, _)| *parameter_id == response.parameter_id);

        for (_, decode) in candidates {
            match decode(response) {
                Ok(Some(package)) => return Ok(package),
                Ok(None) => continue,
                Err(error) => {
                    log::debug!(
                        "response for pid {:#06X} rejected: {}",
                        response.parameter_id,
                        error
                    );
                    return Err(error);
                },
            }
        }

        ensure_acknowledged(response)?;
        if response.command_class != ResponseCommandClass::GetCommandResponse {
            return Err(PayloadError::WrongCommand {
                expected: ResponseCommandClass::GetCommandResponse,
                actual: response.command_class,
            });
        }

        log::trace!("no codec for pid {:#06X}", response.parameter_id);
        Ok(Self::Custom(response.clone()))
    }

    pub fn parameter_id(&self) -> u16 {
        match self {
            Self::EndpointResponders(_) => EndpointResponders::PARAMETER_ID,
            Self::SupportedParameters(_) => SupportedParameters::PARAMETER_ID,
            Self::DeviceInfo(_) => DeviceInfo::PARAMETER_ID,
            Self::DeviceModelDescription(_) => DeviceModelDescription::PARAMETER_ID,
            Self::ManufacturerLabel(_) => ManufacturerLabel::PARAMETER_ID,
            Self::DeviceLabel(_) => DeviceLabel::PARAMETER_ID,
            Self::SoftwareVersionLabel(_) => SoftwareVersionLabel::PARAMETER_ID,
            Self::BootSoftwareVersionLabel(_) => BootSoftwareVersionLabel::PARAMETER_ID,
            Self::DmxPersonality(_) => DmxPersonality::PARAMETER_ID,
            Self::DmxPersonalityDescription(_) => DmxPersonalityDescription::PARAMETER_ID,
            Self::DmxStartAddress(_) => DmxStartAddress::PARAMETER_ID,
            Self::SlotInfo(_) => SlotInfo::PARAMETER_ID,
            Self::SlotDescription(_) => SlotDescription::PARAMETER_ID,
            Self::DefaultSlotValue(_) => DefaultSlotValue::PARAMETER_ID,
            Self::IdentifyDevice(_) => IdentifyDevice::PARAMETER_ID,
            Self::Custom(response) => response.parameter_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pids;
    use crate::types::{DataPack, NackReason, ResponseType};
    use crate::unique_identifier::{PackageAddress, UniqueIdentifier};

    fn get_response(
        response_type: ResponseType,
        parameter_id: u16,
        parameter_data: &[u8],
    ) -> RdmResponseData {
        RdmResponseData {
            destination_uid: PackageAddress::Device(UniqueIdentifier::new(0x7FF0, 1).unwrap()),
            source_uid: UniqueIdentifier::new(0x9FFF, 1).unwrap(),
            transaction_number: 1,
            response_type,
            message_count: 0,
            sub_device: 0,
            command_class: ResponseCommandClass::GetCommandResponse,
            parameter_id,
            parameter_data: DataPack::from_slice(parameter_data).unwrap(),
        }
    }

    #[test]
    fn test_decoder_table_matches_pids() {
        for (index, (parameter_id, _)) in DECODERS.iter().enumerate() {
            assert!(
                DECODERS[index + 1..]
                    .iter()
                    .all(|(other, _)| other != parameter_id),
                "pid {parameter_id:#06X} registered twice"
            );
        }
    }

    #[test]
    fn test_missing_response() {
        assert_eq!(
            RdmResponsePackage::from_response(None),
            Err(PayloadError::NullArgument)
        );
    }

    #[test]
    fn test_dispatch_by_pid() {
        let response = get_response(
            ResponseType::ResponseTypeAck,
            pids::ENDPOINT_RESPONDERS,
            &[0, 0, 0, 1, 0x9F, 0xFF, 0, 0, 0, 1],
        );
        let package = RdmResponsePackage::from_response(Some(&response)).unwrap();
        assert_eq!(package.parameter_id(), pids::ENDPOINT_RESPONDERS);
        assert!(matches!(
            package,
            RdmResponsePackage::EndpointResponders(EndpointResponders {
                list_change_number: 1,
                ..
            })
        ));

        let response = get_response(ResponseType::ResponseTypeAck, pids::IDENTIFY_DEVICE, &[1]);
        assert_eq!(
            RdmResponsePackage::from_response(Some(&response)).unwrap(),
            RdmResponsePackage::IdentifyDevice(IdentifyDevice(true))
        );
    }

    #[test]
    fn test_custom_pid() {
        let response = get_response(ResponseType::ResponseTypeAck, 0x8001, &[1, 2, 3]);
        assert_eq!(
            RdmResponsePackage::from_response(Some(&response)).unwrap(),
            RdmResponsePackage::Custom(response.clone())
        );

        let nack = get_response(
            ResponseType::ResponseTypeNackReason,
            0x8001,
            &NackReason::UnknownPid.to_bytes(),
        );
        assert_eq!(
            RdmResponsePackage::from_response(Some(&nack)),
            Err(PayloadError::Nacked(Some(0x0000)))
        );
    }

    #[test]
    fn test_rejected_payload() {
        let response = get_response(ResponseType::ResponseTypeAck, pids::DEVICE_INFO, &[0; 4]);
        assert!(matches!(
            RdmResponsePackage::from_response(Some(&response)),
            Err(PayloadError::LengthOutOfRange { length: 4, .. })
        ));
    }
}
