use crate::codec::{decode_u16_be, decode_u8};
use crate::command_class::RequestCommandClass;
use crate::device::{ParameterValue, RdmDevice};
use crate::payload::RdmPayload;
use crate::pids;
use crate::rdm_data::{IsBroadcastError, RdmRequestData, RdmResponseData};
use crate::rdm_types::OverflowMessageResp;
use crate::types::{DataPack, NackReason, ResponseType};
use crate::unique_identifier::PackageAddress;

/// There is no message queue, so responses always report zero queued messages.
const MESSAGE_COUNT: u8 = 0;

struct UnfinishedRequest {
    pid: u16,
    iteration: usize,
}

pub enum RdmAnswer {
    Response(RdmResponseData),
    /// The request was not addressed to this device, was a broadcast or a discovery request.
    NoResponse,
}

/// Answers GET and SET requests addressed to an [RdmDevice].
///
/// GET requests are answered from the device model, SET requests go through
/// [RdmDevice::try_set_parameter]. Rejected requests get a NACK_REASON response.
pub struct RdmDeviceResponder<'a> {
    device: &'a RdmDevice,
    unfinished_request: Option<UnfinishedRequest>,
}

impl<'a> RdmDeviceResponder<'a> {
    pub fn new(device: &'a RdmDevice) -> Self {
        Self {
            device,
            unfinished_request: None,
        }
    }

    pub fn device(&self) -> &'a RdmDevice {
        self.device
    }

    pub fn handle_rdm_request(&mut self, request: &RdmRequestData) -> RdmAnswer {
        let uid = self.device.uid();

        match request.destination_uid {
            PackageAddress::ManufacturerBroadcast(manufacturer_uid) => {
                if manufacturer_uid != uid.manufacturer_uid() {
                    return RdmAnswer::NoResponse;
                }
            },
            PackageAddress::Device(device_uid) => {
                if uid != device_uid {
                    return RdmAnswer::NoResponse;
                }
            },
            PackageAddress::Broadcast => {},
        }

        let response = match request.command_class {
            RequestCommandClass::DiscoveryCommand => return RdmAnswer::NoResponse,
            _ if request.sub_device != 0 => {
                request.build_nack(NackReason::SubDeviceOutOfRange, MESSAGE_COUNT)
            },
            RequestCommandClass::GetCommand => self.handle_get(request),
            RequestCommandClass::SetCommand => self.handle_set(request),
        };

        // Broadcasts are processed but never answered.
        match response {
            Ok(response) => RdmAnswer::Response(response),
            Err(IsBroadcastError) => RdmAnswer::NoResponse,
        }
    }

    fn handle_get(
        &mut self,
        request: &RdmRequestData,
    ) -> Result<RdmResponseData, IsBroadcastError> {
        let device = self.device;

        if !device.answers(request.parameter_id) {
            return request.build_nack(NackReason::UnknownPid, MESSAGE_COUNT);
        }

        match request.parameter_id {
            pids::SUPPORTED_PARAMETERS => ack(request, &device.supported_parameters()),
            pids::DEVICE_INFO => ack(request, &device.device_info()),
            pids::DEVICE_MODEL_DESCRIPTION => ack(request, &device.model_description()),
            pids::MANUFACTURER_LABEL => ack(request, &device.manufacturer_label()),
            pids::DEVICE_LABEL => ack(request, &device.device_label()),
            pids::SOFTWARE_VERSION_LABEL => ack(request, &device.software_version_label()),
            pids::DMX_PERSONALITY => ack(request, &device.dmx_personality()),
            pids::DMX_START_ADDRESS => ack(request, &device.dmx_start_address()),
            pids::DMX_PERSONALITY_DESCRIPTION => {
                let Some(personality) = exact(&request.parameter_data, 1, decode_u8) else {
                    return request.build_nack(NackReason::FormatError, MESSAGE_COUNT);
                };

                match device.personality_description(personality) {
                    Some(description) => ack(request, &description),
                    None => request.build_nack(NackReason::DataOutOfRange, MESSAGE_COUNT),
                }
            },
            pids::SLOT_DESCRIPTION => {
                let Some(slot_offset) = exact(&request.parameter_data, 2, decode_u16_be) else {
                    return request.build_nack(NackReason::FormatError, MESSAGE_COUNT);
                };

                match device.slot_description(slot_offset) {
                    Some(description) => ack(request, &description),
                    None => request.build_nack(NackReason::DataOutOfRange, MESSAGE_COUNT),
                }
            },
            pids::SLOT_INFO => self.overflow_response(request, |part| device.slot_info(part)),
            pids::DEFAULT_SLOT_VALUE => {
                self.overflow_response(request, |part| device.default_slot_values(part))
            },
            parameter_id => match device.parameter(parameter_id) {
                Some(value) => request.build_response(
                    ResponseType::ResponseTypeAck,
                    value.serialize(),
                    MESSAGE_COUNT,
                ),
                None => request.build_nack(NackReason::UnknownPid, MESSAGE_COUNT),
            },
        }
    }

    /// Sends the parts of a response that doesn't fit into one package on consecutive requests
    /// of the same pid.
    fn overflow_response<P: RdmPayload>(
        &mut self,
        request: &RdmRequestData,
        part_of: impl Fn(usize) -> Option<OverflowMessageResp<P>>,
    ) -> Result<RdmResponseData, IsBroadcastError> {
        let iteration = match &self.unfinished_request {
            Some(UnfinishedRequest { pid, iteration }) if *pid == request.parameter_id => {
                *iteration
            },
            _ => 0,
        };

        // The model changed in between, start over.
        let (iteration, part) = match part_of(iteration) {
            Some(part) => (iteration, part),
            None => match part_of(0) {
                Some(part) => (0, part),
                None => return request.build_nack(NackReason::HardwareFault, MESSAGE_COUNT),
            },
        };

        let (response, unfinished_request) = match part {
            OverflowMessageResp::Incomplete(payload) => (
                request.build_response(
                    ResponseType::ResponseTypeAckOverflow,
                    payload.serialize(),
                    MESSAGE_COUNT,
                ),
                Some(UnfinishedRequest {
                    pid: request.parameter_id,
                    iteration: iteration + 1,
                }),
            ),
            OverflowMessageResp::Complete(payload) => (ack(request, &payload), None),
        };

        // A part counts as sent only once there is a response carrying it.
        let response = response?;
        self.unfinished_request = unfinished_request;
        Ok(response)
    }

    fn handle_set(
        &mut self,
        request: &RdmRequestData,
    ) -> Result<RdmResponseData, IsBroadcastError> {
        let parameter_id = request.parameter_id;

        let Some(kind) = self.device.parameter(parameter_id).map(|value| value.kind()) else {
            let nack_reason = if self.device.answers(parameter_id) {
                NackReason::UnsupportedCommandClass
            } else {
                NackReason::UnknownPid
            };
            return request.build_nack(nack_reason, MESSAGE_COUNT);
        };

        let value = match ParameterValue::decode(kind, &request.parameter_data) {
            Ok(value) => value,
            Err(error) => {
                log::debug!("malformed SET {:#06X}: {}", parameter_id, error);
                return request.build_nack(NackReason::FormatError, MESSAGE_COUNT);
            },
        };

        match self.device.try_set_parameter(parameter_id, value) {
            Ok(()) => request.build_response(
                ResponseType::ResponseTypeAck,
                DataPack::new(),
                MESSAGE_COUNT,
            ),
            Err(error) => request.build_nack((&error).into(), MESSAGE_COUNT),
        }
    }
}

fn ack<P: RdmPayload>(
    request: &RdmRequestData,
    payload: &P,
) -> Result<RdmResponseData, IsBroadcastError> {
    request.build_payload_response(payload, MESSAGE_COUNT)
}

/// Decodes request parameter data that has to be exactly `size` bytes long.
fn exact<T, E>(
    parameter_data: &[u8],
    size: usize,
    decode: fn(&[u8]) -> Result<T, E>,
) -> Option<T> {
    if parameter_data.len() != size {
        return None;
    }

    decode(parameter_data).ok()
}
