use crate::codec::{decode_record_array, PayloadWriter};
use crate::command_class::ResponseCommandClass;
use crate::consts::{
    ENDPOINT_RESPONDERS_PDL_MAX, ENDPOINT_RESPONDERS_PDL_MIN, RDM_MAX_ENDPOINT_RESPONDERS,
};
use crate::layouts::rdm_endpoint_responders_layout;
use crate::payload::{check_length, PayloadError, RdmPayload};
use crate::pids;
use crate::types::DataPack;
use crate::unique_identifier::UniqueIdentifier;

pub type EndpointResponderList = heapless::Vec<UniqueIdentifier, RDM_MAX_ENDPOINT_RESPONDERS>;

/// Response to a GET ENDPOINT_RESPONDERS request (ANSI E1.37-7).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EndpointResponders {
    /// Incremented by one each time the set of responders changes, rolls over from 0xFFFFFFFF
    /// to 0. Starts at 0 when the responder powers up.
    pub list_change_number: u32,
    /// The responders in wire order.
    pub responders: EndpointResponderList,
}

impl EndpointResponders {
    pub fn new(
        list_change_number: u32,
        responders: &[UniqueIdentifier],
    ) -> Result<Self, PayloadError> {
        Ok(Self {
            list_change_number,
            responders: EndpointResponderList::from_slice(responders).map_err(|_| {
                PayloadError::CapacityExceeded {
                    capacity: RDM_MAX_ENDPOINT_RESPONDERS,
                }
            })?,
        })
    }

    pub fn increment_list_change_number(&mut self) {
        self.list_change_number = self.list_change_number.wrapping_add(1);
    }
}

impl RdmPayload for EndpointResponders {
    const PARAMETER_ID: u16 = pids::ENDPOINT_RESPONDERS;
    const COMMAND_CLASS: ResponseCommandClass = ResponseCommandClass::GetCommandResponse;
    const PDL_MIN: usize = ENDPOINT_RESPONDERS_PDL_MIN;
    const PDL_MAX: usize = ENDPOINT_RESPONDERS_PDL_MAX;

    fn serialize(&self) -> DataPack {
        let mut writer = PayloadWriter::new();
        writer
            .put_u32(self.list_change_number)
            .put_records(&self.responders);

        writer.finish()
    }

    fn decode_fields(parameter_data: &[u8]) -> Result<Self, PayloadError> {
        check_length::<Self>(parameter_data.len())?;
        let view = rdm_endpoint_responders_layout::View::new(parameter_data);

        Ok(Self {
            list_change_number: view.list_change_number().read(),
            responders: decode_record_array(view.responders())?,
        })
    }
}
