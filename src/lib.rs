//! Parameter payload codecs for DMX-RDM (ANSI E1.20) and the E1.37-7 gateway extensions, plus a
//! device capability model for responders. The codecs feature no-std as well as no-alloc support
//! (no heap allocation) to target embedded as well as os platforms.
//!
//! Please refer to the [official specifications](https://tsp.esta.org/) published by the ESTA.
//!
//! Transport, discovery and timing are left to the caller. This crate turns the parameter data
//! of an RDM package into typed payloads and back.
//!
//! # Usage
//!
//! ## Decoding a response
//!
//! ```rust
//! use rdm_payload::command_class::ResponseCommandClass;
//! use rdm_payload::endpoint::EndpointResponders;
//! use rdm_payload::payload::{PayloadError, RdmPayload};
//! use rdm_payload::pids;
//! use rdm_payload::rdm_data::RdmResponseData;
//! use rdm_payload::types::{DataPack, ResponseType};
//! use rdm_payload::unique_identifier::{PackageAddress, UniqueIdentifier};
//!
//! let response = RdmResponseData {
//!     destination_uid: PackageAddress::Device(UniqueIdentifier::new(0x7FF0, 1).unwrap()),
//!     source_uid: UniqueIdentifier::new(0x9FFF, 0x10).unwrap(),
//!     transaction_number: 0,
//!     response_type: ResponseType::ResponseTypeAck,
//!     message_count: 0,
//!     sub_device: 0,
//!     command_class: ResponseCommandClass::GetCommandResponse,
//!     parameter_id: pids::ENDPOINT_RESPONDERS,
//!     parameter_data: DataPack::from_slice(&[
//!         0x00, 0x00, 0x00, 0x01, 0x9F, 0xFF, 0x00, 0x00, 0x00, 0x01, 0x9F, 0xFF, 0x00, 0x00,
//!         0x00, 0x02,
//!     ])
//!     .unwrap(),
//! };
//!
//! // None would mean the response belongs to another parameter.
//! let endpoint_responders = EndpointResponders::from_response(&response).unwrap().unwrap();
//! assert_eq!(endpoint_responders.list_change_number, 1);
//! assert_eq!(endpoint_responders.responders.len(), 2);
//! assert_eq!(&endpoint_responders.serialize()[..], &response.parameter_data[..]);
//! ```
//!
//! ## Responder
//!
//! ```rust
//! use rdm_payload::command_class::RequestCommandClass;
//! use rdm_payload::device::{DeviceDefinition, RdmDevice};
//! use rdm_payload::personality::{Personality, Slot, SlotCategory};
//! use rdm_payload::pids;
//! use rdm_payload::rdm_data::RdmRequestData;
//! use rdm_payload::rdm_responder::{RdmAnswer, RdmDeviceResponder};
//! use rdm_payload::rdm_types::ProductCategory;
//! use rdm_payload::types::DataPack;
//! use rdm_payload::unique_identifier::{PackageAddress, UniqueIdentifier};
//!
//! static SLOTS: [Slot; 2] = [
//!     Slot::primary(0, SlotCategory::INTENSITY, "Dimmer"),
//!     Slot::fine(1, SlotCategory::INTENSITY, "Dimmer Fine"),
//! ];
//! static PERSONALITIES: [Personality; 1] = [Personality::new(1, "16 Bit Dimmer", &SLOTS)];
//!
//! let device = RdmDevice::new(DeviceDefinition {
//!     uid: UniqueIdentifier::new(0x7FF0, 1).unwrap(),
//!     manufacturer_label: "Example",
//!     device_model_id: 1,
//!     product_category: ProductCategory::DIMMER,
//!     software_version_id: 1,
//!     software_version_label: "1.0.0",
//!     model_description: "16 Bit Dimmer",
//!     dmx_addressable: true,
//!     personalities: &PERSONALITIES,
//!     parameters: &[],
//! })
//! .unwrap();
//!
//! let mut responder = RdmDeviceResponder::new(&device);
//!
//! let request = RdmRequestData {
//!     destination_uid: PackageAddress::Device(device.uid()),
//!     source_uid: UniqueIdentifier::new(0x9FFF, 1).unwrap(),
//!     transaction_number: 0,
//!     port_id: 1,
//!     message_count: 0,
//!     sub_device: 0,
//!     command_class: RequestCommandClass::SetCommand,
//!     parameter_id: pids::DMX_START_ADDRESS,
//!     parameter_data: DataPack::from_slice(&[0x00, 0x21]).unwrap(),
//! };
//!
//! match responder.handle_rdm_request(&request) {
//!     // Serialize the response with rdm_payload::rdm_data::RdmData and send it.
//!     RdmAnswer::Response(response) => assert!(response.is_ack()),
//!     RdmAnswer::NoResponse => unreachable!(),
//! }
//! ```
//!

#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(docsrs, feature(doc_cfg))]

/// Scalar, label and record array codecs shared by all payloads.
pub mod codec;
pub mod command_class;
pub mod consts;
/// Device model with runtime parameter values.
#[cfg(feature = "std")]
#[cfg_attr(docsrs, doc(cfg(feature = "std")))]
pub mod device;
pub mod endpoint;
mod layouts;
pub mod payload;
pub mod personality;
pub mod pids;
pub mod rdm_data;
pub mod rdm_packages;
/// Answers requests from a [device::RdmDevice].
#[cfg(feature = "std")]
#[cfg_attr(docsrs, doc(cfg(feature = "std")))]
pub mod rdm_responder;
pub mod rdm_types;
pub mod types;
pub mod unique_identifier;
