//! Types shared by the RRC-7755 filler: contract bindings, the posted-message unit of work and the
//! attribute and payload codecs.
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

pub mod bindings;

mod attributes;
pub use attributes::{
    ATTRIBUTE_BASE_SIZE, ATTRIBUTE_EXTENDED_SIZE, AttributeKind, Attributes, DELAY_SELECTOR,
    L2_ORACLE_SELECTOR, NONCE_SELECTOR, PAYMASTER_HEADER_SIZE, REQUESTER_SELECTOR,
    REWARD_SELECTOR, SELECTOR_SIZE, decode_paymaster_attributes,
};
#[cfg(any(test, feature = "test-utils"))]
pub use attributes::{
    encode_delay, encode_l2_oracle, encode_nonce, encode_paymaster_attributes, encode_requester,
    encode_reward,
};

mod error;
pub use error::DecodeError;

mod message;
pub use message::PostedMessage;

pub mod packing;

mod payload;
pub use payload::{decode_calls, decode_user_operation, total_call_value};
