//! Selector-tagged message attributes.
//!
//! Every attribute is a 4-byte selector followed by one or two 32-byte words. Attributes either
//! ride along a message explicitly, or are packed behind the 52-byte paymaster header of a user
//! operation's `paymasterAndData`.

use crate::DecodeError;
use alloy_primitives::{Address, B256, Bytes, U256, hex};
use alloy_sol_types::SolValue;
use derive_more::Display;

/// Size of an attribute selector.
pub const SELECTOR_SIZE: usize = 4;

/// Size of an attribute carrying a single word.
pub const ATTRIBUTE_BASE_SIZE: usize = SELECTOR_SIZE + 32;

/// Size of an attribute carrying two words.
pub const ATTRIBUTE_EXTENDED_SIZE: usize = ATTRIBUTE_BASE_SIZE + 32;

/// Size of the ERC-4337 paymaster header (address, verification gas, post-op gas) that precedes
/// the paymaster-specific data.
pub const PAYMASTER_HEADER_SIZE: usize = 20 + 16 + 16;

/// `nonce(uint256)`
pub const NONCE_SELECTOR: [u8; 4] = hex!("ce03fdab");
/// `reward(bytes32,uint256)`
pub const REWARD_SELECTOR: [u8; 4] = hex!("a362e5db");
/// `delay(uint256,uint256)`
pub const DELAY_SELECTOR: [u8; 4] = hex!("84f550e0");
/// `requester(bytes32)`
pub const REQUESTER_SELECTOR: [u8; 4] = hex!("3bd94e4c");
/// `l2Oracle(address)`
pub const L2_ORACLE_SELECTOR: [u8; 4] = hex!("7ff7245a");

/// The attribute kinds understood by the filler.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttributeKind {
    /// Message nonce.
    #[display("nonce")]
    Nonce,
    /// Reward asset and amount.
    #[display("reward")]
    Reward,
    /// Finality delay and expiry.
    #[display("delay")]
    Delay,
    /// Original requester.
    #[display("requester")]
    Requester,
    /// Destination rollup oracle on L1.
    #[display("l2Oracle")]
    L2Oracle,
}

impl AttributeKind {
    /// Looks up the kind for a selector. Unknown selectors yield `None`.
    pub const fn from_selector(selector: [u8; 4]) -> Option<Self> {
        match u32::from_be_bytes(selector) {
            0xce03fdab => Some(Self::Nonce),
            0xa362e5db => Some(Self::Reward),
            0x84f550e0 => Some(Self::Delay),
            0x3bd94e4c => Some(Self::Requester),
            0x7ff7245a => Some(Self::L2Oracle),
            _ => None,
        }
    }

    /// The selector tagging this kind.
    pub const fn selector(&self) -> [u8; 4] {
        match self {
            Self::Nonce => NONCE_SELECTOR,
            Self::Reward => REWARD_SELECTOR,
            Self::Delay => DELAY_SELECTOR,
            Self::Requester => REQUESTER_SELECTOR,
            Self::L2Oracle => L2_ORACLE_SELECTOR,
        }
    }

    /// Minimum blob length, selector included.
    pub const fn min_len(&self) -> usize {
        match self {
            Self::Reward | Self::Delay => ATTRIBUTE_EXTENDED_SIZE,
            Self::Nonce | Self::Requester | Self::L2Oracle => ATTRIBUTE_BASE_SIZE,
        }
    }
}

/// Typed view over a message's attribute list. Absent attributes are zero.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes {
    /// Message nonce.
    pub nonce: U256,
    /// Asset the reward is paid in.
    pub reward_asset: Address,
    /// Reward amount.
    pub reward_amount: U256,
    /// Finality delay in seconds.
    pub finality_delay: U256,
    /// Expiry timestamp.
    pub expiry: U256,
    /// Original requester.
    pub requester: B256,
    /// Destination rollup oracle on L1.
    pub l2_oracle: Address,
}

impl Attributes {
    /// Decodes an attribute list.
    ///
    /// Blobs shorter than a selector and blobs with an unknown selector are skipped. A known
    /// attribute shorter than its kind requires fails the whole decode.
    pub fn decode<T: AsRef<[u8]>>(blobs: &[T]) -> Result<Self, DecodeError> {
        let mut attributes = Self::default();

        for blob in blobs {
            let blob = blob.as_ref();
            if blob.len() < SELECTOR_SIZE {
                continue;
            }

            let mut selector = [0u8; SELECTOR_SIZE];
            selector.copy_from_slice(&blob[..SELECTOR_SIZE]);
            let Some(kind) = AttributeKind::from_selector(selector) else {
                continue;
            };

            if blob.len() < kind.min_len() {
                return Err(DecodeError::AttributeTooShort(kind));
            }

            let first = &blob[SELECTOR_SIZE..ATTRIBUTE_BASE_SIZE];
            match kind {
                AttributeKind::Nonce => attributes.nonce = U256::from_be_slice(first),
                AttributeKind::Reward => {
                    attributes.reward_asset = Address::from_word(B256::from_slice(first));
                    attributes.reward_amount =
                        U256::from_be_slice(&blob[ATTRIBUTE_BASE_SIZE..ATTRIBUTE_EXTENDED_SIZE]);
                }
                AttributeKind::Delay => {
                    attributes.finality_delay = U256::from_be_slice(first);
                    attributes.expiry =
                        U256::from_be_slice(&blob[ATTRIBUTE_BASE_SIZE..ATTRIBUTE_EXTENDED_SIZE]);
                }
                AttributeKind::Requester => attributes.requester = B256::from_slice(first),
                AttributeKind::L2Oracle => {
                    attributes.l2_oracle = Address::from_word(B256::from_slice(first))
                }
            }
        }

        Ok(attributes)
    }
}

/// Extracts the attribute list packed behind the paymaster header of `paymasterAndData`.
pub fn decode_paymaster_attributes(paymaster_and_data: &[u8]) -> Result<Vec<Bytes>, DecodeError> {
    if paymaster_and_data.len() < PAYMASTER_HEADER_SIZE {
        return Err(DecodeError::PaymasterDataTooShort(paymaster_and_data.len()));
    }

    Vec::<Bytes>::abi_decode(&paymaster_and_data[PAYMASTER_HEADER_SIZE..])
        .map_err(DecodeError::PaymasterData)
}

#[cfg(any(test, feature = "test-utils"))]
mod encode {
    use super::*;

    fn attribute(kind: AttributeKind, words: &[B256]) -> Bytes {
        let mut blob = kind.selector().to_vec();
        for word in words {
            blob.extend_from_slice(word.as_slice());
        }
        blob.into()
    }

    /// Encodes a nonce attribute.
    pub fn encode_nonce(nonce: U256) -> Bytes {
        attribute(AttributeKind::Nonce, &[nonce.into()])
    }

    /// Encodes a reward attribute.
    pub fn encode_reward(asset: Address, amount: U256) -> Bytes {
        attribute(AttributeKind::Reward, &[asset.into_word(), amount.into()])
    }

    /// Encodes a delay attribute.
    pub fn encode_delay(finality_delay: U256, expiry: U256) -> Bytes {
        attribute(AttributeKind::Delay, &[finality_delay.into(), expiry.into()])
    }

    /// Encodes a requester attribute.
    pub fn encode_requester(requester: B256) -> Bytes {
        attribute(AttributeKind::Requester, &[requester])
    }

    /// Encodes an l2Oracle attribute.
    pub fn encode_l2_oracle(oracle: Address) -> Bytes {
        attribute(AttributeKind::L2Oracle, &[oracle.into_word()])
    }

    /// Packs attributes behind a zeroed paymaster header.
    pub fn encode_paymaster_attributes(attributes: &[Bytes]) -> Bytes {
        let mut data = vec![0u8; PAYMASTER_HEADER_SIZE];
        data.extend_from_slice(&attributes.to_vec().abi_encode());
        data.into()
    }
}

#[cfg(any(test, feature = "test-utils"))]
pub use encode::*;
