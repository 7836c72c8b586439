//! The posted-message unit of work.

use crate::{
    DecodeError,
    bindings::RRC7755Outbox::MessagePosted,
    packing::{word_to_address, word_to_chain_id},
};
use alloy_primitives::{Address, B256, Bytes, Log};
use alloy_sol_types::SolEvent;

/// A cross-chain call request as emitted by an outbox, with chain ids and accounts still in their
/// chain-agnostic 32-byte form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostedMessage {
    /// Message identifier, the indexed topic of the event.
    pub message_id: B256,
    /// Source chain id word.
    pub source_chain: B256,
    /// Requesting account word.
    pub sender: B256,
    /// Destination chain id word.
    pub destination_chain: B256,
    /// Receiving contract word.
    pub receiver: B256,
    /// Call payload.
    pub payload: Bytes,
    /// Raw attribute list. Empty for user-operation messages.
    pub attributes: Vec<Bytes>,
}

impl PostedMessage {
    /// Decodes a `MessagePosted` log.
    pub fn decode_log(log: &Log) -> Result<Self, DecodeError> {
        let event =
            MessagePosted::decode_log_data(&log.data).map_err(DecodeError::MessagePosted)?;
        Ok(event.into())
    }

    /// Source chain id.
    pub fn source_chain_id(&self) -> u64 {
        word_to_chain_id(&self.source_chain)
    }

    /// Destination chain id.
    pub fn destination_chain_id(&self) -> u64 {
        word_to_chain_id(&self.destination_chain)
    }

    /// Sender address.
    pub fn sender_address(&self) -> Address {
        word_to_address(&self.sender)
    }

    /// Receiver address on the destination chain.
    pub fn receiver_address(&self) -> Address {
        word_to_address(&self.receiver)
    }
}

impl From<MessagePosted> for PostedMessage {
    fn from(event: MessagePosted) -> Self {
        Self {
            message_id: event.messageId,
            source_chain: event.sourceChain,
            sender: event.sender,
            destination_chain: event.destinationChain,
            receiver: event.receiver,
            payload: event.payload,
            attributes: event.attributes,
        }
    }
}

impl From<&PostedMessage> for MessagePosted {
    fn from(message: &PostedMessage) -> Self {
        Self {
            messageId: message.message_id,
            sourceChain: message.source_chain,
            sender: message.sender,
            destinationChain: message.destination_chain,
            receiver: message.receiver,
            payload: message.payload.clone(),
            attributes: message.attributes.clone(),
        }
    }
}
