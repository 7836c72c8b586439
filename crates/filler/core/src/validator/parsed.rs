use alloy_primitives::Address;
use filler_types::{Attributes, PostedMessage, bindings::PackedUserOperation};

/// A message that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedMessage {
    /// The message as posted.
    pub message: PostedMessage,
    /// Source chain id.
    pub source_chain_id: u64,
    /// Destination chain id.
    pub destination_chain_id: u64,
    /// Requesting account on the source chain.
    pub sender: Address,
    /// Receiving contract on the destination chain.
    pub receiver: Address,
    /// Fulfillment shape and its attributes.
    pub kind: MessageKind,
}

/// The two mutually exclusive fulfillment shapes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageKind {
    /// A batch of calls executed by the destination inbox.
    Direct {
        /// Attributes posted with the message.
        attributes: Attributes,
    },
    /// A smart-account user operation executed by the destination entrypoint.
    UserOp {
        /// The user operation decoded from the payload.
        user_op: PackedUserOperation,
        /// Attributes packed in the operation's paymaster data.
        attributes: Attributes,
    },
}

impl MessageKind {
    /// The attributes of either shape.
    pub const fn attributes(&self) -> &Attributes {
        match self {
            Self::Direct { attributes } | Self::UserOp { attributes, .. } => attributes,
        }
    }
}

impl ParsedMessage {
    /// Attributes of a direct-call message.
    pub const fn direct_attributes(&self) -> Option<&Attributes> {
        match &self.kind {
            MessageKind::Direct { attributes } => Some(attributes),
            MessageKind::UserOp { .. } => None,
        }
    }

    /// The user operation of an account-abstraction message.
    pub const fn user_op(&self) -> Option<&PackedUserOperation> {
        match &self.kind {
            MessageKind::UserOp { user_op, .. } => Some(user_op),
            MessageKind::Direct { .. } => None,
        }
    }

    /// The attributes governing the fulfillment, whichever the shape.
    pub const fn attributes(&self) -> &Attributes {
        self.kind.attributes()
    }
}
