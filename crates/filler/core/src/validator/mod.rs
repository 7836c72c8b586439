//! Structural, chain and address checks of posted messages.

mod parsed;
pub use parsed::{MessageKind, ParsedMessage};

mod error;
pub use error::{MessageShape, ValidationError};

use crate::{config::ChainEndpoint, registry::ChainRegistry};
use alloy_primitives::Address;
use filler_types::{Attributes, PostedMessage, decode_user_operation};
use tracing::debug;

/// Validates a message posted on `source` against the destination's configuration.
///
/// Messages without attributes carry a packed user operation in their payload, whose paymaster
/// data holds the attributes. All other messages are direct calls to the destination inbox.
pub fn validate<C>(
    message: &PostedMessage,
    source: &ChainEndpoint,
    registry: &ChainRegistry<C>,
) -> Result<ParsedMessage, ValidationError> {
    let source_chain_id = message.source_chain_id();
    let destination_chain_id = message.destination_chain_id();
    let sender = message.sender_address();
    let receiver = message.receiver_address();

    let kind = if message.attributes.is_empty() {
        let user_op = decode_user_operation(&message.payload)?;
        let attributes = Attributes::decode(&user_op.paymaster_attributes()?)?;
        MessageKind::UserOp { user_op, attributes }
    } else {
        MessageKind::Direct { attributes: Attributes::decode(&message.attributes)? }
    };

    if source_chain_id != source.chain_id {
        return Err(ValidationError::SourceChainMismatch {
            expected: source.chain_id,
            actual: source_chain_id,
        });
    }

    let destination = registry
        .endpoint(destination_chain_id)
        .ok_or(ValidationError::DestinationNotConfigured(destination_chain_id))?;

    let (shape, expected_receiver) = match &kind {
        MessageKind::Direct { .. } => (MessageShape::Direct, destination.inbox_address),
        MessageKind::UserOp { .. } => (MessageShape::UserOp, destination.entrypoint_address),
    };
    check_address(receiver, expected_receiver, |expected, actual| {
        ValidationError::ReceiverMismatch { shape, expected, actual }
    })?;
    check_address(kind.attributes().l2_oracle, destination.l2_oracle, |expected, actual| {
        ValidationError::L2OracleMismatch { shape, expected, actual }
    })?;

    debug!(
        target: "filler::validator",
        message_id = %message.message_id,
        source_chain_id,
        destination_chain_id,
        %shape,
        "Message validated"
    );

    Ok(ParsedMessage {
        message: message.clone(),
        source_chain_id,
        destination_chain_id,
        sender,
        receiver,
        kind,
    })
}

fn check_address(
    actual: Address,
    expected: Address,
    err: impl FnOnce(Address, Address) -> ValidationError,
) -> Result<(), ValidationError> {
    if actual == expected { Ok(()) } else { Err(err(expected, actual)) }
}
