use alloy_primitives::Address;
use derive_more::Display;
use filler_types::DecodeError;
use thiserror::Error;

/// Fulfillment shape, as named in validation errors.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
pub enum MessageShape {
    /// Direct call from an externally owned account.
    #[display("EOA call")]
    Direct,
    /// Smart-account user operation.
    #[display("account abstraction")]
    UserOp,
}

/// Reasons a posted message is not fulfilled.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// The message, its attributes or its payload could not be decoded.
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// The message claims a source chain other than the one it was observed on.
    #[error("source chain mismatch, want: {expected}, got: {actual}")]
    SourceChainMismatch {
        /// Chain the message was observed on.
        expected: u64,
        /// Chain encoded in the message.
        actual: u64,
    },

    /// The destination chain is unknown.
    #[error("destination chain is not configured: {0}")]
    DestinationNotConfigured(u64),

    /// The receiver is not the destination's inbox or entrypoint.
    #[error("{shape} receiver address mismatch, want: {expected}, got: {actual}")]
    ReceiverMismatch {
        /// Message shape.
        shape: MessageShape,
        /// Configured receiver.
        expected: Address,
        /// Receiver in the message.
        actual: Address,
    },

    /// The l2Oracle attribute is not the destination's oracle.
    #[error("{shape} l2 oracle mismatch, want: {expected}, got: {actual}")]
    L2OracleMismatch {
        /// Message shape.
        shape: MessageShape,
        /// Configured oracle.
        expected: Address,
        /// Oracle in the attributes.
        actual: Address,
    },
}
