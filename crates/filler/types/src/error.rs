//! Decoding errors for RRC-7755 messages.

use crate::AttributeKind;
use thiserror::Error;

/// Errors raised while decoding a posted message, its attributes or its payload.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// An attribute blob is shorter than its kind requires.
    #[error("{0} attribute too short")]
    AttributeTooShort(AttributeKind),

    /// The paymaster data does not contain the fixed account-abstraction header.
    #[error("paymaster data is too short: {0} bytes")]
    PaymasterDataTooShort(usize),

    /// The paymaster data trailer is not an ABI-encoded `bytes[]`.
    #[error("unpacking paymaster data: {0}")]
    PaymasterData(#[source] alloy_sol_types::Error),

    /// The payload is not an ABI-encoded packed user operation.
    #[error("unpacking packed user operation: {0}")]
    UserOperation(#[source] alloy_sol_types::Error),

    /// The payload is not an ABI-encoded list of calls.
    #[error("unpacking calls: {0}")]
    Calls(#[source] alloy_sol_types::Error),

    /// The sum of the requested call values overflows 256 bits.
    #[error("call value overflow")]
    CallValueOverflow,

    /// The log is not a `MessagePosted` event.
    #[error("decoding MessagePosted log: {0}")]
    MessagePosted(#[source] alloy_sol_types::Error),
}

impl PartialEq for DecodeError {
    fn eq(&self, other: &Self) -> bool {
        use DecodeError::*;
        match (self, other) {
            (AttributeTooShort(a), AttributeTooShort(b)) => a == b,
            (PaymasterDataTooShort(a), PaymasterDataTooShort(b)) => a == b,
            (PaymasterData(a), PaymasterData(b)) |
            (UserOperation(a), UserOperation(b)) |
            (Calls(a), Calls(b)) |
            (MessagePosted(a), MessagePosted(b)) => a.to_string() == b.to_string(),
            (CallValueOverflow, CallValueOverflow) => true,
            _ => false,
        }
    }
}

impl Eq for DecodeError {}
