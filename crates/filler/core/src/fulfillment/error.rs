use crate::{client::ChainClientError, validator::ValidationError};
use alloy_primitives::{Address, U256};
use derive_more::Display;
use filler_types::DecodeError;
use thiserror::Error;

/// Pipeline stage at which a message was rejected.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Log, attribute or payload decoding.
    #[display("decode")]
    Decode,
    /// Chain and address checks.
    #[display("validate")]
    Validate,
    /// Gas estimation or pricing.
    #[display("gas")]
    Gas,
    /// Reward sufficiency.
    #[display("reward")]
    Reward,
    /// Nonce lookup, signing or broadcast.
    #[display("submit")]
    Submit,
}

impl Stage {
    /// Every stage, in pipeline order.
    pub const ALL: [Self; 5] = [Self::Decode, Self::Validate, Self::Gas, Self::Reward, Self::Submit];

    /// Metric label of the stage.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Decode => "decode",
            Self::Validate => "validate",
            Self::Gas => "gas",
            Self::Reward => "reward",
            Self::Submit => "submit",
        }
    }
}

/// Reasons a message is not fulfilled. Every error is terminal for its message.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FulfillmentError {
    /// The log was observed on a chain missing from the registry.
    #[error("source chain is not configured: {0}")]
    UnknownSourceChain(u64),

    /// The log, attributes or payload could not be decoded.
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// The message failed validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Gas estimation failed.
    #[error("estimating gas: {0}")]
    GasEstimate(#[source] ChainClientError),

    /// Fetching the gas price failed.
    #[error("fetching gas price: {0}")]
    GasPrice(#[source] ChainClientError),

    /// The reward is not paid in the native currency.
    #[error("reward asset is not ETH")]
    RewardAssetNotNative(Address),

    /// The reward does not cover the call value and gas.
    #[error("reward amount is not enough, required minimum: {required}, provided: {provided}")]
    InsufficientReward {
        /// Value plus maximum gas fee.
        required: U256,
        /// Posted reward.
        provided: U256,
    },

    /// Fetching the relayer's pending nonce failed.
    #[error("fetching pending nonce: {0}")]
    Nonce(#[source] ChainClientError),

    /// Signing the transaction failed.
    #[error("signing transaction: {0}")]
    Signing(String),

    /// Broadcasting the transaction failed.
    #[error("sending transaction: {0}")]
    Submission(#[source] ChainClientError),
}

impl From<alloy_signer::Error> for FulfillmentError {
    fn from(err: alloy_signer::Error) -> Self {
        Self::Signing(err.to_string())
    }
}

impl FulfillmentError {
    /// The stage the error belongs to.
    pub const fn stage(&self) -> Stage {
        match self {
            Self::Decode(_) | Self::Validation(ValidationError::Decode(_)) => Stage::Decode,
            Self::UnknownSourceChain(_) | Self::Validation(_) => Stage::Validate,
            Self::GasEstimate(_) | Self::GasPrice(_) => Stage::Gas,
            Self::RewardAssetNotNative(_) | Self::InsufficientReward { .. } => Stage::Reward,
            Self::Nonce(_) | Self::Signing(_) | Self::Submission(_) => Stage::Submit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_labels_match_display() {
        for stage in Stage::ALL {
            assert_eq!(stage.as_str(), stage.to_string());
        }
    }

    #[test]
    fn test_error_stages() {
        assert_eq!(FulfillmentError::Decode(DecodeError::CallValueOverflow).stage(), Stage::Decode);
        assert_eq!(
            FulfillmentError::Validation(ValidationError::Decode(DecodeError::CallValueOverflow))
                .stage(),
            Stage::Decode
        );
        assert_eq!(
            FulfillmentError::Validation(ValidationError::DestinationNotConfigured(1)).stage(),
            Stage::Validate
        );
        assert_eq!(
            FulfillmentError::GasPrice(ChainClientError::custom("x")).stage(),
            Stage::Gas
        );
        assert_eq!(FulfillmentError::RewardAssetNotNative(Address::ZERO).stage(), Stage::Reward);
        assert_eq!(FulfillmentError::Signing("x".to_string()).stage(), Stage::Submit);
    }
}
