use super::{FulfillmentCall, FulfillmentError};
use crate::client::ChainReader;
use alloy_primitives::U256;

/// Numerator of the safety margin applied to gas estimates.
pub const GAS_LIMIT_BUFFER_NUMERATOR: u64 = 12;

/// Denominator of the safety margin applied to gas estimates.
pub const GAS_LIMIT_BUFFER_DENOMINATOR: u64 = 10;

/// Gas limit and price of a single submission attempt. Never cached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GasQuote {
    /// Buffered gas limit.
    pub gas_limit: u64,
    /// Legacy gas price in wei.
    pub gas_price: u128,
}

impl GasQuote {
    /// Maximum fee the transaction can cost, `gas_limit * gas_price`.
    pub fn max_fee(&self) -> U256 {
        U256::from(self.gas_limit) * U256::from(self.gas_price)
    }
}

/// Applies the 1.2x margin to a gas estimate, truncating.
pub const fn buffered_gas_limit(estimate: u64) -> u64 {
    let buffered = estimate as u128 * GAS_LIMIT_BUFFER_NUMERATOR as u128 /
        GAS_LIMIT_BUFFER_DENOMINATOR as u128;
    if buffered > u64::MAX as u128 { u64::MAX } else { buffered as u64 }
}

/// Quotes gas for a fulfillment call against the destination node.
pub async fn quote_gas<C: ChainReader>(
    client: &C,
    call: &FulfillmentCall,
) -> Result<GasQuote, FulfillmentError> {
    let estimate =
        client.estimate_gas(call.to_request()).await.map_err(FulfillmentError::GasEstimate)?;
    let gas_price = client.gas_price().await.map_err(FulfillmentError::GasPrice)?;
    Ok(GasQuote { gas_limit: buffered_gas_limit(estimate), gas_price })
}
