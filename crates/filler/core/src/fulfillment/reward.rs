use super::{FulfillmentError, GasQuote};
use alloy_primitives::{Address, U256, address};
use filler_types::Attributes;

/// Sentinel asset address denoting the chain's native currency.
pub const NATIVE_ASSET: Address = address!("0xEeeeeEeeeEeEeeEeEeEeeEEEeeeeEeeeeeeeEEeE");

/// Checks that the posted reward pays for the call value and the maximum gas fee.
///
/// Only native-currency rewards are accepted, and the reward must strictly exceed
/// `value + gas_limit * gas_price`.
pub fn check_reward(
    attributes: &Attributes,
    value: U256,
    quote: &GasQuote,
) -> Result<U256, FulfillmentError> {
    if attributes.reward_asset != NATIVE_ASSET {
        return Err(FulfillmentError::RewardAssetNotNative(attributes.reward_asset));
    }

    let required = value.saturating_add(quote.max_fee());
    if attributes.reward_amount <= required {
        return Err(FulfillmentError::InsufficientReward {
            required,
            provided: attributes.reward_amount,
        });
    }

    Ok(required)
}
