//! The fulfillment pipeline: call construction, gas pricing, reward check and signed submission.
//!
//! Every message moves through `Posted -> Validated -> PriceQuoted -> RewardChecked -> Submitted`
//! and is rejected at the first failing stage. Rejected messages are never retried.

mod call;
pub use call::{FulfillmentCall, build_fulfillment_call};

mod gas;
pub use gas::{GAS_LIMIT_BUFFER_DENOMINATOR, GAS_LIMIT_BUFFER_NUMERATOR, GasQuote, buffered_gas_limit, quote_gas};

mod reward;
pub use reward::{NATIVE_ASSET, check_reward};

mod submit;
pub use submit::{
    TEST_TRANSFER_GAS_LIMIT, TEST_TRANSFER_VALUE, send_test_transfer, sign_legacy, submit_legacy,
};

mod fulfiller;
pub use fulfiller::{Fulfiller, Submission};

mod error;
pub use error::{FulfillmentError, Stage};
