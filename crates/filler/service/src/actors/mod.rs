//! [FillerActor] services of the filler.
//!
//! [FillerActor]: super::FillerActor

mod traits;
pub use traits::FillerActor;

mod forwarder;
pub use forwarder::{ForwarderError, OutboxForwarder};

pub(crate) mod fulfillment;
pub use fulfillment::FulfillmentActor;

mod dispatcher;
pub use dispatcher::Dispatcher;

use alloy_rpc_types_eth::Log;

/// A `MessagePosted` log tagged with the chain it was observed on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaggedLog {
    /// Chain the outbox lives on.
    pub chain_id: u64,
    /// The log.
    pub log: Log,
}
