//! The runnable service layer of the RRC-7755 filler: outbox forwarders feeding a bounded queue
//! drained by fulfillment actors.
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

mod service;
pub use service::Service;

mod actors;
pub use actors::{
    Dispatcher, FillerActor, ForwarderError, FulfillmentActor, OutboxForwarder, TaggedLog,
};
