//! Core of the RRC-7755 filler: configuration, chain clients, the chain registry, message
//! validation and the fulfillment pipeline.
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

pub mod client;
pub use client::{ChainClient, ChainClientError, ChainReader, ChainWriter, LogFilterer, NodeClient};

pub mod config;
pub use config::{ChainEndpoint, ConfigError, FillerConfig, Topology};

mod registry;
pub use registry::{ChainHandle, ChainRegistry, RegistryError};

pub mod validator;
pub use validator::{MessageKind, ParsedMessage, ValidationError};

pub mod fulfillment;
pub use fulfillment::{Fulfiller, FulfillmentError, Submission};

mod metrics;
pub use metrics::Metrics;
