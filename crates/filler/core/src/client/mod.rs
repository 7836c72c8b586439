//! Chain client capabilities and the alloy-backed node client.

mod traits;
pub use traits::{ChainClient, ChainReader, ChainWriter, LogFilterer};

mod node;
pub use node::NodeClient;

mod proof;
pub use proof::{RawAccountProof, RawStorageProof};

mod error;
pub use error::ChainClientError;

#[cfg(any(test, feature = "test-utils"))]
mod mock;
#[cfg(any(test, feature = "test-utils"))]
pub use mock::MockChainClient;
