use super::{FillerActor, TaggedLog};
use async_trait::async_trait;
use filler_core::{ChainClient, Fulfiller};
use std::{convert::Infallible, sync::Arc};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Drains a queue of [`TaggedLog`]s through the [`Fulfiller`], one message at a time.
///
/// A rejected message is logged by the pipeline and skipped. The actor stops when the queue is
/// closed or on cancellation.
#[derive(Debug)]
pub struct FulfillmentActor<C> {
    fulfiller: Arc<Fulfiller<C>>,
    receiver: mpsc::Receiver<TaggedLog>,
    cancel_token: CancellationToken,
}

impl<C: ChainClient + 'static> FulfillmentActor<C> {
    /// Creates a new [`FulfillmentActor`].
    pub const fn new(
        fulfiller: Arc<Fulfiller<C>>,
        receiver: mpsc::Receiver<TaggedLog>,
        cancel_token: CancellationToken,
    ) -> Self {
        Self { fulfiller, receiver, cancel_token }
    }
}

#[async_trait]
impl<C: ChainClient + 'static> FillerActor for FulfillmentActor<C> {
    type InboundEvent = TaggedLog;
    type Error = Infallible;

    async fn start(mut self) -> Result<(), Self::Error> {
        info!(target: "filler::fulfillment", "Starting FulfillmentActor");

        loop {
            tokio::select! {
                maybe_log = self.receiver.recv() => {
                    let Some(TaggedLog { chain_id, log }) = maybe_log else {
                        info!(
                            target: "filler::fulfillment",
                            "Fulfillment queue closed, stopping FulfillmentActor"
                        );
                        break;
                    };
                    if let Ok(submission) = self.fulfiller.handle_log(chain_id, &log).await {
                        debug!(
                            target: "filler::fulfillment",
                            message_id = %submission.message_id,
                            tx_hash = %submission.tx_hash,
                            "Message fulfilled"
                        );
                    }
                }
                _ = self.cancel_token.cancelled() => {
                    info!(
                        target: "filler::fulfillment",
                        "FulfillmentActor cancellation requested, stopping..."
                    );
                    break;
                }
            }
        }

        Ok(())
    }
}
