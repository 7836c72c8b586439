use super::{FillerActor, TaggedLog};
use async_trait::async_trait;
use filler_types::PostedMessage;
use std::{collections::HashMap, convert::Infallible};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{info, trace, warn};

/// Routes logs from the shared queue to one queue per destination chain.
///
/// Logs that do not decode as `MessagePosted`, or that name a destination without a queue, are
/// dropped. The per-destination queues close when the dispatcher stops.
#[derive(Debug)]
pub struct Dispatcher {
    receiver: mpsc::Receiver<TaggedLog>,
    routes: HashMap<u64, mpsc::Sender<TaggedLog>>,
    cancel_token: CancellationToken,
}

impl Dispatcher {
    /// Creates a new [`Dispatcher`].
    pub const fn new(
        receiver: mpsc::Receiver<TaggedLog>,
        routes: HashMap<u64, mpsc::Sender<TaggedLog>>,
        cancel_token: CancellationToken,
    ) -> Self {
        Self { receiver, routes, cancel_token }
    }

    async fn dispatch(&self, tagged: TaggedLog) {
        let destination_chain_id = match PostedMessage::decode_log(&tagged.log.inner) {
            Ok(message) => message.destination_chain_id(),
            Err(err) => {
                warn!(
                    target: "filler::dispatcher",
                    chain_id = tagged.chain_id,
                    tx_hash = ?tagged.log.transaction_hash,
                    %err,
                    "Dropping undecodable log"
                );
                return;
            }
        };

        let Some(route) = self.routes.get(&destination_chain_id) else {
            warn!(
                target: "filler::dispatcher",
                chain_id = tagged.chain_id,
                destination_chain_id,
                "Dropping message for unconfigured destination"
            );
            return;
        };

        trace!(target: "filler::dispatcher", destination_chain_id, "Routing message");
        tokio::select! {
            res = route.send(tagged) => {
                if res.is_err() {
                    warn!(
                        target: "filler::dispatcher",
                        destination_chain_id,
                        "Destination queue closed, dropping message"
                    );
                }
            }
            _ = self.cancel_token.cancelled() => {}
        }
    }
}

#[async_trait]
impl FillerActor for Dispatcher {
    type InboundEvent = TaggedLog;
    type Error = Infallible;

    async fn start(mut self) -> Result<(), Self::Error> {
        info!(
            target: "filler::dispatcher",
            destinations = self.routes.len(),
            "Starting Dispatcher"
        );

        loop {
            tokio::select! {
                maybe_log = self.receiver.recv() => {
                    let Some(tagged) = maybe_log else {
                        info!(target: "filler::dispatcher", "Shared queue closed, stopping Dispatcher");
                        break;
                    };
                    self.dispatch(tagged).await;
                }
                _ = self.cancel_token.cancelled() => {
                    info!(target: "filler::dispatcher", "Dispatcher cancellation requested, stopping...");
                    break;
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actors::fulfillment::tests::{DESTINATION, SOURCE, foreign_log, posted_log};

    #[tokio::test]
    async fn test_routes_by_destination() {
        let (shared_tx, shared_rx) = mpsc::channel(10);
        let (dest_a_tx, mut dest_a_rx) = mpsc::channel(10);
        let (dest_b_tx, mut dest_b_rx) = mpsc::channel(10);
        let routes = HashMap::from([(DESTINATION, dest_a_tx), (SOURCE, dest_b_tx)]);

        let to_a = TaggedLog { chain_id: SOURCE, log: posted_log(DESTINATION) };
        let to_b = TaggedLog { chain_id: DESTINATION, log: posted_log(SOURCE) };
        shared_tx.send(to_a.clone()).await.unwrap();
        shared_tx.send(to_b.clone()).await.unwrap();
        drop(shared_tx);

        let dispatcher = Dispatcher::new(shared_rx, routes, CancellationToken::new());
        assert!(dispatcher.start().await.is_ok());

        assert_eq!(dest_a_rx.recv().await, Some(to_a));
        assert_eq!(dest_b_rx.recv().await, Some(to_b));
        // Routes are dropped with the dispatcher.
        assert_eq!(dest_a_rx.recv().await, None);
        assert_eq!(dest_b_rx.recv().await, None);
    }

    #[tokio::test]
    async fn test_drops_unroutable_logs() {
        filler_cli::init_test_tracing();
        let (shared_tx, shared_rx) = mpsc::channel(10);
        let (dest_tx, mut dest_rx) = mpsc::channel(10);
        let routes = HashMap::from([(DESTINATION, dest_tx)]);

        shared_tx.send(TaggedLog { chain_id: SOURCE, log: foreign_log() }).await.unwrap();
        shared_tx.send(TaggedLog { chain_id: SOURCE, log: posted_log(10) }).await.unwrap();
        drop(shared_tx);

        let dispatcher = Dispatcher::new(shared_rx, routes, CancellationToken::new());
        assert!(dispatcher.start().await.is_ok());
        assert_eq!(dest_rx.recv().await, None);
    }

    #[tokio::test]
    async fn test_cancellation() {
        let (_shared_tx, shared_rx) = mpsc::channel(10);
        let cancel_token = CancellationToken::new();
        cancel_token.cancel();

        let dispatcher = Dispatcher::new(shared_rx, HashMap::new(), cancel_token);
        assert!(dispatcher.start().await.is_ok());
    }
}
