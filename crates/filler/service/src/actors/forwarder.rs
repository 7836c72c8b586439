use super::{FillerActor, TaggedLog};
use alloy_primitives::{Address, U256};
use alloy_rpc_types_eth::{Filter, Log};
use alloy_sol_types::SolEvent;
use async_trait::async_trait;
use filler_core::{ChainClientError, LogFilterer, Metrics};
use filler_types::bindings::RRC7755Outbox::MessagePosted;
use std::{sync::Arc, time::Duration};
use thiserror::Error;
use tokio::{sync::mpsc, time::MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

/// Polls one outbox for `MessagePosted` logs and forwards them, tagged with the chain id, into
/// the fulfillment queue.
///
/// The log filter is installed on start and uninstalled on exit. A poll failure ends the
/// forwarder; it is not resubscribed.
#[derive(Debug)]
pub struct OutboxForwarder<C> {
    chain_id: u64,
    outbox: Address,
    client: Arc<C>,
    sender: mpsc::Sender<TaggedLog>,
    poll_interval: Duration,
    cancel_token: CancellationToken,
}

impl<C: LogFilterer> OutboxForwarder<C> {
    /// Creates a new [`OutboxForwarder`].
    pub const fn new(
        chain_id: u64,
        outbox: Address,
        client: Arc<C>,
        sender: mpsc::Sender<TaggedLog>,
        poll_interval: Duration,
        cancel_token: CancellationToken,
    ) -> Self {
        Self { chain_id, outbox, client, sender, poll_interval, cancel_token }
    }

    fn filter(&self) -> Filter {
        Filter::new().address(self.outbox).event_signature(MessagePosted::SIGNATURE_HASH)
    }

    async fn poll(&self, filter_id: U256) -> Result<(), ForwarderError> {
        let mut interval = tokio::time::interval(self.poll_interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = self.cancel_token.cancelled() => {
                    info!(
                        target: "filler::forwarder",
                        chain_id = self.chain_id,
                        outbox = %self.outbox,
                        "OutboxForwarder cancellation requested, stopping..."
                    );
                    return Ok(());
                }
                _ = interval.tick() => {
                    let logs = self.client.filter_changes(filter_id).await.map_err(|source| {
                        ForwarderError::PollFilter { chain_id: self.chain_id, source }
                    })?;
                    if !self.forward(logs).await {
                        return Ok(());
                    }
                }
            }
        }
    }

    /// Forwards a batch of logs. Returns `false` once the forwarder should stop.
    async fn forward(&self, logs: Vec<Log>) -> bool {
        for log in logs {
            debug!(
                target: "filler::forwarder",
                chain_id = self.chain_id,
                tx_hash = ?log.transaction_hash,
                block_number = ?log.block_number,
                "Forwarding MessagePosted log"
            );
            let tagged = TaggedLog { chain_id: self.chain_id, log };
            tokio::select! {
                res = self.sender.send(tagged) => {
                    if res.is_err() {
                        warn!(
                            target: "filler::forwarder",
                            chain_id = self.chain_id,
                            "Fulfillment queue closed, stopping forwarder"
                        );
                        return false;
                    }
                    metrics::counter!(
                        Metrics::LOGS_FORWARDED_TOTAL,
                        "chain_id" => self.chain_id.to_string()
                    )
                    .increment(1);
                }
                _ = self.cancel_token.cancelled() => return false,
            }
        }
        true
    }
}

#[async_trait]
impl<C> FillerActor for OutboxForwarder<C>
where
    C: LogFilterer + 'static,
{
    type InboundEvent = Log;
    type Error = ForwarderError;

    async fn start(self) -> Result<(), Self::Error> {
        info!(
            target: "filler::forwarder",
            chain_id = self.chain_id,
            outbox = %self.outbox,
            "Starting OutboxForwarder"
        );

        let filter_id = self
            .client
            .new_log_filter(self.filter())
            .await
            .map_err(|source| ForwarderError::InstallFilter { chain_id: self.chain_id, source })?;

        let result = self.poll(filter_id).await;

        if let Err(err) = self.client.uninstall_filter(filter_id).await {
            error!(
                target: "filler::forwarder",
                chain_id = self.chain_id,
                %err,
                "Failed to uninstall log filter"
            );
        }

        result
    }
}

/// Errors that end an [`OutboxForwarder`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ForwarderError {
    /// Installing the log filter failed.
    #[error("failed to install log filter on chain {chain_id}: {source}")]
    InstallFilter {
        /// Chain of the outbox.
        chain_id: u64,
        /// Client error.
        #[source]
        source: ChainClientError,
    },

    /// Polling the log filter failed.
    #[error("failed to poll log filter on chain {chain_id}: {source}")]
    PollFilter {
        /// Chain of the outbox.
        chain_id: u64,
        /// Client error.
        #[source]
        source: ChainClientError,
    },
}
