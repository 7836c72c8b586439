//! Contains the main filler service runner.

use crate::actors::{Dispatcher, FillerActor, FulfillmentActor, OutboxForwarder, TaggedLog};
use alloy_signer_local::PrivateKeySigner;
use anyhow::{Context, Result};
use filler_core::{
    ChainClient, ChainRegistry, FillerConfig, Fulfiller, Metrics, NodeClient, Topology,
    config::FulfillmentConfig,
};
use std::{collections::HashMap, sync::Arc};
use tokio::{sync::mpsc, task::JoinSet};
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

/// The filler service. Spawns one forwarder per configured outbox and the fulfillment consumers
/// of the chosen topology, and supervises them.
#[derive(Debug)]
pub struct Service<C> {
    config: FulfillmentConfig,
    registry: Arc<ChainRegistry<C>>,
    fulfiller: Arc<Fulfiller<C>>,

    cancel_token: CancellationToken,
    join_set: JoinSet<Result<()>>,
}

impl Service<NodeClient> {
    /// Connects to every configured chain and creates the service.
    pub async fn connect(config: &FillerConfig) -> Result<Self> {
        let registry = ChainRegistry::connect(config.chains.values())
            .await
            .context("failed to connect to configured chains")?;
        let signer = config.wallets.verified_signer().context("invalid relayer wallet")?;
        Ok(Self::new(config.fulfillment.clone(), registry, signer))
    }
}

impl<C: ChainClient + 'static> Service<C> {
    /// Creates a new filler service over an already connected registry.
    pub fn new(
        config: FulfillmentConfig,
        registry: ChainRegistry<C>,
        signer: PrivateKeySigner,
    ) -> Self {
        let registry = Arc::new(registry);
        let fulfiller = Arc::new(Fulfiller::new(Arc::clone(&registry), signer));
        Self {
            config,
            registry,
            fulfiller,
            cancel_token: CancellationToken::new(),
            join_set: JoinSet::new(),
        }
    }

    /// The service's cancellation token.
    pub const fn cancel_token(&self) -> &CancellationToken {
        &self.cancel_token
    }

    /// Spawns all actors.
    pub fn initialise(&mut self) -> Result<()> {
        if self.config.queue_capacity == 0 {
            anyhow::bail!("fulfillment queue capacity must be positive");
        }
        Metrics::init(self.registry.chain_ids());

        let (sender, receiver) = mpsc::channel(self.config.queue_capacity);
        self.init_forwarders(&sender);
        // Only forwarders hold senders, so the queue closes once they have all exited.
        drop(sender);

        match self.config.topology {
            Topology::Single => self.init_fulfillment(receiver),
            Topology::PerDestination => self.init_dispatcher(receiver),
        }

        info!(
            target: "filler::service",
            relayer = %self.fulfiller.relayer(),
            topology = %self.config.topology,
            chains = self.registry.len(),
            "Filler service initialised"
        );
        Ok(())
    }

    fn init_forwarders(&mut self, sender: &mpsc::Sender<TaggedLog>) {
        for handle in self.registry.iter() {
            let chain_id = handle.endpoint.chain_id;
            for (name, outbox) in &handle.endpoint.outbox_addresses {
                info!(
                    target: "filler::service",
                    chain_id,
                    outbox_name = %name,
                    %outbox,
                    "Watching outbox"
                );

                let forwarder = OutboxForwarder::new(
                    chain_id,
                    *outbox,
                    Arc::clone(&handle.client),
                    sender.clone(),
                    self.config.poll_interval(),
                    self.cancel_token.clone(),
                );
                // A failed forwarder ends alone; the others keep running.
                self.join_set.spawn(async move {
                    if let Err(err) = forwarder.start().await {
                        error!(target: "filler::service", chain_id, %err, "Outbox forwarder stopped");
                    }
                    Ok(())
                });
            }
        }
    }

    fn init_fulfillment(&mut self, receiver: mpsc::Receiver<TaggedLog>) {
        let actor =
            FulfillmentActor::new(Arc::clone(&self.fulfiller), receiver, self.cancel_token.clone());
        self.join_set.spawn(async move {
            actor.start().await.map_err(|err| anyhow::anyhow!("fulfillment actor: {err:?}"))
        });
    }

    fn init_dispatcher(&mut self, receiver: mpsc::Receiver<TaggedLog>) {
        let chain_ids: Vec<u64> = self.registry.chain_ids().collect();
        let mut routes = HashMap::new();
        for chain_id in chain_ids {
            let (sender, receiver) = mpsc::channel(self.config.queue_capacity);
            routes.insert(chain_id, sender);
            self.init_fulfillment(receiver);
        }

        let dispatcher = Dispatcher::new(receiver, routes, self.cancel_token.clone());
        self.join_set.spawn(async move {
            dispatcher.start().await.map_err(|err| anyhow::anyhow!("dispatcher: {err:?}"))
        });
    }

    /// Supervises the spawned actors until they have all finished. A failed or panicked task
    /// cancels the whole service.
    pub async fn run(&mut self) -> Result<()> {
        while let Some(res) = self.join_set.join_next().await {
            match res {
                Ok(Ok(())) => {
                    info!(target: "filler::service", "Task completed successfully.");
                }
                Ok(Err(err)) => {
                    error!(target: "filler::service", %err, "A task encountered an error.");
                    self.cancel_token.cancel();
                    return Err(err.context("a service task failed"));
                }
                Err(err) => {
                    error!(target: "filler::service", %err, "A task panicked.");
                    self.cancel_token.cancel();
                    return Err(anyhow::anyhow!("a service task failed: {err}"));
                }
            }
        }
        warn!(target: "filler::service", "All tasks finished");
        Ok(())
    }

    /// Cancels all actors and waits for them to finish.
    pub async fn shutdown(mut self) -> Result<()> {
        self.cancel_token.cancel();

        while let Some(res) = self.join_set.join_next().await {
            match res {
                Ok(Ok(())) => {
                    info!(target: "filler::service", "Task completed successfully during shutdown.");
                }
                Ok(Err(err)) => {
                    error!(target: "filler::service", %err, "A task encountered an error during shutdown.");
                }
                Err(err) => {
                    error!(target: "filler::service", %err, "A task encountered an error during shutdown.");
                }
            }
        }
        Ok(())
    }
}
