//! Prove Subcommand

use crate::flags::{ConfigArgs, GlobalArgs};
use alloy_eips::{BlockId, BlockNumberOrTag};
use alloy_primitives::{Address, B256};
use anyhow::{Context, Result};
use clap::Parser;
use filler_cli::LogConfig;
use filler_core::{ChainEndpoint, ChainRegistry, NodeClient};
use filler_prover::{
    ArbitrumStateProver, L1StateProver, ProofComposer, StorageProver, build_claim_call,
    find_posted_message, fulfillment_info,
};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::info;

/// The `prove` Subcommand
///
/// Composes the proof that a message was fulfilled on its destination rollup and prints the proof
/// bundle as JSON, followed by its ABI encoding. With `--source-chain`, the posted message is
/// looked up on that chain's outboxes and the `claimReward` calldata paying the relayer is printed
/// last.
///
/// # Usage
///
/// ```sh
/// filler prove --config filler.toml --message-id 0x86a7... --destination-chain 421614
/// ```
#[derive(Parser, Default, PartialEq, Eq, Debug, Clone)]
#[command(about = "Proves the fulfillment of a message.")]
pub struct ProveCommand {
    /// Configuration file.
    #[command(flatten)]
    pub config: ConfigArgs,
    /// Identifier of the fulfilled message.
    #[arg(long = "message-id")]
    pub message_id: B256,
    /// Chain the message was fulfilled on.
    #[arg(long = "destination-chain")]
    pub destination_chain: u64,
    /// L1 block to prove against. Defaults to the latest block.
    #[arg(long = "l1-block")]
    pub l1_block: Option<u64>,
    /// Chain the message was posted on. Enables claim calldata output.
    #[arg(long = "source-chain")]
    pub source_chain: Option<u64>,
    /// First source block searched for the posted message.
    #[arg(long = "source-from-block", default_value_t = 0)]
    pub source_from_block: u64,
}

impl ProveCommand {
    /// Initializes the logging system based on global arguments.
    pub fn init_logs(&self, args: &GlobalArgs) -> Result<()> {
        LogConfig::new(args.log_args.clone())
            .for_command("prove")
            .init_tracing_subscriber(None)?;
        Ok(())
    }

    /// Composes and prints the proof bundle.
    pub async fn run(&self, _args: &GlobalArgs, cancel: CancellationToken) -> Result<()> {
        let config = self.config.load()?;
        let prover = config.prover.as_ref().context("missing [prover] configuration")?;
        let l1_endpoint = config
            .chain(prover.l1_chain_id)
            .with_context(|| format!("L1 chain {} is not configured", prover.l1_chain_id))?;
        let destination = config
            .chain(self.destination_chain)
            .with_context(|| format!("chain {} is not configured", self.destination_chain))?;

        let source = self
            .source_chain
            .map(|chain_id| {
                config.chain(chain_id).with_context(|| format!("chain {chain_id} is not configured"))
            })
            .transpose()?;

        let mut endpoints: Vec<&ChainEndpoint> =
            [Some(l1_endpoint), Some(destination), source].into_iter().flatten().collect();
        endpoints.sort_by_key(|endpoint| endpoint.chain_id);
        endpoints.dedup_by_key(|endpoint| endpoint.chain_id);

        let registry = ChainRegistry::connect(endpoints).await?;
        let l1 = Self::client(&registry, prover.l1_chain_id)?;
        let l2 = Self::client(&registry, self.destination_chain)?;

        let inbox = destination.inbox_address;
        fulfillment_info(l2.as_ref(), inbox, self.message_id, BlockId::latest()).await?;

        let rollup = ArbitrumStateProver::new(
            Arc::clone(&l1),
            Arc::clone(&l2),
            destination.l2_oracle,
            destination.l2_oracle_storage_key,
            prover.assertion_lookback_blocks,
        );
        let composer = ProofComposer::new(
            L1StateProver::new(l1, prover.devnet),
            rollup,
            StorageProver::new(l2),
            destination.inbox_address,
            cancel,
        );

        let l1_block = self.l1_block.map_or(BlockNumberOrTag::Latest, BlockNumberOrTag::Number);
        let bundle = composer.compose(self.message_id, l1_block).await?;
        info!(
            target: "filler::cli",
            message_id = %self.message_id,
            destination_chain = self.destination_chain,
            "Proof composed"
        );

        println!("{}", serde_json::to_string_pretty(&bundle)?);
        println!("{}", bundle.abi_encode());

        if let Some(source) = source {
            let client = Self::client(&registry, source.chain_id)?;
            let outboxes: Vec<Address> = source.outbox_addresses.values().copied().collect();
            let message = find_posted_message(
                client.as_ref(),
                outboxes,
                self.message_id,
                self.source_from_block,
            )
            .await?;
            println!("{}", build_claim_call(&message, &bundle, config.wallets.from_address));
        }
        Ok(())
    }

    fn client(registry: &ChainRegistry<NodeClient>, chain_id: u64) -> Result<Arc<NodeClient>> {
        registry.client(chain_id).cloned().with_context(|| format!("no client for chain {chain_id}"))
    }
}
