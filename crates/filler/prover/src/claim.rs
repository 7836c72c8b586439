//! The source-chain reward claim.

use crate::{ClaimError, ProofBundle};
use alloy_primitives::{Address, B256, Bytes};
use alloy_rpc_types_eth::Filter;
use alloy_sol_types::{SolCall, SolEvent};
use filler_core::ChainReader;
use filler_types::{
    PostedMessage,
    bindings::RRC7755Outbox::{MessagePosted, claimRewardCall},
};
use tracing::info;

/// Finds the `MessagePosted` event of `message_id` emitted by one of `outboxes` at or after
/// `from_block`.
pub async fn find_posted_message<C: ChainReader>(
    client: &C,
    outboxes: Vec<Address>,
    message_id: B256,
    from_block: u64,
) -> Result<PostedMessage, ClaimError> {
    let filter = Filter::new()
        .address(outboxes)
        .event_signature(MessagePosted::SIGNATURE_HASH)
        .topic1(message_id)
        .from_block(from_block);

    let logs = client.get_logs(filter).await.map_err(ClaimError::Logs)?;
    let log = logs.first().ok_or(ClaimError::MessageNotFound(message_id))?;
    let message = PostedMessage::decode_log(&log.inner)?;

    info!(
        target: "filler::prover",
        %message_id,
        outbox = %log.address(),
        block_number = ?log.block_number,
        "Found posted message"
    );
    Ok(message)
}

/// Encodes the `claimReward` call presenting `bundle` as the proof that `message` was fulfilled,
/// paying the reward to `pay_to`.
pub fn build_claim_call(message: &PostedMessage, bundle: &ProofBundle, pay_to: Address) -> Bytes {
    claimRewardCall {
        destinationChain: message.destination_chain,
        receiver: message.receiver,
        payload: message.payload.clone(),
        attributes: message.attributes.clone(),
        proof: bundle.abi_encode(),
        payTo: pay_to,
    }
    .abi_encode()
    .into()
}
