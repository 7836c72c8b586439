//! Fulfillment records kept by the destination inbox.

use crate::InboxError;
use alloy_eips::BlockId;
use alloy_primitives::{Address, B256};
use alloy_rpc_types_eth::{TransactionInput, TransactionRequest};
use alloy_sol_types::SolCall;
use filler_core::ChainReader;
use filler_types::bindings::{FulfillmentInfo, RRC7755Inbox::getFulfillmentInfoCall};
use tracing::info;

/// Reads the fulfillment record of `message_id` from `inbox`.
///
/// A record without a filler means the message was never fulfilled, so there is nothing to prove.
pub async fn fulfillment_info<C: ChainReader>(
    client: &C,
    inbox: Address,
    message_id: B256,
    block: BlockId,
) -> Result<FulfillmentInfo, InboxError> {
    let tx = TransactionRequest::default().to(inbox).input(TransactionInput::new(
        getFulfillmentInfoCall { messageId: message_id }.abi_encode().into(),
    ));
    let ret = client.call(tx, block).await.map_err(InboxError::Call)?;
    let info = getFulfillmentInfoCall::abi_decode_returns(&ret)
        .map_err(|err| InboxError::Decode(err.to_string()))?;

    if info.filler == Address::ZERO {
        return Err(InboxError::NotFulfilled(message_id));
    }

    info!(
        target: "filler::prover",
        %message_id,
        filler = %info.filler,
        timestamp = %info.timestamp,
        "Fulfillment found"
    );
    Ok(info)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::{TxKind, U256, address, aliases::U96, b256};
    use alloy_sol_types::SolValue;
    use filler_core::{ChainClientError, client::MockChainClient};

    const INBOX: Address = address!("0x1bb8dacba30b1cd82ce1d3d7f24e16ee549aebe8");
    const MESSAGE_ID: B256 =
        b256!("0x86a798714c57faaa50bc649a07dc45013c4931d4c630d5a316f5975f02704586");

    fn client(info: FulfillmentInfo) -> MockChainClient {
        let mut client = MockChainClient::new();
        client
            .expect_call()
            .withf(|tx, block| {
                let expected = getFulfillmentInfoCall { messageId: MESSAGE_ID }.abi_encode();
                tx.to == Some(TxKind::Call(INBOX)) &&
                    tx.input.input().map(|input| input.as_ref()) == Some(expected.as_slice()) &&
                    *block == BlockId::latest()
            })
            .return_once(move |_, _| Ok(info.abi_encode().into()));
        client
    }

    #[tokio::test]
    async fn test_fulfilled_message() {
        let filler = address!("0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266");
        let timestamp = U96::from(1_700_000_000u64);
        let recorded = FulfillmentInfo { timestamp, filler };

        let info = fulfillment_info(&client(recorded), INBOX, MESSAGE_ID, BlockId::latest())
            .await
            .unwrap();
        assert_eq!(info, FulfillmentInfo { timestamp, filler });
    }

    #[tokio::test]
    async fn test_unfulfilled_message() {
        let err = fulfillment_info(
            &client(FulfillmentInfo::default()),
            INBOX,
            MESSAGE_ID,
            BlockId::latest(),
        )
        .await
        .unwrap_err();
        assert_eq!(err, InboxError::NotFulfilled(MESSAGE_ID));
    }

    #[tokio::test]
    async fn test_call_failure() {
        let mut client = MockChainClient::new();
        client.expect_call().returning(|_, _| Err(ChainClientError::custom("execution reverted")));

        let err = fulfillment_info(&client, INBOX, MESSAGE_ID, BlockId::latest()).await.unwrap_err();
        assert!(matches!(err, InboxError::Call(_)));
    }

    #[tokio::test]
    async fn test_garbage_return_data() {
        let mut client = MockChainClient::new();
        client.expect_call().returning(|_, _| Ok(U256::from(1).to_be_bytes_vec().into()));

        let err = fulfillment_info(&client, INBOX, MESSAGE_ID, BlockId::latest()).await.unwrap_err();
        assert!(matches!(err, InboxError::Decode(_)));
    }
}
