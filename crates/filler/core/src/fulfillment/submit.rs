use super::{FulfillmentError, GasQuote};
use crate::client::{ChainReader, ChainWriter};
use alloy_consensus::{SignableTransaction, TxEnvelope, TxLegacy};
use alloy_eips::eip2718::Encodable2718;
use alloy_network::TxSignerSync;
use alloy_primitives::{Address, B256, Bytes, TxKind, U256};
use alloy_signer_local::PrivateKeySigner;
use tracing::info;

/// Gas limit of a test transfer.
pub const TEST_TRANSFER_GAS_LIMIT: u64 = 21_000;

/// Value of a test transfer, 10 gwei.
pub const TEST_TRANSFER_VALUE: u64 = 10_000_000_000;

/// Signs a legacy EIP-155 transaction and returns its EIP-2718 encoding.
pub fn sign_legacy(
    signer: &PrivateKeySigner,
    chain_id: u64,
    nonce: u64,
    to: Address,
    value: U256,
    input: Bytes,
    quote: &GasQuote,
) -> Result<Bytes, FulfillmentError> {
    let mut tx = TxLegacy {
        chain_id: Some(chain_id),
        nonce,
        gas_price: quote.gas_price,
        gas_limit: quote.gas_limit,
        to: TxKind::Call(to),
        value,
        input,
    };
    let signature = signer.sign_transaction_sync(&mut tx)?;
    let envelope = TxEnvelope::from(tx.into_signed(signature));
    Ok(envelope.encoded_2718().into())
}

/// Signs a legacy transaction with the relayer's pending nonce and broadcasts it.
pub async fn submit_legacy<C: ChainReader + ChainWriter>(
    client: &C,
    signer: &PrivateKeySigner,
    chain_id: u64,
    to: Address,
    value: U256,
    input: Bytes,
    quote: &GasQuote,
) -> Result<B256, FulfillmentError> {
    let nonce =
        client.pending_nonce(signer.address()).await.map_err(FulfillmentError::Nonce)?;
    let raw = sign_legacy(signer, chain_id, nonce, to, value, input, quote)?;
    client.send_raw_transaction(raw).await.map_err(FulfillmentError::Submission)
}

/// Sends a plain 10 gwei transfer from the relayer to `recipient`.
pub async fn send_test_transfer<C: ChainReader + ChainWriter>(
    client: &C,
    signer: &PrivateKeySigner,
    chain_id: u64,
    recipient: Address,
) -> Result<B256, FulfillmentError> {
    let gas_price = client.gas_price().await.map_err(FulfillmentError::GasPrice)?;
    let quote = GasQuote { gas_limit: TEST_TRANSFER_GAS_LIMIT, gas_price };
    let tx_hash = submit_legacy(
        client,
        signer,
        chain_id,
        recipient,
        U256::from(TEST_TRANSFER_VALUE),
        Bytes::new(),
        &quote,
    )
    .await?;

    info!(target: "filler::pipeline", chain_id, %recipient, %tx_hash, "Test transfer sent");
    Ok(tx_hash)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{ChainClientError, MockChainClient};
    use alloy_consensus::{Transaction, transaction::SignerRecoverable};
    use alloy_eips::eip2718::Decodable2718;
    use alloy_primitives::{address, keccak256};

    const KEY: &str = "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
    const RELAYER: Address = address!("0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266");
    const RECIPIENT: Address = address!("0x000000000000000000000000000000000000dEaD");

    fn signer() -> PrivateKeySigner {
        KEY.parse().unwrap()
    }

    #[test]
    fn test_sign_legacy_recovers_relayer() {
        let quote = GasQuote { gas_limit: 120_000, gas_price: 7 };
        let raw = sign_legacy(
            &signer(),
            421614,
            3,
            RECIPIENT,
            U256::from(100),
            Bytes::from_static(&[0xab]),
            &quote,
        )
        .unwrap();

        let envelope = TxEnvelope::decode_2718(&mut raw.as_ref()).unwrap();
        assert!(envelope.is_legacy());
        assert_eq!(envelope.recover_signer().unwrap(), RELAYER);
        assert_eq!(envelope.chain_id(), Some(421614));
        assert_eq!(envelope.nonce(), 3);
        assert_eq!(envelope.gas_limit(), 120_000);
        assert_eq!(envelope.gas_price(), Some(7));
        assert_eq!(envelope.to(), Some(RECIPIENT));
        assert_eq!(envelope.value(), U256::from(100));
        assert_eq!(envelope.input(), &Bytes::from_static(&[0xab]));
    }

    #[tokio::test]
    async fn test_submit_uses_pending_nonce() {
        let quote = GasQuote { gas_limit: 50_000, gas_price: 2 };
        let mut client = MockChainClient::new();
        client.expect_pending_nonce().withf(|address| *address == RELAYER).returning(|_| Ok(9));
        client.expect_send_raw_transaction().times(1).returning(|raw| {
            let envelope = TxEnvelope::decode_2718(&mut raw.as_ref()).unwrap();
            assert_eq!(envelope.nonce(), 9);
            assert_eq!(envelope.chain_id(), Some(84532));
            Ok(keccak256(&raw))
        });

        let hash = submit_legacy(&client, &signer(), 84532, RECIPIENT, U256::ZERO, Bytes::new(), &quote)
            .await
            .unwrap();
        assert_ne!(hash, B256::ZERO);
    }

    #[tokio::test]
    async fn test_submit_nonce_failure() {
        let quote = GasQuote { gas_limit: 50_000, gas_price: 2 };
        let mut client = MockChainClient::new();
        client.expect_pending_nonce().returning(|_| Err(ChainClientError::custom("boom")));
        client.expect_send_raw_transaction().never();

        let err = submit_legacy(&client, &signer(), 84532, RECIPIENT, U256::ZERO, Bytes::new(), &quote)
            .await
            .unwrap_err();
        assert!(matches!(err, FulfillmentError::Nonce(_)));
    }

    #[tokio::test]
    async fn test_send_test_transfer() {
        let mut client = MockChainClient::new();
        client.expect_gas_price().returning(|| Ok(1_000_000_000));
        client.expect_pending_nonce().returning(|_| Ok(0));
        client.expect_send_raw_transaction().times(1).returning(|raw| {
            let envelope = TxEnvelope::decode_2718(&mut raw.as_ref()).unwrap();
            assert_eq!(envelope.gas_limit(), TEST_TRANSFER_GAS_LIMIT);
            assert_eq!(envelope.gas_price(), Some(1_000_000_000));
            assert_eq!(envelope.value(), U256::from(TEST_TRANSFER_VALUE));
            assert_eq!(envelope.to(), Some(RECIPIENT));
            assert!(envelope.input().is_empty());
            Ok(B256::repeat_byte(0x42))
        });

        let hash = send_test_transfer(&client, &signer(), 11155111, RECIPIENT).await.unwrap();
        assert_eq!(hash, B256::repeat_byte(0x42));
    }
}
