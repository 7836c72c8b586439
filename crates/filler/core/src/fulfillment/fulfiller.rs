use super::{
    FulfillmentError, build_fulfillment_call, check_reward, quote_gas, submit_legacy,
};
use crate::{
    client::ChainClient,
    metrics::Metrics,
    registry::ChainRegistry,
    validator::{ParsedMessage, ValidationError, validate},
};
use alloy_primitives::{Address, B256, U256};
use alloy_rpc_types_eth::Log;
use alloy_signer_local::PrivateKeySigner;
use filler_types::PostedMessage;
use std::{sync::Arc, time::Instant};
use tracing::{info, warn};

/// A fulfillment that reached the destination node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Submission {
    /// Fulfilled message.
    pub message_id: B256,
    /// Chain the transaction was sent to.
    pub destination_chain_id: u64,
    /// Hash of the fulfillment transaction.
    pub tx_hash: B256,
    /// Minimum reward the fulfillment needed.
    pub required_reward: U256,
}

/// Runs posted messages through the fulfillment pipeline, one at a time.
#[derive(Debug)]
pub struct Fulfiller<C> {
    registry: Arc<ChainRegistry<C>>,
    signer: PrivateKeySigner,
}

impl<C> Fulfiller<C> {
    /// Creates a fulfiller signing with `signer`.
    pub const fn new(registry: Arc<ChainRegistry<C>>, signer: PrivateKeySigner) -> Self {
        Self { registry, signer }
    }

    /// The relayer address.
    pub fn relayer(&self) -> Address {
        self.signer.address()
    }

    /// The chain registry.
    pub const fn registry(&self) -> &Arc<ChainRegistry<C>> {
        &self.registry
    }

    /// Decodes and validates a log observed on `source_chain_id`.
    pub fn parse(&self, source_chain_id: u64, log: &Log) -> Result<ParsedMessage, FulfillmentError> {
        let source = self
            .registry
            .endpoint(source_chain_id)
            .ok_or(FulfillmentError::UnknownSourceChain(source_chain_id))?;
        let message = PostedMessage::decode_log(&log.inner)?;
        Ok(validate(&message, source, &self.registry)?)
    }
}

impl<C: ChainClient> Fulfiller<C> {
    /// Runs a log observed on `source_chain_id` through the whole pipeline, recording metrics and
    /// logging the outcome.
    pub async fn handle_log(
        &self,
        source_chain_id: u64,
        log: &Log,
    ) -> Result<Submission, FulfillmentError> {
        metrics::counter!(Metrics::MESSAGES_RECEIVED_TOTAL).increment(1);
        let started = Instant::now();

        let result = match self.parse(source_chain_id, log) {
            Ok(parsed) => self.fulfill(&parsed).await,
            Err(err) => Err(err),
        };

        match &result {
            Ok(submission) => {
                metrics::counter!(
                    Metrics::FULFILLMENTS_SUBMITTED_TOTAL,
                    "chain_id" => submission.destination_chain_id.to_string()
                )
                .increment(1);
                metrics::histogram!(Metrics::FULFILLMENT_DURATION_SECONDS)
                    .record(started.elapsed().as_secs_f64());
            }
            Err(err) => {
                let stage = err.stage();
                metrics::counter!(Metrics::MESSAGES_REJECTED_TOTAL, "stage" => stage.as_str())
                    .increment(1);
                warn!(
                    target: "filler::pipeline",
                    source_chain_id,
                    tx_hash = ?log.transaction_hash,
                    %stage,
                    %err,
                    "Message rejected"
                );
            }
        }

        result
    }

    /// Builds, prices, checks and submits the fulfillment of a validated message.
    pub async fn fulfill(&self, parsed: &ParsedMessage) -> Result<Submission, FulfillmentError> {
        let message_id = parsed.message.message_id;
        let destination_chain_id = parsed.destination_chain_id;
        let destination = self
            .registry
            .get(destination_chain_id)
            .ok_or(ValidationError::DestinationNotConfigured(destination_chain_id))?;

        let call = build_fulfillment_call(parsed, &destination.endpoint, self.relayer())?;
        info!(
            target: "filler::pipeline",
            %message_id,
            source_chain_id = parsed.source_chain_id,
            destination_chain_id,
            to = %call.to,
            value = %call.value,
            "Fulfillment call built"
        );

        let quote = quote_gas(destination.client.as_ref(), &call).await?;
        info!(
            target: "filler::pipeline",
            %message_id,
            gas_limit = quote.gas_limit,
            gas_price = quote.gas_price,
            "Gas quoted"
        );

        let required_reward = check_reward(parsed.attributes(), call.value, &quote)?;
        info!(
            target: "filler::pipeline",
            %message_id,
            required = %required_reward,
            provided = %parsed.attributes().reward_amount,
            "Reward checked"
        );

        let tx_hash = submit_legacy(
            destination.client.as_ref(),
            &self.signer,
            destination_chain_id,
            call.to,
            call.value,
            call.data,
            &quote,
        )
        .await?;
        info!(target: "filler::pipeline", %message_id, destination_chain_id, %tx_hash, "Fulfillment submitted");

        Ok(Submission { message_id, destination_chain_id, tx_hash, required_reward })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        client::{ChainClientError, MockChainClient},
        config::ChainEndpoint,
        fulfillment::Stage,
    };
    use alloy_consensus::{Transaction, TxEnvelope};
    use alloy_eips::eip2718::Decodable2718;
    use alloy_primitives::{Bytes, address, b256};
    use alloy_sol_types::{SolCall, SolEvent, SolValue};
    use filler_types::{
        bindings::{EntryPoint, PackedUserOperation, RRC7755Inbox, RRC7755Outbox::MessagePosted},
        encode_delay, encode_l2_oracle, encode_nonce, encode_paymaster_attributes,
        encode_requester, encode_reward,
        packing::{address_to_word, chain_id_to_word},
    };

    const KEY: &str = "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
    const RELAYER: Address = address!("0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266");
    const SENDER: Address = address!("0x2504b1c3b78b2711e24eadf7ea077b0ca1b91859");
    const INBOX: Address = address!("0x1bb8dacba30b1cd82ce1d3d7f24e16ee549aebe8");
    const ENTRYPOINT: Address = address!("0x0000000071727De22E5E9d8BAf0edAc6f37da032");
    const L2_ORACLE: Address = address!("0x042b2e6c5e99d4c521bd49beed5e99651d9b0cf4");
    const NATIVE: Address = address!("0xEeeeeEeeeEeEeeEeEeEeeEEEeeeeEeeeeeeeEEeE");
    const MESSAGE_ID: B256 =
        b256!("0x86a798714c57faaa50bc649a07dc45013c4931d4c630d5a316f5975f02704586");

    // abi.encode([Call(to: 0xe4a37114..., data: "", value: 1e14)])
    const PAYLOAD: &str = "0x0000000000000000000000000000000000000000000000000000000000000020\
        0000000000000000000000000000000000000000000000000000000000000001\
        0000000000000000000000000000000000000000000000000000000000000020\
        000000000000000000000000e4a3711462d371a7736f26b5f83150f907c4e8ef\
        0000000000000000000000000000000000000000000000000000000000000060\
        00000000000000000000000000000000000000000000000000005af3107a4000\
        0000000000000000000000000000000000000000000000000000000000000000";

    fn posted_log(reward: u64) -> Log {
        let event = MessagePosted {
            messageId: MESSAGE_ID,
            sourceChain: chain_id_to_word(84532),
            sender: address_to_word(SENDER),
            destinationChain: chain_id_to_word(421614),
            receiver: address_to_word(INBOX),
            payload: PAYLOAD.parse().unwrap(),
            attributes: vec![
                encode_nonce(U256::from(3)),
                encode_reward(NATIVE, U256::from(reward)),
                encode_delay(U256::from(225), U256::from(6832538)),
                encode_requester(address_to_word(SENDER)),
                encode_l2_oracle(L2_ORACLE),
            ],
        };
        Log {
            inner: alloy_primitives::Log { address: SENDER, data: event.encode_log_data() },
            ..Default::default()
        }
    }

    fn user_op(reward: u64) -> PackedUserOperation {
        PackedUserOperation {
            sender: SENDER,
            nonce: U256::from(1),
            callData: Bytes::from_static(&[0xb6, 0x1d, 0x27, 0xf6]),
            paymasterAndData: encode_paymaster_attributes(&[
                encode_nonce(U256::from(1)),
                encode_reward(NATIVE, U256::from(reward)),
                encode_l2_oracle(L2_ORACLE),
            ]),
            ..Default::default()
        }
    }

    fn user_op_log(user_op: &PackedUserOperation) -> Log {
        let event = MessagePosted {
            messageId: MESSAGE_ID,
            sourceChain: chain_id_to_word(84532),
            sender: address_to_word(SENDER),
            destinationChain: chain_id_to_word(421614),
            receiver: address_to_word(ENTRYPOINT),
            payload: user_op.abi_encode().into(),
            attributes: vec![],
        };
        Log {
            inner: alloy_primitives::Log { address: SENDER, data: event.encode_log_data() },
            ..Default::default()
        }
    }

    fn fulfiller(destination: MockChainClient) -> Fulfiller<MockChainClient> {
        let mut registry = ChainRegistry::new();
        registry
            .insert(ChainEndpoint { chain_id: 84532, ..Default::default() }, Arc::new(MockChainClient::new()))
            .unwrap();
        registry
            .insert(
                ChainEndpoint {
                    chain_id: 421614,
                    inbox_address: INBOX,
                    entrypoint_address: ENTRYPOINT,
                    l2_oracle: L2_ORACLE,
                    ..Default::default()
                },
                Arc::new(destination),
            )
            .unwrap();
        Fulfiller::new(Arc::new(registry), KEY.parse().unwrap())
    }

    #[tokio::test]
    async fn test_handle_log_submits_fulfillment() {
        filler_cli::init_test_tracing();
        let mut destination = MockChainClient::new();
        destination.expect_estimate_gas().times(1).returning(|_| Ok(100_000));
        destination.expect_gas_price().times(1).returning(|| Ok(1_000_000_000));
        destination.expect_pending_nonce().times(1).returning(|_| Ok(4));
        destination.expect_send_raw_transaction().times(1).returning(|raw| {
            let envelope = TxEnvelope::decode_2718(&mut raw.as_ref()).unwrap();
            assert_eq!(envelope.to(), Some(INBOX));
            assert_eq!(envelope.value(), U256::from(100_000_000_000_000u64));
            assert_eq!(envelope.gas_limit(), 120_000);
            assert_eq!(envelope.nonce(), 4);
            assert_eq!(envelope.chain_id(), Some(421614));

            let call = RRC7755Inbox::fulfillCall::abi_decode(envelope.input()).unwrap();
            assert_eq!(call.fulfiller, RELAYER);
            assert_eq!(call.sender, address_to_word(SENDER));
            Ok(B256::repeat_byte(0x77))
        });

        let fulfiller = fulfiller(destination);
        assert_eq!(fulfiller.relayer(), RELAYER);

        let submission = fulfiller.handle_log(84532, &posted_log(2_000_000_000_000_000)).await.unwrap();
        assert_eq!(
            submission,
            Submission {
                message_id: MESSAGE_ID,
                destination_chain_id: 421614,
                tx_hash: B256::repeat_byte(0x77),
                // 1e14 value plus 120_000 gas at 1 gwei
                required_reward: U256::from(220_000_000_000_000u64),
            }
        );
    }

    #[tokio::test]
    async fn test_handle_log_submits_user_operation() {
        filler_cli::init_test_tracing();
        // 60_000 gas at 2 gwei
        let required = U256::from(120_000_000_000_000u64);
        let op = user_op(120_000_000_000_001);
        let expected_op = op.clone();

        let mut destination = MockChainClient::new();
        destination.expect_estimate_gas().times(1).returning(|request| {
            assert_eq!(request.to, Some(ENTRYPOINT.into()));
            assert_eq!(request.value, Some(U256::ZERO));
            Ok(50_000)
        });
        destination.expect_gas_price().times(1).returning(|| Ok(2_000_000_000));
        destination.expect_pending_nonce().times(1).returning(|_| Ok(9));
        destination.expect_send_raw_transaction().times(1).returning(move |raw| {
            let envelope = TxEnvelope::decode_2718(&mut raw.as_ref()).unwrap();
            assert_eq!(envelope.to(), Some(ENTRYPOINT));
            assert_eq!(envelope.value(), U256::ZERO);
            assert_eq!(envelope.gas_limit(), 60_000);
            assert_eq!(envelope.nonce(), 9);

            let call = EntryPoint::handleOpsCall::abi_decode(envelope.input()).unwrap();
            assert_eq!(call.ops, vec![expected_op.clone()]);
            assert_eq!(call.beneficiary, RELAYER);
            Ok(B256::repeat_byte(0x78))
        });

        let submission = fulfiller(destination).handle_log(84532, &user_op_log(&op)).await.unwrap();
        assert_eq!(submission.tx_hash, B256::repeat_byte(0x78));
        assert_eq!(submission.required_reward, required);
    }

    #[tokio::test]
    async fn test_user_operation_reward_comes_from_paymaster_data() {
        let mut destination = MockChainClient::new();
        destination.expect_estimate_gas().returning(|_| Ok(50_000));
        destination.expect_gas_price().returning(|| Ok(2_000_000_000));
        destination.expect_pending_nonce().never();
        destination.expect_send_raw_transaction().never();

        let op = user_op(120_000_000_000_000);
        let err = fulfiller(destination).handle_log(84532, &user_op_log(&op)).await.unwrap_err();
        assert_eq!(
            err,
            FulfillmentError::InsufficientReward {
                required: U256::from(120_000_000_000_000u64),
                provided: U256::from(120_000_000_000_000u64),
            }
        );
    }

    #[tokio::test]
    async fn test_rejected_message_never_submits() {
        filler_cli::init_test_tracing();
        let mut destination = MockChainClient::new();
        destination.expect_estimate_gas().returning(|_| Ok(100_000));
        destination.expect_gas_price().returning(|| Ok(1_000_000_000));
        destination.expect_pending_nonce().never();
        destination.expect_send_raw_transaction().never();

        let err = fulfiller(destination).handle_log(84532, &posted_log(1_000)).await.unwrap_err();
        assert_eq!(err.stage(), Stage::Reward);
        assert!(matches!(err, FulfillmentError::InsufficientReward { .. }));
    }

    #[tokio::test]
    async fn test_gas_failure_stops_pipeline() {
        let mut destination = MockChainClient::new();
        destination
            .expect_estimate_gas()
            .returning(|_| Err(ChainClientError::custom("execution reverted")));
        destination.expect_gas_price().never();
        destination.expect_send_raw_transaction().never();

        let err = fulfiller(destination).handle_log(84532, &posted_log(1_000)).await.unwrap_err();
        assert_eq!(err.stage(), Stage::Gas);
    }

    #[tokio::test]
    async fn test_unknown_source_chain() {
        let err = fulfiller(MockChainClient::new()).handle_log(10, &posted_log(1)).await.unwrap_err();
        assert_eq!(err, FulfillmentError::UnknownSourceChain(10));
    }

    #[tokio::test]
    async fn test_foreign_log_is_a_decode_error() {
        let log = Log {
            inner: alloy_primitives::Log::new_unchecked(SENDER, vec![B256::ZERO], Bytes::new()),
            ..Default::default()
        };
        let err = fulfiller(MockChainClient::new()).handle_log(84532, &log).await.unwrap_err();
        assert_eq!(err.stage(), Stage::Decode);
    }

    #[tokio::test]
    async fn test_source_chain_mismatch_is_rejected() {
        let err =
            fulfiller(MockChainClient::new()).handle_log(421614, &posted_log(1)).await.unwrap_err();
        assert_eq!(
            err,
            FulfillmentError::Validation(ValidationError::SourceChainMismatch {
                expected: 421614,
                actual: 84532
            })
        );
    }
}
