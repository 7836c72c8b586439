use super::FulfillmentError;
use crate::{
    config::ChainEndpoint,
    validator::{MessageKind, ParsedMessage},
};
use alloy_primitives::{Address, Bytes, U256};
use alloy_rpc_types_eth::{TransactionInput, TransactionRequest};
use alloy_sol_types::SolCall;
use filler_types::{
    bindings::{EntryPoint, RRC7755Inbox},
    decode_calls, total_call_value,
};

/// The destination-chain call that fulfills a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FulfillmentCall {
    /// The relayer.
    pub from: Address,
    /// Inbox or entrypoint.
    pub to: Address,
    /// ABI-encoded calldata.
    pub data: Bytes,
    /// Value attached to the call.
    pub value: U256,
}

impl FulfillmentCall {
    /// The call as an RPC transaction request, for gas estimation.
    pub fn to_request(&self) -> TransactionRequest {
        TransactionRequest::default()
            .from(self.from)
            .to(self.to)
            .value(self.value)
            .input(TransactionInput::new(self.data.clone()))
    }
}

/// Builds the fulfillment call of a validated message.
///
/// Direct calls invoke `fulfill` on the destination inbox with the sum of the requested call
/// values attached. User operations are submitted to the entrypoint as a one-element
/// `handleOps` batch paying the relayer.
pub fn build_fulfillment_call(
    parsed: &ParsedMessage,
    destination: &ChainEndpoint,
    relayer: Address,
) -> Result<FulfillmentCall, FulfillmentError> {
    let message = &parsed.message;
    match &parsed.kind {
        MessageKind::Direct { .. } => {
            let value = total_call_value(&decode_calls(&message.payload)?)?;
            let data = RRC7755Inbox::fulfillCall {
                sourceChain: message.source_chain,
                sender: message.sender,
                payload: message.payload.clone(),
                attributes: message.attributes.clone(),
                fulfiller: relayer,
            }
            .abi_encode();
            Ok(FulfillmentCall { from: relayer, to: destination.inbox_address, data: data.into(), value })
        }
        MessageKind::UserOp { user_op, .. } => {
            let data = EntryPoint::handleOpsCall { ops: vec![user_op.clone()], beneficiary: relayer }
                .abi_encode();
            Ok(FulfillmentCall {
                from: relayer,
                to: destination.entrypoint_address,
                data: data.into(),
                value: U256::ZERO,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::{B256, address};
    use alloy_sol_types::SolValue;
    use filler_types::{
        Attributes, PostedMessage,
        bindings::{Call, PackedUserOperation},
        packing::chain_id_to_word,
    };

    const RELAYER: Address = address!("0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266");
    const INBOX: Address = address!("0x1bb8dacba30b1cd82ce1d3d7f24e16ee549aebe8");
    const ENTRYPOINT: Address = address!("0x0000000071727De22E5E9d8BAf0edAc6f37da032");

    fn destination() -> ChainEndpoint {
        ChainEndpoint {
            chain_id: 421614,
            inbox_address: INBOX,
            entrypoint_address: ENTRYPOINT,
            ..Default::default()
        }
    }

    fn parsed(payload: Bytes, kind: MessageKind) -> ParsedMessage {
        ParsedMessage {
            message: PostedMessage {
                source_chain: chain_id_to_word(84532),
                sender: B256::repeat_byte(0x25),
                payload,
                attributes: vec![Bytes::from_static(&[0xce, 0x03, 0xfd, 0xab])],
                ..Default::default()
            },
            source_chain_id: 84532,
            destination_chain_id: 421614,
            sender: Address::repeat_byte(0x25),
            receiver: INBOX,
            kind,
        }
    }

    #[test]
    fn test_direct_call() {
        let calls = vec![
            Call { to: B256::repeat_byte(1), data: Bytes::new(), value: U256::from(100) },
            Call { to: B256::repeat_byte(2), data: Bytes::from_static(&[1]), value: U256::from(23) },
        ];
        let parsed = parsed(
            calls.abi_encode().into(),
            MessageKind::Direct { attributes: Attributes::default() },
        );

        let call = build_fulfillment_call(&parsed, &destination(), RELAYER).unwrap();
        assert_eq!(call.from, RELAYER);
        assert_eq!(call.to, INBOX);
        assert_eq!(call.value, U256::from(123));

        let decoded = RRC7755Inbox::fulfillCall::abi_decode(&call.data).unwrap();
        assert_eq!(decoded.sourceChain, chain_id_to_word(84532));
        assert_eq!(decoded.sender, B256::repeat_byte(0x25));
        assert_eq!(decoded.payload, parsed.message.payload);
        assert_eq!(decoded.attributes, parsed.message.attributes);
        assert_eq!(decoded.fulfiller, RELAYER);
    }

    #[test]
    fn test_direct_call_bad_payload() {
        let parsed = parsed(
            Bytes::from_static(&[0x01]),
            MessageKind::Direct { attributes: Attributes::default() },
        );
        let err = build_fulfillment_call(&parsed, &destination(), RELAYER).unwrap_err();
        assert!(matches!(err, FulfillmentError::Decode(_)));
    }

    #[test]
    fn test_user_operation_call() {
        let user_op = PackedUserOperation { sender: Address::repeat_byte(0x25), ..Default::default() };
        let parsed = parsed(
            Bytes::new(),
            MessageKind::UserOp { user_op: user_op.clone(), attributes: Attributes::default() },
        );

        let call = build_fulfillment_call(&parsed, &destination(), RELAYER).unwrap();
        assert_eq!(call.to, ENTRYPOINT);
        assert_eq!(call.value, U256::ZERO);
        assert_eq!(call.data[..4], EntryPoint::handleOpsCall::SELECTOR);

        let decoded = EntryPoint::handleOpsCall::abi_decode(&call.data).unwrap();
        assert_eq!(decoded.ops, vec![user_op]);
        assert_eq!(decoded.beneficiary, RELAYER);
    }

    #[test]
    fn test_to_request() {
        let call = FulfillmentCall {
            from: RELAYER,
            to: INBOX,
            data: Bytes::from_static(&[0xaa]),
            value: U256::from(7),
        };
        let request = call.to_request();
        assert_eq!(request.from, Some(RELAYER));
        assert_eq!(request.to, Some(INBOX.into()));
        assert_eq!(request.value, Some(U256::from(7)));
        assert_eq!(request.input.input(), Some(&Bytes::from_static(&[0xaa])));
    }
}
