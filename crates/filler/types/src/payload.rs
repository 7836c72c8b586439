//! Decoding of message payloads: direct-call batches and packed user operations.

use crate::{
    DecodeError, attributes::decode_paymaster_attributes, bindings::{Call, PackedUserOperation},
};
use alloy_primitives::{Bytes, U256};
use alloy_sol_types::SolValue;

/// Decodes a direct-call payload, `abi.encode(Call[])`.
pub fn decode_calls(payload: &[u8]) -> Result<Vec<Call>, DecodeError> {
    Vec::<Call>::abi_decode(payload).map_err(DecodeError::Calls)
}

/// Sum of the values attached to a batch of calls.
pub fn total_call_value(calls: &[Call]) -> Result<U256, DecodeError> {
    calls.iter().try_fold(U256::ZERO, |total, call| {
        total.checked_add(call.value).ok_or(DecodeError::CallValueOverflow)
    })
}

/// Decodes a user-operation payload, `abi.encode(PackedUserOperation)`.
pub fn decode_user_operation(payload: &[u8]) -> Result<PackedUserOperation, DecodeError> {
    PackedUserOperation::abi_decode(payload).map_err(DecodeError::UserOperation)
}

impl PackedUserOperation {
    /// Attribute list packed behind the paymaster header.
    pub fn paymaster_attributes(&self) -> Result<Vec<Bytes>, DecodeError> {
        decode_paymaster_attributes(&self.paymasterAndData)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes::{encode_l2_oracle, encode_paymaster_attributes};
    use alloy_primitives::{Address, B256, address};

    // abi.encode([Call(to: 0xe4a37114..., data: "", value: 1e14)])
    const FIXTURE_PAYLOAD: &str = "0x0000000000000000000000000000000000000000000000000000000000000020\
        0000000000000000000000000000000000000000000000000000000000000001\
        0000000000000000000000000000000000000000000000000000000000000020\
        000000000000000000000000e4a3711462d371a7736f26b5f83150f907c4e8ef\
        0000000000000000000000000000000000000000000000000000000000000060\
        00000000000000000000000000000000000000000000000000005af3107a4000\
        0000000000000000000000000000000000000000000000000000000000000000";

    #[test]
    fn test_decode_fixture_calls() {
        let payload: Bytes = FIXTURE_PAYLOAD.parse().unwrap();
        let calls = decode_calls(&payload).unwrap();

        assert_eq!(calls.len(), 1);
        assert_eq!(
            Address::from_word(calls[0].to),
            address!("0xe4a3711462d371a7736f26b5f83150f907c4e8ef")
        );
        assert!(calls[0].data.is_empty());
        assert_eq!(total_call_value(&calls).unwrap(), U256::from(100_000_000_000_000u64));
    }

    #[test]
    fn test_total_call_value_sums_all_calls() {
        let calls = vec![
            Call { value: U256::from(1), ..Default::default() },
            Call { value: U256::from(2), ..Default::default() },
            Call { to: B256::repeat_byte(1), ..Default::default() },
        ];
        assert_eq!(total_call_value(&calls).unwrap(), U256::from(3));
    }

    #[test]
    fn test_total_call_value_overflow() {
        let calls = vec![
            Call { value: U256::MAX, ..Default::default() },
            Call { value: U256::from(1), ..Default::default() },
        ];
        assert_eq!(total_call_value(&calls).unwrap_err(), DecodeError::CallValueOverflow);
    }

    #[test]
    fn test_decode_calls_rejects_garbage() {
        assert!(matches!(decode_calls(&[0x01, 0x02]), Err(DecodeError::Calls(_))));
    }

    #[test]
    fn test_user_operation_paymaster_attributes() {
        let oracle = address!("0x042b2e6c5e99d4c521bd49beed5e99651d9b0cf4");
        let op = PackedUserOperation {
            sender: Address::repeat_byte(0x22),
            nonce: U256::from(9),
            paymasterAndData: encode_paymaster_attributes(&[encode_l2_oracle(oracle)]),
            ..Default::default()
        };

        let decoded = decode_user_operation(&op.abi_encode()).unwrap();
        assert_eq!(decoded, op);
        assert_eq!(decoded.paymaster_attributes().unwrap(), vec![encode_l2_oracle(oracle)]);
    }

    #[test]
    fn test_decode_user_operation_rejects_calls_payload() {
        let payload: Bytes = FIXTURE_PAYLOAD.parse().unwrap();
        assert!(matches!(decode_user_operation(&payload), Err(DecodeError::UserOperation(_))));
    }
}
