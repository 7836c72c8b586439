//! Fixed-offset packing of chain ids and addresses into 32-byte words.
//!
//! RRC-7755 identifies chains and accounts with chain-agnostic `bytes32` values. EVM chain ids
//! are right-aligned big-endian `uint64`s and EVM addresses occupy the low 20 bytes.

use alloy_primitives::{Address, B256};

/// Byte offset of a `uint64` inside a 32-byte word.
pub const UINT64_OFFSET: usize = 32 - 8;

/// Byte offset of an address inside a 32-byte word.
pub const ADDRESS_OFFSET: usize = 32 - 20;

/// Packs a chain id into the low 8 bytes of a word.
pub fn chain_id_to_word(chain_id: u64) -> B256 {
    let mut word = B256::ZERO;
    word[UINT64_OFFSET..].copy_from_slice(&chain_id.to_be_bytes());
    word
}

/// Reads the chain id from the low 8 bytes of a word. Higher bytes are ignored.
pub fn word_to_chain_id(word: &B256) -> u64 {
    let mut buf = [0u8; 8];
    buf.copy_from_slice(&word[UINT64_OFFSET..]);
    u64::from_be_bytes(buf)
}

/// Packs an address into the low 20 bytes of a word.
pub fn address_to_word(address: Address) -> B256 {
    address.into_word()
}

/// Reads the address from the low 20 bytes of a word. Higher bytes are ignored.
pub fn word_to_address(word: &B256) -> Address {
    Address::from_slice(&word[ADDRESS_OFFSET..])
}
