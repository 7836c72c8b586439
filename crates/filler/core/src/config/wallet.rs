use super::ConfigError;
use alloy_primitives::Address;
use alloy_signer_local::PrivateKeySigner;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The relayer's account.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct WalletConfig {
    /// Address the relayer sends from. Must match the private key.
    pub from_address: Address,

    /// Hex-encoded secp256k1 private key, with or without a `0x` prefix.
    pub private_key: String,

    /// Recipient of test transfers.
    #[serde(default)]
    pub recipient_address: Address,
}

impl WalletConfig {
    /// Parses the configured private key.
    pub fn signer(&self) -> Result<PrivateKeySigner, ConfigError> {
        let key = self.private_key.trim();
        let key = key.strip_prefix("0x").unwrap_or(key);
        key.parse::<PrivateKeySigner>().map_err(|err| ConfigError::InvalidPrivateKey(err.to_string()))
    }

    /// Parses the private key and checks it derives the configured from-address.
    pub fn verified_signer(&self) -> Result<PrivateKeySigner, ConfigError> {
        let signer = self.signer()?;
        if signer.address() != self.from_address {
            return Err(ConfigError::FromAddressMismatch {
                expected: self.from_address,
                actual: signer.address(),
            });
        }
        Ok(signer)
    }
}

impl fmt::Debug for WalletConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WalletConfig")
            .field("from_address", &self.from_address)
            .field("private_key", &"<redacted>")
            .field("recipient_address", &self.recipient_address)
            .finish()
    }
}
