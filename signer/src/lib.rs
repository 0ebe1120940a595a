//! Off-chain half of the allowlist: holds the campaign signing key and
//! produces one signature per approved address. The contract side only
//! ever sees the derived signer address, never the key.

use cosmwasm_std::HexBinary;
use k256::ecdsa::SigningKey;
use rand_core::{OsRng, RngCore};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use allowlist_types::sig::{allowlist_message_hash, keccak256, SIGNATURE_LEN, SIGNER_ADDRESS_LEN};

#[derive(Error, Debug, PartialEq)]
pub enum SignerError {
    #[error("entropy source unavailable")]
    Entropy,

    #[error("malformed claimant address ({address})")]
    InvalidAddress { address: String },

    #[error("invalid signing key material")]
    InvalidKey,

    #[error("signing failed")]
    Signing,
}

/// One claimant's proof of allowlist membership. Distributed out of
/// band, one entry per claimant; never published in bulk on chain.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct AllowlistEntry {
    pub address: String,
    pub signature: HexBinary,
}

/// Generates a fresh campaign key from the OS CSPRNG.
pub fn generate_key() -> Result<SigningKey, SignerError> {
    // Rejection sampling; scalars outside the curve order are not
    // reachable in practice
    loop {
        let mut seed = [0u8; 32];
        OsRng
            .try_fill_bytes(&mut seed)
            .map_err(|_| SignerError::Entropy)?;
        if let Ok(key) = SigningKey::from_slice(&seed) {
            return Ok(key);
        }
    }
}

pub fn key_from_hex(raw: &str) -> Result<SigningKey, SignerError> {
    let bytes =
        hex::decode(raw.trim().trim_start_matches("0x")).map_err(|_| SignerError::InvalidKey)?;
    SigningKey::from_slice(&bytes).map_err(|_| SignerError::InvalidKey)
}

/// The 20-byte address allowlist signatures recover to. This is what the
/// admin publishes into the contract as the trusted signer.
pub fn signer_address(key: &SigningKey) -> HexBinary {
    let point = key.verifying_key().to_encoded_point(false);
    let hash = keccak256(&point.as_bytes()[1..]);
    HexBinary::from(hash[32 - SIGNER_ADDRESS_LEN..].to_vec())
}

/// Signs every claimant address in input order. Lazy; each item is
/// produced on demand and the sequence can be re-created from the same
/// inputs at any time.
pub fn sign_allowlist<'a>(
    key: &'a SigningKey,
    addresses: &'a [String],
) -> impl Iterator<Item = Result<AllowlistEntry, SignerError>> + 'a {
    addresses.iter().map(move |address| sign_entry(key, address))
}

fn sign_entry(key: &SigningKey, address: &str) -> Result<AllowlistEntry, SignerError> {
    bech32::decode(address).map_err(|_| SignerError::InvalidAddress {
        address: address.to_string(),
    })?;
    let message_hash = allowlist_message_hash(address);
    let (signature, recovery_id) = key
        .sign_prehash_recoverable(&message_hash)
        .map_err(|_| SignerError::Signing)?;

    let mut bytes = [0u8; SIGNATURE_LEN];
    bytes[..64].copy_from_slice(&signature.to_bytes());
    bytes[64] = 27 + recovery_id.to_byte();
    Ok(AllowlistEntry {
        address: address.to_string(),
        signature: HexBinary::from(bytes.to_vec()),
    })
}
