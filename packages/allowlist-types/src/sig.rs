use cosmwasm_std::HexBinary;
use sha3::{Digest, Keccak256};
use thiserror::Error;

/// Length of a recoverable ECDSA signature: r (32) + s (32) + v (1).
pub const SIGNATURE_LEN: usize = 65;
/// Length of a signer address: last 20 bytes of the public key hash.
pub const SIGNER_ADDRESS_LEN: usize = 20;

// Domain tag of the signed-message envelope. The "32" is the length of
// the inner digest that follows it.
const SIGNED_MESSAGE_PREFIX: &[u8] = b"\x19Ethereum Signed Message:\n32";

#[derive(Error, Debug, PartialEq)]
pub enum SignatureError {
    #[error("signature must be {SIGNATURE_LEN} bytes, got {got}")]
    InvalidLength { got: usize },

    #[error("invalid recovery byte {v}")]
    InvalidRecoveryByte { v: u8 },

    #[error("invalid uncompressed public key")]
    InvalidPublicKey {},
}

pub fn keccak256(bytes: &[u8]) -> [u8; 32] {
    Keccak256::digest(bytes).into()
}

/// Digest an allowlist claimant signs over: the claimant address hashed
/// and wrapped in the signed-message envelope. A signature over this
/// digest authorizes the address itself, not any particular quantity.
pub fn allowlist_message_hash(address: &str) -> [u8; 32] {
    let inner = keccak256(address.as_bytes());
    let mut hasher = Keccak256::new();
    hasher.update(SIGNED_MESSAGE_PREFIX);
    hasher.update(inner);
    hasher.finalize().into()
}

/// 65-byte signature split into its (r || s, v) parts, validated on
/// construction so recovery is never attempted on a malformed shape.
#[derive(Debug, Clone, PartialEq)]
pub struct RecoverableSignature {
    rs: [u8; 64],
    recovery_id: u8,
}

impl RecoverableSignature {
    pub fn rs(&self) -> &[u8; 64] {
        &self.rs
    }

    /// Recovery parameter normalized to 0/1.
    pub fn recovery_id(&self) -> u8 {
        self.recovery_id
    }
}

impl TryFrom<&[u8]> for RecoverableSignature {
    type Error = SignatureError;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        if bytes.len() != SIGNATURE_LEN {
            return Err(SignatureError::InvalidLength { got: bytes.len() });
        }
        // Both raw (0/1) and offset (27/28) recovery bytes are accepted
        let recovery_id = match bytes[64] {
            v @ (0 | 1) => v,
            v @ (27 | 28) => v - 27,
            v => return Err(SignatureError::InvalidRecoveryByte { v }),
        };
        let mut rs = [0u8; 64];
        rs.copy_from_slice(&bytes[..64]);
        Ok(RecoverableSignature { rs, recovery_id })
    }
}

/// Derives the 20-byte signer address from a recovered uncompressed
/// secp256k1 public key (65 bytes, 0x04 tag).
pub fn signer_address_from_pubkey(pubkey: &[u8]) -> Result<HexBinary, SignatureError> {
    if pubkey.len() != 65 || pubkey[0] != 0x04 {
        return Err(SignatureError::InvalidPublicKey {});
    }
    let hash = keccak256(&pubkey[1..]);
    Ok(HexBinary::from(hash[32 - SIGNER_ADDRESS_LEN..].to_vec()))
}
