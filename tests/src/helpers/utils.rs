use bech32::{ToBase32, Variant};
use cosmwasm_std::{Addr, Coin, HexBinary};
use cw_multi_test::{App, BankSudo, SudoMsg};
use k256::ecdsa::SigningKey;

use allowlist_signer::{key_from_hex, sign_allowlist};

// Fixed campaign key so signatures are reproducible across tests
pub const TEST_SIGNER_KEY: &str =
    "4c0883a69102937d6231471b5dbb6204fe5129617082792ae468d01a3f362318";
pub const FORGER_KEY: &str = "59c6995e998f97a5a0044966f0945389dc9e86dae88c7a8412f4603b6b78690d";

pub fn test_signing_key() -> SigningKey {
    key_from_hex(TEST_SIGNER_KEY).unwrap()
}

pub fn forger_signing_key() -> SigningKey {
    key_from_hex(FORGER_KEY).unwrap()
}

/// A deterministic, checksum-valid bech32 account address.
pub fn bech32_address(seed: u8) -> Addr {
    Addr::unchecked(bech32::encode("wasm", [seed; 20].to_base32(), Variant::Bech32).unwrap())
}

/// Signature `key` issues for `claimant`, as the claimant would receive
/// it out of band.
pub fn sign_address(key: &SigningKey, claimant: &Addr) -> HexBinary {
    let addresses = vec![claimant.to_string()];
    let signature = sign_allowlist(key, &addresses)
        .next()
        .unwrap()
        .unwrap()
        .signature;
    signature
}

pub fn mint_to_address(app: &mut App, to_address: String, amount: Vec<Coin>) {
    app.sudo(SudoMsg::Bank(BankSudo::Mint { to_address, amount }))
        .unwrap();
}
