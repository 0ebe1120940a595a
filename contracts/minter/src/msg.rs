use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Coin, HexBinary, Uint128};

use allowlist_types::{Config, UserDetails};

#[cw_serde]
pub struct InstantiateMsg {
    pub admin: Option<String>,
    /// 20-byte address the off-chain signer's signatures recover to.
    pub trusted_signer: HexBinary,
    pub unit_price: Coin,
    pub max_supply: u32,
    pub per_address_limit: u32,
    pub per_call_limit: u32,
}

#[cw_serde]
pub enum ExecuteMsg {
    FlipSaleState {},
    SetTrustedSigner {
        signer: HexBinary,
    },
    MintFromAllowlist {
        quantity: u32,
        signature: HexBinary,
    },
    MintPublic {
        quantity: u32,
    },
    Withdraw {},
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(Config)]
    Config {},
    #[returns(bool)]
    SaleActive {},
    #[returns(u32)]
    TotalMinted {},
    #[returns(UserDetails)]
    MintedTokens { address: String },
    #[returns(Uint128)]
    EscrowBalance {},
    #[returns(HexBinary)]
    TrustedSigner {},
}
