use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Coin, HexBinary};

pub mod sig;

#[cw_serde]
pub struct Config {
    pub admin: Addr,
    /// 20-byte address the allowlist signatures must recover to.
    pub trusted_signer: HexBinary,
    pub unit_price: Coin,
    pub max_supply: u32,
    pub per_address_limit: u32,
    pub per_call_limit: u32,
}

#[cw_serde]
pub struct Token {
    pub token_id: String,
}

// Address and number of tokens minted through any path
#[cw_serde]
pub struct UserDetails {
    pub minted_tokens: Vec<Token>,
    pub total_minted_count: u32,
    pub public_mint_count: u32,
}

impl Default for UserDetails {
    fn default() -> Self {
        UserDetails {
            minted_tokens: Vec::new(),
            total_minted_count: 0,
            public_mint_count: 0,
        }
    }
}

impl UserDetails {
    /// Records `quantity` sequentially numbered tokens, the first one
    /// being `next_token_id`.
    pub fn add_minted_tokens(&mut self, next_token_id: u32, quantity: u32, public: bool) {
        for token_id in next_token_id..next_token_id + quantity {
            self.minted_tokens.push(Token {
                token_id: token_id.to_string(),
            });
        }
        self.total_minted_count += quantity;
        if public {
            self.public_mint_count += quantity;
        }
    }
}
