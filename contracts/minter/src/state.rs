use cosmwasm_std::{Addr, Uint128};
use cw_storage_plus::{Item, Map};

use allowlist_types::{Config, UserDetails};

pub const CONFIG: Item<Config> = Item::new("config");
// Sale gate; every mint path checks it
pub const SALE_ACTIVE: Item<bool> = Item::new("sale_active");
// Total number of tokens issued, bounded by config.max_supply
pub const TOTAL_MINTED: Item<u32> = Item::new("total_minted");
// Address and number of tokens minted
pub const MINTED: Map<Addr, UserDetails> = Map::new("minted");
// Funds collected from public mints, pending admin withdrawal
pub const ESCROW: Item<Uint128> = Item::new("escrow");
