#[cfg(not(feature = "library"))]
use cosmwasm_std::entry_point;
use cosmwasm_std::{
    to_json_binary, Addr, Api, BankMsg, Binary, Coin, Deps, DepsMut, Env, HexBinary, MessageInfo,
    Response, StdResult, Uint128,
};

use cw_utils::{maybe_addr, must_pay, nonpayable};

use allowlist_types::sig::{
    allowlist_message_hash, signer_address_from_pubkey, RecoverableSignature, SIGNER_ADDRESS_LEN,
};
use allowlist_types::{Config, UserDetails};

use crate::error::ContractError;
use crate::msg::{ExecuteMsg, InstantiateMsg, QueryMsg};
use crate::state::{CONFIG, ESCROW, MINTED, SALE_ACTIVE, TOTAL_MINTED};

use cw2::set_contract_version;

// version info for migration info
const CONTRACT_NAME: &str = "crates.io:allowlist-minter";
const CONTRACT_VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn instantiate(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    msg: InstantiateMsg,
) -> Result<Response, ContractError> {
    set_contract_version(deps.storage, CONTRACT_NAME, CONTRACT_VERSION)?;
    nonpayable(&info)?;

    if msg.trusted_signer.len() != SIGNER_ADDRESS_LEN {
        return Err(ContractError::InvalidTrustedSigner {});
    }
    if msg.max_supply == 0 {
        return Err(ContractError::InvalidMaxSupply {});
    }
    if msg.per_address_limit == 0 {
        return Err(ContractError::PerAddressLimitZero {});
    }
    if msg.per_call_limit == 0 {
        return Err(ContractError::PerCallLimitZero {});
    }
    if msg.unit_price.amount.is_zero() {
        return Err(ContractError::InvalidUnitPrice {});
    }

    let admin = maybe_addr(deps.api, msg.admin.clone())?.unwrap_or(info.sender.clone());

    let config = Config {
        admin,
        trusted_signer: msg.trusted_signer,
        unit_price: msg.unit_price,
        max_supply: msg.max_supply,
        per_address_limit: msg.per_address_limit,
        per_call_limit: msg.per_call_limit,
    };
    CONFIG.save(deps.storage, &config)?;

    // Sale always starts closed
    SALE_ACTIVE.save(deps.storage, &false)?;
    TOTAL_MINTED.save(deps.storage, &0)?;
    ESCROW.save(deps.storage, &Uint128::zero())?;

    let res = Response::new()
        .add_attribute("action", "instantiate")
        .add_attribute("admin", config.admin.into_string())
        .add_attribute("trusted_signer", config.trusted_signer.to_hex());

    Ok(res)
}

#[cfg_attr(not(feature = "library"), entry_point)]
pub fn execute(
    deps: DepsMut,
    env: Env,
    info: MessageInfo,
    msg: ExecuteMsg,
) -> Result<Response, ContractError> {
    match msg {
        ExecuteMsg::FlipSaleState {} => execute_flip_sale_state(deps, env, info),
        ExecuteMsg::SetTrustedSigner { signer } => {
            execute_set_trusted_signer(deps, env, info, signer)
        }
        ExecuteMsg::MintFromAllowlist {
            quantity,
            signature,
        } => execute_mint_from_allowlist(deps, env, info, quantity, signature),
        ExecuteMsg::MintPublic { quantity } => execute_mint_public(deps, env, info, quantity),
        ExecuteMsg::Withdraw {} => execute_withdraw(deps, env, info),
    }
}

pub fn execute_flip_sale_state(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
) -> Result<Response, ContractError> {
    nonpayable(&info)?;
    let config = CONFIG.load(deps.storage)?;
    if info.sender != config.admin {
        return Err(ContractError::Unauthorized {});
    }
    let sale_active = !SALE_ACTIVE.load(deps.storage)?;
    SALE_ACTIVE.save(deps.storage, &sale_active)?;

    let res = Response::new()
        .add_attribute("action", "flip_sale_state")
        .add_attribute("sale_active", sale_active.to_string());
    Ok(res)
}

pub fn execute_set_trusted_signer(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    signer: HexBinary,
) -> Result<Response, ContractError> {
    nonpayable(&info)?;
    let mut config = CONFIG.load(deps.storage)?;
    if info.sender != config.admin {
        return Err(ContractError::Unauthorized {});
    }
    if signer.len() != SIGNER_ADDRESS_LEN {
        return Err(ContractError::InvalidTrustedSigner {});
    }
    // No proof the address belongs to a reachable key; the admin is
    // trusted to publish the right one
    config.trusted_signer = signer.clone();
    CONFIG.save(deps.storage, &config)?;

    let res = Response::new()
        .add_attribute("action", "set_trusted_signer")
        .add_attribute("trusted_signer", signer.to_hex());
    Ok(res)
}

pub fn execute_mint_from_allowlist(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    quantity: u32,
    signature: HexBinary,
) -> Result<Response, ContractError> {
    nonpayable(&info)?;
    let config = CONFIG.load(deps.storage)?;
    if !SALE_ACTIVE.load(deps.storage)? {
        return Err(ContractError::SaleNotActive {});
    }

    let mut user_details = MINTED
        .may_load(deps.storage, info.sender.clone())?
        .unwrap_or_default();
    let total_minted = TOTAL_MINTED.load(deps.storage)?;
    check_quantity(&config, &user_details, total_minted, quantity)?;

    // The signature covers only the caller's address, so it stays valid
    // for repeated mints until the per address limit is reached
    verify_allowlist_signature(
        deps.api,
        &info.sender,
        &signature,
        &config.trusted_signer,
    )?;

    let first_token_id = total_minted + 1;
    user_details.add_minted_tokens(first_token_id, quantity, false);
    TOTAL_MINTED.save(deps.storage, &(total_minted + quantity))?;
    MINTED.save(deps.storage, info.sender.clone(), &user_details)?;

    let res = Response::new()
        .add_attribute("action", "mint_from_allowlist")
        .add_attribute("minter", info.sender.into_string())
        .add_attribute("quantity", quantity.to_string())
        .add_attribute("first_token_id", first_token_id.to_string());
    Ok(res)
}

pub fn execute_mint_public(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
    quantity: u32,
) -> Result<Response, ContractError> {
    let config = CONFIG.load(deps.storage)?;
    if !SALE_ACTIVE.load(deps.storage)? {
        return Err(ContractError::SaleNotActive {});
    }

    let mut user_details = MINTED
        .may_load(deps.storage, info.sender.clone())?
        .unwrap_or_default();
    let total_minted = TOTAL_MINTED.load(deps.storage)?;
    check_quantity(&config, &user_details, total_minted, quantity)?;

    // Check the payment
    let sent = must_pay(&info, &config.unit_price.denom)?;
    let expected = config
        .unit_price
        .amount
        .checked_mul(Uint128::from(quantity))
        .map_err(|_| ContractError::OverflowError {})?;
    if sent < expected {
        return Err(ContractError::InsufficientPayment { expected, sent });
    }
    // Overpayment is kept; the whole attached amount goes into escrow
    let escrow = ESCROW.load(deps.storage)?;
    let escrow = escrow
        .checked_add(sent)
        .map_err(|_| ContractError::OverflowError {})?;
    ESCROW.save(deps.storage, &escrow)?;

    let first_token_id = total_minted + 1;
    user_details.add_minted_tokens(first_token_id, quantity, true);
    TOTAL_MINTED.save(deps.storage, &(total_minted + quantity))?;
    MINTED.save(deps.storage, info.sender.clone(), &user_details)?;

    let res = Response::new()
        .add_attribute("action", "mint_public")
        .add_attribute("minter", info.sender.into_string())
        .add_attribute("quantity", quantity.to_string())
        .add_attribute("first_token_id", first_token_id.to_string())
        .add_attribute("paid", sent.to_string());
    Ok(res)
}

pub fn execute_withdraw(
    deps: DepsMut,
    _env: Env,
    info: MessageInfo,
) -> Result<Response, ContractError> {
    nonpayable(&info)?;
    let config = CONFIG.load(deps.storage)?;
    if info.sender != config.admin {
        return Err(ContractError::Unauthorized {});
    }
    let escrow = ESCROW.load(deps.storage)?;
    if escrow.is_zero() {
        return Err(ContractError::TransferFailed {});
    }
    // Escrow is cleared before the bank message leaves the contract
    ESCROW.save(deps.storage, &Uint128::zero())?;

    let bank_msg = BankMsg::Send {
        to_address: config.admin.clone().into_string(),
        amount: vec![Coin {
            denom: config.unit_price.denom,
            amount: escrow,
        }],
    };

    let res = Response::new()
        .add_message(bank_msg)
        .add_attribute("action", "withdraw")
        .add_attribute("recipient", config.admin.into_string())
        .add_attribute("amount", escrow.to_string());
    Ok(res)
}

fn check_quantity(
    config: &Config,
    user_details: &UserDetails,
    total_minted: u32,
    quantity: u32,
) -> Result<(), ContractError> {
    let address_remaining = config
        .per_address_limit
        .saturating_sub(user_details.total_minted_count);
    let remaining = address_remaining.min(config.per_call_limit);
    if quantity == 0 || quantity > remaining {
        return Err(ContractError::QuantityExceedsLimit {
            requested: quantity,
            remaining,
        });
    }
    if u64::from(total_minted) + u64::from(quantity) > u64::from(config.max_supply) {
        return Err(ContractError::SupplyExhausted {});
    }
    Ok(())
}

fn verify_allowlist_signature(
    api: &dyn Api,
    sender: &Addr,
    signature: &HexBinary,
    trusted_signer: &HexBinary,
) -> Result<(), ContractError> {
    let signature = RecoverableSignature::try_from(signature.as_slice())
        .map_err(|_| ContractError::InvalidSignature {})?;
    let message_hash = allowlist_message_hash(sender.as_str());
    let pubkey = api
        .secp256k1_recover_pubkey(&message_hash, signature.rs(), signature.recovery_id())
        .map_err(|_| ContractError::InvalidSignature {})?;
    let recovered = signer_address_from_pubkey(&pubkey)
        .map_err(|_| ContractError::InvalidSignature {})?;
    if recovered != *trusted_signer {
        return Err(ContractError::InvalidSignature {});
    }
    Ok(())
}

// Implement Queries
#[cfg_attr(not(feature = "library"), entry_point)]
pub fn query(deps: Deps, _env: Env, msg: QueryMsg) -> StdResult<Binary> {
    match msg {
        QueryMsg::Config {} => to_json_binary(&query_config(deps)?),
        QueryMsg::SaleActive {} => to_json_binary(&query_sale_active(deps)?),
        QueryMsg::TotalMinted {} => to_json_binary(&query_total_minted(deps)?),
        QueryMsg::MintedTokens { address } => to_json_binary(&query_minted_tokens(deps, address)?),
        QueryMsg::EscrowBalance {} => to_json_binary(&query_escrow_balance(deps)?),
        QueryMsg::TrustedSigner {} => to_json_binary(&query_trusted_signer(deps)?),
    }
}

fn query_config(deps: Deps) -> StdResult<Config> {
    CONFIG.load(deps.storage)
}

fn query_sale_active(deps: Deps) -> StdResult<bool> {
    SALE_ACTIVE.load(deps.storage)
}

fn query_total_minted(deps: Deps) -> StdResult<u32> {
    TOTAL_MINTED.load(deps.storage)
}

fn query_minted_tokens(deps: Deps, address: String) -> StdResult<UserDetails> {
    let address = deps.api.addr_validate(&address)?;
    Ok(MINTED.may_load(deps.storage, address)?.unwrap_or_default())
}

fn query_escrow_balance(deps: Deps) -> StdResult<Uint128> {
    ESCROW.load(deps.storage)
}

fn query_trusted_signer(deps: Deps) -> StdResult<HexBinary> {
    Ok(CONFIG.load(deps.storage)?.trusted_signer)
}
