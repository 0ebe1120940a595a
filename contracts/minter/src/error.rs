use cosmwasm_std::{StdError, Uint128};
use cw_utils::PaymentError;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("Payment error")]
    Payment(#[from] PaymentError),

    #[error("Unauthorized")]
    Unauthorized {},

    #[error("Sale is not active")]
    SaleNotActive {},

    #[error("Invalid signature")]
    InvalidSignature {},

    #[error("Quantity exceeds limit")]
    QuantityExceedsLimit { requested: u32, remaining: u32 },

    #[error("Supply exhausted")]
    SupplyExhausted {},

    #[error("Insufficient payment")]
    InsufficientPayment { expected: Uint128, sent: Uint128 },

    #[error("Escrow transfer failed")]
    TransferFailed {},

    #[error("Trusted signer must be a 20 byte address")]
    InvalidTrustedSigner {},

    #[error("Max supply cannot be zero")]
    InvalidMaxSupply {},

    #[error("Per address limit cannot be zero")]
    PerAddressLimitZero {},

    #[error("Per call limit cannot be zero")]
    PerCallLimitZero {},

    #[error("Invalid unit price")]
    InvalidUnitPrice {},

    #[error("Overflow error")]
    OverflowError {},
}
