use cosmwasm_std::HexBinary;
use cw_multi_test::Executor;

use allowlist_minter::error::ContractError as MinterContractError;
use allowlist_minter::msg::ExecuteMsg as MinterExecuteMsg;
use allowlist_minter::msg::QueryMsg as MinterQueryMsg;
use allowlist_signer::signer_address;

use crate::helpers::mock_messages::return_minter_instantiate_msg;
use crate::helpers::setup::setup;
use crate::helpers::utils::{forger_signing_key, sign_address, test_signing_key};

#[test]
fn flip_sale_state() {
    let res = setup();
    let admin = res.test_accounts.admin;
    let minter_one = res.test_accounts.minter_one;
    let minter_code_id = res.minter_code_id;
    let mut app = res.app;

    let msg = return_minter_instantiate_msg(signer_address(&test_signing_key()));
    let minter_address = app
        .instantiate_contract(minter_code_id, admin.clone(), &msg, &[], "minter", None)
        .unwrap();

    // Non admin cannot touch the sale state
    let error = app
        .execute_contract(
            minter_one.clone(),
            minter_address.clone(),
            &MinterExecuteMsg::FlipSaleState {},
            &[],
        )
        .unwrap_err();
    let res = error.source().unwrap();
    let error = res.downcast_ref::<MinterContractError>().unwrap();
    assert_eq!(error, &MinterContractError::Unauthorized {});

    // Admin opens the sale
    app.execute_contract(
        admin.clone(),
        minter_address.clone(),
        &MinterExecuteMsg::FlipSaleState {},
        &[],
    )
    .unwrap();
    let sale_active: bool = app
        .wrap()
        .query_wasm_smart(minter_address.clone(), &MinterQueryMsg::SaleActive {})
        .unwrap();
    assert!(sale_active);

    // A second flip closes it again
    app.execute_contract(
        admin.clone(),
        minter_address.clone(),
        &MinterExecuteMsg::FlipSaleState {},
        &[],
    )
    .unwrap();
    let sale_active: bool = app
        .wrap()
        .query_wasm_smart(minter_address, &MinterQueryMsg::SaleActive {})
        .unwrap();
    assert!(!sale_active);
}

#[test]
fn set_trusted_signer() {
    let res = setup();
    let admin = res.test_accounts.admin;
    let minter_one = res.test_accounts.minter_one;
    let minter_code_id = res.minter_code_id;
    let mut app = res.app;

    let old_key = test_signing_key();
    let new_key = forger_signing_key();

    let msg = return_minter_instantiate_msg(signer_address(&old_key));
    let minter_address = app
        .instantiate_contract(minter_code_id, admin.clone(), &msg, &[], "minter", None)
        .unwrap();

    // Non admin cannot rotate the signer
    let error = app
        .execute_contract(
            minter_one.clone(),
            minter_address.clone(),
            &MinterExecuteMsg::SetTrustedSigner {
                signer: signer_address(&new_key),
            },
            &[],
        )
        .unwrap_err();
    let res = error.source().unwrap();
    let error = res.downcast_ref::<MinterContractError>().unwrap();
    assert_eq!(error, &MinterContractError::Unauthorized {});

    // Wrong length is rejected
    let error = app
        .execute_contract(
            admin.clone(),
            minter_address.clone(),
            &MinterExecuteMsg::SetTrustedSigner {
                signer: HexBinary::from(vec![9u8; 32]),
            },
            &[],
        )
        .unwrap_err();
    let res = error.source().unwrap();
    let error = res.downcast_ref::<MinterContractError>().unwrap();
    assert_eq!(error, &MinterContractError::InvalidTrustedSigner {});

    // Admin rotates the signer
    app.execute_contract(
        admin.clone(),
        minter_address.clone(),
        &MinterExecuteMsg::SetTrustedSigner {
            signer: signer_address(&new_key),
        },
        &[],
    )
    .unwrap();
    let queried_signer: HexBinary = app
        .wrap()
        .query_wasm_smart(minter_address.clone(), &MinterQueryMsg::TrustedSigner {})
        .unwrap();
    assert_eq!(queried_signer, signer_address(&new_key));

    // Signatures from the retired key no longer pass
    app.execute_contract(
        admin.clone(),
        minter_address.clone(),
        &MinterExecuteMsg::FlipSaleState {},
        &[],
    )
    .unwrap();
    let old_signature = sign_address(&old_key, &minter_one);
    let error = app
        .execute_contract(
            minter_one.clone(),
            minter_address.clone(),
            &MinterExecuteMsg::MintFromAllowlist {
                quantity: 1,
                signature: old_signature,
            },
            &[],
        )
        .unwrap_err();
    let res = error.source().unwrap();
    let error = res.downcast_ref::<MinterContractError>().unwrap();
    assert_eq!(error, &MinterContractError::InvalidSignature {});

    // While the new key's signatures do
    let new_signature = sign_address(&new_key, &minter_one);
    app.execute_contract(
        minter_one,
        minter_address,
        &MinterExecuteMsg::MintFromAllowlist {
            quantity: 1,
            signature: new_signature,
        },
        &[],
    )
    .unwrap();
}
