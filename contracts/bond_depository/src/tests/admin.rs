use pretty_assertions::assert_eq;
use soroban_sdk::{
    testutils::{Address as _, Ledger},
    Address,
};

use tide::{
    scale::DEFAULT_PRICE_BASE,
    testutils::deploy_value_token,
    utils::{AdminChange, PENDING_ADMIN},
};

use super::setup::{BondTest, ONE_TOKEN};
use crate::error::ContractError;

#[test]
fn query_config_after_setup() {
    let test = BondTest::new();
    let config = test.bond.query_config().config;

    assert_eq!(config.value_token, test.value.address);
    assert_eq!(config.principal, test.principal.address);
    assert_eq!(config.treasury, test.treasury.address);
    assert_eq!(config.dao, test.dao);
    assert_eq!(config.bond_calculator, None);
    assert_eq!(config.staking, None);
    assert_eq!(config.staking_helper, None);
    assert!(!config.use_helper);
    assert_eq!(config.price_base, DEFAULT_PRICE_BASE);
    assert_eq!(test.bond.query_admin(), test.admin);
}

#[test]
fn recover_lost_token_sends_balance_to_dao() {
    let test = BondTest::new();
    let stray = deploy_value_token(&test.env, 6, "LOST");
    stray.mint(&test.bond.address, &1_234);

    let recovered = test.bond.recover_lost_token(&test.user(), &stray.address);

    assert_eq!(recovered, 1_234);
    assert_eq!(stray.balance(&test.dao), 1_234);
    assert_eq!(stray.balance(&test.bond.address), 0);
}

#[test]
fn recover_lost_token_keeps_bond_tokens() {
    let test = BondTest::new();
    let user = test.user();
    test.deposit(&user, ONE_TOKEN);

    assert_eq!(
        test.bond.try_recover_lost_token(&user, &test.value.address),
        Err(Ok(ContractError::InvalidAddress))
    );
    assert_eq!(
        test.bond
            .try_recover_lost_token(&user, &test.principal.address),
        Err(Ok(ContractError::InvalidAddress))
    );
}

#[test]
fn propose_admin() {
    let test = BondTest::new();
    let new_admin = Address::generate(&test.env);

    let result = test.bond.propose_admin(&new_admin, &None);
    assert_eq!(result, new_admin.clone());

    let pending_admin: AdminChange = test.env.as_contract(&test.bond.address, || {
        test.env.storage().instance().get(&PENDING_ADMIN).unwrap()
    });

    assert_eq!(pending_admin.new_admin, new_admin);
    assert_eq!(pending_admin.time_limit, None);
}

#[test]
fn replace_admin_fails_when_new_admin_is_same_as_current() {
    let test = BondTest::new();

    assert_eq!(
        test.bond.try_propose_admin(&test.admin, &None),
        Err(Ok(ContractError::SameAdmin))
    );
}

#[test]
fn accept_admin_successfully() {
    let test = BondTest::new();
    let new_admin = Address::generate(&test.env);

    test.bond.propose_admin(&new_admin, &None);
    let result = test.bond.accept_admin();

    assert_eq!(result, new_admin.clone());
    assert_eq!(test.bond.query_admin(), new_admin);

    let pending_admin: Option<AdminChange> = test.env.as_contract(&test.bond.address, || {
        test.env.storage().instance().get(&PENDING_ADMIN)
    });
    assert!(pending_admin.is_none());

    // The previous admin lost its rights
    assert_eq!(
        test.bond.try_set_price_base(&test.admin, &10),
        Err(Ok(ContractError::AccessDenied))
    );
    test.bond.set_price_base(&new_admin, &10);
}

#[test]
fn accept_admin_fails_when_no_pending_admin() {
    let test = BondTest::new();

    assert_eq!(
        test.bond.try_accept_admin(),
        Err(Ok(ContractError::NoAdminChangeInPlace))
    );
}

#[test]
fn accept_admin_fails_when_time_limit_expired() {
    let test = BondTest::new();
    let new_admin = Address::generate(&test.env);

    let time_limit = 1000u64;
    test.bond.propose_admin(&new_admin, &Some(time_limit));
    test.env.ledger().set_timestamp(time_limit + 100);

    assert_eq!(
        test.bond.try_accept_admin(),
        Err(Ok(ContractError::AdminChangeExpired))
    );
}

#[test]
fn propose_admin_then_revoke() {
    let test = BondTest::new();
    let new_admin = Address::generate(&test.env);

    test.bond.propose_admin(&new_admin, &None);
    test.bond.revoke_admin_change();

    assert_eq!(
        test.bond.try_accept_admin(),
        Err(Ok(ContractError::NoAdminChangeInPlace))
    );
    assert_eq!(test.bond.query_admin(), test.admin);
}

#[test]
fn revoke_admin_should_fail_when_no_admin_change_in_place() {
    let test = BondTest::new();

    assert_eq!(
        test.bond.try_revoke_admin_change(),
        Err(Ok(ContractError::NoAdminChangeInPlace))
    );
}
