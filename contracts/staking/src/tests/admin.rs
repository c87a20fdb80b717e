use pretty_assertions::assert_eq;
use soroban_sdk::{
    testutils::{Address as _, Ledger},
    Address,
};

use tide::utils::{AdminChange, PENDING_ADMIN};

use super::setup::{StakingTest, LONG_WARMUP};
use crate::{error::ContractError, storage::ContractKind};

#[test]
fn query_config_after_setup() {
    let test = StakingTest::new(LONG_WARMUP);
    let config = test.staking.query_config().config;

    assert_eq!(config.value_token, test.value.address);
    assert_eq!(config.receipt_token, test.receipt.address);
    assert_eq!(config.warmup_contract, Some(test.warmup.address.clone()));
    assert_eq!(config.warmup_period, LONG_WARMUP);
    assert_eq!(config.locker, None);
    assert_eq!(config.distributor, None);
    assert_eq!(config.loan, None);
    assert_eq!(test.staking.query_admin(), test.admin);
}

#[test]
fn warmup_contract_is_set_once() {
    let test = StakingTest::new(0);

    assert_eq!(
        test.staking.try_set_contract(
            &test.admin,
            &ContractKind::WarmupContract,
            &test.user()
        ),
        Err(Ok(ContractError::AlreadyConfigured))
    );
}

#[test]
fn locker_is_set_once() {
    let test = StakingTest::new(0);
    let locker = test.user();

    test.staking
        .set_contract(&test.admin, &ContractKind::Locker, &locker);
    assert_eq!(
        test.staking
            .try_set_contract(&test.admin, &ContractKind::Locker, &test.user()),
        Err(Ok(ContractError::AlreadyConfigured))
    );
    assert_eq!(test.staking.query_config().config.locker, Some(locker));
}

#[test]
fn distributor_can_be_replaced() {
    let test = StakingTest::new(0);
    let first = test.user();
    let second = test.user();

    test.staking
        .set_contract(&test.admin, &ContractKind::Distributor, &first);
    test.staking
        .set_contract(&test.admin, &ContractKind::Distributor, &second);

    assert_eq!(test.staking.query_config().config.distributor, Some(second));
}

#[test]
fn set_contract_rejects_vault_address() {
    let test = StakingTest::new(0);

    assert_eq!(
        test.staking.try_set_contract(
            &test.admin,
            &ContractKind::Distributor,
            &test.staking.address
        ),
        Err(Ok(ContractError::InvalidAddress))
    );
}

#[test]
fn setters_require_admin() {
    let test = StakingTest::new(0);
    let stranger = test.user();

    assert_eq!(
        test.staking
            .try_set_contract(&stranger, &ContractKind::Distributor, &stranger),
        Err(Ok(ContractError::AccessDenied))
    );
    assert_eq!(
        test.staking.try_set_warmup(&stranger, &5),
        Err(Ok(ContractError::AccessDenied))
    );
    assert_eq!(
        test.staking.try_set_loan(&stranger, &stranger),
        Err(Ok(ContractError::AccessDenied))
    );
}

#[test]
fn set_warmup_and_loan() {
    let test = StakingTest::new(0);
    let loan = test.user();

    test.staking.set_warmup(&test.admin, &7);
    test.staking.set_loan(&test.admin, &loan);

    let config = test.staking.query_config().config;
    assert_eq!(config.warmup_period, 7);
    assert_eq!(config.loan, Some(loan));
}

#[test]
fn propose_admin() {
    let test = StakingTest::new(0);
    let new_admin = Address::generate(&test.env);

    let result = test.staking.propose_admin(&new_admin, &None);
    assert_eq!(result, new_admin.clone());

    let pending_admin: AdminChange = test.env.as_contract(&test.staking.address, || {
        test.env.storage().instance().get(&PENDING_ADMIN).unwrap()
    });

    assert_eq!(pending_admin.new_admin, new_admin);
    assert_eq!(pending_admin.time_limit, None);
}

#[test]
fn replace_admin_fails_when_new_admin_is_same_as_current() {
    let test = StakingTest::new(0);

    assert_eq!(
        test.staking.try_propose_admin(&test.admin, &None),
        Err(Ok(ContractError::SameAdmin))
    );
}

#[test]
fn accept_admin_successfully() {
    let test = StakingTest::new(0);
    let new_admin = Address::generate(&test.env);

    test.staking.propose_admin(&new_admin, &None);
    let result = test.staking.accept_admin();

    assert_eq!(result, new_admin.clone());
    assert_eq!(test.staking.query_admin(), new_admin);

    let pending_admin: Option<AdminChange> = test.env.as_contract(&test.staking.address, || {
        test.env.storage().instance().get(&PENDING_ADMIN)
    });
    assert!(pending_admin.is_none());
}

#[test]
fn accept_admin_fails_when_no_pending_admin() {
    let test = StakingTest::new(0);

    assert_eq!(
        test.staking.try_accept_admin(),
        Err(Ok(ContractError::NoAdminChangeInPlace))
    );
}

#[test]
fn accept_admin_fails_when_time_limit_expired() {
    let test = StakingTest::new(0);
    let new_admin = Address::generate(&test.env);

    let time_limit = 1000u64;
    test.staking.propose_admin(&new_admin, &Some(time_limit));
    test.env.ledger().set_timestamp(time_limit + 100);

    assert_eq!(
        test.staking.try_accept_admin(),
        Err(Ok(ContractError::AdminChangeExpired))
    );
}

#[test]
fn accept_admin_successfully_on_time_limit() {
    let test = StakingTest::new(0);
    let new_admin = Address::generate(&test.env);

    let time_limit = 1_500;
    test.staking.propose_admin(&new_admin, &Some(time_limit));
    test.env.ledger().set_timestamp(time_limit);

    assert_eq!(test.staking.accept_admin(), new_admin);
}

#[test]
fn propose_admin_then_revoke() {
    let test = StakingTest::new(0);
    let new_admin = Address::generate(&test.env);

    test.staking.propose_admin(&new_admin, &None);
    test.staking.revoke_admin_change();

    assert_eq!(
        test.staking.try_accept_admin(),
        Err(Ok(ContractError::NoAdminChangeInPlace))
    );
    assert_eq!(test.staking.query_admin(), test.admin);
}

#[test]
fn revoke_admin_should_fail_when_no_admin_change_in_place() {
    let test = StakingTest::new(0);

    assert_eq!(
        test.staking.try_revoke_admin_change(),
        Err(Ok(ContractError::NoAdminChangeInPlace))
    );
}
