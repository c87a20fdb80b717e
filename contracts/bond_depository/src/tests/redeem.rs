use pretty_assertions::assert_eq;
use soroban_sdk::{
    testutils::{Address as _, Events},
    Address, FromVal, IntoVal, Val, Vec,
};

use tide::testutils::{deploy_receipt_token, MockReceiptTokenClient};
use tide_staking::{ContractKind, Staking, StakingClient};
use tide_staking_helper::StakingHelper;
use tide_staking_warmup::StakingWarmup;

use super::setup::{default_terms, BondTest, ONE_TOKEN};
use crate::{error::ContractError, storage::Bond};

/// Far enough ahead that no epoch closes during a test
const FIRST_EPOCH_BLOCK: u64 = 1_000_000;

/// Deploys a vault over the bond's value token, with its warmup contract.
fn deploy_staking<'a>(
    test: &BondTest<'a>,
    warmup_period: u64,
) -> (StakingClient<'a>, MockReceiptTokenClient<'a>) {
    let env = &test.env;
    let receipt = deploy_receipt_token(env, 1_000_000_000);
    let staking = StakingClient::new(
        env,
        &env.register(
            Staking,
            (
                test.admin.clone(),
                test.value.address.clone(),
                receipt.address.clone(),
                100u64,
                1u64,
                FIRST_EPOCH_BLOCK,
            ),
        ),
    );
    receipt.initialize(&staking.address);

    let warmup = env.register(
        StakingWarmup,
        (staking.address.clone(), receipt.address.clone()),
    );
    staking.set_contract(&test.admin, &ContractKind::WarmupContract, &warmup);
    staking.set_warmup(&test.admin, &warmup_period);

    (staking, receipt)
}

#[test]
fn partial_redeem_pays_vested_share() {
    let test = BondTest::new();
    let user = test.user();
    let payout = test.deposit(&user, ONE_TOKEN);
    let price_paid = test.bond.bond_info(&user).unwrap().price_paid;

    test.advance(2_500);
    assert_eq!(test.bond.percent_vested_for(&user), 2_500);
    assert_eq!(test.bond.pending_payout_for(&user), payout / 4);

    let redeemed = test.bond.redeem(&user, &false);

    assert_eq!(redeemed, payout / 4);
    assert_eq!(test.value.balance(&user), payout / 4);
    assert_eq!(
        test.bond.bond_info(&user),
        Some(Bond {
            payout: payout - payout / 4,
            vesting: 7_500,
            last_block: test.tick(),
            price_paid,
        })
    );
    assert_eq!(test.bond.percent_vested_for(&user), 0);
}

#[test]
fn partial_redeems_add_up_to_payout() {
    let test = BondTest::new();
    let user = test.user();
    let payout = test.deposit(&user, ONE_TOKEN);

    let mut redeemed = 0;
    while test.bond.bond_info(&user).is_some() {
        test.advance(3_000);
        redeemed += test.bond.redeem(&user, &false);
    }

    assert_eq!(redeemed, payout);
    assert_eq!(test.value.balance(&user), payout);
    assert_eq!(test.bond.bond_info(&user), None);
}

#[test]
fn full_redeem_removes_bond() {
    let test = BondTest::new();
    let user = test.user();
    let payout = test.deposit(&user, ONE_TOKEN);

    test.advance(default_terms().vesting_term * 2);
    assert_eq!(test.bond.percent_vested_for(&user), 20_000);
    assert_eq!(test.bond.pending_payout_for(&user), payout);

    assert_eq!(test.bond.redeem(&user, &false), payout);
    assert_eq!(test.value.balance(&user), payout);
    assert_eq!(test.bond.bond_info(&user), None);
    assert_eq!(test.value.balance(&test.bond.address), 0);

    assert_eq!(
        test.bond.try_redeem(&user, &false),
        Err(Ok(ContractError::BondNotFound))
    );
}

#[test]
fn redeem_without_bond_fails() {
    let test = BondTest::new();
    let user = test.user();

    assert_eq!(test.bond.percent_vested_for(&user), 0);
    assert_eq!(test.bond.pending_payout_for(&user), 0);
    assert_eq!(
        test.bond.try_redeem(&user, &false),
        Err(Ok(ContractError::BondNotFound))
    );
}

#[test]
fn redeem_before_any_vesting_pays_nothing() {
    let test = BondTest::new();
    let user = test.user();
    let payout = test.deposit(&user, ONE_TOKEN);

    assert_eq!(test.bond.redeem(&user, &true), 0);
    assert_eq!(test.bond.bond_info(&user).unwrap().payout, payout);
    assert_eq!(test.value.balance(&user), 0);
}

#[test]
fn redeem_publishes_remaining_payout() {
    let test = BondTest::new();
    let user = test.user();
    let payout = test.deposit(&user, ONE_TOKEN);

    test.advance(5_000);
    test.bond.redeem(&user, &false);

    let topics: Vec<Val> = ("bond", "bond_redeemed").into_val(&test.env);
    let (_, _, data) = test
        .env
        .events()
        .all()
        .into_iter()
        .rev()
        .find(|event| event.0 == test.bond.address && event.1 == topics)
        .unwrap();
    assert_eq!(
        <(Address, i128, i128)>::from_val(&test.env, &data),
        (user, payout / 2, payout - payout / 2)
    );
}

#[test]
fn redeem_into_staking_warmup() {
    let test = BondTest::new();
    let (staking, receipt) = deploy_staking(&test, 1_000);
    test.bond
        .set_staking(&test.admin, &staking.address, &false);
    let user = test.user();
    let payout = test.deposit(&user, ONE_TOKEN);

    test.advance(default_terms().vesting_term);
    test.bond.redeem(&user, &true);

    assert_eq!(test.value.balance(&user), 0);
    assert_eq!(test.value.balance(&staking.address), payout);
    assert_eq!(receipt.balance(&user), 0);
    let claim = staking.query_warmup_info(&user);
    assert_eq!(claim.deposit, payout);
    assert_eq!(claim.expiry, 1_001);
}

#[test]
fn redeem_through_staking_helper() {
    let test = BondTest::new();
    let (staking, receipt) = deploy_staking(&test, 0);
    let helper = test.env.register(
        StakingHelper,
        (staking.address.clone(), test.value.address.clone()),
    );
    test.bond.set_staking(&test.admin, &helper, &true);
    let user = test.user();
    let payout = test.deposit(&user, ONE_TOKEN);

    test.advance(default_terms().vesting_term);
    test.bond.redeem(&user, &true);

    assert_eq!(receipt.balance(&user), payout);
    assert_eq!(staking.query_stake_amount(&user), payout);
    assert_eq!(test.value.balance(&helper), 0);
    assert_eq!(test.value.balance(&test.bond.address), 0);
}

#[test]
fn stake_on_redeem_without_staking_fails() {
    let test = BondTest::new();
    let user = test.user();
    test.deposit(&user, ONE_TOKEN);

    test.advance(1_000);
    assert_eq!(
        test.bond.try_redeem(&user, &true),
        Err(Ok(ContractError::StakingNotSet))
    );

    // Paying out directly still works
    assert!(test.bond.redeem(&user, &false) > 0);
}

#[test]
fn helper_flag_selects_target() {
    let test = BondTest::new();
    let staking = Address::generate(&test.env);
    let helper = Address::generate(&test.env);

    test.bond.set_staking(&test.admin, &staking, &false);
    test.bond.set_staking(&test.admin, &helper, &true);
    let config = test.bond.query_config().config;
    assert_eq!(config.staking, Some(staking.clone()));
    assert_eq!(config.staking_helper, Some(helper));
    assert!(config.use_helper);

    test.bond.set_staking(&test.admin, &staking, &false);
    assert!(!test.bond.query_config().config.use_helper);
}
