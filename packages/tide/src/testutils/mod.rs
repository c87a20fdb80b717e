//! In-process collaborators for contract tests.
//!
//! These are deliberately small: balances, allowances and the rebasing gons
//! bookkeeping are enough to drive the staking and bond flows end to end.

pub mod bond_calculator;
pub mod distributor;
pub mod farm;
pub mod receipt_token;
pub mod treasury;
pub mod value_token;

use soroban_sdk::{testutils::Ledger, Address, Env, String};

pub use bond_calculator::{MockBondCalculator, MockBondCalculatorClient};
pub use distributor::{MockDistributor, MockDistributorClient};
pub use farm::{MockFarm, MockFarmClient};
pub use receipt_token::{MockReceiptToken, MockReceiptTokenClient};
pub use treasury::{MockTreasury, MockTreasuryClient};
pub use value_token::{MockValueToken, MockValueTokenClient};

/// Entries created by the mocks are never bumped, so tests that move the
/// tick forward by whole vesting terms need a long minimum TTL.
pub const TEST_ENTRY_TTL: u32 = 1_000_000;

/// Puts the ledger at `tick` with entry lifetimes that outlast every test.
pub fn start_ledger_at(env: &Env, tick: u32) {
    env.ledger().with_mut(|li| {
        li.sequence_number = tick;
        li.min_temp_entry_ttl = TEST_ENTRY_TTL;
        li.min_persistent_entry_ttl = TEST_ENTRY_TTL;
    });
}

pub fn deploy_value_token<'a>(env: &Env, decimals: u32, symbol: &str) -> MockValueTokenClient<'a> {
    let address = env.register(
        MockValueToken,
        (
            decimals,
            String::from_str(env, symbol),
            String::from_str(env, symbol),
        ),
    );
    MockValueTokenClient::new(env, &address)
}

pub fn deploy_receipt_token<'a>(env: &Env, initial_index: i128) -> MockReceiptTokenClient<'a> {
    let address = env.register(MockReceiptToken, (initial_index,));
    MockReceiptTokenClient::new(env, &address)
}

pub fn deploy_treasury<'a>(
    env: &Env,
    value_token: &Address,
    value_numerator: i128,
    value_denominator: i128,
) -> MockTreasuryClient<'a> {
    let address = env.register(
        MockTreasury,
        (value_token.clone(), value_numerator, value_denominator),
    );
    MockTreasuryClient::new(env, &address)
}

pub fn deploy_distributor<'a>(
    env: &Env,
    value_token: &Address,
    recipient: &Address,
    reward: i128,
) -> MockDistributorClient<'a> {
    let address = env.register(
        MockDistributor,
        (value_token.clone(), recipient.clone(), reward),
    );
    MockDistributorClient::new(env, &address)
}

pub fn deploy_bond_calculator<'a>(env: &Env, markdown: i128) -> MockBondCalculatorClient<'a> {
    let address = env.register(MockBondCalculator, (markdown,));
    MockBondCalculatorClient::new(env, &address)
}

pub fn deploy_farm<'a>(env: &Env) -> MockFarmClient<'a> {
    let address = env.register(MockFarm, ());
    MockFarmClient::new(env, &address)
}
