use soroban_sdk::{
    testutils::{Address as _, Ledger},
    Address, Env,
};

use tide::testutils::{
    deploy_receipt_token, deploy_value_token, start_ledger_at, MockReceiptTokenClient,
    MockValueTokenClient,
};
use tide_staking_warmup::{StakingWarmup, StakingWarmupClient};

use crate::{
    contract::{Staking, StakingClient},
    storage::ContractKind,
};

pub const EPOCH_LENGTH: u64 = 100;
pub const FIRST_EPOCH_NUMBER: u64 = 1;
pub const FIRST_EPOCH_BLOCK: u64 = 100;
pub const START_TICK: u32 = 10;
pub const INITIAL_INDEX: i128 = 1_000_000_000;
/// Expiry is effectively never reached in tests using this period
pub const LONG_WARMUP: u64 = 1_000;

pub fn deploy_staking_contract<'a>(
    env: &Env,
    admin: &Address,
    value_token: &Address,
    receipt_token: &Address,
    first_epoch_number: u64,
) -> StakingClient<'a> {
    let staking = env.register(
        Staking,
        (
            admin.clone(),
            value_token.clone(),
            receipt_token.clone(),
            EPOCH_LENGTH,
            first_epoch_number,
            FIRST_EPOCH_BLOCK,
        ),
    );
    StakingClient::new(env, &staking)
}

pub struct StakingTest<'a> {
    pub env: Env,
    pub admin: Address,
    pub value: MockValueTokenClient<'a>,
    pub receipt: MockReceiptTokenClient<'a>,
    pub staking: StakingClient<'a>,
    pub warmup: StakingWarmupClient<'a>,
}

impl<'a> StakingTest<'a> {
    pub fn new(warmup_period: u64) -> Self {
        Self::with_first_epoch(FIRST_EPOCH_NUMBER, warmup_period)
    }

    pub fn with_first_epoch(first_epoch_number: u64, warmup_period: u64) -> Self {
        let env = Env::default();
        env.mock_all_auths();
        env.cost_estimate().budget().reset_unlimited();
        start_ledger_at(&env, START_TICK);

        let admin = Address::generate(&env);
        let value = deploy_value_token(&env, 9, "TIDE");
        let receipt = deploy_receipt_token(&env, INITIAL_INDEX);
        let staking = deploy_staking_contract(
            &env,
            &admin,
            &value.address,
            &receipt.address,
            first_epoch_number,
        );
        receipt.initialize(&staking.address);

        let warmup = StakingWarmupClient::new(
            &env,
            &env.register(
                StakingWarmup,
                (staking.address.clone(), receipt.address.clone()),
            ),
        );
        staking.set_contract(&admin, &ContractKind::WarmupContract, &warmup.address);
        staking.set_warmup(&admin, &warmup_period);

        StakingTest {
            env,
            admin,
            value,
            receipt,
            staking,
            warmup,
        }
    }

    pub fn user(&self) -> Address {
        Address::generate(&self.env)
    }

    /// Mints `amount` value tokens to `user` and lets the vault pull them.
    pub fn fund(&self, user: &Address, amount: i128) {
        self.value.mint(user, &amount);
        self.value.approve(
            user,
            &self.staking.address,
            &amount,
            &(self.env.ledger().sequence() + 10_000),
        );
    }

    pub fn stake(&self, user: &Address, amount: i128) {
        self.fund(user, amount);
        self.staking.stake(user, &amount, user);
    }

    /// Lets the vault pull `amount` receipt tokens back from `user`.
    pub fn approve_receipt(&self, user: &Address, amount: i128) {
        self.receipt.approve(
            user,
            &self.staking.address,
            &amount,
            &(self.env.ledger().sequence() + 10_000),
        );
    }

    pub fn set_tick(&self, tick: u64) {
        self.env
            .ledger()
            .with_mut(|li| li.sequence_number = tick as u32);
    }

    /// Sends extra value to the vault so the next epochs have something to distribute.
    pub fn add_profit(&self, amount: i128) {
        self.value.mint(&self.staking.address, &amount);
    }

    /// Jumps to the end of the current epoch and rebases.
    pub fn close_epoch(&self) {
        self.set_tick(self.staking.query_epoch().end_block);
        assert!(self.staking.rebase());
    }
}
