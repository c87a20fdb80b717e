use soroban_sdk::{contract, contractimpl, contracttype, Address, Env};

#[derive(Clone)]
#[contracttype]
enum DataKey {
    StakeAmount(Address),
    Reward(Address),
}

/// Records whatever the staking contract reports about an account.
#[contract]
pub struct MockFarm;

#[contractimpl]
impl MockFarm {
    pub fn change_stake_amount(env: Env, account: Address, amount: i128) {
        env.storage()
            .persistent()
            .set(&DataKey::StakeAmount(account), &amount);
    }

    pub fn add_reward(env: Env, account: Address, amount: i128) {
        let key = DataKey::Reward(account);
        let current: i128 = env.storage().persistent().get(&key).unwrap_or(0);
        env.storage().persistent().set(&key, &(current + amount));
    }

    /// `None` until the staking contract has reported the account once.
    pub fn stake_amount(env: Env, account: Address) -> Option<i128> {
        env.storage()
            .persistent()
            .get(&DataKey::StakeAmount(account))
    }

    pub fn reward(env: Env, account: Address) -> i128 {
        env.storage()
            .persistent()
            .get(&DataKey::Reward(account))
            .unwrap_or(0)
    }
}
