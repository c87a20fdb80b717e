use soroban_sdk::{log, Address, Env};

use tide::interfaces::farm_contract;

use crate::{
    error::ContractError,
    storage::{get_collaborators, get_stake_amount, save_stake_amount},
};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum StakeChange {
    Increase(i128),
    Decrease(i128),
}

/// Applies `change` to the account's stake and returns the new amount.
/// A decrease below zero is an `ArithmeticFault`.
pub fn apply_stake_change(
    env: &Env,
    account: &Address,
    change: StakeChange,
) -> Result<i128, ContractError> {
    let current = get_stake_amount(env, account);
    let updated = match change {
        StakeChange::Increase(amount) => current.checked_add(amount),
        StakeChange::Decrease(amount) => current.checked_sub(amount).filter(|left| *left >= 0),
    }
    .ok_or_else(|| {
        log!(
            env,
            "Staking: Change stake amount: stake of {} cannot apply {}",
            current,
            change_amount(change)
        );
        ContractError::ArithmeticFault
    })?;

    save_stake_amount(env, account, updated);

    Ok(updated)
}

/// Reports the new absolute stake to every enabled farm collaborator.
pub fn notify_stake_change(env: &Env, account: &Address, amount: i128) {
    for (_, address) in get_collaborators(env).active(env).iter() {
        farm_contract::Client::new(env, &address).change_stake_amount(account, &amount);
    }
}

/// Hands the unstake reward to the enabled collaborators that pay rewards out.
pub fn release_reward(env: &Env, account: &Address, reward: i128) {
    if reward == 0 {
        return;
    }

    for (role, address) in get_collaborators(env).active(env).iter() {
        if role.receives_rewards() {
            farm_contract::Client::new(env, &address).add_reward(account, &reward);
        }
    }
}

fn change_amount(change: StakeChange) -> i128 {
    match change {
        StakeChange::Increase(amount) | StakeChange::Decrease(amount) => amount,
    }
}
