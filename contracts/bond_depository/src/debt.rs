use soroban_sdk::Env;

use tide::utils::current_tick;

use crate::{
    error::ContractError,
    storage::{get_debt, get_terms, save_debt, DebtState},
};

/// Linear decay of `total_debt` over `vesting_term` ticks, never more than
/// the debt itself.
pub fn decay_amount(
    total_debt: i128,
    elapsed: u64,
    vesting_term: u64,
) -> Result<i128, ContractError> {
    if total_debt == 0 || vesting_term == 0 {
        return Ok(0);
    }
    let decay = total_debt
        .checked_mul(elapsed as i128)
        .and_then(|scaled| scaled.checked_div(vesting_term as i128))
        .ok_or(ContractError::ArithmeticFault)?;

    Ok(decay.min(total_debt))
}

/// Debt that has decayed since the last recorded decay.
pub fn debt_decay(env: &Env) -> Result<i128, ContractError> {
    let debt = get_debt(env);
    let elapsed = current_tick(env).saturating_sub(debt.last_decay);
    decay_amount(debt.total_debt, elapsed, get_terms(env).vesting_term)
}

/// Outstanding debt as of the current tick, without writing it back.
pub fn current_debt(env: &Env) -> Result<i128, ContractError> {
    let debt = get_debt(env);
    debt.total_debt
        .checked_sub(debt_decay(env)?)
        .ok_or(ContractError::ArithmeticFault)
}

/// Writes the decay down and moves the decay reference to the current tick.
pub fn decay_debt(env: &Env) -> Result<DebtState, ContractError> {
    let debt = DebtState {
        total_debt: current_debt(env)?,
        last_decay: current_tick(env),
    };
    save_debt(env, &debt);

    Ok(debt)
}
