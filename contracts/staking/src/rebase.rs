use soroban_sdk::{log, Env};

use tide::{
    interfaces::{distributor_contract, receipt_contract, token_contract},
    utils::current_tick,
};

use crate::{
    error::ContractError,
    storage::{get_config, get_epoch, get_total_bonus, save_epoch, Config, Epoch},
};

impl Epoch {
    pub fn is_due(&self, tick: u64) -> bool {
        tick >= self.end_block
    }

    /// Moves the epoch window forward by one length.
    pub fn advance(&mut self) -> Result<(), ContractError> {
        self.end_block = self
            .end_block
            .checked_add(self.length)
            .ok_or(ContractError::ArithmeticFault)?;
        self.number = self
            .number
            .checked_add(1)
            .ok_or(ContractError::ArithmeticFault)?;
        Ok(())
    }
}

/// Value tokens held by the vault plus receipt tokens lent to the locker.
pub fn contract_balance(env: &Env, config: &Config) -> Result<i128, ContractError> {
    token_contract::Client::new(env, &config.value_token)
        .balance(&env.current_contract_address())
        .checked_add(get_total_bonus(env))
        .ok_or(ContractError::ArithmeticFault)
}

/// Surplus of held value over the receipt supply in circulation, never negative.
pub fn distributable(balance: i128, staked: i128) -> i128 {
    if balance <= staked {
        0
    } else {
        balance - staked
    }
}

/// Advances the epoch once the current window has ended. Returns `false`
/// without touching anything while the window is still open.
pub fn rebase_epoch(env: &Env) -> Result<bool, ContractError> {
    let mut epoch = get_epoch(env);
    if !epoch.is_due(current_tick(env)) {
        return Ok(false);
    }

    let config = get_config(env);
    let profit = epoch.distribute;
    let rebased_epoch = epoch.number;

    epoch.advance()?;
    save_epoch(env, &epoch);

    let receipt = receipt_contract::Client::new(env, &config.receipt_token);
    receipt.rebase(&profit, &rebased_epoch);

    if let Some(distributor) = &config.distributor {
        distributor_contract::Client::new(env, distributor).distribute();
    }

    let balance = contract_balance(env, &config)?;
    let staked = receipt.circulating_supply();
    epoch.distribute = distributable(balance, staked);
    save_epoch(env, &epoch);

    log!(
        env,
        "Staking: Rebase: epoch {} distributed {}, next distribute {}",
        rebased_epoch,
        profit,
        epoch.distribute
    );
    env.events()
        .publish(("staking", "rebase"), (profit, rebased_epoch));

    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case(1_000, 400, 600 ; "surplus")]
    #[test_case(400, 400, 0 ; "even")]
    #[test_case(400, 1_000, 0 ; "deficit clamps to zero")]
    fn distributable_is_never_negative(balance: i128, staked: i128, expected: i128) {
        assert_eq!(distributable(balance, staked), expected);
    }

    #[test]
    fn advance_moves_window_and_number() {
        let mut epoch = Epoch {
            length: 100,
            number: 7,
            end_block: 1_000,
            distribute: 0,
        };
        assert!(!epoch.is_due(999));
        assert!(epoch.is_due(1_000));

        epoch.advance().unwrap();

        assert_eq!(epoch.number, 8);
        assert_eq!(epoch.end_block, 1_100);
        assert!(!epoch.is_due(1_099));
    }

    #[test]
    fn advance_overflow_is_arithmetic_fault() {
        let mut epoch = Epoch {
            length: 1,
            number: 0,
            end_block: u64::MAX,
            distribute: 0,
        };
        assert_eq!(epoch.advance(), Err(ContractError::ArithmeticFault));
    }
}
