use soroban_sdk::{contract, contractimpl, contractmeta, log, Address, Env};

use tide::interfaces::{staking_contract, token_contract};

use crate::{
    error::ContractError,
    storage::{get_config, save_config, Config},
};

// Metadata that is added on to the WASM custom section
contractmeta!(
    key = "Description",
    val = "Tide Protocol stake and claim helper"
);

#[contract]
pub struct StakingHelper;

pub trait StakingHelperTrait {
    /// Pulls `amount` value tokens from `from`, stakes them for `recipient`
    /// and claims right away. With a non-zero warmup the claim stays pending.
    fn stake(env: Env, from: Address, amount: i128, recipient: Address)
        -> Result<(), ContractError>;

    fn query_config(env: Env) -> Config;
}

#[contractimpl]
impl StakingHelper {
    pub fn __constructor(env: Env, staking: Address, value_token: Address) {
        save_config(
            &env,
            &Config {
                staking,
                value_token,
            },
        );
    }
}

#[contractimpl]
impl StakingHelperTrait for StakingHelper {
    fn stake(
        env: Env,
        from: Address,
        amount: i128,
        recipient: Address,
    ) -> Result<(), ContractError> {
        from.require_auth();

        if amount < 0 {
            log!(&env, "Staking helper: Stake: Amount cannot be negative");
            return Err(ContractError::InvalidAmount);
        }

        let config = get_config(&env);
        let this = env.current_contract_address();
        let value = token_contract::Client::new(&env, &config.value_token);

        value.transfer_from(&this, &from, &this, &amount);
        value.approve(&this, &config.staking, &amount, &env.ledger().sequence());

        let staking = staking_contract::Client::new(&env, &config.staking);
        staking.stake(&this, &amount, &recipient);
        staking.claim(&this, &recipient);

        Ok(())
    }

    fn query_config(env: Env) -> Config {
        get_config(&env)
    }
}
