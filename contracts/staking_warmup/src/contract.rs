use soroban_sdk::{contract, contractimpl, contractmeta, log, Address, Env};

use tide::interfaces::receipt_contract;

use crate::{
    error::ContractError,
    storage::{get_config, save_config, Config},
};

// Metadata that is added on to the WASM custom section
contractmeta!(
    key = "Description",
    val = "Tide Protocol staking warmup custody"
);

#[contract]
pub struct StakingWarmup;

pub trait StakingWarmupTrait {
    /// Sends `amount` held receipt tokens to `staker`. Staking contract only.
    fn retrieve(env: Env, staker: Address, amount: i128) -> Result<(), ContractError>;

    fn query_config(env: Env) -> Config;
}

#[contractimpl]
impl StakingWarmup {
    pub fn __constructor(env: Env, staking: Address, receipt_token: Address) {
        save_config(
            &env,
            &Config {
                staking,
                receipt_token,
            },
        );
    }
}

#[contractimpl]
impl StakingWarmupTrait for StakingWarmup {
    fn retrieve(env: Env, staker: Address, amount: i128) -> Result<(), ContractError> {
        let config = get_config(&env);
        config.staking.require_auth();

        if amount < 0 {
            log!(&env, "Warmup: Retrieve: Amount cannot be negative");
            return Err(ContractError::InvalidAmount);
        }

        receipt_contract::Client::new(&env, &config.receipt_token).transfer(
            &env.current_contract_address(),
            &staker,
            &amount,
        );

        env.events()
            .publish(("warmup", "retrieve"), (staker, amount));

        Ok(())
    }

    fn query_config(env: Env) -> Config {
        get_config(&env)
    }
}
