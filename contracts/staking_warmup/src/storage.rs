use soroban_sdk::{contracttype, log, panic_with_error, symbol_short, Address, Env, Symbol};

use tide::ttl::bump_instance;

use crate::error::ContractError;

const CONFIG: Symbol = symbol_short!("CONFIG");

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Config {
    /// Only caller allowed to release custody
    pub staking: Address,
    pub receipt_token: Address,
}

pub fn save_config(env: &Env, config: &Config) {
    env.storage().instance().set(&CONFIG, config);
    bump_instance(env);
}

pub fn get_config(env: &Env) -> Config {
    let config = env.storage().instance().get(&CONFIG).unwrap_or_else(|| {
        log!(env, "Warmup: Config not set");
        panic_with_error!(env, ContractError::ConfigNotSet)
    });
    bump_instance(env);

    config
}
