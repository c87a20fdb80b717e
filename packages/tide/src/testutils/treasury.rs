use soroban_sdk::{contract, contractimpl, contracttype, Address, Env};

use crate::interfaces::token_contract;

use super::value_token::MockValueTokenClient;

#[derive(Clone)]
#[contracttype]
enum DataKey {
    ValueToken,
    Valuation,
}

fn valuation(env: &Env) -> (i128, i128) {
    env.storage().instance().get(&DataKey::Valuation).unwrap()
}

/// Treasury that values every principal at a fixed `numerator / denominator`
/// rate and mints value tokens against deposits.
#[contract]
pub struct MockTreasury;

#[contractimpl]
impl MockTreasury {
    pub fn __constructor(env: Env, value_token: Address, numerator: i128, denominator: i128) {
        env.storage()
            .instance()
            .set(&DataKey::ValueToken, &value_token);
        env.storage()
            .instance()
            .set(&DataKey::Valuation, &(numerator, denominator));
    }

    pub fn value_of_token(env: Env, _token: Address, amount: i128) -> i128 {
        let (numerator, denominator) = valuation(&env);
        amount * numerator / denominator
    }

    pub fn deposit(env: Env, from: Address, amount: i128, token: Address, profit: i128) -> i128 {
        from.require_auth();

        let treasury = env.current_contract_address();
        token_contract::Client::new(&env, &token).transfer_from(&treasury, &from, &treasury, &amount);

        let send = Self::value_of_token(env.clone(), token, amount) - profit;
        let value_token: Address = env.storage().instance().get(&DataKey::ValueToken).unwrap();
        MockValueTokenClient::new(&env, &value_token).mint(&from, &send);

        send
    }
}
