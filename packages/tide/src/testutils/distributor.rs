use soroban_sdk::{contract, contractimpl, contracttype, Address, Env};

use super::value_token::MockValueTokenClient;

#[derive(Clone)]
#[contracttype]
enum DataKey {
    ValueToken,
    Recipient,
    Reward,
    Calls,
}

/// Mints a fixed reward to the recipient on every `distribute` call.
#[contract]
pub struct MockDistributor;

#[contractimpl]
impl MockDistributor {
    pub fn __constructor(env: Env, value_token: Address, recipient: Address, reward: i128) {
        env.storage()
            .instance()
            .set(&DataKey::ValueToken, &value_token);
        env.storage().instance().set(&DataKey::Recipient, &recipient);
        env.storage().instance().set(&DataKey::Reward, &reward);
        env.storage().instance().set(&DataKey::Calls, &0u32);
    }

    pub fn distribute(env: Env) -> bool {
        let value_token: Address = env.storage().instance().get(&DataKey::ValueToken).unwrap();
        let recipient: Address = env.storage().instance().get(&DataKey::Recipient).unwrap();
        let reward: i128 = env.storage().instance().get(&DataKey::Reward).unwrap();
        if reward > 0 {
            MockValueTokenClient::new(&env, &value_token).mint(&recipient, &reward);
        }

        let calls: u32 = env.storage().instance().get(&DataKey::Calls).unwrap();
        env.storage().instance().set(&DataKey::Calls, &(calls + 1));
        true
    }

    pub fn calls(env: Env) -> u32 {
        env.storage().instance().get(&DataKey::Calls).unwrap()
    }
}
