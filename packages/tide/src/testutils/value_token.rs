use soroban_sdk::{contract, contractimpl, contracttype, Address, Env, String};
use soroban_token_sdk::{metadata::TokenMetadata, TokenUtils};

#[derive(Clone)]
#[contracttype]
enum DataKey {
    Balance(Address),
    Allowance(Address, Address),
    TotalSupply,
}

fn read_balance(env: &Env, id: &Address) -> i128 {
    env.storage()
        .persistent()
        .get(&DataKey::Balance(id.clone()))
        .unwrap_or(0)
}

fn write_balance(env: &Env, id: &Address, amount: i128) {
    env.storage()
        .persistent()
        .set(&DataKey::Balance(id.clone()), &amount);
}

fn read_total_supply(env: &Env) -> i128 {
    env.storage()
        .instance()
        .get(&DataKey::TotalSupply)
        .unwrap_or(0)
}

fn move_balance(env: &Env, from: &Address, to: &Address, amount: i128) {
    let from_balance = read_balance(env, from);
    if from_balance < amount {
        panic!("balance is not sufficient to spend: {} < {}", from_balance, amount);
    }
    write_balance(env, from, from_balance - amount);
    write_balance(env, to, read_balance(env, to) + amount);
    TokenUtils::new(env)
        .events()
        .transfer(from.clone(), to.clone(), amount);
}

/// Fungible value token with an uncapped, unauthenticated `mint` for tests.
#[contract]
pub struct MockValueToken;

#[contractimpl]
impl MockValueToken {
    pub fn __constructor(env: Env, decimals: u32, name: String, symbol: String) {
        TokenUtils::new(&env).metadata().set_metadata(&TokenMetadata {
            decimal: decimals,
            name,
            symbol,
        });
        env.storage().instance().set(&DataKey::TotalSupply, &0i128);
    }

    pub fn mint(env: Env, to: Address, amount: i128) {
        write_balance(&env, &to, read_balance(&env, &to) + amount);
        env.storage()
            .instance()
            .set(&DataKey::TotalSupply, &(read_total_supply(&env) + amount));
        TokenUtils::new(&env)
            .events()
            .mint(env.current_contract_address(), to, amount);
    }

    pub fn balance(env: Env, id: Address) -> i128 {
        read_balance(&env, &id)
    }

    pub fn transfer(env: Env, from: Address, to: Address, amount: i128) {
        from.require_auth();
        move_balance(&env, &from, &to, amount);
    }

    pub fn transfer_from(env: Env, spender: Address, from: Address, to: Address, amount: i128) {
        spender.require_auth();
        let key = DataKey::Allowance(from.clone(), spender);
        let allowance: i128 = env.storage().temporary().get(&key).unwrap_or(0);
        if allowance < amount {
            panic!("insufficient allowance: {} < {}", allowance, amount);
        }
        env.storage().temporary().set(&key, &(allowance - amount));
        move_balance(&env, &from, &to, amount);
    }

    pub fn approve(env: Env, from: Address, spender: Address, amount: i128, expiration_ledger: u32) {
        from.require_auth();
        env.storage()
            .temporary()
            .set(&DataKey::Allowance(from.clone(), spender.clone()), &amount);
        TokenUtils::new(&env)
            .events()
            .approve(from, spender, amount, expiration_ledger);
    }

    pub fn allowance(env: Env, from: Address, spender: Address) -> i128 {
        env.storage()
            .temporary()
            .get(&DataKey::Allowance(from, spender))
            .unwrap_or(0)
    }

    pub fn total_supply(env: Env) -> i128 {
        read_total_supply(&env)
    }

    pub fn decimals(env: Env) -> u32 {
        TokenUtils::new(&env).metadata().get_metadata().decimal
    }
}
