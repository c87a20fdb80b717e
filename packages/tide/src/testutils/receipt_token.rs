use soroban_sdk::{contract, contractimpl, contracttype, Address, Env};
use soroban_token_sdk::TokenUtils;

/// 5M receipt tokens with 9 decimals minted to the staking contract on `initialize`.
pub const INITIAL_FRAGMENTS: i128 = 5_000_000_000_000_000;
/// Fixed gons pool; each account's share of it never changes on rebase.
pub const TOTAL_GONS: i128 = INITIAL_FRAGMENTS * 1_000_000_000_000;

#[derive(Clone)]
#[contracttype]
enum DataKey {
    Gons(Address),
    Allowance(Address, Address),
    TotalSupply,
    Staking,
    InitialIndex,
    IndexGons,
    LastRebase,
}

fn total_supply(env: &Env) -> i128 {
    env.storage()
        .instance()
        .get(&DataKey::TotalSupply)
        .unwrap_or(INITIAL_FRAGMENTS)
}

fn gons_per_fragment(env: &Env) -> i128 {
    TOTAL_GONS / total_supply(env)
}

fn read_gons(env: &Env, id: &Address) -> i128 {
    env.storage()
        .persistent()
        .get(&DataKey::Gons(id.clone()))
        .unwrap_or(0)
}

fn write_gons(env: &Env, id: &Address, gons: i128) {
    env.storage()
        .persistent()
        .set(&DataKey::Gons(id.clone()), &gons);
}

fn move_fragments(env: &Env, from: &Address, to: &Address, amount: i128) {
    let gons = amount * gons_per_fragment(env);
    let from_gons = read_gons(env, from);
    if from_gons < gons {
        panic!("balance is not sufficient to spend: {} < {}", from_gons, gons);
    }
    write_gons(env, from, from_gons - gons);
    write_gons(env, to, read_gons(env, to) + gons);
    TokenUtils::new(env)
        .events()
        .transfer(from.clone(), to.clone(), amount);
}

/// Elastic-supply receipt token in the gons style: balances are
/// `gons / gons_per_fragment` and a rebase only changes `gons_per_fragment`.
#[contract]
pub struct MockReceiptToken;

#[contractimpl]
impl MockReceiptToken {
    pub fn __constructor(env: Env, initial_index: i128) {
        env.storage()
            .instance()
            .set(&DataKey::TotalSupply, &INITIAL_FRAGMENTS);
        env.storage()
            .instance()
            .set(&DataKey::InitialIndex, &initial_index);
    }

    /// Hands the whole initial supply to the staking contract.
    pub fn initialize(env: Env, staking: Address) {
        write_gons(&env, &staking, TOTAL_GONS);
        env.storage().instance().set(&DataKey::Staking, &staking);
        let initial_index: i128 = env
            .storage()
            .instance()
            .get(&DataKey::InitialIndex)
            .unwrap_or(0);
        env.storage().instance().set(
            &DataKey::IndexGons,
            &(initial_index * gons_per_fragment(&env)),
        );
    }

    pub fn gons_for_balance(env: Env, amount: i128) -> i128 {
        amount * gons_per_fragment(&env)
    }

    pub fn balance_for_gons(env: Env, gons: i128) -> i128 {
        gons / gons_per_fragment(&env)
    }

    pub fn index(env: Env) -> i128 {
        let index_gons: i128 = env
            .storage()
            .instance()
            .get(&DataKey::IndexGons)
            .unwrap_or(0);
        index_gons / gons_per_fragment(&env)
    }

    pub fn circulating_supply(env: Env) -> i128 {
        let staking: Option<Address> = env.storage().instance().get(&DataKey::Staking);
        let held = staking
            .map(|staking| read_gons(&env, &staking) / gons_per_fragment(&env))
            .unwrap_or(0);
        total_supply(&env) - held
    }

    pub fn rebase(env: Env, profit: i128, epoch: u64) -> i128 {
        let staking: Address = env.storage().instance().get(&DataKey::Staking).unwrap();
        staking.require_auth();

        env.storage()
            .instance()
            .set(&DataKey::LastRebase, &(profit, epoch));

        let supply = total_supply(&env);
        if profit == 0 {
            return supply;
        }

        let circulating = Self::circulating_supply(env.clone());
        let rebase_amount = if circulating > 0 {
            profit * supply / circulating
        } else {
            profit
        };
        let new_supply = supply + rebase_amount;
        env.storage()
            .instance()
            .set(&DataKey::TotalSupply, &new_supply);

        new_supply
    }

    /// Arguments of the most recent `rebase` call.
    pub fn last_rebase(env: Env) -> Option<(i128, u64)> {
        env.storage().instance().get(&DataKey::LastRebase)
    }

    pub fn total_supply(env: Env) -> i128 {
        total_supply(&env)
    }

    pub fn balance(env: Env, id: Address) -> i128 {
        read_gons(&env, &id) / gons_per_fragment(&env)
    }

    pub fn transfer(env: Env, from: Address, to: Address, amount: i128) {
        from.require_auth();
        move_fragments(&env, &from, &to, amount);
    }

    pub fn transfer_from(env: Env, spender: Address, from: Address, to: Address, amount: i128) {
        spender.require_auth();
        let key = DataKey::Allowance(from.clone(), spender);
        let allowance: i128 = env.storage().temporary().get(&key).unwrap_or(0);
        if allowance < amount {
            panic!("insufficient allowance: {} < {}", allowance, amount);
        }
        env.storage().temporary().set(&key, &(allowance - amount));
        move_fragments(&env, &from, &to, amount);
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
}
