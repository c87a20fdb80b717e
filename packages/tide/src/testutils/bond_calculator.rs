use soroban_sdk::{contract, contractimpl, symbol_short, Address, Env, Symbol};

const MARKDOWN: Symbol = symbol_short!("MARKDOWN");

/// Returns a configured markdown for every liquidity pair.
#[contract]
pub struct MockBondCalculator;

#[contractimpl]
impl MockBondCalculator {
    pub fn __constructor(env: Env, markdown: i128) {
        env.storage().instance().set(&MARKDOWN, &markdown);
    }

    pub fn markdown(env: Env, _pair: Address) -> i128 {
        env.storage().instance().get(&MARKDOWN).unwrap()
    }
}
