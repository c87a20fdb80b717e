// A lot of this code is taken from the cosmwasm-std crate, which is licensed under the Apache
// License 2.0 - https://github.com/CosmWasm/cosmwasm.

use soroban_sdk::{Env, U256};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecimalError {
    DivideByZero,
    Negative,
    Overflow,
}

/// Fixed-point fraction with 18 decimal places backed by a host `U256`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd)]
pub struct Decimal256(U256);

impl Decimal256 {
    const DECIMAL_FRACTIONAL: u128 = 1_000_000_000_000_000_000u128; // 1*10**18

    fn decimal_fractional(env: &Env) -> U256 {
        U256::from_u128(env, Self::DECIMAL_FRACTIONAL)
    }

    /// The value scaled by 10^18, if it fits into 128 bits.
    pub fn atomics(&self) -> Option<u128> {
        self.0.to_u128()
    }

    pub fn checked_from_ratio(
        env: &Env,
        numerator: u128,
        denominator: u128,
    ) -> Result<Self, DecimalError> {
        if denominator == 0 {
            return Err(DecimalError::DivideByZero);
        }

        let ratio = U256::from_u128(env, numerator)
            .mul(&Self::decimal_fractional(env))
            .div(&U256::from_u128(env, denominator));

        Ok(Decimal256(ratio))
    }
}
