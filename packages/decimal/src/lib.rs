// A lot of this code is taken from the cosmwasm-std crate, which is licensed under the Apache
// License 2.0 - https://github.com/CosmWasm/cosmwasm.

#![no_std]

mod decimal256;

pub use decimal256::{Decimal256, DecimalError};

use soroban_sdk::Env;

/// Builds the 18-decimal fraction `numerator / denominator`.
///
/// Both sides are token-sized integers, so the intermediate `numerator * 10^18`
/// is computed in 256 bits and never overflows. Negative inputs and a zero
/// denominator are rejected.
pub fn fraction(env: &Env, numerator: i128, denominator: i128) -> Result<Decimal256, DecimalError> {
    if numerator < 0 || denominator < 0 {
        return Err(DecimalError::Negative);
    }
    Decimal256::checked_from_ratio(env, numerator as u128, denominator as u128)
}

/// Decodes a fraction to its 18-decimal integer representation and divides it
/// by `divisor`, e.g. `fraction(a, b).decode_with_18() / 10^16`.
pub fn decode_scaled(value: &Decimal256, divisor: u128) -> Result<i128, DecimalError> {
    if divisor == 0 {
        return Err(DecimalError::DivideByZero);
    }
    let atomics = value.atomics().ok_or(DecimalError::Overflow)?;
    i128::try_from(atomics / divisor).map_err(|_| DecimalError::Overflow)
}
