use soroban_decimal::{decode_scaled, fraction};
use soroban_sdk::Env;

use tide::{
    interfaces::{bond_calculator_contract, token_contract},
    scale::{
        CONTROL_VARIABLE_DIVISOR, DECODE_SCALE_18, MAX_PAYOUT_DENOMINATOR, PAYOUT_RESCALE,
        RATIO_SCALE,
    },
};

use crate::{
    debt::current_debt,
    error::ContractError,
    storage::{get_config, get_terms, Config},
};

/// `debt * 1e9 / supply` through an 18-decimal fraction, floored.
pub fn ratio_of(env: &Env, debt: i128, supply: i128) -> Result<i128, ContractError> {
    let scaled_debt = debt
        .checked_mul(RATIO_SCALE)
        .ok_or(ContractError::ArithmeticFault)?;
    let ratio = fraction(env, scaled_debt, supply)?;
    Ok(decode_scaled(&ratio, DECODE_SCALE_18)?)
}

/// `max(minimum_price, control_variable * debt_ratio / 1e7)`.
pub fn native_price(
    control_variable: i128,
    debt_ratio: i128,
    minimum_price: i128,
) -> Result<i128, ContractError> {
    let price = control_variable
        .checked_mul(debt_ratio)
        .ok_or(ContractError::ArithmeticFault)?
        / CONTROL_VARIABLE_DIVISOR;
    Ok(price.max(minimum_price))
}

/// Value tokens bought by `value` at `price`: `value / price` as an
/// 18-decimal fraction, rescaled by 1e16.
pub fn payout_at(env: &Env, value: i128, price: i128) -> Result<i128, ContractError> {
    let quote = fraction(env, value, price)?;
    Ok(decode_scaled(&quote, PAYOUT_RESCALE)?)
}

fn value_supply(env: &Env, config: &Config) -> i128 {
    token_contract::Client::new(env, &config.value_token).total_supply()
}

/// Outstanding debt relative to the value token supply, scaled by 1e9.
pub fn debt_ratio(env: &Env) -> Result<i128, ContractError> {
    let config = get_config(env);
    ratio_of(env, current_debt(env)?, value_supply(env, &config))
}

/// Debt ratio in reference currency terms for liquidity pair bonds.
pub fn standardized_debt_ratio(env: &Env) -> Result<i128, ContractError> {
    let config = get_config(env);
    let ratio = debt_ratio(env)?;
    match &config.bond_calculator {
        Some(calculator) => {
            let markdown =
                bond_calculator_contract::Client::new(env, calculator).markdown(&config.principal);
            ratio
                .checked_mul(markdown)
                .map(|scaled| scaled / RATIO_SCALE)
                .ok_or(ContractError::ArithmeticFault)
        }
        None => Ok(ratio),
    }
}

/// Price in value tokens, floored at the minimum price.
pub fn bond_price(env: &Env) -> Result<i128, ContractError> {
    let terms = get_terms(env);
    native_price(
        terms.control_variable,
        debt_ratio(env)?,
        terms.minimum_price,
    )
}

/// Price in the reference currency: markdown for pair bonds, principal
/// decimals otherwise, divided by the price base.
pub fn bond_price_in_usd(env: &Env) -> Result<i128, ContractError> {
    let config = get_config(env);
    let price = bond_price(env)?;
    let factor = match &config.bond_calculator {
        Some(calculator) => {
            bond_calculator_contract::Client::new(env, calculator).markdown(&config.principal)
        }
        None => {
            let decimals = token_contract::Client::new(env, &config.principal).decimals();
            10_i128
                .checked_pow(decimals)
                .ok_or(ContractError::ArithmeticFault)?
        }
    };

    price
        .checked_mul(factor)
        .and_then(|scaled| scaled.checked_div(config.price_base))
        .ok_or(ContractError::ArithmeticFault)
}

pub fn payout_for(env: &Env, value: i128) -> Result<i128, ContractError> {
    payout_at(env, value, bond_price(env)?)
}

/// Largest single payout: `supply * max_payout / 100_000`.
pub fn max_payout(env: &Env) -> Result<i128, ContractError> {
    let config = get_config(env);
    value_supply(env, &config)
        .checked_mul(get_terms(env).max_payout)
        .map(|scaled| scaled / MAX_PAYOUT_DENOMINATOR)
        .ok_or(ContractError::ArithmeticFault)
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn quote_from_control_variable_and_ratio() {
        assert_eq!(native_price(400_000, 50_000, 100), Ok(2_000));
    }

    #[test_case(400_000, 50_000, 5_000, 5_000 ; "floored at minimum")]
    #[test_case(400_000, 0, 100, 100 ; "no debt")]
    #[test_case(1_000_000, 250_000_000, 0, 25_000_000 ; "high ratio")]
    fn native_price_floor(cv: i128, ratio: i128, min: i128, expected: i128) {
        assert_eq!(native_price(cv, ratio, min), Ok(expected));
    }

    #[test]
    fn ratio_is_scaled_by_1e9() {
        let env = Env::default();
        // 50 debt against 1_000_000 supply is 0.005%
        assert_eq!(ratio_of(&env, 50, 1_000_000), Ok(50_000));
        assert_eq!(ratio_of(&env, 0, 1_000_000), Ok(0));
    }

    #[test]
    fn ratio_against_empty_supply_faults() {
        let env = Env::default();
        assert_eq!(
            ratio_of(&env, 10, 0),
            Err(ContractError::ArithmeticFault)
        );
    }

    #[test]
    fn payout_rescales_by_1e16() {
        let env = Env::default();
        // 1e9 value at a price of 2000 buys 1e9 * 100 / 2000
        assert_eq!(payout_at(&env, 1_000_000_000, 2_000), Ok(50_000_000));
        assert_eq!(payout_at(&env, 100_000_000, 2_000), Ok(5_000_000));
    }
}
