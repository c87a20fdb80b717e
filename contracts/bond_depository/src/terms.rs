use soroban_sdk::{log, Env};

use tide::{
    scale::{
        MAX_ADJUSTMENT_DENOMINATOR, MAX_ADJUSTMENT_NUMERATOR, MAX_FEE, MAX_PAYOUT_CAP,
        VESTING_TERM_FLOOR,
    },
    utils::current_tick,
};

use crate::{
    error::ContractError,
    storage::{
        get_adjustment, get_terms, save_adjustment, save_terms, Adjustment, BondParameter, Terms,
    },
};

pub fn validate_vesting_term(env: &Env, vesting_term: u64) -> Result<(), ContractError> {
    if vesting_term < VESTING_TERM_FLOOR {
        log!(
            env,
            "Bond: Vesting must be longer than {} ticks",
            VESTING_TERM_FLOOR
        );
        return Err(ContractError::InvalidParameter);
    }
    Ok(())
}

fn validate_max_payout(env: &Env, max_payout: i128) -> Result<(), ContractError> {
    if !(0..=MAX_PAYOUT_CAP).contains(&max_payout) {
        log!(env, "Bond: Payout cannot be above 1 percent");
        return Err(ContractError::InvalidParameter);
    }
    Ok(())
}

fn validate_fee(env: &Env, fee: i128) -> Result<(), ContractError> {
    if !(0..=MAX_FEE).contains(&fee) {
        log!(env, "Bond: DAO fee cannot exceed payout");
        return Err(ContractError::InvalidParameter);
    }
    Ok(())
}

impl Terms {
    pub fn validate(&self, env: &Env) -> Result<(), ContractError> {
        if self.control_variable <= 0 || self.minimum_price < 0 || self.max_debt < 0 {
            log!(env, "Bond: Terms: Negative or empty parameters");
            return Err(ContractError::InvalidParameter);
        }
        validate_vesting_term(env, self.vesting_term)?;
        validate_max_payout(env, self.max_payout)?;
        validate_fee(env, self.fee)
    }

    /// Sets one field from an owner supplied value, with the same bounds as
    /// the initializer.
    pub fn apply(
        &mut self,
        env: &Env,
        parameter: BondParameter,
        input: i128,
    ) -> Result<(), ContractError> {
        match parameter {
            BondParameter::Vesting => {
                let vesting_term =
                    u64::try_from(input).map_err(|_| ContractError::InvalidParameter)?;
                validate_vesting_term(env, vesting_term)?;
                self.vesting_term = vesting_term;
            }
            BondParameter::Payout => {
                validate_max_payout(env, input)?;
                self.max_payout = input;
            }
            BondParameter::Fee => {
                validate_fee(env, input)?;
                self.fee = input;
            }
            BondParameter::Debt => {
                if input < 0 {
                    log!(env, "Bond: Max debt cannot be negative");
                    return Err(ContractError::InvalidParameter);
                }
                self.max_debt = input;
            }
        }
        Ok(())
    }
}

/// Largest step allowed for the given control variable, 2.5% of it.
pub fn max_adjustment_rate(control_variable: i128) -> Result<i128, ContractError> {
    control_variable
        .checked_mul(MAX_ADJUSTMENT_NUMERATOR)
        .map(|scaled| scaled / MAX_ADJUSTMENT_DENOMINATOR)
        .ok_or(ContractError::ArithmeticFault)
}

impl Adjustment {
    pub fn is_due(&self, tick: u64) -> bool {
        self.rate != 0 && tick >= self.last_block.saturating_add(self.buffer)
    }

    /// Moves `control_variable` one step toward the target and returns the
    /// new value. The schedule stops once the target is reached or crossed.
    pub fn step(&mut self, control_variable: i128, tick: u64) -> Result<i128, ContractError> {
        let stepped = if self.add {
            let stepped = control_variable
                .checked_add(self.rate)
                .ok_or(ContractError::ArithmeticFault)?;
            if stepped >= self.target {
                self.rate = 0;
            }
            stepped
        } else {
            let stepped = control_variable
                .checked_sub(self.rate)
                .filter(|stepped| *stepped >= 0)
                .ok_or(ContractError::ArithmeticFault)?;
            if stepped <= self.target {
                self.rate = 0;
            }
            stepped
        };
        self.last_block = tick;

        Ok(stepped)
    }
}

/// Applies one due adjustment step to the control variable.
pub fn adjust(env: &Env) -> Result<(), ContractError> {
    let mut adjustment = get_adjustment(env);
    let tick = current_tick(env);
    if !adjustment.is_due(tick) {
        return Ok(());
    }

    let mut terms = get_terms(env);
    let initial = terms.control_variable;
    terms.control_variable = adjustment.step(initial, tick)?;
    save_terms(env, &terms);
    save_adjustment(env, &adjustment);

    env.events().publish(
        ("bond", "control_variable_adjustment"),
        (
            initial,
            terms.control_variable,
            adjustment.rate,
            adjustment.add,
        ),
    );

    Ok(())
}
