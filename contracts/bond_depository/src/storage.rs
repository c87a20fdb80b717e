use soroban_sdk::{contracttype, log, panic_with_error, symbol_short, Address, Env, Symbol};

use tide::{
    scale::BPS_DENOMINATOR,
    ttl::{bump_instance, bump_persistent},
    utils::{AdminChange, ADMIN, PENDING_ADMIN},
};

use crate::error::ContractError;

const CONFIG: Symbol = symbol_short!("CONFIG");
const TERMS: Symbol = symbol_short!("TERMS");
const ADJUSTMENT: Symbol = symbol_short!("ADJUST");
const DEBT: Symbol = symbol_short!("DEBT");

#[derive(Clone)]
#[contracttype]
pub enum DataKey {
    Bond(Address),
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Config {
    /// Token paid out to bonders
    pub value_token: Address,
    /// Token accepted as bond payment
    pub principal: Address,
    pub treasury: Address,
    /// Receives the bond fee
    pub dao: Address,
    /// Set for liquidity pair bonds, which are valued through a markdown
    pub bond_calculator: Option<Address>,
    pub staking: Option<Address>,
    pub staking_helper: Option<Address>,
    /// Stake redeemed payouts through the helper instead of the staking contract
    pub use_helper: bool,
    /// Divisor of the price quoted in the reference currency
    pub price_base: i128,
}

#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Terms {
    /// Scaling coefficient of the bond price
    pub control_variable: i128,
    /// Ticks a bond takes to vest fully
    pub vesting_term: u64,
    /// Floor of the native bond price
    pub minimum_price: i128,
    /// Largest payout in thousandths of a percent of the value token supply
    pub max_payout: i128,
    /// Share of the payout-equivalent sent to the DAO, in basis points
    pub fee: i128,
    pub max_debt: i128,
}

#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Adjustment {
    /// Direction of the walk, `true` raises the control variable
    pub add: bool,
    /// Step per adjustment, 0 once the target is reached
    pub rate: i128,
    pub target: i128,
    /// Minimum ticks between two steps
    pub buffer: u64,
    pub last_block: u64,
}

#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Bond {
    /// Value tokens still to be paid out
    pub payout: i128,
    /// Ticks left until fully vested
    pub vesting: u64,
    pub last_block: u64,
    /// Price in the reference currency at the last deposit
    pub price_paid: i128,
}

impl Bond {
    /// Vested share in basis points since the last interaction.
    pub fn percent_vested(&self, tick: u64) -> i128 {
        if self.vesting == 0 {
            return 0;
        }
        let elapsed = tick.saturating_sub(self.last_block) as i128;
        elapsed * BPS_DENOMINATOR / self.vesting as i128
    }
}

#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct DebtState {
    /// Value of bonds sold and not yet decayed
    pub total_debt: i128,
    pub last_decay: u64,
}

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum BondParameter {
    Vesting = 0,
    Payout = 1,
    Fee = 2,
    Debt = 3,
}

pub fn save_config(env: &Env, config: &Config) {
    env.storage().instance().set(&CONFIG, config);
    bump_instance(env);
}

pub fn get_config(env: &Env) -> Config {
    let config = env.storage().instance().get(&CONFIG).unwrap_or_else(|| {
        log!(env, "Bond: Config not set");
        panic_with_error!(env, ContractError::ConfigNotSet)
    });
    bump_instance(env);

    config
}

pub fn save_terms(env: &Env, terms: &Terms) {
    env.storage().instance().set(&TERMS, terms);
}

/// Zeroed until `initialize_bond_terms` has run.
pub fn get_terms(env: &Env) -> Terms {
    env.storage().instance().get(&TERMS).unwrap_or_default()
}

pub fn save_adjustment(env: &Env, adjustment: &Adjustment) {
    env.storage().instance().set(&ADJUSTMENT, adjustment);
}

pub fn get_adjustment(env: &Env) -> Adjustment {
    env.storage().instance().get(&ADJUSTMENT).unwrap_or_default()
}

pub fn save_debt(env: &Env, debt: &DebtState) {
    env.storage().instance().set(&DEBT, debt);
}

pub fn get_debt(env: &Env) -> DebtState {
    env.storage().instance().get(&DEBT).unwrap_or_default()
}

pub fn save_bond(env: &Env, depositor: &Address, bond: &Bond) {
    let key = DataKey::Bond(depositor.clone());
    env.storage().persistent().set(&key, bond);
    bump_persistent(env, &key);
}

pub fn get_bond(env: &Env, depositor: &Address) -> Option<Bond> {
    let key = DataKey::Bond(depositor.clone());
    let bond = env.storage().persistent().get(&key);
    bump_persistent(env, &key);

    bond
}

pub fn remove_bond(env: &Env, depositor: &Address) {
    env.storage()
        .persistent()
        .remove(&DataKey::Bond(depositor.clone()));
}

pub mod utils {
    use super::*;

    pub fn save_admin(env: &Env, admin: &Address) {
        env.storage().instance().set(&ADMIN, admin);
    }

    pub fn get_admin(env: &Env) -> Result<Address, ContractError> {
        env.storage().instance().get(&ADMIN).ok_or_else(|| {
            log!(env, "Bond: Admin not set");
            ContractError::AdminNotSet
        })
    }

    /// Fails with `AccessDenied` unless `sender` is the stored admin.
    pub fn require_admin(env: &Env, sender: &Address) -> Result<(), ContractError> {
        sender.require_auth();
        if get_admin(env)? != *sender {
            log!(env, "Bond: You are not authorized!");
            return Err(ContractError::AccessDenied);
        }
        Ok(())
    }

    pub fn save_pending_admin(env: &Env, change: &AdminChange) {
        env.storage().instance().set(&PENDING_ADMIN, change);
    }

    pub fn get_pending_admin(env: &Env) -> Option<AdminChange> {
        env.storage().instance().get(&PENDING_ADMIN)
    }

    pub fn remove_pending_admin(env: &Env) {
        env.storage().instance().remove(&PENDING_ADMIN);
    }
}
