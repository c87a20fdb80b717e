use soroban_sdk::{contracttype, log, panic_with_error, symbol_short, Address, Env, Map, Symbol, Vec};

use tide::{
    ttl::{bump_instance, bump_persistent},
    utils::{AdminChange, ADMIN, PENDING_ADMIN},
};

use crate::{error::ContractError, warmup::WarmupClaim};

const CONFIG: Symbol = symbol_short!("CONFIG");
const EPOCH: Symbol = symbol_short!("EPOCH");
const TOTAL_BONUS: Symbol = symbol_short!("BONUS");
const COLLABORATORS: Symbol = symbol_short!("COLLAB");

#[derive(Clone)]
#[contracttype]
pub enum DataKey {
    Warmup(Address),
    StakeAmount(Address),
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Config {
    /// Token accepted on stake and paid out on unstake
    pub value_token: Address,
    /// Rebasing token handed out for staked value
    pub receipt_token: Address,
    /// Custody for receipt tokens during warmup, settable once
    pub warmup_contract: Option<Address>,
    /// Only caller allowed to move lock bonus, settable once
    pub locker: Option<Address>,
    pub distributor: Option<Address>,
    /// Callers that skip stake accounting on claim and unstake
    pub loan: Option<Address>,
    /// Number of epochs a deposit waits before it can be claimed
    pub warmup_period: u64,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Epoch {
    pub length: u64,
    pub number: u64,
    /// Tick at which the next rebase becomes effective
    pub end_block: u64,
    /// Surplus handed to the receipt token on the next rebase
    pub distribute: i128,
}

/// Slots filled through `set_contract`.
#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum ContractKind {
    Distributor = 0,
    WarmupContract = 1,
    Locker = 2,
}

#[contracttype]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum CollaboratorRole {
    FarmForInviter = 0,
    FarmForStaker = 1,
    InviterFarm = 2,
    PresaleRelease = 3,
}

impl CollaboratorRole {
    /// Roles that are paid the rebase reward on unstake.
    pub fn receives_rewards(&self) -> bool {
        matches!(
            self,
            CollaboratorRole::FarmForInviter | CollaboratorRole::InviterFarm
        )
    }
}

/// Optional farm collaborators. A role is only notified when it is both
/// enabled and has an address; the two are set independently.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Collaborators {
    pub addresses: Map<CollaboratorRole, Address>,
    pub enabled: Vec<CollaboratorRole>,
}

impl Collaborators {
    pub fn new(env: &Env) -> Self {
        Collaborators {
            addresses: Map::new(env),
            enabled: Vec::new(env),
        }
    }

    pub fn is_enabled(&self, role: CollaboratorRole) -> bool {
        self.enabled.contains(role)
    }

    pub fn set_enabled(&mut self, role: CollaboratorRole, enabled: bool) {
        match (self.enabled.first_index_of(role), enabled) {
            (None, true) => self.enabled.push_back(role),
            (Some(index), false) => {
                self.enabled.remove(index);
            }
            _ => {}
        }
    }

    /// Enabled roles that have an address configured.
    pub fn active(&self, env: &Env) -> Vec<(CollaboratorRole, Address)> {
        let mut active = Vec::new(env);
        for role in self.enabled.iter() {
            if let Some(address) = self.addresses.get(role) {
                active.push_back((role, address));
            }
        }
        active
    }
}

pub fn save_config(env: &Env, config: &Config) {
    env.storage().instance().set(&CONFIG, config);
    bump_instance(env);
}

pub fn get_config(env: &Env) -> Config {
    let config = env.storage().instance().get(&CONFIG).unwrap_or_else(|| {
        log!(env, "Staking: Config not set");
        panic_with_error!(env, ContractError::ConfigNotSet)
    });
    bump_instance(env);

    config
}

pub fn save_epoch(env: &Env, epoch: &Epoch) {
    env.storage().instance().set(&EPOCH, epoch);
}

pub fn get_epoch(env: &Env) -> Epoch {
    env.storage().instance().get(&EPOCH).unwrap_or_else(|| {
        log!(env, "Staking: Epoch not set");
        panic_with_error!(env, ContractError::EpochNotSet)
    })
}

pub fn save_total_bonus(env: &Env, total_bonus: i128) {
    env.storage().instance().set(&TOTAL_BONUS, &total_bonus);
}

pub fn get_total_bonus(env: &Env) -> i128 {
    env.storage().instance().get(&TOTAL_BONUS).unwrap_or(0)
}

pub fn save_collaborators(env: &Env, collaborators: &Collaborators) {
    env.storage().instance().set(&COLLABORATORS, collaborators);
}

pub fn get_collaborators(env: &Env) -> Collaborators {
    env.storage()
        .instance()
        .get(&COLLABORATORS)
        .unwrap_or_else(|| Collaborators::new(env))
}

pub fn save_warmup_claim(env: &Env, account: &Address, claim: &WarmupClaim) {
    let key = DataKey::Warmup(account.clone());
    env.storage().persistent().set(&key, claim);
    bump_persistent(env, &key);
}

/// A missing record reads as the default claim, whose zero expiry is never claimable.
pub fn get_warmup_claim(env: &Env, account: &Address) -> WarmupClaim {
    let key = DataKey::Warmup(account.clone());
    let claim = env.storage().persistent().get(&key).unwrap_or_default();
    bump_persistent(env, &key);

    claim
}

pub fn remove_warmup_claim(env: &Env, account: &Address) {
    env.storage()
        .persistent()
        .remove(&DataKey::Warmup(account.clone()));
}

pub fn save_stake_amount(env: &Env, account: &Address, amount: i128) {
    let key = DataKey::StakeAmount(account.clone());
    env.storage().persistent().set(&key, &amount);
    bump_persistent(env, &key);
}

pub fn get_stake_amount(env: &Env, account: &Address) -> i128 {
    let key = DataKey::StakeAmount(account.clone());
    let amount = env.storage().persistent().get(&key).unwrap_or(0);
    bump_persistent(env, &key);

    amount
}

pub mod utils {
    use super::*;

    pub fn save_admin(env: &Env, admin: &Address) {
        env.storage().instance().set(&ADMIN, admin);
    }

    pub fn get_admin(env: &Env) -> Result<Address, ContractError> {
        env.storage().instance().get(&ADMIN).ok_or_else(|| {
            log!(env, "Staking: Admin not set");
            ContractError::AdminNotSet
        })
    }

    /// Fails with `AccessDenied` unless `sender` is the stored admin.
    pub fn require_admin(env: &Env, sender: &Address) -> Result<(), ContractError> {
        sender.require_auth();
        if get_admin(env)? != *sender {
            log!(env, "Staking: You are not authorized!");
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
