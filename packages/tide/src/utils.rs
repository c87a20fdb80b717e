use soroban_sdk::{contracttype, symbol_short, Address, Env, Symbol};

pub const ADMIN: Symbol = symbol_short!("ADMIN");
pub const PENDING_ADMIN: Symbol = symbol_short!("PENDADMIN");

// Validate if int value is bigger then 0
#[macro_export]
macro_rules! validate_int_parameters {
    ($($arg:expr),*) => {
        {
            $(
                let value: Option<i128> = Into::<Option<_>>::into($arg);
                if let Some(val) = value {
                    if val <= 0 {
                        panic!("value cannot be less than or equal zero")
                    }
                }
            )*
        }
    };
}

/// Pending two-step admin handover.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AdminChange {
    pub new_admin: Address,
    /// Ledger timestamp after which the proposal can no longer be accepted
    pub time_limit: Option<u64>,
}

impl AdminChange {
    pub fn is_expired(&self, env: &Env) -> bool {
        self.time_limit
            .is_some_and(|limit| env.ledger().timestamp() > limit)
    }
}

/// Current tick, the ledger sequence number.
pub fn current_tick(env: &Env) -> u64 {
    env.ledger().sequence() as u64
}
