#![no_std]
mod contract;
mod debt;
mod error;
mod msg;
mod pricing;
mod storage;
mod terms;

pub use contract::{BondDepository, BondDepositoryClient};
pub use error::ContractError;
pub use msg::ConfigResponse;
pub use storage::{Adjustment, Bond, BondParameter, Config, DebtState, Terms};
