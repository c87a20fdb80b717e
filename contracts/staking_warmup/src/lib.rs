#![no_std]
mod contract;
mod error;
mod storage;

pub use contract::{StakingWarmup, StakingWarmupClient};
pub use error::ContractError;
pub use storage::Config;
