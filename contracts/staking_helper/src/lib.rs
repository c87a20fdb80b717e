#![no_std]
mod contract;
mod error;
mod storage;

pub use contract::{StakingHelper, StakingHelperClient};
pub use error::ContractError;
pub use storage::Config;
