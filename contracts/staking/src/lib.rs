#![no_std]
mod accounting;
mod contract;
mod error;
mod msg;
mod rebase;
mod storage;
mod warmup;

pub use contract::{Staking, StakingClient};
pub use error::ContractError;
pub use msg::ConfigResponse;
pub use storage::{CollaboratorRole, Collaborators, Config, ContractKind, Epoch};
pub use warmup::WarmupClaim;
