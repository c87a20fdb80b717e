use soroban_sdk::{contracttype, log, Env};

use crate::error::ContractError;

/// Deposit waiting out the warmup period.
#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct WarmupClaim {
    /// Value tokens deposited, refunded as-is on forfeit
    pub deposit: i128,
    /// Receipt share held in warmup custody
    pub gons: i128,
    /// Epoch from which the claim can be collected, 0 means never
    pub expiry: u64,
    /// Blocks new deposits into this claim
    pub lock: bool,
}

impl WarmupClaim {
    pub fn is_claimable(&self, epoch_number: u64) -> bool {
        self.expiry != 0 && epoch_number >= self.expiry
    }

    /// Adds a deposit and restarts the warmup from `epoch_number`.
    pub fn add_deposit(
        &mut self,
        env: &Env,
        amount: i128,
        gons: i128,
        epoch_number: u64,
        warmup_period: u64,
    ) -> Result<(), ContractError> {
        if self.lock {
            log!(env, "Staking: Stake: Deposits for account are locked");
            return Err(ContractError::DepositsLocked);
        }

        self.deposit = self
            .deposit
            .checked_add(amount)
            .ok_or(ContractError::ArithmeticFault)?;
        self.gons = self
            .gons
            .checked_add(gons)
            .ok_or(ContractError::ArithmeticFault)?;
        self.expiry = epoch_number
            .checked_add(warmup_period)
            .ok_or(ContractError::ArithmeticFault)?;

        Ok(())
    }

    pub fn toggle_lock(&mut self) {
        self.lock = !self.lock;
    }
}
