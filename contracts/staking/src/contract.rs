use soroban_sdk::{contract, contractimpl, contractmeta, log, Address, Env};

use tide::{
    interfaces::{receipt_contract, token_contract, warmup_contract},
    utils::AdminChange,
    validate_int_parameters,
};

use crate::{
    accounting::{apply_stake_change, notify_stake_change, release_reward, StakeChange},
    error::ContractError,
    msg::ConfigResponse,
    rebase::{contract_balance, rebase_epoch},
    storage::{
        get_collaborators, get_config, get_epoch, get_stake_amount, get_total_bonus,
        get_warmup_claim, remove_warmup_claim, save_collaborators, save_config, save_epoch,
        save_total_bonus, save_warmup_claim,
        utils::{
            get_admin, get_pending_admin, remove_pending_admin, require_admin, save_admin,
            save_pending_admin,
        },
        CollaboratorRole, Collaborators, Config, ContractKind, Epoch,
    },
    warmup::WarmupClaim,
};

// Metadata that is added on to the WASM custom section
contractmeta!(
    key = "Description",
    val = "Tide Protocol rebasing staking vault"
);

#[contract]
pub struct Staking;

pub trait StakingTrait {
    /// Rebases when due, then books `amount` into the recipient's warmup claim.
    fn stake(
        env: Env,
        sender: Address,
        amount: i128,
        recipient: Address,
    ) -> Result<bool, ContractError>;

    /// Moves a matured warmup claim to the recipient. Does nothing before expiry.
    fn claim(env: Env, sender: Address, recipient: Address) -> Result<(), ContractError>;

    /// Drops the sender's warmup claim and refunds the original deposit.
    fn forfeit(env: Env, sender: Address) -> Result<(), ContractError>;

    fn toggle_deposit_lock(env: Env, sender: Address) -> Result<(), ContractError>;

    fn unstake(
        env: Env,
        sender: Address,
        amount: i128,
        trigger: bool,
    ) -> Result<(), ContractError>;

    /// Returns `true` when an epoch was closed.
    fn rebase(env: Env) -> Result<bool, ContractError>;

    fn give_lock_bonus(env: Env, sender: Address, amount: i128) -> Result<(), ContractError>;

    fn return_lock_bonus(env: Env, sender: Address, amount: i128) -> Result<(), ContractError>;

    // ADMIN

    fn set_contract(
        env: Env,
        sender: Address,
        kind: ContractKind,
        address: Address,
    ) -> Result<(), ContractError>;

    fn set_warmup(env: Env, sender: Address, warmup_period: u64) -> Result<(), ContractError>;

    fn set_loan(env: Env, sender: Address, loan: Address) -> Result<(), ContractError>;

    fn set_collaborator(
        env: Env,
        sender: Address,
        role: CollaboratorRole,
        address: Address,
    ) -> Result<(), ContractError>;

    fn toggle_collaborator(
        env: Env,
        sender: Address,
        role: CollaboratorRole,
        enabled: bool,
    ) -> Result<(), ContractError>;

    fn propose_admin(
        env: Env,
        new_admin: Address,
        time_limit: Option<u64>,
    ) -> Result<Address, ContractError>;

    fn revoke_admin_change(env: Env) -> Result<(), ContractError>;

    fn accept_admin(env: Env) -> Result<Address, ContractError>;

    // QUERIES

    fn index(env: Env) -> i128;

    fn contract_balance(env: Env) -> Result<i128, ContractError>;

    fn query_epoch(env: Env) -> Epoch;

    fn query_warmup_info(env: Env, account: Address) -> WarmupClaim;

    fn query_stake_amount(env: Env, account: Address) -> i128;

    fn query_collaborators(env: Env) -> Collaborators;

    fn query_total_bonus(env: Env) -> i128;

    fn query_config(env: Env) -> ConfigResponse;

    fn query_admin(env: Env) -> Result<Address, ContractError>;
}

#[contractimpl]
impl Staking {
    #[allow(clippy::too_many_arguments)]
    pub fn __constructor(
        env: Env,
        admin: Address,
        value_token: Address,
        receipt_token: Address,
        epoch_length: u64,
        first_epoch_number: u64,
        first_epoch_block: u64,
    ) {
        validate_int_parameters!(epoch_length as i128);

        save_admin(&env, &admin);
        save_config(
            &env,
            &Config {
                value_token,
                receipt_token: receipt_token.clone(),
                warmup_contract: None,
                locker: None,
                distributor: None,
                loan: None,
                warmup_period: 0,
            },
        );
        save_epoch(
            &env,
            &Epoch {
                length: epoch_length,
                number: first_epoch_number,
                end_block: first_epoch_block,
                distribute: 0,
            },
        );
        save_total_bonus(&env, 0);
        save_collaborators(&env, &Collaborators::new(&env));

        env.events()
            .publish(("initialize", "Tide staking contract"), receipt_token);
    }
}

#[contractimpl]
impl StakingTrait for Staking {
    fn stake(
        env: Env,
        sender: Address,
        amount: i128,
        recipient: Address,
    ) -> Result<bool, ContractError> {
        sender.require_auth();

        if amount < 0 {
            log!(&env, "Staking: Stake: Amount cannot be negative");
            return Err(ContractError::InvalidAmount);
        }
        ensure_external(&env, &recipient)?;

        rebase_epoch(&env)?;

        let config = get_config(&env);
        let warmup_contract = warmup_contract_of(&env, &config)?;
        let receipt = receipt_contract::Client::new(&env, &config.receipt_token);
        let epoch = get_epoch(&env);

        let mut claim = get_warmup_claim(&env, &recipient);
        claim.add_deposit(
            &env,
            amount,
            receipt.gons_for_balance(&amount),
            epoch.number,
            config.warmup_period,
        )?;
        save_warmup_claim(&env, &recipient, &claim);

        let this = env.current_contract_address();
        token_contract::Client::new(&env, &config.value_token).transfer_from(
            &this,
            &sender,
            &this,
            &amount,
        );
        receipt.transfer(&this, &warmup_contract, &amount);

        env.events()
            .publish(("staking", "stake"), (amount, recipient));

        Ok(true)
    }

    fn claim(env: Env, sender: Address, recipient: Address) -> Result<(), ContractError> {
        sender.require_auth();

        let claim = get_warmup_claim(&env, &recipient);
        if !claim.is_claimable(get_epoch(&env).number) {
            return Ok(());
        }

        let config = get_config(&env);
        let warmup_contract = warmup_contract_of(&env, &config)?;
        let amount = receipt_contract::Client::new(&env, &config.receipt_token)
            .balance_for_gons(&claim.gons);

        remove_warmup_claim(&env, &recipient);
        let staked = if is_loan(&config, &sender) {
            None
        } else {
            Some(apply_stake_change(
                &env,
                &recipient,
                StakeChange::Increase(amount),
            )?)
        };

        warmup_contract::Client::new(&env, &warmup_contract).retrieve(&recipient, &amount);
        if let Some(staked) = staked {
            notify_stake_change(&env, &recipient, staked);
        }

        env.events()
            .publish(("staking", "claim"), (amount, recipient));

        Ok(())
    }

    fn forfeit(env: Env, sender: Address) -> Result<(), ContractError> {
        sender.require_auth();

        let config = get_config(&env);
        let warmup_contract = warmup_contract_of(&env, &config)?;
        let claim = get_warmup_claim(&env, &sender);
        remove_warmup_claim(&env, &sender);

        let this = env.current_contract_address();
        let amount = receipt_contract::Client::new(&env, &config.receipt_token)
            .balance_for_gons(&claim.gons);
        warmup_contract::Client::new(&env, &warmup_contract).retrieve(&this, &amount);
        token_contract::Client::new(&env, &config.value_token).transfer(
            &this,
            &sender,
            &claim.deposit,
        );

        env.events()
            .publish(("staking", "forfeit"), (claim.deposit, sender));

        Ok(())
    }

    fn toggle_deposit_lock(env: Env, sender: Address) -> Result<(), ContractError> {
        sender.require_auth();

        let mut claim = get_warmup_claim(&env, &sender);
        claim.toggle_lock();
        save_warmup_claim(&env, &sender, &claim);

        env.events()
            .publish(("staking", "deposit_lock"), (sender, claim.lock));

        Ok(())
    }

    fn unstake(
        env: Env,
        sender: Address,
        amount: i128,
        trigger: bool,
    ) -> Result<(), ContractError> {
        sender.require_auth();

        if amount < 0 {
            log!(&env, "Staking: Unstake: Amount cannot be negative");
            return Err(ContractError::InvalidAmount);
        }
        if trigger {
            rebase_epoch(&env)?;
        }

        let config = get_config(&env);
        let receipt = receipt_contract::Client::new(&env, &config.receipt_token);

        // (new stake, reward) for accounted stakers
        let accounted = if is_loan(&config, &sender) {
            None
        } else {
            let staked = get_stake_amount(&env, &sender);
            if amount > staked {
                log!(
                    &env,
                    "Staking: Unstake: Amount {} exceeds stake {}",
                    amount,
                    staked
                );
                return Err(ContractError::ArithmeticFault);
            }
            let reward = receipt
                .balance(&sender)
                .checked_sub(staked)
                .filter(|reward| *reward >= 0)
                .ok_or_else(|| {
                    log!(&env, "Staking: Unstake: Receipt balance below recorded stake");
                    ContractError::ArithmeticFault
                })?;
            let left = apply_stake_change(&env, &sender, StakeChange::Decrease(amount))?;
            Some((left, reward))
        };
        let reward = accounted.map_or(0, |(_, reward)| reward);
        let pulled = amount
            .checked_add(reward)
            .ok_or(ContractError::ArithmeticFault)?;

        if let Some((left, reward)) = accounted {
            notify_stake_change(&env, &sender, left);
            release_reward(&env, &sender, reward);
        }

        let this = env.current_contract_address();
        receipt.transfer_from(&this, &sender, &this, &pulled);
        token_contract::Client::new(&env, &config.value_token).transfer(&this, &sender, &amount);

        env.events()
            .publish(("staking", "unstake"), (amount, trigger));

        Ok(())
    }

    fn rebase(env: Env) -> Result<bool, ContractError> {
        rebase_epoch(&env)
    }

    fn give_lock_bonus(env: Env, sender: Address, amount: i128) -> Result<(), ContractError> {
        let config = get_config(&env);
        let locker = require_locker(&env, &config, &sender)?;
        if amount < 0 {
            log!(&env, "Staking: Give lock bonus: Amount cannot be negative");
            return Err(ContractError::InvalidAmount);
        }

        let total_bonus = get_total_bonus(&env)
            .checked_add(amount)
            .ok_or(ContractError::ArithmeticFault)?;
        save_total_bonus(&env, total_bonus);

        receipt_contract::Client::new(&env, &config.receipt_token).transfer(
            &env.current_contract_address(),
            &locker,
            &amount,
        );

        Ok(())
    }

    fn return_lock_bonus(env: Env, sender: Address, amount: i128) -> Result<(), ContractError> {
        let config = get_config(&env);
        let locker = require_locker(&env, &config, &sender)?;
        if amount < 0 {
            log!(&env, "Staking: Return lock bonus: Amount cannot be negative");
            return Err(ContractError::InvalidAmount);
        }

        let total_bonus = get_total_bonus(&env)
            .checked_sub(amount)
            .filter(|left| *left >= 0)
            .ok_or_else(|| {
                log!(&env, "Staking: Return lock bonus: More than was given");
                ContractError::ArithmeticFault
            })?;
        save_total_bonus(&env, total_bonus);

        let this = env.current_contract_address();
        receipt_contract::Client::new(&env, &config.receipt_token).transfer_from(
            &this, &locker, &this, &amount,
        );

        Ok(())
    }

    fn set_contract(
        env: Env,
        sender: Address,
        kind: ContractKind,
        address: Address,
    ) -> Result<(), ContractError> {
        require_admin(&env, &sender)?;
        ensure_external(&env, &address)?;

        let mut config = get_config(&env);
        match kind {
            ContractKind::Distributor => config.distributor = Some(address.clone()),
            ContractKind::WarmupContract => {
                set_once(&env, &mut config.warmup_contract, address.clone())?
            }
            ContractKind::Locker => set_once(&env, &mut config.locker, address.clone())?,
        }
        save_config(&env, &config);

        env.events()
            .publish(("set_contract", kind as u32), address);

        Ok(())
    }

    fn set_warmup(env: Env, sender: Address, warmup_period: u64) -> Result<(), ContractError> {
        require_admin(&env, &sender)?;

        let mut config = get_config(&env);
        config.warmup_period = warmup_period;
        save_config(&env, &config);

        env.events()
            .publish(("set_warmup", "period"), warmup_period);

        Ok(())
    }

    fn set_loan(env: Env, sender: Address, loan: Address) -> Result<(), ContractError> {
        require_admin(&env, &sender)?;
        ensure_external(&env, &loan)?;

        let mut config = get_config(&env);
        config.loan = Some(loan.clone());
        save_config(&env, &config);

        env.events().publish(("set_loan", "loan"), loan);

        Ok(())
    }

    fn set_collaborator(
        env: Env,
        sender: Address,
        role: CollaboratorRole,
        address: Address,
    ) -> Result<(), ContractError> {
        require_admin(&env, &sender)?;
        ensure_external(&env, &address)?;

        let mut collaborators = get_collaborators(&env);
        collaborators.addresses.set(role, address.clone());
        save_collaborators(&env, &collaborators);

        env.events()
            .publish(("set_collaborator", role as u32), address);

        Ok(())
    }

    fn toggle_collaborator(
        env: Env,
        sender: Address,
        role: CollaboratorRole,
        enabled: bool,
    ) -> Result<(), ContractError> {
        require_admin(&env, &sender)?;

        let mut collaborators = get_collaborators(&env);
        collaborators.set_enabled(role, enabled);
        save_collaborators(&env, &collaborators);

        env.events()
            .publish(("toggle_collaborator", role as u32), enabled);

        Ok(())
    }

    fn propose_admin(
        env: Env,
        new_admin: Address,
        time_limit: Option<u64>,
    ) -> Result<Address, ContractError> {
        let current_admin = get_admin(&env)?;
        current_admin.require_auth();

        if current_admin == new_admin {
            log!(&env, "Staking: Trying to set new admin as new");
            return Err(ContractError::SameAdmin);
        }

        save_pending_admin(
            &env,
            &AdminChange {
                new_admin: new_admin.clone(),
                time_limit,
            },
        );

        env.events().publish(
            ("Staking: ", "Admin replacement requested by old admin: "),
            &current_admin,
        );
        env.events()
            .publish(("Staking: ", "Replace with new admin: "), &new_admin);

        Ok(new_admin)
    }

    fn revoke_admin_change(env: Env) -> Result<(), ContractError> {
        let current_admin = get_admin(&env)?;
        current_admin.require_auth();

        if get_pending_admin(&env).is_none() {
            log!(&env, "Staking: No admin change in place");
            return Err(ContractError::NoAdminChangeInPlace);
        }
        remove_pending_admin(&env);

        env.events()
            .publish(("Staking: ", "Undo admin change: "), ());

        Ok(())
    }

    fn accept_admin(env: Env) -> Result<Address, ContractError> {
        let admin_change = get_pending_admin(&env).ok_or_else(|| {
            log!(&env, "Staking: No admin change request is in place");
            ContractError::NoAdminChangeInPlace
        })?;

        let pending_admin = admin_change.new_admin.clone();
        pending_admin.require_auth();

        if admin_change.is_expired(&env) {
            log!(&env, "Staking: Admin change expired");
            return Err(ContractError::AdminChangeExpired);
        }

        remove_pending_admin(&env);
        save_admin(&env, &pending_admin);

        env.events()
            .publish(("Staking: ", "Accepted new admin: "), &pending_admin);

        Ok(pending_admin)
    }

    fn index(env: Env) -> i128 {
        receipt_contract::Client::new(&env, &get_config(&env).receipt_token).index()
    }

    fn contract_balance(env: Env) -> Result<i128, ContractError> {
        contract_balance(&env, &get_config(&env))
    }

    fn query_epoch(env: Env) -> Epoch {
        get_epoch(&env)
    }

    fn query_warmup_info(env: Env, account: Address) -> WarmupClaim {
        get_warmup_claim(&env, &account)
    }

    fn query_stake_amount(env: Env, account: Address) -> i128 {
        get_stake_amount(&env, &account)
    }

    fn query_collaborators(env: Env) -> Collaborators {
        get_collaborators(&env)
    }

    fn query_total_bonus(env: Env) -> i128 {
        get_total_bonus(&env)
    }

    fn query_config(env: Env) -> ConfigResponse {
        ConfigResponse {
            config: get_config(&env),
        }
    }

    fn query_admin(env: Env) -> Result<Address, ContractError> {
        get_admin(&env)
    }
}

/// Soroban has no zero address; the vault's own address is the one
/// argument that can never be a valid counterparty.
fn ensure_external(env: &Env, address: &Address) -> Result<(), ContractError> {
    if *address == env.current_contract_address() {
        log!(env, "Staking: Address cannot be the staking contract itself");
        return Err(ContractError::InvalidAddress);
    }
    Ok(())
}

fn warmup_contract_of(env: &Env, config: &Config) -> Result<Address, ContractError> {
    config.warmup_contract.clone().ok_or_else(|| {
        log!(env, "Staking: Warmup contract not set");
        ContractError::WarmupContractNotSet
    })
}

fn is_loan(config: &Config, sender: &Address) -> bool {
    config.loan.as_ref() == Some(sender)
}

fn require_locker(env: &Env, config: &Config, sender: &Address) -> Result<Address, ContractError> {
    sender.require_auth();
    match &config.locker {
        Some(locker) if locker == sender => Ok(locker.clone()),
        _ => {
            log!(env, "Staking: Lock bonus: Caller is not the locker");
            Err(ContractError::AccessDenied)
        }
    }
}

fn set_once(env: &Env, slot: &mut Option<Address>, address: Address) -> Result<(), ContractError> {
    if slot.is_some() {
        log!(env, "Staking: Set contract: Slot already configured");
        return Err(ContractError::AlreadyConfigured);
    }
    *slot = Some(address);
    Ok(())
}
