use soroban_sdk::{contract, contractimpl, contractmeta, log, Address, Env};

use tide::{
    interfaces::{staking_contract, staking_helper_contract, token_contract, treasury_contract},
    scale::{BPS_DENOMINATOR, DEFAULT_PRICE_BASE, MIN_PAYOUT},
    utils::{current_tick, AdminChange},
};

use crate::{
    debt::{current_debt, debt_decay, decay_debt},
    error::ContractError,
    msg::ConfigResponse,
    pricing::{
        bond_price, bond_price_in_usd, debt_ratio, max_payout, payout_for,
        standardized_debt_ratio,
    },
    storage::{
        get_adjustment, get_bond, get_config, get_debt, get_terms, remove_bond, save_adjustment,
        save_bond, save_config, save_debt, save_terms,
        utils::{
            get_admin, get_pending_admin, remove_pending_admin, require_admin, save_admin,
            save_pending_admin,
        },
        Adjustment, Bond, BondParameter, Config, DebtState, Terms,
    },
    terms::{adjust, max_adjustment_rate, validate_vesting_term},
};

// Metadata that is added on to the WASM custom section
contractmeta!(
    key = "Description",
    val = "Tide Protocol bond depository"
);

#[contract]
pub struct BondDepository;

pub trait BondDepositoryTrait {
    /// Sets the full term set once, along with the starting debt.
    fn initialize_bond_terms(
        env: Env,
        sender: Address,
        terms: Terms,
        initial_debt: i128,
    ) -> Result<(), ContractError>;

    fn set_bond_terms(
        env: Env,
        sender: Address,
        parameter: BondParameter,
        input: i128,
    ) -> Result<(), ContractError>;

    /// Replaces the control variable schedule. `increment` is capped at 2.5%
    /// of the current control variable.
    fn set_adjustment(
        env: Env,
        sender: Address,
        add: bool,
        increment: i128,
        target: i128,
        buffer: u64,
    ) -> Result<(), ContractError>;

    /// Points redemptions at the staking contract, or at the staking helper
    /// when `helper` is set.
    fn set_staking(
        env: Env,
        sender: Address,
        staking: Address,
        helper: bool,
    ) -> Result<(), ContractError>;

    fn set_min_price(env: Env, sender: Address, minimum_price: i128) -> Result<(), ContractError>;

    fn set_bcv(env: Env, sender: Address, control_variable: i128) -> Result<(), ContractError>;

    fn set_vesting_term(env: Env, sender: Address, vesting_term: u64)
        -> Result<(), ContractError>;

    fn set_dao(env: Env, sender: Address, dao: Address) -> Result<(), ContractError>;

    fn set_price_base(env: Env, sender: Address, price_base: i128) -> Result<(), ContractError>;

    /// Buys a bond with `amount` principal. Returns the payout booked for the depositor.
    fn deposit(
        env: Env,
        sender: Address,
        amount: i128,
        max_price: i128,
        depositor: Address,
    ) -> Result<i128, ContractError>;

    /// Releases the vested part of the recipient's bond, staking it when `stake` is set.
    fn redeem(env: Env, recipient: Address, stake: bool) -> Result<i128, ContractError>;

    /// Sends the whole balance of a stray token to the DAO.
    fn recover_lost_token(env: Env, sender: Address, token: Address)
        -> Result<i128, ContractError>;

    fn propose_admin(
        env: Env,
        new_admin: Address,
        time_limit: Option<u64>,
    ) -> Result<Address, ContractError>;

    fn revoke_admin_change(env: Env) -> Result<(), ContractError>;

    fn accept_admin(env: Env) -> Result<Address, ContractError>;

    // QUERIES

    fn bond_price(env: Env) -> Result<i128, ContractError>;

    fn bond_price_in_usd(env: Env) -> Result<i128, ContractError>;

    fn debt_ratio(env: Env) -> Result<i128, ContractError>;

    fn standardized_debt_ratio(env: Env) -> Result<i128, ContractError>;

    fn current_debt(env: Env) -> Result<i128, ContractError>;

    fn debt_decay(env: Env) -> Result<i128, ContractError>;

    fn max_payout(env: Env) -> Result<i128, ContractError>;

    fn payout_for(env: Env, value: i128) -> Result<i128, ContractError>;

    fn percent_vested_for(env: Env, depositor: Address) -> i128;

    fn pending_payout_for(env: Env, depositor: Address) -> Result<i128, ContractError>;

    fn bond_info(env: Env, depositor: Address) -> Option<Bond>;

    fn query_terms(env: Env) -> Terms;

    fn query_adjustment(env: Env) -> Adjustment;

    fn query_total_debt(env: Env) -> DebtState;

    fn query_config(env: Env) -> ConfigResponse;

    fn query_admin(env: Env) -> Result<Address, ContractError>;
}

#[contractimpl]
impl BondDepository {
    #[allow(clippy::too_many_arguments)]
    pub fn __constructor(
        env: Env,
        admin: Address,
        value_token: Address,
        principal: Address,
        treasury: Address,
        dao: Address,
        bond_calculator: Option<Address>,
    ) {
        save_admin(&env, &admin);
        save_config(
            &env,
            &Config {
                value_token,
                principal: principal.clone(),
                treasury,
                dao,
                bond_calculator,
                staking: None,
                staking_helper: None,
                use_helper: false,
                price_base: DEFAULT_PRICE_BASE,
            },
        );

        env.events()
            .publish(("initialize", "Tide bond depository"), principal);
    }
}

#[contractimpl]
impl BondDepositoryTrait for BondDepository {
    fn initialize_bond_terms(
        env: Env,
        sender: Address,
        terms: Terms,
        initial_debt: i128,
    ) -> Result<(), ContractError> {
        require_admin(&env, &sender)?;

        if get_terms(&env).control_variable != 0 {
            log!(&env, "Bond: Initialize terms: Bond terms already initialized");
            return Err(ContractError::AlreadyInitialized);
        }
        if current_debt(&env)? != 0 {
            log!(&env, "Bond: Initialize terms: Outstanding debt must be settled");
            return Err(ContractError::OutstandingDebt);
        }
        terms.validate(&env)?;
        if initial_debt < 0 {
            log!(&env, "Bond: Initialize terms: Initial debt cannot be negative");
            return Err(ContractError::InvalidParameter);
        }

        save_terms(&env, &terms);
        save_debt(
            &env,
            &DebtState {
                total_debt: initial_debt,
                last_decay: current_tick(&env),
            },
        );

        env.events()
            .publish(("bond", "initialize_terms"), (terms, initial_debt));

        Ok(())
    }

    fn set_bond_terms(
        env: Env,
        sender: Address,
        parameter: BondParameter,
        input: i128,
    ) -> Result<(), ContractError> {
        require_admin(&env, &sender)?;

        let mut terms = get_terms(&env);
        terms.apply(&env, parameter, input)?;
        save_terms(&env, &terms);

        env.events()
            .publish(("bond", "set_bond_terms"), (parameter as u32, input));

        Ok(())
    }

    fn set_adjustment(
        env: Env,
        sender: Address,
        add: bool,
        increment: i128,
        target: i128,
        buffer: u64,
    ) -> Result<(), ContractError> {
        require_admin(&env, &sender)?;

        let max_rate = max_adjustment_rate(get_terms(&env).control_variable)?;
        if increment < 0 || increment > max_rate {
            log!(
                &env,
                "Bond: Set adjustment: Increment {} above limit {}",
                increment,
                max_rate
            );
            return Err(ContractError::InvalidParameter);
        }
        if target < 0 {
            log!(&env, "Bond: Set adjustment: Target cannot be negative");
            return Err(ContractError::InvalidParameter);
        }

        let adjustment = Adjustment {
            add,
            rate: increment,
            target,
            buffer,
            last_block: current_tick(&env),
        };
        save_adjustment(&env, &adjustment);

        env.events()
            .publish(("bond", "set_adjustment"), adjustment);

        Ok(())
    }

    fn set_staking(
        env: Env,
        sender: Address,
        staking: Address,
        helper: bool,
    ) -> Result<(), ContractError> {
        require_admin(&env, &sender)?;
        ensure_external(&env, &staking)?;

        let mut config = get_config(&env);
        if helper {
            config.staking_helper = Some(staking.clone());
        } else {
            config.staking = Some(staking.clone());
        }
        config.use_helper = helper;
        save_config(&env, &config);

        env.events()
            .publish(("bond", "set_staking"), (staking, helper));

        Ok(())
    }

    fn set_min_price(env: Env, sender: Address, minimum_price: i128) -> Result<(), ContractError> {
        require_admin(&env, &sender)?;
        if minimum_price < 0 {
            log!(&env, "Bond: Set min price: Price cannot be negative");
            return Err(ContractError::InvalidParameter);
        }

        let mut terms = get_terms(&env);
        let old = terms.minimum_price;
        terms.minimum_price = minimum_price;
        save_terms(&env, &terms);

        env.events()
            .publish(("bond", "set_min_bond_price"), (sender, old, minimum_price));

        Ok(())
    }

    fn set_bcv(env: Env, sender: Address, control_variable: i128) -> Result<(), ContractError> {
        require_admin(&env, &sender)?;
        if control_variable < 0 {
            log!(&env, "Bond: Set BCV: Control variable cannot be negative");
            return Err(ContractError::InvalidParameter);
        }

        let mut terms = get_terms(&env);
        let old = terms.control_variable;
        terms.control_variable = control_variable;
        save_terms(&env, &terms);

        env.events()
            .publish(("bond", "set_bcv"), (sender, old, control_variable));

        Ok(())
    }

    fn set_vesting_term(
        env: Env,
        sender: Address,
        vesting_term: u64,
    ) -> Result<(), ContractError> {
        require_admin(&env, &sender)?;
        validate_vesting_term(&env, vesting_term)?;

        let mut terms = get_terms(&env);
        let old = terms.vesting_term;
        terms.vesting_term = vesting_term;
        save_terms(&env, &terms);

        env.events()
            .publish(("bond", "set_vesting_term"), (sender, old, vesting_term));

        Ok(())
    }

    fn set_dao(env: Env, sender: Address, dao: Address) -> Result<(), ContractError> {
        require_admin(&env, &sender)?;
        ensure_external(&env, &dao)?;

        let mut config = get_config(&env);
        config.dao = dao.clone();
        save_config(&env, &config);

        env.events().publish(("bond", "set_dao"), dao);

        Ok(())
    }

    fn set_price_base(env: Env, sender: Address, price_base: i128) -> Result<(), ContractError> {
        require_admin(&env, &sender)?;
        if price_base <= 0 {
            log!(&env, "Bond: Set price base: Base must be positive");
            return Err(ContractError::InvalidParameter);
        }

        let mut config = get_config(&env);
        config.price_base = price_base;
        save_config(&env, &config);

        env.events()
            .publish(("bond", "set_price_base"), price_base);

        Ok(())
    }

    fn deposit(
        env: Env,
        sender: Address,
        amount: i128,
        max_price: i128,
        depositor: Address,
    ) -> Result<i128, ContractError> {
        sender.require_auth();
        ensure_external(&env, &depositor)?;
        if amount <= 0 {
            log!(&env, "Bond: Deposit: Amount must be positive");
            return Err(ContractError::InvalidParameter);
        }

        let terms = get_terms(&env);
        if terms.control_variable == 0 {
            log!(&env, "Bond: Deposit: Bond terms not initialized");
            return Err(ContractError::TermsNotInitialized);
        }

        let mut debt = decay_debt(&env)?;
        if debt.total_debt > terms.max_debt {
            log!(&env, "Bond: Deposit: Max capacity reached");
            return Err(ContractError::CapacityExceeded);
        }

        let price_in_usd = bond_price_in_usd(&env)?;
        let native_price = bond_price(&env)?;
        if max_price < native_price {
            log!(
                &env,
                "Bond: Deposit: Price {} above accepted maximum {}",
                native_price,
                max_price
            );
            return Err(ContractError::SlippageExceeded);
        }

        let config = get_config(&env);
        let value = treasury_contract::Client::new(&env, &config.treasury)
            .value_of_token(&config.principal, &amount);
        let payout = payout_for(&env, value)?;
        if payout < MIN_PAYOUT {
            log!(&env, "Bond: Deposit: Bond too small, payout {}", payout);
            return Err(ContractError::BondTooSmall);
        }
        if payout > max_payout(&env)? {
            log!(&env, "Bond: Deposit: Bond too large, payout {}", payout);
            return Err(ContractError::CapacityExceeded);
        }

        let discount = value
            .checked_sub(payout)
            .filter(|discount| *discount >= 0)
            .ok_or_else(|| {
                log!(&env, "Bond: Deposit: Payout exceeds principal value");
                ContractError::ArithmeticFault
            })?;
        let fee = discount
            .checked_mul(terms.fee)
            .ok_or(ContractError::ArithmeticFault)?
            / BPS_DENOMINATOR;
        let profit = discount
            .checked_sub(fee)
            .ok_or(ContractError::ArithmeticFault)?;

        debt.total_debt = debt
            .total_debt
            .checked_add(value)
            .ok_or(ContractError::ArithmeticFault)?;
        save_debt(&env, &debt);

        let tick = current_tick(&env);
        let mut bond = get_bond(&env, &depositor).unwrap_or_default();
        bond.payout = bond
            .payout
            .checked_add(payout)
            .ok_or(ContractError::ArithmeticFault)?;
        bond.vesting = terms.vesting_term;
        bond.last_block = tick;
        bond.price_paid = price_in_usd;
        save_bond(&env, &depositor, &bond);

        let this = env.current_contract_address();
        let principal = token_contract::Client::new(&env, &config.principal);
        principal.transfer_from(&this, &sender, &this, &amount);
        principal.approve(&this, &config.treasury, &amount, &env.ledger().sequence());
        treasury_contract::Client::new(&env, &config.treasury).deposit(
            &this,
            &amount,
            &config.principal,
            &profit,
        );
        if fee != 0 {
            token_contract::Client::new(&env, &config.value_token).transfer(
                &this,
                &config.dao,
                &fee,
            );
        }

        env.events()
            .publish(("bond", "deposit"), (amount, max_price, depositor));
        env.events().publish(
            ("bond", "bond_created"),
            (amount, payout, tick.saturating_add(terms.vesting_term), price_in_usd),
        );
        env.events().publish(
            ("bond", "bond_price_changed"),
            (bond_price_in_usd(&env)?, bond_price(&env)?, debt_ratio(&env)?),
        );

        adjust(&env)?;

        Ok(payout)
    }

    fn redeem(env: Env, recipient: Address, stake: bool) -> Result<i128, ContractError> {
        recipient.require_auth();

        let bond = get_bond(&env, &recipient).ok_or_else(|| {
            log!(&env, "Bond: Redeem: No bond for recipient");
            ContractError::BondNotFound
        })?;
        let tick = current_tick(&env);
        let percent_vested = bond.percent_vested(tick);

        let (payout, remaining) = if percent_vested >= BPS_DENOMINATOR {
            remove_bond(&env, &recipient);
            (bond.payout, 0)
        } else {
            let payout = bond
                .payout
                .checked_mul(percent_vested)
                .ok_or(ContractError::ArithmeticFault)?
                / BPS_DENOMINATOR;
            let elapsed = tick.saturating_sub(bond.last_block);
            let updated = Bond {
                payout: bond
                    .payout
                    .checked_sub(payout)
                    .ok_or(ContractError::ArithmeticFault)?,
                vesting: bond.vesting.checked_sub(elapsed).ok_or_else(|| {
                    log!(&env, "Bond: Redeem: Vesting window underflow");
                    ContractError::ArithmeticFault
                })?,
                last_block: tick,
                price_paid: bond.price_paid,
            };
            save_bond(&env, &recipient, &updated);
            (payout, updated.payout)
        };

        env.events()
            .publish(("bond", "bond_redeemed"), (&recipient, payout, remaining));

        release(&env, &recipient, stake, payout)?;

        Ok(payout)
    }

    fn recover_lost_token(
        env: Env,
        sender: Address,
        token: Address,
    ) -> Result<i128, ContractError> {
        sender.require_auth();

        let config = get_config(&env);
        if token == config.value_token || token == config.principal {
            log!(&env, "Bond: Recover: Cannot recover bond tokens");
            return Err(ContractError::InvalidAddress);
        }

        let this = env.current_contract_address();
        let token = token_contract::Client::new(&env, &token);
        let balance = token.balance(&this);
        token.transfer(&this, &config.dao, &balance);

        Ok(balance)
    }

    fn propose_admin(
        env: Env,
        new_admin: Address,
        time_limit: Option<u64>,
    ) -> Result<Address, ContractError> {
        let current_admin = get_admin(&env)?;
        current_admin.require_auth();

        if current_admin == new_admin {
            log!(&env, "Bond: Trying to set new admin as new");
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
            ("Bond: ", "Admin replacement requested by old admin: "),
            &current_admin,
        );
        env.events()
            .publish(("Bond: ", "Replace with new admin: "), &new_admin);

        Ok(new_admin)
    }

    fn revoke_admin_change(env: Env) -> Result<(), ContractError> {
        let current_admin = get_admin(&env)?;
        current_admin.require_auth();

        if get_pending_admin(&env).is_none() {
            log!(&env, "Bond: No admin change in place");
            return Err(ContractError::NoAdminChangeInPlace);
        }
        remove_pending_admin(&env);

        env.events().publish(("Bond: ", "Undo admin change: "), ());

        Ok(())
    }

    fn accept_admin(env: Env) -> Result<Address, ContractError> {
        let admin_change = get_pending_admin(&env).ok_or_else(|| {
            log!(&env, "Bond: No admin change request is in place");
            ContractError::NoAdminChangeInPlace
        })?;

        let pending_admin = admin_change.new_admin.clone();
        pending_admin.require_auth();

        if admin_change.is_expired(&env) {
            log!(&env, "Bond: Admin change expired");
            return Err(ContractError::AdminChangeExpired);
        }

        remove_pending_admin(&env);
        save_admin(&env, &pending_admin);

        env.events()
            .publish(("Bond: ", "Accepted new admin: "), &pending_admin);

        Ok(pending_admin)
    }

    fn bond_price(env: Env) -> Result<i128, ContractError> {
        bond_price(&env)
    }

    fn bond_price_in_usd(env: Env) -> Result<i128, ContractError> {
        bond_price_in_usd(&env)
    }

    fn debt_ratio(env: Env) -> Result<i128, ContractError> {
        debt_ratio(&env)
    }

    fn standardized_debt_ratio(env: Env) -> Result<i128, ContractError> {
        standardized_debt_ratio(&env)
    }

    fn current_debt(env: Env) -> Result<i128, ContractError> {
        current_debt(&env)
    }

    fn debt_decay(env: Env) -> Result<i128, ContractError> {
        debt_decay(&env)
    }

    fn max_payout(env: Env) -> Result<i128, ContractError> {
        max_payout(&env)
    }

    fn payout_for(env: Env, value: i128) -> Result<i128, ContractError> {
        payout_for(&env, value)
    }

    fn percent_vested_for(env: Env, depositor: Address) -> i128 {
        get_bond(&env, &depositor)
            .map(|bond| bond.percent_vested(current_tick(&env)))
            .unwrap_or(0)
    }

    fn pending_payout_for(env: Env, depositor: Address) -> Result<i128, ContractError> {
        let Some(bond) = get_bond(&env, &depositor) else {
            return Ok(0);
        };
        let percent_vested = bond.percent_vested(current_tick(&env));
        if percent_vested >= BPS_DENOMINATOR {
            return Ok(bond.payout);
        }
        bond.payout
            .checked_mul(percent_vested)
            .map(|scaled| scaled / BPS_DENOMINATOR)
            .ok_or(ContractError::ArithmeticFault)
    }

    fn bond_info(env: Env, depositor: Address) -> Option<Bond> {
        get_bond(&env, &depositor)
    }

    fn query_terms(env: Env) -> Terms {
        get_terms(&env)
    }

    fn query_adjustment(env: Env) -> Adjustment {
        get_adjustment(&env)
    }

    fn query_total_debt(env: Env) -> DebtState {
        get_debt(&env)
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

/// Soroban has no zero address; the depository's own address is the one
/// argument that can never be a valid counterparty.
fn ensure_external(env: &Env, address: &Address) -> Result<(), ContractError> {
    if *address == env.current_contract_address() {
        log!(env, "Bond: Address cannot be the depository itself");
        return Err(ContractError::InvalidAddress);
    }
    Ok(())
}

/// Pays a redeemed amount straight out or stakes it for the recipient.
fn release(env: &Env, recipient: &Address, stake: bool, amount: i128) -> Result<(), ContractError> {
    if amount == 0 {
        return Ok(());
    }

    let config = get_config(env);
    let this = env.current_contract_address();
    let value = token_contract::Client::new(env, &config.value_token);

    if !stake {
        value.transfer(&this, recipient, &amount);
        return Ok(());
    }

    let target = if config.use_helper {
        config.staking_helper
    } else {
        config.staking
    }
    .ok_or_else(|| {
        log!(env, "Bond: Redeem: Staking not configured");
        ContractError::StakingNotSet
    })?;

    value.approve(&this, &target, &amount, &env.ledger().sequence());
    if config.use_helper {
        staking_helper_contract::Client::new(env, &target).stake(&this, &amount, recipient);
    } else {
        staking_contract::Client::new(env, &target).stake(&this, &amount, recipient);
    }

    Ok(())
}
