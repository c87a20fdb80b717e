//! Clients for the collaborators the staking and bond contracts talk to.
//!
//! Only the calls the engines make are declared. Each collaborator gets its own
//! module so call sites read `token_contract::Client`, `treasury_contract::Client`
//! and so on.

pub mod token_contract {
    use soroban_sdk::{contractclient, Address, Env};

    /// The value token: a fungible token with a readable total supply.
    #[contractclient(name = "Client")]
    pub trait ValueTokenInterface {
        fn balance(env: Env, id: Address) -> i128;
        fn transfer(env: Env, from: Address, to: Address, amount: i128);
        fn transfer_from(env: Env, spender: Address, from: Address, to: Address, amount: i128);
        fn approve(env: Env, from: Address, spender: Address, amount: i128, expiration_ledger: u32);
        fn total_supply(env: Env) -> i128;
        fn decimals(env: Env) -> u32;
    }
}

pub mod receipt_contract {
    use soroban_sdk::{contractclient, Address, Env};

    /// The rebasing receipt token handed out for staked value.
    #[contractclient(name = "Client")]
    pub trait ReceiptTokenInterface {
        fn gons_for_balance(env: Env, amount: i128) -> i128;
        fn balance_for_gons(env: Env, gons: i128) -> i128;
        fn index(env: Env) -> i128;
        fn rebase(env: Env, profit: i128, epoch: u64) -> i128;
        fn circulating_supply(env: Env) -> i128;
        fn balance(env: Env, id: Address) -> i128;
        fn transfer(env: Env, from: Address, to: Address, amount: i128);
        fn transfer_from(env: Env, spender: Address, from: Address, to: Address, amount: i128);
        fn approve(env: Env, from: Address, spender: Address, amount: i128, expiration_ledger: u32);
    }
}

pub mod warmup_contract {
    use soroban_sdk::{contractclient, Address, Env};

    #[contractclient(name = "Client")]
    pub trait WarmupInterface {
        fn retrieve(env: Env, staker: Address, amount: i128);
    }
}

pub mod distributor_contract {
    use soroban_sdk::{contractclient, Env};

    #[contractclient(name = "Client")]
    pub trait DistributorInterface {
        fn distribute(env: Env) -> bool;
    }
}

pub mod treasury_contract {
    use soroban_sdk::{contractclient, Address, Env};

    #[contractclient(name = "Client")]
    pub trait TreasuryInterface {
        fn value_of_token(env: Env, token: Address, amount: i128) -> i128;
        /// Pulls `amount` of `token` from `from` and mints `value - profit` value tokens back.
        fn deposit(env: Env, from: Address, amount: i128, token: Address, profit: i128) -> i128;
    }
}

pub mod bond_calculator_contract {
    use soroban_sdk::{contractclient, Address, Env};

    #[contractclient(name = "Client")]
    pub trait BondCalculatorInterface {
        fn markdown(env: Env, pair: Address) -> i128;
    }
}

pub mod staking_contract {
    use soroban_sdk::{contractclient, Address, Env};

    #[contractclient(name = "Client")]
    pub trait StakingInterface {
        fn stake(env: Env, sender: Address, amount: i128, recipient: Address) -> bool;
        fn claim(env: Env, sender: Address, recipient: Address);
    }
}

pub mod staking_helper_contract {
    use soroban_sdk::{contractclient, Address, Env};

    #[contractclient(name = "Client")]
    pub trait StakingHelperInterface {
        fn stake(env: Env, from: Address, amount: i128, recipient: Address);
    }
}

pub mod farm_contract {
    use soroban_sdk::{contractclient, Address, Env};

    /// Optional reward collaborators fed by the staking contract.
    #[contractclient(name = "Client")]
    pub trait FarmInterface {
        fn change_stake_amount(env: Env, account: Address, amount: i128);
        fn add_reward(env: Env, account: Address, amount: i128);
    }
}
