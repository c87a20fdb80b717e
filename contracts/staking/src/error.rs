use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum ContractError {
    InvalidAddress = 600,
    AlreadyConfigured = 601,
    AccessDenied = 602,
    DepositsLocked = 603,
    ArithmeticFault = 604,
    InvalidAmount = 605,
    WarmupContractNotSet = 606,
    ConfigNotSet = 607,
    EpochNotSet = 608,
    AdminNotSet = 609,
    SameAdmin = 610,
    NoAdminChangeInPlace = 611,
    AdminChangeExpired = 612,
}
