use soroban_decimal::DecimalError;
use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum ContractError {
    InvalidAddress = 700,
    AlreadyInitialized = 701,
    AccessDenied = 702,
    CapacityExceeded = 703,
    SlippageExceeded = 704,
    BondTooSmall = 705,
    ArithmeticFault = 706,
    InvalidParameter = 707,
    TermsNotInitialized = 708,
    BondNotFound = 709,
    StakingNotSet = 710,
    OutstandingDebt = 711,
    ConfigNotSet = 712,
    AdminNotSet = 713,
    SameAdmin = 714,
    NoAdminChangeInPlace = 715,
    AdminChangeExpired = 716,
}

impl From<DecimalError> for ContractError {
    fn from(_: DecimalError) -> Self {
        ContractError::ArithmeticFault
    }
}
