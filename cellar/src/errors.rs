use soroban_sdk::contracterror;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum CellarError {
    // Configuration
    InvalidConfig = 1002,
    NoProposedAdmin = 1003,

    // Amount validation errors
    ZeroAssets = 1010,
    ZeroShares = 1011,
    InsufficientShares = 1012,
    InsufficientAllowance = 1013,
    InvalidAmount = 1014,

    // Deposit caps
    DepositRestricted = 1020,
    LiquidityRestricted = 1021,

    // Strategy errors
    InvalidSwapPath = 1030,
    SameAsset = 1031,
    ProtectedAsset = 1032,
    DepositsPending = 1033,

    // Status
    Paused = 1040,
    Shutdown = 1041,
    AlreadyShutdown = 1042,
    Reentrancy = 1043,

    // Math
    MathOverflow = 1050,
    DivisionByZero = 1051,
}
