use soroban_sdk::{contracttype, Address};

/// A single contribution made by a depositor, or a fragment of one received
/// through a share transfer
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DepositRecord {
    pub assets: i128,        // Principal in 18 decimals, only meaningful while inactive
    pub shares: i128,        // Shares still backed by this record
    pub time_deposited: u64, // Ledger timestamp of the deposit, 0 for migrated active value
}

/// Bookkeeping for a depositor's record sequence
#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct DepositorLedger {
    pub cursor: u32, // Index of the first record that may still hold shares
    pub len: u32,    // Number of records ever appended
}

/// Storage key of a single deposit record
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DepositKey {
    pub owner: Address,
    pub index: u32,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AllowanceKey {
    pub from: Address,
    pub spender: Address,
}

/// Deposit caps. `UNLIMITED` disables a cap.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DepositLimits {
    pub max_liquidity: i128, // Vault-wide cap on total assets (native decimals)
    pub deposit_limit: i128, // Per-wallet cap on assets owned (native decimals)
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FeeConfig {
    pub platform_fee: i128,    // Yearly fee on active assets (SCALAR_7)
    pub performance_fee: i128, // Share of lending yield (SCALAR_7)
    pub distributor: Address,  // Receiver of collected fees
}

/// Fee accrual state. Fee shares are held by the vault itself.
#[contracttype]
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct FeeData {
    pub last_platform_accrual_time: u64,
    pub accrued_platform_fees: i128,     // Platform fee shares held by the vault
    pub accrued_performance_fees: i128,  // Performance fee shares held by the vault
    pub last_active_assets: i128,        // Active assets (18 decimals) at the last baseline
    pub last_normalized_income: i128,    // Lending income index at the last baseline, 0 if none
}
