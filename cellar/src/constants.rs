// Token precision
pub const SCALAR_7: i128 = 10_000_000; // 7 decimal places, used for rates
pub const SCALAR_18: i128 = 1_000_000_000_000_000_000; // 18 decimal places, internal accounting
pub const INTERNAL_DECIMALS: u32 = 18; // decimals of normalized assets and of shares

// Time constants
pub const ONE_DAY_SECONDS: u64 = 86_400;
pub const SECONDS_PER_YEAR: u64 = ONE_DAY_SECONDS * 365;

// Limits
pub const UNLIMITED: i128 = i128::MAX; // sentinel for a disabled deposit or liquidity cap
pub const MAX_PLATFORM_FEE: i128 = 0_1000000; // 10% per year
pub const MAX_PERFORMANCE_FEE: i128 = 0_5000000; // 50% of yield
