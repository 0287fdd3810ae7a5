use soroban_sdk::{
    contracttype, unwrap::UnwrapOptimized, Address, Env, IntoVal, String, Symbol, TryFromVal, Val,
};

use crate::types::{
    AllowanceKey, DepositKey, DepositLimits, DepositRecord, DepositorLedger, FeeConfig, FeeData,
};

/********** Ledger Thresholds **********/

const ONE_DAY_LEDGERS: u32 = 17280; // assumes 5s a ledger
const LEDGER_THRESHOLD_INSTANCE: u32 = ONE_DAY_LEDGERS * 30; // ~ 30 days
const LEDGER_BUMP_INSTANCE: u32 = LEDGER_THRESHOLD_INSTANCE + ONE_DAY_LEDGERS; // ~ 31 days
const LEDGER_THRESHOLD_USER: u32 = ONE_DAY_LEDGERS * 100; // ~ 100 days
const LEDGER_BUMP_USER: u32 = LEDGER_THRESHOLD_USER + 20 * ONE_DAY_LEDGERS; // ~ 120 days

/********** Storage Types **********/

const ADMIN_KEY: &str = "Admin";
const PROPOSED_ADMIN_KEY: &str = "PropAdmin";
const NAME_KEY: &str = "Name";
const SYMBOL_KEY: &str = "Symbol";
const ASSET_KEY: &str = "Asset";
const ASSET_DECIMALS_KEY: &str = "AssetDec";
const LENDING_POOL_KEY: &str = "Pool";
const SWAP_ROUTER_KEY: &str = "Router";
const TOTAL_SHARES_KEY: &str = "TotShares";
const LAST_ENTERED_KEY: &str = "LastEnter";
const LAST_DEPOSIT_KEY: &str = "LastDep";
const LIMITS_KEY: &str = "Limits";
const PAUSED_KEY: &str = "Paused";
const SHUTDOWN_KEY: &str = "Shutdown";
const FEE_CONFIG_KEY: &str = "FeeConfig";
const FEE_DATA_KEY: &str = "FeeData";
const LOCKED_KEY: &str = "Locked";

#[derive(Clone)]
#[contracttype]
pub enum CellarDataKey {
    // Share balance of an address
    Balance(Address),
    // Share allowance granted by `from` to `spender`
    Allowance(AllowanceKey),
    // Cursor and length of a depositor's record sequence
    Ledger(Address),
    // A single deposit record
    Deposit(DepositKey),
}

/********** Storage **********/

/// Bump the instance rent for the contract
pub fn extend_instance(e: &Env) {
    e.storage()
        .instance()
        .extend_ttl(LEDGER_THRESHOLD_INSTANCE, LEDGER_BUMP_INSTANCE);
}

/// Fetch an entry in persistent storage that has a default value if it doesn't exist
fn get_persistent_default<K: IntoVal<Env, Val>, V: TryFromVal<Env, Val>, F: FnOnce() -> V>(
    e: &Env,
    key: &K,
    default: F,
    bump_threshold: u32,
    bump_amount: u32,
) -> V {
    if let Some(result) = e.storage().persistent().get::<K, V>(key) {
        e.storage()
            .persistent()
            .extend_ttl(key, bump_threshold, bump_amount);
        result
    } else {
        default()
    }
}

fn set_user_entry<V: IntoVal<Env, Val>>(e: &Env, key: &CellarDataKey, value: &V) {
    e.storage().persistent().set::<CellarDataKey, V>(key, value);
    e.storage()
        .persistent()
        .extend_ttl(key, LEDGER_THRESHOLD_USER, LEDGER_BUMP_USER);
}

/********** Admin **********/

/// Fetch the current admin Address
///
/// ### Panics
/// If the admin does not exist
pub fn get_admin(e: &Env) -> Address {
    e.storage()
        .instance()
        .get(&Symbol::new(e, ADMIN_KEY))
        .unwrap_optimized()
}

/// Set a new admin
///
/// ### Arguments
/// * `new_admin` - The Address for the admin
pub fn set_admin(e: &Env, new_admin: &Address) {
    e.storage()
        .instance()
        .set::<Symbol, Address>(&Symbol::new(e, ADMIN_KEY), new_admin);
}

/// Fetch the current proposed admin Address, if any
pub fn get_proposed_admin(e: &Env) -> Option<Address> {
    e.storage()
        .temporary()
        .get(&Symbol::new(e, PROPOSED_ADMIN_KEY))
}

/// Set a new proposed admin
///
/// ### Arguments
/// * `proposed_admin` - The Address for the proposed admin
pub fn set_proposed_admin(e: &Env, proposed_admin: &Address) {
    e.storage()
        .temporary()
        .set::<Symbol, Address>(&Symbol::new(e, PROPOSED_ADMIN_KEY), proposed_admin);
    e.storage().temporary().extend_ttl(
        &Symbol::new(e, PROPOSED_ADMIN_KEY),
        10 * ONE_DAY_LEDGERS,
        10 * ONE_DAY_LEDGERS,
    );
}

pub fn del_proposed_admin(e: &Env) {
    e.storage()
        .temporary()
        .remove(&Symbol::new(e, PROPOSED_ADMIN_KEY));
}

/********** Metadata **********/

pub fn get_name(e: &Env) -> String {
    e.storage()
        .instance()
        .get(&Symbol::new(e, NAME_KEY))
        .unwrap_optimized()
}

pub fn set_name(e: &Env, name: &String) {
    e.storage()
        .instance()
        .set::<Symbol, String>(&Symbol::new(e, NAME_KEY), name);
}

pub fn get_symbol(e: &Env) -> String {
    e.storage()
        .instance()
        .get(&Symbol::new(e, SYMBOL_KEY))
        .unwrap_optimized()
}

pub fn set_symbol(e: &Env, symbol: &String) {
    e.storage()
        .instance()
        .set::<Symbol, String>(&Symbol::new(e, SYMBOL_KEY), symbol);
}

/********** Strategy **********/

/// Fetch the asset the vault currently manages
pub fn get_asset(e: &Env) -> Address {
    e.storage()
        .instance()
        .get(&Symbol::new(e, ASSET_KEY))
        .unwrap_optimized()
}

/// Set the current asset and its native decimals
///
/// ### Arguments
/// * `asset` - The asset address
/// * `decimals` - Decimals reported by the asset contract
pub fn set_asset(e: &Env, asset: &Address, decimals: u32) {
    e.storage()
        .instance()
        .set::<Symbol, Address>(&Symbol::new(e, ASSET_KEY), asset);
    e.storage()
        .instance()
        .set::<Symbol, u32>(&Symbol::new(e, ASSET_DECIMALS_KEY), &decimals);
}

pub fn get_asset_decimals(e: &Env) -> u32 {
    e.storage()
        .instance()
        .get(&Symbol::new(e, ASSET_DECIMALS_KEY))
        .unwrap_optimized()
}

pub fn get_lending_pool(e: &Env) -> Address {
    e.storage()
        .instance()
        .get(&Symbol::new(e, LENDING_POOL_KEY))
        .unwrap_optimized()
}

pub fn set_lending_pool(e: &Env, pool: &Address) {
    e.storage()
        .instance()
        .set::<Symbol, Address>(&Symbol::new(e, LENDING_POOL_KEY), pool);
}

pub fn get_swap_router(e: &Env) -> Address {
    e.storage()
        .instance()
        .get(&Symbol::new(e, SWAP_ROUTER_KEY))
        .unwrap_optimized()
}

pub fn set_swap_router(e: &Env, router: &Address) {
    e.storage()
        .instance()
        .set::<Symbol, Address>(&Symbol::new(e, SWAP_ROUTER_KEY), router);
}

/// Fetch the timestamp of the last time idle assets entered the lending position
pub fn get_last_time_entered_strategy(e: &Env) -> u64 {
    e.storage()
        .instance()
        .get::<Symbol, u64>(&Symbol::new(e, LAST_ENTERED_KEY))
        .unwrap_or(0)
}

pub fn set_last_time_entered_strategy(e: &Env, timestamp: u64) {
    e.storage()
        .instance()
        .set::<Symbol, u64>(&Symbol::new(e, LAST_ENTERED_KEY), &timestamp);
}

/// Fetch the timestamp of the most recent deposit, if any
pub fn get_last_deposit_time(e: &Env) -> Option<u64> {
    e.storage()
        .instance()
        .get::<Symbol, u64>(&Symbol::new(e, LAST_DEPOSIT_KEY))
}

pub fn set_last_deposit_time(e: &Env, timestamp: u64) {
    e.storage()
        .instance()
        .set::<Symbol, u64>(&Symbol::new(e, LAST_DEPOSIT_KEY), &timestamp);
}

/********** Status **********/

pub fn get_paused(e: &Env) -> bool {
    e.storage()
        .instance()
        .get::<Symbol, bool>(&Symbol::new(e, PAUSED_KEY))
        .unwrap_or(false)
}

pub fn set_paused(e: &Env, paused: bool) {
    e.storage()
        .instance()
        .set::<Symbol, bool>(&Symbol::new(e, PAUSED_KEY), &paused);
}

pub fn get_shutdown(e: &Env) -> bool {
    e.storage()
        .instance()
        .get::<Symbol, bool>(&Symbol::new(e, SHUTDOWN_KEY))
        .unwrap_or(false)
}

pub fn set_shutdown(e: &Env) {
    e.storage()
        .instance()
        .set::<Symbol, bool>(&Symbol::new(e, SHUTDOWN_KEY), &true);
}

pub fn is_locked(e: &Env) -> bool {
    e.storage()
        .instance()
        .get::<Symbol, bool>(&Symbol::new(e, LOCKED_KEY))
        .unwrap_or(false)
}

pub fn set_locked(e: &Env, locked: bool) {
    e.storage()
        .instance()
        .set::<Symbol, bool>(&Symbol::new(e, LOCKED_KEY), &locked);
}

/********** Limits **********/

pub fn get_limits(e: &Env) -> DepositLimits {
    e.storage()
        .instance()
        .get(&Symbol::new(e, LIMITS_KEY))
        .unwrap_optimized()
}

pub fn set_limits(e: &Env, limits: &DepositLimits) {
    e.storage()
        .instance()
        .set::<Symbol, DepositLimits>(&Symbol::new(e, LIMITS_KEY), limits);
}

/********** Fees **********/

pub fn get_fee_config(e: &Env) -> FeeConfig {
    e.storage()
        .instance()
        .get(&Symbol::new(e, FEE_CONFIG_KEY))
        .unwrap_optimized()
}

pub fn set_fee_config(e: &Env, config: &FeeConfig) {
    e.storage()
        .instance()
        .set::<Symbol, FeeConfig>(&Symbol::new(e, FEE_CONFIG_KEY), config);
}

pub fn get_fee_data(e: &Env) -> FeeData {
    e.storage()
        .instance()
        .get(&Symbol::new(e, FEE_DATA_KEY))
        .unwrap_optimized()
}

pub fn set_fee_data(e: &Env, data: &FeeData) {
    e.storage()
        .instance()
        .set::<Symbol, FeeData>(&Symbol::new(e, FEE_DATA_KEY), data);
}

/********** Shares **********/

pub fn get_total_shares(e: &Env) -> i128 {
    e.storage()
        .instance()
        .get::<Symbol, i128>(&Symbol::new(e, TOTAL_SHARES_KEY))
        .unwrap_or(0)
}

pub fn set_total_shares(e: &Env, total_shares: i128) {
    e.storage()
        .instance()
        .set::<Symbol, i128>(&Symbol::new(e, TOTAL_SHARES_KEY), &total_shares);
}

/// Fetch the share balance of an address, 0 if it never held shares
///
/// ### Arguments
/// * `id` - The address
pub fn get_balance(e: &Env, id: &Address) -> i128 {
    let key = CellarDataKey::Balance(id.clone());
    get_persistent_default(e, &key, || 0i128, LEDGER_THRESHOLD_USER, LEDGER_BUMP_USER)
}

pub fn set_balance(e: &Env, id: &Address, balance: i128) {
    set_user_entry(e, &CellarDataKey::Balance(id.clone()), &balance);
}

/// Fetch the share allowance `from` granted to `spender`
pub fn get_allowance(e: &Env, from: &Address, spender: &Address) -> i128 {
    let key = CellarDataKey::Allowance(AllowanceKey {
        from: from.clone(),
        spender: spender.clone(),
    });
    get_persistent_default(e, &key, || 0i128, LEDGER_THRESHOLD_USER, LEDGER_BUMP_USER)
}

pub fn set_allowance(e: &Env, from: &Address, spender: &Address, amount: i128) {
    let key = CellarDataKey::Allowance(AllowanceKey {
        from: from.clone(),
        spender: spender.clone(),
    });
    set_user_entry(e, &key, &amount);
}

/********** Deposit Ledger **********/

/// Fetch the cursor and length of a depositor's records
///
/// ### Arguments
/// * `owner` - The depositor
pub fn get_depositor_ledger(e: &Env, owner: &Address) -> DepositorLedger {
    let key = CellarDataKey::Ledger(owner.clone());
    get_persistent_default(
        e,
        &key,
        DepositorLedger::default,
        LEDGER_THRESHOLD_USER,
        LEDGER_BUMP_USER,
    )
}

pub fn set_depositor_ledger(e: &Env, owner: &Address, ledger: &DepositorLedger) {
    set_user_entry(e, &CellarDataKey::Ledger(owner.clone()), ledger);
}

/// Fetch a deposit record
///
/// ### Arguments
/// * `owner` - The depositor
/// * `index` - Position of the record in the depositor's sequence
///
/// ### Panics
/// If the record does not exist
pub fn get_deposit(e: &Env, owner: &Address, index: u32) -> DepositRecord {
    let key = CellarDataKey::Deposit(DepositKey {
        owner: owner.clone(),
        index,
    });
    e.storage()
        .persistent()
        .extend_ttl(&key, LEDGER_THRESHOLD_USER, LEDGER_BUMP_USER);
    e.storage()
        .persistent()
        .get::<CellarDataKey, DepositRecord>(&key)
        .unwrap_optimized()
}

pub fn set_deposit(e: &Env, owner: &Address, index: u32, record: &DepositRecord) {
    let key = CellarDataKey::Deposit(DepositKey {
        owner: owner.clone(),
        index,
    });
    set_user_entry(e, &key, record);
}
