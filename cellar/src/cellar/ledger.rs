use soroban_sdk::{log, Address, Env, Vec};

use crate::cellar::math::{mul_div_ceil, mul_div_floor};
use crate::constants::SCALAR_18;
use crate::storage;
use crate::types::DepositRecord;

/// How `consume_from` interprets its target and what it does with each
/// consumed fragment
#[derive(Clone, Copy, Debug)]
pub enum ConsumeMode<'a> {
    /// Target is normalized assets; consumed shares are released to the caller
    Withdraw,
    /// Target is shares; consumed fragments are migrated to `to`. With
    /// `only_active`, inactive records are left untouched.
    Transfer { to: &'a Address, only_active: bool },
}

/// Totals released by a ledger walk
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Consumed {
    pub assets: i128, // Normalized assets satisfied (principal only for transfers)
    pub shares: i128, // Shares taken from the owner's records
}

/// A record earns yield once the strategy has been entered after it was made
pub fn is_active(record: &DepositRecord, last_time_entered_strategy: u64) -> bool {
    record.time_deposited < last_time_entered_strategy
}

/// Append a record to the end of `owner`'s sequence
///
/// ### Arguments
/// * `owner` - The depositor
/// * `assets` - Principal in 18 decimals
/// * `shares` - Shares backed by the record
/// * `time_deposited` - Timestamp the record is classified by
pub fn append(e: &Env, owner: &Address, assets: i128, shares: i128, time_deposited: u64) {
    let mut ledger = storage::get_depositor_ledger(e, owner);
    storage::set_deposit(
        e,
        owner,
        ledger.len,
        &DepositRecord {
            assets,
            shares,
            time_deposited,
        },
    );
    ledger.len += 1;
    storage::set_depositor_ledger(e, owner, &ledger);
}

/// Give `to` a fragment taken from another depositor's record
///
/// Active value is fungible: the fragment keeps no principal or timestamp
/// and is valued at the exchange rate from then on. Inactive fragments
/// keep their principal and original timestamp.
pub fn migrate(
    e: &Env,
    to: &Address,
    shares: i128,
    assets: i128,
    source_time_deposited: u64,
    source_was_active: bool,
) {
    if source_was_active {
        append(e, to, 0, shares, 0);
    } else {
        append(e, to, assets, shares, source_time_deposited);
    }
}

/// Walk `owner`'s records from the cursor, shrinking them until `target`
/// is met or the records run out
///
/// Running out of records is not an error: the returned totals tell the
/// caller how much was actually satisfied.
///
/// ### Arguments
/// * `owner` - The depositor
/// * `target` - Normalized assets for `Withdraw`, shares for `Transfer`
/// * `mode` - What to do with consumed fragments
/// * `exchange_rate` - Normalized assets per whole share, fixed for the walk
pub fn consume_from(
    e: &Env,
    owner: &Address,
    target: i128,
    mode: ConsumeMode,
    exchange_rate: i128,
) -> Consumed {
    let mut ledger = storage::get_depositor_ledger(e, owner);
    let boundary = storage::get_last_time_entered_strategy(e);
    let mut consumed = Consumed::default();
    let mut remaining = target;
    let mut index = ledger.cursor;

    while index < ledger.len && remaining > 0 {
        let mut record = storage::get_deposit(e, owner, index);
        if record.shares > 0 {
            let active = is_active(&record, boundary);
            let changed = match mode {
                ConsumeMode::Withdraw => {
                    let value = if active {
                        mul_div_floor(e, record.shares, exchange_rate, SCALAR_18)
                    } else {
                        record.assets
                    };
                    // a record worth nothing only holds dust, release all of it
                    let (taken_assets, taken_shares) = if value > 0 {
                        let taken_assets = remaining.min(value);
                        (taken_assets, mul_div_ceil(e, record.shares, taken_assets, value))
                    } else {
                        (0, record.shares)
                    };
                    record.assets = if active { 0 } else { record.assets - taken_assets };
                    record.shares -= taken_shares;
                    remaining -= taken_assets;
                    consumed.assets += taken_assets;
                    consumed.shares += taken_shares;
                    true
                }
                ConsumeMode::Transfer { to, only_active } => {
                    if active || !only_active {
                        let taken_shares = remaining.min(record.shares);
                        let taken_assets = if active {
                            0
                        } else {
                            mul_div_floor(e, record.assets, taken_shares, record.shares)
                        };
                        record.assets = if active { 0 } else { record.assets - taken_assets };
                        record.shares -= taken_shares;
                        remaining -= taken_shares;
                        consumed.assets += taken_assets;
                        consumed.shares += taken_shares;
                        migrate(e, to, taken_shares, taken_assets, record.time_deposited, active);
                        true
                    } else {
                        false
                    }
                }
            };
            if changed {
                storage::set_deposit(e, owner, index, &record);
            }
        }

        // only a contiguous run of exhausted records moves the cursor
        if index == ledger.cursor && record.shares == 0 {
            ledger.cursor += 1;
        }
        index += 1;
    }

    if remaining > 0 {
        log!(e, "deposit ledger exhausted", owner.clone(), target, remaining);
    }
    storage::set_depositor_ledger(e, owner, &ledger);
    consumed
}

/// Records of `owner` from the cursor onwards
pub fn get_deposits(e: &Env, owner: &Address) -> Vec<DepositRecord> {
    let ledger = storage::get_depositor_ledger(e, owner);
    let mut records = Vec::new(e);
    for index in ledger.cursor..ledger.len {
        records.push_back(storage::get_deposit(e, owner, index));
    }
    records
}
