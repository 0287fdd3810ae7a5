use soroban_sdk::{panic_with_error, token, Address, Env};

use crate::cellar::conversion::{exchange_rate, preview_redeem, to_internal, to_native};
use crate::cellar::fees::settle_and_rebase;
use crate::cellar::ledger::{self, ConsumeMode, Consumed};
use crate::cellar::position::ensure_liquidity;
use crate::cellar::shares;
use crate::errors::CellarError;
use crate::events::CellarEvents;
use crate::storage;

/// Withdraw `assets` native units of `owner`'s position to `receiver`
///
/// The ledger walk may satisfy less than requested when `owner`'s records
/// run out; only what was satisfied is paid.
///
/// Returns the shares burned
pub fn execute_withdraw(
    e: &Env,
    spender: &Address,
    assets: i128,
    receiver: &Address,
    owner: &Address,
) -> i128 {
    if assets <= 0 {
        panic_with_error!(e, CellarError::ZeroAssets);
    }
    if storage::get_balance(e, owner) == 0 {
        panic_with_error!(e, CellarError::ZeroShares);
    }
    settle_and_rebase(e);
    let (_, burned) = withdraw_normalized(e, spender, to_internal(e, assets), receiver, owner);
    burned
}

/// Redeem `shares` of `owner`'s position to `receiver`. Requests above the
/// balance redeem the whole balance.
///
/// Returns the assets paid, in native decimals
pub fn execute_redeem(
    e: &Env,
    spender: &Address,
    shares: i128,
    receiver: &Address,
    owner: &Address,
) -> i128 {
    if shares <= 0 {
        panic_with_error!(e, CellarError::ZeroShares);
    }
    let shares = shares.min(storage::get_balance(e, owner));
    if shares == 0 {
        panic_with_error!(e, CellarError::ZeroShares);
    }
    settle_and_rebase(e);
    let assets = preview_redeem(e, shares);
    if assets == 0 {
        panic_with_error!(e, CellarError::ZeroAssets);
    }
    let (paid, _) = withdraw_normalized(e, spender, to_internal(e, assets), receiver, owner);
    paid
}

/// Consume `target` normalized assets from `owner`'s records, burn the
/// shares they released and pay out
///
/// Returns `(native assets paid, shares burned)`
fn withdraw_normalized(
    e: &Env,
    spender: &Address,
    target: i128,
    receiver: &Address,
    owner: &Address,
) -> (i128, i128) {
    let rate = exchange_rate(e);
    let Consumed { assets, shares } =
        ledger::consume_from(e, owner, target, ConsumeMode::Withdraw, rate);
    if assets == 0 {
        panic_with_error!(e, CellarError::ZeroAssets);
    }

    if spender != owner {
        shares::spend_allowance(e, owner, spender, shares);
    }
    shares::burn(e, owner, shares);

    let payout = to_native(e, assets);
    if payout > 0 {
        ensure_liquidity(e, payout);
        token::Client::new(e, &storage::get_asset(e)).transfer(
            &e.current_contract_address(),
            receiver,
            &payout,
        );
    }
    CellarEvents::withdraw(e, owner.clone(), receiver.clone(), payout, shares);
    (payout, shares)
}
