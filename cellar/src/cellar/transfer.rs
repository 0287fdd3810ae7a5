use soroban_sdk::{log, panic_with_error, Address, Env};

use crate::cellar::conversion::exchange_rate;
use crate::cellar::ledger::{self, ConsumeMode};
use crate::cellar::shares;
use crate::errors::CellarError;
use crate::events::CellarEvents;
use crate::storage;

/// Move up to `amount` shares from `from` to `to`, carrying the backing
/// deposit records along
///
/// With `only_active`, inactive records stay with `from` and fewer shares
/// than requested may move. An allowance granted by `from` to `spender` is
/// spent by the shares actually moved.
///
/// Returns the shares moved
pub fn execute_transfer(
    e: &Env,
    spender: &Address,
    from: &Address,
    to: &Address,
    amount: i128,
    only_active: bool,
) -> i128 {
    if amount <= 0 {
        panic_with_error!(e, CellarError::ZeroShares);
    }
    if amount > storage::get_balance(e, from) {
        panic_with_error!(e, CellarError::InsufficientShares);
    }
    if from == to {
        return amount;
    }

    let rate = exchange_rate(e);
    let consumed = ledger::consume_from(
        e,
        from,
        amount,
        ConsumeMode::Transfer { to, only_active },
        rate,
    );
    if consumed.shares < amount {
        log!(e, "partial transfer", amount, consumed.shares);
    }

    if spender != from {
        shares::spend_allowance(e, from, spender, consumed.shares);
    }
    shares::move_balance(e, from, to, consumed.shares);
    CellarEvents::transfer(e, from.clone(), to.clone(), amount, consumed.shares);
    consumed.shares
}
