use soroban_sdk::auth::{ContractContext, InvokerContractAuthEntry, SubContractInvocation};
use soroban_sdk::{log, token, vec, Address, Env, IntoVal, Symbol, Val, Vec};

use crate::cellar::conversion::{inactive_assets, to_internal};
use crate::cellar::math::mul_div_floor;
use crate::dependencies::{LendingPoolClient, SwapRouterClient};
use crate::storage;

/// Pre-authorize `spender` pulling `amount` of `token` from the vault during
/// the next cross-contract call
fn authorize_pull(e: &Env, token: &Address, spender: &Address, amount: i128) {
    let args: Vec<Val> = vec![
        e,
        e.current_contract_address().into_val(e),
        spender.into_val(e),
        amount.into_val(e),
    ];
    e.authorize_as_current_contract(vec![
        e,
        InvokerContractAuthEntry::Contract(SubContractInvocation {
            context: ContractContext {
                contract: token.clone(),
                fn_name: Symbol::new(e, "transfer"),
                args,
            },
            sub_invocations: vec![e],
        }),
    ]);
}

/// Move `amount` idle assets into the lending position
pub fn deposit_to_lending(e: &Env, amount: i128) {
    if amount <= 0 {
        return;
    }
    let asset = storage::get_asset(e);
    let pool = storage::get_lending_pool(e);
    authorize_pull(e, &asset, &pool, amount);
    LendingPoolClient::new(e, &pool).deposit(&e.current_contract_address(), &asset, &amount);
}

/// Pull up to `amount` of the current asset out of the lending position
///
/// Returns the amount the pool actually released
pub fn withdraw_from_lending(e: &Env, amount: i128) -> i128 {
    if amount <= 0 {
        return 0;
    }
    let vault = e.current_contract_address();
    let asset = storage::get_asset(e);
    let pool = LendingPoolClient::new(e, &storage::get_lending_pool(e));
    let withdrawn = pool.withdraw(&vault, &asset, &amount, &vault);

    // the baseline is held at the income index it was recorded at
    let mut fee_data = storage::get_fee_data(e);
    if fee_data.last_normalized_income > 0 && withdrawn > 0 {
        let current_income = pool.normalized_income(&asset);
        let withdrawn_at_baseline = mul_div_floor(
            e,
            to_internal(e, withdrawn),
            fee_data.last_normalized_income,
            current_income,
        );
        fee_data.last_active_assets = (fee_data.last_active_assets - withdrawn_at_baseline).max(0);
        storage::set_fee_data(e, &fee_data);
    }
    withdrawn
}

/// Make sure at least `amount` of the current asset sits idle in the vault,
/// pulling the shortfall from the lending position
pub fn ensure_liquidity(e: &Env, amount: i128) {
    let idle = inactive_assets(e);
    if idle >= amount {
        return;
    }
    let shortfall = amount - idle;
    let withdrawn = withdraw_from_lending(e, shortfall);
    log!(e, "liquidity pulled from lending", shortfall, withdrawn);
}

/// Swap exactly `amount_in` of `path[0]` held by the vault into the last
/// asset of `path`, delivered back to the vault
pub fn swap_exact_in(e: &Env, path: &Vec<Address>, amount_in: i128, min_amount_out: i128) -> i128 {
    let vault = e.current_contract_address();
    let router = storage::get_swap_router(e);
    let token_in = path.first_unchecked();
    authorize_pull(e, &token_in, &router, amount_in);
    SwapRouterClient::new(e, &router).swap_exact_in(&vault, path, &amount_in, &min_amount_out, &vault)
}

/// Balance of an arbitrary token held by the vault
pub fn vault_balance(e: &Env, token: &Address) -> i128 {
    token::Client::new(e, token).balance(&e.current_contract_address())
}
