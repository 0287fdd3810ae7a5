use soroban_sdk::{contractclient, Address, Env, Vec};

/// Swap collaborator used when the vault changes asset or converts rewards
#[contractclient(name = "SwapRouterClient")]
pub trait SwapRouter {
    /// Swaps exactly `amount_in` of `path[0]` pulled from `sender` through
    /// every hop of `path` and sends the output to `to`
    ///
    /// # Returns
    /// Amount of the last asset in `path` received
    ///
    /// # Panics
    /// If the output is below `min_amount_out`
    fn swap_exact_in(
        e: Env,
        sender: Address,
        path: Vec<Address>,
        amount_in: i128,
        min_amount_out: i128,
        to: Address,
    ) -> i128;
}
