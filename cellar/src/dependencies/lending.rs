use soroban_sdk::{contractclient, Address, Env};

/// Lending collaborator holding the vault's yield-bearing position
#[contractclient(name = "LendingPoolClient")]
pub trait LendingPool {
    /// Pulls `amount` of `asset` from `from` into the pool and credits
    /// `from` with the matching receipt balance
    fn deposit(e: Env, from: Address, asset: Address, amount: i128);

    /// Redeems up to `amount` of `owner`'s receipt balance and sends the
    /// underlying to `to`
    ///
    /// # Returns
    /// The amount actually withdrawn
    fn withdraw(e: Env, owner: Address, asset: Address, amount: i128, to: Address) -> i128;

    /// Receipt balance of `holder`, including accrued yield
    fn receipt_balance(e: Env, holder: Address, asset: Address) -> i128;

    /// Monotonic income index of the `asset` reserve
    fn normalized_income(e: Env, asset: Address) -> i128;
}
