pub mod math;
pub mod conversion;
pub mod ledger;
pub mod shares;
mod position;
mod fees;
pub use fees::{execute_accrue_fees, execute_collect_fees};
mod deposit;
pub use deposit::{execute_deposit, execute_mint};
mod withdraw;
pub use withdraw::{execute_redeem, execute_withdraw};
mod transfer;
pub use transfer::execute_transfer;
mod strategy;
pub use strategy::{
    execute_enter_strategy, execute_rebalance, execute_reinvest, execute_set_pause,
    execute_shutdown, execute_sweep,
};
mod config;
pub use config::{execute_initialize, execute_set_fee_distributor, execute_set_limits, Collaborators};
