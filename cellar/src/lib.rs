#![no_std]

#[cfg(any(test, feature = "testutils"))]
extern crate std;

mod constants;
mod errors;
pub mod storage;
mod contract;
mod cellar;
mod types;
mod dependencies;
pub mod testutils;
mod events;

pub use constants::{SCALAR_18, SCALAR_7, UNLIMITED};
pub use contract::*;
pub use dependencies::{LendingPool, LendingPoolClient, SwapRouter, SwapRouterClient};
pub use errors::CellarError;
pub use types::*;
