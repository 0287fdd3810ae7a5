mod lending;
pub use lending::{LendingPool, LendingPoolClient};
mod swap;
pub use swap::{SwapRouter, SwapRouterClient};
