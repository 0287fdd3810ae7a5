pub mod setup;
pub mod test_fixture;

pub use test_fixture::{SCALAR_18, SCALAR_7};
