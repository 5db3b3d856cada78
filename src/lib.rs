pub mod chatwork;
pub mod errors;
pub mod models;
pub mod observability;
pub mod tasks;
// Fixtures shared by unit tests and tests/
#[doc(hidden)]
pub mod test_helpers;
