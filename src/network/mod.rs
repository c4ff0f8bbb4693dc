//! Chain access: the ledger abstraction and its provider-backed implementation

pub mod ledger;
pub mod providers;

pub use ledger::*;
pub use providers::*;
