//! ERC-20 approvals and balance reads

pub mod approval;
pub mod balance;

pub use approval::*;
pub use balance::*;
