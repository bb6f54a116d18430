//! CLI command implementations

pub mod check;
pub mod inspect;
pub mod keys;
pub mod replay;
pub mod report;
pub mod sim;
