//! Storage module - account ledger and chain state management

mod ledger;
mod chain;

pub use ledger::*;
pub use chain::*;
