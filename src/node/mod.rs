//! Node module - genesis block creation

mod genesis;

pub use genesis::*;
