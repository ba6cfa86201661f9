//! Client-side controller for the crunchy-vs-smooth vote program.
//!
//! Includes the RPC connection and transaction helpers, the [`ledger::VoteLedger`] seam with its
//! RPC implementation, the view-state controller, and pretty-printing utilities.

pub mod e2e_helpers;
pub mod ledger;
pub mod logs;
pub mod network;
pub mod pretty;
pub mod transactions;
pub mod view_state;
pub mod vote_account;

pub use colored;
pub use logs::LogColor;
