pub mod vote_account;

pub use vote_account::*;
