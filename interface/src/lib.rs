//! Client-facing interface of the crunchy-vs-smooth vote program: the program ID, instruction
//! builders, and the on-chain vote account layout.

pub mod error;
pub mod instructions;
pub mod state;

pub mod program {
    use solana_address::Address;

    /// Address of the deployed vote program.
    pub const ID: Address = Address::from_str_const("A6GSrAxQT6fDHDZtSev1ArDBfSop4kkMv7citzeWaUkX");
}

/// The system program, required when the vote account is created.
pub const SYSTEM_PROGRAM_ID: solana_address::Address =
    solana_address::Address::from_str_const("11111111111111111111111111111111");
