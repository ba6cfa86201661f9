use solana_address::Address;
use solana_instruction::{
    AccountMeta,
    Instruction,
};

use crate::{
    instructions::VoteInstruction,
    SYSTEM_PROGRAM_ID,
};

/// Creates the vote account at `vote_account` and zeroes both tallies.
///
/// The program allocates the account itself, so the vote account's keypair must sign alongside
/// the paying `user`.
///
/// ### Accounts
///  0. `[WRITE, SIGNER]` Vote account
///  1. `[WRITE, SIGNER]` User account
///  2. `[READ]` System program
pub fn initialize(program_id: Address, vote_account: Address, user: Address) -> Instruction {
    Instruction {
        program_id,
        accounts: vec![
            AccountMeta::new(vote_account, true),
            AccountMeta::new(user, true),
            AccountMeta::new_readonly(SYSTEM_PROGRAM_ID, false),
        ],
        data: VoteInstruction::Initialize.discriminator().to_vec(),
    }
}
