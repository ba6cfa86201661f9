use solana_address::Address;
use solana_instruction::{
    AccountMeta,
    Instruction,
};

use crate::instructions::{
    VoteInstruction,
    VoteSide,
};

/// Adds one vote for `side` to the tally stored in `vote_account`.
///
/// ### Accounts
///  0. `[WRITE]` Vote account
pub fn vote(program_id: Address, vote_account: Address, side: VoteSide) -> Instruction {
    Instruction {
        program_id,
        accounts: vec![AccountMeta::new(vote_account, false)],
        data: VoteInstruction::from(side).discriminator().to_vec(),
    }
}
