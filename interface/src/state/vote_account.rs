//! Layout and decoding of the program-owned account holding the two tallies.

use borsh::{
    BorshDeserialize,
    BorshSerialize,
};
use solana_address::Address;
use static_assertions::const_assert;

use crate::{
    error::VoteInterfaceError,
    instructions::VoteSide,
};

/// `sha256("account:VoteAccount")[..8]`
pub const VOTE_ACCOUNT_DISCRIMINATOR: [u8; 8] = [203, 238, 154, 106, 200, 131, 0, 41];

/// The number of bytes the program allocates for a vote account.
pub const VOTE_ACCOUNT_SPACE: usize = 16 + 16;

#[derive(BorshDeserialize, BorshSerialize, Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct VoteAccount {
    pub crunchy: u64,
    pub smooth: u64,
}

impl VoteAccount {
    /// Discriminator plus both tallies.
    pub const LEN: usize = VOTE_ACCOUNT_DISCRIMINATOR.len() + 2 * size_of::<u64>();

    pub fn votes_for(&self, side: VoteSide) -> u64 {
        match side {
            VoteSide::Crunchy => self.crunchy,
            VoteSide::Smooth => self.smooth,
        }
    }

    /// Decodes a vote account from raw account fields.
    ///
    /// Validates that:
    /// - `account_owner` matches `program_id`,
    /// - `account_data` is at least [`VoteAccount::LEN`] bytes, and
    /// - the data starts with [`VOTE_ACCOUNT_DISCRIMINATOR`].
    ///
    /// Bytes past the two tallies are padding and are ignored.
    pub fn try_from_owner_and_data(
        program_id: &Address,
        account_owner: &Address,
        account_data: &[u8],
    ) -> Result<Self, VoteInterfaceError> {
        if account_owner != program_id {
            return Err(VoteInterfaceError::InvalidAccountOwner);
        }

        if account_data.len() < Self::LEN {
            return Err(VoteInterfaceError::InsufficientByteLength);
        }

        let (discriminator, mut fields) = account_data.split_at(VOTE_ACCOUNT_DISCRIMINATOR.len());
        if discriminator != VOTE_ACCOUNT_DISCRIMINATOR {
            return Err(VoteInterfaceError::InvalidAccountDiscriminator);
        }

        Self::deserialize(&mut fields).or(Err(VoteInterfaceError::MalformedAccountData))
    }

    /// Encodes the account the way the program lays it out, padded to [`VOTE_ACCOUNT_SPACE`].
    pub fn to_account_data(&self) -> borsh::io::Result<Vec<u8>> {
        let mut data = Vec::with_capacity(VOTE_ACCOUNT_SPACE);
        data.extend_from_slice(&VOTE_ACCOUNT_DISCRIMINATOR);
        self.serialize(&mut data)?;
        data.resize(VOTE_ACCOUNT_SPACE, 0);
        Ok(data)
    }
}

const_assert!(VoteAccount::LEN <= VOTE_ACCOUNT_SPACE);
