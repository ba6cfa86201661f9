#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(test, derive(strum_macros::EnumIter))]
#[repr(u8)]
pub enum VoteInterfaceError {
    InvalidAccountOwner,
    InsufficientByteLength,
    InvalidAccountDiscriminator,
    InvalidInstructionDiscriminator,
    MalformedAccountData,
}

impl From<VoteInterfaceError> for &'static str {
    fn from(value: VoteInterfaceError) -> Self {
        match value {
            VoteInterfaceError::InvalidAccountOwner => "Account isn't owned by the vote program",
            VoteInterfaceError::InsufficientByteLength => "Account is uninitialized or truncated",
            VoteInterfaceError::InvalidAccountDiscriminator => "Invalid vote account discriminator",
            VoteInterfaceError::InvalidInstructionDiscriminator => {
                "Invalid instruction discriminator"
            }
            VoteInterfaceError::MalformedAccountData => "Vote account data couldn't be decoded",
        }
    }
}

impl core::fmt::Display for VoteInterfaceError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str((*self).into())
    }
}

impl std::error::Error for VoteInterfaceError {}

/// Error codes emitted by the Anchor framework the vote program is built with. These surface as
/// `InstructionError::Custom(code)` in failed transactions.
#[derive(Clone, Copy, Debug, Eq, PartialEq, strum_macros::FromRepr, strum_macros::Display)]
#[cfg_attr(test, derive(strum_macros::EnumIter))]
#[repr(u32)]
pub enum AnchorFrameworkError {
    InstructionMissing = 100,
    InstructionFallbackNotFound = 101,
    InstructionDidNotDeserialize = 102,
    InstructionDidNotSerialize = 103,
    ConstraintMut = 2000,
    ConstraintSigner = 2002,
    AccountDiscriminatorAlreadySet = 3000,
    AccountDiscriminatorNotFound = 3001,
    AccountDiscriminatorMismatch = 3002,
    AccountDidNotDeserialize = 3003,
    AccountDidNotSerialize = 3004,
    AccountNotEnoughKeys = 3005,
    AccountNotMutable = 3006,
    AccountOwnedByWrongProgram = 3007,
    AccountNotSigner = 3010,
    AccountNotSystemOwned = 3011,
    AccountNotInitialized = 3012,
}

impl AnchorFrameworkError {
    pub fn from_code(code: u32) -> Option<Self> {
        Self::from_repr(code)
    }
}
