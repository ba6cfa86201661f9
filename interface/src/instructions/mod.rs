use crate::error::VoteInterfaceError;

pub mod initialize;
pub mod vote;

pub use initialize::initialize;
pub use vote::vote;

pub const DISCRIMINATOR_LEN: usize = 8;

/// The two options on the ballot.
#[derive(
    Clone,
    Copy,
    Debug,
    Eq,
    Hash,
    PartialEq,
    strum_macros::Display,
    strum_macros::EnumIter,
    strum_macros::EnumString,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum VoteSide {
    Crunchy,
    Smooth,
}

impl VoteSide {
    /// The side's name with its first letter capitalized, e.g. `Crunchy`.
    pub fn capitalized(&self) -> &'static str {
        match self {
            Self::Crunchy => "Crunchy",
            Self::Smooth => "Smooth",
        }
    }
}

/// The vote program's instructions, identified on-chain by an 8-byte Anchor discriminator.
#[derive(Clone, Copy, Debug, Eq, PartialEq, strum_macros::Display)]
#[cfg_attr(test, derive(strum_macros::EnumIter))]
#[strum(serialize_all = "snake_case")]
pub enum VoteInstruction {
    Initialize,
    VoteCrunchy,
    VoteSmooth,
}

impl VoteInstruction {
    /// `sha256("global:<snake_case_name>")[..8]`
    pub const fn discriminator(&self) -> [u8; DISCRIMINATOR_LEN] {
        match self {
            Self::Initialize => [175, 175, 109, 31, 13, 152, 155, 237],
            Self::VoteCrunchy => [72, 167, 251, 119, 110, 229, 211, 12],
            Self::VoteSmooth => [103, 155, 179, 2, 75, 207, 124, 98],
        }
    }

    /// Identifies an instruction from the leading bytes of its instruction data.
    pub fn try_from_data(data: &[u8]) -> Result<Self, VoteInterfaceError> {
        let prefix = data
            .get(..DISCRIMINATOR_LEN)
            .ok_or(VoteInterfaceError::InsufficientByteLength)?;
        [Self::Initialize, Self::VoteCrunchy, Self::VoteSmooth]
            .into_iter()
            .find(|ixn| ixn.discriminator() == prefix)
            .ok_or(VoteInterfaceError::InvalidInstructionDiscriminator)
    }
}

impl From<VoteSide> for VoteInstruction {
    fn from(side: VoteSide) -> Self {
        match side {
            VoteSide::Crunchy => Self::VoteCrunchy,
            VoteSide::Smooth => Self::VoteSmooth,
        }
    }
}
