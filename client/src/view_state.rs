//! The vote view's state and the controller that keeps it in sync with the ledger.
//!
//! Tallies only ever change by being replaced with the result of a successful fetch. Every
//! remote failure is caught once, logged, and turned into an error [`Notification`]; nothing
//! here retries.

use std::fmt;

use anyhow::anyhow;
use chrono::{
    DateTime,
    Utc,
};
use crunchy_vs_smooth_interface::instructions::VoteSide;
use solana_sdk::signature::Signature;

use crate::{
    ledger::{
        VoteLedger,
        VoteTally,
    },
    logs::{
        log_error,
        log_success,
        log_warning,
    },
    vote_account::VoteAccountHandle,
};

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, strum_macros::Display)]
pub enum AccountStatus {
    /// No fetch has answered yet for the current account.
    #[default]
    Unknown,
    /// The ledger has no account at the address.
    Missing,
    Initialized,
}

/// A successful vote submission.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TransactionRecord {
    pub signature: Signature,
    pub side: VoteSide,
    pub submitted_at: DateTime<Utc>,
}

#[derive(Clone, Debug, Default)]
pub struct ViewState {
    tallies: VoteTally,
    history: Vec<TransactionRecord>,
    status: AccountStatus,
}

impl ViewState {
    pub fn tallies(&self) -> VoteTally {
        self.tallies
    }

    /// Submitted votes, oldest first.
    pub fn history(&self) -> &[TransactionRecord] {
        &self.history
    }

    pub fn status(&self) -> AccountStatus {
        self.status
    }
}

/// User-facing outcome of an action.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Notification {
    Success(String),
    Error(String),
}

impl Notification {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    fn emit(&self) {
        match self {
            Self::Success(msg) => log_success("Success", msg),
            Self::Error(msg) => log_error("Error", msg),
        }
    }
}

impl fmt::Display for Notification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success(msg) => f.write_str(msg),
            Self::Error(msg) => write!(f, "Error: {msg}"),
        }
    }
}

pub struct VoteController<L> {
    ledger: L,
    vote_account: VoteAccountHandle,
    state: ViewState,
}

impl<L: VoteLedger> VoteController<L> {
    pub fn new(ledger: L, vote_account: VoteAccountHandle) -> Self {
        Self {
            ledger,
            vote_account,
            state: ViewState::default(),
        }
    }

    /// Creates the controller and runs the initial fetch.
    pub async fn mount(ledger: L, vote_account: VoteAccountHandle) -> Self {
        let mut controller = Self::new(ledger, vote_account);
        controller.fetch_tallies().await;
        controller
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    pub fn vote_account(&self) -> &VoteAccountHandle {
        &self.vote_account
    }

    /// Refreshes the tallies from the ledger. Failures are logged and leave the state untouched.
    pub async fn fetch_tallies(&mut self) -> Option<VoteTally> {
        let address = self.vote_account.address();
        match self.ledger.fetch_tally(&address).await {
            Ok(Some(tally)) => {
                self.apply(tally);
                Some(tally)
            }
            Ok(None) => {
                self.state.status = AccountStatus::Missing;
                log_warning(
                    "Vote account not initialized",
                    format!("{address} doesn't exist yet, initialize it to start voting"),
                );
                None
            }
            Err(e) => {
                log_error("Could not fetch votes", format!("{e:#}"));
                None
            }
        }
    }

    /// Creates the vote account on-chain, then refreshes the tallies.
    pub async fn initialize_account(&mut self) -> Notification {
        let notification = match self.try_initialize().await {
            Ok(tally) => {
                self.apply(tally);
                Notification::Success("Vote account initialized".into())
            }
            Err(e) => Notification::Error(format!("{e:#}")),
        };
        notification.emit();
        notification
    }

    /// Submits one vote for `side`, refreshes the tallies and records the transaction.
    pub async fn cast_vote(&mut self, side: VoteSide) -> Notification {
        let notification = match self.try_vote(side).await {
            Ok((signature, tally)) => {
                self.apply(tally);
                self.state.history.push(TransactionRecord {
                    signature,
                    side,
                    submitted_at: Utc::now(),
                });
                Notification::Success(format!("Voted for {}!", side.capitalized()))
            }
            Err(e) => Notification::Error(format!("{e:#}")),
        };
        notification.emit();
        notification
    }

    /// Points the view at another vote account and fetches its tallies.
    pub async fn switch_vote_account(&mut self, vote_account: VoteAccountHandle) -> Option<VoteTally> {
        self.vote_account = vote_account;
        self.state.status = AccountStatus::Unknown;
        self.fetch_tallies().await
    }

    /// Replaces the ledger connection, e.g. after a network change, and fetches the tallies.
    pub async fn switch_ledger(&mut self, ledger: L) -> Option<VoteTally> {
        self.ledger = ledger;
        self.state.status = AccountStatus::Unknown;
        self.fetch_tallies().await
    }

    async fn try_initialize(&self) -> anyhow::Result<VoteTally> {
        if self.vote_account.keypair().is_none() {
            return Err(anyhow!(
                "Initializing {} requires its keypair, not just its address",
                self.vote_account
            ));
        }
        self.ledger.initialize(&self.vote_account).await?;
        self.fetch_existing().await
    }

    async fn try_vote(&self, side: VoteSide) -> anyhow::Result<(Signature, VoteTally)> {
        let signature = self.ledger.vote(&self.vote_account.address(), side).await?;
        let tally = self.fetch_existing().await?;
        Ok((signature, tally))
    }

    async fn fetch_existing(&self) -> anyhow::Result<VoteTally> {
        let address = self.vote_account.address();
        self.ledger
            .fetch_tally(&address)
            .await?
            .ok_or_else(|| anyhow!("Vote account {address} doesn't exist"))
    }

    fn apply(&mut self, tally: VoteTally) {
        self.state.tallies = tally;
        self.state.status = AccountStatus::Initialized;
    }
}
