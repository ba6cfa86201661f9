//! The seam between the view controller and the program that owns the tallies.

use anyhow::{
    anyhow,
    Context,
};
use crunchy_vs_smooth_interface::{
    instructions::{
        initialize,
        vote,
        VoteSide,
    },
    state::VoteAccount,
};
use solana_commitment_config::CommitmentConfig;
use solana_sdk::{
    account::Account,
    pubkey::Pubkey,
    signature::{
        Keypair,
        Signature,
        Signer,
    },
};

use crate::{
    network::Network,
    transactions::{
        SendTransactionConfig,
        VoteRpcClient,
    },
    vote_account::VoteAccountHandle,
};

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct VoteTally {
    pub crunchy: u64,
    pub smooth: u64,
}

impl VoteTally {
    pub fn total(&self) -> u64 {
        self.crunchy.saturating_add(self.smooth)
    }

    pub fn votes_for(&self, side: VoteSide) -> u64 {
        match side {
            VoteSide::Crunchy => self.crunchy,
            VoteSide::Smooth => self.smooth,
        }
    }

    /// The percentage of all votes held by `side`, or `0.0` when nobody has voted.
    pub fn share(&self, side: VoteSide) -> f64 {
        match self.total() {
            0 => 0.0,
            total => self.votes_for(side) as f64 * 100.0 / total as f64,
        }
    }
}

impl From<VoteAccount> for VoteTally {
    fn from(account: VoteAccount) -> Self {
        Self {
            crunchy: account.crunchy,
            smooth: account.smooth,
        }
    }
}

/// Remote operations against the vote program.
pub trait VoteLedger {
    /// Reads both tallies. `Ok(None)` means no account exists at `vote_account`.
    async fn fetch_tally(&self, vote_account: &Pubkey) -> anyhow::Result<Option<VoteTally>>;

    /// Creates the vote account with both tallies at zero.
    async fn initialize(&self, vote_account: &VoteAccountHandle) -> anyhow::Result<Signature>;

    /// Adds one vote for `side`.
    async fn vote(&self, vote_account: &Pubkey, side: VoteSide) -> anyhow::Result<Signature>;
}

/// A [`VoteLedger`] backed by a cluster's JSON-RPC API, paying and signing with `wallet`.
pub struct RpcVoteLedger {
    pub rpc: VoteRpcClient,
    wallet: Keypair,
    program_id: Pubkey,
}

impl RpcVoteLedger {
    pub fn new(rpc: VoteRpcClient, wallet: Keypair, program_id: Pubkey) -> Self {
        Self {
            rpc,
            wallet,
            program_id,
        }
    }

    pub fn wallet(&self) -> &Keypair {
        &self.wallet
    }

    pub fn program_id(&self) -> Pubkey {
        self.program_id
    }

    pub fn network(&self) -> &Network {
        &self.rpc.network
    }
}

/// Opens [`RpcVoteLedger`]s that share one set of connection settings, so the view can move
/// between networks without losing them.
#[derive(Clone, Copy, Debug)]
pub struct ConnectionFactory {
    pub program_id: Pubkey,
    pub commitment: CommitmentConfig,
    pub compute_budget: Option<u32>,
    pub debug_logs: bool,
}

impl ConnectionFactory {
    pub fn connect(&self, network: Network, wallet: Keypair) -> RpcVoteLedger {
        let rpc = VoteRpcClient::new(
            network,
            self.commitment,
            Some(SendTransactionConfig {
                compute_budget: self.compute_budget,
                debug_logs: Some(self.debug_logs),
            }),
        );
        RpcVoteLedger::new(rpc, wallet, self.program_id)
    }
}

/// Decodes the tallies from a fetched account. An absent account is `Ok(None)`.
fn tally_from_account(
    program_id: &Pubkey,
    vote_account: &Pubkey,
    account: Option<&Account>,
) -> anyhow::Result<Option<VoteTally>> {
    account
        .map(|account| {
            VoteAccount::try_from_owner_and_data(program_id, &account.owner, &account.data)
                .map(VoteTally::from)
                .with_context(|| format!("Couldn't decode vote account {vote_account}"))
        })
        .transpose()
}

impl VoteLedger for RpcVoteLedger {
    async fn fetch_tally(&self, vote_account: &Pubkey) -> anyhow::Result<Option<VoteTally>> {
        let account = self
            .rpc
            .client
            .get_account_with_commitment(vote_account, self.rpc.commitment())
            .with_context(|| format!("Couldn't fetch vote account {vote_account}"))?
            .value;

        tally_from_account(&self.program_id, vote_account, account.as_ref())
    }

    async fn initialize(&self, vote_account: &VoteAccountHandle) -> anyhow::Result<Signature> {
        let vote_keypair = vote_account
            .keypair()
            .ok_or_else(|| anyhow!("The vote account's keypair is required to initialize it"))?;
        let ixn = initialize(self.program_id, vote_account.address(), self.wallet.pubkey());
        self.rpc
            .send_and_confirm_txn(&self.wallet, &[vote_keypair], &[ixn])
            .await
    }

    async fn vote(&self, vote_account: &Pubkey, side: VoteSide) -> anyhow::Result<Signature> {
        let ixn = vote(self.program_id, *vote_account, side);
        self.rpc.send_and_confirm_txn(&self.wallet, &[], &[ixn]).await
    }
}
