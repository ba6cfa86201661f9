//! An in-process stand-in for the vote program, used to exercise the view controller without a
//! cluster.

use std::{
    cell::{
        Cell,
        RefCell,
    },
    collections::HashMap,
};

use anyhow::anyhow;
use crunchy_vs_smooth_interface::instructions::VoteSide;
use solana_sdk::{
    pubkey::Pubkey,
    signature::Signature,
};

use crate::{
    ledger::{
        VoteLedger,
        VoteTally,
    },
    vote_account::VoteAccountHandle,
};

/// Keeps vote accounts in memory and mimics the program's rules: an account can only be
/// initialized once, and votes against a missing account fail.
///
/// Reads and writes can be made to fail on demand to simulate network or signing errors.
#[derive(Default)]
pub struct InMemoryLedger {
    accounts: RefCell<HashMap<Pubkey, VoteTally>>,
    writes: Cell<u64>,
    reads: Cell<u64>,
    fail_reads: Cell<bool>,
    fail_writes: Cell<bool>,
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// A ledger that already holds a vote account with `tally`.
    pub fn with_account(address: Pubkey, tally: VoteTally) -> Self {
        let ledger = Self::default();
        ledger.accounts.borrow_mut().insert(address, tally);
        ledger
    }

    pub fn tally_of(&self, address: &Pubkey) -> Option<VoteTally> {
        self.accounts.borrow().get(address).copied()
    }

    /// Number of transactions that landed.
    pub fn writes(&self) -> u64 {
        self.writes.get()
    }

    /// Number of account reads attempted, including failed ones.
    pub fn reads(&self) -> u64 {
        self.reads.get()
    }

    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.set(fail);
    }

    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.set(fail);
    }

    fn land_write(&self) -> anyhow::Result<Signature> {
        if self.fail_writes.get() {
            return Err(anyhow!("Transaction simulation failed: blockhash not found"));
        }
        let nonce = self.writes.get() + 1;
        self.writes.set(nonce);

        let mut bytes = [0u8; 64];
        bytes[..8].copy_from_slice(&nonce.to_le_bytes());
        Ok(Signature::from(bytes))
    }
}

impl VoteLedger for InMemoryLedger {
    async fn fetch_tally(&self, vote_account: &Pubkey) -> anyhow::Result<Option<VoteTally>> {
        self.reads.set(self.reads.get() + 1);
        if self.fail_reads.get() {
            return Err(anyhow!("error sending request: connection refused"));
        }
        Ok(self.tally_of(vote_account))
    }

    async fn initialize(&self, vote_account: &VoteAccountHandle) -> anyhow::Result<Signature> {
        if vote_account.keypair().is_none() {
            return Err(anyhow!("Missing signature for the vote account"));
        }
        let address = vote_account.address();
        if self.accounts.borrow().contains_key(&address) {
            return Err(anyhow!("Allocate: account {address} already in use"));
        }
        let signature = self.land_write()?;
        self.accounts
            .borrow_mut()
            .insert(address, VoteTally::default());
        Ok(signature)
    }

    async fn vote(&self, vote_account: &Pubkey, side: VoteSide) -> anyhow::Result<Signature> {
        if !self.accounts.borrow().contains_key(vote_account) {
            return Err(anyhow!("AccountNotInitialized: {vote_account}"));
        }
        let signature = self.land_write()?;
        let mut accounts = self.accounts.borrow_mut();
        if let Some(tally) = accounts.get_mut(vote_account) {
            match side {
                VoteSide::Crunchy => tally.crunchy += 1,
                VoteSide::Smooth => tally.smooth += 1,
            }
        }
        Ok(signature)
    }
}
