//! Funds a fresh wallet on a local validator, creates a new vote account, and votes once for each
//! side. Expects the vote program to be deployed at its default address.

use client::{
    ledger::ConnectionFactory,
    network::Network,
    pretty::{
        PrettyHistory,
        PrettyTally,
    },
    print_kv,
    transactions::DEFAULT_FUND_AMOUNT,
    view_state::VoteController,
    vote_account::VoteAccountHandle,
    LogColor,
};
use crunchy_vs_smooth_interface::{
    instructions::VoteSide,
    program,
};
use solana_commitment_config::CommitmentConfig;
use solana_sdk::{
    signature::Keypair,
    signer::Signer,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let factory = ConnectionFactory {
        program_id: program::ID,
        commitment: CommitmentConfig::confirmed(),
        compute_budget: None,
        debug_logs: true,
    };
    let ledger = factory.connect(Network::Localnet, Keypair::new());
    ledger
        .rpc
        .fund_account(&ledger.wallet().pubkey(), DEFAULT_FUND_AMOUNT)
        .await?;

    let vote_account = VoteAccountHandle::from_keypair(Keypair::new());
    let mut controller = VoteController::mount(ledger, vote_account).await;

    if !controller.initialize_account().await.is_success() {
        anyhow::bail!("Couldn't initialize the vote account");
    }
    for side in [VoteSide::Crunchy, VoteSide::Smooth] {
        controller.cast_vote(side).await;
    }

    print_kv!("Vote account", controller.vote_account(), LogColor::Accent);
    println!("{}", PrettyTally::new(&controller.state().tallies()));
    println!(
        "{}",
        PrettyHistory {
            history: controller.state().history(),
            network: controller.ledger().network(),
        }
    );

    Ok(())
}
