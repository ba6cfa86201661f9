use client::{
    e2e_helpers::InMemoryLedger,
    ledger::VoteTally,
    view_state::{
        AccountStatus,
        Notification,
        VoteController,
    },
    vote_account::VoteAccountHandle,
};
use crunchy_vs_smooth_interface::instructions::VoteSide;
use solana_sdk::{
    signature::Keypair,
    signer::Signer,
};

async fn mounted(tally: VoteTally) -> (VoteController<InMemoryLedger>, VoteAccountHandle) {
    let vote_account = VoteAccountHandle::from_keypair(Keypair::new());
    let ledger = InMemoryLedger::with_account(vote_account.address(), tally);
    let controller = VoteController::mount(ledger, vote_account.clone()).await;
    (controller, vote_account)
}

#[tokio::test]
async fn crunchy_vote_increments_only_crunchy() {
    let (mut controller, _) = mounted(VoteTally {
        crunchy: 4,
        smooth: 9,
    })
    .await;
    let before = controller.state().tallies();

    let notification = controller.cast_vote(VoteSide::Crunchy).await;

    assert_eq!(notification, Notification::Success("Voted for Crunchy!".into()));
    let after = controller.state().tallies();
    assert_eq!(after.crunchy, before.crunchy + 1);
    assert_eq!(after.smooth, before.smooth);
}

#[tokio::test]
async fn smooth_vote_increments_only_smooth() {
    let (mut controller, _) = mounted(VoteTally::default()).await;

    let notification = controller.cast_vote(VoteSide::Smooth).await;

    assert_eq!(notification, Notification::Success("Voted for Smooth!".into()));
    assert_eq!(
        controller.state().tallies(),
        VoteTally {
            crunchy: 0,
            smooth: 1,
        }
    );
}

#[tokio::test]
async fn vote_refreshes_from_the_ledger() {
    let (mut controller, vote_account) = mounted(VoteTally::default()).await;
    let reads_before = controller.ledger().reads();

    controller.cast_vote(VoteSide::Crunchy).await;

    // One write followed by one read.
    assert_eq!(controller.ledger().writes(), 1);
    assert_eq!(controller.ledger().reads(), reads_before + 1);
    assert_eq!(
        controller.ledger().tally_of(&vote_account.address()),
        Some(controller.state().tallies())
    );
}

#[tokio::test]
async fn failed_vote_leaves_state_unchanged() {
    let (mut controller, _) = mounted(VoteTally {
        crunchy: 2,
        smooth: 2,
    })
    .await;
    controller.cast_vote(VoteSide::Smooth).await;
    let tallies_before = controller.state().tallies();
    let history_before = controller.state().history().to_vec();

    controller.ledger().set_fail_writes(true);
    let notification = controller.cast_vote(VoteSide::Crunchy).await;

    assert!(!notification.is_success());
    assert_eq!(controller.state().tallies(), tallies_before);
    assert_eq!(controller.state().history(), history_before.as_slice());
}

#[tokio::test]
async fn failed_refresh_after_vote_records_nothing() {
    let (mut controller, vote_account) = mounted(VoteTally::default()).await;

    controller.ledger().set_fail_reads(true);
    let notification = controller.cast_vote(VoteSide::Crunchy).await;

    assert!(matches!(notification, Notification::Error(_)));
    // The vote landed remotely, but the view only reflects successful fetches.
    assert_eq!(
        controller.ledger().tally_of(&vote_account.address()),
        Some(VoteTally {
            crunchy: 1,
            smooth: 0,
        })
    );
    assert_eq!(controller.state().tallies(), VoteTally::default());
    assert!(controller.state().history().is_empty());
}

#[tokio::test]
async fn vote_on_missing_account_fails() {
    let vote_account = VoteAccountHandle::from_keypair(Keypair::new());
    let mut controller = VoteController::mount(InMemoryLedger::new(), vote_account).await;
    assert_eq!(controller.state().status(), AccountStatus::Missing);

    let notification = controller.cast_vote(VoteSide::Smooth).await;

    assert!(!notification.is_success());
    assert_eq!(controller.ledger().writes(), 0);
    assert!(controller.state().history().is_empty());
}

#[tokio::test]
async fn history_counts_successful_votes() {
    let (mut controller, _) = mounted(VoteTally::default()).await;
    let sides = [
        VoteSide::Crunchy,
        VoteSide::Smooth,
        VoteSide::Crunchy,
        VoteSide::Crunchy,
    ];

    let mut successes = 0;
    for (i, side) in sides.into_iter().enumerate() {
        // Every other vote fails.
        controller.ledger().set_fail_writes(i % 2 == 1);
        if controller.cast_vote(side).await.is_success() {
            successes += 1;
        }
    }

    let history = controller.state().history();
    assert_eq!(successes, 2);
    assert_eq!(history.len(), successes);
    assert_eq!(
        history.iter().map(|r| r.side).collect::<Vec<_>>(),
        vec![VoteSide::Crunchy, VoteSide::Crunchy]
    );
    assert_ne!(history[0].signature, history[1].signature);
    assert!(history[0].submitted_at <= history[1].submitted_at);
}

#[tokio::test]
async fn votes_work_with_an_address_only_handle() {
    let keypair = Keypair::new();
    let ledger = InMemoryLedger::with_account(keypair.pubkey(), VoteTally::default());
    let mut controller =
        VoteController::mount(ledger, VoteAccountHandle::from_address(keypair.pubkey())).await;

    assert!(controller.cast_vote(VoteSide::Crunchy).await.is_success());
    assert_eq!(controller.state().tallies().crunchy, 1);
}
