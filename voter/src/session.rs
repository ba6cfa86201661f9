//! The interactive view. Renders the tallies, then reads one command per line from stdin until
//! `quit` or end of input. Every action re-renders the view once it completes.

use std::{
    io::Write,
    process::ExitCode,
    str::FromStr,
};

use anyhow::anyhow;
use client::{
    ledger::{
        ConnectionFactory,
        RpcVoteLedger,
    },
    logs::{
        log_divider,
        log_error,
        log_info,
        log_warning,
    },
    network::Network,
    pretty::{
        PrettyHistory,
        PrettyTally,
    },
    print_kv,
    view_state::{
        AccountStatus,
        VoteController,
    },
    vote_account::VoteAccountHandle,
    LogColor,
};
use colored::Colorize;
use crunchy_vs_smooth_interface::instructions::VoteSide;
use solana_sdk::signer::Signer;
use tokio::io::{
    AsyncBufReadExt,
    BufReader,
};

const HELP: &str = "\
  crunchy | smooth          vote for a side (also: vote <side>)
  init                      create the vote account
  refresh                   fetch the tallies again
  history                   list this session's votes
  network <moniker|url>     switch clusters (localnet, devnet, testnet, mainnet-beta)
  account <keypair|address> switch vote accounts
  help                      show this message
  quit                      leave";

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SessionCommand {
    Vote(VoteSide),
    Init,
    Refresh,
    History,
    Network(Network),
    Account(String),
    Help,
    Quit,
}

impl FromStr for SessionCommand {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut words = s.split_whitespace();
        let verb = words
            .next()
            .ok_or_else(|| anyhow!("Empty command"))?
            .to_ascii_lowercase();
        let mut argument = |name: &str| {
            words
                .next()
                .ok_or_else(|| anyhow!("`{verb}` expects a {name}"))
        };

        let command = match verb.as_str() {
            "crunchy" | "smooth" => Self::Vote(VoteSide::from_str(&verb)?),
            "vote" | "v" => Self::Vote(VoteSide::from_str(argument("side")?)?),
            "init" | "initialize" => Self::Init,
            "refresh" | "r" => Self::Refresh,
            "history" | "h" => Self::History,
            "network" | "n" => Self::Network(argument("network")?.parse()?),
            "account" | "a" => Self::Account(argument("keypair path or address")?.to_string()),
            "help" | "?" => Self::Help,
            "quit" | "exit" | "q" => Self::Quit,
            other => anyhow::bail!("Unknown command `{other}`. Type `help` for a list."),
        };
        Ok(command)
    }
}

pub async fn run_session(
    mut controller: VoteController<RpcVoteLedger>,
    factory: ConnectionFactory,
) -> anyhow::Result<ExitCode> {
    render_view(&controller);
    println!("{HELP}");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("{} ", ">".color(LogColor::Accent));
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        if line.trim().is_empty() {
            continue;
        }

        let command = match line.parse::<SessionCommand>() {
            Ok(command) => command,
            Err(e) => {
                log_warning("Invalid command", e);
                continue;
            }
        };

        match command {
            SessionCommand::Vote(side) => {
                controller.cast_vote(side).await;
            }
            SessionCommand::Init => {
                controller.initialize_account().await;
            }
            SessionCommand::Refresh => {
                controller.fetch_tallies().await;
            }
            SessionCommand::History => {
                render_history(&controller);
                continue;
            }
            SessionCommand::Network(network) => {
                log_info("Switching network", &network);
                let wallet = controller.ledger().wallet().insecure_clone();
                controller
                    .switch_ledger(factory.connect(network, wallet))
                    .await;
            }
            SessionCommand::Account(source) => {
                match VoteAccountHandle::from_path_or_address(&source) {
                    Ok(vote_account) => {
                        log_info("Switching vote account", &vote_account);
                        controller.switch_vote_account(vote_account).await;
                    }
                    Err(e) => {
                        log_error("Invalid vote account", format!("{e:#}"));
                        continue;
                    }
                }
            }
            SessionCommand::Help => {
                println!("{HELP}");
                continue;
            }
            SessionCommand::Quit => break,
        }

        render_view(&controller);
    }

    Ok(ExitCode::SUCCESS)
}

/// Prints the connection details, the account status and the tallies.
pub fn render_view(controller: &VoteController<RpcVoteLedger>) {
    let ledger = controller.ledger();
    let state = controller.state();

    log_divider();
    print_kv!("Network", ledger.network());
    print_kv!("Program", ledger.program_id());
    print_kv!("Vote account", controller.vote_account());
    print_kv!("Wallet", ledger.wallet().pubkey());
    print_kv!("Status", state.status(), status_color(state.status()));
    println!("{}", PrettyTally::new(&state.tallies()));

    if state.status() == AccountStatus::Missing {
        log_info("Hint", "The vote account doesn't exist yet. Type `init` to create it.");
    }
}

fn render_history(controller: &VoteController<RpcVoteLedger>) {
    println!(
        "{}",
        PrettyHistory {
            history: controller.state().history(),
            network: controller.ledger().network(),
        }
    );
}

fn status_color(status: AccountStatus) -> LogColor {
    match status {
        AccountStatus::Initialized => LogColor::Accent,
        AccountStatus::Missing => LogColor::Warning,
        AccountStatus::Unknown => LogColor::Muted,
    }
}
