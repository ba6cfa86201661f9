use std::{
    path::{
        Path,
        PathBuf,
    },
    process::ExitCode,
    str::FromStr,
};

use anyhow::anyhow;
use clap::{
    Parser,
    Subcommand,
    ValueEnum,
};
use client::{
    ledger::{
        ConnectionFactory,
        RpcVoteLedger,
    },
    logs::log_success,
    network::Network,
    print_kv,
    transactions::DEFAULT_FUND_AMOUNT,
    view_state::{
        AccountStatus,
        VoteController,
    },
    vote_account::VoteAccountHandle,
    LogColor,
};
use crunchy_vs_smooth_interface::{
    instructions::VoteSide,
    program,
};
use solana_commitment_config::CommitmentConfig;
use solana_keypair::{
    read_keypair_file,
    write_keypair_file,
};
use solana_sdk::{
    pubkey::Pubkey,
    signature::Keypair,
    signer::Signer,
};

use crate::session::{
    render_view,
    run_session,
};

#[derive(Debug, Parser)]
#[command(name = "crunchy-vs-smooth", version, about = "Vote crunchy or smooth, on-chain.")]
pub struct Args {
    /// Cluster to talk to: localnet, devnet, testnet, mainnet-beta, or an RPC URL.
    #[arg(
        short = 'u',
        long = "url",
        env = "CVS_RPC_URL",
        default_value = "localnet",
        global = true
    )]
    pub network: Network,

    /// Wallet keypair that pays for and signs transactions. Defaults to the Solana CLI's
    /// `~/.config/solana/id.json`.
    #[arg(short, long, env = "CVS_KEYPAIR", global = true)]
    pub keypair: Option<PathBuf>,

    /// The vote account, as a keypair file (required to initialize it) or a base58 address.
    #[arg(short = 'a', long, env = "CVS_VOTE_ACCOUNT", global = true)]
    pub vote_account: Option<String>,

    /// Address of the vote program.
    #[arg(
        long,
        env = "CVS_PROGRAM_ID",
        value_parser = parse_pubkey,
        default_value_t = program::ID,
        global = true
    )]
    pub program_id: Pubkey,

    #[arg(long, value_enum, default_value_t = Commitment::Confirmed, global = true)]
    pub commitment: Commitment,

    /// Prefix each transaction with a compute unit limit of this many units.
    #[arg(long, global = true)]
    pub compute_budget: Option<u32>,

    /// Don't print signatures and program logs after each transaction.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Clone, Debug, Subcommand)]
pub enum Command {
    /// Print the current tallies.
    Tally,
    /// Create the vote account. Needs the vote account's keypair.
    Init,
    /// Cast one vote.
    Vote { side: VoteSide },
    /// Generate a vote account keypair and write it to `path`.
    NewAccount {
        path: PathBuf,
        /// Overwrite an existing file.
        #[arg(long)]
        force: bool,
    },
    /// Airdrop lamports to the wallet. Not available on mainnet-beta.
    Airdrop {
        #[arg(default_value_t = DEFAULT_FUND_AMOUNT)]
        lamports: u64,
    },
    /// Interactive view: shows the tallies and takes votes until `quit`. The default.
    Session,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum Commitment {
    Processed,
    Confirmed,
    Finalized,
}

impl From<Commitment> for CommitmentConfig {
    fn from(value: Commitment) -> Self {
        match value {
            Commitment::Processed => CommitmentConfig::processed(),
            Commitment::Confirmed => CommitmentConfig::confirmed(),
            Commitment::Finalized => CommitmentConfig::finalized(),
        }
    }
}

fn parse_pubkey(s: &str) -> Result<Pubkey, String> {
    Pubkey::from_str(s).map_err(|_| format!("`{s}` isn't a valid base58 address"))
}

impl Args {
    pub fn connection_factory(&self) -> ConnectionFactory {
        ConnectionFactory {
            program_id: self.program_id,
            commitment: self.commitment.into(),
            compute_budget: self.compute_budget,
            debug_logs: !self.quiet,
        }
    }

    fn wallet(&self) -> anyhow::Result<Keypair> {
        let path = match &self.keypair {
            Some(path) => path.clone(),
            None => default_keypair_path()?,
        };
        read_keypair_file(&path)
            .map_err(|e| anyhow!("Couldn't read wallet keypair {}: {e}", path.display()))
    }

    fn vote_account(&self) -> anyhow::Result<VoteAccountHandle> {
        let source = self.vote_account.as_deref().ok_or_else(|| {
            anyhow!(
                "No vote account given. Pass --vote-account <keypair|address>, or create one with \
                 `new-account <path>`."
            )
        })?;
        VoteAccountHandle::from_path_or_address(source)
    }
}

fn default_keypair_path() -> anyhow::Result<PathBuf> {
    let home = std::env::var_os("HOME")
        .ok_or_else(|| anyhow!("$HOME isn't set; pass the wallet with --keypair"))?;
    let mut path = PathBuf::from(home);
    path.extend([".config", "solana", "id.json"]);
    Ok(path)
}

pub async fn run(args: Args) -> anyhow::Result<ExitCode> {
    let command = args.command.clone().unwrap_or(Command::Session);

    if let Command::NewAccount { path, force } = &command {
        new_account(path, *force)?;
        return Ok(ExitCode::SUCCESS);
    }

    let factory = args.connection_factory();
    let ledger = factory.connect(args.network.clone(), args.wallet()?);

    if let Command::Airdrop { lamports } = command {
        return airdrop(&ledger, lamports).await;
    }

    let mut controller = VoteController::mount(ledger, args.vote_account()?).await;

    let notification = match command {
        Command::Tally => {
            render_view(&controller);
            return Ok(exit_code(tally_succeeded(controller.state().status())));
        }
        Command::Session => return run_session(controller, factory).await,
        Command::Init => controller.initialize_account().await,
        Command::Vote { side } => controller.cast_vote(side).await,
        Command::NewAccount { .. } | Command::Airdrop { .. } => unreachable!("handled above"),
    };

    render_view(&controller);
    Ok(exit_code(notification.is_success()))
}

/// A tally is only meaningful once a fetch has found the account.
fn tally_succeeded(status: AccountStatus) -> bool {
    status == AccountStatus::Initialized
}

fn exit_code(success: bool) -> ExitCode {
    match success {
        true => ExitCode::SUCCESS,
        false => ExitCode::FAILURE,
    }
}

fn new_account(path: &Path, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "{} already exists. Pass --force to overwrite it.",
            path.display()
        );
    }
    let keypair = Keypair::new();
    write_keypair_file(&keypair, path)
        .map_err(|e| anyhow!("Couldn't write keypair to {}: {e}", path.display()))?;
    print_kv!("Vote account", keypair.pubkey(), LogColor::Accent);
    print_kv!("Keypair file", path.display());
    Ok(())
}

async fn airdrop(ledger: &RpcVoteLedger, lamports: u64) -> anyhow::Result<ExitCode> {
    let wallet = ledger.wallet().pubkey();
    let signature = ledger.rpc.fund_account(&wallet, lamports).await?;
    log_success("Airdrop", signature);
    print_kv!("Wallet", wallet);
    print_kv!("Lamports", lamports);
    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let args = Args::try_parse_from(["crunchy-vs-smooth", "tally"]).unwrap();
        assert_eq!(args.network, Network::Localnet);
        assert_eq!(args.program_id, program::ID);
        assert_eq!(args.commitment, Commitment::Confirmed);
        assert!(!args.quiet);
        assert!(matches!(args.command, Some(Command::Tally)));
    }

    #[test]
    fn vote_with_global_options() {
        let args = Args::try_parse_from([
            "crunchy-vs-smooth",
            "vote",
            "Smooth",
            "-u",
            "devnet",
            "--vote-account",
            "vote.json",
            "--commitment",
            "processed",
            "--quiet",
        ])
        .unwrap();
        assert_eq!(args.network, Network::Devnet);
        assert_eq!(args.vote_account.as_deref(), Some("vote.json"));
        assert_eq!(args.commitment, Commitment::Processed);
        assert!(matches!(
            args.command,
            Some(Command::Vote {
                side: VoteSide::Smooth
            })
        ));

        let factory = args.connection_factory();
        assert!(!factory.debug_logs);
        assert_eq!(factory.commitment, CommitmentConfig::processed());
    }

    #[test]
    fn session_is_the_default() {
        let args = Args::try_parse_from(["crunchy-vs-smooth"]).unwrap();
        assert!(args.command.is_none());
    }

    #[test]
    fn rejects_bad_input() {
        assert!(Args::try_parse_from(["crunchy-vs-smooth", "vote", "chunky"]).is_err());
        assert!(Args::try_parse_from(["crunchy-vs-smooth", "-u", "moonnet", "tally"]).is_err());
        assert!(
            Args::try_parse_from(["crunchy-vs-smooth", "--program-id", "xyz", "tally"]).is_err()
        );
    }

    #[test]
    fn tally_fails_unless_account_was_read() {
        assert!(tally_succeeded(AccountStatus::Initialized));
        assert!(!tally_succeeded(AccountStatus::Missing));
        // Unknown means the fetch itself failed.
        assert!(!tally_succeeded(AccountStatus::Unknown));
    }

    #[test]
    fn missing_vote_account_is_an_error() {
        let mut args = Args::try_parse_from(["crunchy-vs-smooth", "tally"]).unwrap();
        args.vote_account = None;
        assert!(args.vote_account().is_err());
    }
}
