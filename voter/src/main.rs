//! Terminal front-end for the crunchy-vs-smooth vote: shows the tallies, casts votes with the
//! configured wallet, and initializes the vote account when it doesn't exist yet.

use std::process::ExitCode;

use clap::Parser;

use crate::cli::Args;

pub mod cli;
pub mod session;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let args = Args::parse();
    cli::run(args).await
}
