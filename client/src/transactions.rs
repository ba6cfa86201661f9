use std::time::Duration;

use anyhow::Context;
use colored::Colorize;
use crunchy_vs_smooth_interface::{
    error::AnchorFrameworkError,
    instructions::VoteInstruction,
};
use itertools::Itertools;
use solana_client::{
    client_error::{
        ClientError,
        ClientErrorKind,
    },
    rpc_client::RpcClient,
    rpc_response::RpcSimulateTransactionResult,
};
use solana_commitment_config::CommitmentConfig;
use solana_compute_budget_interface::ComputeBudgetInstruction;
use solana_instruction::Instruction;
use solana_sdk::{
    message::Message,
    pubkey::Pubkey,
    signature::{
        Keypair,
        Signature,
        Signer,
    },
    transaction::Transaction,
};
use solana_transaction_status::{
    EncodedConfirmedTransactionWithStatusMeta,
    UiTransactionEncoding,
};
use solana_transaction_status_client_types::option_serializer::OptionSerializer;

use crate::{
    logs::{
        log_error,
        log_info,
        log_success,
        LogColor,
    },
    network::Network,
};

pub const DEFAULT_FUND_AMOUNT: u64 = 10_000_000_000;

const AIRDROP_CONFIRMATION_ATTEMPTS: usize = 10;
const AIRDROP_POLL_INTERVAL: Duration = Duration::from_millis(500);

pub struct SendTransactionConfig {
    pub compute_budget: Option<u32>,
    pub debug_logs: Option<bool>,
}

impl Default for SendTransactionConfig {
    fn default() -> Self {
        SendTransactionConfig {
            compute_budget: Default::default(),
            debug_logs: Some(true),
        }
    }
}

/// An RPC connection to one cluster, plus the settings used when sending transactions over it.
pub struct VoteRpcClient {
    pub client: RpcClient,
    pub network: Network,
    pub config: SendTransactionConfig,
}

impl VoteRpcClient {
    pub fn new(
        network: Network,
        commitment: CommitmentConfig,
        config: Option<SendTransactionConfig>,
    ) -> Self {
        let client = RpcClient::new_with_commitment(network.url().to_string(), commitment);
        Self {
            client,
            network,
            config: config.unwrap_or_default(),
        }
    }

    pub fn commitment(&self) -> CommitmentConfig {
        self.client.commitment()
    }

    /// Requests an airdrop of `lamports` to `address` and waits a few seconds for it to land.
    pub async fn fund_account(&self, address: &Pubkey, lamports: u64) -> anyhow::Result<Signature> {
        if !self.network.has_faucet() {
            anyhow::bail!("Airdrops aren't available on {}", self.network);
        }

        let airdrop_signature = self
            .client
            .request_airdrop(address, lamports)
            .context("Failed to request airdrop")?;

        for _ in 0..AIRDROP_CONFIRMATION_ATTEMPTS {
            if self
                .client
                .confirm_transaction(&airdrop_signature)
                .context("Couldn't confirm airdrop transaction")?
            {
                return Ok(airdrop_signature);
            }
            tokio::time::sleep(AIRDROP_POLL_INTERVAL).await;
        }

        anyhow::bail!("Airdrop {airdrop_signature} wasn't confirmed in time")
    }

    /// Signs `instructions` with the payer and any extra `signers`, sends the transaction and waits
    /// for confirmation at the client's commitment.
    pub async fn send_and_confirm_txn(
        &self,
        payer: &Keypair,
        signers: &[&Keypair],
        instructions: &[Instruction],
    ) -> anyhow::Result<Signature> {
        let bh = self
            .client
            .get_latest_blockhash()
            .context("Couldn't fetch the latest blockhash")?;

        let all_instructions = [
            self.config.compute_budget.map_or(vec![], |budget| {
                vec![
                    ComputeBudgetInstruction::set_compute_unit_limit(budget),
                    ComputeBudgetInstruction::set_compute_unit_price(1),
                ]
            }),
            instructions.to_vec(),
        ]
        .concat();
        let msg = Message::new(&all_instructions, Some(&payer.pubkey()));

        let all_signers = std::iter::once(payer)
            .chain(signers.iter().copied())
            .unique_by(|kp| kp.pubkey())
            .collect::<Vec<_>>();

        let mut tx = Transaction::new_unsigned(msg);
        tx.try_sign(&all_signers[..], bh)
            .context("Couldn't sign the transaction")?;

        match self.client.send_and_confirm_transaction(&tx) {
            Ok(sig) => {
                if matches!(self.config.debug_logs, Some(true)) {
                    let signer_list = all_signers.iter().map(|kp| kp.pubkey()).join(", ");
                    let signer_info = format!("{}: {signer_list}", "signers".color(LogColor::Muted));
                    log_success("Signature", format!("{sig}\n{signer_info}"));
                    match self.get_transaction_json(sig) {
                        Ok(encoded) => print_program_logs(&encoded),
                        Err(e) => log_error("Couldn't fetch transaction logs", format!("{e:#}")),
                    }
                }
                Ok(sig)
            }
            Err(error) => {
                log_instruction_error(&error, &all_instructions);
                log_info("Payer", payer.pubkey());

                Err(error).context("Failed transaction submission")
            }
        }
    }

    pub fn get_transaction_json(
        &self,
        sig: Signature,
    ) -> anyhow::Result<EncodedConfirmedTransactionWithStatusMeta> {
        self.client
            .get_transaction_with_config(
                &sig,
                solana_client::rpc_config::RpcTransactionConfig {
                    encoding: Some(UiTransactionEncoding::Json),
                    commitment: Some(CommitmentConfig::confirmed()),
                    max_supported_transaction_version: Some(0),
                },
            )
            .context("Couldn't fetch transaction with config")
    }
}

fn print_program_logs(encoded: &EncodedConfirmedTransactionWithStatusMeta) {
    let Some(meta) = encoded.transaction.meta.as_ref() else {
        return;
    };
    if let OptionSerializer::Some(logs) = &meta.log_messages {
        for line in logs {
            println!("  {}", line.color(LogColor::Muted));
        }
    }
}

/// Logs a readable description of a preflight failure, naming the failing vote instruction and
/// decoding Anchor framework error codes where possible.
///
/// `instructions` must be every instruction in the sent message, in order, so the failing index
/// reported by the cluster lines up.
pub fn log_instruction_error(error: &ClientError, instructions: &[Instruction]) {
    use solana_client::rpc_request::{
        RpcError::RpcResponseError,
        RpcResponseErrorData,
    };
    use solana_instruction_error::InstructionError;
    use solana_transaction_error::TransactionError;

    let kind = error.kind();
    let ClientErrorKind::RpcError(RpcResponseError {
        data:
            RpcResponseErrorData::SendTransactionPreflightFailure(RpcSimulateTransactionResult {
                err: Some(ui_err),
                ..
            }),
        ..
    }) = kind
    else {
        log_error("Transaction error", error);
        return;
    };

    let TransactionError::InstructionError(ixn_idx, ixn_error) = ui_err.clone().into() else {
        log_error("Transaction error", error);
        return;
    };

    let Some(instruction) = instructions.get(ixn_idx as usize) else {
        log_error("Instruction error", format!("#{ixn_idx}: {ixn_error}"));
        return;
    };

    let ixn_name = VoteInstruction::try_from_data(&instruction.data)
        .map(|ixn| ixn.to_string())
        .unwrap_or_else(|_| format!("{}::unknown", instruction.program_id));

    match ixn_error {
        InstructionError::Custom(0) if ixn_name == VoteInstruction::Initialize.to_string() => {
            log_error("Vote program error", format!("({ixn_name}, account already in use)"));
        }
        InstructionError::Custom(code) => match AnchorFrameworkError::from_code(code) {
            Some(anchor_error) => {
                log_error("Vote program error", format!("({ixn_name}, {anchor_error})"));
            }
            None => log_error("Vote program error", format!("({ixn_name}, custom code {code})")),
        },
        other => log_error("Instruction error", format!("({ixn_name}, {other})")),
    }
}
