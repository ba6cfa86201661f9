use std::fmt::{
    self,
    Display,
    Formatter,
};

use chrono::SecondsFormat;
use colored::Colorize;

use super::side_color;
use crate::{
    logs::LogColor,
    network::Network,
    view_state::TransactionRecord,
};

pub struct PrettyHistory<'a> {
    pub history: &'a [TransactionRecord],
    /// The cluster the explorer links point at.
    pub network: &'a Network,
}

impl Display for PrettyHistory<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.history.is_empty() {
            return write!(f, "  {}", "No votes cast this session".color(LogColor::Muted));
        }

        for (i, record) in self.history.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            let color = side_color(record.side);
            writeln!(
                f,
                "{:>3}  {}  {:<7}  {}",
                (i + 1).to_string().color(LogColor::Muted),
                record.submitted_at.to_rfc3339_opts(SecondsFormat::Secs, true),
                record.side.to_string().color(color),
                record.signature,
            )?;
            write!(
                f,
                "     {}",
                self.network
                    .explorer_tx_url(&record.signature)
                    .color(LogColor::Muted)
            )?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::{
        TimeZone,
        Utc,
    };
    use crunchy_vs_smooth_interface::instructions::VoteSide;
    use solana_sdk::signature::Signature;

    use super::*;

    #[test]
    fn renders_empty_history() {
        colored::control::set_override(false);
        let rendered = PrettyHistory {
            history: &[],
            network: &Network::Devnet,
        }
        .to_string();
        assert_eq!(rendered, "  No votes cast this session");
    }

    #[test]
    fn renders_records_with_links() {
        colored::control::set_override(false);
        let submitted_at = Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap();
        let history = [
            TransactionRecord {
                signature: Signature::from([1; 64]),
                side: VoteSide::Crunchy,
                submitted_at,
            },
            TransactionRecord {
                signature: Signature::from([2; 64]),
                side: VoteSide::Smooth,
                submitted_at,
            },
        ];
        let rendered = PrettyHistory {
            history: &history,
            network: &Network::Devnet,
        }
        .to_string();
        let lines = rendered.lines().collect::<Vec<_>>();

        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("  1  2024-05-01T12:30:00Z  crunchy"));
        assert!(lines[0].ends_with(&history[0].signature.to_string()));
        assert_eq!(
            lines[1].trim(),
            Network::Devnet.explorer_tx_url(&history[0].signature)
        );
        assert!(lines[2].starts_with("  2  2024-05-01T12:30:00Z  smooth "));
        assert!(lines[3].ends_with("?cluster=devnet"));
    }
}
