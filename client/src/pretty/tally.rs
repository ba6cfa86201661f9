use std::fmt::{
    self,
    Display,
    Formatter,
};

use colored::Colorize;
use crunchy_vs_smooth_interface::instructions::VoteSide;
use strum::IntoEnumIterator;

use super::side_color;
use crate::{
    ledger::VoteTally,
    logs::LogColor,
};

pub const DEFAULT_BAR_WIDTH: usize = 30;

pub struct PrettyTally<'a> {
    pub tally: &'a VoteTally,
    /// The number of cells in a full bar.
    pub bar_width: usize,
}

impl<'a> PrettyTally<'a> {
    pub fn new(tally: &'a VoteTally) -> Self {
        Self {
            tally,
            bar_width: DEFAULT_BAR_WIDTH,
        }
    }

    fn bar(&self, share: f64) -> String {
        let filled = ((share / 100.0) * self.bar_width as f64).round() as usize;
        let filled = filled.min(self.bar_width);
        format!("{}{}", "█".repeat(filled), "░".repeat(self.bar_width - filled))
    }
}

impl Display for PrettyTally<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for side in VoteSide::iter() {
            let color = side_color(side);
            let share = self.tally.share(side);
            writeln!(
                f,
                "  {:<8} {} {:>5.1}%  {}",
                side.capitalized().color(color),
                self.bar(share).color(color),
                share,
                self.tally.votes_for(side),
            )?;
        }
        write!(
            f,
            "  {:<8} {}",
            "Total".color(LogColor::Muted),
            self.tally.total()
        )
    }
}
