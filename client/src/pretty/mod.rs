//! Helpers for rendering the tallies and the vote history in a readable, colorized format.

pub mod history;
pub mod tally;

pub use history::PrettyHistory;
pub use tally::PrettyTally;

use crunchy_vs_smooth_interface::instructions::VoteSide;

use crate::logs::LogColor;

fn side_color(side: VoteSide) -> LogColor {
    match side {
        VoteSide::Crunchy => LogColor::Crunchy,
        VoteSide::Smooth => LogColor::Smooth,
    }
}
