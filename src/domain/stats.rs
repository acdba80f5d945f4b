//! P/L statistics over a trade-entry collection.
//!
//! Pure functions over `&[TradeEntry]` in display order (newest first).
//! Nothing here reorders or mutates the input; the cumulative series
//! sorts a private copy.

use chrono::NaiveDate;
use serde::Serialize;

use super::journal::{TradeEntry, TradeStatus};

/// One point of the cumulative P/L curve.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PnlPoint {
    /// Trade date of the entry this point ends on.
    pub date: NaiveDate,
    /// Running sum of P/L up to and including this entry.
    pub cumulative: f64,
    /// This entry's own P/L.
    pub pnl: f64,
}

impl PnlPoint {
    /// Short axis label, e.g. `Jan 1`.
    pub fn label(&self) -> String {
        self.date.format("%b %-d").to_string()
    }
}

/// Outcome counts across a collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusCounts {
    pub wins: usize,
    pub losses: usize,
    pub breakevens: usize,
}

/// Dashboard headline numbers.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PnlSummary {
    pub total_profit_loss: f64,
    /// Percentage in `[0, 100]`.
    pub win_rate: f64,
    pub total_trades: usize,
    pub wins: usize,
    pub losses: usize,
    pub breakevens: usize,
}

/// Sum of `profit_loss`. Empty → 0.
pub fn total_profit_loss(entries: &[TradeEntry]) -> f64 {
    entries.iter().map(|e| e.profit_loss).sum()
}

/// `100 × wins / total`, or 0 when there are no entries.
pub fn win_rate(entries: &[TradeEntry]) -> f64 {
    if entries.is_empty() {
        return 0.0;
    }
    let wins = entries.iter().filter(|e| e.is_win()).count();
    (wins as f64 / entries.len() as f64) * 100.0
}

pub fn count_by_status(entries: &[TradeEntry]) -> StatusCounts {
    entries
        .iter()
        .fold(StatusCounts::default(), |mut acc, e| {
            match e.trade_status {
                TradeStatus::Win => acc.wins += 1,
                TradeStatus::Loss => acc.losses += 1,
                TradeStatus::Breakeven => acc.breakevens += 1,
            }
            acc
        })
}

/// Cumulative P/L curve, ascending by trade date.
///
/// The sort is stable, so entries sharing a date keep their
/// display-order position relative to each other.
pub fn cumulative_series(entries: &[TradeEntry]) -> Vec<PnlPoint> {
    let mut sorted: Vec<&TradeEntry> = entries.iter().collect();
    sorted.sort_by_key(|e| e.date);

    let mut running = 0.0;
    sorted
        .into_iter()
        .map(|e| {
            running += e.profit_loss;
            PnlPoint {
                date: e.date,
                cumulative: running,
                pnl: e.profit_loss,
            }
        })
        .collect()
}

pub fn summarize(entries: &[TradeEntry]) -> PnlSummary {
    let counts = count_by_status(entries);
    PnlSummary {
        total_profit_loss: total_profit_loss(entries),
        win_rate: win_rate(entries),
        total_trades: entries.len(),
        wins: counts.wins,
        losses: counts.losses,
        breakevens: counts.breakevens,
    }
}
