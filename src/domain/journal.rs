//! Journal domain types.
//!
//! Defines the two record kinds a user keeps: trade entries and notes.
//! Both are persisted as camelCase JSON so the stored layout stays
//! readable by any client of the same key space.
//!
//! Trade entries are immutable once created. Notes accept a partial
//! title/content replacement that refreshes `updated_at`.

use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};

// ────────────────────────────────────────────
// Identifiers
// ────────────────────────────────────────────

/// Trade entry identifier (UUID v4 string).
pub type EntryId = String;

/// Note identifier (UUID v4 string).
pub type NoteId = String;

// ────────────────────────────────────────────
// Trade entries
// ────────────────────────────────────────────

/// Outcome of a recorded trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradeStatus {
    Win,
    Loss,
    Breakeven,
}

impl std::fmt::Display for TradeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Win => write!(f, "win"),
            Self::Loss => write!(f, "loss"),
            Self::Breakeven => write!(f, "breakeven"),
        }
    }
}

impl FromStr for TradeStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "win" => Ok(Self::Win),
            "loss" => Ok(Self::Loss),
            "breakeven" => Ok(Self::Breakeven),
            other => Err(format!("unknown trade status: {other}")),
        }
    }
}

/// Caller-supplied fields of a trade entry.
///
/// Everything except `id` and `created_at`, which the store assigns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTradeEntry {
    /// Calendar date the trade was taken.
    pub date: NaiveDate,
    /// Instrument, e.g. `BTC/USD`.
    pub trading_pair: String,
    /// Free-form time of day, e.g. `14:30`.
    pub time: String,
    /// Free-form risk/reward, e.g. `1:2`.
    pub risk_reward: String,
    pub trade_status: TradeStatus,
    /// Signed monetary result.
    #[serde(deserialize_with = "finite_or_zero")]
    pub profit_loss: f64,
    /// Optional screenshot URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub screenshot: Option<String>,
    pub learnings: String,
}

impl NewTradeEntry {
    /// Minimal entry with empty free-text fields.
    pub fn new(
        date: NaiveDate,
        trading_pair: impl Into<String>,
        trade_status: TradeStatus,
        profit_loss: f64,
    ) -> Self {
        Self {
            date,
            trading_pair: trading_pair.into(),
            time: String::new(),
            risk_reward: String::new(),
            trade_status,
            profit_loss,
            screenshot: None,
            learnings: String::new(),
        }
    }
}

/// A recorded trade. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeEntry {
    pub id: EntryId,
    pub date: NaiveDate,
    pub trading_pair: String,
    pub time: String,
    pub risk_reward: String,
    pub trade_status: TradeStatus,
    #[serde(deserialize_with = "finite_or_zero")]
    pub profit_loss: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub screenshot: Option<String>,
    pub learnings: String,
    pub created_at: DateTime<Utc>,
}

impl TradeEntry {
    /// Stamp caller-supplied fields with an id and creation time.
    ///
    /// A non-finite `profit_loss` is stored as 0, since JSON cannot
    /// represent it.
    pub fn create(fields: NewTradeEntry, id: EntryId, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            date: fields.date,
            trading_pair: fields.trading_pair,
            time: fields.time,
            risk_reward: fields.risk_reward,
            trade_status: fields.trade_status,
            profit_loss: finite_pnl(fields.profit_loss),
            screenshot: fields.screenshot,
            learnings: fields.learnings,
            created_at,
        }
    }

    pub fn is_win(&self) -> bool {
        self.trade_status == TradeStatus::Win
    }
}

// ────────────────────────────────────────────
// Notes
// ────────────────────────────────────────────

/// A free-form titled note, independent of any trade.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: NoteId,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Note {
    /// New note with `created_at == updated_at == now`.
    pub fn create(
        id: NoteId,
        title: impl Into<String>,
        content: impl Into<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            content: content.into(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace the fields present in `patch` and refresh `updated_at`.
    ///
    /// `updated_at` is refreshed even for an empty patch.
    pub fn apply(&mut self, patch: NotePatch, now: DateTime<Utc>) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(content) = patch.content {
            self.content = content;
        }
        self.updated_at = now;
    }
}

/// Partial note update. `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotePatch {
    pub title: Option<String>,
    pub content: Option<String>,
}

impl NotePatch {
    pub fn title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            content: None,
        }
    }

    pub fn content(content: impl Into<String>) -> Self {
        Self {
            title: None,
            content: Some(content.into()),
        }
    }

    /// Full title + content replacement, as the note editor submits it.
    pub fn replace(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            content: Some(content.into()),
        }
    }
}

/// Non-finite P/L (NaN, ±inf) counts as 0.
pub fn finite_pnl(value: f64) -> f64 {
    if value.is_finite() { value } else { 0.0 }
}

/// Reads `null` (how JSON encodes a non-finite number) as 0.
fn finite_or_zero<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<f64>::deserialize(deserializer)?;
    Ok(value.map_or(0.0, finite_pnl))
}
