//! Domain layer - Core journal models and statistics.
//!
//! Pure types and functions: no storage, no clocks, no logging.
//! All persisted types are serde-serializable and testable in isolation.

pub mod journal;
pub mod stats;
pub mod user;
pub mod validation;

// Re-export core types for convenience
pub use journal::{EntryId, NewTradeEntry, Note, NoteId, NotePatch, TradeEntry, TradeStatus};
pub use stats::{PnlPoint, PnlSummary, StatusCounts};
pub use user::{RegisteredUser, User, UserId};
