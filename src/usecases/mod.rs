//! Use Cases Layer - Application Business Logic
//!
//! Orchestrates domain types with the storage port to implement
//! the journal's workflows.
//!
//! Use cases:
//! - `CredentialStore`: Registration, login, logout, session rehydration
//! - `JournalStore`: Per-user trade entries, notes and P/L statistics
//! - `TradingJournal`: Keeps the journal bound to the active session

pub mod credential_store;
pub mod journal_store;
pub mod trading_journal;

pub use credential_store::CredentialStore;
pub use journal_store::JournalStore;
pub use trading_journal::TradingJournal;
