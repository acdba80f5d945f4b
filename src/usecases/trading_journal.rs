//! Trading Journal - Session-Aware Composition of Both Stores
//!
//! Owns one `CredentialStore` and one `JournalStore` over the same
//! substrate. Every session change made through this type rebinds the
//! journal, so its visible collections always belong to the logged-in
//! user (or are empty when nobody is).
//!
//! `register`, `record_trade` and `write_note` run the form checks from
//! `domain::validation` before delegating to the stores.

use std::sync::Arc;

use crate::domain::journal::{NewTradeEntry, Note, TradeEntry};
use crate::domain::user::User;
use crate::domain::validation::{
  DEFAULT_MIN_PASSWORD_LEN, validate_note_title, validate_signup, validate_trade_entry,
};
use crate::error::{JournalError, StorageFault};
use crate::ports::clock::{Clock, IdGenerator, SystemClock, UuidGenerator};
use crate::ports::storage::KeyValueStore;

use super::credential_store::CredentialStore;
use super::journal_store::JournalStore;

/// Credential + journal stores wired to one session.
pub struct TradingJournal<S: KeyValueStore> {
  credentials: CredentialStore<S>,
  journal: JournalStore<S>,
  /// Minimum password length enforced by `register`.
  min_password_len: usize,
}

impl<S: KeyValueStore> TradingJournal<S> {
  /// Open both stores, rehydrate the session and bind the journal to it.
  pub fn open(storage: Arc<S>) -> Result<Self, StorageFault> {
    Self::with_sources(storage, Arc::new(SystemClock), Arc::new(UuidGenerator))
  }

  /// Open with custom time and id sources.
  pub fn with_sources(
    storage: Arc<S>,
    clock: Arc<dyn Clock>,
    ids: Arc<dyn IdGenerator>,
  ) -> Result<Self, StorageFault> {
    let credentials = CredentialStore::with_ids(Arc::clone(&storage), Arc::clone(&ids))?;
    let journal = JournalStore::with_sources(storage, clock, ids);

    let mut app = Self {
      credentials,
      journal,
      min_password_len: DEFAULT_MIN_PASSWORD_LEN,
    };
    app.sync_session();
    Ok(app)
  }

  pub fn login(&mut self, email: &str, password: &str) -> Result<bool, StorageFault> {
    let ok = self.credentials.login(email, password)?;
    if ok {
      self.sync_session();
    }
    Ok(ok)
  }

  pub fn signup(&mut self, username: &str, email: &str, password: &str) -> Result<bool, StorageFault> {
    let ok = self.credentials.signup(username, email, password)?;
    if ok {
      self.sync_session();
    }
    Ok(ok)
  }

  /// Override the password length `register` requires.
  pub fn with_min_password_len(mut self, min_password_len: usize) -> Self {
    self.min_password_len = min_password_len;
    self
  }

  /// Validate the signup form, then `signup`.
  pub fn register(&mut self, username: &str, email: &str, password: &str) -> Result<bool, JournalError> {
    validate_signup(username, email, password, self.min_password_len)?;
    Ok(self.signup(username, email, password)?)
  }

  /// Validate a trade form, then add it to the active user's journal.
  pub fn record_trade(&mut self, entry: NewTradeEntry) -> Result<TradeEntry, JournalError> {
    validate_trade_entry(&entry)?;
    self.journal.add_journal_entry(entry)
  }

  /// Validate a note title, then add the note.
  pub fn write_note(&mut self, title: &str, content: &str) -> Result<Note, JournalError> {
    validate_note_title(title)?;
    self.journal.add_note(title, content)
  }

  /// Log out and unbind the journal, even if the persisted session
  /// could not be removed.
  pub fn logout(&mut self) -> Result<(), StorageFault> {
    let result = self.credentials.logout();
    self.sync_session();
    result
  }

  pub fn current_user(&self) -> Option<&User> {
    self.credentials.current_user()
  }

  pub fn is_authenticated(&self) -> bool {
    self.credentials.is_authenticated()
  }

  pub fn credentials(&self) -> &CredentialStore<S> {
    &self.credentials
  }

  pub fn journal(&self) -> &JournalStore<S> {
    &self.journal
  }

  /// Mutable journal access for entry and note commands.
  pub fn journal_mut(&mut self) -> &mut JournalStore<S> {
    &mut self.journal
  }

  fn sync_session(&mut self) {
    self.journal.bind(self.credentials.current_user());
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::adapters::persistence::MemoryStore;
  use crate::domain::journal::TradeStatus;
  use crate::error::ValidationError;
  use chrono::NaiveDate;

  fn entry(pnl: f64) -> NewTradeEntry {
    NewTradeEntry::new(
      NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
      "BTC/USD",
      TradeStatus::Win,
      pnl,
    )
  }

  #[test]
  fn test_signup_binds_journal() {
    let mut app = TradingJournal::open(Arc::new(MemoryStore::new())).unwrap();
    assert!(!app.journal().is_bound());

    assert!(app.signup("trader1", "t1@example.com", "secret1").unwrap());
    assert_eq!(
      app.journal().bound_user(),
      app.current_user().map(|u| u.id.as_str())
    );
  }

  #[test]
  fn test_failed_login_keeps_binding() {
    let mut app = TradingJournal::open(Arc::new(MemoryStore::new())).unwrap();
    app.signup("trader1", "t1@example.com", "secret1").unwrap();
    app.journal_mut().add_journal_entry(entry(10.0)).unwrap();

    assert!(!app.login("t1@example.com", "nope").unwrap());
    assert_eq!(app.journal().total_trade_count(), 1);
  }

  #[test]
  fn test_logout_and_reopen() {
    let storage = Arc::new(MemoryStore::new());
    let mut app = TradingJournal::open(Arc::clone(&storage)).unwrap();
    app.signup("trader1", "t1@example.com", "secret1").unwrap();
    app.journal_mut().add_journal_entry(entry(42.0)).unwrap();

    // Reopen while logged in: session and journal come back together
    let reopened = TradingJournal::open(Arc::clone(&storage)).unwrap();
    assert!(reopened.is_authenticated());
    assert_eq!(reopened.journal().total_trade_count(), 1);

    app.logout().unwrap();
    assert!(!app.journal().is_bound());
    assert_eq!(app.journal().total_trade_count(), 0);

    let reopened = TradingJournal::open(storage).unwrap();
    assert!(!reopened.is_authenticated());
    assert!(!reopened.journal().is_bound());
  }

  #[test]
  fn test_register_enforces_configured_password_length() {
    let mut app = TradingJournal::open(Arc::new(MemoryStore::new()))
      .unwrap()
      .with_min_password_len(10);

    assert!(matches!(
      app.register("trader1", "t1@example.com", "secret1"),
      Err(JournalError::Invalid(ValidationError::PasswordTooShort { min: 10 }))
    ));
    assert!(!app.is_authenticated());
    assert_eq!(app.credentials().registered_count().unwrap(), 0);

    assert!(app.register("trader1", "t1@example.com", "long-secret").unwrap());
    assert!(!app.register("again", "t1@example.com", "long-secret").unwrap());
  }

  #[test]
  fn test_record_trade_and_write_note_validate_first() {
    let mut app = TradingJournal::open(Arc::new(MemoryStore::new())).unwrap();
    app.register("trader1", "t1@example.com", "secret1").unwrap();

    let mut blank = entry(5.0);
    blank.trading_pair = "  ".to_string();
    assert!(matches!(
      app.record_trade(blank),
      Err(JournalError::Invalid(ValidationError::MissingField(_)))
    ));
    assert!(matches!(app.write_note(" ", "body"), Err(JournalError::Invalid(_))));
    assert_eq!(app.journal().total_trade_count(), 0);
    assert!(app.journal().notes().is_empty());

    app.record_trade(entry(5.0)).unwrap();
    app.write_note("Plan", "Buy dips").unwrap();
    assert_eq!(app.journal().total_trade_count(), 1);
    assert_eq!(app.journal().notes().len(), 1);
  }
}
