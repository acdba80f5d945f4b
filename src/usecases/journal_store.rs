//! Journal Store - Per-User Trade Entries and Notes
//!
//! Holds the visible collections of whichever user the store is bound
//! to. `bind` is the only state transition:
//! - `bind(Some(user))` loads that user's entries and notes
//! - `bind(None)` clears both without touching storage
//!
//! Every mutation writes the complete collection back immediately.
//! Entries and notes persist independently of each other. Mutations on
//! an unbound store fail with `JournalError::NoActiveUser`.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use tracing::{debug, info, instrument, warn};

use crate::domain::journal::{NewTradeEntry, Note, NotePatch, TradeEntry};
use crate::domain::stats::{self, PnlPoint, PnlSummary};
use crate::domain::user::{User, UserId};
use crate::error::JournalError;
use crate::ports::clock::{Clock, IdGenerator, SystemClock, UuidGenerator};
use crate::ports::storage::{KeyValueStore, keys, load_json, save_json};

/// Trade-entry and note collections of the bound user.
pub struct JournalStore<S: KeyValueStore> {
  /// Shared persistence substrate.
  storage: Arc<S>,
  /// Timestamp source for `created_at` / `updated_at`.
  clock: Arc<dyn Clock>,
  /// Source of entry and note ids.
  ids: Arc<dyn IdGenerator>,
  /// Bound user, `None` while unbound.
  user_id: Option<UserId>,
  /// Visible trade entries, newest first.
  entries: Vec<TradeEntry>,
  /// Visible notes, newest first.
  notes: Vec<Note>,
}

impl<S: KeyValueStore> JournalStore<S> {
  /// Create an unbound store using the system clock and UUID ids.
  pub fn new(storage: Arc<S>) -> Self {
    Self::with_sources(storage, Arc::new(SystemClock), Arc::new(UuidGenerator))
  }

  /// Create an unbound store with custom time and id sources.
  pub fn with_sources(storage: Arc<S>, clock: Arc<dyn Clock>, ids: Arc<dyn IdGenerator>) -> Self {
    Self {
      storage,
      clock,
      ids,
      user_id: None,
      entries: Vec::new(),
      notes: Vec::new(),
    }
  }

  /// Follow a session change.
  ///
  /// Always succeeds: unreadable collections load as empty.
  #[instrument(skip(self, user), fields(user_id = user.map(|u| u.id.as_str())))]
  pub(crate) fn bind(&mut self, user: Option<&User>) {
    match user {
      Some(user) => {
        self.entries = self.load_collection(&keys::journal_entries(&user.id));
        self.notes = self.load_collection(&keys::journal_notes(&user.id));
        self.user_id = Some(user.id.clone());
        info!(
          entries = self.entries.len(),
          notes = self.notes.len(),
          "Journal bound to user"
        );
      }
      None => {
        self.user_id = None;
        self.entries.clear();
        self.notes.clear();
        debug!("Journal unbound");
      }
    }
  }

  /// Id of the bound user.
  pub fn bound_user(&self) -> Option<&str> {
    self.user_id.as_deref()
  }

  pub fn is_bound(&self) -> bool {
    self.user_id.is_some()
  }

  /// Visible trade entries, newest first.
  pub fn entries(&self) -> &[TradeEntry] {
    &self.entries
  }

  /// Visible notes, newest first.
  pub fn notes(&self) -> &[Note] {
    &self.notes
  }

  pub fn note(&self, id: &str) -> Option<&Note> {
    self.notes.iter().find(|n| n.id == id)
  }

  /// The `n` most recently added entries.
  pub fn recent_entries(&self, n: usize) -> &[TradeEntry] {
    &self.entries[..n.min(self.entries.len())]
  }

  // ── Trade entries ───────────────────────────────────────

  /// Record a trade and return it with its assigned id and timestamp.
  #[instrument(skip(self, new_entry), fields(pair = %new_entry.trading_pair))]
  pub fn add_journal_entry(&mut self, new_entry: NewTradeEntry) -> Result<TradeEntry, JournalError> {
    let key = keys::journal_entries(self.require_user()?);
    if !new_entry.profit_loss.is_finite() {
      warn!(pnl = new_entry.profit_loss, "Non-finite P/L recorded as 0");
    }
    let entry = TradeEntry::create(new_entry, self.ids.next_id(), self.clock.now());

    let mut next = Vec::with_capacity(self.entries.len() + 1);
    next.push(entry.clone());
    next.extend(self.entries.iter().cloned());
    save_json(self.storage.as_ref(), &key, &next)?;
    self.entries = next;

    info!(entry_id = %entry.id, status = %entry.trade_status, pnl = entry.profit_loss, "Trade entry added");
    Ok(entry)
  }

  /// Delete a trade entry. Unknown ids are a no-op.
  #[instrument(skip(self))]
  pub fn delete_journal_entry(&mut self, id: &str) -> Result<(), JournalError> {
    let key = keys::journal_entries(self.require_user()?);
    if !self.entries.iter().any(|e| e.id == id) {
      debug!("No such trade entry");
      return Ok(());
    }

    let next: Vec<TradeEntry> = self.entries.iter().filter(|e| e.id != id).cloned().collect();
    save_json(self.storage.as_ref(), &key, &next)?;
    self.entries = next;

    info!(remaining = self.entries.len(), "Trade entry deleted");
    Ok(())
  }

  // ── Notes ───────────────────────────────────────────────

  #[instrument(skip(self, title, content))]
  pub fn add_note(&mut self, title: &str, content: &str) -> Result<Note, JournalError> {
    let key = keys::journal_notes(self.require_user()?);
    let note = Note::create(self.ids.next_id(), title, content, self.clock.now());

    let mut next = Vec::with_capacity(self.notes.len() + 1);
    next.push(note.clone());
    next.extend(self.notes.iter().cloned());
    save_json(self.storage.as_ref(), &key, &next)?;
    self.notes = next;

    info!(note_id = %note.id, "Note added");
    Ok(note)
  }

  /// Apply a partial update. Unknown ids are a silent no-op.
  #[instrument(skip(self, patch))]
  pub fn update_note(&mut self, id: &str, patch: NotePatch) -> Result<(), JournalError> {
    let key = keys::journal_notes(self.require_user()?);
    let Some(pos) = self.notes.iter().position(|n| n.id == id) else {
      debug!("No such note");
      return Ok(());
    };

    let mut next = self.notes.clone();
    next[pos].apply(patch, self.clock.now());
    save_json(self.storage.as_ref(), &key, &next)?;
    self.notes = next;

    info!("Note updated");
    Ok(())
  }

  /// Delete a note. Unknown ids are a no-op.
  #[instrument(skip(self))]
  pub fn delete_note(&mut self, id: &str) -> Result<(), JournalError> {
    let key = keys::journal_notes(self.require_user()?);
    if !self.notes.iter().any(|n| n.id == id) {
      debug!("No such note");
      return Ok(());
    }

    let next: Vec<Note> = self.notes.iter().filter(|n| n.id != id).cloned().collect();
    save_json(self.storage.as_ref(), &key, &next)?;
    self.notes = next;

    info!(remaining = self.notes.len(), "Note deleted");
    Ok(())
  }

  // ── Statistics ──────────────────────────────────────────

  pub fn total_profit_loss(&self) -> f64 {
    stats::total_profit_loss(&self.entries)
  }

  /// Percentage of winning entries, 0 when there are none.
  pub fn win_rate(&self) -> f64 {
    stats::win_rate(&self.entries)
  }

  pub fn total_trade_count(&self) -> usize {
    self.entries.len()
  }

  /// Cumulative P/L curve ascending by trade date.
  pub fn cumulative_pnl_series(&self) -> Vec<PnlPoint> {
    stats::cumulative_series(&self.entries)
  }

  pub fn summary(&self) -> PnlSummary {
    stats::summarize(&self.entries)
  }

  // ── Internals ───────────────────────────────────────────

  fn require_user(&self) -> Result<&str, JournalError> {
    self.user_id.as_deref().ok_or(JournalError::NoActiveUser)
  }

  /// Lenient load: absent, unparseable or unreadable → empty.
  fn load_collection<T: DeserializeOwned>(&self, key: &str) -> Vec<T> {
    match load_json::<Vec<T>, S>(self.storage.as_ref(), key) {
      Ok(items) => items.unwrap_or_default(),
      Err(e) => {
        warn!(key, error = %e, "Failed to read collection, starting empty");
        Vec::new()
      }
    }
  }
}
