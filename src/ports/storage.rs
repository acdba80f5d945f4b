//! Storage Port - Key-Value Persistence Interface
//!
//! The whole journal lives in a flat key-value space of JSON strings.
//! Stores only ever see this trait, never files or lock guards, so the
//! substrate (memory, filesystem, embedded database) can be swapped
//! without touching store logic.
//!
//! Key layout:
//! - `session.currentUser`      active session user, or absent
//! - `users.registry`           every registered user (with password)
//! - `journal.entries.<userId>` one user's trade entries
//! - `journal.notes.<userId>`   one user's notes

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::warn;

use crate::error::StorageFault;

/// Synchronous key-value substrate.
///
/// No transactional guarantee is assumed: each call either succeeds
/// immediately or fails with a `StorageFault` that retrying cannot fix.
pub trait KeyValueStore: Send + Sync + 'static {
  /// Read the value stored under `key`, if any.
  fn get(&self, key: &str) -> Result<Option<String>, StorageFault>;

  /// Store `value` under `key`, replacing any previous value.
  fn set(&self, key: &str, value: &str) -> Result<(), StorageFault>;

  /// Delete `key`. Removing an absent key is not an error.
  fn remove(&self, key: &str) -> Result<(), StorageFault>;
}

/// Well-known keys of the persisted layout.
pub mod keys {
  /// Active session user.
  pub const SESSION_CURRENT_USER: &str = "session.currentUser";

  /// Registered-user table.
  pub const USERS_REGISTRY: &str = "users.registry";

  /// Trade-entry collection of one user.
  pub fn journal_entries(user_id: &str) -> String {
    format!("journal.entries.{user_id}")
  }

  /// Note collection of one user.
  pub fn journal_notes(user_id: &str) -> String {
    format!("journal.notes.{user_id}")
  }
}

/// Read and decode a JSON value, leniently.
///
/// Missing keys and unparseable values both yield `None`; the latter
/// is logged. Substrate failures still propagate.
pub fn load_json<T, S>(storage: &S, key: &str) -> Result<Option<T>, StorageFault>
where
  T: DeserializeOwned,
  S: KeyValueStore + ?Sized,
{
  let Some(raw) = storage.get(key)? else {
    return Ok(None);
  };

  match serde_json::from_str::<T>(&raw) {
    Ok(value) => Ok(Some(value)),
    Err(e) => {
      warn!(key, error = %e, "Ignoring unparseable stored value");
      Ok(None)
    }
  }
}

/// Encode a value as JSON and write it, strictly.
pub fn save_json<T, S>(storage: &S, key: &str, value: &T) -> Result<(), StorageFault>
where
  T: Serialize + ?Sized,
  S: KeyValueStore + ?Sized,
{
  let json = serde_json::to_string(value).map_err(|source| StorageFault::Serialize {
    key: key.to_string(),
    source,
  })?;
  storage.set(key, &json)
}
