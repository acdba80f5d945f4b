//! Credential Store - Registered Users and the Active Session
//!
//! Owns the registered-user table and the single session pointer:
//! - `login`: exact email + password match against the registry
//! - `signup`: register a new user unless the email is taken
//! - `logout`: drop the session unconditionally
//! - `open`: rehydrate a persisted session without re-validating it
//!
//! Wrong credentials and duplicate emails are routine outcomes and come
//! back as `Ok(false)`. Only substrate failures are errors.

use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use crate::domain::user::{RegisteredUser, User};
use crate::error::StorageFault;
use crate::ports::clock::{IdGenerator, UuidGenerator};
use crate::ports::storage::{KeyValueStore, keys, load_json, save_json};

/// Registry + session store over a shared key-value substrate.
pub struct CredentialStore<S: KeyValueStore> {
  /// Shared persistence substrate.
  storage: Arc<S>,
  /// Source of new user ids.
  ids: Arc<dyn IdGenerator>,
  /// Active session, password stripped.
  current: Option<User>,
}

impl<S: KeyValueStore> CredentialStore<S> {
  /// Open the store and rehydrate any persisted session.
  pub fn open(storage: Arc<S>) -> Result<Self, StorageFault> {
    Self::with_ids(storage, Arc::new(UuidGenerator))
  }

  /// Open with a custom id source.
  pub fn with_ids(storage: Arc<S>, ids: Arc<dyn IdGenerator>) -> Result<Self, StorageFault> {
    let current: Option<User> = load_json(storage.as_ref(), keys::SESSION_CURRENT_USER)?;

    match &current {
      Some(user) => info!(user_id = %user.id, "Session rehydrated"),
      None => debug!("No persisted session"),
    }

    Ok(Self {
      storage,
      ids,
      current,
    })
  }

  /// The active session user, if any.
  pub fn current_user(&self) -> Option<&User> {
    self.current.as_ref()
  }

  pub fn is_authenticated(&self) -> bool {
    self.current.is_some()
  }

  /// Number of registered users.
  pub fn registered_count(&self) -> Result<usize, StorageFault> {
    Ok(self.registry()?.len())
  }

  /// Log in with an exact email + password match.
  ///
  /// On a miss the session is left untouched.
  #[instrument(skip(self, password))]
  pub fn login(&mut self, email: &str, password: &str) -> Result<bool, StorageFault> {
    let registry = self.registry()?;
    let Some(found) = registry.iter().find(|u| u.matches(email, password)) else {
      debug!("Login rejected");
      return Ok(false);
    };

    let user = found.to_user();
    self.persist_session(&user)?;
    info!(user_id = %user.id, "Logged in");
    self.current = Some(user);
    Ok(true)
  }

  /// Register a new user and make it the active session.
  ///
  /// Returns `Ok(false)` when the email is already registered; the
  /// registry and session are then left untouched. If the session
  /// cannot be written, the registry is restored to its prior state.
  #[instrument(skip(self, password))]
  pub fn signup(&mut self, username: &str, email: &str, password: &str) -> Result<bool, StorageFault> {
    let mut registry = self.registry()?;
    if registry.iter().any(|u| u.email == email) {
      debug!("Signup rejected: email already registered");
      return Ok(false);
    }

    let record = RegisteredUser {
      id: self.ids.next_id(),
      username: username.to_string(),
      email: email.to_string(),
      password: password.to_string(),
    };
    let user = record.to_user();

    let previous = registry.clone();
    registry.push(record);
    save_json(self.storage.as_ref(), keys::USERS_REGISTRY, &registry)?;
    if let Err(e) = self.persist_session(&user) {
      // Undo the registration: no new account without its session
      if let Err(rollback) = save_json(self.storage.as_ref(), keys::USERS_REGISTRY, &previous) {
        warn!(error = %rollback, "Registry rollback failed");
      }
      return Err(e);
    }

    info!(user_id = %user.id, registered = registry.len(), "Signed up");
    self.current = Some(user);
    Ok(true)
  }

  /// Clear the session. The in-memory session is dropped even if
  /// removing the persisted copy fails.
  #[instrument(skip(self))]
  pub fn logout(&mut self) -> Result<(), StorageFault> {
    if let Some(user) = self.current.take() {
      info!(user_id = %user.id, "Logged out");
    }
    self.storage.remove(keys::SESSION_CURRENT_USER)
  }

  /// Registered-user table. Missing or unparseable → empty.
  fn registry(&self) -> Result<Vec<RegisteredUser>, StorageFault> {
    Ok(load_json(self.storage.as_ref(), keys::USERS_REGISTRY)?.unwrap_or_default())
  }

  fn persist_session(&self, user: &User) -> Result<(), StorageFault> {
    save_json(self.storage.as_ref(), keys::SESSION_CURRENT_USER, user)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::adapters::persistence::MemoryStore;

  fn open_store() -> (Arc<MemoryStore>, CredentialStore<MemoryStore>) {
    let storage = Arc::new(MemoryStore::new());
    let store = CredentialStore::open(Arc::clone(&storage)).unwrap();
    (storage, store)
  }

  #[test]
  fn test_signup_then_login() {
    let (_, mut store) = open_store();
    assert!(!store.is_authenticated());

    assert!(store.signup("trader1", "t1@example.com", "secret1").unwrap());
    assert_eq!(store.current_user().unwrap().username, "trader1");

    store.logout().unwrap();
    assert!(store.current_user().is_none());

    assert!(store.login("t1@example.com", "secret1").unwrap());
    assert_eq!(store.current_user().unwrap().email, "t1@example.com");
  }

  #[test]
  fn test_duplicate_email_rejected() {
    let (storage, mut store) = open_store();
    assert!(store.signup("trader1", "t1@example.com", "secret1").unwrap());
    let first_id = store.current_user().unwrap().id.clone();
    let registry_before = storage.get(keys::USERS_REGISTRY).unwrap();

    assert!(!store.signup("imposter", "t1@example.com", "other").unwrap());
    assert_eq!(store.current_user().unwrap().id, first_id);
    assert_eq!(storage.get(keys::USERS_REGISTRY).unwrap(), registry_before);
    assert_eq!(store.registered_count().unwrap(), 1);
  }

  #[test]
  fn test_wrong_password_keeps_session() {
    let (_, mut store) = open_store();
    store.signup("trader1", "t1@example.com", "secret1").unwrap();
    store.signup("trader2", "t2@example.com", "secret2").unwrap();
    let active = store.current_user().cloned();

    assert!(!store.login("t1@example.com", "wrong").unwrap());
    assert_eq!(store.current_user().cloned(), active);
  }

  #[test]
  fn test_session_persisted_without_password() {
    let (storage, mut store) = open_store();
    store.signup("trader1", "t1@example.com", "secret1").unwrap();

    let session = storage.get(keys::SESSION_CURRENT_USER).unwrap().unwrap();
    assert!(!session.contains("secret1"));
    let registry = storage.get(keys::USERS_REGISTRY).unwrap().unwrap();
    assert!(registry.contains("secret1"));
  }

  #[test]
  fn test_rehydrates_session_on_open() {
    let (storage, mut store) = open_store();
    store.signup("trader1", "t1@example.com", "secret1").unwrap();
    let id = store.current_user().unwrap().id.clone();

    let reopened = CredentialStore::open(Arc::clone(&storage)).unwrap();
    assert_eq!(reopened.current_user().unwrap().id, id);

    store.logout().unwrap();
    assert!(storage.get(keys::SESSION_CURRENT_USER).unwrap().is_none());
    let reopened = CredentialStore::open(storage).unwrap();
    assert!(!reopened.is_authenticated());
  }

  #[test]
  fn test_corrupt_session_ignored() {
    let storage = Arc::new(MemoryStore::new());
    storage.set(keys::SESSION_CURRENT_USER, "not json").unwrap();
    let store = CredentialStore::open(storage).unwrap();
    assert!(store.current_user().is_none());
  }

  /// Memory store whose session writes always fail.
  struct SessionWriteFails(MemoryStore);

  impl KeyValueStore for SessionWriteFails {
    fn get(&self, key: &str) -> Result<Option<String>, StorageFault> {
      self.0.get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageFault> {
      if key == keys::SESSION_CURRENT_USER {
        return Err(StorageFault::Backend("session write refused".to_string()));
      }
      self.0.set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageFault> {
      self.0.remove(key)
    }
  }

  #[test]
  fn test_signup_session_failure_rolls_back_registry() {
    let storage = Arc::new(SessionWriteFails(MemoryStore::new()));
    let mut store = CredentialStore::open(Arc::clone(&storage)).unwrap();

    assert!(store.signup("trader1", "t1@example.com", "secret1").is_err());
    assert!(!store.is_authenticated());
    assert_eq!(store.registered_count().unwrap(), 0);

    // The email is still free, so a retry is not reported as a duplicate
    assert!(store.signup("trader1", "t1@example.com", "secret1").is_err());
    assert_eq!(store.registered_count().unwrap(), 0);
  }
}
