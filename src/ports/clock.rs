//! Clock & Id Ports - Time and Identity Sources
//!
//! Stores never call `Utc::now()` or `Uuid::new_v4()` directly.
//! Both sources are injected so tests can pin timestamps and ids.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Wall-clock timestamp source.
pub trait Clock: Send + Sync {
  /// Current UTC time.
  fn now(&self) -> DateTime<Utc>;
}

/// Unique identifier source.
pub trait IdGenerator: Send + Sync {
  /// A fresh id, never returned before.
  fn next_id(&self) -> String;
}

/// System UTC clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
  fn now(&self) -> DateTime<Utc> {
    Utc::now()
  }
}

/// Random UUID v4 ids.
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidGenerator;

impl IdGenerator for UuidGenerator {
  fn next_id(&self) -> String {
    Uuid::new_v4().to_string()
  }
}
