//! Ports Layer - Hexagonal Architecture Boundaries
//!
//! Defines the interfaces (traits) that the usecases layer
//! requires from the outside world. Adapters implement these traits.
//!
//! Port categories:
//! - `KeyValueStore`: Persistence substrate (get / set / remove)
//! - `Clock`: Wall-clock timestamps
//! - `IdGenerator`: Unique ids for users, entries and notes

pub mod clock;
pub mod storage;

pub use clock::{Clock, IdGenerator, SystemClock, UuidGenerator};
pub use storage::{KeyValueStore, keys};
