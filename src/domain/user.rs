//! User identity types.
//!
//! Two shapes of the same record:
//! - `RegisteredUser`: the full registry row, password included
//! - `User`: the session view, password stripped

use serde::{Deserialize, Serialize};

/// Lightweight user identifier (UUID v4 string).
pub type UserId = String;

/// Session view of a user. Never carries the password.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub email: String,
}

/// A row in the registered-user table.
///
/// The password is kept and compared in plaintext. See DESIGN.md.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisteredUser {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub password: String,
}

impl RegisteredUser {
    /// Exact, case-sensitive match on both email and password.
    pub fn matches(&self, email: &str, password: &str) -> bool {
        self.email == email && self.password == password
    }

    /// Session view of this record.
    pub fn to_user(&self) -> User {
        User {
            id: self.id.clone(),
            username: self.username.clone(),
            email: self.email.clone(),
        }
    }
}
