//! Form input validation.
//!
//! Callers run these checks before issuing a mutation. The stores
//! themselves never re-validate: `signup` keeps its plain
//! duplicate-email boolean and `add_note` accepts any title.

use crate::error::ValidationError;

use super::journal::NewTradeEntry;

/// Default minimum password length for new accounts.
pub const DEFAULT_MIN_PASSWORD_LEN: usize = 6;

pub fn validate_signup(
    username: &str,
    email: &str,
    password: &str,
    min_password_len: usize,
) -> Result<(), ValidationError> {
    if username.trim().is_empty() {
        return Err(ValidationError::MissingField("username"));
    }
    if email.trim().is_empty() {
        return Err(ValidationError::MissingField("email"));
    }
    if password.chars().count() < min_password_len {
        return Err(ValidationError::PasswordTooShort {
            min: min_password_len,
        });
    }
    Ok(())
}

pub fn validate_trade_entry(entry: &NewTradeEntry) -> Result<(), ValidationError> {
    if entry.trading_pair.trim().is_empty() {
        return Err(ValidationError::MissingField("trading pair"));
    }
    Ok(())
}

pub fn validate_note_title(title: &str) -> Result<(), ValidationError> {
    if title.trim().is_empty() {
        return Err(ValidationError::MissingField("title"));
    }
    Ok(())
}

/// Parse free-text P/L input. Anything unparseable counts as 0.
pub fn parse_profit_loss(input: &str) -> f64 {
    input
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}
