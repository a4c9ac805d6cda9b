//! Account Forms
//!
//! Local checks for the password change/reset forms and account
//! withdrawal. The forms post natively once these pass.

use crate::error::{FeedError, FeedResult};

/// Live state of a new-password / confirmation pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordMatch {
    /// One of the fields is still empty
    Incomplete,
    Matches,
    Differs,
}

impl PasswordMatch {
    pub fn check(password1: &str, password2: &str) -> Self {
        if password1.is_empty() || password2.is_empty() {
            PasswordMatch::Incomplete
        } else if password1 == password2 {
            PasswordMatch::Matches
        } else {
            PasswordMatch::Differs
        }
    }

    /// Submit stays enabled until a mismatch is visible
    pub fn allows_submit(&self) -> bool {
        !matches!(self, PasswordMatch::Differs)
    }
}

/// Final check on submit
pub fn validate_new_password(password1: &str, password2: &str) -> FeedResult<()> {
    if password1.is_empty() {
        return Err(FeedError::MissingField("password1".to_string()));
    }
    if password1 != password2 {
        return Err(FeedError::InvalidField {
            field: "password2".to_string(),
            reason: "Passwords do not match.".to_string(),
        });
    }
    Ok(())
}

/// Withdrawal needs the agreement box ticked; the caller confirms afterwards
pub fn validate_withdrawal(agreed: bool) -> FeedResult<()> {
    if agreed {
        Ok(())
    } else {
        Err(FeedError::MissingField("agreement".to_string()))
    }
}
