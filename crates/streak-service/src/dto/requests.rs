//! Request DTOs for API endpoints
//!
//! All request DTOs implement `Deserialize` and `Validate` for input validation.

use serde::Deserialize;
use validator::{Validate, ValidationError};

use crate::services::SyncMode;

// ============================================================================
// Member Requests
// ============================================================================

/// Member registration request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Chat-platform account id
    #[validate(length(min = 1, max = 64, message = "Account id must be 1-64 characters"))]
    pub account_id: String,

    /// Judge handle
    #[validate(custom(function = "validate_handle"))]
    pub handle: String,
}

/// Set or clear the reminder hour
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NoticeHourRequest {
    /// Local hour, or null to disable reminders
    #[validate(range(max = 23, message = "Notice hour must be between 0 and 23"))]
    pub hour: Option<u8>,
}

// ============================================================================
// Query Parameters
// ============================================================================

/// `?mode=normal|initial`
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct SyncQuery {
    #[serde(default)]
    pub mode: SyncMode,
}

/// `?date=YYYY-MM-DD`, parsed by the caller
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DateQuery {
    pub date: Option<String>,
}

/// Judge handles are 3-20 characters of letters, digits, and underscores
fn validate_handle(handle: &str) -> Result<(), ValidationError> {
    let len = handle.chars().count();
    if !(3..=20).contains(&len) {
        return Err(ValidationError::new("handle_length")
            .with_message("Handle must be 3-20 characters".into()));
    }
    if !handle.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(ValidationError::new("handle_charset")
            .with_message("Handle may only contain letters, digits, and underscores".into()));
    }
    Ok(())
}
