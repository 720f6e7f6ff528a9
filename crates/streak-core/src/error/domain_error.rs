//! Domain errors - error types for the domain layer

use thiserror::Error;

use crate::value_objects::{MemberId, ProblemId};

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("Member not found: {0}")]
    MemberNotFound(MemberId),

    #[error("No member registered for account {0}")]
    AccountNotFound(String),

    #[error("Problem not found: {0}")]
    ProblemNotFound(ProblemId),

    // =========================================================================
    // Duplicate Errors
    // =========================================================================
    #[error("Account already registered")]
    AccountAlreadyRegistered,

    #[error("Handle already registered: {0}")]
    HandleAlreadyRegistered(String),

    #[error("Problem already catalogued: {0}")]
    ProblemExists(ProblemId),

    #[error("Attendance already recorded for member {member_id}, problem {problem_id}")]
    AttendanceExists {
        member_id: MemberId,
        problem_id: ProblemId,
    },

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Invalid date (expected YYYY-MM-DD): {0}")]
    InvalidDate(String),

    // =========================================================================
    // Upstream Errors
    // =========================================================================
    #[error("Judge request failed: {0}")]
    UpstreamError(String),

    #[error("Judge responded with status {status}")]
    UpstreamStatus { status: u16 },

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            // Not Found
            Self::MemberNotFound(_) | Self::AccountNotFound(_) => "UNKNOWN_MEMBER",
            Self::ProblemNotFound(_) => "UNKNOWN_PROBLEM",

            // Duplicate
            Self::AccountAlreadyRegistered => "ACCOUNT_ALREADY_REGISTERED",
            Self::HandleAlreadyRegistered(_) => "HANDLE_ALREADY_REGISTERED",
            Self::ProblemExists(_) => "PROBLEM_EXISTS",
            Self::AttendanceExists { .. } => "ATTENDANCE_EXISTS",

            // Validation
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::InvalidDate(_) => "INVALID_DATE",

            // Upstream
            Self::UpstreamError(_) | Self::UpstreamStatus { .. } => "UPSTREAM_ERROR",

            // Infrastructure
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::MemberNotFound(_) | Self::AccountNotFound(_) | Self::ProblemNotFound(_)
        )
    }

    /// Check if this is a uniqueness violation
    pub fn is_duplicate(&self) -> bool {
        matches!(
            self,
            Self::AccountAlreadyRegistered
                | Self::HandleAlreadyRegistered(_)
                | Self::ProblemExists(_)
                | Self::AttendanceExists { .. }
        )
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::ValidationError(_) | Self::InvalidDate(_))
    }

    /// Check if the judge service failed
    pub fn is_upstream(&self) -> bool {
        matches!(self, Self::UpstreamError(_) | Self::UpstreamStatus { .. })
    }
}
