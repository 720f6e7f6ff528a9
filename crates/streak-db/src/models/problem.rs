//! Problem database model

use sqlx::FromRow;

/// Database model for problems table
#[derive(Debug, Clone, FromRow)]
pub struct ProblemModel {
    pub id: i64,
    pub title: String,
    pub level: i16,
}
