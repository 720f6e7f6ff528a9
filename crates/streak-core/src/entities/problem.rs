//! Problem entity - a catalog entry observed on the judge

use serde::Serialize;

use crate::value_objects::{Level, ProblemId};

/// Judge problem, immutable once catalogued
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Problem {
    pub id: ProblemId,
    pub title: String,
    pub level: Level,
}

impl Problem {
    pub fn new(id: ProblemId, title: impl Into<String>, level: Level) -> Self {
        Self {
            id,
            title: title.into(),
            level,
        }
    }
}
