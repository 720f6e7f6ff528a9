//! Problem entity <-> model mapper

use streak_core::entities::Problem;
use streak_core::error::DomainError;
use streak_core::value_objects::{Level, ProblemId};

use crate::models::ProblemModel;

impl TryFrom<ProblemModel> for Problem {
    type Error = DomainError;

    fn try_from(model: ProblemModel) -> Result<Self, Self::Error> {
        let level = Level::new(i64::from(model.level))
            .map_err(|e| DomainError::DatabaseError(format!("problem {}: {e}", model.id)))?;
        Ok(Problem::new(ProblemId::new(model.id), model.title, level))
    }
}
