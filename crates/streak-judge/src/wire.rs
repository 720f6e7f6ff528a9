//! solved.ac response bodies

use serde::Deserialize;

use streak_core::error::DomainError;
use streak_core::traits::{JudgeProfile, SolvedPage, SolvedProblem};
use streak_core::value_objects::{Level, ProblemId, Tier};

/// `GET /user/show`
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct UserShow {
    pub handle: String,
    pub tier: i64,
    #[serde(default)]
    pub rating: i32,
    #[serde(default)]
    pub bio: String,
    #[serde(default)]
    pub solved_count: i32,
    pub profile_image_url: Option<String>,
}

/// `GET /search/problem`
#[derive(Debug, Deserialize)]
pub(crate) struct SearchPage {
    pub count: u64,
    #[serde(default)]
    pub items: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SearchItem {
    pub problem_id: i64,
    #[serde(default)]
    pub title_ko: String,
    pub level: i64,
}

fn malformed(what: impl std::fmt::Display) -> DomainError {
    DomainError::UpstreamError(format!("malformed response: {what}"))
}

impl TryFrom<UserShow> for JudgeProfile {
    type Error = DomainError;

    fn try_from(body: UserShow) -> Result<Self, Self::Error> {
        Ok(JudgeProfile {
            tier: Tier::new(body.tier).map_err(malformed)?,
            handle: body.handle,
            rating: body.rating,
            bio: body.bio,
            solved_count: body.solved_count,
            profile_image_url: body.profile_image_url.filter(|url| !url.is_empty()),
        })
    }
}

impl TryFrom<SearchPage> for SolvedPage {
    type Error = DomainError;

    fn try_from(body: SearchPage) -> Result<Self, Self::Error> {
        let items = body
            .items
            .into_iter()
            .map(|item| {
                Ok(SolvedProblem {
                    problem_id: ProblemId::new(item.problem_id),
                    title: item.title_ko,
                    level: Level::new(item.level).map_err(malformed)?,
                })
            })
            .collect::<Result<Vec<_>, DomainError>>()?;

        Ok(SolvedPage {
            count: body.count,
            items,
        })
    }
}
