//! Reminder selection
//!
//! Delivery is external; this only decides who should hear from us now.

use chrono::{DateTime, Utc};
use tracing::{instrument, warn};

use streak_core::entities::qualified_count;

use crate::dto::ReminderResponse;

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Reminder service
pub struct ReminderService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ReminderService<'a> {
    /// Create a new ReminderService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Active members whose notice hour is the current local hour and who have
    /// no qualifying record in the current day window
    #[instrument(skip(self))]
    pub async fn due_reminders(&self, now: Option<DateTime<Utc>>) -> ServiceResult<Vec<ReminderResponse>> {
        let now = now.unwrap_or_else(|| self.ctx.now());
        let calendar = self.ctx.calendar();
        let hour = calendar.local_hour(now);
        let day = calendar.day_window(now);

        let members = self.ctx.member_repo().find_active().await?;
        let mut due = Vec::new();

        for member in members {
            let Some(notice_hour) = member.notice_hour else {
                continue;
            };
            if u32::from(notice_hour) != hour {
                continue;
            }

            let records = match self
                .ctx
                .attendance_repo()
                .find_in_range(member.id, day.start, day.end)
                .await
            {
                Ok(records) => records,
                Err(e) => {
                    warn!(member_id = %member.id, error = %e, "Reminder check failed, skipping");
                    continue;
                }
            };

            let qualified = qualified_count(&records);
            if qualified > 0 {
                continue;
            }

            due.push(ReminderResponse {
                member_id: member.id.into_inner(),
                account_id: member.account_id,
                handle: member.handle,
                notice_hour,
                qualified_count: qualified,
                total_count: records.len(),
            });
        }

        Ok(due)
    }
}
