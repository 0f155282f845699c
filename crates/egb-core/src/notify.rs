//! Class reminders.
//!
//! A background loop ticks once a minute and announces a course to the group
//! chat shortly before it starts, gated on the store's notification flag.

use std::{collections::HashSet, sync::Arc, time::Duration};

use chrono::{DateTime, Datelike, Local, Timelike};
use tokio::task::JoinHandle;
use tokio::time::sleep;
use tokio_util::sync::CancellationToken;

use crate::{
    config::Config,
    formatting::escape_html,
    messaging::{port::MessagingPort, types::ChatId},
    schedule::model::{CourseEntry, Weekday, WeeklySchedule},
    store::BotStore,
};

const TICK: Duration = Duration::from_secs(60);

/// Courses within the reminder window: not yet started, at most
/// `lead_minutes` away. Indices are returned so callers can dedup without
/// comparing labels.
pub fn due_courses(
    courses: &[CourseEntry],
    now_minutes: i32,
    lead_minutes: i32,
) -> Vec<(usize, &CourseEntry)> {
    courses
        .iter()
        .enumerate()
        .filter(|(_, c)| {
            let until = c.start.minutes_from_midnight() - now_minutes;
            until > 0 && until <= lead_minutes
        })
        .collect()
}

pub struct ClassReminder {
    inner: Arc<ReminderInner>,
}

struct ReminderInner {
    cfg: Arc<Config>,
    store: Arc<BotStore>,
    schedule: Arc<WeeklySchedule>,
    messenger: Arc<dyn MessagingPort>,
    state: tokio::sync::Mutex<ReminderState>,
}

#[derive(Default)]
struct ReminderState {
    /// (ordinal day, course index) pairs already announced. Pruned to the
    /// current day on every tick.
    announced: HashSet<(u32, usize)>,
    cancel: Option<CancellationToken>,
    handle: Option<JoinHandle<()>>,
}

impl ClassReminder {
    pub fn new(
        cfg: Arc<Config>,
        store: Arc<BotStore>,
        schedule: Arc<WeeklySchedule>,
        messenger: Arc<dyn MessagingPort>,
    ) -> Self {
        Self {
            inner: Arc::new(ReminderInner {
                cfg,
                store,
                schedule,
                messenger,
                state: tokio::sync::Mutex::new(ReminderState::default()),
            }),
        }
    }

    pub async fn start(&self) {
        if !self.inner.cfg.reminder_enabled {
            tracing::info!("class reminders disabled by config");
            return;
        }
        if self.inner.cfg.forward_chat_id.is_none() {
            tracing::info!("class reminders need FORWARD_CHAT_ID, not starting");
            return;
        }

        let cancel = CancellationToken::new();
        let inner = self.inner.clone();
        let cancel_clone = cancel.clone();

        let handle = tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = cancel_clone.cancelled() => break,
                    _ = sleep(TICK) => tick(&inner, Local::now()).await,
                }
            }
        });

        let mut st = self.inner.state.lock().await;
        st.cancel = Some(cancel);
        st.handle = Some(handle);
    }

    pub async fn stop(&self) {
        let mut st = self.inner.state.lock().await;
        if let Some(cancel) = st.cancel.take() {
            cancel.cancel();
        }
        if let Some(handle) = st.handle.take() {
            handle.abort();
        }
    }
}

async fn tick(inner: &ReminderInner, now: DateTime<Local>) {
    if !inner.store.is_notifs_on().await {
        return;
    }
    let Some(chat) = inner.cfg.forward_chat_id else {
        return;
    };
    let Some(today) = Weekday::from_chrono(now.weekday()) else {
        return;
    };

    let courses = inner.schedule.courses_for(today).unwrap_or(&[]);
    let now_minutes = now.hour() as i32 * 60 + now.minute() as i32;
    let lead = inner.cfg.reminder_lead_minutes as i32;

    for (idx, course) in due_courses(courses, now_minutes, lead) {
        let key = (now.ordinal(), idx);
        {
            let mut st = inner.state.lock().await;
            st.announced.retain(|(day, _)| *day == now.ordinal());
            if !st.announced.insert(key) {
                continue;
            }
        }

        let until = course.start.minutes_from_midnight() - now_minutes;
        let text = format!(
            "🔔 <b>Class reminder</b>\n\n{} starts in {} minute{}.",
            escape_html(&course.name),
            until,
            if until == 1 { "" } else { "s" }
        );
        if let Err(e) = inner.messenger.send_html(ChatId(chat), &text).await {
            tracing::warn!("class reminder send failed: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::model::StartTime;

    fn course(name: &str, hour: u8, minute: u8) -> CourseEntry {
        CourseEntry {
            name: name.to_string(),
            start: StartTime { hour, minute },
            duration_hours: 1,
        }
    }

    #[test]
    fn due_exactly_at_lead_boundary() {
        let courses = vec![course("Compilers", 9, 30)];
        // 09:00 with a 30 minute lead: due.
        assert_eq!(due_courses(&courses, 9 * 60, 30).len(), 1);
        // 08:59: one minute too early.
        assert!(due_courses(&courses, 8 * 60 + 59, 30).is_empty());
    }

    #[test]
    fn started_course_is_not_due() {
        let courses = vec![course("Compilers", 9, 30)];
        assert!(due_courses(&courses, 9 * 60 + 30, 30).is_empty());
        assert!(due_courses(&courses, 10 * 60, 30).is_empty());
    }

    #[test]
    fn only_courses_inside_the_window_are_due() {
        let courses = vec![
            course("Project", 8, 30),
            course("Formal Methods", 12, 30),
            course("Accounting", 18, 30),
        ];
        let due = due_courses(&courses, 12 * 60 + 10, 30);
        assert_eq!(due.len(), 1);
        assert_eq!(due[0].0, 1);
        assert_eq!(due[0].1.name, "Formal Methods");
    }
}
