use std::{sync::Arc, time::Duration};

use chrono::{DateTime, TimeDelta, Utc};
use meetai_models::{
    bill::Bill,
    meeting::Meeting,
    reminder::{Reminder, ReminderId},
    settings::{NotificationPermission, ReminderSettings},
};
use tokio::{
    sync::RwLock,
    task::{self, JoinHandle},
    time,
};
use tokio_util::sync::CancellationToken;

use crate::{
    book::ReminderBook,
    delivery::{Notification, ReminderDeliveryChannel},
    generation::generate_reminders,
};

#[derive(Debug, Clone, Copy)]
pub struct EngineSettings {
    pub check_interval: Duration,
    pub tolerance: TimeDelta,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            check_interval: Duration::from_secs(60),
            tolerance: TimeDelta::seconds(60),
        }
    }
}

impl From<&ReminderSettings> for EngineSettings {
    fn from(settings: &ReminderSettings) -> Self {
        Self {
            check_interval: Duration::from_secs(settings.check_interval_secs.max(1)),
            tolerance: i64::try_from(settings.tolerance_secs)
                .ok()
                .and_then(TimeDelta::try_seconds)
                .unwrap_or(TimeDelta::MAX),
        }
    }
}

struct PollerTask {
    task: Option<JoinHandle<()>>,
    cancellation_token: CancellationToken,
}

struct EngineState {
    book: RwLock<ReminderBook>,
    permission: RwLock<NotificationPermission>,
    delivery_channel: Arc<dyn ReminderDeliveryChannel>,
    settings: EngineSettings,
}

/// Owns the session's reminders and polls them on a fixed interval.
///
/// The poller stops when the engine is stopped or dropped.
pub struct ReminderEngine {
    state: Arc<EngineState>,
    poller: PollerTask,
}

impl ReminderEngine {
    pub async fn start(
        delivery_channel: Arc<dyn ReminderDeliveryChannel>,
        settings: EngineSettings,
    ) -> Self {
        let permission = delivery_channel.request_permission().await;
        log::info!("Notification permission is {permission:?}");

        let state = Arc::new(EngineState {
            book: RwLock::new(ReminderBook::new()),
            permission: RwLock::new(permission),
            delivery_channel,
            settings,
        });
        let poller = Self::spawn_poller(Arc::clone(&state));

        Self { state, poller }
    }

    /// Replaces the current reminders with ones derived from the given schedule.
    pub async fn generate_reminders(
        &self,
        meetings: &[Meeting],
        bills: &[Bill],
        now: DateTime<Utc>,
    ) -> usize {
        let reminders = generate_reminders(meetings, bills, now);
        let count = reminders.len();
        self.state.book.write().await.replace(reminders);

        log::info!("Generated {count} reminders");
        count
    }

    /// Delivers every reminder due at `now`. Returns the delivered reminders.
    pub async fn check_for_reminders(&self, now: DateTime<Utc>) -> Vec<Reminder> {
        check_for_reminders(&self.state, now).await
    }

    pub async fn dismiss_reminder(&self, id: &ReminderId) -> bool {
        let found = self.state.book.write().await.dismiss(id);
        if !found {
            log::warn!("Dismissed unknown reminder. [reminder_id = {id}]");
        }
        found
    }

    pub async fn active_reminders(&self) -> Vec<Reminder> {
        self.state.book.read().await.active()
    }

    pub async fn upcoming_reminders(&self, now: DateTime<Utc>) -> Vec<Reminder> {
        self.state.book.read().await.upcoming(now)
    }

    pub async fn notification_permission(&self) -> NotificationPermission {
        *self.state.permission.read().await
    }

    /// Asks the delivery channel for permission again, e.g. after the user enabled notifications.
    pub async fn request_notifications(&self) -> NotificationPermission {
        let permission = self.state.delivery_channel.request_permission().await;
        *self.state.permission.write().await = permission;
        log::info!("Notification permission is now {permission:?}");
        permission
    }

    pub async fn stop(mut self, timeout: Duration) {
        self.poller.cancellation_token.cancel();
        if let Some(task) = self.poller.task.take() {
            if time::timeout(timeout, task).await.is_err() {
                log::warn!("Reminder poller did not stop within {timeout:?}");
            }
        }
    }

    fn spawn_poller(state: Arc<EngineState>) -> PollerTask {
        let cancellation_token = CancellationToken::new();
        let task_cancellation_token = cancellation_token.child_token();

        let task = task::spawn(async move {
            let mut ticker = time::interval(state.settings.check_interval);
            // The first tick completes immediately; checks start one interval after start.
            ticker.tick().await;

            log::info!(
                "Reminder poller started (interval: {:?})",
                state.settings.check_interval
            );

            loop {
                tokio::select! {
                    _ = task_cancellation_token.cancelled() => {
                        log::info!("Reminder poller shutting down");
                        break;
                    }
                    _ = ticker.tick() => {
                        log::debug!("Running reminder check");
                        check_for_reminders(&state, Utc::now()).await;
                    }
                }
            }
        });

        PollerTask {
            task: Some(task),
            cancellation_token,
        }
    }
}

impl Drop for ReminderEngine {
    fn drop(&mut self) {
        self.poller.cancellation_token.cancel();
    }
}

async fn check_for_reminders(state: &EngineState, now: DateTime<Utc>) -> Vec<Reminder> {
    let due = state
        .book
        .write()
        .await
        .take_due(now, state.settings.tolerance);
    let permission = *state.permission.read().await;

    for reminder in due.iter() {
        deliver(reminder, state.delivery_channel.as_ref(), permission).await;
    }

    due
}

async fn deliver(
    reminder: &Reminder,
    delivery: &dyn ReminderDeliveryChannel,
    permission: NotificationPermission,
) {
    log::info!("Reminder: {}", reminder.message);

    if permission != NotificationPermission::Granted {
        log::debug!(
            "Notifications are not permitted, skipping native notification. [reminder_id = {}]",
            reminder.id
        );
        return;
    }

    let notification = Notification::from(reminder);
    if let Err(error) = delivery.send_reminder_notification(&notification).await {
        log::warn!(
            "Could not deliver reminder notification. [reminder_id = {}, error = {}]",
            reminder.id,
            error
        );
    }
}
