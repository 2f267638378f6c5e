use async_trait::async_trait;
use meetai_models::{reminder::Reminder, settings::NotificationPermission};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub body: String,
    /// Notifications sharing a tag replace each other on the receiving side.
    pub tag: String,
}

impl From<&Reminder> for Notification {
    fn from(reminder: &Reminder) -> Self {
        Self {
            title: reminder.title.clone(),
            body: reminder.message.clone(),
            tag: reminder.id.to_string(),
        }
    }
}

#[async_trait]
pub trait ReminderDeliveryChannel: Send + Sync + 'static {
    async fn request_permission(&self) -> NotificationPermission;

    async fn send_reminder_notification(&self, notification: &Notification) -> anyhow::Result<()>;
}
