use async_trait::async_trait;
use meetai_scheduler::{Notification, NotificationPermission, ReminderDeliveryChannel};

/// Prints reminder notifications to the terminal.
///
/// There is no permission prompt on a terminal, so the configured permission is reported as is.
pub struct ConsoleDeliveryChannel {
    permission: NotificationPermission,
}

impl ConsoleDeliveryChannel {
    pub fn new(permission: NotificationPermission) -> Self {
        Self { permission }
    }
}

#[async_trait]
impl ReminderDeliveryChannel for ConsoleDeliveryChannel {
    async fn request_permission(&self) -> NotificationPermission {
        self.permission
    }

    async fn send_reminder_notification(&self, notification: &Notification) -> anyhow::Result<()> {
        println!("{}", format_notification(notification));
        Ok(())
    }
}

fn format_notification(notification: &Notification) -> String {
    format!(
        "🔔 {}: {} [{}]",
        notification.title, notification.body, notification.tag
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn reports_configured_permission() {
        let channel = ConsoleDeliveryChannel::new(NotificationPermission::Denied);

        assert_eq!(
            channel.request_permission().await,
            NotificationPermission::Denied
        );
    }

    #[test]
    fn notification_line_carries_title_body_and_tag() {
        let notification = Notification {
            title: "Netflix Bill Due".to_owned(),
            body: "Netflix bill ($15.99) due in 3 days".to_owned(),
            tag: "bill-1".to_owned(),
        };

        assert_eq!(
            format_notification(&notification),
            "🔔 Netflix Bill Due: Netflix bill ($15.99) due in 3 days [bill-1]"
        );
    }
}
