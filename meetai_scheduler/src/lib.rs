mod book;
mod delivery;
mod engine;
mod generation;

pub use book::{ReminderBook, is_due};
pub use delivery::{Notification, ReminderDeliveryChannel};
pub use engine::{EngineSettings, ReminderEngine};
pub use generation::{
    BILL_REMINDER_DAYS, MEETING_LEAD_MINUTES, bill_reminder, days_until_due, generate_reminders,
    meeting_reminder,
};
pub use meetai_models::settings::NotificationPermission;
