use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReminderKind {
    Meeting,
    Bill,
}

impl ReminderKind {
    fn prefix(&self) -> &'static str {
        match self {
            ReminderKind::Meeting => "meeting",
            ReminderKind::Bill => "bill",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ReminderId(String);

impl ReminderId {
    /// Ids are derived from the source entity so regenerating a reminder yields the same id.
    pub fn for_source(kind: ReminderKind, source_id: &str) -> Self {
        Self(format!("{}-{}", kind.prefix(), source_id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ReminderId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl fmt::Display for ReminderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reminder {
    pub id: ReminderId,
    pub kind: ReminderKind,
    pub title: String,
    pub message: String,
    pub fire_at: DateTime<Utc>,
    pub dismissed: bool,
}

impl Reminder {
    pub fn new(
        kind: ReminderKind,
        source_id: &str,
        title: String,
        message: String,
        fire_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: ReminderId::for_source(kind, source_id),
            kind,
            title,
            message,
            fire_at,
            dismissed: false,
        }
    }

    pub fn dismiss(&mut self) {
        self.dismissed = true;
    }

    pub fn is_active(&self) -> bool {
        !self.dismissed
    }

    pub fn is_upcoming(&self, now: DateTime<Utc>) -> bool {
        self.fire_at > now && !self.dismissed
    }
}
