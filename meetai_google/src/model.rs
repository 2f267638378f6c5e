use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime, Utc};
use meetai_models::{meeting::Meeting, user::User};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventDateTime {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_time: Option<DateTime<FixedOffset>>,
    /// Set instead of `date_time` for all-day events.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
}

impl EventDateTime {
    pub fn at(instant: DateTime<Utc>) -> Self {
        Self {
            date_time: Some(instant.fixed_offset()),
            date: None,
        }
    }

    /// All-day dates resolve to midnight UTC.
    pub fn instant(&self) -> Option<DateTime<Utc>> {
        self.date_time
            .map(|date_time| date_time.with_timezone(&Utc))
            .or_else(|| self.date.map(|date| date.and_time(NaiveTime::MIN).and_utc()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub id: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub start: EventDateTime,
    #[serde(default)]
    pub end: EventDateTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

impl CalendarEvent {
    /// Events without a usable start are dropped. A missing end collapses onto the start.
    pub fn to_meeting(&self) -> Option<Meeting> {
        let start_time = self.start.instant()?;
        let end_time = self.end.instant().unwrap_or(start_time);

        Some(Meeting {
            id: self.id.clone(),
            title: self.summary.clone(),
            start_time,
            end_time,
            location: self.location.clone(),
        })
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct EventList {
    #[serde(default)]
    pub items: Vec<CalendarEvent>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GoogleProfile {
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub picture: String,
}

impl From<GoogleProfile> for User {
    fn from(profile: GoogleProfile) -> Self {
        Self {
            id: profile.id,
            email: profile.email,
            name: profile.name,
            picture: profile.picture,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct TokenResponse {
    pub access_token: String,
}
