use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, TimeZone, Timelike, Utc};
use chrono_tz::Tz;
use meetai_models::{
    bill::{Amount, Bill, BillStatus},
    meeting::Meeting,
    suggestion::{Suggestion, SuggestionKind},
};
use rand::seq::IndexedRandom;

pub const DEFAULT_BILL_WINDOW_DAYS: i64 = 7;

/// Read-only snapshots of the user's schedule, bills and suggestions.
#[derive(Debug, Clone)]
pub struct DataSource {
    meetings: Vec<Meeting>,
    bills: Vec<Bill>,
    suggestions: Vec<Suggestion>,
}

impl DataSource {
    pub fn new(meetings: Vec<Meeting>, bills: Vec<Bill>, suggestions: Vec<Suggestion>) -> Self {
        Self {
            meetings,
            bills,
            suggestions,
        }
    }

    /// Demo data laid out around `today` in the user's timezone.
    pub fn demo(today: NaiveDate, tz: Tz) -> Self {
        let meeting = |id: &str, title: &str, start: (u32, u32), end: (u32, u32), location: &str| {
            Meeting {
                id: id.to_owned(),
                title: title.to_owned(),
                start_time: resolve_local(tz, today, start),
                end_time: resolve_local(tz, today, end),
                location: Some(location.to_owned()),
            }
        };
        let bill = |id: &str, biller: &str, cents: i64, days_ahead: i64| Bill {
            id: id.to_owned(),
            biller: biller.to_owned(),
            amount: Amount::from_cents(cents),
            due_date: today + TimeDelta::days(days_ahead),
            status: BillStatus::Upcoming,
        };
        let suggestion = |id: &str, kind, title: &str, description: &str, action: &str| Suggestion {
            id: id.to_owned(),
            kind,
            title: title.to_owned(),
            description: description.to_owned(),
            action: action.to_owned(),
        };

        let meetings = vec![
            meeting("1", "Team Standup", (9, 0), (9, 30), "Conference Room A"),
            meeting("2", "Client Presentation", (14, 0), (15, 0), "Zoom Meeting"),
            meeting("3", "Project Review", (16, 30), (17, 30), "Office"),
        ];
        let bills = vec![
            bill("1", "Netflix", 1599, 3),
            bill("2", "Electric Company", 12750, 5),
            bill("3", "Internet Provider", 7999, 7),
        ];
        let suggestions = vec![
            suggestion(
                "1",
                SuggestionKind::Netflix,
                "Watch \"The Crown\" Season 6",
                "Continue your royal drama binge",
                "Open Netflix",
            ),
            suggestion(
                "2",
                SuggestionKind::Spotify,
                "Discover Weekly Playlist",
                "New music recommendations just for you",
                "Open Spotify",
            ),
            suggestion(
                "3",
                SuggestionKind::Local,
                "Coffee at Blue Bottle",
                "5 min walk • Open until 6 PM",
                "Get Directions",
            ),
            suggestion(
                "4",
                SuggestionKind::Netflix,
                "Documentary: \"Our Planet\"",
                "Nature documentary series",
                "Open Netflix",
            ),
            suggestion(
                "5",
                SuggestionKind::Local,
                "Yoga Class at Mindful Studio",
                "Next class starts in 30 minutes",
                "Book Class",
            ),
        ];

        Self::new(meetings, bills, suggestions)
    }

    /// Swaps in meetings from another source, e.g. the user's calendar.
    pub fn with_meetings(mut self, meetings: Vec<Meeting>) -> Self {
        self.meetings = meetings;
        self
    }

    pub fn meetings(&self) -> &[Meeting] {
        &self.meetings
    }

    pub fn bills(&self) -> &[Bill] {
        &self.bills
    }

    /// Distinct suggestions in random order. Returns the whole pool when it is smaller than `count`.
    pub fn get_random_suggestions(&self, count: usize) -> Vec<Suggestion> {
        self.suggestions
            .choose_multiple(&mut rand::rng(), count)
            .cloned()
            .collect()
    }

    pub fn get_todays_meetings(&self, now: DateTime<Utc>, tz: Tz) -> Vec<Meeting> {
        let today = now.with_timezone(&tz).date_naive();
        self.meetings
            .iter()
            .filter(|m| m.start_time.with_timezone(&tz).date_naive() == today)
            .cloned()
            .collect()
    }

    pub fn get_upcoming_bills(&self, now: DateTime<Utc>, days: i64) -> Vec<Bill> {
        let until = now + TimeDelta::days(days);
        self.bills
            .iter()
            .filter(|b| b.status == BillStatus::Upcoming)
            .filter(|b| (now..=until).contains(&b.due_at()))
            .cloned()
            .collect()
    }
}

/// Free slots left in the day, based on the current hour.
pub fn get_free_time_slots(todays_meetings: &[Meeting], now: DateTime<Utc>, tz: Tz) -> Vec<String> {
    if todays_meetings.is_empty() {
        return vec!["All day free".to_owned()];
    }

    let hour = now.with_timezone(&tz).hour();
    let slots: Vec<String> = [
        (9, "8:00 AM - 9:00 AM"),
        (14, "12:00 PM - 2:00 PM (Lunch break)"),
        (17, "5:30 PM - 6:30 PM"),
    ]
    .into_iter()
    .filter(|(before_hour, _)| hour < *before_hour)
    .map(|(_, slot)| slot.to_owned())
    .collect();

    if slots.is_empty() {
        vec!["No free time today".to_owned()]
    } else {
        slots
    }
}

/// Wall-clock times that fall into a DST gap are read as UTC.
fn resolve_local(tz: Tz, date: NaiveDate, (hour, minute): (u32, u32)) -> DateTime<Utc> {
    let time = NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or(NaiveTime::MIN);
    let local = NaiveDateTime::new(date, time);

    tz.from_local_datetime(&local)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|| local.and_utc())
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use proptest::prelude::*;

    use super::*;

    fn sept_5() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 9, 5).unwrap()
    }

    fn at(date: NaiveDate, hour: u32, minute: u32) -> DateTime<Utc> {
        date.and_hms_opt(hour, minute, 0).unwrap().and_utc()
    }

    #[test]
    fn demo_meetings_are_anchored_on_given_day() {
        let source = DataSource::demo(sept_5(), chrono_tz::UTC);

        let standup = &source.meetings()[0];
        assert_eq!(standup.title, "Team Standup");
        assert_eq!(standup.start_time, at(sept_5(), 9, 0));
        assert_eq!(standup.end_time, at(sept_5(), 9, 30));
    }

    #[test]
    fn demo_meetings_follow_timezone() {
        let source = DataSource::demo(sept_5(), chrono_tz::Europe::Berlin);

        assert_eq!(source.meetings()[0].start_time, at(sept_5(), 7, 0));
    }

    #[test]
    fn todays_meetings_compare_calendar_dates_in_timezone() {
        let tz = chrono_tz::America::New_York;
        let source = DataSource::demo(sept_5(), tz);

        // 02:00 UTC on the 6th is still the evening of the 5th in New York.
        let late_evening = at(sept_5() + TimeDelta::days(1), 2, 0);
        assert_eq!(source.get_todays_meetings(late_evening, tz).len(), 3);
        assert!(source.get_todays_meetings(late_evening, chrono_tz::UTC).is_empty());
    }

    #[test]
    fn upcoming_bills_respect_window_and_status() {
        let mut source = DataSource::demo(sept_5(), chrono_tz::UTC);
        source.bills[1].status = BillStatus::Paid;
        let now = at(sept_5(), 0, 0);

        let bills = source.get_upcoming_bills(now, DEFAULT_BILL_WINDOW_DAYS);
        let billers: Vec<&str> = bills.iter().map(|b| b.biller.as_str()).collect();
        assert_eq!(billers, vec!["Netflix", "Internet Provider"]);

        assert_eq!(source.get_upcoming_bills(now, 3).len(), 1);
        assert!(source.get_upcoming_bills(at(sept_5(), 0, 0) + TimeDelta::days(8), 7).is_empty());
    }

    #[test]
    fn free_time_depends_on_current_hour() {
        let source = DataSource::demo(sept_5(), chrono_tz::UTC);
        let meetings = source.meetings();

        assert_eq!(
            get_free_time_slots(&[], at(sept_5(), 8, 0), chrono_tz::UTC),
            vec!["All day free"]
        );
        assert_eq!(
            get_free_time_slots(meetings, at(sept_5(), 8, 0), chrono_tz::UTC).len(),
            3
        );
        assert_eq!(
            get_free_time_slots(meetings, at(sept_5(), 15, 0), chrono_tz::UTC),
            vec!["5:30 PM - 6:30 PM"]
        );
        assert_eq!(
            get_free_time_slots(meetings, at(sept_5(), 18, 0), chrono_tz::UTC),
            vec!["No free time today"]
        );
    }

    #[test]
    fn oversized_request_returns_whole_pool() {
        let source = DataSource::demo(sept_5(), chrono_tz::UTC);

        assert_eq!(source.get_random_suggestions(10).len(), 5);
        assert!(source.get_random_suggestions(0).is_empty());
    }

    proptest! {
        #[test]
        fn random_suggestions_are_distinct_pool_members(
            pool_size in 3usize..20,
            count in 0usize..20
        ) {
            let pool: Vec<Suggestion> = (0..pool_size)
                .map(|i| Suggestion {
                    id: i.to_string(),
                    kind: SuggestionKind::Local,
                    title: format!("Suggestion {i}"),
                    description: String::new(),
                    action: String::new(),
                })
                .collect();
            let source = DataSource::new(vec![], vec![], pool.clone());

            let picked = source.get_random_suggestions(count);

            prop_assert_eq!(picked.len(), count.min(pool_size));
            let ids: HashSet<&str> = picked.iter().map(|s| s.id.as_str()).collect();
            prop_assert_eq!(ids.len(), picked.len());
            prop_assert!(picked.iter().all(|s| pool.contains(s)));
        }

        #[test]
        fn three_suggestions_from_any_pool_of_three_or_more(pool_size in 3usize..50) {
            let pool: Vec<Suggestion> = (0..pool_size)
                .map(|i| Suggestion {
                    id: i.to_string(),
                    kind: SuggestionKind::Spotify,
                    title: format!("Playlist {i}"),
                    description: String::new(),
                    action: "Open Spotify".to_owned(),
                })
                .collect();
            let source = DataSource::new(vec![], vec![], pool);

            let picked = source.get_random_suggestions(3);
            let ids: HashSet<&str> = picked.iter().map(|s| s.id.as_str()).collect();
            prop_assert_eq!(ids.len(), 3);
        }
    }
}
