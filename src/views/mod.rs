mod account;
mod digest;
mod reminders;
mod suggestions;

pub use account::render_account;
pub use digest::{DigestView, render_digest};
pub use reminders::render_reminders;
pub use suggestions::render_suggestions;

use chrono::{DateTime, Utc};
use chrono_tz::Tz;

fn format_time(instant: DateTime<Utc>, tz: Tz) -> String {
    instant.with_timezone(&tz).format("%-I:%M %p").to_string()
}

fn plural(count: usize) -> &'static str {
    if count == 1 { "" } else { "s" }
}
