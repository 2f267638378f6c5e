pub mod bill;
pub mod meeting;
pub mod reminder;
pub mod settings;
pub mod suggestion;
pub mod user;

pub use chrono;
pub use chrono_tz;
