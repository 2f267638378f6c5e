mod client;
mod error;
mod google_client;
mod model;

pub use client::{AuthGrant, IdentityCalendarClient};
pub use error::GoogleApiError;
pub use google_client::{GoogleApiClient, demo_user, placeholder_event};
pub use model::{CalendarEvent, EventDateTime, GoogleProfile};
