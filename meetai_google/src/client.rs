use async_trait::async_trait;
use meetai_models::user::User;

use crate::{CalendarEvent, GoogleApiError};

/// Credential handed to the token endpoint to start a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthGrant {
    AuthorizationCode(String),
    RefreshToken(String),
}

#[async_trait]
pub trait IdentityCalendarClient: Send + Sync {
    /// Prepares the client. Calling it again after a success is a no-op.
    async fn initialize(&self) -> Result<(), GoogleApiError>;

    async fn sign_in(&self, grant: AuthGrant) -> Result<User, GoogleApiError>;

    async fn sign_out(&self) -> Result<(), GoogleApiError>;

    async fn get_current_user(&self) -> Result<Option<User>, GoogleApiError>;

    /// Events of the next 24 hours ordered by start time.
    async fn get_calendar_events(&self) -> Result<Vec<CalendarEvent>, GoogleApiError>;

    async fn is_signed_in(&self) -> Result<bool, GoogleApiError> {
        Ok(self.get_current_user().await?.is_some())
    }
}
