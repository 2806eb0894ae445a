use tracing::warn;

use crate::auth::dto::RegisterRequest;
use crate::client::session::{SessionStore, AUTH_TOKEN_KEY, EMAIL_KEY, NAME_KEY};
use crate::client::{ApiClient, ClientError};

/// State of the registration form: four text fields plus an error slot.
#[derive(Debug, Default)]
pub struct RegisterForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub error: Option<String>,
}

/// What the UI should do after a submit.
#[derive(Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Registered; token stored, navigate to the authenticated area.
    Navigate,
    /// Stay on the form (error surfaced or request never completed).
    Stay,
}

impl RegisterForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Submit the form. On success the token, display name and email land in
    /// the session store. An API error is surfaced in the error slot; a
    /// transport failure is only logged, leaving the form untouched.
    pub async fn submit(
        &mut self,
        client: &ApiClient,
        session: &mut SessionStore,
    ) -> SubmitOutcome {
        let request = RegisterRequest {
            email: self.email.clone(),
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            password: self.password.clone(),
        };

        match client.register(&request).await {
            Ok(res) => {
                session.set(AUTH_TOKEN_KEY, res.authtoken);
                session.set(NAME_KEY, self.first_name.clone());
                session.set(EMAIL_KEY, res.email);
                self.error = None;
                SubmitOutcome::Navigate
            }
            Err(ClientError::Api { message, .. }) => {
                self.error = Some(message);
                SubmitOutcome::Stay
            }
            Err(ClientError::Transport(e)) => {
                warn!(error = %e, "register request failed");
                SubmitOutcome::Stay
            }
        }
    }
}
