//! Mocked sign-in.
//!
//! There is no account store: a sign-in succeeds whenever the form is filled
//! in, and the display name comes from the form itself.

use log::info;
use shared::{SessionUser, SignInRequest, SignInResponse, UserRole};

const FALLBACK_NAME: &str = "User";

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SessionError {
    #[error("Please fill in all required fields")]
    MissingCredentials,
    #[error("Passwords do not match")]
    PasswordMismatch,
}

#[derive(Debug, Clone, Default)]
pub struct SessionService;

impl SessionService {
    pub fn new() -> Self {
        Self
    }

    pub fn sign_in(&self, request: &SignInRequest) -> Result<SignInResponse, SessionError> {
        if request.email.trim().is_empty() || request.password.is_empty() {
            return Err(SessionError::MissingCredentials);
        }

        if request.is_registration
            && request.confirm_password.as_deref() != Some(request.password.as_str())
        {
            return Err(SessionError::PasswordMismatch);
        }

        let role = request.role.unwrap_or(UserRole::Donor);
        let name = match role {
            UserRole::Donor => request.full_name.as_deref(),
            UserRole::Ngo => request.contact_name.as_deref(),
        }
        .map(str::trim)
        .filter(|n| !n.is_empty())
        .unwrap_or(FALLBACK_NAME)
        .to_string();

        info!("{} signed in as {}", name, role);

        let verb = if request.is_registration { "registered" } else { "logged in" };
        Ok(SignInResponse {
            user: SessionUser { name, role },
            success_message: format!("Welcome {}! Successfully {}", role, verb),
        })
    }
}
