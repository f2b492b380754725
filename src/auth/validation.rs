use lazy_static::lazy_static;
use regex::Regex;

use crate::{auth::dto::CredentialsRequest, error::AuthError};

/// Credentials that passed input validation.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

/// Normalizes the email (trim, lowercase) and requires both fields to be
/// non-empty. Used as-is by login, so accounts created before strict mode
/// was switched on can still sign in.
pub fn validate_credentials(req: CredentialsRequest) -> Result<Credentials, AuthError> {
    let email = req.email.unwrap_or_default().trim().to_lowercase();
    if email.is_empty() {
        return Err(AuthError::Validation("email should not be empty".into()));
    }
    let password = req.password.unwrap_or_default();
    if password.is_empty() {
        return Err(AuthError::Validation("password should not be empty".into()));
    }
    Ok(Credentials { email, password })
}

/// Login rules plus the `local@domain.tld` shape when `strict_email` is set.
pub fn validate_signup(
    req: CredentialsRequest,
    strict_email: bool,
) -> Result<Credentials, AuthError> {
    let creds = validate_credentials(req)?;
    if strict_email && !is_valid_email(&creds.email) {
        return Err(AuthError::Validation("email must be an email".into()));
    }
    Ok(creds)
}
