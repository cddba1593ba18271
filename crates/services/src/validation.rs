//! Input validation shared by the services. Runs before any port is called.

use domains::{DomainError, Result};

pub const MAX_USERNAME_LEN: usize = 50;
pub const MIN_PASSWORD_LEN: usize = 6;

/// Post content must contain something other than whitespace.
pub fn post_content(content: &str) -> Result<()> {
    if content.trim().is_empty() {
        return Err(DomainError::validation("content must not be empty"));
    }
    Ok(())
}

/// Returns the trimmed username.
pub fn username(raw: &str) -> Result<String> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(DomainError::validation("username must not be empty"));
    }
    if name.chars().count() > MAX_USERNAME_LEN {
        return Err(DomainError::validation(format!(
            "username must be at most {MAX_USERNAME_LEN} characters"
        )));
    }
    Ok(name.to_string())
}

/// Returns the trimmed, lowercased email.
pub fn email(raw: &str) -> Result<String> {
    let email = raw.trim().to_lowercase();
    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.is_empty()
                && !domain.contains('@')
                && !email.chars().any(char::is_whitespace)
        }
        None => false,
    };
    if !valid {
        return Err(DomainError::validation("email must be a valid address"));
    }
    Ok(email)
}

pub fn password(raw: &str) -> Result<()> {
    if raw.chars().count() < MIN_PASSWORD_LEN {
        return Err(DomainError::validation(format!(
            "password must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }
    Ok(())
}
