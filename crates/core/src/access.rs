//! Login and registration gate, plus the role-scoped user list.

use std::sync::LazyLock;

use regex::Regex;

use crate::{
    errors::{StudioError, StudioResult},
    models::user::{RegisterRequest, User, UserRole, UserStatus},
};

pub const INVALID_CREDENTIALS: &str = "Invalid credentials.";
pub const SESSION_TERMINATED: &str = "Your session has been terminated by the administrator.";
pub const REGISTERED_MESSAGE: &str = "Registration successful! Please wait for teacher approval.";

static PHONE_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\d+\-\s()]+$").expect("phone pattern is valid"));

/// Whether `user` may open a session. Teachers are never held back by status.
pub fn login_gate(user: &User) -> StudioResult<()> {
    if user.role == UserRole::Teacher {
        return Ok(());
    }
    match user.status {
        UserStatus::Pending => Err(StudioError::Authorization(
            "Your account is pending teacher approval.".to_string(),
        )),
        UserStatus::Blocked => Err(StudioError::Authorization(
            "Your account has been suspended.".to_string(),
        )),
        UserStatus::Approved => Ok(()),
    }
}

/// An open session survives until the student is blocked.
pub fn session_still_valid(user: &User) -> bool {
    !(user.role == UserRole::Student && user.status == UserStatus::Blocked)
}

/// Error for a registration whose email already belongs to `existing`.
pub fn registration_conflict(existing: &User) -> StudioError {
    let message = match existing.status {
        UserStatus::Pending => "Application already submitted. Please wait for approval.",
        UserStatus::Blocked => "This account has been blocked.",
        UserStatus::Approved => "Email already exists. Please login.",
    };
    StudioError::Conflict(message.to_string())
}

/// Digits, `+`, `-`, spaces and parentheses only, with at least seven digits.
pub fn validate_phone(phone: &str) -> bool {
    let digits = phone.chars().filter(char::is_ascii_digit).count();
    PHONE_CHARS.is_match(phone) && digits >= 7
}

impl RegisterRequest {
    pub fn validate(&self) -> StudioResult<()> {
        if self.name.trim().is_empty() {
            return Err(StudioError::Validation("Name is required".to_string()));
        }
        if self.email.trim().is_empty() {
            return Err(StudioError::Validation("Email is required".to_string()));
        }
        if self.password.is_empty() {
            return Err(StudioError::Validation("Password is required".to_string()));
        }
        if !validate_phone(&self.phone) {
            return Err(StudioError::Validation(
                "Invalid phone format. Please enter a valid phone number (at least 7 digits)."
                    .to_string(),
            ));
        }
        Ok(())
    }
}

/// Students see themselves and the teachers; teachers see everyone.
pub fn sanitize_users(viewer: &User, users: &[User]) -> Vec<User> {
    if viewer.is_teacher() {
        return users.to_vec();
    }
    users
        .iter()
        .filter(|u| u.id == viewer.id || u.is_teacher())
        .cloned()
        .collect()
}

/// Stored emails are trimmed, so the lookup trims too.
pub fn find_by_email<'a>(users: &'a [User], email: &str) -> Option<&'a User> {
    let email = email.trim();
    users.iter().find(|u| u.email == email)
}
