//! Input rules for accounts and posts.
//!
//! Name and email fail on their own, first one wins. Password rules are all
//! collected so the caller can report everything wrong with it at once.

use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;
use thiserror::Error;

use domains::DomainError;

pub const NAME_MIN_CHARS: usize = 3;
pub const PASSWORD_MIN_CHARS: usize = 8;
pub const PASSWORD_MAX_CHARS: usize = 64;
pub const TITLE_MIN_CHARS: usize = 3;

/// Characters that satisfy the "symbol" password rule.
pub const PASSWORD_SYMBOLS: &str = r#"!@#$%^&*()_+-=[]{};':"\|,.<>/?"#;

static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is a valid regex")
});

/// A single password requirement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordRule {
    MinLength,
    MaxLength,
    Lowercase,
    Uppercase,
    Digit,
    Symbol,
}

impl fmt::Display for PasswordRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PasswordRule::MinLength => write!(f, "at least {PASSWORD_MIN_CHARS} characters"),
            PasswordRule::MaxLength => write!(f, "at most {PASSWORD_MAX_CHARS} characters"),
            PasswordRule::Lowercase => f.write_str("one lowercase letter (a-z)"),
            PasswordRule::Uppercase => f.write_str("one uppercase letter (A-Z)"),
            PasswordRule::Digit => f.write_str("one digit (0-9)"),
            PasswordRule::Symbol => f.write_str("one special character (!@#$%^&*...)"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CredentialError {
    #[error("Name must be at least {NAME_MIN_CHARS} characters long")]
    InvalidName,

    #[error("Valid email is required")]
    InvalidEmail,

    #[error("Password is required")]
    MissingPassword,

    #[error("Password must contain: {}", join_rules(.0))]
    WeakPassword(Vec<PasswordRule>),
}

fn join_rules(rules: &[PasswordRule]) -> String {
    rules
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

impl From<CredentialError> for DomainError {
    fn from(err: CredentialError) -> Self {
        DomainError::Validation(err.to_string())
    }
}

/// Checks registration input. Absent fields are `None`.
pub fn validate_credentials(
    name: Option<&str>,
    email: Option<&str>,
    password: Option<&str>,
) -> Result<(), CredentialError> {
    match name {
        Some(name) if name.chars().count() >= NAME_MIN_CHARS => {}
        _ => return Err(CredentialError::InvalidName),
    }

    match email {
        Some(email) if EMAIL_PATTERN.is_match(email) => {}
        _ => return Err(CredentialError::InvalidEmail),
    }

    let password = match password {
        Some(p) if !p.is_empty() => p,
        _ => return Err(CredentialError::MissingPassword),
    };

    let violations = password_violations(password);
    if violations.is_empty() {
        Ok(())
    } else {
        Err(CredentialError::WeakPassword(violations))
    }
}

/// Every rule `password` breaks, in a stable order.
pub fn password_violations(password: &str) -> Vec<PasswordRule> {
    let length = password.chars().count();
    let mut violations = Vec::new();

    if length < PASSWORD_MIN_CHARS {
        violations.push(PasswordRule::MinLength);
    }
    if length > PASSWORD_MAX_CHARS {
        violations.push(PasswordRule::MaxLength);
    }
    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        violations.push(PasswordRule::Lowercase);
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        violations.push(PasswordRule::Uppercase);
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        violations.push(PasswordRule::Digit);
    }
    if !password.chars().any(|c| PASSWORD_SYMBOLS.contains(c)) {
        violations.push(PasswordRule::Symbol);
    }

    violations
}

/// Checks a new post's title and content. Returns the trimmed pair.
pub fn validate_post<'a>(
    title: Option<&'a str>,
    content: Option<&'a str>,
) -> Result<(&'a str, &'a str), DomainError> {
    let title = title.map(str::trim).unwrap_or_default();
    if title.chars().count() < TITLE_MIN_CHARS {
        return Err(DomainError::Validation(format!(
            "Title must be at least {TITLE_MIN_CHARS} characters long"
        )));
    }

    let content = content.map(str::trim).unwrap_or_default();
    if content.is_empty() {
        return Err(DomainError::Validation("Content is required".into()));
    }

    Ok((title, content))
}
