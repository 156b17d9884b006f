//! User directory profiles.

use super::{BoardDomainError, UserId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Display name used when nothing better can be derived.
const FALLBACK_DISPLAY_NAME: &str = "User";

/// Email address normalised to trimmed lowercase.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Creates a normalised email address.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::InvalidEmail`] when the value lacks a
    /// non-empty local part and domain separated by `@`.
    pub fn new(value: impl AsRef<str>) -> Result<Self, BoardDomainError> {
        let raw = value.as_ref();
        let normalized = normalize_email(raw);
        let is_valid = normalized
            .split_once('@')
            .is_some_and(|(local, domain)| {
                !local.is_empty() && !domain.is_empty() && !domain.contains('@')
            })
            && !normalized.chars().any(char::is_whitespace);
        if !is_valid {
            return Err(BoardDomainError::InvalidEmail(raw.to_owned()));
        }
        Ok(Self(normalized))
    }

    /// Returns the address as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the part before `@`.
    #[must_use]
    pub fn local_part(&self) -> &str {
        self.0.split_once('@').map_or(self.0.as_str(), |(local, _)| local)
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Trims and lowercases an email address or search prefix.
#[must_use]
pub fn normalize_email(value: &str) -> String {
    value.trim().to_lowercase()
}

/// Directory entry describing a registered user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    user_id: UserId,
    email: EmailAddress,
    name: String,
    avatar_url: Option<String>,
}

impl Profile {
    /// Creates a profile, deriving the display name when none is usable.
    ///
    /// The name falls back to the email local part and then to `User`.
    #[must_use]
    pub fn new(
        user_id: UserId,
        email: EmailAddress,
        name: Option<&str>,
        avatar_url: Option<String>,
    ) -> Self {
        let resolved_name = display_name(name, &email);
        Self {
            user_id,
            email,
            name: resolved_name,
            avatar_url,
        }
    }

    /// Placeholder for a member without a directory entry.
    #[must_use]
    pub fn placeholder(user_id: UserId) -> Self {
        Self {
            user_id,
            email: EmailAddress("unknown@example.com".to_owned()),
            name: FALLBACK_DISPLAY_NAME.to_owned(),
            avatar_url: None,
        }
    }

    /// Returns the user identifier.
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        self.user_id
    }

    /// Returns the normalised email address.
    #[must_use]
    pub const fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the avatar URL, if one was supplied by the identity provider.
    #[must_use]
    pub fn avatar_url(&self) -> Option<&str> {
        self.avatar_url.as_deref()
    }
}

fn display_name(candidate: Option<&str>, email: &EmailAddress) -> String {
    candidate
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .or_else(|| Some(email.local_part()).filter(|local| !local.is_empty()))
        .unwrap_or(FALLBACK_DISPLAY_NAME)
        .to_owned()
}
