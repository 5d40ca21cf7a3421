//! User entity as seen by the verification engine.
//!
//! The engine never owns user persistence; it reads and writes users
//! through `UserRepository` and only touches the activation flags.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use og_shared::phone;
use og_shared::AuthMethod;

/// User entity representing a registered account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier for the user
    pub id: Uuid,

    /// Email address, present when the email channel is enabled
    pub email: Option<String>,

    /// Phone number, present when the phone channel is enabled
    pub phone_number: Option<String>,

    /// Username, present when the username channel is enabled
    pub username: Option<String>,

    /// Whether the account has been activated
    pub is_active: bool,

    /// Whether the account is permanently blocked
    pub is_block: bool,

    /// Timestamp when the user was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the user was last updated
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Creates a new, inactive user with no identity fields set
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            email: None,
            phone_number: None,
            username: None,
            is_active: false,
            is_block: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Sets the email address
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Sets the phone number
    pub fn with_phone_number(mut self, phone_number: impl Into<String>) -> Self {
        self.phone_number = Some(phone_number.into());
        self
    }

    /// Sets the username
    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    /// Value of the identity field owned by `method`
    pub fn identity(&self, method: AuthMethod) -> Option<&str> {
        match method {
            AuthMethod::EmailPassword => self.email.as_deref(),
            AuthMethod::PhonePassword => self.phone_number.as_deref(),
            AuthMethod::UsernamePassword => self.username.as_deref(),
        }
    }

    /// Sets the identity field owned by `method`
    pub fn set_identity(&mut self, method: AuthMethod, value: impl Into<String>) {
        let value = Some(value.into());
        match method {
            AuthMethod::EmailPassword => self.email = value,
            AuthMethod::PhonePassword => self.phone_number = value,
            AuthMethod::UsernamePassword => self.username = value,
        }
    }

    /// Canonical stored form of an identity value.
    ///
    /// Emails are lowercased and phone numbers lose their formatting. Values
    /// that carry letters are never treated as phone numbers.
    pub fn canonical_identity(method: AuthMethod, value: &str) -> String {
        let value = value.trim();
        match method {
            AuthMethod::EmailPassword => value.to_lowercase(),
            AuthMethod::PhonePassword if is_phone_shaped(value) => {
                phone::normalize_phone_number(value)
            }
            AuthMethod::PhonePassword | AuthMethod::UsernamePassword => value.to_string(),
        }
    }

    /// Whether `identifier` names this user on any channel, compared in canonical form
    pub fn is_identified_by(&self, identifier: &str) -> bool {
        AuthMethod::ALL.iter().any(|&m| {
            self.identity(m) == Some(Self::canonical_identity(m, identifier).as_str())
        })
    }

    /// Marks the account active after a successful verification
    pub fn activate(&mut self) {
        self.is_active = true;
        self.updated_at = Utc::now();
    }

    /// Blocks the account. A blocked user is always inactive.
    pub fn block(&mut self) {
        self.is_block = true;
        self.is_active = false;
        self.updated_at = Utc::now();
    }

    /// Whether the account may proceed with verification
    pub fn can_verify(&self) -> bool {
        !self.is_block
    }
}

impl Default for User {
    fn default() -> Self {
        Self::new()
    }
}

fn is_phone_shaped(value: &str) -> bool {
    value
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '(' | ')' | '.' | ' '))
}
