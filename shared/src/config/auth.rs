//! Authentication method configuration

use serde::{Deserialize, Serialize};

use super::env_flag;

/// An identity channel that can be enabled for password authentication.
///
/// The declaration order here is the order in which channels are resolved
/// and applied when more than one is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuthMethod {
    /// Email address + password
    EmailPassword,
    /// Phone number + password
    PhonePassword,
    /// Username + password
    UsernamePassword,
}

impl AuthMethod {
    /// All methods in declaration order
    pub const ALL: [AuthMethod; 3] = [
        AuthMethod::EmailPassword,
        AuthMethod::PhonePassword,
        AuthMethod::UsernamePassword,
    ];

    /// Name of the configuration key / environment variable for this method
    pub fn as_str(&self) -> &'static str {
        match self {
            AuthMethod::EmailPassword => "EMAIL_PASSWORD",
            AuthMethod::PhonePassword => "PHONE_PASSWORD",
            AuthMethod::UsernamePassword => "USERNAME_PASSWORD",
        }
    }

    /// The user-data field this method requires
    pub fn field(&self) -> &'static str {
        match self {
            AuthMethod::EmailPassword => "email",
            AuthMethod::PhonePassword => "phone_number",
            AuthMethod::UsernamePassword => "username",
        }
    }
}

impl std::fmt::Display for AuthMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which authentication methods are enabled
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthMethodsConfig {
    /// `EMAIL_PASSWORD`
    #[serde(default = "default_email_password")]
    pub email_password: bool,

    /// `PHONE_PASSWORD`
    #[serde(default)]
    pub phone_password: bool,

    /// `USERNAME_PASSWORD`
    #[serde(default)]
    pub username_password: bool,
}

impl Default for AuthMethodsConfig {
    fn default() -> Self {
        Self {
            email_password: default_email_password(),
            phone_password: false,
            username_password: false,
        }
    }
}

impl AuthMethodsConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        Self {
            email_password: env_flag("EMAIL_PASSWORD", default_email_password()),
            phone_password: env_flag("PHONE_PASSWORD", false),
            username_password: env_flag("USERNAME_PASSWORD", false),
        }
    }

    /// Whether a given method is enabled
    pub fn is_enabled(&self, method: AuthMethod) -> bool {
        match method {
            AuthMethod::EmailPassword => self.email_password,
            AuthMethod::PhonePassword => self.phone_password,
            AuthMethod::UsernamePassword => self.username_password,
        }
    }

    /// Enabled methods in declaration order
    pub fn enabled_methods(&self) -> Vec<AuthMethod> {
        AuthMethod::ALL
            .into_iter()
            .filter(|m| self.is_enabled(*m))
            .collect()
    }

    /// Enable every method
    pub fn all() -> Self {
        Self {
            email_password: true,
            phone_password: true,
            username_password: true,
        }
    }
}

fn default_email_password() -> bool {
    true
}
