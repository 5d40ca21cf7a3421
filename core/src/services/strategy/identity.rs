//! Single and combined identity strategies

use std::collections::HashMap;

use og_shared::utils::{identifier, phone};
use og_shared::AuthMethod;

use crate::domain::entities::user::User;
use crate::errors::{AuthError, DomainResult, ValidationError};
use crate::repositories::UserRepository;

/// Submitted identity fields keyed by field name (`email`, `phone_number`, `username`)
pub type UserData = HashMap<String, String>;

/// Identity channel handler
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentityStrategy {
    Email,
    Phone,
    Username,
    Combined(CombinedStrategy),
}

/// Two or more single strategies applied in declaration order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CombinedStrategy {
    strategies: Vec<IdentityStrategy>,
}

impl CombinedStrategy {
    /// Wrap the given methods. Returns `None` unless at least two distinct
    /// methods are supplied.
    pub fn new(methods: &[AuthMethod]) -> Option<Self> {
        let mut ordered: Vec<AuthMethod> = methods.to_vec();
        ordered.sort();
        ordered.dedup();
        if ordered.len() < 2 {
            return None;
        }
        Some(Self {
            strategies: ordered.into_iter().map(IdentityStrategy::single).collect(),
        })
    }

    pub fn strategies(&self) -> &[IdentityStrategy] {
        &self.strategies
    }
}

impl IdentityStrategy {
    /// Single strategy for one method
    pub fn single(method: AuthMethod) -> Self {
        match method {
            AuthMethod::EmailPassword => IdentityStrategy::Email,
            AuthMethod::PhonePassword => IdentityStrategy::Phone,
            AuthMethod::UsernamePassword => IdentityStrategy::Username,
        }
    }

    /// Channel owned by a single strategy; `None` for combined
    pub fn method(&self) -> Option<AuthMethod> {
        match self {
            IdentityStrategy::Email => Some(AuthMethod::EmailPassword),
            IdentityStrategy::Phone => Some(AuthMethod::PhonePassword),
            IdentityStrategy::Username => Some(AuthMethod::UsernamePassword),
            IdentityStrategy::Combined(_) => None,
        }
    }

    /// Field name owned by a single strategy
    pub fn field(&self) -> Option<&'static str> {
        self.method().map(|m| m.field())
    }

    /// All channels covered, in application order
    pub fn methods(&self) -> Vec<AuthMethod> {
        match self {
            IdentityStrategy::Combined(combined) => combined
                .strategies
                .iter()
                .filter_map(IdentityStrategy::method)
                .collect(),
            single => single.method().into_iter().collect(),
        }
    }

    pub fn is_combined(&self) -> bool {
        matches!(self, IdentityStrategy::Combined(_))
    }

    /// Check that every owned field is present and well formed.
    ///
    /// Combined strategies stop at the first failing channel.
    pub fn validate(&self, data: &UserData) -> DomainResult<()> {
        match self {
            IdentityStrategy::Combined(combined) => {
                for strategy in &combined.strategies {
                    strategy.validate(data)?;
                }
                Ok(())
            }
            single => {
                let method = single.method().ok_or(AuthError::NoAuthMethod)?;
                let value = required_value(data, method)?;
                check_format(method, value)?;
                Ok(())
            }
        }
    }

    /// Resolve the account the submitted data identifies.
    ///
    /// Blocked and inactive accounts are refused. For a combined strategy every
    /// channel must resolve; the first channel's user wins if they disagree.
    pub async fn authenticate<U>(&self, users: &U, data: &UserData) -> DomainResult<User>
    where
        U: UserRepository + ?Sized,
    {
        let mut resolved: Option<User> = None;
        for method in self.methods() {
            let value = normalized_value(method, required_value(data, method)?);
            let user = users
                .find_by_field(method, &value)
                .await?
                .ok_or(AuthError::UserNotFound)?;

            if user.is_block {
                return Err(AuthError::UserBlocked.into());
            }
            if !user.is_active {
                return Err(AuthError::UserInactive.into());
            }

            match &resolved {
                None => resolved = Some(user),
                Some(first) if first.id != user.id => {
                    tracing::warn!(
                        method = %method,
                        first_user_id = %first.id,
                        other_user_id = %user.id,
                        event = "strategy_conflict",
                        "Identity channels resolve to different users, keeping the first match"
                    );
                }
                Some(_) => {}
            }
        }
        resolved.ok_or_else(|| AuthError::NoAuthMethod.into())
    }

    /// Create a new, inactive user carrying every owned field.
    ///
    /// Refuses values already registered on the same channel.
    pub async fn create_user<U>(&self, users: &U, data: &UserData) -> DomainResult<User>
    where
        U: UserRepository + ?Sized,
    {
        self.validate(data)?;

        let mut user = User::new();
        for method in self.methods() {
            let value = normalized_value(method, required_value(data, method)?);
            if users.exists_by_field(method, &value).await? {
                return Err(AuthError::UserAlreadyExists {
                    field: method.field().to_string(),
                }
                .into());
            }
            user.set_identity(method, value);
        }

        let user = users.create(user).await?;
        tracing::info!(
            user_id = %user.id,
            channels = ?self.methods(),
            event = "user_created",
            "Created inactive user"
        );
        Ok(user)
    }
}

/// Non-blank value of the field owned by `method`
fn required_value(data: &UserData, method: AuthMethod) -> DomainResult<&str> {
    data.get(method.field())
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .ok_or_else(|| {
            ValidationError::RequiredField {
                field: method.field().to_string(),
            }
            .into()
        })
}

fn check_format(method: AuthMethod, value: &str) -> Result<(), ValidationError> {
    match method {
        AuthMethod::EmailPassword if !identifier::is_valid_email(value) => {
            Err(ValidationError::InvalidEmail)
        }
        AuthMethod::PhonePassword if !phone::is_valid_phone(value) => {
            Err(ValidationError::InvalidPhone)
        }
        AuthMethod::UsernamePassword if !identifier::is_valid_username(value) => {
            Err(ValidationError::InvalidUsername)
        }
        _ => Ok(()),
    }
}

fn normalized_value(method: AuthMethod, value: &str) -> String {
    User::canonical_identity(method, value)
}
