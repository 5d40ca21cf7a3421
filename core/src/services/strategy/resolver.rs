//! Strategy resolution from configuration and submitted data

use og_shared::{AuthMethod, AuthMethodsConfig};

use crate::errors::{AuthError, DomainResult};

use super::identity::{CombinedStrategy, IdentityStrategy, UserData};

/// Picks the strategy for a request. Pure function of its inputs.
pub struct StrategyResolver;

impl StrategyResolver {
    /// Resolve from an enabled-methods configuration
    pub fn resolve(user_data: &UserData, enabled: &AuthMethodsConfig) -> DomainResult<IdentityStrategy> {
        Self::resolve_methods(user_data, &enabled.enabled_methods())
    }

    /// Resolve from an explicit set of enabled methods.
    ///
    /// A method matches when it is enabled and its field carries a non-blank
    /// value. Matches are always ordered email, phone, username regardless of
    /// the order of `enabled`.
    pub fn resolve_methods(user_data: &UserData, enabled: &[AuthMethod]) -> DomainResult<IdentityStrategy> {
        let matched: Vec<AuthMethod> = AuthMethod::ALL
            .into_iter()
            .filter(|m| enabled.contains(m))
            .filter(|m| {
                user_data
                    .get(m.field())
                    .is_some_and(|v| !v.trim().is_empty())
            })
            .collect();

        match matched.as_slice() {
            [] => {
                tracing::debug!(enabled = ?enabled, "No identity strategy matches the supplied data");
                Err(AuthError::NoAuthMethod.into())
            }
            [single] => Ok(IdentityStrategy::single(*single)),
            many => CombinedStrategy::new(many)
                .map(IdentityStrategy::Combined)
                .ok_or_else(|| AuthError::NoAuthMethod.into()),
        }
    }
}
