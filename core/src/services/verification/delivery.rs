//! Channel selection for outgoing codes

use og_shared::utils::identifier::{looks_like_email, mask_identifier};

use crate::domain::entities::user::User;
use crate::errors::{DomainResult, OtpError};

use super::traits::NotificationSink;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryChannel {
    Email,
    Sms,
}

impl DeliveryChannel {
    /// Identifiers containing `@` go by email, everything else by SMS
    pub fn for_identifier(identifier: &str) -> Self {
        if looks_like_email(identifier) {
            DeliveryChannel::Email
        } else {
            DeliveryChannel::Sms
        }
    }

    /// Channel and stored address a code for `user` goes to.
    ///
    /// The identifier's shape picks the preferred channel. When the user has
    /// no address on it (a username login, for instance) the other channel
    /// is used.
    pub fn resolve<'u>(user: &'u User, identifier: &str) -> DomainResult<(Self, &'u str)> {
        let preferred = Self::for_identifier(identifier);
        [preferred, preferred.other()]
            .into_iter()
            .find_map(|channel| channel.address(user).map(|address| (channel, address)))
            .ok_or_else(|| OtpError::NoDeliveryAddress.into())
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            DeliveryChannel::Email => "email",
            DeliveryChannel::Sms => "sms",
        }
    }

    fn other(self) -> Self {
        match self {
            DeliveryChannel::Email => DeliveryChannel::Sms,
            DeliveryChannel::Sms => DeliveryChannel::Email,
        }
    }

    fn address(self, user: &User) -> Option<&str> {
        let address = match self {
            DeliveryChannel::Email => user.email.as_deref(),
            DeliveryChannel::Sms => user.phone_number.as_deref(),
        };
        address.filter(|a| !a.trim().is_empty())
    }
}

/// Send `token` to the user's stored address on the channel `identifier` implies
pub async fn send_code<N>(
    notifier: &N,
    token: &str,
    user: &User,
    identifier: &str,
) -> DomainResult<DeliveryChannel>
where
    N: NotificationSink + ?Sized,
{
    let (channel, address) = DeliveryChannel::resolve(user, identifier)?;
    match channel {
        DeliveryChannel::Email => notifier.send_email_code(token, address).await?,
        DeliveryChannel::Sms => notifier.send_sms_code(token, address).await?,
    }
    tracing::info!(
        user_id = %user.id,
        address = %mask_identifier(address),
        channel = channel.as_str(),
        event = "otp_sent",
        "Verification code dispatched"
    );
    Ok(channel)
}
