//! Result types for registration flows

use uuid::Uuid;

use crate::services::verification::DeliveryChannel;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrationOutcome {
    /// User created; an activation code was sent
    CodeSent {
        user_id: Uuid,
        channel: DeliveryChannel,
    },
    /// User created; activation happens through a link sent by the host
    ActivationLinkPending { user_id: Uuid },
}

impl RegistrationOutcome {
    pub fn user_id(&self) -> Uuid {
        match self {
            RegistrationOutcome::CodeSent { user_id, .. } => *user_id,
            RegistrationOutcome::ActivationLinkPending { user_id } => *user_id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReactivationOutcome {
    /// A code is still active; nothing was sent
    CodeAlreadySent,
    /// A new code was sent
    CodeSent { channel: DeliveryChannel },
    /// Activation happens through a link sent by the host
    ActivationLinkPending { user_id: Uuid },
}

impl ReactivationOutcome {
    pub fn message(&self) -> &'static str {
        match self {
            ReactivationOutcome::CodeAlreadySent => {
                "A code has already been sent. Please check your inbox."
            }
            ReactivationOutcome::CodeSent { .. } => "A new code has been sent.",
            ReactivationOutcome::ActivationLinkPending { .. } => {
                "An activation link will be sent to you."
            }
        }
    }
}
