//! Email delivery
//!
//! - **EmailService**: common interface for email providers
//! - **MockEmailService**: records messages in memory
//! - **HttpEmailService**: posts messages as JSON to a delivery webhook

use std::sync::Arc;

pub mod email_service;
pub mod http_email;
pub mod mock_email;

pub use email_service::{EmailMessage, EmailService};
pub use http_email::HttpEmailService;
pub use mock_email::MockEmailService;


/// Create the email service named by `config.provider`
pub fn create_email_service(
    config: &crate::config::EmailConfig,
) -> Result<Arc<dyn EmailService>, crate::InfrastructureError> {
    match config.provider.as_str() {
        "http" => Ok(Arc::new(HttpEmailService::new(config.clone())?)),
        "mock" => Ok(Arc::new(MockEmailService::new())),
        other => {
            tracing::warn!(provider = other, "Unknown email provider, using mock implementation");
            Ok(Arc::new(MockEmailService::new()))
        }
    }
}
