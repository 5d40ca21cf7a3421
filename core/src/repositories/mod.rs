//! Repository contracts the engine reads and mutates through.

pub mod otp;
pub mod session;
pub mod user;

pub use otp::OtpRepository;
pub use session::SessionStore;
pub use user::UserRepository;

#[cfg(test)]
pub use otp::MockOtpRepository;
#[cfg(test)]
pub use user::MockUserRepository;
#[cfg(test)]
pub use session::MockSessionStore;
