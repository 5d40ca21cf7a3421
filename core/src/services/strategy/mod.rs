//! Identity strategies for multi-channel authentication
//!
//! A strategy owns one identity channel (email, phone or username), or wraps
//! several of them in a fixed order. Strategies are stateless and built fresh
//! by `StrategyResolver` for every request from the enabled channels and the
//! submitted user data.

mod identity;
mod resolver;


pub use identity::{CombinedStrategy, IdentityStrategy, UserData};
pub use resolver::StrategyResolver;
