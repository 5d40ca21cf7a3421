//! Identifier utilities shared by strategies and notification channels

pub mod identifier;
pub mod phone;

pub use identifier::{is_valid_email, is_valid_username, looks_like_email, mask_email, mask_identifier};
pub use phone::{is_valid_phone, mask_phone_number, normalize_phone_number};
