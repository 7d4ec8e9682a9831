//! # Telegram Login Widget data verification
//!
//! - Login data parsing (JSON object or redirect query)
//! - Canonical data-check string
//! - HMAC-SHA256 signatures keyed with the bot token digest

pub mod canonical;
pub mod crypto;
pub mod payload;
pub mod sign;
pub mod signing_key;
pub mod verify;
