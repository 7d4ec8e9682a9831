use crate::crypto::hashes::sha256;

/// Secret key for login data signatures.
///
/// Derived from the bot token as its SHA-256 digest. Can be computed once
/// per token and reused.
#[derive(Clone)]
pub struct SigningKey([u8; 32]);

impl SigningKey {
    pub fn from_bot_token(bot_token: &str) -> Self {
        Self(sha256(bot_token.as_bytes()))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}
