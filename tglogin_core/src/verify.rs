//! Verify login data signatures
use subtle::ConstantTimeEq;

use crate::{
    crypto::hashes::HmacKeyError,
    payload::IdentityPayload,
    sign::compute_login_hash,
    signing_key::SigningKey,
};

#[derive(thiserror::Error, Debug)]
pub enum LoginVerificationError {
    #[error("failed to compute signature")]
    HmacError(#[from] HmacKeyError),

    #[error("invalid signature")]
    InvalidSignature,
}

// Case-sensitive
fn hashes_match(expected: &str, provided: &str) -> bool {
    expected.len() == provided.len() &&
        expected.as_bytes().ct_eq(provided.as_bytes()).into()
}

/// Returns `Ok(false)` if signature doesn't match login data
pub fn verify_login_with_key(
    payload: &IdentityPayload,
    signing_key: &SigningKey,
) -> Result<bool, LoginVerificationError> {
    let expected_hash = compute_login_hash(payload, signing_key)?;
    let is_valid = hashes_match(&expected_hash, &payload.hash);
    if !is_valid {
        log::debug!("login hash mismatch (id = {})", payload.telegram_id);
    };
    Ok(is_valid)
}

pub fn verify_login(
    payload: &IdentityPayload,
    bot_token: &str,
) -> Result<bool, LoginVerificationError> {
    let signing_key = SigningKey::from_bot_token(bot_token);
    verify_login_with_key(payload, &signing_key)
}

/// Same as [`verify_login`], but signature mismatch is an error
pub fn check_login(
    payload: &IdentityPayload,
    bot_token: &str,
) -> Result<(), LoginVerificationError> {
    if !verify_login(payload, bot_token)? {
        return Err(LoginVerificationError::InvalidSignature);
    };
    Ok(())
}
