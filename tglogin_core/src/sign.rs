//! Create login data signatures
use crate::{
    canonical::canonicalize,
    crypto::hashes::{hmac_sha256, HmacKeyError},
    payload::IdentityPayload,
    signing_key::SigningKey,
};

/// Computes hex-encoded signature of login data.
/// The `hash` field of the payload is not used.
pub fn compute_login_hash(
    payload: &IdentityPayload,
    signing_key: &SigningKey,
) -> Result<String, HmacKeyError> {
    let message = canonicalize(payload);
    let code = hmac_sha256(signing_key.as_bytes(), message.as_bytes())?;
    // Lowercase, no separators
    Ok(hex::encode(code))
}

/// Replaces `hash` with a signature created with the given key
pub fn sign_login_data(
    payload: &IdentityPayload,
    signing_key: &SigningKey,
) -> Result<IdentityPayload, HmacKeyError> {
    let hash = compute_login_hash(payload, signing_key)?;
    let signed_payload = IdentityPayload { hash, ..payload.clone() };
    Ok(signed_payload)
}
