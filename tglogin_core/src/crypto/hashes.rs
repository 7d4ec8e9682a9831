use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256};

type HmacSha256 = Hmac<Sha256>;

#[derive(thiserror::Error, Debug)]
#[error("invalid HMAC key")]
pub struct HmacKeyError;

/// Computes SHA-256 digest of the given value
pub fn sha256(input: &[u8]) -> [u8; 32] {
    Sha256::digest(input).into()
}

/// Computes HMAC-SHA256 code of the given message
pub fn hmac_sha256(
    key: &[u8],
    message: &[u8],
) -> Result<[u8; 32], HmacKeyError> {
    let mut mac = HmacSha256::new_from_slice(key)
        .map_err(|_| HmacKeyError)?;
    mac.update(message);
    Ok(mac.finalize().into_bytes().into())
}
