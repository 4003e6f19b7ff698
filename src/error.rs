/*
 * Responsibility
 * - Token decode error taxonomy
 * - These never cross the authorizer boundary: the validity check absorbs
 *   every variant into `false`
 */
use thiserror::Error;

/// Why a stored token could not be decoded.
#[derive(Debug, Error)]
pub enum TokenError {
    #[error("token has no payload segment")]
    MissingPayload,
    #[error("payload is not valid base64: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("payload is not a valid claims object: {0}")]
    Claims(#[from] serde_json::Error),
}
