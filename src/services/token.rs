//! Bearer-token expiry check.
//!
//! Only the payload segment of the token is read; signatures are the issuing
//! server's concern. A token is usable when its `exp` claim is strictly in the
//! future — a token expiring exactly now is already unusable.

use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use chrono::Utc;
use serde::Deserialize;
use tracing::debug;

use crate::error::TokenError;

/// Claims read from the token payload. Expiry is the only claim this crate
/// acts on.
#[derive(Debug, Deserialize)]
pub struct Claims {
    /// Expiry, seconds since the Unix epoch.
    pub exp: i64,
}

/// Decode the payload segment (index 1) of a dot-separated token.
pub fn decode_claims(token: &str) -> Result<Claims, TokenError> {
    let payload = token.split('.').nth(1).ok_or(TokenError::MissingPayload)?;
    let bytes = URL_SAFE_NO_PAD.decode(payload)?;
    Ok(serde_json::from_slice(&bytes)?)
}

/// Whether the stored token is still usable.
///
/// Any decode failure (wrong segment count, malformed base64, malformed
/// claims, missing or non-integer `exp`) counts as unusable.
pub fn is_valid(token: &str) -> bool {
    match decode_claims(token) {
        Ok(claims) => {
            let now = Utc::now().timestamp();
            let valid = claims.exp > now;
            debug!(valid, exp = claims.exp, now, "token expiry check");
            valid
        }
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{Algorithm, EncodingKey, Header};
    use serde::Serialize;

    #[derive(Serialize)]
    struct TestClaims {
        sub: &'static str,
        exp: i64,
    }

    fn mint(exp: i64) -> String {
        jsonwebtoken::encode(
            &Header::new(Algorithm::HS256),
            &TestClaims { sub: "user-1", exp },
            &EncodingKey::from_secret(b"test-secret"),
        )
        .unwrap()
    }

    #[test]
    fn unexpired_token_is_valid() {
        let token = mint(Utc::now().timestamp() + 3600);
        assert!(is_valid(&token));
    }

    #[test]
    fn expired_token_is_invalid() {
        let token = mint(Utc::now().timestamp() - 3600);
        assert!(!is_valid(&token));
    }

    #[test]
    fn token_expiring_exactly_now_is_invalid() {
        // Strict greater-than: equality fails the check.
        let token = mint(Utc::now().timestamp());
        assert!(!is_valid(&token));
    }

    #[test]
    fn token_without_dot_segments_is_invalid() {
        assert!(!is_valid("not-a-jwt"));
    }

    #[test]
    fn payload_with_bad_base64_is_invalid() {
        assert!(!is_valid("header.???.signature"));
    }

    #[test]
    fn payload_without_exp_is_invalid() {
        let payload = URL_SAFE_NO_PAD.encode(br#"{"sub":"user-1"}"#);
        assert!(!is_valid(&format!("header.{}.signature", payload)));
    }

    #[test]
    fn payload_with_non_integer_exp_is_invalid() {
        let payload = URL_SAFE_NO_PAD.encode(br#"{"exp":"soon"}"#);
        assert!(!is_valid(&format!("header.{}.signature", payload)));
    }

    #[test]
    fn decode_claims_reads_exp() {
        let token = mint(1_234_567_890);
        let claims = decode_claims(&token).unwrap();
        assert_eq!(claims.exp, 1_234_567_890);
    }

    #[test]
    fn decode_claims_reports_missing_payload() {
        assert!(matches!(
            decode_claims("single-segment"),
            Err(TokenError::MissingPayload)
        ));
    }
}
