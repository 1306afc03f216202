//! Best-effort JWT expiry decoding.

use base64::Engine as _;

use crate::error::AuthError;

/// Decode a JWT `exp` claim without signature validation.
///
/// Used for quick local expiry checks when restoring a stored session. The
/// provider remains the authority; an expired-but-adopted token simply fails
/// at the first remote call.
///
/// # Errors
///
/// Returns `AuthError::Unknown` if the JWT format is invalid or the `exp`
/// claim is missing or cannot be parsed.
pub fn decode_expiry(jwt: &str) -> Result<chrono::DateTime<chrono::Utc>, AuthError> {
    let parts: Vec<&str> = jwt.split('.').collect();
    if parts.len() != 3 {
        return Err(AuthError::Unknown("invalid JWT format".into()));
    }
    let payload = base64::engine::general_purpose::URL_SAFE_NO_PAD
        .decode(parts[1])
        .map_err(|e| AuthError::Unknown(format!("base64 decode failed: {e}")))?;
    let value: serde_json::Value = serde_json::from_slice(&payload)
        .map_err(|e| AuthError::Unknown(format!("JSON parse failed: {e}")))?;
    let exp = value["exp"]
        .as_i64()
        .ok_or_else(|| AuthError::Unknown("missing exp claim".into()))?;
    chrono::DateTime::from_timestamp(exp, 0)
        .ok_or_else(|| AuthError::Unknown("invalid exp timestamp".into()))
}

#[cfg(test)]
mod tests {
    use base64::Engine as _;
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;

    use super::*;

    fn make_jwt_with_exp(exp: i64) -> String {
        let header = URL_SAFE_NO_PAD.encode(r#"{"alg":"none"}"#);
        let payload = URL_SAFE_NO_PAD.encode(format!(r#"{{"sub":"user_123","exp":{exp}}}"#));
        let signature = URL_SAFE_NO_PAD.encode("fake_sig");
        format!("{header}.{payload}.{signature}")
    }

    #[test]
    fn decode_expiry_valid_jwt() {
        let future_exp = chrono::Utc::now().timestamp() + 3600;
        let jwt = make_jwt_with_exp(future_exp);
        let dt = decode_expiry(&jwt).unwrap();
        assert_eq!(dt.timestamp(), future_exp);
    }

    #[test]
    fn decode_expiry_expired_jwt() {
        let past_exp = chrono::Utc::now().timestamp() - 3600;
        let jwt = make_jwt_with_exp(past_exp);
        let dt = decode_expiry(&jwt).unwrap();
        assert!(dt < chrono::Utc::now());
    }

    #[test]
    fn decode_expiry_invalid_format() {
        let err = decode_expiry("not-a-jwt").unwrap_err();
        assert!(err.to_string().contains("invalid JWT format"));
    }

    #[test]
    fn decode_expiry_missing_exp_claim() {
        let header = URL_SAFE_NO_PAD.encode(r#"{"alg":"none"}"#);
        let payload = URL_SAFE_NO_PAD.encode(r#"{"sub":"user_123"}"#);
        let signature = URL_SAFE_NO_PAD.encode("fake_sig");
        let jwt = format!("{header}.{payload}.{signature}");

        let err = decode_expiry(&jwt).unwrap_err();
        assert!(err.to_string().contains("missing exp claim"));
    }
}
