//! Bearer token inspection
//!
//! Reads the `exp` claim out of a JWT-shaped token without verifying its
//! signature. The result is advisory; the server's 401 is authoritative.

use base64::engine::general_purpose::{STANDARD_NO_PAD, URL_SAFE_NO_PAD};
use base64::Engine as _;
use chrono::Utc;
use serde_json::Value;

/// Decode the payload (second dot-separated segment) of a token as JSON.
///
/// Accepts both the URL-safe and standard base64 alphabets, padded or not.
pub fn decode_payload(token: &str) -> Option<Value> {
    let segment = token.split('.').nth(1)?;
    let segment = segment.trim_end_matches('=');

    let bytes = URL_SAFE_NO_PAD
        .decode(segment)
        .or_else(|_| STANDARD_NO_PAD.decode(segment))
        .ok()?;

    serde_json::from_slice(&bytes).ok()
}

/// Expiry claim in seconds since the epoch
pub fn expiry(token: &str) -> Option<f64> {
    decode_payload(token)?.get("exp")?.as_f64()
}

/// True only when the token's `exp` is strictly after `now` (epoch seconds)
pub fn is_valid_at(token: &str, now: i64) -> bool {
    match expiry(token) {
        Some(exp) => exp > now as f64,
        None => false,
    }
}

/// True only when the token's `exp` is strictly in the future
pub fn is_valid(token: &str) -> bool {
    is_valid_at(token, Utc::now().timestamp())
}

#[cfg(test)]
pub(crate) fn make_token(payload: &Value) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
    let body = URL_SAFE_NO_PAD.encode(payload.to_string());
    format!("{}.{}.signature", header, body)
}
