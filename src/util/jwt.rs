//! Local JWT expiry check.
//!
//! The session token is only trusted after decoding its `exp` claim and
//! comparing against the current clock. This runs entirely client-side:
//! an expired token never reaches the network.

#[cfg(test)]
#[path = "jwt_test.rs"]
mod jwt_test;

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;

/// Extract the `exp` claim (seconds since epoch) from a JWT, if present.
///
/// Returns `None` when the token is not a three-part JWT or the payload
/// does not decode to JSON.
pub fn expiry_secs(token: &str) -> Option<u64> {
    let payload = decode_payload(token)?;
    payload.get("exp").and_then(serde_json::Value::as_u64)
}

/// Whether the token should still be trusted at `now_secs`.
///
/// A malformed token is never valid. A well-formed token without an
/// `exp` claim is trusted; one with `exp` at or before `now_secs` is not.
pub fn valid_at(token: &str, now_secs: u64) -> bool {
    let Some(payload) = decode_payload(token) else {
        return false;
    };
    match payload.get("exp").and_then(serde_json::Value::as_u64) {
        Some(exp) => exp > now_secs,
        None => true,
    }
}

fn decode_payload(token: &str) -> Option<serde_json::Value> {
    // header.payload.signature, nothing more
    let parts: Vec<&str> = token.split('.').collect();
    if parts.len() != 3 {
        return None;
    }
    let bytes = URL_SAFE_NO_PAD.decode(parts[1]).ok()?;
    serde_json::from_slice(&bytes).ok()
}

/// Current wall clock in seconds, for feeding [`valid_at`] in the browser.
#[cfg(feature = "hydrate")]
pub fn now_secs() -> u64 {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    {
        (js_sys::Date::now() / 1000.0) as u64
    }
}
