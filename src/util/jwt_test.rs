use super::*;

fn token_with_payload(payload: &serde_json::Value) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
    let body = URL_SAFE_NO_PAD.encode(payload.to_string().as_bytes());
    format!("{header}.{body}.sig")
}

#[test]
fn expiry_secs_reads_exp_claim() {
    let token = token_with_payload(&serde_json::json!({"sub":"7","exp":1_700_000_000}));
    assert_eq!(expiry_secs(&token), Some(1_700_000_000));
}

#[test]
fn expiry_secs_none_without_exp() {
    let token = token_with_payload(&serde_json::json!({"sub":"7"}));
    assert_eq!(expiry_secs(&token), None);
}

#[test]
fn token_expired_ten_seconds_ago_is_invalid() {
    let now = 1_700_000_000;
    let token = token_with_payload(&serde_json::json!({"exp": now - 10}));
    assert!(!valid_at(&token, now));
}

#[test]
fn token_expiring_in_future_is_valid() {
    let now = 1_700_000_000;
    let token = token_with_payload(&serde_json::json!({"exp": now + 60}));
    assert!(valid_at(&token, now));
}

#[test]
fn token_without_exp_is_trusted() {
    let token = token_with_payload(&serde_json::json!({"sub":"7"}));
    assert!(valid_at(&token, 1_700_000_000));
}

#[test]
fn malformed_tokens_are_invalid() {
    assert!(!valid_at("", 0));
    assert!(!valid_at("only-one-part", 0));
    assert!(!valid_at("a.b", 0));
    assert!(!valid_at("a.%%%.c", 0));
    assert!(!valid_at("a.b.c.d", 0));

    let not_json = format!("h.{}.s", URL_SAFE_NO_PAD.encode(b"not json"));
    assert!(!valid_at(&not_json, 0));
}

#[test]
fn exp_exactly_now_is_expired() {
    let now = 1_700_000_000;
    let token = token_with_payload(&serde_json::json!({"exp": now}));
    assert!(!valid_at(&token, now));
}
