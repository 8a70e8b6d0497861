//! Webhook signature generation/verification and idempotency keys.
//!
//! Signatures are HMAC-SHA256 over the raw request body, hex encoded.
//! Idempotency keys are an MD5 digest of a `scope:id` pair; they only
//! de-duplicate, they carry no integrity guarantee.

use hmac::{Hmac, Mac};
use md5::{Digest, Md5};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

const SIGNATURE_LEN: usize = 32;

pub fn sign(secret: &str, payload: &[u8]) -> String {
  let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
    .expect("HMAC can take key of any size");
  mac.update(payload);
  hex::encode(mac.finalize().into_bytes())
}

pub fn verify(secret: &str, payload: &[u8], signature: &str) -> bool {
  // Out-of-shape signatures are dropped before any MAC work.
  let Ok(bytes) = hex::decode(signature) else {
    return false;
  };
  if bytes.len() != SIGNATURE_LEN {
    return false;
  }

  let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
    .expect("HMAC can take key of any size");
  mac.update(payload);

  // verify_slice is a constant-time comparison
  mac.verify_slice(&bytes).is_ok()
}

pub fn idempotency_key(scope: &str, id: i64) -> String {
  let mut hasher = Md5::new();
  hasher.update(format!("{scope}:{id}").as_bytes());
  hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
  use super::*;

  const SECRET: &str = "test-signing-secret";

  #[test]
  fn test_roundtrip() {
    let payload = br#"{"event":"payment.succeeded","order_id":7}"#;
    let signature = sign(SECRET, payload);
    assert!(verify(SECRET, payload, &signature));
  }

  #[test]
  fn test_tampered_payload_fails() {
    let signature = sign(SECRET, b"amount=100");
    assert!(!verify(SECRET, b"amount=999", &signature));
  }

  #[test]
  fn test_wrong_length_rejected() {
    assert!(!verify(SECRET, b"payload", "deadbeef"));
    assert!(!verify(SECRET, b"payload", ""));
  }

  #[test]
  fn test_non_hex_rejected() {
    let signature = "z".repeat(64);
    assert!(!verify(SECRET, b"payload", &signature));
  }

  #[test]
  fn test_wrong_secret_fails() {
    let signature = sign(SECRET, b"payload");
    assert!(!verify("other-secret", b"payload", &signature));
  }

  #[test]
  fn test_idempotency_key_is_stable() {
    let a = idempotency_key("payout", 42);
    let b = idempotency_key("payout", 42);
    assert_eq!(a, b);
    assert_eq!(a.len(), 32);
    assert_ne!(a, idempotency_key("commission", 42));
    assert_ne!(a, idempotency_key("payout", 43));
  }
}
