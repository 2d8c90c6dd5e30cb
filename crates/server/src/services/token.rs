//! Signed bearer token issuance and verification.
//!
//! A token is `base64url(email) "." hex(HMAC-SHA256(secret, email))`:
//! deterministic for a given secret and email, tamper-evident, and with no
//! expiry. Rotating `JWT_SECRET_KEY` invalidates every outstanding token.

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use sha2::Sha256;
use thiserror::Error;

use bookshelf_core::Email;

type HmacSha256 = Hmac<Sha256>;

/// Errors that can occur when verifying a token.
///
/// The HTTP surface collapses all of these into a uniform 401; the
/// distinction exists for logging and tests.
#[derive(Debug, Error)]
pub enum TokenError {
    /// The token does not have the expected payload.signature shape.
    #[error("malformed token")]
    Malformed,

    /// The signature does not match the payload under the current secret.
    #[error("signature mismatch")]
    SignatureMismatch,

    /// The signing key was rejected by the MAC implementation.
    #[error("invalid signing key: {0}")]
    Key(String),
}

/// Issues and verifies signed email-bearing tokens.
pub struct TokenService {
    secret: SecretString,
}

impl TokenService {
    /// Create a token service using the process-wide signing secret.
    #[must_use]
    pub const fn new(secret: SecretString) -> Self {
        Self { secret }
    }

    /// Issue a token binding `email`.
    ///
    /// # Errors
    ///
    /// Returns `TokenError::Key` if the MAC cannot be keyed.
    pub fn issue(&self, email: &Email) -> Result<String, TokenError> {
        let payload = URL_SAFE_NO_PAD.encode(email.as_str());
        let signature = hex::encode(self.sign(email.as_str())?);
        Ok(format!("{payload}.{signature}"))
    }

    /// Verify a presented token and decode the email it binds.
    ///
    /// # Errors
    ///
    /// Returns `TokenError::Malformed` if the token shape or payload does
    /// not decode, or `TokenError::SignatureMismatch` if the signature was
    /// not produced by the current secret.
    pub fn verify(&self, token: &str) -> Result<Email, TokenError> {
        let (payload, signature) = token.split_once('.').ok_or(TokenError::Malformed)?;

        let email_bytes = URL_SAFE_NO_PAD
            .decode(payload)
            .map_err(|_| TokenError::Malformed)?;
        let email_str = String::from_utf8(email_bytes).map_err(|_| TokenError::Malformed)?;
        let email = Email::parse(&email_str).map_err(|_| TokenError::Malformed)?;

        let expected = hex::encode(self.sign(email.as_str())?);
        if !constant_time_compare(&expected, signature) {
            return Err(TokenError::SignatureMismatch);
        }

        Ok(email)
    }

    fn sign(&self, email: &str) -> Result<Vec<u8>, TokenError> {
        let mut mac = HmacSha256::new_from_slice(self.secret.expose_secret().as_bytes())
            .map_err(|e| TokenError::Key(e.to_string()))?;
        mac.update(email.as_bytes());
        Ok(mac.finalize().into_bytes().to_vec())
    }
}

/// Constant-time string comparison to prevent timing attacks.
fn constant_time_compare(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut result: u8 = 0;
    for (x, y) in a.bytes().zip(b.bytes()) {
        result |= x ^ y;
    }

    result == 0
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn service(secret: &str) -> TokenService {
        TokenService::new(SecretString::from(secret.to_owned()))
    }

    fn email(s: &str) -> Email {
        Email::parse(s).unwrap()
    }

    #[test]
    fn test_issue_verify_roundtrip() {
        let tokens = service("test-signing-secret");
        let token = tokens.issue(&email("a@x.com")).unwrap();

        let verified = tokens.verify(&token).unwrap();
        assert_eq!(verified.as_str(), "a@x.com");
    }

    #[test]
    fn test_issue_is_deterministic() {
        let tokens = service("test-signing-secret");
        let first = tokens.issue(&email("a@x.com")).unwrap();
        let second = tokens.issue(&email("a@x.com")).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_verify_rejects_garbage() {
        let tokens = service("test-signing-secret");
        assert!(matches!(
            tokens.verify("not a token"),
            Err(TokenError::Malformed)
        ));
        assert!(matches!(
            tokens.verify("!!!.deadbeef"),
            Err(TokenError::Malformed)
        ));
        assert!(matches!(tokens.verify(""), Err(TokenError::Malformed)));
    }

    #[test]
    fn test_verify_rejects_tampered_payload() {
        let tokens = service("test-signing-secret");
        let token = tokens.issue(&email("a@x.com")).unwrap();

        let (_, signature) = token.split_once('.').unwrap();
        let forged = format!("{}.{signature}", URL_SAFE_NO_PAD.encode("b@x.com"));

        assert!(matches!(
            tokens.verify(&forged),
            Err(TokenError::SignatureMismatch)
        ));
    }

    #[test]
    fn test_verify_rejects_foreign_secret() {
        let ours = service("test-signing-secret");
        let theirs = service("some-other-secret");

        let token = theirs.issue(&email("a@x.com")).unwrap();
        assert!(matches!(
            ours.verify(&token),
            Err(TokenError::SignatureMismatch)
        ));
    }

    #[test]
    fn test_constant_time_compare() {
        assert!(constant_time_compare("hello", "hello"));
        assert!(!constant_time_compare("hello", "world"));
        assert!(!constant_time_compare("hello", "hell"));
    }
}
