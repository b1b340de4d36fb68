//! Signed bearer tokens.
//!
//! Tokens are HS256 JWTs binding the subject (user id) to an issued-at and
//! expiry timestamp. Verification checks the signature and the expiry with
//! zero leeway, so a tampered or expired token is always rejected - the
//! token is a credential, not an opaque lookup key.

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use caps_store_core::UserId;

use super::AuthError;

/// JSON Web Token payload.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the user's unique identifier.
    pub sub: i64,
    /// Time at which the token was issued (unix seconds).
    pub iat: i64,
    /// Time after which the token expires (unix seconds).
    pub exp: i64,
}

/// Issues and verifies access tokens.
pub struct TokenSigner {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl_minutes: i64,
    validation: Validation,
}

impl TokenSigner {
    /// Create a signer from the configured secret and token lifetime.
    #[must_use]
    pub fn new(secret: &SecretString, ttl_minutes: i64) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // The default 60s leeway would keep just-expired tokens alive.
        validation.leeway = 0;

        Self {
            encoding: EncodingKey::from_secret(secret.expose_secret().as_bytes()),
            decoding: DecodingKey::from_secret(secret.expose_secret().as_bytes()),
            ttl_minutes,
            validation,
        }
    }

    /// Issue a token for a user, valid for the configured lifetime.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::TokenCreation` if signing fails.
    pub fn issue(&self, user_id: UserId) -> Result<String, AuthError> {
        let now = chrono::Utc::now().timestamp();
        let claims = Claims {
            sub: user_id.as_i64(),
            iat: now,
            exp: now + self.ttl_minutes * 60,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|_| AuthError::TokenCreation)
    }

    /// Verify a token's signature and expiry and return its subject.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidToken` if the token is malformed,
    /// tampered with, signed with a different key, or expired.
    pub fn verify(&self, token: &str) -> Result<UserId, AuthError> {
        let data = decode::<Claims>(token, &self.decoding, &self.validation)
            .map_err(|_| AuthError::InvalidToken)?;

        Ok(UserId::new(data.claims.sub))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn signer(ttl_minutes: i64) -> TokenSigner {
        TokenSigner::new(
            &SecretString::from("0WturuP3yMxbEXhlimfWBJ9dkzT9xvJr"),
            ttl_minutes,
        )
    }

    #[test]
    fn test_issue_and_verify_roundtrip() {
        let signer = signer(30);
        let token = signer.issue(UserId::new(42)).unwrap();
        assert_eq!(signer.verify(&token).unwrap(), UserId::new(42));
    }

    #[test]
    fn test_tampered_token_rejected() {
        let signer = signer(30);
        let token = signer.issue(UserId::new(42)).unwrap();

        // Flip one character anywhere in the token.
        let mut bytes = token.into_bytes();
        bytes[10] = if bytes[10] == b'A' { b'B' } else { b'A' };
        let tampered = String::from_utf8(bytes).unwrap();

        assert!(matches!(
            signer.verify(&tampered),
            Err(AuthError::InvalidToken)
        ));
    }

    #[test]
    fn test_wrong_key_rejected() {
        let token = signer(30).issue(UserId::new(1)).unwrap();
        let other = TokenSigner::new(
            &SecretString::from("mItKjmzTTO0eSPtLEuO2l9RmoqN1sRPo"),
            30,
        );
        assert!(matches!(other.verify(&token), Err(AuthError::InvalidToken)));
    }

    #[test]
    fn test_expired_token_rejected() {
        // A negative lifetime produces an already-expired token.
        let signer = signer(-1);
        let token = signer.issue(UserId::new(7)).unwrap();
        assert!(matches!(signer.verify(&token), Err(AuthError::InvalidToken)));
    }

    #[test]
    fn test_garbage_rejected() {
        assert!(matches!(
            signer(30).verify("not-a-token"),
            Err(AuthError::InvalidToken)
        ));
    }
}
