//! services/api/src/web/token.rs
//!
//! Issues and verifies the signed bearer tokens that guard the admin routes.
//! Tokens are HS256-signed with the process-wide secret and carry the user's
//! id, email, and role for a fixed validity window (7 days by default).
//! There is no server-side revocation; a leaked token stays valid until it
//! expires.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use dairy_cms_core::domain::User;

/// The claims embedded in every issued token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the user id.
    pub sub: String,
    pub email: String,
    pub role: String,
    pub iat: i64,
    pub exp: i64,
}

pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl TokenService {
    pub fn new(secret: &[u8], ttl_days: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation: Validation::default(),
            ttl: Duration::days(ttl_days),
        }
    }

    /// Signs a token for the given user.
    pub fn issue(&self, user: &User) -> Result<String, jsonwebtoken::errors::Error> {
        let now = Utc::now();
        let claims = Claims {
            sub: user.id.clone(),
            email: user.email.clone(),
            role: user.role.clone(),
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };
        encode(&Header::default(), &claims, &self.encoding_key)
    }

    /// Decodes and validates a token. Fails on a bad signature, a malformed
    /// token, or an expired `exp`.
    pub fn verify(&self, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        decode::<Claims>(token, &self.decoding_key, &self.validation).map(|data| data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn user() -> User {
        User {
            id: "user-1".to_string(),
            email: "admin@gaushalafresh.com".to_string(),
            password: "hash".to_string(),
            name: "Admin".to_string(),
            role: "admin".to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn issue_then_verify_round_trips_claims() {
        let tokens = TokenService::new(b"test-secret", 7);
        let token = tokens.issue(&user()).unwrap();
        assert_eq!(token.split('.').count(), 3);

        let claims = tokens.verify(&token).unwrap();
        assert_eq!(claims.sub, "user-1");
        assert_eq!(claims.email, "admin@gaushalafresh.com");
        assert_eq!(claims.role, "admin");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn verify_rejects_garbage() {
        let tokens = TokenService::new(b"test-secret", 7);
        assert!(tokens.verify("not.a.token").is_err());
        assert!(tokens.verify("").is_err());
    }

    #[test]
    fn verify_rejects_wrong_secret() {
        let signer = TokenService::new(b"secret-one", 7);
        let verifier = TokenService::new(b"secret-two", 7);
        let token = signer.issue(&user()).unwrap();
        assert!(verifier.verify(&token).is_err());
    }

    #[test]
    fn verify_rejects_expired_token() {
        // A negative TTL puts `exp` a day in the past, well outside the
        // default validation leeway.
        let tokens = TokenService::new(b"test-secret", -1);
        let token = tokens.issue(&user()).unwrap();
        assert!(tokens.verify(&token).is_err());
    }
}
