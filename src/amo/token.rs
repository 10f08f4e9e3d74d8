//! JWT credentials for the AMO API.
//!
//! AMO expects an HS256 token signed with the API secret, carrying the API key
//! as issuer and a unique `jti`. Tokens live for 60 seconds, so one is minted
//! per request rather than cached.

use chrono::Utc;
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::amo::error::AmoError;

pub const TOKEN_LIFETIME_SECS: i64 = 60;

#[derive(Clone)]
pub struct Credentials {
    pub issuer: String,
    pub secret: String,
}

impl Credentials {
    pub fn new(issuer: impl Into<String>, secret: impl Into<String>) -> Self {
        Credentials {
            issuer: issuer.into(),
            secret: secret.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("issuer", &self.issuer)
            .field("secret", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub iss: String,
    pub jti: String,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    pub fn new(issuer: &str, issued_at: i64) -> Self {
        Claims {
            iss: issuer.to_string(),
            jti: Uuid::new_v4().to_string(),
            iat: issued_at,
            exp: issued_at + TOKEN_LIFETIME_SECS,
        }
    }
}

/// Turns claims into a compact token. Swappable so tests can see what was signed.
pub trait TokenSigner: Send + Sync {
    fn sign(&self, claims: &Claims, secret: &str) -> Result<String, AmoError>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct Hs256Signer;

impl TokenSigner for Hs256Signer {
    fn sign(&self, claims: &Claims, secret: &str) -> Result<String, AmoError> {
        let header = Header::new(Algorithm::HS256);
        let token = encode(&header, claims, &EncodingKey::from_secret(secret.as_bytes()))?;
        Ok(token)
    }
}

pub fn mint_token(signer: &dyn TokenSigner, credentials: &Credentials) -> Result<String, AmoError> {
    let claims = Claims::new(&credentials.issuer, Utc::now().timestamp());
    signer.sign(&claims, &credentials.secret)
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{DecodingKey, Validation, decode};

    fn decode_claims(token: &str, secret: &str) -> Claims {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_required_spec_claims(&["exp", "iss"]);
        decode::<Claims>(token, &DecodingKey::from_secret(secret.as_bytes()), &validation)
            .unwrap()
            .claims
    }

    #[test]
    fn minted_token_carries_issuer_and_sixty_second_lifetime() {
        let credentials = Credentials::new("user:12345:67", "s3cret");
        let before = Utc::now().timestamp();
        let token = mint_token(&Hs256Signer, &credentials).unwrap();
        let claims = decode_claims(&token, "s3cret");

        assert_eq!(claims.iss, "user:12345:67");
        assert!(claims.iat >= before);
        assert_eq!(claims.exp - claims.iat, TOKEN_LIFETIME_SECS);
        assert!(Uuid::parse_str(&claims.jti).is_ok());
    }

    #[test]
    fn every_token_gets_a_fresh_jti() {
        let credentials = Credentials::new("issuer", "secret");
        let a = decode_claims(&mint_token(&Hs256Signer, &credentials).unwrap(), "secret");
        let b = decode_claims(&mint_token(&Hs256Signer, &credentials).unwrap(), "secret");
        assert_ne!(a.jti, b.jti);
    }

    #[test]
    fn token_does_not_verify_with_another_secret() {
        let token = mint_token(&Hs256Signer, &Credentials::new("issuer", "right")).unwrap();
        let result = decode::<Claims>(
            &token,
            &DecodingKey::from_secret(b"wrong"),
            &Validation::new(Algorithm::HS256),
        );
        assert!(result.is_err());
    }

    #[test]
    fn debug_output_hides_the_secret() {
        let rendered = format!("{:?}", Credentials::new("issuer", "hunter2"));
        assert!(rendered.contains("issuer"));
        assert!(!rendered.contains("hunter2"));
    }
}
