//! Access and refresh token primitives.
//!
//! Access tokens are short-lived HS256 JWTs carrying a [`Claims`] payload.
//! Refresh tokens are opaque random strings; the database only ever sees
//! their SHA-256 digest, so a leaked sessions table cannot be replayed.

use chrono::{Duration, Utc};
use fame_core::types::DbId;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use uuid::Uuid;

/// Payload of an access token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// The user's database id.
    pub sub: DbId,
    /// Expiry, seconds since the Unix epoch.
    pub exp: i64,
    /// Issue time, seconds since the Unix epoch.
    pub iat: i64,
    /// Random per-token id (UUID v4).
    pub jti: String,
}

/// Signing secret and token lifetimes.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// HMAC-SHA256 signing secret.
    pub secret: String,
    /// Access token lifetime in minutes.
    pub access_token_expiry_mins: i64,
    /// Refresh token lifetime in days.
    pub refresh_token_expiry_days: i64,
}

impl JwtConfig {
    /// Read `JWT_SECRET` (required, non-empty), `JWT_ACCESS_EXPIRY_MINS`
    /// (default 15) and `JWT_REFRESH_EXPIRY_DAYS` (default 7) from the
    /// environment.
    ///
    /// # Panics
    ///
    /// Panics when `JWT_SECRET` is missing or empty, or when an expiry
    /// override does not parse. Token auth cannot work without a secret, so
    /// this fails at startup rather than at the first login.
    pub fn from_env() -> Self {
        let secret =
            std::env::var("JWT_SECRET").expect("JWT_SECRET must be set in the environment");
        assert!(!secret.is_empty(), "JWT_SECRET must not be empty");

        Self {
            secret,
            access_token_expiry_mins: env_i64("JWT_ACCESS_EXPIRY_MINS", 15),
            refresh_token_expiry_days: env_i64("JWT_REFRESH_EXPIRY_DAYS", 7),
        }
    }
}

fn env_i64(var: &str, default: i64) -> i64 {
    match std::env::var(var) {
        Ok(raw) => raw
            .parse()
            .unwrap_or_else(|_| panic!("{var} must be a valid i64")),
        Err(_) => default,
    }
}

/// Sign a fresh access token for `user_id`, expiring after the configured
/// number of minutes.
pub fn generate_access_token(
    user_id: DbId,
    config: &JwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let issued_at = Utc::now();
    let expires_at = issued_at + Duration::minutes(config.access_token_expiry_mins);

    let claims = Claims {
        sub: user_id,
        exp: expires_at.timestamp(),
        iat: issued_at.timestamp(),
        jti: Uuid::new_v4().to_string(),
    };

    let key = EncodingKey::from_secret(config.secret.as_bytes());
    encode(&Header::default(), &claims, &key) // HS256
}

/// Decode an access token, checking signature and expiry, and return its
/// [`Claims`].
pub fn validate_token(
    token: &str,
    config: &JwtConfig,
) -> Result<Claims, jsonwebtoken::errors::Error> {
    let key = DecodingKey::from_secret(config.secret.as_bytes());
    decode::<Claims>(token, &key, &Validation::default()).map(|data| data.claims)
}

/// Mint a refresh token as `(plaintext, sha256_hex)`. The plaintext goes to
/// the client; persist only the digest.
pub fn generate_refresh_token() -> (String, String) {
    let plaintext = Uuid::new_v4().to_string();
    let digest = hash_refresh_token(&plaintext);
    (plaintext, digest)
}

/// SHA-256 hex digest of a refresh token, for matching an incoming token
/// against the stored digest.
pub fn hash_refresh_token(token: &str) -> String {
    format!("{:x}", Sha256::digest(token.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with(secret: &str) -> JwtConfig {
        JwtConfig {
            secret: secret.to_string(),
            access_token_expiry_mins: 15,
            refresh_token_expiry_days: 7,
        }
    }

    #[test]
    fn access_token_round_trips_its_claims() {
        let config = config_with("unit-test-signing-secret-0001");
        let token = generate_access_token(7, &config).expect("signing should succeed");

        let claims = validate_token(&token, &config).expect("validation should succeed");
        assert_eq!(claims.sub, 7);
        assert!(claims.exp > claims.iat);
        assert!(!claims.jti.is_empty());
    }

    #[test]
    fn stale_token_is_rejected() {
        let config = config_with("unit-test-signing-secret-0001");

        // Expired far enough back to clear the default 60s leeway.
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: 1,
            exp: now - 600,
            iat: now - 1200,
            jti: Uuid::new_v4().to_string(),
        };

        let key = EncodingKey::from_secret(config.secret.as_bytes());
        let token = encode(&Header::default(), &claims, &key).expect("signing should succeed");

        assert!(validate_token(&token, &config).is_err());
    }

    #[test]
    fn refresh_digest_is_stable_hex() {
        let (plaintext, digest) = generate_refresh_token();

        assert_eq!(digest, hash_refresh_token(&plaintext));
        assert_eq!(digest.len(), 64);
        assert!(digest.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn token_signed_elsewhere_is_rejected() {
        let ours = config_with("unit-test-signing-secret-0001");
        let theirs = config_with("some-other-deployment-secret");

        let token = generate_access_token(1, &theirs).expect("signing should succeed");
        assert!(validate_token(&token, &ours).is_err());
    }
}
