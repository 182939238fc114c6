//! JWT token codec

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::AuthError;

/// JWT claims
///
/// Wire names are fixed by the token format: `user_id`, `email`, `exp`.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// User ID, must be positive to resolve to a caller
    pub user_id: i64,
    /// Optional email carried alongside the identity
    #[serde(default)]
    pub email: Option<String>,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

/// Authenticated caller derived from a verified token
///
/// Exists only for the duration of a single request; never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: i64,
    pub email: Option<String>,
}

impl AuthUser {
    /// Create from verified claims
    ///
    /// Returns `None` when the claim carries a non-positive user ID, so an
    /// invalid identity can never surface as an authenticated caller.
    pub fn from_claims(claims: &Claims) -> Option<Self> {
        if claims.user_id <= 0 {
            return None;
        }
        Some(Self {
            id: claims.user_id,
            email: claims.email.clone(),
        })
    }
}

/// Token codec for issuing and verifying identity claims
///
/// Built once at startup from configuration and shared read-only across
/// requests; encode and decode are pure computations with no I/O.
#[derive(Clone)]
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    ttl_minutes: i64,
}

impl TokenCodec {
    /// Create a new token codec
    ///
    /// Only symmetric HMAC algorithms are accepted; anything else is a
    /// configuration error surfaced at startup.
    pub fn new(secret: &str, algorithm: &str, ttl_minutes: i64) -> Result<Self, AuthError> {
        let algorithm = match algorithm {
            "HS256" => Algorithm::HS256,
            "HS384" => Algorithm::HS384,
            "HS512" => Algorithm::HS512,
            other => return Err(AuthError::UnsupportedAlgorithm(other.to_string())),
        };

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            algorithm,
            ttl_minutes,
        })
    }

    /// Issue a signed access token for a user
    pub fn issue(&self, user_id: i64, email: Option<&str>) -> Result<String, AuthError> {
        let expire = Utc::now() + Duration::minutes(self.ttl_minutes);

        let claims = Claims {
            user_id,
            email: email.map(str::to_string),
            exp: expire.timestamp(),
        };

        debug!(user_id, "Issuing access token");

        encode(&Header::new(self.algorithm), &claims, &self.encoding_key).map_err(AuthError::Jwt)
    }

    /// Decode and verify an access token
    ///
    /// Returns the claims only if the signature verifies under the pinned
    /// algorithm and the token has not expired. Every failure mode --
    /// malformed input, signature mismatch, algorithm mismatch, expiry --
    /// collapses to `None` so callers cannot distinguish a forged token
    /// from an expired one.
    pub fn decode(&self, token: &str) -> Option<Claims> {
        let mut validation = Validation::new(self.algorithm);
        validation.leeway = 0;

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .ok()
    }
}
