//! HS256 bearer tokens.
//!
//! Claims carry the user id in `sub` plus the username, so resolving a
//! caller never needs a store round-trip.

use chrono::{Duration, Utc};
use domains::{AccessToken, CallerIdentity, DomainError, Result, TokenService, User, UserId};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: Uuid,
    username: String,
    iat: i64,
    exp: i64,
}

pub struct JwtTokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl JwtTokenService {
    pub fn new(secret: &SecretString, ttl: Duration) -> Self {
        let key = secret.expose_secret().as_bytes();
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            encoding: EncodingKey::from_secret(key),
            decoding: DecodingKey::from_secret(key),
            validation,
            ttl,
        }
    }
}

impl TokenService for JwtTokenService {
    fn issue(&self, user: &User) -> Result<AccessToken> {
        let iat = Utc::now();
        let claims = Claims {
            sub: user.id.as_uuid(),
            username: user.username.clone(),
            iat: iat.timestamp(),
            exp: (iat + self.ttl).timestamp(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding).map_err(|err| {
            tracing::error!(error = %err, "token signing failed");
            DomainError::Internal("token signing failed".into())
        })?;

        Ok(AccessToken {
            token,
            expires_in: self.ttl.num_seconds(),
        })
    }

    fn verify(&self, token: &str) -> Result<CallerIdentity> {
        let data = decode::<Claims>(token, &self.decoding, &self.validation).map_err(|err| {
            tracing::warn!(error = %err, "bearer token rejected");
            DomainError::unauthorized("invalid or expired token")
        })?;

        Ok(CallerIdentity {
            user_id: UserId(data.claims.sub),
            username: data.claims.username,
        })
    }
}
