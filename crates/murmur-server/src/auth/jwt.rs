use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use murmur_error::ext::ResultExt;
use murmur_error::Result;
use murmur_model::id::UserId;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

pub const ISSUER: &str = "murmur";

/// Claims carried by a login token.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoginClaims {
    /// Id of the logged-in user.
    pub sub: i64,
    pub iss: String,
    /// Unix timestamp the token was issued at.
    pub iat: i64,
    /// Unix timestamp the token expires at.
    pub exp: i64,
}

#[derive(Debug, Error)]
#[error("Could not encode login token")]
pub struct EncodeTokenError;

#[derive(Debug, Error)]
#[error("Could not decode login token")]
pub struct DecodeTokenError;

impl LoginClaims {
    #[must_use]
    pub fn new(user_id: UserId, expires_in: Duration) -> Self {
        let now = Utc::now().timestamp();
        Self {
            sub: user_id.0,
            iss: ISSUER.to_string(),
            iat: now,
            exp: now + expires_in.as_secs() as i64,
        }
    }

    #[tracing::instrument(skip_all, name = "auth.jwt.encode")]
    pub fn encode(&self, secret: &str) -> Result<String, EncodeTokenError> {
        jsonwebtoken::encode(
            &Header::new(Algorithm::HS256),
            self,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .change_context(EncodeTokenError)
    }

    #[tracing::instrument(skip_all, name = "auth.jwt.decode")]
    pub fn decode(token: &str, secret: &str) -> Result<Self, DecodeTokenError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[ISSUER]);

        jsonwebtoken::decode::<Self>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &validation,
        )
        .map(|data| data.claims)
        .change_context(DecodeTokenError)
    }
}

#[cfg(test)]
mod tests {
    use super::LoginClaims;
    use murmur_model::id::UserId;
    use std::time::Duration;

    const SECRET: &str = "murmur-test-signing-secret";

    #[test]
    fn should_round_trip_claims() {
        let claims = LoginClaims::new(UserId(42), Duration::from_secs(3600));
        let token = claims.encode(SECRET).unwrap();

        let decoded = LoginClaims::decode(&token, SECRET).unwrap();
        assert_eq!(decoded.sub, 42);
        assert_eq!(decoded.iss, super::ISSUER);
        assert_eq!(decoded.exp, claims.exp);
    }

    #[test]
    fn should_reject_a_token_signed_with_another_secret() {
        let claims = LoginClaims::new(UserId(42), Duration::from_secs(3600));
        let token = claims.encode("somebody-elses-secret").unwrap();

        assert!(LoginClaims::decode(&token, SECRET).is_err());
    }

    #[test]
    fn should_reject_an_expired_token() {
        // expired two hours ago, far past any validation leeway
        let mut claims = LoginClaims::new(UserId(42), Duration::from_secs(0));
        claims.iat -= 7200;
        claims.exp -= 7200;

        let token = claims.encode(SECRET).unwrap();
        assert!(LoginClaims::decode(&token, SECRET).is_err());
    }

    #[test]
    fn should_reject_garbage() {
        assert!(LoginClaims::decode("definitely.not.a-token", SECRET).is_err());
    }
}
