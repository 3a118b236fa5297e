/// Stateless session tokens
///
/// A token is a signed assertion of `{sub, iat, exp}` with a fixed 24-hour
/// lifetime, verified purely from the signature and expiry. There is no
/// server-side session table or revocation list: logout is client-side token
/// deletion, and a token stays valid for its full window even if the account
/// password changes in the meantime.
///
/// The HMAC key is process configuration. `initialize()` must be called once
/// at startup before any token operation.
use anyhow::{anyhow, Result};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppError;

/// Session token lifetime
pub const TOKEN_TTL_HOURS: i64 = 24;

/// Claims embedded in a session token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user id as UUID string)
    pub sub: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

struct Keys {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

static KEYS: OnceCell<Keys> = OnceCell::new();

/// Install the signing secret. Can only be called once per process.
pub fn initialize(secret: &str) -> Result<()> {
    if secret.trim().is_empty() {
        return Err(anyhow!("token secret must not be empty"));
    }

    KEYS.set(Keys {
        encoding: EncodingKey::from_secret(secret.as_bytes()),
        decoding: DecodingKey::from_secret(secret.as_bytes()),
    })
    .map_err(|_| anyhow!("token keys already initialized"))
}

fn keys() -> Result<&'static Keys, AppError> {
    KEYS.get()
        .ok_or_else(|| AppError::Internal("token keys not initialized".to_string()))
}

/// Issue a signed session token for a user
pub fn issue_token(user_id: Uuid) -> Result<String, AppError> {
    let now = Utc::now();
    let claims = Claims {
        sub: user_id.to_string(),
        iat: now.timestamp(),
        exp: (now + Duration::hours(TOKEN_TTL_HOURS)).timestamp(),
    };

    encode(&Header::default(), &claims, &keys()?.encoding)
        .map_err(|e| AppError::Internal(format!("failed to sign token: {e}")))
}

/// Verify a token and return the embedded user id.
///
/// Rejects malformed tokens, bad signatures, and expired tokens. Pure
/// computation: no store access happens here.
pub fn verify_token(token: &str) -> Result<Uuid, AppError> {
    let data = decode::<Claims>(token, &keys()?.decoding, &Validation::default())
        .map_err(|_| AppError::Unauthenticated("invalid or expired token".to_string()))?;

    Uuid::parse_str(&data.claims.sub)
        .map_err(|_| AppError::Unauthenticated("invalid token subject".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn init_test_keys() {
        static INIT: std::sync::Once = std::sync::Once::new();
        INIT.call_once(|| {
            initialize("unit-test-secret").expect("initialize token keys");
        });
    }

    #[test]
    fn issued_token_verifies_to_same_user() {
        init_test_keys();

        let user_id = Uuid::new_v4();
        let token = issue_token(user_id).unwrap();
        assert_eq!(token.matches('.').count(), 2);
        assert_eq!(verify_token(&token).unwrap(), user_id);
    }

    #[test]
    fn token_carries_24h_expiry() {
        init_test_keys();

        let before = Utc::now().timestamp();
        let token = issue_token(Uuid::new_v4()).unwrap();

        let data = decode::<Claims>(
            &token,
            &DecodingKey::from_secret("unit-test-secret".as_bytes()),
            &Validation::default(),
        )
        .unwrap();

        let lifetime = data.claims.exp - data.claims.iat;
        assert_eq!(lifetime, TOKEN_TTL_HOURS * 3600);
        assert!(data.claims.iat >= before);
    }

    #[test]
    fn malformed_token_is_rejected() {
        init_test_keys();
        assert!(verify_token("not.a.token").is_err());
        assert!(verify_token("").is_err());
    }

    #[test]
    fn tampered_token_is_rejected() {
        init_test_keys();

        let token = issue_token(Uuid::new_v4()).unwrap();
        let mut parts: Vec<String> = token.split('.').map(str::to_string).collect();
        parts[2] = parts[2].chars().rev().collect();
        assert!(verify_token(&parts.join(".")).is_err());
    }

    #[test]
    fn expired_token_is_rejected() {
        init_test_keys();

        let now = Utc::now();
        let claims = Claims {
            sub: Uuid::new_v4().to_string(),
            iat: (now - Duration::hours(25)).timestamp(),
            exp: (now - Duration::hours(1)).timestamp(),
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret("unit-test-secret".as_bytes()),
        )
        .unwrap();

        assert!(verify_token(&token).is_err());
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        init_test_keys();

        let now = Utc::now();
        let claims = Claims {
            sub: Uuid::new_v4().to_string(),
            iat: now.timestamp(),
            exp: (now + Duration::hours(1)).timestamp(),
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret("some-other-secret".as_bytes()),
        )
        .unwrap();

        assert!(verify_token(&token).is_err());
    }
}
