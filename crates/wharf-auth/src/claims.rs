//! Signed claim sets carried by bearer tokens.

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};
use wharf_types::{User, UserId, UserRole};

use crate::error::{AuthError, Result};

/// The claim set embedded in a token.
///
/// Everything the authorization engine needs is carried here; verifying a
/// token requires no store access.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// The principal's user ID.
    pub sub: UserId,
    /// The principal's role at issue time.
    pub role: UserRole,
    /// Whether the principal is locked into a password change.
    pub must_change_password: bool,
    /// Unix timestamp at which the token was issued.
    pub iat: u64,
    /// Unix timestamp at which the token expires.
    pub exp: u64,
}

impl Claims {
    /// Whether the claim set has expired.
    pub fn is_expired(&self) -> bool {
        self.exp <= now()
    }
}

/// Issues and verifies HS256-signed claim sets.
///
/// The secret and time-to-live are injected at startup from configuration;
/// there is no process-global state.
pub struct TokenCodec {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl_secs: u64,
}

impl TokenCodec {
    /// Create a codec from a shared secret and a token lifetime in seconds.
    pub fn new(secret: &[u8], ttl_secs: u64) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.validate_aud = false;

        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
            ttl_secs,
        }
    }

    /// Issue a token for a user.
    pub fn issue(&self, user: &User) -> Result<String> {
        let issued_at = now();
        let claims = Claims {
            sub: user.id,
            role: user.role,
            must_change_password: user.must_change_password,
            iat: issued_at,
            exp: issued_at + self.ttl_secs,
        };
        self.sign(&claims)
    }

    /// Sign an explicit claim set.
    pub fn sign(&self, claims: &Claims) -> Result<String> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding)
            .map_err(|e| AuthError::Crypto(e.to_string()))
    }

    /// Verify a token's signature and expiry, returning its claims.
    ///
    /// All failure modes collapse to [`AuthError::InvalidToken`]; callers
    /// never learn whether the signature or the expiry was at fault.
    pub fn verify(&self, token: &str) -> Result<Claims> {
        let data = decode::<Claims>(token, &self.decoding, &self.validation)
            .map_err(|_| AuthError::InvalidToken)?;

        // jsonwebtoken applies leeway to `exp`; enforce the exact boundary.
        if data.claims.is_expired() {
            return Err(AuthError::InvalidToken);
        }

        Ok(data.claims)
    }
}

fn now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &[u8] = b"test-secret-0123456789";

    fn sample_user(role: UserRole, must_change: bool) -> User {
        let mut user = User::new(7, "alice".into(), "alice@example.com".into(), "h".into())
            .with_role(role);
        user.must_change_password = must_change;
        user
    }

    #[test]
    fn issue_and_verify_roundtrip() {
        let codec = TokenCodec::new(SECRET, 600);
        let token = codec.issue(&sample_user(UserRole::Admin, false)).unwrap();
        let claims = codec.verify(&token).unwrap();

        assert_eq!(claims.sub, 7);
        assert_eq!(claims.role, UserRole::Admin);
        assert!(!claims.must_change_password);
        assert_eq!(claims.exp, claims.iat + 600);
    }

    #[test]
    fn verify_rejects_wrong_secret() {
        let codec = TokenCodec::new(SECRET, 600);
        let other = TokenCodec::new(b"another-secret", 600);
        let token = codec.issue(&sample_user(UserRole::User, false)).unwrap();

        assert_eq!(other.verify(&token), Err(AuthError::InvalidToken));
    }

    #[test]
    fn verify_rejects_garbage() {
        let codec = TokenCodec::new(SECRET, 600);
        assert_eq!(codec.verify("not.a.token"), Err(AuthError::InvalidToken));
        assert_eq!(codec.verify(""), Err(AuthError::InvalidToken));
    }

    #[test]
    fn verify_rejects_expired() {
        let codec = TokenCodec::new(SECRET, 600);
        let issued_at = now() - 1200;
        let claims = Claims {
            sub: 7,
            role: UserRole::User,
            must_change_password: false,
            iat: issued_at,
            exp: issued_at + 600,
        };
        let token = codec.sign(&claims).unwrap();

        assert_eq!(codec.verify(&token), Err(AuthError::InvalidToken));
    }

    #[test]
    fn must_change_password_survives_roundtrip() {
        let codec = TokenCodec::new(SECRET, 600);
        let token = codec.issue(&sample_user(UserRole::Superadmin, true)).unwrap();
        let claims = codec.verify(&token).unwrap();

        assert!(claims.must_change_password);
        assert_eq!(claims.role, UserRole::Superadmin);
    }
}
