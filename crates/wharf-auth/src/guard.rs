//! Request authorization over decoded claims.

use wharf_types::{UserId, UserRole};

use crate::claims::{Claims, TokenCodec};
use crate::error::{AuthError, Result};

/// The authenticated actor behind a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Principal {
    /// User ID from the verified claims.
    pub id: UserId,
    /// Role from the verified claims.
    pub role: UserRole,
}

impl From<&Claims> for Principal {
    fn from(claims: &Claims) -> Self {
        Self {
            id: claims.sub,
            role: claims.role,
        }
    }
}

/// Evaluates whether a request may proceed.
///
/// The gate is a pure function over the supplied token and the check's
/// parameters: it never consults the store and has no side effects. Handlers
/// receive the resulting [`Principal`] as a typed value.
pub struct AuthGate {
    codec: TokenCodec,
}

impl AuthGate {
    /// Create a gate around a token codec.
    pub fn new(codec: TokenCodec) -> Self {
        Self { codec }
    }

    /// The codec used to verify tokens, for issuing at login.
    pub fn codec(&self) -> &TokenCodec {
        &self.codec
    }

    /// Authorize a request that requires an authenticated principal.
    ///
    /// Checks run in a fixed order, and the first failure wins:
    ///
    /// 1. a missing token is [`AuthError::Unauthenticated`];
    /// 2. an undecodable or expired token is [`AuthError::InvalidToken`];
    /// 3. a pending password change is [`AuthError::PasswordChangeRequired`]
    ///    unless `allow_password_change_pending` is set; this outranks the
    ///    role check, so a principal mid-reset cannot reach any other
    ///    privileged operation regardless of role;
    /// 4. with `required` present, a role outside the allow-list is
    ///    [`AuthError::AccessDenied`]. The list is exact: no role implies
    ///    another.
    ///
    /// `required = None` skips the role dimension entirely.
    pub fn authorize(
        &self,
        token: Option<&str>,
        required: Option<&[UserRole]>,
        allow_password_change_pending: bool,
    ) -> Result<Principal> {
        let token = token.ok_or(AuthError::Unauthenticated)?;
        let claims = self.codec.verify(token)?;

        if claims.must_change_password && !allow_password_change_pending {
            return Err(AuthError::PasswordChangeRequired);
        }

        if let Some(roles) = required {
            if !roles.contains(&claims.role) {
                return Err(AuthError::AccessDenied(claims.role.to_string()));
            }
        }

        Ok(Principal::from(&claims))
    }

    /// Identify the requester on paths where anonymous access is allowed.
    ///
    /// A missing token yields `Ok(None)`; a present token is fully verified
    /// and an invalid one is still rejected. No role or password-change
    /// gating applies; read visibility is decided downstream.
    pub fn principal_opt(&self, token: Option<&str>) -> Result<Option<Principal>> {
        match token {
            None => Ok(None),
            Some(t) => {
                let claims = self.codec.verify(t)?;
                Ok(Some(Principal::from(&claims)))
            }
        }
    }
}
