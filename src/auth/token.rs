//! Session token issuing and verification.
//!
//! Tokens are HS256 JWTs carrying the principal's identity and role plus
//! role-specific extras (phone; for businesses also description and
//! rating). Lifetime is 24 hours; a token may be refreshed for up to
//! 7 days counted from its original issue (`orig_iat`), after which the
//! principal must log in again.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::domain::EntityId;
use crate::error::ApiError;

pub const TOKEN_TTL_HOURS: i64 = 24;
pub const REFRESH_WINDOW_DAYS: i64 = 7;

/// Principal kind carried in the `tipo` claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
pub enum Role {
    #[serde(rename = "dono")]
    #[strum(serialize = "dono")]
    Owner,
    #[serde(rename = "petshop")]
    #[strum(serialize = "petshop")]
    Business,
}

/// Identity of an authenticated principal, as produced by a successful
/// login and embedded into issued tokens.
#[derive(Debug, Clone, PartialEq)]
pub struct Principal {
    pub id: EntityId,
    pub email: String,
    pub name: String,
    pub role: Role,
    pub phone: String,
    pub description: Option<String>,
    pub rating: Option<f32>,
}

impl Principal {
    pub fn from_owner(owner: &crate::domain::Owner) -> Self {
        Principal {
            id: owner.id,
            email: owner.email.clone(),
            name: owner.name.clone(),
            role: Role::Owner,
            phone: owner.phone.clone(),
            description: None,
            rating: None,
        }
    }

    pub fn from_business(business: &crate::domain::Business) -> Self {
        Principal {
            id: business.id,
            email: business.email.clone(),
            name: business.name.clone(),
            role: Role::Business,
            phone: business.phone.clone(),
            description: Some(business.description.clone()),
            rating: Some(business.rating),
        }
    }
}

/// Claims carried by a verified token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub email: String,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "tipo")]
    pub role: Role,
    #[serde(rename = "telefone")]
    pub phone: String,
    #[serde(rename = "descricao", default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "nota", default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f32>,
    /// Recognized by the self-ownership checks but never set by any
    /// issuing path in this service.
    #[serde(default)]
    pub is_admin: bool,
    pub iat: i64,
    pub exp: i64,
    pub orig_iat: i64,
}

impl Claims {
    /// Parses the subject claim back into an entity id.
    pub fn principal_id(&self) -> Result<EntityId, ApiError> {
        self.sub
            .parse()
            .map_err(|_| ApiError::Unauthorized("token carries a malformed principal id".into()))
    }
}

/// A freshly signed token and its expiry instant.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// Signs and verifies session tokens.
pub struct TokenIssuer {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
    refresh_window: Duration,
}

impl TokenIssuer {
    pub fn new(secret: &[u8]) -> Self {
        TokenIssuer {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            ttl: Duration::hours(TOKEN_TTL_HOURS),
            refresh_window: Duration::days(REFRESH_WINDOW_DAYS),
        }
    }

    /// Issues a fresh token for an authenticated principal.
    pub fn issue(&self, principal: &Principal) -> Result<IssuedToken, ApiError> {
        let now = Utc::now();
        let claims = Claims {
            sub: principal.id.to_string(),
            email: principal.email.clone(),
            name: principal.name.clone(),
            role: principal.role,
            phone: principal.phone.clone(),
            description: principal.description.clone(),
            rating: principal.rating,
            is_admin: false,
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
            orig_iat: now.timestamp(),
        };
        self.sign(&claims, now)
    }

    /// Verifies a token's signature and expiry and returns its claims.
    pub fn verify(&self, token: &str) -> Result<Claims, ApiError> {
        let validation = Validation::new(Algorithm::HS256);
        jsonwebtoken::decode::<Claims>(token, &self.decoding, &validation)
            .map(|data| data.claims)
            .map_err(|_| ApiError::Unauthorized("invalid or expired token".into()))
    }

    /// Re-issues a token whose refresh window is still open.
    ///
    /// The signature must verify, but the token itself may already be
    /// expired; only `orig_iat` bounds how long refreshing stays
    /// possible. The new token keeps the original issue instant.
    pub fn refresh(&self, token: &str) -> Result<IssuedToken, ApiError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.set_required_spec_claims::<&str>(&[]);
        let mut claims = jsonwebtoken::decode::<Claims>(token, &self.decoding, &validation)
            .map(|data| data.claims)
            .map_err(|_| ApiError::Unauthorized("invalid token".into()))?;

        let now = Utc::now();
        let origin = DateTime::from_timestamp(claims.orig_iat, 0)
            .ok_or_else(|| ApiError::Unauthorized("invalid token".into()))?;
        if now > origin + self.refresh_window {
            return Err(ApiError::Unauthorized("refresh window expired".into()));
        }

        claims.iat = now.timestamp();
        claims.exp = (now + self.ttl).timestamp();
        self.sign(&claims, now)
    }

    fn sign(&self, claims: &Claims, now: DateTime<Utc>) -> Result<IssuedToken, ApiError> {
        let token = jsonwebtoken::encode(&Header::default(), claims, &self.encoding)
            .map_err(|err| ApiError::Storage(crate::store::StoreError::Backend(err.to_string())))?;
        Ok(IssuedToken {
            token,
            expires_at: now + self.ttl,
        })
    }
}
