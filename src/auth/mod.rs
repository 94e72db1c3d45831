use axum::http::{header, HeaderMap};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::SecurityConfig;

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub exp: i64,
    pub iat: i64,
}

impl Claims {
    pub fn new(user_id: Uuid, email: Option<String>, expiry_hours: u64) -> Self {
        let now = Utc::now();
        let exp = (now + Duration::hours(expiry_hours as i64)).timestamp();

        Self {
            sub: user_id,
            email,
            exp,
            iat: now.timestamp(),
        }
    }
}

/// Caller identity resolved from the session
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthUser {
    pub user_id: Uuid,
    pub email: Option<String>,
}

impl From<Claims> for AuthUser {
    fn from(claims: Claims) -> Self {
        Self {
            user_id: claims.sub,
            email: claims.email,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum JwtError {
    #[error("JWT generation error: {0}")]
    TokenGeneration(String),
    #[error("Invalid JWT secret")]
    InvalidSecret,
}

/// Resolves the current caller from request headers
pub trait SessionAuthenticator: Send + Sync {
    /// `None` means the request carries no usable session
    fn resolve_current_user(&self, headers: &HeaderMap) -> Option<AuthUser>;
}

/// Session tokens are HS256 JWTs, sent as a Bearer token or in a session cookie
#[derive(Clone)]
pub struct JwtSessionAuthenticator {
    secret: String,
    expiry_hours: u64,
    cookie_name: String,
}

impl JwtSessionAuthenticator {
    pub fn new(secret: impl Into<String>, expiry_hours: u64, cookie_name: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            expiry_hours,
            cookie_name: cookie_name.into(),
        }
    }

    pub fn from_config(security: &SecurityConfig) -> Self {
        Self::new(
            security.jwt_secret.clone(),
            security.jwt_expiry_hours,
            security.session_cookie_name.clone(),
        )
    }

    pub fn cookie_name(&self) -> &str {
        &self.cookie_name
    }

    /// Mint a session token for a user
    pub fn issue_token(&self, user_id: Uuid, email: Option<String>) -> Result<String, JwtError> {
        if self.secret.is_empty() {
            return Err(JwtError::InvalidSecret);
        }

        let claims = Claims::new(user_id, email, self.expiry_hours);
        let encoding_key = EncodingKey::from_secret(self.secret.as_bytes());

        encode(&Header::default(), &claims, &encoding_key)
            .map_err(|e| JwtError::TokenGeneration(e.to_string()))
    }

    /// Validate a token and extract its claims
    fn validate(&self, token: &str) -> Result<Claims, String> {
        if self.secret.is_empty() {
            return Err("JWT secret not configured".to_string());
        }

        let decoding_key = DecodingKey::from_secret(self.secret.as_bytes());
        let validation = Validation::default();

        let token_data = decode::<Claims>(token, &decoding_key, &validation)
            .map_err(|e| format!("Invalid JWT token: {}", e))?;

        Ok(token_data.claims)
    }

    /// Token from `Authorization: Bearer`, falling back to the session cookie
    fn extract_token(&self, headers: &HeaderMap) -> Result<String, String> {
        if let Some(auth_header) = headers.get(header::AUTHORIZATION) {
            let auth_str = auth_header
                .to_str()
                .map_err(|_| "Invalid Authorization header format".to_string())?;

            return match auth_str.strip_prefix("Bearer ") {
                Some(token) if !token.trim().is_empty() => Ok(token.trim().to_string()),
                Some(_) => Err("Empty JWT token".to_string()),
                None => Err("Authorization header must use Bearer token format".to_string()),
            };
        }

        self.extract_cookie(headers)
            .ok_or_else(|| "Missing session token".to_string())
    }

    fn extract_cookie(&self, headers: &HeaderMap) -> Option<String> {
        headers
            .get_all(header::COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .flat_map(|value| value.split(';'))
            .filter_map(|pair| pair.trim().split_once('='))
            .find(|(name, _)| *name == self.cookie_name)
            .map(|(_, value)| value.trim_matches('"').to_string())
            .filter(|value| !value.is_empty())
    }
}

impl SessionAuthenticator for JwtSessionAuthenticator {
    fn resolve_current_user(&self, headers: &HeaderMap) -> Option<AuthUser> {
        let resolved = self
            .extract_token(headers)
            .and_then(|token| self.validate(&token));

        match resolved {
            Ok(claims) => Some(AuthUser::from(claims)),
            Err(reason) => {
                tracing::debug!("No session resolved: {}", reason);
                None
            }
        }
    }
}
