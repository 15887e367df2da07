use std::future::{ready, Ready};

use actix_web::dev::{Payload, ServiceRequest};
use actix_web::{web, Error, FromRequest, HttpMessage, HttpRequest};
use actix_web_httpauth::extractors::bearer::BearerAuth;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::config::AppConfig;
use crate::errors::AppError;
use crate::models::user::User;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User id, as a string per RFC 7519.
    pub sub: String,
    pub username: String,
    pub exp: usize,
}

/// Issues a signed token for `user` that expires after `ttl_hours`.
pub fn generate_token(user: &User, secret: &str, ttl_hours: i64) -> Result<String, AppError> {
    let expiration = Utc::now()
        .checked_add_signed(Duration::hours(ttl_hours))
        .ok_or_else(|| AppError::InternalServerError("Invalid token expiry".to_string()))?
        .timestamp() as usize;

    let claims = Claims {
        sub: user.id.to_string(),
        username: user.username.clone(),
        exp: expiration,
    };

    encode(&Header::default(), &claims, &EncodingKey::from_secret(secret.as_bytes()))
        .map_err(|e| AppError::InternalServerError(format!("Token generation failed: {}", e)))
}

/// Validates a token and returns the claims if the signature and expiry check out.
pub fn validate_token(token: &str, secret: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::new(Algorithm::HS256),
    )
    .map(|data| data.claims)
}

/// Validator function for the `HttpAuthentication::with_fn` middleware.
/// Valid claims are stashed in the request extensions for [`AuthenticatedUser`].
/// The extractor is optional so a missing header still gets the JSON error body.
pub async fn validator(
    req: ServiceRequest,
    credentials: Option<BearerAuth>,
) -> Result<ServiceRequest, (Error, ServiceRequest)> {
    let Some(credentials) = credentials else {
        return Err((AppError::Unauthorized("Missing token".to_string()).into(), req));
    };

    let secret = match req.app_data::<web::Data<AppConfig>>() {
        Some(config) => config.jwt_secret.clone(),
        None => {
            log::error!("AppConfig missing from app data");
            return Err((
                AppError::InternalServerError("Missing configuration".to_string()).into(),
                req,
            ));
        }
    };

    match validate_token(credentials.token(), &secret) {
        Ok(claims) => {
            req.extensions_mut().insert(claims);
            Ok(req)
        }
        Err(e) => {
            log::debug!("Rejected bearer token: {}", e);
            Err((AppError::Unauthorized("Invalid token".to_string()).into(), req))
        }
    }
}

/// The caller's identity, taken from the claims the bearer middleware validated.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: i64,
    pub username: String,
}

impl FromRequest for AuthenticatedUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let result = match req.extensions().get::<Claims>() {
            Some(claims) => claims
                .sub
                .parse::<i64>()
                .map(|user_id| AuthenticatedUser {
                    user_id,
                    username: claims.username.clone(),
                })
                .map_err(|_| AppError::Unauthorized("Invalid token".to_string())),
            None => Err(AppError::Unauthorized("Missing token".to_string())),
        };
        ready(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> User {
        User {
            id: 42,
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            password_hash: "unused".to_string(),
        }
    }

    #[test]
    fn issued_token_validates() {
        let token = generate_token(&user(), "secret", 1).unwrap();
        let claims = validate_token(&token, "secret").unwrap();
        assert_eq!(claims.sub, "42");
        assert_eq!(claims.username, "alice");
    }

    #[test]
    fn rejects_token_signed_with_other_secret() {
        let token = generate_token(&user(), "secret", 1).unwrap();
        assert!(validate_token(&token, "another-secret").is_err());
    }

    #[test]
    fn rejects_expired_token() {
        let claims = Claims {
            sub: "42".to_string(),
            username: "alice".to_string(),
            exp: (Utc::now() - Duration::hours(2)).timestamp() as usize,
        };
        let token = encode(&Header::default(), &claims, &EncodingKey::from_secret(b"secret")).unwrap();
        assert!(validate_token(&token, "secret").is_err());
    }
}
