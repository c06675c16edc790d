//! JWT authentication and role checks.
//!
//! Tokens are issued by the external identity service; this layer only
//! verifies them and hands the resulting actor identity to the handlers.
//! Role membership gates each route (`SHOP_OWNER` for writes, any
//! authenticated role for reads), while ownership of individual products is
//! checked by the orchestrator against the stored seller id.

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    middleware::Next,
    response::Response,
};
use jsonwebtoken::{DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::api::error::json_error;
use crate::api::AppState;

/// Roles the identity service can grant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "USER")]
    User,
    #[serde(rename = "SHOP_OWNER")]
    ShopOwner,
}

/// Claims carried by a bearer token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// The authenticated user's identity.
    pub user_id: Uuid,
    pub role: Role,
    /// Expiry as a unix timestamp.
    pub exp: usize,
}

/// Verifies bearer tokens with the deployment's HS256 secret.
pub struct JwtDecoder {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtDecoder {
    pub fn new(secret: &str) -> Self {
        Self {
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation: Validation::default(),
        }
    }

    /// Decode and verify a token, returning its claims.
    pub fn decode(&self, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        jsonwebtoken::decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
    }
}

/// The verified actor attached to each request.
#[derive(Debug, Clone)]
pub struct AuthenticatedActor {
    pub user_id: Uuid,
    pub role: Role,
}

impl AuthenticatedActor {
    /// Reject the request unless the actor holds one of the allowed roles.
    pub fn require_role(&self, allowed: &[Role]) -> Result<(), Response> {
        if allowed.contains(&self.role) {
            Ok(())
        } else {
            Err(json_error(StatusCode::FORBIDDEN, "Access denied"))
        }
    }
}

pub async fn auth_middleware(
    State(state): State<AppState>,
    mut req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Result<Response, StatusCode> {
    let token = extract_bearer(req.headers())?;

    let claims = state
        .jwt
        .decode(token)
        .map_err(|_e| StatusCode::UNAUTHORIZED)?;

    req.extensions_mut().insert(AuthenticatedActor {
        user_id: claims.user_id,
        role: claims.role,
    });

    Ok(next.run(req).await)
}

fn extract_bearer(headers: &HeaderMap) -> Result<&str, StatusCode> {
    let header = headers
        .get(axum::http::header::AUTHORIZATION)
        .ok_or(StatusCode::UNAUTHORIZED)?;

    let header = header.to_str().map_err(|_| StatusCode::UNAUTHORIZED)?;

    let header = header
        .strip_prefix("Bearer ")
        .ok_or(StatusCode::UNAUTHORIZED)?;

    let token = header.trim();
    if token.is_empty() {
        return Err(StatusCode::UNAUTHORIZED);
    }

    Ok(token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};

    fn mint(secret: &str, role: Role, exp_offset_secs: i64) -> String {
        let claims = Claims {
            user_id: Uuid::new_v4(),
            role,
            exp: (chrono::Utc::now().timestamp() + exp_offset_secs) as usize,
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    #[test]
    fn decode_round_trips_valid_tokens() {
        let decoder = JwtDecoder::new("secret");
        let token = mint("secret", Role::ShopOwner, 3600);

        let claims = decoder.decode(&token).unwrap();
        assert_eq!(claims.role, Role::ShopOwner);
    }

    #[test]
    fn decode_rejects_wrong_secret() {
        let decoder = JwtDecoder::new("secret");
        let token = mint("other-secret", Role::User, 3600);
        assert!(decoder.decode(&token).is_err());
    }

    #[test]
    fn decode_rejects_expired_tokens() {
        let decoder = JwtDecoder::new("secret");
        let token = mint("secret", Role::User, -3600);
        assert!(decoder.decode(&token).is_err());
    }

    #[test]
    fn role_wire_names_match_the_identity_service() {
        assert_eq!(serde_json::to_string(&Role::User).unwrap(), "\"USER\"");
        assert_eq!(
            serde_json::to_string(&Role::ShopOwner).unwrap(),
            "\"SHOP_OWNER\""
        );
    }

    #[test]
    fn require_role_is_membership_not_hierarchy() {
        let actor = AuthenticatedActor {
            user_id: Uuid::new_v4(),
            role: Role::User,
        };
        assert!(actor.require_role(&[Role::User, Role::ShopOwner]).is_ok());
        assert!(actor.require_role(&[Role::ShopOwner]).is_err());
    }
}
