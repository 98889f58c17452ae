use axum::{extract::Request, http::HeaderMap, middleware::Next, response::Response};

use crate::auth::{self, Claims};
use crate::config;
use crate::error::ApiError;

/// Authenticated user context extracted from JWT
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub user_id: i32,
    pub username: String,
}

impl From<Claims> for AuthUser {
    fn from(claims: Claims) -> Self {
        Self {
            user_id: claims.sub,
            username: claims.username,
        }
    }
}

/// JWT authentication middleware that validates bearer tokens and
/// injects the caller's identity into the request extensions.
/// Any failure is a 401, regardless of the payload.
pub async fn jwt_auth_middleware(
    headers: HeaderMap,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = extract_jwt_from_headers(&headers).map_err(ApiError::unauthorized)?;

    let secret = &config::config().security.jwt_secret;
    let claims = auth::validate_jwt(&token, secret)
        .map_err(|_| ApiError::unauthorized("invalid or expired token"))?;

    request.extensions_mut().insert(AuthUser::from(claims));

    Ok(next.run(request).await)
}

/// Extract the JWT from the Authorization header
fn extract_jwt_from_headers(headers: &HeaderMap) -> Result<String, String> {
    let auth_header = headers
        .get("authorization")
        .or_else(|| headers.get("Authorization"))
        .ok_or_else(|| "Missing Authorization header".to_string())?;

    let auth_str = auth_header
        .to_str()
        .map_err(|_| "Invalid Authorization header format".to_string())?;

    if let Some(token) = auth_str.strip_prefix("Bearer ") {
        if token.trim().is_empty() {
            return Err("Empty JWT token".to_string());
        }
        Ok(token.to_string())
    } else {
        Err("Authorization header must use Bearer token format".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert("authorization", HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn missing_header_rejected() {
        let headers = HeaderMap::new();
        assert!(extract_jwt_from_headers(&headers).is_err());
    }

    #[test]
    fn non_bearer_scheme_rejected() {
        let headers = headers_with("Basic dXNlcjpwdw==");
        assert!(extract_jwt_from_headers(&headers).is_err());
    }

    #[test]
    fn empty_token_rejected() {
        let headers = headers_with("Bearer ");
        assert!(extract_jwt_from_headers(&headers).is_err());
    }

    #[test]
    fn bearer_token_extracted() {
        let headers = headers_with("Bearer abc.def.ghi");
        assert_eq!(extract_jwt_from_headers(&headers).unwrap(), "abc.def.ghi");
    }

    #[test]
    fn claims_become_auth_user() {
        let claims = Claims::new(42, "alice".to_string());
        let auth_user = AuthUser::from(claims);
        assert_eq!(auth_user.user_id, 42);
        assert_eq!(auth_user.username, "alice");
    }
}
