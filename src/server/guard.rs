use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::Response,
};

use crate::auth::{Identity, TokenIssuer};

use super::error::AppError;

/// Rejects requests without a valid bearer token and hands the caller's [`Identity`] to
/// downstream handlers through request extensions.
pub async fn require_auth(
    State(tokens): State<TokenIssuer>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = bearer_token(request.headers()).ok_or(AppError::Unauthorized("No token"))?;
    let claims = tokens.verify(token).map_err(|e| {
        tracing::debug!(error = %e, "Rejected token");
        AppError::Unauthorized("Invalid token")
    })?;
    request.extensions_mut().insert(Identity::from(claims));
    Ok(next.run(request).await)
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let token = value.strip_prefix("Bearer ").unwrap_or(value).trim();
    (!token.is_empty()).then_some(token)
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;

    use super::*;

    fn headers(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn extracts_bearer_token() {
        assert_eq!(bearer_token(&headers("Bearer abc.def")), Some("abc.def"));
        assert_eq!(bearer_token(&headers("abc.def")), Some("abc.def"));
    }

    #[test]
    fn missing_or_empty_token_is_none() {
        assert_eq!(bearer_token(&HeaderMap::new()), None);
        assert_eq!(bearer_token(&headers("Bearer ")), None);
        assert_eq!(bearer_token(&headers("")), None);
    }
}
