/**
 * Request Identity
 *
 * Clients name themselves in a `User` header on every call that acts on
 * behalf of a participant. There is no authentication: the header is taken
 * at face value.
 */

use axum::http::request::Parts;

use crate::backend::error::BackendError;

/// Header carrying the caller's participant name
pub const USER_HEADER: &str = "user";

/// Axum extractor for the `User` header
///
/// Rejects with a validation error (422) when the header is missing, empty,
/// or not valid UTF-8.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RequestUser(pub String);

impl<S> axum::extract::FromRequestParts<S> for RequestUser
where
    S: Send + Sync,
{
    type Rejection = BackendError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let value = parts.headers.get(USER_HEADER).ok_or_else(|| {
            tracing::debug!("Missing User header");
            BackendError::validation("User", "header is required")
        })?;

        let name = std::str::from_utf8(value.as_bytes())
            .map_err(|_| BackendError::validation("User", "header must be valid UTF-8"))?
            .trim();

        if name.is_empty() {
            return Err(BackendError::validation("User", "header must not be empty"));
        }

        Ok(RequestUser(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use axum::extract::FromRequestParts;
    use axum::http::{HeaderValue, Request};

    async fn extract(header: Option<HeaderValue>) -> Result<RequestUser, BackendError> {
        let mut builder = Request::builder().uri("http://example.com/messages");
        if let Some(value) = header {
            builder = builder.header(USER_HEADER, value);
        }
        let (mut parts, _) = builder.body(()).unwrap().into_parts();
        RequestUser::from_request_parts(&mut parts, &()).await
    }

    #[tokio::test]
    async fn test_extracts_trimmed_name() {
        let user = extract(Some(HeaderValue::from_static(" Ana "))).await.unwrap();
        assert_eq!(user, RequestUser("Ana".to_string()));
    }

    #[tokio::test]
    async fn test_accepts_utf8_names() {
        let value = HeaderValue::from_bytes("João".as_bytes()).unwrap();
        assert_eq!(extract(Some(value)).await.unwrap().0, "João");
    }

    #[tokio::test]
    async fn test_missing_or_blank_header() {
        assert_matches!(extract(None).await, Err(BackendError::SharedError(_)));
        assert_matches!(
            extract(Some(HeaderValue::from_static("   "))).await,
            Err(BackendError::SharedError(_))
        );
    }
}
