//! This module provides rate limiting functionality using API keys.

use actix_governor::{KeyExtractor, SimpleKeyExtractionError};
use actix_web::{
    dev::ServiceRequest,
    http::{header::ContentType, StatusCode},
};

use crate::constants::API_KEY_HEADER;

/// Rate limits are tracked per API key, so one integrator exhausting its
/// budget cannot starve the others.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct ApiKeyRateLimit;

impl KeyExtractor for ApiKeyRateLimit {
    type Key = String;
    type KeyExtractionError = SimpleKeyExtractionError<&'static str>;

    fn extract(&self, req: &ServiceRequest) -> Result<Self::Key, Self::KeyExtractionError> {
        req.headers()
            .get(API_KEY_HEADER)
            .and_then(|token| token.to_str().ok())
            .map(|token| token.trim().to_owned())
            .ok_or_else(|| {
                Self::KeyExtractionError::new(
                    r#"{"success": false, "data": null, "error": "Unauthorized"}"#,
                )
                .set_content_type(ContentType::json())
                .set_status_code(StatusCode::UNAUTHORIZED)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[test]
    fn test_extracts_api_key() {
        let req = TestRequest::default()
            .insert_header((API_KEY_HEADER, "my-key "))
            .to_srv_request();
        let key = ApiKeyRateLimit.extract(&req).unwrap();
        assert_eq!(key, "my-key");
    }

    #[test]
    fn test_missing_key_is_unauthorized() {
        let req = TestRequest::default().to_srv_request();
        let result = ApiKeyRateLimit.extract(&req);
        assert!(result.is_err());
    }
}
