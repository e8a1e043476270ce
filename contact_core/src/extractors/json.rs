//! JSON extractor that runs field validation before the handler sees the payload

use crate::{
    error::AppError,
    validation::{Validatable, ValidationResult},
};
use axum::{
    async_trait,
    body::Body,
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;
use tracing::debug;

/// Deserializes a JSON body and rejects it with a field-level 422 when any
/// `validator` rule fails.
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validatable,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request<Body>, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(rejection_to_error)?;

        let result = value.validate_comprehensive();
        if !result.is_valid {
            debug!("Rejected request body: {:?}", result.errors);
            return Err(AppError::Validation(result));
        }

        Ok(ValidatedJson(value))
    }
}

fn rejection_to_error(rejection: JsonRejection) -> AppError {
    match rejection {
        JsonRejection::MissingJsonContentType(err) => {
            AppError::UnsupportedMediaType(err.body_text())
        }
        JsonRejection::JsonDataError(err) => {
            let mut result = ValidationResult::success();
            result.add_error("body", &err.body_text());
            AppError::Validation(result)
        }
        JsonRejection::JsonSyntaxError(err) => AppError::UnprocessableEntity(err.body_text()),
        other => AppError::BadRequest(other.body_text()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ContactForm;
    use axum::http::{header, StatusCode};
    use axum::response::IntoResponse;

    fn json_request(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_accepts_valid_payload() {
        let req = json_request(
            r#"{"name":"Jane","email":"jane@example.com","phone":"555-567-8901"}"#,
        );
        let ValidatedJson(form) = ValidatedJson::<ContactForm>::from_request(req, &())
            .await
            .unwrap();
        assert_eq!(form.name, "Jane");
    }

    #[tokio::test]
    async fn test_missing_fields_are_reported_per_field() {
        let req = json_request(r#"{"name":"John Doe"}"#);
        let err = ValidatedJson::<ContactForm>::from_request(req, &())
            .await
            .err()
            .unwrap();

        match &err {
            AppError::Validation(result) => {
                assert!(result.has_error("email"));
                assert!(result.has_error("phone"));
                assert!(!result.has_error("body"));
            }
            other => panic!("expected a validation error, got {:?}", other),
        }
        assert_eq!(err.into_response().status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_wrong_field_type_is_unprocessable() {
        let req = json_request(
            r#"{"name":5,"email":"jane@example.com","phone":"555-567-8901"}"#,
        );
        let err = ValidatedJson::<ContactForm>::from_request(req, &())
            .await
            .err()
            .unwrap();
        assert_eq!(err.into_response().status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_malformed_json_is_unprocessable() {
        let req = json_request(r#"{"name":"#);
        let err = ValidatedJson::<ContactForm>::from_request(req, &())
            .await
            .err()
            .unwrap();
        assert_eq!(err.into_response().status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_missing_content_type() {
        let req = Request::builder()
            .method("POST")
            .uri("/")
            .body(Body::from("{}"))
            .unwrap();
        let err = ValidatedJson::<ContactForm>::from_request(req, &())
            .await
            .err()
            .unwrap();
        assert_eq!(err.into_response().status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
    }
}
