//! Validated JSON extractor - Combines deserialization with validation.

use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::errors::AppError;

/// JSON body extractor that runs `validator` rules before the handler sees it.
///
/// Both a body that fails to deserialize and one that breaks a rule are
/// rejected with [`AppError::Validation`], so clients always get the
/// standard error body.
///
/// # Example
///
/// ```rust,ignore
/// use serde::Deserialize;
/// use validator::Validate;
/// use lifeguard::api::extractors::ValidatedJson;
///
/// #[derive(Deserialize, Validate)]
/// struct NeighborRequest {
///     #[validate(length(min = 1, max = 64))]
///     username: String,
///     #[serde(rename = "neighborOf")]
///     #[validate(length(min = 1, max = 64))]
///     neighbor_of: String,
/// }
///
/// async fn add_neighbor(ValidatedJson(payload): ValidatedJson<NeighborRequest>) {
///     // payload is already validated
/// }
/// ```
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| AppError::validation(e.body_text()))?;

        value
            .validate()
            .map_err(|e| AppError::validation(format_validation_errors(&e)))?;

        Ok(ValidatedJson(value))
    }
}

/// Flatten validation errors into `field: message` pairs, ordered by field.
fn format_validation_errors(errors: &validator::ValidationErrors) -> String {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    fields
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| match &e.message {
                Some(message) => format!("{}: {}", field, message),
                None => format!("{} is invalid", field),
            })
        })
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, Validate)]
    struct Probe {
        #[validate(length(min = 1, max = 64, message = "must be 1 to 64 characters"))]
        username: String,
    }

    fn json_request(body: &'static str) -> Request {
        Request::builder()
            .method("POST")
            .header("content-type", "application/json")
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn accepts_valid_body() {
        let ValidatedJson(probe) = ValidatedJson::<Probe>::from_request(
            json_request(r#"{"username":"alice"}"#),
            &(),
        )
        .await
        .unwrap();
        assert_eq!(probe.username, "alice");
    }

    #[tokio::test]
    async fn rule_violation_names_the_field() {
        let err = ValidatedJson::<Probe>::from_request(json_request(r#"{"username":""}"#), &())
            .await
            .err()
            .unwrap();
        match err {
            AppError::Validation(msg) => assert_eq!(msg, "username: must be 1 to 64 characters"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn undecodable_body_is_a_validation_error() {
        let err = ValidatedJson::<Probe>::from_request(json_request("{"), &())
            .await
            .err()
            .unwrap();
        assert!(matches!(err, AppError::Validation(_)));
    }
}
