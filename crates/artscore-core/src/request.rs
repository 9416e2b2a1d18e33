//! Scoring request model and body validation.
//!
//! The inbound body is untrusted JSON. Validation is field-by-field so a
//! wrong-typed field fails with a message naming it; absent fields default
//! to empty strings. The image reference is deliberately *not* checked for
//! well-formedness here — a malformed reference degrades to "no image"
//! during resolution instead of rejecting the whole request.

use serde_json::{Map, Value};
use thiserror::Error;

/// A validated scoring request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScoreRequest {
    pub title: String,
    pub description: String,
    /// Raw image reference: empty, a remote URL, or an embedded data
    /// reference. Classified later by [`crate::image::classify`].
    pub image_ref: String,
}

/// Validation failure for the inbound body.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RequestError {
    #[error("request body must be a JSON object")]
    NotAnObject,

    #[error("field '{0}' must be a string")]
    NotAString(&'static str),
}

impl ScoreRequest {
    /// Validate a raw JSON body into a `ScoreRequest`.
    ///
    /// An empty `imageUrl` is treated the same as an absent one: the request
    /// is valid and scores without an image.
    pub fn from_value(value: &Value) -> Result<Self, RequestError> {
        let body = value.as_object().ok_or(RequestError::NotAnObject)?;

        Ok(Self {
            title: string_field(body, "title")?,
            description: string_field(body, "description")?,
            image_ref: string_field(body, "imageUrl")?,
        })
    }
}

fn string_field(body: &Map<String, Value>, field: &'static str) -> Result<String, RequestError> {
    match body.get(field) {
        None => Ok(String::new()),
        Some(Value::String(s)) => Ok(s.clone()),
        Some(_) => Err(RequestError::NotAString(field)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_object_yields_empty_request() {
        let req = ScoreRequest::from_value(&json!({})).unwrap();
        assert_eq!(req, ScoreRequest::default());
    }

    #[test]
    fn all_fields_accepted() {
        let req = ScoreRequest::from_value(&json!({
            "title": "Sunset",
            "description": "oil on canvas",
            "imageUrl": "https://example.com/a.jpg",
        }))
        .unwrap();
        assert_eq!(req.title, "Sunset");
        assert_eq!(req.description, "oil on canvas");
        assert_eq!(req.image_ref, "https://example.com/a.jpg");
    }

    #[test]
    fn wrong_typed_field_names_the_field() {
        let err = ScoreRequest::from_value(&json!({ "title": 5 })).unwrap_err();
        assert_eq!(err, RequestError::NotAString("title"));
        assert!(err.to_string().contains("title"));

        let err = ScoreRequest::from_value(&json!({ "imageUrl": ["x"] })).unwrap_err();
        assert_eq!(err, RequestError::NotAString("imageUrl"));
    }

    #[test]
    fn null_counts_as_wrong_type() {
        let err = ScoreRequest::from_value(&json!({ "description": null })).unwrap_err();
        assert_eq!(err, RequestError::NotAString("description"));
    }

    #[test]
    fn empty_image_url_is_accepted() {
        let req = ScoreRequest::from_value(&json!({ "imageUrl": "" })).unwrap();
        assert_eq!(req.image_ref, "");
    }

    #[test]
    fn non_object_body_rejected() {
        assert_eq!(
            ScoreRequest::from_value(&json!([1, 2])).unwrap_err(),
            RequestError::NotAnObject
        );
        assert_eq!(
            ScoreRequest::from_value(&json!("text")).unwrap_err(),
            RequestError::NotAnObject
        );
    }
}
