//! Score extraction from free-form model output.
//!
//! Backends are instructed to answer with strict JSON, but models wrap the
//! object in prose often enough that the parser works on the first
//! brace-delimited span instead of the whole text. The match is
//! single-object and non-nested (an object containing `{` before its first
//! `}` will not parse) — kept for compatibility with the documented
//! behavior. Swapping in a provider's structured-output mode only requires
//! replacing [`score_from_text`]; the adapter contract is unchanged.

use crate::provider::{ProviderError, ProviderResult};
use serde_json::Value;

/// The first `{...}` span of `text`, ending at the first `}` after the
/// first `{`.
pub fn first_json_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let span = &text[start..];
    let end = span.find('}')?;
    Some(&span[..=end])
}

/// Extract the numeric `score` field from model output text, rounded and
/// clamped to [0,100]. Out-of-range values are clamped, not rejected; a
/// missing object, unparseable object, or non-numeric score is an error.
pub fn score_from_text(text: &str) -> ProviderResult<u8> {
    let object = first_json_object(text).ok_or_else(|| {
        ProviderError::MalformedResponse("no JSON object in response text".into())
    })?;

    let value: Value = serde_json::from_str(object)
        .map_err(|e| ProviderError::MalformedResponse(format!("unparseable score object: {e}")))?;

    let score = value
        .get("score")
        .and_then(coerce_number)
        .ok_or_else(|| ProviderError::MalformedResponse("score field is not a number".into()))?;

    Ok(score.round().clamp(0.0, 100.0) as u8)
}

/// Numeric coercion: JSON numbers and numeric strings both count.
fn coerce_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok().filter(|f: &f64| !f.is_nan()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn object_embedded_in_prose() {
        assert_eq!(
            score_from_text("Here is my assessment: {\"score\": 73} as requested.").unwrap(),
            73
        );
    }

    #[test]
    fn bare_object() {
        assert_eq!(score_from_text("{\"score\": 42}").unwrap(), 42);
    }

    #[test]
    fn out_of_range_is_clamped() {
        assert_eq!(score_from_text("{\"score\": 140}").unwrap(), 100);
        assert_eq!(score_from_text("{\"score\": -5}").unwrap(), 0);
    }

    #[test]
    fn fractional_score_is_rounded() {
        assert_eq!(score_from_text("{\"score\": 66.6}").unwrap(), 67);
    }

    #[test]
    fn numeric_string_is_coerced() {
        assert_eq!(score_from_text("{\"score\": \"61\"}").unwrap(), 61);
    }

    #[test]
    fn no_object_is_an_error() {
        assert!(score_from_text("I would rate this around 70 out of 100.").is_err());
        assert!(score_from_text("").is_err());
    }

    #[test]
    fn non_numeric_score_is_an_error() {
        assert!(score_from_text("{\"score\": \"high\"}").is_err());
        assert!(score_from_text("{\"score\": true}").is_err());
        assert!(score_from_text("{\"rating\": 70}").is_err());
    }

    #[test]
    fn nested_object_does_not_parse() {
        // The non-nested match stops at the first `}`, leaving an invalid
        // span for an outer object.
        assert!(score_from_text("{\"inner\": {\"score\": 70}}").is_err());
    }

    #[test]
    fn first_object_wins() {
        assert_eq!(
            score_from_text("{\"score\": 10} {\"score\": 90}").unwrap(),
            10
        );
    }
}
