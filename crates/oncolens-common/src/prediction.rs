//! Results of a prediction attempt.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::PredictionError;

/// Successful answer from the service.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Prediction {
    /// Class label as returned ("Benign" / "Malignant"); not validated.
    pub label: String,
    /// Everything else in the response body, e.g. probabilities.
    pub extra: Map<String, Value>,
}

impl Prediction {
    /// Read a 200 response body.
    pub fn from_body(body: &str) -> Result<Self, PredictionError> {
        let value: Value = serde_json::from_str(body).map_err(|e| {
            PredictionError::MalformedResponse(format!("response is not JSON: {}", e))
        })?;
        let Value::Object(mut map) = value else {
            return Err(PredictionError::MalformedResponse(
                "response is not a JSON object".to_string(),
            ));
        };
        let label = match map.remove("prediction") {
            Some(Value::String(s)) => s,
            Some(Value::Null) | None => {
                return Err(PredictionError::MalformedResponse(
                    "response has no `prediction` field".to_string(),
                ))
            }
            Some(other) => other.to_string(),
        };
        Ok(Self { label, extra: map })
    }
}

/// Body of a rejected request.
///
/// A JSON body keeps its original text next to the parsed value, so the
/// page shows exactly what the service sent (key order and number
/// formatting included).
#[derive(Debug, Clone, PartialEq)]
pub enum ErrorBody {
    Json { value: Value, raw: String },
    Text(String),
}

impl ErrorBody {
    pub fn parse(body: &str) -> Self {
        match serde_json::from_str::<Value>(body) {
            Ok(value) => ErrorBody::Json { value, raw: body.to_string() },
            Err(_) => ErrorBody::Text(body.to_string()),
        }
    }

    /// Parsed JSON, if the body was JSON.
    pub fn json(&self) -> Option<&Value> {
        match self {
            ErrorBody::Json { value, .. } => Some(value),
            ErrorBody::Text(_) => None,
        }
    }

    /// The body as received.
    pub fn render(&self) -> &str {
        match self {
            ErrorBody::Json { raw, .. } => raw,
            ErrorBody::Text(t) => t,
        }
    }
}

/// Per-session submission state machine.
///
/// `Idle -> Submitting -> Succeeded | Failed`; the next submission
/// replaces whatever result was there.
#[derive(Debug, Default)]
pub enum Submission {
    #[default]
    Idle,
    Submitting,
    Succeeded(Prediction),
    Failed(PredictionError),
}

impl Submission {
    pub fn is_submitting(&self) -> bool {
        matches!(self, Submission::Submitting)
    }

    pub fn finish(&mut self, outcome: Result<Prediction, PredictionError>) {
        *self = match outcome {
            Ok(p) => Submission::Succeeded(p),
            Err(e) => Submission::Failed(e),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_body_extracts_label() {
        let p = Prediction::from_body(r#"{"prediction":"Malignant"}"#).unwrap();
        assert_eq!(p.label, "Malignant");
        assert!(p.extra.is_empty());
    }

    #[test]
    fn test_from_body_tolerates_extra_fields() {
        let p = Prediction::from_body(r#"{"prediction":"Benign","probabilities":{"Benign":0.91,"Malignant":0.09}}"#).unwrap();
        assert_eq!(p.label, "Benign");
        assert_eq!(p.extra["probabilities"]["Benign"], json!(0.91));
    }

    #[test]
    fn test_from_body_rejects_missing_prediction() {
        let err = Prediction::from_body(r#"{"result":"Benign"}"#).unwrap_err();
        assert!(matches!(err, PredictionError::MalformedResponse(_)));
        let err = Prediction::from_body("<html>oops</html>").unwrap_err();
        assert!(err.to_string().starts_with("Request failed:"));
    }

    #[test]
    fn test_non_string_prediction_is_rendered_as_json() {
        let p = Prediction::from_body(r#"{"prediction":1}"#).unwrap();
        assert_eq!(p.label, "1");
    }

    #[test]
    fn test_error_body_falls_back_to_text() {
        assert_eq!(ErrorBody::parse(r#"{"error":"bad"}"#).json(), Some(&json!({"error":"bad"})));
        assert_eq!(ErrorBody::parse("Service Unavailable"), ErrorBody::Text("Service Unavailable".into()));
        assert_eq!(ErrorBody::parse("Service Unavailable").json(), None);
    }

    #[test]
    fn test_json_error_body_renders_as_received() {
        let raw = r#"{"status":"error","detail":"model not loaded","code":500.0}"#;
        let body = ErrorBody::parse(raw);
        assert_eq!(body.json().map(|v| v["code"].clone()), Some(json!(500.0)));
        assert_eq!(body.render(), raw);
    }

    #[test]
    fn test_submission_finish_overwrites() {
        let mut s = Submission::Submitting;
        assert!(s.is_submitting());
        s.finish(Err(PredictionError::MissingFeatures));
        assert!(matches!(s, Submission::Failed(PredictionError::MissingFeatures)));
        s.finish(Ok(Prediction { label: "Benign".into(), extra: Map::new() }));
        assert!(matches!(s, Submission::Succeeded(ref p) if p.label == "Benign"));
    }
}
