//! Recovery of structured JSON from free-form model output.
//!
//! Models asked for "valid JSON only" still wrap their payload in prose or
//! code fences often enough that strict parsing of the whole reply is
//! useless. The scan here takes the span from the first opening bracket of
//! the required kind to the last closing bracket of the same kind and
//! strict-parses that span. This is a deliberate heuristic, not a
//! JSON-in-text parser: unrelated brackets of the same kind in the
//! surrounding prose widen the span and fail the parse. There is no repair
//! step; anything short of a fully valid value is an error.

use serde_json::Value;

use crate::error::{Result, SolaceError};

/// The JSON shape a task expects back from the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsonShape {
    Object,
    Array,
}

impl JsonShape {
    fn brackets(self) -> (char, char) {
        match self {
            JsonShape::Object => ('{', '}'),
            JsonShape::Array => ('[', ']'),
        }
    }
}

/// Extract a JSON value of the required shape from raw model text.
///
/// Returns `Err` when no candidate span exists, the span is not valid JSON,
/// or the parsed value is not of the required shape. Never returns a
/// partially recovered value.
pub fn extract_json(raw: &str, shape: JsonShape) -> Result<Value> {
    let (open, close) = shape.brackets();

    let start = raw
        .find(open)
        .ok_or_else(|| SolaceError::Extraction(format!("no '{open}' in model output")))?;
    let end = raw
        .rfind(close)
        .filter(|&end| end > start)
        .ok_or_else(|| SolaceError::Extraction(format!("no closing '{close}' in model output")))?;

    let span = &raw[start..=end];

    let value: Value = serde_json::from_str(span)
        .map_err(|error| SolaceError::Extraction(format!("invalid JSON span: {error}")))?;

    match (shape, &value) {
        (JsonShape::Object, Value::Object(_)) | (JsonShape::Array, Value::Array(_)) => Ok(value),
        _ => Err(SolaceError::Extraction(format!(
            "parsed value is not the expected {shape:?}"
        ))),
    }
}
