use crate::types::{FieldValue, PredictionRequest};
use once_cell::sync::Lazy;
use regex::Regex;

/// Fields sent as integers
pub const INTEGER_FIELDS: [&str; 4] = ["age", "pulse_rate", "systolic_bp", "diastolic_bp"];

/// Fields sent as floating-point numbers
pub const FLOAT_FIELDS: [&str; 4] = ["glucose", "height", "weight", "bmi"];

static LEADING_INT_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*([+-]?\d+)").expect("Failed to compile integer prefix regex"));

static LEADING_FLOAT_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*([+-]?(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?)")
        .expect("Failed to compile float prefix regex")
});

/// Parse the leading integer of a string (`"42abc"` is 42, `"3.9"` is 3)
pub fn parse_leading_int(raw: &str) -> Option<i64> {
    LEADING_INT_PATTERN
        .captures(raw)
        .and_then(|captures| captures[1].parse().ok())
}

/// Parse the longest leading decimal number of a string (`"5.5 mmol"` is 5.5)
pub fn parse_leading_float(raw: &str) -> Option<f64> {
    LEADING_FLOAT_PATTERN
        .captures(raw)
        .and_then(|captures| captures[1].parse::<f64>().ok())
        .filter(|value| value.is_finite())
}

/// How a form field is coerced before transmission
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Integer,
    Float,
    Text,
}

/// Converts string-typed form entries into a [`PredictionRequest`].
///
/// Unparsable numeric input becomes `0` rather than an error; the service
/// applies its own validation.
#[derive(Debug, Clone, Default)]
pub struct FieldNormalizer;

impl FieldNormalizer {
    pub fn new() -> Self {
        Self
    }

    pub fn kind_of(&self, field: &str) -> FieldKind {
        if INTEGER_FIELDS.contains(&field) {
            FieldKind::Integer
        } else if FLOAT_FIELDS.contains(&field) {
            FieldKind::Float
        } else {
            FieldKind::Text
        }
    }

    pub fn coerce(&self, field: &str, raw: &str) -> FieldValue {
        match self.kind_of(field) {
            FieldKind::Integer => FieldValue::Integer(parse_leading_int(raw).unwrap_or(0)),
            FieldKind::Float => FieldValue::Float(parse_leading_float(raw).unwrap_or(0.0)),
            FieldKind::Text => FieldValue::Text(raw.to_string()),
        }
    }

    pub fn normalize<'a, I>(&self, entries: I) -> PredictionRequest
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut request = PredictionRequest::new();
        for (field, raw) in entries {
            request.insert(field, self.coerce(field, raw));
        }
        request
    }
}
