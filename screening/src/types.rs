//! Typed request and response schemas exchanged with the prediction service.

use crate::error::{Result, TransportError};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

/// A single normalized form value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Integer(i64),
    Float(f64),
    Text(String),
}

impl FieldValue {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Integer(value) => Some(*value as f64),
            Self::Float(value) => Some(*value),
            Self::Text(_) => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(value) => Some(value),
            _ => None,
        }
    }
}

/// Payload of `POST /api/predict`: field name to normalized value, in form order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PredictionRequest {
    fields: Vec<(String, FieldValue)>,
}

impl PredictionRequest {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field, replacing any previous value under the same name
    pub fn insert<S: Into<String>>(&mut self, name: S, value: FieldValue) {
        let name = name.into();
        match self.fields.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, slot)) => *slot = value,
            None => self.fields.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, value)| value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Serialize for PredictionRequest {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, value) in &self.fields {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// Model metadata echoed back with every prediction
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelInfo {
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub accuracy: String,
}

/// Contribution of one input variable to the decision, on a 0-100 scale
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureImportance {
    pub name: String,
    pub value: f64,
}

/// Body of a successful prediction
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionOutcome {
    pub label: String,
    pub risk_level: String,
    pub probability_percent: f64,
    pub model_info: ModelInfo,
    pub input_data: Map<String, Value>,
    pub feature_importance: Vec<FeatureImportance>,
}

impl PredictionOutcome {
    /// Whether the label names the positive class
    pub fn is_diabetic(&self) -> bool {
        self.label.eq_ignore_ascii_case("diabetic")
    }
}

/// Response of `POST /api/predict`, validated at the boundary
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "RawPredictionResponse")]
pub enum PredictionResponse {
    Success(PredictionOutcome),
    /// `success: false`; only the error message is guaranteed
    Failure { error: Option<String> },
}

impl PredictionResponse {
    /// Decode a JSON body, treating schema drift as a parse failure
    pub fn from_value(value: Value) -> Result<Self> {
        serde_json::from_value(value).map_err(|e| TransportError::Json(e).into())
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }
}

#[derive(Deserialize)]
struct RawPredictionResponse {
    #[serde(default)]
    success: bool,
    label: Option<String>,
    risk_level: Option<String>,
    probability_percent: Option<f64>,
    #[serde(default)]
    model_info: Option<ModelInfo>,
    #[serde(default)]
    input_data: Option<Map<String, Value>>,
    #[serde(default)]
    feature_importance: Option<Vec<FeatureImportance>>,
    error: Option<String>,
}

impl TryFrom<RawPredictionResponse> for PredictionResponse {
    type Error = String;

    fn try_from(raw: RawPredictionResponse) -> std::result::Result<Self, Self::Error> {
        if !raw.success {
            return Ok(Self::Failure { error: raw.error });
        }

        let label = raw.label.ok_or("successful prediction is missing `label`")?;
        let probability_percent = raw
            .probability_percent
            .ok_or("successful prediction is missing `probability_percent`")?;

        Ok(Self::Success(PredictionOutcome {
            label,
            risk_level: raw.risk_level.unwrap_or_default(),
            probability_percent,
            model_info: raw.model_info.unwrap_or_default(),
            input_data: raw.input_data.unwrap_or_default(),
            feature_importance: raw.feature_importance.unwrap_or_default(),
        }))
    }
}

/// One row of the prediction history
pub type LogEntry = Map<String, Value>;

/// Metadata served by `GET /api/model-info`
pub type ModelMetadata = Map<String, Value>;

/// Response of `GET /api/logs`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LogsResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub logs: Vec<LogEntry>,
    #[serde(default)]
    pub error: Option<String>,
}

impl LogsResponse {
    pub fn from_value(value: Value) -> Result<Self> {
        serde_json::from_value(value).map_err(|e| TransportError::Json(e).into())
    }
}

/// Format a number the way a JSON/JavaScript client displays it:
/// integral values without a fractional part, others in shortest form.
pub fn format_number(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

/// Fixed-point text with `digits` decimals. Exact ties round away from zero,
/// measured on the exact binary value of `value`.
pub fn to_fixed(value: f64, digits: u32) -> String {
    match Decimal::from_f64_retain(value) {
        Some(decimal) => {
            let mut rounded =
                decimal.round_dp_with_strategy(digits, RoundingStrategy::MidpointAwayFromZero);
            rounded.rescale(digits);
            rounded.to_string()
        }
        None => format!("{value:.prec$}", prec = digits as usize),
    }
}

/// Display form of a JSON scalar: strings unquoted, numbers via [`format_number`]
pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Number(number) => match number.as_i64() {
            Some(integer) => integer.to_string(),
            None => number.as_f64().map(format_number).unwrap_or_default(),
        },
        Value::Null => "-".to_string(),
        other => other.to_string(),
    }
}

fn lenient_string<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<String, D::Error> {
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(text)) => text,
        Some(other) => display_value(&other),
    })
}
