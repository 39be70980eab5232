use crate::form::bmi::format_bmi;
use crate::form::normalizer::FieldNormalizer;
use crate::types::PredictionRequest;

/// Entries of the prediction form, in the order they were first set.
///
/// `bmi` is derived: every edit of `height` or `weight` recomputes it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormState {
    entries: Vec<(String, String)>,
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, value)| value.as_str())
    }

    /// Input-changed handler. Returns the recomputed BMI when the edit
    /// touched one of its inputs.
    pub fn set_field<K: Into<String>, V: Into<String>>(&mut self, field: K, value: V) -> Option<String> {
        let field = field.into();
        let recompute = field == "height" || field == "weight";
        self.put(field, value.into());

        if recompute {
            let bmi = format_bmi(
                self.get("height").unwrap_or_default(),
                self.get("weight").unwrap_or_default(),
            );
            self.put("bmi".to_string(), bmi.clone());
            Some(bmi)
        } else {
            None
        }
    }

    fn put(&mut self, field: String, value: String) {
        match self.entries.iter_mut().find(|(name, _)| *name == field) {
            Some((_, slot)) => *slot = value,
            None => self.entries.push((field, value)),
        }
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Clear every entry, including the derived BMI
    pub fn reset(&mut self) {
        self.entries.clear();
    }

    pub fn to_request(&self, normalizer: &FieldNormalizer) -> PredictionRequest {
        normalizer.normalize(self.entries())
    }
}

/// Fields that must be filled before the form can be submitted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormSchema {
    required: Vec<String>,
}

impl Default for FormSchema {
    fn default() -> Self {
        Self::new([
            "age",
            "gender",
            "pulse_rate",
            "systolic_bp",
            "diastolic_bp",
            "glucose",
            "height",
            "weight",
            "family_diabetes",
            "hypertensive",
        ])
    }
}

impl FormSchema {
    pub fn new<I, S>(required: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            required: required.into_iter().map(Into::into).collect(),
        }
    }

    pub fn required(&self) -> &[String] {
        &self.required
    }

    pub fn check_validity(&self, form: &FormState) -> ValidityReport {
        let missing = self
            .required
            .iter()
            .filter(|field| form.get(field).map_or(true, |value| value.trim().is_empty()))
            .cloned()
            .collect();
        ValidityReport { missing }
    }
}

/// Outcome of form validation; reported natively, not as an alert
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidityReport {
    pub missing: Vec<String>,
}

impl ValidityReport {
    pub fn is_valid(&self) -> bool {
        self.missing.is_empty()
    }
}
