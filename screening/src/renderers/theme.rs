/// Two-colour diagnosis theme applied to the label, the probability and the
/// feature bars
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    /// Positive diagnosis
    Alert,
    /// Negative diagnosis
    Safe,
}

pub const ALERT_COLOR: &str = "#ef4444";
pub const SAFE_COLOR: &str = "#22c55e";

impl Theme {
    /// Case-insensitive match of the label against `"diabetic"`
    pub fn for_label(label: &str) -> Self {
        if label.eq_ignore_ascii_case("diabetic") {
            Self::Alert
        } else {
            Self::Safe
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            Self::Alert => ALERT_COLOR,
            Self::Safe => SAFE_COLOR,
        }
    }

    pub fn diagnosis_text(self) -> &'static str {
        match self {
            Self::Alert => "DIAGNOSIS: DIABETIC",
            Self::Safe => "DIAGNOSIS: NON-DIABETIC",
        }
    }
}
