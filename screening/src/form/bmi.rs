use crate::form::normalizer::parse_leading_float;
use crate::types::to_fixed;

/// `weight / height²`, when both inputs parse to positive numbers
pub fn compute_bmi(height: &str, weight: &str) -> Option<f64> {
    let height = parse_leading_float(height)?;
    let weight = parse_leading_float(weight)?;

    if height > 0.0 && weight > 0.0 {
        Some(weight / (height * height))
    } else {
        None
    }
}

/// BMI as shown in the form: two decimals, or empty when it cannot be derived
pub fn format_bmi(height: &str, weight: &str) -> String {
    compute_bmi(height, weight)
        .map(|bmi| to_fixed(bmi, 2))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bmi_for_typical_adult() {
        assert_eq!(format_bmi("1.75", "70"), "22.86");
        assert_eq!(format_bmi("1.6", "50"), "19.53");
        assert_eq!(format_bmi("2", "80"), "20.00");
    }

    #[test]
    fn test_bmi_rounds_exact_ties_up() {
        assert_eq!(format_bmi("2", "58.5"), "14.63");
        assert_eq!(format_bmi("2", "0.5"), "0.13");
    }

    #[test]
    fn test_bmi_cleared_for_non_positive_or_missing_input() {
        assert_eq!(format_bmi("0", "70"), "");
        assert_eq!(format_bmi("1.75", "-3"), "");
        assert_eq!(format_bmi("", "70"), "");
        assert_eq!(format_bmi("tall", "70"), "");
        assert!(compute_bmi("1.75", "0").is_none());
    }

    #[test]
    fn test_bmi_matches_formula_across_inputs() {
        for (height, weight) in [(1.5_f64, 45.0_f64), (1.82, 95.3), (0.9, 20.0), (1.7, 120.0)] {
            let expected = to_fixed(weight / (height * height), 2);
            assert_eq!(format_bmi(&height.to_string(), &weight.to_string()), expected);
        }
    }
}
