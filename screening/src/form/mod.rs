//! Raw form entries, their coercion into a typed payload, and the derived
//! BMI field.

pub mod bmi;
pub mod normalizer;
pub mod state;

pub use bmi::{compute_bmi, format_bmi};
pub use normalizer::{parse_leading_float, parse_leading_int, FieldKind, FieldNormalizer, FLOAT_FIELDS, INTEGER_FIELDS};
pub use state::{FormSchema, FormState, ValidityReport};
