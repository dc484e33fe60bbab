use crate::domain::model::{
    fields, EmbarkPort, FeatureVector, MissingValuePolicy, PassengerQuery, Sex,
};
use std::collections::HashMap;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EncodingError {
    #[error("missing required field '{field}'")]
    MissingField { field: &'static str },

    #[error("'{value}' is not a valid number for '{field}'")]
    InvalidNumber { field: &'static str, value: String },

    #[error("'{value}' is out of range for '{field}': {reason}")]
    OutOfRange {
        field: &'static str,
        value: String,
        reason: &'static str,
    },
}

impl EncodingError {
    pub fn field(&self) -> &'static str {
        match self {
            Self::MissingField { field }
            | Self::InvalidNumber { field, .. }
            | Self::OutOfRange { field, .. } => field,
        }
    }
}

/// Encodes raw form fields into the classifier's feature vector.
pub fn encode(
    raw_fields: &HashMap<String, String>,
    policy: MissingValuePolicy,
) -> Result<FeatureVector, EncodingError> {
    let query = PassengerQuery::from_form(raw_fields, policy)?;
    Ok(FeatureVector::from(&query))
}

impl PassengerQuery {
    pub fn from_form(
        raw_fields: &HashMap<String, String>,
        policy: MissingValuePolicy,
    ) -> Result<Self, EncodingError> {
        let form = FormReader { raw_fields, policy };

        let ticket_class = form.ticket_class()?;
        let sex = Sex::from_form(form.text(fields::SEX));
        let age = form.float(fields::AGE)?;
        let siblings_spouses = form.count(fields::SIBLINGS_SPOUSES)?;
        let parents_children = form.count(fields::PARENTS_CHILDREN)?;
        let fare = form.float(fields::FARE)?;
        let embark_port = EmbarkPort::from_form(form.text(fields::EMBARK_PORT));

        Ok(Self {
            ticket_class,
            sex,
            age,
            siblings_spouses,
            parents_children,
            fare,
            embark_port,
        })
    }
}

struct FormReader<'a> {
    raw_fields: &'a HashMap<String, String>,
    policy: MissingValuePolicy,
}

impl<'a> FormReader<'a> {
    fn text(&self, field: &'static str) -> &'a str {
        self.raw_fields.get(field).map(String::as_str).unwrap_or("")
    }

    /// Blank values count as missing, the same as an absent key.
    fn present(&self, field: &'static str) -> Option<&'a str> {
        let value = self.text(field).trim();
        (!value.is_empty()).then_some(value)
    }

    fn ticket_class(&self) -> Result<u8, EncodingError> {
        let field = fields::TICKET_CLASS;
        let raw = self
            .present(field)
            .ok_or(EncodingError::MissingField { field })?;
        let value: i64 = raw.parse().map_err(|_| EncodingError::InvalidNumber {
            field,
            value: raw.to_string(),
        })?;

        match value {
            1..=3 => Ok(value as u8),
            _ => Err(EncodingError::OutOfRange {
                field,
                value: raw.to_string(),
                reason: "ticket class must be 1, 2 or 3",
            }),
        }
    }

    fn float(&self, field: &'static str) -> Result<f64, EncodingError> {
        let Some(raw) = self.present(field) else {
            return self.missing(field).map(|_| 0.0);
        };
        let value: f64 = raw.parse().map_err(|_| EncodingError::InvalidNumber {
            field,
            value: raw.to_string(),
        })?;

        if !value.is_finite() {
            return Err(EncodingError::OutOfRange {
                field,
                value: raw.to_string(),
                reason: "value must be a finite number",
            });
        }
        if value < 0.0 {
            return Err(EncodingError::OutOfRange {
                field,
                value: raw.to_string(),
                reason: "value must not be negative",
            });
        }
        Ok(value)
    }

    fn count(&self, field: &'static str) -> Result<u32, EncodingError> {
        let Some(raw) = self.present(field) else {
            return self.missing(field).map(|_| 0);
        };
        let value: i64 = raw.parse().map_err(|_| EncodingError::InvalidNumber {
            field,
            value: raw.to_string(),
        })?;

        u32::try_from(value).map_err(|_| EncodingError::OutOfRange {
            field,
            value: raw.to_string(),
            reason: "count must be a non-negative integer",
        })
    }

    fn missing(&self, field: &'static str) -> Result<(), EncodingError> {
        match self.policy {
            MissingValuePolicy::Strict => Err(EncodingError::MissingField { field }),
            MissingValuePolicy::Lenient => {
                tracing::debug!("Field '{}' missing, defaulting to zero", field);
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn full_form() -> HashMap<String, String> {
        form(&[
            ("pclass", "1"),
            ("sexo", "Mujer"),
            ("edad", "5"),
            ("sibsp", "0"),
            ("parch", "0"),
            ("tarifa", "100.0"),
            ("embarcado", "c"),
        ])
    }

    #[test]
    fn test_encode_full_form() {
        let vector = encode(&full_form(), MissingValuePolicy::Strict).unwrap();
        assert_eq!(vector.values(), &[1.0, 1.0, 5.0, 0.0, 0.0, 100.0, 0.0]);
    }

    #[test]
    fn test_encode_is_idempotent() {
        let raw = full_form();
        let first = encode(&raw, MissingValuePolicy::Strict).unwrap();
        let second = encode(&raw, MissingValuePolicy::Strict).unwrap();
        let first_bits: Vec<u64> = first.values().iter().map(|v| v.to_bits()).collect();
        let second_bits: Vec<u64> = second.values().iter().map(|v| v.to_bits()).collect();
        assert_eq!(first_bits, second_bits);
    }

    #[test]
    fn test_strict_rejects_malformed_age() {
        let mut raw = full_form();
        raw.insert("edad".to_string(), "abc".to_string());
        let err = encode(&raw, MissingValuePolicy::Strict).unwrap_err();
        assert_eq!(
            err,
            EncodingError::InvalidNumber {
                field: "edad",
                value: "abc".to_string()
            }
        );
        assert!(err.to_string().contains("abc"));
    }

    #[test]
    fn test_lenient_still_rejects_malformed_age() {
        let mut raw = full_form();
        raw.insert("edad".to_string(), "abc".to_string());
        assert!(encode(&raw, MissingValuePolicy::Lenient).is_err());
    }

    #[test]
    fn test_strict_rejects_missing_age() {
        let mut raw = full_form();
        raw.remove("edad");
        let err = encode(&raw, MissingValuePolicy::Strict).unwrap_err();
        assert_eq!(err, EncodingError::MissingField { field: "edad" });
    }

    #[test]
    fn test_lenient_defaults_missing_numbers_to_zero() {
        let raw = form(&[("pclass", "3"), ("sexo", "male"), ("edad", "  ")]);
        let vector = encode(&raw, MissingValuePolicy::Lenient).unwrap();
        assert_eq!(vector.values(), &[3.0, 0.0, 0.0, 0.0, 0.0, 0.0, 2.0]);
    }

    #[test]
    fn test_ticket_class_always_required() {
        let mut raw = full_form();
        raw.remove("pclass");
        for policy in [MissingValuePolicy::Strict, MissingValuePolicy::Lenient] {
            let err = encode(&raw, policy).unwrap_err();
            assert_eq!(err.field(), "pclass");
        }
    }

    #[test]
    fn test_ticket_class_range() {
        for bad in ["0", "4", "-1", "1.5", "first"] {
            let mut raw = full_form();
            raw.insert("pclass".to_string(), bad.to_string());
            assert!(encode(&raw, MissingValuePolicy::Strict).is_err(), "{bad}");
        }
    }

    #[test]
    fn test_negative_and_non_finite_values_rejected() {
        for (field, bad) in [("edad", "-3"), ("tarifa", "inf"), ("tarifa", "NaN"), ("sibsp", "-1")] {
            let mut raw = full_form();
            raw.insert(field.to_string(), bad.to_string());
            let err = encode(&raw, MissingValuePolicy::Lenient).unwrap_err();
            assert!(matches!(err, EncodingError::OutOfRange { .. }), "{field}={bad}");
        }
    }

    #[test]
    fn test_missing_sex_and_port_never_fail() {
        let mut raw = full_form();
        raw.remove("sexo");
        raw.remove("embarcado");
        let vector = encode(&raw, MissingValuePolicy::Strict).unwrap();
        assert_eq!(vector.sex_code(), 0.0);
        assert_eq!(vector.embark_code(), 2.0);
    }

    #[test]
    fn test_surrounding_whitespace_is_ignored() {
        let mut raw = full_form();
        raw.insert("edad".to_string(), " 7.5 ".to_string());
        let vector = encode(&raw, MissingValuePolicy::Strict).unwrap();
        assert_eq!(vector.age(), 7.5);
    }
}
