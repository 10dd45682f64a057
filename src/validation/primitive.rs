//! Lexical and numeric validation of FHIR primitive values.
//!
//! The patterns are the HL7 R4 datatype grammars, anchored so a value must
//! match in full. Numeric primitives are checked against the JSON number
//! itself rather than a rendered string, so `1.0` is not an integer and
//! values outside the 32-bit range are rejected as the wrong type.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use crate::error::{Result, ValidationError};
use crate::spec::FhirType;

static BASE64: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:\s*[0-9a-zA-Z+=]{4}\s*)+$").unwrap());
// The R4 grammar allows an empty canonical; an empty reference is useless, so
// require at least one character.
static CANONICAL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\S+$").unwrap());
static CODE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[^\s]+(?:\s[^\s]+)*$").unwrap());
static DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^([0-9]([0-9]([0-9][1-9]|[1-9]0)|[1-9]00)|[1-9]000)(-(0[1-9]|1[0-2])(-(0[1-9]|[1-2][0-9]|3[0-1]))?)?$",
    )
    .unwrap()
});
static DATE_TIME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^([0-9]([0-9]([0-9][1-9]|[1-9]0)|[1-9]00)|[1-9]000)(-(0[1-9]|1[0-2])(-(0[1-9]|[1-2][0-9]|3[0-1])(T([01][0-9]|2[0-3]):[0-5][0-9]:([0-5][0-9]|60)(\.[0-9]+)?(Z|(\+|-)((0[0-9]|1[0-3]):[0-5][0-9]|14:00)))?)?)?$",
    )
    .unwrap()
});
static ID: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[A-Za-z0-9\-\.]{1,64}$").unwrap());
static INSTANT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^([0-9]([0-9]([0-9][1-9]|[1-9]0)|[1-9]00)|[1-9]000)-(0[1-9]|1[0-2])-(0[1-9]|[1-2][0-9]|3[0-1])T([01][0-9]|2[0-3]):[0-5][0-9]:([0-5][0-9]|60)(\.[0-9]+)?(Z|(\+|-)((0[0-9]|1[0-3]):[0-5][0-9]|14:00))$",
    )
    .unwrap()
});
static MARKDOWN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*(\S|\s)*$").unwrap());
static OID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^urn:oid:[0-2](\.(0|[1-9][0-9]*))+$").unwrap());
static STRING: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[ \r\n\t\S]+$").unwrap());
static TIME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([01][0-9]|2[0-3]):[0-5][0-9]:([0-5][0-9]|60)(\.[0-9]+)?$").unwrap());
static URI: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\S*$").unwrap());
static UUID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^urn:uuid:[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}$").unwrap()
});

/// Validate one primitive value against its declared type.
///
/// `field` only feeds the error; the caller has already settled cardinality
/// and null handling.
pub(crate) fn validate(value: &Value, field: &str, fhir_type: FhirType) -> Result<()> {
    if !fhir_type.is_primitive() {
        return Err(ValidationError::InvalidUsage {
            message: format!("{fhir_type} is not a primitive type"),
        });
    }
    if value.is_null() {
        return Err(ValidationError::NullPrimitiveValue {
            field: field.to_string(),
        });
    }

    match fhir_type {
        FhirType::Boolean => {
            if value.is_boolean() {
                Ok(())
            } else {
                Err(mismatch(field, "boolean"))
            }
        }
        FhirType::Decimal => {
            if value.is_number() {
                Ok(())
            } else {
                Err(mismatch(field, "decimal"))
            }
        }
        FhirType::Integer => validate_integer(value, field, i32::MIN),
        FhirType::PositiveInt => validate_integer(value, field, 1),
        FhirType::UnsignedInt => validate_integer(value, field, 0),
        FhirType::Base64Binary => validate_lexical(value, field, &BASE64),
        FhirType::Canonical => validate_lexical(value, field, &CANONICAL),
        FhirType::Code => validate_lexical(value, field, &CODE),
        FhirType::Date => validate_lexical(value, field, &DATE),
        FhirType::DateTime => validate_lexical(value, field, &DATE_TIME),
        FhirType::Id => validate_lexical(value, field, &ID),
        FhirType::Instant => validate_lexical(value, field, &INSTANT),
        FhirType::Markdown => validate_lexical(value, field, &MARKDOWN),
        FhirType::Oid => validate_lexical(value, field, &OID),
        FhirType::String | FhirType::Xhtml => validate_lexical(value, field, &STRING),
        FhirType::Time => validate_lexical(value, field, &TIME),
        FhirType::Uri | FhirType::Url => validate_lexical(value, field, &URI),
        FhirType::Uuid => validate_lexical(value, field, &UUID),
        _ => unreachable!("primitive dispatch covers every primitive tag"),
    }
}

fn mismatch(field: &str, expected: &'static str) -> ValidationError {
    ValidationError::PrimitiveTypeMismatch {
        field: field.to_string(),
        expected,
    }
}

/// All three integer primitives share the 32-bit representation; they differ
/// only in the lower bound.
fn validate_integer(value: &Value, field: &str, min: i32) -> Result<()> {
    let parsed = value.as_i64().and_then(|n| i32::try_from(n).ok());
    let Some(n) = parsed else {
        return Err(mismatch(field, "integer"));
    };
    if n < min {
        return Err(ValidationError::InvalidPrimitiveValue {
            field: field.to_string(),
            value: n.to_string(),
        });
    }
    Ok(())
}

fn validate_lexical(value: &Value, field: &str, pattern: &Regex) -> Result<()> {
    let Some(s) = value.as_str() else {
        return Err(mismatch(field, "string"));
    };
    if pattern.is_match(s) {
        Ok(())
    } else {
        Err(ValidationError::InvalidPrimitiveValue {
            field: field.to_string(),
            value: s.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn check(value: Value, fhir_type: FhirType) -> Result<()> {
        validate(&value, "f", fhir_type)
    }

    #[test]
    fn boolean_accepts_only_json_booleans() {
        assert!(check(json!(true), FhirType::Boolean).is_ok());
        assert!(check(json!(false), FhirType::Boolean).is_ok());
        assert!(matches!(
            check(json!("true"), FhirType::Boolean),
            Err(ValidationError::PrimitiveTypeMismatch { expected: "boolean", .. })
        ));
        assert!(check(json!(1), FhirType::Boolean).is_err());
    }

    #[test]
    fn decimal_accepts_any_json_number() {
        assert!(check(json!(3.2), FhirType::Decimal).is_ok());
        assert!(check(json!(-40), FhirType::Decimal).is_ok());
        assert!(check(json!(0), FhirType::Decimal).is_ok());
        assert!(matches!(
            check(json!("3.2"), FhirType::Decimal),
            Err(ValidationError::PrimitiveTypeMismatch { expected: "decimal", .. })
        ));
    }

    #[test]
    fn integer_requires_a_32_bit_whole_number() {
        assert!(check(json!(0), FhirType::Integer).is_ok());
        assert!(check(json!(-2147483648i64), FhirType::Integer).is_ok());
        assert!(check(json!(2147483647i64), FhirType::Integer).is_ok());
        for bad in [json!(2147483648i64), json!(-2147483649i64), json!(1.5), json!(1.0), json!("7")] {
            assert!(matches!(
                check(bad, FhirType::Integer),
                Err(ValidationError::PrimitiveTypeMismatch { expected: "integer", .. })
            ));
        }
    }

    #[test]
    fn positive_int_rejects_zero_by_value() {
        assert!(check(json!(1), FhirType::PositiveInt).is_ok());
        assert!(matches!(
            check(json!(0), FhirType::PositiveInt),
            Err(ValidationError::InvalidPrimitiveValue { value, .. }) if value == "0"
        ));
    }

    #[test]
    fn unsigned_int_rejects_negatives_by_value() {
        assert!(check(json!(0), FhirType::UnsignedInt).is_ok());
        assert!(matches!(
            check(json!(-1), FhirType::UnsignedInt),
            Err(ValidationError::InvalidPrimitiveValue { value, .. }) if value == "-1"
        ));
    }

    #[test]
    fn code_forbids_leading_trailing_and_double_spaces() {
        assert!(check(json!("completed"), FhirType::Code).is_ok());
        assert!(check(json!("all done"), FhirType::Code).is_ok());
        // Any single whitespace character separates tokens, not just a space.
        assert!(check(json!("a\tb"), FhirType::Code).is_ok());
        for bad in ["", " completed", "completed ", "all  done"] {
            assert!(
                check(json!(bad), FhirType::Code).is_err(),
                "accepted code {bad:?}"
            );
        }
    }

    #[test]
    fn date_grammar() {
        for good in ["2023", "2023-06", "2023-06-14", "1000", "9000-12-31"] {
            assert!(check(json!(good), FhirType::Date).is_ok(), "rejected {good}");
        }
        for bad in ["0000", "2023-13", "2023-06-32", "2023-6-1", "23-06-14", "2023-06-14T10:00:00Z"] {
            assert!(check(json!(bad), FhirType::Date).is_err(), "accepted {bad}");
        }
    }

    #[test]
    fn date_time_requires_zone_with_time() {
        for good in [
            "2023",
            "2023-06-14",
            "2023-06-14T10:30:00Z",
            "2023-06-14T10:30:00.123+05:30",
            "2023-06-14T23:59:60-14:00",
        ] {
            assert!(check(json!(good), FhirType::DateTime).is_ok(), "rejected {good}");
        }
        for bad in [
            "2023-06-14T10:30:00",
            "2023-06-14T24:00:00Z",
            "2023-06-14T10:30:00+15:00",
            "2023-06-14 10:30:00Z",
        ] {
            assert!(check(json!(bad), FhirType::DateTime).is_err(), "accepted {bad}");
        }
    }

    #[test]
    fn instant_requires_full_precision() {
        assert!(check(json!("2023-06-14T10:30:00Z"), FhirType::Instant).is_ok());
        assert!(check(json!("2023-06-14T10:30:00.001+02:00"), FhirType::Instant).is_ok());
        for bad in ["2023-06-14", "2023-06-14T10:30:00", "2023"] {
            assert!(check(json!(bad), FhirType::Instant).is_err(), "accepted {bad}");
        }
    }

    #[test]
    fn time_grammar() {
        assert!(check(json!("00:00:00"), FhirType::Time).is_ok());
        assert!(check(json!("23:59:60"), FhirType::Time).is_ok());
        assert!(check(json!("10:30:00.5"), FhirType::Time).is_ok());
        for bad in ["24:00:00", "10:30", "10:30:00Z"] {
            assert!(check(json!(bad), FhirType::Time).is_err(), "accepted {bad}");
        }
    }

    #[test]
    fn id_grammar() {
        assert!(check(json!("immunization-1"), FhirType::Id).is_ok());
        assert!(check(json!("a.b.c"), FhirType::Id).is_ok());
        assert!(check(json!("a".repeat(64)), FhirType::Id).is_ok());
        for bad in ["", "has space", "under_score"] {
            assert!(check(json!(bad), FhirType::Id).is_err(), "accepted {bad:?}");
        }
        assert!(check(json!("a".repeat(65)), FhirType::Id).is_err());
    }

    #[test]
    fn base64_grammar() {
        assert!(check(json!("QmFzZTY0"), FhirType::Base64Binary).is_ok());
        assert!(check(json!("QmFz ZTY0"), FhirType::Base64Binary).is_ok());
        for bad in ["", "abc", "QmFzZTY!"] {
            assert!(
                check(json!(bad), FhirType::Base64Binary).is_err(),
                "accepted {bad:?}"
            );
        }
    }

    #[test]
    fn uri_allows_empty_but_canonical_does_not() {
        assert!(check(json!(""), FhirType::Uri).is_ok());
        assert!(check(json!("http://hl7.org/fhir"), FhirType::Uri).is_ok());
        assert!(check(json!("with space"), FhirType::Uri).is_err());
        assert!(check(json!(""), FhirType::Canonical).is_err());
        assert!(check(json!("http://hl7.org/fhir|4.0"), FhirType::Canonical).is_ok());
    }

    #[test]
    fn oid_and_uuid_urn_grammars() {
        assert!(check(json!("urn:oid:1.2.840.113619"), FhirType::Oid).is_ok());
        assert!(check(json!("1.2.840"), FhirType::Oid).is_err());
        assert!(check(json!("urn:oid:3.2"), FhirType::Oid).is_err());
        assert!(
            check(
                json!("urn:uuid:123e4567-e89b-12d3-a456-426614174000"),
                FhirType::Uuid
            )
            .is_ok()
        );
        assert!(
            check(
                json!("123e4567-e89b-12d3-a456-426614174000"),
                FhirType::Uuid
            )
            .is_err()
        );
        assert!(
            check(
                json!("urn:uuid:123E4567-E89B-12D3-A456-426614174000"),
                FhirType::Uuid
            )
            .is_err()
        );
    }

    #[test]
    fn string_rejects_empty_and_non_strings() {
        assert!(check(json!("note text"), FhirType::String).is_ok());
        assert!(check(json!("line one\nline two"), FhirType::String).is_ok());
        assert!(matches!(
            check(json!(""), FhirType::String),
            Err(ValidationError::InvalidPrimitiveValue { .. })
        ));
        assert!(matches!(
            check(json!(12), FhirType::String),
            Err(ValidationError::PrimitiveTypeMismatch { expected: "string", .. })
        ));
    }

    #[test]
    fn markdown_accepts_empty() {
        assert!(check(json!(""), FhirType::Markdown).is_ok());
        assert!(check(json!("# heading"), FhirType::Markdown).is_ok());
    }

    #[test]
    fn null_is_its_own_error() {
        assert!(matches!(
            check(Value::Null, FhirType::String),
            Err(ValidationError::NullPrimitiveValue { .. })
        ));
    }

    #[test]
    fn complex_tag_is_a_usage_error() {
        assert!(matches!(
            check(json!({}), FhirType::CodeableConcept),
            Err(ValidationError::InvalidUsage { .. })
        ));
    }
}
