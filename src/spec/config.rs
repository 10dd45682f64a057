use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::types::FhirType;

/// One allowed field of a resource or complex type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldConfig {
    #[serde(rename = "type")]
    pub fhir_type: FhirType,
    /// Whether the field carries a JSON array of values. Authoritative: the
    /// document must match it exactly in both directions.
    #[serde(default)]
    pub is_array: bool,
}

/// A choice field such as `occurrence[x]`: one logical value spread over
/// several concretely named fields, of which at most one may be present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MultiTypeField {
    /// The logical group name used in error messages, e.g. `occurrence[x]`.
    pub name: String,
    /// The concrete field names; each also appears in `allowed_fields`.
    pub typed_fields: Vec<String>,
    #[serde(default)]
    pub required: bool,
}

/// The validation table for one resource type or one nested complex type.
/// The model is self-similar: a complex field's value is validated against
/// that type's own `TypeConfig`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeConfig {
    #[serde(default)]
    pub required_fields: Vec<String>,
    #[serde(default)]
    pub multi_type_fields: Vec<MultiTypeField>,
    pub allowed_fields: HashMap<String, FieldConfig>,
}

impl TypeConfig {
    pub fn field(&self, name: &str) -> Option<&FieldConfig> {
        self.allowed_fields.get(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_config_defaults_to_singular() {
        let config: FieldConfig = serde_json::from_str(r#"{"type": "code"}"#).unwrap();
        assert_eq!(config.fhir_type, FhirType::Code);
        assert!(!config.is_array);
    }

    #[test]
    fn type_config_deserializes_table_row() {
        let config: TypeConfig = serde_json::from_str(
            r#"{
                "requiredFields": ["status"],
                "multiTypeFields": [
                    {"name": "occurrence[x]", "typedFields": ["occurrenceDateTime"], "required": true}
                ],
                "allowedFields": {
                    "status": {"type": "code"},
                    "identifier": {"type": "Identifier", "isArray": true}
                }
            }"#,
        )
        .unwrap();

        assert_eq!(config.required_fields, vec!["status"]);
        assert!(config.multi_type_fields[0].required);
        assert!(config.field("identifier").unwrap().is_array);
        assert_eq!(config.field("status").unwrap().fhir_type, FhirType::Code);
        assert!(config.field("unknown").is_none());
    }
}
