//! Structural validation of one JSON object against its type table.
//!
//! A single pass over the object settles field membership, required fields
//! and choice groups, then walks each value: cardinality, null handling,
//! primitive grammar for leaf values, and recursion into complex values
//! against their own tables. The first violation found is returned;
//! `serde_json` preserves insertion order, so the walk follows document
//! order.

use serde_json::{Map, Value};

use crate::error::{Result, ValidationError};
use crate::spec::{FhirSpec, FieldConfig, FhirType, TypeConfig};
use crate::validation::primitive;

/// Objects nested deeper than this are rejected rather than walked further.
pub(crate) const MAX_NESTING_LEVEL: usize = 20;

pub(crate) struct StructureValidator<'a> {
    spec: &'a FhirSpec,
}

impl<'a> StructureValidator<'a> {
    pub(crate) fn new(spec: &'a FhirSpec) -> Self {
        Self { spec }
    }

    pub(crate) fn validate(&self, object: &Map<String, Value>, config: &TypeConfig) -> Result<()> {
        self.validate_object(object, config, 0)
    }

    fn validate_object(
        &self,
        object: &Map<String, Value>,
        config: &TypeConfig,
        level: usize,
    ) -> Result<()> {
        // Membership first, so an unknown field is reported before any
        // complaint about fields that are merely missing.
        for field in object.keys() {
            self.field_config(field, config)?;
        }

        for required in &config.required_fields {
            let field_config =
                config
                    .field(required)
                    .ok_or_else(|| ValidationError::InvalidUsage {
                        message: format!("no field config for required field {required}"),
                    })?;
            if !field_is_present(object, required, field_config.fhir_type) {
                return Err(ValidationError::MissingRequiredField {
                    field: required.clone(),
                });
            }
        }

        for group in &config.multi_type_fields {
            let mut present = 0;
            for typed_field in &group.typed_fields {
                let field_config =
                    config
                        .field(typed_field)
                        .ok_or_else(|| ValidationError::InvalidUsage {
                            message: format!(
                                "choice group {} names unknown field {typed_field}",
                                group.name
                            ),
                        })?;
                if field_is_present(object, typed_field, field_config.fhir_type) {
                    present += 1;
                }
            }
            if present > 1 {
                return Err(ValidationError::AmbiguousChoice {
                    field: group.name.clone(),
                });
            }
            if present == 0 && group.required {
                return Err(ValidationError::MissingRequiredField {
                    field: group.name.clone(),
                });
            }
        }

        for (field, value) in object {
            let field_config = self.field_config(field, config)?;
            self.validate_field_value(field, value, field_config, level)?;
        }

        Ok(())
    }

    /// Resolve a document key to its field config, handling the `_field`
    /// convention for primitive extensions.
    fn field_config(&self, field: &str, config: &TypeConfig) -> Result<FieldConfig> {
        let unexpected = || ValidationError::UnexpectedField {
            field: field.to_string(),
        };
        let base_name = field.strip_prefix('_');
        let field_config = config.field(base_name.unwrap_or(field)).ok_or_else(unexpected)?;
        // Only primitive fields carry a companion `_field` element.
        if base_name.is_some() && !field_config.fhir_type.is_primitive() {
            return Err(unexpected());
        }
        Ok(*field_config)
    }

    fn validate_field_value(
        &self,
        field: &str,
        value: &Value,
        field_config: FieldConfig,
        level: usize,
    ) -> Result<()> {
        let is_extension = field.starts_with('_');
        // Primitive extension arrays carry null placeholders to keep their
        // positions aligned with the value array.
        let null_allowed = is_extension && field_config.is_array;

        if field_config.is_array {
            let Some(items) = value.as_array() else {
                return Err(ValidationError::ExpectedArray {
                    field: field.to_string(),
                });
            };
            if items.is_empty() {
                return Err(ValidationError::EmptyArray {
                    field: field.to_string(),
                });
            }
            for item in items {
                if item.is_null() && null_allowed {
                    continue;
                }
                self.validate_element(field, item, field_config, is_extension, level)?;
            }
            Ok(())
        } else {
            self.validate_element(field, value, field_config, is_extension, level)
        }
    }

    /// Validate one element: a primitive leaf, or a complex object to recurse
    /// into. A `_field` element is always an Element object regardless of the
    /// base field's primitive type.
    fn validate_element(
        &self,
        field: &str,
        value: &Value,
        field_config: FieldConfig,
        is_extension: bool,
        level: usize,
    ) -> Result<()> {
        if field_config.fhir_type.is_primitive() && !is_extension {
            if value.is_array() {
                return Err(ValidationError::UnexpectedArray {
                    field: field.to_string(),
                });
            }
            if value.is_object() {
                return Err(ValidationError::UnexpectedObject {
                    field: field.to_string(),
                });
            }
            return primitive::validate(value, field, field_config.fhir_type);
        }

        if value.is_null() {
            return Err(ValidationError::NullComplexValue {
                field: field.to_string(),
            });
        }
        let Some(object) = value.as_object() else {
            return Err(ValidationError::ExpectedObject {
                field: field.to_string(),
            });
        };
        if object.is_empty() {
            return Err(ValidationError::EmptyObject {
                field: field.to_string(),
            });
        }

        let next_level = level + 1;
        if next_level > MAX_NESTING_LEVEL {
            return Err(ValidationError::MaxNestingExceeded {
                max_level: MAX_NESTING_LEVEL,
            });
        }

        let tag = if is_extension {
            FhirType::Element
        } else {
            field_config.fhir_type
        };
        match self.spec.complex_config(tag)? {
            Some(config) => self.validate_object(object, config, next_level),
            // Shallow tags: the element shape was all there was to check.
            None => Ok(()),
        }
    }
}

/// A primitive field also counts as present when only its `_field` companion
/// is in the document.
fn field_is_present(object: &Map<String, Value>, name: &str, fhir_type: FhirType) -> bool {
    if object.contains_key(name) {
        return true;
    }
    fhir_type.is_primitive() && object.contains_key(&format!("_{name}"))
}
