use std::sync::Arc;

use serde_json::Value;
use tracing::debug;

use crate::error::{Result, ValidationError};
use crate::spec::{FhirResourceType, FhirSpec};
use crate::validation::structure::StructureValidator;

/// Validates FHIR resource documents against the loaded spec tables.
///
/// Holds no per-call state; one validator can serve concurrent callers, and
/// the spec behind the `Arc` can be shared with other validators.
#[derive(Debug, Clone)]
pub struct ResourceValidator {
    spec: Arc<FhirSpec>,
}

impl ResourceValidator {
    pub fn new(spec: Arc<FhirSpec>) -> Self {
        Self { spec }
    }

    pub fn spec(&self) -> &FhirSpec {
        &self.spec
    }

    /// Validate a document the caller has already typed.
    pub fn validate(&self, resource: &Value, resource_type: FhirResourceType) -> Result<()> {
        let Some(object) = resource.as_object() else {
            return Err(ValidationError::InvalidUsage {
                message: "resource document must be a JSON object".to_string(),
            });
        };
        let config = self.spec.resource_config(resource_type)?;
        debug!(%resource_type, fields = object.len(), "validating resource");
        StructureValidator::new(&self.spec).validate(object, config)
    }

    /// Validate against a resource type given by its FHIR name.
    pub fn validate_named(&self, resource: &Value, type_name: &str) -> Result<()> {
        self.validate(resource, FhirResourceType::from_name(type_name)?)
    }

    /// Validate a standalone document, taking the resource type from its own
    /// `resourceType` field.
    ///
    /// The document must carry a non-empty string `id`, and contained
    /// resources are rejected outright. Returns the resolved type so callers
    /// can route the accepted resource.
    pub fn validate_document(&self, resource: &Value) -> Result<FhirResourceType> {
        let Some(object) = resource.as_object() else {
            return Err(ValidationError::InvalidUsage {
                message: "resource document must be a JSON object".to_string(),
            });
        };

        let id = match object.get("id") {
            None => return Err(ValidationError::MissingResourceId),
            Some(Value::String(id)) => id,
            Some(_) => return Err(ValidationError::ResourceIdNotString),
        };

        let type_name = match object.get("resourceType").and_then(Value::as_str) {
            Some(name) => name,
            None => {
                return Err(ValidationError::MissingResourceType { id: id.clone() });
            }
        };

        if id.is_empty() {
            return Err(ValidationError::EmptyResourceId);
        }

        if let Some(contained) = object.get("contained") {
            let empty_array = contained.as_array().is_some_and(Vec::is_empty);
            if !empty_array {
                return Err(ValidationError::ContainedResourcesNotSupported { id: id.clone() });
            }
        }

        let resource_type = FhirResourceType::from_name(type_name)?;
        self.validate(resource, resource_type)?;
        Ok(resource_type)
    }
}
