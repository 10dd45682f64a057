use std::collections::{HashMap, HashSet};

use serde::Deserialize;
use tracing::debug;

use crate::error::{Result, ValidationError};

use super::config::TypeConfig;
use super::types::{FhirResourceType, FhirType};
use super::version::FhirVersion;

/// The embedded R4 validation tables. R4B carries no structural changes for
/// the supported types, so both versions load the same file.
const R4_SPEC_JSON: &str = include_str!("fhirspec_r4.json");

/// On-disk shape of the embedded table file.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SpecFile {
    resources: HashMap<String, TypeConfig>,
    complex_types: HashMap<FhirType, TypeConfig>,
}

/// The loaded validation tables for one FHIR version.
///
/// Immutable once built; share it across validators behind an `Arc`.
#[derive(Debug, Clone)]
pub struct FhirSpec {
    version: FhirVersion,
    resource_configs: HashMap<FhirResourceType, TypeConfig>,
    complex_configs: HashMap<FhirType, TypeConfig>,
    primitive_types: HashSet<FhirType>,
}

impl FhirSpec {
    /// Load the tables for `version`.
    ///
    /// Fails with [`ValidationError::UnsupportedVersion`] for versions no
    /// tables exist for, and with [`ValidationError::InvalidUsage`] if the
    /// embedded tables themselves are malformed or incomplete.
    pub fn for_version(version: FhirVersion) -> Result<Self> {
        if !version.is_supported() {
            return Err(ValidationError::UnsupportedVersion {
                version: version.to_string(),
            });
        }

        let file: SpecFile =
            serde_json::from_str(R4_SPEC_JSON).map_err(|e| ValidationError::InvalidUsage {
                message: format!("embedded spec tables are malformed: {e}"),
            })?;

        let mut resource_configs = HashMap::with_capacity(file.resources.len());
        for (name, config) in file.resources {
            let resource_type = FhirResourceType::from_name(&name).map_err(|_| {
                ValidationError::InvalidUsage {
                    message: format!("embedded spec tables define unknown resource type {name}"),
                }
            })?;
            resource_configs.insert(resource_type, config);
        }
        for resource_type in FhirResourceType::ALL {
            if !resource_configs.contains_key(&resource_type) {
                return Err(ValidationError::InvalidUsage {
                    message: format!("embedded spec tables are missing {resource_type}"),
                });
            }
        }

        let complex_configs = file.complex_types;
        for tag in FhirType::ALL {
            if !tag.is_primitive() && !tag.is_shallow() && !complex_configs.contains_key(&tag) {
                return Err(ValidationError::InvalidUsage {
                    message: format!("embedded spec tables are missing complex type {tag}"),
                });
            }
        }

        let primitive_types = FhirType::ALL
            .into_iter()
            .filter(|tag| tag.is_primitive())
            .collect();

        debug!(
            %version,
            resources = resource_configs.len(),
            complex_types = complex_configs.len(),
            "loaded FHIR spec tables"
        );

        Ok(Self {
            version,
            resource_configs,
            complex_configs,
            primitive_types,
        })
    }

    pub fn version(&self) -> FhirVersion {
        self.version
    }

    /// The validation table for a resource type.
    pub fn resource_config(&self, resource_type: FhirResourceType) -> Result<&TypeConfig> {
        self.resource_configs.get(&resource_type).ok_or_else(|| {
            ValidationError::UnknownResourceType {
                resource_type: resource_type.to_string(),
            }
        })
    }

    /// The validation table for a resource type given its FHIR name.
    pub fn config_by_name(&self, name: &str) -> Result<&TypeConfig> {
        self.resource_config(FhirResourceType::from_name(name)?)
    }

    /// The nested table for a complex type tag.
    ///
    /// Returns `Ok(None)` for the shallow tags whose contents are accepted
    /// without recursion, and errors for primitive tags, which never carry a
    /// nested table.
    pub fn complex_config(&self, tag: FhirType) -> Result<Option<&TypeConfig>> {
        if tag.is_primitive() {
            return Err(ValidationError::InvalidUsage {
                message: format!("no nested table exists for primitive type {tag}"),
            });
        }
        if tag.is_shallow() {
            return Ok(None);
        }
        match self.complex_configs.get(&tag) {
            Some(config) => Ok(Some(config)),
            None => Err(ValidationError::InvalidUsage {
                message: format!("no table loaded for complex type {tag}"),
            }),
        }
    }

    pub fn is_primitive(&self, tag: FhirType) -> bool {
        self.primitive_types.contains(&tag)
    }
}
