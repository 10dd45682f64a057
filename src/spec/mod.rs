//! The FHIR spec tables: which fields each resource and complex type may
//! carry, which are required, and how each field's value is typed.

mod config;
mod provider;
mod types;
mod version;

pub use config::{FieldConfig, MultiTypeField, TypeConfig};
pub use provider::FhirSpec;
pub use types::{FhirResourceType, FhirType};
pub use version::FhirVersion;
