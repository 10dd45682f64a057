//! Structural and type validation for FHIR R4/R4B resources.
//!
//! Documents are validated as parsed JSON against embedded per-type tables:
//! field membership, required fields, choice groups such as
//! `occurrence[x]`, cardinality, the lexical grammars of primitive values,
//! and nested complex types, recursively. Validation stops at the first
//! violation and reports it with the offending field name.
//!
//! # Quick start
//!
//! ```
//! use std::sync::Arc;
//!
//! use fhirguard::{FhirSpec, FhirVersion, ResourceValidator};
//! use serde_json::json;
//!
//! let spec = Arc::new(FhirSpec::for_version(FhirVersion::R4)?);
//! let validator = ResourceValidator::new(spec);
//!
//! let resource = json!({
//!     "resourceType": "Observation",
//!     "id": "blood-glucose",
//!     "status": "final",
//!     "code": {"text": "Glucose"},
//!     "valueQuantity": {"value": 6.3, "unit": "mmol/l"}
//! });
//!
//! let resource_type = validator.validate_document(&resource)?;
//! assert_eq!(resource_type.as_str(), "Observation");
//! # Ok::<(), fhirguard::ValidationError>(())
//! ```

pub mod error;
pub mod spec;
pub mod validation;

pub use error::{Result, ValidationError};
pub use spec::{FhirResourceType, FhirSpec, FhirType, FhirVersion};
pub use validation::ResourceValidator;
