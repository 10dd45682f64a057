use thiserror::Error;

/// Every way a validation call can fail.
///
/// The first three variants are configuration or wiring mistakes; everything
/// else is a rejection of the input document. Callers in surrounding systems
/// match on the rendered messages, so the wordings here are part of the
/// contract and must not change casually.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ValidationError {
    #[error("Unsupported FHIR version {version}")]
    UnsupportedVersion { version: String },

    #[error("Invalid FHIR version string: {value}")]
    InvalidVersion { value: String },

    #[error("Unsupported FHIR resource type {resource_type}")]
    UnknownResourceType { resource_type: String },

    #[error("Invalid validator usage: {message}")]
    InvalidUsage { message: String },

    #[error("Missing required field {field}")]
    MissingRequiredField { field: String },

    #[error("Only one type should be set for field {field}")]
    AmbiguousChoice { field: String },

    #[error("Found unexpected field {field}")]
    UnexpectedField { field: String },

    #[error("Invalid resource structure. Expected array for field: {field}")]
    ExpectedArray { field: String },

    #[error(
        "Invalid resource structure. Found json array but expected primitive type in field: {field}"
    )]
    UnexpectedArray { field: String },

    #[error("Invalid resource structure. Expected object in field: {field}")]
    ExpectedObject { field: String },

    #[error(
        "Invalid resource structure. Found json object but expected primitive type in field: {field}"
    )]
    UnexpectedObject { field: String },

    /// Null where a primitive value was declared.
    #[error("Found null value in field: {field}")]
    NullPrimitiveValue { field: String },

    /// Null where a complex (nested object) value was declared. Same wording
    /// as the primitive case, distinct kind.
    #[error("Found null value in field: {field}")]
    NullComplexValue { field: String },

    #[error("Invalid resource structure. Found non {expected} object in field: {field}")]
    PrimitiveTypeMismatch {
        field: String,
        expected: &'static str,
    },

    #[error("Found invalid field value in primitive field: {field}. The value found is: {value}")]
    InvalidPrimitiveValue { field: String, value: String },

    #[error("Found empty array in field: {field}")]
    EmptyArray { field: String },

    #[error("Found empty object in field: {field}")]
    EmptyObject { field: String },

    #[error("Found data nested deeper than the max allowed nesting level: {max_level}")]
    MaxNestingExceeded { max_level: usize },

    #[error("Resource is missing id field")]
    MissingResourceId,

    #[error("Resource id should be a string")]
    ResourceIdNotString,

    #[error("Resource id cannot be empty")]
    EmptyResourceId,

    #[error("Missing resourceType field for resource with id {id}")]
    MissingResourceType { id: String },

    #[error(
        "Contained resources are not supported. Found contained resource for resource with id {id}"
    )]
    ContainedResourcesNotSupported { id: String },
}

impl ValidationError {
    /// The single-segment name of the offending field, for the variants that
    /// carry one.
    pub fn field_name(&self) -> Option<&str> {
        match self {
            Self::MissingRequiredField { field }
            | Self::AmbiguousChoice { field }
            | Self::UnexpectedField { field }
            | Self::ExpectedArray { field }
            | Self::UnexpectedArray { field }
            | Self::ExpectedObject { field }
            | Self::UnexpectedObject { field }
            | Self::NullPrimitiveValue { field }
            | Self::NullComplexValue { field }
            | Self::PrimitiveTypeMismatch { field, .. }
            | Self::InvalidPrimitiveValue { field, .. }
            | Self::EmptyArray { field }
            | Self::EmptyObject { field } => Some(field),
            _ => None,
        }
    }

    /// True for errors that reject the document itself, as opposed to
    /// configuration or wiring mistakes.
    pub fn is_data_error(&self) -> bool {
        !matches!(
            self,
            Self::UnsupportedVersion { .. }
                | Self::InvalidVersion { .. }
                | Self::UnknownResourceType { .. }
                | Self::InvalidUsage { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, ValidationError>;
