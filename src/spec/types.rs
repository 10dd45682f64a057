use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Closed set of FHIR R4 type tags used by the spec tables.
///
/// Serde names are the FHIR wire names, so the tags round-trip through the
/// embedded table file unchanged. Whether a tag is primitive or complex is
/// queried through [`FhirSpec`](super::FhirSpec) by the validators; the
/// classification methods here are the single source the spec builds from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FhirType {
    // Primitive types, validated by lexical/numeric grammar.
    #[serde(rename = "base64Binary")]
    Base64Binary,
    #[serde(rename = "boolean")]
    Boolean,
    #[serde(rename = "canonical")]
    Canonical,
    #[serde(rename = "code")]
    Code,
    #[serde(rename = "date")]
    Date,
    #[serde(rename = "dateTime")]
    DateTime,
    #[serde(rename = "decimal")]
    Decimal,
    #[serde(rename = "id")]
    Id,
    #[serde(rename = "instant")]
    Instant,
    #[serde(rename = "integer")]
    Integer,
    #[serde(rename = "markdown")]
    Markdown,
    #[serde(rename = "oid")]
    Oid,
    #[serde(rename = "positiveInt")]
    PositiveInt,
    #[serde(rename = "string")]
    String,
    #[serde(rename = "time")]
    Time,
    #[serde(rename = "unsignedInt")]
    UnsignedInt,
    #[serde(rename = "uri")]
    Uri,
    #[serde(rename = "url")]
    Url,
    #[serde(rename = "uuid")]
    Uuid,
    #[serde(rename = "xhtml")]
    Xhtml,

    // Complex types validated recursively against their own field tables.
    Address,
    Age,
    Annotation,
    Attachment,
    CodeableConcept,
    Coding,
    ContactPoint,
    Dosage,
    Duration,
    Element,
    HumanName,
    Identifier,
    Meta,
    Narrative,
    Period,
    Quantity,
    Range,
    Ratio,
    Reference,
    SampledData,
    Timing,

    // Complex types where only the element shape (non-null object) is
    // checked; their contents are not validated further.
    Resource,
    Extension,
    BackboneElement,
}

impl FhirType {
    pub(crate) const ALL: [FhirType; 44] = [
        FhirType::Base64Binary,
        FhirType::Boolean,
        FhirType::Canonical,
        FhirType::Code,
        FhirType::Date,
        FhirType::DateTime,
        FhirType::Decimal,
        FhirType::Id,
        FhirType::Instant,
        FhirType::Integer,
        FhirType::Markdown,
        FhirType::Oid,
        FhirType::PositiveInt,
        FhirType::String,
        FhirType::Time,
        FhirType::UnsignedInt,
        FhirType::Uri,
        FhirType::Url,
        FhirType::Uuid,
        FhirType::Xhtml,
        FhirType::Address,
        FhirType::Age,
        FhirType::Annotation,
        FhirType::Attachment,
        FhirType::CodeableConcept,
        FhirType::Coding,
        FhirType::ContactPoint,
        FhirType::Dosage,
        FhirType::Duration,
        FhirType::Element,
        FhirType::HumanName,
        FhirType::Identifier,
        FhirType::Meta,
        FhirType::Narrative,
        FhirType::Period,
        FhirType::Quantity,
        FhirType::Range,
        FhirType::Ratio,
        FhirType::Reference,
        FhirType::SampledData,
        FhirType::Timing,
        FhirType::Resource,
        FhirType::Extension,
        FhirType::BackboneElement,
    ];

    /// The FHIR wire name of the tag.
    pub fn name(self) -> &'static str {
        match self {
            FhirType::Base64Binary => "base64Binary",
            FhirType::Boolean => "boolean",
            FhirType::Canonical => "canonical",
            FhirType::Code => "code",
            FhirType::Date => "date",
            FhirType::DateTime => "dateTime",
            FhirType::Decimal => "decimal",
            FhirType::Id => "id",
            FhirType::Instant => "instant",
            FhirType::Integer => "integer",
            FhirType::Markdown => "markdown",
            FhirType::Oid => "oid",
            FhirType::PositiveInt => "positiveInt",
            FhirType::String => "string",
            FhirType::Time => "time",
            FhirType::UnsignedInt => "unsignedInt",
            FhirType::Uri => "uri",
            FhirType::Url => "url",
            FhirType::Uuid => "uuid",
            FhirType::Xhtml => "xhtml",
            FhirType::Address => "Address",
            FhirType::Age => "Age",
            FhirType::Annotation => "Annotation",
            FhirType::Attachment => "Attachment",
            FhirType::CodeableConcept => "CodeableConcept",
            FhirType::Coding => "Coding",
            FhirType::ContactPoint => "ContactPoint",
            FhirType::Dosage => "Dosage",
            FhirType::Duration => "Duration",
            FhirType::Element => "Element",
            FhirType::HumanName => "HumanName",
            FhirType::Identifier => "Identifier",
            FhirType::Meta => "Meta",
            FhirType::Narrative => "Narrative",
            FhirType::Period => "Period",
            FhirType::Quantity => "Quantity",
            FhirType::Range => "Range",
            FhirType::Ratio => "Ratio",
            FhirType::Reference => "Reference",
            FhirType::SampledData => "SampledData",
            FhirType::Timing => "Timing",
            FhirType::Resource => "Resource",
            FhirType::Extension => "Extension",
            FhirType::BackboneElement => "BackboneElement",
        }
    }

    pub(crate) fn is_primitive(self) -> bool {
        matches!(
            self,
            FhirType::Base64Binary
                | FhirType::Boolean
                | FhirType::Canonical
                | FhirType::Code
                | FhirType::Date
                | FhirType::DateTime
                | FhirType::Decimal
                | FhirType::Id
                | FhirType::Instant
                | FhirType::Integer
                | FhirType::Markdown
                | FhirType::Oid
                | FhirType::PositiveInt
                | FhirType::String
                | FhirType::Time
                | FhirType::UnsignedInt
                | FhirType::Uri
                | FhirType::Url
                | FhirType::Uuid
                | FhirType::Xhtml
        )
    }

    /// Complex tags whose contents are accepted without a nested table.
    pub(crate) fn is_shallow(self) -> bool {
        matches!(
            self,
            FhirType::Resource | FhirType::Extension | FhirType::BackboneElement
        )
    }
}

impl fmt::Display for FhirType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The resource types the validator ships tables for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FhirResourceType {
    AllergyIntolerance,
    Condition,
    Encounter,
    Immunization,
    Location,
    Medication,
    MedicationRequest,
    MedicationStatement,
    Observation,
    Organization,
    Patient,
    Practitioner,
    PractitionerRole,
    Procedure,
}

impl FhirResourceType {
    pub const ALL: [FhirResourceType; 14] = [
        FhirResourceType::AllergyIntolerance,
        FhirResourceType::Condition,
        FhirResourceType::Encounter,
        FhirResourceType::Immunization,
        FhirResourceType::Location,
        FhirResourceType::Medication,
        FhirResourceType::MedicationRequest,
        FhirResourceType::MedicationStatement,
        FhirResourceType::Observation,
        FhirResourceType::Organization,
        FhirResourceType::Patient,
        FhirResourceType::Practitioner,
        FhirResourceType::PractitionerRole,
        FhirResourceType::Procedure,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            FhirResourceType::AllergyIntolerance => "AllergyIntolerance",
            FhirResourceType::Condition => "Condition",
            FhirResourceType::Encounter => "Encounter",
            FhirResourceType::Immunization => "Immunization",
            FhirResourceType::Location => "Location",
            FhirResourceType::Medication => "Medication",
            FhirResourceType::MedicationRequest => "MedicationRequest",
            FhirResourceType::MedicationStatement => "MedicationStatement",
            FhirResourceType::Observation => "Observation",
            FhirResourceType::Organization => "Organization",
            FhirResourceType::Patient => "Patient",
            FhirResourceType::Practitioner => "Practitioner",
            FhirResourceType::PractitionerRole => "PractitionerRole",
            FhirResourceType::Procedure => "Procedure",
        }
    }

    /// Resolve a FHIR resource name, e.g. from a document's `resourceType`
    /// field.
    pub fn from_name(name: &str) -> crate::error::Result<Self> {
        Self::ALL
            .into_iter()
            .find(|rt| rt.as_str() == name)
            .ok_or_else(|| ValidationError::UnknownResourceType {
                resource_type: name.to_string(),
            })
    }
}

impl fmt::Display for FhirResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FhirResourceType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s)
    }
}
