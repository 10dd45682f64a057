use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

/// A FHIR publication version, parsed from its `major.minor.patch` form.
///
/// The type is deliberately open: callers hand in whatever version string
/// their data declares, and support is checked when the spec tables are
/// loaded, not at parse time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FhirVersion {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl FhirVersion {
    /// FHIR R4 (4.0.1).
    pub const R4: FhirVersion = FhirVersion::new(4, 0, 1);
    /// FHIR R4B (4.3.0).
    pub const R4B: FhirVersion = FhirVersion::new(4, 3, 0);

    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    /// Whether spec tables exist for this version.
    pub fn is_supported(&self) -> bool {
        *self == Self::R4 || *self == Self::R4B
    }
}

impl fmt::Display for FhirVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

impl FromStr for FhirVersion {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ValidationError::InvalidVersion {
            value: s.to_string(),
        };
        let mut parts = s.split('.');
        let next = |parts: &mut std::str::Split<'_, char>| {
            parts
                .next()
                .and_then(|p| p.parse::<u32>().ok())
                .ok_or_else(invalid)
        };
        let major = next(&mut parts)?;
        let minor = next(&mut parts)?;
        let patch = next(&mut parts)?;
        if parts.next().is_some() {
            return Err(invalid());
        }
        Ok(Self::new(major, minor, patch))
    }
}
