//! Dotted library namespaces (`my.demo.components`)

use crate::error::ValidationError;
use std::fmt;
use std::str::FromStr;

/// A validated library namespace with at least two segments.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Namespace {
    segments: Vec<String>,
}

impl Namespace {
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// The namespace as typed, e.g. `demo.components`
    pub fn dotted(&self) -> String {
        self.segments.join(".")
    }

    /// Segments joined by `/`, e.g. `demo/components`
    pub fn path_form(&self) -> String {
        self.segments.join("/")
    }

    /// One `..` per segment, e.g. `../..`
    ///
    /// Lets a file generated under [`Namespace::path_form`] point back at the
    /// directory that contains it.
    pub fn up_levels(&self) -> String {
        vec![".."; self.segments.len()].join("/")
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.dotted())
    }
}

impl FromStr for Namespace {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        validate_namespace(s)
    }
}

fn is_valid_segment(segment: &str) -> bool {
    !segment.is_empty()
        && segment
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Validate a dotted namespace answer
pub fn validate_namespace(raw: &str) -> Result<Namespace, ValidationError> {
    let parts: Vec<&str> = raw.split('.').collect();
    if parts.len() < 2 {
        return Err(ValidationError::TooFewSegments {
            input: raw.to_string(),
        });
    }

    if let Some(bad) = parts.iter().find(|part| !is_valid_segment(part)) {
        return Err(ValidationError::InvalidCharacters {
            segment: bad.to_string(),
        });
    }

    Ok(Namespace {
        segments: parts.into_iter().map(str::to_string).collect(),
    })
}
