//! Supported UI5 frameworks and their version floors

use crate::error::ValidationError;
use semver::Version;
use std::fmt;
use std::str::FromStr;

/// Supported UI5 distributions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Framework {
    OpenUI5,
    SAPUI5,
}

impl Framework {
    /// All frameworks in prompt order. The first entry is the default.
    pub const ALL: [Framework; 2] = [Framework::OpenUI5, Framework::SAPUI5];

    pub fn display_name(&self) -> &'static str {
        match self {
            Framework::OpenUI5 => "OpenUI5",
            Framework::SAPUI5 => "SAPUI5",
        }
    }

    pub fn lowercase(&self) -> &'static str {
        match self {
            Framework::OpenUI5 => "openui5",
            Framework::SAPUI5 => "sapui5",
        }
    }

    /// Oldest framework release the generated library supports
    pub fn min_version(&self) -> Version {
        match self {
            Framework::OpenUI5 => Version::new(1, 114, 0),
            Framework::SAPUI5 => Version::new(1, 77, 0),
        }
    }

    /// npm package whose published versions track the framework releases
    pub fn lookup_package(&self) -> &'static str {
        match self {
            Framework::OpenUI5 => "@openui5/sap.ui.core",
            Framework::SAPUI5 => "@sapui5/distribution-metadata",
        }
    }

    pub fn cdn_domain(&self) -> &'static str {
        match self {
            Framework::OpenUI5 => "sdk.openui5.org",
            Framework::SAPUI5 => "ui5.sap.com",
        }
    }
}

impl Default for Framework {
    fn default() -> Self {
        Framework::ALL[0]
    }
}

impl fmt::Display for Framework {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for Framework {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Framework::ALL
            .into_iter()
            .find(|f| f.display_name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ValidationError::UnknownFramework {
                input: s.to_string(),
                expected: Framework::ALL
                    .iter()
                    .map(|f| f.display_name())
                    .collect::<Vec<_>>()
                    .join(", "),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_first_configured() {
        assert_eq!(Framework::default(), Framework::OpenUI5);
    }

    #[test]
    fn test_parse_case_insensitive() {
        assert_eq!("openui5".parse::<Framework>(), Ok(Framework::OpenUI5));
        assert_eq!(" SAPUI5 ".parse::<Framework>(), Ok(Framework::SAPUI5));
    }

    #[test]
    fn test_parse_unknown() {
        let err = "react".parse::<Framework>().unwrap_err();
        assert!(err.to_string().contains("OpenUI5, SAPUI5"));
    }

    #[test]
    fn test_static_metadata() {
        assert_eq!(Framework::OpenUI5.min_version().to_string(), "1.114.0");
        assert_eq!(Framework::SAPUI5.min_version().to_string(), "1.77.0");
        assert_eq!(Framework::SAPUI5.cdn_domain(), "ui5.sap.com");
        assert_eq!(Framework::OpenUI5.lowercase(), "openui5");
    }
}
