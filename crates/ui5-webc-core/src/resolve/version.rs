//! Framework version validation and default-version resolution

use super::framework::Framework;
use crate::error::{LookupError, ValidationError};
use semver::Version;
use std::future::Future;

/// Parse a version string, tolerating surrounding whitespace and a single
/// leading `v` or `=` the way npm does
pub fn parse_version(version_str: &str) -> Option<Version> {
    let trimmed = version_str.trim();
    let cleaned = trimmed
        .strip_prefix('v')
        .or_else(|| trimmed.strip_prefix('='))
        .unwrap_or(trimmed);
    Version::parse(cleaned).ok()
}

/// Validate a framework version answer against the framework's floor
///
/// The floor is passed in explicitly because it depends on the framework
/// chosen in an earlier prompt.
pub fn validate_framework_version(
    raw: &str,
    min_version: &Version,
) -> Result<Version, ValidationError> {
    let version = parse_version(raw).ok_or_else(|| ValidationError::NotSemver {
        input: raw.to_string(),
    })?;

    if version < *min_version {
        return Err(ValidationError::BelowMinimum {
            version,
            minimum: min_version.clone(),
        });
    }

    Ok(version)
}

/// Highest release (non-prerelease) version in a list of version strings
pub fn highest_release<'a, I>(versions: I) -> Option<Version>
where
    I: IntoIterator<Item = &'a str>,
{
    versions
        .into_iter()
        .filter_map(|v| Version::parse(v).ok())
        .filter(|v| v.pre.is_empty())
        .max()
}

/// Capability for finding the newest published version of a package
pub trait VersionLookup {
    fn latest_version(
        &self,
        package: &str,
    ) -> impl Future<Output = Result<Version, LookupError>> + Send;
}

/// Lookup that always answers with the same version
#[derive(Debug, Clone)]
pub struct StaticLookup(pub Version);

impl VersionLookup for StaticLookup {
    fn latest_version(
        &self,
        _package: &str,
    ) -> impl Future<Output = Result<Version, LookupError>> + Send {
        let version = self.0.clone();
        async move { Ok(version) }
    }
}

/// Lookup used when network access is disabled; always fails
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineLookup;

impl VersionLookup for OfflineLookup {
    fn latest_version(
        &self,
        _package: &str,
    ) -> impl Future<Output = Result<Version, LookupError>> + Send {
        async { Err(LookupError::Offline) }
    }
}

/// Default framework version offered to the user
///
/// Never fails: a lookup error, or a published version below the framework
/// floor, falls back to [`Framework::min_version`].
pub async fn resolve_default_version<L: VersionLookup>(
    lookup: &L,
    framework: Framework,
) -> Version {
    let floor = framework.min_version();
    let package = framework.lookup_package();

    match lookup.latest_version(package).await {
        Ok(version) if version >= floor => {
            tracing::debug!(%package, %version, "resolved latest framework version");
            version
        }
        Ok(version) => {
            tracing::warn!(
                %package,
                %version,
                fallback = %floor,
                "published version is below the supported minimum, using fallback"
            );
            floor
        }
        Err(e) => {
            tracing::warn!(
                %package,
                error = %e,
                fallback = %floor,
                "version lookup failed, using fallback"
            );
            floor
        }
    }
}
