//! npm registry lookup of published package versions

use super::version::{highest_release, VersionLookup};
use crate::error::LookupError;
use crate::product::ProductConfig;
use semver::Version;
use serde::de::IgnoredAny;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::future::Future;
use std::time::Duration;
use tokio::time::timeout;
use url::Url;

/// Upper bound for a single registry request
pub const LOOKUP_TIMEOUT: Duration = Duration::from_secs(5);

/// Abbreviated package metadata, much smaller than the full document
const ABBREVIATED_METADATA: &str = "application/vnd.npm.install-v1+json";

/// The part of a registry package document we care about
#[derive(Debug, Deserialize)]
struct PackageDocument {
    #[serde(default)]
    versions: BTreeMap<String, IgnoredAny>,
}

/// Version lookup against an npm-compatible registry
pub struct RegistryLookup {
    base_url: Url,
    client: reqwest::Client,
}

impl RegistryLookup {
    /// Create a lookup with a custom user agent
    pub fn new(base_url: Url, user_agent: &str) -> Self {
        Self {
            base_url,
            client: reqwest::Client::builder()
                .user_agent(user_agent)
                .timeout(LOOKUP_TIMEOUT)
                .build()
                .unwrap_or_else(|_| reqwest::Client::new()),
        }
    }

    /// Create a lookup from a product config, honoring its registry URL override
    pub fn from_config<C: ProductConfig>(config: &C) -> Result<Self, LookupError> {
        let url_str = std::env::var(config.registry_url_env())
            .unwrap_or_else(|_| config.default_registry_url().to_string());
        let url = Url::parse(&url_str).map_err(|e| LookupError::Url(format!("{url_str}: {e}")))?;
        Ok(Self::new(url, config.user_agent()))
    }

    /// Build a package URL by appending the package name as a single path
    /// segment (a scope's `/` is percent-encoded), preserving query parameters
    pub fn package_url(&self, package: &str) -> Result<Url, LookupError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                LookupError::Url(format!("URL cannot have path segments: {}", self.base_url))
            })?
            .pop_if_empty()
            .push(package);
        Ok(url)
    }

    async fn fetch_versions(&self, package: &str) -> Result<Version, LookupError> {
        let url = self.package_url(package)?;
        tracing::debug!(%url, "querying registry");

        let response = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, ABBREVIATED_METADATA)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(LookupError::Status {
                package: package.to_string(),
                status: response.status().as_u16(),
            });
        }

        let document: PackageDocument = response.json().await?;
        highest_release(document.versions.keys().map(String::as_str)).ok_or_else(|| {
            LookupError::NoVersions {
                package: package.to_string(),
            }
        })
    }
}

impl VersionLookup for RegistryLookup {
    fn latest_version(
        &self,
        package: &str,
    ) -> impl Future<Output = Result<Version, LookupError>> + Send {
        async move {
            match timeout(LOOKUP_TIMEOUT, self.fetch_versions(package)).await {
                Ok(result) => result,
                Err(_) => Err(LookupError::Timeout {
                    package: package.to_string(),
                    seconds: LOOKUP_TIMEOUT.as_secs(),
                }),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup(base: &str) -> RegistryLookup {
        RegistryLookup::new(Url::parse(base).unwrap(), "test-agent")
    }

    #[test]
    fn test_package_url_unscoped() {
        let url = lookup("https://registry.npmjs.org/").package_url("lodash").unwrap();
        assert_eq!(url.as_str(), "https://registry.npmjs.org/lodash");
    }

    #[test]
    fn test_package_url_scoped_encodes_slash() {
        let url = lookup("https://registry.npmjs.org")
            .package_url("@openui5/sap.ui.core")
            .unwrap();
        assert_eq!(url.as_str(), "https://registry.npmjs.org/@openui5%2Fsap.ui.core");
    }

    #[test]
    fn test_package_url_keeps_base_path_and_query() {
        let url = lookup("https://npm.example.com/mirror/?token=abc")
            .package_url("pkg")
            .unwrap();
        assert_eq!(url.as_str(), "https://npm.example.com/mirror/pkg?token=abc");
    }

    #[test]
    fn test_document_parsing_ignores_version_bodies() {
        let json = r#"{"name":"x","versions":{"1.0.0":{"dist":{}},"1.2.0":{},"2.0.0-rc.1":{}}}"#;
        let doc: PackageDocument = serde_json::from_str(json).unwrap();
        let latest = highest_release(doc.versions.keys().map(String::as_str));
        assert_eq!(latest, Some(Version::new(1, 2, 0)));
    }
}
