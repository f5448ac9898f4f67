//! Input resolution: turning raw answers into a [`LibraryConfig`]
//!
//! This module provides:
//! - Validators for each answer (namespace, framework version, package)
//! - Default framework version lookup with a static fallback
//! - [`Resolver`], the ordered pipeline used for non-interactive runs
//!
//! Answers depend on earlier ones (the version floor on the framework, local
//! package paths on the destination directory); those dependencies are passed
//! as explicit arguments.

pub mod framework;
pub mod namespace;
pub mod package;
pub mod registry;
pub mod version;

use crate::config::{Answers, LibraryConfig};
use crate::error::ValidationError;
use std::path::{Path, PathBuf};

pub use framework::Framework;
pub use namespace::{validate_namespace, Namespace};
pub use package::{resolve_package_reference, PackageReference, LATEST_TAG};
pub use registry::RegistryLookup;
pub use version::{
    resolve_default_version, validate_framework_version, OfflineLookup, StaticLookup,
    VersionLookup,
};

pub const DEFAULT_NAMESPACE: &str = "demo.components";
pub const DEFAULT_PACKAGE: &str = "../my-package";

/// Directory the library is generated into
pub fn destination_root(working_dir: &Path, namespace: &Namespace, newdir: bool) -> PathBuf {
    if newdir {
        working_dir.join(namespace.dotted())
    } else {
        working_dir.to_path_buf()
    }
}

/// Resolves a full set of answers in prompt order, stopping at the first
/// invalid one
pub struct Resolver<'a, L> {
    lookup: &'a L,
    working_dir: PathBuf,
    default_author: String,
}

impl<'a, L: VersionLookup> Resolver<'a, L> {
    pub fn new(
        lookup: &'a L,
        working_dir: impl Into<PathBuf>,
        default_author: impl Into<String>,
    ) -> Self {
        Self {
            lookup,
            working_dir: working_dir.into(),
            default_author: default_author.into(),
        }
    }

    pub async fn resolve(&self, answers: &Answers) -> Result<LibraryConfig, ValidationError> {
        let namespace =
            validate_namespace(answers.namespace.as_deref().unwrap_or(DEFAULT_NAMESPACE))?;

        let framework = match answers.framework.as_deref() {
            Some(raw) => raw.parse::<Framework>()?,
            None => Framework::default(),
        };

        let framework_version = match answers.framework_version.as_deref() {
            Some(raw) => validate_framework_version(raw, &framework.min_version())?,
            None => resolve_default_version(self.lookup, framework).await,
        };

        let newdir = answers.newdir.unwrap_or(true);
        let destination = destination_root(&self.working_dir, &namespace, newdir);

        let package_answer = answers
            .web_components_package
            .clone()
            .unwrap_or_else(|| DEFAULT_PACKAGE.to_string());
        let package = resolve_package_reference(&package_answer, &destination)?;

        let author = answers
            .author
            .clone()
            .unwrap_or_else(|| self.default_author.clone());

        Ok(LibraryConfig {
            namespace,
            framework,
            framework_version,
            package,
            package_answer,
            author,
            newdir,
            initrepo: answers.initrepo.unwrap_or(true),
            destination,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use semver::Version;
    use tempfile::TempDir;

    fn answers(package: &str) -> Answers {
        Answers {
            web_components_package: Some(package.to_string()),
            ..Answers::default()
        }
    }

    #[tokio::test]
    async fn test_defaults_with_registry_package() {
        let lookup = StaticLookup(Version::new(1, 120, 0));
        let resolver = Resolver::new(&lookup, "/work", "Jane");

        let config = resolver.resolve(&answers("my-pkg@2.0.0")).await.unwrap();
        assert_eq!(config.namespace.dotted(), DEFAULT_NAMESPACE);
        assert_eq!(config.framework, Framework::OpenUI5);
        assert_eq!(config.framework_version, Version::new(1, 120, 0));
        assert_eq!(config.author, "Jane");
        assert!(config.newdir);
        assert!(config.initrepo);
        assert_eq!(config.destination, PathBuf::from("/work/demo.components"));
    }

    #[tokio::test]
    async fn test_framework_floor_follows_framework_answer() {
        let lookup = OfflineLookup;
        let resolver = Resolver::new(&lookup, "/work", "");

        let sap = Answers {
            framework: Some("SAPUI5".to_string()),
            framework_version: Some("1.80.0".to_string()),
            ..answers("pkg")
        };
        assert!(resolver.resolve(&sap).await.is_ok());

        let open = Answers {
            framework: Some("OpenUI5".to_string()),
            ..sap
        };
        assert!(matches!(
            resolver.resolve(&open).await,
            Err(ValidationError::BelowMinimum { .. })
        ));
    }

    #[tokio::test]
    async fn test_first_invalid_answer_wins() {
        let resolver = Resolver::new(&OfflineLookup, "/work", "");
        let bad = Answers {
            namespace: Some("single".to_string()),
            framework_version: Some("nope".to_string()),
            ..answers("BAD")
        };
        assert!(matches!(
            resolver.resolve(&bad).await,
            Err(ValidationError::TooFewSegments { .. })
        ));
    }

    #[tokio::test]
    async fn test_local_package_relative_to_new_directory() {
        let tmp = TempDir::new().unwrap();
        let work = tmp.path().join("work");
        std::fs::create_dir_all(work.join("my-package")).unwrap();
        std::fs::write(work.join("my-package/package.json"), r#"{"name":"@acme/wc"}"#).unwrap();

        let resolver = Resolver::new(&OfflineLookup, &work, "");

        // newdir: destination is <work>/demo.components, so ../my-package is <work>/my-package
        let config = resolver.resolve(&Answers::default()).await.unwrap();
        assert_eq!(config.package.name(), "@acme/wc");

        // without newdir the same path points at <tmp>/my-package
        let flat = Answers {
            newdir: Some(false),
            ..Answers::default()
        };
        assert!(matches!(
            resolver.resolve(&flat).await,
            Err(ValidationError::PackageDescriptorUnreadable { .. })
        ));
    }

    #[test]
    fn test_destination_root() {
        let ns = validate_namespace("a.b").unwrap();
        assert_eq!(destination_root(Path::new("/w"), &ns, true), PathBuf::from("/w/a.b"));
        assert_eq!(destination_root(Path::new("/w"), &ns, false), PathBuf::from("/w"));
    }
}
