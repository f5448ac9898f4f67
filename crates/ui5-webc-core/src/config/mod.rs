//! Resolved library configuration and the values derived from it
//!
//! [`LibraryConfig`] is the typed record produced by the resolver. Templates
//! only ever see the flattened [`Substitutions`] built from it, and the config
//! store persists the same entries with their JSON types intact.

pub mod answers;
pub mod store;

use crate::resolve::{Framework, Namespace, PackageReference};
use semver::Version;
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

pub use answers::Answers;
pub use store::ConfigStore;

/// Store key flagging that materialization finished
pub const SETUP_COMPLETED_KEY: &str = "setupCompleted";

/// A single configuration value: text or a yes/no answer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigValue {
    Text(String),
    Flag(bool),
}

impl fmt::Display for ConfigValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigValue::Text(s) => write!(f, "{}", s),
            ConfigValue::Flag(b) => write!(f, "{}", b),
        }
    }
}

impl From<&str> for ConfigValue {
    fn from(value: &str) -> Self {
        ConfigValue::Text(value.to_string())
    }
}

impl From<String> for ConfigValue {
    fn from(value: String) -> Self {
        ConfigValue::Text(value)
    }
}

impl From<bool> for ConfigValue {
    fn from(value: bool) -> Self {
        ConfigValue::Flag(value)
    }
}

impl From<ConfigValue> for serde_json::Value {
    fn from(value: ConfigValue) -> Self {
        match value {
            ConfigValue::Text(s) => serde_json::Value::String(s),
            ConfigValue::Flag(b) => serde_json::Value::Bool(b),
        }
    }
}

/// Fully resolved answers for one generator run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibraryConfig {
    pub namespace: Namespace,
    pub framework: Framework,
    pub framework_version: Version,
    pub package: PackageReference,
    /// The package answer exactly as typed
    pub package_answer: String,
    pub author: String,
    pub newdir: bool,
    pub initrepo: bool,
    /// Directory the library is generated into
    pub destination: PathBuf,
}

/// A named configuration entry
pub type Entry = (&'static str, ConfigValue);

/// Entries derived from the namespace answer
pub fn namespace_entries(namespace: &Namespace) -> Vec<Entry> {
    vec![
        ("name", namespace.dotted().into()),
        ("libId", namespace.dotted().into()),
        ("libURI", namespace.path_form().into()),
        ("libraryURI", namespace.path_form().into()),
        ("libBasePath", namespace.up_levels().into()),
    ]
}

/// Entries derived from the framework and its version
pub fn framework_entries(framework: Framework, version: &Version) -> Vec<Entry> {
    vec![
        ("framework", framework.display_name().into()),
        ("frameworklowercase", framework.lowercase().into()),
        ("frameworkVersion", version.to_string().into()),
        ("cdnDomain", framework.cdn_domain().into()),
    ]
}

/// Entries derived from the Web Components package answer
pub fn package_entries(package: &PackageReference, answer: &str) -> Vec<Entry> {
    vec![
        ("webComponentsPackage", answer.into()),
        ("webComponentsPackageName", package.name().into()),
        ("webComponentsPackageVersion", package.version_spec().into()),
    ]
}

impl LibraryConfig {
    /// Every named configuration entry, in a stable order
    pub fn entries(&self) -> Vec<Entry> {
        let mut entries = namespace_entries(&self.namespace);
        entries.extend(framework_entries(self.framework, &self.framework_version));
        entries.extend(package_entries(&self.package, &self.package_answer));
        entries.extend([
            ("author", self.author.clone().into()),
            ("newdir", self.newdir.into()),
            ("initrepo", self.initrepo.into()),
        ]);
        entries
    }

    /// The mapping handed to the template materializer
    pub fn substitutions(&self) -> Substitutions {
        self.entries()
            .into_iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect()
    }
}

/// Placeholder values keyed by name, read-only once built
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Substitutions(BTreeMap<String, String>);

impl Substitutions {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl FromIterator<(String, String)> for Substitutions {
    fn from_iter<T: IntoIterator<Item = (String, String)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}
