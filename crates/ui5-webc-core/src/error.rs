//! Error types shared across the resolver, materializer and config store

use semver::Version;
use std::path::PathBuf;
use thiserror::Error;

/// A user answer that failed validation.
///
/// Every variant renders as a message suitable for showing next to the prompt
/// that produced the answer, so the user can correct it in place.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error(
        "A full library name is required (namespace included), please use at least one \".\" \
         character - e.g. demo.components or my.demo.components is ok, but just \"{input}\" is not"
    )]
    TooFewSegments { input: String },

    #[error(
        "Please use alpha-numeric characters and underscores only for both the namespace parts \
         and the library name (invalid part: \"{segment}\")"
    )]
    InvalidCharacters { segment: String },

    #[error("\"{input}\" is not a valid semantic version")]
    NotSemver { input: String },

    #[error("Framework requires the min version {minimum} (got {version})")]
    BelowMinimum { version: Version, minimum: Version },

    #[error("Invalid path \"{path}\" - must start with: {prefix}")]
    InvalidRelativePath { path: String, prefix: String },

    #[error("Invalid path \"{path}\" - it contains characters that are not allowed in a path")]
    InvalidPathSyntax { path: String },

    #[error(
        "Cannot read {} for {path} ({reason}), please set a path relative to: {}",
        .descriptor.display(),
        .root.display()
    )]
    PackageDescriptorUnreadable {
        path: String,
        root: PathBuf,
        descriptor: PathBuf,
        reason: String,
    },

    #[error("The package file {} does not have a \"name\" property", .descriptor.display())]
    PackageDescriptorMissingName { descriptor: PathBuf },

    #[error("Invalid package name \"{name}\": {reason}")]
    InvalidPackageName { name: String, reason: String },

    #[error("Invalid package version \"{version}\" - use \"latest\" or a semantic version")]
    InvalidPackageVersion { version: String },

    #[error("Unknown framework \"{input}\" (expected one of: {expected})")]
    UnknownFramework { input: String, expected: String },
}

/// Failure while asking a registry for published versions.
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("Registry request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Registry lookup for {package} timed out after {seconds}s")]
    Timeout { package: String, seconds: u64 },

    #[error("Registry returned HTTP {status} for {package}")]
    Status { package: String, status: u16 },

    #[error("Package {package} has no published release versions")]
    NoVersions { package: String },

    #[error("Invalid registry URL: {0}")]
    Url(String),

    #[error("Version lookup disabled")]
    Offline,
}

/// Fatal failure while writing the output tree.
///
/// The destination is left as it was at the moment of failure.
#[derive(Debug, Error)]
pub enum MaterializeError {
    #[error("Template directory not found: {}", .0.display())]
    SourceNotFound(PathBuf),

    #[error("Failed to walk template directory {}: {source}", .root.display())]
    Walk {
        root: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("Failed to read template file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to create directory {}: {source}", .path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write file {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Failure reading or writing the persisted configuration store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to access config store {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Config store {} is not valid JSON: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
