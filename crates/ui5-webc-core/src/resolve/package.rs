//! Web Components package specifiers: registry packages and local folders

use crate::error::ValidationError;
use serde::Deserialize;
use std::fmt;
use std::path::{Component, Path, PathBuf};

/// Version tag used when a registry specifier carries no explicit version
pub const LATEST_TAG: &str = "latest";

/// Longest package name the registry accepts for new packages
const MAX_NAME_LENGTH: usize = 214;

const BLACKLISTED_NAMES: &[&str] = &["node_modules", "favicon.ico"];

/// Characters rejected in local package paths
const INVALID_PATH_CHARS: &[char] = &['<', '>', ':', '"', '|', '?', '*'];

/// Where the Web Components package comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PackageReference {
    /// A package published to the registry, `version` is `latest` or semver
    Registry { name: String, version: String },
    /// A package folder next to the generated library; `name` comes from its
    /// `package.json`
    Local { path: String, name: String },
}

impl PackageReference {
    pub fn name(&self) -> &str {
        match self {
            PackageReference::Registry { name, .. } | PackageReference::Local { name, .. } => {
                name
            }
        }
    }

    /// Dependency specifier written next to the name in `package.json`:
    /// the version for registry packages, the relative path for local ones
    pub fn version_spec(&self) -> &str {
        match self {
            PackageReference::Registry { version, .. } => version,
            PackageReference::Local { path, .. } => path,
        }
    }

    pub fn is_local(&self) -> bool {
        matches!(self, PackageReference::Local { .. })
    }
}

impl fmt::Display for PackageReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PackageReference::Registry { name, version } => {
                write!(f, "{}@{}", name, version)
            }
            PackageReference::Local { path, name } => write!(f, "{} ({})", name, path),
        }
    }
}

/// Minimal view of a `package.json`
#[derive(Debug, Deserialize)]
struct PackageDescriptor {
    #[serde(default)]
    name: Option<serde_json::Value>,
}

impl PackageDescriptor {
    /// The `name` property if it is a non-blank string
    fn name(self) -> Option<String> {
        match self.name {
            Some(serde_json::Value::String(name)) if !name.trim().is_empty() => Some(name),
            _ => None,
        }
    }
}

/// Prefix a local package path must start with
pub fn parent_prefix() -> String {
    format!("..{}", std::path::MAIN_SEPARATOR)
}

fn has_parent_prefix(raw: &str) -> bool {
    raw.starts_with("../") || (cfg!(windows) && raw.starts_with("..\\"))
}

/// Resolve a package answer into a [`PackageReference`]
///
/// Answers starting with `.` are local folders, resolved relative to
/// `destination_root`; everything else is a registry specifier of the form
/// `[@scope/]name[@version]`.
pub fn resolve_package_reference(
    raw: &str,
    destination_root: &Path,
) -> Result<PackageReference, ValidationError> {
    if raw.starts_with('.') {
        resolve_local(raw, destination_root)
    } else {
        resolve_registry(raw)
    }
}

/// Collapse `.` and `..` components lexically, without touching the filesystem
///
/// The destination may not exist yet when a local package is entered, so
/// `<dest>/../pkg` must not be handed to the OS as is.
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match normalized.components().next_back() {
                Some(Component::Normal(_)) => {
                    normalized.pop();
                }
                // `..` at the root stays at the root
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => normalized.push(component),
            },
            other => normalized.push(other),
        }
    }
    normalized
}

fn resolve_local(
    raw: &str,
    destination_root: &Path,
) -> Result<PackageReference, ValidationError> {
    if !has_parent_prefix(raw) {
        return Err(ValidationError::InvalidRelativePath {
            path: raw.to_string(),
            prefix: parent_prefix(),
        });
    }

    if raw
        .chars()
        .any(|c| c.is_control() || INVALID_PATH_CHARS.contains(&c))
    {
        return Err(ValidationError::InvalidPathSyntax {
            path: raw.to_string(),
        });
    }

    let descriptor_path = normalize_path(&destination_root.join(raw).join("package.json"));
    let unreadable = |reason: String| ValidationError::PackageDescriptorUnreadable {
        path: raw.to_string(),
        root: destination_root.to_path_buf(),
        descriptor: descriptor_path.clone(),
        reason,
    };

    let content =
        std::fs::read_to_string(&descriptor_path).map_err(|e| unreadable(e.to_string()))?;
    let descriptor: PackageDescriptor =
        serde_json::from_str(&content).map_err(|e| unreadable(e.to_string()))?;

    match descriptor.name() {
        Some(name) => Ok(PackageReference::Local {
            path: raw.to_string(),
            name,
        }),
        None => Err(ValidationError::PackageDescriptorMissingName {
            descriptor: descriptor_path,
        }),
    }
}

/// Split `[@scope/]name[@version]` into the full name and optional version
pub fn split_package_spec(raw: &str) -> (String, Option<String>) {
    let (scope, rest) = match raw.split_once('/') {
        Some((scope, rest)) => (Some(scope), rest),
        None => (None, raw),
    };

    let (name, version) = match rest.split_once('@') {
        Some((name, version)) => (name, Some(version.to_string())),
        None => (rest, None),
    };

    let full_name = match scope {
        Some(scope) => format!("{}/{}", scope, name),
        None => name.to_string(),
    };

    (full_name, version)
}

fn resolve_registry(raw: &str) -> Result<PackageReference, ValidationError> {
    let (name, version) = split_package_spec(raw);

    validate_package_name(&name).map_err(|reason| ValidationError::InvalidPackageName {
        name: name.clone(),
        reason: reason.to_string(),
    })?;

    let version = match version {
        None => LATEST_TAG.to_string(),
        Some(v) if v == LATEST_TAG => v,
        Some(v) => {
            if semver::Version::parse(&v).is_err() {
                return Err(ValidationError::InvalidPackageVersion { version: v });
            }
            v
        }
    };

    Ok(PackageReference::Registry { name, version })
}

fn is_url_friendly(part: &str) -> bool {
    part.chars().all(|c| {
        c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '-' | '.' | '_' | '~')
    })
}

/// Check a package name against the registry rules for new packages
///
/// Returns the rule that was violated.
pub fn validate_package_name(name: &str) -> Result<(), &'static str> {
    if name.is_empty() {
        return Err("name length must be greater than zero");
    }
    if name.trim() != name {
        return Err("name cannot contain leading or trailing spaces");
    }
    if name.starts_with('.') {
        return Err("name cannot start with a period");
    }
    if name.starts_with('_') {
        return Err("name cannot start with an underscore");
    }
    if BLACKLISTED_NAMES.contains(&name.to_ascii_lowercase().as_str()) {
        return Err("name is blacklisted");
    }
    if name.len() > MAX_NAME_LENGTH {
        return Err("name can no longer contain more than 214 characters");
    }
    if name.chars().any(|c| c.is_ascii_uppercase()) {
        return Err("name can no longer contain capital letters");
    }

    let friendly = match name.strip_prefix('@') {
        Some(scoped) => match scoped.split_once('/') {
            Some((scope, pkg)) => {
                !scope.is_empty()
                    && !pkg.is_empty()
                    && is_url_friendly(scope)
                    && is_url_friendly(pkg)
                    && !pkg.starts_with('.')
                    && !pkg.starts_with('_')
            }
            None => false,
        },
        None => is_url_friendly(name),
    };

    if !friendly {
        return Err("name can only contain URL-friendly characters");
    }

    Ok(())
}
