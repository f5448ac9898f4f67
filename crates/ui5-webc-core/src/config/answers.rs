//! Pre-filled answers for non-interactive runs

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Answers read from a YAML file; anything left out takes the prompt default
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Answers {
    /// Dotted library namespace
    #[serde(default, alias = "name")]
    pub namespace: Option<String>,

    #[serde(default)]
    pub framework: Option<String>,

    #[serde(default)]
    pub framework_version: Option<String>,

    /// Registry specifier or `../` path of the Web Components package
    #[serde(default)]
    pub web_components_package: Option<String>,

    #[serde(default)]
    pub author: Option<String>,

    /// Generate into a new directory named after the namespace
    #[serde(default)]
    pub newdir: Option<bool>,

    /// Initialize a git repository after generation
    #[serde(default)]
    pub initrepo: Option<bool>,
}

impl Answers {
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        serde_yaml::from_str(content).context("Failed to parse answers file")
    }

    pub fn from_yaml_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::from_yaml_str(&content)
            .with_context(|| format!("Invalid answers in {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_answers() {
        let answers = Answers::from_yaml_str(
            "namespace: my.lib\nframeworkVersion: \"1.120.0\"\nnewdir: false\n",
        )
        .unwrap();
        assert_eq!(answers.namespace.as_deref(), Some("my.lib"));
        assert_eq!(answers.framework_version.as_deref(), Some("1.120.0"));
        assert_eq!(answers.newdir, Some(false));
        assert_eq!(answers.framework, None);
        assert_eq!(answers.initrepo, None);
    }

    #[test]
    fn test_name_alias() {
        let answers = Answers::from_yaml_str("name: demo.components\n").unwrap();
        assert_eq!(answers.namespace.as_deref(), Some("demo.components"));
    }

    #[test]
    fn test_unknown_key_rejected() {
        assert!(Answers::from_yaml_str("namespce: typo.here\n").is_err());
    }

    #[test]
    fn test_empty_document() {
        assert_eq!(Answers::from_yaml_str("{}").unwrap(), Answers::default());
    }

    #[test]
    fn test_from_file() {
        let tmp = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(tmp.path(), "webComponentsPackage: \"@ui5/webcomponents@2.1.0\"\n").unwrap();
        let answers = Answers::from_yaml_file(tmp.path()).unwrap();
        assert_eq!(
            answers.web_components_package.as_deref(),
            Some("@ui5/webcomponents@2.1.0")
        );
    }
}
