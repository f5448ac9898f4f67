//! Output path rules for template files

use crate::resolve::Namespace;

/// Marker in template file and directory names that stands for the library
/// path, e.g. `src/_library_/library.js`
pub const LIBRARY_TOKEN: &str = "_library_";

/// One transformation of a template-relative path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenameRule {
    /// Drop one leading `_` from the first path segment, so `_.gitignore`
    /// becomes `.gitignore`. Paths starting with `except_prefix` are kept.
    StripLeadingUnderscore { except_prefix: String },

    /// Replace every occurrence of `token`
    ReplaceToken { token: String, replacement: String },

    /// Drop one leading `_` from every segment after a separator; a segment
    /// that is a lone `_` disappears
    StripSegmentUnderscores,
}

/// A segment without its escaping underscore, `None` for a lone `_`
fn unescape_segment(segment: &str) -> Option<&str> {
    match segment.strip_prefix('_') {
        Some("") => None,
        Some(rest) => Some(rest),
        None => Some(segment),
    }
}

impl RenameRule {
    pub fn apply(&self, path: &str) -> String {
        match self {
            RenameRule::StripLeadingUnderscore { except_prefix } => {
                if !except_prefix.is_empty() && path.starts_with(except_prefix.as_str()) {
                    return path.to_string();
                }

                match path.split_once('/') {
                    Some((first, rest)) => match unescape_segment(first) {
                        Some(first) => format!("{}/{}", first, rest),
                        None => rest.to_string(),
                    },
                    // Never leave an empty file name
                    None => unescape_segment(path).unwrap_or(path).to_string(),
                }
            }
            RenameRule::ReplaceToken { token, replacement } => {
                path.replace(token.as_str(), replacement)
            }
            RenameRule::StripSegmentUnderscores => {
                let mut segments = path.split('/');
                let first = segments.next().unwrap_or_default();
                std::iter::once(first)
                    .chain(segments.filter_map(unescape_segment))
                    .collect::<Vec<_>>()
                    .join("/")
            }
        }
    }
}

/// Rules applied in order to every template path
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenameRules {
    rules: Vec<RenameRule>,
}

impl RenameRules {
    pub fn new(rules: Vec<RenameRule>) -> Self {
        Self { rules }
    }

    /// The standard rules for a library namespace
    pub fn for_library(namespace: &Namespace) -> Self {
        Self::new(vec![
            RenameRule::StripLeadingUnderscore {
                except_prefix: LIBRARY_TOKEN.to_string(),
            },
            RenameRule::ReplaceToken {
                token: LIBRARY_TOKEN.to_string(),
                replacement: namespace.path_form(),
            },
            RenameRule::StripSegmentUnderscores,
        ])
    }

    pub fn rules(&self) -> &[RenameRule] {
        &self.rules
    }

    pub fn apply(&self, path: &str) -> String {
        self.rules
            .iter()
            .fold(path.to_string(), |current, rule| rule.apply(&current))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolve::validate_namespace;

    fn strip() -> RenameRule {
        RenameRule::StripLeadingUnderscore {
            except_prefix: LIBRARY_TOKEN.to_string(),
        }
    }

    fn library_rules() -> RenameRules {
        RenameRules::for_library(&validate_namespace("demo.components").unwrap())
    }

    #[test]
    fn test_strip_leading_underscore() {
        assert_eq!(strip().apply("_gitignore"), "gitignore");
        assert_eq!(strip().apply("_.gitignore"), ".gitignore");
        assert_eq!(strip().apply("_dir/file.js"), "dir/file.js");
        assert_eq!(strip().apply("_/file.js"), "file.js");
        assert_eq!(strip().apply("file_.js"), "file_.js");
        assert_eq!(strip().apply("test/_.eslintrc"), "test/_.eslintrc");
    }

    #[test]
    fn test_strip_keeps_lone_underscore_and_token() {
        assert_eq!(strip().apply("_"), "_");
        assert_eq!(strip().apply("_library_.js"), "_library_.js");
        assert_eq!(strip().apply("_library_/index.js"), "_library_/index.js");

        let unprotected = RenameRule::StripLeadingUnderscore {
            except_prefix: String::new(),
        };
        assert_eq!(unprotected.apply("_library_.js"), "library_.js");
    }

    #[test]
    fn test_replace_token_every_occurrence() {
        let rule = RenameRule::ReplaceToken {
            token: LIBRARY_TOKEN.to_string(),
            replacement: "demo/components".to_string(),
        };
        assert_eq!(
            rule.apply("src/_library_/test/_library_/qunit.js"),
            "src/demo/components/test/demo/components/qunit.js"
        );
        assert_eq!(rule.apply("package.json"), "package.json");
    }

    #[test]
    fn test_strip_segment_underscores() {
        let rule = RenameRule::StripSegmentUnderscores;
        assert_eq!(rule.apply("src/_/thirdparty/x.js"), "src/thirdparty/x.js");
        assert_eq!(rule.apply("src/_vendor/x.js"), "src/vendor/x.js");
        assert_eq!(rule.apply("test/_.eslintrc"), "test/.eslintrc");
        assert_eq!(rule.apply("src/__x/y"), "src/_x/y");
        assert_eq!(rule.apply("_first/_/b"), "_first/b");
    }

    #[test]
    fn test_library_rules_in_order() {
        let rules = library_rules();
        assert_eq!(rules.rules().len(), 3);
        assert_eq!(rules.apply("_library_/index.js"), "demo/components/index.js");
        assert_eq!(rules.apply("_.gitignore"), ".gitignore");
        assert_eq!(rules.apply("_dir/_vendor/_.npmrc"), "dir/vendor/.npmrc");
        assert_eq!(
            rules.apply("src/_library_/thirdparty/_.gitkeep"),
            "src/demo/components/thirdparty/.gitkeep"
        );
        assert_eq!(
            rules.apply("src/_library_/_/_library_.properties"),
            "src/demo/components/demo/components.properties"
        );
        assert_eq!(rules.apply("README.md"), "README.md");
    }

    #[test]
    fn test_empty_rules_are_identity() {
        assert_eq!(RenameRules::default().apply("_x/_/y"), "_x/_/y");
    }
}
