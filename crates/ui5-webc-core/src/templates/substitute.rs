//! `{{key}}` placeholder substitution in template text

use crate::config::Substitutions;
use regex::{Captures, Regex};
use std::borrow::Cow;
use std::sync::LazyLock;

static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\{\s*([A-Za-z_][A-Za-z0-9_]*)\s*\}\}").expect("placeholder pattern is valid")
});

/// Extensions copied byte-for-byte without substitution
const BINARY_EXTENSIONS: &[&str] = &[
    "png", "jpg", "jpeg", "gif", "ico", "webp", "bmp", "woff", "woff2", "ttf", "otf", "eot", "zip",
    "gz", "jar", "pdf",
];

/// Result of substituting one text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    pub text: String,
    /// Placeholder keys with no value, in order of appearance
    pub missing: Vec<String>,
}

/// Replace every `{{key}}` with its value; unknown keys become empty
pub fn substitute(text: &str, values: &Substitutions) -> Rendered {
    let mut missing = Vec::new();
    let replaced = PLACEHOLDER.replace_all(text, |caps: &Captures| {
        let key = &caps[1];
        match values.get(key) {
            Some(value) => value.to_string(),
            None => {
                missing.push(key.to_string());
                String::new()
            }
        }
    });

    Rendered {
        text: replaced.into_owned(),
        missing,
    }
}

/// Whether a template file must be copied verbatim
pub fn is_binary(path: &str, contents: &[u8]) -> bool {
    let extension = path
        .rsplit('/')
        .next()
        .and_then(|name| name.rsplit_once('.'))
        .map(|(_, ext)| ext.to_ascii_lowercase());

    if let Some(ext) = extension {
        if BINARY_EXTENSIONS.contains(&ext.as_str()) {
            return true;
        }
    }

    contents.contains(&0) || std::str::from_utf8(contents).is_err()
}

/// Output bytes for a template file
pub fn render_file<'a>(path: &str, contents: &'a [u8], values: &Substitutions) -> Cow<'a, [u8]> {
    if is_binary(path, contents) {
        tracing::debug!(%path, "copying binary file verbatim");
        return Cow::Borrowed(contents);
    }

    // is_binary rejected invalid UTF-8 above
    let text = String::from_utf8_lossy(contents);
    let rendered = substitute(&text, values);
    for key in &rendered.missing {
        tracing::warn!(%path, %key, "no value for placeholder, substituting empty text");
    }
    Cow::Owned(rendered.text.into_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(pairs: &[(&str, &str)]) -> Substitutions {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_substitute_known_keys() {
        let subs = values(&[("author", "Jane"), ("libURI", "demo/components")]);
        let rendered = substitute("// {{author}} - {{ libURI }}/{{libURI}}", &subs);
        assert_eq!(rendered.text, "// Jane - demo/components/demo/components");
        assert!(rendered.missing.is_empty());
    }

    #[test]
    fn test_unknown_key_becomes_empty() {
        let rendered = substitute("a{{nope}}b", &values(&[]));
        assert_eq!(rendered.text, "ab");
        assert_eq!(rendered.missing, vec!["nope".to_string()]);
    }

    #[test]
    fn test_non_placeholder_braces_untouched() {
        let subs = values(&[("x", "1")]);
        let text = "{ path: '{i18n>title}' } {{#each items}} {{ x.y }} {{}}";
        assert_eq!(substitute(text, &subs).text, text);
    }

    #[test]
    fn test_values_are_not_rescanned() {
        let subs = values(&[("a", "{{b}}"), ("b", "no")]);
        assert_eq!(substitute("{{a}}", &subs).text, "{{b}}");
    }

    #[test]
    fn test_binary_detection() {
        assert!(is_binary("img/logo.PNG", b"whatever"));
        assert!(is_binary("data.bin", &[0x00, 0x01]));
        assert!(is_binary("latin1.txt", &[0xff, 0xfe, 0x41]));
        assert!(!is_binary("src/library.js", b"sap.ui.define([], {});"));
        assert!(!is_binary(".gitignore", b"dist\n"));
    }

    #[test]
    fn test_render_file_binary_untouched() {
        let subs = values(&[("author", "Jane")]);
        let bytes: &[u8] = &[0x89, b'P', b'N', b'G', 0x00, b'{', b'{'];
        assert!(matches!(render_file("a.png", bytes, &subs), Cow::Borrowed(_)));
        assert_eq!(render_file("a.txt", b"{{author}}", &subs).as_ref(), b"Jane");
    }
}
