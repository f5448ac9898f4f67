//! Template trees: the embedded default or a directory on disk

use crate::error::MaterializeError;
use include_dir::{include_dir, Dir, DirEntry};
use std::borrow::Cow;
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

/// The library template shipped with the binary
pub static LIBRARY_TEMPLATE: Dir<'static> =
    include_dir!("$CARGO_MANIFEST_DIR/../../templates/library");

/// One file of a template tree
#[derive(Debug, Clone)]
pub struct TemplateFile {
    /// Path relative to the template root, `/`-separated
    pub path: String,
    pub contents: Cow<'static, [u8]>,
}

/// Where template files are read from
#[derive(Debug, Clone)]
pub enum TemplateSource {
    Embedded(&'static Dir<'static>),
    Local(PathBuf),
}

impl TemplateSource {
    /// The built-in library template
    pub fn embedded() -> Self {
        Self::Embedded(&LIBRARY_TEMPLATE)
    }

    /// A template tree in a local directory
    pub fn local(path: PathBuf) -> Self {
        Self::Local(path)
    }

    pub fn describe(&self) -> String {
        match self {
            TemplateSource::Embedded(_) => "built-in library template".to_string(),
            TemplateSource::Local(path) => path.display().to_string(),
        }
    }

    /// Every file in the tree, sorted by path. Directories are not listed.
    pub fn files(&self) -> Result<Vec<TemplateFile>, MaterializeError> {
        let mut files = match self {
            TemplateSource::Embedded(dir) => {
                let mut files = Vec::new();
                collect_embedded(dir, &mut files);
                files
            }
            TemplateSource::Local(root) => collect_local(root)?,
        };
        files.sort_by(|a, b| a.path.cmp(&b.path));
        Ok(files)
    }
}

/// Relative path with `/` separators regardless of platform
fn slash_path(path: &Path) -> String {
    path.components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

fn collect_embedded(dir: &'static Dir<'static>, files: &mut Vec<TemplateFile>) {
    for entry in dir.entries() {
        match entry {
            DirEntry::Dir(sub) => collect_embedded(sub, files),
            DirEntry::File(file) => files.push(TemplateFile {
                path: slash_path(file.path()),
                contents: Cow::Borrowed(file.contents()),
            }),
        }
    }
}

fn collect_local(root: &Path) -> Result<Vec<TemplateFile>, MaterializeError> {
    if !root.is_dir() {
        return Err(MaterializeError::SourceNotFound(root.to_path_buf()));
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(root).follow_links(true) {
        let entry = entry.map_err(|source| MaterializeError::Walk {
            root: root.to_path_buf(),
            source,
        })?;

        if !entry.file_type().is_file() {
            continue;
        }

        let relative = entry.path().strip_prefix(root).unwrap_or(entry.path());
        let contents = std::fs::read(entry.path()).map_err(|source| MaterializeError::Read {
            path: entry.path().to_path_buf(),
            source,
        })?;

        files.push(TemplateFile {
            path: slash_path(relative),
            contents: Cow::Owned(contents),
        });
    }

    Ok(files)
}
