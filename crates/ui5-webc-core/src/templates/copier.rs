//! Writing a template tree into the destination directory

use super::rename::RenameRules;
use super::source::TemplateSource;
use super::substitute::render_file;
use crate::config::Substitutions;
use crate::error::MaterializeError;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Copy every template file into `target_dir`, renaming paths and
/// substituting placeholders
///
/// Existing files are overwritten. Files are written one by one, so an error
/// leaves the files written so far in place. Returns the written paths.
pub async fn materialize(
    source: &TemplateSource,
    target_dir: &Path,
    rules: &RenameRules,
    values: &Substitutions,
) -> Result<Vec<PathBuf>, MaterializeError> {
    fs::create_dir_all(target_dir)
        .await
        .map_err(|source| MaterializeError::CreateDir {
            path: target_dir.to_path_buf(),
            source,
        })?;

    let mut written = Vec::new();

    for file in source.files()? {
        let output = rules.apply(&file.path);
        if output.is_empty() {
            tracing::warn!(template = %file.path, "renaming produced an empty path, skipping");
            continue;
        }

        // Ensure parent directories exist
        let target_path = target_dir.join(&output);
        if let Some(parent) = target_path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|source| MaterializeError::CreateDir {
                    path: parent.to_path_buf(),
                    source,
                })?;
        }

        let content = render_file(&file.path, &file.contents, values);
        fs::write(&target_path, content.as_ref())
            .await
            .map_err(|source| MaterializeError::Write {
                path: target_path.clone(),
                source,
            })?;

        tracing::debug!(template = %file.path, output = %target_path.display(), "wrote file");
        written.push(target_path);
    }

    Ok(written)
}
