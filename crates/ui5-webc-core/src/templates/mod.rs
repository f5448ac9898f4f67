//! Template materialization
//!
//! This module provides:
//! - Template sources (embedded default tree, local directories)
//! - Ordered path rename rules
//! - `{{key}}` placeholder substitution
//! - The copier that writes the output tree

pub mod copier;
pub mod rename;
pub mod source;
pub mod substitute;

use crate::config::LibraryConfig;
use crate::error::MaterializeError;
use std::path::PathBuf;

pub use copier::materialize;
pub use rename::{RenameRule, RenameRules, LIBRARY_TOKEN};
pub use source::{TemplateFile, TemplateSource};
pub use substitute::{substitute, Rendered};

/// Materialize `source` for a resolved library into its destination
pub async fn generate_library(
    source: &TemplateSource,
    config: &LibraryConfig,
) -> Result<Vec<PathBuf>, MaterializeError> {
    let rules = RenameRules::for_library(&config.namespace);
    let values = config.substitutions();
    materialize(source, &config.destination, &rules, &values).await
}
