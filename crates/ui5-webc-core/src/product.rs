//! Product configuration trait for CLI binaries
//!
//! This trait defines the identity and wording a binary supplies to the
//! shared generator flow.

use crate::config::LibraryConfig;

/// Configuration trait for generator binaries
///
/// Each binary implements this trait to define:
/// - Product identity (name, display name, welcome banner)
/// - Registry URL and its environment override
/// - Where the answers are persisted in the generated project
/// - Git commit message and post-setup instructions
pub trait ProductConfig: Clone + Send + Sync + 'static {
    /// Internal product name (used for CLI command, env vars)
    fn name(&self) -> &'static str;

    /// Human-readable display name
    fn display_name(&self) -> &'static str;

    /// Banner shown before the first prompt unless running embedded
    fn welcome(&self) -> &'static str;

    /// Default npm registry used for version lookups
    fn default_registry_url(&self) -> &'static str {
        "https://registry.npmjs.org/"
    }

    /// Environment variable name for overriding the registry URL
    fn registry_url_env(&self) -> &'static str;

    /// File name of the persisted configuration inside the generated project
    fn store_file_name(&self) -> &'static str;

    /// Message of the initial commit
    fn commit_message(&self) -> &'static str;

    /// Generate the "next steps" instructions after project creation
    fn next_steps(&self, config: &LibraryConfig) -> Vec<String>;

    /// User agent string for HTTP requests
    fn user_agent(&self) -> &'static str {
        self.name()
    }
}
