//! UI5 Web Components library scaffolder - shared core
//!
//! This library turns a handful of answers into a new UI5 library project that
//! wraps a Web Components package. It is used by the `create-ui5-webc-lib`
//! binary and can drive custom front-ends as well.
//!
//! # Architecture
//!
//! - **Input resolution** ([`resolve`]) - validators for every answer and the
//!   [`resolve::Resolver`] pipeline producing a typed [`LibraryConfig`]
//! - **Configuration** ([`config`]) - the derived substitution mapping, the
//!   persisted config store and answers files
//! - **Materialization** ([`templates`]) - rename rules, placeholder
//!   substitution and the copier that writes the output tree
//! - **CLI/TUI** ([`tui`]) - optional cliclack prompts (feature-gated)
//!
//! # Feature Flags
//!
//! - `tui` (default): Enables the cliclack-based TUI prompts module
//!
//! # Example Usage (without TUI)
//!
//! ```ignore
//! use ui5_webc_core::config::Answers;
//! use ui5_webc_core::resolve::{OfflineLookup, Resolver};
//! use ui5_webc_core::templates::{generate_library, TemplateSource};
//!
//! let resolver = Resolver::new(&OfflineLookup, "/work", "Jane Doe");
//! let library = resolver.resolve(&Answers::default()).await?;
//! generate_library(&TemplateSource::embedded(), &library).await?;
//! ```

pub mod config;
pub mod error;
pub mod product;
pub mod resolve;
pub mod runtime;
pub mod templates;

#[cfg(feature = "tui")]
pub mod tui;

// Re-export main types for convenience
pub use config::{Answers, ConfigStore, LibraryConfig, Substitutions};
pub use error::{LookupError, MaterializeError, StoreError, ValidationError};
pub use product::ProductConfig;
pub use resolve::{Framework, Namespace, PackageReference, Resolver};
pub use templates::{generate_library, materialize, RenameRules, TemplateSource};

#[cfg(feature = "tui")]
pub use tui::run;
