//! Post-generation tooling
//!
//! This module provides git detection, the default author identity and
//! repository initialization for the generated library.

pub mod git;

pub use git::{default_author, init_repository};
