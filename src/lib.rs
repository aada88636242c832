//! contrib-readme - A generator for GitHub contribution READMEs
//!
//! This library authenticates against the GitHub GraphQL API, collects a user's
//! contribution history across every year since the account was created, and
//! renders it as a categorized Markdown document with optional per-repository
//! annotations.
//!
//! # Modules
//!
//! The library is organized into several key modules:
//!
//! * [`config`] - Application configuration management
//! * [`github`] - GraphQL query building and the GitHub API client
//! * [`contributions`] - Reduction of raw contribution payloads into repository sets
//! * [`readme`] - Markdown rendering and the end-to-end generation pipeline
//! * [`store`] - Persisted profile: username history, token, comments
//! * [`i18n`] - Translation catalog used for document headings and messages
//! * [`utils`] - Utility functions and helpers

/// Command-line interface definitions
pub mod cli;

/// Configuration module for managing application settings
pub mod config;

/// Application constants and default values
pub mod constants;

/// Repository models and contribution aggregation
pub mod contributions;

/// GitHub GraphQL API client and query builder
pub mod github;

/// Translation catalog and the `Translator` abstraction
pub mod i18n;

/// Logging setup for debugging and error tracking
pub mod logger;

/// README rendering and generation pipeline
pub mod readme;

/// Persisted user profile and repository annotations
pub mod store;

/// Utility functions for date/time handling and other helpers
pub mod utils;

pub use contributions::{RepositoryRef, RepositorySets};
pub use readme::{GenerationFailure, ReadmeGenerator, ReadmeOutcome};
