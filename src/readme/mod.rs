//! Contributions README rendering and generation.
//!
//! [`ReadmeRenderer`] is a pure Markdown formatter; [`ReadmeGenerator`] wires it
//! to a [`ContributionSource`](crate::github::ContributionSource) and reports
//! the result as a [`ReadmeOutcome`].

pub mod generator;
pub mod renderer;

pub use generator::{GenerationFailure, ReadmeGenerator, ReadmeOutcome};
pub use renderer::ReadmeRenderer;
