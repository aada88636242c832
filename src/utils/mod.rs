//! Utility modules for the contrib-readme application.
//!
//! This module contains common utility functions and helpers that are used
//! throughout the application.
//!
//! # Available Utilities
//!
//! - [`datetime`] - Timestamp parsing and per-year contribution windows

pub mod datetime;
