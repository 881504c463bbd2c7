//! # package-template-core
//!
//! Core crate for the package template plugin. Contains the write-once
//! configuration container, the settings schemas loaded at startup, and the
//! unified error system.
//!
//! This crate has **no** internal dependencies on other workspace crates.

pub mod config;
pub mod error;
pub mod result;

pub use config::container::ConfigContainer;
pub use error::AppError;
pub use result::AppResult;
