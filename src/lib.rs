//! # package-template
//!
//! Host-facing entry point of the package template plugin: the bootstrap
//! that wires the lifecycle controller to the host hooks.

pub mod bootstrap;

pub use bootstrap::{Bootstrapped, bootstrap};
