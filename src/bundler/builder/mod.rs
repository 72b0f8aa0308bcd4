//! Build orchestration and coordination.
//!
//! The [`Orchestrator`] walks the static target set, delegating to the
//! platform modules for buildable targets and to the placeholder generator
//! for the rest, and records one [`BuildResult`] per target.
//!
//! # Module Organization
//!
//! - [`checksum`] - SHA-256 checksum calculation for artifacts
//! - [`orchestrator`] - Main [`Orchestrator`] struct and the per-target loop
//! - [`result`] - [`BuildResult`] and [`BuildReport`]
//! - [`signing`] - Code signing from environment credentials
//! - [`tool_detection`] - External tool discovery and version probing

pub mod checksum;
mod orchestrator;
mod result;
pub mod signing;
pub mod tool_detection;

pub use orchestrator::Orchestrator;
pub use result::{BuildReport, BuildResult};
