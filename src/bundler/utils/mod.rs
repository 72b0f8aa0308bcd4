//! Shared utilities for bundling operations.

pub mod fs;
