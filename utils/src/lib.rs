//! Shared utilities for the Steward workspace.

pub mod version_info;
