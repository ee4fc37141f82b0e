//! Shared utilities for the Cohort workspace.
//!
//! Holds the build metadata used by both the dashboard client and the
//! service to label which deployment they belong to.

pub mod version_info;
