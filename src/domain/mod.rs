//! Domain logic - pure versioning rules independent of git and the filesystem

pub mod version;

pub use version::{is_strict_semver, BumpGranularity, Version};
