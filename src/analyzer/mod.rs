//! Version resolution against a release listing

pub mod version_resolver;

pub use version_resolver::{BumpOutcome, BumpRequest, VersionResolver};
