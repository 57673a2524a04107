//! Domain logic - pure business rules independent of git operations

pub mod category;
pub mod commit;
pub mod repository;
pub mod tag;
pub mod version;

pub use category::Category;
pub use commit::{CommitAuthor, CommitRecord};
pub use repository::RepoSlug;
pub use tag::{ReleaseTagSummary, TagPrefix};
pub use version::BumpType;
