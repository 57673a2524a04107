//! User interface module.
//!
//! The release tool runs unattended in pipelines, so there are no prompts:
//! everything here is output formatting (see [formatter]).

pub mod formatter;

pub use formatter::{
    display_boundary_warning, display_changelog_summary, display_error,
    display_manual_push_instruction, display_proposed_tag, display_status, display_success,
};
