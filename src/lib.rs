pub mod analyzer;
pub mod boundary;
pub mod changelog;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod outputs;
pub mod release;
pub mod source;
pub mod ui;

pub use error::{ReleaseError, Result};
