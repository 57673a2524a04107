use crate::error::Result;
use crate::source::{ReleasePage, ReleasePages, ReleaseSource};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Accepted shapes: pages as returned by `gh api --paginate --slurp`, or a single flat page
#[derive(Deserialize)]
#[serde(untagged)]
enum Listing {
    Pages(Vec<ReleasePage>),
    Flat(ReleasePage),
}

/// Release listing exported from the hosting API to a JSON file
///
/// The file is read anew on every listing so each pass sees the full history.
pub struct JsonReleaseFile {
    path: PathBuf,
}

impl JsonReleaseFile {
    pub fn new(path: impl AsRef<Path>) -> Self {
        JsonReleaseFile {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Parse a listing from its JSON text
    pub fn parse(content: &str) -> Result<Vec<ReleasePage>> {
        let pages = match serde_json::from_str::<Listing>(content)? {
            Listing::Pages(pages) => pages,
            Listing::Flat(page) => vec![page],
        };
        Ok(pages)
    }
}

impl ReleaseSource for JsonReleaseFile {
    fn list_releases(&self) -> Result<ReleasePages<'_>> {
        let content = fs::read_to_string(&self.path)?;
        Ok(ReleasePages::from_pages(Self::parse(&content)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_paginated_listing() {
        let json = r#"[
            [{"id": 1, "tag_name": "app@2.0.0", "draft": false, "prerelease": false, "name": "2.0.0"}],
            [{"id": 2, "tag_name": "app@1.0.0", "draft": false, "prerelease": false}]
        ]"#;
        let pages = JsonReleaseFile::parse(json).unwrap();
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[1][0].tag_name, "app@1.0.0");
    }

    #[test]
    fn test_parse_flat_listing() {
        let json = r#"[{"id": 1, "tag_name": "v1.0.0"}, {"id": 2, "tag_name": "v1.1.0", "draft": true}]"#;
        let pages = JsonReleaseFile::parse(json).unwrap();
        assert_eq!(pages.len(), 1);
        assert!(pages[0][1].draft);
    }

    #[test]
    fn test_parse_empty_listing() {
        let pages = JsonReleaseFile::parse("[]").unwrap();
        let releases: Vec<_> = pages.into_iter().flatten().collect();
        assert!(releases.is_empty());
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(JsonReleaseFile::parse(r#"{"tag_name": 1}"#).is_err());
    }

    #[test]
    fn test_list_releases_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(br#"[[{"id": 1, "tag_name": "v0.1.0"}], [{"id": 2, "tag_name": "v0.2.0"}]]"#)
            .unwrap();
        file.flush().unwrap();

        let source = JsonReleaseFile::new(file.path());
        let releases: Vec<_> = source
            .list_releases()
            .unwrap()
            .collect::<Result<Vec<_>>>()
            .unwrap()
            .into_iter()
            .flatten()
            .collect();
        assert_eq!(releases.len(), 2);
        assert_eq!(releases[1].tag_name, "v0.2.0");
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let source = JsonReleaseFile::new("/nonexistent/releases.json");
        let err = source.list_releases().err().unwrap();
        assert!(err.to_string().contains("I/O error"));
    }
}
