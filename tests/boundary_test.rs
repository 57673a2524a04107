use git_release::boundary::BoundaryWarning;

// ============================================================================
// BoundaryWarning Display Tests
// ============================================================================

#[test]
fn test_boundary_warning_no_new_commits_display() {
    let warning = BoundaryWarning::NoNewCommits {
        base_tag: "v1.0.0".to_string(),
        head: "HEAD".to_string(),
    };

    let display_msg = warning.to_string();
    assert!(
        display_msg.contains("No new commits"),
        "Message should contain 'No new commits', got: {}",
        display_msg
    );
    assert!(
        display_msg.contains("v1.0.0"),
        "Message should contain tag 'v1.0.0', got: {}",
        display_msg
    );
    assert!(
        display_msg.contains("HEAD"),
        "Message should contain the head reference, got: {}",
        display_msg
    );
}

#[test]
fn test_boundary_warning_no_released_version_display() {
    let warning = BoundaryWarning::NoReleasedVersion {
        prefix: "my-app@".to_string(),
    };

    let display_msg = warning.to_string();
    assert!(
        display_msg.contains("my-app@0.0.0"),
        "Message should name the starting tag, got: {}",
        display_msg
    );
}

#[test]
fn test_boundary_warning_no_released_version_without_prefix() {
    let warning = BoundaryWarning::NoReleasedVersion {
        prefix: String::new(),
    };

    assert_eq!(
        warning.to_string(),
        "No released version found, starting from 0.0.0"
    );
}

#[test]
fn test_boundary_warning_empty_changelog_display() {
    let warning = BoundaryWarning::EmptyChangelog { commits: 3 };

    let display_msg = warning.to_string();
    assert!(
        display_msg.contains("3 commits"),
        "Message should contain the commit count, got: {}",
        display_msg
    );
}
