use super::*;

#[test]
fn diff_entry_path_by_change_type() {
    assert_eq!(DiffEntry::deleted("a.rs").path(), "a.rs");
    assert_eq!(DiffEntry::renamed("a.rs", "b.rs").path(), "b.rs");
    let delete = DiffEntry::new("old.rs", "/dev/null", ChangeType::Delete);
    assert_eq!(delete.path(), "old.rs");
}

#[test]
fn merge_detection() {
    let mut commit = CommitInfo::default();
    assert!(!commit.is_merge());
    commit.parent_count = 2;
    assert!(commit.is_merge());
}

#[test]
fn change_type_serializes_uppercase() {
    let json = serde_json::to_string(&DiffEntry::renamed("a", "b")).unwrap();
    assert!(json.contains("\"RENAME\""));
}
