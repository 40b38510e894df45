use super::*;

#[test]
fn touch_counts_files() {
    let mut entry = CompactEntry::new(BTreeSet::from([1, 2]), EntryKind::Commit);
    assert!(entry.is_empty());
    entry.touch(5);
    entry.touch(5);
    entry.touch(9);
    assert_eq!(entry.files.get(&5), Some(&2));
    assert_eq!(entry.files.get(&9), Some(&1));
    assert!(!entry.is_empty());
}

#[test]
fn json_shape() {
    let mut entry = CompactEntry::new(BTreeSet::from([3]), EntryKind::Review);
    entry.touch(1);
    let commit = CompactCommit {
        date: NaiveDate::from_ymd_opt(2024, 2, 29).unwrap(),
        entries: vec![entry],
    };
    let mut buf = Vec::new();
    write_json(&mut buf, std::slice::from_ref(&commit)).unwrap();
    let text = String::from_utf8(buf.clone()).unwrap();
    assert!(text.contains("\"2024-02-29\""));
    assert!(text.contains("\"REVIEW\""));

    let parsed = read_json(buf.as_slice()).unwrap();
    assert_eq!(parsed, vec![commit]);
}

#[test]
fn read_rejects_garbage() {
    assert!(read_json("{not json".as_bytes()).is_err());
}
