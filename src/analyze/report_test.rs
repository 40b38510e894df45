use super::*;
use crate::authorship::UserStats;
use crate::selector::BusFactorStatus;
use crate::tree::{FileEntry, ROOT, UserVis};

fn sample_tree() -> Tree {
    let files = vec![
        FileEntry::new("src/a.rs", 2048),
        FileEntry::new("src/b.rs", 10),
    ];
    let mut tree = Tree::build("repo", &files);
    tree.aggregate(|paths| {
        let users = ["alice@x.com", "bob@x.com", "carol@x.com"]
            .iter()
            .enumerate()
            .map(|(i, email)| {
                let stats = UserStats {
                    authorship: 3.0 - i as f64,
                    normalized_authorship: (3.0 - i as f64) / 3.0,
                    ..UserStats::default()
                };
                UserVis::new(email, &stats)
            })
            .collect();
        (BusFactorStatus::BusFactor(paths.len() as u32), users)
    });
    tree
}

#[test]
fn labels_indent_by_depth() {
    let tree = sample_tree();
    let src = tree.node(tree.find("src").unwrap()).unwrap();
    assert_eq!(label(src, 0), "src");
    assert_eq!(label(src, 2), "    src");
    assert_eq!(label(tree.root(), 0), ".");
}

#[test]
fn contributors_limited_to_top() {
    let tree = sample_tree();
    let text = format_contributors(tree.root(), 2);
    assert_eq!(text, "alice@x.com (1.00), bob@x.com (0.67)");
    assert_eq!(format_contributors(tree.root(), 0), "");
}

#[test]
fn status_labels_for_rows() {
    let tree = sample_tree();
    assert_eq!(status_label(tree.root()), "2");
    let bare = Tree::build("repo", &vec![FileEntry::new("x.rs", 1)]);
    assert_eq!(status_label(bare.root()), "-");
}

#[test]
fn print_report_does_not_panic() {
    let tree = sample_tree();
    print_report(&tree, ROOT, 2, 3, NaiveDate::from_ymd_opt(2024, 6, 1));
    print_report(&tree, tree.find("src").unwrap(), 0, 1, None);
    print_report(&Tree::build("empty", &Vec::<FileEntry>::new()), ROOT, 1, 3, None);
}
