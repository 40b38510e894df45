use super::*;

fn sample() -> Tree {
    let files = vec![
        FileEntry::new("src/main.rs", 100),
        FileEntry::new("src/lib/a.rs", 20),
        FileEntry::new("src/lib/b.rs", 30),
        FileEntry::new("README.md", 5),
    ];
    Tree::build("repo", &files)
}

#[test]
fn build_accumulates_sizes() {
    let tree = sample();
    assert_eq!(tree.root().name, "repo");
    assert_eq!(tree.root().path, ".");
    assert_eq!(tree.root().bytes, 155);
    let src = tree.node(tree.find("src").unwrap()).unwrap();
    assert_eq!(src.bytes, 150);
    assert!(!src.is_file);
    let lib = tree.node(tree.find("src/lib").unwrap()).unwrap();
    assert_eq!(lib.bytes, 50);
    assert_eq!(lib.children.len(), 2);
    let a = tree.node(tree.find("src/lib/a.rs").unwrap()).unwrap();
    assert!(a.is_file);
    assert_eq!(a.name, "a.rs");
    assert_eq!(a.bytes, 20);
}

#[test]
fn duplicate_paths_counted_once() {
    let files = vec![FileEntry::new("a.rs", 10), FileEntry::new("a.rs", 10)];
    let tree = Tree::build("repo", &files);
    assert_eq!(tree.root().bytes, 10);
    assert_eq!(tree.len(), 2);
}

#[test]
fn find_root_and_missing() {
    let tree = sample();
    assert_eq!(tree.find("."), Some(ROOT));
    assert_eq!(tree.find(""), Some(ROOT));
    assert_eq!(tree.find("src/"), tree.find("src"));
    assert_eq!(tree.find("nope"), None);
}

#[test]
fn file_paths_collects_leaves() {
    let tree = sample();
    let mut paths = tree.file_paths(tree.find("src").unwrap());
    paths.sort();
    assert_eq!(paths, vec!["src/lib/a.rs", "src/lib/b.rs", "src/main.rs"]);
    assert_eq!(tree.file_paths(ROOT).len(), 4);
    let leaf = tree.find("README.md").unwrap();
    assert_eq!(tree.file_paths(leaf), vec!["README.md"]);
}

#[test]
fn empty_listing() {
    let tree = Tree::build("repo", &Vec::<FileEntry>::new());
    assert!(tree.is_empty());
    assert!(tree.file_paths(ROOT).is_empty());
}

#[test]
fn descendants_respects_depth() {
    let tree = sample();
    let top: Vec<String> = tree
        .descendants(ROOT, 1)
        .into_iter()
        .map(|(id, _)| tree.node(id).unwrap().path.clone())
        .collect();
    assert_eq!(top, vec![".", "src", "README.md"]);
    assert_eq!(tree.descendants(ROOT, 10).len(), tree.len());
}

#[test]
fn aggregate_visits_every_node() {
    let mut tree = sample();
    tree.aggregate(|paths| (BusFactorStatus::BusFactor(paths.len() as u32), Vec::new()));
    for (id, _) in tree.descendants(ROOT, usize::MAX) {
        let node = tree.node(id).unwrap();
        let expected = tree.file_paths(id).len() as u32;
        assert_eq!(node.status, Some(BusFactorStatus::BusFactor(expected)));
    }
}

#[test]
fn user_vis_orders_ranked_first() {
    let mut stats = BTreeMap::new();
    for (id, authorship) in [(0, 1.0), (1, 4.123456), (2, 2.0)] {
        stats.insert(
            id,
            UserStats {
                authorship,
                normalized_authorship: authorship / 4.123456,
                ..UserStats::default()
            },
        );
    }
    let emails = ["a@x.com", "b@x.com", "c@x.com"];
    let users = UserVis::convert(&[1, 7], &stats, |id| emails.get(id as usize).copied());
    let order: Vec<&str> = users.iter().map(|u| u.email.as_str()).collect();
    assert_eq!(order, vec!["b@x.com", "a@x.com", "c@x.com"]);
    assert_eq!(users[0].authorship, 4.1235);
    assert_eq!(users[0].normalized_authorship, 1.0);
}

#[test]
fn serializes_nested_json() {
    let mut tree = sample();
    tree.aggregate(|_| (BusFactorStatus::Old, Vec::new()));
    let value = serde_json::to_value(&tree).unwrap();
    assert_eq!(value["name"], "repo");
    assert_eq!(value["bus_factor_status"], "old");
    assert_eq!(value["children"][0]["path"], "src");
    assert_eq!(value["children"][0]["children"][1]["children"][0]["path"], "src/lib/a.rs");

    let lib = tree.find("src/lib").unwrap();
    let sub = serde_json::to_value(tree.view(lib)).unwrap();
    assert_eq!(sub["bytes"], 50);
}
