use super::*;
use std::fs;

use git2::Repository;

use crate::commits::compact::read_json;
use crate::tree::FileEntry;

fn commit_file(repo: &Repository, who: (&str, &str), path: &str, content: &str, epoch: i64) {
    let sig = git2::Signature::new(who.0, who.1, &git2::Time::new(epoch, 0)).unwrap();
    let full_path = repo.workdir().unwrap().join(path);
    if let Some(parent) = full_path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&full_path, content).unwrap();

    let mut index = repo.index().unwrap();
    index.add_path(Path::new(path)).unwrap();
    index.write().unwrap();
    let tree = repo.find_tree(index.write_tree().unwrap()).unwrap();
    let parent = repo.head().ok().and_then(|h| h.peel_to_commit().ok());
    let parents: Vec<&git2::Commit> = parent.iter().collect();
    repo.commit(Some("HEAD"), &sig, &sig, "change", &tree, &parents)
        .unwrap();
}

fn sample_repo() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    let repo = Repository::init(dir.path()).unwrap();
    commit_file(&repo, ("Alice", "alice@x.com"), "src/a.rs", "a", 1_700_000_000);
    commit_file(&repo, ("Bob", "bob@x.com"), "src/b.rs", "b", 1_700_100_000);
    commit_file(&repo, ("Alice", "alice@home.org"), "docs/intro.md", "d", 1_700_200_000);
    dir
}

fn options() -> AnalyzeOptions {
    AnalyzeOptions {
        json: false,
        depth: 1,
        top: 3,
        merge_aliases: false,
        summaries: None,
    }
}

#[test]
fn focus_node_resolves_subdirectory() {
    let dir = sample_repo();
    let files = vec![FileEntry::new("src/a.rs", 1)];
    let tree = Tree::build("repo", &files);
    assert_eq!(focus_node(&tree, dir.path(), dir.path()), Some(ROOT));
    assert_eq!(
        focus_node(&tree, dir.path(), &dir.path().join("src")),
        tree.find("src")
    );
    assert_eq!(focus_node(&tree, dir.path(), &dir.path().join("missing")), None);
}

#[test]
fn run_table_and_json() {
    let dir = sample_repo();
    run(dir.path(), None, CliOverrides::default(), &options()).unwrap();

    let json = AnalyzeOptions {
        json: true,
        merge_aliases: true,
        ..options()
    };
    run(&dir.path().join("src"), None, CliOverrides::default(), &json).unwrap();
}

#[test]
fn run_writes_summaries() {
    let dir = sample_repo();
    let out = tempfile::tempdir().unwrap();
    let summaries_path = out.path().join("summaries.json");
    let opts = AnalyzeOptions {
        summaries: Some(summaries_path.clone()),
        ..options()
    };
    run(dir.path(), None, CliOverrides::default(), &opts).unwrap();

    let summaries = read_json(File::open(&summaries_path).unwrap()).unwrap();
    assert_eq!(summaries.len(), 3);
}

#[test]
fn run_outside_repo_fails() {
    let dir = tempfile::tempdir().unwrap();
    let err = run(dir.path(), None, CliOverrides::default(), &options()).unwrap_err();
    assert!(err.to_string().contains("not a git repository"));
}

#[test]
fn run_rejects_bad_config() {
    let dir = sample_repo();
    fs::write(dir.path().join(".busfactor.toml"), "unknown_key = 1\n").unwrap();
    assert!(run(dir.path(), None, CliOverrides::default(), &options()).is_err());
}
