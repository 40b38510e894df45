use super::*;

#[test]
fn default_snapshot() {
    let snapshot = ConfigSnapshot::default();
    assert!(!snapshot.use_reviewers);
    assert!(snapshot.weighted_authorship);
    assert!(snapshot.ignore_extensions.is_empty());
}

#[test]
fn parse_full_file() {
    let toml = r#"
        use_reviewers = true
        weighted_authorship = false
        ignore_extensions = ["md", ".lock"]
        exclude = ["vendor/**"]
        bots = ["ci-runner"]
        days_gap = 365
        aliases = [[
            { name = "Jane Doe", email = "jane@a.com" },
            { name = "J. Doe", email = "jd@b.org" },
        ]]
    "#;
    let file: FileConfig = toml::from_str(toml).unwrap();
    assert_eq!(file.use_reviewers, Some(true));
    assert_eq!(file.aliases.len(), 1);
    assert_eq!(file.aliases[0][1].email, "jd@b.org");

    let resolved = ResolvedConfig::resolve(file, CliOverrides::default()).unwrap();
    assert!(resolved.snapshot.use_reviewers);
    assert!(!resolved.snapshot.weighted_authorship);
    assert!(resolved.snapshot.ignore_extensions.contains("lock"));
    assert!(resolved.snapshot.ignore_extensions.contains("md"));
    assert_eq!(resolved.days_gap, 365);
    assert_eq!(resolved.bots, vec!["ci-runner".to_string()]);
    assert!(resolved.is_excluded("vendor/lib/a.c"));
    assert!(!resolved.is_excluded("src/a.c"));
}

#[test]
fn unknown_field_rejected() {
    let result: std::result::Result<FileConfig, _> = toml::from_str("colour = \"red\"");
    assert!(result.is_err());
}

#[test]
fn cli_overrides_file() {
    let file = FileConfig {
        weighted_authorship: Some(true),
        days_gap: Some(100),
        ignore_extensions: vec!["md".to_string()],
        ..FileConfig::default()
    };
    let cli = CliOverrides {
        raw_authorship: true,
        use_reviewers: true,
        ignore_extensions: vec!["txt".to_string()],
        days_gap: Some(30),
        ..CliOverrides::default()
    };
    let resolved = ResolvedConfig::resolve(file, cli).unwrap();
    assert!(!resolved.snapshot.weighted_authorship);
    assert!(resolved.snapshot.use_reviewers);
    assert_eq!(resolved.days_gap, 30);
    assert!(resolved.snapshot.ignore_extensions.contains("md"));
    assert!(resolved.snapshot.ignore_extensions.contains("txt"));
}

#[test]
fn non_positive_days_gap_rejected() {
    let cli = CliOverrides {
        days_gap: Some(0),
        ..CliOverrides::default()
    };
    let err = ResolvedConfig::resolve(FileConfig::default(), cli).unwrap_err();
    assert!(err.to_string().contains("days gap"));
}

#[test]
fn invalid_glob_rejected() {
    let cli = CliOverrides {
        exclude: vec!["a/[".to_string()],
        ..CliOverrides::default()
    };
    assert!(ResolvedConfig::resolve(FileConfig::default(), cli).is_err());
}

#[test]
fn discover_without_file_gives_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let file = FileConfig::discover(dir.path(), None).unwrap();
    assert!(file.use_reviewers.is_none());
    assert!(file.aliases.is_empty());
}

#[test]
fn discover_reads_default_file() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join(CONFIG_FILE_NAME), "use_reviewers = true\n").unwrap();
    let file = FileConfig::discover(dir.path(), None).unwrap();
    assert_eq!(file.use_reviewers, Some(true));
}

#[test]
fn load_rejects_empty_alias_group() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bf.toml");
    std::fs::write(&path, "aliases = [[]]\n").unwrap();
    assert!(FileConfig::load(&path).is_err());
}
