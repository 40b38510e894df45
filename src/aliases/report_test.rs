use super::*;
use crate::config::FileConfig;

fn groups() -> Vec<Vec<UserInfo>> {
    vec![vec![
        UserInfo::new("Jane Doe", "jane@a.com"),
        UserInfo::new("J. Doe", "jd@b.org"),
    ]]
}

#[test]
fn toml_fragment_loads_as_config() {
    let text = to_toml(&groups()).unwrap();
    let config: FileConfig = toml::from_str(&text).unwrap();
    assert_eq!(config.aliases, groups());
}

#[test]
fn print_functions_do_not_panic() {
    print_report(&groups());
    print_report(&[]);
    print_json(&groups()).unwrap();
}
