#![allow(clippy::unwrap_used)]

use std::path::{Path, PathBuf};

use super::*;

fn args(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_defaults_under_root() {
    let config = Config::rooted_at(Path::new("/opt/tracker"));
    assert_eq!(config.db_path, PathBuf::from("/opt/tracker/data/expenses.db"));
    assert_eq!(config.log_path, PathBuf::from("/opt/tracker/app.log"));
}

#[test]
fn test_no_flags_keeps_args() {
    let input = args(&["expense-tracker", "summary"]);
    let (config, rest) = Config::from_args(&input, Path::new("/root")).unwrap();
    assert_eq!(config, Config::rooted_at(Path::new("/root")));
    assert_eq!(rest, input);
}

#[test]
fn test_db_flag_overrides_path() {
    let input = args(&["expense-tracker", "--db", "/tmp/mine.db", "list"]);
    let (config, rest) = Config::from_args(&input, Path::new("/root")).unwrap();
    assert_eq!(config.db_path, PathBuf::from("/tmp/mine.db"));
    assert_eq!(config.log_path, PathBuf::from("/root/app.log"));
    assert_eq!(rest, args(&["expense-tracker", "list"]));
}

#[test]
fn test_flags_anywhere() {
    let input = args(&[
        "expense-tracker",
        "add",
        "12.50",
        "--log",
        "/var/log/x.log",
        "Food",
        "--db",
        "e.db",
    ]);
    let (config, rest) = Config::from_args(&input, Path::new("/root")).unwrap();
    assert_eq!(config.db_path, PathBuf::from("e.db"));
    assert_eq!(config.log_path, PathBuf::from("/var/log/x.log"));
    assert_eq!(rest, args(&["expense-tracker", "add", "12.50", "Food"]));
}

#[test]
fn test_flag_without_value_is_error() {
    let input = args(&["expense-tracker", "--db"]);
    assert!(Config::from_args(&input, Path::new("/root")).is_err());

    let input = args(&["expense-tracker", "list", "--log"]);
    assert!(Config::from_args(&input, Path::new("/root")).is_err());
}

#[test]
fn test_install_root_is_a_directory_path() {
    let root = install_root();
    assert!(!root.as_os_str().is_empty());
}
