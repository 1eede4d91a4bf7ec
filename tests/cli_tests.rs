//! 命令行退出码测试

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

const CONFIG: &str = r#"
[catalog]
# Nothing listens on port 9 (discard) in the test environment
base_url = "http://127.0.0.1:9"
token = "test-token"

[logging]
enable = false
"#;

fn config_home(name: &str) -> PathBuf {
    let home = std::env::temp_dir().join(format!("cinesearch-{}-{}", name, std::process::id()));
    for dir in [
        home.join("cinesearch"),
        home.join("Library/Application Support/cinesearch"),
    ] {
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("config.toml"), CONFIG).unwrap();
    }
    home
}

fn cs(home: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_cs"))
        .args(args)
        .env("HOME", home)
        .env("XDG_CONFIG_HOME", home)
        .env_remove("TMDB_TOKEN")
        .env_remove("GEMINI_API_KEY")
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

#[test]
fn test_json_search_error_exits_non_zero() {
    let home = config_home("json-error");

    let plain = cs(&home, &["Inception"]);
    let json = cs(&home, &["--json", "Inception"]);
    let _ = fs::remove_dir_all(&home);

    assert_eq!(plain.status.code(), Some(1));
    assert_eq!(json.status.code(), Some(1));

    let snapshot: serde_json::Value = serde_json::from_slice(&json.stdout).unwrap();
    assert!(snapshot["error"].as_str().is_some_and(|e| !e.is_empty()));
    assert_eq!(snapshot["loading"], false);
}

#[test]
fn test_json_short_query_exits_zero() {
    let home = config_home("json-short");

    let output = cs(&home, &["--json", "x"]);
    let _ = fs::remove_dir_all(&home);

    assert_eq!(output.status.code(), Some(0));
    let snapshot: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(snapshot["query"], "x");
    assert!(snapshot["error"].is_null());
}
