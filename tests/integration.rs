use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

fn catalog_binary() -> PathBuf {
    let mut path = std::env::current_exe().unwrap();
    path.pop(); // remove test binary name
    path.pop(); // remove deps/
    path.push("catalog");
    path
}

fn setup_test_env(backend: &str) -> (TempDir, PathBuf) {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path().to_path_buf();

    let config_dir = root.join("config");
    fs::create_dir_all(&config_dir).unwrap();

    fs::write(root.join("pen.jpg"), b"\xff\xd8\xffpen image bytes").unwrap();

    let config_content = format!(
        r#"[storage]
backend = "{backend}"
items_path = "{root}/db/items.json"

[db]
path = "{root}/db/items.sqlite3"

[images]
dir = "{root}/images"
"#,
        backend = backend,
        root = root.display(),
    );

    let config_path = config_dir.join("catalog.toml");
    fs::write(&config_path, config_content).unwrap();

    (tmp, config_path)
}

fn run_catalog(config_path: &Path, args: &[&str]) -> (String, String, bool) {
    let binary = catalog_binary();
    let output = Command::new(&binary)
        .arg("--config")
        .arg(config_path.to_str().unwrap())
        .args(args)
        .env_remove("FRONT_URL")
        .output()
        .unwrap_or_else(|e| panic!("Failed to run catalog binary at {:?}: {}", binary, e));

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let success = output.status.success();
    (stdout, stderr, success)
}

fn item_names(stdout: &str) -> Vec<String> {
    let value: serde_json::Value = serde_json::from_str(stdout)
        .unwrap_or_else(|e| panic!("stdout is not JSON ({}): {}", e, stdout));
    value["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["name"].as_str().unwrap().to_string())
        .collect()
}

#[test]
fn test_init_idempotent() {
    for backend in ["json", "sqlite"] {
        let (_tmp, config_path) = setup_test_env(backend);

        let (stdout, stderr, success) = run_catalog(&config_path, &["init"]);
        assert!(success, "init failed: stdout={}, stderr={}", stdout, stderr);
        assert!(stdout.contains("initialized"));

        let (_, _, success) = run_catalog(&config_path, &["init"]);
        assert!(success, "second init failed for {}", backend);
    }
}

#[test]
fn test_list_without_init_fails() {
    for backend in ["json", "sqlite"] {
        let (_tmp, config_path) = setup_test_env(backend);
        let (_, stderr, success) = run_catalog(&config_path, &["list"]);
        assert!(!success, "list should fail before init ({})", backend);
        assert!(stderr.contains("storage unavailable"), "stderr: {}", stderr);
    }
}

#[test]
fn test_add_list_search_get() {
    for backend in ["json", "sqlite"] {
        let (tmp, config_path) = setup_test_env(backend);
        run_catalog(&config_path, &["init"]);

        let image = tmp.path().join("pen.jpg");
        let (stdout, stderr, success) = run_catalog(
            &config_path,
            &[
                "add",
                "--name",
                "pen",
                "--category",
                "office",
                "--image",
                image.to_str().unwrap(),
            ],
        );
        assert!(success, "add failed: {}", stderr);
        assert_eq!(item_names(&stdout), vec!["pen"]);

        run_catalog(
            &config_path,
            &["add", "--name", "jacket", "--category", "fashion", "--id", "42"],
        );

        let (stdout, _, success) = run_catalog(&config_path, &["list"]);
        assert!(success);
        assert_eq!(item_names(&stdout), vec!["pen", "jacket"]);

        let (stdout, _, _) = run_catalog(&config_path, &["search", "pe"]);
        assert_eq!(item_names(&stdout), vec!["pen"]);

        let (stdout, _, _) = run_catalog(&config_path, &["search", "xyz"]);
        assert!(item_names(&stdout).is_empty());

        let (stdout, _, success) = run_catalog(&config_path, &["get", "42"]);
        assert!(success);
        let item: serde_json::Value = serde_json::from_str(&stdout).unwrap();
        assert_eq!(item["name"], "jacket");

        let (_, stderr, success) = run_catalog(&config_path, &["get", "7"]);
        assert!(!success);
        assert!(stderr.contains("not found"));
    }
}

#[test]
fn test_same_image_stored_once() {
    let (tmp, config_path) = setup_test_env("json");
    run_catalog(&config_path, &["init"]);

    let image = tmp.path().join("pen.jpg");
    for name in ["pen", "another pen"] {
        let (_, stderr, success) = run_catalog(
            &config_path,
            &[
                "add",
                "--name",
                name,
                "--category",
                "office",
                "--image",
                image.to_str().unwrap(),
            ],
        );
        assert!(success, "add failed: {}", stderr);
    }

    let (stdout, _, _) = run_catalog(&config_path, &["list"]);
    let value: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let images: Vec<&str> = value["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["image"].as_str().unwrap())
        .collect();
    assert_eq!(images.len(), 2);
    assert_eq!(images[0], images[1]);
    assert!(images[0].ends_with(".jpg"));

    let stored = fs::read_dir(tmp.path().join("images")).unwrap().count();
    assert_eq!(stored, 1);
}
