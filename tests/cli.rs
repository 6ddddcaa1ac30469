use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

fn docq_binary() -> PathBuf {
    let mut path = std::env::current_exe().unwrap();
    path.pop(); // remove test binary name
    path.pop(); // remove deps/
    path.push("docq");
    path
}

/// A config pointing at a port nothing listens on.
fn setup_test_env() -> (TempDir, PathBuf) {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path().to_path_buf();

    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };

    let files_dir = root.join("files");
    fs::create_dir_all(files_dir.join("archive")).unwrap();
    fs::write(
        files_dir.join("alpha.md"),
        "# Alpha Document\n\nNotes about the Rust rewrite.",
    )
    .unwrap();
    fs::write(files_dir.join("beta.txt"), "Beta plain text file.").unwrap();
    fs::write(files_dir.join("photo.png"), [0x89, b'P', b'N', b'G']).unwrap();
    fs::write(files_dir.join("archive").join("old.txt"), "old").unwrap();

    let config_content = format!(
        r#"[backend]
url = "http://127.0.0.1:{}/api/generate"
timeout_secs = 5

[documents]
text_extensions = ["txt", "md", "csv"]
"#,
        port
    );
    let config_path = root.join("docq.toml");
    fs::write(&config_path, config_content).unwrap();

    (tmp, config_path)
}

fn run_docq(config_path: &Path, args: &[&str]) -> (String, String, bool) {
    let binary = docq_binary();
    let output = Command::new(&binary)
        .arg("--config")
        .arg(config_path.to_str().unwrap())
        .args(args)
        .output()
        .unwrap_or_else(|e| panic!("Failed to run docq binary at {:?}: {}", binary, e));

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    (stdout, stderr, output.status.success())
}

#[test]
fn test_scan_counts_top_level_supported_files() {
    let (tmp, config_path) = setup_test_env();
    let files = tmp.path().join("files");

    let (stdout, stderr, success) = run_docq(&config_path, &["scan", files.to_str().unwrap()]);
    assert!(success, "scan failed: stdout={}, stderr={}", stdout, stderr);
    assert!(stdout.contains("documents: 2"), "got: {}", stdout);
    assert!(stdout.contains("# Alpha Document") || stdout.contains("Beta plain text"));
    assert!(!stdout.contains("old"));
}

#[test]
fn test_scan_missing_folder_fails() {
    let (tmp, config_path) = setup_test_env();
    let missing = tmp.path().join("nope");

    let (_, stderr, success) = run_docq(&config_path, &["scan", missing.to_str().unwrap()]);
    assert!(!success);
    assert!(stderr.contains("does not exist"), "got: {}", stderr);
}

#[test]
fn test_check_unreachable_backend() {
    let (_tmp, config_path) = setup_test_env();

    let (stdout, _, success) = run_docq(&config_path, &["check"]);
    assert!(!success);
    assert!(stdout.contains("unavailable"), "got: {}", stdout);
}

#[test]
fn test_ask_unreachable_backend_prints_message() {
    let (tmp, config_path) = setup_test_env();
    let files = tmp.path().join("files");

    let (stdout, stderr, success) = run_docq(
        &config_path,
        &["ask", files.to_str().unwrap(), "What is alpha about?"],
    );
    assert!(success, "ask failed: stdout={}, stderr={}", stdout, stderr);
    assert!(
        stdout.contains("API connection verification failed. Please check the API status."),
        "got: {}",
        stdout
    );
}

#[test]
fn test_invalid_config_is_rejected() {
    let tmp = TempDir::new().unwrap();
    let config_path = tmp.path().join("docq.toml");
    fs::write(&config_path, "[backend]\nurl = \"ftp://nowhere\"\n").unwrap();

    let (_, stderr, success) = run_docq(&config_path, &["check"]);
    assert!(!success);
    assert!(stderr.contains("backend.url"), "got: {}", stderr);
}
