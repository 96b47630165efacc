//! CLI integration tests for Jalno.
//!
//! These tests drive the `jalno` binary against temporary composer projects.

use std::fs;
use std::path::Path;
use std::process::Command;

use assert_cmd::prelude::*;
use predicates::prelude::*;
use tempfile::TempDir;

/// Get the jalno binary command, isolated from the user's environment.
fn jalno(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("jalno").unwrap();
    cmd.env("HOME", home)
        .env_remove("ASSET_URL")
        .env_remove("JALNO_ROOT");
    cmd
}

/// Create a temporary directory for test projects.
fn temp_dir() -> TempDir {
    TempDir::new().unwrap()
}

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

/// A project whose root package `acme/site` has one frontend of theme
/// `default`, plus one installed package `jalno/base` with a frontend of the
/// same theme.
fn create_project(root: &Path) {
    write(
        root,
        "composer.json",
        r#"{"name": "acme/site", "extra": {"jalno": {"manifest": "package.json"}}}"#,
    );
    write(root, "package.json", r#"{"frontend": ["frontend"]}"#);
    write(
        root,
        "frontend/jalno.json",
        r#"{"name": "default", "assets": [
            {"type": "css", "file": "a.css"},
            {"type": "js", "file": "a.js"},
            {"type": "js", "file": "node_modules/jquery/dist/jquery.js"}
        ]}"#,
    );
    write(root, "frontend/langs/fa.json", r#"{"hello": "salam"}"#);

    write(
        root,
        "vendor/composer/installed.json",
        r#"{"packages": [
            {"name": "jalno/base", "extra": {"jalno": {"manifest": "package.json"}}},
            {"name": "other/library"}
        ]}"#,
    );
    write(root, "vendor/jalno/base/package.json", r#"{"frontend": "frontend"}"#);
    write(
        root,
        "vendor/jalno/base/frontend/jalno.json",
        r#"{"name": "default", "assets": [
            {"type": "js", "file": "node_modules/jquery/dist/jquery.js"}
        ]}"#,
    );
    write(
        root,
        "vendor/jalno/base/langs/fa.json",
        r#"{"rtl": true, "phrases": {"bye": "khodahafez"}}"#,
    );
}

// ============================================================================
// jalno generate
// ============================================================================

#[test]
fn test_generate_writes_theme_and_translation_files() {
    let tmp = temp_dir();
    create_project(tmp.path());

    jalno(tmp.path())
        .args(["generate"])
        .current_dir(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("resources/css/default.css"))
        .stdout(predicate::str::contains("resources/js/default.js"))
        .stdout(predicate::str::contains("resources/js/langs/fa.js"));

    let css = fs::read_to_string(tmp.path().join("resources/css/default.css")).unwrap();
    assert_eq!(css.matches("@import").count(), 1);
    assert!(css.contains("@import \"jalno-site-frontend/a.css\";"));
    assert!(css.contains("START FRONTEND 'jalno-base-frontend'"));
    assert!(css.contains("/* // EMPTY */"));

    let js = fs::read_to_string(tmp.path().join("resources/js/default.js")).unwrap();
    assert!(js.contains("window.jalno = window.jalno || {};"));
    assert!(js.contains("    import \"jalno-site-frontend/a.js\";"));
    assert!(js.contains("    import \"jquery/dist/jquery.js\";"));
    assert!(js.contains("    /* DUPLICATE: import \"jquery/dist/jquery.js\"; */"));

    let fa = fs::read_to_string(tmp.path().join("resources/js/langs/fa.js")).unwrap();
    assert_eq!(fa.matches(".push(").count(), 2);
    assert!(fa.contains("\"source\":\"jalno-site-frontend-frontend\""));
    assert!(fa.contains("\"source\":\"base-package\""));
}

#[test]
fn test_generate_with_root_flag_and_overrides() {
    let tmp = temp_dir();
    create_project(tmp.path());

    jalno(tmp.path())
        .args([
            "--root",
            tmp.path().to_str().unwrap(),
            "generate",
            "--styles-dir",
            "assets/styles",
            "--style-extension",
            "scss",
            "--translation-file-name",
            "lang-[code].js",
        ])
        .assert()
        .success();

    assert!(tmp.path().join("assets/styles/default.scss").exists());
    assert!(tmp.path().join("resources/js/langs/lang-fa.js").exists());
}

#[test]
fn test_generate_json_bundler_input() {
    let tmp = temp_dir();
    create_project(tmp.path());

    let output = jalno(tmp.path())
        .args(["generate", "--json", "--input", "resources/js/app.js", "--mode", "serve"])
        .current_dir(tmp.path())
        .output()
        .unwrap();
    assert!(output.status.success());

    let input: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(input["input"][0], "resources/js/app.js");
    assert_eq!(input["input"][1], "resources/css/default.css");
    assert_eq!(input["outDir"], "public/build");
    assert_eq!(input["manifest"], "manifest.json");
    assert_eq!(input["base"], "/");
    assert_eq!(input["aliases"].as_array().unwrap().len(), 4);
}

#[test]
fn test_generate_uses_project_config() {
    let tmp = temp_dir();
    create_project(tmp.path());
    write(
        tmp.path(),
        ".jalno/config.toml",
        "[paths]\nscripts_directory = \"static/js\"\n\n[bundler]\nasset_url = \"https://cdn.example.com\"\n",
    );

    let output = jalno(tmp.path())
        .args(["generate", "--json"])
        .current_dir(tmp.path())
        .output()
        .unwrap();
    assert!(output.status.success());

    let input: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(input["base"], "https://cdn.example.com/build/");
    assert!(tmp.path().join("static/js/default.js").exists());
}

#[test]
fn test_generate_fails_on_broken_project_config() {
    let tmp = temp_dir();
    create_project(tmp.path());
    write(
        tmp.path(),
        ".jalno/config.toml",
        "[paths]\nstyles_directory = \"web/css\"\n\n[assets]\nstyle_types = [\"sass\"]\n",
    );

    jalno(tmp.path())
        .args(["generate"])
        .current_dir(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("config.toml"));

    assert!(!tmp.path().join("resources").exists());
    assert!(!tmp.path().join("web").exists());
}

#[test]
fn test_generate_fails_on_overlapping_outputs() {
    let tmp = temp_dir();
    create_project(tmp.path());

    jalno(tmp.path())
        .args(["generate", "--translations-dir", "resources/css", "--translation-file-name", "[code].css"])
        .current_dir(tmp.path())
        .assert()
        .success();

    write(tmp.path(), "frontend/langs/default.json", r#"{"hello": "hi"}"#);

    jalno(tmp.path())
        .args(["generate", "--translations-dir", "resources/css", "--translation-file-name", "[code].css"])
        .current_dir(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("default.css"));
}

#[test]
fn test_generate_rejects_bad_template() {
    let tmp = temp_dir();
    create_project(tmp.path());

    jalno(tmp.path())
        .args(["generate", "--translation-file-name", "langs.js"])
        .current_dir(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("[code]"));
}

#[test]
fn test_generate_fails_without_installed_json() {
    let tmp = temp_dir();
    write(tmp.path(), "composer.json", r#"{"name": "acme/site"}"#);

    jalno(tmp.path())
        .args(["generate"])
        .current_dir(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("composer install"));

    assert!(!tmp.path().join("resources").exists());
}

#[test]
fn test_generate_fails_on_duplicate_package() {
    let tmp = temp_dir();
    create_project(tmp.path());
    write(
        tmp.path(),
        "vendor/composer/installed.json",
        r#"[
            {"name": "jalno/base", "extra": {"jalno": {"manifest": "package.json"}}},
            {"name": "fork/base", "extra": {"jalno": {"manifest": "package.json"}}}
        ]"#,
    );
    write(tmp.path(), "vendor/fork/base/package.json", "{}");

    jalno(tmp.path())
        .args(["generate"])
        .current_dir(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("duplicate package name `base`"));

    jalno(tmp.path())
        .args(["--no-color", "generate"])
        .current_dir(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("\x1b[").not());

    assert!(!tmp.path().join("resources").exists());
}

#[test]
fn test_generate_fails_on_missing_frontend_manifest() {
    let tmp = temp_dir();
    create_project(tmp.path());
    fs::remove_file(tmp.path().join("vendor/jalno/base/frontend/jalno.json")).unwrap();

    jalno(tmp.path())
        .args(["generate"])
        .current_dir(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("package `base`"))
        .stderr(predicate::str::contains("jalno.json"));
}

#[test]
fn test_generate_accepts_deprecated_theme_json() {
    let tmp = temp_dir();
    create_project(tmp.path());
    fs::rename(
        tmp.path().join("vendor/jalno/base/frontend/jalno.json"),
        tmp.path().join("vendor/jalno/base/frontend/theme.json"),
    )
    .unwrap();

    jalno(tmp.path())
        .args(["generate"])
        .current_dir(tmp.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("deprecated"));
}

// ============================================================================
// jalno install
// ============================================================================

#[test]
fn test_install_dry_run_renames_package_json() {
    let tmp = temp_dir();
    create_project(tmp.path());
    write(tmp.path(), "frontend/package.json", r#"{"name": "site", "private": true}"#);

    jalno(tmp.path())
        .args(["install", "--dry-run"])
        .current_dir(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("./frontend"))
        .stdout(predicate::str::contains("vendor/jalno/base").not());

    let content = fs::read_to_string(tmp.path().join("frontend/package.json")).unwrap();
    assert!(content.starts_with("{\n\t\"name\": \"jalno-site-frontend\""));
}

#[cfg(unix)]
#[test]
fn test_install_reports_npm_failure() {
    let tmp = temp_dir();
    create_project(tmp.path());
    write(tmp.path(), "frontend/package.json", "{}");

    jalno(tmp.path())
        .args(["install", "--npm-binary", "false"])
        .current_dir(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed with exit code"));
}

// ============================================================================
// jalno list / completions
// ============================================================================

#[test]
fn test_list_packages() {
    let tmp = temp_dir();
    create_project(tmp.path());

    jalno(tmp.path())
        .args(["list", "--assets"])
        .current_dir(tmp.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("site (package.json)"))
        .stdout(predicate::str::contains("base (vendor/jalno/base/package.json)"))
        .stdout(predicate::str::contains("jalno-site-frontend [theme: default, 3 assets]"))
        .stdout(predicate::str::contains("languages: fa"))
        .stdout(predicate::str::contains("css: a.css"));
}

#[test]
fn test_completions() {
    let tmp = temp_dir();

    jalno(tmp.path())
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("jalno"));
}

#[test]
fn test_help() {
    let tmp = temp_dir();

    jalno(tmp.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("generate"))
        .stdout(predicate::str::contains("install"));
}
