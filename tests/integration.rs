use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

fn cmd() -> assert_cmd::Command {
    assert_cmd::Command::from(Command::new(env!("CARGO_BIN_EXE_minidoc")))
}

fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

const ADD_JS: &str = "/**\n * Adds two numbers\n */\nfunction add(a, b) { return a + b; }\n";

// -- basic extraction --

#[test]
fn documents_a_single_file() {
    let src = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    let file = write_file(src.path(), "add.js", ADD_JS);

    cmd()
        .args(["-o", out.path().to_str().unwrap()])
        .arg(file)
        .assert()
        .success()
        .stdout(predicate::str::contains("1 of 1 files documented"));

    let md = fs::read_to_string(out.path().join("add.md")).unwrap();
    assert!(md.starts_with("# add\n"));
    assert!(md.contains("## add"));
    assert!(md.contains("Adds two numbers"));

    let html = fs::read_to_string(out.path().join("add.html")).unwrap();
    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("<meta charset=\"utf-8\">"));
    assert!(html.contains("<title>add</title>"));
    assert!(html.contains("<h2>add</h2>"));
    assert!(html.contains("<p>Adds two numbers</p>"));
}

#[test]
fn file_without_doc_comments_produces_no_output() {
    let src = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    let file = write_file(src.path(), "plain.js", "var x = 1; // nothing here\n");

    cmd()
        .args(["-o", out.path().to_str().unwrap()])
        .arg(file)
        .assert()
        .success()
        .stdout(predicate::str::contains("0 of 1 files documented"));

    assert!(!out.path().join("plain.md").exists());
    assert!(!out.path().join("plain.html").exists());
}

#[test]
fn summary_counts_only_documented_files() {
    let src = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    let a = write_file(src.path(), "a.js", ADD_JS);
    let b = write_file(src.path(), "b.js", "var silent = true;\n");

    cmd()
        .args(["-o", out.path().to_str().unwrap()])
        .arg(a)
        .arg(b)
        .assert()
        .success()
        .stdout(predicate::str::contains("1 of 2 files documented"));
}

// -- directory expansion --

#[test]
fn directory_input_only_picks_js_files() {
    let src = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    write_file(src.path(), "a.js", ADD_JS);
    write_file(src.path(), "b.txt", ADD_JS);

    cmd()
        .args(["-o", out.path().to_str().unwrap()])
        .arg(src.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("1 of 1 files documented"));

    assert!(out.path().join("a.md").exists());
    assert!(!out.path().join("b.md").exists());
}

#[test]
fn mixed_directory_and_file_inputs() {
    let src = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    let dir = src.path().join("lib");
    fs::create_dir(&dir).unwrap();
    write_file(&dir, "one.js", ADD_JS);
    write_file(&dir, "two.js", ADD_JS);
    let lone = write_file(src.path(), "lone.js", ADD_JS);

    cmd()
        .args(["-o", out.path().to_str().unwrap()])
        .arg(&dir)
        .arg(lone)
        .assert()
        .success()
        .stdout(predicate::str::contains("3 of 3 files documented"));

    for name in ["one.md", "two.md", "lone.md"] {
        assert!(out.path().join(name).exists(), "missing {name}");
    }
}

// -- error handling --

#[test]
fn parse_failure_logged_but_run_continues() {
    let src = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    let bad = write_file(src.path(), "bad.js", "/** never closed\n");
    let good = write_file(src.path(), "good.js", ADD_JS);

    cmd()
        .args(["-o", out.path().to_str().unwrap()])
        .arg(bad)
        .arg(good)
        .assert()
        .success()
        .stdout(predicate::str::contains("1 of 2 files documented"))
        .stderr(predicate::str::contains("bad.js"));

    assert!(out.path().join("good.md").exists());
    assert!(!out.path().join("bad.md").exists());
}

#[test]
fn missing_input_file_is_fatal() {
    let out = TempDir::new().unwrap();
    cmd()
        .args(["-o", out.path().to_str().unwrap()])
        .arg("/no/such/file.js")
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read"));
}

#[test]
fn no_inputs_is_a_usage_error() {
    cmd().assert().failure();
}

// -- stylesheet --

#[test]
fn stylesheet_copied_and_linked() {
    let src = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    let css = write_file(src.path(), "mine.css", "body { color: teal; }\n");
    let file = write_file(src.path(), "add.js", ADD_JS);

    cmd()
        .args(["-o", out.path().to_str().unwrap()])
        .args(["--css", css.to_str().unwrap()])
        .arg(file)
        .assert()
        .success();

    let copied = fs::read_to_string(out.path().join("style.css")).unwrap();
    assert!(copied.contains("teal"));
    let html = fs::read_to_string(out.path().join("add.html")).unwrap();
    assert!(html.contains("<link rel=\"stylesheet\" href=\"style.css\">"));
}

// -- hooks --

#[cfg(unix)]
fn write_script(dir: &Path, name: &str, body: &str) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;
    let path = dir.join(name);
    fs::write(&path, body).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    path
}

#[cfg(unix)]
#[test]
fn before_hook_transforms_markdown_body() {
    let src = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    let file = write_file(src.path(), "add.js", ADD_JS);
    let hook = write_script(
        src.path(),
        "shout.sh",
        "#!/bin/sh\nsed 's/numbers/NUMBERS/'\n",
    );

    cmd()
        .args(["-o", out.path().to_str().unwrap()])
        .args(["--before", hook.to_str().unwrap()])
        .arg(file)
        .assert()
        .success();

    let md = fs::read_to_string(out.path().join("add.md")).unwrap();
    assert!(md.contains("Adds two NUMBERS"));
    // HTML is rendered from the transformed body
    let html = fs::read_to_string(out.path().join("add.html")).unwrap();
    assert!(html.contains("Adds two NUMBERS"));
}

#[cfg(unix)]
#[test]
fn after_hook_transforms_html_fragment_only() {
    let src = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    let file = write_file(src.path(), "add.js", ADD_JS);
    let hook = write_script(src.path(), "mark.sh", "#!/bin/sh\nsed 's/<h1>/<h1 class=\"top\">/'\n");

    cmd()
        .args(["-o", out.path().to_str().unwrap()])
        .args(["--after", hook.to_str().unwrap()])
        .arg(file)
        .assert()
        .success();

    let html = fs::read_to_string(out.path().join("add.html")).unwrap();
    assert!(html.contains("<h1 class=\"top\">add</h1>"));
    // markdown artifact is untouched by the post hook
    let md = fs::read_to_string(out.path().join("add.md")).unwrap();
    assert!(!md.contains("class=\"top\""));
}

#[cfg(unix)]
#[test]
fn failing_hook_skips_file_but_run_succeeds() {
    let src = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    let file = write_file(src.path(), "add.js", ADD_JS);
    let hook = write_script(src.path(), "broken.sh", "#!/bin/sh\nexit 3\n");

    cmd()
        .args(["-o", out.path().to_str().unwrap()])
        .args(["--before", hook.to_str().unwrap()])
        .arg(file)
        .assert()
        .success()
        .stdout(predicate::str::contains("0 of 1 files documented"))
        .stderr(predicate::str::contains("add.js"));

    assert!(!out.path().join("add.md").exists());
    assert!(!out.path().join("add.html").exists());
}

#[test]
fn invalid_hook_path_fails_fast() {
    let src = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    let file = write_file(src.path(), "add.js", ADD_JS);

    cmd()
        .args(["-o", out.path().to_str().unwrap()])
        .args(["--before", "/no/such/hook"])
        .arg(file)
        .assert()
        .failure()
        .stderr(predicate::str::contains("hook is not a file"));

    // fail-fast: nothing was processed
    assert!(!out.path().join("add.md").exists());
}

// -- slug scenarios end to end --

#[test]
fn prototype_member_slug() {
    let src = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    let content = "/**\n * Pushes a value\n */\nStack.prototype.push = function(v) {};\n";
    let file = write_file(src.path(), "stack.js", content);

    cmd()
        .args(["-o", out.path().to_str().unwrap()])
        .arg(file)
        .assert()
        .success();

    let md = fs::read_to_string(out.path().join("stack.md")).unwrap();
    assert!(md.contains("## push"));
}

#[test]
fn comment_without_declaration_has_no_heading() {
    let src = TempDir::new().unwrap();
    let out = TempDir::new().unwrap();
    let content = "/**\n * Module overview, nothing declared after.\n */\n";
    let file = write_file(src.path(), "overview.js", content);

    cmd()
        .args(["-o", out.path().to_str().unwrap()])
        .arg(file)
        .assert()
        .success();

    let md = fs::read_to_string(out.path().join("overview.md")).unwrap();
    assert!(md.starts_with("# overview\n"));
    assert!(!md.contains("##"));
}
