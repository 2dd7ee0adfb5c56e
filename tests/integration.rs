use predicates::prelude::*;
use std::process::Command;
use tempfile::TempDir;

fn cmd() -> assert_cmd::Command {
    assert_cmd::Command::from(Command::new(env!("CARGO_BIN_EXE_directivesgen")))
}

fn fixture_path(name: &str) -> String {
    format!("{}/tests/fixtures/{}", env!("CARGO_MANIFEST_DIR"), name)
}

fn read(dir: &TempDir, name: &str) -> String {
    std::fs::read_to_string(dir.path().join(name)).unwrap()
}

fn listing(dir: &std::path::Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap()
        .filter_map(|e| e.ok())
        .map(|e| e.file_name().to_string_lossy().to_string())
        .collect();
    names.sort();
    names
}

/// Drop the `lastmod:` line, the only part that changes between runs.
fn without_lastmod(page: &str) -> String {
    page.lines()
        .filter(|l| !l.starts_with("lastmod: "))
        .collect::<Vec<_>>()
        .join("\n")
}

// -- pages --

#[test]
fn writes_one_page_per_documented_directive() {
    let dir = TempDir::new().unwrap();

    cmd()
        .args(["-o", dir.path().to_str().unwrap()])
        .arg(fixture_path("directives.go"))
        .assert()
        .success();

    assert_eq!(
        listing(dir.path()),
        vec![
            "SecAuditLog.md",
            "SecComponentSignature.md",
            "SecRequestBodyLimit.md",
            "SecRuleEngine.md",
            "Unsupported.md",
        ]
    );
}

#[test]
fn custom_template_matches_expected_pages() {
    let dir = TempDir::new().unwrap();

    cmd()
        .args(["-o", dir.path().to_str().unwrap()])
        .args(["-t", &fixture_path("page.md")])
        .arg(fixture_path("directives.go"))
        .assert()
        .success();

    for name in ["SecRuleEngine.md", "SecAuditLog.md"] {
        let expected =
            std::fs::read_to_string(fixture_path(&format!("expected/{}", name))).unwrap();
        assert_eq!(read(&dir, name), expected, "{}", name);
    }
}

#[test]
fn embedded_template_front_matter() {
    let dir = TempDir::new().unwrap();

    cmd()
        .args(["-o", dir.path().to_str().unwrap()])
        .arg(fixture_path("directives.go"))
        .assert()
        .success();

    let page = read(&dir, "SecComponentSignature.md");
    assert!(page.starts_with("---\ntitle: \"SecComponentSignature\"\n"));
    assert!(page.contains("`SecComponentSignature \"COMPONENT_NAME/X.Y.Z (COMMENT)\"`"));
    assert!(page.contains("```apache\nSecComponentSignature \"OWASP_CRS/4.0.0\"\n```\n"));
    assert!(!page.contains("&#34;"), "entities must be unescaped");

    let lastmod = page
        .lines()
        .find_map(|l| l.strip_prefix("lastmod: "))
        .expect("lastmod line");
    assert!(chrono_like(lastmod), "unexpected timestamp {lastmod}");
}

/// Loose RFC 3339 shape check: `YYYY-MM-DDTHH:MM:SS` then `Z` or an offset.
fn chrono_like(ts: &str) -> bool {
    let b = ts.as_bytes();
    b.len() >= 20
        && b[4] == b'-'
        && b[7] == b'-'
        && b[10] == b'T'
        && b[13] == b':'
        && b[16] == b':'
        && (ts.ends_with('Z') || b[19] == b'+' || b[19] == b'-')
}

#[test]
fn notes_are_bolded() {
    let dir = TempDir::new().unwrap();

    cmd()
        .args(["-o", dir.path().to_str().unwrap()])
        .arg(fixture_path("directives.go"))
        .assert()
        .success();

    let page = read(&dir, "SecRequestBodyLimit.md");
    assert!(page.contains(
        "**Note:** Anything over the limit will be rejected with status code\n\
         413 (Request Entity Too Large). **Note:** There is a hard limit of 1 GB.\n"
    ));
}

#[test]
fn echo_only_doc_gives_empty_fields() {
    let dir = TempDir::new().unwrap();

    cmd()
        .args(["-o", dir.path().to_str().unwrap()])
        .args(["-t", &fixture_path("page.md")])
        .arg(fixture_path("directives.go"))
        .assert()
        .success();

    assert_eq!(
        read(&dir, "Unsupported.md"),
        "# Unsupported\n\n\n\n- Syntax: ``\n- Default: ``\n\n"
    );
}

#[test]
fn reruns_differ_only_in_lastmod() {
    let first = TempDir::new().unwrap();
    let second = TempDir::new().unwrap();

    for dir in [&first, &second] {
        cmd()
            .args(["-o", dir.path().to_str().unwrap()])
            .arg(fixture_path("directives.go"))
            .assert()
            .success();
    }

    for name in listing(first.path()) {
        assert_eq!(
            without_lastmod(&read(&first, &name)),
            without_lastmod(&read(&second, &name)),
            "{}",
            name
        );
    }
}

#[test]
fn creates_missing_output_directory() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("content/docs/seclang/directives");

    cmd()
        .args(["-o", out.to_str().unwrap()])
        .arg(fixture_path("directives.go"))
        .assert()
        .success();

    assert!(out.join("SecRuleEngine.md").is_file());
}

#[test]
fn glob_sources() {
    let dir = TempDir::new().unwrap();
    let src = TempDir::new().unwrap();
    std::fs::copy(fixture_path("directives.go"), src.path().join("directives.go")).unwrap();

    cmd()
        .args(["-o", dir.path().to_str().unwrap()])
        .arg(format!("{}/*.go", src.path().display()))
        .assert()
        .success();

    assert!(dir.path().join("SecAuditLog.md").is_file());
}

#[test]
fn dry_run_prints_paths_and_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("out");

    cmd()
        .args(["-o", out.to_str().unwrap()])
        .arg("--dry-run")
        .arg(fixture_path("directives.go"))
        .assert()
        .success()
        .stdout(predicate::str::contains("SecRuleEngine.md"))
        .stdout(predicate::str::contains("Unsupported.md"));

    assert!(!out.exists());
}

// -- failures --

#[test]
fn unknown_field_aborts() {
    let dir = TempDir::new().unwrap();

    cmd()
        .args(["-o", dir.path().to_str().unwrap()])
        .arg(fixture_path("bogus.go"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown field \"Bogus\""));

    // Pages before the bad comment stay; nothing from it or after it.
    assert_eq!(listing(dir.path()), vec!["Include.md"]);
}

#[test]
fn syntax_error_aborts_without_output() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("out");

    cmd()
        .args(["-o", out.to_str().unwrap()])
        .arg(fixture_path("broken.go"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("broken.go"))
        .stderr(predicate::str::contains("'{' opened on line 5 is not closed"));

    assert!(!out.exists());
}

#[test]
fn missing_source_fails() {
    let dir = TempDir::new().unwrap();

    cmd()
        .args(["-o", dir.path().to_str().unwrap()])
        .arg(dir.path().join("nope.go").to_str().unwrap())
        .assert()
        .failure()
        .stderr(predicate::str::contains("no source files matched"));
}

#[test]
fn invalid_template_fails() {
    let dir = TempDir::new().unwrap();
    let tpl = dir.path().join("bad.md");
    std::fs::write(&tpl, "# {{ .Title }}\n").unwrap();

    cmd()
        .args(["-o", dir.path().join("out").to_str().unwrap()])
        .args(["-t", tpl.to_str().unwrap()])
        .arg(fixture_path("directives.go"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("can't evaluate field Title"));
}
