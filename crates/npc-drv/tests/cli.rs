//! End-to-end scenarios driven through the `npc` binary via `assert_cmd`.
//! There is no library target, so the pipeline is exercised through the
//! CLI rather than by constructing `Session` directly.

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;

fn npc() -> Command {
    Command::cargo_bin("npc").unwrap()
}

fn write_source(dir: &tempfile::TempDir, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn hello_world_legacy_dialect_compiles_to_ir() {
    let dir = tempfile::tempdir().unwrap();
    let source = write_source(
        &dir,
        "hello.np",
        r#"src () "stdout" { print ["Hello NeoPaquet"] } run"#,
    );
    let output = dir.path().join("hello.ll");

    npc()
        .args(["compile", "--emit", "ir", "-o"])
        .arg(&output)
        .arg(&source)
        .assert()
        .success();

    let ir = fs::read_to_string(&output).unwrap();
    assert!(ir.contains("define i32 @main"), "{ir}");
    assert!(ir.contains("Hello NeoPaquet\\00"), "{ir}");
    assert!(ir.contains("call i32 (ptr, ...) @printf"), "{ir}");
    assert!(ir.contains("ret i32 0"), "{ir}");
}

#[test]
fn type_mismatch_fails_check_with_type_error() {
    let dir = tempfile::tempdir().unwrap();
    let source = write_source(&dir, "mismatch.np", "let name: String = 42");

    npc()
        .arg("check")
        .arg(&source)
        .assert()
        .failure()
        .stderr(predicate::str::contains("TypeError"))
        .stderr(predicate::str::contains("String"))
        .stderr(predicate::str::contains("i32"));
}

#[test]
fn undefined_variable_does_not_cascade_into_type_error() {
    let dir = tempfile::tempdir().unwrap();
    let source = write_source(&dir, "undef.np", "let x = unknown");

    let assertion = npc().arg("check").arg(&source).assert().failure();
    let output = assertion.get_output();
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("UndefinedVariable"), "{stderr}");
    assert!(!stderr.contains("TypeError"), "{stderr}");
}

#[test]
fn function_arity_mismatch_reports_argument_count() {
    let dir = tempfile::tempdir().unwrap();
    let source = write_source(
        &dir,
        "arity.np",
        "fn add(a:i32,b:i32)->i32{return a+b} let z = add(1)",
    );

    npc()
        .arg("check")
        .arg(&source)
        .assert()
        .failure()
        .stderr(predicate::str::contains("TypeError"));
}

#[test]
fn unknown_struct_member_reports_semantic_error() {
    let dir = tempfile::tempdir().unwrap();
    let source = write_source(&dir, "member.np", "struct P{x:i32,y:i32} let p:P let q = p.z");

    npc()
        .arg("check")
        .arg(&source)
        .assert()
        .failure()
        .stderr(predicate::str::contains("SemanticError"))
        .stderr(predicate::str::contains("z"));
}

#[test]
fn legacy_function_lowers_to_named_function_returning_zero() {
    let dir = tempfile::tempdir().unwrap();
    let source = write_source(&dir, "legacy_fn.np", r#"@func ("id") [x] go { print ["ok"] }"#);
    let output = dir.path().join("legacy_fn.ll");

    npc()
        .args(["compile", "--emit", "ir", "-o"])
        .arg(&output)
        .arg(&source)
        .assert()
        .success();

    let ir = fs::read_to_string(&output).unwrap();
    assert!(ir.contains("define i32 @id(i32"), "{ir}");
    assert!(ir.contains("ret i32 0"), "{ir}");
}

#[test]
fn check_succeeds_on_clean_source() {
    let dir = tempfile::tempdir().unwrap();
    let source = write_source(&dir, "clean.np", "fn main() -> i32 { return 0 }");

    npc().arg("check").arg(&source).assert().success();
}

#[test]
fn version_prints_crate_version() {
    npc()
        .arg("version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn auto_fix_inserts_missing_semicolon() {
    let dir = tempfile::tempdir().unwrap();
    let source = write_source(&dir, "needs_fix.np", "let x: i32 = 1 let y: i32 = 2");

    npc().arg("auto-fix").arg(&source).assert().success();

    let fixed = fs::read_to_string(&source).unwrap();
    assert!(fixed.contains("1 ; let y"), "{fixed}");
}
