use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn postboard_cmd() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("postboard"))
}

// =============================================================================
// Basic CLI
// =============================================================================

#[test]
fn test_help() {
    postboard_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("GraphQL endpoint"));
}

#[test]
fn test_version() {
    postboard_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("postboard"));
}

// =============================================================================
// Initialization
// =============================================================================

#[test]
fn test_init_creates_config() {
    let temp_dir = TempDir::new().unwrap();

    postboard_cmd()
        .arg("init")
        .current_dir(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Initialized"));

    let config = std::fs::read_to_string(temp_dir.path().join(".postboard.toml")).unwrap();
    assert!(config.contains("postboard.json"));
    assert!(config.contains("BUSINESS"));
}

#[test]
fn test_init_twice_fails() {
    let temp_dir = TempDir::new().unwrap();

    postboard_cmd()
        .arg("init")
        .current_dir(temp_dir.path())
        .assert()
        .success();

    postboard_cmd()
        .arg("init")
        .current_dir(temp_dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Already initialized"));
}

// =============================================================================
// Query / Mutate
// =============================================================================

#[test]
fn test_schema_prints_sdl() {
    let temp_dir = TempDir::new().unwrap();

    postboard_cmd()
        .arg("schema")
        .current_dir(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("scalar UUID"))
        .stdout(predicate::str::contains("subscribeTo(userId: UUID!, authorId: UUID!): Boolean"));
}

#[test]
fn test_query_member_types_without_config() {
    let temp_dir = TempDir::new().unwrap();

    postboard_cmd()
        .args(["query", "{ memberTypes { id } }"])
        .current_dir(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("BASIC"))
        .stdout(predicate::str::contains("BUSINESS"));
}

#[test]
fn test_mutations_persist_to_data_file() {
    let temp_dir = TempDir::new().unwrap();

    postboard_cmd()
        .arg("init")
        .current_dir(temp_dir.path())
        .assert()
        .success();

    postboard_cmd()
        .args([
            "mutate",
            "createUser(dto: { name: \"Ann\", balance: 3.5 }) { name }",
        ])
        .current_dir(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("\"Ann\""));

    assert!(temp_dir.path().join("postboard.json").exists());

    postboard_cmd()
        .args(["query", "{ users { name balance } }"])
        .current_dir(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("\"Ann\""))
        .stdout(predicate::str::contains("3.5"));
}

#[test]
fn test_query_with_variables() {
    let temp_dir = TempDir::new().unwrap();

    postboard_cmd()
        .args([
            "query",
            "query($id: UUID!) { user(id: $id) { id } }",
            "--variables",
            r#"{"id": "missing"}"#,
        ])
        .current_dir(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("\"user\": null"))
        .stdout(predicate::str::contains("errors").not());
}

#[test]
fn test_syntax_error_reported_in_envelope() {
    let temp_dir = TempDir::new().unwrap();

    postboard_cmd()
        .args(["query", "{ users {"])
        .current_dir(temp_dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("\"data\": null"))
        .stdout(predicate::str::contains("\"errors\""));
}

#[test]
fn test_invalid_variables_json() {
    let temp_dir = TempDir::new().unwrap();

    postboard_cmd()
        .args(["query", "{ users { id } }", "--variables", "{nope"])
        .current_dir(temp_dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid --variables JSON"));
}
