//! Integration tests for usage errors and local-only commands


use integration_test_helpers::*;

// Nothing listens here; a request would surface as a network error instead
const DEAD_SERVER: &str = "http://127.0.0.1:1";

#[test]
fn test_on_and_off_rejected_before_any_request() {
    let home = TestHome::logged_in(DEAD_SERVER);
    let stderr = home.run_command_failure(&[
        "flag", "dark-mode", "-a", "acme", "-p", "web", "-e", "prod", "--on", "--off",
    ]);

    assert!(stderr.contains("cannot set on and off flags in same command"));
    assert!(!stderr.contains("network error"));
}

#[test]
fn test_missing_project_is_reported() {
    let home = TestHome::logged_in(DEAD_SERVER);
    let stderr = home.run_command_failure(&["flag", "dark-mode", "-a", "acme", "--on"]);

    assert!(stderr.contains("project is required, provide it with -p or --project"));
}

#[test]
fn test_malformed_rule_is_reported() {
    let home = TestHome::logged_in(DEAD_SERVER);
    let stderr =
        home.run_command_failure(&["flag", "dark-mode", "-a", "acme", "-p", "web", "-r", "beta"]);

    assert!(stderr.contains("invalid argument 'beta'"));
}

#[test]
fn test_unreachable_server_suggests_status() {
    let home = TestHome::logged_in(DEAD_SERVER);
    let stderr = home.run_command_failure(&["env", "-a", "acme"]);

    assert!(stderr.contains("sf status"));
}

#[test]
fn test_invalid_output_format() {
    let home = TestHome::logged_in(DEAD_SERVER);
    let stderr = home.run_command_failure(&["tags", "-a", "acme", "-p", "web", "--format", "xml"]);

    assert!(stderr.contains("xml"));
}

#[test]
fn test_set_then_status_shows_defaults() {
    let home = TestHome::new();
    home.run_command_success(&["set", "-s", "http://flags.internal/v1", "-a", "acme", "-p", "web"]);

    let settings = home.read_file("settings.yaml");
    assert!(settings.contains("account: acme"));
    assert!(settings.contains("project: web"));

    let stdout = home.run_command_success(&["status"]);
    assert!(stdout.contains("http://flags.internal/v1"));
    assert!(stdout.contains("acme"));
    assert!(stdout.contains("Not logged in"));

    // An empty value removes the setting
    home.run_command_success(&["set", "-p", ""]);
    let settings = home.read_file("settings.yaml");
    assert!(!settings.contains("project"));
    assert!(settings.contains("account: acme"));
}

#[test]
fn test_settings_file_scope_is_used() {
    let home = TestHome::new().with_server(DEAD_SERVER);
    home.write_file("settings.yaml", "account: acme\n");

    // Account comes from the file, project is still missing
    let stderr = home.run_command_failure(&["tags"]);
    assert!(stderr.contains("project is required"));
}

#[test]
fn test_logout_removes_session() {
    let home = TestHome::logged_in(DEAD_SERVER);
    assert!(home.file_exists("auth.data"));

    let stdout = home.run_command_success(&["logout"]);
    assert!(stdout.contains("logged out"));
    assert!(!home.file_exists("auth.data"));

    let stdout = home.run_command_success(&["logout"]);
    assert!(stdout.contains("No active session"));
}

#[test]
fn test_eval_without_api_key() {
    let home = TestHome::new().with_server(DEAD_SERVER);
    let stderr = home.run_command_failure(&["eval", "dark-mode"]);

    assert!(stderr.contains("API key"));
}

#[test]
fn test_deeply_nested_target_is_kept_as_text() {
    let home = TestHome::new().with_server(DEAD_SERVER);
    let target = format!("plan:{}", "[".repeat(5_000));
    let stderr = home.run_command_failure(&["eval", "dark-mode", "-t", &target]);

    // Coercion falls back to the literal and the command reaches the key check
    assert!(stderr.contains("API key"));
}

#[test]
fn test_completion_scripts() {
    let home = TestHome::new();
    let bash = home.run_command_success(&["completion", "bash"]);
    assert!(bash.contains("sf"));

    let stderr = home.run_command_failure(&["completion", "tcsh"]);
    assert!(stderr.contains("tcsh"));
}

#[test]
fn test_version_flag() {
    let home = TestHome::new();
    let stdout = home.run_command_success(&["--version"]);
    assert!(stdout.starts_with("sf "));
}
