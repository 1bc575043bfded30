//! Black-box tests for the `taskdeck` binary. Every run starts from the
//! sample data (due dates relative to now) in UTC unless a test says otherwise.

use predicates::prelude::*;

mod helpers;
use helpers::{assertions, CliTestHarness};

fn stdout_of(assert: &assert_cmd::assert::Assert) -> String {
    String::from_utf8_lossy(&assert.get_output().stdout).into_owned()
}

/// Asserts that `items` appear in `output` in the given order.
fn assert_in_order(output: &str, items: &[&str]) {
    let positions: Vec<usize> = items
        .iter()
        .map(|item| output.find(item).unwrap_or_else(|| panic!("'{item}' missing from:\n{output}")))
        .collect();
    assert!(
        positions.windows(2).all(|w| w[0] < w[1]),
        "expected order {items:?} in:\n{output}"
    );
}

#[test]
fn test_cli_help_and_version() {
    let harness = CliTestHarness::new();

    harness
        .run_success(&["--help"])
        .stdout(predicate::str::contains("Taskdeck"))
        .stdout(predicate::str::contains("dashboard"))
        .stdout(predicate::str::contains("shell"));

    harness
        .run_success(&["--version"])
        .stdout(predicate::str::contains("taskdeck"));

    harness
        .run_failure(&["invalid-command"])
        .stderr(assertions::has_error());
}

#[test]
fn test_dashboard_is_the_default_command() {
    let harness = CliTestHarness::new();

    for args in [&[][..], &["dashboard"][..]] {
        harness
            .run_success(args)
            .stdout(predicate::str::contains("Dashboard"))
            .stdout(predicate::str::contains("Total Tasks"))
            .stdout(predicate::str::contains("1 (10%)"))
            .stdout(predicate::str::contains("Due Today (3)"))
            .stdout(predicate::str::contains("Morning run"))
            .stdout(predicate::str::contains("Overdue (0)"))
            .stdout(predicate::str::contains("In Progress (3)"));
    }
}

#[test]
fn test_list_command_comprehensive() {
    let harness = CliTestHarness::new();

    harness
        .run_success(&["list"])
        .stdout(assertions::has_task_table_headers())
        .stdout(predicate::str::contains("All Tasks (10)"))
        .stdout(predicate::str::contains("Plan vacation"))
        .stdout(predicate::str::contains("Sorted by priority (descending)"));

    harness
        .run_success(&["list", "status:completed"])
        .stdout(predicate::str::contains("All Tasks (1)"))
        .stdout(predicate::str::contains("Grocery shopping"))
        .stdout(predicate::str::contains("Plan vacation").not());

    // Names resolve to ids in queries.
    harness
        .run_success(&["list", "project:Work and not priority:low"])
        .stdout(predicate::str::contains("All Tasks (3)"))
        .stdout(predicate::str::contains("Team meeting"));

    harness
        .run_success(&["list", "(tag:Urgent or today) and status:todo"])
        .stdout(predicate::str::contains("All Tasks (2)"))
        .stdout(predicate::str::contains("Meditation session"));

    harness
        .run_success(&["list", "overdue"])
        .stdout(assertions::empty_result());
}

#[test]
fn test_list_filter_and_sort_options() {
    let harness = CliTestHarness::new();

    let assert = harness.run_success(&["list", "--priority", "low", "--sort", "title", "--asc"]);
    let output = stdout_of(&assert);
    assert!(output.contains("All Tasks (3)"));
    assert_in_order(&output, &["Grocery shopping", "Plan vacation", "Update resume"]);
    assert!(output.contains("Sorted by title (ascending)"));

    let assert = harness.run_success(&["list", "--status", "in-progress", "--sort", "due", "--desc"]);
    let output = stdout_of(&assert);
    assert_in_order(
        &output,
        &["Read design book", "Complete project proposal", "Fix website bug"],
    );

    harness
        .run_failure(&["list", "--priority", "urgent"])
        .stderr(assertions::has_error());
}

#[test]
fn test_invalid_query_reports_syntax_help() {
    let harness = CliTestHarness::new();

    harness
        .run_failure(&["list", "status:done"])
        .stderr(predicate::str::contains("Invalid status value: done"))
        .stderr(predicate::str::contains("Queries look like"));

    harness
        .run_failure(&["list", "status:todo and"])
        .stderr(predicate::str::contains("Query syntax error"));
}

#[test]
fn test_today_command() {
    let harness = CliTestHarness::new();

    let assert = harness.run_success(&["today", "--sort", "title", "--asc"]);
    let output = stdout_of(&assert);
    assert!(output.contains("Due Today (3)"));
    assert_in_order(&output, &["Fix website bug", "Meditation session", "Morning run"]);
    assert!(!output.contains("Team meeting"));
}

#[test]
fn test_project_commands() {
    let harness = CliTestHarness::new();

    let assert = harness.run_success(&["project", "list"]);
    let output = stdout_of(&assert);
    assert!(assertions::has_project_table_headers().eval(&output));
    assert_in_order(&output, &["Personal", "Work", "Health", "Learning"]);

    harness
        .run_success(&["project", "show", "work"])
        .stdout(predicate::str::contains("Work-related tasks and deadlines"))
        .stdout(predicate::str::contains("Tasks (3)"))
        .stdout(predicate::str::contains("Fix website bug"))
        .stdout(predicate::str::contains("Morning run").not());

    harness
        .run_success(&["project", "show", "project-4", "--status", "todo"])
        .stdout(predicate::str::contains("Tasks (1)"))
        .stdout(predicate::str::contains("Learn React hooks"));

    harness
        .run_failure(&["project", "show", "Garden"])
        .stderr(predicate::str::contains("No project found with ID or name 'Garden'"));
}

#[test]
fn test_tags_command() {
    let harness = CliTestHarness::new();

    harness
        .run_success(&["tags"])
        .stdout(predicate::str::contains("Urgent"))
        .stdout(predicate::str::contains("Research"))
        .stdout(predicate::str::contains("#ef4444"));

    harness
        .run_success(&["tags", "--empty"])
        .stdout(predicate::str::contains("No tags found"));
}

#[test]
fn test_empty_store() {
    let harness = CliTestHarness::new();

    harness
        .run_success(&["--empty", "list"])
        .stdout(predicate::str::contains("All Tasks (0)"))
        .stdout(assertions::empty_result());

    harness
        .run_success(&["--empty"])
        .stdout(predicate::str::contains("0 (0%)"));

    harness
        .run_success(&["project", "list", "--empty"])
        .stdout(predicate::str::contains("No projects found"));
}

#[test]
fn test_config_file_defaults() {
    let harness = CliTestHarness::new();
    harness.write_config(
        r#"
            [list]
            sort = "title"
            direction = "ascending"
            priorities = ["high"]
        "#,
    );

    let assert = harness.run_success(&["list"]);
    let output = stdout_of(&assert);
    assert!(output.contains("All Tasks (3)"));
    assert_in_order(&output, &["Complete project proposal", "Fix website bug", "Team meeting"]);

    // Flags still win over the file.
    harness
        .run_success(&["list", "--priority", "low"])
        .stdout(predicate::str::contains("All Tasks (3)"))
        .stdout(predicate::str::contains("Plan vacation"));

    harness.write_config("seed = false\n");
    harness
        .run_success(&["tags"])
        .stdout(predicate::str::contains("No tags found"));
}

#[test]
fn test_environment_overrides_config_file() {
    let harness = CliTestHarness::new();
    harness.write_config("seed = false\n");

    harness
        .command()
        .env("TASKDECK_SEED", "true")
        .arg("tags")
        .assert()
        .success()
        .stdout(predicate::str::contains("Urgent"));
}

#[test]
fn test_error_handling() {
    let harness = CliTestHarness::new();

    harness
        .run_failure(&["--timezone", "Mars/Olympus", "list"])
        .stderr(predicate::str::contains("Invalid timezone"))
        .stderr(predicate::str::contains("Mars/Olympus"));

    harness.write_config("timezone = \"Nowhere/Special\"\n");
    harness
        .command()
        .env_remove("TASKDECK_TIMEZONE")
        .arg("list")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Nowhere/Special"));

    // The shell refuses to run without a terminal instead of hanging.
    harness
        .command()
        .arg("shell")
        .write_stdin("")
        .assert()
        .failure()
        .stderr(predicate::str::contains("interactive terminal"));
}

#[test]
fn test_verbose_logging_goes_to_stderr() {
    let harness = CliTestHarness::new();

    harness
        .run_success(&["-v", "tags"])
        .stderr(predicate::str::contains("Seeded store with 4 projects, 5 tags, 10 tasks"));

    harness
        .run_success(&["tags"])
        .stderr(predicate::str::is_empty());

    harness
        .command()
        .env("TASKDECK_LOG", "debug")
        .args(["list", "overdue"])
        .assert()
        .success()
        .stderr(predicate::str::contains("Running query"));
}
