#![allow(deprecated)]
use cucumber::{then, when};
use serde_json::Value;

use crate::PizzeriaWorld;

/// Run `pizzeria` with the given args against the world's database.
/// Stores stdout, stderr, and exit code on the world.
fn run_pizzeria(world: &mut PizzeriaWorld, args: &[&str]) {
    let db_path = world
        .db_path
        .as_ref()
        .expect("db_path not set — did you forget 'Given a pizzeria database is initialized'?");

    let output = assert_cmd::Command::cargo_bin("pizzeria")
        .expect("pizzeria binary not found")
        .env("DB_URI", db_path)
        .env("NO_COLOR", "1")
        .args(args)
        .output()
        .expect("failed to run pizzeria");

    world.last_stdout = String::from_utf8_lossy(&output.stdout).into_owned();
    world.last_stderr = String::from_utf8_lossy(&output.stderr).into_owned();
    world.last_exit_code = output.status.code().unwrap_or(-1);
}

// ---------------------------------------------------------------------------
// When steps
// ---------------------------------------------------------------------------

/// Run `pizzeria` with whitespace-separated arguments.
#[when(expr = "I run pizzeria {string}")]
async fn i_run_pizzeria(world: &mut PizzeriaWorld, args: String) {
    let args: Vec<&str> = args.split_whitespace().collect();
    run_pizzeria(world, &args);
}

// ---------------------------------------------------------------------------
// Then steps
// ---------------------------------------------------------------------------

#[then("the command succeeds")]
async fn the_command_succeeds(world: &mut PizzeriaWorld) {
    assert_eq!(
        world.last_exit_code, 0,
        "expected success but exit code was {}\nstderr: {}",
        world.last_exit_code, world.last_stderr
    );
}

#[then("the command fails")]
async fn the_command_fails(world: &mut PizzeriaWorld) {
    assert_ne!(
        world.last_exit_code, 0,
        "expected failure but the command succeeded\nstdout: {}",
        world.last_stdout
    );
}

#[then(expr = "stdout contains {string}")]
async fn stdout_contains(world: &mut PizzeriaWorld, expected: String) {
    assert!(
        world.last_stdout.contains(&expected),
        "expected stdout to contain {expected:?}, but it was:\n{}",
        world.last_stdout
    );
}

#[then(expr = "stderr contains {string}")]
async fn stderr_contains(world: &mut PizzeriaWorld, expected: String) {
    assert!(
        world.last_stderr.contains(&expected),
        "expected stderr to contain {expected:?}, but it was:\n{}",
        world.last_stderr
    );
}

#[then(expr = "stdout is a JSON array with {int} items")]
async fn stdout_is_a_json_array(world: &mut PizzeriaWorld, expected: usize) {
    let json: Value = serde_json::from_str(&world.last_stdout).unwrap_or_else(|e| {
        panic!(
            "stdout is not valid JSON: {e}\nstdout: {}",
            world.last_stdout
        )
    });
    let items = json
        .as_array()
        .unwrap_or_else(|| panic!("stdout JSON is not an array: {json}"));
    assert_eq!(
        items.len(),
        expected,
        "expected {expected} items but got {}: {json}",
        items.len()
    );
}
