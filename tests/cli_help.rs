//! Help output.

mod common;

use common::TestEnv;

#[test]
fn test_help_flag() {
    let env = TestEnv::new();
    let result = env.run(&["--help"]);
    assert!(result.success);
    assert!(result.stdout.contains("LaTeX"));
    assert!(result.stdout.contains("--locale"));
    assert!(result.stdout.contains("--no-cache"));
}

#[test]
fn test_help_mentions_interactive_behavior() {
    let env = TestEnv::new();
    let result = env.run(&["--help"]);
    assert!(
        result
            .stdout
            .contains("With no input and an interactive terminal"),
        "help output should explain the no-argument behavior; got:\n{}",
        result.stdout
    );
}
