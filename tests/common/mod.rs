use std::path::Path;

use assert_cmd::Command;

/// Script-mode CLI invocation rooted in `home`, with no terminal prompts.
pub fn script_cmd(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("expense_core_cli").expect("binary is built");
    cmd.env("EXPENSE_CORE_CLI_SCRIPT", "1")
        .env("EXPENSE_CORE_HOME", home)
        .env_remove("EXPENSE_CORE_EPHEMERAL")
        .env_remove("RUST_LOG");
    cmd
}
