//! `freestyle completions` - Generate shell completions
//!
//! Supports bash, zsh, fish, PowerShell and elvish.

use anyhow::{Context, Result};
use clap_complete::Shell;

/// Generates the completion script for `shell`
pub fn generate_completions(shell: Shell) -> Result<String> {
    use clap_complete::generate;

    let mut cmd = super::build_cli();
    let mut buf = Vec::new();
    generate(shell, &mut cmd, "freestyle", &mut buf);

    String::from_utf8(buf).context("Failed to generate completions")
}
