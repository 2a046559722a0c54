//! freestyle - Build Jenkins freestyle jobs from YAML definitions
//!
//! ## Commands
//!
//! - `freestyle render` - Render a job definition to config.xml
//! - `freestyle fetch` - Download the config.xml of a job
//! - `freestyle info` - Show the summary of a job
//! - `freestyle push` - Render a job definition and upload it to Jenkins
//! - `freestyle completions` - Generate shell completions
//!
//! ## Quick Start
//!
//! ```bash
//! # Preview the generated config.xml
//! freestyle render job.yaml
//!
//! # Create or update the job on the server
//! export JENKINS_URL=https://ci.example.com JENKINS_USER=bot JENKINS_API_TOKEN=...
//! freestyle push job.yaml --job team/app --create
//!
//! # Generate shell completions
//! freestyle completions bash > /etc/bash_completion.d/freestyle
//! ```

use std::process::ExitCode;

mod cli;

fn main() -> ExitCode {
    match cli::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            if std::env::var("FREESTYLE_VERBOSE").is_ok() {
                eprintln!("{e:?}");
            }
            ExitCode::FAILURE
        }
    }
}
