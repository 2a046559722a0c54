//! Command-line interface for freestyle
//!
//! - `render`: Build a job `config.xml` from a YAML definition
//! - `fetch`: Download the `config.xml` of an existing job
//! - `info`: Show the summary Jenkins reports for a job
//! - `push`: Render a definition and upload it to Jenkins
//! - `completions`: Generate shell completions

pub mod completions;
pub mod fetch;
pub mod push;
pub mod render;

use anyhow::{Context, Result};
use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};
use std::fs;
use std::future::Future;
use std::path::{Path, PathBuf};
use tracing::debug;

use freestyle::infrastructure::{Config, JenkinsClient, init_logging};
use freestyle::job::JobDefinition;

/// Build Jenkins freestyle jobs from YAML definitions
#[derive(Parser, Debug)]
#[command(name = "freestyle")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(flatten)]
    connection: ConnectionArgs,

    /// Configuration file (YAML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Debug)]
struct ConnectionArgs {
    /// Jenkins base URL
    #[arg(long, env = "JENKINS_URL", global = true)]
    url: Option<String>,

    /// Jenkins user name
    #[arg(long, env = "JENKINS_USER", global = true)]
    user: Option<String>,

    /// Jenkins API token
    #[arg(long, env = "JENKINS_API_TOKEN", global = true, hide_env_values = true)]
    token: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Render a job definition to config.xml
    #[command(name = "render")]
    Render(RenderArgs),

    /// Download the config.xml of a job
    #[command(name = "fetch")]
    Fetch(FetchArgs),

    /// Show the summary of a job as JSON
    #[command(name = "info")]
    Info(InfoArgs),

    /// Render a job definition and upload it to Jenkins
    #[command(name = "push")]
    Push(PushArgs),

    /// Generate shell completions
    #[command(name = "completions")]
    Completions(CompletionsArgs),
}

#[derive(Args, Debug)]
struct RenderArgs {
    /// Job definition file (YAML)
    definition: PathBuf,

    /// Base config.xml to build on (empty project if not specified)
    #[arg(short, long)]
    template: Option<PathBuf>,

    /// Output file (stdout if not specified)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct FetchArgs {
    /// Job name, `folder/job` for jobs inside folders
    job: String,

    /// Output file (stdout if not specified)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Args, Debug)]
struct InfoArgs {
    /// Job name
    job: String,
}

#[derive(Args, Debug)]
struct PushArgs {
    /// Job definition file (YAML)
    definition: PathBuf,

    /// Job name, `folder/job` for jobs inside folders
    #[arg(short, long)]
    job: String,

    /// Build on the job's current config.xml instead of an empty project
    #[arg(long)]
    template_from_server: bool,

    /// Create the job if it does not exist
    #[arg(long)]
    create: bool,
}

#[derive(Args, Debug)]
struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    shell: ShellArg,

    /// Output file (stdout if not specified)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum ShellArg {
    Bash,
    Zsh,
    Fish,
    #[value(name = "powershell")]
    PowerShell,
    Elvish,
}

impl From<ShellArg> for clap_complete::Shell {
    fn from(shell: ShellArg) -> Self {
        match shell {
            ShellArg::Bash => Self::Bash,
            ShellArg::Zsh => Self::Zsh,
            ShellArg::Fish => Self::Fish,
            ShellArg::PowerShell => Self::PowerShell,
            ShellArg::Elvish => Self::Elvish,
        }
    }
}

/// Build the CLI command for completion generation
pub fn build_cli() -> clap::Command {
    Cli::command()
}

/// Parse and execute CLI arguments
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;
    init_logging(cli.log_level.as_deref().unwrap_or(&config.log_level));
    debug!(url = %config.jenkins_url, "Loaded configuration");

    match cli.command {
        Commands::Render(args) => {
            let xml = render::render_definition(&args.definition, args.template.as_deref())?;
            emit(&xml, args.output.as_deref())?;
        }
        Commands::Fetch(args) => {
            let client = connect(&config)?;
            let xml = block_on(fetch::fetch_job(&client, &args.job))?;
            emit(&xml, args.output.as_deref())?;
        }
        Commands::Info(args) => {
            let client = connect(&config)?;
            let json = block_on(fetch::describe_job(&client, &args.job))?;
            emit(&json, None)?;
        }
        Commands::Push(args) => {
            let definition = JobDefinition::from_file(&args.definition)
                .with_context(|| format!("Failed to load {}", args.definition.display()))?;
            let client = connect(&config)?;
            let options = push::PushOptions {
                job: &args.job,
                template_from_server: args.template_from_server,
                create: args.create,
            };
            let outcome = block_on(push::push_job(&client, &definition, &options))?;
            println!("{outcome} job '{}'", args.job);
        }
        Commands::Completions(args) => {
            let completions = completions::generate_completions(args.shell.into())?;
            emit(&completions, args.output.as_deref())?;
        }
    }

    Ok(())
}

fn load_config(cli: &Cli) -> Result<Config> {
    let config = match &cli.config {
        Some(path) => Config::from_file(path)
            .with_context(|| format!("Failed to load config: {}", path.display()))?,
        None => Config::default(),
    };
    let ConnectionArgs { url, user, token } = &cli.connection;
    Ok(config.with_overrides(url.clone(), user.clone(), token.clone()))
}

fn connect(config: &Config) -> Result<JenkinsClient> {
    JenkinsClient::new(config).context("Failed to create Jenkins client")
}

fn block_on<T>(future: impl Future<Output = Result<T>>) -> Result<T> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to start tokio runtime")?
        .block_on(future)
}

/// Writes `content` to `output`, or to stdout when no file is given
fn emit(content: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => fs::write(path, content)
            .with_context(|| format!("Failed to write output to: {}", path.display())),
        None => {
            println!("{content}");
            Ok(())
        }
    }
}
