use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use semtag::cli::{
    run_bump_workflow, run_tag_workflow, BumpWorkflowArgs, Severity, TagWorkflowArgs,
    WorkflowOutcome,
};
use semtag::config::{self, GitBackend, GitConfig};
use semtag::git::{Git2Repository, GitCli, VersionControl};
use semtag::manifest::FsManifestStore;
use semtag::ui;

#[derive(Parser)]
#[command(
    name = "semtag",
    version,
    about = "Bump a JSON manifest's semantic version and tag releases in git"
)]
struct Cli {
    #[arg(short, long, global = true, help = "Custom configuration file path")]
    config: Option<String>,

    #[arg(long, global = true, help = "Version control backend: cli or libgit2")]
    backend: Option<String>,

    #[arg(short, long, global = true, help = "Log every git invocation")]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Bump the manifest version unless it is already tagged at HEAD
    Bump {
        #[arg(help = "Directory containing the manifest")]
        directory: Option<PathBuf>,

        #[arg(help = "major, minor or patch (default: patch)")]
        granularity: Vec<String>,
    },
    /// Tag the current commit with the manifest version
    Tag {
        #[arg(help = "Directory containing the manifest")]
        directory: Option<PathBuf>,

        #[arg(help = "Version to set in the manifest before tagging (n.n.n)")]
        version: Option<String>,
    },
}

/// Logs go to stderr so stdout only carries results
fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "semtag=debug" } else { "semtag=warn" };
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| default_filter.into()),
    );

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn open_version_control(git: &GitConfig) -> semtag::Result<Box<dyn VersionControl>> {
    match git.backend {
        GitBackend::Cli => Ok(Box::new(GitCli::with_program(git.program.clone()))),
        GitBackend::Libgit2 => Ok(Box::new(Git2Repository::open(".")?)),
    }
}

fn report(outcome: &WorkflowOutcome) {
    match outcome {
        WorkflowOutcome::Bumped(bump) => ui::display_bump(bump),
        WorkflowOutcome::Tagged { tag } => ui::display_success(&format!("Created tag: {}", tag)),
        WorkflowOutcome::Abort {
            severity: Severity::Error,
            message,
            ..
        } => ui::display_error(message),
        WorkflowOutcome::Abort {
            severity: Severity::Warning,
            message,
            ..
        } => ui::display_warning(message),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut config = match config::load_config(cli.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            ui::display_error(&format!("Error loading config: {}", e));
            std::process::exit(1);
        }
    };

    if let Some(backend) = cli.backend.as_deref() {
        config.git.backend = match backend.parse() {
            Ok(backend) => backend,
            Err(e) => {
                ui::display_error(&e.to_string());
                std::process::exit(1);
            }
        };
    }

    let store = FsManifestStore::with_file_name(config.manifest.file_name.clone());
    let vcs = match open_version_control(&config.git) {
        Ok(vcs) => vcs,
        Err(e) => {
            ui::display_error(&format!("Git repository error: {}", e));
            std::process::exit(1);
        }
    };

    let outcome = match cli.command {
        Command::Bump {
            directory,
            granularity,
        } => run_bump_workflow(
            &vcs,
            &store,
            &BumpWorkflowArgs {
                directory,
                granularity_args: granularity,
            },
        ),
        Command::Tag { directory, version } => {
            run_tag_workflow(&vcs, &store, &TagWorkflowArgs { directory, version })
        }
    };

    match outcome {
        Ok(outcome) => {
            report(&outcome);
            std::process::exit(outcome.exit_code());
        }
        Err(e) => {
            ui::display_error(&e.to_string());
            std::process::exit(1);
        }
    }
}
