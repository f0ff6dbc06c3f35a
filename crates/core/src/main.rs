use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use java_harness::{AssertionConfig, JavaHarness};
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::info;

#[derive(Parser)]
#[command(name = "unitscope")]
#[command(about = "Java class extraction and test assertion surgery", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// JSON file with assertion settings
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[arg(long, short, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract the file-named class of every Java file under a root
    Scan {
        root: PathBuf,

        #[arg(long)]
        pretty: bool,
    },

    /// List the methods invoked by one method
    Invocations {
        file: PathBuf,

        #[arg(long)]
        method: String,

        #[arg(long)]
        class: Option<String>,
    },

    /// Pull assertion lines out of a free-form response read from stdin
    Assertions,

    /// Replace the target assertion of a test method
    Replace {
        #[arg(long)]
        prefix_file: PathBuf,

        #[arg(long)]
        assertion: String,
    },

    /// Print the arguments of a single assertion call
    Args {
        assertion: String,
    },
}

fn init_tracing(verbose: bool) -> Result<()> {
    let level = if verbose { "debug" } else { "info" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    let subscriber = tracing_subscriber::FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<AssertionConfig> {
    match path {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config {:?}", path))?;
            serde_json::from_str(&raw).with_context(|| format!("Invalid config {:?}", path))
        }
        None => Ok(AssertionConfig::default()),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose)?;
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Scan { root, pretty } => {
            info!("Scanning {:?}", root);
            let records = unitscope::scan(&root, &config)?;
            for record in &records {
                let line = if pretty {
                    serde_json::to_string_pretty(record)?
                } else {
                    serde_json::to_string(record)?
                };
                println!("{}", line);
            }
        }

        Commands::Invocations { file, method, class } => {
            let content = std::fs::read_to_string(&file)
                .with_context(|| format!("Failed to read {:?}", file))?;
            let mut harness = JavaHarness::with_config(config)?;
            for name in harness.invocations_in_method(&content, class.as_deref(), &method) {
                println!("{}", name);
            }
        }

        Commands::Assertions => {
            let mut response = String::new();
            std::io::stdin().read_to_string(&mut response)?;
            let harness = JavaHarness::with_config(config)?;
            println!("{}", harness.extract_assertions(&response));
        }

        Commands::Replace { prefix_file, assertion } => {
            let prefix = std::fs::read_to_string(&prefix_file)
                .with_context(|| format!("Failed to read {:?}", prefix_file))?;
            let mut harness = JavaHarness::with_config(config)?;
            let replaced = harness.replace_assertion(&prefix, &assertion);
            if replaced.is_empty() {
                anyhow::bail!("No {} statement found", harness.config().target_call);
            }
            print!("{}", replaced);
        }

        Commands::Args { assertion } => {
            let mut harness = JavaHarness::with_config(config)?;
            for arg in harness.extract_arguments(&assertion)? {
                println!("{}", arg);
            }
        }
    }

    Ok(())
}
