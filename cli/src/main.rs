//! nscon CLI - Find which GKE cluster hosts a namespace and connect to it
//!
//! `nscon --scan` indexes every namespace of every cluster reachable through
//! the local gcloud configurations; `nscon NAMESPACE` switches kubectl to the
//! cluster hosting it.

mod commands;

use std::path::PathBuf;

use clap::Parser;
use crossterm::style::Stylize;
use nscon_core::{ConfigStore, LocationFilter};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "nscon")]
#[command(author, version, about = "Connect to the GKE cluster hosting a namespace")]
struct Cli {
    /// Namespace to connect to
    namespace: Vec<String>,

    /// Scan all clusters in all cloud projects for namespaces
    #[arg(short, long)]
    scan: bool,

    /// Project you want to search namespaces in
    #[arg(short, long, value_name = "PROJECT")]
    project: Option<String>,

    /// Cluster name you want to search namespaces in
    #[arg(short, long, value_name = "CLUSTER")]
    cluster: Option<String>,

    /// Verbose output of the actions nscon performs
    #[arg(short, long)]
    verbose: bool,

    /// Configuration file (default: ~/.nscon/config.yaml)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Disable coloured output
    #[arg(long)]
    no_color: bool,
}

impl Cli {
    /// The single namespace argument, unless scanning.
    fn target(&self) -> Result<Option<&str>, &'static str> {
        match (self.scan, self.namespace.as_slice()) {
            (true, []) => Ok(None),
            (true, _) => Err("--scan does not take a namespace"),
            (false, [namespace]) => Ok(Some(namespace.as_str())),
            (false, []) => Err("a namespace argument is required"),
            (false, _) => Err("only one namespace argument is accepted"),
        }
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        "warn,nscon=debug,nscon_core=debug"
    } else {
        "warn,nscon_core=error"
    };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let target = match cli.target() {
        Ok(target) => target,
        Err(message) => {
            eprintln!("error: {}", message);
            std::process::exit(2);
        }
    };

    let color = !cli.no_color && atty::is(atty::Stream::Stdout);

    let store = match &cli.config {
        Some(path) => ConfigStore::with_path(path.clone()),
        None => ConfigStore::new()?,
    };
    let (settings, created) = store.load_or_init().await?;
    tracing::debug!(config = %store.config_path().display(), ?settings, "loaded configuration");

    if created {
        let message = "Configuration initialised!! Execute 'nscon --scan' to create namespaces inventory";
        if color {
            println!("{}", message.green());
        } else {
            println!("{}", message);
        }
        if target.is_some() {
            return Ok(());
        }
    }

    match target {
        None => commands::scan::run(&settings, cli.verbose, color).await,
        Some(namespace) => {
            let filter = LocationFilter::from_options(cli.cluster.clone(), cli.project.clone());
            commands::connect::run(&settings, namespace, &filter, color).await
        }
    }
}
