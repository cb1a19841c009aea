//! Pokemon index site server and verification runner.
//!
//! Usage:
//!   pokemon-index serve --addr 127.0.0.1:8080
//!   pokemon-index verify --defects all --json

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use pokemon_index::{DefectSet, Scenario, ServeConfig, Site, SuiteConfig, Wiring, run_suite, server};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "pokemon-index")]
#[command(about = "Pokemon index demo site and its end-to-end verification suite")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the site over HTTP
    Serve {
        /// Address to listen on
        #[arg(long, default_value = "127.0.0.1:8080")]
        addr: SocketAddr,

        /// Serve files from this directory instead of the embedded site
        #[arg(long)]
        root: Option<PathBuf>,
    },
    /// Run the verification suite
    Verify {
        /// Site under test; starts the embedded site when omitted
        #[arg(long)]
        base_url: Option<String>,

        /// Defects to seed into the page wiring: a comma list, `all` or `none`
        #[arg(long, default_value = "none")]
        defects: DefectSet,

        /// Run only these scenarios
        #[arg(long = "scenario")]
        scenarios: Vec<Scenario>,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .compact()
        .init();

    match args.command {
        Command::Serve { addr, root } => {
            let config = ServeConfig {
                addr,
                site_root: root,
            };
            server::serve(&config)
                .await
                .with_context(|| format!("failed to serve on {addr}"))
        }
        Command::Verify {
            base_url,
            defects,
            scenarios,
            json,
        } => verify(base_url, defects, scenarios, json).await,
    }
}

async fn verify(
    base_url: Option<String>,
    defects: DefectSet,
    scenarios: Vec<Scenario>,
    json: bool,
) -> Result<()> {
    let mut config = SuiteConfig::from_env().context("invalid suite environment")?;
    if let Some(base_url) = base_url {
        config.base_url = Some(base_url);
    }
    if config.base_url.is_none() {
        let addr = server::spawn(SocketAddr::from(([127, 0, 0, 1], 0)), Site::embedded())
            .await
            .context("failed to start the embedded site")?;
        info!(%addr, "started embedded site");
        config.base_url = Some(format!("http://{addr}/"));
    }

    let scenarios = if scenarios.is_empty() {
        Scenario::ALL.to_vec()
    } else {
        scenarios
    };
    let report = run_suite(&config, &Wiring::seeded(defects), &scenarios)
        .await
        .context("verification suite could not run")?;

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&report).context("failed to encode report")?
        );
    } else {
        println!("{report}");
    }

    let failed = report.failed().len();
    if failed > 0 {
        bail!("{failed} scenario(s) failed");
    }
    Ok(())
}
