//! lookup-route
//!
//! Identify the organization, space and application(s) a route is pointing to.
//!
//! # Architecture Overview
//!
//! ```text
//!   ROUTE_URL ──▶ lookup::query ──▶ lookup::domain ──▶ lookup::route ──▶ lookup::enrich
//!                                        │                  │                 │
//!                                        ▼                  ▼                 ▼
//!                               ┌──────────────────────────────────────────────────┐
//!                               │      inventory (Cloud Controller v3 client)      │
//!                               └──────────────────────────────────────────────────┘
//!                                                                             │
//!                                                                             ▼
//!                                              report::reporter ◀──────── Binding
//!                                                     │
//!                                                     ▼ (-t)
//!                                              report::target (cf target -o -s)
//! ```

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use lookup_route::config::{finalize_config, load_config, LookupConfig};
use lookup_route::observability::init_logging;
use lookup_route::report::{CfCliTarget, OutputFormat, Reporter};
use lookup_route::{CloudControllerClient, RouteLookup};

#[derive(Parser)]
#[command(name = "lookup-route", version)]
#[command(
    about = "Identify the application, organization and space a route is pointing to",
    long_about = None
)]
struct Cli {
    /// Target the org/space containing the route
    #[arg(short = 't', long)]
    target: bool,

    /// Config file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// API endpoint, overrides config and the CF CLI target
    #[arg(long)]
    api: Option<String>,

    /// Access token, overrides config and the CF CLI token
    #[arg(long)]
    token: Option<String>,

    /// Accept invalid TLS certificates
    #[arg(long)]
    skip_ssl_validation: bool,

    /// Maximum applications fetched per request
    #[arg(long)]
    batch_size: Option<usize>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    output: OutputFormat,

    /// Route URL including the scheme, e.g. https://api.example.com/v1
    route_url: String,
}

impl Cli {
    fn apply(&self, config: &mut LookupConfig) {
        if let Some(api) = &self.api {
            config.api.endpoint = Some(api.clone());
        }
        if let Some(token) = &self.token {
            config.api.access_token = Some(token.clone());
        }
        if self.skip_ssl_validation {
            config.api.skip_ssl_validation = true;
        }
        if let Some(size) = self.batch_size {
            config.lookup.batch_size = size;
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = load_config(cli.config.as_deref())?;
    cli.apply(&mut config);

    init_logging(&config.observability)?;
    let config = finalize_config(config)?;

    tracing::debug!(
        endpoint = config.api.endpoint.as_deref().unwrap_or_default(),
        batch_size = config.lookup.batch_size,
        max_concurrent_batches = config.lookup.max_concurrent_batches,
        "Configuration loaded"
    );

    let client = CloudControllerClient::new(&config)?;
    let lookup = RouteLookup::new(client, config.lookup.clone());
    let binding = lookup.lookup(&cli.route_url).await?;

    let mut reporter = Reporter::new(io::stdout(), io::stderr(), cli.output);
    reporter.write_binding(&binding)?;

    if cli.target {
        let switcher = CfCliTarget::new(config.target.cf_binary.clone());
        reporter.target(&switcher, &binding).await?;
    }

    Ok(())
}
