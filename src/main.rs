//! Deeplink router CLI.
//!
//! Loads a TOML route file and resolves URLs against it.
//!
//! ```text
//! deeplink-router --routes routes.toml resolve "https://example.com/example3/1/details/John"
//! deeplink-router --routes routes.toml routes
//! deeplink-router --routes routes.toml check
//! deeplink-router --routes routes.toml link example3 -p id=1 -p name=John
//! deeplink-router --routes routes.toml watch < urls.txt
//! ```

use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use serde_json::json;

use deeplink_router::config::watcher::ConfigWatcher;
use deeplink_router::config::{load_config, ConfigError};
use deeplink_router::observability::logging::init_logging;
use deeplink_router::{Bindings, Deeplink, DeeplinkRouter, SharedRouter};

#[derive(Parser)]
#[command(name = "deeplink-router")]
#[command(about = "Resolve URLs against a deeplink route file", long_about = None)]
struct Cli {
    /// Route file (TOML).
    #[arg(short, long, default_value = "routes.toml")]
    routes: PathBuf,

    /// Override the configured log level.
    #[arg(long)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve URLs and print one JSON object per URL
    Resolve {
        #[arg(required = true)]
        urls: Vec<String>,
    },
    /// List compiled routes in precedence order
    Routes,
    /// Validate the route file
    Check,
    /// Build a URL for a route
    Link {
        route: String,
        /// Parameter as `name=value`, or a bare `name` for a key without value.
        #[arg(short = 'p', long = "param", value_parser = parse_param)]
        params: Vec<(String, Option<String>)>,
    },
    /// Resolve URLs read from stdin, reloading the route file when it changes
    Watch,
}

fn parse_param(raw: &str) -> Result<(String, Option<String>), String> {
    let (name, value) = match raw.split_once('=') {
        Some((name, value)) => (name, Some(value.to_string())),
        None => (raw, None),
    };
    if name.is_empty() {
        return Err(format!("parameter {:?} has no name", raw));
    }
    Ok((name.to_string(), value))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match load_config(&cli.routes) {
        Ok(config) => config,
        Err(ConfigError::Validation(errors)) => {
            for e in &errors {
                eprintln!("error: {}", e);
            }
            return Err(format!(
                "{} configuration error(s) in {}",
                errors.len(),
                cli.routes.display()
            )
            .into());
        }
        Err(e) => return Err(e.into()),
    };

    if let Some(level) = cli.log_level {
        config.observability.log_level = level;
    }
    init_logging(&config.observability)?;

    let router = DeeplinkRouter::from_config(&config)?;
    tracing::info!(
        path = %cli.routes.display(),
        routes = router.table().len(),
        "Route file loaded"
    );

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::Resolve { urls } => {
            for url in &urls {
                print_resolution(&mut out, url, router.resolve(url))?;
            }
        }
        Commands::Routes => {
            let schema = router.table().primary_schema();
            let routes: Vec<_> = router
                .table()
                .routes()
                .iter()
                .map(|route| {
                    json!({
                        "name": route.name(),
                        "template": route.template(),
                        "hosts": route.hosts(),
                        "parameters": route.parameters(),
                        "example": route.example_url(schema),
                    })
                })
                .collect();
            writeln!(out, "{}", serde_json::to_string_pretty(&routes)?)?;
        }
        Commands::Check => {
            writeln!(
                out,
                "ok: {} route(s), schemas {:?}",
                router.table().len(),
                router.table().schemas().names()
            )?;
        }
        Commands::Link { route, params } => {
            let params: Bindings = params.into_iter().collect();
            writeln!(out, "{}", router.url_for(&route, &params)?)?;
        }
        Commands::Watch => {
            let shared = Arc::new(SharedRouter::from(router));
            let _watcher = ConfigWatcher::new(&cli.routes, shared.clone()).run()?;

            for line in std::io::stdin().lock().lines() {
                let line = line?;
                let url = line.trim();
                if url.is_empty() {
                    continue;
                }
                print_resolution(&mut out, url, shared.resolve(url))?;
                out.flush()?;
            }
        }
    }

    Ok(())
}

fn print_resolution(
    out: &mut impl Write,
    url: &str,
    deeplink: Option<Deeplink>,
) -> Result<(), Box<dyn std::error::Error>> {
    let line = json!({ "url": url, "deeplink": deeplink });
    writeln!(out, "{}", serde_json::to_string(&line)?)?;
    Ok(())
}
