use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use uscout::config::Config;
use uscout::models::{Platform, ScanStats, ValidationRule};
use uscout::registry::{self, AddOutcome};
use uscout::report::{summary_table, HtmlReport};
use uscout::scanner::{ScanObservers, Scanner};

#[derive(Parser)]
#[command(
    name = "uscout",
    version,
    about = "Concurrent username presence scanner across web platforms",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to a TOML config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log format (text, json)
    #[arg(long, global = true, default_value = "text")]
    log_format: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan usernames across registered platforms
    Scan {
        /// Usernames to scan (comma-separated); prompts when omitted
        #[arg(short, long)]
        users: Option<String>,

        /// Platforms to scan (comma-separated names, default: all)
        #[arg(short, long)]
        platforms: Option<String>,

        /// Maximum concurrent probes
        #[arg(short, long)]
        concurrency: Option<usize>,

        /// Platform registry file path
        #[arg(short, long)]
        registry: Option<PathBuf>,

        /// Output directory for the HTML report
        #[arg(short, long, default_value = "reports")]
        output_dir: PathBuf,

        /// Skip writing the HTML report
        #[arg(long, default_value = "false")]
        no_report: bool,
    },

    /// Add or update a platform in the registry
    AddPlatform {
        /// Platform name
        #[arg(short, long)]
        name: String,

        /// URL template, e.g. https://platform.com/{}
        #[arg(short, long)]
        url: String,

        /// Text whose presence indicates the user does not exist
        #[arg(long)]
        validation: Option<String>,

        /// Platform registry file path
        #[arg(short, long)]
        registry: Option<PathBuf>,
    },

    /// List registered platform names
    Platforms {
        /// Platform registry file path
        #[arg(short, long)]
        registry: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_tracing(&cli.log_format, cli.verbose)?;

    let config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::from_env()?,
    };
    config.validate().context("Invalid configuration")?;

    match cli.command {
        Commands::Scan {
            users,
            platforms,
            concurrency,
            registry,
            output_dir,
            no_report,
        } => {
            scan(
                config, users, platforms, concurrency, registry, output_dir, no_report,
            )
            .await?;
        }

        Commands::AddPlatform {
            name,
            url,
            validation,
            registry,
        } => {
            add_platform(&config, name, url, validation, registry)?;
        }

        Commands::Platforms { registry } => {
            list_platforms(&config, registry)?;
        }
    }

    Ok(())
}

fn setup_tracing(format: &str, verbose: bool) -> Result<()> {
    let env_filter = if verbose {
        tracing_subscriber::EnvFilter::new("uscout=debug,info")
    } else {
        tracing_subscriber::EnvFilter::new("uscout=info,warn")
    };

    match format {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer())
                .init();
        }
    }

    Ok(())
}

#[allow(clippy::too_many_arguments)]
async fn scan(
    mut config: Config,
    users: Option<String>,
    platforms: Option<String>,
    concurrency: Option<usize>,
    registry_path: Option<PathBuf>,
    output_dir: PathBuf,
    no_report: bool,
) -> Result<()> {
    if let Some(concurrency) = concurrency {
        config.scanner.concurrency = concurrency;
    }
    if let Some(path) = registry_path {
        config.scanner.registry_path = path;
    }

    let all_platforms = registry::load(&config.scanner.registry_path)?;

    let identifiers = match users {
        Some(users) => split_list(&users),
        None => prompt_identifiers()?,
    };
    if identifiers.is_empty() {
        anyhow::bail!("No username(s) provided");
    }

    let chosen = match platforms {
        Some(names) => registry::select(&all_platforms, &split_list(&names))?,
        None => {
            let names = prompt_platforms(&all_platforms)?;
            registry::select(&all_platforms, &names)?
        }
    };

    println!(
        "Scanning {} across {} platform(s)...",
        identifiers.join(", "),
        chosen.len()
    );

    let scanner = Scanner::new(&config.scanner)?;

    let total = chosen.len() * identifiers.len();
    let completed = Arc::new(AtomicUsize::new(0));
    let observers = ScanObservers::new()
        .on_progress({
            let completed = Arc::clone(&completed);
            move || {
                let done = completed.fetch_add(1, Ordering::Relaxed) + 1;
                eprint!("\rscanning {done}/{total}");
                let _ = io::stderr().flush();
            }
        })
        .on_error(|message| tracing::warn!(message, "probe error"));

    let start = Instant::now();

    // Abort without partial save on interrupt: in-flight probes are
    // dropped and nothing collected so far is persisted.
    let results = tokio::select! {
        results = scanner.scan(&identifiers, &chosen, &observers) => results?,
        _ = tokio::signal::ctrl_c() => {
            eprintln!("\nScan interrupted, discarding partial results.");
            return Ok(());
        }
    };
    eprintln!();

    let duration = start.elapsed().as_secs_f64();
    let stats = ScanStats::from_results(&results, chosen.len(), identifiers.len(), duration);

    print!("{}", summary_table(&results));
    println!(
        "{} found / {} checked in {:.1} seconds.",
        stats.found, stats.total, duration
    );

    if !no_report {
        let report = HtmlReport::new(&output_dir)?;
        let path = report.save(&identifiers, &results, &stats)?;
        println!("Report saved to {}", path.display());
    }

    Ok(())
}

fn add_platform(
    config: &Config,
    name: String,
    url: String,
    validation: Option<String>,
    registry_path: Option<PathBuf>,
) -> Result<()> {
    let path = registry_path.unwrap_or_else(|| config.scanner.registry_path.clone());

    let platform = Platform {
        name,
        url_template: url,
        validation: validation
            .map(|text| text.trim().to_string())
            .filter(|text| !text.is_empty())
            .map(|text_absent| ValidationRule { text_absent }),
    };
    let name = platform.name.trim().to_lowercase();

    match registry::add_or_update(&path, platform)? {
        AddOutcome::Added => println!("Platform '{name}' added."),
        AddOutcome::Updated => println!("Platform '{name}' updated."),
    }

    Ok(())
}

fn list_platforms(config: &Config, registry_path: Option<PathBuf>) -> Result<()> {
    let path = registry_path.unwrap_or_else(|| config.scanner.registry_path.clone());
    let platforms = registry::load(&path)?;

    for name in registry::platform_names(&platforms) {
        println!("{name}");
    }

    Ok(())
}

/// Split a comma-separated list, falling back to whitespace
fn split_list(input: &str) -> Vec<String> {
    let parts: Vec<&str> = if input.contains(',') {
        input.split(',').collect()
    } else {
        input.split_whitespace().collect()
    };

    parts
        .into_iter()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Prompt for usernames on stdin, defaulting to `admin`
fn prompt_identifiers() -> Result<Vec<String>> {
    print!("Enter username(s) to scan (default: admin): ");
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().read_line(&mut line)?;

    let line = line.trim();
    if line.is_empty() {
        Ok(vec!["admin".to_string()])
    } else {
        Ok(split_list(line))
    }
}

/// List registered platforms and prompt for a selection, defaulting
/// to all (an empty selection selects everything downstream)
fn prompt_platforms(platforms: &[Platform]) -> Result<Vec<String>> {
    println!(
        "Available platforms: {}",
        registry::platform_names(platforms).join(", ")
    );
    print!("Enter platform(s) to scan (default: all): ");
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().read_line(&mut line)?;

    Ok(split_list(line.trim()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_list_on_commas() {
        assert_eq!(split_list("alice, bob ,carol"), ["alice", "bob", "carol"]);
    }

    #[test]
    fn test_split_list_on_whitespace() {
        assert_eq!(split_list("alice bob"), ["alice", "bob"]);
    }

    #[test]
    fn test_split_list_drops_empty_entries() {
        assert_eq!(split_list("alice,,bob,"), ["alice", "bob"]);
        assert!(split_list("").is_empty());
        assert!(split_list(" , ").is_empty());
    }
}
