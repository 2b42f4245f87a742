use anyhow::{bail, Context, Result};
use clap::Parser;
use platform_config::env::ProcessEnvironment;
use platform_config::{
    ConfigurationManager, EnvironmentVariablesSource, InMemorySource, JsonConfigurationSource,
    LocalFileSystem, TracingLoggerFactory,
};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, Level};
use tracing_subscriber::{fmt, EnvFilter};

/// Build the layered platform configuration and query it
///
/// Sources are applied in this order, later ones overriding earlier ones:
/// 1. Each --config file, in the order given (default: testconfig.json)
/// 2. Environment variables starting with --env-prefix
/// 3. --set overrides
#[derive(Parser, Debug)]
#[command(name = "platform-config")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Paths to look up, e.g. TestingPlatform:Troubleshooting:CrashDump:Enable
    ///
    /// If none are given, every entry is printed.
    queries: Vec<String>,

    /// JSON configuration file (repeatable)
    #[arg(short, long = "config")]
    configs: Vec<PathBuf>,

    /// Prefix of environment variables to merge ('__' separates segments)
    #[arg(short, long)]
    env_prefix: Option<String>,

    /// Override a value, as KEY=VALUE (repeatable)
    #[arg(short, long = "set")]
    overrides: Vec<String>,

    /// Abort the build after this many milliseconds
    #[arg(long)]
    timeout_ms: Option<u64>,

    /// Print the result as a JSON object
    #[arg(long)]
    json: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "warn")]
    log_level: String,

    /// Log to file instead of stderr
    #[arg(long)]
    log_file: Option<PathBuf>,
}

/// Query output goes to stdout, so logs stay on stderr (or a file) and are
/// quiet by default. Source locations are only shown at debug and trace.
fn setup_logging(log_level: &str, log_file: Option<PathBuf>) -> Result<()> {
    let level = match log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::WARN,
    };
    let verbose = matches!(level, Level::TRACE | Level::DEBUG);

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    let subscriber = fmt()
        .compact()
        .with_env_filter(filter)
        .with_target(verbose)
        .with_file(verbose)
        .with_line_number(verbose);

    if let Some(log_path) = log_file {
        let file = std::fs::File::create(log_path)?;
        subscriber.with_ansi(false).with_writer(file).init();
    } else {
        subscriber.with_writer(std::io::stderr).init();
    }

    Ok(())
}

fn build_manager(args: &Args) -> Result<ConfigurationManager> {
    let mut manager = ConfigurationManager::new();

    if args.configs.is_empty() {
        manager.add_source(|| Box::new(JsonConfigurationSource::default()));
    }
    for path in &args.configs {
        let path = path.clone();
        manager.add_source(move || Box::new(JsonConfigurationSource::new(&path)));
    }

    if let Some(prefix) = args.env_prefix.clone() {
        manager.add_source(move || {
            Box::new(EnvironmentVariablesSource::new(
                prefix.clone(),
                Arc::new(ProcessEnvironment),
            ))
        });
    }

    if !args.overrides.is_empty() {
        let overrides = InMemorySource::from_overrides(args.overrides.as_slice())
            .context("Invalid --set argument")?;
        manager.add_source(move || Box::new(overrides.clone()));
    }

    Ok(manager)
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    setup_logging(&args.log_level, args.log_file.clone())?;

    info!("Starting platform-config v{}", env!("CARGO_PKG_VERSION"));

    let manager = build_manager(&args)?;
    info!("Registered {} configuration sources", manager.source_count());

    let file_system = LocalFileSystem::shared();
    let loggers = TracingLoggerFactory;
    let config = match args.timeout_ms {
        Some(ms) => {
            manager
                .build_with_timeout(file_system, Some(&loggers), Duration::from_millis(ms))
                .await
        }
        None => manager.build(file_system, Some(&loggers)).await,
    }
    .context("Failed to build configuration")?;

    if args.queries.is_empty() {
        if args.json {
            println!("{}", serde_json::to_string_pretty(&config)?);
        } else {
            for (key, value) in config.iter() {
                println!("{}={}", key, value);
            }
        }
        return Ok(());
    }

    let mut missing = 0;
    let mut found = serde_json::Map::new();
    for query in &args.queries {
        match config.get(query) {
            Some(value) => {
                if args.json {
                    found.insert(query.clone(), value.into());
                } else {
                    println!("{}={}", query, value);
                }
            }
            None => {
                eprintln!("{}: not found", query);
                missing += 1;
            }
        }
    }
    if args.json {
        println!("{}", serde_json::to_string_pretty(&found)?);
    }

    if missing > 0 {
        bail!("{} of {} paths not found", missing, args.queries.len());
    }

    Ok(())
}
