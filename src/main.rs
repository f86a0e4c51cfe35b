use clap::{Parser, Subcommand};
use dashboard::config::{ConfigLoader, DashboardConfig, OutputConfig};
use dashboard::dashboard::Dashboard;
use dashboard::source::HttpMetricsSource;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "dashboard")]
#[command(version = "0.1.0")]
#[command(about = "Terminal dashboard for game server health metrics", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Poll the metrics endpoint and render the dashboard
    Run {
        /// Path to the configuration file (JSON/YAML/TOML)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Base URL of the server exposing /metrics
        #[arg(short, long)]
        server_url: Option<String>,

        /// Refresh interval in milliseconds
        #[arg(short, long)]
        interval_ms: Option<u64>,

        /// Render a single cycle and exit
        #[arg(long, default_value_t = false)]
        once: bool,
    },
    /// Validate a configuration file
    Check {
        /// Path to the configuration file
        #[arg(short, long)]
        config: PathBuf,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    if std::env::var("RUST_LOG").is_err() {
        unsafe { std::env::set_var("RUST_LOG", "info"); }
    }
    let cli = Cli::parse();
    let logger = env_logger::Builder::from_default_env().build();

    match cli.command {
        Commands::Run {
            config,
            server_url,
            interval_ms,
            once,
        } => {
            let mut config_data = match &config {
                Some(path) => ConfigLoader::load(path)?,
                None => DashboardConfig::default(),
            };
            if let Some(url) = server_url {
                config_data.server_url = url;
            }
            if let Some(ms) = interval_ms {
                config_data.refresh_interval_ms = ms;
            }
            ConfigLoader::validate(&config_data)?;

            let console = matches!(config_data.output, None | Some(OutputConfig::Console));
            let multi = Arc::new(indicatif::MultiProgress::new());
            if console {
                let level = logger.filter();
                indicatif_log_bridge::LogWrapper::new((*multi).clone(), logger).try_init()?;
                log::set_max_level(level);
            } else {
                let level = logger.filter();
                log::set_boxed_logger(Box::new(logger))?;
                log::set_max_level(level);
            }

            if let Some(path) = &config {
                log::info!("Loaded config from {:?}", path);
            }

            let source = Arc::new(HttpMetricsSource::new(&config_data)?);
            log::info!("Metrics endpoint: {}", source.metrics_url());

            let renderer = ConfigLoader::create_renderer(&config_data, Some(multi.clone()))?;
            let mut dashboard = Dashboard::new(source, renderer, &config_data);

            if once {
                dashboard.resolve_address().await;
                dashboard.poll_cycle().await?;
            } else {
                dashboard.run().await;
            }
        }
        Commands::Check { config } => {
            match ConfigLoader::load(&config) {
                Ok(cfg) => {
                    println!("✅ Config is valid:");
                    println!("   Server: {}{}", cfg.server_url, cfg.metrics_path);
                    println!("   Metadata: {}", cfg.metadata_url);
                    println!("   Refresh: {}ms", cfg.refresh_interval_ms);
                    println!("   Output: {:?}", cfg.output.unwrap_or(OutputConfig::Console));
                }
                Err(e) => {
                    eprintln!("❌ Config error: {}", e);
                    std::process::exit(1);
                }
            }
        }
    }

    Ok(())
}
