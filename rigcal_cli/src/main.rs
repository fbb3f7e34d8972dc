mod cli;
mod run;

use clap::Parser;
use eyre::{Result, WrapErr};
use std::path::Path;

use cli::{Cli, Commands, FILE_GUARD};
use rigcal_sim::Scenario;

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    let config = load_config(&cli.config)?;
    init_tracing(&cli, &config.logging)?;

    match &cli.cmd {
        Commands::Calibrate {
            scenario,
            full,
            hz,
            timeout_s,
        } => run::run_calibrate(&config, scenario, *full, *hz, *timeout_s, cli.json),
        Commands::Scenarios => {
            for name in Scenario::NAMES {
                println!("{name}");
            }
            Ok(())
        }
    }
}

fn load_config(path: &Path) -> Result<rigcal_config::Config> {
    if !path.exists() {
        return Ok(rigcal_config::Config::default());
    }
    let text = std::fs::read_to_string(path)
        .wrap_err_with(|| format!("read config {}", path.display()))?;
    let config = rigcal_config::load_toml(&text).wrap_err("parse config TOML")?;
    config.validate().wrap_err("validate config")?;
    Ok(config)
}

fn init_tracing(cli: &Cli, logging: &rigcal_config::Logging) -> Result<()> {
    use tracing_subscriber::EnvFilter;
    use tracing_subscriber::fmt;

    let level = if cli.log_level == "info" {
        logging.level.clone().unwrap_or_else(|| "info".to_string())
    } else {
        cli.log_level.clone()
    };
    let filter = EnvFilter::try_new(&level).unwrap_or_else(|_| EnvFilter::new("info"));

    if let Some(file) = &logging.file {
        let path = Path::new(file);
        let dir = path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        let name = path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "rigcal.log".into());
        let appender = tracing_appender::rolling::never(dir, name);
        let (writer, guard) = tracing_appender::non_blocking(appender);
        let _ = FILE_GUARD.set(guard);
        let subscriber = fmt()
            .with_env_filter(filter)
            .with_writer(writer)
            .json()
            .finish();
        tracing::subscriber::set_global_default(subscriber)
            .wrap_err("install file log subscriber")?;
    } else if cli.json {
        fmt().with_env_filter(filter).json().init();
    } else {
        fmt().with_env_filter(filter).init();
    }

    Ok(())
}
