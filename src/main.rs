use clap::Parser;
use mycars::utils::{logger, validation::Validate};
use mycars::{CliConfig, TomlConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    let toml = match &cli.config {
        Some(path) => match TomlConfig::from_file(path) {
            Ok(config) => Some(config),
            Err(e) => {
                eprintln!("❌ Failed to load {}: {}", path, e);
                std::process::exit(1);
            }
        },
        None => None,
    };

    let json_logs = cli.json_logs || toml.as_ref().is_some_and(TomlConfig::json_logs);
    let level = toml.as_ref().and_then(TomlConfig::log_level);
    if json_logs {
        logger::init_json_logger(cli.verbose, level);
    } else {
        logger::init_cli_logger(cli.verbose, level);
    }

    tracing::info!("Starting mycars");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let validated = match &toml {
        Some(config) => config.validate(),
        None => cli.validate(),
    };
    if let Err(e) = validated {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }

    let served = match &toml {
        Some(config) => mycars::serve(config).await,
        None => mycars::serve(&cli).await,
    };

    if let Err(e) = served {
        tracing::error!("❌ Server stopped with an error: {}", e);
        return Err(e.into());
    }

    Ok(())
}
