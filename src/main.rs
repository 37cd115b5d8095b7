use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use mensentaal::cli;

#[derive(Parser)]
#[command(name = "mensentaal", version)]
#[command(about = "Rewrite political text in plain language", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP backend
    Serve {
        /// Path to config file (defaults to ./mensentaal.toml or ~/.config/mensentaal/config.toml)
        #[arg(long)]
        config: Option<String>,

        /// Listen port (overrides PORT and the config file)
        #[arg(short, long)]
        port: Option<u16>,

        /// Override completion model (e.g., "gpt-4o-mini")
        #[arg(long)]
        model: Option<String>,

        /// Use a canned completion client instead of calling a provider
        #[arg(long)]
        dry_run: bool,
    },
    /// Validate configuration and environment without starting the server
    CheckConfig {
        /// Path to config file
        #[arg(long)]
        config: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // RUST_LOG wins; plain `info` otherwise
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve {
            config,
            port,
            model,
            dry_run,
        } => {
            cli::serve::run(config, port, model, dry_run).await?;
        }
        Commands::CheckConfig { config } => {
            cli::config_check::run(config)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_serve_defaults() {
        let cli = Cli::try_parse_from(["mensentaal", "serve"]).unwrap();
        match cli.command {
            Commands::Serve {
                config,
                port,
                model,
                dry_run,
            } => {
                assert!(config.is_none());
                assert!(port.is_none());
                assert!(model.is_none());
                assert!(!dry_run);
            }
            _ => panic!("expected serve"),
        }
    }

    #[test]
    fn test_parse_serve_with_all_args() {
        let cli = Cli::try_parse_from([
            "mensentaal",
            "serve",
            "--config",
            "custom.toml",
            "--port",
            "8080",
            "--model",
            "gpt-4o-mini",
            "--dry-run",
        ])
        .unwrap();
        match cli.command {
            Commands::Serve {
                config,
                port,
                model,
                dry_run,
            } => {
                assert_eq!(config.unwrap(), "custom.toml");
                assert_eq!(port, Some(8080));
                assert_eq!(model.unwrap(), "gpt-4o-mini");
                assert!(dry_run);
            }
            _ => panic!("expected serve"),
        }
    }

    #[test]
    fn test_parse_serve_rejects_bad_port() {
        assert!(Cli::try_parse_from(["mensentaal", "serve", "--port", "http"]).is_err());
        assert!(Cli::try_parse_from(["mensentaal", "serve", "-p", "70000"]).is_err());
    }

    #[test]
    fn test_parse_check_config() {
        let cli =
            Cli::try_parse_from(["mensentaal", "check-config", "--config", "x.toml"]).unwrap();
        match cli.command {
            Commands::CheckConfig { config } => assert_eq!(config.unwrap(), "x.toml"),
            _ => panic!("expected check-config"),
        }
    }

    #[test]
    fn test_subcommand_required() {
        assert!(Cli::try_parse_from(["mensentaal"]).is_err());
    }
}
