use anyhow::Result;
use clap::Parser;

use graphserve::api;
use graphserve::config::Config;
use graphserve::utils::logging;

#[derive(Parser)]
#[clap(version, author = "graphserve contributors")]
enum Cli {
    /// Start the graph service
    Serve {
        #[clap(short, long, default_value = "config.toml")]
        config: String,
        /// Directory of extension modules to load at startup
        #[clap(short, long)]
        extension_dir: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli {
        Cli::Serve {
            config,
            extension_dir,
        } => {
            let mut config = match Config::load(&config) {
                Ok(config) => config,
                Err(e) => {
                    eprintln!(
                        "Failed to load config from '{}': {}, using default config",
                        config, e
                    );
                    Config::default()
                }
            };
            if extension_dir.is_some() {
                config.extension_dir = extension_dir;
            }

            logging::init(&config).map_err(|e| anyhow::anyhow!(e.to_string()))?;

            let result = api::start_service(config).await;
            logging::shutdown();
            result?;
        }
    }

    Ok(())
}
