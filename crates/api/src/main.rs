use config::{ApiConfig, LoggingConfig};

#[tokio::main]
async fn main() {
    // Load configuration first to get logging settings
    let config = ApiConfig::load().unwrap_or_else(|e| {
        eprintln!("Failed to load configuration: {e}");
        eprintln!("Application cannot start without a valid configuration.");
        std::process::exit(1);
    });

    // Initialize tracing with configuration from config.yaml or the environment
    init_tracing(&config.logging);

    if let Err(e) = api::run_server(config).await {
        tracing::error!(error = %e, "Server terminated with an error");
        std::process::exit(1);
    }
}

fn init_tracing(logging_config: &LoggingConfig) {
    let filter = logging_config.filter_directive();

    // Initialize tracing based on the format specified in config
    match logging_config.format.as_str() {
        "json" => {
            tracing_subscriber::fmt()
                .json()
                .with_env_filter(filter)
                .init();
        }
        "compact" => {
            tracing_subscriber::fmt()
                .compact()
                .with_env_filter(filter)
                .init();
        }
        _ => {
            tracing_subscriber::fmt()
                .pretty()
                .with_env_filter(filter)
                .init();
        }
    }
}
