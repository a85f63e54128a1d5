use servicedex_domain::Config;
use tracing_subscriber::EnvFilter;

/// `RUST_LOG` wins over the configured level unless a level was given on
/// the command line.
pub fn init_logging(config: &Config, level_from_cli: bool) {
    let configured = || EnvFilter::new(&config.logging.level);

    let filter = if level_from_cli {
        configured()
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| configured())
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}
