//! Логирование шины.
//!
//! Библиотечный код только эмитит события `tracing`; установка
//! подписчика — решение хоста. `init_logging` — готовая настройка
//! для бинарей и примеров: env-filter плюс консольный слой.

pub mod config;

pub use config::LoggingConfig;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Инициализация логирования с конфигурацией.
pub fn init_logging(mut config: LoggingConfig) -> Result<(), Box<dyn std::error::Error>> {
    config.apply_env_overrides();

    let env_filter = EnvFilter::try_new(&config.level)?;

    // Console layer
    let fmt_layer = if config.json {
        tracing_subscriber::fmt::layer().json().boxed()
    } else {
        tracing_subscriber::fmt::layer().with_ansi(config.ansi).boxed()
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        log_level = %config.level,
        json = config.json,
        "logging initialized"
    );

    Ok(())
}
