use config::{Config, ConfigError, Environment};
use serde::{Deserialize, Serialize};

/// Настройки шины событий.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BusSettings {
    /// Предел подписчиков на одно событие. 0 — без ограничения.
    pub max_subscribers: usize,
    /// Логировать ли перехваченные паники обработчиков.
    pub log_handler_panics: bool,
}

impl BusSettings {
    /// Загружает настройки: значения по умолчанию, поверх —
    /// переменные окружения с префиксом `VITRINA_`.
    pub fn load() -> Result<Self, ConfigError> {
        let cfg = Config::builder()
            .set_default("max_subscribers", 0)?
            .set_default("log_handler_panics", true)?
            .add_source(Environment::with_prefix("VITRINA").try_parsing(true))
            .build()?;

        cfg.try_deserialize()
    }
}

impl Default for BusSettings {
    fn default() -> Self {
        Self {
            max_subscribers: 0,
            log_handler_panics: true,
        }
    }
}
