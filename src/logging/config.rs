use serde::{Deserialize, Serialize};

/// Конфигурация логирования.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Директива фильтра, например `"info"` или `"vitrina=debug"`.
    pub level: String,
    /// Вывод в формате JSON вместо текстового.
    pub json: bool,
    /// ANSI-цвета в текстовом выводе.
    pub ansi: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            ansi: true,
        }
    }
}

impl LoggingConfig {
    /// Применяет переопределения из окружения: `VITRINA_LOG` задаёт
    /// директиву фильтра целиком.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(level) = std::env::var("VITRINA_LOG") {
            if !level.is_empty() {
                self.level = level;
            }
        }
    }
}
