//! Общий словарь событий темы.
//!
//! - `names`: канонические имена событий — контракт между виджетами.
//! - `payload`: типизированные полезные нагрузки и `ThemeEvent`.

pub mod names;
pub mod payload;

pub use payload::*;
