//! Подсистема Publish–Subscribe (pub/sub).
//!
//! Модуль реализует синхронную внутрипроцессную шину событий, через
//! которую независимые виджеты витрины обмениваются уведомлениями,
//! не зная друг о друге:
//!
//! - `registry`: реестр подписок, операции subscribe/publish и статистика.
//! - `subscription`: дескриптор подписки и явная отписка.
//! - `intern` (приватный): пул `Arc<str>` для имён событий.
//!
//! Публичный API переэкспортирует:
//! - `registry::*`
//! - `subscription::*`

pub mod registry;
pub mod subscription;

mod intern;

pub use registry::*;
pub use subscription::*;

pub(crate) use intern::intern_event;
