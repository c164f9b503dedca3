use std::sync::Arc;

use dashmap::DashMap;
use once_cell::sync::Lazy;

/// Пул для повторного использования `Arc<str>` по одинаковым именам событий.
/// Словарь имён ограничен и общий для всех шин процесса, поэтому каждое
/// имя хранится ровно один раз.
static EVENT_INTERN: Lazy<DashMap<String, Arc<str>>> = Lazy::new(DashMap::new);

/// Возвращает interned `Arc<str>` для данного имени события.
/// Для нового имени создаёт запись в пуле, для известного — отдаёт
/// уже существующий `Arc`.
#[inline(always)]
pub(crate) fn intern_event<S: AsRef<str>>(event: S) -> Arc<str> {
    let name = event.as_ref();
    if let Some(found) = EVENT_INTERN.get(name) {
        return found.clone();
    }
    EVENT_INTERN
        .entry(name.to_string())
        .or_insert_with(|| Arc::from(name))
        .clone()
}
