use std::sync::{Arc, Weak};

use super::registry::SubscriberMap;

/// Дескриптор одной подписки на событие.
///
/// Возвращается из `EventBus::subscribe` и снимает ровно ту запись,
/// к которой привязан: удаление идёт по идентификатору подписки, а не
/// по значению обработчика, поэтому одинаковые обработчики, подписанные
/// дважды, отписываются независимо.
///
/// Сам по себе дескриптор ничего не делает: отписка происходит только
/// явным вызовом [`Subscription::unsubscribe`], drop оставляет подписку
/// активной.
#[must_use = "dropping a Subscription keeps it active; call unsubscribe() to remove it"]
pub struct Subscription<T> {
    /// Слабая ссылка на реестр: дескриптор не продлевает жизнь шины.
    registry: Weak<SubscriberMap<T>>,
    /// Имя события, на которое подписаны.
    event: Arc<str>,
    /// Идентификатор записи в списке подписчиков.
    id: u64,
}

impl<T> Subscription<T> {
    pub(crate) fn new(registry: Weak<SubscriberMap<T>>, event: Arc<str>, id: u64) -> Self {
        Self {
            registry,
            event,
            id,
        }
    }

    /// Снимает подписку.
    ///
    /// Если шина уже уничтожена или запись уже удалена — тихий no-op.
    /// Остальные подписки на то же событие не затрагиваются.
    pub fn unsubscribe(self) {
        if let Some(registry) = self.registry.upgrade() {
            if let Some(mut entries) = registry.get_mut(&*self.event) {
                entries.retain(|entry| entry.id != self.id);
            }
        }
    }

    /// Возвращает имя события, на которое подписались.
    pub fn event_name(&self) -> &Arc<str> {
        &self.event
    }

    /// Идентификатор подписки; уникален в пределах шины.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Проверяет, что запись всё ещё состоит в реестре.
    pub fn is_active(&self) -> bool {
        match self.registry.upgrade() {
            Some(registry) => registry
                .get(&*self.event)
                .map_or(false, |entries| entries.iter().any(|e| e.id == self.id)),
            None => false,
        }
    }
}

impl<T> std::fmt::Debug for Subscription<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("event", &self.event)
            .field("id", &self.id)
            .finish()
    }
}
