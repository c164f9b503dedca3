use thiserror::Error;

/// Ошибка при оформлении подписки.
///
/// Публикация ошибок не имеет: сбой подписчика изолируется внутри
/// доставки и наружу не выходит.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubscribeError {
    #[error("event name must not be empty")]
    EmptyEventName,

    #[error("subscriber limit exceeded for event `{event}` (limit {limit})")]
    SubscriberLimitExceeded { event: String, limit: usize },
}
