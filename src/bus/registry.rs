use std::{
    panic::{catch_unwind, AssertUnwindSafe},
    sync::{
        atomic::{AtomicU64, AtomicUsize, Ordering},
        Arc,
    },
};

use dashmap::DashMap;

use super::{intern_event, Subscription};
use crate::{config::BusSettings, error::SubscribeError};

type EventKey = Arc<str>;

/// Обработчик события: унарная процедура над полезной нагрузкой.
pub type Handler<T> = Arc<dyn Fn(&T) + Send + Sync + 'static>;

/// Одна запись в списке подписчиков события.
pub(crate) struct Entry<T> {
    pub(crate) id: u64,
    pub(crate) handler: Handler<T>,
}

impl<T> Clone for Entry<T> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            handler: Arc::clone(&self.handler),
        }
    }
}

/// Имя события → упорядоченный список подписчиков.
pub(crate) type SubscriberMap<T> = DashMap<EventKey, Vec<Entry<T>>>;

/// Синхронная шина событий.
///
/// Поддерживает:
/// - Подписку обработчиков по точному имени события
/// - Доставку по снимку списка подписчиков, в порядке подписки
/// - Изоляцию паник отдельных обработчиков
/// - Статистику публикаций и перехваченных паник
pub struct EventBus<T> {
    /// Реестр подписок. Единственный владелец и мутатор — шина;
    /// наружу реестр доступен только через subscribe/publish и
    /// дескриптор отписки.
    subscribers: Arc<SubscriberMap<T>>,
    /// Монотонный источник идентификаторов подписок.
    next_id: AtomicU64,
    /// Предел подписчиков на одно событие (`None` — без ограничения).
    max_subscribers: Option<usize>,
    /// Логировать ли перехваченные паники обработчиков.
    log_handler_panics: bool,
    /// Общее количество вызовов `publish`.
    pub publish_count: AtomicUsize,
    /// Количество паник обработчиков, перехваченных при доставке.
    pub panic_count: AtomicUsize,
}

impl<T> EventBus<T> {
    /// Создаёт шину с настройками по умолчанию (без ограничения
    /// на количество подписчиков).
    pub fn new() -> Self {
        Self::with_settings(&BusSettings::default())
    }

    /// Создаёт шину с заданными настройками.
    pub fn with_settings(settings: &BusSettings) -> Self {
        Self {
            subscribers: Arc::new(DashMap::new()),
            next_id: AtomicU64::new(1),
            max_subscribers: match settings.max_subscribers {
                0 => None,
                limit => Some(limit),
            },
            log_handler_panics: settings.log_handler_panics,
            publish_count: AtomicUsize::new(0),
            panic_count: AtomicUsize::new(0),
        }
    }

    /// Подписывает обработчик на событие и возвращает дескриптор
    /// для отписки.
    ///
    /// Список подписчиков создаётся при первой подписке и далее живёт,
    /// даже опустев. Повторная подписка того же обработчика даёт
    /// независимую запись: дедупликации нет, каждая запись снимается
    /// только своим дескриптором.
    pub fn subscribe<F>(&self, event: &str, handler: F) -> Result<Subscription<T>, SubscribeError>
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        if event.is_empty() {
            return Err(SubscribeError::EmptyEventName);
        }

        let key = intern_event(event);
        let mut entries = self.subscribers.entry(key.clone()).or_default();
        if let Some(limit) = self.max_subscribers {
            if entries.len() >= limit {
                return Err(SubscribeError::SubscriberLimitExceeded {
                    event: key.to_string(),
                    limit,
                });
            }
        }

        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        entries.push(Entry {
            id,
            handler: Arc::new(handler),
        });
        drop(entries);

        Ok(Subscription::new(
            Arc::downgrade(&self.subscribers),
            key,
            id,
        ))
    }

    /// Публикует событие всем текущим подписчикам, в порядке подписки.
    ///
    /// Доставка идёт по снимку списка, взятому в начале вызова:
    /// подписки и отписки из обработчиков вступают в силу со следующей
    /// публикации. Паника обработчика перехватывается, учитывается в
    /// `panic_count` и не прерывает доставку остальным; издатель о ней
    /// не узнаёт. Публикация без подписчиков — no-op.
    pub fn publish(&self, event: &str, data: &T) {
        self.publish_count.fetch_add(1, Ordering::Relaxed);

        let snapshot = match self.subscribers.get(event) {
            Some(entries) => entries.value().clone(),
            None => return,
        };

        for entry in snapshot {
            let delivery = catch_unwind(AssertUnwindSafe(|| (entry.handler)(data)));
            if delivery.is_err() {
                self.panic_count.fetch_add(1, Ordering::Relaxed);
                if self.log_handler_panics {
                    tracing::error!(
                        event,
                        subscriber = entry.id,
                        "event handler panicked during dispatch"
                    );
                }
            }
        }
    }

    /// Возвращает количество активных подписок на событие.
    pub fn subscriber_count(&self, event: &str) -> usize {
        self.subscribers
            .get(event)
            .map_or(0, |entries| entries.len())
    }

    /// Проверяет, что ни на одно событие нет активных подписок.
    pub fn is_empty(&self) -> bool {
        self.subscribers.iter().all(|entries| entries.is_empty())
    }

    #[cfg(test)]
    pub(crate) fn has_sequence(&self, event: &str) -> bool {
        self.subscribers.contains_key(event)
    }
}

impl<T> Default for EventBus<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;

    /// Helper: шина над `u32` и журнал доставленных значений.
    fn bus_with_log() -> (EventBus<u32>, Arc<Mutex<Vec<String>>>) {
        (EventBus::new(), Arc::new(Mutex::new(Vec::new())))
    }

    fn recorder(log: &Arc<Mutex<Vec<String>>>, tag: &'static str) -> impl Fn(&u32) + Send + Sync {
        let log = Arc::clone(log);
        move |n: &u32| log.lock().unwrap().push(format!("{tag}:{n}"))
    }

    /// Проверяет, что сообщение доставляется подписчику и счётчики
    /// публикаций обновляются правильно.
    #[test]
    fn test_publish_and_receive() {
        let (bus, log) = bus_with_log();
        let _sub = bus.subscribe("cart-update", recorder(&log, "drawer")).unwrap();

        bus.publish("cart-update", &3);

        assert_eq!(*log.lock().unwrap(), vec!["drawer:3"]);
        assert_eq!(bus.publish_count.load(Ordering::Relaxed), 1);
        assert_eq!(bus.panic_count.load(Ordering::Relaxed), 0);
    }

    /// Проверяет, что публикация без подписчиков — no-op: счётчик
    /// публикаций растёт, список подписчиков не создаётся.
    #[test]
    fn test_publish_without_subscribers() {
        let bus: EventBus<u32> = EventBus::new();
        bus.publish("cart-update", &1);

        assert_eq!(bus.publish_count.load(Ordering::Relaxed), 1);
        assert!(!bus.has_sequence("cart-update"));
    }

    /// Проверяет, что обработчики вызываются в точном порядке подписки
    /// при каждой публикации.
    #[test]
    fn test_dispatch_order() {
        let (bus, log) = bus_with_log();
        let _a = bus.subscribe("cart-update", recorder(&log, "A")).unwrap();
        let _b = bus.subscribe("cart-update", recorder(&log, "B")).unwrap();
        let _c = bus.subscribe("cart-update", recorder(&log, "C")).unwrap();

        bus.publish("cart-update", &3);
        bus.publish("cart-update", &4);

        assert_eq!(
            *log.lock().unwrap(),
            vec!["A:3", "B:3", "C:3", "A:4", "B:4", "C:4"]
        );
    }

    /// Проверяет, что отписка снимает ровно одну запись, а опустевший
    /// список остаётся в реестре.
    #[test]
    fn test_unsubscribe_exactly_one() {
        let (bus, log) = bus_with_log();
        let a = bus.subscribe("cart-update", recorder(&log, "A")).unwrap();
        let b = bus.subscribe("cart-update", recorder(&log, "B")).unwrap();

        b.unsubscribe();
        bus.publish("cart-update", &7);
        assert_eq!(*log.lock().unwrap(), vec!["A:7"]);

        a.unsubscribe();
        assert_eq!(bus.subscriber_count("cart-update"), 0);
        // список создан первой подпиской и живёт дальше пустым
        assert!(bus.has_sequence("cart-update"));
    }

    /// Проверяет, что один и тот же логический обработчик, подписанный
    /// дважды, даёт две независимые записи, снимаемые по отдельности.
    #[test]
    fn test_duplicate_handler_two_entries() {
        let (bus, log) = bus_with_log();
        let first = bus.subscribe("quantity-update", recorder(&log, "X")).unwrap();
        let _second = bus.subscribe("quantity-update", recorder(&log, "X")).unwrap();

        bus.publish("quantity-update", &1);
        assert_eq!(*log.lock().unwrap(), vec!["X:1", "X:1"]);

        first.unsubscribe();
        bus.publish("quantity-update", &2);
        assert_eq!(*log.lock().unwrap(), vec!["X:1", "X:1", "X:2"]);
    }

    /// Проверяет, что пустое имя события отклоняется локальной ошибкой,
    /// не трогая реестр.
    #[test]
    fn test_empty_event_name_rejected() {
        let bus: EventBus<u32> = EventBus::new();
        let result = bus.subscribe("", |_| {});
        assert_eq!(result.unwrap_err(), SubscribeError::EmptyEventName);
        assert!(bus.is_empty());
    }

    /// Проверяет, что предел подписчиков действует на каждое событие
    /// отдельно.
    #[test]
    fn test_subscriber_limit_per_event() {
        let settings = BusSettings {
            max_subscribers: 1,
            ..BusSettings::default()
        };
        let bus: EventBus<u32> = EventBus::with_settings(&settings);

        let _first = bus.subscribe("cart-update", |_| {}).unwrap();
        let err = bus.subscribe("cart-update", |_| {}).unwrap_err();
        assert_eq!(
            err,
            SubscribeError::SubscriberLimitExceeded {
                event: "cart-update".to_string(),
                limit: 1,
            }
        );

        // другое событие ограничение не затронуло
        let _other = bus.subscribe("cart-error", |_| {}).unwrap();
    }

    /// Проверяет, что паника одного обработчика не мешает доставке
    /// подписанным после него и учитывается в `panic_count`.
    #[test]
    fn test_handler_panic_isolated() {
        let (bus, log) = bus_with_log();
        let _bad = bus
            .subscribe("cart-update", |_: &u32| panic!("widget failure"))
            .unwrap();
        let _good = bus.subscribe("cart-update", recorder(&log, "banner")).unwrap();

        bus.publish("cart-update", &5);

        assert_eq!(*log.lock().unwrap(), vec!["banner:5"]);
        assert_eq!(bus.panic_count.load(Ordering::Relaxed), 1);
    }

    /// Проверяет снимок списка: подписка из обработчика не видна в
    /// текущей доставке, но видна в следующей.
    #[test]
    fn test_snapshot_subscribe_during_dispatch() {
        let bus: Arc<EventBus<u32>> = Arc::new(EventBus::new());
        let log: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));

        let bus_inner = Arc::clone(&bus);
        let log_inner = Arc::clone(&log);
        let _outer = bus
            .subscribe("modal-opened", move |n: &u32| {
                log_inner.lock().unwrap().push(format!("outer:{n}"));
                let log_late = Arc::clone(&log_inner);
                let late = bus_inner.subscribe("modal-opened", move |n: &u32| {
                    log_late.lock().unwrap().push(format!("late:{n}"));
                });
                // дескриптор просто отбрасывается: drop не отписывает
                let _ = late;
            })
            .unwrap();

        bus.publish("modal-opened", &1);
        assert_eq!(*log.lock().unwrap(), vec!["outer:1"]);

        // во второй доставке участвуют outer и поздний подписчик
        // из первой, но не тот, что добавлен в ходе второй
        bus.publish("modal-opened", &2);
        assert_eq!(*log.lock().unwrap(), vec!["outer:1", "outer:2", "late:2"]);
    }

    /// Проверяет, что изменения реестра одного события не влияют на
    /// список и порядок другого.
    #[test]
    fn test_cross_event_isolation() {
        let (bus, log) = bus_with_log();
        let _cart = bus.subscribe("cart-update", recorder(&log, "cart")).unwrap();
        let modal = bus.subscribe("modal-opened", recorder(&log, "modal")).unwrap();
        let _err = bus.subscribe("cart-error", recorder(&log, "err")).unwrap();

        modal.unsubscribe();

        bus.publish("cart-update", &1);
        bus.publish("modal-opened", &1);
        bus.publish("cart-error", &1);

        assert_eq!(*log.lock().unwrap(), vec!["cart:1", "err:1"]);
        assert_eq!(bus.subscriber_count("cart-update"), 1);
        assert_eq!(bus.subscriber_count("cart-error"), 1);
    }

    /// Проверяет `is_empty` на протяжении жизненного цикла подписок.
    #[test]
    fn test_is_empty_lifecycle() {
        let bus: EventBus<u32> = EventBus::new();
        assert!(bus.is_empty());

        let sub = bus.subscribe("slide-changed", |_| {}).unwrap();
        assert!(!bus.is_empty());

        sub.unsubscribe();
        assert!(bus.is_empty());
    }
}
