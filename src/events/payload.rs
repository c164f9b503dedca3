use serde::{Deserialize, Serialize};

use super::names;
use crate::EventBus;

/// Строка корзины.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    /// Идентификатор строки корзины.
    pub id: u64,
    pub quantity: u32,
}

/// Снимок корзины после изменения.
///
/// Публикуется потоками добавления в корзину под `cart-update`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartSnapshot {
    pub item_count: u32,
    pub items: Vec<CartLine>,
}

/// Изменение количества `{ id, quantity }`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuantityChange {
    pub id: u64,
    pub quantity: u32,
}

/// Дескриптор выбранного варианта товара.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VariantDescriptor {
    pub id: u64,
    pub title: String,
    pub available: bool,
    /// Значения опций в порядке их объявления у товара.
    pub options: Vec<String>,
}

/// Описание ошибки операции с корзиной.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartErrorInfo {
    pub message: String,
    /// Расшифровка от витрины, если есть.
    pub description: Option<String>,
}

/// Дескриптор слайда карусели.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlideDescriptor {
    pub index: usize,
    pub total: usize,
}

/// Типизированное событие темы.
///
/// Сериализованный тег совпадает с каноническим именем события, так что
/// типизированный словарь и строковый контракт из [`names`] не могут
/// разойтись. Сама шина остаётся безразличной к форме нагрузки: этот
/// словарь — соглашение между издателями и подписчиками.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "kebab-case")]
pub enum ThemeEvent {
    CartUpdate(CartSnapshot),
    QuantityUpdate(QuantityChange),
    VariantChange(VariantDescriptor),
    CartError(CartErrorInfo),
    ModalOpened {
        /// Ссылка на элемент, открывший окно, если есть.
        opener: Option<String>,
    },
    ModalClosed,
    SlideChanged(SlideDescriptor),
}

impl ThemeEvent {
    /// Каноническое имя события для данного варианта.
    pub fn event_name(&self) -> &'static str {
        match self {
            ThemeEvent::CartUpdate(_) => names::CART_UPDATE,
            ThemeEvent::QuantityUpdate(_) => names::QUANTITY_UPDATE,
            ThemeEvent::VariantChange(_) => names::VARIANT_CHANGE,
            ThemeEvent::CartError(_) => names::CART_ERROR,
            ThemeEvent::ModalOpened { .. } => names::MODAL_OPENED,
            ThemeEvent::ModalClosed => names::MODAL_CLOSED,
            ThemeEvent::SlideChanged(_) => names::SLIDE_CHANGED,
        }
    }
}

/// Шина, работающая со словарём темы.
pub type ThemeBus = EventBus<ThemeEvent>;

impl EventBus<ThemeEvent> {
    /// Публикует типизированное событие под его каноническим именем.
    pub fn publish_event(&self, event: &ThemeEvent) {
        self.publish(event.event_name(), event);
    }
}
