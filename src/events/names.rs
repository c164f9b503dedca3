//! Канонические имена событий витрины.
//!
//! Значения строк — внешний контракт: виджеты разрабатываются
//! независимо и договариваются только об этих строках. Новые имена
//! добавлять можно, переименовывать существующие — нельзя.

/// Снимок корзины после её изменения.
pub const CART_UPDATE: &str = "cart-update";
/// Изменение количества в строке корзины.
pub const QUANTITY_UPDATE: &str = "quantity-update";
/// Смена выбранного варианта товара.
pub const VARIANT_CHANGE: &str = "variant-change";
/// Ошибка операции с корзиной.
pub const CART_ERROR: &str = "cart-error";
/// Открытие модального окна.
pub const MODAL_OPENED: &str = "modal-opened";
/// Закрытие модального окна.
pub const MODAL_CLOSED: &str = "modal-closed";
/// Смена активного слайда карусели.
pub const SLIDE_CHANGED: &str = "slide-changed";

/// Полный список общеизвестных имён.
pub const WELL_KNOWN: &[&str] = &[
    CART_UPDATE,
    QUANTITY_UPDATE,
    VARIANT_CHANGE,
    CART_ERROR,
    MODAL_OPENED,
    MODAL_CLOSED,
    SLIDE_CHANGED,
];
