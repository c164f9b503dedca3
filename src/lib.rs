/// Event bus core: registry, dispatch, subscriptions.
pub mod bus;
/// Bus settings loading.
pub mod config;
/// Common error types: subscription failures.
pub mod error;
/// Shared event vocabulary: well-known names and typed payloads.
pub mod events;
/// Tracing-based logging setup.
pub mod logging;

// -----------------------------------------------------------------------------
//  Frequently used public types
// -----------------------------------------------------------------------------

/// Bus operations and the unsubscribe handle.
pub use bus::{EventBus, Handler, Subscription};
/// config
pub use config::BusSettings;
/// Subscription errors.
pub use error::SubscribeError;
/// Theme events: typed payloads and the name constants in `events::names`.
pub use events::{
    CartErrorInfo, CartLine, CartSnapshot, QuantityChange, SlideDescriptor, ThemeBus, ThemeEvent,
    VariantDescriptor,
};
/// Logging setup.
pub use logging::{init_logging, LoggingConfig};
