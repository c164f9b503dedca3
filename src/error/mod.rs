pub mod bus;

pub use bus::SubscribeError;
