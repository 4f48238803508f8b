//! Pipeline event system: handler trait, payloads, and a per-run dispatcher.

pub mod dispatcher;
pub mod handler;
pub mod types;

pub use dispatcher::EventDispatcher;
pub use handler::RatesplitEventHandler;
