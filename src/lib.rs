pub mod backend;
pub mod config;
pub mod domain;
pub mod error;
pub mod event_sourcing;
pub mod metrics;

pub use backend::{InMemoryBackend, OrderFilter, StorefrontBackend};
pub use config::CheckoutConfig;
pub use domain::checkout::CheckoutSession;
pub use domain::order::OrderCommandHandler;
pub use error::{CheckoutError, CheckoutResult, StorageError, ValidationError};
