// Infrastructure layer modules
pub mod config;
pub mod guest_store;
pub mod logging;

// Re-exports
pub use config::GuestApiConfig;
pub use guest_store::{GuestStore, StoreError};
pub use logging::init_logging;
