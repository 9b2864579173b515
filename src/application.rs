// Application layer modules
pub mod guest_handler;

// Re-exports
pub use guest_handler::{GuestHandler, RequestKind};
