// Domain layer modules
pub mod guest;

// Re-exports
pub use guest::{Guest, NewGuest};
