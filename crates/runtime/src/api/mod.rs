//! Public API surface for runtime consumers.
//!
//! Re-exports the handle, the dispatch receipt and the error types so
//! downstream crates interact with the runtime through a focused interface.
mod errors;
mod handle;

pub use errors::{Result, RuntimeError};
pub use handle::{DispatchReceipt, RuntimeHandle};
