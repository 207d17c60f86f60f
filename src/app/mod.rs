//! Lifecycle orchestration.
//!
//! # Data Flow
//! ```text
//! run(initializers):
//!     Init: each initializer, in order → ComponentOptions → register
//!     Start: start actions forward, halt on first failure
//!     Stop: stop actions reverse, best effort, always runs
//! ```
//!
//! # Design Decisions
//! - Initializers are synchronous; long-running work belongs in start
//!   actions
//! - The stop phase runs unconditionally, even when initialization
//!   aborted before completing
//! - Typed lookup is only meaningful during initialization: components
//!   become visible strictly in registration order

pub mod application;
pub mod options;

pub use application::{Application, Phase};
pub use options::{ActionFn, ActionFuture, ComponentOptions, InitFn};
