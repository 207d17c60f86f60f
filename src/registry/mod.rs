//! Registry subsystem.
//!
//! # Data Flow
//! ```text
//! Initializers return ComponentOptions:
//!     component → components.rs (named, insertion-ordered, unique)
//!     starter   → actions.rs (forward execution, halt on error)
//!     stopper   → actions.rs (reverse execution, best effort)
//! ```
//!
//! # Design Decisions
//! - One generic action registry serves both the start and stop roles;
//!   direction and the halt flag are the only behavioral knobs
//! - Component names are unique, action names are not
//! - Registries are mutated only during initialization and read-only
//!   during start/stop, so no locking under the single-caller contract

pub mod actions;
pub mod components;

pub use actions::{ActionFailure, ActionRegistry};
pub use components::{ComponentHandle, ComponentRegistry};
