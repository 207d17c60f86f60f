//! Interrupt and shutdown handling.
//!
//! # Data Flow
//! ```text
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → Shutdown::trigger()
//!
//! Shutdown (shutdown.rs):
//!     Broadcast channel all long-running tasks can watch
//!
//! Interrupt wrapper (interrupt.rs):
//!     Start action blocks on the signal → stop phase proceeds
//! ```
//!
//! # Design Decisions
//! - The shutdown coordinator is the only channel between OS signals
//!   and the orchestrator; tests trigger it directly
//! - The wrapper joins the wrapped task before returning, so the
//!   task's outcome is observed only after it is safely published
//! - Winding down has a grace period: a task that never acknowledges
//!   the signal is aborted, not waited on forever

pub mod interrupt;
pub mod shutdown;
pub mod signals;

pub use interrupt::run_until_shutdown;
pub use shutdown::Shutdown;
