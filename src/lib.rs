//! In-process application lifecycle orchestration.
//!
//! Components register themselves through initializer functions, each
//! returning an optional component handle plus optional start and stop
//! actions. [`Application::run`] drives the lifecycle: initializers in
//! order, start actions forward halting on the first failure, stop
//! actions in reverse unconditionally.

pub mod app;
pub mod console;
pub mod error;
pub mod lifecycle;
pub mod registry;

pub use app::{ActionFn, ActionFuture, Application, ComponentOptions, InitFn, Phase};
pub use console::{Console, DiagnosticSink};
pub use error::{BoxError, Error};
pub use lifecycle::{run_until_shutdown, Shutdown};
