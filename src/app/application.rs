//! The lifecycle orchestrator.
//!
//! # Responsibilities
//! - Run initializers in order and register what they return
//! - Execute start actions forward, halting on the first failure
//! - Always execute stop actions in reverse, best effort
//! - Offer typed component lookup to later initializers
//!
//! # Design Decisions
//! - Initialization failures (including a duplicate name) abort the
//!   remaining initializers; the stop phase still runs
//! - Stop failures never surface from `run`; they only reach the
//!   diagnostic sink
//! - One orchestrator per run, driven from a single task; the phases
//!   are not safe to drive concurrently

use std::sync::Arc;

use crate::app::options::{ComponentOptions, InitFn};
use crate::console::{Console, DiagnosticSink};
use crate::error::Error;
use crate::registry::{ActionRegistry, ComponentRegistry};

/// Lifecycle phase of an [`Application`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Constructed, no initializer has run yet.
    Created,
    /// Initializers are running (or initialization aborted).
    Initializing,
    /// All start actions completed.
    Started,
    /// The stop phase has run. Terminal.
    Stopped,
}

/// The lifecycle orchestrator: one component registry, one start-action
/// registry, one stop-action registry, and a diagnostic sink.
pub struct Application {
    components: ComponentRegistry,
    starters: ActionRegistry,
    stoppers: ActionRegistry,
    console: Arc<dyn DiagnosticSink>,
    phase: Phase,
}

impl Application {
    /// Create an orchestrator with a default [`Console`] sink named
    /// `name`.
    pub fn new(name: &str) -> Self {
        Self::with_sink(Arc::new(Console::new(name)))
    }

    /// Create an orchestrator writing diagnostics to `sink`.
    pub fn with_sink(sink: Arc<dyn DiagnosticSink>) -> Self {
        Self {
            components: ComponentRegistry::new(),
            starters: ActionRegistry::new("start"),
            stoppers: ActionRegistry::new("stop"),
            console: sink,
            phase: Phase::Created,
        }
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The diagnostic sink.
    pub fn sink(&self) -> &dyn DiagnosticSink {
        &*self.console
    }

    /// The component registry.
    pub fn components(&self) -> &ComponentRegistry {
        &self.components
    }

    /// The start-action registry.
    pub fn starters(&self) -> &ActionRegistry {
        &self.starters
    }

    /// The stop-action registry.
    pub fn stoppers(&self) -> &ActionRegistry {
        &self.stoppers
    }

    /// Fetch the component registered under `name` as `T`.
    ///
    /// Returns [`Error::NotFound`] if nothing is registered under the
    /// name, [`Error::TypeMismatch`] if the stored component is not a
    /// `T`. Meant to be called from an initializer, where only earlier
    /// registrations are visible.
    pub fn component<T: Send + Sync + 'static>(&self, name: &str) -> Result<Arc<T>, Error> {
        let handle = self
            .components
            .get(name)
            .ok_or_else(|| Error::NotFound(name.to_string()))?;
        handle
            .clone()
            .downcast::<T>()
            .map_err(|_| Error::TypeMismatch(name.to_string()))
    }

    /// Fetch like [`component`], but panic when the lookup fails. For
    /// dependencies without which the program cannot continue.
    ///
    /// [`component`]: Self::component
    pub fn must_component<T: Send + Sync + 'static>(&self, name: &str) -> Arc<T> {
        match self.component(name) {
            Ok(component) => component,
            Err(err) => panic!("required component lookup failed: {err}"),
        }
    }

    /// Run a single initializer and register what it returns.
    ///
    /// A failure from the initializer itself surfaces as
    /// [`Error::InitFailed`]; a name collision on the returned
    /// component surfaces as [`Error::DuplicateName`]. Either aborts
    /// before any of the remaining registrations for this initializer.
    pub fn init(&mut self, initializer: InitFn) -> Result<(), Error> {
        self.phase = Phase::Initializing;

        let options = initializer(self).map_err(|source| Error::InitFailed { source })?;
        let name = options.name();
        let ComponentOptions {
            component,
            starter,
            stopper,
            ..
        } = options;

        if let Some(component) = component {
            self.console.write(&format!("Registering component {name}"));
            self.components.add(&name, component)?;
        }
        if let Some(starter) = starter {
            self.console
                .write(&format!("Registering start action {name}"));
            self.starters.add(&name, starter);
        }
        if let Some(stopper) = stopper {
            self.console
                .write(&format!("Registering stop action {name}"));
            self.stoppers.add(&name, stopper);
        }
        Ok(())
    }

    /// Run each initializer in order, stopping at the first failure.
    pub fn init_all(&mut self, initializers: Vec<InitFn>) -> Result<(), Error> {
        self.phase = Phase::Initializing;
        for initializer in initializers {
            self.init(initializer)?;
        }
        Ok(())
    }

    /// Execute all start actions in registration order, halting on the
    /// first failure.
    pub async fn start(&mut self) -> Result<(), Error> {
        let starters = std::mem::take(&mut self.starters);
        let result = starters.execute_forward(self, true).await;
        self.starters = starters;
        match result {
            Ok(()) => {
                self.phase = Phase::Started;
                Ok(())
            }
            Err(failure) => Err(Error::StartFailed {
                name: failure.name,
                source: failure.source,
            }),
        }
    }

    /// Execute all stop actions in reverse registration order. Every
    /// action gets invoked; individual failures only reach the sink.
    pub async fn stop(&mut self) {
        let stoppers = std::mem::take(&mut self.stoppers);
        // Failures are already written to the sink by the registry.
        let _ = stoppers.execute_reverse(self, false).await;
        self.stoppers = stoppers;
        self.phase = Phase::Stopped;
    }

    /// Drive the whole lifecycle: initialize, start, stop.
    ///
    /// Initialization failure short-circuits past the start phase; the
    /// stop phase runs unconditionally either way. Returns the first
    /// initialization or start failure, `Ok` when both phases succeed.
    pub async fn run(&mut self, initializers: Vec<InitFn>) -> Result<(), Error> {
        let outcome = match self.init_all(initializers) {
            Err(err) => {
                self.console.write_error(&err.to_string());
                Err(err)
            }
            Ok(()) => self.start().await,
        };
        self.stop().await;
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Logger {
        level: &'static str,
    }

    #[derive(Debug)]
    struct Pool;

    fn init_logger() -> InitFn {
        Box::new(|_: &mut Application| {
            Ok(ComponentOptions::new()
                .component(Logger { level: "info" })
                .alias("logger"))
        })
    }

    #[test]
    fn test_typed_lookup_roundtrip() {
        let mut app = Application::new("test");
        app.init(init_logger()).unwrap();

        let logger = app.component::<Logger>("logger").unwrap();
        assert_eq!(logger.level, "info");
    }

    #[test]
    fn test_typed_lookup_not_found() {
        let app = Application::new("test");
        let err = app.component::<Logger>("logger").unwrap_err();
        assert!(matches!(err, Error::NotFound(name) if name == "logger"));
    }

    #[test]
    fn test_typed_lookup_type_mismatch() {
        let mut app = Application::new("test");
        app.init(init_logger()).unwrap();

        let err = app.component::<Pool>("logger").unwrap_err();
        assert!(matches!(err, Error::TypeMismatch(name) if name == "logger"));
    }

    #[test]
    #[should_panic(expected = "required component lookup failed")]
    fn test_must_component_panics_on_absence() {
        let app = Application::new("test");
        let _ = app.must_component::<Logger>("logger");
    }

    #[test]
    fn test_duplicate_component_name_aborts_registration() {
        let mut app = Application::new("test");
        app.init(init_logger()).unwrap();

        let err = app
            .init(Box::new(|_: &mut Application| {
                Ok(ComponentOptions::new().component(Pool).alias("logger"))
            }))
            .unwrap_err();
        assert!(matches!(err, Error::DuplicateName(name) if name == "logger"));
        assert_eq!(app.components().count(), 1);
    }

    #[test]
    fn test_initializer_failure_is_wrapped() {
        let mut app = Application::new("test");
        let err = app
            .init(Box::new(|_: &mut Application| Err("disk on fire".into())))
            .unwrap_err();
        assert!(matches!(err, Error::InitFailed { .. }));
        assert!(err.to_string().contains("disk on fire"));
    }

    #[test]
    fn test_type_derived_default_name() {
        let mut app = Application::new("test");
        app.init(Box::new(|_: &mut Application| {
            Ok(ComponentOptions::new().component(Pool))
        }))
        .unwrap();

        let name = app.components().names().next().unwrap().to_string();
        assert!(name.ends_with("Pool"));
        assert!(app.component::<Pool>(&name).is_ok());
    }

    #[tokio::test]
    async fn test_phase_transitions() {
        let mut app = Application::new("test");
        assert_eq!(app.phase(), Phase::Created);

        app.init_all(vec![init_logger()]).unwrap();
        assert_eq!(app.phase(), Phase::Initializing);

        app.start().await.unwrap();
        assert_eq!(app.phase(), Phase::Started);

        app.stop().await;
        assert_eq!(app.phase(), Phase::Stopped);
    }

    #[tokio::test]
    async fn test_run_with_no_initializers_is_ok() {
        let mut app = Application::new("test");
        app.run(Vec::new()).await.unwrap();
        assert_eq!(app.phase(), Phase::Stopped);
    }
}
