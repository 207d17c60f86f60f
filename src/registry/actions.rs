//! Ordered action execution.
//!
//! # Responsibilities
//! - Keep named actions in registration order
//! - Execute forward (start role) or reverse (stop role)
//! - Halt on first failure, or run to the end and report the last one
//!
//! # Design Decisions
//! - Duplicate action names are legal; both entries execute
//! - Under `halt_on_error = false` every failure is written to the
//!   diagnostic sink, but only the last one is returned
//! - An informational diagnostic precedes every invocation so the
//!   transcript shows the exact execution order

use crate::app::{ActionFn, Application};
use crate::error::BoxError;
use thiserror::Error;

/// A failure from a registered action, tagged with the action's name.
#[derive(Debug, Error)]
#[error("action '{name}' failed: {source}")]
pub struct ActionFailure {
    /// Derived name of the failing action.
    pub name: String,
    /// The failure the action returned.
    #[source]
    pub source: BoxError,
}

struct NamedAction {
    name: String,
    action: ActionFn,
}

/// Insertion-ordered list of named actions with forward and reverse
/// execution.
#[derive(Default)]
pub struct ActionRegistry {
    label: &'static str,
    actions: Vec<NamedAction>,
}

impl ActionRegistry {
    /// Create a registry. `label` names its role ("start", "stop") in
    /// diagnostics.
    pub fn new(label: &'static str) -> Self {
        Self {
            label,
            actions: Vec::new(),
        }
    }

    /// Append `action` under `name`. No uniqueness check: duplicate
    /// names are appended and both entries execute.
    pub fn add(&mut self, name: impl Into<String>, action: ActionFn) {
        self.actions.push(NamedAction {
            name: name.into(),
            action,
        });
    }

    /// Number of registered actions.
    pub fn count(&self) -> usize {
        self.actions.len()
    }

    /// Invoke each action in registration order.
    ///
    /// With `halt_on_error` the first failure stops execution and is
    /// returned; later actions never run. Without it every action runs,
    /// failures are recorded on the diagnostic sink, and the last
    /// failure (if any) is returned.
    pub async fn execute_forward(
        &self,
        app: &Application,
        halt_on_error: bool,
    ) -> Result<(), ActionFailure> {
        self.execute(app, halt_on_error, self.actions.iter()).await
    }

    /// Invoke each action from the last registered to the first, with
    /// the same halt semantics as [`execute_forward`].
    ///
    /// [`execute_forward`]: Self::execute_forward
    pub async fn execute_reverse(
        &self,
        app: &Application,
        halt_on_error: bool,
    ) -> Result<(), ActionFailure> {
        self.execute(app, halt_on_error, self.actions.iter().rev()).await
    }

    async fn execute<'a>(
        &'a self,
        app: &Application,
        halt_on_error: bool,
        entries: impl Iterator<Item = &'a NamedAction>,
    ) -> Result<(), ActionFailure> {
        let mut last_failure = None;
        for entry in entries {
            app.sink()
                .write(&format!("Executing {} action {}", self.label, entry.name));
            if let Err(source) = (entry.action)(app).await {
                let failure = ActionFailure {
                    name: entry.name.clone(),
                    source,
                };
                if halt_on_error {
                    return Err(failure);
                }
                app.sink().write_error(&failure.to_string());
                last_failure = Some(failure);
            }
        }
        match last_failure {
            Some(failure) => Err(failure),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    fn recording_action(log: &Arc<Mutex<Vec<String>>>, tag: &str) -> ActionFn {
        let log = log.clone();
        let tag = tag.to_string();
        Box::new(move |_: &Application| {
            let log = log.clone();
            let tag = tag.clone();
            Box::pin(async move {
                log.lock().unwrap().push(tag);
                Ok(())
            })
        })
    }

    fn failing_action(log: &Arc<Mutex<Vec<String>>>, tag: &str) -> ActionFn {
        let log = log.clone();
        let tag = tag.to_string();
        Box::new(move |_: &Application| {
            let log = log.clone();
            let tag = tag.clone();
            Box::pin(async move {
                log.lock().unwrap().push(tag.clone());
                Err(format!("{tag} broke").into())
            })
        })
    }

    #[tokio::test]
    async fn test_forward_runs_in_registration_order() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut registry = ActionRegistry::new("start");
        registry.add("a", recording_action(&log, "a"));
        registry.add("b", recording_action(&log, "b"));
        registry.add("c", recording_action(&log, "c"));

        let app = Application::new("test");
        registry.execute_forward(&app, true).await.unwrap();
        assert_eq!(*log.lock().unwrap(), vec!["a", "b", "c"]);
    }

    #[tokio::test]
    async fn test_reverse_runs_backwards() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut registry = ActionRegistry::new("stop");
        registry.add("a", recording_action(&log, "a"));
        registry.add("b", recording_action(&log, "b"));

        let app = Application::new("test");
        registry.execute_reverse(&app, false).await.unwrap();
        assert_eq!(*log.lock().unwrap(), vec!["b", "a"]);
    }

    #[tokio::test]
    async fn test_halt_on_error_skips_the_rest() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut registry = ActionRegistry::new("start");
        registry.add("a", recording_action(&log, "a"));
        registry.add("b", failing_action(&log, "b"));
        registry.add("c", recording_action(&log, "c"));

        let app = Application::new("test");
        let failure = registry.execute_forward(&app, true).await.unwrap_err();
        assert_eq!(failure.name, "b");
        assert_eq!(*log.lock().unwrap(), vec!["a", "b"]);
    }

    #[tokio::test]
    async fn test_best_effort_runs_everything_and_keeps_last_failure() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut registry = ActionRegistry::new("stop");
        registry.add("a", failing_action(&log, "a"));
        registry.add("b", recording_action(&log, "b"));
        registry.add("c", failing_action(&log, "c"));

        let app = Application::new("test");
        let failure = registry.execute_forward(&app, false).await.unwrap_err();
        // Forward order, so the last failure seen is "c".
        assert_eq!(failure.name, "c");
        assert_eq!(*log.lock().unwrap(), vec!["a", "b", "c"]);
    }

    #[tokio::test]
    async fn test_duplicate_names_both_execute() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut registry = ActionRegistry::new("start");
        registry.add("same", recording_action(&log, "first"));
        registry.add("same", recording_action(&log, "second"));
        assert_eq!(registry.count(), 2);

        let app = Application::new("test");
        registry.execute_forward(&app, true).await.unwrap();
        assert_eq!(*log.lock().unwrap(), vec!["first", "second"]);
    }
}
