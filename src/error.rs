//! Error types for the orchestrator.
//!
//! # Design Decisions
//! - One public enum covers every failure the core can produce
//! - Caller-supplied failures (initializers, actions) stay type-erased
//! - Lookup errors are returned, never panicked (the fatal lookup
//!   variant on `Application` is the single deliberate exception)

use thiserror::Error;

/// Type-erased error produced by caller-supplied initializers and actions.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors produced by the lifecycle orchestrator.
#[derive(Debug, Error)]
pub enum Error {
    /// A component with this name is already registered.
    #[error("component '{0}' is already registered")]
    DuplicateName(String),

    /// Typed lookup found no component under this name.
    #[error("component '{0}' does not exist")]
    NotFound(String),

    /// Typed lookup found the name, but the stored component is not of
    /// the requested type.
    #[error("component '{0}' is not of the requested type")]
    TypeMismatch(String),

    /// An initializer function returned a failure.
    #[error("initialization failed: {source}")]
    InitFailed {
        /// The failure the initializer returned.
        #[source]
        source: BoxError,
    },

    /// A start action returned a failure.
    #[error("start action '{name}' failed: {source}")]
    StartFailed {
        /// Derived name of the failing start action.
        name: String,
        /// The failure the action returned.
        #[source]
        source: BoxError,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::DuplicateName("logger".into());
        assert_eq!(err.to_string(), "component 'logger' is already registered");

        let err = Error::NotFound("pool".into());
        assert_eq!(err.to_string(), "component 'pool' does not exist");
    }

    #[test]
    fn test_wrapped_source_is_preserved() {
        let inner: BoxError = "backend refused".into();
        let err = Error::StartFailed {
            name: "listener".into(),
            source: inner,
        };
        assert!(err.to_string().contains("listener"));
        assert!(std::error::Error::source(&err).is_some());
    }
}
