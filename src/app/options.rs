//! Registration options returned by initializers.
//!
//! # Responsibilities
//! - Carry the optional component handle, start action, stop action,
//!   and alias out of an initializer
//! - Capture the component's type name at attachment time so the
//!   derived name never needs runtime introspection
//!
//! # Design Decisions
//! - Actions close over what they need and return an owned future, so
//!   registered futures never borrow the orchestrator
//! - Derived name precedence: non-empty alias, then type name, then a
//!   fixed placeholder

use std::any::Any;
use std::sync::Arc;

use futures_util::future::BoxFuture;

use crate::app::Application;
use crate::error::BoxError;
use crate::registry::ComponentHandle;

/// Owned future produced by a registered action.
pub type ActionFuture = BoxFuture<'static, Result<(), BoxError>>;

/// A registered start or stop action. Invoked with the orchestrator;
/// clones out whatever it needs, then yields the future to drive.
pub type ActionFn = Box<dyn Fn(&Application) -> ActionFuture + Send + Sync>;

/// An initializer: runs once during the initializing phase, may look up
/// previously registered components, and returns what to register.
pub type InitFn = Box<dyn FnOnce(&mut Application) -> Result<ComponentOptions, BoxError> + Send>;

/// Derived name when no alias and no component are supplied.
pub(crate) const UNNAMED: &str = "unnamed";

/// What an initializer hands back for registration: an optional
/// component, optional start/stop actions, and an optional alias
/// overriding the type-derived name.
#[derive(Default)]
pub struct ComponentOptions {
    pub(crate) component: Option<ComponentHandle>,
    pub(crate) type_name: Option<&'static str>,
    pub(crate) starter: Option<ActionFn>,
    pub(crate) stopper: Option<ActionFn>,
    pub(crate) alias: Option<String>,
}

impl ComponentOptions {
    /// Empty options: nothing gets registered.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach the component to register. Its type name is captured here
    /// and becomes the default registration name.
    pub fn component<T: Any + Send + Sync>(mut self, component: T) -> Self {
        self.component = Some(Arc::new(component));
        self.type_name = Some(std::any::type_name::<T>());
        self
    }

    /// Override the derived name. An empty alias is ignored.
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    /// Attach the start action.
    pub fn on_start<F>(mut self, action: F) -> Self
    where
        F: Fn(&Application) -> ActionFuture + Send + Sync + 'static,
    {
        self.starter = Some(Box::new(action));
        self
    }

    /// Attach the stop action.
    pub fn on_stop<F>(mut self, action: F) -> Self
    where
        F: Fn(&Application) -> ActionFuture + Send + Sync + 'static,
    {
        self.stopper = Some(Box::new(action));
        self
    }

    /// The name everything in these options registers under.
    pub fn name(&self) -> String {
        match &self.alias {
            Some(alias) if !alias.is_empty() => alias.clone(),
            _ => self.type_name.unwrap_or(UNNAMED).to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Logger;

    #[test]
    fn test_name_prefers_alias() {
        let options = ComponentOptions::new().component(Logger).alias("logger");
        assert_eq!(options.name(), "logger");
    }

    #[test]
    fn test_empty_alias_falls_back_to_type_name() {
        let options = ComponentOptions::new().component(Logger).alias("");
        assert!(options.name().ends_with("Logger"));
    }

    #[test]
    fn test_no_component_and_no_alias_is_unnamed() {
        let options = ComponentOptions::new();
        assert_eq!(options.name(), UNNAMED);
    }
}
