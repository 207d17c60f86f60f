//! Component storage.
//!
//! # Responsibilities
//! - Store type-erased component handles under unique names
//! - Track insertion order
//! - Report absence structurally, never as an error
//!
//! # Design Decisions
//! - Handles are `Arc<dyn Any>` so typed lookup can hand out owned
//!   references without cloning the component itself
//! - Duplicate names fail registration; nothing is ever overwritten
//! - No diagnostics at this layer (the orchestrator emits them)

use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;

use crate::error::Error;

/// Type-erased, shared handle to a registered component.
pub type ComponentHandle = Arc<dyn Any + Send + Sync>;

/// Named store of application components with insertion-order tracking.
#[derive(Default)]
pub struct ComponentRegistry {
    components: HashMap<String, ComponentHandle>,
    order: Vec<String>,
}

impl ComponentRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `component` under `name`.
    pub fn add(&mut self, name: &str, component: ComponentHandle) -> Result<(), Error> {
        if self.components.contains_key(name) {
            return Err(Error::DuplicateName(name.to_string()));
        }
        self.components.insert(name.to_string(), component);
        self.order.push(name.to_string());
        Ok(())
    }

    /// The handle registered under `name`, if any.
    pub fn get(&self, name: &str) -> Option<&ComponentHandle> {
        self.components.get(name)
    }

    /// Number of registered components.
    pub fn count(&self) -> usize {
        self.order.len()
    }

    /// Registered names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }
}
