//! Factory registration table for components
//!
//! Components register a name and a factory at link time; the hosting
//! framework constructs them by name when assembling the process. The table
//! itself is the only process-wide state in the crate — constructed
//! components are fully independent instances.

use crate::component::error::{ComponentError, ComponentResult};
use crate::component::traits::Component;

/// Entry for a component factory in the registration table
pub struct ComponentEntry {
    pub name: &'static str,
    pub factory: fn() -> Box<dyn Component>,
}

// Collect all component entries registered across the linked crates
inventory::collect!(ComponentEntry);

/// Register a component factory under a name
///
/// ```ignore
/// register_component!("eventq/asyncq", || {
///     Box::new(AsyncQueueComponent::<AppEvent>::new())
/// });
/// ```
#[macro_export]
macro_rules! register_component {
    ($name:expr, $factory:expr) => {
        inventory::submit!($crate::component::api::ComponentEntry {
            name: $name,
            factory: $factory,
        });
    };
}

/// Construct a registered component by name
pub fn create_component(name: &str) -> ComponentResult<Box<dyn Component>> {
    inventory::iter::<ComponentEntry>()
        .find(|entry| entry.name == name)
        .map(|entry| (entry.factory)())
        .ok_or_else(|| ComponentError::UnknownComponent {
            name: name.to_string(),
        })
}

/// Names of every registered component factory
pub fn registered_components() -> Vec<&'static str> {
    inventory::iter::<ComponentEntry>()
        .map(|entry| entry.name)
        .collect()
}
