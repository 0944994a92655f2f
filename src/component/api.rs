//! Public API for the component lifecycle system
//!
//! External modules should import from here rather than directly from
//! internal modules.

pub use crate::component::error::{ComponentError, ComponentResult};
pub use crate::component::registry::{create_component, registered_components, ComponentEntry};
pub use crate::component::traits::Component;
