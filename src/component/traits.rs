//! Component Trait System
//!
//! Core trait for pluggable components driven by a hosting framework. The
//! host constructs a component (usually through the factory table in
//! [`registry`](crate::component::registry)), applies its configuration
//! blob, then drives `initialize`, `start`, and `shutdown` exactly once
//! each, in that order.

use crate::component::error::ComponentResult;
use std::any::Any;

/// Base trait all components implement
#[async_trait::async_trait]
pub trait Component: Send + Sync {
    /// Stable name of this component, matching its registry entry
    fn name(&self) -> &'static str;

    /// Apply host-supplied options before initialization
    ///
    /// Options arrive as the raw JSON value the host loaded for this
    /// component. Rejecting them here keeps a misconfigured component from
    /// ever starting.
    fn configure(&mut self, _options: serde_json::Value) -> ComponentResult<()> {
        Ok(())
    }

    /// Allocate resources and spawn background work
    async fn initialize(&mut self) -> ComponentResult<()>;

    /// Reserved start hook, called once after every component initialized
    async fn start(&mut self) -> ComponentResult<()> {
        Ok(())
    }

    /// Tear down; called exactly once after a successful initialize
    async fn shutdown(&mut self) -> ComponentResult<()>;

    /// Downcast support for hosts that need the concrete component type
    fn as_any(&self) -> &dyn Any;

    fn as_any_mut(&mut self) -> &mut dyn Any;
}
