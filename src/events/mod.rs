//! Event system for lifecycle operations.
//!
//! Events are fired from every action after its write has succeeded. If no
//! listeners are registered, dispatch is a no-op.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use palisade::register_event_listeners;
//! use palisade::events::listeners::LoggingListener;
//!
//! fn main() {
//!     // register listeners at startup
//!     register_event_listeners(|registry| {
//!         registry.listen(LoggingListener::new());
//!     });
//!
//!     // events will now be logged
//! }
//! ```
//!
//! # Custom Listeners
//!
//! Implement the [`Listener`] trait to create custom event handlers:
//!
//! ```rust,ignore
//! use palisade::events::{AccessEvent, Listener};
//! use async_trait::async_trait;
//!
//! struct AuditTrailListener;
//!
//! #[async_trait]
//! impl Listener for AuditTrailListener {
//!     async fn handle(&self, event: &AccessEvent) {
//!         match event {
//!             AccessEvent::UserCreated { login, .. } => {
//!                 // append to the audit trail
//!             }
//!             AccessEvent::UserDeleted { .. } => {
//!                 // append to the audit trail
//!             }
//!             _ => {}
//!         }
//!     }
//! }
//! ```

mod event;
mod listener;
mod registry;

pub mod listeners;

pub use event::AccessEvent;
pub use listener::Listener;
pub use registry::{dispatch, register_event_listeners};
