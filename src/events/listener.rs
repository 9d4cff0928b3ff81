use async_trait::async_trait;

use super::AccessEvent;

/// Trait for handling lifecycle events asynchronously.
///
/// Implement this trait to create custom event listeners. Listeners can
/// perform any async operation: logging, audit trails, notifications,
/// metrics.
///
/// # Example
///
/// ```rust,ignore
/// use palisade::events::{AccessEvent, Listener};
/// use async_trait::async_trait;
///
/// struct AlertListener {
///     webhook_url: String,
/// }
///
/// #[async_trait]
/// impl Listener for AlertListener {
///     async fn handle(&self, event: &AccessEvent) {
///         if let AccessEvent::UserDeleted { login, .. } = event {
///             // post an alert
///         }
///     }
/// }
/// ```
#[async_trait]
pub trait Listener: Send + Sync + 'static {
    /// Handle a lifecycle event.
    ///
    /// This method is called for every event dispatched. Filter by matching
    /// on the event variant to handle specific events.
    async fn handle(&self, event: &AccessEvent);
}
