//! Two-phase change observation and action dispatch.

use serde_json::Value;
use std::sync::Arc;
use tokio::sync::{broadcast, mpsc};

use crate::observability::metrics;
use crate::reload::cache::PropertyValueCache;
use crate::reload::registry::ReloadActionRegistry;
use crate::store::notification::ChangeNotification;

/// Applies the two-phase observation protocol to the configuration
/// store's notification stream and fires registered reload actions.
///
/// The store delivers two notifications per logical change: a "before"
/// notification while the old value is still active and an "after"
/// notification once the new value is in place. It also delivers pairs
/// whose value never changed, for example when an identical property
/// file is reinstalled. Comparing the after value against the snapshot
/// taken on the before phase filters that noise out, so segments are
/// only cycled for genuine changes.
pub struct ChangeDispatcher {
    cache: PropertyValueCache,
    registry: Arc<ReloadActionRegistry>,
}

impl ChangeDispatcher {
    pub fn new(registry: Arc<ReloadActionRegistry>) -> Self {
        Self {
            cache: PropertyValueCache::new(),
            registry,
        }
    }

    /// Last-observed values, exposed for inspection.
    pub fn cache(&self) -> &PropertyValueCache {
        &self.cache
    }

    /// Consume raw notifications until the channel closes or shutdown
    /// fires.
    ///
    /// Actions run inline on this task. A slow reload blocks the stream
    /// for its duration, which is what keeps per-property ordering
    /// intact; nothing downstream of this loop reorders notifications.
    pub async fn run(
        self,
        mut rx: mpsc::UnboundedReceiver<Value>,
        mut shutdown: broadcast::Receiver<()>,
    ) {
        tracing::info!(action_sets = self.registry.len(), "change dispatcher starting");

        loop {
            tokio::select! {
                maybe_raw = rx.recv() => {
                    match maybe_raw {
                        Some(raw) => self.handle_raw(&raw).await,
                        None => {
                            tracing::info!("notification channel closed, dispatcher exiting");
                            break;
                        }
                    }
                }
                _ = shutdown.recv() => {
                    tracing::info!("change dispatcher received shutdown signal, exiting loop");
                    break;
                }
            }
        }
    }

    /// Parse one raw payload and apply the protocol. A malformed payload
    /// is logged and skipped; it must never take the dispatch loop down.
    pub async fn handle_raw(&self, raw: &Value) {
        match ChangeNotification::from_raw(raw) {
            Ok(notification) => self.handle(&notification).await,
            Err(e) => {
                metrics::record_malformed_notification();
                tracing::warn!(error = %e, "skipping malformed change notification");
            }
        }
    }

    /// Apply the two-phase protocol to one well-formed notification.
    pub async fn handle(&self, notification: &ChangeNotification) {
        let property = notification.property_name.as_str();

        // values of keys no action watches are never cached, so the
        // cache stays bounded by the watched key count
        if !self.registry.is_watched(property) {
            return;
        }

        if notification.is_before_update {
            self.cache.put(property, notification.property_value.clone());
            return;
        }

        let previous = self.cache.get(property);
        if previous.as_deref() == Some(notification.property_value.as_str()) {
            metrics::record_spurious_notification();
            tracing::debug!(property, "value unchanged, suppressing notification");
            return;
        }

        let actions = self.registry.actions_for(property);
        tracing::info!(
            property,
            previous = ?previous,
            current = %notification.property_value,
            actions = actions.len(),
            "property value changed, firing reload actions"
        );

        for action in actions {
            metrics::record_action_fired();
            action().await;
        }
    }
}
