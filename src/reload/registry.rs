//! Startup-time registration of reload actions.

use futures_util::future::BoxFuture;
use std::collections::HashSet;
use std::sync::Arc;

/// A zero-argument reload operation, fired when a watched property
/// changes value.
pub type ReloadAction = Arc<dyn Fn() -> BoxFuture<'static, ()> + Send + Sync>;

struct ActionSet {
    properties: HashSet<String>,
    action: ReloadAction,
}

/// Read-only mapping from property-name sets to reload actions.
///
/// Built once at startup through [`ReloadRegistryBuilder`] and never
/// mutated afterwards. A property may appear in multiple sets; a change
/// to it fires every matching action, one invocation per set. Matching
/// actions fire in registration order.
#[derive(Default)]
pub struct ReloadActionRegistry {
    sets: Vec<ActionSet>,
}

impl ReloadActionRegistry {
    pub fn builder() -> ReloadRegistryBuilder {
        ReloadRegistryBuilder::default()
    }

    /// True if at least one registered set contains `property`.
    ///
    /// Gates cache writes in the dispatcher: values of uninteresting
    /// keys are never cached, so the cache stays bounded by the watched
    /// key count.
    pub fn is_watched(&self, property: &str) -> bool {
        self.sets.iter().any(|set| set.properties.contains(property))
    }

    /// Every action registered for a set containing `property`, in
    /// registration order.
    pub fn actions_for(&self, property: &str) -> Vec<ReloadAction> {
        self.sets
            .iter()
            .filter(|set| set.properties.contains(property))
            .map(|set| set.action.clone())
            .collect()
    }

    /// Number of registered action sets.
    pub fn len(&self) -> usize {
        self.sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }
}

/// Builder consumed once at startup to populate the registry.
#[derive(Default)]
pub struct ReloadRegistryBuilder {
    sets: Vec<ActionSet>,
}

impl ReloadRegistryBuilder {
    /// Register `action` to fire whenever any of `properties` changes
    /// value.
    pub fn register_reload_action<I, S>(mut self, properties: I, action: ReloadAction) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.sets.push(ActionSet {
            properties: properties.into_iter().map(Into::into).collect(),
            action,
        });
        self
    }

    pub fn build(self) -> ReloadActionRegistry {
        ReloadActionRegistry { sets: self.sets }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counting_action(counter: Arc<AtomicUsize>) -> ReloadAction {
        Arc::new(move || {
            let counter = counter.clone();
            Box::pin(async move {
                counter.fetch_add(1, Ordering::SeqCst);
            })
        })
    }

    #[test]
    fn test_membership_lookup() {
        let counter = Arc::new(AtomicUsize::new(0));
        let registry = ReloadActionRegistry::builder()
            .register_reload_action(["db.host", "db.port"], counting_action(counter))
            .build();

        assert!(registry.is_watched("db.host"));
        assert!(registry.is_watched("db.port"));
        assert!(!registry.is_watched("db.user"));

        assert_eq!(registry.actions_for("db.host").len(), 1);
        assert!(registry.actions_for("db.user").is_empty());
    }

    #[tokio::test]
    async fn test_shared_property_matches_every_set() {
        let first = Arc::new(AtomicUsize::new(0));
        let second = Arc::new(AtomicUsize::new(0));

        let registry = ReloadActionRegistry::builder()
            .register_reload_action(["a", "b"], counting_action(first.clone()))
            .register_reload_action(["b", "c"], counting_action(second.clone()))
            .build();

        let actions = registry.actions_for("b");
        assert_eq!(actions.len(), 2);
        for action in actions {
            action().await;
        }

        assert_eq!(first.load(Ordering::SeqCst), 1);
        assert_eq!(second.load(Ordering::SeqCst), 1);
    }
}
