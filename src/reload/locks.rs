//! Per-segment mutual exclusion for reload jobs.

use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::engine::definition::PipelineSegmentGroup;

/// Keyed lock table serializing reload jobs that target overlapping
/// segment identifiers.
///
/// Two action sets sharing a property can fire two jobs against
/// overlapping segment names; without exclusion, one job's recreate can
/// collide with the other's teardown. Each job holds the lock of every
/// identifier in its group for its full duration. Locks are acquired in
/// sorted identifier order, so overlapping jobs serialize instead of
/// deadlocking.
///
/// Lock entries are never removed; the table is bounded by the number
/// of distinct segment identifiers ever reloaded.
#[derive(Debug, Default)]
pub struct SegmentLocks {
    locks: DashMap<String, Arc<Mutex<()>>>,
}

impl SegmentLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquire the lock for every identifier in `group`, waiting for any
    /// overlapping job to finish first. The returned guards release on
    /// drop.
    pub async fn acquire(&self, group: &PipelineSegmentGroup) -> Vec<OwnedMutexGuard<()>> {
        let mut ids: Vec<&String> = group.ids().iter().collect();
        ids.sort();
        ids.dedup();

        let mut guards = Vec::with_capacity(ids.len());
        for id in ids {
            let lock = Arc::clone(
                self.locks
                    .entry(id.clone())
                    .or_insert_with(|| Arc::new(Mutex::new(())))
                    .value(),
            );

            match lock.clone().try_lock_owned() {
                Ok(guard) => guards.push(guard),
                Err(_) => {
                    tracing::warn!(
                        segment_id = %id,
                        "segment is held by a concurrent reload job, waiting"
                    );
                    guards.push(lock.lock_owned().await);
                }
            }
        }
        guards
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::definition::PipelineDefinition;
    use std::sync::Mutex as StdMutex;
    use std::time::Duration;

    #[tokio::test]
    async fn test_overlapping_groups_serialize() {
        let locks = Arc::new(SegmentLocks::new());
        let events: Arc<StdMutex<Vec<&'static str>>> = Arc::new(StdMutex::new(Vec::new()));

        let group = PipelineDefinition::new("orders", "amq:in", Some("cache:out".into()))
            .segment_group();

        let first = {
            let locks = locks.clone();
            let events = events.clone();
            let group = group.clone();
            tokio::spawn(async move {
                let guards = locks.acquire(&group).await;
                events.lock().unwrap().push("first acquired");
                tokio::time::sleep(Duration::from_millis(50)).await;
                events.lock().unwrap().push("first released");
                drop(guards);
            })
        };

        // give the first job time to take the locks
        tokio::time::sleep(Duration::from_millis(10)).await;

        let second = {
            let locks = locks.clone();
            let events = events.clone();
            tokio::spawn(async move {
                let guards = locks.acquire(&group).await;
                events.lock().unwrap().push("second acquired");
                drop(guards);
            })
        };

        first.await.unwrap();
        second.await.unwrap();

        assert_eq!(
            *events.lock().unwrap(),
            vec!["first acquired", "first released", "second acquired"]
        );
    }

    #[tokio::test]
    async fn test_disjoint_groups_do_not_contend() {
        let locks = SegmentLocks::new();
        let orders = PipelineDefinition::new("orders", "amq:in", None).segment_group();
        let quotes = PipelineDefinition::new("quotes", "http:in", None).segment_group();

        let first = locks.acquire(&orders).await;
        // acquiring a disjoint group must not block even while the first
        // set of guards is alive
        let second = locks.acquire(&quotes).await;

        assert_eq!(first.len(), 2);
        assert_eq!(second.len(), 2);
    }
}
