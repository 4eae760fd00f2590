use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::thread::{self, ThreadId};

use anyhow::{bail, Result};
use tracing::{debug, error, info};

use crate::config::Configuration;
use crate::error::StoreError;
use crate::store::{Key, SharedStore};

/// Derives a store key from a thread identity.
///
/// Keys are only probably unique: two live threads whose ids hash alike
/// share a key, and the later save overwrites the earlier one.
pub fn derive_key(id: ThreadId) -> Key {
    let mut hasher = DefaultHasher::new();
    id.hash(&mut hasher);
    hasher.finish() as Key
}

#[derive(Debug, Clone)]
pub struct WorkerReport {
    pub thread_name: String,
    pub key: Key,
    pub result: String,
}

pub struct WorkerTask {
    index: usize,
}

impl WorkerTask {
    pub fn new(index: usize) -> Self {
        Self { index }
    }

    /// Runs the fixed save-then-get sequence against the store `instance`
    /// hands out, printing the get result.
    pub fn run<'a, F>(&self, instance: &F) -> WorkerReport
    where
        F: Fn() -> &'a SharedStore,
    {
        let store = instance();

        let current = thread::current();
        let key = derive_key(current.id());
        debug!("worker {} derived key {}", self.index, key);

        store.save(key, format!("Data from thread {}", key));
        let result = store.get(key);
        println!("{}", result);

        WorkerReport {
            thread_name: current.name().unwrap_or_default().to_string(),
            key,
            result,
        }
    }
}

/// Launches `config.workers` threads running [`WorkerTask::run`] and waits
/// for all of them.
///
/// Every spawned worker is joined even when a later spawn fails or a
/// worker panics; the first such failure is returned afterwards.
pub fn run_workers<'a, F>(instance: F, config: &Configuration) -> Result<Vec<WorkerReport>>
where
    F: Fn() -> &'a SharedStore + Sync,
{
    info!("starting {} workers ...", config.workers);
    let instance = &instance;

    thread::scope(|s| {
        let mut handles = Vec::with_capacity(config.workers);
        let mut spawn_err = None;

        for index in 0..config.workers {
            let task = WorkerTask::new(index);
            let name = format!("{}-{}", config.thread_name_prefix, index);

            match thread::Builder::new()
                .name(name)
                .spawn_scoped(s, move || task.run(instance))
            {
                Ok(h) => handles.push(h),
                Err(e) => {
                    error!("failed to spawn worker {}, err: {}", index, e);
                    spawn_err = Some(e);
                    break;
                }
            }
        }

        let mut reports = Vec::with_capacity(handles.len());
        let mut panicked = None;
        for h in handles {
            let name = h.thread().name().unwrap_or_default().to_string();
            match h.join() {
                Ok(report) => reports.push(report),
                Err(_) => {
                    error!("worker {} panicked", name);
                    panicked.get_or_insert(name);
                }
            }
        }

        if let Some(e) = spawn_err {
            bail!(StoreError::SpawnWorker(e));
        }
        if let Some(name) = panicked {
            bail!(StoreError::WorkerPanicked(name));
        }

        info!("all {} workers finished", reports.len());
        Ok(reports)
    })
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::sync::Arc;

    use super::*;
    use crate::store::testing::RecordingNotifier;

    fn local_store() -> (SharedStore, Arc<RecordingNotifier>) {
        let rec = Arc::new(RecordingNotifier::default());
        (SharedStore::with_notifier(rec.clone()), rec)
    }

    #[test]
    fn test_derive_key() {
        let id = thread::current().id();
        assert_eq!(derive_key(id), derive_key(id));

        let other = thread::spawn(|| thread::current().id()).join().unwrap();
        assert_ne!(derive_key(id), derive_key(other));
    }

    #[test]
    fn test_run_workers_distinct_entries() {
        let (store, rec) = local_store();
        let config = Configuration {
            workers: 5,
            thread_name_prefix: "test-worker".to_string(),
        };

        let reports = run_workers(|| &store, &config).unwrap();

        assert_eq!(reports.len(), 5);
        let keys: HashSet<Key> = reports.iter().map(|r| r.key).collect();
        assert_eq!(keys.len(), 5);
        assert_eq!(store.len(), 5);

        for r in reports.iter() {
            assert!(r.thread_name.starts_with("test-worker-"));
            assert_eq!(
                r.result,
                format!("Data for Key {}: Data from thread {}", r.key, r.key)
            );
            assert_eq!(
                store.lookup(r.key),
                Some(format!("Data from thread {}", r.key))
            );
        }

        let lines = rec.lines();
        assert_eq!(lines.len(), 6);
        assert_eq!(
            lines.iter().filter(|l| l.starts_with("Data Saved: ")).count(),
            5
        );
    }

    #[test]
    fn test_run_workers_many() {
        let (store, _) = local_store();
        let config = Configuration {
            workers: 32,
            ..Default::default()
        };

        let reports = run_workers(|| &store, &config).unwrap();
        assert_eq!(reports.len(), 32);
        assert_eq!(store.len(), 32);
        assert!(reports.iter().all(|r| r.result.starts_with("Data for Key ")));
    }

    fn missing_store() -> &'static SharedStore {
        panic!("no store available")
    }

    #[test]
    fn test_run_workers_reports_panic() {
        let config = Configuration {
            workers: 3,
            ..Default::default()
        };

        let err = run_workers(missing_store, &config).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<StoreError>(),
            Some(StoreError::WorkerPanicked(_))
        ));
    }
}
