use std::collections::HashMap;
use std::sync::{Arc, Mutex, Weak};

use log::warn;

use crate::titles::notify::{ObserverId, ObserverList};
use crate::titles::storage::TitleStorage;

/// Authoritative map of user-chosen titles, one instance per app, handed to
/// the view tree through context. Cloning shares the same underlying state.
///
/// `set` is the single write path: it trims and validates, stores, snapshots
/// the whole map to the storage backend, then notifies observers. Overrides
/// are never deleted here, clearing a thread is the thread manager's concern.
#[derive(Clone)]
pub struct TitleStore {
    inner: Arc<StoreInner>,
}

struct StoreInner {
    titles: Mutex<HashMap<String, String>>,
    observers: ObserverList,
    storage: Box<dyn TitleStorage>,
}

impl TitleStore {
    /// Rehydrates the map from the backend once, at construction.
    pub fn new(storage: impl TitleStorage + 'static) -> Self {
        let titles = storage.load();
        TitleStore {
            inner: Arc::new(StoreInner {
                titles: Mutex::new(titles),
                observers: ObserverList::new(),
                storage: Box::new(storage),
            }),
        }
    }

    pub fn get(&self, thread_id: &str) -> Option<String> {
        self.inner.titles.lock().unwrap().get(thread_id).cloned()
    }

    /// Stores `title.trim()` for `thread_id`, persists the whole map, then
    /// fires the observers. A blank title or thread id is a silent no-op.
    /// The persistence attempt always completes before the broadcast; a
    /// failed write is logged and the in-memory value stays authoritative.
    pub fn set(&self, thread_id: &str, title: &str) {
        let trimmed = title.trim();
        if thread_id.is_empty() || trimmed.is_empty() {
            return;
        }

        let snapshot = {
            let mut titles = self.inner.titles.lock().unwrap();
            titles.insert(thread_id.to_string(), trimmed.to_string());
            titles.clone()
        };

        if let Err(e) = self.inner.storage.save(&snapshot) {
            warn!("failed to persist thread titles: {e}");
        }
        self.inner.observers.notify_all();
    }

    /// Registers a change callback. The returned guard unregisters on drop,
    /// so a view that parks it in `on_cleanup` cannot leak its callback.
    pub fn subscribe(&self, callback: impl Fn() + Send + Sync + 'static) -> TitleSubscription {
        let id = self.inner.observers.register(callback);
        TitleSubscription {
            store: Arc::downgrade(&self.inner),
            id,
        }
    }

    pub fn snapshot(&self) -> HashMap<String, String> {
        self.inner.titles.lock().unwrap().clone()
    }
}

pub struct TitleSubscription {
    store: Weak<StoreInner>,
    id: ObserverId,
}

impl Drop for TitleSubscription {
    fn drop(&mut self) {
        if let Some(store) = self.store.upgrade() {
            store.observers.unregister(self.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::titles::storage::{MemoryTitles, TitleStorageError};
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_set_stores_trimmed_value() {
        let store = TitleStore::new(MemoryTitles::new());
        store.set("t-1", "  Kitchen remodel  ");
        assert_eq!(store.get("t-1").as_deref(), Some("Kitchen remodel"));
    }

    #[test]
    fn test_blank_title_is_rejected() {
        let store = TitleStore::new(MemoryTitles::new());
        store.set("t-1", "Kitchen remodel");

        store.set("t-1", "");
        store.set("t-1", "   \t\n");

        assert_eq!(store.get("t-1").as_deref(), Some("Kitchen remodel"));
    }

    #[test]
    fn test_blank_thread_id_is_rejected() {
        let store = TitleStore::new(MemoryTitles::new());
        store.set("", "Kitchen remodel");
        assert!(store.snapshot().is_empty());
    }

    #[test]
    fn test_set_is_idempotent() {
        let store = TitleStore::new(MemoryTitles::new());
        store.set("t-1", "Kitchen remodel");
        let after_one = store.snapshot();

        store.set("t-1", "  Kitchen remodel ");
        assert_eq!(store.snapshot(), after_one);
    }

    #[test]
    fn test_single_set_notifies_each_subscriber_once() {
        let store = TitleStore::new(MemoryTitles::new());
        let first = Arc::new(AtomicUsize::new(0));
        let second = Arc::new(AtomicUsize::new(0));

        let first_counter = first.clone();
        let _first_sub = store.subscribe(move || {
            first_counter.fetch_add(1, Ordering::SeqCst);
        });
        let second_counter = second.clone();
        let _second_sub = store.subscribe(move || {
            second_counter.fetch_add(1, Ordering::SeqCst);
        });

        store.set("t-1", "Kitchen remodel");

        assert_eq!(first.load(Ordering::SeqCst), 1);
        assert_eq!(second.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_rejected_set_does_not_notify() {
        let store = TitleStore::new(MemoryTitles::new());
        let calls = Arc::new(AtomicUsize::new(0));

        let counter = calls.clone();
        let _sub = store.subscribe(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        store.set("t-1", "   ");
        store.set("", "Kitchen remodel");

        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_dropped_subscription_receives_nothing() {
        let store = TitleStore::new(MemoryTitles::new());
        let calls = Arc::new(AtomicUsize::new(0));

        let counter = calls.clone();
        let subscription = store.subscribe(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        store.set("t-1", "First");
        drop(subscription);
        store.set("t-1", "Second");

        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_rehydrates_from_storage() {
        let store = TitleStore::new(MemoryTitles::with_raw(
            r#"{"t-1": "Budget review", "t-2": "Retry policy"}"#,
        ));
        assert_eq!(store.get("t-1").as_deref(), Some("Budget review"));
        assert_eq!(store.get("t-2").as_deref(), Some("Retry policy"));
    }

    #[test]
    fn test_corrupt_storage_starts_empty() {
        let store = TitleStore::new(MemoryTitles::with_raw("definitely not json"));
        assert!(store.snapshot().is_empty());
    }

    /// Backend that records every snapshot it is asked to write, so the test
    /// can check what had been persisted by the time observers ran.
    #[derive(Default)]
    struct RecordingTitles {
        saves: Arc<Mutex<Vec<HashMap<String, String>>>>,
    }

    impl TitleStorage for RecordingTitles {
        fn load(&self) -> HashMap<String, String> {
            HashMap::new()
        }

        fn save(&self, titles: &HashMap<String, String>) -> Result<(), TitleStorageError> {
            self.saves.lock().unwrap().push(titles.clone());
            Ok(())
        }
    }

    #[test]
    fn test_persistence_completes_before_broadcast() {
        let saves = Arc::new(Mutex::new(Vec::new()));
        let backend = RecordingTitles {
            saves: saves.clone(),
        };
        let store = TitleStore::new(backend);

        let observed = Arc::new(Mutex::new(None));
        let observed_inner = observed.clone();
        let saves_inner = saves.clone();
        let _sub = store.subscribe(move || {
            let persisted = saves_inner
                .lock()
                .unwrap()
                .last()
                .and_then(|snapshot| snapshot.get("t-1").cloned());
            *observed_inner.lock().unwrap() = persisted;
        });

        store.set("t-1", "Kitchen remodel");

        assert_eq!(
            observed.lock().unwrap().as_deref(),
            Some("Kitchen remodel")
        );
    }

    #[test]
    fn test_failed_write_still_notifies() {
        struct RejectingTitles;

        impl TitleStorage for RejectingTitles {
            fn load(&self) -> HashMap<String, String> {
                HashMap::new()
            }

            fn save(&self, _: &HashMap<String, String>) -> Result<(), TitleStorageError> {
                Err(TitleStorageError::Unavailable)
            }
        }

        let store = TitleStore::new(RejectingTitles);
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let _sub = store.subscribe(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        store.set("t-1", "Kitchen remodel");

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(store.get("t-1").as_deref(), Some("Kitchen remodel"));
    }
}
