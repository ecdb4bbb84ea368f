use std::sync::{Arc, Mutex};

pub type ObserverId = u64;

type ObserverFn = Arc<dyn Fn() + Send + Sync>;

/// Observer list fired by the title store after every accepted write.
/// Events carry no payload, observers re-read the store instead of trusting
/// a pushed value.
#[derive(Default)]
pub struct ObserverList {
    registry: Mutex<Registry>,
}

#[derive(Default)]
struct Registry {
    next_id: ObserverId,
    observers: Vec<(ObserverId, ObserverFn)>,
}

impl ObserverList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, callback: impl Fn() + Send + Sync + 'static) -> ObserverId {
        let mut registry = self.registry.lock().unwrap();
        let id = registry.next_id;
        registry.next_id += 1;
        registry.observers.push((id, Arc::new(callback)));
        id
    }

    pub fn unregister(&self, id: ObserverId) {
        let mut registry = self.registry.lock().unwrap();
        registry.observers.retain(|(observer_id, _)| *observer_id != id);
    }

    /// Delivers exactly one call to every registered observer. Callbacks run
    /// outside the lock so an observer may register or unregister reentrantly.
    pub fn notify_all(&self) {
        let callbacks: Vec<ObserverFn> = {
            let registry = self.registry.lock().unwrap();
            registry
                .observers
                .iter()
                .map(|(_, callback)| callback.clone())
                .collect()
        };
        for callback in callbacks {
            callback();
        }
    }

    pub fn len(&self) -> usize {
        self.registry.lock().unwrap().observers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
