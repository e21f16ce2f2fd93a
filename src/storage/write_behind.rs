//! Background writer for any key-value store
//!
//! `set` queues the write and returns at once; a dedicated thread applies
//! queued writes to the wrapped store in order. Failed writes are logged and
//! counted, never reported back to the caller.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};

use tracing::{debug, error};

use super::KeyValueStore;
use crate::error::XpensError;

enum Command {
    Write { key: String, value: String },
    Flush(Sender<()>),
}

/// Wraps a store so that writes happen on a background thread
pub struct WriteBehindStore<S: KeyValueStore + 'static> {
    inner: Arc<S>,
    // Mutex so the wrapper is Sync; the sender itself only needs &self to send.
    sender: Mutex<Option<Sender<Command>>>,
    worker: Option<JoinHandle<()>>,
    failed: Arc<AtomicUsize>,
}

impl<S: KeyValueStore + 'static> WriteBehindStore<S> {
    /// Start the writer thread for `inner`
    pub fn new(inner: S) -> Result<Self, XpensError> {
        let inner = Arc::new(inner);
        let failed = Arc::new(AtomicUsize::new(0));
        let (sender, receiver) = mpsc::channel();

        let worker_store = Arc::clone(&inner);
        let worker_failed = Arc::clone(&failed);
        let worker = thread::Builder::new()
            .name("xpens-writer".into())
            .spawn(move || run_writer(worker_store.as_ref(), receiver, &worker_failed))
            .map_err(|e| XpensError::Storage(format!("Failed to start writer thread: {}", e)))?;

        Ok(Self {
            inner,
            sender: Mutex::new(Some(sender)),
            worker: Some(worker),
            failed,
        })
    }

    /// Block until every write queued so far has been applied (or has failed)
    pub fn flush(&self) -> Result<(), XpensError> {
        let (ack_tx, ack_rx) = mpsc::channel();
        self.send(Command::Flush(ack_tx))?;
        ack_rx
            .recv()
            .map_err(|_| XpensError::Storage("Writer thread stopped before flush".into()))
    }

    /// Number of queued writes the wrapped store rejected
    pub fn failed_writes(&self) -> usize {
        self.failed.load(Ordering::SeqCst)
    }

    /// The wrapped store
    pub fn inner(&self) -> &S {
        &self.inner
    }

    fn send(&self, command: Command) -> Result<(), XpensError> {
        let guard = self
            .sender
            .lock()
            .map_err(|e| XpensError::Storage(format!("Failed to acquire writer lock: {}", e)))?;

        match guard.as_ref() {
            Some(sender) => sender
                .send(command)
                .map_err(|_| XpensError::Storage("Writer thread is not running".into())),
            None => Err(XpensError::Storage("Writer has been shut down".into())),
        }
    }
}

fn run_writer<S: KeyValueStore>(store: &S, receiver: Receiver<Command>, failed: &AtomicUsize) {
    for command in receiver {
        match command {
            Command::Write { key, value } => {
                if let Err(e) = store.set(&key, &value) {
                    failed.fetch_add(1, Ordering::SeqCst);
                    error!(key = %key, error = %e, "background write failed");
                }
            }
            Command::Flush(ack) => {
                let _ = ack.send(());
            }
        }
    }
    debug!("writer thread stopped");
}

impl<S: KeyValueStore + 'static> KeyValueStore for WriteBehindStore<S> {
    /// Reads see every write queued before the call
    fn get(&self, key: &str) -> Result<Option<String>, XpensError> {
        self.flush()?;
        self.inner.get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), XpensError> {
        self.send(Command::Write {
            key: key.to_string(),
            value: value.to_string(),
        })
    }
}

impl<S: KeyValueStore + 'static> Drop for WriteBehindStore<S> {
    /// Drains the queue and joins the writer thread
    fn drop(&mut self) {
        if let Ok(mut guard) = self.sender.lock() {
            guard.take();
        }
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                error!("writer thread panicked");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    struct RejectingStore;

    impl KeyValueStore for RejectingStore {
        fn get(&self, _key: &str) -> Result<Option<String>, XpensError> {
            Ok(None)
        }

        fn set(&self, _key: &str, _value: &str) -> Result<(), XpensError> {
            Err(XpensError::Storage("quota exceeded".into()))
        }
    }

    #[test]
    fn test_writes_applied_in_order() {
        let store = WriteBehindStore::new(MemoryStore::new()).unwrap();

        for i in 0..50 {
            store.set("income", &i.to_string()).unwrap();
        }
        store.flush().unwrap();

        assert_eq!(store.inner().get("income").unwrap().as_deref(), Some("49"));
        assert_eq!(store.failed_writes(), 0);
    }

    #[test]
    fn test_get_sees_queued_writes() {
        let store = WriteBehindStore::new(MemoryStore::new()).unwrap();
        store.set("budgets", "{}").unwrap();

        assert_eq!(store.get("budgets").unwrap().as_deref(), Some("{}"));
    }

    #[test]
    fn test_failures_are_counted_not_returned() {
        let store = WriteBehindStore::new(RejectingStore).unwrap();

        assert!(store.set("income", "1").is_ok());
        assert!(store.set("income", "2").is_ok());
        store.flush().unwrap();

        assert_eq!(store.failed_writes(), 2);
    }

    #[test]
    fn test_drop_drains_queue() {
        let shared = Arc::new(MemoryStore::new());
        {
            let store = WriteBehindStore::new(Arc::clone(&shared)).unwrap();
            store.set("transactions", "[]").unwrap();
        }

        assert_eq!(shared.get("transactions").unwrap().as_deref(), Some("[]"));
    }
}
