//! Single-flight refresh control over a cached snapshot.
//!
//! A `RefreshController` wraps an expensive [`Loader`] and decides when it
//! actually runs:
//!
//! ```text
//!            refresh(force)
//!   Empty ─────────────────► Loading ──ok──► Ready ──refresh(true)──► Loading
//!     ▲                        │
//!     └──────────err───────────┘   (a failed load keeps the old snapshot)
//! ```
//!
//! While a load is in flight every other `refresh` returns immediately
//! without queueing. Once ready, only a forced refresh reloads.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use tokio::sync::broadcast;
use tracing::debug;

use crate::error::Result;

/// Produces the data held by a [`RefreshController`].
#[async_trait]
pub trait Loader: Send + Sync {
    /// Element type of the snapshot.
    type Item: Send + Sync;

    /// Load a complete, fresh data set.
    async fn load(&self) -> Result<Vec<Self::Item>>;
}

/// What a call to [`RefreshController::refresh`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// The loader ran and the snapshot was replaced.
    Reloaded,

    /// Another refresh was already running; nothing was done.
    InFlight,

    /// The snapshot was already initialized and the refresh was not forced.
    Cached,
}

struct Snapshot<T> {
    data: Arc<Vec<T>>,
    initialized: bool,
    loading: bool,
}

/// Clears the loading flag however the load ends.
struct LoadingGuard<'a, T> {
    state: &'a Mutex<Snapshot<T>>,
}

impl<T> Drop for LoadingGuard<'_, T> {
    fn drop(&mut self) {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .loading = false;
    }
}

/// Lazily loaded, explicitly refreshed snapshot of `L::Item`s.
pub struct RefreshController<L: Loader> {
    /// Name used in logs.
    name: &'static str,

    /// Source of fresh data.
    loader: L,

    /// Current snapshot and flags. Never held across an await.
    state: Mutex<Snapshot<L::Item>>,

    /// Fired after every successful reload.
    changes: broadcast::Sender<()>,
}

impl<L: Loader> RefreshController<L> {
    /// Create a controller. Nothing is loaded until first use.
    pub fn new(name: &'static str, loader: L) -> Self {
        let (changes, _) = broadcast::channel(16);
        Self {
            name,
            loader,
            state: Mutex::new(Snapshot {
                data: Arc::new(Vec::new()),
                initialized: false,
                loading: false,
            }),
            changes,
        }
    }

    fn lock(&self) -> MutexGuard<'_, Snapshot<L::Item>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// The wrapped loader.
    pub fn loader(&self) -> &L {
        &self.loader
    }

    /// Subscribe to change notifications.
    pub fn subscribe(&self) -> broadcast::Receiver<()> {
        self.changes.subscribe()
    }

    /// Whether a load is running.
    pub fn is_loading(&self) -> bool {
        self.lock().loading
    }

    /// Whether a load has ever succeeded.
    pub fn is_initialized(&self) -> bool {
        self.lock().initialized
    }

    /// The current data without triggering a load.
    pub fn current(&self) -> Arc<Vec<L::Item>> {
        Arc::clone(&self.lock().data)
    }

    /// Reload the snapshot if needed.
    ///
    /// Errors from the loader are returned to the caller; the previous
    /// snapshot stays in place and no notification is sent.
    pub async fn refresh(&self, force: bool) -> Result<RefreshOutcome> {
        {
            let mut state = self.lock();
            if state.loading {
                debug!("{} refresh already in flight", self.name);
                return Ok(RefreshOutcome::InFlight);
            }
            if state.initialized && !force {
                debug!("{} snapshot is current", self.name);
                return Ok(RefreshOutcome::Cached);
            }
            state.loading = true;
        }

        let _guard = LoadingGuard { state: &self.state };
        let data = self.loader.load().await?;
        let len = data.len();

        {
            let mut state = self.lock();
            state.data = Arc::new(data);
            state.initialized = true;
        }

        debug!("{} reloaded ({len} items)", self.name);
        // No subscribers is fine.
        let _ = self.changes.send(());
        Ok(RefreshOutcome::Reloaded)
    }

    /// The current data, loading it first if it never has been.
    pub async fn snapshot(&self) -> Result<Arc<Vec<L::Item>>> {
        if !self.is_initialized() {
            self.refresh(false).await?;
        }
        Ok(self.current())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PanelError;
    use pretty_assertions::assert_eq;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::time::Duration;

    #[derive(Default)]
    struct CountingLoader {
        calls: AtomicUsize,
        fail: AtomicBool,
        delay: Option<Duration>,
    }

    #[async_trait]
    impl Loader for CountingLoader {
        type Item = usize;

        async fn load(&self) -> Result<Vec<usize>> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            if let Some(delay) = self.delay {
                tokio::time::sleep(delay).await;
            }
            if self.fail.load(Ordering::SeqCst) {
                return Err(PanelError::Settings("boom".to_string()));
            }
            Ok(vec![call; call])
        }
    }

    fn controller(loader: CountingLoader) -> RefreshController<CountingLoader> {
        RefreshController::new("test", loader)
    }

    #[tokio::test]
    async fn test_unforced_refresh_loads_once() {
        let ctl = controller(CountingLoader::default());

        assert_eq!(ctl.refresh(false).await.unwrap(), RefreshOutcome::Reloaded);
        assert_eq!(ctl.refresh(false).await.unwrap(), RefreshOutcome::Cached);
        assert_eq!(ctl.loader().calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_forced_refresh_reloads() {
        let ctl = controller(CountingLoader::default());

        ctl.refresh(false).await.unwrap();
        assert_eq!(ctl.refresh(true).await.unwrap(), RefreshOutcome::Reloaded);

        assert_eq!(ctl.loader().calls.load(Ordering::SeqCst), 2);
        assert_eq!(*ctl.current(), vec![2, 2]);
    }

    #[tokio::test]
    async fn test_concurrent_refresh_is_single_flight() {
        let ctl = controller(CountingLoader {
            delay: Some(Duration::from_millis(20)),
            ..Default::default()
        });

        let (first, second) = tokio::join!(ctl.refresh(false), ctl.refresh(false));

        assert_eq!(first.unwrap(), RefreshOutcome::Reloaded);
        assert_eq!(second.unwrap(), RefreshOutcome::InFlight);
        assert_eq!(ctl.loader().calls.load(Ordering::SeqCst), 1);
        assert!(!ctl.is_loading());
    }

    #[tokio::test]
    async fn test_forced_refresh_does_not_interrupt_in_flight_load() {
        let ctl = controller(CountingLoader {
            delay: Some(Duration::from_millis(20)),
            ..Default::default()
        });

        let (first, forced) = tokio::join!(ctl.refresh(false), ctl.refresh(true));

        assert_eq!(first.unwrap(), RefreshOutcome::Reloaded);
        assert_eq!(forced.unwrap(), RefreshOutcome::InFlight);
        assert_eq!(ctl.loader().calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_failed_refresh_keeps_snapshot_and_clears_loading() {
        let ctl = controller(CountingLoader::default());
        ctl.refresh(false).await.unwrap();
        let mut changes = ctl.subscribe();

        ctl.loader().fail.store(true, Ordering::SeqCst);
        assert!(ctl.refresh(true).await.is_err());

        assert_eq!(*ctl.current(), vec![1]);
        assert!(ctl.is_initialized());
        assert!(!ctl.is_loading());
        assert!(changes.try_recv().is_err());

        ctl.loader().fail.store(false, Ordering::SeqCst);
        assert_eq!(ctl.refresh(true).await.unwrap(), RefreshOutcome::Reloaded);
    }

    #[tokio::test]
    async fn test_failed_first_load_stays_uninitialized() {
        let loader = CountingLoader::default();
        loader.fail.store(true, Ordering::SeqCst);
        let ctl = controller(loader);

        assert!(ctl.snapshot().await.is_err());
        assert!(!ctl.is_initialized());
        assert!(ctl.current().is_empty());
    }

    #[tokio::test]
    async fn test_snapshot_loads_lazily() {
        let ctl = controller(CountingLoader::default());
        assert!(!ctl.is_initialized());

        let first = ctl.snapshot().await.unwrap();
        let second = ctl.snapshot().await.unwrap();

        assert_eq!(*first, vec![1]);
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(ctl.loader().calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_successful_reload_notifies_subscribers() {
        let ctl = controller(CountingLoader::default());
        let mut changes = ctl.subscribe();

        ctl.refresh(false).await.unwrap();
        assert!(changes.try_recv().is_ok());

        ctl.refresh(false).await.unwrap();
        assert!(changes.try_recv().is_err());
    }
}
