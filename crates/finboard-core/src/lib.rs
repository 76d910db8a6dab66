//! Transaction list view state and view lifecycle
//!
//! Each browser page mounts one `TransactionListView` held here on the
//! server. Mounting issues the view's single fetch; disposing cancels it.

pub mod cancel;
pub mod error;
pub mod view;

use finboard_client::SourceRef;
use log::{debug, info, warn};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tokio::sync::{Notify, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tokio::task::JoinHandle;
use uuid::Uuid;

pub use cancel::LoadToken;
pub use error::{CoreError, CoreResult, ErrorCode, ErrorDetails, ErrorSeverity};
pub use view::{LoadState, PageView, TransactionListView, TypeFilter, PAGE_SIZE};

/// Identifier of a mounted view
pub type ViewId = Uuid;

/// A view bound to one page, plus the token that ends its load
#[derive(Debug)]
pub struct MountedView {
    id: ViewId,
    view: RwLock<TransactionListView>,
    token: LoadToken,
    last_seen: Mutex<Instant>,
}

impl MountedView {
    fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            view: RwLock::new(TransactionListView::new()),
            token: LoadToken::new(),
            last_seen: Mutex::new(Instant::now()),
        }
    }

    pub fn id(&self) -> ViewId {
        self.id
    }

    pub async fn read(&self) -> RwLockReadGuard<'_, TransactionListView> {
        self.view.read().await
    }

    pub async fn write(&self) -> RwLockWriteGuard<'_, TransactionListView> {
        self.view.write().await
    }

    pub fn is_disposed(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Cancel the load while holding the view lock, so a settling load
    /// either finishes first or sees the cancellation
    async fn cancel_load(&self) {
        let _view = self.view.write().await;
        self.token.cancel();
    }

    fn touch(&self) {
        *self.last_seen.lock().unwrap_or_else(|e| e.into_inner()) = Instant::now();
    }

    fn idle_for(&self) -> Duration {
        self.last_seen.lock().unwrap_or_else(|e| e.into_inner()).elapsed()
    }
}

/// All currently mounted views
pub struct ViewRegistry {
    source: SourceRef,
    fetch_limit: u32,
    views: RwLock<HashMap<ViewId, Arc<MountedView>>>,
}

impl ViewRegistry {
    pub fn new(source: SourceRef, fetch_limit: u32) -> Self {
        Self {
            source,
            fetch_limit,
            views: RwLock::new(HashMap::new()),
        }
    }

    /// Mount a new view and start its load
    pub async fn mount(&self) -> Arc<MountedView> {
        let mounted = Arc::new(MountedView::new());
        self.views.write().await.insert(mounted.id, mounted.clone());
        info!("Mounted view {}", mounted.id);

        tokio::spawn(run_load(self.source.clone(), self.fetch_limit, mounted.clone()));
        mounted
    }

    /// Look up a mounted view and mark it as seen
    pub async fn get(&self, id: &ViewId) -> CoreResult<Arc<MountedView>> {
        let views = self.views.read().await;
        let mounted = views
            .get(id)
            .cloned()
            .ok_or_else(|| CoreError::ViewNotFound { id: id.to_string() })?;
        mounted.touch();
        Ok(mounted)
    }

    /// Same as `get`, for ids taken from a request path
    pub async fn get_by_str(&self, id: &str) -> CoreResult<Arc<MountedView>> {
        let id = Uuid::parse_str(id).map_err(|_| CoreError::ViewNotFound { id: id.to_string() })?;
        self.get(&id).await
    }

    /// Unmount a view. Its pending load, if any, is cancelled and its result dropped.
    pub async fn dispose(&self, id: &ViewId) -> bool {
        let removed = self.views.write().await.remove(id);
        match removed {
            Some(mounted) => {
                mounted.cancel_load().await;
                info!("Disposed view {}", id);
                true
            }
            None => false,
        }
    }

    /// Dispose every view not seen for longer than `max_idle`
    pub async fn sweep_idle(&self, max_idle: Duration) -> usize {
        let stale: Vec<Arc<MountedView>> = {
            let mut views = self.views.write().await;
            let ids: Vec<ViewId> = views
                .values()
                .filter(|m| m.idle_for() > max_idle)
                .map(|m| m.id)
                .collect();
            ids.iter().filter_map(|id| views.remove(id)).collect()
        };

        for mounted in &stale {
            mounted.cancel_load().await;
        }
        stale.len()
    }

    pub async fn len(&self) -> usize {
        self.views.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.views.read().await.is_empty()
    }
}

async fn run_load(source: SourceRef, limit: u32, mounted: Arc<MountedView>) {
    let token = mounted.token.clone();

    let result = tokio::select! {
        _ = token.cancelled() => {
            debug!("Load for view {} cancelled before settling", mounted.id);
            return;
        }
        result = source.load_transactions(limit) => result,
    };

    let mut view = mounted.view.write().await;
    // dispose() may have run while the response was in flight
    if token.is_cancelled() {
        debug!("Dropping late response for disposed view {}", mounted.id);
        return;
    }

    match &result {
        Ok(transactions) => info!("View {} loaded {} transactions", mounted.id, transactions.len()),
        Err(e) => warn!("View {} failed to load: {}", mounted.id, e),
    }
    view.complete(result);
}

/// Periodically dispose idle views until `shutdown` is notified.
///
/// Signal shutdown with `notify_one` so a signal sent mid-sweep is not lost.
pub fn spawn_idle_sweeper(
    registry: Arc<ViewRegistry>,
    interval: Duration,
    max_idle: Duration,
    shutdown: Arc<Notify>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        loop {
            tokio::select! {
                _ = shutdown.notified() => {
                    info!("Idle view sweeper stopped");
                    break;
                }
                _ = ticker.tick() => {
                    let disposed = registry.sweep_idle(max_idle).await;
                    if disposed > 0 {
                        info!("Disposed {} idle views", disposed);
                    }
                }
            }
        }
    })
}
