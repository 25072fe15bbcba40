use crate::core::pipeline::FeedPipeline;
use crate::domain::model::LoadState;
use crate::domain::ports::{ConnectivityProbe, Fetcher};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Runs feed loads on background tasks and publishes the latest [`LoadState`].
///
/// Starting a load while another is in flight aborts the older one; its
/// result is never published. The generation counter only changes while the
/// watch channel's value is locked, so a stale task cannot slip a publish in
/// between a newer `load` call and its `Loading` state.
pub struct FeedLoader<F: Fetcher, C: ConnectivityProbe> {
    pipeline: Arc<FeedPipeline<F, C>>,
    state: Arc<watch::Sender<LoadState>>,
    generation: Arc<AtomicU64>,
    in_flight: Mutex<Option<JoinHandle<()>>>,
}

impl<F, C> FeedLoader<F, C>
where
    F: Fetcher + 'static,
    C: ConnectivityProbe + 'static,
{
    pub fn new(pipeline: FeedPipeline<F, C>) -> Self {
        let (state, _) = watch::channel(LoadState::Empty);
        Self {
            pipeline: Arc::new(pipeline),
            state: Arc::new(state),
            generation: Arc::new(AtomicU64::new(0)),
            in_flight: Mutex::new(None),
        }
    }

    /// Must be called from within a tokio runtime.
    pub fn load(&self, url: impl Into<String>) {
        let url = url.into();
        let mut in_flight = self.in_flight.lock().unwrap_or_else(|p| p.into_inner());

        if let Some(previous) = in_flight.take() {
            if !previous.is_finished() {
                tracing::debug!("Cancelling in-flight earthquake load");
            }
            previous.abort();
        }

        let mut generation = 0;
        self.state.send_modify(|state| {
            generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
            *state = LoadState::Loading;
        });

        let pipeline = Arc::clone(&self.pipeline);
        let state = Arc::clone(&self.state);
        let current = Arc::clone(&self.generation);

        *in_flight = Some(tokio::spawn(async move {
            let result = pipeline.load(&url).await;
            let published = state.send_if_modified(|latest| {
                if current.load(Ordering::SeqCst) != generation {
                    return false;
                }
                *latest = result;
                true
            });
            if !published {
                tracing::debug!("Discarding result of superseded load {}", generation);
            }
        }));
    }

    pub fn subscribe(&self) -> watch::Receiver<LoadState> {
        self.state.subscribe()
    }

    pub fn current(&self) -> LoadState {
        self.state.borrow().clone()
    }

    /// Waits until the latest load has published its result.
    pub async fn wait_settled(&self) -> LoadState {
        let mut receiver = self.state.subscribe();
        let settled = match receiver.wait_for(LoadState::is_settled).await {
            Ok(state) => state.clone(),
            Err(_) => LoadState::Empty,
        };
        settled
    }
}

impl<F: Fetcher, C: ConnectivityProbe> Drop for FeedLoader<F, C> {
    fn drop(&mut self) {
        let mut in_flight = self.in_flight.lock().unwrap_or_else(|p| p.into_inner());
        if let Some(handle) = in_flight.take() {
            handle.abort();
        }
    }
}
