use crate::core::parser::extract_earthquakes;
use crate::domain::model::{Earthquake, LoadState};
use crate::domain::ports::{ConnectivityProbe, Fetcher};

/// Fetches one feed URL and parses it; failures come back as an empty list.
pub async fn fetch_earthquake_data<F: Fetcher + ?Sized>(fetcher: &F, url: &str) -> Vec<Earthquake> {
    let body = fetcher.fetch(url).await;
    extract_earthquakes(body.as_deref())
}

/// One probe -> fetch -> parse cycle.
pub struct FeedPipeline<F: Fetcher, C: ConnectivityProbe> {
    fetcher: F,
    probe: C,
}

impl<F: Fetcher, C: ConnectivityProbe> FeedPipeline<F, C> {
    pub fn new(fetcher: F, probe: C) -> Self {
        Self { fetcher, probe }
    }

    pub async fn load(&self, url: &str) -> LoadState {
        if !self.probe.is_connected(url).await {
            tracing::warn!("No network connection, skipping request to {}", url);
            return LoadState::NoNetwork;
        }

        let earthquakes = fetch_earthquake_data(&self.fetcher, url).await;
        tracing::info!("Loaded {} earthquakes", earthquakes.len());
        LoadState::from_records(earthquakes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct StaticFetcher {
        body: Option<String>,
        calls: Arc<AtomicUsize>,
    }

    #[async_trait]
    impl Fetcher for StaticFetcher {
        async fn fetch(&self, _url: &str) -> Option<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.body.clone()
        }
    }

    struct Offline;

    impl ConnectivityProbe for Offline {
        async fn is_connected(&self, _url: &str) -> bool {
            false
        }
    }

    struct Online;

    impl ConnectivityProbe for Online {
        async fn is_connected(&self, _url: &str) -> bool {
            true
        }
    }

    fn fetcher(body: Option<&str>) -> (StaticFetcher, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        (
            StaticFetcher {
                body: body.map(str::to_string),
                calls: Arc::clone(&calls),
            },
            calls,
        )
    }

    #[tokio::test]
    async fn test_loaded_state_for_good_feed() {
        let body = r#"{"features":[{"properties":{"mag":5.5,"place":"Off the coast","time":1,"url":"https://example.com/1"}}]}"#;
        let (fetcher, calls) = fetcher(Some(body));
        let pipeline = FeedPipeline::new(fetcher, Online);

        let state = pipeline.load("https://example.com/query").await;
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(state.records().len(), 1);
        assert_eq!(state.records()[0].place(), "Off the coast");
    }

    #[tokio::test]
    async fn test_empty_state_when_fetch_fails() {
        let (fetcher, _) = fetcher(None);
        let pipeline = FeedPipeline::new(fetcher, Online);
        assert_eq!(pipeline.load("https://example.com/query").await, LoadState::Empty);
    }

    #[tokio::test]
    async fn test_offline_skips_the_request() {
        let (fetcher, calls) = fetcher(Some("{}"));
        let pipeline = FeedPipeline::new(fetcher, Offline);

        assert_eq!(pipeline.load("https://example.com/query").await, LoadState::NoNetwork);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }
}
