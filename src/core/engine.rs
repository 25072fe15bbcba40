use crate::core::loader::FeedLoader;
use crate::domain::model::LoadState;
use crate::domain::ports::{ConnectivityProbe, Fetcher, Presenter};
use crate::utils::error::Result;

/// Drives one refresh: start a load, wait for it, hand the state to the presenter.
pub struct ReportEngine<F: Fetcher, C: ConnectivityProbe, P: Presenter> {
    loader: FeedLoader<F, C>,
    presenter: P,
}

impl<F, C, P> ReportEngine<F, C, P>
where
    F: Fetcher + 'static,
    C: ConnectivityProbe + 'static,
    P: Presenter,
{
    pub fn new(loader: FeedLoader<F, C>, presenter: P) -> Self {
        Self { loader, presenter }
    }

    pub async fn refresh(&mut self, url: &str) -> Result<LoadState> {
        tracing::info!("Fetching earthquakes from {}", url);
        self.loader.load(url);

        let state = self.loader.wait_settled().await;
        match &state {
            LoadState::Loaded(records) => tracing::info!("Presenting {} earthquakes", records.len()),
            LoadState::Empty => tracing::warn!("No earthquakes to present"),
            LoadState::NoNetwork => tracing::warn!("No network connection"),
            LoadState::Loading => {}
        }

        self.presenter.render(&state)?;
        Ok(state)
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn into_presenter(self) -> P {
        self.presenter
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::connectivity::AlwaysOnline;
    use crate::core::pipeline::FeedPipeline;
    use async_trait::async_trait;

    struct CannedFetcher(&'static str);

    #[async_trait]
    impl Fetcher for CannedFetcher {
        async fn fetch(&self, _url: &str) -> Option<String> {
            Some(self.0.to_string())
        }
    }

    #[derive(Default)]
    struct RecordingPresenter {
        rendered: Vec<LoadState>,
    }

    impl Presenter for RecordingPresenter {
        fn render(&mut self, state: &LoadState) -> Result<()> {
            self.rendered.push(state.clone());
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_refresh_renders_settled_state() {
        let body = r#"{"features":[{"properties":{"mag":6.6,"place":"Near Coast of Peru","time":1,"url":"https://example.com"}}]}"#;
        let loader = FeedLoader::new(FeedPipeline::new(CannedFetcher(body), AlwaysOnline));
        let mut engine = ReportEngine::new(loader, RecordingPresenter::default());

        let state = engine.refresh("https://example.com/query").await.unwrap();

        assert_eq!(state.records().len(), 1);
        assert_eq!(engine.presenter().rendered, vec![state]);
    }

    #[tokio::test]
    async fn test_refresh_renders_empty_state_for_garbage() {
        let loader = FeedLoader::new(FeedPipeline::new(CannedFetcher("<html>"), AlwaysOnline));
        let mut engine = ReportEngine::new(loader, RecordingPresenter::default());

        engine.refresh("https://example.com/query").await.unwrap();
        let presenter = engine.into_presenter();
        assert_eq!(presenter.rendered, vec![LoadState::Empty]);
    }
}
