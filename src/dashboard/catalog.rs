//! The list of scoring models and the user's current choice.

use std::sync::Arc;

use crate::gateway::{Model, RemoteGateway, TransportError};

use super::fetcher::{FetchEvent, ResourceFetcher};

pub struct ModelCatalog {
    fetcher: ResourceFetcher<Vec<Model>, ()>,
    selection: Option<Model>,
}

impl ModelCatalog {
    pub fn new(gateway: Arc<dyn RemoteGateway>) -> Self {
        let fetcher = ResourceFetcher::new("models", Arc::new(move || gateway.list_models()));
        Self {
            fetcher,
            selection: None,
        }
    }

    /// Start the initial listing; later calls do nothing.
    pub fn activate(&mut self) {
        self.fetcher.activate(());
    }

    /// List the models again.
    pub fn reload(&mut self) {
        self.fetcher.refetch();
    }

    /// Apply a finished listing. A selection that is no longer listed is dropped,
    /// including after a failed listing.
    pub fn poll(&mut self) -> Option<FetchEvent> {
        let event = self.fetcher.poll()?;
        let still_listed = self.selection.as_ref().is_none_or(|selected| {
            self.models().iter().any(|model| model.key() == selected.key())
        });
        if !still_listed {
            tracing::info!("Selected model is no longer listed; clearing selection");
            self.selection = None;
        }
        Some(event)
    }

    /// Models from the last successful listing; empty otherwise.
    pub fn models(&self) -> &[Model] {
        self.fetcher.data().map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn error(&self) -> Option<&TransportError> {
        self.fetcher.error()
    }

    pub fn is_loading(&self) -> bool {
        self.fetcher.is_pending()
    }

    /// Select the first listed model with `model_version`, or nothing when none matches.
    pub fn select(&mut self, model_version: &str) -> Option<&Model> {
        self.selection = self
            .models()
            .iter()
            .find(|model| model.model_version == model_version)
            .cloned();
        self.selection.as_ref()
    }

    /// Select by full `(model_type, model_version)` identity.
    pub fn select_key(&mut self, model_type: &str, model_version: &str) -> Option<&Model> {
        self.selection = self
            .models()
            .iter()
            .find(|model| model.key() == (model_type, model_version))
            .cloned();
        self.selection.as_ref()
    }

    pub fn selection(&self) -> Option<&Model> {
        self.selection.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::test_support::{StubGateway, poll_until};

    fn loaded_catalog(gateway: Arc<StubGateway>) -> ModelCatalog {
        let mut catalog = ModelCatalog::new(gateway);
        catalog.activate();
        poll_until(|| catalog.poll().is_some());
        catalog
    }

    #[test]
    fn select_picks_the_matching_version() {
        let gateway = Arc::new(StubGateway::with_models(vec![
            Model::new("rf", "1"),
            Model::new("xgb", "2"),
        ]));
        let mut catalog = loaded_catalog(gateway.clone());
        assert_eq!(catalog.models().len(), 2);

        let selected = catalog.select("2").cloned();
        assert_eq!(selected, Some(Model::new("xgb", "2")));
        assert_eq!(catalog.selection(), Some(&Model::new("xgb", "2")));

        assert!(catalog.select("9").is_none());
        assert!(catalog.selection().is_none());
        assert_eq!(gateway.list_calls(), 1);
    }

    #[test]
    fn duplicate_versions_resolve_to_first_listed() {
        let gateway = Arc::new(StubGateway::with_models(vec![
            Model::new("rf", "1"),
            Model::new("xgb", "1"),
        ]));
        let mut catalog = loaded_catalog(gateway);
        assert_eq!(catalog.select("1").map(|m| m.model_type.as_str()), Some("rf"));
        assert_eq!(
            catalog.select_key("xgb", "1").map(|m| m.model_type.as_str()),
            Some("xgb")
        );
    }

    #[test]
    fn activate_lists_models_once() {
        let gateway = Arc::new(StubGateway::with_models(vec![Model::new("rf", "1")]));
        let mut catalog = loaded_catalog(gateway.clone());
        catalog.activate();
        assert!(!catalog.is_loading());
        assert_eq!(gateway.list_calls(), 1);
    }

    #[test]
    fn failed_listing_leaves_catalog_empty() {
        let gateway = Arc::new(StubGateway::default());
        gateway.fail_listing(TransportError::Transport("down".into()));
        let mut catalog = loaded_catalog(gateway);
        assert!(catalog.models().is_empty());
        assert!(catalog.error().is_some());
        assert!(catalog.select("1").is_none());
    }

    #[test]
    fn reload_keeps_selection_only_while_listed() {
        let gateway = Arc::new(StubGateway::with_models(vec![
            Model::new("rf", "1"),
            Model::new("xgb", "2"),
        ]));
        let mut catalog = loaded_catalog(gateway.clone());
        catalog.select("2");

        catalog.reload();
        poll_until(|| catalog.poll().is_some());
        assert_eq!(catalog.selection(), Some(&Model::new("xgb", "2")));

        gateway.set_models(vec![Model::new("rf", "1")]);
        catalog.reload();
        poll_until(|| catalog.poll().is_some());
        assert!(catalog.selection().is_none());
        assert_eq!(gateway.list_calls(), 3);
    }

    #[test]
    fn failed_reload_clears_selection() {
        let gateway = Arc::new(StubGateway::with_models(vec![Model::new("rf", "1")]));
        let mut catalog = loaded_catalog(gateway.clone());
        catalog.select("1");
        assert!(catalog.selection().is_some());

        gateway.fail_listing(TransportError::Transport("down".into()));
        catalog.reload();
        assert_eq!(
            poll_until_event(&mut catalog),
            FetchEvent::Failed(TransportError::Transport("down".into()))
        );
        assert!(catalog.models().is_empty());
        assert!(catalog.selection().is_none());
    }

    fn poll_until_event(catalog: &mut ModelCatalog) -> FetchEvent {
        let mut event = None;
        poll_until(|| {
            event = catalog.poll();
            event.is_some()
        });
        event.expect("listing finished")
    }
}
