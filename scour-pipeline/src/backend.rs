use async_trait::async_trait;
use scour_qiita::{FetchError, QiitaApi, SearchResult};

/// The fetch seam the pipeline drives. Production wires in [`QiitaApi`];
/// tests inject fakes with controllable timing.
#[async_trait]
pub trait SearchBackend: Send + Sync + 'static {
    async fn search(&self, query: &str) -> Result<Vec<SearchResult>, FetchError>;
}

#[async_trait]
impl SearchBackend for QiitaApi {
    async fn search(&self, query: &str) -> Result<Vec<SearchResult>, FetchError> {
        self.search_titles(query).await
    }
}
