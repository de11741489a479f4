use crate::core::scope::collect_scopes;
use crate::core::sitemap::render_sitemap;
use crate::core::{BusinessSource, ConfigProvider, Pipeline, ScopeRow, SitemapDocument, Storage};
use crate::utils::error::Result;

/// Store rows in, `sitemap.xml` out.
pub struct SitemapPipeline<S: Storage, B: BusinessSource, C: ConfigProvider> {
    storage: S,
    source: B,
    config: C,
}

impl<S: Storage, B: BusinessSource, C: ConfigProvider> SitemapPipeline<S, B, C> {
    pub fn new(storage: S, source: B, config: C) -> Self {
        Self {
            storage,
            source,
            config,
        }
    }
}

#[async_trait::async_trait]
impl<S: Storage, B: BusinessSource, C: ConfigProvider> Pipeline for SitemapPipeline<S, B, C> {
    type Row = ScopeRow;
    type Output = SitemapDocument;
    type Report = String;

    async fn extract(&self) -> Result<Vec<ScopeRow>> {
        tracing::debug!("Reading scope rows from {}", self.config.store_url());
        self.source.fetch_scope_rows().await
    }

    async fn transform(&self, rows: Vec<ScopeRow>) -> Result<SitemapDocument> {
        let scopes = collect_scopes(&rows);
        tracing::info!("Collected {} unique scopes from {} rows", scopes.len(), rows.len());

        let document = render_sitemap(self.config.site_url(), &scopes)?;
        tracing::debug!("Rendered {} sitemap URLs", document.url_count);
        Ok(document)
    }

    async fn load(&self, document: SitemapDocument) -> Result<String> {
        let output_path = self.config.output_path().to_string();
        tracing::debug!(
            "Writing sitemap ({} bytes, {} URLs)",
            document.xml.len(),
            document.url_count
        );
        self.storage
            .write_file(&output_path, document.xml.as_bytes())
            .await?;
        Ok(output_path)
    }
}
