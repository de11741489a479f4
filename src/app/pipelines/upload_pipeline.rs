use crate::core::business::{dedupe_businesses, flatten_business};
use crate::core::{BusinessSource, ConfigProvider, Pipeline, Storage};
use crate::domain::model::{NewBusiness, ScrapedBusiness, UploadReport};
use crate::utils::error::Result;

/// Scraper export in, rows inserted into the store out.
pub struct UploadPipeline<S: Storage, B: BusinessSource, C: ConfigProvider> {
    storage: S,
    source: B,
    config: C,
    input_path: String,
}

impl<S: Storage, B: BusinessSource, C: ConfigProvider> UploadPipeline<S, B, C> {
    pub fn new(storage: S, source: B, config: C, input_path: impl Into<String>) -> Self {
        Self {
            storage,
            source,
            config,
            input_path: input_path.into(),
        }
    }
}

#[async_trait::async_trait]
impl<S: Storage, B: BusinessSource, C: ConfigProvider> Pipeline for UploadPipeline<S, B, C> {
    type Row = ScrapedBusiness;
    type Output = Vec<NewBusiness>;
    type Report = UploadReport;

    async fn extract(&self) -> Result<Vec<ScrapedBusiness>> {
        let data = self.storage.read_file(&self.input_path).await?;
        let rows: Vec<ScrapedBusiness> = serde_json::from_slice(&data)?;
        tracing::info!("Loaded {} businesses from {}", rows.len(), self.input_path);
        Ok(rows)
    }

    async fn transform(&self, rows: Vec<ScrapedBusiness>) -> Result<Vec<NewBusiness>> {
        let flattened: Vec<NewBusiness> = rows.iter().map(flatten_business).collect();
        let unique = dedupe_businesses(flattened, self.config.owner_website());
        tracing::info!("Deduplicated {} -> {} businesses", rows.len(), unique.len());
        Ok(unique)
    }

    async fn load(&self, businesses: Vec<NewBusiness>) -> Result<UploadReport> {
        let mut report = UploadReport::default();

        for business in &businesses {
            match self.source.insert_business(business).await {
                Ok(()) => report.succeeded += 1,
                Err(e) => {
                    report.failed += 1;
                    tracing::error!("Upload failed for {}: {}", business.name, e);
                }
            }
        }

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::LocalStorage;
    use crate::core::etl::EtlEngine;
    use crate::core::{BusinessFilter, ScopeRow};
    use crate::domain::model::BusinessRecord;
    use crate::utils::error::DirectoryError;
    use std::sync::Mutex;
    use tempfile::TempDir;

    #[derive(Default)]
    struct RecordingSource {
        inserted: Mutex<Vec<NewBusiness>>,
        reject_name: Option<String>,
    }

    impl BusinessSource for RecordingSource {
        async fn fetch_scope_rows(&self) -> Result<Vec<ScopeRow>> {
            Ok(Vec::new())
        }

        async fn fetch_businesses(&self, _filter: &BusinessFilter) -> Result<Vec<BusinessRecord>> {
            Ok(Vec::new())
        }

        async fn insert_business(&self, business: &NewBusiness) -> Result<()> {
            if self.reject_name.as_deref() == Some(business.name.as_str()) {
                return Err(DirectoryError::UpstreamError {
                    status: 409,
                    message: "duplicate key".to_string(),
                });
            }
            self.inserted.lock().unwrap().push(business.clone());
            Ok(())
        }
    }

    struct OwnerConfig(Option<&'static str>);

    impl ConfigProvider for OwnerConfig {
        fn store_url(&self) -> &str {
            "http://store.test"
        }

        fn api_key(&self) -> &str {
            "key"
        }

        fn site_url(&self) -> &str {
            "https://example.com"
        }

        fn output_path(&self) -> &str {
            "public/sitemap.xml"
        }

        fn owner_website(&self) -> Option<&str> {
            self.0
        }
    }

    const EXPORT: &str = r#"[
        {"name": "Handy Andy", "website": "https://andy.example", "city": "Franklin",
         "service": "handyman", "reviews": {"rating": "4.8", "count": 12}},
        {"name": "handy andy", "website": "https://ANDY.example ", "city": "Franklin",
         "service": "handyman"},
        {"name": "Fix It Felix", "website": "", "city": "Franklin", "service": "handyman",
         "review_count": 3, "avg_rating": 4.0}
    ]"#;

    #[tokio::test]
    async fn test_upload_dedupes_and_counts() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("export.json"), EXPORT).unwrap();

        let pipeline = UploadPipeline::new(
            LocalStorage::new(dir.path()),
            RecordingSource::default(),
            OwnerConfig(None),
            "export.json",
        );

        let report = EtlEngine::new(pipeline).run().await.unwrap();
        assert_eq!(
            report,
            UploadReport {
                succeeded: 2,
                failed: 0
            }
        );
    }

    #[tokio::test]
    async fn test_rejected_row_counts_as_failure() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("export.json"), EXPORT).unwrap();

        let source = RecordingSource {
            reject_name: Some("Fix It Felix".to_string()),
            ..Default::default()
        };
        let pipeline = UploadPipeline::new(
            LocalStorage::new(dir.path()),
            source,
            OwnerConfig(None),
            "export.json",
        );

        let rows = pipeline.extract().await.unwrap();
        let unique = pipeline.transform(rows).await.unwrap();
        let report = pipeline.load(unique).await.unwrap();

        assert_eq!(report.succeeded, 1);
        assert_eq!(report.failed, 1);
        let inserted = pipeline.source.inserted.lock().unwrap();
        assert_eq!(inserted[0].review_count, 12);
        assert_eq!(inserted[0].avg_rating, Some(4.8));
    }

    #[tokio::test]
    async fn test_owner_rows_bypass_dedupe() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("export.json"), EXPORT).unwrap();

        let pipeline = UploadPipeline::new(
            LocalStorage::new(dir.path()),
            RecordingSource::default(),
            OwnerConfig(Some("https://andy.example")),
            "export.json",
        );

        let report = EtlEngine::new(pipeline).run().await.unwrap();
        assert_eq!(report.succeeded, 3);
    }

    #[tokio::test]
    async fn test_missing_export_is_an_error() {
        let dir = TempDir::new().unwrap();
        let pipeline = UploadPipeline::new(
            LocalStorage::new(dir.path()),
            RecordingSource::default(),
            OwnerConfig(None),
            "missing.json",
        );

        let err = EtlEngine::new(pipeline).run().await.unwrap_err();
        assert!(matches!(err, DirectoryError::IoError(_)));
    }
}
