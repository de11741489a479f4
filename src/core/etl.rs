use crate::core::Pipeline;
use crate::utils::error::Result;

pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    /// Runs extract, transform and load in order. A failure in any phase
    /// stops the run before later phases start, so nothing is written when
    /// extraction fails.
    pub async fn run(&self) -> Result<P::Report> {
        tracing::info!("Extracting data...");
        let rows = self.pipeline.extract().await?;
        tracing::info!("Extracted {} rows", rows.len());

        tracing::info!("Transforming data...");
        let output = self.pipeline.transform(rows).await?;

        tracing::info!("Loading data...");
        let report = self.pipeline.load(output).await?;
        tracing::info!("Load finished: {}", report);

        Ok(report)
    }
}
