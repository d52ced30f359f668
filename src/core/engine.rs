use crate::core::Pipeline;
use crate::utils::error::Result;

pub struct ReportEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> ReportEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self) -> Result<String> {
        tracing::info!("Starting report generation...");

        tracing::info!("Reading roster...");
        let roster = self.pipeline.extract().await?;
        tracing::info!(
            "Roster loaded: consultant plus {} family members",
            roster.family.len()
        );

        tracing::info!("Computing numerology profiles and rendering report...");
        let bundle = self.pipeline.transform(roster).await?;
        tracing::info!("Computed {} profiles", bundle.profiles.len());

        tracing::info!("Writing report bundle...");
        let output_path = self.pipeline.load(bundle).await?;
        tracing::info!("Bundle saved to: {}", output_path);

        Ok(output_path)
    }
}
