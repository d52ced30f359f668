use anyhow::Context;
use arbol_vida::utils::{logger, validation::Validate};
use arbol_vida::{
    CliConfig, GeminiClient, LocalStorage, NarrativeConfig, NarrativeGenerator,
    OfflineNarrative, ReportEngine, ReportPipeline, VidaError,
};
use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting arbol-vida CLI");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }

    let narrative_config = match &config.narrative_config {
        Some(path) => NarrativeConfig::from_file(path)
            .with_context(|| format!("failed to load narrative config from {}", path))?,
        None => NarrativeConfig::default(),
    };

    let generator: Box<dyn NarrativeGenerator> = if config.analyze {
        let api_key = std::env::var(&narrative_config.api_key_env).map_err(|_| {
            VidaError::MissingConfigError {
                field: narrative_config.api_key_env.clone(),
            }
        })?;
        tracing::info!("🔮 Narrative analysis enabled (model: {})", narrative_config.model);
        Box::new(
            GeminiClient::new(&narrative_config, api_key)
                .context("failed to build narrative API client")?,
        )
    } else {
        Box::new(OfflineNarrative)
    };

    let storage = LocalStorage::new(".".to_string());
    let mut pipeline = ReportPipeline::new(storage, config, generator);
    if let Some(template) = narrative_config.prompt_template {
        pipeline = pipeline.with_prompt_template(template);
    }

    let engine = ReportEngine::new(pipeline);

    match engine.run().await {
        Ok(output_path) => {
            tracing::info!("✅ Report generated successfully!");
            println!("✅ Informe generado correctamente");
            println!("📁 {}", output_path);
        }
        Err(e) => {
            tracing::error!("❌ Report generation failed: {}", e);
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    }

    Ok(())
}
