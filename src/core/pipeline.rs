//! The report pipeline: read the roster CSV, compute numerology profiles
//! and render the report, then write everything as a ZIP bundle.

use crate::core::narrative::{build_prompt, DEFAULT_PROMPT_TEMPLATE};
use crate::core::numerology::compute_numerology_for_year;
use crate::core::report::{render_report, NarrativeSection};
use crate::core::roster::{export_roster, import_roster};
use crate::core::{ConfigProvider, NarrativeGenerator, Pipeline, Storage};
use crate::domain::model::{Person, PersonProfile, ReportBundle, Roster};
use crate::utils::error::{Result, VidaError};
use chrono::{Datelike, Utc};
use std::io::Write;
use zip::write::{FileOptions, ZipWriter};

pub const BUNDLE_NAME: &str = "arbol_vida.zip";

pub struct ReportPipeline<S: Storage, C: ConfigProvider, G: NarrativeGenerator> {
    storage: S,
    config: C,
    generator: G,
    prompt_template: String,
}

impl<S: Storage, C: ConfigProvider, G: NarrativeGenerator> ReportPipeline<S, C, G> {
    pub fn new(storage: S, config: C, generator: G) -> Self {
        Self {
            storage,
            config,
            generator,
            prompt_template: DEFAULT_PROMPT_TEMPLATE.to_string(),
        }
    }

    pub fn with_prompt_template(mut self, template: String) -> Self {
        self.prompt_template = template;
        self
    }

    fn profile_for(&self, person: &Person, reference_year: i32) -> PersonProfile {
        PersonProfile {
            numerology: compute_numerology_for_year(
                &person.full_name(),
                &person.birth_date(),
                reference_year,
            ),
            person: person.clone(),
        }
    }
}

#[async_trait::async_trait]
impl<S: Storage, C: ConfigProvider, G: NarrativeGenerator> Pipeline for ReportPipeline<S, C, G> {
    async fn extract(&self) -> Result<Roster> {
        tracing::debug!("Reading roster from: {}", self.config.input_path());
        let bytes = self.storage.read_file(self.config.input_path()).await?;
        let text = String::from_utf8(bytes).map_err(|e| VidaError::ProcessingError {
            message: format!("Roster file is not valid UTF-8: {}", e),
        })?;
        let roster = import_roster(&text)?;
        tracing::debug!(
            "Roster loaded: consultant plus {} family members",
            roster.family.len()
        );
        Ok(roster)
    }

    async fn transform(&self, roster: Roster) -> Result<ReportBundle> {
        let reference_year = self
            .config
            .reference_year()
            .unwrap_or_else(|| Utc::now().year());

        let consultant = self.profile_for(&roster.consultant, reference_year);
        let family: Vec<PersonProfile> = roster
            .family
            .iter()
            .map(|p| self.profile_for(p, reference_year))
            .collect();

        let narrative = if self.config.analyze() {
            let prompt = build_prompt(&self.prompt_template, &consultant, &family);
            tracing::debug!("Narrative prompt is {} characters", prompt.len());
            match self.generator.generate(&prompt).await {
                Ok(text) => NarrativeSection::Generated(text),
                Err(e) => {
                    // A collaborator failure must not sink the whole report.
                    tracing::warn!("Narrative generation failed: {}", e);
                    NarrativeSection::Unavailable
                }
            }
        } else {
            NarrativeSection::Disabled
        };

        let report_markdown = render_report(&consultant, &family, &narrative, reference_year);
        let roster_csv = export_roster(&roster)?;

        let mut profiles = Vec::with_capacity(1 + family.len());
        profiles.push(consultant);
        profiles.extend(family);

        Ok(ReportBundle {
            roster_csv,
            profiles,
            report_markdown,
        })
    }

    async fn load(&self, bundle: ReportBundle) -> Result<String> {
        let output_path = format!("{}/{}", self.config.output_path(), BUNDLE_NAME);

        let zip_data = {
            let mut zip = ZipWriter::new(std::io::Cursor::new(Vec::new()));

            zip.start_file::<_, ()>("roster.csv", FileOptions::default())?;
            zip.write_all(bundle.roster_csv.as_bytes())?;

            zip.start_file::<_, ()>("profiles.json", FileOptions::default())?;
            let json_data = serde_json::to_string_pretty(&bundle.profiles)?;
            zip.write_all(json_data.as_bytes())?;

            zip.start_file::<_, ()>("informe.md", FileOptions::default())?;
            zip.write_all(bundle.report_markdown.as_bytes())?;

            let cursor = zip.finish()?;
            cursor.into_inner()
        };

        tracing::debug!("Writing bundle ({} bytes) to storage", zip_data.len());
        self.storage.write_file(&output_path, &zip_data).await?;

        Ok(output_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::narrative::OfflineNarrative;
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    #[derive(Clone)]
    struct MockStorage {
        files: Arc<Mutex<HashMap<String, Vec<u8>>>>,
    }

    impl MockStorage {
        fn new() -> Self {
            Self {
                files: Arc::new(Mutex::new(HashMap::new())),
            }
        }

        async fn put_file(&self, path: &str, data: &[u8]) {
            let mut files = self.files.lock().await;
            files.insert(path.to_string(), data.to_vec());
        }

        async fn get_file(&self, path: &str) -> Option<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned()
        }
    }

    impl Storage for MockStorage {
        async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
            let files = self.files.lock().await;
            files.get(path).cloned().ok_or_else(|| {
                VidaError::IoError(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("File not found: {}", path),
                ))
            })
        }

        async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
            let mut files = self.files.lock().await;
            files.insert(path.to_string(), data.to_vec());
            Ok(())
        }
    }

    struct MockConfig {
        input: String,
        output_path: String,
        analyze: bool,
        reference_year: Option<i32>,
    }

    impl MockConfig {
        fn new() -> Self {
            Self {
                input: "roster.csv".to_string(),
                output_path: "test_output".to_string(),
                analyze: false,
                reference_year: Some(2026),
            }
        }
    }

    impl ConfigProvider for MockConfig {
        fn input_path(&self) -> &str {
            &self.input
        }

        fn output_path(&self) -> &str {
            &self.output_path
        }

        fn analyze(&self) -> bool {
            self.analyze
        }

        fn reference_year(&self) -> Option<i32> {
            self.reference_year
        }
    }

    struct MockNarrative {
        answer: Result<String>,
    }

    #[async_trait]
    impl NarrativeGenerator for MockNarrative {
        async fn generate(&self, _prompt: &str) -> Result<String> {
            match &self.answer {
                Ok(text) => Ok(text.clone()),
                Err(_) => Err(VidaError::NarrativeError {
                    message: "mock failure".to_string(),
                }),
            }
        }
    }

    const ROSTER_CSV: &str = "id,firstName,lastName,nicknames,birthDay,birthMonth,birthYear,gender,relationshipType,profession,formation,characteristics\n\
        p1,Ana,Ruiz,,12,5,1990,Femenino,SELF,,,Creativa\n\
        p2,Luis,Ruiz,,3,11,1962,Masculino,Padre/Madre,,,\n";

    #[tokio::test]
    async fn test_extract_parses_roster() {
        let storage = MockStorage::new();
        storage.put_file("roster.csv", ROSTER_CSV.as_bytes()).await;
        let pipeline = ReportPipeline::new(storage, MockConfig::new(), OfflineNarrative);

        let roster = pipeline.extract().await.unwrap();
        assert_eq!(roster.consultant.first_name, "Ana");
        assert_eq!(roster.family.len(), 1);
    }

    #[tokio::test]
    async fn test_extract_missing_file_is_an_error() {
        let pipeline =
            ReportPipeline::new(MockStorage::new(), MockConfig::new(), OfflineNarrative);
        assert!(pipeline.extract().await.is_err());
    }

    #[tokio::test]
    async fn test_transform_computes_profiles() {
        let storage = MockStorage::new();
        storage.put_file("roster.csv", ROSTER_CSV.as_bytes()).await;
        let pipeline = ReportPipeline::new(storage, MockConfig::new(), OfflineNarrative);

        let roster = pipeline.extract().await.unwrap();
        let bundle = pipeline.transform(roster).await.unwrap();

        assert_eq!(bundle.profiles.len(), 2);
        let ana = &bundle.profiles[0];
        assert_eq!(ana.numerology.soul, 5);
        assert_eq!(ana.numerology.personality, 22);
        assert_eq!(ana.numerology.life_path, Some(9));

        assert!(bundle.report_markdown.contains("Ana Ruiz"));
        assert!(!bundle.report_markdown.contains("Análisis Narrativo"));
        assert!(bundle.roster_csv.contains("SELF"));
    }

    #[tokio::test]
    async fn test_transform_with_narrative() {
        let storage = MockStorage::new();
        storage.put_file("roster.csv", ROSTER_CSV.as_bytes()).await;
        let mut config = MockConfig::new();
        config.analyze = true;
        let generator = MockNarrative {
            answer: Ok("### I. Dinámica de Roles".to_string()),
        };
        let pipeline = ReportPipeline::new(storage, config, generator);

        let roster = pipeline.extract().await.unwrap();
        let bundle = pipeline.transform(roster).await.unwrap();
        assert!(bundle.report_markdown.contains("### I. Dinámica de Roles"));
    }

    #[tokio::test]
    async fn test_transform_narrative_failure_falls_back() {
        let storage = MockStorage::new();
        storage.put_file("roster.csv", ROSTER_CSV.as_bytes()).await;
        let mut config = MockConfig::new();
        config.analyze = true;
        let generator = MockNarrative {
            answer: Err(VidaError::NarrativeError {
                message: "down".to_string(),
            }),
        };
        let pipeline = ReportPipeline::new(storage, config, generator);

        let roster = pipeline.extract().await.unwrap();
        let bundle = pipeline.transform(roster).await.unwrap();
        assert!(bundle.report_markdown.contains("## Error de Análisis"));
    }

    #[tokio::test]
    async fn test_load_writes_bundle_zip() {
        let storage = MockStorage::new();
        storage.put_file("roster.csv", ROSTER_CSV.as_bytes()).await;
        let pipeline =
            ReportPipeline::new(storage.clone(), MockConfig::new(), OfflineNarrative);

        let roster = pipeline.extract().await.unwrap();
        let bundle = pipeline.transform(roster).await.unwrap();
        let output_path = pipeline.load(bundle).await.unwrap();

        assert_eq!(output_path, "test_output/arbol_vida.zip");

        let zip_bytes = storage.get_file(&output_path).await.unwrap();
        let cursor = std::io::Cursor::new(zip_bytes);
        let mut archive = zip::ZipArchive::new(cursor).unwrap();
        assert_eq!(archive.len(), 3);

        let mut file_names: Vec<String> = (0..archive.len())
            .map(|i| archive.by_index(i).unwrap().name().to_string())
            .collect();
        file_names.sort();
        assert_eq!(file_names, vec!["informe.md", "profiles.json", "roster.csv"]);
    }

    #[tokio::test]
    async fn test_bundle_roster_round_trips() {
        let storage = MockStorage::new();
        storage.put_file("roster.csv", ROSTER_CSV.as_bytes()).await;
        let pipeline = ReportPipeline::new(storage, MockConfig::new(), OfflineNarrative);

        let roster = pipeline.extract().await.unwrap();
        let bundle = pipeline.transform(roster.clone()).await.unwrap();

        let reimported = import_roster(&bundle.roster_csv).unwrap();
        assert_eq!(roster, reimported);

        // recomputing from the re-imported data reproduces the profiles
        let recomputed = pipeline.transform(reimported).await.unwrap();
        assert_eq!(bundle.profiles, recomputed.profiles);
    }
}
