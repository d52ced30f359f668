pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::LocalStorage;
pub use config::{narrative_toml::NarrativeConfig, CliConfig};

pub use crate::core::engine::ReportEngine;
pub use crate::core::narrative::{GeminiClient, OfflineNarrative};
pub use crate::core::numerology::{compute_numerology, compute_numerology_for_year, reduce};
pub use crate::core::pipeline::ReportPipeline;
pub use crate::core::sefirot::{sefira_for, sefira_for_life_path, SEFIROT};
pub use domain::model::{NumerologyResult, Person, PersonProfile, Roster};
pub use domain::ports::NarrativeGenerator;
pub use utils::error::{Result, VidaError};
