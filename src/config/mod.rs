#[cfg(feature = "cli")]
pub mod cli;
pub mod narrative_toml;

use crate::domain::ports::ConfigProvider;
#[cfg(feature = "cli")]
use crate::utils::validation::{self, Validate};
#[cfg(feature = "cli")]
use clap::Parser;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(Parser))]
#[cfg_attr(feature = "cli", command(name = "arbol-vida"))]
#[cfg_attr(
    feature = "cli",
    command(about = "Genera informes de numerología y cábala (Árbol de la Vida)")
)]
pub struct CliConfig {
    /// Roster CSV with the consultant (SELF row) and family members
    #[cfg_attr(feature = "cli", arg(long, default_value = "roster.csv"))]
    pub input: String,

    #[cfg_attr(feature = "cli", arg(long, default_value = "./output"))]
    pub output_path: String,

    /// Enrich the report through the narrative API
    #[cfg_attr(feature = "cli", arg(long))]
    pub analyze: bool,

    /// Optional TOML file with narrative API settings
    #[cfg_attr(feature = "cli", arg(long))]
    pub narrative_config: Option<String>,

    /// Calendar year for the personal-year cycle (defaults to today's)
    #[cfg_attr(feature = "cli", arg(long))]
    pub reference_year: Option<i32>,

    #[cfg_attr(feature = "cli", arg(long, help = "Enable verbose output"))]
    pub verbose: bool,
}

impl ConfigProvider for CliConfig {
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

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> crate::utils::error::Result<()> {
        validation::validate_path("input", &self.input)?;
        validation::validate_file_extensions(
            "input",
            std::slice::from_ref(&self.input),
            &["csv"],
        )?;
        validation::validate_path("output_path", &self.output_path)?;
        if let Some(path) = &self.narrative_config {
            validation::validate_path("narrative_config", path)?;
            validation::validate_file_extensions(
                "narrative_config",
                std::slice::from_ref(path),
                &["toml"],
            )?;
        }
        if let Some(year) = self.reference_year {
            validation::validate_range("reference_year", year, 1, 9999)?;
        }
        Ok(())
    }
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;

    fn base_config() -> CliConfig {
        CliConfig {
            input: "roster.csv".to_string(),
            output_path: "./output".to_string(),
            analyze: false,
            narrative_config: None,
            reference_year: None,
            verbose: false,
        }
    }

    #[test]
    fn test_valid_config() {
        assert!(base_config().validate().is_ok());
    }

    #[test]
    fn test_rejects_non_csv_input() {
        let mut config = base_config();
        config.input = "roster.xlsx".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_out_of_range_reference_year() {
        let mut config = base_config();
        config.reference_year = Some(0);
        assert!(config.validate().is_err());

        config.reference_year = Some(2026);
        assert!(config.validate().is_ok());
    }
}
