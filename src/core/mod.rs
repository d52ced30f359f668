pub mod engine;
pub mod narrative;
pub mod numerology;
pub mod pipeline;
pub mod report;
pub mod roster;
pub mod sefirot;

pub use crate::domain::model::{NumerologyResult, PersonProfile, ReportBundle, Roster};
pub use crate::domain::ports::{ConfigProvider, NarrativeGenerator, Pipeline, Storage};
pub use crate::utils::error::Result;
