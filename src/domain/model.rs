use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Gender {
    #[serde(rename = "Masculino")]
    Male,
    #[serde(rename = "Femenino")]
    Female,
    #[default]
    #[serde(rename = "Otro")]
    Other,
}

impl Gender {
    pub fn label(&self) -> &'static str {
        match self {
            Gender::Male => "Masculino",
            Gender::Female => "Femenino",
            Gender::Other => "Otro",
        }
    }

    pub fn from_label(label: &str) -> Self {
        match label.trim() {
            "Masculino" => Gender::Male,
            "Femenino" => Gender::Female,
            _ => Gender::Other,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RelationshipType {
    #[serde(rename = "Padre/Madre")]
    Parent,
    #[serde(rename = "Abuelo/a")]
    Grandparent,
    #[serde(rename = "Bisabuelo/a")]
    GreatGrandparent,
    #[serde(rename = "Hermano/a")]
    Sibling,
    #[serde(rename = "Hijo/a")]
    Child,
    #[serde(rename = "Pareja")]
    Partner,
    #[serde(rename = "Tío/a")]
    UncleAunt,
    #[serde(rename = "Primo/a")]
    Cousin,
    #[serde(rename = "Ahijada/o")]
    Godchild,
    #[serde(rename = "Amigo/a")]
    Friend,
    #[serde(rename = "Mentor/Guía")]
    Mentor,
    #[serde(rename = "Otro")]
    Other,
}

impl RelationshipType {
    pub fn label(&self) -> &'static str {
        match self {
            RelationshipType::Parent => "Padre/Madre",
            RelationshipType::Grandparent => "Abuelo/a",
            RelationshipType::GreatGrandparent => "Bisabuelo/a",
            RelationshipType::Sibling => "Hermano/a",
            RelationshipType::Child => "Hijo/a",
            RelationshipType::Partner => "Pareja",
            RelationshipType::UncleAunt => "Tío/a",
            RelationshipType::Cousin => "Primo/a",
            RelationshipType::Godchild => "Ahijada/o",
            RelationshipType::Friend => "Amigo/a",
            RelationshipType::Mentor => "Mentor/Guía",
            RelationshipType::Other => "Otro",
        }
    }

    pub fn from_label(label: &str) -> Self {
        match label.trim() {
            "Padre/Madre" => RelationshipType::Parent,
            "Abuelo/a" => RelationshipType::Grandparent,
            "Bisabuelo/a" => RelationshipType::GreatGrandparent,
            "Hermano/a" => RelationshipType::Sibling,
            "Hijo/a" => RelationshipType::Child,
            "Pareja" => RelationshipType::Partner,
            "Tío/a" => RelationshipType::UncleAunt,
            "Primo/a" => RelationshipType::Cousin,
            "Ahijada/o" => RelationshipType::Godchild,
            "Amigo/a" => RelationshipType::Friend,
            "Mentor/Guía" => RelationshipType::Mentor,
            _ => RelationshipType::Other,
        }
    }
}

/// Biographical record for one person in the roster. `relationship` is `None`
/// for the consultant (the `SELF` row in the CSV format).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub nicknames: String,
    pub birth_day: String,
    pub birth_month: String,
    pub birth_year: String,
    pub gender: Gender,
    pub relationship: Option<RelationshipType>,
    pub profession: String,
    pub formation: String,
    pub characteristics: String,
}

impl Person {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }

    /// Assembles `"YYYY-MM-DD"`; unknown or unparseable parts become the
    /// `"0000"` / `"00"` placeholders the numerology engine expects.
    pub fn birth_date(&self) -> String {
        format!(
            "{}-{}-{}",
            pad_date_part(&self.birth_year, 4),
            pad_date_part(&self.birth_month, 2),
            pad_date_part(&self.birth_day, 2)
        )
    }

    pub fn is_consultant(&self) -> bool {
        self.relationship.is_none()
    }
}

fn pad_date_part(raw: &str, width: usize) -> String {
    match raw.trim().parse::<u32>() {
        Ok(n) if n > 0 => format!("{:0width$}", n, width = width),
        _ => "0".repeat(width),
    }
}

/// The consultant plus their family system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roster {
    pub consultant: Person,
    pub family: Vec<Person>,
}

impl Roster {
    pub fn everyone(&self) -> impl Iterator<Item = &Person> {
        std::iter::once(&self.consultant).chain(self.family.iter())
    }
}

/// Output of the numerology engine for one (name, birth date) pair.
///
/// `inclusion` always carries exactly nine entries keyed 1..=9;
/// `karmic_lessons` and `major_gifts` are ascending and deterministic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NumerologyResult {
    pub soul: u32,
    pub personality: u32,
    pub life_path: Option<u32>,
    pub cosmic_mission: u32,
    pub personal_year: Option<u32>,
    pub inclusion: BTreeMap<u8, u32>,
    pub karmic_lessons: Vec<u8>,
    pub major_gifts: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonProfile {
    pub person: Person,
    pub numerology: NumerologyResult,
}

/// One entry of the static Sefirot reference table (ids 1..=10).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Sefira {
    pub id: u32,
    pub name: &'static str,
    pub hebrew_name: &'static str,
    pub translation: &'static str,
    pub description: &'static str,
    pub energy: &'static str,
    pub color: &'static str,
    pub associations: &'static str,
    pub planet: &'static str,
    pub divine_name: &'static str,
    pub arcana: &'static str,
    pub dominion: &'static str,
}

#[derive(Debug, Clone)]
pub struct ReportBundle {
    pub roster_csv: String,
    pub profiles: Vec<PersonProfile>,
    pub report_markdown: String,
}
