//! Roster CSV import/export. The column set and the `SELF` consultant marker
//! follow the export format of the original application, so files exported
//! there re-import here unchanged.

use crate::domain::model::{Gender, Person, RelationshipType, Roster};
use crate::utils::error::{Result, VidaError};
use csv::{ReaderBuilder, Trim, WriterBuilder};
use serde::{Deserialize, Serialize};

const SELF_MARKER: &str = "SELF";

#[derive(Debug, Serialize, Deserialize)]
struct RosterRow {
    id: String,
    #[serde(rename = "firstName")]
    first_name: String,
    #[serde(rename = "lastName")]
    last_name: String,
    nicknames: String,
    #[serde(rename = "birthDay")]
    birth_day: String,
    #[serde(rename = "birthMonth")]
    birth_month: String,
    #[serde(rename = "birthYear")]
    birth_year: String,
    gender: String,
    #[serde(rename = "relationshipType")]
    relationship_type: String,
    profession: String,
    formation: String,
    characteristics: String,
}

fn row_from_person(person: &Person) -> RosterRow {
    RosterRow {
        id: person.id.clone(),
        first_name: person.first_name.clone(),
        last_name: person.last_name.clone(),
        nicknames: person.nicknames.clone(),
        birth_day: person.birth_day.clone(),
        birth_month: person.birth_month.clone(),
        birth_year: person.birth_year.clone(),
        gender: person.gender.label().to_string(),
        relationship_type: person
            .relationship
            .map(|r| r.label().to_string())
            .unwrap_or_else(|| SELF_MARKER.to_string()),
        profession: person.profession.clone(),
        formation: person.formation.clone(),
        characteristics: person.characteristics.clone(),
    }
}

fn person_from_row(row: RosterRow) -> Person {
    let relationship = if row.relationship_type.trim() == SELF_MARKER {
        None
    } else {
        Some(RelationshipType::from_label(&row.relationship_type))
    };

    Person {
        id: row.id,
        first_name: row.first_name,
        last_name: row.last_name,
        nicknames: row.nicknames,
        birth_day: row.birth_day,
        birth_month: row.birth_month,
        birth_year: row.birth_year,
        gender: Gender::from_label(&row.gender),
        relationship,
        profession: row.profession,
        formation: row.formation,
        characteristics: row.characteristics,
    }
}

pub fn export_roster(roster: &Roster) -> Result<String> {
    let mut writer = WriterBuilder::new().has_headers(true).from_writer(vec![]);

    writer.serialize(row_from_person(&roster.consultant))?;
    for person in &roster.family {
        writer.serialize(row_from_person(person))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| VidaError::ProcessingError {
            message: format!("CSV writer flush failed: {}", e),
        })?;
    String::from_utf8(bytes).map_err(|e| VidaError::ProcessingError {
        message: format!("CSV output is not valid UTF-8: {}", e),
    })
}

/// Parses a roster CSV. The `SELF` row becomes the consultant; when no row
/// carries the marker the first record does, matching the original import.
pub fn import_roster(csv_text: &str) -> Result<Roster> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .from_reader(csv_text.as_bytes());

    let mut people = Vec::new();
    for row in reader.deserialize::<RosterRow>() {
        people.push(person_from_row(row?));
    }

    if people.is_empty() {
        return Err(VidaError::ProcessingError {
            message: "Roster CSV contains no records".to_string(),
        });
    }

    let consultant_idx = people.iter().position(Person::is_consultant).unwrap_or(0);
    let consultant = people.remove(consultant_idx);

    Ok(Roster {
        consultant,
        family: people,
    })
}
