use arbol_vida::core::roster::{export_roster, import_roster};
use arbol_vida::domain::model::{Gender, Person, RelationshipType, Roster};
use arbol_vida::{compute_numerology_for_year, sefira_for_life_path};
use tempfile::TempDir;

fn sample_roster() -> Roster {
    Roster {
        consultant: Person {
            id: "u-1".to_string(),
            first_name: "María José".to_string(),
            last_name: "Muñoz Ibáñez".to_string(),
            nicknames: "Majo".to_string(),
            birth_day: "7".to_string(),
            birth_month: "3".to_string(),
            birth_year: "1985".to_string(),
            gender: Gender::Female,
            relationship: None,
            profession: "Arquitecta".to_string(),
            formation: "Universidad".to_string(),
            characteristics: "Perfeccionista, \"la fuerte\" de la familia".to_string(),
        },
        family: vec![
            Person {
                id: "f-1".to_string(),
                first_name: "Ñico".to_string(),
                last_name: "Muñoz".to_string(),
                birth_day: "21".to_string(),
                birth_month: "12".to_string(),
                birth_year: "1955".to_string(),
                gender: Gender::Male,
                relationship: Some(RelationshipType::Parent),
                ..Person::default()
            },
            Person {
                id: "f-2".to_string(),
                first_name: "Eva".to_string(),
                last_name: "Muñoz".to_string(),
                birth_day: "2".to_string(),
                birth_month: "8".to_string(),
                // unknown birth year
                birth_year: String::new(),
                gender: Gender::Female,
                relationship: Some(RelationshipType::Sibling),
                ..Person::default()
            },
        ],
    }
}

#[test]
fn test_export_import_preserves_every_person() {
    let roster = sample_roster();
    let csv_text = export_roster(&roster).unwrap();
    let reimported = import_roster(&csv_text).unwrap();
    assert_eq!(roster, reimported);
}

#[test]
fn test_recomputation_after_round_trip_is_identical() {
    let roster = sample_roster();
    let csv_text = export_roster(&roster).unwrap();
    let reimported = import_roster(&csv_text).unwrap();

    for (before, after) in roster.everyone().zip(reimported.everyone()) {
        let original =
            compute_numerology_for_year(&before.full_name(), &before.birth_date(), 2026);
        let recomputed =
            compute_numerology_for_year(&after.full_name(), &after.birth_date(), 2026);
        assert_eq!(original, recomputed, "profile drifted for {}", before.id);
    }
}

#[test]
fn test_round_trip_through_the_filesystem() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("roster.csv");

    let roster = sample_roster();
    std::fs::write(&path, export_roster(&roster).unwrap()).unwrap();

    let loaded = import_roster(&std::fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(roster, loaded);
}

#[test]
fn test_unknown_year_still_yields_name_numbers() {
    let roster = sample_roster();
    let eva = &roster.family[1];
    let result = compute_numerology_for_year(&eva.full_name(), &eva.birth_date(), 2026);

    assert_eq!(result.life_path, None);
    assert_eq!(result.personal_year, None);
    assert!(result.soul > 0);
    assert!(sefira_for_life_path(result.life_path).is_none());
}
