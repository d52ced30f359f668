//! Static reference table of the ten Sefirot, looked up by life-path number.

use crate::domain::model::Sefira;

pub const SEFIROT: [Sefira; 10] = [
    Sefira {
        id: 1,
        name: "Kether",
        hebrew_name: "כתר",
        translation: "La Corona",
        description: "Puerta de entrada a la manifestación divina, pura potencialidad.",
        energy: "Voluntad absoluta",
        color: "Blanco",
        associations: "Blanco, punto",
        planet: "Primum Mobile",
        divine_name: "Eheyeh (\"Yo Soy\")",
        arcana: "0 (El Loco)",
        dominion: "Divinidad",
    },
    Sefira {
        id: 2,
        name: "Chockmah",
        hebrew_name: "חכמה",
        translation: "La Sabiduría",
        description: "Potencia masculina activa y creativa, el \"Padre\".",
        energy: "Sabiduría primordial",
        color: "Azul",
        associations: "Zodiaco",
        planet: "Zodiaco",
        divine_name: "Jah",
        arcana: "II (La Sacerdotisa)",
        dominion: "Inspiración",
    },
    Sefira {
        id: 3,
        name: "Binah",
        hebrew_name: "בינה",
        translation: "La Inteligencia",
        description: "Potencia femenina pasiva, la \"Madre\" que da forma.",
        energy: "Entendimiento",
        color: "Rojo negro",
        associations: "Saturno",
        planet: "Saturno",
        divine_name: "Jehovah Elohim",
        arcana: "III (La Emperatriz)",
        dominion: "Estructura",
    },
    Sefira {
        id: 4,
        name: "Jesed",
        hebrew_name: "חסד",
        translation: "La Misericordia",
        description: "Benevolencia, Abundancia, inicio de manifestación en planos inferiores.",
        energy: "Bondad expansiva",
        color: "Púrpura",
        associations: "Júpiter",
        planet: "Júpiter",
        divine_name: "El",
        arcana: "IV (El Emperador)",
        dominion: "Expansión",
    },
    Sefira {
        id: 5,
        name: "Gevurah",
        hebrew_name: "גבורה",
        translation: "Fortaleza/Rigor",
        description: "Disciplina, justicia, coraje. Equilibra la misericordia.",
        energy: "Cirugía espiritual",
        color: "Rojo",
        associations: "Marte",
        planet: "Marte",
        divine_name: "Elohim Gibor",
        arcana: "V (El Hierofante)",
        dominion: "Disciplina",
    },
    Sefira {
        id: 6,
        name: "Tiferet",
        hebrew_name: "תפארת",
        translation: "La Belleza",
        description: "Corazón del árbol, centro de convergencia de senderos.",
        energy: "Armonía, Yo Superior",
        color: "Oro/Amarillo",
        associations: "Sol",
        planet: "Sol",
        divine_name: "Jehovah Aloah Vedaath",
        arcana: "VI (Los Enamorados)",
        dominion: "Consciencia elevada",
    },
    Sefira {
        id: 7,
        name: "Netzah",
        hebrew_name: "נצח",
        translation: "La Victoria",
        description: "Dominio de la emoción, arte, deseo y creatividad.",
        energy: "Instinto creativo",
        color: "Verde",
        associations: "Venus",
        planet: "Venus",
        divine_name: "Jehovah Tzabaoth",
        arcana: "VII (El Carro)",
        dominion: "Pasión",
    },
    Sefira {
        id: 8,
        name: "Hod",
        hebrew_name: "הוד",
        translation: "El Esplendor",
        description: "Pensamiento lógico, comunicación, análisis racional.",
        energy: "Mente lógica",
        color: "Naranja/Amarillo",
        associations: "Mercurio",
        planet: "Mercurio",
        divine_name: "Elohim Tzabaoth",
        arcana: "VIII (La Justicia)",
        dominion: "Razón",
    },
    Sefira {
        id: 9,
        name: "Yesod",
        hebrew_name: "יסוד",
        translation: "El Fundamento",
        description: "Reino de los sueños, inconsciente, sustrato astral.",
        energy: "Imaginación psíquica",
        color: "Violeta",
        associations: "Luna",
        planet: "Luna",
        divine_name: "Elohim Tzabaoth",
        arcana: "IX (El Ermitaño)",
        dominion: "Sustrato Astral",
    },
    Sefira {
        id: 10,
        name: "Malkuth",
        hebrew_name: "מלכות",
        translation: "El Reino",
        description: "Mundo físico donde se materializan todas las influencias.",
        energy: "Realidad concreta",
        color: "Multicolor",
        associations: "Tierra",
        planet: "Tierra",
        divine_name: "Adonai Melekh",
        arcana: "X (La Rueda de la Fortuna)",
        dominion: "Materia",
    },
];

/// Exact-id lookup, 1..=10. Master numbers (11/22/33) are deliberately not
/// clamped into range; they simply have no corresponding Sefirá.
pub fn sefira_for(id: u32) -> Option<&'static Sefira> {
    SEFIROT.iter().find(|s| s.id == id)
}

/// Lookup from an optional life-path value.
pub fn sefira_for_life_path(life_path: Option<u32>) -> Option<&'static Sefira> {
    life_path.and_then(sefira_for)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_in_range() {
        for id in 1..=10 {
            let sefira = sefira_for(id).unwrap();
            assert_eq!(sefira.id, id);
        }
        assert_eq!(sefira_for(5).unwrap().name, "Gevurah");
        assert_eq!(sefira_for(10).unwrap().name, "Malkuth");
    }

    #[test]
    fn test_master_numbers_have_no_match() {
        assert!(sefira_for(0).is_none());
        assert!(sefira_for(11).is_none());
        assert!(sefira_for(22).is_none());
        assert!(sefira_for(33).is_none());
    }

    #[test]
    fn test_lookup_from_life_path() {
        assert_eq!(sefira_for_life_path(Some(9)).unwrap().name, "Yesod");
        assert!(sefira_for_life_path(None).is_none());
        assert!(sefira_for_life_path(Some(11)).is_none());
    }
}
