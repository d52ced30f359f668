//! Markdown rendering of the final report.

use crate::core::sefirot::sefira_for_life_path;
use crate::domain::model::{NumerologyResult, PersonProfile};

/// Outcome of the narrative stage, decided by the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NarrativeSection {
    /// Analysis was not requested for this run.
    Disabled,
    Generated(String),
    /// The API was asked but failed; the report carries the fallback text.
    Unavailable,
}

const NARRATIVE_FALLBACK: &str = "## Error de Análisis\nOcurrió un error al procesar la sabiduría ancestral. Por favor, verifica tu conexión e intenta de nuevo.";

fn optional_number(value: Option<u32>) -> String {
    value.map(|n| n.to_string()).unwrap_or_else(|| "N/A".to_string())
}

fn digit_list(digits: &[u8]) -> String {
    if digits.is_empty() {
        "ninguno".to_string()
    } else {
        digits
            .iter()
            .map(|d| d.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

fn numerology_table(numerology: &NumerologyResult) -> String {
    let mut out = String::new();
    out.push_str("| Valor | Resultado |\n|---|---|\n");
    out.push_str(&format!("| Alma | {} |\n", numerology.soul));
    out.push_str(&format!("| Personalidad | {} |\n", numerology.personality));
    out.push_str(&format!(
        "| Camino de Vida | {} |\n",
        optional_number(numerology.life_path)
    ));
    out.push_str(&format!(
        "| Misión Cósmica | {} |\n",
        numerology.cosmic_mission
    ));
    out.push_str(&format!(
        "| Año Personal | {} |\n",
        optional_number(numerology.personal_year)
    ));
    out.push_str(&format!(
        "| Dones Mayores | {} |\n",
        digit_list(&numerology.major_gifts)
    ));
    out.push_str(&format!(
        "| Lecciones Kármicas | {} |\n",
        digit_list(&numerology.karmic_lessons)
    ));
    out
}

fn inclusion_table(numerology: &NumerologyResult) -> String {
    let mut header = String::from("|");
    let mut separator = String::from("|");
    let mut counts = String::from("|");
    for (digit, count) in &numerology.inclusion {
        header.push_str(&format!(" {} |", digit));
        separator.push_str("---|");
        counts.push_str(&format!(" {} |", count));
    }
    format!("{}\n{}\n{}\n", header, separator, counts)
}

pub fn render_report(
    consultant: &PersonProfile,
    family: &[PersonProfile],
    narrative: &NarrativeSection,
    reference_year: i32,
) -> String {
    let mut out = String::new();

    out.push_str("# Informe del Árbol de la Vida\n\n");
    out.push_str(&format!(
        "Consultante: **{}** — Nacimiento: {} — Año de referencia: {}\n\n",
        consultant.person.full_name(),
        consultant.person.birth_date(),
        reference_year
    ));

    out.push_str("## Perfil Numerológico\n\n");
    out.push_str(&numerology_table(&consultant.numerology));
    out.push_str("\n### Tabla de Inclusión\n\n");
    out.push_str(&inclusion_table(&consultant.numerology));

    out.push_str("\n## Sefirá del Camino de Vida\n\n");
    match sefira_for_life_path(consultant.numerology.life_path) {
        Some(sefira) => {
            out.push_str(&format!(
                "**{} — {} ({})**\n\n{}\n\n- Energía: {}\n- Planeta: {}\n- Nombre divino: {}\n- Arcano: {}\n- Dominio: {}\n",
                sefira.id,
                sefira.name,
                sefira.translation,
                sefira.description,
                sefira.energy,
                sefira.planet,
                sefira.divine_name,
                sefira.arcana,
                sefira.dominion
            ));
        }
        None => {
            out.push_str(
                "Sin correspondencia directa en el rango 1-10 (fecha incompleta o número maestro).\n",
            );
        }
    }

    out.push_str("\n## Sistema Familiar\n\n");
    if family.is_empty() {
        out.push_str("Sin familiares registrados.\n");
    } else {
        out.push_str("| Nombre | Vínculo | Nacimiento | Alma | Personalidad | Camino de Vida |\n");
        out.push_str("|---|---|---|---|---|---|\n");
        for member in family {
            out.push_str(&format!(
                "| {} | {} | {} | {} | {} | {} |\n",
                member.person.full_name(),
                member
                    .person
                    .relationship
                    .map(|r| r.label())
                    .unwrap_or("Otro"),
                member.person.birth_date(),
                member.numerology.soul,
                member.numerology.personality,
                optional_number(member.numerology.life_path),
            ));
        }
    }

    match narrative {
        NarrativeSection::Disabled => {}
        NarrativeSection::Generated(text) => {
            out.push_str("\n## Análisis Narrativo\n\n");
            out.push_str(text);
            out.push('\n');
        }
        NarrativeSection::Unavailable => {
            out.push('\n');
            out.push_str(NARRATIVE_FALLBACK);
            out.push('\n');
        }
    }

    out
}
