//! Prompt construction and the generative-language API client used to
//! enrich the report. The request/response shapes follow the Gemini
//! `generateContent` REST surface.

use crate::config::narrative_toml::NarrativeConfig;
use crate::core::sefirot::sefira_for_life_path;
use crate::domain::model::PersonProfile;
use crate::domain::ports::NarrativeGenerator;
use crate::utils::error::{Result, VidaError};
use async_trait::async_trait;
use regex::Regex;
use reqwest::Client;
use std::collections::HashMap;
use std::time::Duration;

pub const DEFAULT_PROMPT_TEMPLATE: &str = r#"Realiza un análisis EXHAUSTIVO basado en el manual "Árbol de la Vida: Genealogía, Numerología y Estructura Familiar".

PERSONA PRINCIPAL: {{firstName}} {{lastName}}
NACIMIENTO: {{birthDate}}
CARACTERÍSTICAS: {{characteristics}}

RESULTADOS NUMEROLÓGICOS:
- Alma: {{soul}}, Personalidad: {{personality}}
- Camino de Vida: {{lifePath}} (Ciclos de 9 años: 0-9, 9-18, 18-27, 27-36, 36-45...)
- Misión Cósmica: {{cosmicMission}}
- Año Personal: {{personalYear}}
- Dones: {{majorGifts}}
- Lecciones Kármicas: {{karmicLessons}}

SISTEMA FAMILIAR:
{{familySystem}}

OBJETIVO DEL ANÁLISIS (Basado en el manual):
1. Identifica Roles Familiares Arquetípicos (Hijo Parentalizado, Chivo Expiatorio, Favorito, Rebelde, Cuidador) en el consultante o su sistema.
2. Analiza la Transmisión de Traumas Intergeneracionales (Aprendizaje observacional, Epigenética, Mensajes implícitos).
3. Vincula el Camino de Vida ({{lifePath}}) con la Sefirá correspondiente ({{sefira}}).
4. Proyecta el Ciclo actual de 9 años y las transiciones generacionales.

REGLAS DE FORMATO:
Usa Markdown estructurado con títulos claros:

### I. Dinámica de Roles y Legado Ancestral
Detecta quién ocupa qué rol en el sistema actual.

### II. Transmisión de Traumas y Sanación
Analiza patrones de repetición (enfermedades, separaciones, crisis económicas).

### III. Integración Cabalística (Tikún)
Cómo la Sefirá activa en su Camino de Vida ayuda a rectificar el linaje.

### IV. Proyección de Ciclos y Recomendaciones
Acciones concretas para los próximos 12 meses y Acto de Psicomagia.

Tono: Elevado, profesional, empático y profundamente analítico."#;

/// Substitutes `{{field}}` placeholders. Unknown placeholders are left
/// untouched so a broken template stays visible instead of vanishing.
pub fn render_template(template: &str, fields: &HashMap<String, String>) -> String {
    let re = Regex::new(r"\{\{\s*([A-Za-z0-9_]+)\s*\}\}").unwrap();
    re.replace_all(template, |caps: &regex::Captures| {
        let key = &caps[1];
        fields
            .get(key)
            .cloned()
            .unwrap_or_else(|| caps[0].to_string())
    })
    .to_string()
}

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

fn free_text(value: &str) -> String {
    if value.trim().is_empty() {
        "N/A".to_string()
    } else {
        value.to_string()
    }
}

/// Builds the analysis prompt from the consultant's profile and the family
/// system. Exposes every field of the numerology result to the template.
pub fn build_prompt(
    template: &str,
    consultant: &PersonProfile,
    family: &[PersonProfile],
) -> String {
    let numerology = &consultant.numerology;

    let sefira = match sefira_for_life_path(numerology.life_path) {
        Some(s) => format!("{} es {}: {}", s.id, s.name, s.translation),
        None => "sin correspondencia directa en el rango 1-10".to_string(),
    };

    let family_system = if family.is_empty() {
        "(sin familiares registrados)".to_string()
    } else {
        family
            .iter()
            .map(|p| {
                format!(
                    "- {} [{}], Nac: {}, Camino de Vida: {}, Características: {}",
                    p.person.first_name,
                    p.person
                        .relationship
                        .map(|r| r.label())
                        .unwrap_or("Otro"),
                    p.person.birth_date(),
                    optional_number(p.numerology.life_path),
                    free_text(&p.person.characteristics),
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    };

    let mut fields = HashMap::new();
    fields.insert("firstName".to_string(), consultant.person.first_name.clone());
    fields.insert("lastName".to_string(), consultant.person.last_name.clone());
    fields.insert("birthDate".to_string(), consultant.person.birth_date());
    fields.insert(
        "characteristics".to_string(),
        free_text(&consultant.person.characteristics),
    );
    fields.insert("soul".to_string(), numerology.soul.to_string());
    fields.insert("personality".to_string(), numerology.personality.to_string());
    fields.insert("lifePath".to_string(), optional_number(numerology.life_path));
    fields.insert(
        "cosmicMission".to_string(),
        numerology.cosmic_mission.to_string(),
    );
    fields.insert(
        "personalYear".to_string(),
        optional_number(numerology.personal_year),
    );
    fields.insert(
        "majorGifts".to_string(),
        digit_list(&numerology.major_gifts),
    );
    fields.insert(
        "karmicLessons".to_string(),
        digit_list(&numerology.karmic_lessons),
    );
    fields.insert("sefira".to_string(), sefira);
    fields.insert("familySystem".to_string(), family_system);

    render_template(template, &fields)
}

/// Client for a Gemini-style `generateContent` endpoint.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: Client,
    endpoint: String,
    model: String,
    api_key: String,
    temperature: f64,
    top_p: f64,
}

impl GeminiClient {
    pub fn new(config: &NarrativeConfig, api_key: String) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;

        Ok(Self {
            client,
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key,
            temperature: config.temperature,
            top_p: config.top_p,
        })
    }
}

#[async_trait]
impl NarrativeGenerator for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.endpoint, self.model
        );

        let body = serde_json::json!({
            "contents": [{"parts": [{"text": prompt}]}],
            "generationConfig": {
                "temperature": self.temperature,
                "topP": self.top_p,
            }
        });

        tracing::debug!("Sending narrative request to model: {}", self.model);
        let response = self
            .client
            .post(&url)
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("Narrative API response status: {}", status);
        if !status.is_success() {
            return Err(VidaError::NarrativeError {
                message: format!("narrative API returned status {}", status),
            });
        }

        let json: serde_json::Value = response.json().await?;
        json.pointer("/candidates/0/content/parts/0/text")
            .and_then(|v| v.as_str())
            .map(|s| s.to_string())
            .ok_or_else(|| VidaError::NarrativeError {
                message: "narrative API response has no candidate text".to_string(),
            })
    }
}

/// Stand-in generator for runs without `--analyze`. The pipeline never calls
/// it in that mode; answering with an error keeps misuse loud.
#[derive(Debug, Clone, Default)]
pub struct OfflineNarrative;

#[async_trait]
impl NarrativeGenerator for OfflineNarrative {
    async fn generate(&self, _prompt: &str) -> Result<String> {
        Err(VidaError::NarrativeError {
            message: "narrative analysis is disabled".to_string(),
        })
    }
}
