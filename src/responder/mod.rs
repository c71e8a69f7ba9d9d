pub mod simulator;

pub use simulator::{ChatSimulator, COMMON_QUESTIONS, GREETING};

/// Reply used when no category matches
pub const FALLBACK_RESPONSE: &str =
    "Lo siento, no entiendo tu pregunta. ¿Podrías reformularla?";

/// Topic a guest can ask about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    CheckIn,
    CheckOut,
    Wifi,
    Parking,
    Rules,
    Amenities,
    Location,
    Recommendations,
}

/// One row of the knowledge base
#[derive(Debug, Clone)]
pub struct Entry {
    pub category: Category,
    pub triggers: Vec<String>,
    pub response: String,
}

/// Keyword-to-response table, tested in order.
#[derive(Debug, Clone)]
pub struct KnowledgeBase {
    entries: Vec<Entry>,
    fallback: String,
}

impl KnowledgeBase {
    /// Build a table from (category, triggers, response) rows.
    /// Triggers are stored lowercased.
    pub fn new(entries: Vec<Entry>, fallback: impl Into<String>) -> Self {
        let entries = entries
            .into_iter()
            .map(|entry| Entry {
                triggers: entry.triggers.iter().map(|t| t.to_lowercase()).collect(),
                ..entry
            })
            .collect();
        Self {
            entries,
            fallback: fallback.into(),
        }
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn fallback(&self) -> &str {
        &self.fallback
    }

    /// First category whose trigger appears in the input, if any
    pub fn classify(&self, input: &str) -> Option<Category> {
        self.matching_entry(input).map(|entry| entry.category)
    }

    /// Canned reply for the input. Total: unmatched input gets the fallback.
    pub fn respond(&self, input: &str) -> &str {
        self.matching_entry(input)
            .map(|entry| entry.response.as_str())
            .unwrap_or(self.fallback.as_str())
    }

    fn matching_entry(&self, input: &str) -> Option<&Entry> {
        let lower = input.to_lowercase();
        self.entries
            .iter()
            .find(|entry| entry.triggers.iter().any(|t| lower.contains(t.as_str())))
    }
}

impl Default for KnowledgeBase {
    fn default() -> Self {
        let row = |category, triggers: &[&str], response: &str| Entry {
            category,
            triggers: triggers.iter().map(|t| t.to_string()).collect(),
            response: response.to_string(),
        };

        Self::new(
            vec![
                row(
                    Category::CheckIn,
                    &["check-in", "llegada"],
                    "El check-in es a las 15:00. Puedes llegar antes y dejar tus maletas en el lobby. El apartamento estará listo a las 15:00.",
                ),
                row(
                    Category::CheckOut,
                    &["check-out", "salida"],
                    "El check-out es a las 11:00. Por favor, deja las llaves en la mesa del living y cierra la puerta al salir.",
                ),
                row(
                    Category::Wifi,
                    &["wifi", "internet"],
                    "La red WiFi es \"Centro_WiFi\" y la contraseña es \"centro2024\". Está disponible en todo el apartamento.",
                ),
                row(
                    Category::Parking,
                    &["parking", "estacionamiento"],
                    "Sí, hay estacionamiento disponible en el edificio. Es gratuito para huéspedes.",
                ),
                row(
                    Category::Rules,
                    &["reglas", "normas"],
                    "Las reglas principales son: no fumar, no mascotas, respetar el horario de silencio (22:00-8:00) y mantener limpio el apartamento.",
                ),
                row(
                    Category::Amenities,
                    &["amenidades", "servicios"],
                    "El apartamento incluye: WiFi gratuito, cocina equipada, TV Smart, aire acondicionado y estacionamiento.",
                ),
                row(
                    Category::Location,
                    &["ubicación", "dónde"],
                    "Estamos ubicados en Rua das Flores, 123 - Centro, Florianópolis. A 10 minutos caminando de la playa central.",
                ),
                row(
                    Category::Recommendations,
                    &["recomendaciones", "lugares"],
                    "Te recomiendo: Restaurante La Casa (2 cuadras), Playa Central (10 min caminando), Centro comercial (5 min), Supermercado (1 cuadra).",
                ),
            ],
            FALLBACK_RESPONSE,
        )
    }
}
