//! Coaching prompt and response schema.

use super::SuggestionRequest;
use serde_json::{json, Value};

/// Number of suggestions the model is asked for. Callers must not rely on it.
pub const SUGGESTION_COUNT: usize = 2;

/// Builds the Polish coaching prompt for the current mood and task titles.
pub fn build_prompt(request: &SuggestionRequest) -> String {
    format!(
        "Jesteś Dr Kiwi, empatycznym, ale wymagającym trenerem zdrowia. \
         Na podstawie nastroju użytkownika (skala 1-5, gdzie 1 to zły, a 5 świetny) \
         i jego istniejącej listy zadań, zaproponuj {SUGGESTION_COUNT} krótkie, motywujące zadania prozdrowotne. \
         Dla każdej sugestii podaj również sugerowany priorytet (1-5). \
         Mów krótko, w 2. osobie l. poj., użyj 1-2 emoji. \
         Nastrój: {}. Istniejące zadania: {}.",
        request.mood.value(),
        request.task_titles.join(", ")
    )
}

/// Structured-output schema: `{ sugestie: [{ tytul, notatki, priorytet }] }`.
pub fn response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "sugestie": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "tytul": { "type": "STRING" },
                        "notatki": { "type": "STRING" },
                        "priorytet": { "type": "INTEGER" }
                    },
                    "required": ["tytul", "priorytet"]
                }
            }
        },
        "required": ["sugestie"]
    })
}
