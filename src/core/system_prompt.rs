// src/core/system_prompt.rs — Builds the constrained instruction for capital lookups

/// Reply the model gives for anything that is not a capital-city question.
pub const INVALID_QUESTION: &str = "INVALID_QUESTION";

/// Reply the model gives when the named country does not exist.
pub const UNKNOWN_COUNTRY: &str = "UNKNOWN_COUNTRY";

/// Country → capital pairs shown as valid examples.
pub const VALID_EXAMPLES: &[(&str, &str)] = &[
    ("USA", "Washington D.C."),
    ("France", "Paris"),
    ("Kenya", "Nairobi"),
    ("Brazil", "Brasília"),
];

pub const INVALID_EXAMPLES: &[&str] = &[
    "What is 2+2?",
    "Tell me a joke",
    "How are you?",
    "What's the weather?",
    "Recipe for pizza",
];

pub const UNKNOWN_EXAMPLES: &[&str] = &["Atlantis", "Made up country"];

/// Build the system prompt sent with every lookup.
///
/// Sections (in order):
///   1. Role — geography assistant restricted to capital cities
///   2. Rules — the three permitted reply shapes
///   3. Examples — one block per reply shape
pub fn build_system_prompt() -> String {
    let mut prompt = String::with_capacity(1024);

    prompt.push_str(
        "You are a geography assistant that ONLY answers questions about capital cities of countries.\n\n",
    );

    append_rules_section(&mut prompt);
    append_examples_section(&mut prompt);

    prompt
}

// ─── Section builders ───────────────────────────────────────────────────────

fn append_rules_section(prompt: &mut String) {
    prompt.push_str("STRICT RULES:\n");
    prompt.push_str(
        "1. If the user asks about a country's capital, respond with ONLY the capital city name.\n",
    );
    prompt.push_str(&format!(
        "2. If the user asks anything else (math, weather, recipes, jokes, general questions, etc.), respond with exactly: \"{INVALID_QUESTION}\"\n"
    ));
    prompt.push_str(&format!(
        "3. If the country doesn't exist, respond with \"{UNKNOWN_COUNTRY}\"\n\n"
    ));
}

fn append_examples_section(prompt: &mut String) {
    prompt.push_str("Examples of VALID questions:\n");
    for (country, capital) in VALID_EXAMPLES {
        prompt.push_str(&format!("- \"{country}\" → \"{capital}\"\n"));
    }

    prompt.push_str("\nExamples of INVALID questions:\n");
    for question in INVALID_EXAMPLES {
        prompt.push_str(&format!("- \"{question}\" → \"{INVALID_QUESTION}\"\n"));
    }

    prompt.push_str("\nExamples of unknown countries:\n");
    for name in UNKNOWN_EXAMPLES {
        prompt.push_str(&format!("- \"{name}\" → \"{UNKNOWN_COUNTRY}\"\n"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_names_both_sentinels() {
        let prompt = build_system_prompt();
        assert!(prompt.contains("respond with exactly: \"INVALID_QUESTION\""));
        assert!(prompt.contains("respond with \"UNKNOWN_COUNTRY\""));
    }

    #[test]
    fn test_prompt_includes_every_example() {
        let prompt = build_system_prompt();
        for (country, capital) in VALID_EXAMPLES {
            assert!(prompt.contains(&format!("\"{country}\" → \"{capital}\"")));
        }
        for q in INVALID_EXAMPLES {
            assert!(prompt.contains(q), "missing invalid example {q}");
        }
        assert!(prompt.contains("\"Atlantis\" → \"UNKNOWN_COUNTRY\""));
    }

    #[test]
    fn test_sections_in_order() {
        let prompt = build_system_prompt();
        let rules = prompt.find("STRICT RULES").unwrap();
        let valid = prompt.find("Examples of VALID").unwrap();
        let invalid = prompt.find("Examples of INVALID").unwrap();
        let unknown = prompt.find("Examples of unknown").unwrap();
        assert!(rules < valid && valid < invalid && invalid < unknown);
    }

    #[test]
    fn test_prompt_is_stable() {
        assert_eq!(build_system_prompt(), build_system_prompt());
    }
}
