// src/core/classifier.rs — Heuristic pre-filter for country-name queries
//
// Runs before any model call so obvious small talk, questions, and arithmetic
// never reach the provider. Matching is by substring, not whole word, so a few
// real countries are rejected too: "Chile", "China" and "Philippines" all
// contain "hi".

/// Topics that mark the input as something other than a country name.
pub const OFF_TOPIC_TERMS: &[&str] = &[
    "what",
    "how",
    "why",
    "when",
    "where",
    "who",
    "hello",
    "hi",
    "help",
    "thanks",
    "thank you",
    "weather",
    "time",
    "date",
    "math",
    "calculate",
    "recipe",
    "food",
    "movie",
    "music",
    "sports",
    "programming",
    "code",
    "python",
    "javascript",
    "joke",
    "story",
    "poem",
    "song",
];

/// Conversational openers.
pub const INTERROGATIVE_PREFIXES: &[&str] = &[
    "what", "how", "why", "when", "where", "who", "can you", "tell me", "explain",
];

const ARITHMETIC_OPERATORS: &[char] = &['+', '-', '*', '/', '='];

/// Inputs with digits or operators need at least this many letters to pass.
const MIN_LETTERS_WITH_ARITHMETIC: usize = 3;

/// Outcome of classifying one input, with the rule that fired.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Accepted,
    OffTopic { term: &'static str },
    Interrogative { prefix: &'static str },
    Arithmetic,
}

impl Verdict {
    pub fn is_accepted(&self) -> bool {
        matches!(self, Verdict::Accepted)
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Verdict::Accepted => write!(f, "accepted"),
            Verdict::OffTopic { term } => write!(f, "off-topic term '{term}'"),
            Verdict::Interrogative { prefix } => write!(f, "starts with '{prefix}'"),
            Verdict::Arithmetic => write!(f, "looks like arithmetic"),
        }
    }
}

/// Decide whether `text` plausibly names a country, and why not if it doesn't.
pub fn classify(text: &str) -> Verdict {
    let normalized = text.trim().to_lowercase();

    if let Some(term) = OFF_TOPIC_TERMS
        .iter()
        .copied()
        .find(|term| normalized.contains(term))
    {
        return Verdict::OffTopic { term };
    }

    if let Some(prefix) = INTERROGATIVE_PREFIXES
        .iter()
        .copied()
        .find(|prefix| normalized.starts_with(prefix))
    {
        return Verdict::Interrogative { prefix };
    }

    // Decimal digits only; superscripts and fractions like '²' or '½' don't count.
    let has_arithmetic = normalized
        .chars()
        .any(|c| c.is_ascii_digit() || ARITHMETIC_OPERATORS.contains(&c));
    if has_arithmetic {
        let letters = normalized.chars().filter(char::is_ascii_alphabetic).count();
        if letters < MIN_LETTERS_WITH_ARITHMETIC {
            return Verdict::Arithmetic;
        }
    }

    Verdict::Accepted
}

pub fn is_plausible_country_query(text: &str) -> bool {
    classify(text).is_accepted()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_country_names() {
        for name in ["France", "Kenya", "USA", "Brazil", "  Germany  ", "Côte d'Ivoire"] {
            assert!(is_plausible_country_query(name), "rejected {name}");
        }
    }

    #[test]
    fn test_rejects_questions() {
        assert_eq!(
            classify("What is the capital of France?"),
            Verdict::OffTopic { term: "what" }
        );
        assert!(!is_plausible_country_query("how are you"));
    }

    #[test]
    fn test_rejects_small_talk() {
        assert_eq!(classify("hello"), Verdict::OffTopic { term: "hello" });
        assert!(!is_plausible_country_query("Thanks!"));
        assert!(!is_plausible_country_query("recipe for pizza"));
    }

    #[test]
    fn test_case_insensitive() {
        assert!(!is_plausible_country_query("WEATHER today"));
        assert!(!is_plausible_country_query("  JavaScript  "));
    }

    #[test]
    fn test_interrogative_prefixes() {
        assert_eq!(
            classify("Can you list Europe"),
            Verdict::Interrogative { prefix: "can you" }
        );
        assert_eq!(
            classify("explain Peru"),
            Verdict::Interrogative { prefix: "explain" }
        );
    }

    #[test]
    fn test_tell_me_a_joke_is_off_topic() {
        // Caught by the denylist before the prefix rule.
        assert_eq!(classify("tell me a joke"), Verdict::OffTopic { term: "joke" });
    }

    #[test]
    fn test_arithmetic() {
        assert_eq!(classify("2+2"), Verdict::Arithmetic);
        assert_eq!(classify("10 / 5"), Verdict::Arithmetic);
        assert_eq!(classify("x=1"), Verdict::Arithmetic);
    }

    #[test]
    fn test_only_decimal_digits_count_as_arithmetic() {
        assert_eq!(classify("42"), Verdict::Arithmetic);
        assert_eq!(classify("²"), Verdict::Accepted);
        assert_eq!(classify("½"), Verdict::Accepted);
        assert_eq!(classify("Ⅻ"), Verdict::Accepted);
    }

    #[test]
    fn test_digits_with_enough_letters_pass() {
        assert!(is_plausible_country_query("USA2"));
        assert!(is_plausible_country_query("Guinea-Bissau"));
    }

    #[test]
    fn test_substring_false_positives() {
        assert_eq!(classify("Chile"), Verdict::OffTopic { term: "hi" });
        assert_eq!(classify("China"), Verdict::OffTopic { term: "hi" });
        assert_eq!(classify("Philippines"), Verdict::OffTopic { term: "hi" });
    }

    #[test]
    fn test_verdict_display() {
        assert_eq!(Verdict::Arithmetic.to_string(), "looks like arithmetic");
        assert_eq!(
            Verdict::OffTopic { term: "joke" }.to_string(),
            "off-topic term 'joke'"
        );
    }
}
