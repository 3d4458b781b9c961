//! Out-of-band quick-reply directive.
//!
//! Assistant replies may end with `||OPTIONS: ["A", "B"]||`: a JSON
//! array of short strings proposing selectable follow-up phrases. The
//! directive is never shown; it is stripped from the text and parsed
//! separately.

use once_cell::sync::Lazy;
use regex::Regex;

static OPTIONS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\|\|OPTIONS:\s*(\[.*?\])\|\|").unwrap());

/// Strip the directive from the reply and parse its JSON payload into
/// quick replies. A malformed payload still strips the directive and
/// yields no options.
pub fn extract(raw: &str) -> (String, Option<Vec<String>>) {
    match OPTIONS.captures(raw) {
        None => (raw.to_string(), None),
        Some(caps) => {
            let clean = OPTIONS.replace(raw, "").trim().to_string();
            let options = serde_json::from_str::<Vec<String>>(&caps[1]).ok();
            (clean, options)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reply_without_directive_passes_through() {
        let (clean, options) = extract("Texto normal");
        assert_eq!(clean, "Texto normal");
        assert!(options.is_none());
    }

    #[test]
    fn test_directive_is_stripped_and_parsed() {
        let (clean, options) = extract("Texto antes||OPTIONS: [\"A\",\"B\"]||");
        assert_eq!(clean, "Texto antes");
        assert_eq!(options, Some(vec!["A".to_string(), "B".to_string()]));
    }

    #[test]
    fn test_directive_with_spacing_and_surrounding_whitespace() {
        let (clean, options) = extract("¿Qué perfil buscas?\n||OPTIONS: [\"Cripto\", \"Negocio\"]|| ");
        assert_eq!(clean, "¿Qué perfil buscas?");
        assert_eq!(
            options,
            Some(vec!["Cripto".to_string(), "Negocio".to_string()])
        );
    }

    #[test]
    fn test_malformed_payload_still_strips_directive() {
        let (clean, options) = extract("Texto||OPTIONS: [no es json]||");
        assert_eq!(clean, "Texto");
        assert!(options.is_none());
    }

    #[test]
    fn test_empty_array_yields_empty_options() {
        let (clean, options) = extract("Texto||OPTIONS: []||");
        assert_eq!(clean, "Texto");
        assert_eq!(options, Some(Vec::new()));
    }
}
