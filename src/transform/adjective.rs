//! Comparison degrees for adjective entries: `grete -er -est`.

use super::inflect::{apply_suffix, is_suffix};
use super::WordEntry;
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Degrees {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comparative: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub superlative: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdjectiveEntry {
    #[serde(flatten)]
    pub entry: WordEntry,
    pub degrees: Degrees,
}

/// `base -comparative -superlative`. Degrees are only read from suffix
/// tokens; a lone superlative suffix (`grete -est`) fills only the
/// superlative. Any other word on the line means no degrees.
pub fn parse_adjective(text: &str) -> Option<Degrees> {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    let degrees = match tokens.as_slice() {
        [base, only] if is_suffix(only) && only.ends_with("st") => Degrees {
            comparative: None,
            superlative: Some(apply_suffix(base, only)),
        },
        [base, comparative] if is_suffix(comparative) => Degrees {
            comparative: Some(apply_suffix(base, comparative)),
            superlative: None,
        },
        [base, comparative, superlative] if is_suffix(comparative) && is_suffix(superlative) => {
            Degrees {
                comparative: Some(apply_suffix(base, comparative)),
                superlative: Some(apply_suffix(base, superlative)),
            }
        }
        _ => return None,
    };
    Some(degrees)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suffix_degrees() {
        let d = parse_adjective("grete -er -est").unwrap();
        assert_eq!(d.comparative.as_deref(), Some("greter"));
        assert_eq!(d.superlative.as_deref(), Some("gretest"));
    }

    #[test]
    fn plain_words_are_not_degrees() {
        assert!(parse_adjective("ful ov").is_none());
        assert!(parse_adjective("wel ment hart").is_none());
        assert!(parse_adjective("grete -er hart").is_none());
    }

    #[test]
    fn missing_superlative_is_omitted() {
        let d = parse_adjective("smaul -er").unwrap();
        assert_eq!(d.comparative.as_deref(), Some("smauler"));
        assert_eq!(d.superlative, None);
    }

    #[test]
    fn lone_superlative_suffix() {
        let d = parse_adjective("smaul -est").unwrap();
        assert_eq!(d.comparative, None);
        assert_eq!(d.superlative.as_deref(), Some("smaulest"));
    }

    #[test]
    fn base_only_has_no_degrees() {
        assert!(parse_adjective("uther").is_none());
        assert!(parse_adjective("a b c d").is_none());
    }
}
