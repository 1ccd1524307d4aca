//! Verb conjugation from the native line of a verb entry.
//!
//! Four shapes are recognized, tried in order:
//!
//! 1. regular: `ta abàndone -s -d -ing`
//! 2. irregular: `ta sit -s sat sat -ting` (infinitive, three forms, `-ing` suffix)
//! 3. helping verb: `ta be iz, woz, bin, being; 's, 'z` (forms; contractions)
//! 4. bare infinitive: `ta walk` (regular `-s -d -ing` assumed)

use super::inflect::{apply_suffix, expand_form};
use super::WordEntry;
use crate::headword::strip_infinitive;
use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;

lazy_static! {
    static ref REGULAR: Regex = Regex::new(r"^(\S+)\s+(-e?s)\s+(-e?d)\s+-ing$").unwrap();
    static ref IRREGULAR: Regex =
        Regex::new(r"^(\S+)\s+(\S+)\s+(\S+)\s+(\S+)\s+(-\S*ing)$").unwrap();
    static ref HELPING: Regex = Regex::new(r"^([^;]+);(.*)$").unwrap();
    static ref BARE: Regex = Regex::new(r"^([^\s;]+)$").unwrap();
    static ref FORM_SEPARATOR: Regex = Regex::new(r"[,\s]+").unwrap();
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerbPattern {
    Regular,
    Irregular,
    Helping,
    BareInfinitive,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Conjugations {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub third_person: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub past_tense: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub past_participle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progressive: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerbForms {
    #[serde(skip)]
    pub pattern: VerbPattern,
    pub conjugations: Conjugations,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contractions: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VerbEntry {
    #[serde(flatten)]
    pub entry: WordEntry,
    #[serde(flatten)]
    pub forms: VerbForms,
}

fn regular(base: &str, third: &str, past: &str) -> Conjugations {
    Conjugations {
        third_person: Some(apply_suffix(base, third)),
        past_tense: Some(apply_suffix(base, past)),
        past_participle: None,
        progressive: Some(apply_suffix(base, "-ing")),
    }
}

fn helping(forms: &str, contractions: &str) -> Option<VerbForms> {
    let tokens: Vec<&str> = FORM_SEPARATOR
        .split(strip_infinitive(forms))
        .filter(|t| !t.is_empty())
        .collect();
    let (base, rest) = tokens.split_first()?;
    let rest: Vec<String> = rest.iter().map(|t| expand_form(base, t)).collect();

    let mut conjugations = Conjugations {
        third_person: rest.first().cloned(),
        past_tense: rest.get(1).cloned(),
        ..Conjugations::default()
    };
    match rest.len() {
        3 => conjugations.progressive = rest.get(2).cloned(),
        n if n >= 4 => {
            conjugations.past_participle = rest.get(2).cloned();
            conjugations.progressive = rest.get(3).cloned();
        }
        _ => {}
    }

    let contractions: Vec<String> = contractions
        .split(',')
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(str::to_string)
        .collect();

    Some(VerbForms {
        pattern: VerbPattern::Helping,
        conjugations,
        contractions: (!contractions.is_empty()).then_some(contractions),
    })
}

/// Match `text` against the four verb shapes. `None` means no pattern
/// applies and the entry carries no conjugations.
pub fn parse_verb(text: &str) -> Option<VerbForms> {
    let text = text.trim();
    let body = strip_infinitive(text);

    if let Some(caps) = REGULAR.captures(body) {
        return Some(VerbForms {
            pattern: VerbPattern::Regular,
            conjugations: regular(&caps[1], &caps[2], &caps[3]),
            contractions: None,
        });
    }

    if let Some(caps) = IRREGULAR.captures(body) {
        let base = &caps[1];
        return Some(VerbForms {
            pattern: VerbPattern::Irregular,
            conjugations: Conjugations {
                third_person: Some(expand_form(base, &caps[2])),
                past_tense: Some(expand_form(base, &caps[3])),
                past_participle: Some(expand_form(base, &caps[4])),
                progressive: Some(apply_suffix(base, &caps[5])),
            },
            contractions: None,
        });
    }

    if let Some(caps) = HELPING.captures(text) {
        return helping(&caps[1], &caps[2]);
    }

    if let Some(caps) = BARE.captures(body) {
        return Some(VerbForms {
            pattern: VerbPattern::BareInfinitive,
            conjugations: regular(&caps[1], "-s", "-d"),
            contractions: None,
        });
    }

    None
}
