//! Gender and number for noun entries.

use super::inflect::{apply_suffix, is_suffix};
use super::WordEntry;
use crate::headword::first_word;
use crate::tables::tables;
use crate::tagger::TaggedLine;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Masculine,
    Feminine,
    Neuter,
}

impl Gender {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "masculine" => Some(Gender::Masculine),
            "feminine" => Some(Gender::Feminine),
            "neuter" => Some(Gender::Neuter),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Number {
    Singular,
    Plural,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NounForms {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    pub number: Number,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plural: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NounEntry {
    #[serde(flatten)]
    pub entry: WordEntry,
    #[serde(flatten)]
    pub forms: NounForms,
}

fn detect_gender(line: &TaggedLine) -> Option<Gender> {
    let t = tables();
    line.pos_abbreviations.iter().flatten().find_map(|abbr| {
        abbr.split_whitespace()
            .find_map(|token| t.gender_name(token).and_then(Gender::from_name))
    })
}

fn is_plural_abbreviation(line: &TaggedLine) -> bool {
    line.pos_abbreviations
        .iter()
        .flatten()
        .any(|abbr| abbr.split_whitespace().any(|token| token == "pl"))
}

/// Pluralized by rule: a final `s` that is not `ss`.
pub fn looks_plural(word: &str) -> bool {
    word.ends_with('s') && !word.ends_with("ss")
}

pub fn parse_noun(line: &TaggedLine) -> Option<NounForms> {
    let surface = first_word(&line.text)?;
    let number = if is_plural_abbreviation(line) || looks_plural(&surface) {
        Number::Plural
    } else {
        Number::Singular
    };

    // Only `surface -suffix`; any other word on the line is not a plural.
    let tokens: Vec<&str> = line.text.split_whitespace().collect();
    let plural = match (number, tokens.as_slice()) {
        (Number::Singular, [_, suffix]) if is_suffix(suffix) => {
            Some(apply_suffix(&surface, suffix))
        }
        _ => None,
    };

    Some(NounForms {
        gender: detect_gender(line),
        number,
        plural,
    })
}
