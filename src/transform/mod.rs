//! Turning an [`EntryGroup`] into output records.
//!
//! [`word_entry`] builds the plain shape. [`transform_entry`] dispatches on
//! the native line's part of speech and attaches a verb, noun or adjective
//! block when the line's text matches; otherwise it yields the plain shape.
//! Named [`Transformer`]s back the custom transformer sets.

pub mod adjective;
pub mod inflect;
pub mod noun;
pub mod verb;

pub use adjective::{parse_adjective, AdjectiveEntry, Degrees};
pub use noun::{parse_noun, Gender, NounEntry, NounForms, Number};
pub use verb::{parse_verb, Conjugations, VerbEntry, VerbForms, VerbPattern};

use crate::error::{EtymError, Result};
use crate::grouper::EntryGroup;
use crate::tables::tables;
use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EtymologyRecord {
    pub name: String,
    pub origin: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub part_of_speech: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WordEntry {
    pub name: String,
    pub etymology: Vec<EtymologyRecord>,
    pub sources: Vec<String>,
}

/// One output record. Serializes as a flat object: the word fields plus
/// whatever enrichment block the variant carries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum OutputRecord {
    Verb(VerbEntry),
    Noun(NounEntry),
    Adjective(AdjectiveEntry),
    Word(WordEntry),
}

impl OutputRecord {
    pub fn word(&self) -> &WordEntry {
        match self {
            OutputRecord::Verb(v) => &v.entry,
            OutputRecord::Noun(n) => &n.entry,
            OutputRecord::Adjective(a) => &a.entry,
            OutputRecord::Word(w) => w,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            OutputRecord::Verb(_) => "verb",
            OutputRecord::Noun(_) => "noun",
            OutputRecord::Adjective(_) => "adjective",
            OutputRecord::Word(_) => "word",
        }
    }
}

/// The plain record. The modern-form line names the record and is not
/// repeated in the etymology chain.
pub fn word_entry(group: &EntryGroup, headword: &str) -> WordEntry {
    let marker = &tables().modern_marker;
    let etymology = group
        .etymology_lines
        .iter()
        .filter(|line| !line.has_code(marker))
        .map(|line| EtymologyRecord {
            name: line.text.clone(),
            origin: line.origin.clone(),
            part_of_speech: line.part_of_speech.clone(),
        })
        .collect();

    WordEntry {
        name: headword.to_string(),
        etymology,
        sources: group.sources(),
    }
}

/// Dispatch on the native line's part of speech, in the order the tags
/// were written. The first shape whose pattern matches wins.
pub fn transform_entry(group: &EntryGroup, headword: &str) -> OutputRecord {
    let entry = word_entry(group, headword);
    let Some(native) = group.native_line() else {
        return OutputRecord::Word(entry);
    };

    for pos in native.part_of_speech.iter().flatten() {
        match pos.as_str() {
            "verb" => {
                if let Some(forms) = parse_verb(&native.text) {
                    return OutputRecord::Verb(VerbEntry { entry, forms });
                }
            }
            "noun" => {
                if let Some(forms) = parse_noun(native) {
                    return OutputRecord::Noun(NounEntry { entry, forms });
                }
            }
            "adjective" => {
                if let Some(degrees) = parse_adjective(&native.text) {
                    return OutputRecord::Adjective(AdjectiveEntry { entry, degrees });
                }
            }
            _ => {}
        }
    }

    OutputRecord::Word(entry)
}

/// A named transformer for custom transformer sets. Results are keyed by
/// [`Transformer::name`].
pub trait Transformer: Send + Sync {
    fn name(&self) -> &str;
    fn transform(&self, group: &EntryGroup, headword: &str) -> serde_json::Result<Value>;
}

pub struct WordTransformer;

impl Transformer for WordTransformer {
    fn name(&self) -> &str {
        "word"
    }

    fn transform(&self, group: &EntryGroup, headword: &str) -> serde_json::Result<Value> {
        serde_json::to_value(word_entry(group, headword))
    }
}

pub struct PosTransformer;

impl Transformer for PosTransformer {
    fn name(&self) -> &str {
        "pos"
    }

    fn transform(&self, group: &EntryGroup, headword: &str) -> serde_json::Result<Value> {
        serde_json::to_value(transform_entry(group, headword))
    }
}

/// Conjugations of the native verb line, or `null`.
pub struct VerbTransformer;

impl Transformer for VerbTransformer {
    fn name(&self) -> &str {
        "verb"
    }

    fn transform(&self, group: &EntryGroup, _headword: &str) -> serde_json::Result<Value> {
        let forms = group
            .native_line()
            .filter(|line| line.has_pos("verb"))
            .and_then(|line| parse_verb(&line.text));
        serde_json::to_value(forms)
    }
}

/// Gender and number of the native noun line, or `null`.
pub struct NounTransformer;

impl Transformer for NounTransformer {
    fn name(&self) -> &str {
        "noun"
    }

    fn transform(&self, group: &EntryGroup, _headword: &str) -> serde_json::Result<Value> {
        let forms = group
            .native_line()
            .filter(|line| line.has_pos("noun"))
            .and_then(parse_noun);
        serde_json::to_value(forms)
    }
}

/// Comparison degrees of the native adjective line, or `null`.
pub struct AdjectiveTransformer;

impl Transformer for AdjectiveTransformer {
    fn name(&self) -> &str {
        "adjective"
    }

    fn transform(&self, group: &EntryGroup, _headword: &str) -> serde_json::Result<Value> {
        let degrees = group
            .native_line()
            .filter(|line| line.has_pos("adjective"))
            .and_then(|line| parse_adjective(&line.text));
        serde_json::to_value(degrees)
    }
}

pub struct HeadwordTransformer;

impl Transformer for HeadwordTransformer {
    fn name(&self) -> &str {
        "headword"
    }

    fn transform(&self, _group: &EntryGroup, headword: &str) -> serde_json::Result<Value> {
        Ok(Value::String(headword.to_string()))
    }
}

pub const BUILTIN_TRANSFORMERS: &[&str] = &["word", "pos", "verb", "noun", "adjective", "headword"];

pub fn builtin_transformer(name: &str) -> Result<Box<dyn Transformer>> {
    let transformer: Box<dyn Transformer> = match name {
        "word" => Box::new(WordTransformer),
        "pos" => Box::new(PosTransformer),
        "verb" => Box::new(VerbTransformer),
        "noun" => Box::new(NounTransformer),
        "adjective" => Box::new(AdjectiveTransformer),
        "headword" => Box::new(HeadwordTransformer),
        other => return Err(EtymError::UnknownTransformer(other.to_string())),
    };
    Ok(transformer)
}
