//! The composed `text -> records` function.
//!
//! normalize -> split into entries -> group -> resolve headword -> transform.
//! Every stage degrades instead of failing, so [`Pipeline::process`] always
//! returns (possibly zero) records.

use crate::error::Result;
use crate::grouper::{group_entries, split_blocks, EntryGroup, GroupingStrategy};
use crate::headword::{fallback_headword, resolve_headword};
use crate::tables::tables;
use crate::tagger::tag_line;
use crate::transform::{
    builtin_transformer, transform_entry, word_entry, OutputRecord, Transformer,
};
use log::{debug, warn};
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use unicode_normalization::UnicodeNormalization;

/// Which transformers produce each entry's output.
#[derive(Default)]
pub enum TransformerSet {
    /// Plain word records.
    #[default]
    Plain,
    /// Verb, noun and adjective shapes where the native line allows.
    PosAware,
    /// Every named transformer runs; output is keyed by name.
    Custom(Vec<Box<dyn Transformer>>),
}

impl TransformerSet {
    /// Custom set from built-in transformer names. An empty list means
    /// [`TransformerSet::Plain`].
    pub fn from_names<S: AsRef<str>>(names: &[S]) -> Result<Self> {
        if names.is_empty() {
            return Ok(TransformerSet::Plain);
        }
        let transformers = names
            .iter()
            .map(|name| builtin_transformer(name.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        Ok(TransformerSet::Custom(transformers))
    }
}

impl fmt::Debug for TransformerSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransformerSet::Plain => f.write_str("Plain"),
            TransformerSet::PosAware => f.write_str("PosAware"),
            TransformerSet::Custom(transformers) => f
                .debug_tuple("Custom")
                .field(&transformers.iter().map(|t| t.name()).collect::<Vec<_>>())
                .finish(),
        }
    }
}

#[derive(Debug)]
pub struct PipelineConfig {
    pub grouping: GroupingStrategy,
    pub transformers: TransformerSet,
    /// Join untagged blank-line sections onto the preceding entry before
    /// grouping.
    pub merge_sections: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        PipelineConfig {
            grouping: GroupingStrategy::default(),
            transformers: TransformerSet::default(),
            merge_sections: true,
        }
    }
}

/// Output for one entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PipelineOutput {
    Record(OutputRecord),
    Named(BTreeMap<String, Value>),
}

impl PipelineOutput {
    pub fn as_record(&self) -> Option<&OutputRecord> {
        match self {
            PipelineOutput::Record(record) => Some(record),
            PipelineOutput::Named(_) => None,
        }
    }
}

/// NFC, then the table's character substitutions (`æ` -> `ae`).
pub fn normalize_text(text: &str) -> String {
    let mut normalized: String = text.nfc().collect();
    for (from, to) in &tables().normalization {
        if normalized.contains(from.as_str()) {
            normalized = normalized.replace(from.as_str(), to);
        }
    }
    normalized
}

/// Split a whole file into entry texts. A blank-line section with a
/// recognized language tag starts a new entry once the current entry has
/// one; untagged sections (citation blocks, a lone native line) stay with
/// the entry before them.
pub fn split_entries(text: &str) -> Vec<String> {
    let mut entries = Vec::new();
    let mut current: Vec<String> = Vec::new();
    let mut current_tagged = false;

    for section in split_blocks(text) {
        let tagged = section
            .iter()
            .any(|line| tag_line(line).language_code.is_some());

        if tagged && current_tagged {
            entries.push(std::mem::take(&mut current).join("\n"));
            current_tagged = false;
        }
        current.extend(section.into_iter().map(|line| line.content));
        current_tagged |= tagged;
    }
    if !current.is_empty() {
        entries.push(current.join("\n"));
    }

    entries
}

#[derive(Debug, Default)]
pub struct Pipeline {
    config: PipelineConfig,
}

impl Pipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Pipeline { config }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// All entry groups of a file, in discovery order.
    pub fn groups(&self, content: &str) -> Vec<EntryGroup> {
        let normalized = normalize_text(content);
        let entries = if self.config.merge_sections {
            split_entries(&normalized)
        } else {
            vec![normalized]
        };

        entries
            .iter()
            .flat_map(|entry| group_entries(entry, self.config.grouping))
            .collect()
    }

    pub fn process(&self, content: &str, file_name: &str) -> Vec<PipelineOutput> {
        let fallback = fallback_headword(file_name);
        let groups = self.groups(content);
        debug!("{}: {} entry groups", file_name, groups.len());

        groups
            .iter()
            .map(|group| {
                let headword = resolve_headword(group, &fallback);
                self.transform(group, &headword)
            })
            .collect()
    }

    fn transform(&self, group: &EntryGroup, headword: &str) -> PipelineOutput {
        match &self.config.transformers {
            TransformerSet::Plain => {
                PipelineOutput::Record(OutputRecord::Word(word_entry(group, headword)))
            }
            TransformerSet::PosAware => PipelineOutput::Record(transform_entry(group, headword)),
            TransformerSet::Custom(transformers) => {
                let results = transformers
                    .iter()
                    .map(|t| {
                        let value = t.transform(group, headword).unwrap_or_else(|e| {
                            warn!("transformer {} failed on {}: {}", t.name(), headword, e);
                            Value::Null
                        });
                        (t.name().to_string(), value)
                    })
                    .collect();
                PipelineOutput::Named(results)
            }
        }
    }
}

/// Convert one file's text with the default configuration.
pub fn convert(content: &str, file_name: &str) -> Vec<PipelineOutput> {
    Pipeline::default().process(content, file_name)
}
