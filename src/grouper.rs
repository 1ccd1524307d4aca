//! Partitioning tagged lines into entries.
//!
//! Two strategies: blank-line blocks (the default), and spans anchored on
//! the modern-form marker for files that run several etymologies together
//! without separating blank lines.

use crate::tables::tables;
use crate::tagger::{raw_lines, tag_line, RawLine, TaggedLine};
use log::debug;

/// Lines before a modern-form marker that belong to its entry.
pub const DEFAULT_LOOKBACK: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GroupingStrategy {
    #[default]
    BlankLine,
    /// Anchor entries on `[ME]` lines, reaching back `lookback` lines.
    /// Falls back to `BlankLine` when the input has no marker.
    MarkerBased { lookback: usize },
}

impl GroupingStrategy {
    pub fn marker_based() -> Self {
        GroupingStrategy::MarkerBased {
            lookback: DEFAULT_LOOKBACK,
        }
    }
}

/// One word's lines: the ancestry chain and its citation URLs.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EntryGroup {
    pub etymology_lines: Vec<TaggedLine>,
    pub source_lines: Vec<TaggedLine>,
}

impl EntryGroup {
    pub fn from_lines(lines: impl IntoIterator<Item = TaggedLine>) -> Self {
        let (source_lines, etymology_lines) = lines.into_iter().partition(|l| l.is_url);
        EntryGroup {
            etymology_lines,
            source_lines,
        }
    }

    /// A group without etymology lines produces no record.
    pub fn is_empty(&self) -> bool {
        self.etymology_lines.is_empty()
    }

    pub fn line_with_code(&self, code: &str) -> Option<&TaggedLine> {
        self.etymology_lines.iter().find(|l| l.has_code(code))
    }

    /// The native line carrying the POS tag, or the first native line.
    pub fn native_line(&self) -> Option<&TaggedLine> {
        self.etymology_lines
            .iter()
            .find(|l| l.is_native() && l.part_of_speech.is_some())
            .or_else(|| self.etymology_lines.iter().find(|l| l.is_native()))
    }

    pub fn sources(&self) -> Vec<String> {
        self.source_lines.iter().map(|l| l.text.clone()).collect()
    }
}

/// Split on blank lines. Each block keeps its physical line numbers.
pub fn split_blocks(text: &str) -> Vec<Vec<RawLine>> {
    let mut blocks = Vec::new();
    let mut current = Vec::new();

    for (idx, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            if !current.is_empty() {
                blocks.push(std::mem::take(&mut current));
            }
        } else {
            current.push(RawLine::new(line, idx + 1));
        }
    }
    if !current.is_empty() {
        blocks.push(current);
    }

    blocks
}

pub fn group_blank_line(text: &str) -> Vec<EntryGroup> {
    split_blocks(text)
        .iter()
        .map(|block| EntryGroup::from_lines(block.iter().map(tag_line)))
        .filter(|group| !group.is_empty())
        .collect()
}

pub fn group_marker_based(text: &str, lookback: usize) -> Vec<EntryGroup> {
    let tagged: Vec<TaggedLine> = raw_lines(text).iter().map(tag_line).collect();
    let marker = &tables().modern_marker;

    let markers: Vec<usize> = tagged
        .iter()
        .enumerate()
        .filter(|(_, line)| line.has_code(marker))
        .map(|(idx, _)| idx)
        .collect();

    if markers.is_empty() {
        debug!("no [{}] markers, grouping by blank lines", marker);
        return group_blank_line(text);
    }

    // Span k runs from `lookback` lines before its marker up to, but not
    // including, the next marker. Neighbouring spans share the lines between.
    markers
        .iter()
        .enumerate()
        .map(|(k, &idx)| {
            let start = idx.saturating_sub(lookback);
            let end = markers.get(k + 1).copied().unwrap_or(tagged.len());
            EntryGroup::from_lines(tagged[start..end].iter().cloned())
        })
        .filter(|group| !group.is_empty())
        .collect()
}

pub fn group_entries(text: &str, strategy: GroupingStrategy) -> Vec<EntryGroup> {
    match strategy {
        GroupingStrategy::BlankLine => group_blank_line(text),
        GroupingStrategy::MarkerBased { lookback } => group_marker_based(text, lookback),
    }
}
