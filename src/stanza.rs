//! History extraction: one text file per stanza that names its part of
//! speech and has a resolvable headword.
//!
//! The output is named `<headword>_<pos>.txt` (`abandon_v.txt`) and holds
//! the stanza without its POS marker. A POS line of its own is dropped; a
//! POS group sharing a line with a language tag is cut from that line.

use crate::grouper::{split_blocks, EntryGroup};
use crate::headword::find_headword;
use crate::pipeline::normalize_text;
use crate::tables::tables;
use crate::tagger::{tag_line, trailing_pos, RawLine, TaggedLine, BRACKET_TAG};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref PAREN_GROUP: Regex = Regex::new(r"\(([^()]*)\)").unwrap();
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stanza {
    pub lines: Vec<String>,
    /// POS codes joined by `-` (`v`, `n-v`).
    pub part_of_speech: Option<String>,
    pub headword: Option<String>,
    pub pos_line_index: Option<usize>,
    /// The POS group shares its line with a language tag.
    pub has_inline_pos: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryFile {
    pub name: String,
    pub contents: String,
}

fn pos_names(line: &TaggedLine) -> Option<Vec<String>> {
    if line.is_url {
        return None;
    }
    if let Some(names) = &line.part_of_speech {
        return Some(names.clone());
    }
    line.language_code
        .as_ref()
        .and_then(|_| trailing_pos(&line.text))
        .map(|pos| pos.names)
}

fn file_safe(word: &str) -> String {
    word.chars()
        .map(|c| if matches!(c, '/' | '\\' | ':') { '_' } else { c })
        .collect()
}

impl Stanza {
    pub fn analyze(lines: Vec<String>) -> Self {
        let tagged: Vec<TaggedLine> = lines
            .iter()
            .enumerate()
            .map(|(idx, line)| tag_line(&RawLine::new(line.as_str(), idx + 1)))
            .collect();

        let pos = tagged
            .iter()
            .enumerate()
            .find_map(|(idx, line)| pos_names(line).map(|names| (idx, names)));

        let t = tables();
        let part_of_speech = pos.as_ref().map(|(_, names)| {
            names
                .iter()
                .map(|name| t.pos_code(name).unwrap_or(name.as_str()))
                .collect::<Vec<_>>()
                .join("-")
        });
        let pos_line_index = pos.map(|(idx, _)| idx);
        let has_inline_pos =
            pos_line_index.is_some_and(|idx| tagged[idx].language_code.is_some());

        let headword = find_headword(&EntryGroup::from_lines(tagged)).map(|(word, _)| word);

        Stanza {
            lines,
            part_of_speech,
            headword,
            pos_line_index,
            has_inline_pos,
        }
    }

    /// `<headword>_<pos>.txt`, when both are known.
    pub fn output_name(&self) -> Option<String> {
        let headword = self.headword.as_deref()?;
        let pos = self.part_of_speech.as_deref()?;
        Some(format!("{}_{}.txt", file_safe(headword), pos))
    }

    /// Stanza text without the POS marker.
    pub fn history_text(&self) -> Option<String> {
        let pos_idx = self.pos_line_index?;
        let mut out = Vec::with_capacity(self.lines.len());

        for (idx, line) in self.lines.iter().enumerate() {
            if idx != pos_idx {
                out.push(line.trim().to_string());
            } else if self.has_inline_pos {
                out.push(strip_pos_group(line));
            }
        }

        let mut text = out.join("\n");
        text.push('\n');
        Some(text)
    }

    pub fn history_file(&self) -> Option<HistoryFile> {
        Some(HistoryFile {
            name: self.output_name()?,
            contents: self.history_text()?,
        })
    }
}

/// Remove the POS group from a raw line, wherever the tag sits around it.
/// The group is located in the line as written, so its inner spacing is
/// irrelevant; only bracket tags may follow it.
fn strip_pos_group(line: &str) -> String {
    let group = PAREN_GROUP.find_iter(line).filter(|m| {
        BRACKET_TAG.replace_all(&line[m.end()..], "").trim().is_empty()
            && trailing_pos(m.as_str()).is_some()
    });
    match group.last() {
        Some(m) => format!("{} {}", &line[..m.start()], &line[m.end()..])
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" "),
        None => line.trim().to_string(),
    }
}

pub fn split_stanzas(text: &str) -> Vec<Stanza> {
    split_blocks(&normalize_text(text))
        .into_iter()
        .map(|block| Stanza::analyze(block.into_iter().map(|line| line.content).collect()))
        .collect()
}

pub fn extract_histories(text: &str) -> Vec<HistoryFile> {
    split_stanzas(text)
        .iter()
        .filter_map(Stanza::history_file)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stanza(text: &str) -> Stanza {
        split_stanzas(text).remove(0)
    }

    #[test]
    fn separate_pos_line_is_dropped() {
        let s = stanza("aquarius [L]\naiguiere [OF]\newer [ME]\neuar -s (m n)\n");
        assert_eq!(s.part_of_speech.as_deref(), Some("n"));
        assert_eq!(s.headword.as_deref(), Some("ewer"));
        assert_eq!(s.pos_line_index, Some(3));
        assert!(!s.has_inline_pos);
        assert_eq!(s.output_name().as_deref(), Some("ewer_n.txt"));
        assert_eq!(
            s.history_text().as_deref(),
            Some("aquarius [L]\naiguiere [OF]\newer [ME]\n")
        );
    }

    #[test]
    fn inline_pos_only_group_is_stripped() {
        let s = stanza("abandonner [OF]\nabandon [ME] (v)\nhttps://example.com/abandon\n");
        assert!(s.has_inline_pos);
        assert_eq!(s.output_name().as_deref(), Some("abandon_v.txt"));
        assert_eq!(
            s.history_text().as_deref(),
            Some("abandonner [OF]\nabandon [ME]\nhttps://example.com/abandon\n")
        );
    }

    #[test]
    fn inline_pos_before_tag() {
        assert_eq!(strip_pos_group("abandon (v) [ME]"), "abandon [ME]");
    }

    #[test]
    fn inline_pos_with_irregular_spacing() {
        let files = extract_histories("abandonner [OF]\nabandon [ME] (n,  v)\n");
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].name, "abandon_n-v.txt");
        assert_eq!(files[0].contents, "abandonner [OF]\nabandon [ME]\n");
        assert_eq!(strip_pos_group("abandon  ( v )   [ME]"), "abandon [ME]");
    }

    #[test]
    fn only_the_trailing_pos_group_is_cut() {
        assert_eq!(
            strip_pos_group("abandon (archaic) [ME] (v)"),
            "abandon (archaic) [ME]"
        );
    }

    #[test]
    fn multiple_pos_codes_joined() {
        let s = stanza("fyr [OE]\nfire [ME]\nfyre (n, v)\n");
        assert_eq!(s.output_name().as_deref(), Some("fire_n-v.txt"));
    }

    #[test]
    fn stanza_without_pos_is_skipped() {
        let s = stanza("aqua [L]\nwater [ME]\nwotter\n");
        assert!(s.part_of_speech.is_none());
        assert!(s.history_file().is_none());
    }

    #[test]
    fn stanza_without_headword_is_skipped() {
        let s = stanza("wotter (n)\naqua [L]\n");
        assert_eq!(s.part_of_speech.as_deref(), Some("n"));
        assert!(s.headword.is_none());
        assert!(s.history_file().is_none());
    }

    #[test]
    fn extraction_counts_only_qualifying_stanzas() {
        let text = "aqua [L]\nwater [ME]\nwotter (n)\n\n\
                    fons [L]\nfount [ME]\nfaunt\n\n\
                    abandonner [OF]\nabandon [ME] (v)\n";
        let files = extract_histories(text);
        let names: Vec<&str> = files.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["water_n.txt", "abandon_v.txt"]);
    }

    #[test]
    fn headword_made_file_safe() {
        let s = stanza("x [L]\nand/or [ME]\nandor (conj)\n");
        assert_eq!(s.output_name().as_deref(), Some("and_or_conj.txt"));
    }
}
